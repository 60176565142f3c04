use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::channels::channels_model::{ChannelComparison, KpiMetrics, RetentionPoint};
use crate::channels::channels_service::{aggregate_kpi, normalize_channel, normalize_retention};
use crate::config::config_model::{
    DashboardConfig, ExportPayload, ImportPayload, EXPORT_PAYLOAD_VERSION,
};
use crate::config::config_repository::ConfigRepositoryTrait;
use crate::constants::{
    CHANNELS_SETTING_KEY, KPI_SETTING_KEY, PARAMS_SETTING_KEY, RETENTION_SETTING_KEY,
};
use crate::errors::{ConfigError, Error, Result, ValidationError};
use crate::projection::projection_model::PredictionParams;

/// Dashboard configuration state with write-through persistence.
///
/// State is loaded once at construction (missing or unreadable sections fall
/// back to the built-in defaults) and every mutation is persisted to the
/// injected repository before it returns.
#[async_trait]
pub trait ConfigServiceTrait: Send + Sync {
    fn get_params(&self) -> Result<PredictionParams>;
    fn get_kpi_metrics(&self) -> Result<KpiMetrics>;
    fn get_channels(&self) -> Result<Vec<ChannelComparison>>;
    fn get_retention(&self) -> Result<Vec<RetentionPoint>>;

    async fn update_params(&self, params: PredictionParams) -> Result<()>;

    /// Applies a full dashboard edit: channels are normalized, retention rows
    /// are rounded and re-sorted, and the KPI aggregate is re-derived from
    /// the normalized channels with `kpi` as the fallback. Returns the merged
    /// KPI metrics.
    async fn save_dashboard(
        &self,
        kpi: KpiMetrics,
        channels: Vec<ChannelComparison>,
        retention: Vec<RetentionPoint>,
    ) -> Result<KpiMetrics>;

    async fn add_channel(&self, channel_name: &str) -> Result<ChannelComparison>;
    async fn update_channel(&self, channel: ChannelComparison) -> Result<ChannelComparison>;
    async fn remove_channel(&self, channel_id: &str) -> Result<()>;
    async fn reset_defaults(&self) -> Result<()>;

    fn export_payload(&self) -> Result<ExportPayload>;
    fn export_json(&self) -> Result<String>;

    /// Replaces KPI, channel and retention state from an exported document.
    /// The payload is parsed and normalized in full before any state changes,
    /// so a failed import leaves everything untouched.
    async fn import_json(&self, raw: &str) -> Result<()>;
}

pub struct ConfigService {
    repository: Arc<dyn ConfigRepositoryTrait>,
    state: RwLock<DashboardConfig>,
}

impl ConfigService {
    pub fn new(repository: Arc<dyn ConfigRepositoryTrait>) -> Self {
        let defaults = DashboardConfig::default();
        let state = DashboardConfig {
            params: load_section(repository.as_ref(), PARAMS_SETTING_KEY, defaults.params),
            kpi_metrics: load_section(repository.as_ref(), KPI_SETTING_KEY, defaults.kpi_metrics),
            channels: load_section(repository.as_ref(), CHANNELS_SETTING_KEY, defaults.channels),
            retention_data: load_section(
                repository.as_ref(),
                RETENTION_SETTING_KEY,
                defaults.retention_data,
            ),
        };
        Self {
            repository,
            state: RwLock::new(state),
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, DashboardConfig>> {
        self.state
            .read()
            .map_err(|e| Error::Config(ConfigError::CacheError(e.to_string())))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, DashboardConfig>> {
        self.state
            .write()
            .map_err(|e| Error::Config(ConfigError::CacheError(e.to_string())))
    }

    async fn persist_section<T: Serialize>(&self, setting_key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.repository.update_setting(setting_key, &encoded).await?;
        debug!("Persisted configuration section '{}'", setting_key);
        Ok(())
    }

    async fn apply_channel_edit(
        &self,
        channels: Vec<ChannelComparison>,
    ) -> Result<()> {
        let kpi = {
            let mut state = self.write_state()?;
            let kpi = aggregate_kpi(&channels, &state.kpi_metrics);
            state.channels = channels.clone();
            state.kpi_metrics = kpi.clone();
            kpi
        };
        self.persist_section(CHANNELS_SETTING_KEY, &channels).await?;
        self.persist_section(KPI_SETTING_KEY, &kpi).await
    }
}

#[async_trait]
impl ConfigServiceTrait for ConfigService {
    fn get_params(&self) -> Result<PredictionParams> {
        Ok(self.read_state()?.params.clone())
    }

    fn get_kpi_metrics(&self) -> Result<KpiMetrics> {
        Ok(self.read_state()?.kpi_metrics.clone())
    }

    fn get_channels(&self) -> Result<Vec<ChannelComparison>> {
        Ok(self.read_state()?.channels.clone())
    }

    fn get_retention(&self) -> Result<Vec<RetentionPoint>> {
        Ok(self.read_state()?.retention_data.clone())
    }

    async fn update_params(&self, params: PredictionParams) -> Result<()> {
        {
            let mut state = self.write_state()?;
            state.params = params.clone();
        }
        self.persist_section(PARAMS_SETTING_KEY, &params).await
    }

    async fn save_dashboard(
        &self,
        kpi: KpiMetrics,
        channels: Vec<ChannelComparison>,
        retention: Vec<RetentionPoint>,
    ) -> Result<KpiMetrics> {
        let channels: Vec<ChannelComparison> = channels.iter().map(normalize_channel).collect();
        let retention = normalize_retention(&retention);
        let merged_kpi = aggregate_kpi(&channels, &kpi);

        {
            let mut state = self.write_state()?;
            state.kpi_metrics = merged_kpi.clone();
            state.channels = channels.clone();
            state.retention_data = retention.clone();
        }
        self.persist_section(KPI_SETTING_KEY, &merged_kpi).await?;
        self.persist_section(CHANNELS_SETTING_KEY, &channels).await?;
        self.persist_section(RETENTION_SETTING_KEY, &retention).await?;
        Ok(merged_kpi)
    }

    async fn add_channel(&self, channel_name: &str) -> Result<ChannelComparison> {
        let (channel, channels) = {
            let state = self.read_state()?;
            let color = ChannelComparison::color_for_index(state.channels.len());
            let channel = normalize_channel(&ChannelComparison::new(channel_name, color));
            let mut channels = state.channels.clone();
            channels.push(channel.clone());
            (channel, channels)
        };
        self.apply_channel_edit(channels).await?;
        Ok(channel)
    }

    async fn update_channel(&self, channel: ChannelComparison) -> Result<ChannelComparison> {
        let normalized = normalize_channel(&channel);
        let channels = {
            let state = self.read_state()?;
            let mut channels = state.channels.clone();
            let position = channels
                .iter()
                .position(|c| c.channel_id == normalized.channel_id)
                .ok_or_else(|| {
                    Error::Validation(ValidationError::InvalidInput(format!(
                        "Unknown channel id '{}'",
                        normalized.channel_id
                    )))
                })?;
            channels[position] = normalized.clone();
            channels
        };
        self.apply_channel_edit(channels).await?;
        Ok(normalized)
    }

    async fn remove_channel(&self, channel_id: &str) -> Result<()> {
        let channels = {
            let state = self.read_state()?;
            let mut channels = state.channels.clone();
            let before = channels.len();
            channels.retain(|c| c.channel_id != channel_id);
            if channels.len() == before {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown channel id '{}'",
                    channel_id
                ))));
            }
            channels
        };
        self.apply_channel_edit(channels).await
    }

    async fn reset_defaults(&self) -> Result<()> {
        let defaults = DashboardConfig::default();
        {
            let mut state = self.write_state()?;
            *state = defaults.clone();
        }
        self.persist_section(PARAMS_SETTING_KEY, &defaults.params).await?;
        self.persist_section(KPI_SETTING_KEY, &defaults.kpi_metrics).await?;
        self.persist_section(CHANNELS_SETTING_KEY, &defaults.channels).await?;
        self.persist_section(RETENTION_SETTING_KEY, &defaults.retention_data).await
    }

    fn export_payload(&self) -> Result<ExportPayload> {
        let state = self.read_state()?;
        Ok(ExportPayload {
            version: EXPORT_PAYLOAD_VERSION,
            exported_at: Utc::now(),
            kpi_metrics: state.kpi_metrics.clone(),
            channels: state.channels.clone(),
            retention_data: state.retention_data.clone(),
        })
    }

    fn export_json(&self) -> Result<String> {
        let payload = self.export_payload()?;
        Ok(serde_json::to_string_pretty(&payload)?)
    }

    async fn import_json(&self, raw: &str) -> Result<()> {
        let parsed: ImportPayload = serde_json::from_str(raw)?;

        let kpi = parsed
            .kpi_metrics
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("kpiMetrics".to_string())))?;
        let channels = parsed
            .channels
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("channels".to_string())))?;
        let retention = parsed.retention_data.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("retentionData".to_string()))
        })?;

        // Imported channels and retention rows are re-normalized before any
        // state is swapped in; KPI metrics are applied as supplied.
        let channels: Vec<ChannelComparison> = channels.iter().map(normalize_channel).collect();
        let retention = normalize_retention(&retention);

        {
            let mut state = self.write_state()?;
            state.kpi_metrics = kpi.clone();
            state.channels = channels.clone();
            state.retention_data = retention.clone();
        }
        self.persist_section(KPI_SETTING_KEY, &kpi).await?;
        self.persist_section(CHANNELS_SETTING_KEY, &channels).await?;
        self.persist_section(RETENTION_SETTING_KEY, &retention).await?;
        debug!("Imported configuration document with {} channels", channels.len());
        Ok(())
    }
}

fn load_section<T: DeserializeOwned>(
    repository: &dyn ConfigRepositoryTrait,
    setting_key: &str,
    fallback: T,
) -> T {
    match repository.get_setting(setting_key) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Stored value under '{}' is unreadable, falling back to defaults: {}",
                    setting_key, e
                );
                fallback
            }
        },
        Err(Error::Config(ConfigError::MissingKey(_))) => fallback,
        Err(e) => {
            warn!(
                "Failed to read configuration key '{}', falling back to defaults: {}",
                setting_key, e
            );
            fallback
        }
    }
}
