use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channels::channels_model::{
    default_channels, default_retention, ChannelComparison, KpiMetrics, RetentionPoint,
};
use crate::projection::projection_model::PredictionParams;

/// Version tag of the export document format.
pub const EXPORT_PAYLOAD_VERSION: u32 = 1;

/// Full in-memory dashboard state held by the configuration service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub params: PredictionParams,
    pub kpi_metrics: KpiMetrics,
    pub channels: Vec<ChannelComparison>,
    pub retention_data: Vec<RetentionPoint>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            params: PredictionParams::default(),
            kpi_metrics: KpiMetrics::default(),
            channels: default_channels(),
            retention_data: default_retention(),
        }
    }
}

/// Exported configuration document, version 1.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub kpi_metrics: KpiMetrics,
    pub channels: Vec<ChannelComparison>,
    pub retention_data: Vec<RetentionPoint>,
}

/// Lenient mirror of [`ExportPayload`] used on import: every section is
/// optional so missing fields surface as validation errors instead of
/// deserialization failures.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub kpi_metrics: Option<KpiMetrics>,
    #[serde(default)]
    pub channels: Option<Vec<ChannelComparison>>,
    #[serde(default)]
    pub retention_data: Option<Vec<RetentionPoint>>,
}
