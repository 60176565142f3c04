use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::CHANNEL_COLORS;

/// One acquisition channel's performance record.
///
/// `cpi` and `roas` are derived fields: whenever spend/installs/ltv30 are
/// available and positive, normalization recomputes them and the supplied
/// values are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelComparison {
    pub channel_id: String,
    pub channel_name: String,
    pub spend: f64,
    pub installs: f64,
    pub cpi: f64,
    pub ltv30: f64,
    pub roas: f64,
    pub breakeven_days: f64,
    pub color: String,
}

impl ChannelComparison {
    /// Creates a channel with a fresh id and the standard new-channel template.
    pub fn new(channel_name: &str, color: &str) -> Self {
        Self {
            channel_id: Uuid::new_v4().to_string(),
            channel_name: channel_name.to_string(),
            spend: 10000.0,
            installs: 5000.0,
            cpi: 2.0,
            ltv30: 3.0,
            roas: 150.0,
            breakeven_days: 30.0,
            color: color.to_string(),
        }
    }

    /// Palette color for the channel at `index`, cycling through the palette.
    pub fn color_for_index(index: usize) -> &'static str {
        CHANNEL_COLORS[index % CHANNEL_COLORS.len()]
    }
}

/// Portfolio-level KPI aggregate across all channels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetrics {
    pub total_spend: f64,
    pub total_installs: f64,
    pub total_revenue: f64,
    #[serde(rename = "averageCPI")]
    pub average_cpi: f64,
    #[serde(rename = "overallROAS")]
    pub overall_roas: f64,
    pub predicted_breakeven: f64,
    #[serde(rename = "currentLTV")]
    pub current_ltv: f64,
}

impl Default for KpiMetrics {
    fn default() -> Self {
        Self {
            total_spend: 22000.0,
            total_installs: 13964.0,
            total_revenue: 28500.0,
            average_cpi: 1.58,
            overall_roas: 129.5,
            predicted_breakeven: 45.0,
            current_ltv: 4.25,
        }
    }
}

/// One observed point of the retention curve.
///
/// `day` is a float on purpose: imported documents may carry fractional or
/// junk values, which are sanitized and rounded instead of rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPoint {
    pub day: f64,
    pub rate: f64,
}

/// Built-in channel list used to seed first-run state and the reset operation.
pub fn default_channels() -> Vec<ChannelComparison> {
    let channel = |id: &str, name: &str, spend, installs, cpi, ltv30, roas, breakeven_days, color: &str| {
        ChannelComparison {
            channel_id: id.to_string(),
            channel_name: name.to_string(),
            spend,
            installs,
            cpi,
            ltv30,
            roas,
            breakeven_days,
            color: color.to_string(),
        }
    };

    vec![
        channel("facebook", "Facebook Ads", 150000.0, 60000.0, 2.50, 3.80, 152.0, 38.0, "#00b4d8"),
        channel("google", "Google UAC", 240000.0, 133333.0, 1.80, 4.20, 233.0, 28.0, "#00f5a0"),
        channel("tiktok", "TikTok Ads", 90000.0, 75000.0, 1.20, 2.85, 238.0, 32.0, "#a855f7"),
        channel("unity", "Unity Ads", 60000.0, 70588.0, 0.85, 2.10, 247.0, 25.0, "#f59e0b"),
        channel("applovin", "AppLovin", 120000.0, 80000.0, 1.50, 3.45, 230.0, 30.0, "#ec4899"),
    ]
}

/// Built-in retention curve used to seed first-run state.
pub fn default_retention() -> Vec<RetentionPoint> {
    [
        (1.0, 42.0),
        (2.0, 28.0),
        (3.0, 22.0),
        (7.0, 15.0),
        (14.0, 10.0),
        (30.0, 6.5),
        (60.0, 4.2),
        (90.0, 3.1),
    ]
    .into_iter()
    .map(|(day, rate)| RetentionPoint { day, rate })
    .collect()
}
