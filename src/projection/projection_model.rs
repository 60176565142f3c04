use serde::{Deserialize, Serialize};

/// Input parameters for the ROI projection.
///
/// The budget is a one-time cohort acquisition cost, not a recurring daily
/// spend; it keeps the historical `dailyBudget` name on the wire so existing
/// exported documents stay readable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionParams {
    /// Cost to acquire one user
    pub cpi: f64,

    /// Average revenue per user per day
    pub arpu: f64,

    /// Fraction of the cohort still active at day 1, as a percentage (0-100)
    pub d1_retention: f64,

    /// Day-7 retention anchor, percentage
    pub d7_retention: f64,

    /// Day-30 retention anchor, percentage
    pub d30_retention: f64,

    /// Reserved: carried for configuration compatibility, not consumed by the formula
    pub paying_rate: f64,

    /// Reserved: carried for configuration compatibility, not consumed by the formula
    pub arppu: f64,

    /// Total acquisition budget spent on the single cohort at day 1
    #[serde(rename = "dailyBudget")]
    pub acquisition_budget: f64,

    /// Reserved: display target only, not consumed by the formula
    #[serde(rename = "targetROAS")]
    pub target_roas: f64,
}

impl Default for PredictionParams {
    fn default() -> Self {
        Self {
            cpi: 1.80,
            arpu: 0.15,
            d1_retention: 42.0,
            d7_retention: 15.0,
            d30_retention: 6.5,
            paying_rate: 3.5,
            arppu: 25.0,
            acquisition_budget: 10000.0,
            target_roas: 120.0,
        }
    }
}

/// One projected day of the cohort simulation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoiPrediction {
    /// Simulated day, 1-based
    pub day: u32,

    /// Cumulative net revenue to date, rounded to 2 decimals
    pub revenue: f64,

    /// Total cost to date, constant across the horizon
    pub cost: f64,

    /// Cumulative ROI as a percentage, rounded to 1 decimal
    pub roi: f64,

    /// Whether cumulative ROI has reached 100%
    pub breakeven: bool,
}

/// Scalar outputs derived from a full projection series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    /// First day whose cumulative ROI reaches 100%, if any
    pub breakeven_day: Option<u32>,

    /// ROI of the final projected day
    pub terminal_roi: Option<f64>,
}
