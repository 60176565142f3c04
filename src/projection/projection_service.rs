use crate::constants::{
    EARLY_DECAY_BASE, LATE_DECAY_BASE, MID_DECAY_BASE, PLATFORM_FEE_RATE, PROJECTION_HORIZON_DAYS,
};
use crate::projection::projection_errors::ProjectionError;
use crate::projection::projection_model::{PredictionParams, ProjectionSummary, RoiPrediction};
use crate::utils::numeric_utils::round_to;

/// Projects cumulative revenue, cost and ROI for a single acquisition cohort
/// over the full 180-day horizon.
///
/// The entire budget is treated as spent at day 1 on one cohort of
/// `budget / cpi` users; the cohort is never regenerated. Reserved parameters
/// (`paying_rate`, `arppu`, `target_roas`) are not consumed and therefore not
/// validated.
pub fn project(params: &PredictionParams) -> Result<Vec<RoiPrediction>, ProjectionError> {
    validate(params)?;

    let users_acquired = params.acquisition_budget / params.cpi;
    let total_cost = params.acquisition_budget;

    let mut predictions = Vec::with_capacity(PROJECTION_HORIZON_DAYS as usize);
    let mut cumulative_revenue = 0.0_f64;

    for day in 1..=PROJECTION_HORIZON_DAYS {
        let active_users = users_acquired * retention_rate(params, day);
        let gross_revenue = active_users * params.arpu;
        let daily_revenue = gross_revenue * (1.0 - PLATFORM_FEE_RATE);

        // The accumulator stays unrounded; only the stored value is rounded,
        // and roi is derived from the stored value so the record is
        // self-consistent.
        cumulative_revenue += daily_revenue;
        let revenue = round_to(cumulative_revenue, 2);
        let roi = if total_cost > 0.0 {
            round_to((revenue / total_cost) * 100.0, 1)
        } else {
            0.0
        };

        predictions.push(RoiPrediction {
            day,
            revenue,
            cost: total_cost,
            roi,
            breakeven: roi >= 100.0,
        });
    }

    Ok(predictions)
}

/// First day whose cumulative ROI reaches 100%, if the series ever gets there.
pub fn breakeven_day(predictions: &[RoiPrediction]) -> Option<u32> {
    predictions.iter().find(|p| p.breakeven).map(|p| p.day)
}

/// ROI of the final projected day, used as the predicted-ROAS display value.
pub fn terminal_roi(predictions: &[RoiPrediction]) -> Option<f64> {
    predictions.last().map(|p| p.roi)
}

pub fn summarize(predictions: &[RoiPrediction]) -> ProjectionSummary {
    ProjectionSummary {
        breakeven_day: breakeven_day(predictions),
        terminal_roi: terminal_roi(predictions),
    }
}

/// Piecewise retention curve: the D1/D7/D30 anchors each start a regime that
/// decays daily by a fixed base (0.85, 0.92, 0.97).
fn retention_rate(params: &PredictionParams, day: u32) -> f64 {
    if day == 1 {
        params.d1_retention / 100.0
    } else if day <= 7 {
        params.d1_retention / 100.0 * EARLY_DECAY_BASE.powi(day as i32 - 1)
    } else if day <= 30 {
        params.d7_retention / 100.0 * MID_DECAY_BASE.powi(day as i32 - 7)
    } else {
        params.d30_retention / 100.0 * LATE_DECAY_BASE.powi(day as i32 - 30)
    }
}

fn validate(params: &PredictionParams) -> Result<(), ProjectionError> {
    let consumed = [
        ("cpi", params.cpi),
        ("arpu", params.arpu),
        ("d1Retention", params.d1_retention),
        ("d7Retention", params.d7_retention),
        ("d30Retention", params.d30_retention),
        ("dailyBudget", params.acquisition_budget),
    ];
    for (name, value) in consumed {
        if !value.is_finite() {
            return Err(ProjectionError::NonFiniteParam(name));
        }
    }
    if params.cpi <= 0.0 {
        return Err(ProjectionError::NonPositiveCpi(params.cpi));
    }
    Ok(())
}
