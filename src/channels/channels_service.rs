use crate::channels::channels_model::{ChannelComparison, KpiMetrics, RetentionPoint};
use crate::utils::numeric_utils::{round_to, sanitize_non_negative};

/// Produces the canonical form of a channel record.
///
/// Numeric fields are sanitized (non-finite and negative values floored at
/// zero), then `cpi` is recomputed from spend/installs and `roas` from
/// ltv30/cpi whenever the source fields are positive. Supplied `cpi`/`roas`
/// values only survive when their recompute source is unavailable. The
/// operation is idempotent.
pub fn normalize_channel(channel: &ChannelComparison) -> ChannelComparison {
    let spend = sanitize_non_negative(channel.spend);
    let installs = sanitize_non_negative(channel.installs);
    let cpi = if installs > 0.0 {
        round_to(spend / installs, 2)
    } else {
        sanitize_non_negative(channel.cpi)
    };
    let ltv30 = sanitize_non_negative(channel.ltv30);
    let roas = if cpi > 0.0 {
        round_to((ltv30 / cpi) * 100.0, 1)
    } else {
        sanitize_non_negative(channel.roas)
    };

    ChannelComparison {
        channel_id: channel.channel_id.clone(),
        channel_name: channel.channel_name.clone(),
        spend,
        installs,
        cpi,
        ltv30,
        roas,
        breakeven_days: round_to(sanitize_non_negative(channel.breakeven_days), 0),
        color: channel.color.clone(),
    }
}

/// Folds a channel list into portfolio KPI totals.
///
/// An empty list returns `fallback` unchanged. Each channel's imputed gross
/// return is `spend * roas/100`; breakeven days are spend-weighted and LTV is
/// install-weighted, each falling back field-by-field when its weight total
/// is zero. Every field is re-sanitized so unnormalized input cannot poison
/// the totals.
pub fn aggregate_kpi(channels: &[ChannelComparison], fallback: &KpiMetrics) -> KpiMetrics {
    if channels.is_empty() {
        return fallback.clone();
    }

    let total_spend: f64 = channels.iter().map(|c| sanitize_non_negative(c.spend)).sum();
    let total_installs: f64 = channels
        .iter()
        .map(|c| sanitize_non_negative(c.installs))
        .sum();
    let total_revenue: f64 = channels
        .iter()
        .map(|c| sanitize_non_negative(c.spend) * (sanitize_non_negative(c.roas) / 100.0))
        .sum();

    let average_cpi = if total_installs > 0.0 {
        total_spend / total_installs
    } else {
        fallback.average_cpi
    };
    let overall_roas = if total_spend > 0.0 {
        (total_revenue / total_spend) * 100.0
    } else {
        fallback.overall_roas
    };

    let predicted_breakeven = if total_spend > 0.0 {
        channels
            .iter()
            .map(|c| sanitize_non_negative(c.breakeven_days) * sanitize_non_negative(c.spend))
            .sum::<f64>()
            / total_spend
    } else {
        fallback.predicted_breakeven
    };

    let current_ltv = if total_installs > 0.0 {
        channels
            .iter()
            .map(|c| sanitize_non_negative(c.ltv30) * sanitize_non_negative(c.installs))
            .sum::<f64>()
            / total_installs
    } else {
        fallback.current_ltv
    };

    KpiMetrics {
        total_spend: round_to(total_spend, 0),
        total_installs: round_to(total_installs, 0),
        total_revenue: round_to(total_revenue, 0),
        average_cpi: round_to(average_cpi, 2),
        overall_roas: round_to(overall_roas, 1),
        predicted_breakeven: round_to(predicted_breakeven, 0),
        current_ltv: round_to(current_ltv, 2),
    }
}

/// Sanitizes retention rows and re-sorts them by day ascending.
pub fn normalize_retention(rows: &[RetentionPoint]) -> Vec<RetentionPoint> {
    let mut normalized: Vec<RetentionPoint> = rows
        .iter()
        .map(|row| RetentionPoint {
            day: round_to(sanitize_non_negative(row.day), 0),
            rate: round_to(sanitize_non_negative(row.rate), 1),
        })
        .collect();
    normalized.sort_by(|a, b| a.day.total_cmp(&b.day));
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_channel() -> ChannelComparison {
        ChannelComparison {
            channel_id: "test".to_string(),
            channel_name: "Test Channel".to_string(),
            spend: 10000.0,
            installs: 5000.0,
            cpi: 99.0,
            ltv30: 3.0,
            roas: 1.0,
            breakeven_days: 30.4,
            color: "#00b4d8".to_string(),
        }
    }

    #[test]
    fn test_normalize_recomputes_derived_fields() {
        let normalized = normalize_channel(&test_channel());
        assert_eq!(normalized.cpi, 2.0);
        assert_eq!(normalized.roas, 150.0);
        assert_eq!(normalized.breakeven_days, 30.0);
        // Source fields pass through untouched.
        assert_eq!(normalized.spend, 10000.0);
        assert_eq!(normalized.installs, 5000.0);
        assert_eq!(normalized.ltv30, 3.0);
        assert_eq!(normalized.channel_id, "test");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_channel(&test_channel());
        let twice = normalize_channel(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_sanitizes_invalid_numbers() {
        let mut channel = test_channel();
        channel.spend = f64::NAN;
        channel.installs = -200.0;
        channel.ltv30 = f64::NEG_INFINITY;
        channel.cpi = 1.25;
        channel.roas = -50.0;
        let normalized = normalize_channel(&channel);
        assert_eq!(normalized.spend, 0.0);
        assert_eq!(normalized.installs, 0.0);
        assert_eq!(normalized.ltv30, 0.0);
        // installs == 0 keeps the sanitized supplied cpi; cpi > 0 recomputes
        // roas from the zeroed ltv30.
        assert_eq!(normalized.cpi, 1.25);
        assert_eq!(normalized.roas, 0.0);
    }

    #[test]
    fn test_normalize_carries_supplied_values_when_sources_are_zero() {
        let mut channel = test_channel();
        channel.installs = 0.0;
        channel.cpi = 0.0;
        channel.roas = 180.0;
        let normalized = normalize_channel(&channel);
        // No installs and no cpi: both derived fields keep their sanitized input.
        assert_eq!(normalized.cpi, 0.0);
        assert_eq!(normalized.roas, 180.0);
    }

    #[test]
    fn test_aggregate_empty_returns_fallback() {
        let fallback = KpiMetrics::default();
        let aggregated = aggregate_kpi(&[], &fallback);
        assert_eq!(aggregated, fallback);
    }

    #[test]
    fn test_aggregate_single_channel() {
        let mut channel = test_channel();
        channel.spend = 1000.0;
        channel.installs = 500.0;
        channel.roas = 150.0;
        let aggregated = aggregate_kpi(&[channel], &KpiMetrics::default());
        assert_eq!(aggregated.total_spend, 1000.0);
        assert_eq!(aggregated.total_installs, 500.0);
        assert_eq!(aggregated.total_revenue, 1500.0);
        assert_eq!(aggregated.average_cpi, 2.0);
        assert_eq!(aggregated.overall_roas, 150.0);
    }

    #[test]
    fn test_aggregate_weighted_averages() {
        let mut a = test_channel();
        a.spend = 1000.0;
        a.installs = 100.0;
        a.breakeven_days = 20.0;
        a.ltv30 = 2.0;
        let mut b = test_channel();
        b.spend = 3000.0;
        b.installs = 300.0;
        b.breakeven_days = 40.0;
        b.ltv30 = 4.0;

        let aggregated = aggregate_kpi(&[a, b], &KpiMetrics::default());
        // Spend-weighted: (20*1000 + 40*3000) / 4000 = 35.
        assert_eq!(aggregated.predicted_breakeven, 35.0);
        // Install-weighted: (2*100 + 4*300) / 400 = 3.5.
        assert_eq!(aggregated.current_ltv, 3.5);
    }

    #[test]
    fn test_aggregate_zero_spend_falls_back_per_field() {
        let mut channel = test_channel();
        channel.spend = 0.0;
        channel.installs = 0.0;
        channel.ltv30 = 0.0;
        let fallback = KpiMetrics::default();
        let aggregated = aggregate_kpi(&[channel], &fallback);
        assert_eq!(aggregated.total_spend, 0.0);
        assert_eq!(aggregated.average_cpi, fallback.average_cpi);
        assert_eq!(aggregated.overall_roas, fallback.overall_roas);
        assert_eq!(aggregated.predicted_breakeven, fallback.predicted_breakeven);
        assert_eq!(aggregated.current_ltv, fallback.current_ltv);
    }

    #[test]
    fn test_normalize_retention_rounds_and_sorts() {
        let rows = vec![
            RetentionPoint { day: 30.0, rate: 6.47 },
            RetentionPoint { day: 1.4, rate: 42.0 },
            RetentionPoint { day: 7.0, rate: f64::NAN },
        ];
        let normalized = normalize_retention(&rows);
        assert_eq!(normalized[0].day, 1.0);
        assert_eq!(normalized[0].rate, 42.0);
        assert_eq!(normalized[1].day, 7.0);
        assert_eq!(normalized[1].rate, 0.0);
        assert_eq!(normalized[2].day, 30.0);
        assert_eq!(normalized[2].rate, 6.5);
    }
}
