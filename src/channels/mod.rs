pub mod channels_model;
pub mod channels_service;

pub use channels_model::{ChannelComparison, KpiMetrics, RetentionPoint};
pub use channels_service::{aggregate_kpi, normalize_channel, normalize_retention};
