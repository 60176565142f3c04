/// Number of simulated days in a projection run
pub const PROJECTION_HORIZON_DAYS: u32 = 180;

/// Store platform revenue share withheld from gross revenue (30%)
pub const PLATFORM_FEE_RATE: f64 = 0.30;

/// Daily decay base inside the D1..D7 retention regime
pub const EARLY_DECAY_BASE: f64 = 0.85;

/// Daily decay base inside the D7..D30 retention regime
pub const MID_DECAY_BASE: f64 = 0.92;

/// Daily decay base beyond D30
pub const LATE_DECAY_BASE: f64 = 0.97;

/// Configuration store key for prediction parameters
pub const PARAMS_SETTING_KEY: &str = "game-ad-roi:params";

/// Configuration store key for portfolio KPI metrics
pub const KPI_SETTING_KEY: &str = "game-ad-roi:kpi";

/// Configuration store key for the channel list
pub const CHANNELS_SETTING_KEY: &str = "game-ad-roi:channels";

/// Configuration store key for retention curve rows
pub const RETENTION_SETTING_KEY: &str = "game-ad-roi:retention";

/// Color palette cycled when new channels are created
pub const CHANNEL_COLORS: [&str; 7] = [
    "#00b4d8", "#00f5a0", "#a855f7", "#f59e0b", "#ec4899", "#6366f1", "#14b8a6",
];
