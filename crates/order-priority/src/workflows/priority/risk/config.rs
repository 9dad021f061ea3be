use serde::{Deserialize, Serialize};

pub const DEFAULT_SILENCE_THRESHOLD_DAYS: u32 = 7;
pub const DEFAULT_FINANCING_PENDING_THRESHOLD_DAYS: u32 = 2;
pub const DEFAULT_HIGH_VALUE_THRESHOLD: f64 = 200_000.0;

/// Thresholds shared by the risk calculators and the action rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskScoringConfig {
    /// Days without contact before silence starts adding risk.
    pub silence_threshold_days: u32,
    /// Days a financing application may sit pending before it counts as stalled.
    pub financing_pending_threshold_days: u32,
    /// Order amount at or above which personal follow-up is warranted.
    pub high_value_threshold: f64,
}

impl Default for RiskScoringConfig {
    fn default() -> Self {
        Self {
            silence_threshold_days: DEFAULT_SILENCE_THRESHOLD_DAYS,
            financing_pending_threshold_days: DEFAULT_FINANCING_PENDING_THRESHOLD_DAYS,
            high_value_threshold: DEFAULT_HIGH_VALUE_THRESHOLD,
        }
    }
}
