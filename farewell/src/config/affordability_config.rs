use crate::model::affordability::WtpThreshold;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AffordabilityConfig {
    pub wtp_threshold: WtpThreshold,
    /// weight of waiting time relative to in-vehicle time in generalized cost
    pub wait_time_weight: f64,
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            wtp_threshold: WtpThreshold::BestAlternative,
            wait_time_weight: 1.5,
        }
    }
}
