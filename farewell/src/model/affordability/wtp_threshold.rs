use serde::{Deserialize, Serialize};

/// utility level a mode has to reach for its fare to count as acceptable
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WtpThreshold {
    /// utility of the most attractive other mode
    #[default]
    BestAlternative,
    Fixed { utility: f64 },
}
