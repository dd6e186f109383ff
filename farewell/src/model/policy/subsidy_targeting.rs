use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// which trips of a subsidized income group receive the subsidy
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyTargeting {
    /// only trips whose fare is currently unaffordable
    #[default]
    UnaffordableOnly,
    AllTrips,
}

impl Display for SubsidyTargeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubsidyTargeting::UnaffordableOnly => write!(f, "unaffordable trips only"),
            SubsidyTargeting::AllTrips => write!(f, "all trips"),
        }
    }
}
