use super::{MarketOutcome, ObjectiveWeights};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// what a fare is chosen to maximize
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WelfareObjective {
    Revenue,
    Profit,
    Benefit,
    Demand,
    SocialWelfare,
    /// weighted sum of the other five
    Weighted,
}

impl WelfareObjective {
    pub const ALL: [WelfareObjective; 6] = [
        WelfareObjective::Revenue,
        WelfareObjective::Profit,
        WelfareObjective::Benefit,
        WelfareObjective::Demand,
        WelfareObjective::SocialWelfare,
        WelfareObjective::Weighted,
    ];

    /// short model name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            WelfareObjective::Revenue => "Max-R",
            WelfareObjective::Profit => "Max-P",
            WelfareObjective::Benefit => "Max-B",
            WelfareObjective::Demand => "Max-D",
            WelfareObjective::SocialWelfare => "Max-S",
            WelfareObjective::Weighted => "Max-W",
        }
    }

    pub fn value(&self, outcome: &MarketOutcome, weights: &ObjectiveWeights) -> f64 {
        match self {
            WelfareObjective::Revenue => outcome.revenue,
            WelfareObjective::Profit => outcome.profit,
            WelfareObjective::Benefit => outcome.consumer_surplus,
            WelfareObjective::Demand => outcome.demand,
            WelfareObjective::SocialWelfare => outcome.social_welfare,
            WelfareObjective::Weighted => weights.value(outcome),
        }
    }
}

impl Display for WelfareObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
