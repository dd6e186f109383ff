use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// income bracket of a survey respondent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncomeGroup {
    Low,
    #[serde(alias = "medium")]
    Mid,
    High,
}

impl IncomeGroup {
    pub const ALL: [IncomeGroup; 3] = [IncomeGroup::Low, IncomeGroup::Mid, IncomeGroup::High];

    /// ordinal income level, 1 (low) through 3 (high)
    pub fn level(&self) -> u8 {
        match self {
            IncomeGroup::Low => 1,
            IncomeGroup::Mid => 2,
            IncomeGroup::High => 3,
        }
    }

    /// income level centered on the middle bracket, used for interaction terms
    pub fn centered_level(&self) -> f64 {
        f64::from(self.level()) - 2.0
    }
}

impl FromStr for IncomeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "mid" | "medium" | "middle" => Ok(Self::Mid),
            "high" => Ok(Self::High),
            _ => Err(format!("unknown income bracket '{s}'")),
        }
    }
}

impl Display for IncomeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncomeGroup::Low => write!(f, "Low"),
            IncomeGroup::Mid => write!(f, "Mid"),
            IncomeGroup::High => write!(f, "High"),
        }
    }
}
