use super::PolicyError;
use farewell_core::model::IncomeGroup;
use serde::{Deserialize, Serialize};

/// share of the fare paid by the subsidy, per income group
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SubsidyRates {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl SubsidyRates {
    pub fn new(low: f64, mid: f64, high: f64) -> SubsidyRates {
        SubsidyRates { low, mid, high }
    }

    pub fn rate(&self, group: IncomeGroup) -> f64 {
        match group {
            IncomeGroup::Low => self.low,
            IncomeGroup::Mid => self.mid,
            IncomeGroup::High => self.high,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PolicyScenario {
    pub name: String,
    pub rates: SubsidyRates,
}

impl PolicyScenario {
    pub fn new(name: &str, rates: SubsidyRates) -> PolicyScenario {
        PolicyScenario {
            name: name.to_string(),
            rates,
        }
    }

    /// current fares, then progressive, universal, targeted and environmental subsidies
    pub fn defaults() -> Vec<PolicyScenario> {
        vec![
            PolicyScenario::new("current", SubsidyRates::new(0.0, 0.0, 0.0)),
            PolicyScenario::new("progressive_subsidy", SubsidyRates::new(0.4, 0.2, 0.0)),
            PolicyScenario::new("universal_subsidy", SubsidyRates::new(0.2, 0.2, 0.2)),
            PolicyScenario::new("targeted_subsidy", SubsidyRates::new(0.5, 0.1, 0.0)),
            PolicyScenario::new("environmental_subsidy", SubsidyRates::new(0.3, 0.15, 0.05)),
        ]
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        for group in IncomeGroup::ALL {
            let rate = self.rates.rate(group);
            if !(0.0..=1.0).contains(&rate) {
                return Err(PolicyError::InvalidSubsidyRate {
                    scenario: self.name.clone(),
                    group: group.to_string(),
                    rate,
                });
            }
        }
        Ok(())
    }
}
