use crate::model::policy::{PolicyScenario, SubsidyTargeting};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct PolicyConfig {
    pub targeting: SubsidyTargeting,
    /// fare elasticity used for the demand induced by a subsidy
    pub induced_demand_elasticity: f64,
    pub scenarios: Vec<PolicyScenario>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            targeting: SubsidyTargeting::UnaffordableOnly,
            induced_demand_elasticity: -0.5,
            scenarios: PolicyScenario::defaults(),
        }
    }
}
