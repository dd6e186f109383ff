use crate::model::choice::ModeShareScenario;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct ChoiceModelConfig {
    pub max_iterations: usize,
    /// convergence when every gradient entry is below this in magnitude
    pub tolerance: f64,
    /// segments with fewer respondents are not estimated
    pub min_sample: usize,
    /// estimate a fare-by-income interaction in the all-respondents model
    pub income_interaction: bool,
    /// attribute changes to predict mode shares for with each fitted model
    pub scenarios: Vec<ModeShareScenario>,
}

impl Default for ChoiceModelConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            min_sample: 30,
            income_interaction: true,
            scenarios: ModeShareScenario::defaults(),
        }
    }
}
