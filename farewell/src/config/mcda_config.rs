use crate::model::mcda::CriteriaWeights;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct McdaConfig {
    pub weights: CriteriaWeights,
}
