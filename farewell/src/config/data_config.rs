use farewell_core::{
    io::{MalformedRowPolicy, SurveyReaderOptions},
    model::TransportMode,
};
use serde::{Deserialize, Serialize};

/// which survey rows and modes take part in the analysis
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct DataConfig {
    /// modes to analyse, in report order. modes nobody chose are dropped.
    pub modes: Vec<TransportMode>,
    pub malformed_row_policy: MalformedRowPolicy,
    /// Tukey fence factor for fare and WTP outliers, disabled when absent
    pub outlier_fence_factor: Option<f64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            modes: vec![TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna],
            malformed_row_policy: MalformedRowPolicy::Fail,
            outlier_fence_factor: None,
        }
    }
}

impl DataConfig {
    pub fn reader_options(&self) -> SurveyReaderOptions {
        SurveyReaderOptions {
            malformed_row_policy: self.malformed_row_policy,
            outlier_fence_factor: self.outlier_fence_factor,
        }
    }
}
