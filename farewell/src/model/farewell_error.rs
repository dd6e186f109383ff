use super::{
    affordability::AffordabilityError, choice::ChoiceModelError, mcda::McdaError,
    policy::PolicyError, welfare::OptimizationError,
};
use crate::report::ReportError;
use farewell_core::model::SurveyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarewellError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure loading survey: {source}")]
    SurveyError {
        #[from]
        source: SurveyError,
    },
    #[error("choice model estimation failed: {source}")]
    ChoiceModelError {
        #[from]
        source: ChoiceModelError,
    },
    #[error("affordability analysis failed: {source}")]
    AffordabilityError {
        #[from]
        source: AffordabilityError,
    },
    #[error("welfare optimization failed: {source}")]
    OptimizationError {
        #[from]
        source: OptimizationError,
    },
    #[error("multi-criteria scoring failed: {source}")]
    McdaError {
        #[from]
        source: McdaError,
    },
    #[error("policy evaluation failed: {source}")]
    PolicyError {
        #[from]
        source: PolicyError,
    },
    #[error("failure writing report: {source}")]
    ReportError {
        #[from]
        source: ReportError,
    },
    #[error("{0}")]
    InternalError(String),
}
