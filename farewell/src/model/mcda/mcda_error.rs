use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum McdaError {
    #[error("invalid criteria weights: {0}")]
    InvalidWeights(String),
    #[error("no social welfare optimum for {0}")]
    MissingWelfare(String),
    #[error("no modes to score")]
    NoAlternatives,
    #[error("criterion {criterion} is not finite for {mode}")]
    NonFiniteCriterion { mode: String, criterion: String },
}
