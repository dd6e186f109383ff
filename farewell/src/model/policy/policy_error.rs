use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("scenario '{scenario}' has {group} income subsidy rate {rate}, rates must lie in [0, 1]")]
    InvalidSubsidyRate {
        scenario: String,
        group: String,
        rate: f64,
    },
    #[error("policy scenario names must be unique, '{0}' appears more than once")]
    DuplicateScenario(String),
    #[error("induced demand elasticity {0} is not finite")]
    InvalidElasticity(f64),
}
