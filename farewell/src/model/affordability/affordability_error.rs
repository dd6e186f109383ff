use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AffordabilityError {
    #[error("fare coefficient for {segment} is {value}, WTP requires a negative fare coefficient")]
    NonNegativeFareCoefficient { segment: String, value: f64 },
    #[error("no alternative to compare {0} against")]
    NoComparisonAlternative(String),
    #[error("modeled WTP for {mode} in {segment} is not finite")]
    NonFiniteWtp { segment: String, mode: String },
}
