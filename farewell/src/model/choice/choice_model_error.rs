use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChoiceModelError {
    #[error("{observations} observations is fewer than the minimum sample of {minimum}")]
    InsufficientSample { observations: usize, minimum: usize },
    #[error("only one alternative available: {0}")]
    SingleAlternative(String),
    #[error("no respondent chose {0}, so its attributes cannot be imputed")]
    UnobservedAlternative(String),
    #[error("information matrix is not positive definite after {iterations} iterations, the design is singular")]
    SingularDesign { iterations: usize },
    #[error("estimation did not converge within {iterations} iterations (max |gradient| {max_gradient:.3e})")]
    NonConvergence { iterations: usize, max_gradient: f64 },
    #[error("choices are perfectly separated: {0}")]
    PerfectSeparation(String),
    #[error("invalid mode share scenario {0}")]
    InvalidScenario(String),
    #[error("log-likelihood is not finite at iteration {iterations}")]
    NonFiniteLikelihood { iterations: usize },
}
