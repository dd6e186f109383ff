use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizationError {
    #[error("price bounds for {mode} are inverted: min {min} > max {max}")]
    InvertedBounds { mode: String, min: f64, max: f64 },
    #[error("price bounds for {mode} are not finite: [{min}, {max}]")]
    NonFiniteBounds { mode: String, min: f64, max: f64 },
    #[error("lower price bound for {mode} is {min}, the demand function needs a positive price")]
    NonPositivePrice { mode: String, min: f64 },
    #[error("no fixed price bounds configured for {0}")]
    MissingBounds(String),
    #[error("no respondents use {0}, its market cannot be built")]
    EmptyMarket(String),
    #[error("invalid demand function: {0}")]
    InvalidDemandFunction(String),
    #[error("invalid sensitivity range: {0}")]
    InvalidSensitivityRange(String),
    #[error("invalid objective weights: {0}")]
    InvalidObjectiveWeights(String),
    #[error("demand budget must be a positive finite amount, got {0}")]
    InvalidBudget(f64),
    #[error("no fare for {mode} keeps operating cost within the budget of {budget} BDT, the lowest cost is {min_cost:.2} BDT")]
    InfeasibleBudget {
        mode: String,
        budget: f64,
        min_cost: f64,
    },
    #[error("mean fare paid on {0} is zero, its demand curve cannot be anchored")]
    ZeroBasePrice(String),
    #[error("no mode could be optimized: {0}")]
    NoOptimizedMode(String),
    #[error("{objective} objective for {mode} is not finite at price {price}")]
    NonFiniteObjective {
        mode: String,
        objective: String,
        price: f64,
    },
}
