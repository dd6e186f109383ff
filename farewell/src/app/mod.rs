mod farewell_cli;
mod generate;
mod run;

pub use farewell_cli::{FarewellCliArguments, FarewellOperation};
pub use generate::run_generate;
pub use run::run_analysis_app;
