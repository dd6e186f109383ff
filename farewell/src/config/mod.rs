mod affordability_config;
mod analysis_configuration;
mod choice_model_config;
mod data_config;
mod mcda_config;
mod policy_config;
mod report_config;
mod welfare_config;

pub use affordability_config::AffordabilityConfig;
pub use analysis_configuration::{AnalysisConfiguration, ENV_PREFIX, ENV_SEPARATOR};
pub use choice_model_config::ChoiceModelConfig;
pub use data_config::DataConfig;
pub use mcda_config::McdaConfig;
pub use policy_config::PolicyConfig;
pub use report_config::ReportConfig;
pub use welfare_config::WelfareConfig;
