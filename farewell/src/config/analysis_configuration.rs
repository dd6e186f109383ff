use super::{
    AffordabilityConfig, ChoiceModelConfig, DataConfig, McdaConfig, PolicyConfig, ReportConfig,
    WelfareConfig,
};
use crate::model::FarewellError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// environment variables overriding configuration start with this prefix,
/// e.g. `FAREWELL__WELFARE__CARBON_PRICE=0.8`
pub const ENV_PREFIX: &str = "FAREWELL";
pub const ENV_SEPARATOR: &str = "__";

/// every parameter of an analysis run. all fields have defaults, so a
/// configuration file only needs the values it changes.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct AnalysisConfiguration {
    pub data: DataConfig,
    pub choice_model: ChoiceModelConfig,
    pub affordability: AffordabilityConfig,
    pub welfare: WelfareConfig,
    pub mcda: McdaConfig,
    pub policy: PolicyConfig,
    pub report: ReportConfig,
}

impl AnalysisConfiguration {
    /// reads configuration from an optional .toml or .json file, then applies
    /// environment overrides, then validates the result.
    pub fn load(file: Option<&str>) -> Result<AnalysisConfiguration, FarewellError> {
        let mut builder = Config::builder();
        if let Some(f) = file {
            let format = file_format(f)?;
            builder = builder.add_source(File::new(f, format));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );
        let source = file.unwrap_or("defaults");
        let conf: AnalysisConfiguration = builder
            .build()
            .map_err(|e| {
                FarewellError::ConfigurationError(format!("failure reading {source}: {e}"))
            })?
            .try_deserialize()
            .map_err(|e| {
                FarewellError::ConfigurationError(format!("failure decoding {source}: {e}"))
            })?;
        conf.validate()?;
        Ok(conf)
    }

    /// checks values that serde cannot, before any analysis runs
    pub fn validate(&self) -> Result<(), FarewellError> {
        let invalid = |msg: String| Err(FarewellError::ConfigurationError(msg));
        if self.data.modes.is_empty() {
            return invalid(String::from("data.modes must name at least one mode"));
        }
        if let Some(k) = self.data.outlier_fence_factor {
            if !k.is_finite() || k < 0.0 {
                return invalid(format!(
                    "data.outlier_fence_factor must be non-negative, found {k}"
                ));
            }
        }
        if self.choice_model.max_iterations == 0 {
            return invalid(String::from("choice_model.max_iterations must be positive"));
        }
        if !(self.choice_model.tolerance > 0.0) {
            return invalid(format!(
                "choice_model.tolerance must be positive, found {}",
                self.choice_model.tolerance
            ));
        }
        if !(self.affordability.wait_time_weight >= 0.0) {
            return invalid(format!(
                "affordability.wait_time_weight must be non-negative, found {}",
                self.affordability.wait_time_weight
            ));
        }
        if !(self.welfare.cost_share >= 0.0) || !(self.welfare.carbon_price >= 0.0) {
            return invalid(String::from(
                "welfare.cost_share and welfare.carbon_price must be non-negative",
            ));
        }
        if self.welfare.grid_points < 2 {
            return invalid(String::from("welfare.grid_points must be at least 2"));
        }
        self.welfare
            .validate()
            .map_err(|e| FarewellError::ConfigurationError(e.to_string()))?;
        for scenario in self.choice_model.scenarios.iter() {
            scenario
                .validate()
                .map_err(|e| FarewellError::ConfigurationError(e.to_string()))?;
        }
        self.mcda
            .weights
            .validate()
            .map_err(|e| FarewellError::ConfigurationError(e.to_string()))?;
        for scenario in self.policy.scenarios.iter() {
            scenario
                .validate()
                .map_err(|e| FarewellError::ConfigurationError(e.to_string()))?;
        }
        if self.report.formats.is_empty() {
            return invalid(String::from("report.formats must name at least one format"));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, FarewellError> {
        toml::to_string_pretty(self).map_err(|e| {
            FarewellError::ConfigurationError(format!("failure encoding configuration: {e}"))
        })
    }
}

impl TryFrom<&String> for AnalysisConfiguration {
    type Error = FarewellError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        AnalysisConfiguration::load(Some(f))
    }
}

fn file_format(f: &str) -> Result<FileFormat, FarewellError> {
    if f.ends_with(".toml") {
        Ok(FileFormat::Toml)
    } else if f.ends_with(".json") {
        Ok(FileFormat::Json)
    } else {
        Err(FarewellError::ConfigurationError(format!(
            "unsupported file type: {f}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::welfare::DemandFunction;
    use farewell_core::model::TransportMode;

    fn temp_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("farewell-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write temp config");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_defaults_are_valid() {
        let conf = AnalysisConfiguration::default();
        assert!(conf.validate().is_ok());
        assert_eq!(conf.welfare.emission_factor(TransportMode::Leguna), 0.12);
        assert_eq!(conf.policy.scenarios.len(), 5);
    }

    #[test]
    fn test_default_toml_reads_back() {
        let toml_str = AnalysisConfiguration::default()
            .to_toml()
            .expect("defaults encode");
        let decoded: AnalysisConfiguration = toml::from_str(&toml_str).expect("defaults decode");
        assert_eq!(decoded.data.modes, AnalysisConfiguration::default().data.modes);
        assert_eq!(decoded.welfare.cost_share, 0.6);
    }

    #[test]
    fn test_partial_toml_file() {
        let path = temp_file(
            "partial.toml",
            r#"
[welfare]
carbon_price = 0.8

[welfare.demand_function]
type = "linear"
slope = 0.7

[data]
modes = ["bus", "mrt"]
"#,
        );
        let conf = AnalysisConfiguration::load(Some(&path)).expect("config should load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(conf.welfare.carbon_price, 0.8);
        assert_eq!(conf.welfare.cost_share, 0.6);
        assert_eq!(
            conf.welfare.demand_function,
            DemandFunction::Linear { slope: 0.7 }
        );
        assert_eq!(conf.data.modes, vec![TransportMode::Bus, TransportMode::Mrt]);
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let path = temp_file(
            "weights.json",
            r#"{"mcda": {"weights": {"social_welfare": 0.9}}}"#,
        );
        let result = AnalysisConfiguration::load(Some(&path));
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(FarewellError::ConfigurationError(_))));
    }

    #[test]
    fn test_welfare_and_scenario_settings() {
        let path = temp_file(
            "scenarios.toml",
            r#"
[welfare]
demand_budget = 5000.0

[welfare.objective_weights]
social_welfare = 0.6

[[choice_model.scenarios]]
name = "mrt_fare_cut"
modes = ["mrt"]

[choice_model.scenarios.changes]
fare = -0.25
"#,
        );
        let conf = AnalysisConfiguration::load(Some(&path)).expect("config should load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(conf.welfare.demand_budget, Some(5000.0));
        assert_eq!(conf.welfare.objective_weights.social_welfare, 0.6);
        assert_eq!(conf.welfare.objective_weights.revenue, 0.2);
        assert_eq!(conf.choice_model.scenarios.len(), 1);
        assert_eq!(conf.choice_model.scenarios[0].modes, vec![TransportMode::Mrt]);
        assert_eq!(conf.choice_model.scenarios[0].changes.fare, -0.25);

        let mut conf = AnalysisConfiguration::default();
        conf.welfare.demand_budget = Some(0.0);
        assert!(matches!(conf.validate(), Err(FarewellError::ConfigurationError(_))));
        let mut conf = AnalysisConfiguration::default();
        conf.choice_model.scenarios[0].changes.travel_time = -1.5;
        assert!(matches!(conf.validate(), Err(FarewellError::ConfigurationError(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AnalysisConfiguration::try_from(&String::from("settings.yaml"));
        assert!(matches!(result, Err(FarewellError::ConfigurationError(_))));
    }
}
