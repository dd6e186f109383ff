use crate::{config::AnalysisConfiguration, model::FarewellError, report::ReportFormat};
use clap::{Parser, Subcommand};
use farewell_core::io::sample_generator::{DEFAULT_RESPONDENTS, DEFAULT_SEED};
use std::path::Path;

/// fare, affordability and welfare analysis of public transport survey data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct FarewellCliArguments {
    /// select the operation to run
    #[command(subcommand)]
    pub op: FarewellOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FarewellOperation {
    /// analyses a survey file and writes reports to an output directory
    Run {
        #[arg(long, help = "path to the survey .csv file")]
        survey_file: String,
        #[arg(long, help = "directory receiving the reports")]
        output_directory: String,
        #[arg(long, help = "path to a .toml or .json file with analysis parameters")]
        configuration_file: Option<String>,
        /// report formats, overriding the configuration, e.g. markdown,json
        #[arg(long, value_enum, value_delimiter = ',')]
        format: Option<Vec<ReportFormat>>,
        #[arg(long, help = "replace reports already in the output directory")]
        overwrite: bool,
    },
    /// writes a synthetic survey file with the same columns as a real one
    Generate {
        #[arg(long, help = "path of the .csv file to write")]
        output_file: String,
        #[arg(long, default_value_t = DEFAULT_RESPONDENTS)]
        respondents: usize,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// prints the default analysis configuration as TOML
    Config,
}

impl FarewellOperation {
    pub fn run(&self) -> Result<(), FarewellError> {
        match self {
            FarewellOperation::Run {
                survey_file,
                output_directory,
                configuration_file,
                format,
                overwrite,
            } => {
                let mut conf = match configuration_file {
                    None => AnalysisConfiguration::load(None),
                    Some(f) => {
                        log::info!("reading farewell configuration from {f}");
                        AnalysisConfiguration::try_from(f)
                    }
                }?;
                if let Some(formats) = format {
                    conf.report.formats = formats.clone();
                }
                conf.report.overwrite |= *overwrite;
                conf.validate()?;
                super::run_analysis_app(
                    Path::new(survey_file),
                    Path::new(output_directory),
                    &conf,
                )
            }
            FarewellOperation::Generate {
                output_file,
                respondents,
                seed,
            } => super::run_generate(Path::new(output_file), *respondents, *seed),
            FarewellOperation::Config => {
                println!("{}", AnalysisConfiguration::default().to_toml()?);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_arguments() {
        let args = FarewellCliArguments::try_parse_from([
            "farewell",
            "run",
            "--survey-file",
            "survey.csv",
            "--output-directory",
            "out",
            "--format",
            "markdown,csv",
            "--overwrite",
        ])
        .expect("arguments parse");
        match args.op {
            FarewellOperation::Run {
                format, overwrite, ..
            } => {
                assert_eq!(format, Some(vec![ReportFormat::Markdown, ReportFormat::Csv]));
                assert!(overwrite);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_generate_defaults() {
        let args =
            FarewellCliArguments::try_parse_from(["farewell", "generate", "--output-file", "s.csv"])
                .expect("arguments parse");
        match args.op {
            FarewellOperation::Generate {
                respondents, seed, ..
            } => {
                assert_eq!(respondents, 500);
                assert_eq!(seed, 42);
            }
            _ => panic!("expected generate"),
        }
    }
}
