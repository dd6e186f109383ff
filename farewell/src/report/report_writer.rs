use super::{
    csv_tables::{write_policy_scenarios, write_welfare_outcomes},
    html::render_html,
    json::render_json,
    markdown::render_markdown,
    ReportError, ReportFormat,
};
use crate::{config::ReportConfig, model::AnalysisResults};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// writes analysis results into an output directory in each requested format
pub struct ReportWriter {
    pub output_directory: PathBuf,
    pub formats: Vec<ReportFormat>,
    pub overwrite: bool,
    pub title: String,
}

impl ReportWriter {
    pub fn new(output_directory: &Path, conf: &ReportConfig) -> ReportWriter {
        ReportWriter {
            output_directory: output_directory.to_path_buf(),
            formats: conf.formats.iter().copied().unique().collect_vec(),
            overwrite: conf.overwrite,
            title: conf.title.clone(),
        }
    }

    /// every file this writer will produce
    pub fn targets(&self) -> Vec<PathBuf> {
        self.formats
            .iter()
            .flat_map(|f| f.file_names().iter())
            .map(|name| self.output_directory.join(name))
            .collect_vec()
    }

    /// nothing is written when any target exists and overwriting is off
    pub fn write(&self, results: &AnalysisResults) -> Result<Vec<PathBuf>, ReportError> {
        create_dirs(&self.output_directory)?;
        if !self.overwrite {
            if let Some(existing) = self.targets().iter().find(|p| p.exists()) {
                return Err(ReportError::OutputExists(
                    existing.to_string_lossy().to_string(),
                ));
            }
        }
        let mut written = vec![];
        for format in self.formats.iter() {
            let dir = &self.output_directory;
            match format {
                ReportFormat::Markdown => {
                    let path = dir.join("report.md");
                    write_file(&path, &render_markdown(results, &self.title))?;
                    written.push(path);
                }
                ReportFormat::Json => {
                    let path = dir.join("results.json");
                    write_file(&path, &render_json(results)?)?;
                    written.push(path);
                }
                ReportFormat::Html => {
                    let path = dir.join("report.html");
                    write_file(&path, &render_html(results, &self.title))?;
                    written.push(path);
                }
                ReportFormat::Csv => {
                    let welfare = dir.join("welfare_outcomes.csv");
                    write_welfare_outcomes(results, &welfare)?;
                    let policy = dir.join("policy_scenarios.csv");
                    write_policy_scenarios(results, &policy)?;
                    written.extend([welfare, policy]);
                }
            }
        }
        for path in written.iter() {
            log::info!("wrote {}", path.to_string_lossy());
        }
        Ok(written)
    }
}

/// "mkdir -p" for the output directory
fn create_dirs(path: &Path) -> Result<(), ReportError> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| ReportError::CreateDirectory {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AnalysisConfiguration,
        model::run_analysis,
    };
    use farewell_core::{
        io::{sample_generator::generate_survey, LoadSummary},
        model::SurveyDataset,
    };

    fn results() -> AnalysisResults {
        let dataset = SurveyDataset::new(generate_survey(300, 42));
        let summary = LoadSummary {
            source: String::from("generated"),
            rows_read: 300,
            rows_kept: 300,
            ..Default::default()
        };
        run_analysis(&dataset, &summary, &AnalysisConfiguration::default()).expect("analysis")
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("farewell-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn conf(formats: Vec<ReportFormat>, overwrite: bool) -> ReportConfig {
        ReportConfig {
            formats,
            overwrite,
            ..Default::default()
        }
    }

    #[test]
    fn test_writes_every_format() {
        let dir = temp_dir("all-formats");
        let results = results();
        let formats = vec![
            ReportFormat::Markdown,
            ReportFormat::Json,
            ReportFormat::Html,
            ReportFormat::Csv,
        ];
        let written = ReportWriter::new(&dir, &conf(formats, false))
            .write(&results)
            .expect("reports written");
        assert_eq!(written.len(), 5);
        assert!(written.iter().all(|p| p.exists()));

        let markdown = std::fs::read_to_string(dir.join("report.md")).expect("markdown");
        for heading in [
            "## Executive Summary",
            "## Choice Models",
            "## Welfare Optimization",
            "## Multi-Criteria Decision Analysis",
            "## Policy Evaluation",
            "## Recommendations",
        ] {
            assert!(markdown.contains(heading), "missing {heading}");
        }
        assert!(markdown.contains("universal_subsidy"));
        assert!(markdown.contains("Max-W"));
        assert!(markdown.contains("Optimal fares by income group (BDT)"));

        let json = std::fs::read_to_string(dir.join("results.json")).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["metadata"]["observations"], 300);
        assert_eq!(value["policy"]["scenarios"].as_array().map(|a| a.len()), Some(5));

        let html = std::fs::read_to_string(dir.join("report.html")).expect("html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Recommendations</h2>"));

        let mut reader = csv::Reader::from_path(dir.join("welfare_outcomes.csv")).expect("csv");
        assert_eq!(reader.records().count(), 18);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = temp_dir("overwrite");
        let results = results();
        let formats = vec![ReportFormat::Markdown];
        ReportWriter::new(&dir, &conf(formats.clone(), false))
            .write(&results)
            .expect("first write");
        let again = ReportWriter::new(&dir, &conf(formats.clone(), false)).write(&results);
        assert!(matches!(again, Err(ReportError::OutputExists(_))));
        let forced = ReportWriter::new(&dir, &conf(formats, true)).write(&results);
        assert!(forced.is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
