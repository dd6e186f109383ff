use crate::{
    config::AnalysisConfiguration,
    model::{run_analysis, FarewellError},
    report::ReportWriter,
};
use farewell_core::io::read_survey;
use std::path::Path;

/// loads a survey, runs every analysis stage and writes the configured reports
pub fn run_analysis_app(
    survey_file: &Path,
    output_directory: &Path,
    conf: &AnalysisConfiguration,
) -> Result<(), FarewellError> {
    log::info!("reading survey from {}", survey_file.to_string_lossy());
    let (dataset, summary) = read_survey(survey_file, &conf.data.reader_options())?;
    log::info!(
        "kept {} of {} rows ({} malformed, {} outliers)",
        summary.rows_kept,
        summary.rows_read,
        summary.rows_malformed,
        summary.rows_outlier
    );
    let results = run_analysis(&dataset, &summary, conf)?;
    let writer = ReportWriter::new(output_directory, &conf.report);
    let written = writer.write(&results)?;
    eprintln!(
        "wrote {} report files to {}",
        written.len(),
        output_directory.to_string_lossy()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportFormat;
    use farewell_core::io::sample_generator::{generate_survey, write_survey};

    #[test]
    fn test_survey_file_to_reports() {
        let dir = std::env::temp_dir().join(format!("farewell-{}-app-run", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir");
        let survey = dir.join("survey.csv");
        write_survey(&survey, &generate_survey(250, 11)).expect("survey written");

        let mut conf = AnalysisConfiguration::default();
        conf.report.formats = vec![ReportFormat::Json];
        let out = dir.join("reports");
        run_analysis_app(&survey, &out, &conf).expect("analysis app");
        assert!(out.join("results.json").exists());
        assert!(!out.join("report.md").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
