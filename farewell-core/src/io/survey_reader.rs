use super::{LoadSummary, MalformedRowPolicy, OutlierFilter};
use crate::model::{SurveyDataset, SurveyError, SurveyRecord, SurveyRow};
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

/// behaviors for reading and cleaning a survey file
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SurveyReaderOptions {
    #[serde(default)]
    pub malformed_row_policy: MalformedRowPolicy,
    /// Tukey fence factor applied to fare and WTP. outlier removal is off when absent.
    #[serde(default)]
    pub outlier_fence_factor: Option<f64>,
}

/// reads and cleans a survey CSV file.
pub fn read_survey<P: AsRef<Path>>(
    path: P,
    options: &SurveyReaderOptions,
) -> Result<(SurveyDataset, LoadSummary), SurveyError> {
    let source = path.as_ref().to_string_lossy().to_string();
    let file = File::open(path.as_ref())?;
    read_survey_from_reader(&source, file, options)
}

/// reads and cleans survey rows from any reader. `source` names the input in
/// messages and in the returned summary.
pub fn read_survey_from_reader<R: Read>(
    source: &str,
    reader: R,
    options: &SurveyReaderOptions,
) -> Result<(SurveyDataset, LoadSummary), SurveyError> {
    if let Some(k) = options.outlier_fence_factor {
        if !k.is_finite() || k < 0.0 {
            return Err(SurveyError::ConfigurationError(format!(
                "outlier fence factor must be a non-negative number, found {k}"
            )));
        }
    }
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| SurveyError::ReadError(source.to_string(), e))?
        .clone();
    if let Some(missing) = SurveyRow::REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(SurveyError::MissingColumn(missing.to_string()));
    }

    let mut summary = LoadSummary {
        source: source.to_string(),
        ..Default::default()
    };
    let mut records: Vec<SurveyRecord> = vec![];
    let rows = tqdm!(
        csv_reader.deserialize::<SurveyRow>().enumerate(),
        desc = "read survey"
    );
    for (row_idx, row) in rows {
        summary.rows_read += 1;
        let row_number = row_idx + 1;
        let validated = row
            .map_err(|e| SurveyError::MalformedRow {
                row: row_number,
                reason: e.to_string(),
            })
            .and_then(|raw| SurveyRecord::try_from_row(row_number, &raw));
        match (validated, options.malformed_row_policy) {
            (Ok(record), _) => records.push(record),
            (Err(e), MalformedRowPolicy::Fail) => return Err(e),
            (Err(e), MalformedRowPolicy::Skip) => {
                log::warn!("{source}: skipping {e}");
                summary.rows_malformed += 1;
            }
        }
    }
    eprintln!();

    let records = match options.outlier_fence_factor {
        None => records,
        Some(k) => {
            let (kept, removed) = OutlierFilter::new(k).apply(records);
            if removed > 0 {
                log::info!("{source}: removed {removed} fare/WTP outliers with fence factor {k}");
            }
            summary.rows_outlier = removed;
            kept
        }
    };

    if records.is_empty() {
        return Err(SurveyError::EmptyDataset(format!(
            "{source}: {} rows read, {} malformed, {} outliers",
            summary.rows_read, summary.rows_malformed, summary.rows_outlier
        )));
    }
    summary.rows_kept = records.len();
    log::info!(
        "{source}: kept {} of {} survey rows",
        summary.rows_kept,
        summary.rows_read
    );
    Ok((SurveyDataset::new(records), summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IncomeGroup, TransportMode};

    const HEADER: &str = "respondent_id,Mode_Used,Origin_TAZ,Destination_TAZ,Income_Bracket,Trip_Purpose,Frequency_of_Use,Travel_Time,Fare_Paid,Wait_Time,Comfort_Level,WTP,WTP_Lower_Fare,WTP_Higher_Comfort";

    fn survey(rows: &[&str]) -> String {
        std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_read_valid_rows() {
        let csv = survey(&[
            "1,Bus,Z1,Z2,Low,Work,Daily,40,30,10,3,35,1,0",
            "2,MRT,Z1,Z5,High,School,Weekly,20,90,5,5,150,0,1",
        ]);
        let (ds, summary) =
            read_survey_from_reader("test", csv.as_bytes(), &SurveyReaderOptions::default())
                .expect("survey should load");
        assert_eq!(ds.len(), 2);
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_kept, 2);
        assert_eq!(ds.records()[1].mode, TransportMode::Mrt);
        assert_eq!(ds.records()[0].income_group, IncomeGroup::Low);
    }

    #[test]
    fn test_malformed_row_fails_by_default() {
        let csv = survey(&[
            "1,Bus,Z1,Z2,Low,Work,Daily,40,30,10,3,35,1,0",
            "2,Bus,Z1,Z2,Low,Work,Daily,40,,10,3,35,1,0",
        ]);
        let result =
            read_survey_from_reader("test", csv.as_bytes(), &SurveyReaderOptions::default());
        match result {
            Err(SurveyError::MalformedRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected malformed row error, found {other:?}"),
        }
    }

    #[test]
    fn test_malformed_row_skipped() {
        let csv = survey(&[
            "1,Bus,Z1,Z2,Low,Work,Daily,40,30,10,3,35,1,0",
            "2,Ferry,Z1,Z2,Low,Work,Daily,40,30,10,3,35,1,0",
            "3,Bus,Z1,Z2,Low,Work,Daily,40,30,10,9,35,1,0",
        ]);
        let options = SurveyReaderOptions {
            malformed_row_policy: MalformedRowPolicy::Skip,
            outlier_fence_factor: None,
        };
        let (ds, summary) = read_survey_from_reader("test", csv.as_bytes(), &options)
            .expect("survey should load");
        assert_eq!(ds.len(), 1);
        assert_eq!(summary.rows_malformed, 2);
    }

    #[test]
    fn test_missing_column() {
        let csv = "respondent_id,Mode_Used\n1,Bus";
        let result =
            read_survey_from_reader("test", csv.as_bytes(), &SurveyReaderOptions::default());
        assert!(matches!(result, Err(SurveyError::MissingColumn(_))));
    }

    #[test]
    fn test_empty_after_cleaning() {
        let csv = survey(&["1,Bus,Z1,Z2,Low,Work,Daily,40,30,10,3,0,1,0"]);
        let options = SurveyReaderOptions {
            malformed_row_policy: MalformedRowPolicy::Skip,
            outlier_fence_factor: None,
        };
        let result = read_survey_from_reader("test", csv.as_bytes(), &options);
        assert!(matches!(result, Err(SurveyError::EmptyDataset(_))));
    }
}
