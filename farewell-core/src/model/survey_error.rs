use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("failure reading survey file {0}: {1}")]
    ReadError(String, csv::Error),
    #[error("failure writing survey file {0}: {1}")]
    WriteError(String, csv::Error),
    #[error("malformed survey row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("survey file is missing required column '{0}'")]
    MissingColumn(String),
    #[error("survey dataset is empty after cleaning ({0})")]
    EmptyDataset(String),
    #[error("invalid survey configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading survey: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
}
