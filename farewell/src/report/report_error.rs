use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("error building output directory '{path}': {source}")]
    CreateDirectory {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing {path}: {source}")]
    Csv { path: String, source: csv::Error },
    #[error("failure encoding results as JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("{0} already exists, pass --overwrite to replace it")]
    OutputExists(String),
}
