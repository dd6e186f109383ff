mod load_summary;
mod malformed_row_policy;
mod outlier_filter;
pub mod sample_generator;
mod survey_reader;

pub use load_summary::LoadSummary;
pub use malformed_row_policy::MalformedRowPolicy;
pub use outlier_filter::{tukey_fences, OutlierFilter};
pub use survey_reader::{read_survey, read_survey_from_reader, SurveyReaderOptions};
