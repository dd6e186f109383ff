mod affordability_band;
mod income_group;
mod survey_dataset;
mod survey_error;
mod survey_record;
mod transport_mode;
mod trip_purpose;

pub use affordability_band::AffordabilityBand;
pub use income_group::IncomeGroup;
pub use survey_dataset::SurveyDataset;
pub use survey_error::SurveyError;
pub use survey_record::{SurveyRecord, SurveyRow};
pub use transport_mode::TransportMode;
pub use trip_purpose::TripPurpose;
