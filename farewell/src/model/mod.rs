pub mod affordability;
pub mod choice;
pub mod mcda;
pub mod policy;
pub mod welfare;

mod analysis_results;
mod descriptive_statistics;
mod farewell_error;
mod pipeline;
mod segment;

pub use analysis_results::{mode_shares, AnalysisMetadata, AnalysisResults, ModeShares};
pub use descriptive_statistics::{mean, DescriptiveStatistics};
pub use farewell_error::FarewellError;
pub use pipeline::run_analysis;
pub use segment::{Segment, StageOutcome};
