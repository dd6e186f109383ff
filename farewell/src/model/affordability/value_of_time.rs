use crate::model::{DescriptiveStatistics, Segment};
use farewell_core::model::SurveyRecord;
use serde::{Deserialize, Serialize};

/// stated WTP per minute of door-to-door time
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatedValueOfTime {
    pub segment: Segment,
    /// BDT per minute
    pub per_minute: DescriptiveStatistics,
    /// mean BDT per hour
    pub mean_per_hour: f64,
}

pub fn stated_value_of_time(segment: Segment, records: &[&SurveyRecord]) -> Option<StatedValueOfTime> {
    let vot = records.iter().map(|r| r.value_of_time()).collect::<Vec<_>>();
    let per_minute = DescriptiveStatistics::from_values(&vot)?;
    Some(StatedValueOfTime {
        segment,
        per_minute,
        mean_per_hour: per_minute.mean * 60.0,
    })
}
