use super::{AffordabilityBand, IncomeGroup, SurveyError, TransportMode, TripPurpose};
use serde::{Deserialize, Serialize};

/// a row of the stated-preference survey file as it appears on disk.
///
/// CSV columns as currently defined:
/// respondent_id,Mode_Used,Origin_TAZ,Destination_TAZ,Income_Bracket,Trip_Purpose,
/// Frequency_of_Use,Travel_Time,Fare_Paid,Wait_Time,Comfort_Level,WTP,
/// WTP_Lower_Fare,WTP_Higher_Comfort
///
/// every field is optional here so that a missing value is reported against
/// its column by [`SurveyRecord::try_from_row`] instead of as a generic
/// deserialization failure.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SurveyRow {
    pub respondent_id: Option<String>,
    #[serde(rename = "Mode_Used")]
    pub mode_used: Option<String>,
    #[serde(rename = "Origin_TAZ")]
    pub origin_taz: Option<String>,
    #[serde(rename = "Destination_TAZ")]
    pub destination_taz: Option<String>,
    #[serde(rename = "Income_Bracket")]
    pub income_bracket: Option<String>,
    #[serde(rename = "Trip_Purpose")]
    pub trip_purpose: Option<String>,
    #[serde(rename = "Frequency_of_Use")]
    pub frequency_of_use: Option<String>,
    #[serde(rename = "Travel_Time")]
    pub travel_time: Option<String>,
    #[serde(rename = "Fare_Paid")]
    pub fare_paid: Option<String>,
    #[serde(rename = "Wait_Time")]
    pub wait_time: Option<String>,
    #[serde(rename = "Comfort_Level")]
    pub comfort_level: Option<String>,
    #[serde(rename = "WTP")]
    pub wtp: Option<String>,
    #[serde(rename = "WTP_Lower_Fare")]
    pub wtp_lower_fare: Option<String>,
    #[serde(rename = "WTP_Higher_Comfort")]
    pub wtp_higher_comfort: Option<String>,
}

impl SurveyRow {
    /// columns that must be present in the header for a file to be readable
    pub const REQUIRED_COLUMNS: [&'static str; 9] = [
        "respondent_id",
        "Mode_Used",
        "Income_Bracket",
        "Travel_Time",
        "Fare_Paid",
        "Wait_Time",
        "Comfort_Level",
        "WTP",
        "Trip_Purpose",
    ];
}

/// a validated survey response. one respondent reports one trip, made with
/// the chosen mode, and the attributes observed for that trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub respondent_id: String,
    pub mode: TransportMode,
    pub origin_taz: Option<String>,
    pub destination_taz: Option<String>,
    pub income_group: IncomeGroup,
    pub trip_purpose: TripPurpose,
    pub frequency_of_use: Option<String>,
    /// in-vehicle travel time, minutes
    pub travel_time: f64,
    /// fare paid, BDT
    pub fare: f64,
    /// waiting time, minutes
    pub wait_time: f64,
    /// comfort rating on a 1-5 scale
    pub comfort: u8,
    /// stated willingness to pay for the trip, BDT
    pub wtp: f64,
    pub wtp_lower_fare: bool,
    pub wtp_higher_comfort: bool,
}

impl SurveyRecord {
    pub const MIN_COMFORT: u8 = 1;
    pub const MAX_COMFORT: u8 = 5;

    /// builds a record with the attributes used by the analysis, leaving the
    /// descriptive fields (zones, frequency, contingent valuation answers) empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        respondent_id: &str,
        mode: TransportMode,
        income_group: IncomeGroup,
        fare: f64,
        travel_time: f64,
        wait_time: f64,
        comfort: u8,
        wtp: f64,
    ) -> SurveyRecord {
        SurveyRecord {
            respondent_id: respondent_id.to_string(),
            mode,
            origin_taz: None,
            destination_taz: None,
            income_group,
            trip_purpose: TripPurpose::Work,
            frequency_of_use: None,
            travel_time,
            fare,
            wait_time,
            comfort,
            wtp,
            wtp_lower_fare: false,
            wtp_higher_comfort: false,
        }
    }

    /// validates a raw survey row. `row` is the 1-based data row index used in
    /// error messages.
    pub fn try_from_row(row: usize, raw: &SurveyRow) -> Result<SurveyRecord, SurveyError> {
        let malformed = |reason: String| SurveyError::MalformedRow { row, reason };

        let respondent_id = required(&raw.respondent_id, "respondent_id").map_err(malformed)?;
        let mode = required(&raw.mode_used, "Mode_Used")
            .and_then(|s| s.parse::<TransportMode>())
            .map_err(malformed)?;
        let income_group = required(&raw.income_bracket, "Income_Bracket")
            .and_then(|s| s.parse::<IncomeGroup>())
            .map_err(malformed)?;
        let trip_purpose = required(&raw.trip_purpose, "Trip_Purpose")
            .and_then(|s| s.parse::<TripPurpose>())
            .map_err(malformed)?;
        let travel_time = non_negative(&raw.travel_time, "Travel_Time").map_err(malformed)?;
        let fare = non_negative(&raw.fare_paid, "Fare_Paid").map_err(malformed)?;
        let wait_time = non_negative(&raw.wait_time, "Wait_Time").map_err(malformed)?;
        let wtp = non_negative(&raw.wtp, "WTP").map_err(malformed)?;
        if wtp == 0.0 {
            return Err(malformed(String::from("WTP must be positive")));
        }
        if travel_time + wait_time == 0.0 {
            return Err(malformed(String::from(
                "Travel_Time and Wait_Time are both zero",
            )));
        }
        let comfort = comfort_level(&raw.comfort_level).map_err(malformed)?;
        let wtp_lower_fare = binary(&raw.wtp_lower_fare, "WTP_Lower_Fare").map_err(malformed)?;
        let wtp_higher_comfort =
            binary(&raw.wtp_higher_comfort, "WTP_Higher_Comfort").map_err(malformed)?;

        Ok(SurveyRecord {
            respondent_id,
            mode,
            origin_taz: optional(&raw.origin_taz),
            destination_taz: optional(&raw.destination_taz),
            income_group,
            trip_purpose,
            frequency_of_use: optional(&raw.frequency_of_use),
            travel_time,
            fare,
            wait_time,
            comfort,
            wtp,
            wtp_lower_fare,
            wtp_higher_comfort,
        })
    }

    /// door-to-door time of the trip, minutes
    pub fn total_time(&self) -> f64 {
        self.travel_time + self.wait_time
    }

    /// fare paid divided by stated willingness to pay
    pub fn affordability_ratio(&self) -> f64 {
        self.fare / self.wtp
    }

    pub fn affordability_band(&self) -> AffordabilityBand {
        AffordabilityBand::from_ratio(self.affordability_ratio())
    }

    /// stated value of time, BDT per minute of door-to-door time
    pub fn value_of_time(&self) -> f64 {
        self.wtp / self.total_time()
    }

    /// fare plus the respondent's own valuation of in-vehicle and (weighted)
    /// waiting time.
    pub fn generalized_cost(&self, wait_weight: f64) -> f64 {
        self.fare + self.value_of_time() * (self.travel_time + wait_weight * self.wait_time)
    }
}

impl From<&SurveyRecord> for SurveyRow {
    fn from(r: &SurveyRecord) -> Self {
        let flag = |b: bool| Some(String::from(if b { "1" } else { "0" }));
        SurveyRow {
            respondent_id: Some(r.respondent_id.clone()),
            mode_used: Some(r.mode.label().to_string()),
            origin_taz: r.origin_taz.clone(),
            destination_taz: r.destination_taz.clone(),
            income_bracket: Some(r.income_group.to_string()),
            trip_purpose: Some(r.trip_purpose.to_string()),
            frequency_of_use: r.frequency_of_use.clone(),
            travel_time: Some(format!("{:.2}", r.travel_time)),
            fare_paid: Some(format!("{:.2}", r.fare)),
            wait_time: Some(format!("{:.2}", r.wait_time)),
            comfort_level: Some(r.comfort.to_string()),
            wtp: Some(format!("{:.2}", r.wtp)),
            wtp_lower_fare: flag(r.wtp_lower_fare),
            wtp_higher_comfort: flag(r.wtp_higher_comfort),
        }
    }
}

fn required(value: &Option<String>, column: &str) -> Result<String, String> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(format!("missing value for {column}")),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn non_negative(value: &Option<String>, column: &str) -> Result<f64, String> {
    let s = required(value, column)?;
    let x = s
        .parse::<f64>()
        .map_err(|e| format!("{column} value '{s}' is not a number: {e}"))?;
    if !x.is_finite() {
        Err(format!("{column} value '{s}' is not finite"))
    } else if x < 0.0 {
        Err(format!("{column} value '{s}' is negative"))
    } else {
        Ok(x)
    }
}

fn comfort_level(value: &Option<String>) -> Result<u8, String> {
    let x = non_negative(value, "Comfort_Level")?;
    let min = f64::from(SurveyRecord::MIN_COMFORT);
    let max = f64::from(SurveyRecord::MAX_COMFORT);
    if x.fract() != 0.0 || x < min || x > max {
        Err(format!(
            "Comfort_Level value {x} must be a whole number in [{min}, {max}]"
        ))
    } else {
        Ok(x as u8)
    }
}

/// contingent valuation answers default to "no" when absent
fn binary(value: &Option<String>, column: &str) -> Result<bool, String> {
    match optional(value).as_deref() {
        None => Ok(false),
        Some("0") | Some("false") | Some("False") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("True") | Some("yes") => Ok(true),
        Some(other) => Err(format!("{column} value '{other}' is not a 0/1 answer")),
    }
}
