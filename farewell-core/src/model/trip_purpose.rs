use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TripPurpose {
    Work,
    School,
    Leisure,
    Shopping,
    Other,
}

impl FromStr for TripPurpose {
    type Err = String;

    /// unrecognized purposes are kept as [`TripPurpose::Other`], only an empty
    /// value is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err(String::from("trip purpose is empty")),
            "work" | "commute" => Ok(Self::Work),
            "school" | "education" => Ok(Self::School),
            "leisure" | "recreation" => Ok(Self::Leisure),
            "shopping" => Ok(Self::Shopping),
            _ => Ok(Self::Other),
        }
    }
}

impl Display for TripPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TripPurpose::Work => "Work",
            TripPurpose::School => "School",
            TripPurpose::Leisure => "Leisure",
            TripPurpose::Shopping => "Shopping",
            TripPurpose::Other => "Other",
        };
        write!(f, "{s}")
    }
}
