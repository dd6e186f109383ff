use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// a public or private transport alternative reported in the survey.
///
/// the enhanced survey covers Bus, MRT and Leguna; older survey rounds also
/// included Rickshaw and Private Car, so all five are accepted on input.
/// which of these take part in an analysis is decided by configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Bus,
    Mrt,
    Leguna,
    Rickshaw,
    PrivateCar,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Bus,
        TransportMode::Mrt,
        TransportMode::Leguna,
        TransportMode::Rickshaw,
        TransportMode::PrivateCar,
    ];

    /// label used in survey files and reports
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Bus => "Bus",
            TransportMode::Mrt => "MRT",
            TransportMode::Leguna => "Leguna",
            TransportMode::Rickshaw => "Rickshaw",
            TransportMode::PrivateCar => "Private Car",
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "bus" => Ok(Self::Bus),
            "mrt" | "metro" | "metro rail" => Ok(Self::Mrt),
            "leguna" => Ok(Self::Leguna),
            "rickshaw" => Ok(Self::Rickshaw),
            "private car" | "privatecar" | "car" => Ok(Self::PrivateCar),
            _ => Err(format!("unknown transport mode '{s}'")),
        }
    }
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::TransportMode;

    #[test]
    fn test_survey_labels_round_trip_through_parse() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.label().parse::<TransportMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("private_car".parse(), Ok(TransportMode::PrivateCar));
        assert_eq!("Mrt".parse(), Ok(TransportMode::Mrt));
        assert!("ferry".parse::<TransportMode>().is_err());
    }
}
