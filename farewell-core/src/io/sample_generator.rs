//! seeded synthetic survey for demonstrations and tests.
//!
//! respondents are drawn uniformly over income group, mode, trip purpose and
//! frequency of use. fares, stated WTP, times and comfort come from
//! income-specific ranges, then MRT and Leguna trips are adjusted (MRT:
//! fare x1.8, travel time x0.6, comfort at least 4; Leguna: fare x0.7,
//! travel time x1.2, comfort at most 2).
use crate::model::{IncomeGroup, SurveyError, SurveyRecord, SurveyRow, TransportMode, TripPurpose};
use kdam::tqdm;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{ops::Range, ops::RangeInclusive, path::Path};

pub const DEFAULT_RESPONDENTS: usize = 500;
pub const DEFAULT_SEED: u64 = 42;

const MODES: [TransportMode; 3] = [TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna];
const PURPOSES: [TripPurpose; 3] = [TripPurpose::Work, TripPurpose::School, TripPurpose::Leisure];
const FREQUENCIES: [&str; 3] = ["Daily", "Weekly", "Occasional"];
const ZONES: RangeInclusive<u32> = 1..=20;

/// value ranges drawn for one income group
struct IncomeProfile {
    fare: Range<f64>,
    wtp: Range<f64>,
    travel_time: Range<f64>,
    wait_time: Range<f64>,
    comfort: RangeInclusive<u8>,
}

fn profile(group: IncomeGroup) -> IncomeProfile {
    match group {
        IncomeGroup::Low => IncomeProfile {
            fare: 20.0..60.0,
            wtp: 30.0..80.0,
            travel_time: 30.0..90.0,
            wait_time: 5.0..25.0,
            comfort: 1..=3,
        },
        IncomeGroup::Mid => IncomeProfile {
            fare: 40.0..100.0,
            wtp: 60.0..120.0,
            travel_time: 20.0..70.0,
            wait_time: 3.0..20.0,
            comfort: 2..=4,
        },
        IncomeGroup::High => IncomeProfile {
            fare: 60.0..120.0,
            wtp: 100.0..200.0,
            travel_time: 15.0..50.0,
            wait_time: 2.0..15.0,
            comfort: 3..=5,
        },
    }
}

/// draws `respondents` survey records. the same seed always yields the same records.
pub fn generate_survey(respondents: usize, seed: u64) -> Vec<SurveyRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    tqdm!(0..respondents, desc = "generate survey")
        .map(|i| generate_record(&mut rng, i + 1))
        .collect()
}

fn generate_record(rng: &mut StdRng, id: usize) -> SurveyRecord {
    let income_group = IncomeGroup::ALL[rng.random_range(0..IncomeGroup::ALL.len())];
    let mode = MODES[rng.random_range(0..MODES.len())];
    let trip_purpose = PURPOSES[rng.random_range(0..PURPOSES.len())];
    let frequency = FREQUENCIES[rng.random_range(0..FREQUENCIES.len())];

    let p = profile(income_group);
    let mut fare = rng.random_range(p.fare);
    let wtp = rng.random_range(p.wtp);
    let mut travel_time = rng.random_range(p.travel_time);
    let wait_time = rng.random_range(p.wait_time);
    let mut comfort = rng.random_range(p.comfort);

    match mode {
        TransportMode::Mrt => {
            fare *= 1.8;
            travel_time *= 0.6;
            comfort = comfort.max(4);
        }
        TransportMode::Leguna => {
            fare *= 0.7;
            travel_time *= 1.2;
            comfort = comfort.min(2);
        }
        _ => {}
    }

    SurveyRecord {
        respondent_id: id.to_string(),
        mode,
        origin_taz: Some(format!("Z{}", rng.random_range(ZONES))),
        destination_taz: Some(format!("Z{}", rng.random_range(ZONES))),
        income_group,
        trip_purpose,
        frequency_of_use: Some(frequency.to_string()),
        travel_time: round2(travel_time),
        fare: round2(fare),
        wait_time: round2(wait_time),
        comfort,
        wtp: round2(wtp),
        wtp_lower_fare: rng.random_bool(0.5),
        wtp_higher_comfort: rng.random_bool(0.5),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// writes records as a survey CSV file with the standard column layout
pub fn write_survey<P: AsRef<Path>>(path: P, records: &[SurveyRecord]) -> Result<(), SurveyError> {
    let name = path.as_ref().to_string_lossy().to_string();
    let mut writer =
        csv::Writer::from_path(path.as_ref()).map_err(|e| SurveyError::WriteError(name.clone(), e))?;
    for record in records.iter() {
        writer
            .serialize(SurveyRow::from(record))
            .map_err(|e| SurveyError::WriteError(name.clone(), e))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{read_survey, SurveyReaderOptions};

    #[test]
    fn test_same_seed_same_survey() {
        let a = generate_survey(50, 7);
        let b = generate_survey(50, 7);
        assert_eq!(a, b);
        let c = generate_survey(50, 8);
        assert_ne!(a, c);
    }

    #[test]
    fn test_mode_adjustments() {
        for r in generate_survey(300, DEFAULT_SEED) {
            match r.mode {
                TransportMode::Mrt => assert!(r.comfort >= 4),
                TransportMode::Leguna => assert!(r.comfort <= 2),
                _ => assert!(r.fare >= 20.0 && r.fare <= 120.0),
            }
            assert!(r.wtp > 0.0);
        }
    }

    #[test]
    fn test_written_survey_reads_back() {
        let records = generate_survey(40, DEFAULT_SEED);
        let path = std::env::temp_dir().join(format!(
            "farewell-sample-{}-{}.csv",
            std::process::id(),
            DEFAULT_SEED
        ));
        write_survey(&path, &records).expect("write should succeed");
        let (ds, summary) =
            read_survey(&path, &SurveyReaderOptions::default()).expect("read should succeed");
        let _ = std::fs::remove_file(&path);
        assert_eq!(summary.rows_kept, 40);
        assert_eq!(ds.records(), records.as_slice());
    }
}
