mod affordability_error;
mod contingent_valuation;
mod equity;
mod generalized_cost;
mod modeled_wtp;
mod stated_wtp;
mod value_of_time;
mod wtp_threshold;

pub use affordability_error::AffordabilityError;
pub use contingent_valuation::{contingent_valuation, ContingentValuation};
pub use equity::{gini, mode_equity, ModeEquity};
pub use generalized_cost::{generalized_cost, GeneralizedCost};
pub use modeled_wtp::{modeled_wtp, ModeWtp, ModeledWtp, TradeOffs};
pub use stated_wtp::{stated_wtp_summary, BandCounts, StatedWtpSummary};
pub use value_of_time::{stated_value_of_time, StatedValueOfTime};
pub use wtp_threshold::WtpThreshold;

use super::{choice::ChoiceModelResults, Segment, StageOutcome};
use crate::config::AffordabilityConfig;
use farewell_core::model::{SurveyDataset, SurveyRecord, TransportMode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SegmentWtp {
    pub segment: Segment,
    pub outcome: StageOutcome<ModeledWtp>,
}

/// willingness to pay, affordability and equity of the surveyed trips
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AffordabilityResults {
    /// from each choice model that was estimated
    pub modeled_wtp: Vec<SegmentWtp>,
    pub stated_wtp: Vec<StatedWtpSummary>,
    pub contingent_valuation: Vec<ContingentValuation>,
    pub value_of_time: Vec<StatedValueOfTime>,
    pub generalized_cost: Vec<GeneralizedCost>,
    pub equity: Vec<ModeEquity>,
}

/// summaries are computed for all respondents first, then per income group.
pub fn analyse_affordability(
    dataset: &SurveyDataset,
    modes: &[TransportMode],
    choice_models: &ChoiceModelResults,
    conf: &AffordabilityConfig,
) -> AffordabilityResults {
    let modeled_wtp = choice_models
        .completed()
        .map(|(segment, estimate)| {
            let result = modeled_wtp(segment, estimate, conf.wtp_threshold);
            if let Err(e) = &result {
                log::warn!("modeled WTP [{segment}] unavailable: {e}");
            }
            SegmentWtp {
                segment,
                outcome: result.into(),
            }
        })
        .collect_vec();

    let all = dataset.iter().collect_vec();
    let groups = dataset.by_income_group();
    let segments: Vec<(Segment, &[&SurveyRecord])> = std::iter::once((Segment::All, all.as_slice()))
        .chain(
            groups
                .iter()
                .map(|(g, records)| (Segment::Income(*g), records.as_slice())),
        )
        .collect_vec();

    let stated_wtp = segments
        .iter()
        .filter_map(|(s, r)| stated_wtp_summary(*s, r))
        .collect_vec();
    let contingent_valuation = segments
        .iter()
        .filter_map(|(s, r)| contingent_valuation(*s, r))
        .collect_vec();
    let value_of_time = segments
        .iter()
        .filter_map(|(s, r)| stated_value_of_time(*s, r))
        .collect_vec();

    let by_mode = dataset.by_mode();
    let mode_records = modes
        .iter()
        .filter_map(|m| by_mode.get(m).map(|r| (*m, r)))
        .collect_vec();
    let generalized_cost = mode_records
        .iter()
        .filter_map(|(m, r)| generalized_cost(*m, r, conf.wait_time_weight))
        .collect_vec();
    let equity = mode_records
        .iter()
        .filter_map(|(m, r)| mode_equity(*m, r))
        .collect_vec();

    if let Some(all) = stated_wtp.first() {
        log::info!(
            "affordability: mean stated WTP {:.2} BDT, {:.1}% of trips unaffordable",
            all.wtp.mean,
            all.unaffordable_percentage
        );
    }
    AffordabilityResults {
        modeled_wtp,
        stated_wtp,
        contingent_valuation,
        value_of_time,
        generalized_cost,
        equity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ChoiceModelConfig, model::choice::estimate_choice_models};
    use farewell_core::io::sample_generator::generate_survey;

    #[test]
    fn test_segments_and_modes() {
        let dataset = SurveyDataset::new(generate_survey(400, 42));
        let modes = [TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna];
        let choice = estimate_choice_models(&dataset, &modes, &ChoiceModelConfig::default());
        let results =
            analyse_affordability(&dataset, &modes, &choice, &AffordabilityConfig::default());
        assert_eq!(results.stated_wtp.len(), 4);
        assert_eq!(results.stated_wtp[0].segment, Segment::All);
        assert_eq!(results.stated_wtp[0].bands.total(), 400);
        assert_eq!(results.generalized_cost.len(), 3);
        assert_eq!(results.equity.len(), 3);
        assert!(results.equity.iter().all(|e| (0.0..1.0).contains(&e.gini)));
        assert_eq!(results.modeled_wtp.len(), choice.completed().count());
    }
}
