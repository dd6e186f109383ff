mod choice_model_error;
mod choice_model_estimate;
mod choice_set;
mod fare_elasticity;
mod mnl_estimator;
mod mode_share_scenario;

pub use choice_model_error::ChoiceModelError;
pub use choice_model_estimate::{
    softmax, ChoiceModelEstimate, ChoiceModelResults, Coefficient, ModeAttributes, ModeValue,
    SegmentEstimate, UtilityParameters,
};
pub use choice_set::{build_choice_set, mean_attributes, AlternativeAttributes, ChoiceObservation};
pub use fare_elasticity::{fare_elasticities, FareElasticity, ZERO_ELASTICITY};
pub use mnl_estimator::MnlEstimator;
pub use mode_share_scenario::{
    predict_mode_shares, AttributeChanges, ModeShareScenario, PredictedShares, BASE_SCENARIO,
};

use crate::{config::ChoiceModelConfig, model::Segment};
use farewell_core::model::{SurveyDataset, SurveyRecord, TransportMode};
use itertools::Itertools;
use kdam::tqdm;

/// fits a multinomial logit model to all respondents and then to each income
/// group separately. a segment that cannot be estimated is kept as a failed
/// outcome so the remaining stages still run.
pub fn estimate_choice_models(
    dataset: &SurveyDataset,
    modes: &[TransportMode],
    conf: &ChoiceModelConfig,
) -> ChoiceModelResults {
    let estimator = MnlEstimator::from(conf);
    let all = dataset.iter().collect_vec();
    let fallback = mean_attributes(&all);
    let groups = dataset.by_income_group();
    let with_income = conf.income_interaction && groups.len() > 1;

    let mut segments = vec![estimate_segment(
        &estimator,
        Segment::All,
        &all,
        modes,
        &fallback,
        with_income,
        &conf.scenarios,
    )];
    for (group, records) in tqdm!(groups.iter(), desc = "income group choice models") {
        segments.push(estimate_segment(
            &estimator,
            Segment::Income(*group),
            records,
            modes,
            &fallback,
            false,
            &conf.scenarios,
        ));
    }
    eprintln!();
    ChoiceModelResults {
        modes: modes.to_vec(),
        segments,
    }
}

fn estimate_segment(
    estimator: &MnlEstimator,
    segment: Segment,
    records: &[&SurveyRecord],
    modes: &[TransportMode],
    fallback: &std::collections::BTreeMap<TransportMode, AlternativeAttributes>,
    with_income: bool,
    scenarios: &[ModeShareScenario],
) -> SegmentEstimate {
    let result = build_choice_set(records, modes, fallback).and_then(|obs| {
        let mut estimate = estimator.estimate(modes, &obs, with_income)?;
        estimate.scenario_shares = predict_mode_shares(&estimate.parameters, &obs, scenarios);
        Ok(estimate)
    });
    match &result {
        Ok(e) => {
            log::info!(
                "choice model [{segment}]: {} observations, {} iterations, LL {:.3}, rho² {:.4}",
                e.observations,
                e.iterations,
                e.log_likelihood,
                e.rho_squared
            );
            if e.elasticities.iter().filter(|x| x.is_direct()).all(|x| x.is_zero()) {
                log::warn!("choice model [{segment}]: every direct fare elasticity is zero");
            }
        }
        Err(e) => log::warn!("choice model [{segment}] could not be estimated: {e}"),
    }
    SegmentEstimate {
        segment,
        observations: records.len(),
        outcome: result.into(),
    }
}
