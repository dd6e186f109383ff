use super::{
    affordability::analyse_affordability,
    analysis_results::{mode_shares, AnalysisMetadata, AnalysisResults},
    choice::estimate_choice_models,
    mcda::{mode_criteria, score_modes},
    policy::evaluate_policies,
    welfare::{optimize_fares, OptimizationError},
    FarewellError,
};
use crate::config::AnalysisConfiguration;
use farewell_core::{io::LoadSummary, model::SurveyDataset};
use itertools::Itertools;

/// runs every analysis stage over a loaded survey.
///
/// the configured modes are narrowed to those somebody actually chose, and
/// trips on any other mode are set aside before the first stage. choice model
/// and WTP failures are confined to their segment, and a mode whose fares
/// cannot be optimized is left out of the MCDA ranking. the run stops when no
/// mode can be optimized, or when MCDA scoring or policy evaluation fails.
pub fn run_analysis(
    dataset: &SurveyDataset,
    load_summary: &LoadSummary,
    conf: &AnalysisConfiguration,
) -> Result<AnalysisResults, FarewellError> {
    let modes = dataset.analysed_modes(&conf.data.modes);
    if modes.is_empty() {
        return Err(FarewellError::ConfigurationError(format!(
            "none of the configured modes [{}] appear in the survey",
            conf.data.modes.iter().join(", ")
        )));
    }
    let dataset = dataset.restricted_to(&modes);
    let dropped = load_summary.rows_kept.saturating_sub(dataset.len());
    if dropped > 0 {
        log::warn!("{dropped} trips on modes outside [{}] are excluded", modes.iter().join(", "));
    }
    log::info!(
        "analysing {} trips over modes [{}]",
        dataset.len(),
        modes.iter().join(", ")
    );

    let metadata = AnalysisMetadata::new(&dataset, &modes);
    let mode_shares = mode_shares(&dataset, &modes);
    let choice_models = estimate_choice_models(&dataset, &modes, &conf.choice_model);
    let affordability =
        analyse_affordability(&dataset, &modes, &choice_models, &conf.affordability);
    let welfare = optimize_fares(&dataset, &modes, &conf.welfare)?;
    let optimized = welfare.optimized_modes();
    if optimized.is_empty() {
        let failures = welfare
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.mode, f.error))
            .join("; ");
        return Err(OptimizationError::NoOptimizedMode(failures).into());
    }
    if optimized.len() < modes.len() {
        log::warn!("MCDA ranks only the optimized modes [{}]", optimized.iter().join(", "));
    }
    let criteria = mode_criteria(&dataset, &optimized, &welfare)?;
    let mcda = score_modes(&criteria, &conf.mcda.weights)?;
    let policy = evaluate_policies(&dataset, &conf.policy)?;

    Ok(AnalysisResults {
        metadata,
        load_summary: load_summary.clone(),
        mode_shares,
        choice_models,
        affordability,
        welfare,
        mcda,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;
    use farewell_core::{
        io::sample_generator::generate_survey,
        model::{IncomeGroup, SurveyRecord, TransportMode},
    };

    fn summary(n: usize) -> LoadSummary {
        LoadSummary {
            source: String::from("generated"),
            rows_read: n,
            rows_kept: n,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_run_on_generated_survey() {
        let dataset = SurveyDataset::new(generate_survey(500, 42));
        let conf = AnalysisConfiguration::default();
        let results = run_analysis(&dataset, &summary(500), &conf).expect("analysis");
        assert_eq!(results.metadata.observations, 500);
        assert_eq!(results.metadata.modes.len(), 3);
        assert_eq!(results.mode_shares[0].segment, Segment::All);
        assert_eq!(results.choice_models.segments.len(), 4);
        assert_eq!(results.welfare.outcomes.len(), 18);
        assert_eq!(results.mcda.scores.len(), 3);
        assert_eq!(results.policy.scenarios.len(), 5);
        for s in results.mcda.scores.iter() {
            assert!((0.0..=1.0).contains(&s.composite));
        }
    }

    #[test]
    fn test_configured_modes_narrow_the_survey() {
        let dataset = SurveyDataset::new(generate_survey(300, 7));
        let mut conf = AnalysisConfiguration::default();
        conf.data.modes = vec![TransportMode::Mrt, TransportMode::Bus];
        let results = run_analysis(&dataset, &summary(300), &conf).expect("analysis");
        assert_eq!(results.metadata.modes, vec![TransportMode::Mrt, TransportMode::Bus]);
        assert!(results.metadata.observations < 300);
        assert_eq!(results.welfare.outcomes.len(), 12);
    }

    #[test]
    fn test_no_configured_mode_present() {
        let dataset = SurveyDataset::new(
            generate_survey(100, 3)
                .into_iter()
                .filter(|r| r.mode == TransportMode::Bus)
                .collect(),
        );
        let mut conf = AnalysisConfiguration::default();
        conf.data.modes = vec![TransportMode::Leguna];
        let result = run_analysis(&dataset, &summary(100), &conf);
        assert!(matches!(result, Err(FarewellError::ConfigurationError(_))));
    }

    #[test]
    fn test_zero_fare_mode_does_not_stop_the_run() {
        let mut records = generate_survey(300, 5)
            .into_iter()
            .filter(|r| r.mode != TransportMode::Leguna)
            .collect_vec();
        records.extend((0..40).map(|i| {
            let income = [IncomeGroup::Low, IncomeGroup::Mid, IncomeGroup::High][i % 3];
            SurveyRecord::new(&format!("z{i}"), TransportMode::Leguna, income, 0.0, 35.0, 6.0, 2, 25.0)
        }));
        let n = records.len();
        let dataset = SurveyDataset::new(records);
        let results = run_analysis(&dataset, &summary(n), &AnalysisConfiguration::default())
            .expect("analysis");
        assert_eq!(results.metadata.modes.len(), 3);
        assert_eq!(results.welfare.failures.len(), 1);
        assert_eq!(results.welfare.failures[0].mode, TransportMode::Leguna);
        assert_eq!(results.mcda.scores.len(), 2);
        assert!(results.mcda.scores.iter().all(|s| s.mode != TransportMode::Leguna));
    }

    #[test]
    fn test_no_optimizable_mode_stops_the_run() {
        let dataset = SurveyDataset::new(generate_survey(200, 8));
        let mut conf = AnalysisConfiguration::default();
        conf.welfare.demand_budget = Some(1.0);
        let result = run_analysis(&dataset, &summary(200), &conf);
        assert!(matches!(
            result,
            Err(FarewellError::OptimizationError {
                source: OptimizationError::NoOptimizedMode(_)
            })
        ));
    }
}
