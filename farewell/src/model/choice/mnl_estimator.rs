use super::{
    fare_elasticity::fare_elasticities, ChoiceModelError, ChoiceModelEstimate, ChoiceObservation,
    Coefficient, ModeAttributes, ModeValue, UtilityParameters,
};
use crate::config::ChoiceModelConfig;
use farewell_core::model::TransportMode;
use itertools::Itertools;
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};

/// step halvings tried before a Newton step is abandoned
const MAX_STEP_HALVINGS: usize = 40;
/// log-likelihood this close to zero means every choice is predicted with certainty
const SEPARATION_LOG_LIKELIHOOD: f64 = -1e-8;
/// parameters growing past this size are diverging
const SEPARATION_PARAMETER_LIMIT: f64 = 1e6;
/// relative pivot size below which the information matrix is singular
const PIVOT_TOLERANCE: f64 = 1e-12;

/// maximum likelihood estimation of a multinomial logit model by
/// Newton-Raphson with step halving, starting from all-zero parameters.
#[derive(Debug, Clone)]
pub struct MnlEstimator {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub min_sample: usize,
}

impl From<&ChoiceModelConfig> for MnlEstimator {
    fn from(conf: &ChoiceModelConfig) -> Self {
        MnlEstimator {
            max_iterations: conf.max_iterations,
            tolerance: conf.tolerance,
            min_sample: conf.min_sample,
        }
    }
}

/// log-likelihood with its gradient and Hessian at one parameter vector
struct Evaluation {
    log_likelihood: f64,
    gradient: DVector<f64>,
    hessian: DMatrix<f64>,
}

impl MnlEstimator {
    /// fits the model to `observations` whose alternatives follow `modes`. the
    /// fare-by-income interaction is estimated when `with_income` is set.
    pub fn estimate(
        &self,
        modes: &[TransportMode],
        observations: &[ChoiceObservation],
        with_income: bool,
    ) -> Result<ChoiceModelEstimate, ChoiceModelError> {
        let n = observations.len();
        if n < self.min_sample {
            return Err(ChoiceModelError::InsufficientSample {
                observations: n,
                minimum: self.min_sample,
            });
        }
        if modes.len() < 2 {
            return Err(ChoiceModelError::SingleAlternative(
                modes.iter().map(|m| m.to_string()).join(", "),
            ));
        }
        let counts = choice_counts(modes.len(), observations);
        let chosen_modes = modes
            .iter()
            .zip(counts.iter())
            .filter(|(_, c)| **c > 0)
            .map(|(m, _)| m.to_string())
            .collect_vec();
        if chosen_modes.len() < 2 {
            return Err(ChoiceModelError::SingleAlternative(chosen_modes.join(", ")));
        }
        if let Some((mode, _)) = modes.iter().zip(counts.iter()).find(|(_, c)| **c == 0) {
            return Err(ChoiceModelError::PerfectSeparation(format!(
                "{mode} is never chosen"
            )));
        }
        if with_income
            && observations
                .iter()
                .map(|o| o.income_level)
                .all_equal()
        {
            // the interaction is collinear with the fare term
            return Err(ChoiceModelError::SingularDesign { iterations: 0 });
        }

        let design = observations
            .iter()
            .map(|o| design_matrix(o, modes.len(), with_income))
            .collect_vec();
        let chosen = observations.iter().map(|o| o.chosen).collect_vec();
        let k = UtilityParameters::dimension(modes.len(), with_income);

        let mut beta = DVector::<f64>::zeros(k);
        let fit = self.newton_raphson(&design, &chosen, &mut beta);
        if !matches!(fit, Err(ChoiceModelError::PerfectSeparation(_)))
            && separates(&design, &chosen, &beta)
        {
            // no finite maximum exists when some utility ranks every choice first
            return Err(ChoiceModelError::PerfectSeparation(String::from(
                "the fitted utilities rank every chosen mode strictly first",
            )));
        }
        let (eval, iterations) = fit?;

        let covariance = factorize(-&eval.hessian)
            .ok_or(ChoiceModelError::SingularDesign { iterations })?
            .inverse();
        let names = UtilityParameters::parameter_names(modes, with_income);
        let coefficients = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let std_error = covariance[(i, i)].max(0.0).sqrt();
                let value = beta[i];
                let t_stat = if std_error > 0.0 { value / std_error } else { 0.0 };
                Coefficient {
                    name,
                    value,
                    std_error,
                    t_stat,
                }
            })
            .collect_vec();

        let parameters = UtilityParameters::from_parameters(modes, beta.as_slice(), with_income);
        let null_log_likelihood = -(n as f64) * (modes.len() as f64).ln();
        let rho_squared = 1.0 - eval.log_likelihood / null_log_likelihood;

        let mut probability_totals = vec![0.0; modes.len()];
        for obs in observations.iter() {
            let p = parameters.probabilities(&obs.alternatives, obs.income_level);
            for (total, p_j) in probability_totals.iter_mut().zip(p) {
                *total += p_j;
            }
        }
        let mean_probabilities = modes
            .iter()
            .zip(probability_totals)
            .map(|(mode, total)| ModeValue {
                mode: *mode,
                value: total / n as f64,
            })
            .collect_vec();
        let observed_shares = modes
            .iter()
            .zip(counts)
            .map(|(mode, c)| ModeValue {
                mode: *mode,
                value: c as f64 / n as f64,
            })
            .collect_vec();
        let mean_attributes = segment_mean_attributes(modes, observations);
        let elasticities = fare_elasticities(&parameters, observations);

        Ok(ChoiceModelEstimate {
            parameters,
            coefficients,
            log_likelihood: eval.log_likelihood,
            null_log_likelihood,
            rho_squared,
            iterations,
            observations: n,
            mean_probabilities,
            observed_shares,
            mean_attributes,
            elasticities,
            scenario_shares: vec![],
        })
    }

    /// maximizes the log-likelihood in place, returning the evaluation at the
    /// optimum and the number of Newton steps taken. `beta` holds the last
    /// accepted parameters when an error is returned.
    fn newton_raphson(
        &self,
        design: &[DMatrix<f64>],
        chosen: &[usize],
        beta: &mut DVector<f64>,
    ) -> Result<(Evaluation, usize), ChoiceModelError> {
        let mut iterations = 0;
        loop {
            let eval = evaluate(design, chosen, beta)
                .ok_or(ChoiceModelError::NonFiniteLikelihood { iterations })?;
            let max_gradient = eval.gradient.amax();
            if max_gradient < self.tolerance {
                return Ok((eval, iterations));
            }
            if eval.log_likelihood > SEPARATION_LOG_LIKELIHOOD {
                return Err(ChoiceModelError::PerfectSeparation(format!(
                    "log-likelihood {:.3e} after {iterations} iterations",
                    eval.log_likelihood
                )));
            }
            if iterations >= self.max_iterations {
                return Err(ChoiceModelError::NonConvergence {
                    iterations,
                    max_gradient,
                });
            }
            iterations += 1;

            let cholesky = factorize(-&eval.hessian)
                .ok_or(ChoiceModelError::SingularDesign { iterations })?;
            let direction = cholesky.solve(&eval.gradient);

            let mut step = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_STEP_HALVINGS {
                let candidate = &*beta + &direction * step;
                let ll = log_likelihood(design, chosen, &candidate);
                if ll.is_finite() && ll >= eval.log_likelihood {
                    accepted = Some(candidate);
                    break;
                }
                step *= 0.5;
            }
            match accepted {
                Some(candidate) => *beta = candidate,
                None => {
                    return Err(ChoiceModelError::NonConvergence {
                        iterations,
                        max_gradient,
                    })
                }
            }
            if beta.amax() > SEPARATION_PARAMETER_LIMIT {
                return Err(ChoiceModelError::PerfectSeparation(format!(
                    "parameters diverged past {SEPARATION_PARAMETER_LIMIT:e}"
                )));
            }
        }
    }
}

/// Cholesky factor of the information matrix, or None when the matrix is not
/// numerically positive definite. a column whose pivot is negligible next to
/// its own diagonal, or whose diagonal is negligible next to the largest one,
/// is treated as collinear.
fn factorize(information: DMatrix<f64>) -> Option<Cholesky<f64, Dyn>> {
    let diagonal = information.diagonal();
    let max_diagonal = diagonal.amax();
    let cholesky = information.clone().cholesky()?;
    let l = cholesky.l();
    let degenerate = (0..diagonal.len()).any(|i| {
        let scale = diagonal[i];
        scale <= PIVOT_TOLERANCE * max_diagonal || l[(i, i)].powi(2) <= PIVOT_TOLERANCE * scale
    });
    if degenerate {
        None
    } else {
        Some(cholesky)
    }
}

/// true when every observation's chosen alternative has strictly the highest
/// utility under `beta`. scaling such a `beta` up raises the likelihood
/// without bound.
fn separates(design: &[DMatrix<f64>], chosen: &[usize], beta: &DVector<f64>) -> bool {
    design.iter().zip(chosen.iter()).all(|(x, c)| {
        let v = x * beta;
        v.iter()
            .enumerate()
            .all(|(j, u)| j == *c || *u < v[*c])
    })
}

fn choice_counts(n_modes: usize, observations: &[ChoiceObservation]) -> Vec<usize> {
    let mut counts = vec![0; n_modes];
    for o in observations.iter() {
        counts[o.chosen] += 1;
    }
    counts
}

/// mean attributes of each alternative over all observations, imputed values included
fn segment_mean_attributes(
    modes: &[TransportMode],
    observations: &[ChoiceObservation],
) -> Vec<ModeAttributes> {
    let n = observations.len() as f64;
    modes
        .iter()
        .enumerate()
        .map(|(j, mode)| {
            let mut sum = [0.0; 4];
            for o in observations.iter() {
                let a = &o.alternatives[j];
                sum[0] += a.fare;
                sum[1] += a.travel_time;
                sum[2] += a.wait_time;
                sum[3] += a.comfort;
            }
            ModeAttributes {
                mode: *mode,
                attributes: super::AlternativeAttributes {
                    fare: sum[0] / n,
                    travel_time: sum[1] / n,
                    wait_time: sum[2] / n,
                    comfort: sum[3] / n,
                },
            }
        })
        .collect()
}

/// one row per alternative: ASC dummies for all but the first alternative,
/// then fare, travel time, wait time, comfort and optionally fare x income.
fn design_matrix(obs: &ChoiceObservation, n_modes: usize, with_income: bool) -> DMatrix<f64> {
    let k = UtilityParameters::dimension(n_modes, with_income);
    let base = n_modes - 1;
    let mut x = DMatrix::<f64>::zeros(n_modes, k);
    for (j, a) in obs.alternatives.iter().enumerate() {
        if j > 0 {
            x[(j, j - 1)] = 1.0;
        }
        x[(j, base)] = a.fare;
        x[(j, base + 1)] = a.travel_time;
        x[(j, base + 2)] = a.wait_time;
        x[(j, base + 3)] = a.comfort;
        if with_income {
            x[(j, base + 4)] = a.fare * obs.income_level;
        }
    }
    x
}

/// numerically stable choice probabilities and log-sum-exp of `x * beta`
fn probabilities(x: &DMatrix<f64>, beta: &DVector<f64>) -> (DVector<f64>, DVector<f64>, f64) {
    let v = x * beta;
    let max = v.max();
    let exps = v.map(|u| (u - max).exp());
    let total = exps.sum();
    let p = exps / total;
    let lse = max + total.ln();
    (v, p, lse)
}

fn log_likelihood(design: &[DMatrix<f64>], chosen: &[usize], beta: &DVector<f64>) -> f64 {
    design
        .iter()
        .zip(chosen.iter())
        .map(|(x, c)| {
            let (v, _, lse) = probabilities(x, beta);
            v[*c] - lse
        })
        .sum()
}

/// None when the log-likelihood or its derivatives are not finite
fn evaluate(design: &[DMatrix<f64>], chosen: &[usize], beta: &DVector<f64>) -> Option<Evaluation> {
    let k = beta.len();
    let mut log_likelihood = 0.0;
    let mut gradient = DVector::<f64>::zeros(k);
    let mut hessian = DMatrix::<f64>::zeros(k, k);
    for (x, c) in design.iter().zip(chosen.iter()) {
        let (v, p, lse) = probabilities(x, beta);
        log_likelihood += v[*c] - lse;
        let x_bar = x.transpose() * &p;
        gradient += x.row(*c).transpose() - &x_bar;
        for (j, p_j) in p.iter().enumerate() {
            let d = x.row(j).transpose() - &x_bar;
            hessian -= (&d * d.transpose()) * *p_j;
        }
    }
    let finite = log_likelihood.is_finite()
        && gradient.iter().all(|g| g.is_finite())
        && hessian.iter().all(|h| h.is_finite());
    if finite {
        Some(Evaluation {
            log_likelihood,
            gradient,
            hessian,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::choice::{build_choice_set, mean_attributes, AlternativeAttributes};
    use farewell_core::{io::sample_generator::generate_survey, model::SurveyRecord};

    const MODES: [TransportMode; 3] = [TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna];

    fn estimator() -> MnlEstimator {
        MnlEstimator {
            max_iterations: 100,
            tolerance: 1e-6,
            min_sample: 30,
        }
    }

    fn observations(records: &[SurveyRecord]) -> Vec<ChoiceObservation> {
        let refs = records.iter().collect_vec();
        build_choice_set(&refs, &MODES, &mean_attributes(&refs)).expect("choice set")
    }

    #[test]
    fn test_pooled_fit_reproduces_observed_shares() {
        let records = generate_survey(500, 42);
        let obs = observations(&records);
        let estimate = estimator()
            .estimate(&MODES, &obs, true)
            .expect("estimation should converge");
        let total: f64 = estimate.mean_probabilities.iter().map(|p| p.value).sum();
        assert!((total - 1.0).abs() < 1e-6);
        // with a full set of constants the fitted shares equal the observed shares
        for (p, s) in estimate
            .mean_probabilities
            .iter()
            .zip(estimate.observed_shares.iter())
        {
            assert!((p.value - s.value).abs() < 1e-6, "{p:?} vs {s:?}");
        }
        assert!(estimate.log_likelihood >= estimate.null_log_likelihood);
        assert!(estimate.rho_squared >= 0.0 && estimate.rho_squared < 1.0);
        assert_eq!(estimate.coefficients.len(), 7);
        assert!(estimate.parameters.income_fare.is_some());
    }

    #[test]
    fn test_estimation_is_deterministic() {
        let records = generate_survey(300, 11);
        let obs = observations(&records);
        let a = estimator().estimate(&MODES, &obs, false).expect("fit a");
        let b = estimator().estimate(&MODES, &obs, false).expect("fit b");
        let bits = |e: &ChoiceModelEstimate| {
            e.coefficients
                .iter()
                .map(|c| c.value.to_bits())
                .collect_vec()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_insufficient_sample() {
        let obs = observations(&generate_survey(500, 42));
        let result = estimator().estimate(&MODES, &obs[..20], false);
        assert!(matches!(
            result,
            Err(ChoiceModelError::InsufficientSample { observations: 20, minimum: 30 })
        ));
    }

    #[test]
    fn test_single_alternative() {
        let records = generate_survey(200, 5)
            .into_iter()
            .filter(|r| r.mode == TransportMode::Bus)
            .collect_vec();
        let refs = records.iter().collect_vec();
        let obs = build_choice_set(&refs, &[TransportMode::Bus], &mean_attributes(&refs))
            .expect("choice set");
        let result = estimator().estimate(&[TransportMode::Bus], &obs, false);
        assert!(matches!(result, Err(ChoiceModelError::SingleAlternative(_))));
    }

    #[test]
    fn test_never_chosen_alternative_is_separation() {
        let attrs = AlternativeAttributes {
            fare: 40.0,
            travel_time: 30.0,
            wait_time: 5.0,
            comfort: 3.0,
        };
        let obs = (0..40)
            .map(|i| ChoiceObservation {
                chosen: i % 2,
                income_level: 0.0,
                alternatives: vec![attrs; 3],
            })
            .collect_vec();
        let result = estimator().estimate(&MODES, &obs, false);
        assert!(matches!(result, Err(ChoiceModelError::PerfectSeparation(_))));
    }

    #[test]
    fn test_constant_attributes_are_singular() {
        let attrs = AlternativeAttributes {
            fare: 40.0,
            travel_time: 30.0,
            wait_time: 5.0,
            comfort: 3.0,
        };
        let obs = (0..60)
            .map(|i| ChoiceObservation {
                chosen: i % 3,
                income_level: 0.0,
                alternatives: vec![attrs; 3],
            })
            .collect_vec();
        let result = estimator().estimate(&MODES, &obs, false);
        assert!(matches!(result, Err(ChoiceModelError::SingularDesign { .. })));
    }

    #[test]
    fn test_iteration_limit_is_non_convergence() {
        let obs = observations(&generate_survey(500, 42));
        let capped = MnlEstimator {
            max_iterations: 1,
            ..estimator()
        };
        let result = capped.estimate(&MODES, &obs, false);
        assert!(
            matches!(result, Err(ChoiceModelError::NonConvergence { iterations: 1, .. })),
            "{result:?}"
        );
    }

    #[test]
    fn test_cheapest_mode_always_chosen_is_separation() {
        // every respondent picks the strictly cheapest alternative, while the
        // other attributes vary enough to keep the design full rank
        let obs = (0..60)
            .map(|i: usize| {
                let chosen = i % 3;
                let alternatives = (0..3)
                    .map(|j: usize| {
                        let gap = if j == chosen { 0.0 } else { 15.0 + 3.0 * j as f64 };
                        AlternativeAttributes {
                            fare: 20.0 + (i % 7) as f64 + gap,
                            travel_time: 20.0 + ((i * 37 + j * 11) % 17) as f64,
                            wait_time: 3.0 + ((i * 5 + j * 3) % 7) as f64,
                            comfort: 1.0 + ((i * 3 + j * 2) % 5) as f64,
                        }
                    })
                    .collect_vec();
                ChoiceObservation {
                    chosen,
                    income_level: 0.0,
                    alternatives,
                }
            })
            .collect_vec();
        let result = estimator().estimate(&MODES, &obs, false);
        assert!(
            matches!(result, Err(ChoiceModelError::PerfectSeparation(_))),
            "{result:?}"
        );
    }
}
