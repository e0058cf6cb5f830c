//! Imaging-layer Bayesian updates.
//!
//! Peripheral biomarker tests are calibrated against an intermediate imaging
//! modality, so their likelihood ratios revise the probability that the
//! imaging test *would read positive*, not the ground-truth probability
//! itself. This module owns that layer: the marginal imaging prior at a given
//! ground-truth prevalence, the odds-domain LR update, and the rule that a
//! directly observed imaging result is definitionally certain.

use serde::{Deserialize, Serialize};

use crate::odds::{clamp_probability, from_odds, to_odds, validate_probability, validate_rate};
use crate::{EvidenciaError, Result};

/// Qualitative outcome of a diagnostic test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResultCategory {
    /// Result favors the condition being present.
    Positive,
    /// Result is uninformative; resolves to a neutral likelihood ratio.
    Indeterminate,
    /// Result favors the condition being absent.
    Negative,
}

/// Likelihood ratios for the three result categories of one test.
///
/// The indeterminate ratio defaults to 1.0 (neutral) and should stay there
/// unless a study actually reports one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LrTriplet {
    /// Likelihood ratio applied on a positive result (LR+ > 1 is informative).
    pub pos: f64,
    /// Likelihood ratio applied on an indeterminate result.
    #[serde(default = "neutral_lr")]
    pub indeterminate: f64,
    /// Likelihood ratio applied on a negative result (LR- < 1 is informative).
    pub neg: f64,
}

fn neutral_lr() -> f64 {
    1.0
}

impl LrTriplet {
    /// Builds a triplet with the conventional neutral indeterminate ratio.
    ///
    /// # Examples
    ///
    /// ```
    /// use evidencia::imaging::LrTriplet;
    ///
    /// let lrs = LrTriplet::new(9.2, 0.089);
    /// assert_eq!(lrs.indeterminate, 1.0);
    /// ```
    #[must_use]
    pub fn new(pos: f64, neg: f64) -> Self {
        Self {
            pos,
            indeterminate: 1.0,
            neg,
        }
    }

    /// Builds a triplet with an explicit indeterminate likelihood ratio.
    #[must_use]
    pub fn with_indeterminate(pos: f64, indeterminate: f64, neg: f64) -> Self {
        Self {
            pos,
            indeterminate,
            neg,
        }
    }
}

/// Selects the likelihood ratio that applies to an observed result category.
///
/// # Examples
///
/// ```
/// use evidencia::imaging::{resolve_lr, LrTriplet, TestResultCategory};
///
/// let lrs = LrTriplet::new(9.2, 0.089);
/// assert_eq!(resolve_lr(TestResultCategory::Positive, &lrs), 9.2);
/// assert_eq!(resolve_lr(TestResultCategory::Indeterminate, &lrs), 1.0);
/// assert_eq!(resolve_lr(TestResultCategory::Negative, &lrs), 0.089);
/// ```
#[must_use]
pub fn resolve_lr(category: TestResultCategory, lrs: &LrTriplet) -> f64 {
    match category {
        TestResultCategory::Positive => lrs.pos,
        TestResultCategory::Indeterminate => lrs.indeterminate,
        TestResultCategory::Negative => lrs.neg,
    }
}

/// Marginal probability that the imaging test reads positive at a given
/// ground-truth prevalence.
///
/// By total probability over ground-truth status:
/// `P(I+) = Se * prior + (1 - Sp) * (1 - prior)`.
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidProbability`] if `ground_truth_prior` is
/// outside (0, 1), or [`EvidenciaError::InvalidRate`] if `se`/`sp` fall
/// outside [0, 1].
///
/// # Examples
///
/// ```
/// use evidencia::imaging::prior_imaging_probability;
///
/// // Se 0.92, Sp 0.90 at 50% prevalence: 0.92*0.5 + 0.10*0.5 = 0.51
/// let q0 = prior_imaging_probability(0.5, 0.92, 0.90).unwrap();
/// assert!((q0 - 0.51).abs() < 1e-12);
/// ```
pub fn prior_imaging_probability(ground_truth_prior: f64, se: f64, sp: f64) -> Result<f64> {
    let prior = validate_probability(ground_truth_prior, "ground_truth_prior")?;
    let se = validate_rate(se, "se")?;
    let sp = validate_rate(sp, "sp")?;
    Ok(se * prior + (1.0 - sp) * (1.0 - prior))
}

/// Revises an imaging-layer probability with one likelihood ratio.
///
/// The single update primitive used everywhere a test result moves a
/// probability: convert to odds, multiply by the LR, convert back. The input
/// probability is clamped into `[1e-6, 1 - 1e-6]` so the odds stay finite.
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidLikelihoodRatio`] if `lr` is non-positive
/// or non-finite, or [`EvidenciaError::InvalidProbability`] if `prior_q` is
/// non-finite or outside [0, 1].
///
/// # Examples
///
/// ```
/// use evidencia::imaging::update_imaging_probability;
///
/// let q = update_imaging_probability(0.51, 9.2).unwrap();
/// assert!((q - 0.9054).abs() < 1e-3);
///
/// // Neutral LR leaves the probability unchanged.
/// let same = update_imaging_probability(0.51, 1.0).unwrap();
/// assert!((same - 0.51).abs() < 1e-12);
/// ```
pub fn update_imaging_probability(prior_q: f64, lr: f64) -> Result<f64> {
    if !lr.is_finite() || lr <= 0.0 {
        return Err(EvidenciaError::InvalidLikelihoodRatio { value: lr });
    }
    if !prior_q.is_finite() || !(0.0..=1.0).contains(&prior_q) {
        return Err(EvidenciaError::InvalidProbability {
            param: "prior_q".to_string(),
            value: prior_q,
        });
    }
    let odds = to_odds(clamp_probability(prior_q))?;
    from_odds(odds * lr)
}

/// Imaging-layer probability when the imaging test itself was observed.
///
/// The imaging result is ground truth for its own layer, so no LR update
/// applies: positive fixes the layer at 1.0, negative at 0.0, and an
/// indeterminate read leaves the pre-test value in place.
///
/// # Examples
///
/// ```
/// use evidencia::imaging::{observed_imaging_probability, TestResultCategory};
///
/// assert_eq!(observed_imaging_probability(TestResultCategory::Positive, 0.51), 1.0);
/// assert_eq!(observed_imaging_probability(TestResultCategory::Negative, 0.51), 0.0);
/// assert_eq!(observed_imaging_probability(TestResultCategory::Indeterminate, 0.51), 0.51);
/// ```
#[must_use]
pub fn observed_imaging_probability(category: TestResultCategory, pre_test_q: f64) -> f64 {
    match category {
        TestResultCategory::Positive => 1.0,
        TestResultCategory::Negative => 0.0,
        TestResultCategory::Indeterminate => pre_test_q,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_lr_categories() {
        let lrs = LrTriplet::with_indeterminate(5.67, 1.0, 0.176);
        assert_eq!(resolve_lr(TestResultCategory::Positive, &lrs), 5.67);
        assert_eq!(resolve_lr(TestResultCategory::Indeterminate, &lrs), 1.0);
        assert_eq!(resolve_lr(TestResultCategory::Negative, &lrs), 0.176);
    }

    #[test]
    fn test_lr_triplet_serde_defaults_indeterminate() {
        let lrs: LrTriplet = serde_json::from_str(r#"{"pos": 9.2, "neg": 0.089}"#).unwrap();
        assert_eq!(lrs.indeterminate, 1.0);
    }

    #[test]
    fn test_prior_imaging_probability_reference_values() {
        // Se=0.92, Sp=0.90, prior=0.50 → 0.92*0.5 + 0.10*0.5 = 0.51
        let q0 = prior_imaging_probability(0.5, 0.92, 0.90).unwrap();
        assert!((q0 - 0.51).abs() < 1e-12);
    }

    #[test]
    fn test_prior_imaging_probability_validates_inputs() {
        assert!(prior_imaging_probability(0.0, 0.9, 0.9).is_err());
        assert!(prior_imaging_probability(1.0, 0.9, 0.9).is_err());
        assert!(prior_imaging_probability(0.5, 1.2, 0.9).is_err());
        assert!(prior_imaging_probability(0.5, 0.9, -0.1).is_err());
        assert!(prior_imaging_probability(f64::NAN, 0.9, 0.9).is_err());
    }

    #[test]
    fn test_update_matches_hand_computation() {
        // odds(0.51) * 9.2 = (0.51/0.49) * 9.2; back to probability
        let expected = (0.51 / 0.49 * 9.2) / (1.0 + 0.51 / 0.49 * 9.2);
        let q = update_imaging_probability(0.51, 9.2).unwrap();
        assert!((q - expected).abs() < 1e-12);
        assert!((q - 0.9054).abs() < 1e-3);
    }

    #[test]
    fn test_update_rejects_bad_lr() {
        assert!(update_imaging_probability(0.5, 0.0).is_err());
        assert!(update_imaging_probability(0.5, -2.0).is_err());
        assert!(update_imaging_probability(0.5, f64::NAN).is_err());
        assert!(update_imaging_probability(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_update_clamps_boundary_prior() {
        // Exact 0/1 priors are clamped rather than rejected; odds stay finite.
        let up = update_imaging_probability(1.0, 2.0).unwrap();
        assert!(up < 1.0);
        let down = update_imaging_probability(0.0, 0.5).unwrap();
        assert!(down > 0.0);
    }

    #[test]
    fn test_observed_imaging_overrides_lr_path() {
        assert_eq!(
            observed_imaging_probability(TestResultCategory::Positive, 0.2),
            1.0
        );
        assert_eq!(
            observed_imaging_probability(TestResultCategory::Negative, 0.8),
            0.0
        );
        assert_eq!(
            observed_imaging_probability(TestResultCategory::Indeterminate, 0.37),
            0.37
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A larger LR never lowers the updated imaging-layer probability.
            #[test]
            fn prop_update_monotone_in_lr(
                q in 1e-6..=(1.0 - 1e-6),
                lr in 0.01..100.0f64,
                bump in 0.0..10.0f64
            ) {
                let lo = update_imaging_probability(q, lr).unwrap();
                let hi = update_imaging_probability(q, lr + bump).unwrap();
                prop_assert!(hi >= lo - 1e-12);
            }

            /// Updates stay inside [0, 1).
            #[test]
            fn prop_update_in_unit_interval(
                q in 0.0..=1.0f64,
                lr in 1e-3..1e3f64
            ) {
                let out = update_imaging_probability(q, lr).unwrap();
                prop_assert!((0.0..1.0).contains(&out));
            }

            /// The marginal imaging prior is a probability for all valid inputs.
            #[test]
            fn prop_imaging_prior_in_unit_interval(
                prior in 1e-6..=(1.0 - 1e-6),
                se in 0.0..=1.0f64,
                sp in 0.0..=1.0f64
            ) {
                let q0 = prior_imaging_probability(prior, se, sp).unwrap();
                prop_assert!((0.0..=1.0).contains(&q0));
            }
        }
    }
}
