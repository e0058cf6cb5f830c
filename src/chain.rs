//! Sequential combination of one or two test results.
//!
//! Composes the imaging-layer update with the reference bridge: a single test
//! yields one [`PosteriorResult`]; two tests are chained in order at the
//! imaging layer and bridged once, with the definitional-certainty
//! short-circuits applied when either test is the imaging modality itself.
//!
//! Ordering is deliberate: test A is always applied before test B, and no
//! commutativity is claimed. Odds multiplication commutes, but the
//! imaging-modality short-circuit does not — whichever imaging observation
//! comes first collapses and freezes the ground-truth layer.

use serde::{Deserialize, Serialize};

use crate::bridge::{
    bridge_to_ground_truth, collapse_to_reference, envelope, Envelope, ImagingCharacteristics,
};
use crate::imaging::{
    observed_imaging_probability, prior_imaging_probability, resolve_lr,
    update_imaging_probability, TestResultCategory,
};
use crate::library::TestDefinition;
use crate::Result;

/// Posterior bundle for one computation. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosteriorResult {
    /// Ground-truth-anchored posterior probability, inside `envelope`.
    pub ground_truth: f64,
    /// Imaging-layer probability of a positive imaging read.
    pub imaging_layer: f64,
    /// Positive predictive value of the imaging test at the input prior.
    pub ppv: f64,
    /// Negative predictive value of the imaging test at the input prior.
    pub npv: f64,
    /// Feasible range `[1 - NPV, PPV]` for the ground-truth posterior.
    pub envelope: Envelope,
    /// The likelihood ratio that drove the final imaging-layer update, or
    /// `None` when the imaging result was observed directly (no LR applies).
    pub used_lr: Option<f64>,
}

/// Output of a two-test chain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainResult {
    /// Posterior after test A alone.
    pub first: PosteriorResult,
    /// Posterior after both tests.
    pub result: PosteriorResult,
    /// True when an imaging observation froze the ground-truth layer, so the
    /// other test could only move the imaging-layer probability.
    pub ground_truth_frozen: bool,
}

/// Computes the posterior bundle for a single test result.
///
/// Steps: derive the PPV/NPV envelope and the marginal imaging prior at
/// `ground_truth_prior`, apply the test's update at the imaging layer (LR
/// update for peripheral tests, definitional certainty for the imaging
/// modality itself), then bridge to ground truth (mixture for peripheral
/// tests, collapse for the imaging modality).
///
/// # Errors
///
/// Propagates input-validation errors and
/// [`crate::EvidenciaError::DegenerateReference`] from the bridge.
///
/// # Examples
///
/// ```
/// use evidencia::prelude::*;
///
/// let library = TestLibrary::builtin();
/// let test = library.get("plasma_ptau217_generic").unwrap();
/// let result = compute_single_test(
///     0.5,
///     ImagingCharacteristics::default(),
///     test,
///     TestResultCategory::Positive,
/// )
/// .unwrap();
/// assert!(result.ground_truth > 0.5);
/// assert!(result.envelope.contains(result.ground_truth));
/// ```
pub fn compute_single_test(
    ground_truth_prior: f64,
    imaging: ImagingCharacteristics,
    test: &TestDefinition,
    category: TestResultCategory,
) -> Result<PosteriorResult> {
    let env = envelope(imaging, ground_truth_prior)?;
    let q0 = prior_imaging_probability(ground_truth_prior, imaging.se, imaging.sp)?;

    let (imaging_layer, ground_truth, used_lr) = if test.is_imaging_modality() {
        let q = observed_imaging_probability(category, q0);
        let p = collapse_to_reference(category, &env, ground_truth_prior);
        (q, p, None)
    } else {
        let lr = resolve_lr(category, &test.default_lrs);
        let q = update_imaging_probability(q0, lr)?;
        let p = bridge_to_ground_truth(q, &env);
        (q, p, Some(lr))
    };

    Ok(PosteriorResult {
        ground_truth,
        imaging_layer,
        ppv: env.ppv(),
        npv: env.npv(),
        envelope: env,
        used_lr,
    })
}

/// Chains two ordered test results: imaging-layer updates in sequence, one
/// bridge to ground truth.
///
/// The PPV/NPV envelope is computed once at `ground_truth_prior` and never
/// recomputed per test. Test B updates the imaging layer *from test A's
/// output*, not from the original prior. If test A is the imaging modality,
/// the ground-truth posterior collapses there and is frozen: test B still
/// moves the imaging layer but cannot move the ground-truth layer, and a
/// second imaging observation cannot re-collapse it. If only test B is the
/// imaging modality, a definite result collapses the ground-truth posterior
/// to PPV / 1-NPV; an indeterminate one leaves test A's bridged posterior in
/// place.
///
/// # Errors
///
/// Propagates input-validation errors and
/// [`crate::EvidenciaError::DegenerateReference`] from the bridge.
pub fn compute_two_test_chain(
    ground_truth_prior: f64,
    imaging: ImagingCharacteristics,
    test_a: &TestDefinition,
    category_a: TestResultCategory,
    test_b: &TestDefinition,
    category_b: TestResultCategory,
) -> Result<ChainResult> {
    let first = compute_single_test(ground_truth_prior, imaging, test_a, category_a)?;
    let env = first.envelope;
    let q_a = first.imaging_layer;

    let (imaging_layer, ground_truth, used_lr, frozen) = if test_a.is_imaging_modality() {
        // First imaging observation wins: the ground-truth layer stays where
        // it collapsed, whatever test B says.
        let (q_ab, lr) = second_imaging_layer(q_a, test_b, category_b)?;
        (q_ab, first.ground_truth, lr, true)
    } else if test_b.is_imaging_modality() {
        let q_ab = observed_imaging_probability(category_b, q_a);
        let p = match category_b {
            TestResultCategory::Indeterminate => first.ground_truth,
            _ => collapse_to_reference(category_b, &env, ground_truth_prior),
        };
        (q_ab, p, None, true)
    } else {
        let lr = resolve_lr(category_b, &test_b.default_lrs);
        let q_ab = update_imaging_probability(q_a, lr)?;
        let p = bridge_to_ground_truth(q_ab, &env);
        (q_ab, p, Some(lr), false)
    };

    Ok(ChainResult {
        first,
        result: PosteriorResult {
            ground_truth,
            imaging_layer,
            ppv: env.ppv(),
            npv: env.npv(),
            envelope: env,
            used_lr,
        },
        ground_truth_frozen: frozen,
    })
}

/// Imaging-layer effect of test B once test A has set the layer to `q_a`.
fn second_imaging_layer(
    q_a: f64,
    test_b: &TestDefinition,
    category_b: TestResultCategory,
) -> Result<(f64, Option<f64>)> {
    if test_b.is_imaging_modality() {
        Ok((observed_imaging_probability(category_b, q_a), None))
    } else {
        let lr = resolve_lr(category_b, &test_b.default_lrs);
        Ok((update_imaging_probability(q_a, lr)?, Some(lr)))
    }
}
