//! Reference bridge between the imaging layer and the ground-truth layer.
//!
//! The imaging modality has known sensitivity/specificity against the
//! ground-truth standard, which pins the predictive values PPV and NPV at a
//! stated prevalence. Any ground-truth posterior reachable through the imaging
//! bridge is then confined to the envelope `[1 - NPV, PPV]`; this module
//! computes that envelope, mixes imaging-layer probabilities into it, and
//! applies the collapse rule when the imaging result was observed directly.
//!
//! Also provides LR re-anchoring: converting a peripheral test's
//! imaging-referenced likelihood ratios into ground-truth-anchored ones.

use serde::{Deserialize, Serialize};

use crate::imaging::TestResultCategory;
use crate::odds::{validate_probability, validate_rate};
use crate::{EvidenciaError, Result};

/// Sensitivity and specificity of the imaging modality against ground truth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagingCharacteristics {
    /// Sensitivity vs the ground-truth standard.
    pub se: f64,
    /// Specificity vs the ground-truth standard.
    pub sp: f64,
}

impl Default for ImagingCharacteristics {
    /// Visual-read amyloid PET vs autopsy: Se 0.92, Sp 0.90.
    fn default() -> Self {
        Self { se: 0.92, sp: 0.90 }
    }
}

/// Feasible range for a ground-truth posterior derived through the imaging
/// bridge: `[1 - NPV, PPV]`.
///
/// Construction enforces `0 <= lower <= upper <= 1`; an inverted envelope is a
/// [`EvidenciaError::DegenerateReference`] at the call site that derived it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Lower bound, `1 - NPV`.
    pub lower: f64,
    /// Upper bound, `PPV`.
    pub upper: f64,
}

impl Envelope {
    /// Builds an envelope from predictive values, rejecting inversion.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenciaError::DegenerateReference`] when `1 - npv > ppv`,
    /// which happens when the imaging test is perverse (Se + Sp < 1) at the
    /// stated prevalence.
    pub fn from_predictive_values(ppv: f64, npv: f64) -> Result<Self> {
        let lower = 1.0 - npv;
        let upper = ppv;
        if lower > upper {
            return Err(EvidenciaError::DegenerateReference {
                context: "envelope inverted: 1 - NPV exceeds PPV (Se + Sp <= 1)".to_string(),
                value: upper - lower,
            });
        }
        Ok(Self { lower, upper })
    }

    /// Positive predictive value (the upper bound).
    #[must_use]
    pub fn ppv(&self) -> f64 {
        self.upper
    }

    /// Negative predictive value (one minus the lower bound).
    #[must_use]
    pub fn npv(&self) -> f64 {
        1.0 - self.lower
    }

    /// Whether `p` lies inside the envelope (inclusive).
    #[must_use]
    pub fn contains(&self, p: f64) -> bool {
        (self.lower..=self.upper).contains(&p)
    }
}

/// Positive predictive value of the imaging test at a ground-truth prevalence.
///
/// `PPV = Se*prior / (Se*prior + (1-Sp)*(1-prior))`
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidRate`] / [`EvidenciaError::InvalidProbability`]
/// on out-of-range inputs, and [`EvidenciaError::DegenerateReference`] when the
/// denominator is not strictly positive — never a silent NaN.
///
/// # Examples
///
/// ```
/// use evidencia::bridge::positive_predictive_value;
///
/// let ppv = positive_predictive_value(0.92, 0.90, 0.5).unwrap();
/// assert!((ppv - 0.92 * 0.5 / 0.51).abs() < 1e-12);
/// ```
pub fn positive_predictive_value(se: f64, sp: f64, ground_truth_prior: f64) -> Result<f64> {
    let se = validate_rate(se, "se")?;
    let sp = validate_rate(sp, "sp")?;
    let prior = validate_probability(ground_truth_prior, "ground_truth_prior")?;
    let denom = se * prior + (1.0 - sp) * (1.0 - prior);
    if denom <= 0.0 {
        return Err(EvidenciaError::DegenerateReference {
            context: "PPV denominator".to_string(),
            value: denom,
        });
    }
    Ok(se * prior / denom)
}

/// Negative predictive value of the imaging test at a ground-truth prevalence.
///
/// `NPV = Sp*(1-prior) / ((1-Se)*prior + Sp*(1-prior))`
///
/// # Errors
///
/// Same taxonomy as [`positive_predictive_value`].
///
/// # Examples
///
/// ```
/// use evidencia::bridge::negative_predictive_value;
///
/// // Se 0.92, Sp 0.90 at 50% prevalence: 0.45 / 0.49
/// let npv = negative_predictive_value(0.92, 0.90, 0.5).unwrap();
/// assert!((npv - 0.45 / 0.49).abs() < 1e-12);
/// ```
pub fn negative_predictive_value(se: f64, sp: f64, ground_truth_prior: f64) -> Result<f64> {
    let se = validate_rate(se, "se")?;
    let sp = validate_rate(sp, "sp")?;
    let prior = validate_probability(ground_truth_prior, "ground_truth_prior")?;
    let denom = (1.0 - se) * prior + sp * (1.0 - prior);
    if denom <= 0.0 {
        return Err(EvidenciaError::DegenerateReference {
            context: "NPV denominator".to_string(),
            value: denom,
        });
    }
    Ok(sp * (1.0 - prior) / denom)
}

/// Computes the feasible envelope `[1 - NPV, PPV]` at a ground-truth prevalence.
///
/// # Errors
///
/// Propagates the PPV/NPV errors and rejects inverted envelopes.
///
/// # Examples
///
/// ```
/// use evidencia::bridge::{envelope, ImagingCharacteristics};
///
/// let env = envelope(ImagingCharacteristics::default(), 0.5).unwrap();
/// assert!(env.lower < env.upper);
///
/// // A perverse imaging test (Se + Sp < 1) has no coherent envelope.
/// let bad = ImagingCharacteristics { se: 0.40, sp: 0.40 };
/// assert!(envelope(bad, 0.999999).is_err());
/// ```
pub fn envelope(imaging: ImagingCharacteristics, ground_truth_prior: f64) -> Result<Envelope> {
    let ppv = positive_predictive_value(imaging.se, imaging.sp, ground_truth_prior)?;
    let npv = negative_predictive_value(imaging.se, imaging.sp, ground_truth_prior)?;
    Envelope::from_predictive_values(ppv, npv)
}

/// Mixes an imaging-layer probability into the ground-truth envelope.
///
/// `p = q * upper + (1 - q) * lower`, clamped into `[lower, upper]`. The
/// formula is a convex combination, so for `q` in [0, 1] the clamp only ever
/// absorbs floating-point overshoot.
///
/// # Examples
///
/// ```
/// use evidencia::bridge::{bridge_to_ground_truth, Envelope};
///
/// let env = Envelope::from_predictive_values(0.9, 0.92).unwrap();
/// let p = bridge_to_ground_truth(0.5, &env);
/// assert!(env.contains(p));
/// ```
#[must_use]
pub fn bridge_to_ground_truth(imaging_layer_probability: f64, env: &Envelope) -> f64 {
    let q = imaging_layer_probability.clamp(0.0, 1.0);
    let raw = q * env.upper + (1.0 - q) * env.lower;
    raw.clamp(env.lower, env.upper)
}

/// Ground-truth posterior when the imaging test itself was observed.
///
/// Bypasses the mixture entirely: a positive imaging read collapses the
/// posterior to PPV, a negative one to `1 - NPV`, and an indeterminate read
/// leaves the ground-truth prior untouched.
///
/// # Examples
///
/// ```
/// use evidencia::bridge::{collapse_to_reference, Envelope};
/// use evidencia::imaging::TestResultCategory;
///
/// let env = Envelope::from_predictive_values(0.9, 0.92).unwrap();
/// assert_eq!(collapse_to_reference(TestResultCategory::Positive, &env, 0.5), 0.9);
/// assert_eq!(collapse_to_reference(TestResultCategory::Indeterminate, &env, 0.5), 0.5);
/// ```
#[must_use]
pub fn collapse_to_reference(
    category: TestResultCategory,
    env: &Envelope,
    ground_truth_prior: f64,
) -> f64 {
    match category {
        TestResultCategory::Positive => env.upper,
        TestResultCategory::Negative => env.lower,
        TestResultCategory::Indeterminate => ground_truth_prior,
    }
}

/// A peripheral test's characteristics re-expressed against ground truth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReanchoredTest {
    /// Ground-truth-anchored sensitivity.
    pub se: f64,
    /// Ground-truth-anchored specificity.
    pub sp: f64,
    /// Ground-truth-anchored LR+.
    pub lr_pos: f64,
    /// Ground-truth-anchored LR-.
    pub lr_neg: f64,
    /// True when the inversion left [0, 1] and the rates had to be clamped.
    pub clamped: bool,
}

/// Recovers sensitivity and specificity from an LR+/LR- pair.
///
/// Inverts `LR+ = Se/(1-Sp)` and `LR- = (1-Se)/Sp`. The returned values are
/// the raw algebraic solution and may fall outside [0, 1] for inconsistent
/// ratio pairs; callers decide whether to clamp or reject.
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidLikelihoodRatio`] for non-positive or
/// non-finite inputs, and [`EvidenciaError::DegenerateReference`] when
/// `LR- - LR+` is too close to zero to invert.
pub fn se_sp_from_lr(lr_pos: f64, lr_neg: f64) -> Result<(f64, f64)> {
    for lr in [lr_pos, lr_neg] {
        if !lr.is_finite() || lr <= 0.0 {
            return Err(EvidenciaError::InvalidLikelihoodRatio { value: lr });
        }
    }
    let denom = lr_neg - lr_pos;
    if denom.abs() < 1e-9 {
        return Err(EvidenciaError::DegenerateReference {
            context: "LR inversion denominator (LR- - LR+)".to_string(),
            value: denom,
        });
    }
    let sp = (1.0 - lr_pos) / denom;
    let se = 1.0 - lr_neg * sp;
    Ok((se, sp))
}

/// Re-anchors a peripheral test's imaging-referenced likelihood ratios to the
/// ground-truth standard at a stated prevalence.
///
/// Solves the linear system relating imaging-referenced rates to ground-truth
/// rates through the imaging test's PPV/NPV at that prevalence. Out-of-range
/// solutions are clamped into `[0.001, 0.999]` and flagged via
/// [`ReanchoredTest::clamped`].
///
/// # Errors
///
/// Propagates [`se_sp_from_lr`] and PPV/NPV errors, and returns
/// [`EvidenciaError::DegenerateReference`] when `PPV + NPV - 1 <= 0` (the
/// system is singular there).
pub fn reanchor_lr_to_ground_truth(
    lr_pos: f64,
    lr_neg: f64,
    imaging: ImagingCharacteristics,
    prevalence: f64,
) -> Result<ReanchoredTest> {
    let (se_raw, sp_raw) = se_sp_from_lr(lr_pos, lr_neg)?;
    let a = se_raw.clamp(0.0, 1.0);
    let b = sp_raw.clamp(0.0, 1.0);

    let u = positive_predictive_value(imaging.se, imaging.sp, prevalence)?;
    let v = negative_predictive_value(imaging.se, imaging.sp, prevalence)?;
    let det = u + v - 1.0;
    if det <= 0.0 {
        return Err(EvidenciaError::DegenerateReference {
            context: "re-anchoring determinant (PPV + NPV - 1)".to_string(),
            value: det,
        });
    }

    let top = a - 1.0 + u;
    let bot = b - 1.0 + v;
    let mut se = (top * v + (1.0 - u) * bot) / det;
    let mut sp = (u * bot + (1.0 - v) * top) / det;

    let clamped = !(0.0..=1.0).contains(&se) || !(0.0..=1.0).contains(&sp);
    se = se.clamp(1e-3, 0.999);
    sp = sp.clamp(1e-3, 0.999);

    Ok(ReanchoredTest {
        se,
        sp,
        lr_pos: se / (1.0 - sp),
        lr_neg: (1.0 - se) / sp,
        clamped,
    })
}
