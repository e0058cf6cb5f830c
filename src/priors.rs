//! Prior elicitation from clinical context.
//!
//! Produces a ground-truth prior from age, cognitive stage and APOE genotype:
//! per-stage prevalence anchors at ages 50 and 90 are interpolated linearly,
//! then the genotype's odds ratio is applied in the odds domain.

use serde::{Deserialize, Serialize};

use crate::odds::{clamp_probability, PROB_EPSILON};

/// Cognitive stage at assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveStage {
    /// Cognitively normal.
    CognitivelyNormal,
    /// Subjective cognitive decline.
    SubjectiveDecline,
    /// Mild cognitive impairment.
    MildImpairment,
    /// Dementia.
    Dementia,
}

/// APOE genotype, carrying an amyloid-positivity odds ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApoeGenotype {
    /// Genotype not determined; neutral odds ratio.
    Unknown,
    E2E2,
    E2E3,
    E2E4,
    E3E3,
    E3E4,
    E4E4,
}

impl ApoeGenotype {
    /// Odds ratio for amyloid positivity relative to the e3/e3 baseline.
    #[must_use]
    pub fn odds_ratio(self) -> f64 {
        match self {
            ApoeGenotype::Unknown | ApoeGenotype::E3E3 => 1.0,
            ApoeGenotype::E2E2 | ApoeGenotype::E2E3 => 0.6,
            ApoeGenotype::E2E4 => 2.6,
            ApoeGenotype::E3E4 => 3.5,
            ApoeGenotype::E4E4 => 12.0,
        }
    }
}

/// Prevalence anchors for one cognitive stage: expected positivity at age 50
/// and age 90, interpolated linearly in between.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageAnchors {
    /// Prevalence at age 50.
    pub at_50: f64,
    /// Prevalence at age 90.
    pub at_90: f64,
}

impl StageAnchors {
    /// Illustrative anchors for a cognitive stage.
    #[must_use]
    pub fn for_stage(stage: CognitiveStage) -> Self {
        match stage {
            CognitiveStage::CognitivelyNormal => Self {
                at_50: 0.10,
                at_90: 0.44,
            },
            CognitiveStage::SubjectiveDecline => Self {
                at_50: 0.12,
                at_90: 0.43,
            },
            CognitiveStage::MildImpairment => Self {
                at_50: 0.27,
                at_90: 0.71,
            },
            CognitiveStage::Dementia => Self {
                at_50: 0.60,
                at_90: 0.85,
            },
        }
    }
}

fn lerp(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    if x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    let t = (x - x0) / (x1 - x0);
    y0 + t * (y1 - y0)
}

/// Age- and stage-based prior, clamped into [0.01, 0.99].
///
/// # Examples
///
/// ```
/// use evidencia::priors::{prior_from_age_stage, CognitiveStage};
///
/// // MCI anchors run 0.27 (age 50) to 0.71 (age 90); age 70 is the midpoint.
/// let p = prior_from_age_stage(70.0, CognitiveStage::MildImpairment);
/// assert!((p - 0.49).abs() < 1e-12);
/// ```
#[must_use]
pub fn prior_from_age_stage(age: f64, stage: CognitiveStage) -> f64 {
    let anchors = StageAnchors::for_stage(stage);
    lerp(age, 50.0, anchors.at_50, 90.0, anchors.at_90).clamp(0.01, 0.99)
}

/// Applies an odds ratio to a probability in the odds domain.
///
/// The input is clamped into the open interval first so the odds stay finite;
/// the output is clamped the same way.
#[must_use]
pub fn apply_odds_ratio(p: f64, odds_ratio: f64) -> f64 {
    let p = clamp_probability(p);
    let odds = p / (1.0 - p) * odds_ratio;
    (odds / (1.0 + odds)).clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
}

/// Composes the age/stage prior with the APOE genotype adjustment.
///
/// # Examples
///
/// ```
/// use evidencia::priors::{elicit_prior, ApoeGenotype, CognitiveStage};
///
/// let baseline = elicit_prior(73.0, CognitiveStage::MildImpairment, ApoeGenotype::Unknown);
/// let carrier = elicit_prior(73.0, CognitiveStage::MildImpairment, ApoeGenotype::E4E4);
/// assert!(carrier > baseline);
/// ```
#[must_use]
pub fn elicit_prior(age: f64, stage: CognitiveStage, genotype: ApoeGenotype) -> f64 {
    apply_odds_ratio(prior_from_age_stage(age, stage), genotype.odds_ratio())
}
