//! Qualitative interpretation of posterior probabilities.
//!
//! Band classification, a therapy-triage cutoff, and a simple multi-year
//! conversion-risk projection. All thresholds are caller-configurable data.

use serde::{Deserialize, Serialize};

use crate::{EvidenciaError, Result};

/// Qualitative band for a posterior probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityBand {
    /// At or above the high threshold.
    High,
    /// At or above the likely threshold.
    Likely,
    /// Between the likely-negative and likely thresholds.
    Indeterminate,
    /// At or below the likely-negative threshold.
    LikelyNegative,
    /// At or below the low threshold.
    Low,
}

/// Band cut points. Defaults match the conventional 0.90/0.70/0.30/0.10 read.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub high: f64,
    pub likely: f64,
    pub likely_negative: f64,
    pub low: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            high: 0.90,
            likely: 0.70,
            likely_negative: 0.30,
            low: 0.10,
        }
    }
}

impl BandThresholds {
    /// Classifies a probability into a band.
    ///
    /// # Examples
    ///
    /// ```
    /// use evidencia::interpret::{BandThresholds, ProbabilityBand};
    ///
    /// let bands = BandThresholds::default();
    /// assert_eq!(bands.classify(0.95), ProbabilityBand::High);
    /// assert_eq!(bands.classify(0.05), ProbabilityBand::Low);
    /// assert_eq!(bands.classify(0.5), ProbabilityBand::Indeterminate);
    /// ```
    #[must_use]
    pub fn classify(&self, p: f64) -> ProbabilityBand {
        if p >= self.high {
            ProbabilityBand::High
        } else if p >= self.likely {
            ProbabilityBand::Likely
        } else if p <= self.low {
            ProbabilityBand::Low
        } else if p <= self.likely_negative {
            ProbabilityBand::LikelyNegative
        } else {
            ProbabilityBand::Indeterminate
        }
    }
}

/// Whether a posterior clears a therapy-triage cutoff (conventionally 0.80).
#[must_use]
pub fn meets_triage_threshold(p: f64, threshold: f64) -> bool {
    p >= threshold
}

/// Projects a multi-year conversion risk as a mixture over positivity status.
///
/// `risk = p * (1 - (1 - h_pos)^t) + (1 - p) * (1 - (1 - h_neg)^t)`, capped
/// at 0.999. `h_pos`/`h_neg` are annual conversion hazards conditional on
/// positive/negative status.
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidProbability`] if `p_positive` is outside
/// [0, 1] or `years` is negative/non-finite, and [`EvidenciaError::InvalidRate`]
/// if either hazard is outside [0, 1].
///
/// # Examples
///
/// ```
/// use evidencia::interpret::conversion_risk;
///
/// let risk = conversion_risk(0.8, 0.15, 0.03, 3.0).unwrap();
/// assert!(risk > 0.0 && risk < 1.0);
/// ```
pub fn conversion_risk(p_positive: f64, h_pos: f64, h_neg: f64, years: f64) -> Result<f64> {
    if !p_positive.is_finite() || !(0.0..=1.0).contains(&p_positive) {
        return Err(EvidenciaError::InvalidProbability {
            param: "p_positive".to_string(),
            value: p_positive,
        });
    }
    if !years.is_finite() || years < 0.0 {
        return Err(EvidenciaError::InvalidProbability {
            param: "years".to_string(),
            value: years,
        });
    }
    for (name, h) in [("h_pos", h_pos), ("h_neg", h_neg)] {
        if !h.is_finite() || !(0.0..=1.0).contains(&h) {
            return Err(EvidenciaError::InvalidRate {
                param: name.to_string(),
                value: h,
            });
        }
    }

    let risk_pos = 1.0 - (1.0 - h_pos).powf(years);
    let risk_neg = 1.0 - (1.0 - h_neg).powf(years);
    Ok((p_positive * risk_pos + (1.0 - p_positive) * risk_neg).clamp(0.0, 0.999))
}
