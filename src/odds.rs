//! Probability/odds conversion.
//!
//! The odds domain is where likelihood-ratio updates are multiplicative, so
//! every Bayesian update in this crate runs through this transform pair.

use crate::{EvidenciaError, Result};

/// Probabilities are clamped into `[PROB_EPSILON, 1 - PROB_EPSILON]` before
/// odds conversion so that odds stay finite.
pub const PROB_EPSILON: f64 = 1e-6;

/// Converts a probability to odds: `p / (1 - p)`.
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidProbability`] if `p` is non-finite or
/// outside the open interval (0, 1). Callers holding a probability that may
/// sit on a boundary should pass it through [`clamp_probability`] first.
///
/// # Examples
///
/// ```
/// use evidencia::odds::to_odds;
///
/// let o = to_odds(0.5).unwrap();
/// assert!((o - 1.0).abs() < 1e-12);
///
/// assert!(to_odds(1.0).is_err());
/// ```
pub fn to_odds(p: f64) -> Result<f64> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(EvidenciaError::InvalidProbability {
            param: "p".to_string(),
            value: p,
        });
    }
    Ok(p / (1.0 - p))
}

/// Converts odds back to a probability: `o / (1 + o)`, always in [0, 1).
///
/// # Errors
///
/// Returns [`EvidenciaError::InvalidProbability`] if `o` is negative or
/// non-finite.
///
/// # Examples
///
/// ```
/// use evidencia::odds::{from_odds, to_odds};
///
/// let p = 0.3;
/// let round_trip = from_odds(to_odds(p).unwrap()).unwrap();
/// assert!((round_trip - p).abs() < 1e-12);
/// ```
pub fn from_odds(o: f64) -> Result<f64> {
    if !o.is_finite() || o < 0.0 {
        return Err(EvidenciaError::InvalidProbability {
            param: "odds".to_string(),
            value: o,
        });
    }
    Ok(o / (1.0 + o))
}

/// Clamps a probability into the open interval `[1e-6, 1 - 1e-6]`.
///
/// # Examples
///
/// ```
/// use evidencia::odds::clamp_probability;
///
/// assert_eq!(clamp_probability(1.0), 1.0 - 1e-6);
/// assert_eq!(clamp_probability(0.0), 1e-6);
/// assert_eq!(clamp_probability(0.5), 0.5);
/// ```
#[must_use]
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
}

/// Validates that `value` is a finite probability strictly inside (0, 1).
pub(crate) fn validate_probability(value: f64, param: &str) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(EvidenciaError::InvalidProbability {
            param: param.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Validates that `value` is a finite rate in the closed interval [0, 1].
pub(crate) fn validate_rate(value: f64, param: &str) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EvidenciaError::InvalidRate {
            param: param.to_string(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_odds_even() {
        assert!((to_odds(0.5).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_odds_rejects_boundaries() {
        assert!(to_odds(0.0).is_err());
        assert!(to_odds(1.0).is_err());
        assert!(to_odds(-0.1).is_err());
        assert!(to_odds(f64::NAN).is_err());
        assert!(to_odds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_odds_range() {
        assert!((from_odds(0.0).unwrap()).abs() < 1e-12);
        assert!((from_odds(1.0).unwrap() - 0.5).abs() < 1e-12);
        let p = from_odds(1e9).unwrap();
        assert!(p < 1.0 && p > 0.999_999);
    }

    #[test]
    fn test_from_odds_rejects_invalid() {
        assert!(from_odds(-1.0).is_err());
        assert!(from_odds(f64::NAN).is_err());
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(2.0), 1.0 - PROB_EPSILON);
        assert_eq!(clamp_probability(-2.0), PROB_EPSILON);
        assert_eq!(clamp_probability(0.42), 0.42);
    }

    #[test]
    fn test_round_trip_precision() {
        for &p in &[1e-6, 1e-3, 0.1, 0.25, 0.5, 0.75, 0.9, 0.999, 1.0 - 1e-6] {
            let q = from_odds(to_odds(p).unwrap()).unwrap();
            assert!((q - p).abs() < 1e-9, "round trip failed at p = {p}: {q}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// fromOdds(toOdds(p)) == p to 1e-9 across the clamped interval.
            #[test]
            fn prop_odds_round_trip(p in 1e-6..=(1.0 - 1e-6)) {
                let q = from_odds(to_odds(p).unwrap()).unwrap();
                prop_assert!((q - p).abs() < 1e-9);
            }

            /// from_odds always lands in [0, 1).
            #[test]
            fn prop_from_odds_in_unit_interval(o in 0.0..1e12) {
                let p = from_odds(o).unwrap();
                prop_assert!((0.0..1.0).contains(&p));
            }

            /// to_odds is strictly increasing.
            #[test]
            fn prop_to_odds_monotone(a in 1e-6..0.5, delta in 1e-6..0.4) {
                let b = a + delta;
                prop_assert!(to_odds(b).unwrap() > to_odds(a).unwrap());
            }
        }
    }
}
