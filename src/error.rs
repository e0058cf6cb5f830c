//! Error types for Evidencia operations.
//!
//! Provides structured error context for library consumers.

use std::fmt;

/// Main error type for Evidencia operations.
///
/// Every failure carries the offending value so callers can report exactly
/// what was rejected instead of a bare "invalid input".
///
/// # Examples
///
/// ```
/// use evidencia::error::EvidenciaError;
///
/// let err = EvidenciaError::InvalidProbability {
///     param: "prior".to_string(),
///     value: 1.5,
/// };
/// assert!(err.to_string().contains("prior"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EvidenciaError {
    /// Probability input outside the open interval (0, 1), or non-finite.
    InvalidProbability {
        /// Parameter name
        param: String,
        /// Rejected value
        value: f64,
    },

    /// Sensitivity or specificity outside [0, 1], or non-finite.
    InvalidRate {
        /// Parameter name ("se" or "sp")
        param: String,
        /// Rejected value
        value: f64,
    },

    /// Likelihood ratio that is non-positive or non-finite.
    InvalidLikelihoodRatio {
        /// Rejected value
        value: f64,
    },

    /// PPV/NPV computation is undefined at the given inputs: a denominator
    /// collapsed to zero or the feasible envelope inverted (lower > upper).
    DegenerateReference {
        /// Which quantity degenerated
        context: String,
        /// The offending denominator or envelope width
        value: f64,
    },

    /// Test identifier not present in the supplied catalog.
    UnknownTest {
        /// The identifier that missed
        id: String,
    },
}

impl fmt::Display for EvidenciaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenciaError::InvalidProbability { param, value } => {
                write!(
                    f,
                    "Invalid probability: {param} = {value}, expected finite value in (0, 1)"
                )
            }
            EvidenciaError::InvalidRate { param, value } => {
                write!(
                    f,
                    "Invalid rate: {param} = {value}, expected finite value in [0, 1]"
                )
            }
            EvidenciaError::InvalidLikelihoodRatio { value } => {
                write!(
                    f,
                    "Invalid likelihood ratio: {value}, expected finite value > 0"
                )
            }
            EvidenciaError::DegenerateReference { context, value } => {
                write!(f, "Degenerate reference bridge: {context} ({value})")
            }
            EvidenciaError::UnknownTest { id } => {
                write!(f, "Unknown test identifier: {id:?}")
            }
        }
    }
}

impl std::error::Error for EvidenciaError {}

/// Result type alias for Evidencia operations.
pub type Result<T> = std::result::Result<T, EvidenciaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_probability() {
        let err = EvidenciaError::InvalidProbability {
            param: "prior".to_string(),
            value: -0.2,
        };
        let msg = err.to_string();
        assert!(msg.contains("prior"));
        assert!(msg.contains("-0.2"));
    }

    #[test]
    fn test_display_invalid_rate() {
        let err = EvidenciaError::InvalidRate {
            param: "se".to_string(),
            value: 1.3,
        };
        assert!(err.to_string().contains("se = 1.3"));
    }

    #[test]
    fn test_display_invalid_lr() {
        let err = EvidenciaError::InvalidLikelihoodRatio { value: 0.0 };
        assert!(err.to_string().contains("likelihood ratio"));
    }

    #[test]
    fn test_display_degenerate_reference() {
        let err = EvidenciaError::DegenerateReference {
            context: "envelope inverted".to_string(),
            value: -0.01,
        };
        assert!(err.to_string().contains("envelope inverted"));
    }

    #[test]
    fn test_display_unknown_test() {
        let err = EvidenciaError::UnknownTest {
            id: "plasma_xyz".to_string(),
        };
        assert!(err.to_string().contains("plasma_xyz"));
    }

    #[test]
    fn test_error_source_is_none() {
        use std::error::Error;
        let err = EvidenciaError::InvalidLikelihoodRatio { value: -1.0 };
        assert!(err.source().is_none());
    }
}
