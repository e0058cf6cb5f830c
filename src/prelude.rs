//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use evidencia::prelude::*;
//! ```

pub use crate::bridge::{
    bridge_to_ground_truth, envelope, negative_predictive_value, positive_predictive_value,
    Envelope, ImagingCharacteristics,
};
pub use crate::chain::{compute_single_test, compute_two_test_chain, ChainResult, PosteriorResult};
pub use crate::error::{EvidenciaError, Result};
pub use crate::imaging::{prior_imaging_probability, LrTriplet, TestResultCategory};
pub use crate::interpret::{BandThresholds, ProbabilityBand};
pub use crate::library::{ReferenceFrame, TestDefinition, TestLibrary};
pub use crate::priors::{elicit_prior, ApoeGenotype, CognitiveStage};
