//! Evidencia: two-layer Bayesian probability engine for diagnostic tests.
//!
//! Peripheral biomarker tests are calibrated against an intermediate imaging
//! modality (e.g. amyloid PET), and the imaging modality is calibrated against
//! a ground-truth standard (e.g. autopsy). Evidencia turns a clinical prior
//! and one or two test results into two calibrated posteriors: the
//! imaging-layer probability of a positive imaging read, and a
//! ground-truth-anchored posterior bounded by the imaging test's predictive
//! values.
//!
//! Everything is a synchronous, deterministic, side-effect-free computation
//! over immutable inputs. There is no global state: the test catalog is a
//! value passed in by the caller.
//!
//! # Quick Start
//!
//! ```
//! use evidencia::prelude::*;
//!
//! let library = TestLibrary::builtin();
//! let imaging = ImagingCharacteristics::default();
//!
//! // A positive plasma p-tau217 result at a 50% clinical prior.
//! let test = library.get("plasma_ptau217_generic").unwrap();
//! let result = compute_single_test(0.5, imaging, test, TestResultCategory::Positive).unwrap();
//!
//! // Imaging-layer probability of PET positivity.
//! assert!(result.imaging_layer > 0.9);
//! // Ground-truth posterior is confined to [1 - NPV, PPV].
//! assert!(result.envelope.contains(result.ground_truth));
//! ```
//!
//! # Modules
//!
//! - [`odds`]: probability/odds transform pair and epsilon clamping
//! - [`imaging`]: likelihood-ratio updates at the imaging layer
//! - [`bridge`]: PPV/NPV envelope, ground-truth mixture, LR re-anchoring
//! - [`chain`]: single-test and ordered two-test composition
//! - [`library`]: immutable test catalog (configuration data)
//! - [`priors`]: prior elicitation from age, stage and APOE genotype
//! - [`interpret`]: probability bands, triage cutoff, conversion risk

pub mod bridge;
pub mod chain;
pub mod error;
pub mod imaging;
pub mod interpret;
pub mod library;
pub mod odds;
pub mod prelude;
pub mod priors;

pub use chain::{compute_single_test, compute_two_test_chain, ChainResult, PosteriorResult};
pub use error::{EvidenciaError, Result};
