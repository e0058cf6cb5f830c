//! Test catalog: static definitions of diagnostic tests.
//!
//! A [`TestLibrary`] is configuration data, not behavior: an immutable mapping
//! from test identifier to [`TestDefinition`], passed explicitly into the
//! computation functions. There is no ambient global table; callers either use
//! [`TestLibrary::builtin`] or deserialize their own catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::imaging::LrTriplet;
use crate::{EvidenciaError, Result};

/// Which reference standard a test's performance figures are reported against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceFrame {
    /// The test is the imaging modality itself, calibrated against the
    /// ground-truth standard. Observing it collapses the imaging layer.
    GroundTruth,
    /// Peripheral test calibrated against the imaging modality.
    Imaging,
    /// Calibrated against a mix of references; computed as imaging-referenced,
    /// kept distinct so callers can surface the caveat.
    Mixed,
}

/// Static record describing one diagnostic test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    /// Human-readable label.
    pub label: String,
    /// Reference standard the Se/Sp and LRs are reported against.
    pub reference: ReferenceFrame,
    /// Sensitivity vs its reference.
    pub se: f64,
    /// Specificity vs its reference.
    pub sp: f64,
    /// Default likelihood-ratio triplet.
    pub default_lrs: LrTriplet,
}

impl TestDefinition {
    /// Whether this test is the imaging modality itself, triggering the
    /// definitional-certainty short-circuits.
    #[must_use]
    pub fn is_imaging_modality(&self) -> bool {
        self.reference == ReferenceFrame::GroundTruth
    }
}

/// Immutable catalog mapping test identifiers to definitions.
///
/// # Examples
///
/// ```
/// use evidencia::library::TestLibrary;
///
/// let library = TestLibrary::builtin();
/// let pet = library.get("amyloid_pet").unwrap();
/// assert!(pet.is_imaging_modality());
/// assert!(library.get("no_such_test").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestLibrary {
    tests: BTreeMap<String, TestDefinition>,
}

impl TestLibrary {
    /// Builds a catalog from caller-supplied entries.
    #[must_use]
    pub fn new(tests: BTreeMap<String, TestDefinition>) -> Self {
        Self { tests }
    }

    /// The built-in catalog of amyloid biomarker tests with illustrative
    /// performance figures.
    ///
    /// One imaging entry (visual-read amyloid PET vs autopsy), two CSF and
    /// three plasma assays referenced against PET.
    #[must_use]
    pub fn builtin() -> Self {
        let mut tests = BTreeMap::new();

        tests.insert(
            "amyloid_pet".to_string(),
            TestDefinition {
                label: "Amyloid PET (visual; ref autopsy)".to_string(),
                reference: ReferenceFrame::GroundTruth,
                se: 0.92,
                sp: 0.90,
                // LR+ = Se/(1-Sp) = 9.20; LR- = (1-Se)/Sp = 0.089
                default_lrs: LrTriplet::new(9.20, 0.089),
            },
        );
        tests.insert(
            "csf_abeta42_40_lumipulse".to_string(),
            TestDefinition {
                label: "CSF A\u{3b2}42/40 (Lumipulse; ref PET)".to_string(),
                reference: ReferenceFrame::Imaging,
                se: 0.92,
                sp: 0.93,
                default_lrs: LrTriplet::new(13.14, 0.086),
            },
        );
        tests.insert(
            "csf_ptau181_abeta42_elecsys".to_string(),
            TestDefinition {
                label: "CSF p-tau181/A\u{3b2}42 (Elecsys; ref PET)".to_string(),
                reference: ReferenceFrame::Imaging,
                se: 0.91,
                sp: 0.89,
                default_lrs: LrTriplet::new(8.27, 0.101),
            },
        );
        tests.insert(
            "plasma_abeta42_40_generic".to_string(),
            TestDefinition {
                label: "Plasma A\u{3b2}42/40 (generic; ref PET)".to_string(),
                reference: ReferenceFrame::Imaging,
                se: 0.85,
                sp: 0.85,
                default_lrs: LrTriplet::new(5.67, 0.176),
            },
        );
        tests.insert(
            "plasma_ptau217_generic".to_string(),
            TestDefinition {
                label: "Plasma p-tau217 (generic; ref PET)".to_string(),
                reference: ReferenceFrame::Imaging,
                se: 0.92,
                sp: 0.94,
                default_lrs: LrTriplet::new(15.33, 0.085),
            },
        );
        tests.insert(
            "plasma_ptau217_abeta42_lumipulse".to_string(),
            TestDefinition {
                label: "Plasma p-tau217/A\u{3b2}42 (Lumipulse; mixed PET/CSF ref)".to_string(),
                reference: ReferenceFrame::Mixed,
                se: 0.96,
                sp: 0.92,
                default_lrs: LrTriplet::new(12.00, 0.043),
            },
        );

        Self { tests }
    }

    /// Looks up a test definition by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenciaError::UnknownTest`] on a miss — no silent default.
    pub fn get(&self, id: &str) -> Result<&TestDefinition> {
        self.tests.get(id).ok_or_else(|| EvidenciaError::UnknownTest {
            id: id.to_string(),
        })
    }

    /// Iterates over `(identifier, definition)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestDefinition)> {
        self.tests.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_contents() {
        let library = TestLibrary::builtin();
        assert_eq!(library.len(), 6);

        let pet = library.get("amyloid_pet").unwrap();
        assert!(pet.is_imaging_modality());
        assert_eq!(pet.se, 0.92);
        assert_eq!(pet.sp, 0.90);
        assert_eq!(pet.default_lrs.pos, 9.20);
        assert_eq!(pet.default_lrs.indeterminate, 1.0);
        assert_eq!(pet.default_lrs.neg, 0.089);

        let ptau = library.get("plasma_ptau217_generic").unwrap();
        assert!(!ptau.is_imaging_modality());
        assert_eq!(ptau.reference, ReferenceFrame::Imaging);
        assert_eq!(ptau.default_lrs.pos, 15.33);
    }

    #[test]
    fn test_exactly_one_imaging_entry() {
        let library = TestLibrary::builtin();
        let imaging = library
            .iter()
            .filter(|(_, def)| def.is_imaging_modality())
            .count();
        assert_eq!(imaging, 1);
    }

    #[test]
    fn test_unknown_identifier_is_explicit_error() {
        let library = TestLibrary::builtin();
        let err = library.get("tau_pet").unwrap_err();
        assert!(matches!(err, EvidenciaError::UnknownTest { id } if id == "tau_pet"));
    }

    #[test]
    fn test_mixed_reference_is_not_imaging() {
        let library = TestLibrary::builtin();
        let mixed = library.get("plasma_ptau217_abeta42_lumipulse").unwrap();
        assert_eq!(mixed.reference, ReferenceFrame::Mixed);
        assert!(!mixed.is_imaging_modality());
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let library = TestLibrary::builtin();
        let json = serde_json::to_string(&library).unwrap();
        let back: TestLibrary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, library);
    }

    #[test]
    fn test_caller_supplied_catalog() {
        let json = r#"{
            "tau_pet": {
                "label": "Tau PET",
                "reference": "ground_truth",
                "se": 0.89,
                "sp": 0.91,
                "default_lrs": { "pos": 9.89, "neg": 0.121 }
            }
        }"#;
        let library: TestLibrary = serde_json::from_str(json).unwrap();
        let def = library.get("tau_pet").unwrap();
        assert!(def.is_imaging_modality());
        assert_eq!(def.default_lrs.indeterminate, 1.0);
    }
}
