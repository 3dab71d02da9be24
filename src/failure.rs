//! Comparison of the stress and deflection maxima against the allowables.

use std::fmt;

use serde::Serialize;

use crate::buckling::BucklingModel;
use crate::material::Material;

/// Maxima of one evaluated design, stresses in Pa and deflection in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DesignResponse {
    /// Largest combined tensile stress.
    pub max_tensile: f64,
    /// Magnitude of the most compressive combined stress.
    pub max_compressive: f64,
    /// Largest shear stress magnitude.
    pub max_shear: f64,
    /// Largest deflection magnitude in either plane.
    pub max_deflection: f64,
}

/// Failure modes checked for every design.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FailureModes {
    /// Tensile stress above the yield strength.
    pub tensile_yield: bool,
    /// Compressive stress above the panel buckling stress.
    pub compressive_buckle: bool,
    /// Shear stress above the shear strength.
    pub shear_yield: bool,
    /// Shear stress above the panel shear buckling stress.
    pub shear_buckle: bool,
    /// Deflection above the allowed fraction of the span.
    pub excess_deflection: bool,
    /// Compressive stress above the column buckling stress.
    pub column_buckle: bool,
}

impl FailureModes {
    /// Names of the active modes.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.tensile_yield, "tensile yield"),
            (self.compressive_buckle, "compressive buckling"),
            (self.shear_yield, "shear yield"),
            (self.shear_buckle, "shear buckling"),
            (self.excess_deflection, "excess deflection"),
            (self.column_buckle, "column buckling"),
        ]
        .into_iter()
        .filter_map(|(active, name)| active.then_some(name))
        .collect()
    }
}

impl fmt::Display for FailureModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active();
        if active.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", active.join(", "))
        }
    }
}

/// Outcome of the failure check for one design.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Whether any mode other than column buckling is active.
    pub failed: bool,
    /// Whether column buckling is the only active mode, so more ribs fix the design.
    pub failed_due_to_ribs_only: bool,
    /// Individual mode flags.
    pub modes: FailureModes,
}

/// Classifies the maxima of a design into failure modes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FailureClassifier {
    /// Tensile yield strength in Pa.
    pub yield_strength: f64,
    /// Shear strength in Pa.
    pub shear_strength: f64,
    /// Allowed deflection in metres.
    pub deflection_limit: f64,
}

impl FailureClassifier {
    /// Classifier for `material` with deflection limited to `deflection_limit_ratio * span`.
    #[must_use]
    pub fn new(material: &Material, span: f64, deflection_limit_ratio: f64) -> Self {
        Self {
            yield_strength: material.yield_strength,
            shear_strength: material.shear_strength,
            deflection_limit: deflection_limit_ratio * span,
        }
    }

    /// Compare `response` against the allowables and the critical stresses of `buckling`.
    ///
    /// # Examples
    /// ```
    /// use spoilerx::{BucklingModel, DesignResponse, FailureClassifier};
    ///
    /// let classifier = FailureClassifier {
    ///     yield_strength: 225.0e6,
    ///     shear_strength: 225.0e6,
    ///     deflection_limit: 0.04,
    /// };
    /// let buckling = BucklingModel {
    ///     panel_length: 0.5,
    ///     panel_width: 0.3,
    ///     compressive: 20.0e6,
    ///     shear: 25.0e6,
    ///     column: 5.0e6,
    /// };
    /// let response = DesignResponse {
    ///     max_tensile: 10.0e6,
    ///     max_compressive: 10.0e6,
    ///     max_shear: 4.0e6,
    ///     max_deflection: 0.001,
    /// };
    /// let report = classifier.classify(&response, &buckling);
    /// assert!(!report.failed);
    /// assert!(report.failed_due_to_ribs_only);
    /// ```
    #[must_use]
    pub fn classify(&self, response: &DesignResponse, buckling: &BucklingModel) -> FailureReport {
        let modes = FailureModes {
            tensile_yield: response.max_tensile > self.yield_strength,
            compressive_buckle: response.max_compressive > buckling.compressive,
            shear_yield: response.max_shear > self.shear_strength,
            shear_buckle: response.max_shear > buckling.shear,
            excess_deflection: response.max_deflection > self.deflection_limit,
            column_buckle: response.max_compressive > buckling.column,
        };
        let failed = modes.tensile_yield
            || modes.compressive_buckle
            || modes.shear_yield
            || modes.shear_buckle
            || modes.excess_deflection;
        FailureReport {
            failed,
            failed_due_to_ribs_only: modes.column_buckle && !failed,
            modes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> FailureClassifier {
        FailureClassifier::new(&Material::aluminium(), 1.6, 0.025)
    }

    fn buckling() -> BucklingModel {
        BucklingModel {
            panel_length: 0.5,
            panel_width: 0.3,
            compressive: 20.0e6,
            shear: 25.0e6,
            column: 50.0e6,
        }
    }

    fn response() -> DesignResponse {
        DesignResponse {
            max_tensile: 10.0e6,
            max_compressive: 10.0e6,
            max_shear: 5.0e6,
            max_deflection: 0.01,
        }
    }

    #[test]
    fn sound_design_passes() {
        let report = classifier().classify(&response(), &buckling());
        assert_eq!(report, FailureReport::default());
        assert_eq!(report.modes.to_string(), "none");
    }

    #[test]
    fn each_mode_triggers_on_its_own_limit() {
        let classifier = classifier();
        let cases = [
            (
                DesignResponse {
                    max_tensile: 230.0e6,
                    ..response()
                },
                "tensile yield",
            ),
            (
                DesignResponse {
                    max_compressive: 21.0e6,
                    ..response()
                },
                "compressive buckling",
            ),
            (
                DesignResponse {
                    max_shear: 26.0e6,
                    ..response()
                },
                "shear buckling",
            ),
            (
                DesignResponse {
                    max_deflection: 0.041,
                    ..response()
                },
                "excess deflection",
            ),
        ];
        for (response, mode) in cases {
            let report = classifier.classify(&response, &buckling());
            assert!(report.failed, "{mode} should fail");
            assert!(!report.failed_due_to_ribs_only);
            assert_eq!(report.modes.active(), vec![mode]);
        }
    }

    #[test]
    fn column_buckling_alone_asks_for_ribs() {
        let slender = BucklingModel {
            column: 8.0e6,
            ..buckling()
        };
        let report = classifier().classify(&response(), &slender);
        assert!(!report.failed);
        assert!(report.failed_due_to_ribs_only);

        let overloaded = DesignResponse {
            max_compressive: 21.0e6,
            ..response()
        };
        let report = classifier().classify(&overloaded, &slender);
        assert!(report.failed);
        assert!(!report.failed_due_to_ribs_only);
        assert_eq!(report.modes.to_string(), "compressive buckling, column buckling");
    }

    #[test]
    fn classification_is_repeatable() {
        let classifier = classifier();
        let response = DesignResponse {
            max_shear: 300.0e6,
            ..response()
        };
        let first = classifier.classify(&response, &buckling());
        for _ in 0..5 {
            assert_eq!(classifier.classify(&response, &buckling()), first);
        }
        assert!(first.modes.shear_yield && first.modes.shear_buckle);
    }
}
