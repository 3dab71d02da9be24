//! Iterative sizing of skin thickness and rib count.
//!
//! Every iteration evaluates a complete design: sectional properties, beam
//! response, stresses, buckling and failure. Column buckling on its own adds a
//! rib; any other failure thickens the skin by one step.

use serde::{Deserialize, Serialize};

use crate::bending::{BeamBendingSolver, BeamState, SelfWeight};
use crate::buckling::BucklingModel;
use crate::config::SpoilerConfig;
use crate::errors::SizingError;
use crate::failure::{DesignResponse, FailureClassifier, FailureReport};
use crate::geometry::CrossSection;
use crate::loads::{AeroLoadSource, LoadDistribution, SupportConfiguration};
use crate::material::Material;
use crate::profile::CrossSectionSource;
use crate::sections::SectionalProperties;
use crate::span::SpanDiscretization;
use crate::stress::{StressEngine, StressField};
use crate::weight::{Attachments, MassBreakdown};

/// Controls of the sizing loop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingOptions {
    /// Skin thickness of the first design in metres.
    pub initial_thickness: f64,
    /// Rib count of the first design, end caps excluded.
    pub initial_rib_count: usize,
    /// Thickness added after a failed design in metres.
    pub thickness_step: f64,
    /// Largest number of designs evaluated before giving up.
    pub max_iterations: usize,
    /// Allowed deflection as a fraction of the span.
    pub deflection_limit_ratio: f64,
    /// Number of stations over the half span.
    pub n_cuts: usize,
    /// Number of boundary points per cross-section.
    pub n_discretise: usize,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            initial_thickness: 0.001,
            initial_rib_count: 1,
            thickness_step: 0.001,
            max_iterations: 500,
            deflection_limit_ratio: 0.025,
            n_cuts: 11,
            n_discretise: 120,
        }
    }
}

impl SizingOptions {
    /// Check that the options describe a loop that can make progress.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidOption`] naming the first unusable option.
    pub fn validate(&self) -> Result<(), SizingError> {
        for (name, value) in [
            ("initial_thickness", self.initial_thickness),
            ("thickness_step", self.thickness_step),
            ("deflection_limit_ratio", self.deflection_limit_ratio),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SizingError::InvalidOption { name, value });
            }
        }
        if self.max_iterations == 0 {
            return Err(SizingError::InvalidOption {
                name: "max_iterations",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Everything computed for one design.
#[derive(Clone, Debug)]
pub struct DesignEvaluation {
    /// Sectional properties along the span.
    pub properties: SectionalProperties,
    /// Mass estimate.
    pub masses: MassBreakdown,
    /// Beam response.
    pub beam: BeamState,
    /// Stress field.
    pub stress: StressField,
    /// Critical buckling stresses.
    pub buckling: BucklingModel,
    /// Maxima compared against the allowables.
    pub response: DesignResponse,
    /// Failure classification.
    pub report: FailureReport,
}

/// One step of the sizing history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SizingIteration {
    /// Iteration number, starting at one.
    pub iteration: usize,
    /// Skin thickness evaluated in metres.
    pub thickness: f64,
    /// Rib count evaluated.
    pub rib_count: usize,
    /// Failure classification of the design.
    pub report: FailureReport,
}

/// Stress state of the converged design, stresses in Pa.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StressSummary {
    /// Largest combined tensile stress.
    pub max_tensile: f64,
    /// Magnitude of the most compressive combined stress.
    pub max_compressive: f64,
    /// Largest shear stress magnitude.
    pub max_shear: f64,
    /// Largest deflection in metres.
    pub max_deflection: f64,
    /// Critical compressive buckling stress.
    pub critical_compressive: f64,
    /// Critical shear buckling stress.
    pub critical_shear: f64,
    /// Column buckling stress.
    pub critical_column: f64,
    /// Vertical reaction of each strut in N.
    pub strut_force_z: f64,
    /// Chordwise reaction of each strut in N.
    pub strut_force_x: f64,
}

/// Result of a converged sizing run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizingOutcome {
    /// Final skin thickness in metres.
    pub thickness: f64,
    /// Final rib count, end caps excluded.
    pub rib_count: usize,
    /// Number of designs evaluated.
    pub iterations: usize,
    /// Mass of every component in kg.
    pub masses: MassBreakdown,
    /// Mass of the whole spoiler in kg.
    pub total_mass: f64,
    /// Stress state of the final design.
    pub summary: StressSummary,
    /// Failure classification of the final design.
    pub report: FailureReport,
    /// Every design evaluated, in order.
    pub history: Vec<SizingIteration>,
}

/// Sizing driver for one plate, support layout and material.
pub struct SizingLoop<'a> {
    /// Plate geometry.
    plate: &'a dyn CrossSectionSource,
    /// Strut positions and cant.
    supports: SupportConfiguration,
    /// Unsized parts that add mass.
    attachments: Attachments,
    /// Skin material.
    material: Material,
    /// Loop controls.
    options: SizingOptions,
    /// Spanwise stations shared by every evaluation.
    stations: SpanDiscretization,
    /// Half-span boundaries sampled once, midspan first.
    half_sections: Vec<CrossSection>,
}

impl<'a> SizingLoop<'a> {
    /// Prepare the loop. The cross-section boundaries are sampled once here.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidOption`] for unusable options and wrapped
    /// geometry or material errors when the design space is invalid.
    pub fn new(
        plate: &'a dyn CrossSectionSource,
        supports: SupportConfiguration,
        attachments: Attachments,
        material: Material,
        options: SizingOptions,
    ) -> Result<Self, SizingError> {
        options.validate()?;
        material.validate()?;
        let stations = SpanDiscretization::new(plate.span(), options.n_cuts)?;
        let half_sections = SectionalProperties::sample(plate, &stations)?;
        Ok(Self {
            plate,
            supports,
            attachments,
            material,
            options,
            stations,
            half_sections,
        })
    }

    /// Spanwise discretisation used by every evaluation.
    #[must_use]
    pub fn stations(&self) -> &SpanDiscretization {
        &self.stations
    }

    /// Evaluate one design under `loads`.
    ///
    /// # Errors
    ///
    /// Returns a [`SizingError`] wrapping the failing analysis step.
    pub fn evaluate(
        &self,
        thickness: f64,
        rib_count: usize,
        loads: &LoadDistribution,
    ) -> Result<DesignEvaluation, SizingError> {
        let properties = SectionalProperties::compute(
            &self.half_sections,
            &self.stations,
            thickness,
            rib_count,
        )?;
        let masses =
            MassBreakdown::estimate(&properties, self.material.density, &self.attachments);
        let weight = SelfWeight {
            distributed: masses.structural(),
            endplate: self.attachments.endplate_mass.unwrap_or(0.0),
        };
        let beam = BeamBendingSolver::new(&properties, self.supports, self.material.youngs_modulus)
            .solve(loads, weight)?;
        let stress = StressEngine::new(&properties, self.supports).compute(&beam)?;
        let buckling = BucklingModel::evaluate(
            &properties,
            &self.material,
            self.plate.span(),
            self.plate.chord(),
            rib_count,
        );
        let response = DesignResponse {
            max_tensile: stress.max_tensile(),
            max_compressive: stress.max_compressive(),
            max_shear: stress.max_shear(),
            max_deflection: beam.max_deflection(),
        };
        let report = FailureClassifier::new(
            &self.material,
            self.plate.span(),
            self.options.deflection_limit_ratio,
        )
        .classify(&response, &buckling);
        Ok(DesignEvaluation {
            properties,
            masses,
            beam,
            stress,
            buckling,
            response,
            report,
        })
    }

    /// Size the plate under `loads`.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::NotConverged`] when every one of the allowed
    /// iterations fails, or the error of a failing evaluation.
    pub fn run(&self, loads: &LoadDistribution) -> Result<SizingOutcome, SizingError> {
        loads.check_against(&self.stations)?;
        let mut steps = 0_usize;
        let mut rib_count = self.options.initial_rib_count;
        let mut history = Vec::new();

        for iteration in 1..=self.options.max_iterations {
            let thickness =
                self.options.initial_thickness + steps as f64 * self.options.thickness_step;
            let design = self.evaluate(thickness, rib_count, loads)?;
            let report = design.report;
            log::info!(
                "iteration {iteration}: thickness {:.1} mm, {rib_count} ribs, failure modes: {}",
                thickness * 1.0e3,
                report.modes
            );
            history.push(SizingIteration {
                iteration,
                thickness,
                rib_count,
                report,
            });

            if report.failed_due_to_ribs_only {
                rib_count += 1;
            } else if report.failed {
                steps += 1;
            } else {
                return Ok(SizingOutcome {
                    thickness,
                    rib_count,
                    iterations: iteration,
                    masses: design.masses,
                    total_mass: design.masses.total(),
                    summary: StressSummary {
                        max_tensile: design.response.max_tensile,
                        max_compressive: design.response.max_compressive,
                        max_shear: design.response.max_shear,
                        max_deflection: design.response.max_deflection,
                        critical_compressive: design.buckling.compressive,
                        critical_shear: design.buckling.shear,
                        critical_column: design.buckling.column,
                        strut_force_z: design.beam.strut_force_z,
                        strut_force_x: design.beam.strut_force_x,
                    },
                    report,
                    history,
                });
            }
        }

        let (thickness, rib_count) = history
            .last()
            .map_or((self.options.initial_thickness, rib_count), |last| {
                (last.thickness, last.rib_count)
            });
        log::warn!(
            "sizing stopped after {} iterations at {:.1} mm with {rib_count} ribs",
            self.options.max_iterations,
            thickness * 1.0e3
        );
        Err(SizingError::NotConverged {
            iterations: self.options.max_iterations,
            thickness,
            rib_count,
        })
    }
}

/// Size the spoiler described by `config` under its strip-theory loads.
///
/// # Errors
///
/// Returns a [`SizingError`] for invalid configurations or when the loop
/// does not converge.
///
/// # Examples
/// ```
/// use spoilerx::{size_spoiler, SpoilerConfig};
///
/// let outcome = size_spoiler(&SpoilerConfig::default()).expect("default spoiler converges");
/// assert!(outcome.thickness >= 0.001);
/// assert!(!outcome.report.failed);
/// ```
pub fn size_spoiler(config: &SpoilerConfig) -> Result<SizingOutcome, SizingError> {
    size_spoiler_with(config, &config.aero)
}

/// Size the spoiler described by `config` under loads supplied by `aero`.
///
/// # Errors
///
/// Returns a [`SizingError`] for invalid configurations, unusable loads or
/// when the loop does not converge.
pub fn size_spoiler_with(
    config: &SpoilerConfig,
    aero: &dyn AeroLoadSource,
) -> Result<SizingOutcome, SizingError> {
    let plate = config.plate()?;
    let supports = config.supports()?;
    let sizing = SizingLoop::new(
        &plate,
        supports,
        config.attachments(),
        config.material,
        config.sizing,
    )?;
    let loads = aero.load_distribution(&config.flow, config.geometry.chord, sizing.stations())?;
    sizing.run(&loads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LoftedPlate, SectionProfile};

    fn plate() -> LoftedPlate {
        LoftedPlate::new(
            &[SectionProfile::naca4("0012"), SectionProfile::naca4("0012")],
            1.6,
            0.3,
            0.0,
            60,
        )
        .expect("valid plate")
    }

    fn sizing_loop(
        plate: &LoftedPlate,
        material: Material,
        options: SizingOptions,
    ) -> SizingLoop<'_> {
        let supports = SupportConfiguration::new(1.6, 0.7, 0.0).expect("valid supports");
        SizingLoop::new(plate, supports, Attachments::default(), material, options)
            .expect("valid sizing loop")
    }

    #[test]
    fn zero_step_is_rejected() {
        let options = SizingOptions {
            thickness_step: 0.0,
            ..SizingOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(SizingError::InvalidOption {
                name: "thickness_step",
                value: 0.0
            })
        );
    }

    #[test]
    fn unloaded_plate_converges_immediately() {
        let plate = plate();
        let options = SizingOptions {
            n_cuts: 6,
            ..SizingOptions::default()
        };
        let sizing = sizing_loop(&plate, Material::aluminium(), options);
        let outcome = sizing
            .run(&LoadDistribution::zero(sizing.stations()))
            .expect("unloaded plate converges");
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.thickness, 0.001);
        assert_eq!(outcome.rib_count, 1);
        assert_eq!(outcome.history.len(), 1);
        assert!(outcome.total_mass > 0.0);
    }

    #[test]
    fn impossible_strength_hits_the_iteration_cap() {
        let plate = plate();
        let material = Material {
            yield_strength: 1.0,
            ..Material::aluminium()
        };
        let options = SizingOptions {
            n_cuts: 6,
            max_iterations: 5,
            ..SizingOptions::default()
        };
        let sizing = sizing_loop(&plate, material, options);
        let count = sizing.stations().strip_count();
        let loads = LoadDistribution::new(
            vec![-100.0; count],
            vec![5.0; count],
            sizing.stations().strip_centres(),
        )
        .expect("valid loads");
        let error = sizing.run(&loads).expect_err("cannot converge");
        assert!(matches!(
            error,
            SizingError::NotConverged { iterations: 5, rib_count: 1, .. }
        ));
    }
}
