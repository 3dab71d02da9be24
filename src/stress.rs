//! Skin stresses at every spanwise station.

use ndarray::Array2;
use serde::Serialize;

use crate::bending::BeamState;
use crate::errors::AnalysisError;
use crate::geometry::{CrossSection, Point};
use crate::loads::SupportConfiguration;
use crate::sections::{SectionalProperties, SectionalState};

/// Unsymmetric bending stress at `point` of a section carrying `moment_x` and `moment_z`.
///
/// The result is only finite for a section that passes
/// [`SectionalState::check_bending`]; [`StressEngine`] checks every station first.
///
/// # Examples
/// ```
/// use spoilerx::{navier_stress, point, SectionalState};
///
/// let state = SectionalState {
///     y: 0.0,
///     area: 1.0e-3,
///     centroid: point(0.0, 0.0),
///     ixx: 2.0e-6,
///     izz: 8.0e-6,
///     ixz: 0.0,
/// };
/// let sigma = navier_stress(&state, 10.0, 0.0, point(0.0, 0.02));
/// assert!((sigma - 1.0e5).abs() < 1.0e-6);
/// ```
#[must_use]
pub fn navier_stress(state: &SectionalState, moment_x: f64, moment_z: f64, point: Point) -> f64 {
    let dx = point.x - state.centroid.x;
    let dz = point.z - state.centroid.z;
    let determinant = state.determinant();
    moment_x * (state.izz * dz - state.ixz * dx) / determinant
        + moment_z * (state.ixx * dx - state.ixz * dz) / determinant
}

/// Closed-section shear flow at every boundary point in N/m.
///
/// The open-section flow is integrated from the first boundary point with the
/// trapezoidal rule and then corrected so that its mean around the loop vanishes.
/// As with [`navier_stress`], `state` must pass [`SectionalState::check_bending`].
#[must_use]
pub fn shear_flow(
    section: &CrossSection,
    state: &SectionalState,
    shear_x: f64,
    shear_z: f64,
    thickness: f64,
) -> Vec<f64> {
    let determinant = state.determinant();
    let x_factor = -(shear_x * state.ixx - shear_z * state.ixz) / determinant;
    let z_factor = -(shear_z * state.izz - shear_x * state.ixz) / determinant;

    let mut basic = Vec::with_capacity(section.points().len());
    basic.push(0.0);
    let mut running = 0.0;
    let mut circulation = 0.0;
    for segment in section.segments() {
        let length = segment.length();
        let mid = segment.midpoint();
        let increment = (x_factor * (mid.x - state.centroid.x)
            + z_factor * (mid.z - state.centroid.z))
            * thickness
            * length;
        circulation += (running + increment / 2.0) * length;
        running += increment;
        basic.push(running);
    }
    let perimeter = section.perimeter();
    let correction = if perimeter > 0.0 {
        -circulation / perimeter
    } else {
        0.0
    };
    basic.iter().map(|q| q + correction).collect()
}

/// The entry of `values` with the largest magnitude, keeping its sign.
fn signed_extreme(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .fold(0.0, |extreme, value| if value.abs() > extreme.abs() { value } else { extreme })
}

/// Stress summary of one station in Pa.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StationStress {
    /// Spanwise coordinate measured from the first tip in metres.
    pub y: f64,
    /// Uniform normal stress from the strut cant.
    pub axial: f64,
    /// Largest bending stress around the boundary.
    pub max_bending: f64,
    /// Smallest bending stress around the boundary.
    pub min_bending: f64,
    /// Shear stress of largest magnitude around the boundary.
    pub shear: f64,
}

impl StationStress {
    /// Axial plus the largest bending stress.
    #[must_use]
    pub fn tensile(&self) -> f64 {
        self.axial + self.max_bending
    }

    /// Axial plus the smallest bending stress.
    #[must_use]
    pub fn compressive(&self) -> f64 {
        self.axial + self.min_bending
    }

    /// Bending stress of largest magnitude.
    #[must_use]
    pub fn peak_bending(&self) -> f64 {
        if self.max_bending.abs() >= self.min_bending.abs() {
            self.max_bending
        } else {
            self.min_bending
        }
    }
}

/// Stresses over the whole plate.
#[derive(Clone, Debug, PartialEq)]
pub struct StressField {
    /// Bending stress with one row per station and one column per boundary point.
    pub bending: Array2<f64>,
    /// Per-station summaries, tip to tip.
    pub stations: Vec<StationStress>,
}

impl StressField {
    /// Largest combined tensile stress over the span.
    #[must_use]
    pub fn max_tensile(&self) -> f64 {
        self.stations
            .iter()
            .map(StationStress::tensile)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Magnitude of the most compressive combined stress, zero when nothing is compressed.
    #[must_use]
    pub fn max_compressive(&self) -> f64 {
        let most_compressive = self
            .stations
            .iter()
            .map(StationStress::compressive)
            .fold(f64::INFINITY, f64::min);
        (-most_compressive).max(0.0)
    }

    /// Largest shear stress magnitude over the span.
    #[must_use]
    pub fn max_shear(&self) -> f64 {
        self.stations
            .iter()
            .map(|station| station.shear.abs())
            .fold(0.0, f64::max)
    }
}

/// Evaluates the stresses of a solved beam.
#[derive(Clone, Copy, Debug)]
pub struct StressEngine<'a> {
    /// Sections of the design.
    properties: &'a SectionalProperties,
    /// Strut positions and cant.
    supports: SupportConfiguration,
}

impl<'a> StressEngine<'a> {
    /// Create an engine for the given sections and struts.
    #[must_use]
    pub fn new(properties: &'a SectionalProperties, supports: SupportConfiguration) -> Self {
        Self {
            properties,
            supports,
        }
    }

    /// Stresses caused by the moments and shear forces of `beam`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DegenerateSection`] for a station that fails
    /// [`SectionalState::check_bending`].
    pub fn compute(&self, beam: &BeamState) -> Result<StressField, AnalysisError> {
        let states = self.properties.full_span();
        let sections = self.properties.sections();
        let thickness = self.properties.thickness();
        let points = sections.iter().map(|section| section.points().len()).max().unwrap_or(0);
        let mut bending = Array2::<f64>::zeros((states.len(), points));

        let spanwise_force = beam.strut_force_z * self.supports.cant.tan();
        let (inner, outer) = (self.supports.strut_location_1, self.supports.strut_location_2);

        let mut stations = Vec::with_capacity(states.len());
        for (index, ((state, section), response)) in states
            .iter()
            .zip(sections)
            .zip(&beam.stations)
            .enumerate()
        {
            state.check_bending(index)?;
            let axial = if (inner..=outer).contains(&state.y) {
                spanwise_force / state.area
            } else {
                0.0
            };

            let mut max_bending = f64::NEG_INFINITY;
            let mut min_bending = f64::INFINITY;
            for (column, &point) in section.points().iter().enumerate() {
                let sigma = navier_stress(state, response.moment_x, response.moment_z, point);
                bending[[index, column]] = sigma;
                max_bending = max_bending.max(sigma);
                min_bending = min_bending.min(sigma);
            }

            let flow = shear_flow(section, state, response.shear_x, response.shear_z, thickness);
            stations.push(StationStress {
                y: state.y,
                axial,
                max_bending,
                min_bending,
                shear: signed_extreme(flow) / thickness,
            });
        }

        Ok(StressField { bending, stations })
    }
}
