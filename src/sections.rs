//! Thin-walled section properties along the span.

use serde::Serialize;

use crate::errors::{AnalysisError, GeometryError};
use crate::geometry::{CrossSection, Point};
use crate::profile::CrossSectionSource;
use crate::span::{mirror, SpanDiscretization};

/// Smallest accepted value of `1 - Ixz^2 / (Ixx Izz)`.
pub const COUPLING_TOLERANCE: f64 = 1.0e-9;

/// Properties of one spanwise station.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SectionalState {
    /// Spanwise coordinate in metres.
    pub y: f64,
    /// Skin cross-sectional area in m^2.
    pub area: f64,
    /// Centroid in section coordinates.
    pub centroid: Point,
    /// Second moment of area about the chordwise centroidal axis in m^4.
    pub ixx: f64,
    /// Second moment of area about the vertical centroidal axis in m^4.
    pub izz: f64,
    /// Product of area about the centroid in m^4.
    pub ixz: f64,
}

impl SectionalState {
    /// Treat every segment of `section` as a thin rectangle of thickness
    /// `thickness` and sum its contributions about the section centroid.
    ///
    /// # Examples
    /// ```
    /// use spoilerx::{point, CrossSection, SectionalState};
    ///
    /// let square = CrossSection::new(
    ///     0.0,
    ///     vec![
    ///         point(0.0, 0.0),
    ///         point(1.0, 0.0),
    ///         point(1.0, 1.0),
    ///         point(0.0, 1.0),
    ///         point(0.0, 0.0),
    ///     ],
    /// )
    /// .expect("valid square");
    /// let state = SectionalState::compute(&square, 0.01);
    /// assert!((state.centroid.x - 0.5).abs() < 1.0e-12);
    /// assert!((state.ixx - state.izz).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn compute(section: &CrossSection, thickness: f64) -> Self {
        let (area, first_x, first_z) =
            section
                .segments()
                .fold((0.0, 0.0, 0.0), |(area, first_x, first_z), segment| {
                    let d_area = segment.length() * thickness;
                    let mid = segment.midpoint();
                    (area + d_area, first_x + mid.x * d_area, first_z + mid.z * d_area)
                });
        let centroid = if area > 0.0 {
            Point::new(first_x / area, first_z / area)
        } else {
            Point::new(0.0, 0.0)
        };

        let mut ixx = 0.0;
        let mut izz = 0.0;
        let mut ixz = 0.0;
        for segment in section.segments() {
            let length = segment.length();
            let d_area = length * thickness;
            let mid = segment.midpoint();
            let dx = mid.x - centroid.x;
            let dz = mid.z - centroid.z;
            ixx += d_area * dz * dz;
            izz += d_area * dx * dx;
            ixz += d_area * dx * dz;

            // Self-inertia about the segment axis and about its normal.
            let about_segment = length * thickness.powi(3) / 12.0;
            let about_normal = thickness * length.powi(3) / 12.0;
            let mean = (about_segment + about_normal) / 2.0;
            let half_difference = (about_segment - about_normal) / 2.0;
            let double_angle = 2.0 * segment.angle();
            ixx += mean + half_difference * double_angle.cos();
            izz += mean - half_difference * double_angle.cos();
            ixz -= half_difference * double_angle.sin();
        }

        Self {
            y: section.y(),
            area,
            centroid,
            ixx,
            izz,
            ixz,
        }
    }

    /// `Ixx * Izz - Ixz^2`, the determinant shared by the bending formulas.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.ixx * self.izz - self.ixz * self.ixz
    }

    /// `1 - Ixz^2 / (Ixx Izz)`, zero when either second moment is not positive.
    #[must_use]
    pub fn coupling(&self) -> f64 {
        if self.ixx > 0.0 && self.izz > 0.0 {
            1.0 - self.ixz * self.ixz / (self.ixx * self.izz)
        } else {
            0.0
        }
    }

    /// Check that the section can carry bending, reporting failures against `station`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DegenerateSection`] for a non-positive area or
    /// when [`SectionalState::coupling`] does not exceed [`COUPLING_TOLERANCE`].
    pub fn check_bending(&self, station: usize) -> Result<(), AnalysisError> {
        if self.area > 0.0 && self.coupling() > COUPLING_TOLERANCE {
            Ok(())
        } else {
            Err(AnalysisError::DegenerateSection {
                station,
                determinant: self.determinant(),
            })
        }
    }
}

/// Sectional properties of the whole plate for one skin thickness and rib count.
#[derive(Clone, Debug)]
pub struct SectionalProperties {
    /// Skin thickness in metres.
    thickness: f64,
    /// Stations the properties were computed at.
    stations: SpanDiscretization,
    /// Half-span states, midspan first.
    half: Vec<SectionalState>,
    /// Full-span states, tip to tip.
    full: Vec<SectionalState>,
    /// Full-span boundaries with their spanwise coordinate from the first tip.
    sections: Vec<CrossSection>,
    /// Full-span indices of the ribs, end caps included.
    rib_stations: Vec<usize>,
    /// Enclosed area of every rib in m^2.
    rib_areas: Vec<f64>,
}

impl SectionalProperties {
    /// Sample the half-span cross-sections of a plate, midspan first.
    ///
    /// The boundaries do not depend on the skin thickness, so callers that
    /// evaluate several thicknesses sample them once.
    ///
    /// # Errors
    ///
    /// Returns any [`GeometryError`] raised by the source.
    pub fn sample<S>(
        source: &S,
        stations: &SpanDiscretization,
    ) -> Result<Vec<CrossSection>, GeometryError>
    where
        S: CrossSectionSource + ?Sized,
    {
        stations
            .half_span()
            .iter()
            .map(|&y| source.cross_section(y))
            .collect()
    }

    /// Compute the properties of every station from pre-sampled half-span sections.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositive`] for a non-positive thickness and
    /// [`GeometryError::TooFewStations`] when the number of sections does not
    /// match the discretisation.
    pub fn compute(
        half_sections: &[CrossSection],
        stations: &SpanDiscretization,
        thickness: f64,
        rib_count: usize,
    ) -> Result<Self, GeometryError> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "thickness",
                value: thickness,
            });
        }
        if half_sections.len() != stations.n_cuts() {
            return Err(GeometryError::TooFewStations(half_sections.len()));
        }

        let half: Vec<SectionalState> = half_sections
            .iter()
            .map(|section| SectionalState::compute(section, thickness))
            .collect();
        let full_y = stations.full_span();
        let full = mirror(&half)
            .into_iter()
            .zip(&full_y)
            .map(|(state, &y)| SectionalState { y, ..state })
            .collect();
        let sections: Vec<CrossSection> = mirror(half_sections)
            .iter()
            .zip(&full_y)
            .map(|(section, &y)| section.at_y(y))
            .collect();
        let rib_stations = stations.rib_stations(rib_count);
        let rib_areas = rib_stations
            .iter()
            .map(|&index| sections[index].enclosed_area())
            .collect();
        log::debug!("ribs placed at stations {rib_stations:?}");

        Ok(Self {
            thickness,
            stations: stations.clone(),
            half,
            full,
            sections,
            rib_stations,
            rib_areas,
        })
    }

    /// Skin thickness in metres.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Spanwise discretisation the properties were computed on.
    #[must_use]
    pub fn stations(&self) -> &SpanDiscretization {
        &self.stations
    }

    /// Half-span states, midspan first.
    #[must_use]
    pub fn half_span(&self) -> &[SectionalState] {
        &self.half
    }

    /// Full-span states, tip to tip.
    #[must_use]
    pub fn full_span(&self) -> &[SectionalState] {
        &self.full
    }

    /// Full-span cross-sections matching [`SectionalProperties::full_span`].
    #[must_use]
    pub fn sections(&self) -> &[CrossSection] {
        &self.sections
    }

    /// Full-span station indices occupied by ribs, end caps included.
    #[must_use]
    pub fn rib_stations(&self) -> &[usize] {
        &self.rib_stations
    }

    /// Planform area enclosed by each rib in m^2.
    #[must_use]
    pub fn rib_areas(&self) -> &[f64] {
        &self.rib_areas
    }

    /// Mean skin area over the full span.
    #[must_use]
    pub fn mean_area(&self) -> f64 {
        mean(self.full.iter().map(|state| state.area))
    }

    /// Mean `Ixx` over the full span.
    #[must_use]
    pub fn mean_ixx(&self) -> f64 {
        mean(self.full.iter().map(|state| state.ixx))
    }

    /// Mean `Izz` over the full span.
    #[must_use]
    pub fn mean_izz(&self) -> f64 {
        mean(self.full.iter().map(|state| state.izz))
    }
}

/// Arithmetic mean, zero for an empty iterator.
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::profile::{LoftedPlate, SectionProfile};

    const CHORD: f64 = 0.3;
    const HEIGHT: f64 = 0.06;
    const THICKNESS: f64 = 0.001;

    fn box_plate(n_discretise: usize) -> LoftedPlate {
        let profile = SectionProfile::Rectangle {
            height_ratio: HEIGHT / CHORD,
        };
        LoftedPlate::new(&[profile.clone(), profile], 1.6, CHORD, 0.0, n_discretise)
            .expect("valid plate")
    }

    fn box_state(n_discretise: usize) -> SectionalState {
        let section = box_plate(n_discretise)
            .cross_section(0.0)
            .expect("section available");
        SectionalState::compute(&section, THICKNESS)
    }

    fn relative_errors(state: &SectionalState) -> (f64, f64) {
        let ixx = CHORD * THICKNESS * HEIGHT.powi(2) / 2.0 + THICKNESS * HEIGHT.powi(3) / 6.0;
        let izz = THICKNESS * CHORD.powi(3) / 6.0 + HEIGHT * THICKNESS * CHORD.powi(2) / 2.0;
        ((state.ixx / ixx - 1.0).abs(), (state.izz / izz - 1.0).abs())
    }

    #[test]
    fn thin_walled_box_matches_closed_form() {
        let fine = box_state(400);
        let (ixx_error, izz_error) = relative_errors(&fine);
        assert!(ixx_error < 0.01, "Ixx error {ixx_error}");
        assert!(izz_error < 0.01, "Izz error {izz_error}");
        assert_relative_eq!(fine.ixz, 0.0, epsilon = 1.0e-15);
        assert_relative_eq!(fine.centroid.x, CHORD / 2.0, epsilon = 1.0e-3);
        assert_relative_eq!(fine.area, 2.0 * (CHORD + HEIGHT) * THICKNESS, max_relative = 0.01);
    }

    #[test]
    fn pitched_box_rotates_the_inertia_tensor() {
        let profile = SectionProfile::Rectangle {
            height_ratio: HEIGHT / CHORD,
        };
        let pitched = LoftedPlate::new(&[profile.clone(), profile], 1.6, CHORD, 20.0, 400)
            .expect("valid plate")
            .cross_section(0.0)
            .expect("section available");
        let pitched = SectionalState::compute(&pitched, THICKNESS);
        let level = box_state(400);

        // A positive plate angle turns the section clockwise in the x-z plane.
        let phi = -20.0_f64.to_radians();
        let (s, c) = phi.sin_cos();
        let ixz = (level.izz - level.ixx) / 2.0 * (2.0 * phi).sin();
        let ixx = s * s * level.izz + c * c * level.ixx;
        let izz = c * c * level.izz + s * s * level.ixx;
        assert!(pitched.ixz < 0.0);
        assert_relative_eq!(pitched.ixz, ixz, max_relative = 1.0e-9);
        assert_relative_eq!(pitched.ixx, ixx, max_relative = 1.0e-9);
        assert_relative_eq!(pitched.izz, izz, max_relative = 1.0e-9);
        assert_relative_eq!(pitched.determinant(), level.determinant(), max_relative = 1.0e-9);

        let exact_ixx = CHORD * THICKNESS * HEIGHT.powi(2) / 2.0 + THICKNESS * HEIGHT.powi(3) / 6.0;
        let exact_izz = THICKNESS * CHORD.powi(3) / 6.0 + HEIGHT * THICKNESS * CHORD.powi(2) / 2.0;
        let exact_ixz = (exact_izz - exact_ixx) / 2.0 * (2.0 * phi).sin();
        assert_relative_eq!(pitched.ixz, exact_ixz, max_relative = 0.02);
    }

    #[test]
    fn fully_coupled_section_cannot_bend() {
        let state = SectionalState {
            y: 0.4,
            area: 1.0e-4,
            centroid: Point::new(0.1, 0.0),
            ixx: 2.0e-6,
            izz: 8.0e-6,
            ixz: 4.0e-6,
        };
        assert_relative_eq!(state.coupling(), 0.0, epsilon = 1.0e-12);
        let error = state.check_bending(3).expect_err("Ixz^2 equals Ixx Izz");
        assert!(matches!(error, AnalysisError::DegenerateSection { station: 3, .. }));

        let empty = SectionalState { area: 0.0, ixz: 0.0, ..state };
        assert!(empty.check_bending(0).is_err());
        let sound = SectionalState { ixz: 1.0e-6, ..state };
        sound.check_bending(0).expect("weakly coupled section bends");
    }

    #[test]
    fn discretisation_error_shrinks_with_resolution() {
        let (coarse_ixx, coarse_izz) = relative_errors(&box_state(50));
        let (fine_ixx, fine_izz) = relative_errors(&box_state(400));
        assert!(fine_ixx < coarse_ixx);
        assert!(fine_izz < coarse_izz);
    }

    #[test]
    fn symmetric_airfoil_centroid_lies_on_the_chord_line() {
        let plate = LoftedPlate::new(
            &[SectionProfile::naca4("0012"), SectionProfile::naca4("0012")],
            1.6,
            CHORD,
            0.0,
            120,
        )
        .expect("valid plate");
        let section = plate.cross_section(0.4).expect("section available");
        let state = SectionalState::compute(&section, THICKNESS);
        assert_relative_eq!(state.centroid.z, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(state.ixz, 0.0, epsilon = 1.0e-15);
        assert!(state.ixx > 0.0 && state.izz > state.ixx);
    }

    #[test]
    fn full_span_mirrors_the_half_span() {
        let plate = LoftedPlate::new(
            &[
                SectionProfile::Rectangle { height_ratio: 0.2 },
                SectionProfile::Rectangle { height_ratio: 0.1 },
            ],
            1.6,
            CHORD,
            0.0,
            80,
        )
        .expect("valid plate");
        let stations = SpanDiscretization::new(1.6, 5).expect("valid discretisation");
        let half = SectionalProperties::sample(&plate, &stations).expect("sections sampled");
        let properties =
            SectionalProperties::compute(&half, &stations, THICKNESS, 1).expect("properties");
        let full = properties.full_span();
        assert_eq!(full.len(), 9);
        for i in 0..4 {
            assert_eq!(full[i].ixx, full[8 - i].ixx);
            assert_eq!(full[i].area, full[8 - i].area);
        }
        assert_eq!(full[4].ixx, properties.half_span()[0].ixx);
        assert_eq!(full[0].ixx, properties.half_span()[4].ixx);
        assert!(full[4].ixx > full[0].ixx);
        assert_relative_eq!(full[8].y, 1.6, epsilon = 1.0e-12);
        assert_eq!(properties.rib_stations(), &[0, 4, 8]);
        assert_relative_eq!(properties.rib_areas()[1], 0.2 * CHORD * CHORD, max_relative = 0.01);
    }

    #[test]
    fn non_positive_thickness_is_rejected() {
        let stations = SpanDiscretization::new(1.6, 3).expect("valid discretisation");
        let half = SectionalProperties::sample(&box_plate(40), &stations).expect("sections");
        let error = SectionalProperties::compute(&half, &stations, 0.0, 1)
            .expect_err("zero thickness rejected");
        assert!(matches!(error, GeometryError::NonPositive { name: "thickness", .. }));
    }
}
