//! Unsymmetric bending of the plate between and beyond its two struts.
//!
//! The plate is treated as a beam along the span. Strip forces, self-weight
//! and the endplates load it; the struts react the resultant in equal parts.
//! Rotation and deflection are zero at the strut stations.

use serde::Serialize;

use crate::errors::{AnalysisError, LoadError};
use crate::loads::{LoadDistribution, SupportConfiguration};
use crate::sections::SectionalProperties;
use crate::span::nearest_index;

/// Standard gravitational acceleration in m/s^2.
pub const GRAVITY: f64 = 9.81;

/// Masses that load the plate under gravity, in kg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SelfWeight {
    /// Mass spread uniformly over the span (skin and ribs).
    pub distributed: f64,
    /// Mass of each endplate, hung from the outermost strips.
    pub endplate: f64,
}

/// Beam response at one full-span station.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BeamStation {
    /// Spanwise coordinate measured from the first tip in metres.
    pub y: f64,
    /// Slope of the vertical deflection in radians.
    pub theta_x: f64,
    /// Slope of the chordwise deflection in radians.
    pub theta_z: f64,
    /// Vertical deflection in metres.
    pub w: f64,
    /// Chordwise deflection in metres.
    pub u: f64,
    /// Bending moment from vertical forces in N m.
    pub moment_x: f64,
    /// Bending moment from chordwise forces in N m.
    pub moment_z: f64,
    /// Internal chordwise shear force in N.
    pub shear_x: f64,
    /// Internal vertical shear force in N.
    pub shear_z: f64,
}

/// Beam response over the whole span.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BeamState {
    /// Response at every full-span station, tip to tip.
    pub stations: Vec<BeamStation>,
    /// Vertical reaction of each strut in N.
    pub strut_force_z: f64,
    /// Chordwise reaction of each strut in N.
    pub strut_force_x: f64,
    /// Full-span station indices at which the struts are attached.
    pub strut_stations: [usize; 2],
}

impl BeamState {
    /// Largest deflection magnitude in either plane.
    #[must_use]
    pub fn max_deflection(&self) -> f64 {
        self.stations
            .iter()
            .map(|station| station.w.abs().max(station.u.abs()))
            .fold(0.0, f64::max)
    }
}

/// Solver for the spanwise moments, rotations and deflections of the plate.
#[derive(Clone, Copy, Debug)]
pub struct BeamBendingSolver<'a> {
    /// Sections of the design being solved.
    properties: &'a SectionalProperties,
    /// Strut positions and cant.
    supports: SupportConfiguration,
    /// Young's modulus in Pa.
    youngs_modulus: f64,
}

impl<'a> BeamBendingSolver<'a> {
    /// Create a solver for the given sections, struts and Young's modulus in Pa.
    #[must_use]
    pub fn new(
        properties: &'a SectionalProperties,
        supports: SupportConfiguration,
        youngs_modulus: f64,
    ) -> Self {
        Self {
            properties,
            supports,
            youngs_modulus,
        }
    }

    /// Solve the beam under `loads` and `weight`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Load`] when the loads do not fit the stations,
    /// [`AnalysisError::InvalidMaterial`] for a non-positive modulus and
    /// [`AnalysisError::DegenerateSection`] when a station cannot carry bending.
    pub fn solve(
        &self,
        loads: &LoadDistribution,
        weight: SelfWeight,
    ) -> Result<BeamState, AnalysisError> {
        let stations = self.properties.stations();
        loads.check_against(stations)?;
        if !(self.youngs_modulus.is_finite() && self.youngs_modulus > 0.0) {
            return Err(AnalysisError::InvalidMaterial {
                name: "youngs_modulus",
                value: self.youngs_modulus,
            });
        }

        let y = stations.full_span();
        let strip_count = loads.len();
        let strip_weight = -weight.distributed * GRAVITY / strip_count as f64;
        let mut vertical: Vec<f64> = loads
            .lift()
            .iter()
            .map(|lift| lift + strip_weight)
            .collect();
        let endplate_weight = weight.endplate * GRAVITY;
        vertical[0] -= endplate_weight;
        vertical[strip_count - 1] -= endplate_weight;

        let strut_force_z = -vertical.iter().sum::<f64>() / 2.0;
        let strut_force_x = -loads.total_drag() / 2.0;
        log::debug!(
            "strut reactions: {strut_force_z:.2} N vertical, {strut_force_x:.2} N chordwise"
        );

        let struts = self.supports.locations();
        let mut response: Vec<BeamStation> = y
            .iter()
            .map(|&position| {
                let (moment_x, shear_z) =
                    internal_forces(position, loads.y(), &vertical, &struts, strut_force_z);
                let (moment_z, shear_x) =
                    internal_forces(position, loads.y(), loads.drag(), &struts, strut_force_x);
                BeamStation {
                    y: position,
                    theta_x: 0.0,
                    theta_z: 0.0,
                    w: 0.0,
                    u: 0.0,
                    moment_x,
                    moment_z,
                    shear_x,
                    shear_z,
                }
            })
            .collect();

        let (curvature_w, curvature_u) = self.curvatures(&response)?;
        let anchor = nearest_index(&y, self.supports.strut_location_2)
            .ok_or(LoadError::StationMismatch {
                strips: strip_count,
                stations: y.len(),
            })?
            .max(stations.n_cuts() - 1);
        let last = y.len() - 1;
        let (theta_x, w) = integrate_from_anchor(&curvature_w, &y, anchor);
        let (theta_z, u) = integrate_from_anchor(&curvature_u, &y, anchor);
        for (i, station) in response.iter_mut().enumerate() {
            station.theta_x = theta_x[i];
            station.theta_z = theta_z[i];
            station.w = w[i];
            station.u = u[i];
        }

        Ok(BeamState {
            stations: response,
            strut_force_z,
            strut_force_x,
            strut_stations: [last - anchor, anchor],
        })
    }

    /// Coupled curvatures `(w'', u'')` at every station.
    fn curvatures(&self, response: &[BeamStation]) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
        let e = self.youngs_modulus;
        let mut curvature_w = Vec::with_capacity(response.len());
        let mut curvature_u = Vec::with_capacity(response.len());
        for (station, (state, beam)) in self
            .properties
            .full_span()
            .iter()
            .zip(response)
            .enumerate()
        {
            state.check_bending(station)?;
            let (ixx, izz, ixz) = (state.ixx, state.izz, state.ixz);
            let coupling = state.coupling();
            let (mx, mz) = (beam.moment_x, beam.moment_z);
            curvature_w.push((mz * ixz / (e * ixx * izz) - mx / (e * ixx)) / coupling);
            curvature_u.push((mx * ixz / (e * ixx * izz) - mz / (e * izz)) / coupling);
        }
        Ok((curvature_w, curvature_u))
    }
}

/// Bending moment and shear force at `position`.
///
/// Every strip force left of `position` acts with its distance to
/// `position` as lever arm; a strut joins once `position` reaches it.
fn internal_forces(
    position: f64,
    strip_y: &[f64],
    forces: &[f64],
    struts: &[f64; 2],
    reaction: f64,
) -> (f64, f64) {
    let (moment, shear) = strip_y
        .iter()
        .zip(forces)
        .filter(|&(&strip, _)| strip < position)
        .fold((0.0, 0.0), |(moment, shear), (&strip, &force)| {
            (moment + force * (position - strip), shear + force)
        });
    struts
        .iter()
        .filter(|&&strut| strut <= position)
        .fold((moment, shear), |(moment, shear), &strut| {
            (moment + reaction * (position - strut), shear + reaction)
        })
}

/// Integrate a curvature into rotation and deflection, both zero at `anchor`.
///
/// The half between midspan and the tip beyond `anchor` is integrated with
/// the trapezoidal rule; the other half is its mirror image.
fn integrate_from_anchor(curvature: &[f64], y: &[f64], anchor: usize) -> (Vec<f64>, Vec<f64>) {
    let count = curvature.len();
    let last = count - 1;
    let midspan = last / 2;
    let mut rotation = vec![0.0; count];
    let mut deflection = vec![0.0; count];

    for i in anchor + 1..count {
        let step = y[i] - y[i - 1];
        rotation[i] = rotation[i - 1] - 0.5 * (curvature[i - 1] + curvature[i]) * step;
    }
    for i in (midspan..anchor).rev() {
        let step = y[i + 1] - y[i];
        rotation[i] = rotation[i + 1] + 0.5 * (curvature[i] + curvature[i + 1]) * step;
    }
    for i in anchor + 1..count {
        let step = y[i] - y[i - 1];
        deflection[i] = deflection[i - 1] + 0.5 * (rotation[i - 1] + rotation[i]) * step;
    }
    for i in (midspan..anchor).rev() {
        let step = y[i + 1] - y[i];
        deflection[i] = deflection[i + 1] - 0.5 * (rotation[i] + rotation[i + 1]) * step;
    }
    for i in 0..midspan {
        rotation[i] = rotation[last - i];
        deflection[i] = deflection[last - i];
    }
    (rotation, deflection)
}
