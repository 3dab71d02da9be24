//! Plain-text rendering of sizing results.

use std::fmt::Write;

use uom::si::f64::{Length, Pressure};
use uom::si::length::{meter, millimeter};
use uom::si::pressure::{megapascal, pascal};

use crate::sizing::SizingOutcome;
use crate::stress::StressField;

/// Stress in Pa expressed in MPa.
fn mpa(value: f64) -> f64 {
    Pressure::new::<pascal>(value).get::<megapascal>()
}

/// Length in metres expressed in millimetres.
fn mm(value: f64) -> f64 {
    Length::new::<meter>(value).get::<millimeter>()
}

/// Render a textual summary of a converged sizing run.
///
/// # Examples
/// ```
/// use spoilerx::{render_summary, size_spoiler, SpoilerConfig};
///
/// let outcome = size_spoiler(&SpoilerConfig::default()).expect("default spoiler converges");
/// let report = render_summary(&outcome);
/// assert!(report.starts_with("Spoiler sizing converged"));
/// ```
#[must_use]
pub fn render_summary(outcome: &SizingOutcome) -> String {
    let mut output = String::new();
    let summary = &outcome.summary;
    let masses = &outcome.masses;

    writeln!(
        &mut output,
        "Spoiler sizing converged after {} iterations",
        outcome.iterations
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Skin thickness: {:.1} mm, ribs: {}",
        mm(outcome.thickness),
        outcome.rib_count
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Mass: main plate {:.3} kg, ribs {:.3} kg, endplates {:.3} kg, struts {:.3} kg, total {:.3} kg",
        masses.main_plate,
        masses.ribs,
        masses.endplates,
        masses.struts,
        outcome.total_mass
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Stress: tensile {:.2} MPa, compressive {:.2} MPa, shear {:.2} MPa",
        mpa(summary.max_tensile),
        mpa(summary.max_compressive),
        mpa(summary.max_shear)
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Critical: compressive buckling {:.2} MPa, shear buckling {:.2} MPa, column {:.2} MPa",
        mpa(summary.critical_compressive),
        mpa(summary.critical_shear),
        mpa(summary.critical_column)
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Max deflection: {:.2} mm",
        mm(summary.max_deflection)
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Strut reactions: Fz = {:+.1} N, Fx = {:+.1} N",
        summary.strut_force_z, summary.strut_force_x
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "Failure modes: {}", outcome.report.modes)
        .expect("writing to string cannot fail");

    output
}

/// Render one line per station with the axial, peak bending and shear stress in MPa.
#[must_use]
pub fn render_stations(stress: &StressField) -> String {
    let mut output = String::from("     y [mm]   axial [MPa] bending [MPa]   shear [MPa]\n");
    for station in &stress.stations {
        writeln!(
            &mut output,
            "{:>11.1} {:>13.3} {:>13.3} {:>13.3}",
            mm(station.y),
            mpa(station.axial),
            mpa(station.peak_bending()),
            mpa(station.shear)
        )
        .expect("writing to string cannot fail");
    }
    output
}
