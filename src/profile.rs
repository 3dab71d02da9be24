//! Section profiles and the lofted main plate that turns them into cross-sections.

use serde::{Deserialize, Serialize};

use crate::errors::GeometryError;
use crate::geometry::{point, resample_closed, CrossSection, Point};

/// Number of chordwise samples per surface when generating NACA outlines.
const NACA_SAMPLES: usize = 100;

/// Shape of a spanwise section in unit-chord coordinates.
///
/// The variant is resolved once when the plate is built; every variant ends
/// up as the same closed boundary outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionProfile {
    /// NACA four-digit airfoil such as `"0012"` or `"2412"`.
    Naca4 {
        /// The four digits of the designation.
        designation: String,
    },
    /// NACA five-digit airfoil with a standard mean line such as `"23012"`.
    Naca5 {
        /// The five digits of the designation.
        designation: String,
    },
    /// Thin-walled rectangular box spanning the full chord.
    Rectangle {
        /// Box height as a fraction of the chord.
        height_ratio: f64,
    },
    /// Explicit outline coordinates in unit-chord coordinates.
    Coordinates {
        /// Ordered outline points.
        points: Vec<Point>,
    },
}

impl SectionProfile {
    /// Convenience constructor for a NACA four-digit airfoil.
    #[must_use]
    pub fn naca4(designation: &str) -> Self {
        Self::Naca4 {
            designation: designation.to_owned(),
        }
    }

    /// Generate the closed outline of the profile for a unit chord.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDesignation`] for malformed NACA digits,
    /// [`GeometryError::NonPositive`] for a non-positive rectangle height and
    /// [`GeometryError::TooFewPoints`] for short coordinate lists.
    pub fn outline(&self) -> Result<Vec<Point>, GeometryError> {
        match self {
            Self::Naca4 { designation } => {
                let digits = parse_digits(designation, 4)?;
                let camber = f64::from(digits[0]) / 100.0;
                let position = f64::from(digits[1]) / 10.0;
                let thickness = f64::from(digits[2] * 10 + digits[3]) / 100.0;
                if thickness <= 0.0 || (camber > 0.0 && position <= 0.0) {
                    return Err(GeometryError::InvalidDesignation(designation.clone()));
                }
                Ok(airfoil_outline(thickness, |x| {
                    naca4_camber(camber, position, x)
                }))
            }
            Self::Naca5 { designation } => {
                let digits = parse_digits(designation, 5)?;
                let design_lift = 0.15 * f64::from(digits[0]);
                let thickness = f64::from(digits[3] * 10 + digits[4]) / 100.0;
                if digits[2] != 0 || !(1..=5).contains(&digits[1]) || thickness <= 0.0 {
                    return Err(GeometryError::InvalidDesignation(designation.clone()));
                }
                let series = usize::from(digits[1]) - 1;
                Ok(airfoil_outline(thickness, |x| {
                    naca5_camber(series, design_lift, x)
                }))
            }
            Self::Rectangle { height_ratio } => {
                if !(height_ratio.is_finite() && *height_ratio > 0.0) {
                    return Err(GeometryError::NonPositive {
                        name: "height_ratio",
                        value: *height_ratio,
                    });
                }
                let half = height_ratio / 2.0;
                Ok(vec![
                    point(1.0, 0.0),
                    point(1.0, half),
                    point(0.0, half),
                    point(0.0, -half),
                    point(1.0, -half),
                    point(1.0, 0.0),
                ])
            }
            Self::Coordinates { points } => {
                if points.len() < 3 {
                    return Err(GeometryError::TooFewPoints {
                        min: 3,
                        received: points.len(),
                    });
                }
                Ok(points.clone())
            }
        }
    }
}

/// Split a NACA designation into its digits.
fn parse_digits(designation: &str, expected: usize) -> Result<Vec<u8>, GeometryError> {
    let trimmed = designation.trim();
    let digits = trimmed
        .strip_prefix("naca")
        .or_else(|| trimmed.strip_prefix("NACA"))
        .unwrap_or(trimmed)
        .trim();
    if digits.len() != expected || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(GeometryError::InvalidDesignation(designation.to_owned()));
    }
    Ok(digits.bytes().map(|byte| byte - b'0').collect())
}

/// Mean line ordinate and slope of a NACA four-digit section.
fn naca4_camber(camber: f64, position: f64, x: f64) -> (f64, f64) {
    if camber == 0.0 {
        (0.0, 0.0)
    } else if x < position {
        (
            camber / position.powi(2) * (2.0 * position * x - x * x),
            2.0 * camber / position.powi(2) * (position - x),
        )
    } else {
        (
            camber / (1.0 - position).powi(2) * ((1.0 - 2.0 * position) + 2.0 * position * x - x * x),
            2.0 * camber / (1.0 - position).powi(2) * (position - x),
        )
    }
}

/// Mean line ordinate and slope of a standard NACA five-digit section.
///
/// `series` indexes the 210 to 250 mean lines, tabulated for a design lift
/// coefficient of 0.3 and scaled linearly to `design_lift`.
fn naca5_camber(series: usize, design_lift: f64, x: f64) -> (f64, f64) {
    /// Chordwise position of the mean line transition.
    const M: [f64; 5] = [0.0580, 0.1260, 0.2025, 0.2900, 0.3910];
    /// Mean line scale factor.
    const K1: [f64; 5] = [361.4, 51.640, 15.957, 6.643, 3.230];
    let m = M[series];
    let k1 = K1[series];
    let scale = design_lift / 0.3;
    if x < m {
        (
            scale * k1 / 6.0 * (x.powi(3) - 3.0 * m * x * x + m * m * (3.0 - m) * x),
            scale * k1 / 6.0 * (3.0 * x * x - 6.0 * m * x + m * m * (3.0 - m)),
        )
    } else {
        (
            scale * k1 * m.powi(3) / 6.0 * (1.0 - x),
            -scale * k1 * m.powi(3) / 6.0,
        )
    }
}

/// Half thickness of the NACA thickness distribution with a closed trailing edge.
fn naca_half_thickness(thickness: f64, x: f64) -> f64 {
    5.0 * thickness
        * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
            - 0.1036 * x.powi(4))
}

/// Build a closed outline from trailing edge over the upper surface, around
/// the leading edge and back along the lower surface.
fn airfoil_outline<F>(thickness: f64, mean_line: F) -> Vec<Point>
where
    F: Fn(f64) -> (f64, f64),
{
    let surface = |i: usize, upper: bool| {
        let beta = std::f64::consts::PI * i as f64 / NACA_SAMPLES as f64;
        let x = 0.5 * (1.0 - beta.cos());
        let (camber, slope) = mean_line(x);
        let half = naca_half_thickness(thickness, x);
        let theta = slope.atan();
        if upper {
            point(x - half * theta.sin(), camber + half * theta.cos())
        } else {
            point(x + half * theta.sin(), camber - half * theta.cos())
        }
    };
    (0..=NACA_SAMPLES)
        .rev()
        .map(|i| surface(i, true))
        .chain((1..=NACA_SAMPLES).map(|i| surface(i, false)))
        .collect()
}

/// Supplier of cross-section boundaries along the half span.
pub trait CrossSectionSource {
    /// Boundary of the section at distance `y` from midspan, in metres.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] when no valid boundary exists at `y`.
    fn cross_section(&self, y: f64) -> Result<CrossSection, GeometryError>;

    /// Full span of the plate in metres.
    fn span(&self) -> f64;

    /// Chord of the plate in metres.
    fn chord(&self) -> f64;
}

/// Main plate lofted through a list of profiles from midspan to tip.
#[derive(Clone, Debug)]
pub struct LoftedPlate {
    /// Resampled unit-chord outlines, midspan first.
    outlines: Vec<Vec<Point>>,
    /// Full span in metres.
    span: f64,
    /// Chord in metres.
    chord: f64,
    /// Pitch of the plate in radians.
    angle: f64,
}

impl LoftedPlate {
    /// Build the plate. Profiles are spaced equally over the half span.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewProfiles`] for fewer than two profiles,
    /// [`GeometryError::NonPositive`] for a non-positive span or chord and any
    /// error raised while generating the outlines.
    ///
    /// # Examples
    /// ```
    /// use spoilerx::{CrossSectionSource, LoftedPlate, SectionProfile};
    ///
    /// let plate = LoftedPlate::new(
    ///     &[SectionProfile::naca4("0012"), SectionProfile::naca4("0012")],
    ///     1.6,
    ///     0.3,
    ///     0.0,
    ///     120,
    /// )
    /// .expect("valid plate");
    /// let root = plate.cross_section(0.0).expect("root section");
    /// assert_eq!(root.points().len(), 120);
    /// ```
    pub fn new(
        profiles: &[SectionProfile],
        span: f64,
        chord: f64,
        angle_deg: f64,
        n_discretise: usize,
    ) -> Result<Self, GeometryError> {
        if profiles.len() < 2 {
            return Err(GeometryError::TooFewProfiles(profiles.len()));
        }
        for (name, value) in [("span", span), ("chord", chord)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositive { name, value });
            }
        }
        let outlines = profiles
            .iter()
            .map(|profile| resample_closed(&profile.outline()?, n_discretise))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            outlines,
            span,
            chord,
            angle: angle_deg.to_radians(),
        })
    }
}

impl CrossSectionSource for LoftedPlate {
    fn cross_section(&self, y: f64) -> Result<CrossSection, GeometryError> {
        let half_span = self.span / 2.0;
        let intervals = self.outlines.len() - 1;
        let position = (y / half_span).clamp(0.0, 1.0) * intervals as f64;
        let lower = (position.floor() as usize).min(intervals - 1);
        let fraction = position - lower as f64;
        let points = self.outlines[lower]
            .iter()
            .zip(&self.outlines[lower + 1])
            .map(|(&inner, &outer)| {
                let unit = inner.lerp(outer, fraction);
                point(unit.x * self.chord, unit.z * self.chord).rotated(-self.angle)
            })
            .collect();
        CrossSection::new(y, points)
    }

    fn span(&self) -> f64 {
        self.span
    }

    fn chord(&self) -> f64 {
        self.chord
    }
}
