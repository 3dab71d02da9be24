//! Aerodynamic load distributions and the strut supports that react them.

use serde::{Deserialize, Serialize};

use crate::errors::{GeometryError, LoadError};
use crate::span::{mirror_strips, SpanDiscretization};

/// Lift and drag force on every spanwise strip, tip to tip.
///
/// Forces are already integrated over each strip, so the entries are in
/// newtons. Positive lift acts along `+z`, positive drag along `+x`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoadDistribution {
    /// Lift force of every strip in N.
    lift: Vec<f64>,
    /// Drag force of every strip in N.
    drag: Vec<f64>,
    /// Strip centres measured from the first tip in metres.
    y: Vec<f64>,
}

impl LoadDistribution {
    /// Create a distribution from strip forces and strip positions.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::LengthMismatch`] when the arrays differ in length,
    /// [`LoadError::NonFinite`] for NaN or infinite entries and
    /// [`LoadError::NonMonotonic`] when the positions do not increase strictly.
    pub fn new(lift: Vec<f64>, drag: Vec<f64>, y: Vec<f64>) -> Result<Self, LoadError> {
        if lift.len() != drag.len() || lift.len() != y.len() {
            return Err(LoadError::LengthMismatch {
                lift: lift.len(),
                drag: drag.len(),
                y: y.len(),
            });
        }
        if let Some(index) = (0..y.len())
            .find(|&i| !(lift[i].is_finite() && drag[i].is_finite() && y[i].is_finite()))
        {
            return Err(LoadError::NonFinite(index));
        }
        if let Some(index) = y.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(LoadError::NonMonotonic(index + 1));
        }
        Ok(Self { lift, drag, y })
    }

    /// Mirror half-span strip forces, midspan first, onto the strips of `stations`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::HalfSpanMismatch`] when either half-span array
    /// differs from the number of half-span strips.
    pub fn from_half_span(
        lift: &[f64],
        drag: &[f64],
        stations: &SpanDiscretization,
    ) -> Result<Self, LoadError> {
        let strips = stations.strip_count() / 2;
        if lift.len() != strips || drag.len() != strips {
            return Err(LoadError::HalfSpanMismatch {
                lift: lift.len(),
                drag: drag.len(),
                expected: strips,
            });
        }
        Self::new(
            mirror_strips(lift),
            mirror_strips(drag),
            stations.strip_centres(),
        )
    }

    /// Unloaded strips of `stations`.
    #[must_use]
    pub fn zero(stations: &SpanDiscretization) -> Self {
        let count = stations.strip_count();
        Self {
            lift: vec![0.0; count],
            drag: vec![0.0; count],
            y: stations.strip_centres(),
        }
    }

    /// Check that the strips fit between the stations of `stations`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::OddStripCount`], [`LoadError::StationMismatch`] or
    /// [`LoadError::OutsideSpan`] when the strips cannot be paired with the stations.
    pub fn check_against(&self, stations: &SpanDiscretization) -> Result<(), LoadError> {
        if self.y.len() % 2 != 0 {
            return Err(LoadError::OddStripCount(self.y.len()));
        }
        if self.y.len() != stations.strip_count() {
            return Err(LoadError::StationMismatch {
                strips: self.y.len(),
                stations: stations.full_len(),
            });
        }
        let span = stations.span();
        if let Some((index, &position)) = self
            .y
            .iter()
            .enumerate()
            .find(|&(_, &position)| !(0.0..=span).contains(&position))
        {
            return Err(LoadError::OutsideSpan {
                index,
                position,
                span,
            });
        }
        Ok(())
    }

    /// Lift force per strip in newtons.
    #[must_use]
    pub fn lift(&self) -> &[f64] {
        &self.lift
    }

    /// Drag force per strip in newtons.
    #[must_use]
    pub fn drag(&self) -> &[f64] {
        &self.drag
    }

    /// Strip positions measured from the first tip in metres.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of strips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the distribution has no strips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Sum of the strip lift forces.
    #[must_use]
    pub fn total_lift(&self) -> f64 {
        self.lift.iter().sum()
    }

    /// Sum of the strip drag forces.
    #[must_use]
    pub fn total_drag(&self) -> f64 {
        self.drag.iter().sum()
    }
}

/// Two struts placed symmetrically about midspan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupportConfiguration {
    /// Position of the first strut measured from the first tip in metres.
    pub strut_location_1: f64,
    /// Position of the second strut measured from the first tip in metres.
    pub strut_location_2: f64,
    /// Cant of the struts against the vertical in radians.
    pub cant: f64,
}

impl SupportConfiguration {
    /// Place the struts at `span / 2 * (1 -+ lateral_fraction)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::StrutFractionOutOfRange`] unless
    /// `lateral_fraction` lies in `(0, 1]` and [`GeometryError::NonPositive`]
    /// for a non-positive span.
    ///
    /// # Examples
    /// ```
    /// use spoilerx::SupportConfiguration;
    ///
    /// let supports = SupportConfiguration::new(1.6, 0.5, 0.0).expect("valid supports");
    /// assert!((supports.strut_location_1 - 0.4).abs() < 1.0e-12);
    /// assert!((supports.strut_location_2 - 1.2).abs() < 1.0e-12);
    /// ```
    pub fn new(span: f64, lateral_fraction: f64, cant_deg: f64) -> Result<Self, GeometryError> {
        if !(span.is_finite() && span > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "span",
                value: span,
            });
        }
        if !(lateral_fraction > 0.0 && lateral_fraction <= 1.0) {
            return Err(GeometryError::StrutFractionOutOfRange(lateral_fraction));
        }
        Ok(Self {
            strut_location_1: span / 2.0 * (1.0 - lateral_fraction),
            strut_location_2: span / 2.0 * (1.0 + lateral_fraction),
            cant: cant_deg.to_radians(),
        })
    }

    /// Both strut positions, first tip side first.
    #[must_use]
    pub fn locations(&self) -> [f64; 2] {
        [self.strut_location_1, self.strut_location_2]
    }
}

/// Free-stream conditions of the worst-case load case.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConditions {
    /// Top speed of the car in m/s.
    pub max_velocity: f64,
    /// Air density in kg/m^3.
    pub air_density: f64,
    /// Angle of attack of the plate in degrees.
    pub angle_of_attack_deg: f64,
}

impl Default for FlowConditions {
    fn default() -> Self {
        Self {
            max_velocity: 60.0,
            air_density: 1.225,
            angle_of_attack_deg: -10.0,
        }
    }
}

/// Supplier of the strip forces acting on the plate.
///
/// Panel-method results computed elsewhere enter the sizing through this
/// trait; [`StripTheory`] is the built-in estimate.
pub trait AeroLoadSource {
    /// Strip forces on the strips of `stations` for a plate of chord `chord`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when no distribution matching `stations` can be produced.
    fn load_distribution(
        &self,
        flow: &FlowConditions,
        chord: f64,
        stations: &SpanDiscretization,
    ) -> Result<LoadDistribution, LoadError>;
}

impl AeroLoadSource for LoadDistribution {
    fn load_distribution(
        &self,
        _flow: &FlowConditions,
        _chord: f64,
        stations: &SpanDiscretization,
    ) -> Result<LoadDistribution, LoadError> {
        self.check_against(stations)?;
        Ok(self.clone())
    }
}

/// Spanwise shape of the strip-theory loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanLoading {
    /// Equal force on every strip.
    #[default]
    Uniform,
    /// Force proportional to an ellipse vanishing at both tips.
    Elliptic,
}

/// Lift and drag estimate from linear section coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripTheory {
    /// Lift coefficient at zero angle of attack.
    pub cl_0: f64,
    /// Lift curve slope per radian.
    pub cl_alpha: f64,
    /// Zero-lift drag coefficient.
    pub cd_0: f64,
    /// Induced drag factor applied to `CL^2`.
    pub cd_k: f64,
    /// Factor applied to the top speed for the design load case.
    pub safety_factor: f64,
    /// Spanwise shape of the loading.
    pub distribution: SpanLoading,
}

impl Default for StripTheory {
    fn default() -> Self {
        Self {
            cl_0: 0.0,
            cl_alpha: 5.5,
            cd_0: 0.01,
            cd_k: 0.05,
            safety_factor: 1.25,
            distribution: SpanLoading::Uniform,
        }
    }
}

impl StripTheory {
    /// Lift and drag coefficients at `angle_of_attack_deg`.
    #[must_use]
    pub fn coefficients(&self, angle_of_attack_deg: f64) -> (f64, f64) {
        let cl = self.cl_0 + self.cl_alpha * angle_of_attack_deg.to_radians();
        (cl, self.cd_0 + self.cd_k * cl * cl)
    }

    /// Dynamic pressure of the design load case in Pa.
    #[must_use]
    pub fn dynamic_pressure(&self, flow: &FlowConditions) -> f64 {
        0.5 * flow.air_density * (flow.max_velocity * self.safety_factor).powi(2)
    }

    /// Fraction of the total force carried by every strip.
    fn strip_weights(&self, stations: &SpanDiscretization) -> Vec<f64> {
        let count = stations.strip_count();
        match self.distribution {
            SpanLoading::Uniform => vec![1.0 / count as f64; count],
            SpanLoading::Elliptic => {
                // Integral of sqrt(1 - u^2), scaled so the whole span integrates to one.
                let primitive = |u: f64| {
                    let u = u.clamp(-1.0, 1.0);
                    (u * (1.0 - u * u).sqrt() + u.asin()) / std::f64::consts::PI
                };
                let full = stations.full_span();
                let half_span = stations.span() / 2.0;
                full.windows(2)
                    .map(|pair| {
                        primitive((pair[1] - half_span) / half_span)
                            - primitive((pair[0] - half_span) / half_span)
                    })
                    .collect()
            }
        }
    }
}

impl AeroLoadSource for StripTheory {
    fn load_distribution(
        &self,
        flow: &FlowConditions,
        chord: f64,
        stations: &SpanDiscretization,
    ) -> Result<LoadDistribution, LoadError> {
        let (cl, cd) = self.coefficients(flow.angle_of_attack_deg);
        let force = self.dynamic_pressure(flow) * stations.span() * chord;
        let weights = self.strip_weights(stations);
        log::debug!(
            "strip theory: CL = {cl:.3}, CD = {cd:.4}, total lift {:.1} N",
            force * cl
        );
        LoadDistribution::new(
            weights.iter().map(|weight| weight * force * cl).collect(),
            weights.iter().map(|weight| weight * force * cd).collect(),
            stations.strip_centres(),
        )
    }
}
