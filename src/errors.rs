//! Error types of the sizing pipeline, one enum per stage.

use thiserror::Error;

/// Error returned when the supplied geometry cannot describe a spoiler plate.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when fewer than two section profiles are supplied.
    #[error("at least two section profiles are required (received {0})")]
    TooFewProfiles(usize),
    /// Returned when the half span is cut into fewer than two stations.
    #[error("at least two spanwise stations are required (received {0})")]
    TooFewStations(usize),
    /// Returned when a cross-section is sampled with too few boundary points.
    #[error("at least {min} boundary points are required (received {received})")]
    TooFewPoints {
        /// Minimum number of points accepted.
        min: usize,
        /// Number of points supplied.
        received: usize,
    },
    /// Returned when a length-like quantity is zero, negative or not finite.
    #[error("{name} must be positive (received {value})")]
    NonPositive {
        /// Name of the rejected quantity.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the strut lateral location is outside (0, 1].
    #[error("strut lateral fraction must lie in (0, 1] (received {0})")]
    StrutFractionOutOfRange(f64),
    /// Returned when the plate is not carried by exactly one pair of struts.
    #[error("the plate must be carried by 2 struts (received {0})")]
    UnsupportedStrutCount(usize),
    /// Returned when two consecutive boundary points coincide.
    #[error("boundary point {index} coincides with its successor")]
    CoincidentPoints {
        /// Index of the first of the two coincident points.
        index: usize,
    },
    /// Returned when a NACA designation cannot be parsed.
    #[error("unsupported NACA designation '{0}'")]
    InvalidDesignation(String),
}

/// Error returned when a load distribution violates the contract with the solver.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LoadError {
    /// Returned when the lift, drag and position arrays differ in length.
    #[error("lift ({lift}), drag ({drag}) and position ({y}) arrays must have equal length")]
    LengthMismatch {
        /// Length of the lift array.
        lift: usize,
        /// Length of the drag array.
        drag: usize,
        /// Length of the position array.
        y: usize,
    },
    /// Returned when the strip positions do not increase strictly along the span.
    #[error("strip positions must increase strictly (violated at index {0})")]
    NonMonotonic(usize),
    /// Returned when a strip position lies outside the span.
    #[error("strip position {position} at index {index} lies outside the span [0, {span}]")]
    OutsideSpan {
        /// Index of the offending strip.
        index: usize,
        /// Offending position in metres.
        position: f64,
        /// Span in metres.
        span: f64,
    },
    /// Returned when the number of strips is odd, so the span has no midspan station.
    #[error("a symmetric full-span distribution needs an even strip count (received {0})")]
    OddStripCount(usize),
    /// Returned when the load strips do not fit the sectional stations.
    #[error("{strips} load strips do not match {stations} sectional stations")]
    StationMismatch {
        /// Number of load strips.
        strips: usize,
        /// Number of full-span sectional stations.
        stations: usize,
    },
    /// Returned when half-span strip forces do not cover the half-span strips.
    #[error("half-span lift ({lift}) and drag ({drag}) must both hold {expected} strips")]
    HalfSpanMismatch {
        /// Length of the half-span lift array.
        lift: usize,
        /// Length of the half-span drag array.
        drag: usize,
        /// Number of strips over the half span.
        expected: usize,
    },
    /// Returned when a force or position is NaN or infinite.
    #[error("non-finite value in load distribution at index {0}")]
    NonFinite(usize),
}

/// Error returned when a structural evaluation cannot be completed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the second moments of a station are ill-conditioned.
    #[error("section at station {station} is degenerate (Ixx*Izz - Ixz^2 = {determinant:e})")]
    DegenerateSection {
        /// Full-span index of the station.
        station: usize,
        /// Value of `Ixx * Izz - Ixz^2` in m^8.
        determinant: f64,
    },
    /// Returned when the material constants are not physically meaningful.
    #[error("material property {name} is invalid (received {value})")]
    InvalidMaterial {
        /// Name of the rejected property.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the geometry is invalid.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Returned when the loads are invalid.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Error returned by the sizing loop.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SizingError {
    /// Returned when no feasible design is found within the iteration budget.
    #[error(
        "sizing did not converge within {iterations} iterations \
         (last thickness {thickness} m, {rib_count} ribs)"
    )]
    NotConverged {
        /// Number of iterations performed.
        iterations: usize,
        /// Skin thickness of the last evaluated design in metres.
        thickness: f64,
        /// Rib count of the last evaluated design.
        rib_count: usize,
    },
    /// Returned when the sizing options are not usable.
    #[error("invalid sizing option {name} (received {value})")]
    InvalidOption {
        /// Name of the rejected option.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when an evaluation inside the loop fails.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl From<GeometryError> for SizingError {
    fn from(value: GeometryError) -> Self {
        Self::Analysis(AnalysisError::Geometry(value))
    }
}

impl From<LoadError> for SizingError {
    fn from(value: LoadError) -> Self {
        Self::Analysis(AnalysisError::Load(value))
    }
}

/// Error returned when reading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the configuration is not valid JSON for [`SpoilerConfig`](crate::SpoilerConfig).
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when a parsed value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] GeometryError),
    /// Returned when a sizing option is out of range.
    #[error("invalid configuration: {0}")]
    Sizing(#[from] SizingError),
}
