#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod bending;
pub mod buckling;
pub mod config;
pub mod errors;
pub mod failure;
pub mod geometry;
pub mod loads;
pub mod material;
pub mod profile;
pub mod report;
pub mod sections;
pub mod sizing;
pub mod span;
pub mod stress;
pub mod weight;

pub use crate::bending::{BeamBendingSolver, BeamState, BeamStation, SelfWeight, GRAVITY};
pub use crate::buckling::BucklingModel;
pub use crate::config::{EndplateConfig, PlateGeometry, SpoilerConfig, StrutConfig};
pub use crate::errors::{AnalysisError, ConfigError, GeometryError, LoadError, SizingError};
pub use crate::failure::{DesignResponse, FailureClassifier, FailureModes, FailureReport};
pub use crate::geometry::{point, CrossSection, Point, Segment};
pub use crate::loads::{
    AeroLoadSource, FlowConditions, LoadDistribution, SpanLoading, StripTheory,
    SupportConfiguration,
};
pub use crate::material::Material;
pub use crate::profile::{CrossSectionSource, LoftedPlate, SectionProfile};
pub use crate::report::{render_stations, render_summary};
pub use crate::sections::{SectionalProperties, SectionalState};
pub use crate::sizing::{
    size_spoiler, size_spoiler_with, DesignEvaluation, SizingIteration, SizingLoop,
    SizingOptions, SizingOutcome, StressSummary,
};
pub use crate::span::{mirror, mirror_strips, nearest_index, SpanDiscretization};
pub use crate::stress::{navier_stress, shear_flow, StationStress, StressEngine, StressField};
pub use crate::weight::{Attachments, MassBreakdown};
