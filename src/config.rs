//! JSON configuration of a sizing run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, GeometryError};
use crate::loads::{FlowConditions, StripTheory, SupportConfiguration};
use crate::material::Material;
use crate::profile::{LoftedPlate, SectionProfile};
use crate::sizing::SizingOptions;
use crate::weight::Attachments;

/// Struts carrying the plate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrutConfig {
    /// Distance of each strut from midspan as a fraction of the half span.
    pub lateral_fraction: f64,
    /// Number of struts.
    pub count: usize,
    /// Cant of the struts against the vertical in degrees.
    pub cant_deg: f64,
    /// Mass of each strut in kg.
    pub mass: f64,
}

impl Default for StrutConfig {
    fn default() -> Self {
        Self {
            lateral_fraction: 0.7,
            count: 2,
            cant_deg: 10.0,
            mass: 0.2,
        }
    }
}

/// Endplates closing the plate tips.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndplateConfig {
    /// Whether the spoiler has endplates.
    pub present: bool,
    /// Mass of each endplate in kg.
    pub mass: f64,
}

impl Default for EndplateConfig {
    fn default() -> Self {
        Self {
            present: true,
            mass: 0.1,
        }
    }
}

/// Geometry of the main plate and its fittings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateGeometry {
    /// Section profiles from midspan to tip, at least two.
    pub profiles: Vec<SectionProfile>,
    /// Full span in metres.
    pub span: f64,
    /// Chord in metres.
    pub chord: f64,
    /// Pitch of the plate in degrees.
    pub angle_deg: f64,
    /// Strut layout.
    pub struts: StrutConfig,
    /// Endplates.
    pub endplates: EndplateConfig,
}

impl Default for PlateGeometry {
    fn default() -> Self {
        Self {
            profiles: vec![SectionProfile::naca4("0012"), SectionProfile::naca4("0012")],
            span: 1.6,
            chord: 0.3,
            angle_deg: 0.0,
            struts: StrutConfig::default(),
            endplates: EndplateConfig::default(),
        }
    }
}

/// Complete description of a sizing run.
///
/// Every field may be omitted from the JSON text; missing values take the
/// defaults of a 1.6 m aluminium spoiler at 60 m/s.
///
/// # Examples
/// ```
/// use spoilerx::SpoilerConfig;
///
/// let config = SpoilerConfig::from_json_str(
///     r#"{ "geometry": { "span": 2.0 }, "flow": { "max_velocity": 80.0,
///          "air_density": 1.2, "angle_of_attack_deg": -8.0 } }"#,
/// )
/// .expect("valid configuration");
/// assert_eq!(config.geometry.span, 2.0);
/// assert_eq!(config.geometry.chord, 0.3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoilerConfig {
    /// Plate geometry.
    pub geometry: PlateGeometry,
    /// Material of skin, ribs and endplates.
    pub material: Material,
    /// Design load case.
    pub flow: FlowConditions,
    /// Built-in load model.
    pub aero: StripTheory,
    /// Sizing loop controls.
    pub sizing: SizingOptions,
}

impl SpoilerConfig {
    /// Parse and validate a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] or [`ConfigError::Sizing`] for values out of range.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`SpoilerConfig::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the values that cannot be checked by the type system.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geometry.profiles.len() < 2 {
            return Err(GeometryError::TooFewProfiles(self.geometry.profiles.len()).into());
        }
        self.supports()?;
        self.material
            .validate()
            .map_err(|error| ConfigError::Sizing(error.into()))?;
        self.sizing.validate()?;
        Ok(())
    }

    /// Main plate lofted through the configured profiles.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] for invalid profiles or dimensions.
    pub fn plate(&self) -> Result<LoftedPlate, GeometryError> {
        LoftedPlate::new(
            &self.geometry.profiles,
            self.geometry.span,
            self.geometry.chord,
            self.geometry.angle_deg,
            self.sizing.n_discretise,
        )
    }

    /// Strut positions along the span.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedStrutCount`] unless there are two
    /// struts and a [`GeometryError`] for a lateral fraction outside `(0, 1]`.
    pub fn supports(&self) -> Result<SupportConfiguration, GeometryError> {
        if self.geometry.struts.count != 2 {
            return Err(GeometryError::UnsupportedStrutCount(
                self.geometry.struts.count,
            ));
        }
        SupportConfiguration::new(
            self.geometry.span,
            self.geometry.struts.lateral_fraction,
            self.geometry.struts.cant_deg,
        )
    }

    /// Endplates and struts that add mass to the design.
    #[must_use]
    pub fn attachments(&self) -> Attachments {
        let endplates = self.geometry.endplates;
        Attachments {
            endplate_mass: endplates.present.then_some(endplates.mass),
            strut_mass: self.geometry.struts.mass,
            strut_count: self.geometry.struts.count,
        }
    }
}
