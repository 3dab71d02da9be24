//! Isotropic skin material.

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Material constants of the skin, ribs and endplates in SI units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Young's modulus in Pa.
    pub youngs_modulus: f64,
    /// Tensile yield strength in Pa.
    pub yield_strength: f64,
    /// Shear strength in Pa.
    pub shear_strength: f64,
    /// Density in kg/m^3.
    pub density: f64,
    /// Poisson's ratio.
    pub poisson_ratio: f64,
}

impl Material {
    /// Aluminium alloy typical of sheet-metal spoilers.
    #[must_use]
    pub const fn aluminium() -> Self {
        Self {
            youngs_modulus: 70.0e9,
            yield_strength: 225.0e6,
            shear_strength: 225.0e6,
            density: 2700.0,
            poisson_ratio: 0.33,
        }
    }

    /// Check that every constant is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidMaterial`] naming the first offending property.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (name, value) in [
            ("youngs_modulus", self.youngs_modulus),
            ("yield_strength", self.yield_strength),
            ("shear_strength", self.shear_strength),
            ("density", self.density),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalysisError::InvalidMaterial { name, value });
            }
        }
        if !(self.poisson_ratio >= 0.0 && self.poisson_ratio < 0.5) {
            return Err(AnalysisError::InvalidMaterial {
                name: "poisson_ratio",
                value: self.poisson_ratio,
            });
        }
        Ok(())
    }

    /// `E / (12 (1 - nu^2))`, the plate stiffness factor used by the buckling formulas.
    #[must_use]
    pub fn plate_stiffness(&self) -> f64 {
        self.youngs_modulus / (12.0 * (1.0 - self.poisson_ratio.powi(2)))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::aluminium()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aluminium_is_valid() {
        assert!(Material::aluminium().validate().is_ok());
    }

    #[test]
    fn incompressible_poisson_ratio_is_rejected() {
        let material = Material {
            poisson_ratio: 0.5,
            ..Material::aluminium()
        };
        assert_eq!(
            material.validate(),
            Err(AnalysisError::InvalidMaterial {
                name: "poisson_ratio",
                value: 0.5
            })
        );
    }
}
