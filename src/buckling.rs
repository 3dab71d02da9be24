//! Critical buckling stresses of the skin panels and of the plate as a column.

use serde::Serialize;

use crate::material::Material;
use crate::sections::SectionalProperties;

/// Buckling coefficient of a compressed skin panel.
pub const COMPRESSION_COEFFICIENT: f64 = 6.0;

/// Buckling coefficient of a skin panel in shear.
pub const SHEAR_COEFFICIENT: f64 = 7.5;

/// Critical stresses of one design in Pa.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BucklingModel {
    /// Spanwise length of a skin panel between ribs in metres.
    pub panel_length: f64,
    /// Chordwise width of a skin panel in metres.
    pub panel_width: f64,
    /// Critical compressive buckling stress of a panel.
    pub compressive: f64,
    /// Critical shear buckling stress of a panel.
    pub shear: f64,
    /// Euler buckling stress of the plate between ribs.
    pub column: f64,
}

impl BucklingModel {
    /// Evaluate the critical stresses for the given span, chord and rib count.
    #[must_use]
    pub fn evaluate(
        properties: &SectionalProperties,
        material: &Material,
        span: f64,
        chord: f64,
        rib_count: usize,
    ) -> Self {
        let panel_length = span / (rib_count + 2) as f64;
        let panel_width = chord;
        let shear_width = panel_width.min(panel_length);
        let thickness = properties.thickness();
        let plate = std::f64::consts::PI.powi(2) * material.plate_stiffness();

        let compressive = COMPRESSION_COEFFICIENT * plate * (thickness / panel_width).powi(2);
        let shear = SHEAR_COEFFICIENT * plate * (thickness / shear_width).powi(2);
        let least_inertia = properties.mean_izz().min(properties.mean_ixx());
        let column = std::f64::consts::PI.powi(2) * material.youngs_modulus * least_inertia
            / (panel_length.powi(2) * properties.mean_area());
        log::debug!(
            "critical stresses: {compressive:.3e} Pa compression, {shear:.3e} Pa shear, \
             {column:.3e} Pa column"
        );

        Self {
            panel_length,
            panel_width,
            compressive,
            shear,
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::profile::{LoftedPlate, SectionProfile};
    use crate::span::SpanDiscretization;

    fn properties(thickness: f64) -> SectionalProperties {
        let profile = SectionProfile::Rectangle { height_ratio: 0.2 };
        let plate = LoftedPlate::new(&[profile.clone(), profile], 1.6, 0.3, 0.0, 60)
            .expect("valid plate");
        let stations = SpanDiscretization::new(1.6, 5).expect("valid discretisation");
        let half = SectionalProperties::sample(&plate, &stations).expect("sections sampled");
        SectionalProperties::compute(&half, &stations, thickness, 1).expect("properties")
    }

    #[test]
    fn panel_buckling_follows_plate_formula() {
        let material = Material::aluminium();
        let model = BucklingModel::evaluate(&properties(0.001), &material, 1.6, 0.3, 1);
        let factor = std::f64::consts::PI.powi(2) * 70.0e9 / (12.0 * (1.0 - 0.33_f64.powi(2)));
        assert_relative_eq!(model.panel_length, 1.6 / 3.0, max_relative = 1.0e-12);
        let slenderness = (0.001_f64 / 0.3).powi(2);
        assert_relative_eq!(model.compressive, 6.0 * factor * slenderness, max_relative = 1.0e-12);
        assert_relative_eq!(model.shear, 7.5 * factor * slenderness, max_relative = 1.0e-12);
    }

    #[test]
    fn short_panels_buckle_in_shear_across_their_length() {
        let material = Material::aluminium();
        let model = BucklingModel::evaluate(&properties(0.001), &material, 1.6, 0.3, 8);
        assert_relative_eq!(model.panel_length, 0.16, max_relative = 1.0e-12);
        let ratio = model.shear / model.compressive;
        assert_relative_eq!(ratio, 7.5 / 6.0 * (0.3_f64 / 0.16).powi(2), max_relative = 1.0e-12);
    }

    #[test]
    fn more_ribs_raise_the_column_stress() {
        let material = Material::aluminium();
        let properties = properties(0.002);
        let few = BucklingModel::evaluate(&properties, &material, 1.6, 0.3, 0);
        let many = BucklingModel::evaluate(&properties, &material, 1.6, 0.3, 2);
        assert_relative_eq!(many.column / few.column, 4.0, max_relative = 1.0e-12);
        assert_relative_eq!(many.compressive, few.compressive);
    }
}
