//! Mass estimate of a sized spoiler.

use serde::Serialize;

use crate::sections::SectionalProperties;

/// Parts that are not sized but add to the mass, in kg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Attachments {
    /// Mass of each endplate, `None` when the spoiler has no endplates.
    pub endplate_mass: Option<f64>,
    /// Mass of each strut.
    pub strut_mass: f64,
    /// Number of struts.
    pub strut_count: usize,
}

/// Mass of every component in kg.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MassBreakdown {
    /// Skin of the main plate.
    pub main_plate: f64,
    /// Internal ribs.
    pub ribs: f64,
    /// Both endplates.
    pub endplates: f64,
    /// All struts.
    pub struts: f64,
}

impl MassBreakdown {
    /// Estimate the masses of a design built from material of `density` in kg/m^3.
    ///
    /// The skin area is the perimeter integrated over the span. Ribs are flat
    /// plates of the skin thickness filling their section; the two end-cap
    /// ribs are left out when endplates close the plate instead.
    #[must_use]
    pub fn estimate(
        properties: &SectionalProperties,
        density: f64,
        attachments: &Attachments,
    ) -> Self {
        let thickness = properties.thickness();
        let skin_area: f64 = properties
            .sections()
            .windows(2)
            .map(|pair| {
                0.5 * (pair[0].perimeter() + pair[1].perimeter()) * (pair[1].y() - pair[0].y())
            })
            .sum();

        let rib_areas = properties.rib_areas();
        let rib_area: f64 = if attachments.endplate_mass.is_some() && rib_areas.len() >= 2 {
            rib_areas[1..rib_areas.len() - 1].iter().sum()
        } else {
            rib_areas.iter().sum()
        };

        Self {
            main_plate: skin_area * thickness * density,
            ribs: rib_area * thickness * density,
            endplates: 2.0 * attachments.endplate_mass.unwrap_or(0.0),
            struts: attachments.strut_mass * attachments.strut_count as f64,
        }
    }

    /// Mass carried by the plate itself, skin and ribs.
    #[must_use]
    pub fn structural(&self) -> f64 {
        self.main_plate + self.ribs
    }

    /// Mass of the whole spoiler.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.main_plate + self.ribs + self.endplates + self.struts
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::profile::{LoftedPlate, SectionProfile};
    use crate::span::SpanDiscretization;

    fn box_properties(rib_count: usize) -> SectionalProperties {
        let profile = SectionProfile::Rectangle { height_ratio: 0.2 };
        // 25 samples put a point on every corner of the box.
        let plate = LoftedPlate::new(&[profile.clone(), profile], 2.0, 0.3, 0.0, 25)
            .expect("valid plate");
        let stations = SpanDiscretization::new(2.0, 3).expect("valid discretisation");
        let half = SectionalProperties::sample(&plate, &stations).expect("sections sampled");
        SectionalProperties::compute(&half, &stations, 0.002, rib_count).expect("properties")
    }

    #[test]
    fn skin_mass_is_perimeter_times_span() {
        let masses =
            MassBreakdown::estimate(&box_properties(0), 2700.0, &Attachments::default());
        let skin = 0.72 * 2.0 * 0.002 * 2700.0;
        assert_relative_eq!(masses.main_plate, skin, max_relative = 1.0e-9);
        assert_relative_eq!(masses.ribs, 2.0 * 0.018 * 0.002 * 2700.0, max_relative = 1.0e-9);
        assert_eq!(masses.endplates, 0.0);
    }

    #[test]
    fn endplates_replace_the_end_cap_ribs() {
        let attachments = Attachments {
            endplate_mass: Some(0.4),
            strut_mass: 0.25,
            strut_count: 2,
        };
        let masses = MassBreakdown::estimate(&box_properties(1), 2700.0, &attachments);
        assert_relative_eq!(masses.ribs, 0.018 * 0.002 * 2700.0, max_relative = 1.0e-9);
        assert_relative_eq!(masses.endplates, 0.8);
        assert_relative_eq!(masses.struts, 0.5);
        assert_relative_eq!(
            masses.total(),
            masses.structural() + 1.3,
            max_relative = 1.0e-12
        );
    }
}
