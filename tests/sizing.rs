#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use spoilerx::{
    size_spoiler, size_spoiler_with, AeroLoadSource, AnalysisError, GeometryError,
    LoadDistribution, Material, SectionProfile, SizingError, SizingLoop, SpanDiscretization,
    SpoilerConfig,
};

fn rib_starved_config() -> SpoilerConfig {
    let mut config = SpoilerConfig::default();
    config.geometry.span = 4.0;
    config.geometry.profiles = vec![
        SectionProfile::Rectangle { height_ratio: 0.05 },
        SectionProfile::Rectangle { height_ratio: 0.05 },
    ];
    config.geometry.struts.lateral_fraction = 0.5;
    config.flow.max_velocity = 40.0;
    config.sizing.initial_thickness = 0.005;
    config.sizing.initial_rib_count = 0;
    config.sizing.max_iterations = 200;
    config
}

#[test]
fn default_spoiler_is_sized() {
    let config = SpoilerConfig::default();
    let outcome = size_spoiler(&config).expect("default spoiler converges");

    assert!(outcome.thickness >= config.sizing.initial_thickness);
    assert!(outcome.rib_count >= config.sizing.initial_rib_count);
    assert!(!outcome.report.failed);
    assert!(!outcome.report.failed_due_to_ribs_only);
    assert!(outcome.report.modes.active().is_empty());
    assert!(outcome.total_mass > 0.0);
    assert_eq!(outcome.iterations, outcome.history.len());
    assert_relative_eq!(
        outcome.total_mass,
        outcome.masses.total(),
        max_relative = 1.0e-12
    );

    let summary = outcome.summary;
    assert!(summary.max_tensile <= config.material.yield_strength);
    assert!(summary.max_compressive <= summary.critical_compressive);
    assert!(summary.max_compressive <= summary.critical_column);
    assert!(summary.max_shear <= summary.critical_shear);
    assert!(summary.max_deflection <= 0.025 * config.geometry.span);
}

#[test]
fn struts_carry_the_downforce_and_weight() {
    let config = SpoilerConfig::default();
    let outcome = size_spoiler(&config).expect("default spoiler converges");
    let plate = config.plate().expect("valid plate");
    let sizing = SizingLoop::new(
        &plate,
        config.supports().expect("valid supports"),
        config.attachments(),
        config.material,
        config.sizing,
    )
    .expect("valid sizing loop");
    let loads = config
        .aero
        .load_distribution(&config.flow, config.geometry.chord, sizing.stations())
        .expect("strip theory loads");

    let weight = outcome.masses.structural() + 2.0 * config.geometry.endplates.mass;
    let vertical = loads.total_lift() - weight * spoilerx::GRAVITY;
    assert_relative_eq!(
        outcome.summary.strut_force_z,
        -vertical / 2.0,
        max_relative = 1.0e-9
    );
    assert_relative_eq!(
        outcome.summary.strut_force_x,
        -loads.total_drag() / 2.0,
        max_relative = 1.0e-9
    );
    assert!(outcome.summary.strut_force_z > 0.0);
}

#[test]
fn sizing_history_never_shrinks_the_design() {
    let outcome = size_spoiler(&rib_starved_config()).expect("rib starved spoiler converges");
    for pair in outcome.history.windows(2) {
        assert!(pair[1].thickness >= pair[0].thickness);
        assert!(pair[1].rib_count >= pair[0].rib_count);
        let grew_thicker = pair[1].thickness > pair[0].thickness;
        let gained_rib = pair[1].rib_count > pair[0].rib_count;
        assert!(grew_thicker != gained_rib, "exactly one variable changes per step");
    }
}

#[test]
fn column_buckling_alone_adds_a_rib() {
    let outcome = size_spoiler(&rib_starved_config()).expect("rib starved spoiler converges");
    let first = outcome.history.first().expect("at least one iteration");

    assert!(first.report.failed_due_to_ribs_only);
    assert!(!first.report.failed);
    assert_eq!(first.rib_count, 0);
    assert_eq!(outcome.rib_count, 1);
    assert_relative_eq!(outcome.thickness, 0.005, max_relative = 1.0e-12);
    assert_eq!(outcome.iterations, 2);
}

#[test]
fn unloaded_spoiler_converges_on_the_first_iteration() {
    let mut config = SpoilerConfig::default();
    config.geometry.endplates.mass = 0.0;
    let stations =
        SpanDiscretization::new(config.geometry.span, config.sizing.n_cuts).expect("stations");
    let outcome = size_spoiler_with(&config, &LoadDistribution::zero(&stations))
        .expect("unloaded spoiler converges");

    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.thickness, config.sizing.initial_thickness);
    assert_eq!(outcome.rib_count, config.sizing.initial_rib_count);
    assert!(outcome.summary.strut_force_z > 0.0);
}

#[test]
fn unattainable_strength_is_reported() {
    let mut config = SpoilerConfig::default();
    config.material = Material {
        yield_strength: 1.0,
        ..Material::aluminium()
    };
    config.sizing.max_iterations = 20;

    let error = size_spoiler(&config).expect_err("no thickness reaches 1 Pa");
    match error {
        SizingError::NotConverged {
            iterations,
            thickness,
            ..
        } => {
            assert_eq!(iterations, 20);
            assert_relative_eq!(thickness, 0.001 + 19.0 * 0.001, max_relative = 1.0e-12);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unattainable_shear_strength_is_reported() {
    let mut config = SpoilerConfig::default();
    config.material = Material {
        shear_strength: 1.0,
        ..Material::aluminium()
    };
    config.sizing.max_iterations = 20;

    let error = size_spoiler(&config).expect_err("no thickness reaches 1 Pa in shear");
    match error {
        SizingError::NotConverged {
            iterations,
            thickness,
            ..
        } => {
            assert_eq!(iterations, 20);
            assert_relative_eq!(thickness, 0.001 + 19.0 * 0.001, max_relative = 1.0e-12);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn single_strut_is_rejected() {
    let mut config = SpoilerConfig::default();
    config.geometry.struts.count = 1;

    let error = size_spoiler(&config).expect_err("the solver assumes a strut pair");
    assert!(matches!(
        error,
        SizingError::Analysis(AnalysisError::Geometry(GeometryError::UnsupportedStrutCount(1)))
    ));
}

#[test]
fn mismatched_loads_are_rejected() {
    let config = SpoilerConfig::default();
    let stations = SpanDiscretization::new(config.geometry.span, 5).expect("stations");
    let error = size_spoiler_with(&config, &LoadDistribution::zero(&stations))
        .expect_err("strip count differs from the sizing stations");
    assert!(matches!(error, SizingError::Analysis(_)));
}

#[test]
fn configuration_round_trips_through_json() {
    let config = rib_starved_config();
    let text = serde_json::to_string(&config).expect("configuration serialises");
    let parsed = SpoilerConfig::from_json_str(&text).expect("configuration parses");
    assert_eq!(parsed, config);
}
