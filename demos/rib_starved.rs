use spoilerx::{
    render_stations, render_summary, AeroLoadSource, SectionProfile, SizingLoop, SpoilerConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A long, shallow plate without intermediate ribs buckles as a column first.
    let mut config = SpoilerConfig::default();
    config.geometry.span = 4.0;
    config.geometry.profiles = vec![SectionProfile::Rectangle { height_ratio: 0.05 }; 2];
    config.geometry.struts.lateral_fraction = 0.5;
    config.flow.max_velocity = 40.0;
    config.sizing.initial_thickness = 0.005;
    config.sizing.initial_rib_count = 0;

    let plate = config.plate()?;
    let sizing = SizingLoop::new(
        &plate,
        config.supports()?,
        config.attachments(),
        config.material,
        config.sizing,
    )?;
    let loads = config
        .aero
        .load_distribution(&config.flow, config.geometry.chord, sizing.stations())?;
    let outcome = sizing.run(&loads)?;
    print!("{}", render_summary(&outcome));

    let design = sizing.evaluate(outcome.thickness, outcome.rib_count, &loads)?;
    print!("{}", render_stations(&design.stress));

    Ok(())
}
