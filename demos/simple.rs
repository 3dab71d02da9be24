use spoilerx::{render_summary, size_spoiler, SpoilerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SpoilerConfig::default();
    config.geometry.span = 1.4;
    config.flow.max_velocity = 70.0;

    let outcome = size_spoiler(&config)?;
    print!("{}", render_summary(&outcome));

    Ok(())
}
