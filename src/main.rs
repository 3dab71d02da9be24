use std::error::Error;
use std::process::ExitCode;

use spoilerx::{render_summary, size_spoiler, SpoilerConfig};

/// Command-line arguments.
struct Args {
    /// Path of the JSON configuration, defaults when absent.
    config: Option<String>,
    /// Print the outcome as JSON instead of text.
    json: bool,
}

/// Read the command line. An empty error message asks for the usage text only.
fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        json: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => args.json = true,
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with('-') => return Err(format!("unknown option '{flag}'")),
            path if args.config.is_none() => args.config = Some(path.to_owned()),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }
    Ok(args)
}

/// Size the configured spoiler and print the outcome.
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    // Without a file the built-in 1.6 m aluminium spoiler is sized.
    let config = match &args.config {
        Some(path) => SpoilerConfig::load(path)?,
        None => SpoilerConfig::default(),
    };
    let outcome = size_spoiler(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_summary(&outcome));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            eprintln!("usage: spoilerx [CONFIG.json] [--json]");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
