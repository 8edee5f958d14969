//! Profile export client
//!
//! Reads one serialized OpenTelemetry profile from disk and sends it to an
//! OTLP profiles collector.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use profile_export::config::{Config, DEFAULT_PATH, DEFAULT_TARGET};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "profile-export")]
#[command(about = "Send a serialized OpenTelemetry profile to an OTLP collector", long_about = None)]
#[command(version)]
struct Args {
    /// The server to connect to (e.g. localhost:50051)
    #[arg(allow_hyphen_values = true)]
    target: String,

    /// The path to the binary-encoded profile file
    #[arg(allow_hyphen_values = true)]
    path: PathBuf,

    /// Anything after the path is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            eprint!("{}", usage());
            std::process::exit(1);
        }
    };

    init_tracing();

    let config = Config::new(args.target, args.path);
    profile_export::run(config)
        .await
        .context("Profile export failed")?;

    Ok(())
}

fn usage() -> String {
    format!(
        "Usage: [target] [path]\n\
         \n  \
         target  The server to connect to. Defaults to {}\n  \
         path    The path to the profile file. Defaults to {}\n",
        DEFAULT_TARGET, DEFAULT_PATH
    )
}

/// Initialize tracing/logging
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
