//! Sensor transformation - Main Entry Point

use clap::Parser;
use sensor_transform::cli::{cmd_inspect, cmd_run, cmd_transform, Cli, Commands};
use sensor_transform::pipeline::run_timestamp;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn init_logging(log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sensor_transform=info".into());

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file = File::create(dir.join(format!("{}.log", run_timestamp())))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_dir.as_deref())?;

    match &cli.command {
        Commands::Run(args) => cmd_run(args)?,
        Commands::Transform { object, data, output } => cmd_transform(object, data, output)?,
        Commands::Inspect { array } => cmd_inspect(array)?,
    }

    Ok(())
}
