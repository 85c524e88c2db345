mod cli;
mod commands;
mod config;
mod error;
mod naming;
mod pdf;
mod report;
mod sources;
mod volume_range;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info { path, naming } => {
            commands::info::run(&path, &naming.scheme())?;
        }
        Commands::Split {
            path,
            output_dir,
            skip_existing,
            naming,
        } => {
            let options = commands::split::SplitOptions {
                naming: naming.scheme(),
                skip_existing,
            };
            commands::split::run(&path, &output_dir, &options)?;
        }
        Commands::Batch {
            sources,
            config: config_path,
            output_dir,
            source_dir,
            template,
            volumes,
            limit,
            skip_existing,
            naming,
            report,
            manifest,
        } => {
            let file = match &config_path {
                Some(path) => config::load_from_path(path)?,
                None => config::ConfigFile::default(),
            };
            let overrides = config::Overrides {
                output_directory: output_dir,
                sources,
                source_dir,
                template,
                volumes,
                limit,
                skip_existing,
                strip_extension: naming.strip_extension,
                auto_padding: naming.auto_padding,
            };
            let batch = config::resolve(file, overrides)?;
            commands::batch::run(&batch, report.as_deref(), manifest.as_deref())?;
        }
    }

    Ok(())
}
