//! orilabel - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use orilabel::cli::{Cli, Commands, ConfigCommands};
use orilabel::logging::{init_logging, LoggingGuard};
use orilabel::{Config, ManifestInputs};

use commands::label::LabelArgs;

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    let _logging = start_logging(&config);

    match cli.command {
        Commands::Label {
            folder,
            output,
            window,
            margin,
        } => commands::label::handle(
            &config,
            &folder,
            LabelArgs {
                output,
                window,
                margin,
            },
        ),
        Commands::Scan { folder } => commands::scan::handle(&config, &folder),
        Commands::Manifest {
            images,
            labels,
            transcripts,
            url_prefix,
            output,
            failed,
        } => commands::manifest::handle(
            ManifestInputs {
                images,
                labels,
                transcripts,
                url_prefix,
            },
            &output,
            &failed,
        ),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(&config_path),
        },
    }
}

/// Log setup failures are reported on stderr and otherwise ignored.
#[cfg(not(tarpaulin_include))]
fn start_logging(config: &Config) -> Option<LoggingGuard> {
    match init_logging(
        &config.log_directory(),
        &config.logging.file,
        &config.logging.level,
    ) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    }
}
