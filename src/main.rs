//! celedit CLI
//!
//! Command-line interface for the celedit cel editing engine.

use anyhow::Context as _;
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use celedit::cli::commands::{self, ClearTarget, NewDocumentOptions};
use celedit::cli::{Cli, Commands};
use celedit::{CelEditError, EditorConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    debug!("Config: {:?}", config);

    match cli.command {
        Some(cmd) => handle_command(cmd, &config).map_err(|e| {
            error!("[{}] {}", e.error_code(), e);
            if let Some(suggestion) = e.recovery_suggestion() {
                eprintln!("Hint: {}", suggestion);
            }
            anyhow::Error::new(e)
        }),
        None => {
            println!("celedit v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: &EditorConfig) -> Result<(), CelEditError> {
    match cmd {
        Commands::New {
            path,
            width,
            height,
            frames,
            layers,
            groups,
        } => commands::create_document(
            &path,
            NewDocumentOptions {
                width,
                height,
                frames,
                image_layers: layers,
                group_layers: groups,
            },
        ),
        Commands::ClearCel {
            path,
            layers,
            frames,
            layer,
            frame,
        } => {
            let target = ClearTarget {
                layers: layers.as_deref(),
                frames: frames.as_deref(),
                layer,
                frame,
            };
            commands::clear_cel(&path, &target, config)
        }
        Commands::Lock { path, layer } => {
            commands::set_layer_editable(&path, layer, false, config)
        }
        Commands::Unlock { path, layer } => {
            commands::set_layer_editable(&path, layer, true, config)
        }
        Commands::Undo { path } => commands::undo(&path, config),
        Commands::Redo { path } => commands::redo(&path, config),
        Commands::History { path } => commands::show_history(&path, config),
        Commands::PrintState { path } => commands::print_state(&path, config),
    }
}
