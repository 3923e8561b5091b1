//! Multipick CLI application entry point
//!
//! Runs a searchable checkbox multiselect over a JSON option list in the
//! terminal and prints what was picked.
//!
//! # Usage
//!
//! ```bash
//! # Pick from a local list, one id per line on stdout
//! multipick pick colors.json
//!
//! # Search a remote endpoint as you type, print a JSON array
//! multipick pick people.json --ajax-url http://localhost:8080/search --json
//!
//! # Write ~/.config/multipick/config.toml
//! multipick config init
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/multipick/config.toml` on Linux), overridden by `MULTIPICK_*`
//! environment variables and then by command-line flags.

use multipick::{
    MultipickError,
    backing::NativeList,
    cli::{Cli, Commands, ConfigCommands, PickArgs},
    config::WidgetConfig,
    logging::{LogConfig, init_logging},
    remote::{HttpSource, RemoteSource},
    tui::{self, Outcome, TerminalRenderer},
    widget::Multiselect,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

type Result<T> = std::result::Result<T, MultipickError>;

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(WidgetConfig::config_path()?),
    }
}

fn handle_pick_command(args: &PickArgs, config_file: &Path) -> Result<()> {
    let config = args.apply_to(WidgetConfig::load_from(config_file)?);

    let json = fs::read_to_string(&args.file)?;
    let list = NativeList::from_json(&json)?;

    let source = HttpSource::from_config(&config)
        .map(|source| Arc::new(source) as Arc<dyn RemoteSource>);

    let mut widget = Multiselect::builder()
        .selector(args.selector())
        .config(config)
        .backing(list)
        .renderer(TerminalRenderer::new())
        .build()?;

    info!(selector = widget.selector(), options = widget.store().len(), "starting picker");

    match tui::run(&mut widget, source)? {
        Outcome::Confirmed => {
            let selected = &widget.snapshot().selected_ids;
            if args.json {
                println!("{}", serde_json::to_string(selected)?);
            } else {
                for id in selected {
                    println!("{id}");
                }
            }
            Ok(())
        }
        Outcome::Aborted => {
            info!("picker aborted");
            Ok(())
        }
    }
}

fn handle_config_command(command: &ConfigCommands, config_file: &Path) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => {
            if config_file.exists() && !force {
                return Err(MultipickError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    config_file.display()
                )));
            }
            WidgetConfig::default().save_to(config_file)?;
            println!("Wrote {}", config_file.display());
        }
        ConfigCommands::Show => {
            let config = WidgetConfig::load_from(config_file)?;
            print!("{}", config.to_toml()?);
        }
        ConfigCommands::Path => {
            println!("{}", config_file.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // The picker owns the terminal, so stderr logging is only safe elsewhere.
    let quiet = matches!(cli.command, Commands::Pick(_));
    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_quiet(quiet);
    init_logging(&log_config)?;

    let config_file = config_path(&cli)?;

    match &cli.command {
        Commands::Pick(args) => handle_pick_command(args, &config_file),
        Commands::Config { command } => handle_config_command(command, &config_file),
    }
}
