//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **pick**: Load a JSON option list and pick from it in the terminal
//! - **config**: Write or show the configuration file
//!
//! # Examples
//!
//! ```bash
//! multipick pick colors.json --tags --counter
//! multipick pick people.json --ajax-url http://localhost:8080/search --json
//! multipick -vv --log-format json --log-file /tmp/multipick.log pick colors.json
//! multipick config init
//! ```

use crate::config::{ThemeChoice, WidgetConfig};
use crate::logging::LogFormat;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Theme names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeChoice {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Log output formats accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormatArg {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "multipick")]
#[command(about = "Searchable checkbox multiselect for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Append logs to this file (logs are discarded while the UI runs otherwise)
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log output format (json for machine parsing)
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Use this config file instead of the default one
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick options from a JSON option list
    #[command(visible_alias = "p")]
    Pick(PickArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PickArgs {
    /// JSON option list (`{ "multiple": true, "options": [...], "groups": [...] }`)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Remote search endpoint (enables remote mode)
    #[arg(long = "ajax-url", value_name = "URL")]
    pub ajax_url: Option<String>,

    /// Color theme
    #[arg(long = "theme", value_enum)]
    pub theme: Option<ThemeArg>,

    /// Show selected items as pills
    #[arg(long = "tags")]
    pub tags: bool,

    /// Show a selection counter
    #[arg(long = "counter")]
    pub counter: bool,

    /// Enable the select all / select none toolbar
    #[arg(long = "toolbar")]
    pub toolbar: bool,

    /// Print the selected ids as a JSON array
    #[arg(long = "json")]
    pub json: bool,
}

impl PickArgs {
    /// Layer the command-line overrides on top of a loaded configuration
    ///
    /// Flags only ever switch features on; options left out keep the
    /// configured value.
    #[must_use]
    pub fn apply_to(&self, mut config: WidgetConfig) -> WidgetConfig {
        if let Some(url) = &self.ajax_url {
            config.ajax_url = Some(url.clone());
        }
        if let Some(theme) = self.theme {
            config.theme = theme.into();
        }
        config.multi_tags |= self.tags;
        config.multi_counter |= self.counter;
        config.toolbar |= self.toolbar;
        config
    }

    /// Selector naming this instance in logs
    #[must_use]
    pub fn selector(&self) -> String {
        let stem = self
            .file
            .file_stem()
            .map_or_else(|| "options".to_string(), |s| s.to_string_lossy().into_owned());
        format!("#{stem}")
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
