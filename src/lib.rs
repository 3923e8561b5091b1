//! Multipick - selection-state sync and merge engine for searchable
//! checkbox multiselect widgets
//!
//! A widget instance mirrors an existing list control (the backing control),
//! lets the user filter it with a text query, toggle options one at a time,
//! per group or all at once, and optionally pulls matching options from a
//! remote search endpoint. Every mutation is written back to the backing
//! control with exactly one change notification, and remote results are
//! merged without ever dropping a selected option.
//!
//! # Modules
//!
//! - [`options`] - option store, ids and groups
//! - [`filter`] - query matching and visibility
//! - [`selection`] - toggles, snapshots and derived display state
//! - [`remote`] - wire format, HTTP source, sequencing and merge
//! - [`dropdown`] - open/closed state machine
//! - [`backing`] / [`render`] - the two collaborator contracts
//! - [`widget`] - the per-instance state object tying it all together
//! - [`tui`] - a terminal host built on ratatui

use thiserror::Error;

pub mod backing;
pub mod cli;
pub mod config;
pub mod dropdown;
pub mod filter;
pub mod logging;
pub mod options;
pub mod remote;
pub mod render;
pub mod selection;
pub mod tui;
pub mod widget;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MultipickError {
    /// Widget construction error
    #[error("Widget error: {0}")]
    Widget(#[from] widget::WidgetError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Option list could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Terminal UI error
    #[error("Terminal error: {0}")]
    Tui(#[from] tui::TuiError),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
