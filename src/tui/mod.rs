//! Terminal host for the widget (ratatui + crossterm)
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │  app::run (event loop, fetch workers)  │
//! └───────────────────┬────────────────────┘
//!                     │ actions
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │  Multiselect<_, TerminalRenderer>      │
//! └───────────────────┬────────────────────┘
//!                     │ Renderer calls
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │  TerminalRenderer (row model)  ──────▶ widgets (drawing)
//! └────────────────────────────────────────┘
//! ```
//!
//! # Keys
//!
//! - typing / Backspace edit the query; Backspace on an empty query removes
//!   the last pill
//! - ↑/↓ move the cursor
//! - TAB, or Space on an empty query, toggles the row or group header under
//!   the cursor
//! - Ctrl-G toggles the group of the row under the cursor
//! - on a closed dropdown, ↑/↓, TAB, Space and Ctrl-G only open it
//! - Ctrl-A / Ctrl-N select all / none when the toolbar is enabled
//! - ESC closes the dropdown, or aborts when it is already closed
//! - Enter confirms
//! - a click outside the widget closes the dropdown, a click on the search
//!   field opens it

mod app;
pub mod error;
mod events;
mod renderer;
mod theme;
mod widgets;

pub use app::{Outcome, run};
pub use error::TuiError;
pub use events::{Action, EventResult, HitAreas, apply, map_event, map_key};
pub use renderer::{CursorTarget, Entry, GroupHeader, Row, TerminalRenderer};
pub use theme::Theme;
