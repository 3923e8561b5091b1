//! Renderer abstraction
//!
//! The widget never builds or looks up visual elements itself. It asks a
//! `Renderer` to materialize one row per option and one header per group,
//! keeps the returned handles, and from then on addresses rows only through
//! those handles.
//!
//! ```text
//! ┌──────────────────────────┐   handles, visibility,   ┌──────────────────┐
//! │  Multiselect (widget)    │ ───────────────────────▶ │  Renderer        │
//! │  store, filter, merge    │   checked, scroll, paint │  (terminal, ...) │
//! └──────────────────────────┘ ◀─────────────────────── └──────────────────┘
//!                                  query text
//! ```
//!
//! The renderer also receives every new `DerivedState` through
//! [`Renderer::paint_selection`]; it subscribes once, not per row.

#[cfg(test)]
pub mod mock;

use crate::options::{Group, GroupState, OptionItem};
use crate::selection::DerivedState;

/// Handle to a materialized option row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub u64);

/// Handle to a materialized group header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupHandle(pub u64);

/// Visual side of a widget instance
pub trait Renderer {
    /// Create a row for `option` at `position` in store order
    fn materialize_row(&mut self, option: &OptionItem, position: usize) -> RowHandle;

    /// Create a header for `group`
    fn materialize_group(&mut self, group: &Group) -> GroupHandle;

    /// Destroy a row
    fn destroy_row(&mut self, row: RowHandle);

    /// Show or hide a row
    fn set_row_visible(&mut self, row: RowHandle, visible: bool);

    /// Show or hide a group header
    fn set_group_visible(&mut self, group: GroupHandle, visible: bool);

    /// Paint a row's checkbox
    fn set_row_checked(&mut self, row: RowHandle, checked: bool);

    /// Paint a group header's toggle control
    fn set_group_state(&mut self, group: GroupHandle, state: GroupState);

    /// Current text of the search field
    fn query_text(&self) -> String;

    /// Move the viewport
    fn set_scroll_offset(&mut self, offset: u32);

    /// Paint counter, summary text and pills
    fn paint_selection(&mut self, state: &DerivedState);

    /// Show or hide the overlay
    fn set_open(&mut self, open: bool);
}
