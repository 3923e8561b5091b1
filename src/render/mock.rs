//! Recording renderer for testing

use super::{GroupHandle, Renderer, RowHandle};
use crate::options::{Group, GroupId, GroupState, OptionId, OptionItem};
use crate::selection::DerivedState;
use std::collections::HashMap;

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Materialize(OptionId),
    MaterializeGroup(GroupId),
    Destroy(RowHandle),
    Scroll(u32),
    Open(bool),
}

/// Renderer that records what the widget asked for
///
/// Useful for testing without a terminal.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Structural calls in order
    pub calls: Vec<RenderCall>,
    /// Row handle to option id
    pub rows: HashMap<RowHandle, OptionId>,
    /// Last painted visibility per row
    pub visible: HashMap<RowHandle, bool>,
    /// Last painted checked flag per row
    pub checked: HashMap<RowHandle, bool>,
    /// Last painted group visibility
    pub group_visible: HashMap<GroupHandle, bool>,
    /// Last painted group state
    pub group_state: HashMap<GroupHandle, GroupState>,
    /// Text returned by `query_text`
    pub query: String,
    /// Number of `paint_selection` calls
    pub paints: usize,
    /// Last painted derived state
    pub last_paint: Option<DerivedState>,
    next: u64,
}

impl RecordingRenderer {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the row showing `id`
    #[must_use]
    pub fn handle_of(&self, id: &OptionId) -> Option<RowHandle> {
        self.rows
            .iter()
            .find(|(_, row_id)| *row_id == id)
            .map(|(handle, _)| *handle)
    }

    /// Whether the row showing `id` is visible
    #[must_use]
    pub fn is_visible(&self, id: &OptionId) -> bool {
        self.handle_of(id)
            .and_then(|h| self.visible.get(&h).copied())
            .unwrap_or(false)
    }

    /// Whether the row showing `id` is checked
    #[must_use]
    pub fn is_checked(&self, id: &OptionId) -> bool {
        self.handle_of(id)
            .and_then(|h| self.checked.get(&h).copied())
            .unwrap_or(false)
    }
}

impl Renderer for RecordingRenderer {
    fn materialize_row(&mut self, option: &OptionItem, _position: usize) -> RowHandle {
        self.next += 1;
        let handle = RowHandle(self.next);
        self.rows.insert(handle, option.id.clone());
        self.visible.insert(handle, true);
        self.calls.push(RenderCall::Materialize(option.id.clone()));
        handle
    }

    fn materialize_group(&mut self, group: &Group) -> GroupHandle {
        self.next += 1;
        self.calls.push(RenderCall::MaterializeGroup(group.id.clone()));
        GroupHandle(self.next)
    }

    fn destroy_row(&mut self, row: RowHandle) {
        self.rows.remove(&row);
        self.visible.remove(&row);
        self.checked.remove(&row);
        self.calls.push(RenderCall::Destroy(row));
    }

    fn set_row_visible(&mut self, row: RowHandle, visible: bool) {
        self.visible.insert(row, visible);
    }

    fn set_group_visible(&mut self, group: GroupHandle, visible: bool) {
        self.group_visible.insert(group, visible);
    }

    fn set_row_checked(&mut self, row: RowHandle, checked: bool) {
        self.checked.insert(row, checked);
    }

    fn set_group_state(&mut self, group: GroupHandle, state: GroupState) {
        self.group_state.insert(group, state);
    }

    fn query_text(&self) -> String {
        self.query.clone()
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.calls.push(RenderCall::Scroll(offset));
    }

    fn paint_selection(&mut self, state: &DerivedState) {
        self.paints += 1;
        self.last_paint = Some(state.clone());
    }

    fn set_open(&mut self, open: bool) {
        self.calls.push(RenderCall::Open(open));
    }
}
