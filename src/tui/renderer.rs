//! Headless row model behind the terminal UI
//!
//! `TerminalRenderer` keeps everything the widget paints (rows, group
//! headers, checked flags, visibility, the derived summary) plus the
//! terminal-only state the widget does not own: the query being typed, the
//! cursor and the scroll offset. Drawing reads this model; no terminal is
//! needed to drive it, which is how the integration tests use it.

use crate::options::{Group, GroupId, GroupState, OptionId, OptionItem};
use crate::render::{GroupHandle, Renderer, RowHandle};
use crate::selection::DerivedState;

/// One materialized option row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Handle returned to the widget
    pub handle: RowHandle,
    pub id: OptionId,
    pub label: String,
    /// Secondary text drawn after the label
    pub description: Option<String>,
    pub group: Option<GroupId>,
    /// Checkbox state
    pub checked: bool,
    /// Passes the current filter
    pub visible: bool,
}

/// One materialized group header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    /// Handle returned to the widget
    pub handle: GroupHandle,
    pub id: GroupId,
    pub label: String,
    /// Tri-state checkbox of the header
    pub state: GroupState,
    /// At least one member is visible
    pub visible: bool,
}

/// A line of the drawn checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// Group header drawn above its members
    Header(&'a GroupHeader),
    /// Option row
    Option(&'a Row),
}

/// What the cursor points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorTarget {
    /// A group header
    Group(GroupId),
    /// An option row
    Option(OptionId),
}

/// Renderer backed by an in-memory row model
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    rows: Vec<Row>,
    headers: Vec<GroupHeader>,
    next_handle: u64,
    query: String,
    cursor: usize,
    scroll: u32,
    open: bool,
    derived: DerivedState,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in store order, hidden ones included
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row showing `id`
    #[must_use]
    pub fn row(&self, id: &OptionId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// Group headers in creation order
    #[must_use]
    pub fn headers(&self) -> &[GroupHeader] {
        &self.headers
    }

    /// Header of `id`
    #[must_use]
    pub fn header(&self, id: &GroupId) -> Option<&GroupHeader> {
        self.headers.iter().find(|header| &header.id == id)
    }

    /// Visible lines in draw order
    ///
    /// A group's header is drawn before the first visible row of a run of
    /// rows belonging to that group.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut entries = Vec::new();
        let mut previous_group: Option<&GroupId> = None;

        for row in self.rows.iter().filter(|row| row.visible) {
            if let Some(group) = &row.group
                && previous_group != Some(group)
                && let Some(header) = self.header(group)
                && header.visible
            {
                entries.push(Entry::Header(header));
            }
            previous_group = row.group.as_ref();
            entries.push(Entry::Option(row));
        }

        entries
    }

    /// Ids of visible rows in draw order
    #[must_use]
    pub fn visible_ids(&self) -> Vec<OptionId> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.id.clone())
            .collect()
    }

    /// Cursor index into [`entries`](Self::entries), clamped
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.min(self.entries().len().saturating_sub(1))
    }

    /// Entry under the cursor
    #[must_use]
    pub fn current(&self) -> Option<CursorTarget> {
        self.entries().get(self.cursor()).map(|entry| match entry {
            Entry::Header(header) => CursorTarget::Group(header.id.clone()),
            Entry::Option(row) => CursorTarget::Option(row.id.clone()),
        })
    }

    /// Group of the entry under the cursor
    #[must_use]
    pub fn current_group(&self) -> Option<GroupId> {
        match self.current()? {
            CursorTarget::Group(id) => Some(id),
            CursorTarget::Option(id) => self.row(&id).and_then(|row| row.group.clone()),
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor().saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = self.entries().len().saturating_sub(1);
        self.cursor = (self.cursor() + 1).min(last);
    }

    /// Text typed into the search field
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    /// Remove the last typed character, returning whether there was one
    pub fn backspace(&mut self) -> bool {
        let removed = self.query.pop().is_some();
        if removed {
            self.cursor = 0;
        }
        removed
    }

    /// Replace the typed text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 0;
    }

    /// Scroll offset last requested by the widget
    #[must_use]
    pub const fn scroll(&self) -> u32 {
        self.scroll
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Last painted summary
    #[must_use]
    pub const fn derived(&self) -> &DerivedState {
        &self.derived
    }

    fn row_mut(&mut self, handle: RowHandle) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.handle == handle)
    }

    fn header_mut(&mut self, handle: GroupHandle) -> Option<&mut GroupHeader> {
        self.headers.iter_mut().find(|header| header.handle == handle)
    }

    const fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Renderer for TerminalRenderer {
    fn materialize_row(&mut self, option: &OptionItem, position: usize) -> RowHandle {
        let handle = RowHandle(self.next_handle());
        let row = Row {
            handle,
            id: option.id.clone(),
            label: option.label.clone(),
            description: option.description.clone(),
            group: option.group.clone(),
            checked: option.selected,
            visible: true,
        };
        let position = position.min(self.rows.len());
        self.rows.insert(position, row);
        handle
    }

    fn materialize_group(&mut self, group: &Group) -> GroupHandle {
        let handle = GroupHandle(self.next_handle());
        self.headers.push(GroupHeader {
            handle,
            id: group.id.clone(),
            label: group.label.clone(),
            state: GroupState::None,
            visible: true,
        });
        handle
    }

    fn destroy_row(&mut self, row: RowHandle) {
        self.rows.retain(|r| r.handle != row);
    }

    fn set_row_visible(&mut self, row: RowHandle, visible: bool) {
        if let Some(r) = self.row_mut(row) {
            r.visible = visible;
        }
    }

    fn set_group_visible(&mut self, group: GroupHandle, visible: bool) {
        if let Some(header) = self.header_mut(group) {
            header.visible = visible;
        }
    }

    fn set_row_checked(&mut self, row: RowHandle, checked: bool) {
        if let Some(r) = self.row_mut(row) {
            r.checked = checked;
        }
    }

    fn set_group_state(&mut self, group: GroupHandle, state: GroupState) {
        if let Some(header) = self.header_mut(group) {
            header.state = state;
        }
    }

    fn query_text(&self) -> String {
        self.query.clone()
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.scroll = offset;
    }

    fn paint_selection(&mut self, state: &DerivedState) {
        self.derived = state.clone();
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TerminalRenderer {
        let mut r = TerminalRenderer::new();
        let warm = r.materialize_group(&Group::new("warm", "Warm"));
        r.set_group_state(warm, GroupState::Partial);
        r.materialize_row(&OptionItem::new(OptionId::Int(1), "Red").in_group("warm"), 0);
        r.materialize_row(&OptionItem::new(OptionId::Int(2), "Orange").in_group("warm"), 1);
        r.materialize_row(&OptionItem::new(OptionId::Int(3), "Plain"), 2);
        r
    }

    #[test]
    fn test_entries_put_header_before_group_run() {
        let r = renderer();
        let entries = r.entries();

        assert_eq!(entries.len(), 4);
        assert!(matches!(entries[0], Entry::Header(h) if h.label == "Warm"));
        assert!(matches!(entries[1], Entry::Option(row) if row.label == "Red"));
        assert!(matches!(entries[3], Entry::Option(row) if row.label == "Plain"));
    }

    #[test]
    fn test_hidden_rows_are_skipped() {
        let mut r = renderer();
        let red = r.row(&OptionId::Int(1)).unwrap().handle;
        r.set_row_visible(red, false);

        assert_eq!(r.visible_ids(), vec![OptionId::Int(2), OptionId::Int(3)]);
    }

    #[test]
    fn test_materialize_inserts_at_position() {
        let mut r = renderer();
        r.materialize_row(&OptionItem::new(OptionId::Int(9), "Navy"), 1);

        let labels: Vec<&str> = r.rows().iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Red", "Navy", "Orange", "Plain"]);
    }

    #[test]
    fn test_destroy_row() {
        let mut r = renderer();
        let orange = r.row(&OptionId::Int(2)).unwrap().handle;
        r.destroy_row(orange);

        assert!(r.row(&OptionId::Int(2)).is_none());
        assert_eq!(r.rows().len(), 2);
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut r = renderer();
        assert_eq!(r.current(), Some(CursorTarget::Group(GroupId::from("warm"))));

        r.cursor_down();
        assert_eq!(r.current(), Some(CursorTarget::Option(OptionId::Int(1))));
        assert_eq!(r.current_group(), Some(GroupId::from("warm")));

        for _ in 0..10 {
            r.cursor_down();
        }
        assert_eq!(r.current(), Some(CursorTarget::Option(OptionId::Int(3))));
        assert_eq!(r.current_group(), None);

        r.cursor_up();
        assert_eq!(r.current(), Some(CursorTarget::Option(OptionId::Int(2))));
    }

    #[test]
    fn test_query_editing_resets_cursor() {
        let mut r = renderer();
        r.cursor_down();
        r.push_char('r');
        r.push_char('e');

        assert_eq!(r.query_text(), "re");
        assert_eq!(r.cursor(), 0);
        assert!(r.backspace());
        assert!(r.backspace());
        assert!(!r.backspace());
    }

    #[test]
    fn test_paint_state() {
        let mut r = renderer();
        r.set_open(true);
        r.set_scroll_offset(4);
        r.paint_selection(&DerivedState {
            display_text: "Red".to_string(),
            ..Default::default()
        });

        assert!(r.is_open());
        assert_eq!(r.scroll(), 4);
        assert_eq!(r.derived().display_text, "Red");
    }
}
