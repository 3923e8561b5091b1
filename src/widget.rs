//! Widget instance
//!
//! `Multiselect` is the explicit per-instance state object: it owns the option
//! store, the configuration, the dropdown state, the request sequencer, the
//! backing control and the renderer, and holds the renderer's row handles so
//! identity is never re-resolved by name.
//!
//! Every mutating operation runs to completion synchronously, repaints through
//! the renderer and returns the new `SelectionSnapshot`.
//!
//! ```
//! use multipick::backing::NativeList;
//! use multipick::config::WidgetConfig;
//! use multipick::options::{OptionId, OptionItem};
//! use multipick::tui::TerminalRenderer;
//! use multipick::widget::Multiselect;
//!
//! let list = NativeList::new(
//!     true,
//!     vec![
//!         OptionItem::new(OptionId::Int(1), "Red"),
//!         OptionItem::new(OptionId::Int(2), "Blue"),
//!     ],
//! );
//!
//! let mut widget = Multiselect::builder()
//!     .selector("#colors")
//!     .config(WidgetConfig::default())
//!     .backing(list)
//!     .renderer(TerminalRenderer::new())
//!     .build()?;
//!
//! let snapshot = widget.toggle_option(&OptionId::Int(1), true);
//! assert_eq!(snapshot.selected_count, 1);
//! assert_eq!(widget.derived().display_text, "Red");
//! # Ok::<(), multipick::widget::WidgetError>(())
//! ```

use crate::backing::BackingControl;
use crate::config::WidgetConfig;
use crate::dropdown::{Dropdown, DropdownEvent, DropdownState};
use crate::filter::{Visibility, visible_set};
use crate::options::{GroupId, GroupState, OptionId, OptionItem, OptionStore, StoreError};
use crate::remote::{self, MergeOutcome, RemoteCompletion, RemoteRequest, RequestSequencer};
use crate::render::{GroupHandle, Renderer, RowHandle};
use crate::selection::{DerivedState, SelectionSnapshot, SelectionSynchronizer};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Errors raised while building a widget
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Failed to build widget: {0}")]
    Build(String),

    #[error("Option store error: {0}")]
    Store(#[from] StoreError),
}

/// Searchable checklist bound to a backing list control
pub struct Multiselect<B: BackingControl, R: Renderer> {
    selector: String,
    config: WidgetConfig,
    store: OptionStore,
    backing: B,
    renderer: R,
    dropdown: Dropdown,
    sequencer: RequestSequencer,
    rows: HashMap<OptionId, RowHandle>,
    group_rows: HashMap<GroupId, GroupHandle>,
    query: String,
    visibility: Visibility,
    snapshot: SelectionSnapshot,
    derived: DerivedState,
}

impl<B: BackingControl, R: Renderer> Multiselect<B, R> {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> MultiselectBuilder<B, R> {
        MultiselectBuilder::new()
    }

    fn attach(selector: String, config: WidgetConfig, backing: B, renderer: R) -> Self {
        let mut store = OptionStore::new(backing.is_multiple());
        for group in backing.groups() {
            store.add_group(group.id, group.label);
        }
        for option in backing.options() {
            if let Err(e) = store.add(option) {
                warn!(selector = %selector, error = %e, "skipping option from backing control");
            }
        }

        let mut widget = Self {
            selector,
            config,
            store,
            backing,
            renderer,
            dropdown: Dropdown::new(),
            sequencer: RequestSequencer::new(),
            rows: HashMap::new(),
            group_rows: HashMap::new(),
            query: String::new(),
            visibility: Visibility::default(),
            snapshot: SelectionSnapshot::default(),
            derived: DerivedState::default(),
        };

        for group in widget.store.groups() {
            let handle = widget.renderer.materialize_group(group);
            widget.group_rows.insert(group.id.clone(), handle);
        }
        for (position, option) in widget.store.iter().enumerate() {
            let handle = widget.renderer.materialize_row(option, position);
            widget.rows.insert(option.id.clone(), handle);
        }

        // Single-choice normalization may have dropped selections.
        let snapshot = SelectionSnapshot::capture(&widget.store);
        widget.backing.write_selection(&snapshot.selected_ids);
        widget.apply_snapshot(snapshot);

        debug!(
            selector = %widget.selector,
            options = widget.store.len(),
            groups = widget.store.groups().len(),
            multiple = widget.store.is_multiple(),
            "widget attached"
        );
        widget
    }

    // ------------------------------------------------------------------
    // Dropdown
    // ------------------------------------------------------------------

    /// Search field gained focus
    pub fn focus(&mut self) -> bool {
        self.drive_dropdown(DropdownEvent::Focus)
    }

    /// Pointer gesture outside the widget
    pub fn pointer_outside(&mut self) -> bool {
        self.drive_dropdown(DropdownEvent::PointerOutside)
    }

    /// Dismissal key pressed
    pub fn dismiss_key(&mut self) -> bool {
        self.drive_dropdown(DropdownEvent::DismissKey)
    }

    fn drive_dropdown(&mut self, event: DropdownEvent) -> bool {
        let changed = self.dropdown.handle(event);
        if changed {
            self.renderer.set_open(self.dropdown.is_open());
            debug!(selector = %self.selector, ?event, state = ?self.dropdown.state(), "dropdown");
        }
        changed
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    /// Apply a new search query
    ///
    /// Returns the remote request to perform when remote mode is on and the
    /// trimmed query is non-empty. Clearing the query makes any outstanding
    /// request stale.
    pub fn set_query(&mut self, query: &str) -> Option<RemoteRequest> {
        self.query = query.to_string();
        self.refresh_visibility();

        if !self.config.remote_enabled() {
            return None;
        }

        let term = self.query.trim();
        if term.is_empty() {
            self.sequencer.invalidate();
            return None;
        }

        let request = RemoteRequest {
            seq: self.sequencer.issue(),
            term: term.to_string(),
        };
        debug!(selector = %self.selector, seq = request.seq, term = %request.term, "remote request issued");
        Some(request)
    }

    /// Re-read the query from the renderer's search field
    pub fn refresh_query(&mut self) -> Option<RemoteRequest> {
        let text = self.renderer.query_text();
        self.set_query(&text)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Check or uncheck one option
    ///
    /// Unknown ids are ignored.
    pub fn toggle_option(&mut self, id: &OptionId, checked: bool) -> SelectionSnapshot {
        let result =
            SelectionSynchronizer::new(&mut self.store, &mut self.backing).toggle_option(id, checked);
        self.finish_toggle(result)
    }

    /// Check or uncheck every member of a group
    ///
    /// Unknown groups are ignored.
    pub fn toggle_group(&mut self, group: &GroupId, checked: bool) -> SelectionSnapshot {
        let result =
            SelectionSynchronizer::new(&mut self.store, &mut self.backing).toggle_group(group, checked);
        self.finish_toggle(result)
    }

    /// Check or uncheck every option
    pub fn toggle_all(&mut self, checked: bool) -> SelectionSnapshot {
        let snapshot =
            SelectionSynchronizer::new(&mut self.store, &mut self.backing).toggle_all(checked);
        self.finish_toggle(Ok(snapshot))
    }

    /// Deselect everything in one bulk operation
    pub fn clear_all(&mut self) -> SelectionSnapshot {
        let snapshot = SelectionSynchronizer::new(&mut self.store, &mut self.backing).clear_all();
        self.finish_toggle(Ok(snapshot))
    }

    /// Remove the pill for `id`, unchecking the option
    pub fn remove_pill(&mut self, id: &OptionId) -> SelectionSnapshot {
        self.toggle_option(id, false)
    }

    /// Toolbar "select all"; does nothing without a toolbar
    pub fn select_all(&mut self) -> SelectionSnapshot {
        if !self.config.toolbar {
            return self.snapshot.clone();
        }
        self.toggle_all(true)
    }

    /// Toolbar "select none"; does nothing without a toolbar
    pub fn select_none(&mut self) -> SelectionSnapshot {
        if !self.config.toolbar {
            return self.snapshot.clone();
        }
        self.clear_all()
    }

    fn finish_toggle(&mut self, result: Result<SelectionSnapshot, StoreError>) -> SelectionSnapshot {
        match result {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(e) => debug!(selector = %self.selector, error = %e, "ignoring toggle"),
        }
        self.snapshot.clone()
    }

    // ------------------------------------------------------------------
    // Remote
    // ------------------------------------------------------------------

    /// Hand back a finished remote search
    ///
    /// Stale responses and failures leave the store untouched and return
    /// `None`.
    pub fn complete_remote(&mut self, completion: RemoteCompletion) -> Option<MergeOutcome> {
        let RemoteCompletion { seq, result } = completion;

        if !self.sequencer.is_current(seq) {
            trace!(selector = %self.selector, seq, latest = ?self.sequencer.latest(), "discarding stale response");
            return None;
        }

        let entries = match result {
            Ok(entries) => entries,
            Err(e) => {
                warn!(selector = %self.selector, seq, error = %e, "remote search failed");
                return None;
            }
        };

        let outcome = remote::merge(&mut self.store, &entries, self.config.item_height);

        for id in &outcome.removed {
            if let Some(handle) = self.rows.remove(id) {
                self.renderer.destroy_row(handle);
            }
        }
        for id in &outcome.appended {
            if let (Some(position), Some(option)) = (self.store.position(id), self.store.find(id)) {
                let handle = self.renderer.materialize_row(option, position);
                self.rows.insert(id.clone(), handle);
            }
        }

        if outcome.changed() {
            let options: Vec<OptionItem> = self.store.iter().cloned().collect();
            self.backing.replace_options(&options);
        }

        self.apply_snapshot(SelectionSnapshot::capture(&self.store));

        if let Some(target) = &outcome.scroll {
            self.renderer.set_scroll_offset(target.offset);
        }

        Some(outcome)
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    fn apply_snapshot(&mut self, snapshot: SelectionSnapshot) {
        self.snapshot = snapshot;
        self.paint_rows();
        self.refresh_visibility();
        self.derived = DerivedState::derive(&self.snapshot, self.store.is_multiple(), &self.config);
        self.renderer.paint_selection(&self.derived);
    }

    fn paint_rows(&mut self) {
        for option in self.store.iter() {
            if let Some(handle) = self.rows.get(&option.id) {
                self.renderer.set_row_checked(*handle, option.selected);
            }
        }
        for (group_id, handle) in &self.group_rows {
            if let Ok(state) = self.store.group_state(group_id) {
                self.renderer.set_group_state(*handle, state);
            }
        }
    }

    fn refresh_visibility(&mut self) {
        self.visibility = visible_set(&self.query, &self.store);
        for (id, handle) in &self.rows {
            self.renderer
                .set_row_visible(*handle, self.visibility.is_option_visible(id));
        }
        for (group_id, handle) in &self.group_rows {
            self.renderer
                .set_group_visible(*handle, self.visibility.is_group_visible(group_id));
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Selector this instance was attached with
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Configuration
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Option store
    #[must_use]
    pub const fn store(&self) -> &OptionStore {
        &self.store
    }

    /// Latest selection snapshot
    #[must_use]
    pub const fn snapshot(&self) -> &SelectionSnapshot {
        &self.snapshot
    }

    /// Latest derived state
    #[must_use]
    pub const fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Latest visibility
    #[must_use]
    pub const fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Current query
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Dropdown state
    #[must_use]
    pub const fn dropdown_state(&self) -> DropdownState {
        self.dropdown.state()
    }

    /// Derived state of a group, `None` for unknown groups
    #[must_use]
    pub fn group_state(&self, group: &GroupId) -> Option<GroupState> {
        self.store.group_state(group).ok()
    }

    /// Row handle of an option
    #[must_use]
    pub fn row_handle(&self, id: &OptionId) -> Option<RowHandle> {
        self.rows.get(id).copied()
    }

    /// Backing control
    #[must_use]
    pub const fn backing(&self) -> &B {
        &self.backing
    }

    /// Renderer
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renderer, mutably (for hosts feeding input into it)
    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Tear the widget down, returning the backing control and renderer
    pub fn into_parts(self) -> (B, R) {
        (self.backing, self.renderer)
    }
}

/// Builder for `Multiselect`
pub struct MultiselectBuilder<B, R> {
    selector: Option<String>,
    config: WidgetConfig,
    backing: Option<B>,
    renderer: Option<R>,
}

impl<B: BackingControl, R: Renderer> MultiselectBuilder<B, R> {
    /// Create a builder with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            selector: None,
            config: WidgetConfig::default(),
            backing: None,
            renderer: None,
        }
    }

    /// Set the target selector (required)
    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the configuration
    #[must_use]
    pub fn config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the backing control (required)
    #[must_use]
    pub fn backing(mut self, backing: B) -> Self {
        self.backing = Some(backing);
        self
    }

    /// Set the renderer (required)
    #[must_use]
    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Build the widget
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Build` if:
    /// - The selector is missing or blank
    /// - The backing control or renderer is missing
    pub fn build(self) -> Result<Multiselect<B, R>, WidgetError> {
        let selector = self
            .selector
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| WidgetError::Build("A non-empty selector is required".to_string()))?;
        let backing = self
            .backing
            .ok_or_else(|| WidgetError::Build("A backing control is required".to_string()))?;
        let renderer = self
            .renderer
            .ok_or_else(|| WidgetError::Build("A renderer is required".to_string()))?;

        Ok(Multiselect::attach(selector, self.config, backing, renderer))
    }
}

impl<B: BackingControl, R: Renderer> Default for MultiselectBuilder<B, R> {
    fn default() -> Self {
        Self::new()
    }
}
