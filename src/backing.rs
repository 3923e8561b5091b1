//! Backing list control
//!
//! The widget reads its initial options from a backing control and writes
//! every selection change back to it, followed by exactly one change
//! notification per user-visible action. External listeners therefore observe
//! the widget the same way they would observe the plain list control.

use crate::options::{Group, OptionId, OptionItem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The list control a widget is attached to
pub trait BackingControl {
    /// Whether the control accepts more than one selected item
    fn is_multiple(&self) -> bool;

    /// Initial options in control order
    fn options(&self) -> Vec<OptionItem>;

    /// Group headers in control order
    fn groups(&self) -> Vec<Group>;

    /// Make the control's selected flags match `selected` exactly
    fn write_selection(&mut self, selected: &[OptionId]);

    /// Clear every selected flag directly
    fn clear_selection(&mut self);

    /// Replace the control's item list after a remote merge
    fn replace_options(&mut self, options: &[OptionItem]);

    /// Fire one change notification to the control's listeners
    fn notify_change(&mut self);
}

/// Change notification payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Selected ids in control order at the time of the notification
    pub selected: Vec<OptionId>,
}

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Serialized form of a list control
///
/// ```json
/// {
///   "multiple": true,
///   "groups": [{ "id": "warm", "label": "Warm" }],
///   "options": [{ "id": 1, "label": "Red", "group": "warm", "selected": true }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDocument {
    /// Multi-choice control
    #[serde(default)]
    pub multiple: bool,
    /// Group headers
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Items
    #[serde(default)]
    pub options: Vec<OptionItem>,
}

/// In-memory list control
///
/// Plays the role of the native select element: holds items with their
/// selected flags and dispatches change notifications to subscribers.
pub struct NativeList {
    multiple: bool,
    options: Vec<OptionItem>,
    groups: Vec<Group>,
    listeners: Vec<Listener>,
    change_count: usize,
}

impl NativeList {
    /// Create a list control from items
    #[must_use]
    pub fn new(multiple: bool, options: Vec<OptionItem>) -> Self {
        Self {
            multiple,
            options,
            groups: Vec::new(),
            listeners: Vec::new(),
            change_count: 0,
        }
    }

    /// Attach group headers
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    /// Parse a list control from its JSON document
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the document is not valid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let doc: ListDocument = serde_json::from_str(json)?;
        Ok(Self::from(doc))
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current items
    #[must_use]
    pub fn items(&self) -> &[OptionItem] {
        &self.options
    }

    /// Ids of selected items in control order
    #[must_use]
    pub fn selected_ids(&self) -> Vec<OptionId> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.id.clone())
            .collect()
    }

    /// Number of change notifications fired so far
    #[must_use]
    pub const fn change_count(&self) -> usize {
        self.change_count
    }
}

impl From<ListDocument> for NativeList {
    fn from(doc: ListDocument) -> Self {
        Self::new(doc.multiple, doc.options).with_groups(doc.groups)
    }
}

impl fmt::Debug for NativeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeList")
            .field("multiple", &self.multiple)
            .field("options", &self.options)
            .field("groups", &self.groups)
            .field("listeners", &self.listeners.len())
            .field("change_count", &self.change_count)
            .finish()
    }
}

impl BackingControl for NativeList {
    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn options(&self) -> Vec<OptionItem> {
        self.options.clone()
    }

    fn groups(&self) -> Vec<Group> {
        self.groups.clone()
    }

    fn write_selection(&mut self, selected: &[OptionId]) {
        for option in &mut self.options {
            option.selected = selected.contains(&option.id);
        }
    }

    fn clear_selection(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }

    fn replace_options(&mut self, options: &[OptionItem]) {
        self.options = options.to_vec();
    }

    fn notify_change(&mut self) {
        self.change_count += 1;
        let event = ChangeEvent {
            selected: self.selected_ids(),
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
