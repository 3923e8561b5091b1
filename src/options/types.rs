//! Core option and group types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an option
///
/// Backing lists and remote sources use either integers or strings as ids,
/// so both are accepted. On the wire it is an untagged JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    /// Integer identifier
    Int(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Identifier of an option group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Create a group id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GroupId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One selectable entry of the checklist
///
/// Mirrors a single item of the backing list control. `present` becomes true
/// once the backing list (or a remote result) has confirmed the entry; a
/// selected option is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    /// Unique identifier within a store
    pub id: OptionId,

    /// Display text, also the text searched by the filter
    pub label: String,

    /// Optional secondary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Group this option belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,

    /// Whether the option is checked
    #[serde(default)]
    pub selected: bool,

    /// Whether the backing source has confirmed this option
    #[serde(default = "default_present")]
    pub present: bool,
}

const fn default_present() -> bool {
    true
}

impl OptionItem {
    /// Create an unselected, present option
    #[must_use]
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            group: None,
            selected: false,
            present: true,
        }
    }

    /// Set the secondary text
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Place the option in a group
    #[must_use]
    pub fn in_group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the checked state
    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// A labeled cluster of options that can be toggled together
///
/// Group selection is derived from member state, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier
    pub id: GroupId,
    /// Header text
    pub label: String,
    /// Member option ids in render order
    #[serde(default)]
    pub member_ids: Vec<OptionId>,
}

impl Group {
    /// Create an empty group
    #[must_use]
    pub fn new(id: impl Into<GroupId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            member_ids: Vec::new(),
        }
    }
}

/// Derived selection state of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    /// Every member is selected (and the group is non-empty)
    All,
    /// Some but not all members are selected
    Partial,
    /// No member is selected
    None,
}
