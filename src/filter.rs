//! Free-text filtering of the checklist
//!
//! An option is visible when it is selected or when its label contains the
//! query (trimmed, case-folded). Checked options never disappear because of
//! an unrelated search. A group is visible when at least one member is.
//!
//! ```
//! use multipick::filter::visible_set;
//! use multipick::options::{OptionId, OptionItem, OptionStore};
//!
//! let mut store = OptionStore::new(true);
//! store.add(OptionItem::new(OptionId::Int(1), "Red")).unwrap();
//! store.add(OptionItem::new(OptionId::Int(2), "Blue")).unwrap();
//!
//! let visible = visible_set("BLU ", &store);
//! assert_eq!(visible.options(), &[OptionId::Int(2)]);
//! ```

use crate::options::{GroupId, OptionId, OptionItem, OptionStore};
use std::collections::HashSet;

/// Result of filtering a store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Visibility {
    options: Vec<OptionId>,
    groups: Vec<GroupId>,
    lookup: HashSet<OptionId>,
}

impl Visibility {
    /// Visible option ids in store order
    #[must_use]
    pub fn options(&self) -> &[OptionId] {
        &self.options
    }

    /// Visible group ids in group order
    #[must_use]
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    /// Whether an option is visible
    #[must_use]
    pub fn is_option_visible(&self, id: &OptionId) -> bool {
        self.lookup.contains(id)
    }

    /// Whether a group header is visible
    #[must_use]
    pub fn is_group_visible(&self, id: &GroupId) -> bool {
        self.groups.contains(id)
    }

    /// Number of visible options
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether nothing is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Trim and case-fold a query
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether one option passes a normalized query
#[must_use]
pub fn matches(item: &OptionItem, normalized_query: &str) -> bool {
    item.selected
        || normalized_query.is_empty()
        || item.label.to_lowercase().contains(normalized_query)
}

/// Compute the visible subset of `store` for `query`
///
/// Pure: the same inputs always give the same result.
#[must_use]
pub fn visible_set(query: &str, store: &OptionStore) -> Visibility {
    let needle = normalize_query(query);

    let options: Vec<OptionId> = store
        .iter()
        .filter(|item| matches(item, &needle))
        .map(|item| item.id.clone())
        .collect();
    let lookup: HashSet<OptionId> = options.iter().cloned().collect();

    let groups = store
        .groups()
        .iter()
        .filter(|group| group.member_ids.iter().any(|m| lookup.contains(m)))
        .map(|group| group.id.clone())
        .collect();

    Visibility {
        options,
        groups,
        lookup,
    }
}
