//! Canonical option list of one widget instance
//!
//! `OptionStore` mirrors the backing list control: an ordered sequence of
//! options plus the groups they belong to. Insertion order drives render order
//! and pill order.
//!
//! # Invariants
//!
//! - No two options share an id
//! - A single-choice store has at most one selected option
//! - Every selected option is present
//!
//! The store never touches rendering; callers read it back through
//! [`OptionStore::iter`] and repaint.

pub mod error;
pub mod types;

pub use error::StoreError;
pub use types::{Group, GroupId, GroupState, OptionId, OptionItem};

/// Ordered, id-unique collection of options
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionStore {
    multiple: bool,
    items: Vec<OptionItem>,
    groups: Vec<Group>,
}

impl OptionStore {
    /// Create an empty store
    ///
    /// `multiple` selects multi-choice semantics; otherwise at most one option
    /// can be selected.
    #[must_use]
    pub const fn new(multiple: bool) -> Self {
        Self {
            multiple,
            items: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Whether the store allows more than one selected option
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Number of options
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store has no options
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an option
    ///
    /// A selected option is marked present. Adding a selected option to a
    /// single-choice store deselects the previous selection. If the option
    /// names a group the store does not know yet, the group is created with its
    /// id as label.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if an option with the same id exists;
    /// the store is left unchanged.
    pub fn add(&mut self, mut item: OptionItem) -> Result<(), StoreError> {
        if self.contains(&item.id) {
            return Err(StoreError::DuplicateId(item.id));
        }

        if item.selected {
            item.present = true;
            if !self.multiple {
                self.deselect_all();
            }
        }

        if let Some(group_id) = &item.group {
            match self.groups.iter_mut().find(|g| &g.id == group_id) {
                Some(group) => group.member_ids.push(item.id.clone()),
                None => {
                    let mut group = Group::new(group_id.clone(), group_id.as_str());
                    group.member_ids.push(item.id.clone());
                    self.groups.push(group);
                }
            }
        }

        self.items.push(item);
        Ok(())
    }

    /// Register a group header
    ///
    /// Members are attached as options naming the group are added. Registering
    /// an existing group only updates its label.
    pub fn add_group(&mut self, id: impl Into<GroupId>, label: impl Into<String>) {
        let id = id.into();
        let label = label.into();
        match self.groups.iter_mut().find(|g| g.id == id) {
            Some(group) => group.label = label,
            None => self.groups.push(Group::new(id, label)),
        }
    }

    /// Remove an option, returning it if it was present
    ///
    /// Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &OptionId) -> Option<OptionItem> {
        let pos = self.position(id)?;
        let item = self.items.remove(pos);
        if let Some(group_id) = &item.group
            && let Some(group) = self.groups.iter_mut().find(|g| &g.id == group_id)
        {
            group.member_ids.retain(|m| m != id);
        }
        Some(item)
    }

    /// Look up an option by id
    #[must_use]
    pub fn find(&self, id: &OptionId) -> Option<&OptionItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Position of an option in insertion order
    #[must_use]
    pub fn position(&self, id: &OptionId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Whether an option with this id exists
    #[must_use]
    pub fn contains(&self, id: &OptionId) -> bool {
        self.position(id).is_some()
    }

    /// Set the checked state of one option
    ///
    /// Selecting in a single-choice store deselects every other option first.
    /// Selecting also marks the option present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownId` if no option has this id.
    pub fn set_selected(&mut self, id: &OptionId, selected: bool) -> Result<(), StoreError> {
        let pos = self
            .position(id)
            .ok_or_else(|| StoreError::UnknownId(id.clone()))?;

        if selected && !self.multiple {
            for (i, item) in self.items.iter_mut().enumerate() {
                if i != pos {
                    item.selected = false;
                }
            }
        }

        let item = &mut self.items[pos];
        item.selected = selected;
        if selected {
            item.present = true;
        }
        Ok(())
    }

    /// Deselect every option
    pub fn deselect_all(&mut self) {
        for item in &mut self.items {
            item.selected = false;
        }
    }

    /// Set the checked state of every option at once
    ///
    /// A single-choice store can hold one selection, so checking everything
    /// leaves only the last option selected.
    pub fn set_all_selected(&mut self, selected: bool) {
        let keep_from = if self.multiple {
            0
        } else {
            self.items.len().saturating_sub(1)
        };
        for (i, item) in self.items.iter_mut().enumerate() {
            item.selected = selected && i >= keep_from;
            if item.selected {
                item.present = true;
            }
        }
    }

    /// Options in insertion order
    ///
    /// The iterator is lazy and `Clone`, so it can be restarted.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionItem> {
        self.items.iter()
    }

    /// Ids of selected options in store order
    #[must_use]
    pub fn selected_ids(&self) -> Vec<OptionId> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.id.clone())
            .collect()
    }

    /// All groups in registration order
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by id
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Derived selection state of a group
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownGroup` if no group has this id.
    pub fn group_state(&self, id: &GroupId) -> Result<GroupState, StoreError> {
        let group = self
            .group(id)
            .ok_or_else(|| StoreError::UnknownGroup(id.clone()))?;

        let selected = group
            .member_ids
            .iter()
            .filter(|m| self.find(m).is_some_and(|item| item.selected))
            .count();

        Ok(match selected {
            0 => GroupState::None,
            n if n == group.member_ids.len() => GroupState::All,
            _ => GroupState::Partial,
        })
    }

    /// Keep only options matching `keep`, returning the removed ids in order
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&OptionItem) -> bool) -> Vec<OptionId> {
        let mut removed = Vec::new();
        self.items.retain(|item| {
            let kept = keep(item);
            if !kept {
                removed.push(item.id.clone());
            }
            kept
        });

        if !removed.is_empty() {
            for group in &mut self.groups {
                group.member_ids.retain(|m| !removed.contains(m));
            }
        }
        removed
    }
}

impl<'a> IntoIterator for &'a OptionStore {
    type Item = &'a OptionItem;
    type IntoIter = std::slice::Iter<'a, OptionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
