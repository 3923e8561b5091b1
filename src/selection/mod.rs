//! Selection toggles and derived state
//!
//! `SelectionSynchronizer` applies one toggle operation to an `OptionStore`,
//! writes the resulting selected flags back to the backing control and fires
//! exactly one change notification per call, no matter how many options
//! changed. Every operation returns the recomputed `SelectionSnapshot`.
//!
//! # Operations
//!
//! - **`toggle_option`** - one option; single-choice stores clear every other
//!   option first
//! - **`toggle_group`** - every member in member order, then group exclusivity
//!   for single-choice stores
//! - **`toggle_all`** - every option in store order
//! - **`clear_all`** - bulk deselect, clearing the backing control directly

mod snapshot;

pub use snapshot::{DerivedState, Pill, SelectionSnapshot};

use crate::backing::BackingControl;
use crate::options::{GroupId, OptionId, OptionStore, StoreError};
use tracing::debug;

/// Applies toggles to a store and publishes them to the backing control
pub struct SelectionSynchronizer<'a, B: BackingControl + ?Sized> {
    store: &'a mut OptionStore,
    backing: &'a mut B,
}

impl<'a, B: BackingControl + ?Sized> SelectionSynchronizer<'a, B> {
    /// Borrow a store and its backing control for one or more toggles
    pub const fn new(store: &'a mut OptionStore, backing: &'a mut B) -> Self {
        Self { store, backing }
    }

    /// Set one option's checked state
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownId` if the option does not exist. Nothing is
    /// written or notified in that case.
    pub fn toggle_option(
        &mut self,
        id: &OptionId,
        checked: bool,
    ) -> Result<SelectionSnapshot, StoreError> {
        if !self.store.contains(id) {
            return Err(StoreError::UnknownId(id.clone()));
        }
        self.apply_option(id, checked)?;
        debug!(%id, checked, "toggled option");
        Ok(self.publish())
    }

    /// Set the checked state of every member of a group
    ///
    /// Members are toggled in member order, so in a single-choice store the
    /// last member wins. Afterwards a single-choice store drops any selection
    /// that belongs to a different group.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownGroup` if the group does not exist.
    pub fn toggle_group(
        &mut self,
        group_id: &GroupId,
        checked: bool,
    ) -> Result<SelectionSnapshot, StoreError> {
        let members = self
            .store
            .group(group_id)
            .map(|g| g.member_ids.clone())
            .ok_or_else(|| StoreError::UnknownGroup(group_id.clone()))?;

        for member in &members {
            self.apply_option(member, checked)?;
        }

        if !self.store.is_multiple() {
            let foreign: Vec<OptionId> = self
                .store
                .iter()
                .filter(|item| {
                    item.selected && item.group.as_ref().is_some_and(|g| g != group_id)
                })
                .map(|item| item.id.clone())
                .collect();
            for id in &foreign {
                self.store.set_selected(id, false)?;
            }
        }

        debug!(group = %group_id, checked, members = members.len(), "toggled group");
        Ok(self.publish())
    }

    /// Set the checked state of every option in store order
    pub fn toggle_all(&mut self, checked: bool) -> SelectionSnapshot {
        self.store.set_all_selected(checked);
        debug!(checked, count = self.store.len(), "toggled all options");
        self.publish()
    }

    /// Deselect everything and clear the backing control in bulk
    pub fn clear_all(&mut self) -> SelectionSnapshot {
        self.store.deselect_all();
        self.backing.clear_selection();
        self.backing.notify_change();
        debug!("cleared selection");
        SelectionSnapshot::capture(self.store)
    }

    fn apply_option(&mut self, id: &OptionId, checked: bool) -> Result<(), StoreError> {
        if !self.store.is_multiple() {
            self.store.deselect_all();
        }
        self.store.set_selected(id, checked)
    }

    fn publish(&mut self) -> SelectionSnapshot {
        let snapshot = SelectionSnapshot::capture(self.store);
        self.backing.write_selection(&snapshot.selected_ids);
        self.backing.notify_change();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backing::NativeList;
    use crate::options::{GroupState, OptionItem};

    fn setup(multiple: bool) -> (OptionStore, NativeList) {
        let items = vec![
            OptionItem::new(OptionId::Int(1), "Red").in_group("warm"),
            OptionItem::new(OptionId::Int(2), "Orange").in_group("warm"),
            OptionItem::new(OptionId::Int(3), "Blue").in_group("cool"),
            OptionItem::new(OptionId::Int(4), "Teal").in_group("cool"),
        ];
        let mut store = OptionStore::new(multiple);
        for item in &items {
            store.add(item.clone()).unwrap();
        }
        (store, NativeList::new(multiple, items))
    }

    #[test]
    fn test_toggle_option_multi() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        sync.toggle_option(&OptionId::Int(1), true).unwrap();
        let snapshot = sync.toggle_option(&OptionId::Int(3), true).unwrap();

        assert_eq!(snapshot.selected_count, 2);
        assert_eq!(snapshot.selected_labels, vec!["Red", "Blue"]);
        assert_eq!(list.selected_ids(), vec![OptionId::Int(1), OptionId::Int(3)]);
        assert_eq!(list.change_count(), 2);
    }

    #[test]
    fn test_toggle_option_single_is_exclusive() {
        let (mut store, mut list) = setup(false);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        sync.toggle_option(&OptionId::Int(1), true).unwrap();
        let snapshot = sync.toggle_option(&OptionId::Int(2), true).unwrap();

        assert_eq!(snapshot.selected_ids, vec![OptionId::Int(2)]);
        assert_eq!(snapshot.selected_count, 1);
        assert_eq!(list.selected_ids(), vec![OptionId::Int(2)]);
    }

    #[test]
    fn test_toggle_option_unknown_id_is_silent() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        let result = sync.toggle_option(&OptionId::Int(42), true);
        assert_eq!(result, Err(StoreError::UnknownId(OptionId::Int(42))));
        assert_eq!(list.change_count(), 0);
    }

    #[test]
    fn test_toggle_option_twice_is_stable() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        let once = sync.toggle_option(&OptionId::Int(2), true).unwrap();
        let twice = sync.toggle_option(&OptionId::Int(2), true).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toggle_group_multi_notifies_once() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        let snapshot = sync.toggle_group(&GroupId::from("cool"), true).unwrap();
        assert_eq!(snapshot.selected_ids, vec![OptionId::Int(3), OptionId::Int(4)]);
        assert_eq!(list.change_count(), 1);
        assert_eq!(
            store.group_state(&GroupId::from("cool")),
            Ok(GroupState::All)
        );
    }

    #[test]
    fn test_toggle_group_single_last_member_wins() {
        let (mut store, mut list) = setup(false);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        sync.toggle_option(&OptionId::Int(1), true).unwrap();
        let snapshot = sync.toggle_group(&GroupId::from("cool"), true).unwrap();

        assert_eq!(snapshot.selected_ids, vec![OptionId::Int(4)]);
    }

    #[test]
    fn test_toggle_group_off() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        sync.toggle_all(true);
        let snapshot = sync.toggle_group(&GroupId::from("warm"), false).unwrap();
        assert_eq!(snapshot.selected_ids, vec![OptionId::Int(3), OptionId::Int(4)]);
    }

    #[test]
    fn test_toggle_group_unknown() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        assert_eq!(
            sync.toggle_group(&GroupId::from("none"), true),
            Err(StoreError::UnknownGroup(GroupId::from("none")))
        );
        assert_eq!(list.change_count(), 0);
    }

    #[test]
    fn test_toggle_all() {
        let (mut store, mut list) = setup(true);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        let snapshot = sync.toggle_all(true);
        assert_eq!(snapshot.selected_count, 4);
        let snapshot = sync.toggle_all(false);
        assert_eq!(snapshot.selected_count, 0);
        assert_eq!(list.change_count(), 2);
    }

    #[test]
    fn test_toggle_all_single_keeps_one() {
        let (mut store, mut list) = setup(false);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        let snapshot = sync.toggle_all(true);
        assert_eq!(snapshot.selected_ids, vec![OptionId::Int(4)]);
    }

    #[test]
    fn test_clear_all() {
        let (mut store, mut list) = setup(true);
        {
            let mut sync = SelectionSynchronizer::new(&mut store, &mut list);
            sync.toggle_all(true);
            let snapshot = sync.clear_all();
            assert!(snapshot.is_empty());
        }
        assert!(list.selected_ids().is_empty());
        assert_eq!(list.change_count(), 2);
        assert!(store.selected_ids().is_empty());
    }
}
