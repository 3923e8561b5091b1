//! Property tests for selection, filtering and merging

use multipick::backing::{BackingControl, NativeList};
use multipick::filter::visible_set;
use multipick::options::{GroupId, OptionId, OptionItem, OptionStore};
use multipick::remote::{RemoteEntry, merge};
use multipick::selection::SelectionSynchronizer;
use proptest::prelude::*;
use std::collections::HashSet;

const LABELS: &[&str] = &["Red", "Blue", "Green", "Navy", "Teal", "Rust", "Sand", "Plum"];

fn store_strategy() -> impl Strategy<Value = OptionStore> {
    (
        any::<bool>(),
        prop::collection::vec((0i64..20, 0usize..LABELS.len(), any::<bool>()), 0..12),
    )
        .prop_map(|(multiple, entries)| {
            let mut store = OptionStore::new(multiple);
            for (id, label, selected) in entries {
                // Duplicate ids are rejected by the store; skipping them is fine here.
                let _ = store.add(
                    OptionItem::new(OptionId::Int(id), LABELS[label]).with_selected(selected),
                );
            }
            store
        })
}

fn batch_strategy() -> impl Strategy<Value = Vec<RemoteEntry>> {
    prop::collection::vec((0i64..30, 0usize..LABELS.len()), 0..10).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, label)| RemoteEntry::new(OptionId::Int(id), LABELS[label]))
            .collect()
    })
}

const GROUPS: &[&str] = &["warm", "cool"];

/// One step of a mixed selection sequence
#[derive(Debug, Clone)]
enum Step {
    Option(i64, bool),
    Group(usize, bool),
    All(bool),
    Clear,
    Merge(Vec<RemoteEntry>),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0i64..12, any::<bool>()).prop_map(|(id, checked)| Step::Option(id, checked)),
        (0usize..GROUPS.len(), any::<bool>()).prop_map(|(g, checked)| Step::Group(g, checked)),
        any::<bool>().prop_map(Step::All),
        Just(Step::Clear),
        batch_strategy().prop_map(Step::Merge),
    ]
}

/// Single-choice store with two groups and two ungrouped options
fn grouped_single_choice() -> OptionStore {
    let mut store = OptionStore::new(false);
    for id in 0..8i64 {
        let mut item = OptionItem::new(OptionId::Int(id), LABELS[id as usize]);
        if id < 6 {
            item = item.in_group(GROUPS[(id % 2) as usize]);
        }
        store.add(item).unwrap();
    }
    store
}

fn list_for(store: &OptionStore) -> NativeList {
    NativeList::new(store.is_multiple(), store.iter().cloned().collect())
}

proptest! {
    #[test]
    fn prop_single_choice_never_has_two_selected(
        toggles in prop::collection::vec((0i64..8, any::<bool>()), 0..30)
    ) {
        let mut store = OptionStore::new(false);
        for id in 0..8 {
            store.add(OptionItem::new(OptionId::Int(id), LABELS[id as usize])).unwrap();
        }
        let mut list = list_for(&store);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        for (id, checked) in toggles {
            let snapshot = sync.toggle_option(&OptionId::Int(id), checked).unwrap();
            prop_assert!(snapshot.selected_count <= 1);
        }
    }

    #[test]
    fn prop_single_choice_exclusive_across_mixed_steps(
        steps in prop::collection::vec(step_strategy(), 0..25)
    ) {
        let mut store = grouped_single_choice();
        let mut list = list_for(&store);

        for step in steps {
            match step {
                Step::Option(id, checked) => {
                    // Ids dropped by an earlier merge are rejected; that is fine.
                    let mut sync = SelectionSynchronizer::new(&mut store, &mut list);
                    if let Ok(snapshot) = sync.toggle_option(&OptionId::Int(id), checked) {
                        prop_assert!(snapshot.selected_count <= 1);
                    }
                }
                Step::Group(g, checked) => {
                    let mut sync = SelectionSynchronizer::new(&mut store, &mut list);
                    let snapshot = sync
                        .toggle_group(&GroupId::from(GROUPS[g]), checked)
                        .unwrap();
                    prop_assert!(snapshot.selected_count <= 1);
                }
                Step::All(checked) => {
                    let mut sync = SelectionSynchronizer::new(&mut store, &mut list);
                    prop_assert!(sync.toggle_all(checked).selected_count <= 1);
                }
                Step::Clear => {
                    let mut sync = SelectionSynchronizer::new(&mut store, &mut list);
                    prop_assert_eq!(sync.clear_all().selected_count, 0);
                }
                Step::Merge(batch) => {
                    merge(&mut store, &batch, 1);
                    let merged: Vec<OptionItem> = store.iter().cloned().collect();
                    list.replace_options(&merged);
                }
            }
            prop_assert!(store.selected_ids().len() <= 1);
            prop_assert!(list.selected_ids().len() <= 1);
        }
    }

    #[test]
    fn prop_toggle_on_twice_equals_once(store in store_strategy(), pick in 0usize..12) {
        let mut store = store;
        prop_assume!(!store.is_empty());
        let id = store.iter().nth(pick % store.len()).unwrap().id.clone();
        let mut list = list_for(&store);
        let mut sync = SelectionSynchronizer::new(&mut store, &mut list);

        let once = sync.toggle_option(&id, true).unwrap();
        let twice = sync.toggle_option(&id, true).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_filter_keeps_selected(store in store_strategy(), query in "[a-zA-Z ]{0,6}") {
        let visibility = visible_set(&query, &store);
        for option in store.iter().filter(|o| o.selected) {
            prop_assert!(visibility.is_option_visible(&option.id));
        }
    }

    #[test]
    fn prop_merge_never_drops_selected(store in store_strategy(), batch in batch_strategy()) {
        let before = store.selected_ids();
        let mut merged = store;
        merge(&mut merged, &batch, 1);

        // Batch options arrive unselected, so the selected ids stay the same
        // and in the same relative order.
        prop_assert_eq!(merged.selected_ids(), before);
    }

    #[test]
    fn prop_merge_is_idempotent(store in store_strategy(), batch in batch_strategy()) {
        let mut once = store;
        merge(&mut once, &batch, 1);
        let mut twice = once.clone();
        let outcome = merge(&mut twice, &batch, 1);

        prop_assert_eq!(&twice, &once);
        prop_assert!(!outcome.changed());
    }

    #[test]
    fn prop_merge_keeps_ids_unique(store in store_strategy(), batch in batch_strategy()) {
        let mut merged = store;
        merge(&mut merged, &batch, 1);

        let ids: Vec<&OptionId> = merged.iter().map(|o| &o.id).collect();
        let unique: HashSet<&OptionId> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), unique.len());
    }
}
