//! Incremental merge of remote results into the store
//!
//! # Algorithm
//!
//! 1. Remember the selected options, in store order
//! 2. Drop every unselected option whose id is not in the batch
//! 3. Skip batch entries already in the store (selected or kept from step 2)
//! 4. Append the remaining entries, unselected and present, in batch order
//! 5. If anything was selected, pin the view on the last selected option:
//!    offset = `item_height * (selected_count - 1)`
//!
//! Selected options are never removed or reordered, and merging the same
//! batch twice leaves the store unchanged the second time.

use super::types::RemoteEntry;
use crate::options::{OptionId, OptionItem, OptionStore};
use std::collections::HashSet;
use tracing::debug;

/// Where the viewport should land after a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    /// Last selected option before the merge
    pub anchor: OptionId,
    /// Its position in the pre-merge order
    pub anchor_position: usize,
    /// Viewport offset in renderer units
    pub offset: u32,
}

/// What a merge changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Unselected options dropped because the batch no longer has them
    pub removed: Vec<OptionId>,
    /// New options appended from the batch
    pub appended: Vec<OptionId>,
    /// Scroll adjustment, absent when nothing was selected
    pub scroll: Option<ScrollTarget>,
}

impl MergeOutcome {
    /// Whether the store's option list changed
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.removed.is_empty() || !self.appended.is_empty()
    }
}

/// Reconcile a remote batch against the store
pub fn merge(store: &mut OptionStore, batch: &[RemoteEntry], item_height: u32) -> MergeOutcome {
    let checked: Vec<(usize, OptionId)> = store
        .iter()
        .enumerate()
        .filter(|(_, item)| item.selected)
        .map(|(pos, item)| (pos, item.id.clone()))
        .collect();

    let incoming: HashSet<&OptionId> = batch.iter().map(|entry| &entry.id).collect();
    let removed = store.retain(|item| item.selected || incoming.contains(&item.id));

    let mut appended = Vec::new();
    for entry in batch {
        if store.contains(&entry.id) {
            continue;
        }
        if store
            .add(OptionItem::new(entry.id.clone(), entry.label.clone()))
            .is_ok()
        {
            appended.push(entry.id.clone());
        }
    }

    let scroll = checked.last().map(|(pos, id)| {
        let steps = u32::try_from(checked.len() - 1).unwrap_or(u32::MAX);
        ScrollTarget {
            anchor: id.clone(),
            anchor_position: *pos,
            offset: item_height.saturating_mul(steps),
        }
    });

    debug!(
        batch = batch.len(),
        removed = removed.len(),
        appended = appended.len(),
        checked = checked.len(),
        "merged remote batch"
    );

    MergeOutcome {
        removed,
        appended,
        scroll,
    }
}
