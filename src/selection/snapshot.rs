//! Derived selection state
//!
//! Both types here are recomputed from the store after every mutation and
//! never patched incrementally.

use crate::config::WidgetConfig;
use crate::options::{OptionId, OptionStore};
use serde::Serialize;

/// Summary of the current selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectionSnapshot {
    /// Number of selected options
    pub selected_count: usize,
    /// Labels of selected options in store order
    pub selected_labels: Vec<String>,
    /// Ids of selected options in store order
    pub selected_ids: Vec<OptionId>,
}

impl SelectionSnapshot {
    /// Recompute the snapshot from a store
    #[must_use]
    pub fn capture(store: &OptionStore) -> Self {
        let (selected_ids, selected_labels): (Vec<_>, Vec<_>) = store
            .iter()
            .filter(|item| item.selected)
            .map(|item| (item.id.clone(), item.label.clone()))
            .unzip();

        Self {
            selected_count: selected_ids.len(),
            selected_labels,
            selected_ids,
        }
    }

    /// Whether nothing is selected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.selected_count == 0
    }
}

/// One entry of the pill list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pill {
    /// Option the pill stands for
    pub id: OptionId,
    /// Text shown on the pill
    pub label: String,
}

/// What a renderer paints for the current selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DerivedState {
    /// Search-field summary: comma-joined labels (multi-choice) or the single
    /// selected label, empty when nothing is selected
    pub display_text: String,
    /// Live counter, present only when the counter is enabled
    pub counter: Option<usize>,
    /// Pill list in store order, empty unless pills are enabled
    pub pills: Vec<Pill>,
    /// Text to show when `display_text` is empty
    pub placeholder: String,
}

impl DerivedState {
    /// Derive paintable state from a snapshot
    #[must_use]
    pub fn derive(snapshot: &SelectionSnapshot, multiple: bool, config: &WidgetConfig) -> Self {
        let display_text = if multiple {
            snapshot.selected_labels.join(", ")
        } else {
            snapshot.selected_labels.first().cloned().unwrap_or_default()
        };

        let pills = if config.multi_tags {
            snapshot
                .selected_ids
                .iter()
                .zip(&snapshot.selected_labels)
                .map(|(id, label)| Pill {
                    id: id.clone(),
                    label: label.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            display_text,
            counter: config.multi_counter.then_some(snapshot.selected_count),
            pills,
            placeholder: config.strings.placeholder.clone(),
        }
    }
}
