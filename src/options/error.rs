//! Option store error types

use super::types::{GroupId, OptionId};
use thiserror::Error;

/// Errors raised by `OptionStore` mutations
///
/// None of these are fatal to a widget instance: a rejected `add` leaves the
/// store unchanged, and an unknown id in a toggle is treated as a no-op by the
/// widget layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An option with this id is already in the store
    #[error("Duplicate option id: {0}")]
    DuplicateId(OptionId),

    /// No option with this id is in the store
    #[error("Unknown option id: {0}")]
    UnknownId(OptionId),

    /// No group with this id is in the store
    #[error("Unknown group id: {0}")]
    UnknownGroup(GroupId),
}
