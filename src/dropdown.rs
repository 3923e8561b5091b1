//! Dropdown visibility state machine
//!
//! ```text
//!            focus
//!   Closed ─────────▶ Open
//!     ▲                 │
//!     └─────────────────┘
//!   pointer outside / dismiss key
//! ```
//!
//! Transitions are synchronous. Events that do not apply to the current
//! state (focus while open, dismissal while closed) are no-ops.

/// Whether the checklist overlay is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    /// Overlay hidden
    #[default]
    Closed,
    /// Overlay shown
    Open,
}

/// Inputs that drive the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEvent {
    /// The search field received focus
    Focus,
    /// A pointer gesture landed outside the widget
    PointerOutside,
    /// A dismissal key was pressed
    DismissKey,
}

/// Dropdown state holder
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    state: DropdownState,
}

impl Dropdown {
    /// Create a closed dropdown
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DropdownState::Closed,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> DropdownState {
        self.state
    }

    /// Whether the overlay is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, DropdownState::Open)
    }

    /// Apply an event, returning whether the state changed
    pub fn handle(&mut self, event: DropdownEvent) -> bool {
        let next = match (self.state, event) {
            (DropdownState::Closed, DropdownEvent::Focus) => DropdownState::Open,
            (DropdownState::Open, DropdownEvent::PointerOutside | DropdownEvent::DismissKey) => {
                DropdownState::Closed
            }
            (state, _) => state,
        };

        let changed = next != self.state;
        self.state = next;
        changed
    }
}
