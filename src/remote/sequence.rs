//! Request sequencing for overlapping remote searches
//!
//! Requests are never cancelled, so responses can arrive out of order. Each
//! request carries a strictly increasing number and only a response for the
//! latest issued number is accepted.

/// Per-instance request counter
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    /// Create a counter that has issued nothing yet
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issue the next sequence number
    pub const fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Latest issued number, if any
    #[must_use]
    pub const fn latest(&self) -> Option<u64> {
        if self.latest == 0 {
            None
        } else {
            Some(self.latest)
        }
    }

    /// Whether a response for `seq` should be applied
    #[must_use]
    pub const fn is_current(&self, seq: u64) -> bool {
        self.latest != 0 && seq == self.latest
    }

    /// Mark every outstanding request stale without issuing a new one
    pub const fn invalidate(&mut self) {
        self.issue();
    }
}
