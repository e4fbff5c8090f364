//! Refresh lifecycle state machine
//!
//! State machine for the pull-to-refresh lifecycle:
//!
//! ```text
//!                TRIGGER
//!     Idle ────────────────► Refreshing
//!       ▲  ╲                     │
//!       │   ╲ END                │ END
//!       │    ╲                   ▼
//!       └───────────────── Resetting
//!          SETTLED
//! ```
//!
//! # Events
//!
//! - `TRIGGER`: trigger progress reached 1.0, or an explicit begin call
//! - `END`: the caller signalled that refresh work is complete
//! - `SETTLED`: observed pull distance decayed below the settle epsilon
//!
//! An `END` while `Idle` still enters `Resetting` (the diagonal edge above);
//! the state auto-reverts to `Idle` once the pull distance settles. Callers
//! may therefore call `end_refreshing` unconditionally.
//!
//! While `Refreshing`, offset changes carry no events at all; the running
//! animation is indeterminate and progress input is ignored.

use heave_core::StateTransitions;

/// Events consumed by [`RefreshState`]
pub mod refresh_events {
    /// Trigger progress reached 1.0, or explicit begin-refresh call
    pub const TRIGGER: u32 = 1;
    /// Caller signalled refresh work complete
    pub const END: u32 = 2;
    /// Pull distance decayed below the settle epsilon
    pub const SETTLED: u32 = 3;
}

/// Pull-to-refresh lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshState {
    /// Tracking the live pull ratio, nothing running
    #[default]
    Idle,
    /// Indeterminate refresh animation running, waiting for the caller
    Refreshing,
    /// Exit animation played, waiting for the pull distance to settle
    Resetting,
}

impl RefreshState {
    /// Returns true while refresh work is in flight
    pub fn is_refreshing(&self) -> bool {
        matches!(self, RefreshState::Refreshing)
    }

    /// Returns true while waiting for the view to settle back to rest
    pub fn is_resetting(&self) -> bool {
        matches!(self, RefreshState::Resetting)
    }
}

impl StateTransitions for RefreshState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use refresh_events::*;

        match (self, event) {
            (RefreshState::Idle, TRIGGER) => Some(RefreshState::Refreshing),
            // End without a prior begin: still resets (see module docs)
            (RefreshState::Idle, END) => Some(RefreshState::Resetting),
            (RefreshState::Refreshing, END) => Some(RefreshState::Resetting),
            (RefreshState::Resetting, SETTLED) => Some(RefreshState::Idle),
            _ => None,
        }
    }
}
