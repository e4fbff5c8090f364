//! Widget state machines
//!
//! Widget lifecycle states are plain `Copy` enums that implement
//! [`StateTransitions`]. Events are `u32` constants declared alongside the
//! state type that consumes them, and `on_event` returns the next state or
//! `None` when the event does not transition from the current state.
//!
//! Keeping transitions in one `match` makes the reachable state graph
//! auditable at a glance.
//!
//! # Example
//!
//! ```rust
//! use heave_core::StateTransitions;
//!
//! const OPEN: u32 = 1;
//! const CLOSE: u32 = 2;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum DoorState {
//!     #[default]
//!     Closed,
//!     Open,
//! }
//!
//! impl StateTransitions for DoorState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (DoorState::Closed, OPEN) => Some(DoorState::Open),
//!             (DoorState::Open, CLOSE) => Some(DoorState::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let state = DoorState::Closed;
//! assert_eq!(state.on_event(OPEN), Some(DoorState::Open));
//! assert_eq!(state.on_event(CLOSE), None);
//! ```

use std::hash::Hash;

/// Trait for state types that handle event-driven transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}
