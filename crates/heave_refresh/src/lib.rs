//! Heave Pull-to-Refresh Control
//!
//! A headless pull-to-refresh control for scroll views:
//!
//! - **RefreshControl**: owns the lifecycle state machine
//!   (idle → refreshing → resetting → idle), observes the host viewport's
//!   vertical offset, computes a normalized trigger progress, and dispatches
//!   to visual hooks
//! - **RefreshIndicator**: the hook contract visuals implement; the base
//!   control does no drawing
//! - **SpinnerView**: the stock arc-stroke visual - live pull ratio as a
//!   partial arc, rotation and pulses while refreshing, a close-and-fade
//!   exit
//! - **ScrollViewport**: minimal observable stand-in for the host scroll
//!   container
//!
//! Scroll physics, release gestures, and rasterization belong to the host
//! toolkit; the control consumes synchronous offset notifications and
//! produces [`ArcStroke`] render descriptions.
//!
//! # Example
//!
//! ```rust
//! use heave_animation::AnimationScheduler;
//! use heave_refresh::{RefreshControl, ScrollViewport, SpinnerView};
//!
//! let scheduler = AnimationScheduler::new();
//! let control = RefreshControl::new(SpinnerView::new(scheduler.handle()));
//! let mut viewport = ScrollViewport::new(400.0);
//! control.attach(&mut viewport);
//!
//! // User drags content 120 units past rest; trigger distance is
//! // max(74, 400 * 0.198) = 79.2, so the refresh fires
//! viewport.set_offset(-120.0);
//! assert!(control.is_refreshing());
//!
//! // The caller finishes its async work
//! control.end_refreshing();
//! viewport.set_offset(0.0);
//! assert!(!control.is_refreshing());
//! ```

pub mod config;
pub mod control;
pub mod spinner;
pub mod state;
pub mod viewport;

pub use config::{RefreshConfig, SpinnerStyle};
pub use control::{RefreshControl, RefreshIndicator};
pub use spinner::{ArcStroke, SpinnerView, COMET_FRACTION};
pub use state::{refresh_events, RefreshState};
pub use viewport::{ObservationId, OffsetChange, OffsetObserver, ScrollViewport};

use heave_animation::get_scheduler;

impl RefreshControl<SpinnerView> {
    /// Control wired to the stock arc spinner, using the global scheduler
    ///
    /// # Panics
    ///
    /// Panics if the global animation scheduler has not been initialized;
    /// see [`heave_animation::set_global_scheduler`].
    pub fn with_spinner() -> Self {
        Self::new(SpinnerView::new(get_scheduler()))
    }
}
