//! Heave Animation System
//!
//! Keyframe animations, timeline orchestration, and the frame scheduler.
//!
//! # Features
//!
//! - **Keyframe Animations**: Timed f32 tracks with easing functions
//! - **Repeat Flags**: Infinite repeat and ping-pong (autoreverse) scheduling
//! - **Timelines**: Multiple offset entries sampled from one clock
//! - **Scheduler**: Central registry ticked per frame, or by a background
//!   thread that raises a redraw flag
//! - **RAII Wrappers**: `AnimatedKeyframe`/`AnimatedTimeline` deregister on drop
//!
//! Animations here are declarative: widgets describe curves once, the
//! scheduler advances them, and widgets sample resolved values when they
//! produce render output.

pub mod easing;
pub mod keyframe;
pub mod scheduler;
pub mod timeline;

pub use easing::Easing;
pub use keyframe::{Keyframe, KeyframeAnimation, PlayDirection};
pub use scheduler::{
    get_scheduler, is_scheduler_initialized, set_global_scheduler, try_get_scheduler,
    AnimatedKeyframe, AnimatedTimeline, AnimationScheduler, KeyframeId, SchedulerHandle,
    TimelineId, WakeCallback,
};
pub use timeline::{Timeline, TimelineEntryId};
