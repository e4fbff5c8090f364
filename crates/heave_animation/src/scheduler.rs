//! Animation scheduler
//!
//! Manages all active animations and updates them each frame. Animations are
//! implicitly registered when created through wrapper types:
//! - `AnimatedKeyframe` - keyframe tracks with repeat/ping-pong flags
//! - `AnimatedTimeline` - timelines sampling several entries from one clock
//!
//! The host either calls [`AnimationScheduler::tick`] from its own frame
//! loop, or starts the background thread, which advances animations and
//! raises a redraw flag whenever something is still moving.

use crate::keyframe::KeyframeAnimation;
use crate::timeline::{Timeline, TimelineEntryId};
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

// ============================================================================
// Global Animation Scheduler State
// ============================================================================

/// Global scheduler handle for access from anywhere in the application
static GLOBAL_SCHEDULER: OnceLock<SchedulerHandle> = OnceLock::new();

/// Set the global animation scheduler handle
///
/// This should be called once at app startup after creating the
/// AnimationScheduler.
///
/// # Panics
///
/// Panics if called more than once.
pub fn set_global_scheduler(handle: SchedulerHandle) {
    if GLOBAL_SCHEDULER.set(handle).is_err() {
        panic!("set_global_scheduler() called more than once");
    }
}

/// Get the global animation scheduler handle
///
/// # Panics
///
/// Panics if `set_global_scheduler()` has not been called.
pub fn get_scheduler() -> SchedulerHandle {
    GLOBAL_SCHEDULER
        .get()
        .expect("Animation scheduler not initialized. Call set_global_scheduler() at app startup.")
        .clone()
}

/// Try to get the global scheduler (returns None if not initialized)
pub fn try_get_scheduler() -> Option<SchedulerHandle> {
    GLOBAL_SCHEDULER.get().cloned()
}

/// Check if the global scheduler has been initialized
pub fn is_scheduler_initialized() -> bool {
    GLOBAL_SCHEDULER.get().is_some()
}

new_key_type! {
    /// Handle to a registered keyframe animation
    pub struct KeyframeId;
    /// Handle to a registered timeline
    pub struct TimelineId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    keyframes: SlotMap<KeyframeId, KeyframeAnimation>,
    timelines: SlotMap<TimelineId, Timeline>,
    last_frame: Instant,
    target_fps: u32,
}

/// Callback type for waking up the main thread from the animation thread
///
/// Called when there are active animations that need to be rendered. The
/// callback should wake up the event loop.
pub type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// The animation scheduler that ticks all active animations
///
/// Typically held by the application context and shared via
/// [`SchedulerHandle`]. Animations register themselves implicitly when
/// created.
///
/// # Background Thread Mode
///
/// The scheduler can run on its own background thread via
/// `start_background()`, so animations continue even while the host event
/// loop is parked.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    /// Stop signal for the background thread
    stop_flag: Arc<AtomicBool>,
    /// Set by the background thread when animations need redraw; the main
    /// thread checks and clears this to request redraws
    needs_redraw: Arc<AtomicBool>,
    /// Background thread handle (if running)
    thread_handle: Option<JoinHandle<()>>,
    /// Optional callback to wake up the main thread
    wake_callback: Option<WakeCallback>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                keyframes: SlotMap::with_key(),
                timelines: SlotMap::with_key(),
                last_frame: Instant::now(),
                target_fps: 120,
            })),
            stop_flag: Arc::new(AtomicBool::new(false)),
            needs_redraw: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
            wake_callback: None,
        }
    }

    /// Set a wake callback invoked from the background thread when active
    /// animations need a redraw
    pub fn set_wake_callback<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.wake_callback = Some(Arc::new(callback));
    }

    /// Start the scheduler on a background thread
    ///
    /// The thread runs at the configured target FPS and sets the
    /// `needs_redraw` flag whenever animations are active. The main thread
    /// should call `take_needs_redraw()` and request a redraw when it
    /// returns true.
    pub fn start_background(&mut self) {
        if self.thread_handle.is_some() {
            return; // Already running
        }

        let inner = Arc::clone(&self.inner);
        let stop_flag = Arc::clone(&self.stop_flag);
        let needs_redraw = Arc::clone(&self.needs_redraw);
        let wake_callback = self.wake_callback.clone();
        let fps = self.inner.lock().unwrap().target_fps.max(1);

        self.thread_handle = Some(thread::spawn(move || {
            let frame_duration = Duration::from_micros(1_000_000 / fps as u64);

            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();

                let has_active = {
                    let mut inner = inner.lock().unwrap();
                    let now = Instant::now();
                    let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
                    inner.last_frame = now;

                    for (_, keyframe) in inner.keyframes.iter_mut() {
                        keyframe.tick(dt_ms);
                    }
                    for (_, timeline) in inner.timelines.iter_mut() {
                        timeline.tick(dt_ms);
                    }

                    // Finished animations are NOT removed here; they are only
                    // removed when their wrapper drops, so they can restart.
                    inner.keyframes.iter().any(|(_, k)| k.is_playing())
                        || inner.timelines.iter().any(|(_, t)| t.is_playing())
                };

                if has_active {
                    needs_redraw.store(true, Ordering::Release);
                    if let Some(ref callback) = wake_callback {
                        callback();
                    }
                }

                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }));
    }

    /// Stop the background thread
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    /// Check if the background thread is running
    pub fn is_background_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Check and clear the needs_redraw flag in one atomic swap
    pub fn take_needs_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Acquire)
    }

    /// Manually request a redraw
    pub fn request_redraw(&self) {
        self.needs_redraw.store(true, Ordering::Release);
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.inner.lock().unwrap().target_fps = fps;
    }

    /// Tick all animations from the host frame loop
    ///
    /// Returns true if any animations are still active (need another tick).
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        Self::advance(&mut inner, dt_ms)
    }

    /// Tick all animations by an explicit delta, for hosts with their own
    /// clock (and for tests)
    pub fn tick_by(&self, dt_ms: f32) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.last_frame = Instant::now();
        Self::advance(&mut inner, dt_ms)
    }

    fn advance(inner: &mut SchedulerInner, dt_ms: f32) -> bool {
        for (_, keyframe) in inner.keyframes.iter_mut() {
            keyframe.tick(dt_ms);
        }
        for (_, timeline) in inner.timelines.iter_mut() {
            timeline.tick(dt_ms);
        }
        inner.keyframes.iter().any(|(_, k)| k.is_playing())
            || inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.keyframes.iter().any(|(_, k)| k.is_playing())
            || inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Number of registered keyframe animations
    pub fn keyframe_count(&self) -> usize {
        self.inner.lock().unwrap().keyframes.len()
    }

    /// Number of registered timelines
    pub fn timeline_count(&self) -> usize {
        self.inner.lock().unwrap().timelines.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.stop_background();
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to components that need to register animations. It won't prevent
/// the scheduler from being dropped; operations on a dead scheduler are
/// no-ops.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Keyframe Operations
    // =========================================================================

    /// Register a keyframe animation and return its ID
    pub fn register_keyframe(&self, keyframe: KeyframeAnimation) -> Option<KeyframeId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.lock().unwrap();
            // Reset last_frame so a new animation doesn't absorb a huge dt
            // accumulated while nothing was registered.
            guard.last_frame = Instant::now();
            guard.keyframes.insert(keyframe)
        })
    }

    /// Get the current value of a keyframe animation
    pub fn keyframe_value(&self, id: KeyframeId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().keyframes.get(id).map(|k| k.value()))
    }

    /// Get keyframe animation progress (0.0 to 1.0)
    pub fn keyframe_progress(&self, id: KeyframeId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().keyframes.get(id).map(|k| k.progress()))
    }

    /// Check if a keyframe animation is playing
    pub fn is_keyframe_playing(&self, id: KeyframeId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .keyframes
                    .get(id)
                    .map(|k| k.is_playing())
            })
            .unwrap_or(false)
    }

    /// Start a keyframe animation
    pub fn start_keyframe(&self, id: KeyframeId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(keyframe) = inner.lock().unwrap().keyframes.get_mut(id) {
                keyframe.start();
            }
        }
    }

    /// Restart a keyframe animation from the beginning
    pub fn restart_keyframe(&self, id: KeyframeId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(keyframe) = inner.lock().unwrap().keyframes.get_mut(id) {
                keyframe.restart();
            }
        }
    }

    /// Stop a keyframe animation
    pub fn stop_keyframe(&self, id: KeyframeId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(keyframe) = inner.lock().unwrap().keyframes.get_mut(id) {
                keyframe.stop();
            }
        }
    }

    /// Remove a keyframe animation
    pub fn remove_keyframe(&self, id: KeyframeId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().keyframes.remove(id);
        }
    }

    // =========================================================================
    // Timeline Operations
    // =========================================================================

    /// Register a timeline and return its ID
    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.lock().unwrap();
            guard.last_frame = Instant::now();
            guard.timelines.insert(timeline)
        })
    }

    /// Sample the current value of a timeline entry
    pub fn timeline_value(&self, id: TimelineId, entry: TimelineEntryId) -> Option<f32> {
        self.with_timeline(id, |timeline| timeline.get(entry)).flatten()
    }

    /// Check if a timeline is playing
    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .timelines
                    .get(id)
                    .map(|t| t.is_playing())
            })
            .unwrap_or(false)
    }

    /// Check if a non-looping timeline has finished
    pub fn is_timeline_finished(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .timelines
                    .get(id)
                    .map(|t| t.is_finished())
            })
            .unwrap_or(false)
    }

    /// Start a timeline
    pub fn start_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(timeline) = inner.lock().unwrap().timelines.get_mut(id) {
                timeline.start();
            }
        }
    }

    /// Restart a timeline from the beginning
    pub fn restart_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(timeline) = inner.lock().unwrap().timelines.get_mut(id) {
                timeline.restart();
            }
        }
    }

    /// Stop a timeline
    pub fn stop_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(timeline) = inner.lock().unwrap().timelines.get_mut(id) {
                timeline.stop();
            }
        }
    }

    /// Remove a timeline
    pub fn remove_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().timelines.remove(id);
        }
    }

    /// Access a timeline to add entries or sample values
    ///
    /// Returns None if the scheduler is dropped or the timeline doesn't
    /// exist.
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.inner.upgrade().and_then(|inner| {
            inner
                .lock()
                .unwrap()
                .timelines
                .get_mut(id)
                .map(|timeline| f(timeline))
        })
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Keyframe
// ============================================================================

/// A keyframe animation that automatically registers with the scheduler
///
/// Built with the builder methods, then registered via [`AnimatedKeyframe::build`].
/// Deregisters from the scheduler when dropped.
///
/// # Example
///
/// ```ignore
/// use heave_animation::{AnimatedKeyframe, Easing};
///
/// let rotation = AnimatedKeyframe::new(handle, 800)
///     .keyframe(0.0, 0.0, Easing::Linear)
///     .keyframe(1.0, std::f32::consts::TAU, Easing::Linear)
///     .iterations(-1)
///     .auto_start(true)
///     .build();
///
/// // Each frame, after the scheduler ticks:
/// let angle = rotation.get();
/// ```
pub struct AnimatedKeyframe {
    handle: SchedulerHandle,
    id: Option<KeyframeId>,
    track: Option<KeyframeAnimation>,
    auto_start: bool,
    /// Value reported when the scheduler is gone: the first keyframe (the
    /// track's rest value)
    rest_value: f32,
}

impl AnimatedKeyframe {
    /// Create a new animation with the given iteration duration
    pub fn new(handle: SchedulerHandle, duration_ms: u32) -> Self {
        Self {
            handle,
            id: None,
            track: Some(KeyframeAnimation::new(duration_ms)),
            auto_start: false,
            rest_value: 0.0,
        }
    }

    /// Add a keyframe (builder pattern)
    pub fn keyframe(mut self, time: f32, value: f32, easing: crate::Easing) -> Self {
        if let Some(track) = self.track.take() {
            self.track = Some(track.keyframe(time, value, easing));
        }
        self
    }

    /// Set the iteration count (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        if let Some(track) = self.track.take() {
            self.track = Some(track.iterations(count));
        }
        self
    }

    /// Enable or disable ping-pong (autoreverse) playback
    pub fn ping_pong(mut self, enabled: bool) -> Self {
        if let Some(track) = self.track.take() {
            self.track = Some(track.ping_pong(enabled));
        }
        self
    }

    /// Set a delay before the first iteration, in milliseconds
    pub fn delay(mut self, delay_ms: u32) -> Self {
        if let Some(track) = self.track.take() {
            self.track = Some(track.delay(delay_ms));
        }
        self
    }

    /// Start playback as soon as the animation is built
    pub fn auto_start(mut self, enabled: bool) -> Self {
        self.auto_start = enabled;
        self
    }

    /// Register the configured track with the scheduler
    pub fn build(mut self) -> Self {
        if let Some(mut track) = self.track.take() {
            self.rest_value = track.sample_at(0.0);
            if self.auto_start {
                track.start();
            }
            self.id = self.handle.register_keyframe(track);
            if self.id.is_none() {
                tracing::warn!("AnimatedKeyframe built against a dead scheduler");
            }
        }
        self
    }

    /// Get the current animated value
    pub fn get(&self) -> f32 {
        self.id
            .and_then(|id| self.handle.keyframe_value(id))
            .unwrap_or(self.rest_value)
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        self.id
            .and_then(|id| self.handle.keyframe_progress(id))
            .unwrap_or(0.0)
    }

    /// Start the animation (if not already playing)
    pub fn start(&self) {
        if let Some(id) = self.id {
            self.handle.start_keyframe(id);
        }
    }

    /// Restart the animation from the beginning
    pub fn restart(&self) {
        if let Some(id) = self.id {
            self.handle.restart_keyframe(id);
        }
    }

    /// Stop the animation
    pub fn stop(&self) {
        if let Some(id) = self.id {
            self.handle.stop_keyframe(id);
        }
    }

    /// Check if the animation is currently playing
    pub fn is_playing(&self) -> bool {
        self.id
            .map(|id| self.handle.is_keyframe_playing(id))
            .unwrap_or(false)
    }
}

impl Drop for AnimatedKeyframe {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_keyframe(id);
        }
    }
}

// ============================================================================
// Animated Timeline
// ============================================================================

/// A timeline that automatically registers with the scheduler
///
/// Entries are added before [`AnimatedTimeline::build`]; the returned
/// `TimelineEntryId`s sample values afterwards. Deregisters from the
/// scheduler when dropped.
pub struct AnimatedTimeline {
    handle: SchedulerHandle,
    id: Option<TimelineId>,
    timeline: Option<Timeline>,
    auto_start: bool,
}

impl AnimatedTimeline {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            id: None,
            timeline: Some(Timeline::new()),
            auto_start: false,
        }
    }

    /// Add an entry with linear easing, returning its handle
    pub fn add(&mut self, offset_ms: u32, duration_ms: u32, from: f32, to: f32) -> TimelineEntryId {
        self.add_eased(offset_ms, duration_ms, from, to, crate::Easing::Linear)
    }

    /// Add an entry with an explicit easing function, returning its handle
    pub fn add_eased(
        &mut self,
        offset_ms: u32,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: crate::Easing,
    ) -> TimelineEntryId {
        self.timeline
            .as_mut()
            .expect("entries must be added before build()")
            .add_eased(offset_ms, duration_ms, from, to, easing)
    }

    /// Set the loop count (-1 for infinite)
    pub fn set_loop(&mut self, count: i32) {
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.set_loop(count);
        }
    }

    /// Start playback as soon as the timeline is built
    pub fn auto_start(mut self, enabled: bool) -> Self {
        self.auto_start = enabled;
        self
    }

    /// Register the configured timeline with the scheduler
    pub fn build(mut self) -> Self {
        if let Some(mut timeline) = self.timeline.take() {
            if self.auto_start {
                timeline.start();
            }
            self.id = self.handle.register_timeline(timeline);
            if self.id.is_none() {
                tracing::warn!("AnimatedTimeline built against a dead scheduler");
            }
        }
        self
    }

    /// Sample the current value of an entry
    pub fn get(&self, entry: TimelineEntryId) -> Option<f32> {
        self.id.and_then(|id| self.handle.timeline_value(id, entry))
    }

    /// Start the timeline (if not already playing)
    pub fn start(&self) {
        if let Some(id) = self.id {
            self.handle.start_timeline(id);
        }
    }

    /// Restart the timeline from the beginning
    pub fn restart(&self) {
        if let Some(id) = self.id {
            self.handle.restart_timeline(id);
        }
    }

    /// Stop the timeline
    pub fn stop(&self) {
        if let Some(id) = self.id {
            self.handle.stop_timeline(id);
        }
    }

    /// Check if the timeline is currently playing
    pub fn is_playing(&self) -> bool {
        self.id
            .map(|id| self.handle.is_timeline_playing(id))
            .unwrap_or(false)
    }

    /// Check if a non-looping timeline has finished
    pub fn is_finished(&self) -> bool {
        self.id
            .map(|id| self.handle.is_timeline_finished(id))
            .unwrap_or(false)
    }
}

impl Drop for AnimatedTimeline {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_timeline(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Easing;

    #[test]
    fn test_tick_advances_registered_keyframe() {
        let scheduler = AnimationScheduler::new();
        let anim = AnimatedKeyframe::new(scheduler.handle(), 1000)
            .keyframe(0.0, 0.0, Easing::Linear)
            .keyframe(1.0, 100.0, Easing::Linear)
            .auto_start(true)
            .build();

        assert!(scheduler.has_active_animations());
        scheduler.tick_by(500.0);
        assert!((anim.get() - 50.0).abs() < 1e-3);
        scheduler.tick_by(600.0);
        assert!(!anim.is_playing());
        assert!((anim.get() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrapper_drop_removes_animation() {
        let scheduler = AnimationScheduler::new();
        {
            let _anim = AnimatedKeyframe::new(scheduler.handle(), 800)
                .keyframe(0.0, 0.0, Easing::Linear)
                .keyframe(1.0, 1.0, Easing::Linear)
                .auto_start(true)
                .build();
            assert_eq!(scheduler.keyframe_count(), 1);
        }
        assert_eq!(scheduler.keyframe_count(), 0);
    }

    #[test]
    fn test_timeline_entries_sampled_after_build() {
        let scheduler = AnimationScheduler::new();
        let mut tl = AnimatedTimeline::new(scheduler.handle());
        let stroke = tl.add_eased(0, 300, 0.15, 1.0, Easing::EaseIn);
        let fade = tl.add_eased(0, 300, 1.0, 0.0, Easing::EaseIn);
        let tl = tl.auto_start(true).build();

        scheduler.tick_by(300.0);
        assert!(!tl.is_playing());
        assert!(tl.is_finished());
        assert_eq!(tl.get(stroke), Some(1.0));
        assert_eq!(tl.get(fade), Some(0.0));
    }

    #[test]
    fn test_infinite_animation_keeps_scheduler_active() {
        let scheduler = AnimationScheduler::new();
        let anim = AnimatedKeyframe::new(scheduler.handle(), 100)
            .keyframe(0.0, 1.0, Easing::Linear)
            .keyframe(1.0, 1.18, Easing::Linear)
            .ping_pong(true)
            .iterations(-1)
            .auto_start(true)
            .build();

        for _ in 0..50 {
            assert!(scheduler.tick_by(16.0));
        }
        let value = anim.get();
        assert!((1.0..=1.18).contains(&value));
    }

    #[test]
    fn test_dead_scheduler_is_noop() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };
        assert!(!handle.is_alive());
        let anim = AnimatedKeyframe::new(handle, 800)
            .keyframe(0.0, 0.5, Easing::Linear)
            .keyframe(1.0, 1.0, Easing::Linear)
            .auto_start(true)
            .build();
        // Falls back to the rest value; nothing panics
        assert_eq!(anim.get(), 0.5);
        assert!(!anim.is_playing());
    }

    #[test]
    fn test_background_thread_raises_redraw_flag() {
        let mut scheduler = AnimationScheduler::new();
        let _anim = AnimatedKeyframe::new(scheduler.handle(), 10_000)
            .keyframe(0.0, 0.0, Easing::Linear)
            .keyframe(1.0, 1.0, Easing::Linear)
            .auto_start(true)
            .build();

        scheduler.start_background();
        assert!(scheduler.is_background_running());
        // Give the thread a few frames
        std::thread::sleep(std::time::Duration::from_millis(60));
        scheduler.stop_background();
        assert!(scheduler.take_needs_redraw());
    }
}
