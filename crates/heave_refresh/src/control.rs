//! Pull-to-refresh control
//!
//! [`RefreshControl`] owns the refresh lifecycle state, observes the host
//! viewport's vertical offset, computes a normalized trigger progress, and
//! dispatches to [`RefreshIndicator`] hooks for visual feedback. It performs
//! no drawing itself; the visual is substituted through the indicator, not
//! by modifying the state machine.
//!
//! Offset handling by state:
//!
//! - `Idle`: `progress = clamp(pull_distance / trigger_distance, 0, 1)` is
//!   forwarded to the indicator; reaching 1.0 trips the trigger.
//! - `Refreshing`: offset changes are ignored; progress forwarding is
//!   suppressed while the indeterminate animation runs.
//! - `Resetting`: once the pull distance drops below the settle epsilon the
//!   control returns to `Idle`.

use std::sync::{Arc, Mutex, Weak};

use heave_core::{Color, Rect, StateTransitions};

use crate::config::RefreshConfig;
use crate::state::{refresh_events, RefreshState};
use crate::viewport::{ObservationId, OffsetChange, ScrollViewport};

/// Visual hooks dispatched by [`RefreshControl`]
///
/// All methods default to no-ops, so an indicator only implements the
/// feedback it renders. The unit type implements this trait for controls
/// that track state without a visual.
pub trait RefreshIndicator: Send + 'static {
    /// Live pull ratio in [0.0, 1.0], forwarded while idle
    fn update_trigger_progress(&mut self, _progress: f32) {}

    /// Refresh triggered; start the indeterminate animation
    fn begin_refresh_animation(&mut self) {}

    /// Refresh work complete; play the exit animation
    fn end_refresh_animation(&mut self) {}

    /// Content bounds changed; place the visual
    fn layout(&mut self, _content_bounds: Rect) {}

    /// Tint color changed; recolor live
    fn tint_changed(&mut self, _tint: Color) {}
}

/// Bookkeeping-only indicator
impl RefreshIndicator for () {}

struct ControlInner<I: RefreshIndicator> {
    state: RefreshState,
    config: RefreshConfig,
    indicator: I,
    content_bounds: Rect,
    tint: Color,
    /// Visible height cached from the last attach/notification
    visible_height: Option<f32>,
    observation: Option<ObservationId>,
}

impl<I: RefreshIndicator> ControlInner<I> {
    fn offset_changed(&mut self, change: OffsetChange) {
        self.visible_height = Some(change.visible_height);
        let distance = change.pull_distance();

        match self.state {
            RefreshState::Idle => {
                let trigger = self.config.trigger_distance(Some(change.visible_height));
                let ratio = (distance / trigger).clamp(0.0, 1.0);
                self.indicator.update_trigger_progress(ratio);
                if ratio >= 1.0 {
                    self.trigger();
                }
            }
            RefreshState::Refreshing => {
                // Indeterminate animation running; progress input ignored
            }
            RefreshState::Resetting => {
                if distance < self.config.settle_epsilon {
                    self.apply(refresh_events::SETTLED);
                }
            }
        }
    }

    fn trigger(&mut self) {
        if self.state.on_event(refresh_events::TRIGGER).is_none() {
            tracing::trace!(state = ?self.state, "begin-refresh ignored");
            return;
        }
        self.indicator.update_trigger_progress(1.0);
        self.indicator.begin_refresh_animation();
        self.apply(refresh_events::TRIGGER);
    }

    fn end_refreshing(&mut self) {
        // The end hook fires unconditionally, even without a prior begin
        self.indicator.end_refresh_animation();
        self.apply(refresh_events::END);
    }

    fn apply(&mut self, event: u32) {
        if let Some(next) = self.state.on_event(event) {
            tracing::debug!(from = ?self.state, to = ?next, event, "refresh state transition");
            self.state = next;
        }
    }
}

/// Pull-to-refresh control: lifecycle state plus trigger-progress dispatch
///
/// The control is a cheaply clonable handle; clones share one state. One
/// clone is captured by the viewport observation, the others stay with the
/// caller for `begin_refreshing` / `end_refreshing`.
///
/// # Example
///
/// ```rust
/// use heave_refresh::{RefreshControl, ScrollViewport};
///
/// let control = RefreshControl::new(());
/// let mut viewport = ScrollViewport::new(400.0);
/// control.attach(&mut viewport);
///
/// // Drag content past the trigger distance (400 * 0.198 = 79.2)
/// viewport.set_offset(-80.0);
/// assert!(control.is_refreshing());
///
/// // Caller's async work completes
/// control.end_refreshing();
/// viewport.set_offset(0.0);
/// assert!(!control.is_refreshing());
/// ```
pub struct RefreshControl<I: RefreshIndicator> {
    inner: Arc<Mutex<ControlInner<I>>>,
}

impl<I: RefreshIndicator> Clone for RefreshControl<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: RefreshIndicator> RefreshControl<I> {
    /// Create a control with the default configuration
    pub fn new(indicator: I) -> Self {
        Self::with_config(indicator, RefreshConfig::default())
    }

    /// Create a control with an explicit configuration
    pub fn with_config(indicator: I, config: RefreshConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControlInner {
                state: RefreshState::Idle,
                config,
                indicator,
                content_bounds: Rect::ZERO,
                tint: Color::default(),
                visible_height: None,
                observation: None,
            })),
        }
    }

    /// Subscribe to the viewport's offset notifications
    ///
    /// A control attaches to one viewport at a time; a second attach without
    /// a detach is ignored.
    pub fn attach(&self, viewport: &mut ScrollViewport) {
        {
            let inner = self.inner.lock().unwrap();
            if inner.observation.is_some() {
                tracing::warn!("refresh control is already attached");
                return;
            }
        }

        let weak: Weak<Mutex<ControlInner<I>>> = Arc::downgrade(&self.inner);
        let id = viewport.observe(move |change| {
            if let Some(inner) = weak.upgrade() {
                inner.lock().unwrap().offset_changed(change);
            }
        });

        let mut inner = self.inner.lock().unwrap();
        inner.observation = Some(id);
        inner.visible_height = Some(viewport.visible_height());
        tracing::debug!(?id, "refresh control attached");
    }

    /// Remove the offset observation established by [`attach`](Self::attach)
    pub fn detach(&self, viewport: &mut ScrollViewport) {
        let mut inner = self.inner.lock().unwrap();
        match inner.observation.take() {
            Some(id) => {
                viewport.remove_observer(id);
                inner.visible_height = None;
                tracing::debug!(?id, "refresh control detached");
            }
            None => tracing::warn!("detach called on an unattached refresh control"),
        }
    }

    /// Deliver an offset snapshot directly, for hosts without a
    /// [`ScrollViewport`]
    pub fn offset_changed(&self, change: OffsetChange) {
        self.inner.lock().unwrap().offset_changed(change);
    }

    /// Enter the refreshing state imperatively
    ///
    /// Forces the progress hook to 1.0 and starts the begin animation.
    /// Idempotent while already refreshing.
    pub fn begin_refreshing(&self) {
        self.inner.lock().unwrap().trigger();
    }

    /// Signal that refresh work is complete
    ///
    /// Always safe: fires the end animation hook and moves to `Resetting`
    /// even if the control was never triggered.
    pub fn end_refreshing(&self) {
        self.inner.lock().unwrap().end_refreshing();
    }

    /// Whether the control is currently refreshing
    pub fn is_refreshing(&self) -> bool {
        self.inner.lock().unwrap().state.is_refreshing()
    }

    /// Current lifecycle state
    pub fn state(&self) -> RefreshState {
        self.inner.lock().unwrap().state
    }

    /// Current configuration
    pub fn config(&self) -> RefreshConfig {
        self.inner.lock().unwrap().config
    }

    /// Pull distance at which the trigger fires, from the cached viewport
    /// height
    pub fn trigger_distance(&self) -> f32 {
        let inner = self.inner.lock().unwrap();
        inner.config.trigger_distance(inner.visible_height)
    }

    /// Record content bounds and forward them to the indicator
    pub fn layout(&self, content_bounds: Rect) {
        let mut inner = self.inner.lock().unwrap();
        inner.content_bounds = content_bounds;
        inner.indicator.layout(content_bounds);
    }

    /// Content bounds from the last layout pass
    pub fn content_bounds(&self) -> Rect {
        self.inner.lock().unwrap().content_bounds
    }

    /// Set the tint color and recolor the indicator live
    pub fn set_tint(&self, tint: Color) {
        let mut inner = self.inner.lock().unwrap();
        inner.tint = tint;
        inner.indicator.tint_changed(tint);
    }

    /// Current tint color
    pub fn tint(&self) -> Color {
        self.inner.lock().unwrap().tint
    }

    /// Access the indicator, e.g. to sample render output
    pub fn with_indicator<R>(&self, f: impl FnOnce(&mut I) -> R) -> R {
        f(&mut self.inner.lock().unwrap().indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Indicator that records every hook invocation
    #[derive(Default)]
    struct Probe {
        progress: Vec<f32>,
        begins: usize,
        ends: usize,
    }

    impl RefreshIndicator for Arc<Mutex<Probe>> {
        fn update_trigger_progress(&mut self, progress: f32) {
            self.lock().unwrap().progress.push(progress);
        }
        fn begin_refresh_animation(&mut self) {
            self.lock().unwrap().begins += 1;
        }
        fn end_refresh_animation(&mut self) {
            self.lock().unwrap().ends += 1;
        }
    }

    fn probed() -> (RefreshControl<Arc<Mutex<Probe>>>, Arc<Mutex<Probe>>) {
        let probe = Arc::new(Mutex::new(Probe::default()));
        (RefreshControl::new(Arc::clone(&probe)), probe)
    }

    #[test]
    fn test_progress_clamped_and_forwarded_while_idle() {
        let (control, probe) = probed();
        let mut viewport = ScrollViewport::new(400.0);
        control.attach(&mut viewport);

        // trigger distance = max(74, 400 * 0.198) = 79.2
        viewport.set_offset(-40.0);
        viewport.set_offset(20.0); // scrolled up: distance negative, clamps to 0

        let probe = probe.lock().unwrap();
        assert!((probe.progress[0] - 40.0 / 79.2).abs() < 1e-4);
        assert!((probe.progress[0] - 0.505).abs() < 1e-3);
        assert_eq!(probe.progress[1], 0.0);
    }

    #[test]
    fn test_trigger_fires_at_full_progress() {
        let (control, probe) = probed();
        let mut viewport = ScrollViewport::new(400.0);
        control.attach(&mut viewport);

        // Just past the 79.2 trigger distance
        viewport.set_offset(-79.5);
        assert!(control.is_refreshing());
        let probe = probe.lock().unwrap();
        assert_eq!(probe.begins, 1);
        // The trigger forces the progress hook to 1.0
        assert_eq!(probe.progress.last(), Some(&1.0));
    }

    #[test]
    fn test_progress_suppressed_while_refreshing() {
        let (control, probe) = probed();
        let mut viewport = ScrollViewport::new(400.0);
        control.attach(&mut viewport);

        control.begin_refreshing();
        let before = probe.lock().unwrap().progress.len();
        viewport.set_offset(-30.0);
        viewport.set_offset(-60.0);
        assert_eq!(probe.lock().unwrap().progress.len(), before);
    }

    #[test]
    fn test_begin_refreshing_twice_is_noop() {
        let (control, probe) = probed();
        control.begin_refreshing();
        control.begin_refreshing();
        assert!(control.is_refreshing());
        assert_eq!(probe.lock().unwrap().begins, 1);
    }

    #[test]
    fn test_end_refreshing_while_idle_resets() {
        let (control, probe) = probed();
        control.end_refreshing();
        assert_eq!(control.state(), RefreshState::Resetting);
        assert_eq!(probe.lock().unwrap().ends, 1);

        // Settles back to idle once the pull distance decays
        control.offset_changed(OffsetChange {
            offset_y: -0.005,
            visible_height: 400.0,
        });
        assert_eq!(control.state(), RefreshState::Idle);
    }

    #[test]
    fn test_full_cycle_settles() {
        let (control, probe) = probed();
        let mut viewport = ScrollViewport::new(400.0);
        control.attach(&mut viewport);

        viewport.set_offset(-100.0);
        assert!(control.is_refreshing());

        control.end_refreshing();
        assert_eq!(control.state(), RefreshState::Resetting);

        // Host scroll physics ease the content back to rest
        viewport.set_offset(-5.0);
        assert_eq!(control.state(), RefreshState::Resetting);
        viewport.set_offset(0.0);
        assert_eq!(control.state(), RefreshState::Idle);

        let probe = probe.lock().unwrap();
        assert_eq!(probe.begins, 1);
        assert_eq!(probe.ends, 1);
    }

    #[test]
    fn test_detach_stops_observation() {
        let (control, probe) = probed();
        let mut viewport = ScrollViewport::new(400.0);
        control.attach(&mut viewport);
        control.detach(&mut viewport);

        viewport.set_offset(-40.0);
        assert!(probe.lock().unwrap().progress.is_empty());
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn test_trigger_distance_uses_fallback_when_detached() {
        let control = RefreshControl::new(());
        assert_eq!(control.trigger_distance(), 100.0);
        let mut viewport = ScrollViewport::new(600.0);
        control.attach(&mut viewport);
        assert!((control.trigger_distance() - 118.8).abs() < 1e-3);
    }

    #[test]
    fn test_short_viewport_uses_floor() {
        let (control, probe) = probed();
        let mut viewport = ScrollViewport::new(200.0);
        control.attach(&mut viewport);

        // 200 * 0.198 = 39.6 -> floored to 74
        viewport.set_offset(-37.0);
        let probe = probe.lock().unwrap();
        assert!((probe.progress[0] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_tint_propagates_live() {
        let tints = Arc::new(AtomicUsize::new(0));

        struct TintProbe(Arc<AtomicUsize>);
        impl RefreshIndicator for TintProbe {
            fn tint_changed(&mut self, _tint: Color) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let control = RefreshControl::new(TintProbe(Arc::clone(&tints)));
        control.set_tint(Color::from_hex(0x007AFF));
        assert_eq!(tints.load(Ordering::SeqCst), 1);
        assert_eq!(control.tint(), Color::from_hex(0x007AFF));
    }

    #[test]
    fn test_spinner_cycle_end_to_end() {
        use crate::spinner::SpinnerView;
        use heave_animation::AnimationScheduler;

        let scheduler = AnimationScheduler::new();
        let control = RefreshControl::new(SpinnerView::new(scheduler.handle()));
        let mut viewport = ScrollViewport::new(400.0);
        control.attach(&mut viewport);
        control.layout(Rect::new(0.0, 0.0, 320.0, 60.0));

        // Mid-pull: the arc mirrors the live ratio
        viewport.set_offset(-40.0);
        let frame = control.with_indicator(|spinner| spinner.frame());
        assert!((frame.stroke_end - 40.0 / 79.2).abs() < 1e-3);

        // Past the trigger: refresh fires, arc is full, rotation runs
        viewport.set_offset(-90.0);
        assert!(control.is_refreshing());
        scheduler.tick_by(200.0);
        let frame = control.with_indicator(|spinner| spinner.frame());
        assert_eq!(frame.stroke_end, 1.0);
        assert!(frame.rotation > 0.0);

        // Work completes; exit plays out and the content settles
        control.end_refreshing();
        scheduler.tick_by(350.0);
        viewport.set_offset(0.0);
        assert_eq!(control.state(), RefreshState::Idle);
        let frame = control.with_indicator(|spinner| spinner.frame());
        assert_eq!(frame.stroke_end, 0.0);
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn test_resetting_cannot_be_retriggered() {
        let (control, probe) = probed();
        control.end_refreshing();
        assert_eq!(control.state(), RefreshState::Resetting);
        control.begin_refreshing();
        assert_eq!(control.state(), RefreshState::Resetting);
        assert_eq!(probe.lock().unwrap().begins, 0);
    }
}
