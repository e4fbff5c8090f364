//! Arc-stroke spinner
//!
//! The stock visual for [`RefreshControl`](crate::RefreshControl): a partial
//! circular arc whose stroke window mirrors the pull ratio while idle, spins
//! and pulses while refreshing, and closes/fades on exit. The view is
//! headless; hosts sample [`SpinnerView::frame`] each render tick and stroke
//! the returned [`ArcStroke`].

use std::f32::consts::{FRAC_PI_2, TAU};

use heave_animation::{
    AnimatedKeyframe, AnimatedTimeline, Easing, SchedulerHandle, TimelineEntryId,
};
use heave_core::{Color, Point, Rect, Size};

use crate::config::SpinnerStyle;
use crate::control::RefreshIndicator;

/// Stroke-start as a fraction of stroke-end, keeping a short comet tail
/// instead of an arc growing from zero length
pub const COMET_FRACTION: f32 = 0.15;

/// Render description of the spinner for one frame
///
/// `stroke_start`/`stroke_end` are fractions of the full sweep measured from
/// `start_angle`; a window with start >= end strokes nothing. `rotation` is
/// applied around the center, `scale` around the center too, and `opacity`
/// multiplies the color's alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcStroke {
    pub center: Point,
    pub radius: f32,
    /// Twelve o'clock; the sweep runs clockwise from here
    pub start_angle: f32,
    pub stroke_start: f32,
    pub stroke_end: f32,
    pub line_width: f32,
    /// Radians around the center
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: Color,
}

/// What the spinner is currently doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpinnerPhase {
    /// Stroke window mirrors the last progress value
    Static,
    /// Indeterminate rotation and pulses running
    Spinning,
    /// Exit timeline playing; resets to `Static` when it finishes
    Exiting,
}

struct ExitAnimation {
    timeline: AnimatedTimeline,
    stroke: TimelineEntryId,
    fade: TimelineEntryId,
}

/// Arc-stroke spinner view
pub struct SpinnerView {
    handle: SchedulerHandle,
    style: SpinnerStyle,
    bounds: Rect,
    progress: f32,
    stroke_start: f32,
    stroke_end: f32,
    tint: Color,
    phase: SpinnerPhase,
    rotation: Option<AnimatedKeyframe>,
    pulse_scale: Option<AnimatedKeyframe>,
    pulse_width: Option<AnimatedKeyframe>,
    exit: Option<ExitAnimation>,
}

impl SpinnerView {
    /// Create a spinner with the default style
    pub fn new(handle: SchedulerHandle) -> Self {
        Self::with_style(handle, SpinnerStyle::default())
    }

    /// Create a spinner with an explicit style
    pub fn with_style(handle: SchedulerHandle, style: SpinnerStyle) -> Self {
        Self {
            handle,
            style,
            bounds: Size::new(style.diameter, style.diameter).to_rect(),
            // The stored progress starts at 1.0 but the stroke window starts
            // empty, matching a freshly inserted control
            progress: 1.0,
            stroke_start: 0.0,
            stroke_end: 0.0,
            tint: Color::from_hex(0x007AFF),
            phase: SpinnerPhase::Static,
            rotation: None,
            pulse_scale: None,
            pulse_width: None,
            exit: None,
        }
    }

    /// Current progress value
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Update the stroke window synchronously from a pull ratio
    ///
    /// # Panics
    ///
    /// Panics if `progress` is outside [0.0, 1.0]; out-of-range values are a
    /// programming-contract violation, not a recoverable error.
    pub fn set_progress(&mut self, progress: f32) {
        assert!(
            (0.0..=1.0).contains(&progress),
            "spinner progress out of range: {progress}"
        );
        self.progress = progress;
        self.stroke_end = progress;
        self.stroke_start = progress * COMET_FRACTION;
    }

    /// Whether the indeterminate animations are running
    pub fn is_animating(&self) -> bool {
        self.phase == SpinnerPhase::Spinning
    }

    /// Start the indeterminate animations: continuous rotation plus scale
    /// and stroke-width pulses, all additive over the static stroke window
    pub fn begin_animating(&mut self) {
        self.exit = None;
        self.rotation = Some(
            AnimatedKeyframe::new(self.handle.clone(), self.style.spin_duration_ms)
                .keyframe(0.0, 0.0, Easing::Linear)
                .keyframe(1.0, TAU, Easing::Linear)
                .iterations(-1)
                .auto_start(true)
                .build(),
        );
        self.pulse_scale = Some(
            AnimatedKeyframe::new(self.handle.clone(), self.style.pulse_duration_ms)
                .keyframe(0.0, 1.0, Easing::Linear)
                .keyframe(1.0, self.style.pulse_scale, Easing::Linear)
                .ping_pong(true)
                .iterations(-1)
                .auto_start(true)
                .build(),
        );
        self.pulse_width = Some(
            AnimatedKeyframe::new(self.handle.clone(), self.style.pulse_duration_ms)
                .keyframe(0.0, self.style.line_width, Easing::Linear)
                .keyframe(1.0, self.style.pulse_line_width, Easing::Linear)
                .ping_pong(true)
                .iterations(-1)
                .auto_start(true)
                .build(),
        );
        self.phase = SpinnerPhase::Spinning;
        tracing::debug!("spinner animating");
    }

    /// Play the exit sequence: the arc closes (stroke-start runs to 1) while
    /// the stroke fades out, then the view resets to inert
    pub fn end_animating(&mut self) {
        self.pulse_scale = None;
        self.pulse_width = None;

        let mut timeline = AnimatedTimeline::new(self.handle.clone());
        let stroke = timeline.add_eased(
            0,
            self.style.exit_duration_ms,
            COMET_FRACTION,
            1.0,
            Easing::EaseIn,
        );
        let fade = timeline.add_eased(0, self.style.exit_duration_ms, 1.0, 0.0, Easing::EaseIn);
        let timeline = timeline.auto_start(true).build();

        self.exit = Some(ExitAnimation {
            timeline,
            stroke,
            fade,
        });
        self.phase = SpinnerPhase::Exiting;
        tracing::debug!("spinner exiting");
    }

    /// Sample the spinner for the current frame
    ///
    /// Resolves all animated channels from the scheduler. Exit completion is
    /// detected here: once the exit timeline finishes, the stroke window
    /// resets to zero, the rotation is removed, and the view is inert and
    /// ready for reuse.
    pub fn frame(&mut self) -> ArcStroke {
        if self.phase == SpinnerPhase::Exiting {
            let finished = self
                .exit
                .as_ref()
                .map(|exit| exit.timeline.is_finished())
                .unwrap_or(true);
            if finished {
                self.reset_after_exit();
            }
        }

        let (stroke_start, opacity) = match (&self.phase, &self.exit) {
            (SpinnerPhase::Exiting, Some(exit)) => (
                exit.timeline.get(exit.stroke).unwrap_or(COMET_FRACTION),
                exit.timeline.get(exit.fade).unwrap_or(1.0),
            ),
            _ => (self.stroke_start, 1.0),
        };

        let side = self.bounds.size.min_side();
        ArcStroke {
            center: self.bounds.center(),
            radius: (side - 2.0) / 2.0,
            start_angle: -FRAC_PI_2,
            stroke_start,
            stroke_end: self.stroke_end,
            line_width: self
                .pulse_width
                .as_ref()
                .map(AnimatedKeyframe::get)
                .unwrap_or(self.style.line_width),
            rotation: self
                .rotation
                .as_ref()
                .map(AnimatedKeyframe::get)
                .unwrap_or(0.0),
            scale: self
                .pulse_scale
                .as_ref()
                .map(AnimatedKeyframe::get)
                .unwrap_or(1.0),
            opacity,
            color: self.tint,
        }
    }

    fn reset_after_exit(&mut self) {
        self.rotation = None;
        self.exit = None;
        self.stroke_start = 0.0;
        self.stroke_end = 0.0;
        self.phase = SpinnerPhase::Static;
        tracing::debug!("spinner reset");
    }
}

impl RefreshIndicator for SpinnerView {
    fn update_trigger_progress(&mut self, progress: f32) {
        self.set_progress(progress);
    }

    fn begin_refresh_animation(&mut self) {
        self.begin_animating();
    }

    fn end_refresh_animation(&mut self) {
        self.end_animating();
    }

    fn layout(&mut self, content_bounds: Rect) {
        self.bounds = Rect::centered_at(
            content_bounds.center(),
            Size::new(self.style.diameter, self.style.diameter),
        );
    }

    fn tint_changed(&mut self, tint: Color) {
        self.tint = tint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heave_animation::AnimationScheduler;

    fn spinner(scheduler: &AnimationScheduler) -> SpinnerView {
        SpinnerView::new(scheduler.handle())
    }

    #[test]
    fn test_stroke_window_tracks_progress() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);

        view.set_progress(0.6);
        let frame = view.frame();
        assert!((frame.stroke_end - 0.6).abs() < 1e-6);
        assert!((frame.stroke_start - 0.6 * COMET_FRACTION).abs() < 1e-6);
    }

    #[test]
    fn test_comet_relationship_holds_across_range() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);

        for i in 0..=10 {
            let p = i as f32 / 10.0;
            view.set_progress(p);
            let frame = view.frame();
            assert!((frame.stroke_start - COMET_FRACTION * frame.stroke_end).abs() < 1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_progress_above_one_fails_contract() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.set_progress(1.01);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_negative_progress_fails_contract() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.set_progress(-0.1);
    }

    #[test]
    fn test_initial_stroke_window_is_empty() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        let frame = view.frame();
        assert_eq!(frame.stroke_start, 0.0);
        assert_eq!(frame.stroke_end, 0.0);
        assert_eq!(view.progress(), 1.0);
    }

    #[test]
    fn test_begin_animating_drives_rotation_and_pulses() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.set_progress(1.0);
        view.begin_animating();
        assert!(view.is_animating());

        // Quarter of a rotation period: 200ms of 800ms
        scheduler.tick_by(200.0);
        let frame = view.frame();
        assert!((frame.rotation - TAU / 4.0).abs() < 1e-3);
        // 200ms of the 100ms ping-pong pulse: back at the rest values
        assert!((frame.scale - 1.0).abs() < 1e-3);
        assert!((frame.line_width - 1.0).abs() < 1e-3);
        // Static stroke geometry untouched by the additive animations
        assert!((frame.stroke_end - 1.0).abs() < 1e-6);
        assert!((frame.stroke_start - COMET_FRACTION).abs() < 1e-6);

        // At the next half-pulse boundary both pulse channels peak
        scheduler.tick_by(100.0);
        let frame = view.frame();
        assert!((frame.scale - 1.18).abs() < 1e-3);
        assert!((frame.line_width - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_exit_closes_arc_and_fades() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.set_progress(1.0);
        view.begin_animating();
        scheduler.tick_by(400.0);
        view.end_animating();
        assert!(!view.is_animating());

        scheduler.tick_by(150.0);
        let frame = view.frame();
        // Ease-in at t=0.5 -> 0.25 of the way through
        assert!((frame.stroke_start - (COMET_FRACTION + 0.85 * 0.25)).abs() < 1e-3);
        assert!((frame.opacity - 0.75).abs() < 1e-3);
        // Rotation keeps running until the exit completes
        assert!(frame.rotation > 0.0);
    }

    #[test]
    fn test_exit_completion_resets_view() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.set_progress(1.0);
        view.begin_animating();
        view.end_animating();

        scheduler.tick_by(350.0);
        let frame = view.frame();
        assert_eq!(frame.stroke_start, 0.0);
        assert_eq!(frame.stroke_end, 0.0);
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.rotation, 0.0);
        assert_eq!(frame.scale, 1.0);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_end_without_begin_plays_exit() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.end_animating();
        scheduler.tick_by(150.0);
        let frame = view.frame();
        assert!(frame.opacity < 1.0);
        // Stroke end was never raised; the closing start overtakes it and
        // the window strokes nothing
        assert_eq!(frame.stroke_end, 0.0);
        assert!(frame.stroke_start > frame.stroke_end);
    }

    #[test]
    fn test_layout_centers_frame() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.layout(Rect::new(0.0, 0.0, 320.0, 60.0));
        let frame = view.frame();
        assert_eq!(frame.center, Point::new(160.0, 30.0));
        assert_eq!(frame.radius, 14.0);
    }

    #[test]
    fn test_tint_recolors_stroke() {
        let scheduler = AnimationScheduler::new();
        let mut view = spinner(&scheduler);
        view.tint_changed(Color::from_hex(0xFF3B30));
        assert_eq!(view.frame().color, Color::from_hex(0xFF3B30));
    }
}
