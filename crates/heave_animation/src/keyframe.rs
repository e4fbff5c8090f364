//! Keyframe animations
//!
//! A single-track f32 animation: keyframes at normalized times, a fixed
//! duration, and scheduling flags for delay, repetition, and ping-pong
//! (autoreverse) playback. Tracks are advanced by the scheduler via
//! [`KeyframeAnimation::tick`] and sampled with [`KeyframeAnimation::value`].

use crate::easing::Easing;

/// A keyframe at a normalized time position
#[derive(Clone, Copy, Debug)]
pub struct Keyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// Easing function when transitioning TO this keyframe
    pub easing: Easing,
}

impl Keyframe {
    /// Create a new keyframe
    pub fn new(time: f32, value: f32, easing: Easing) -> Self {
        Self {
            time,
            value,
            easing,
        }
    }

    /// Create a keyframe with linear easing
    pub fn linear(time: f32, value: f32) -> Self {
        Self::new(time, value, Easing::Linear)
    }
}

/// Playback direction for the current iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

impl PlayDirection {
    fn flipped(self) -> Self {
        match self {
            PlayDirection::Forward => PlayDirection::Reverse,
            PlayDirection::Reverse => PlayDirection::Forward,
        }
    }
}

/// A timed f32 animation with keyframes, repetition, and autoreverse
#[derive(Clone, Debug)]
pub struct KeyframeAnimation {
    /// Duration of one iteration in milliseconds
    duration_ms: u32,
    /// Delay before the first iteration starts
    delay_ms: u32,
    /// Keyframes sorted by time
    keyframes: Vec<Keyframe>,
    /// Number of iterations (-1 = infinite)
    iterations: i32,
    /// Reverse direction on each iteration boundary
    ping_pong: bool,
    /// Time into the current iteration in milliseconds
    current_time: f32,
    /// Remaining delay in milliseconds
    pending_delay: f32,
    /// Iterations finished so far
    completed: i32,
    /// Direction of the current iteration
    direction: PlayDirection,
    /// Whether the animation is advancing
    playing: bool,
}

impl KeyframeAnimation {
    /// Create a new animation with the given iteration duration
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            keyframes: Vec::new(),
            iterations: 1,
            ping_pong: false,
            current_time: 0.0,
            pending_delay: 0.0,
            completed: 0,
            direction: PlayDirection::Forward,
            playing: false,
        }
    }

    /// Add a keyframe (builder pattern)
    pub fn keyframe(mut self, time: f32, value: f32, easing: Easing) -> Self {
        self.keyframes.push(Keyframe::new(time, value, easing));
        self.keyframes
            .sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap());
        self
    }

    /// Add a keyframe with linear easing
    pub fn at(self, time: f32, value: f32) -> Self {
        self.keyframe(time, value, Easing::Linear)
    }

    /// Set the iteration count (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        self.iterations = count;
        self
    }

    /// Enable or disable ping-pong (autoreverse) playback
    pub fn ping_pong(mut self, enabled: bool) -> Self {
        self.ping_pong = enabled;
        self
    }

    /// Set a delay before the first iteration, in milliseconds
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Start playback if stopped, resetting to the beginning
    pub fn start(&mut self) {
        if !self.playing {
            self.restart();
        }
    }

    /// Reset to the beginning and play
    pub fn restart(&mut self) {
        self.current_time = 0.0;
        self.pending_delay = self.delay_ms as f32;
        self.completed = 0;
        self.direction = PlayDirection::Forward;
        self.playing = true;
    }

    /// Stop playback, holding the current value
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Whether the animation is advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Direction of the current iteration
    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Progress through the current iteration (0.0 to 1.0, forward sense)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advance the animation by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }
        if self.duration_ms == 0 {
            self.playing = false;
            return;
        }

        let mut dt = dt_ms;
        if self.pending_delay > 0.0 {
            if dt < self.pending_delay {
                self.pending_delay -= dt;
                return;
            }
            dt -= self.pending_delay;
            self.pending_delay = 0.0;
        }

        self.current_time += dt;

        let duration = self.duration_ms as f32;
        while self.current_time >= duration {
            self.completed += 1;
            if self.iterations >= 0 && self.completed >= self.iterations {
                // Hold at the end of the final iteration; with ping-pong the
                // final direction determines which endpoint that is.
                self.current_time = duration;
                self.playing = false;
                return;
            }
            if self.ping_pong {
                self.direction = self.direction.flipped();
            }
            self.current_time -= duration;
        }
    }

    /// Sample the current interpolated value
    pub fn value(&self) -> f32 {
        let progress = match self.direction {
            PlayDirection::Forward => self.progress(),
            PlayDirection::Reverse => 1.0 - self.progress(),
        };
        self.sample_at(progress)
    }

    /// Sample at a specific forward progress (0.0 to 1.0)
    pub fn sample_at(&self, progress: f32) -> f32 {
        if self.keyframes.is_empty() {
            return 0.0;
        }

        let progress = progress.clamp(0.0, 1.0);

        // Find surrounding keyframes
        let mut prev_kf = &self.keyframes[0];
        let mut next_kf = &self.keyframes[0];

        for kf in &self.keyframes {
            if kf.time <= progress {
                prev_kf = kf;
            }
            if kf.time >= progress {
                next_kf = kf;
                break;
            }
        }

        if (prev_kf.time - next_kf.time).abs() < f32::EPSILON {
            return prev_kf.value;
        }

        let local_progress = (progress - prev_kf.time) / (next_kf.time - prev_kf.time);
        let eased = next_kf.easing.apply(local_progress);

        prev_kf.value + (next_kf.value - prev_kf.value) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(duration_ms: u32) -> KeyframeAnimation {
        KeyframeAnimation::new(duration_ms)
            .at(0.0, 0.0)
            .at(1.0, 100.0)
    }

    #[test]
    fn test_sample_midpoint() {
        let mut anim = ramp(1000);
        anim.start();
        anim.tick(500.0);
        assert!((anim.value() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_finishes_after_single_iteration() {
        let mut anim = ramp(1000);
        anim.start();
        anim.tick(1500.0);
        assert!(!anim.is_playing());
        assert!((anim.value() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_infinite_loop_wraps() {
        let mut anim = ramp(1000).iterations(-1);
        anim.start();
        anim.tick(2250.0);
        assert!(anim.is_playing());
        assert!((anim.value() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_ping_pong_reverses() {
        let mut anim = ramp(100).ping_pong(true).iterations(-1);
        anim.start();
        // 150ms in: second iteration, reversed, halfway back down
        anim.tick(150.0);
        assert_eq!(anim.direction(), PlayDirection::Reverse);
        assert!((anim.value() - 50.0).abs() < 1e-4);
        // 50ms more: boundary reached, forward again from the start
        anim.tick(51.0);
        assert_eq!(anim.direction(), PlayDirection::Forward);
        assert!(anim.value() < 2.0);
    }

    #[test]
    fn test_ping_pong_even_iterations_end_at_start() {
        let mut anim = ramp(100).ping_pong(true).iterations(2);
        anim.start();
        anim.tick(250.0);
        assert!(!anim.is_playing());
        assert!((anim.value() - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_delay_defers_start() {
        let mut anim = ramp(1000).delay(500);
        anim.start();
        anim.tick(400.0);
        assert!((anim.value() - 0.0).abs() < 1e-4);
        anim.tick(600.0);
        assert!((anim.value() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_easing_applied_between_keyframes() {
        let mut anim = KeyframeAnimation::new(1000)
            .keyframe(0.0, 0.0, Easing::Linear)
            .keyframe(1.0, 100.0, Easing::EaseIn);
        anim.start();
        anim.tick(500.0);
        // Quadratic ease-in at t=0.5 -> 0.25
        assert!((anim.value() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_duration_is_inert() {
        let mut anim = KeyframeAnimation::new(0).at(0.0, 7.0);
        anim.start();
        anim.tick(16.0);
        assert!(!anim.is_playing());
        assert_eq!(anim.value(), 7.0);
    }
}
