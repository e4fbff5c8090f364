//! Timeline orchestration
//!
//! A timeline advances one clock and samples any number of entries from it.
//! Each entry animates a single f32 from `from` to `to` over its own window
//! `(offset_ms, duration_ms)`, so concurrent property animations (for
//! example stroke-start and opacity during an exit sequence) stay in
//! lockstep by construction.

use crate::easing::Easing;

/// Handle to an entry added to a [`Timeline`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

#[derive(Clone, Copy, Debug)]
struct TimelineEntry {
    offset_ms: u32,
    duration_ms: u32,
    from: f32,
    to: f32,
    easing: Easing,
}

impl TimelineEntry {
    fn end_ms(&self) -> u32 {
        self.offset_ms + self.duration_ms
    }

    fn sample(&self, elapsed_ms: f32) -> f32 {
        let local = if self.duration_ms == 0 {
            if elapsed_ms >= self.offset_ms as f32 {
                1.0
            } else {
                0.0
            }
        } else {
            ((elapsed_ms - self.offset_ms as f32) / self.duration_ms as f32).clamp(0.0, 1.0)
        };
        let eased = self.easing.apply(local);
        if eased <= 0.0 {
            self.from
        } else if eased >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * eased
        }
    }
}

/// A set of concurrently sampled animation entries driven by one clock
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    /// Elapsed time into the current loop, in milliseconds
    elapsed_ms: f32,
    /// Number of loops (-1 = infinite, 1 = play once)
    loop_count: i32,
    /// Loops finished so far
    completed: i32,
    playing: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            elapsed_ms: 0.0,
            loop_count: 1,
            completed: 0,
            playing: false,
        }
    }

    /// Add an entry with linear easing, returning its handle
    pub fn add(&mut self, offset_ms: u32, duration_ms: u32, from: f32, to: f32) -> TimelineEntryId {
        self.add_eased(offset_ms, duration_ms, from, to, Easing::Linear)
    }

    /// Add an entry with an explicit easing function, returning its handle
    pub fn add_eased(
        &mut self,
        offset_ms: u32,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        self.entries.push(TimelineEntry {
            offset_ms,
            duration_ms,
            from,
            to,
            easing,
        });
        TimelineEntryId(self.entries.len() - 1)
    }

    /// Set the loop count (-1 for infinite)
    pub fn set_loop(&mut self, count: i32) {
        self.loop_count = count;
    }

    /// Total duration of one loop: the latest entry end
    pub fn total_duration_ms(&self) -> u32 {
        self.entries.iter().map(TimelineEntry::end_ms).max().unwrap_or(0)
    }

    /// Start playback if stopped, resetting the clock
    pub fn start(&mut self) {
        if !self.playing {
            self.restart();
        }
    }

    /// Reset the clock to zero and play
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.completed = 0;
        self.playing = true;
    }

    /// Stop playback, holding current entry values
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a non-looping timeline has run its clock to the end
    pub fn is_finished(&self) -> bool {
        !self.playing
            && self.loop_count >= 0
            && self.completed >= self.loop_count
            && !self.entries.is_empty()
    }

    /// Advance the clock by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }
        let total = self.total_duration_ms() as f32;
        if total <= 0.0 {
            self.playing = false;
            return;
        }

        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= total {
            self.completed += 1;
            if self.loop_count >= 0 && self.completed >= self.loop_count {
                self.elapsed_ms = total;
                self.playing = false;
                return;
            }
            self.elapsed_ms -= total;
        }
    }

    /// Sample the current value of an entry
    pub fn get(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id.0).map(|e| e.sample(self.elapsed_ms))
    }
}
