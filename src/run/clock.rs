use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling frame-rate estimate over the most recent ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    ticks: VecDeque<Instant>,
    window: usize,
}

impl FrameClock {
    /// Average over the last `window` frames (at least two)
    pub fn new(window: usize) -> Self {
        let window = window.max(2);
        Self {
            ticks: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Record a frame presented at `now`
    pub fn tick(&mut self, now: Instant) {
        if self.ticks.len() == self.window {
            self.ticks.pop_front();
        }
        self.ticks.push_back(now);
    }

    /// Frames per second across the window; zero until two frames are known
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.ticks.front(), self.ticks.back()) else {
            return 0.0;
        };
        let span = last.saturating_duration_since(*first);
        if span == Duration::ZERO {
            return 0.0;
        }
        (self.ticks.len() - 1) as f64 / span.as_secs_f64()
    }
}
