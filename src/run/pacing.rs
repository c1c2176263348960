use std::time::Duration;

/// Converts a step's adjacency-check count into a pause
///
/// The solver runs at full speed; this keeps a run slow enough to follow on
/// screen. The pause grows with the work a step did and is capped so a large
/// propagation never freezes the picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    per_check: Duration,
    max_step: Duration,
}

impl Pacing {
    /// Charge `per_check` per adjacency check, at most `max_step` per step
    pub const fn new(per_check: Duration, max_step: Duration) -> Self {
        Self {
            per_check,
            max_step,
        }
    }

    /// No pauses at all
    pub const fn unthrottled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Pause owed for a step that performed `checks` adjacency checks
    pub fn delay_for(&self, checks: usize) -> Duration {
        let checks = u32::try_from(checks).unwrap_or(u32::MAX);
        self.per_check
            .checked_mul(checks)
            .unwrap_or(self.max_step)
            .min(self.max_step)
    }
}
