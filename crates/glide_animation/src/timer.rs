//! One-shot delay timers driven by frame ticks

/// A pending one-shot timer
///
/// Owners keep at most one in an `Option` and replace it to reschedule;
/// dropping it cancels.
#[derive(Clone, Debug)]
pub struct Timer {
    remaining_ms: f32,
}

impl Timer {
    pub fn after(delay_ms: f32) -> Self {
        Self {
            remaining_ms: delay_ms.max(0.0),
        }
    }

    /// Advance by `dt_ms`; returns true once the delay has elapsed
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.remaining_ms -= dt_ms.max(0.0);
        self.is_due()
    }

    pub fn is_due(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms.max(0.0)
    }
}
