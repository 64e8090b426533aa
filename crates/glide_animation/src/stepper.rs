//! Linear 2D interpolation quantized into discrete steps

/// Moves a 2D value from `from` to `to` in `steps` equal increments spread
/// over `duration_ms`. The last step lands exactly on `to`.
#[derive(Clone, Debug)]
pub struct Stepper {
    from: (f32, f32),
    to: (f32, f32),
    steps: u32,
    duration_ms: f32,
    elapsed_ms: f32,
    current_step: u32,
}

impl Stepper {
    pub fn new(from: (f32, f32), to: (f32, f32), duration_ms: f32, steps: u32) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            current_step: 0,
        }
    }

    /// Advance by `dt_ms`; returns the new value if a step boundary was crossed
    pub fn tick(&mut self, dt_ms: f32) -> Option<(f32, f32)> {
        if self.is_finished() {
            return None;
        }
        self.elapsed_ms += dt_ms.max(0.0);

        let step = if self.duration_ms <= 0.0 {
            self.steps
        } else {
            let interval = self.duration_ms / self.steps as f32;
            ((self.elapsed_ms / interval).floor() as u32).min(self.steps)
        };

        if step == self.current_step {
            return None;
        }
        self.current_step = step;
        if self.is_finished() {
            tracing::trace!("stepper reached {:?} after {:.0}ms", self.to, self.elapsed_ms);
        }
        Some(self.value())
    }

    pub fn value(&self) -> (f32, f32) {
        if self.current_step >= self.steps {
            return self.to;
        }
        let t = self.current_step as f32 / self.steps as f32;
        (
            self.from.0 + (self.to.0 - self.from.0) * t,
            self.from.1 + (self.to.1 - self.from.1) * t,
        )
    }

    pub fn target(&self) -> (f32, f32) {
        self.to
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.steps
    }
}
