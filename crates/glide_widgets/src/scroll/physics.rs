//! Scroll position law and momentum constants
//!
//! Everything here is pure arithmetic over [`ScrollState`]; the view applies
//! the results to the scene.

/// Momentum stops once both velocity components fall below this
pub const MOMENTUM_STOP_VELOCITY: f32 = 0.5;

/// Release velocity (on either axis) that starts a momentum run
pub const FLING_VELOCITY: f32 = 10.0;

/// Momentum advances by `velocity / FRAMES_PER_SECOND` per frame
pub const FRAMES_PER_SECOND: f32 = 60.0;

/// Authoritative scroll position, bounds and velocity
///
/// Scrollbar geometry is always derived from this, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub max_scroll_x: f32,
    pub max_scroll_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl ScrollState {
    /// Signed distance past the nearest bound on each axis, zero when inside
    pub fn overscroll(&self) -> (f32, f32) {
        (
            axis_overscroll(self.scroll_x, self.max_scroll_x),
            axis_overscroll(self.scroll_y, self.max_scroll_y),
        )
    }

    pub fn is_overscrolled(&self) -> bool {
        let (ox, oy) = self.overscroll();
        ox != 0.0 || oy != 0.0
    }

    /// Position pulled back inside `[0, max]` on both axes
    pub fn clamped(&self) -> (f32, f32) {
        (
            self.scroll_x.clamp(0.0, self.max_scroll_x),
            self.scroll_y.clamp(0.0, self.max_scroll_y),
        )
    }

    pub fn is_slow(&self) -> bool {
        self.velocity_x.abs() < MOMENTUM_STOP_VELOCITY
            && self.velocity_y.abs() < MOMENTUM_STOP_VELOCITY
    }

    pub fn is_fling(&self) -> bool {
        self.velocity_x.abs() > FLING_VELOCITY || self.velocity_y.abs() > FLING_VELOCITY
    }

    pub fn stop(&mut self) {
        self.velocity_x = 0.0;
        self.velocity_y = 0.0;
    }
}

fn axis_overscroll(position: f32, max: f32) -> f32 {
    if position < 0.0 {
        position
    } else if position > max {
        position - max
    } else {
        0.0
    }
}

/// Furthest a viewport can scroll over content on one axis
pub fn max_scroll(content: f32, viewport: f32) -> f32 {
    (content.ceil() - viewport.floor()).max(0.0)
}

/// Resolve a requested position on one axis
///
/// Without bounce the request is clamped to `[0, max]`. With bounce
/// (`Some(strength)`) only `strength` of the overshoot is kept, and an axis
/// with nothing to scroll stays at zero.
pub fn resolve_axis(requested: f32, max: f32, bounce: Option<f32>) -> f32 {
    match bounce {
        None => requested.clamp(0.0, max),
        Some(strength) => {
            if requested < 0.0 {
                requested * strength
            } else if max <= 0.0 {
                0.0
            } else if requested > max {
                max + (requested - max) * strength
            } else {
                requested
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll_rounds_outward() {
        assert_eq!(max_scroll(910.0, 250.0), 660.0);
        assert_eq!(max_scroll(910.2, 250.7), 661.0);
        assert_eq!(max_scroll(100.0, 250.0), 0.0);
    }

    #[test]
    fn test_resolve_clamps_without_bounce() {
        assert_eq!(resolve_axis(1000.0, 660.0, None), 660.0);
        assert_eq!(resolve_axis(-50.0, 660.0, None), 0.0);
        assert_eq!(resolve_axis(120.0, 660.0, None), 120.0);
    }

    #[test]
    fn test_resolve_elastic_overscroll() {
        assert_eq!(resolve_axis(-50.0, 660.0, Some(0.2)), -10.0);
        assert_eq!(resolve_axis(710.0, 660.0, Some(0.2)), 670.0);
        assert_eq!(resolve_axis(50.0, 0.0, Some(0.2)), 0.0);
        assert_eq!(resolve_axis(300.0, 660.0, Some(0.2)), 300.0);
    }

    #[test]
    fn test_overscroll_detection() {
        let mut state = ScrollState {
            max_scroll_y: 660.0,
            scroll_y: 670.0,
            ..ScrollState::default()
        };
        assert_eq!(state.overscroll(), (0.0, 10.0));
        assert!(state.is_overscrolled());
        assert_eq!(state.clamped(), (0.0, 660.0));

        state.scroll_y = -4.0;
        assert_eq!(state.overscroll(), (0.0, -4.0));

        state.scroll_y = 200.0;
        assert!(!state.is_overscrolled());
    }
}
