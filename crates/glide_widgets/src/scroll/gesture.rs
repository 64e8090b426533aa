//! Drag gesture tracking
//!
//! [`GestureState`] is the interaction state of a scroll view. A
//! [`GestureSession`] holds the bookkeeping of one drag: where it started,
//! the last sample, and the active touch contacts.

use glide_core::{EventId, Point, StateTransitions, TouchList, TouchPoint, Vec2};

/// Events driving [`GestureState`]
pub mod gesture_events {
    use glide_core::EventId;

    /// Pointer or touch pressed
    pub const GRAB: EventId = 200;
    /// Released slowly, no momentum
    pub const RELEASE: EventId = 201;
    /// Released fast or overscrolled, momentum starts
    pub const FLING: EventId = 202;
    /// Momentum decayed to rest
    pub const SETTLED: EventId = 203;
    /// Momentum cancelled by the application
    pub const STOP: EventId = 204;
}

/// Interaction state of a scroll view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    Momentum,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use gesture_events::*;
        match (self, event) {
            (GestureState::Idle, GRAB) => Some(GestureState::Dragging),
            (GestureState::Momentum, GRAB) => Some(GestureState::Dragging),
            (GestureState::Dragging, RELEASE) => Some(GestureState::Idle),
            (GestureState::Dragging, FLING) => Some(GestureState::Momentum),
            (GestureState::Momentum, SETTLED) => Some(GestureState::Idle),
            (GestureState::Momentum, STOP) => Some(GestureState::Idle),
            _ => None,
        }
    }
}

/// Bookkeeping for one drag
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub start: Point,
    pub start_time: f64,
    pub last: Point,
    pub last_time: f64,
    /// Active contacts in platform order
    pub touches: TouchList,
}

impl GestureSession {
    pub fn begin(point: Point, timestamp: f64, touches: &[TouchPoint]) -> Self {
        Self {
            start: point,
            start_time: timestamp,
            last: point,
            last_time: timestamp,
            touches: touches.iter().copied().collect(),
        }
    }

    /// Move the single-pointer anchor
    pub fn anchor(&mut self, point: Point, timestamp: f64) {
        self.last = point;
        self.last_time = timestamp;
    }

    /// Two-finger pan delta (previous minus current), averaged over the first
    /// two contacts
    ///
    /// Must be read before [`replace_touches`](Self::replace_touches)
    /// overwrites the previous positions. A contact without a previous sample
    /// contributes nothing but still counts toward the average.
    pub fn pair_delta(&self, touches: &[TouchPoint]) -> Option<Vec2> {
        if touches.len() < 2 || self.touches.len() < 2 {
            return None;
        }
        let mut sum = Vec2::ZERO;
        for touch in &touches[..2] {
            if let Some(previous) = self.touches.iter().find(|t| t.id == touch.id) {
                let delta = previous.position() - touch.position();
                sum.x += delta.x;
                sum.y += delta.y;
            }
        }
        Some(Vec2::new(sum.x / 2.0, sum.y / 2.0))
    }

    pub fn replace_touches(&mut self, touches: &[TouchPoint]) {
        self.touches.clear();
        self.touches.extend(touches.iter().copied());
    }

    /// Drop lifted contacts, returning how many remain
    pub fn lift(&mut self, lifted: &[TouchPoint]) -> usize {
        self.touches
            .retain(|touch| !lifted.iter().any(|gone| gone.id == touch.id));
        self.touches.len()
    }
}

/// Drag velocity in pixels per second, scaled by speed and gain
///
/// Returns `None` when no time has passed since the last sample.
pub fn estimate_velocity(delta: Vec2, dt_ms: f64, speed: f32, gain: f32) -> Option<Vec2> {
    if dt_ms <= 0.0 {
        return None;
    }
    let seconds = (dt_ms / 1000.0) as f32;
    Some(Vec2::new(
        delta.x / seconds * speed * gain,
        delta.y / seconds * speed * gain,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::StateMachine;

    #[test]
    fn test_gesture_transitions() {
        use gesture_events::*;
        let mut fsm = StateMachine::new(GestureState::Idle);

        assert!(fsm.send(GRAB));
        assert_eq!(fsm.current(), GestureState::Dragging);
        assert!(fsm.send(FLING));
        assert_eq!(fsm.current(), GestureState::Momentum);

        // Grabbing during momentum goes straight back to dragging
        assert!(fsm.send(GRAB));
        assert_eq!(fsm.current(), GestureState::Dragging);
        assert!(fsm.send(RELEASE));
        assert_eq!(fsm.current(), GestureState::Idle);

        assert!(!fsm.send(SETTLED));
        assert!(!fsm.send(RELEASE));
    }

    #[test]
    fn test_pair_delta_uses_previous_points() {
        let start = [TouchPoint::new(1, 100.0, 100.0), TouchPoint::new(2, 200.0, 100.0)];
        let mut session = GestureSession::begin(Point::new(100.0, 100.0), 0.0, &start);

        let moved = [TouchPoint::new(1, 100.0, 80.0), TouchPoint::new(2, 200.0, 60.0)];
        assert_eq!(session.pair_delta(&moved), Some(Vec2::new(0.0, 30.0)));

        session.replace_touches(&moved);
        assert_eq!(session.pair_delta(&moved), Some(Vec2::ZERO));
    }

    #[test]
    fn test_pair_delta_needs_two_contacts() {
        let one = [TouchPoint::new(1, 0.0, 0.0)];
        let session = GestureSession::begin(Point::ZERO, 0.0, &one);
        assert_eq!(session.pair_delta(&one), None);
    }

    #[test]
    fn test_lift_keeps_remaining_contacts() {
        let touches = [TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 5.0, 5.0)];
        let mut session = GestureSession::begin(Point::ZERO, 0.0, &touches);
        assert_eq!(session.lift(&[TouchPoint::new(2, 5.0, 5.0)]), 1);
        assert_eq!(session.touches[0].id, 1);
        assert_eq!(session.lift(&[TouchPoint::new(1, 0.0, 0.0)]), 0);
    }

    #[test]
    fn test_estimate_velocity() {
        // 10px over 16ms at gain 15
        let v = estimate_velocity(Vec2::new(0.0, 10.0), 16.0, 1.0, 15.0).unwrap();
        assert!((v.y - 9375.0).abs() < 0.01);
        assert_eq!(v.x, 0.0);
        assert_eq!(estimate_velocity(Vec2::new(0.0, 10.0), 0.0, 1.0, 15.0), None);
    }
}
