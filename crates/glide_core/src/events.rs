//! Input events
//!
//! Unified pointer, touch, wheel and resize events as delivered by the host.
//! Coordinates are client/stage coordinates; timestamps are milliseconds.

use smallvec::SmallVec;

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const TOUCH_START: EventType = 12;
    pub const TOUCH_MOVE: EventType = 13;
    pub const TOUCH_END: EventType = 14;
    pub const TOUCH_CANCEL: EventType = 15;
    pub const WHEEL: EventType = 30;
    pub const RESIZE: EventType = 40;
}

/// A single touch contact
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform touch identifier
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub const fn new(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Touch list; two contacts are the common case
pub type TouchList = SmallVec<[TouchPoint; 4]>;

/// Keyboard modifier flags carried by wheel events
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000;

    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Touch {
        /// Contacts still on the surface
        touches: TouchList,
        /// Contacts that changed in this event (the lifted ones on touch end)
        changed: TouchList,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
        modifiers: Modifiers,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds, monotonic
    pub timestamp: f64,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData, timestamp: f64) -> Self {
        Self {
            event_type,
            data,
            timestamp,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    fn pointer(event_type: EventType, x: f32, y: f32, timestamp: f64) -> Self {
        Self::new(event_type, EventData::Pointer { x, y, button: 0 }, timestamp)
    }

    pub fn pointer_down(x: f32, y: f32, timestamp: f64) -> Self {
        Self::pointer(event_types::POINTER_DOWN, x, y, timestamp)
    }

    pub fn pointer_move(x: f32, y: f32, timestamp: f64) -> Self {
        Self::pointer(event_types::POINTER_MOVE, x, y, timestamp)
    }

    pub fn pointer_up(x: f32, y: f32, timestamp: f64) -> Self {
        Self::pointer(event_types::POINTER_UP, x, y, timestamp)
    }

    pub fn pointer_enter(x: f32, y: f32, timestamp: f64) -> Self {
        Self::pointer(event_types::POINTER_ENTER, x, y, timestamp)
    }

    pub fn pointer_leave(x: f32, y: f32, timestamp: f64) -> Self {
        Self::pointer(event_types::POINTER_LEAVE, x, y, timestamp)
    }

    fn touch(
        event_type: EventType,
        touches: &[TouchPoint],
        changed: &[TouchPoint],
        timestamp: f64,
    ) -> Self {
        Self::new(
            event_type,
            EventData::Touch {
                touches: touches.iter().copied().collect(),
                changed: changed.iter().copied().collect(),
            },
            timestamp,
        )
    }

    pub fn touch_start(touches: &[TouchPoint], timestamp: f64) -> Self {
        Self::touch(event_types::TOUCH_START, touches, touches, timestamp)
    }

    pub fn touch_move(touches: &[TouchPoint], timestamp: f64) -> Self {
        Self::touch(event_types::TOUCH_MOVE, touches, touches, timestamp)
    }

    /// `remaining` are contacts still down, `lifted` the ones that ended
    pub fn touch_end(remaining: &[TouchPoint], lifted: &[TouchPoint], timestamp: f64) -> Self {
        Self::touch(event_types::TOUCH_END, remaining, lifted, timestamp)
    }

    pub fn touch_cancel(changed: &[TouchPoint], timestamp: f64) -> Self {
        Self::touch(event_types::TOUCH_CANCEL, &[], changed, timestamp)
    }

    pub fn wheel(delta_x: f32, delta_y: f32, modifiers: Modifiers, timestamp: f64) -> Self {
        Self::new(
            event_types::WHEEL,
            EventData::Wheel {
                delta_x,
                delta_y,
                modifiers,
            },
            timestamp,
        )
    }

    pub fn resize(width: f32, height: f32, timestamp: f64) -> Self {
        Self::new(
            event_types::RESIZE,
            EventData::Resize { width, height },
            timestamp,
        )
    }

    /// Whether this event came from a touch surface
    pub fn is_touch(&self) -> bool {
        matches!(self.data, EventData::Touch { .. })
    }

    /// Primary point of the event
    ///
    /// Mouse position, the first active touch, or the first changed touch
    /// when no contacts remain (touch end).
    pub fn position(&self) -> Option<Point> {
        match &self.data {
            EventData::Pointer { x, y, .. } => Some(Point::new(*x, *y)),
            EventData::Touch { touches, changed } => touches
                .first()
                .or_else(|| changed.first())
                .map(TouchPoint::position),
            _ => None,
        }
    }

    /// Stop the host from applying its own scrolling for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_end_position_uses_changed_touch() {
        let lifted = TouchPoint::new(7, 12.0, 40.0);
        let event = Event::touch_end(&[], &[lifted], 100.0);
        assert_eq!(event.position(), Some(Point::new(12.0, 40.0)));
        assert!(event.is_touch());
    }

    #[test]
    fn test_prevent_default_flags() {
        let mut event = Event::wheel(0.0, 10.0, Modifiers::NONE, 0.0);
        assert!(!event.default_prevented);
        event.prevent_default();
        assert!(event.default_prevented);
        assert_eq!(event.position(), None);
    }

    #[test]
    fn test_modifiers() {
        let mods = Modifiers::new(true, false, false, true);
        assert!(mods.shift());
        assert!(!mods.ctrl());
        assert!(mods.meta());
        assert!(mods.any());
        assert!(!Modifiers::NONE.any());
    }
}
