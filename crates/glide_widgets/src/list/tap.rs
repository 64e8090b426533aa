//! Tap versus drag disambiguation

use glide_core::Point;
use rustc_hash::FxHashMap;

/// Input source a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    index: usize,
    point: Point,
}

/// Remembers where each pointer kind pressed an item
///
/// A release counts as a tap when it lands within `threshold` of the press.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    threshold: f32,
    presses: FxHashMap<PointerKind, Press>,
}

impl TapTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            presses: FxHashMap::default(),
        }
    }

    pub fn press(&mut self, kind: PointerKind, index: usize, point: Point) {
        self.presses.insert(kind, Press { index, point });
    }

    /// Consume the press for `kind`; returns the item index if it was a tap
    pub fn release(&mut self, kind: PointerKind, point: Point) -> Option<usize> {
        let press = self.presses.remove(&kind)?;
        (press.point.distance(point) < self.threshold).then_some(press.index)
    }

    pub fn cancel(&mut self, kind: PointerKind) {
        self.presses.remove(&kind);
    }

    pub fn clear(&mut self) {
        self.presses.clear();
    }

    pub fn is_pressed(&self, kind: PointerKind) -> bool {
        self.presses.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_travel_is_tap() {
        let mut taps = TapTracker::new(10.0);
        taps.press(PointerKind::Mouse, 3, Point::new(50.0, 50.0));
        assert_eq!(taps.release(PointerKind::Mouse, Point::new(56.0, 55.0)), Some(3));
        assert!(!taps.is_pressed(PointerKind::Mouse));
    }

    #[test]
    fn test_long_travel_is_drag() {
        let mut taps = TapTracker::new(10.0);
        taps.press(PointerKind::Touch, 1, Point::new(50.0, 50.0));
        assert_eq!(taps.release(PointerKind::Touch, Point::new(50.0, 90.0)), None);
        // Consumed either way
        assert_eq!(taps.release(PointerKind::Touch, Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_kinds_are_tracked_separately() {
        let mut taps = TapTracker::new(10.0);
        taps.press(PointerKind::Mouse, 0, Point::ZERO);
        taps.press(PointerKind::Touch, 4, Point::ZERO);
        taps.cancel(PointerKind::Touch);
        assert_eq!(taps.release(PointerKind::Touch, Point::ZERO), None);
        assert_eq!(taps.release(PointerKind::Mouse, Point::ZERO), Some(0));
    }
}
