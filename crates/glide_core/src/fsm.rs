//! State machines for widget interaction states
//!
//! Widgets define their states as a plain enum and map events to transitions
//! with [`StateTransitions`]. [`StateMachine`] drives such an enum and keeps a
//! transition history for debugging.
//!
//! ```rust
//! use glide_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Light {
//!     #[default]
//!     Off,
//!     On,
//! }
//!
//! const TOGGLE: u32 = 1;
//!
//! impl StateTransitions for Light {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Light::Off, TOGGLE) => Some(Light::On),
//!             (Light::On, TOGGLE) => Some(Light::Off),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Light::Off);
//! assert!(fsm.send(TOGGLE));
//! assert_eq!(fsm.current(), Light::On);
//! ```

use std::hash::Hash;

/// Identifier for an event sent to a state machine
pub type EventId = u32;

/// Trait for user-defined state types that can handle event transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// Upper bound on recorded transitions
const MAX_HISTORY: usize = 64;

/// A state machine instance over a user state type
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current: S,
    /// Most recent transitions, oldest first
    history: Vec<(S, EventId, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event; returns true if a transition happened
    pub fn send(&mut self, event: EventId) -> bool {
        let Some(next) = self.current.on_event(event) else {
            return false;
        };

        tracing::debug!("fsm {:?} --{}--> {:?}", self.current, event, next);

        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push((self.current, event, next));
        self.current = next;
        true
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Pointer {
        #[default]
        Idle,
        Hovered,
        Pressed,
    }

    const POINTER_ENTER: EventId = 1;
    const POINTER_LEAVE: EventId = 2;
    const POINTER_DOWN: EventId = 3;
    const POINTER_UP: EventId = 4;

    impl StateTransitions for Pointer {
        fn on_event(&self, event: EventId) -> Option<Self> {
            match (self, event) {
                (Pointer::Idle, POINTER_ENTER) => Some(Pointer::Hovered),
                (Pointer::Hovered, POINTER_LEAVE) => Some(Pointer::Idle),
                (Pointer::Hovered, POINTER_DOWN) => Some(Pointer::Pressed),
                (Pointer::Pressed, POINTER_UP) => Some(Pointer::Hovered),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::<Pointer>::default();
        assert_eq!(fsm.current(), Pointer::Idle);

        assert!(fsm.send(POINTER_ENTER));
        assert!(fsm.send(POINTER_DOWN));
        assert_eq!(fsm.current(), Pointer::Pressed);

        assert!(fsm.send(POINTER_UP));
        assert!(fsm.send(POINTER_LEAVE));
        assert!(fsm.is_in(Pointer::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(Pointer::Idle);
        assert!(!fsm.send(POINTER_DOWN));
        assert_eq!(fsm.current(), Pointer::Idle);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_history_and_can_send() {
        let mut fsm = StateMachine::new(Pointer::Idle);
        assert!(fsm.can_send(POINTER_ENTER));
        assert!(!fsm.can_send(POINTER_UP));

        fsm.send(POINTER_ENTER);
        fsm.send(POINTER_DOWN);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (Pointer::Idle, POINTER_ENTER, Pointer::Hovered));
        assert_eq!(history[1], (Pointer::Hovered, POINTER_DOWN, Pointer::Pressed));

        fsm.clear_history();
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::new(Pointer::Idle);
        for _ in 0..100 {
            fsm.send(POINTER_ENTER);
            fsm.send(POINTER_LEAVE);
        }
        assert_eq!(fsm.history().len(), MAX_HISTORY);
    }
}
