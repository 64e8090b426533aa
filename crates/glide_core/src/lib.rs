//! Glide Core
//!
//! Foundational types for the Glide canvas widgets:
//!
//! - **Geometry**: points, sizes, rectangles
//! - **Events**: pointer, touch, wheel and resize input
//! - **State Machines**: enum-based interaction states with transition history
//! - **Scene Boundary**: the [`SceneGraph`] trait the widgets render through,
//!   plus [`RetainedScene`], an in-memory implementation

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod retained;
pub mod scene;

pub use color::{Color, ColorParseError};
pub use events::{event_types, Event, EventData, EventType, Modifiers, TouchList, TouchPoint};
pub use fsm::{EventId, StateMachine, StateTransitions};
pub use geometry::{Point, Rect, Size, Vec2};
pub use retained::{RetainedScene, SceneNode};
pub use scene::{Cursor, NodeId, NodeKind, RectStyle, SceneGraph};
