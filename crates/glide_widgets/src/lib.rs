//! Glide Widgets
//!
//! Scrolling and list widgets for retained-mode canvas scene graphs.
//!
//! - **ScrollView**: clipped viewport with drag, wheel and two-finger pan,
//!   flick momentum, optional elastic overscroll, and auto-fading scrollbars
//! - **ListView**: a scroll view over an ordered collection with
//!   render-callback items, vertical or horizontal layout, cross-axis
//!   alignment, and tap-versus-drag click detection
//!
//! Widgets render through [`glide_core::SceneGraph`] and are driven by the
//! host: input through `handle_event`, time through `tick`.

pub mod error;
pub mod list;
pub mod options;
pub mod scroll;

pub use error::{Result, WidgetError};
pub use list::layout::{ItemPlacement, ListLayout};
pub use list::{ItemCallback, ListView, RenderItem, RenderedItem};
pub use options::{
    ItemAlign, ListViewOptions, ScrollDirection, ScrollViewOptions, ScrollbarOptions,
};
pub use scroll::gesture::{gesture_events, GestureState};
pub use scroll::physics::ScrollState;
pub use scroll::scrollbar::{ScrollbarAxis, ScrollbarThumb};
pub use scroll::{ScrollCallback, ScrollView};

/// Common imports for hosting the widgets
pub mod prelude {
    pub use crate::list::ListView;
    pub use crate::options::{
        ItemAlign, ListViewOptions, ScrollDirection, ScrollViewOptions, ScrollbarOptions,
    };
    pub use crate::scroll::gesture::GestureState;
    pub use crate::scroll::ScrollView;
    pub use glide_core::{Event, NodeId, Point, RetainedScene, SceneGraph, Size};
}
