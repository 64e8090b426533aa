//! Widget options
//!
//! Options are plain serde structs so a host can keep them in a TOML file
//! next to its other settings. Every field has a default; a table may
//! specify as few keys as it likes.
//!
//! ```toml
//! width = 300
//! height = 250
//! direction = "vertical"
//! bounce_enabled = true
//!
//! [scrollbar]
//! color = "#444444"
//! fade_delay_ms = 600
//! ```
//!
//! Out-of-range numbers are not errors. [`ScrollViewOptions::sanitized`] and
//! [`ListViewOptions::sanitized`] floor or default them and log a warning.

use glide_core::Color;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Axes that respond to input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
    #[default]
    Both,
}

impl ScrollDirection {
    pub fn allows_x(self) -> bool {
        matches!(self, ScrollDirection::Horizontal | ScrollDirection::Both)
    }

    pub fn allows_y(self) -> bool {
        matches!(self, ScrollDirection::Vertical | ScrollDirection::Both)
    }

    /// Zero out the components of a delta on disallowed axes
    pub fn gate(self, dx: f32, dy: f32) -> (f32, f32) {
        (
            if self.allows_x() { dx } else { 0.0 },
            if self.allows_y() { dy } else { 0.0 },
        )
    }
}

/// Cross-axis alignment of list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAlign {
    #[default]
    #[serde(alias = "left", alias = "top")]
    Start,
    Center,
    #[serde(alias = "right", alias = "bottom")]
    End,
    Stretch,
}

/// Scrollbar thumb appearance and fade timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollbarOptions {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_thumb_color")]
    pub color: Color,
    /// Thickness of the vertical thumb
    #[serde(default = "default_thickness")]
    pub width: f32,
    /// Thickness of the horizontal thumb
    #[serde(default = "default_thickness")]
    pub height: f32,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    /// Opacity while shown
    #[serde(default = "default_thumb_opacity")]
    pub opacity: f32,
    /// Idle time before the thumbs fade out
    #[serde(default = "default_fade_delay")]
    pub fade_delay_ms: f32,
    #[serde(default = "default_fade_duration")]
    pub fade_duration_ms: f32,
    /// Gap between a thumb and the viewport edges
    #[serde(default = "default_track_padding")]
    pub padding: f32,
    #[serde(default = "default_min_thumb_length")]
    pub min_thumb_length: f32,
}

fn default_true() -> bool {
    true
}

fn default_thumb_color() -> Color {
    Color::from_hex(0x888888)
}

fn default_border_color() -> Color {
    Color::BLACK
}

fn default_thickness() -> f32 {
    8.0
}

fn default_corner_radius() -> f32 {
    4.0
}

fn default_thumb_opacity() -> f32 {
    0.6
}

fn default_fade_delay() -> f32 {
    1000.0
}

fn default_fade_duration() -> f32 {
    300.0
}

fn default_track_padding() -> f32 {
    2.0
}

fn default_min_thumb_length() -> f32 {
    20.0
}

impl Default for ScrollbarOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            color: default_thumb_color(),
            width: default_thickness(),
            height: default_thickness(),
            corner_radius: default_corner_radius(),
            border_width: 0.0,
            border_color: default_border_color(),
            opacity: default_thumb_opacity(),
            fade_delay_ms: default_fade_delay(),
            fade_duration_ms: default_fade_duration(),
            padding: default_track_padding(),
            min_thumb_length: default_min_thumb_length(),
        }
    }
}

impl ScrollbarOptions {
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            width: positive_or(self.width, defaults.width, "scrollbar.width"),
            height: positive_or(self.height, defaults.height, "scrollbar.height"),
            corner_radius: non_negative(self.corner_radius, "scrollbar.corner_radius"),
            border_width: non_negative(self.border_width, "scrollbar.border_width"),
            opacity: if self.opacity.is_finite() {
                self.opacity.clamp(0.0, 1.0)
            } else {
                warn!("scrollbar.opacity {} is not finite, using default", self.opacity);
                defaults.opacity
            },
            fade_delay_ms: non_negative(self.fade_delay_ms, "scrollbar.fade_delay_ms"),
            fade_duration_ms: non_negative(self.fade_duration_ms, "scrollbar.fade_duration_ms"),
            padding: non_negative(self.padding, "scrollbar.padding"),
            min_thumb_length: non_negative(self.min_thumb_length, "scrollbar.min_thumb_length"),
            ..self
        }
    }
}

/// Options for [`ScrollView`](crate::scroll::ScrollView)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollViewOptions {
    /// Viewport position inside the parent node
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Optional fill drawn behind the content
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub scrollbar: ScrollbarOptions,
    /// Defaults to both axes
    #[serde(default)]
    pub direction: Option<ScrollDirection>,
    /// Multiplier for wheel, pinch and momentum input
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: f32,
    #[serde(default)]
    pub bounce_enabled: bool,
    /// Fraction of the overshoot that is kept past a bound
    #[serde(default = "default_bounce_strength")]
    pub bounce_strength: f32,
    #[serde(default = "default_true")]
    pub inertia_enabled: bool,
    /// Per-frame velocity multiplier during momentum
    #[serde(default = "default_inertia_decay")]
    pub inertia_decay: f32,
    /// Multiplier applied to drag velocity before momentum
    #[serde(default = "default_velocity_gain")]
    pub velocity_gain: f32,
    /// Defaults to the viewport width
    #[serde(default)]
    pub content_width: Option<f32>,
    /// Defaults to the viewport height
    #[serde(default)]
    pub content_height: Option<f32>,
    /// When false the view ignores all input
    #[serde(default = "default_true")]
    pub listening: bool,
}

fn default_scroll_speed() -> f32 {
    1.0
}

fn default_bounce_strength() -> f32 {
    0.2
}

fn default_inertia_decay() -> f32 {
    0.95
}

fn default_velocity_gain() -> f32 {
    15.0
}

impl Default for ScrollViewOptions {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            background: None,
            scrollbar: ScrollbarOptions::default(),
            direction: None,
            scroll_speed: default_scroll_speed(),
            bounce_enabled: false,
            bounce_strength: default_bounce_strength(),
            inertia_enabled: true,
            inertia_decay: default_inertia_decay(),
            velocity_gain: default_velocity_gain(),
            content_width: None,
            content_height: None,
            listening: true,
        }
    }
}

impl ScrollViewOptions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let options: Self = toml::from_str(input)?;
        Ok(options.sanitized())
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn direction(mut self, direction: ScrollDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn content_size(mut self, width: f32, height: f32) -> Self {
        self.content_width = Some(width);
        self.content_height = Some(height);
        self
    }

    pub fn bounce(mut self, strength: f32) -> Self {
        self.bounce_enabled = true;
        self.bounce_strength = strength;
        self
    }

    pub fn inertia(mut self, decay: f32) -> Self {
        self.inertia_enabled = true;
        self.inertia_decay = decay;
        self
    }

    pub fn no_inertia(mut self) -> Self {
        self.inertia_enabled = false;
        self
    }

    pub fn scroll_speed(mut self, speed: f32) -> Self {
        self.scroll_speed = speed;
        self
    }

    pub fn scrollbar(mut self, scrollbar: ScrollbarOptions) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Replace out-of-range values with floors or defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            x: finite_or_zero(self.x, "x"),
            y: finite_or_zero(self.y, "y"),
            width: sanitize_extent(self.width, "width"),
            height: sanitize_extent(self.height, "height"),
            scrollbar: self.scrollbar.sanitized(),
            scroll_speed: positive_or(self.scroll_speed, defaults.scroll_speed, "scroll_speed"),
            bounce_strength: unit_interval_or(
                self.bounce_strength,
                defaults.bounce_strength,
                "bounce_strength",
            ),
            inertia_decay: unit_interval_or(
                self.inertia_decay,
                defaults.inertia_decay,
                "inertia_decay",
            ),
            velocity_gain: if self.velocity_gain.is_finite() && self.velocity_gain >= 0.0 {
                self.velocity_gain
            } else {
                warn!("velocity_gain {} is invalid, using default", self.velocity_gain);
                defaults.velocity_gain
            },
            content_width: self.content_width.map(|w| sanitize_extent(w, "content_width")),
            content_height: self.content_height.map(|h| sanitize_extent(h, "content_height")),
            ..self
        }
    }
}

/// Options for [`ListView`](crate::list::ListView)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewOptions {
    #[serde(default)]
    pub scroll: ScrollViewOptions,
    /// Fallback primary extent for items that measure zero
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    #[serde(default = "default_item_spacing")]
    pub item_spacing: f32,
    /// Shrink a vertical list's viewport to fit its items
    #[serde(default)]
    pub auto_height: bool,
    #[serde(default = "default_auto_height_cap")]
    pub auto_height_cap: f32,
    #[serde(default)]
    pub horizontal: bool,
    #[serde(default)]
    pub item_align: ItemAlign,
    /// Maximum press-to-release travel that still counts as a tap
    #[serde(default = "default_tap_threshold")]
    pub tap_threshold: f32,
    /// Slack around an item's bounds accepted for the release point
    #[serde(default = "default_tap_buffer")]
    pub tap_buffer: f32,
    #[serde(default = "default_scroll_to_item_duration")]
    pub scroll_to_item_duration_ms: f32,
    #[serde(default = "default_scroll_to_item_steps")]
    pub scroll_to_item_steps: u32,
}

fn default_item_height() -> f32 {
    50.0
}

fn default_item_spacing() -> f32 {
    5.0
}

fn default_auto_height_cap() -> f32 {
    500.0
}

fn default_tap_threshold() -> f32 {
    10.0
}

fn default_tap_buffer() -> f32 {
    5.0
}

fn default_scroll_to_item_duration() -> f32 {
    300.0
}

fn default_scroll_to_item_steps() -> u32 {
    20
}

impl Default for ListViewOptions {
    fn default() -> Self {
        Self {
            scroll: ScrollViewOptions::default(),
            item_height: default_item_height(),
            item_spacing: default_item_spacing(),
            auto_height: false,
            auto_height_cap: default_auto_height_cap(),
            horizontal: false,
            item_align: ItemAlign::default(),
            tap_threshold: default_tap_threshold(),
            tap_buffer: default_tap_buffer(),
            scroll_to_item_duration_ms: default_scroll_to_item_duration(),
            scroll_to_item_steps: default_scroll_to_item_steps(),
        }
    }
}

impl ListViewOptions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll: ScrollViewOptions::new(width, height),
            ..Self::default()
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let options: Self = toml::from_str(input)?;
        Ok(options.sanitized())
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    pub fn item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    pub fn item_align(mut self, align: ItemAlign) -> Self {
        self.item_align = align;
        self
    }

    pub fn auto_height(mut self, enabled: bool) -> Self {
        self.auto_height = enabled;
        self
    }

    /// Scroll axis the list uses unless one was set explicitly
    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll.direction.unwrap_or(if self.horizontal {
            ScrollDirection::Horizontal
        } else {
            ScrollDirection::Vertical
        })
    }

    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            scroll: self.scroll.sanitized(),
            item_height: positive_or(self.item_height, defaults.item_height, "item_height"),
            item_spacing: non_negative(self.item_spacing, "item_spacing"),
            auto_height_cap: positive_or(
                self.auto_height_cap,
                defaults.auto_height_cap,
                "auto_height_cap",
            ),
            tap_threshold: non_negative(self.tap_threshold, "tap_threshold"),
            tap_buffer: non_negative(self.tap_buffer, "tap_buffer"),
            scroll_to_item_duration_ms: non_negative(
                self.scroll_to_item_duration_ms,
                "scroll_to_item_duration_ms",
            ),
            scroll_to_item_steps: self.scroll_to_item_steps.max(1),
            ..self
        }
    }
}

/// Floor a size component: NaN and negatives become zero
pub(crate) fn sanitize_extent(value: f32, field: &str) -> f32 {
    if value.is_nan() || value < 0.0 {
        warn!("{} {} is not a valid extent, using 0", field, value);
        0.0
    } else {
        value
    }
}

fn non_negative(value: f32, field: &str) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        warn!("{} {} is not finite, using 0", field, value);
        0.0
    }
}

fn finite_or_zero(value: f32, field: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        warn!("{} {} is not finite, using 0", field, value);
        0.0
    }
}

fn positive_or(value: f32, default: f32, field: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("{} {} must be positive, using {}", field, value, default);
        default
    }
}

fn unit_interval_or(value: f32, default: f32, field: &str) -> f32 {
    if value > 0.0 && value < 1.0 {
        value
    } else {
        warn!("{} {} must be between 0 and 1, using {}", field, value, default);
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scroll_defaults() {
        let options = ScrollViewOptions::default();
        assert_eq!(options.scroll_speed, 1.0);
        assert!(!options.bounce_enabled);
        assert_eq!(options.bounce_strength, 0.2);
        assert!(options.inertia_enabled);
        assert_eq!(options.inertia_decay, 0.95);
        assert_eq!(options.velocity_gain, 15.0);
        assert_eq!(options.scrollbar.color.to_hex_string(), "#888888");
        assert_eq!(options.scrollbar.opacity, 0.6);
        assert_eq!(options.scrollbar.fade_delay_ms, 1000.0);
        assert_eq!(options.scrollbar.fade_duration_ms, 300.0);
        assert_eq!(options.direction, None);
    }

    #[test]
    fn test_from_toml_partial_table() {
        let options = ScrollViewOptions::from_toml_str(
            r##"
            width = 300
            height = 250
            direction = "vertical"
            bounce_enabled = true

            [scrollbar]
            color = "#444444"
            fade_delay_ms = 600
            "##,
        )
        .unwrap();

        assert_eq!(options.width, 300.0);
        assert_eq!(options.direction, Some(ScrollDirection::Vertical));
        assert!(options.bounce_enabled);
        assert_eq!(options.scrollbar.color.to_hex_string(), "#444444");
        assert_eq!(options.scrollbar.fade_delay_ms, 600.0);
        assert_eq!(options.scrollbar.width, 8.0);
        assert_eq!(options.inertia_decay, 0.95);
    }

    #[test]
    fn test_from_toml_rejects_bad_color() {
        let result = ScrollViewOptions::from_toml_str(
            r#"
            [scrollbar]
            color = "grey"
            "#,
        );
        assert!(matches!(result, Err(crate::WidgetError::Config(_))));
    }

    #[test]
    fn test_sanitize_floors_and_defaults() {
        let options = ScrollViewOptions {
            width: -20.0,
            height: f32::NAN,
            scroll_speed: 0.0,
            bounce_strength: 3.0,
            inertia_decay: 1.0,
            content_width: Some(-1.0),
            ..ScrollViewOptions::default()
        }
        .sanitized();

        assert_eq!(options.width, 0.0);
        assert_eq!(options.height, 0.0);
        assert_eq!(options.scroll_speed, 1.0);
        assert_eq!(options.bounce_strength, 0.2);
        assert_eq!(options.inertia_decay, 0.95);
        assert_eq!(options.content_width, Some(0.0));
    }

    #[test]
    fn test_list_direction_follows_orientation() {
        assert_eq!(
            ListViewOptions::new(300.0, 250.0).scroll_direction(),
            ScrollDirection::Vertical
        );
        assert_eq!(
            ListViewOptions::new(300.0, 250.0)
                .horizontal(true)
                .scroll_direction(),
            ScrollDirection::Horizontal
        );
    }

    #[test]
    fn test_list_from_toml() {
        let options = ListViewOptions::from_toml_str(
            r#"
            item_spacing = 10
            horizontal = true
            item_align = "right"

            [scroll]
            width = 400
            height = 120
            "#,
        )
        .unwrap();

        assert_eq!(options.item_spacing, 10.0);
        assert_eq!(options.item_height, 50.0);
        assert_eq!(options.item_align, ItemAlign::End);
        assert_eq!(options.scroll.width, 400.0);
        assert_eq!(options.scroll_to_item_steps, 20);
    }

    #[test]
    fn test_direction_gate() {
        assert_eq!(ScrollDirection::Vertical.gate(4.0, 5.0), (0.0, 5.0));
        assert_eq!(ScrollDirection::Horizontal.gate(4.0, 5.0), (4.0, 0.0));
        assert_eq!(ScrollDirection::Both.gate(4.0, 5.0), (4.0, 5.0));
    }
}
