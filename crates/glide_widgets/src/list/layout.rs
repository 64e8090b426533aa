//! Two-pass list layout
//!
//! Pass one measures every item and aggregates the primary-axis total and
//! the largest cross-axis extent. Pass two places each item along the
//! primary axis and aligns it on the cross axis. No scene access happens
//! here; the list feeds in measured sizes and applies the placements.

use glide_core::{Point, Rect, Size};

use crate::options::ItemAlign;

/// Inputs for one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub horizontal: bool,
    pub spacing: f32,
    pub align: ItemAlign,
    /// Extent used for either dimension of an item that measures zero
    pub fallback_extent: f32,
    pub viewport: Size,
}

/// Where one item goes, relative to the items container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    pub origin: Point,
    /// Measured size, or the stretched size under [`ItemAlign::Stretch`]
    pub size: Size,
}

impl ItemPlacement {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListLayout {
    pub placements: Vec<ItemPlacement>,
    /// Sum of item extents plus spacing between them
    pub primary_extent: f32,
    /// Extent items are aligned against on the cross axis
    pub cross_extent: f32,
}

impl ListLayout {
    /// Content size for the scroll view
    ///
    /// Vertical lists span the viewport width; horizontal lists span the
    /// viewport height.
    pub fn content_size(&self, params: &LayoutParams) -> Size {
        if params.horizontal {
            Size::new(self.primary_extent, params.viewport.height)
        } else {
            Size::new(params.viewport.width, self.primary_extent)
        }
    }
}

fn measured(value: f32, fallback: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Lay out items of the given sizes
pub fn compute(sizes: &[Size], params: &LayoutParams) -> ListLayout {
    // Pass one: measure
    let measured: Vec<Size> = sizes
        .iter()
        .map(|size| {
            Size::new(
                measured(size.width, params.fallback_extent),
                measured(size.height, params.fallback_extent),
            )
        })
        .collect();

    let (primary, cross): (Vec<f32>, Vec<f32>) = measured
        .iter()
        .map(|size| {
            if params.horizontal {
                (size.width, size.height)
            } else {
                (size.height, size.width)
            }
        })
        .unzip();

    let primary_extent = if primary.is_empty() {
        0.0
    } else {
        primary.iter().map(|extent| extent + params.spacing).sum::<f32>() - params.spacing
    };
    let cross_extent = if params.horizontal {
        cross.iter().copied().fold(0.0, f32::max)
    } else {
        params.viewport.width
    };

    // Pass two: place
    let mut offset = 0.0;
    let placements = primary
        .iter()
        .zip(&cross)
        .map(|(&main, &across)| {
            let (cross_offset, cross_size) = match params.align {
                ItemAlign::Start => (0.0, across),
                ItemAlign::Center => ((cross_extent - across) / 2.0, across),
                ItemAlign::End => (cross_extent - across, across),
                ItemAlign::Stretch => (0.0, cross_extent),
            };
            let placement = if params.horizontal {
                ItemPlacement {
                    origin: Point::new(offset, cross_offset),
                    size: Size::new(main, cross_size),
                }
            } else {
                ItemPlacement {
                    origin: Point::new(cross_offset, offset),
                    size: Size::new(cross_size, main),
                }
            };
            offset += main + params.spacing;
            placement
        })
        .collect();

    ListLayout {
        placements,
        primary_extent,
        cross_extent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(horizontal: bool, align: ItemAlign) -> LayoutParams {
        LayoutParams {
            horizontal,
            spacing: 10.0,
            align,
            fallback_extent: 50.0,
            viewport: Size::new(300.0, 250.0),
        }
    }

    #[test]
    fn test_horizontal_totals_and_offsets() {
        let sizes = vec![Size::new(100.0, 80.0); 6];
        let layout = compute(&sizes, &params(true, ItemAlign::Start));

        assert_eq!(layout.primary_extent, 650.0);
        assert_eq!(layout.cross_extent, 80.0);
        assert_eq!(layout.placements[3].origin, Point::new(330.0, 0.0));
        assert_eq!(
            layout.content_size(&params(true, ItemAlign::Start)),
            Size::new(650.0, 250.0)
        );
    }

    #[test]
    fn test_vertical_uses_fallback_for_zero_height() {
        let sizes = [
            Size::new(200.0, 0.0),
            Size::new(200.0, 30.0),
            Size::new(200.0, 0.0),
        ];
        let layout = compute(&sizes, &params(false, ItemAlign::Start));
        // 50 + 10 + 30 + 10 + 50
        assert_eq!(layout.primary_extent, 150.0);
        assert_eq!(layout.placements[1].origin.y, 60.0);
        assert_eq!(layout.placements[2].origin.y, 100.0);
        assert_eq!(layout.placements[2].size.height, 50.0);
    }

    #[test]
    fn test_zero_cross_extent_uses_fallback() {
        let sizes = [Size::new(0.0, 40.0)];
        let center = compute(&sizes, &params(false, ItemAlign::Center));
        // (300 - 50) / 2
        assert_eq!(center.placements[0].origin.x, 125.0);
        assert_eq!(center.placements[0].size, Size::new(50.0, 40.0));

        let sizes = [Size::new(60.0, 0.0), Size::new(60.0, 30.0)];
        let row = compute(&sizes, &params(true, ItemAlign::End));
        assert_eq!(row.cross_extent, 50.0);
        assert_eq!(row.placements[0].origin.y, 0.0);
        assert_eq!(row.placements[1].origin.y, 20.0);
    }

    #[test]
    fn test_vertical_alignment_against_viewport_width() {
        let sizes = [Size::new(100.0, 40.0)];
        let center = compute(&sizes, &params(false, ItemAlign::Center));
        assert_eq!(center.placements[0].origin.x, 100.0);

        let end = compute(&sizes, &params(false, ItemAlign::End));
        assert_eq!(end.placements[0].origin.x, 200.0);

        let stretch = compute(&sizes, &params(false, ItemAlign::Stretch));
        assert_eq!(stretch.placements[0].origin.x, 0.0);
        assert_eq!(stretch.placements[0].size, Size::new(300.0, 40.0));
    }

    #[test]
    fn test_horizontal_alignment_against_tallest_item() {
        let sizes = [Size::new(60.0, 40.0), Size::new(60.0, 100.0)];
        let layout = compute(&sizes, &params(true, ItemAlign::Center));
        assert_eq!(layout.placements[0].origin.y, 30.0);
        assert_eq!(layout.placements[1].origin.y, 0.0);
    }

    #[test]
    fn test_empty_list_has_zero_extent() {
        let layout = compute(&[], &params(false, ItemAlign::Start));
        assert!(layout.placements.is_empty());
        assert_eq!(layout.primary_extent, 0.0);
        assert_eq!(
            layout.content_size(&params(false, ItemAlign::Start)),
            Size::new(300.0, 0.0)
        );
    }
}
