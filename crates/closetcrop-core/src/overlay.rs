//! Overlay geometry: the dimming mask around the crop frame and the
//! rule-of-thirds grid inside it. Drawing is left to the UI layer.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

/// Shapes to draw over the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayout {
    /// Regions outside the frame to dim. Empty bands are omitted.
    pub dim_regions: Vec<Rect>,
    /// Two vertical then two horizontal thirds lines, inside the frame.
    pub grid_lines: [LineSegment; 4],
    pub frame: Rect,
}

/// Build the overlay for `frame` inside `viewport`.
pub fn overlay_layout(viewport: Size, frame: Rect) -> OverlayLayout {
    let bands = [
        // Above and below span the full width
        Rect::new(0.0, 0.0, viewport.width, frame.y),
        Rect::new(0.0, frame.max_y(), viewport.width, viewport.height - frame.max_y()),
        // Left and right fill the gap beside the frame
        Rect::new(0.0, frame.y, frame.x, frame.height),
        Rect::new(frame.max_x(), frame.y, viewport.width - frame.max_x(), frame.height),
    ];
    let dim_regions = bands
        .into_iter()
        .filter(|band| band.width > 0.0 && band.height > 0.0)
        .collect();

    let third_w = frame.width / 3.0;
    let third_h = frame.height / 3.0;
    let vertical = |i: f64| LineSegment {
        start: Point::new(frame.x + third_w * i, frame.y),
        end: Point::new(frame.x + third_w * i, frame.max_y()),
    };
    let horizontal = |i: f64| LineSegment {
        start: Point::new(frame.x, frame.y + third_h * i),
        end: Point::new(frame.max_x(), frame.y + third_h * i),
    };

    OverlayLayout {
        dim_regions,
        grid_lines: [vertical(1.0), vertical(2.0), horizontal(1.0), horizontal(2.0)],
        frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_regions_surround_frame() {
        let viewport = Size::new(390.0, 600.0);
        let frame = Rect::new(20.0, 125.0, 350.0, 350.0);
        let layout = overlay_layout(viewport, frame);

        assert_eq!(
            layout.dim_regions,
            vec![
                Rect::new(0.0, 0.0, 390.0, 125.0),
                Rect::new(0.0, 475.0, 390.0, 125.0),
                Rect::new(0.0, 125.0, 20.0, 350.0),
                Rect::new(370.0, 125.0, 20.0, 350.0),
            ]
        );

        let dimmed: f64 = layout.dim_regions.iter().map(Rect::area).sum();
        assert!((dimmed + frame.area() - viewport.area()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_bands_omitted() {
        let viewport = Size::new(300.0, 500.0);
        let frame = Rect::new(0.0, 100.0, 300.0, 300.0);
        let layout = overlay_layout(viewport, frame);
        assert_eq!(layout.dim_regions.len(), 2);
    }

    #[test]
    fn test_grid_lines_at_thirds() {
        let frame = Rect::new(0.0, 0.0, 300.0, 300.0);
        let layout = overlay_layout(Size::new(300.0, 300.0), frame);

        assert!(layout.dim_regions.is_empty());
        assert_eq!(layout.grid_lines[0].start, Point::new(100.0, 0.0));
        assert_eq!(layout.grid_lines[0].end, Point::new(100.0, 300.0));
        assert_eq!(layout.grid_lines[1].start.x, 200.0);
        assert_eq!(layout.grid_lines[2].start, Point::new(0.0, 100.0));
        assert_eq!(layout.grid_lines[3].end, Point::new(300.0, 200.0));
    }
}
