//! Render frame description.
//!
//! The rendering surface is a collaborator toolkit, the widget only describes
//! what one frame looks like. Colors and fonts belong to the theming system
//! and are not part of the description.

use std::f32::consts::TAU;

use euclid::default::{Point2D, Rect, Size2D};

use hud_bridge_api::Position;

use crate::{ProgressState, ProgressWidget};

/// Ring diameter, in logical pixels.
pub const RING_SIZE: f32 = 90.0;

/// Ring stroke thickness, in logical pixels.
pub const RING_THICKNESS: f32 = 7.0;

/// Height of the caption row reserved under the ring, in logical pixels.
pub const CAPTION_HEIGHT: f32 = 25.0;

/// Fraction of the viewport height covered by the [`Position::Bottom`] band.
const BOTTOM_BAND: f32 = 0.2;

/// Filled arc of the progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingArc {
    /// Center of the ring.
    pub center: Point2D<f32>,
    /// Radius of the stroke center line.
    pub radius: f32,
    /// Stroke thickness.
    pub thickness: f32,
    /// Filled sweep in radians, clockwise from the top of the ring.
    pub sweep: f32,
}

/// Declarative description of one overlay frame.
///
/// Built from the widget state, drawn by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RingFrame {
    /// Area of the widget in the viewport, ring plus caption row.
    pub area: Rect<f32>,
    /// The progress ring.
    pub ring: RingArc,
    /// Percentage text centered in the ring, e.g. `"50%"`.
    pub value: String,
    /// Caption under the ring, `None` when the run has no label.
    pub caption: Option<String>,
}
impl RingFrame {
    /// Build the frame for `state` in a viewport of `viewport` size.
    ///
    /// Is `None` while the widget is hidden.
    pub fn build(state: &ProgressState, viewport: Size2D<f32>) -> Option<RingFrame> {
        if !state.visible {
            return None;
        }

        let caption = (!state.label.is_empty()).then(|| state.label.clone());
        let size = Size2D::new(
            RING_SIZE,
            if caption.is_some() { RING_SIZE + CAPTION_HEIGHT } else { RING_SIZE },
        );

        let band = match state.position {
            Position::Middle => Rect::new(Point2D::origin(), viewport),
            Position::Bottom => Rect::new(
                Point2D::new(0.0, viewport.height * (1.0 - BOTTOM_BAND)),
                Size2D::new(viewport.width, viewport.height * BOTTOM_BAND),
            ),
        };
        let origin = Point2D::new(
            band.origin.x + (band.size.width - size.width) / 2.0,
            band.origin.y + (band.size.height - size.height) / 2.0,
        );
        let area = Rect::new(origin, size);

        Some(RingFrame {
            ring: RingArc {
                center: Point2D::new(origin.x + RING_SIZE / 2.0, origin.y + RING_SIZE / 2.0),
                radius: (RING_SIZE - RING_THICKNESS) / 2.0,
                thickness: RING_THICKNESS,
                sweep: sweep_radians(state.percent),
            },
            value: format!("{}%", state.percent),
            caption,
            area,
        })
    }
}

/// Filled sweep angle for a percent in `0..=100`.
pub fn sweep_radians(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0 * TAU
}

impl ProgressWidget {
    /// Describe the current frame for the rendering surface.
    ///
    /// Is `None` while the widget is hidden.
    pub fn render(&self, viewport: Size2D<f32>) -> Option<RingFrame> {
        RingFrame::build(self.state(), viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    fn state(percent: u8, label: &str, position: Position) -> ProgressState {
        ProgressState {
            visible: true,
            percent,
            label: label.to_owned(),
            duration: Duration::from_millis(1000),
            position,
        }
    }

    const VIEWPORT: Size2D<f32> = Size2D::new(1920.0, 1080.0);

    #[test]
    fn hidden_renders_nothing() {
        let mut s = state(50, "", Position::Middle);
        s.visible = false;
        assert_eq!(RingFrame::build(&s, VIEWPORT), None);
    }

    #[test]
    fn middle_placement_centers_in_viewport() {
        let frame = RingFrame::build(&state(50, "", Position::Middle), VIEWPORT).unwrap();

        assert_eq!(frame.caption, None);
        assert_eq!(frame.area.size, Size2D::new(RING_SIZE, RING_SIZE));
        assert_eq!(frame.ring.center, Point2D::new(960.0, 540.0));
        assert_eq!(frame.value, "50%");
    }

    #[test]
    fn bottom_placement_centers_in_bottom_band() {
        let frame = RingFrame::build(&state(10, "", Position::Bottom), VIEWPORT).unwrap();

        // band is the bottom 20%: y in 864..1080, center 972.
        assert_eq!(frame.ring.center, Point2D::new(960.0, 972.0));
    }

    #[test]
    fn caption_reserves_a_row() {
        let frame = RingFrame::build(&state(0, "Picking lock", Position::Middle), VIEWPORT).unwrap();

        assert_eq!(frame.caption.as_deref(), Some("Picking lock"));
        assert_eq!(frame.area.size.height, RING_SIZE + CAPTION_HEIGHT);
        // ring stays at the top of the area, the caption row is below it.
        assert_eq!(frame.ring.center.y, frame.area.origin.y + RING_SIZE / 2.0);
    }

    #[test]
    fn sweep_covers_the_ring() {
        assert_eq!(sweep_radians(0), 0.0);
        assert!((sweep_radians(50) - TAU / 2.0).abs() < 1e-6);
        assert!((sweep_radians(100) - TAU).abs() < 1e-6);
        // out of range percent reads as a full ring.
        assert!((sweep_radians(130) - TAU).abs() < 1e-6);
    }
}
