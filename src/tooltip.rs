use crate::models::{Marker, MarkerPosition};

/// Vertical gap between the hovered bar and the tooltip.
const VERTICAL_OFFSET: f64 = 10.0;

/// A positioned tooltip ready for the surface to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Exact time match; the FIRST marker wins, later markers at the same
/// timestamp are shadowed. Pre-existing behavior, kept on purpose.
pub fn find_marker_at(markers: &[Marker], time: i64) -> Option<&Marker> {
    markers.iter().find(|m| m.time == time)
}

/// Center the tooltip on the pointer, lift it above or drop it below the
/// bar depending on the marker position, then clamp it into the
/// container so it never overflows.
pub fn place(
    pointer_x: f64,
    bar_y: f64,
    position: MarkerPosition,
    tooltip_w: f64,
    tooltip_h: f64,
    container_w: f64,
    container_h: f64,
) -> (f64, f64) {
    let x = pointer_x - tooltip_w / 2.0;
    let y = match position {
        MarkerPosition::AboveBar => bar_y - tooltip_h - VERTICAL_OFFSET,
        MarkerPosition::BelowBar => bar_y + VERTICAL_OFFSET,
    };
    let max_x = (container_w - tooltip_w).max(0.0);
    let max_y = (container_h - tooltip_h).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}
