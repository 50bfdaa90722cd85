//! Position clamping against desktop bounds and forbidden zones.
//!
//! The clamper is the single source of truth for where an icon may rest:
//! callers commit its result as-is and never reapply their own clamp.

use crate::geometry::{clamp, Point, Rect};
use crate::model::{DesktopBounds, DROP_PADDING, ICON_SIZE};

/// Bound on the push-out loop. A single push can land an icon inside a
/// different forbidden zone, so the loop rechecks all zones until it
/// converges or the attempts run out.
pub const MAX_PUSH_ATTEMPTS: u32 = 10;

/// Clamps an icon position into the usable desktop rectangle.
pub fn clamp_point(position: Point, bounds: &DesktopBounds) -> Point {
    Point {
        x: clamp(position.x, 0.0, bounds.width - ICON_SIZE),
        y: clamp(position.y, 0.0, bounds.usable_height() - ICON_SIZE),
    }
}

/// Builds the padded forbidden rectangles for the fixed zones, skipping
/// any zone that has not been measured yet.
pub fn forbidden_zones(trash: Option<Rect>, portal: Option<Rect>) -> Vec<Rect> {
    [trash, portal]
        .into_iter()
        .flatten()
        .filter(|zone| !zone.is_degenerate())
        .map(|zone| zone.expanded(DROP_PADDING))
        .collect()
}

/// Clamps `position` into bounds, then pushes it out of every forbidden
/// zone it overlaps: just below the zone, or just above when below would
/// leave the usable area. The returned position is authoritative.
pub fn resolve_position(position: Point, bounds: &DesktopBounds, zones: &[Rect]) -> Point {
    let mut position = clamp_point(position, bounds);

    let mut attempts = MAX_PUSH_ATTEMPTS;
    while attempts > 0 {
        attempts -= 1;
        let icon_box = Rect::square(position, ICON_SIZE);
        let Some(zone) = zones.iter().find(|zone| icon_box.intersects(zone)) else {
            break;
        };
        position.y = zone.bottom() + 1.0;
        if position.y + ICON_SIZE > bounds.usable_height() {
            position.y = zone.y - ICON_SIZE - 1.0;
        }
        position = clamp_point(position, bounds);
    }

    position
}
