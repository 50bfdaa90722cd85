//! Drag-end classification against fixed zones and folder targets.

use platform_backend::ItemKind;

use crate::clamp::{forbidden_zones, resolve_position};
use crate::geometry::{overlap_ratio, DesktopOffset, Point, Rect};
use crate::model::{
    DesktopBounds, ItemId, DROP_PADDING, FILE_DROP_THRESHOLD, FOLDER_DROP_THRESHOLD, ICON_SIZE,
    SNAP_MARGIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Zone rectangles measured by the UI at drag end, in container space.
///
/// A `None` or zero-sized rect means the zone is absent (not rendered, or
/// measured before layout completed) and its test is skipped.
pub struct DropContext {
    /// Screen-to-container translation for the reported drop position.
    pub offset: DesktopOffset,
    /// Trash icon bounds.
    pub trash: Option<Rect>,
    /// Rename-portal icon bounds.
    pub portal: Option<Rect>,
    /// Back-navigation icon bounds; only rendered inside a subfolder.
    pub back: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
/// A visible folder eligible to receive the dragged item.
pub struct FolderTarget {
    /// Folder id.
    pub id: ItemId,
    /// Folder icon bounds.
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
/// The single outcome of a drag release. The resolver never mutates
/// state; the caller applies the outcome through the reducer/store.
pub enum DropOutcome {
    /// Ask the user to confirm deletion; on cancel the item lands at
    /// `snap_position`, just outside the trash zone.
    RequestDelete {
        /// Cancel landing spot.
        snap_position: Point,
    },
    /// Ask the user for a new name; the item visually returns to
    /// `snap_position` beside the portal while the popup is open.
    RequestRename {
        /// Portal-adjacent landing spot.
        snap_position: Point,
    },
    /// Move the item one level up the folder stack.
    ReparentUp,
    /// Move the item into a folder it was dropped onto.
    MoveIntoFolder {
        /// Receiving folder.
        folder_id: ItemId,
    },
    /// Plain reposition to a clamped, zone-free location.
    Reposition {
        /// Final authoritative position.
        position: Point,
    },
}

fn active_zone(zone: Option<Rect>) -> Option<Rect> {
    zone.filter(|rect| !rect.is_degenerate())
}

/// Landing spot adjacent to a zone: left of it, or above it when the drop
/// approached from the left. The result is re-resolved against the full
/// zone list so the candidate cannot rest inside a neighboring zone.
fn snap_beside(zone: &Rect, drop_position: Point, bounds: &DesktopBounds, zones: &[Rect]) -> Point {
    let candidate = if drop_position.x < zone.x {
        Point::new(zone.x, zone.y - ICON_SIZE - SNAP_MARGIN)
    } else {
        Point::new(zone.x - ICON_SIZE - SNAP_MARGIN, zone.y)
    };
    resolve_position(candidate, bounds, zones)
}

/// Classifies a drag release into exactly one [`DropOutcome`], testing
/// targets in strict priority order: trash, rename portal, back
/// navigation, folder drop, reposition.
///
/// `drop_position` is the item's top-left in container space;
/// `folders` lists the folders visible in the current view.
pub fn resolve_drop(
    item_id: &ItemId,
    kind: ItemKind,
    drop_position: Point,
    folders: &[FolderTarget],
    context: &DropContext,
    bounds: &DesktopBounds,
) -> DropOutcome {
    let drag_box = Rect::square(drop_position, ICON_SIZE).expanded(DROP_PADDING);
    let zones = forbidden_zones(context.trash, context.portal);

    if let Some(trash) = active_zone(context.trash) {
        if drag_box.intersects(&trash.expanded(DROP_PADDING)) {
            return DropOutcome::RequestDelete {
                snap_position: snap_beside(&trash, drop_position, bounds, &zones),
            };
        }
    }

    if let Some(portal) = active_zone(context.portal) {
        if drag_box.intersects(&portal.expanded(DROP_PADDING)) {
            return DropOutcome::RequestRename {
                snap_position: snap_beside(&portal, drop_position, bounds, &zones),
            };
        }
    }

    if let Some(back) = active_zone(context.back) {
        if drag_box.intersects(&back.expanded(DROP_PADDING)) {
            return DropOutcome::ReparentUp;
        }
    }

    let threshold = match kind {
        ItemKind::File => FILE_DROP_THRESHOLD,
        ItemKind::Folder => FOLDER_DROP_THRESHOLD,
    };
    for target in folders {
        if &target.id == item_id {
            continue;
        }
        if overlap_ratio(&drag_box, &target.rect) > threshold {
            return DropOutcome::MoveIntoFolder {
                folder_id: target.id.clone(),
            };
        }
    }

    DropOutcome::Reposition {
        position: resolve_position(drop_position, bounds, &zones),
    }
}
