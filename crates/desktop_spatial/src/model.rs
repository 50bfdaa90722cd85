//! Data model for the desktop spatial engine.

use serde::{Deserialize, Serialize};

use platform_backend::{FileRecord, FolderRecord, ItemKind};

use crate::geometry::{Point, Rect};

/// Rendered edge length of a desktop icon, in pixels.
pub const ICON_SIZE: f64 = 80.0;
/// Padding applied to drop boxes and forbidden zones on all sides.
pub const DROP_PADDING: f64 = 0.0;
/// Gap left between a snapped icon and the zone it was pulled away from.
pub const SNAP_MARGIN: f64 = 20.0;
/// Minimum overlap ratio for a file to drop into a folder.
pub const FILE_DROP_THRESHOLD: f64 = 0.3;
/// Minimum overlap ratio for a folder to nest into another folder.
///
/// Folder nesting is rarer and higher-consequence than filing a post, so
/// it demands a near-total overlap before it fires.
pub const FOLDER_DROP_THRESHOLD: f64 = 0.7;

const GRID_COLUMNS: usize = 4;

/// Deterministic grid slot assigned to items loaded without a stored
/// position.
pub fn fallback_grid_position(index: usize) -> Point {
    Point {
        x: (index % GRID_COLUMNS) as f64 * 100.0 + 20.0,
        y: (index / GRID_COLUMNS) as f64 * 120.0 + 20.0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Opaque identifier of a desktop item (post or folder).
pub struct ItemId(pub String);

impl ItemId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Visible extent of the desktop container.
pub struct DesktopBounds {
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
    /// Height reserved at the bottom for the tab bar.
    pub reserved_bottom: f64,
}

impl DesktopBounds {
    /// Creates bounds from raw measurements.
    pub const fn new(width: f64, height: f64, reserved_bottom: f64) -> Self {
        Self {
            width,
            height,
            reserved_bottom,
        }
    }

    /// Height usable for icon placement.
    pub fn usable_height(&self) -> f64 {
        self.height - self.reserved_bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A positioned item on the desktop: an audio post rendered as a file
/// icon, or a user folder.
pub struct DesktopItem {
    /// Unique id, matching the backend row id.
    pub id: ItemId,
    /// File or folder.
    pub kind: ItemKind,
    /// Containing folder; `None` means the desktop root.
    pub parent_folder_id: Option<ItemId>,
    /// Icon position in container-relative pixels.
    pub position: Point,
    /// Display caption (files) or name (folders).
    pub label: String,
    /// Audio clip URL; files only.
    pub audio_url: Option<String>,
}

impl DesktopItem {
    /// Builds a file item from a fetched post row, assigning the fallback
    /// grid slot when the row has no stored position.
    pub fn from_file_record(record: FileRecord, index: usize) -> Self {
        Self {
            id: ItemId::new(record.id),
            kind: ItemKind::File,
            parent_folder_id: record.folder_id.map(ItemId::new),
            position: record
                .position
                .map(Point::from)
                .unwrap_or_else(|| fallback_grid_position(index)),
            label: record.caption.unwrap_or_default(),
            audio_url: record.audio_url,
        }
    }

    /// Builds a folder item from a fetched folder row.
    pub fn from_folder_record(record: FolderRecord, index: usize) -> Self {
        Self {
            id: ItemId::new(record.id),
            kind: ItemKind::Folder,
            parent_folder_id: record.parent_folder_id.map(ItemId::new),
            position: record
                .position
                .map(Point::from)
                .unwrap_or_else(|| fallback_grid_position(index)),
            label: record.name,
            audio_url: None,
        }
    }

    /// True for folder items.
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// The icon's bounding box at its current position.
    pub fn icon_rect(&self) -> Rect {
        Rect::square(self.position, ICON_SIZE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Breadcrumb trail of open folders; empty means the desktop root.
pub struct FolderStack {
    open: Vec<ItemId>,
}

impl FolderStack {
    /// The folder currently shown, or `None` at the root.
    pub fn current(&self) -> Option<&ItemId> {
        self.open.last()
    }

    /// The folder one level above the current one, or `None` when that
    /// level is the root.
    pub fn parent_of_current(&self) -> Option<ItemId> {
        if self.open.len() >= 2 {
            self.open.get(self.open.len() - 2).cloned()
        } else {
            None
        }
    }

    /// True when showing the desktop root.
    pub fn at_root(&self) -> bool {
        self.open.is_empty()
    }

    /// Number of open folder levels.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Descends into a folder.
    pub fn enter(&mut self, folder_id: ItemId) {
        self.open.push(folder_id);
    }

    /// Ascends one level; returns the folder that was left, if any.
    pub fn leave(&mut self) -> Option<ItemId> {
        self.open.pop()
    }

    /// Returns to the desktop root.
    pub fn reset(&mut self) {
        self.open.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A drop outcome awaiting user confirmation. Only one may be open at a
/// time.
pub enum PendingConfirmation {
    /// A delete request raised by a drag into the trash zone.
    Delete {
        /// Item to delete on confirm.
        item_id: ItemId,
        /// Where the item lands if the user cancels: just outside the
        /// trash zone, never back at the pre-drag position.
        snap_position: Point,
    },
    /// A rename request raised by a drag into the rename portal.
    Rename {
        /// Item whose label is being edited.
        item_id: ItemId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Complete spatial state of the desktop screen.
pub struct DesktopState {
    /// Measured container bounds.
    pub bounds: DesktopBounds,
    /// All loaded items, across every folder.
    pub items: Vec<DesktopItem>,
    /// Navigation breadcrumb.
    pub folder_stack: FolderStack,
    /// Open confirmation popup, if any.
    pub pending: Option<PendingConfirmation>,
}

impl DesktopState {
    /// Creates an empty desktop with the given bounds.
    pub fn new(bounds: DesktopBounds) -> Self {
        Self {
            bounds,
            items: Vec::new(),
            folder_stack: FolderStack::default(),
            pending: None,
        }
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &ItemId) -> Option<&DesktopItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Looks up an item mutably by id.
    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut DesktopItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Items shown in the current folder view. Every item is visible in
    /// exactly one folder's view.
    pub fn visible_items(&self) -> impl Iterator<Item = &DesktopItem> {
        let current = self.folder_stack.current().cloned();
        self.items
            .iter()
            .filter(move |item| item.parent_folder_id == current)
    }

    /// Walks the parent chain of `item_id` and reports whether
    /// `ancestor_id` appears in it. The walk is bounded by the item count
    /// so a pre-existing cycle in loaded data cannot hang it.
    pub fn is_ancestor(&self, ancestor_id: &ItemId, item_id: &ItemId) -> bool {
        let mut cursor = self.item(item_id).and_then(|i| i.parent_folder_id.clone());
        for _ in 0..self.items.len() {
            match cursor {
                Some(parent) => {
                    if &parent == ancestor_id {
                        return true;
                    }
                    cursor = self.item(&parent).and_then(|i| i.parent_folder_id.clone());
                }
                None => return false,
            }
        }
        false
    }

    /// True when moving `folder_id` under `new_parent` would make the
    /// folder its own ancestor.
    pub fn would_create_cycle(&self, folder_id: &ItemId, new_parent: Option<&ItemId>) -> bool {
        match new_parent {
            Some(parent) => parent == folder_id || self.is_ancestor(folder_id, parent),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// An in-flight drag gesture. Position updates stay local until release.
pub struct DragSession {
    /// Item being dragged.
    pub item_id: ItemId,
    /// Pointer position at drag start, in screen coordinates.
    pub pointer_start: Point,
    /// Item position at drag start, in container coordinates.
    pub position_start: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Transient gesture state, one exclusive drag at a time.
pub struct InteractionState {
    /// Active drag session, if any.
    pub dragging: Option<DragSession>,
}
