//! Record types exchanged with the hosted posts/folders tables.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Stored pixel position of a desktop icon, exchanged as a plain JSON pair.
pub struct Position {
    /// Horizontal offset in container-local pixels.
    pub x: f64,
    /// Vertical offset in container-local pixels.
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which backing table an item lives in.
pub enum ItemKind {
    /// An audio post, rendered as a draggable file icon.
    File,
    /// A user-created folder.
    Folder,
}

impl ItemKind {
    /// Stable lowercase token used for logging and diagnostics.
    pub const fn token(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A row from the posts table, as returned by a bulk fetch.
pub struct FileRecord {
    /// Opaque unique post id.
    pub id: String,
    /// Owning user id.
    pub user_id: String,
    /// Display caption; may be absent for legacy rows.
    pub caption: Option<String>,
    /// URL of the recorded audio clip.
    pub audio_url: Option<String>,
    /// Containing folder id; `None` means the desktop root.
    pub folder_id: Option<String>,
    /// Stored icon position; `None` for rows that were never dragged.
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A row from the folders table, as returned by a bulk fetch.
pub struct FolderRecord {
    /// Opaque unique folder id.
    pub id: String,
    /// Owning user id.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Containing folder id; `None` means the desktop root.
    pub parent_folder_id: Option<String>,
    /// Stored icon position; `None` for rows that were never dragged.
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Result of a bulk read of a user's desktop contents.
pub struct FetchedItems {
    /// The user's audio posts.
    pub files: Vec<FileRecord>,
    /// The user's folders.
    pub folders: Vec<FolderRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Request payload for creating a folder row. Column names match the
/// hosted schema, so the payload serializes straight into an insert.
pub struct NewFolder {
    /// Owning user id.
    pub user_id: String,
    /// Display name for the new folder.
    pub name: String,
    /// Containing folder id; `None` places it at the desktop root.
    pub parent_folder_id: Option<String>,
    /// Initial icon position.
    pub position: Position,
}
