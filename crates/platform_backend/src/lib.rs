//! Backend collaborator contracts for the posts/folders desktop.
//!
//! The hosted backend owns almost all app state (auth, posts, follows,
//! messages); this crate exposes only the slice the desktop spatial engine
//! needs: bulk reads of a user's files and folders plus single-row
//! position/parent/name mutations, behind an object-safe async service
//! trait with swappable adapters.

pub mod memory;
pub mod records;
pub mod service;

pub use memory::MemoryBackend;
pub use records::{FetchedItems, FileRecord, FolderRecord, ItemKind, NewFolder, Position};
pub use service::{BackendFuture, DesktopBackend, NoopBackend};
