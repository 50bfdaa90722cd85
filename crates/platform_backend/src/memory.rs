//! In-memory backend adapter used by engine tests and offline development.

use std::{cell::RefCell, rc::Rc};

use crate::records::{FetchedItems, FileRecord, FolderRecord, ItemKind, NewFolder, Position};
use crate::service::{BackendFuture, DesktopBackend};

#[derive(Debug, Default)]
struct MemoryTables {
    files: Vec<FileRecord>,
    folders: Vec<FolderRecord>,
    next_folder_seq: u64,
}

#[derive(Debug, Clone, Default)]
/// In-memory posts/folders tables keyed by row id.
pub struct MemoryBackend {
    inner: Rc<RefCell<MemoryTables>>,
}

impl MemoryBackend {
    /// Creates a backend pre-seeded with existing rows.
    pub fn with_items(files: Vec<FileRecord>, folders: Vec<FolderRecord>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryTables {
                files,
                folders,
                next_folder_seq: 0,
            })),
        }
    }

    /// Returns a stored file row by id, if present.
    pub fn file(&self, id: &str) -> Option<FileRecord> {
        self.inner.borrow().files.iter().find(|f| f.id == id).cloned()
    }

    /// Returns a stored folder row by id, if present.
    pub fn folder(&self, id: &str) -> Option<FolderRecord> {
        self.inner
            .borrow()
            .folders
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    fn missing_row(id: &str, kind: ItemKind) -> String {
        format!("no {} row with id {id}", kind.token())
    }
}

impl DesktopBackend for MemoryBackend {
    fn fetch_items<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BackendFuture<'a, Result<FetchedItems, String>> {
        Box::pin(async move {
            let tables = self.inner.borrow();
            Ok(FetchedItems {
                files: tables
                    .files
                    .iter()
                    .filter(|f| f.user_id == user_id)
                    .cloned()
                    .collect(),
                folders: tables
                    .folders
                    .iter()
                    .filter(|f| f.user_id == user_id)
                    .cloned()
                    .collect(),
            })
        })
    }

    fn persist_position<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
        position: Position,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut tables = self.inner.borrow_mut();
            match kind {
                ItemKind::File => {
                    let row = tables
                        .files
                        .iter_mut()
                        .find(|f| f.id == id)
                        .ok_or_else(|| Self::missing_row(id, kind))?;
                    row.position = Some(position);
                }
                ItemKind::Folder => {
                    let row = tables
                        .folders
                        .iter_mut()
                        .find(|f| f.id == id)
                        .ok_or_else(|| Self::missing_row(id, kind))?;
                    row.position = Some(position);
                }
            }
            Ok(())
        })
    }

    fn persist_parent<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
        parent_id: Option<&'a str>,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut tables = self.inner.borrow_mut();
            match kind {
                ItemKind::File => {
                    let row = tables
                        .files
                        .iter_mut()
                        .find(|f| f.id == id)
                        .ok_or_else(|| Self::missing_row(id, kind))?;
                    row.folder_id = parent_id.map(str::to_string);
                }
                ItemKind::Folder => {
                    let row = tables
                        .folders
                        .iter_mut()
                        .find(|f| f.id == id)
                        .ok_or_else(|| Self::missing_row(id, kind))?;
                    row.parent_folder_id = parent_id.map(str::to_string);
                }
            }
            Ok(())
        })
    }

    fn delete_item<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut tables = self.inner.borrow_mut();
            let removed = match kind {
                ItemKind::File => {
                    let before = tables.files.len();
                    tables.files.retain(|f| f.id != id);
                    tables.files.len() != before
                }
                ItemKind::Folder => {
                    let before = tables.folders.len();
                    tables.folders.retain(|f| f.id != id);
                    tables.folders.len() != before
                }
            };
            if removed {
                Ok(())
            } else {
                Err(Self::missing_row(id, kind))
            }
        })
    }

    fn rename_item<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
        new_name: &'a str,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut tables = self.inner.borrow_mut();
            match kind {
                ItemKind::File => {
                    let row = tables
                        .files
                        .iter_mut()
                        .find(|f| f.id == id)
                        .ok_or_else(|| Self::missing_row(id, kind))?;
                    row.caption = Some(new_name.to_string());
                }
                ItemKind::Folder => {
                    let row = tables
                        .folders
                        .iter_mut()
                        .find(|f| f.id == id)
                        .ok_or_else(|| Self::missing_row(id, kind))?;
                    row.name = new_name.to_string();
                }
            }
            Ok(())
        })
    }

    fn create_folder<'a>(
        &'a self,
        request: NewFolder,
    ) -> BackendFuture<'a, Result<FolderRecord, String>> {
        Box::pin(async move {
            let mut tables = self.inner.borrow_mut();
            tables.next_folder_seq += 1;
            let record = FolderRecord {
                id: format!("folder-{}", tables.next_folder_seq),
                user_id: request.user_id,
                name: request.name,
                parent_folder_id: request.parent_folder_id,
                position: Some(request.position),
            };
            tables.folders.push(record.clone());
            Ok(record)
        })
    }
}
