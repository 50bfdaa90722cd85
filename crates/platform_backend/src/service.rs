//! Desktop backend service contract.

use std::{future::Future, pin::Pin};

use crate::records::{FetchedItems, FolderRecord, ItemKind, NewFolder, Position};

/// Object-safe boxed future used by [`DesktopBackend`] async methods.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the desktop's remote CRUD operations.
///
/// All methods are single-shot: callers issue exactly one write per user
/// gesture and treat failures as log-and-continue (local state is the
/// rendering source of truth and is never rolled back).
pub trait DesktopBackend {
    /// Bulk-reads all files and folders owned by `user_id`.
    fn fetch_items<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BackendFuture<'a, Result<FetchedItems, String>>;

    /// Persists a new icon position for an item.
    fn persist_position<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
        position: Position,
    ) -> BackendFuture<'a, Result<(), String>>;

    /// Persists a new containing folder for an item (`None` = desktop root).
    fn persist_parent<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
        parent_id: Option<&'a str>,
    ) -> BackendFuture<'a, Result<(), String>>;

    /// Deletes an item row.
    fn delete_item<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
    ) -> BackendFuture<'a, Result<(), String>>;

    /// Updates an item's display caption/name.
    fn rename_item<'a>(
        &'a self,
        id: &'a str,
        kind: ItemKind,
        new_name: &'a str,
    ) -> BackendFuture<'a, Result<(), String>>;

    /// Creates a folder row and returns it with its assigned id.
    fn create_folder<'a>(
        &'a self,
        request: NewFolder,
    ) -> BackendFuture<'a, Result<FolderRecord, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op backend adapter for unsupported targets and baseline tests.
pub struct NoopBackend;

impl NoopBackend {
    fn unsupported_error(op: &str) -> String {
        format!("desktop backend unavailable: {op}")
    }
}

impl DesktopBackend for NoopBackend {
    fn fetch_items<'a>(
        &'a self,
        _user_id: &'a str,
    ) -> BackendFuture<'a, Result<FetchedItems, String>> {
        Box::pin(async { Ok(FetchedItems::default()) })
    }

    fn persist_position<'a>(
        &'a self,
        _id: &'a str,
        _kind: ItemKind,
        _position: Position,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn persist_parent<'a>(
        &'a self,
        _id: &'a str,
        _kind: ItemKind,
        _parent_id: Option<&'a str>,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_item<'a>(
        &'a self,
        _id: &'a str,
        _kind: ItemKind,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn rename_item<'a>(
        &'a self,
        _id: &'a str,
        _kind: ItemKind,
        _new_name: &'a str,
    ) -> BackendFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn create_folder<'a>(
        &'a self,
        _request: NewFolder,
    ) -> BackendFuture<'a, Result<FolderRecord, String>> {
        Box::pin(async { Err(Self::unsupported_error("create_folder")) })
    }
}
