//! Item store: owns the desktop state, drives the reducer, and executes
//! side-effect intents against a [`DesktopBackend`].
//!
//! Writes are single-shot and log-and-continue. Local state is the
//! rendering source of truth: a failed write is reported through
//! `tracing` and the local change is kept, never rolled back.

use platform_backend::{DesktopBackend, ItemKind, NewFolder, Position};

use crate::clamp::clamp_point;
use crate::geometry::Point;
use crate::model::{DesktopBounds, DesktopItem, DesktopState, InteractionState, ItemId};
use crate::reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};

/// Desktop state plus the backend that persists it.
pub struct ItemStore<B> {
    backend: B,
    user_id: String,
    state: DesktopState,
    interaction: InteractionState,
    last_notice: Option<String>,
}

impl<B: DesktopBackend> ItemStore<B> {
    /// Creates an empty store for one user's desktop.
    pub fn new(backend: B, user_id: impl Into<String>, bounds: DesktopBounds) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            state: DesktopState::new(bounds),
            interaction: InteractionState::default(),
            last_notice: None,
        }
    }

    /// Current desktop state.
    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    /// Current gesture state.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Takes the most recent "moved into" notice, if one is queued.
    pub fn take_notice(&mut self) -> Option<String> {
        self.last_notice.take()
    }

    /// Fetches the user's items and hydrates the desktop. A failed fetch
    /// is logged and leaves the current items in place.
    pub async fn load(&mut self) -> Result<(), ReducerError> {
        match self.backend.fetch_items(&self.user_id).await {
            Ok(fetched) => {
                self.dispatch(DesktopAction::HydrateItems {
                    files: fetched.files,
                    folders: fetched.folders,
                })
                .await
            }
            Err(error) => {
                tracing::warn!("desktop item fetch failed: {error}");
                Ok(())
            }
        }
    }

    /// Applies an action through the reducer, then executes every emitted
    /// effect in order.
    pub async fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, action)?;
        for effect in effects {
            self.run_effect(effect).await;
        }
        Ok(())
    }

    /// Moves an item to a clamped position and persists it.
    pub async fn reposition(
        &mut self,
        item_id: &ItemId,
        position: Point,
    ) -> Result<(), ReducerError> {
        let kind = self
            .state
            .item(item_id)
            .ok_or(ReducerError::ItemNotFound)?
            .kind;
        let resolved = clamp_point(position, &self.state.bounds);
        if let Some(item) = self.state.item_mut(item_id) {
            item.position = resolved;
        }
        self.run_effect(RuntimeEffect::PersistPosition {
            item_id: item_id.clone(),
            kind,
            position: resolved,
        })
        .await;
        Ok(())
    }

    /// Moves an item under a new parent folder (`None` = desktop root)
    /// and persists it. Rejects unknown parents and ancestry cycles.
    pub async fn reparent(
        &mut self,
        item_id: &ItemId,
        new_parent: Option<ItemId>,
    ) -> Result<(), ReducerError> {
        let kind = self
            .state
            .item(item_id)
            .ok_or(ReducerError::ItemNotFound)?
            .kind;
        if let Some(parent) = &new_parent {
            let parent_is_folder = self
                .state
                .item(parent)
                .map(DesktopItem::is_folder)
                .unwrap_or(false);
            if !parent_is_folder {
                return Err(ReducerError::ItemNotFound);
            }
        }
        if kind == ItemKind::Folder && self.state.would_create_cycle(item_id, new_parent.as_ref()) {
            return Err(ReducerError::CycleRejected);
        }
        if let Some(item) = self.state.item_mut(item_id) {
            item.parent_folder_id = new_parent.clone();
        }
        self.run_effect(RuntimeEffect::PersistParent {
            item_id: item_id.clone(),
            kind,
            parent_folder_id: new_parent,
        })
        .await;
        Ok(())
    }

    /// Removes an item without the trash-drop confirmation flow.
    pub async fn remove(&mut self, item_id: &ItemId) -> Result<(), ReducerError> {
        let kind = self
            .state
            .item(item_id)
            .ok_or(ReducerError::ItemNotFound)?
            .kind;
        self.state.items.retain(|item| &item.id != item_id);
        self.run_effect(RuntimeEffect::DeleteItem {
            item_id: item_id.clone(),
            kind,
        })
        .await;
        Ok(())
    }

    /// Renames an item without the portal-drop confirmation flow. A name
    /// that trims to empty is ignored.
    pub async fn rename(&mut self, item_id: &ItemId, new_name: &str) -> Result<(), ReducerError> {
        let kind = self
            .state
            .item(item_id)
            .ok_or(ReducerError::ItemNotFound)?
            .kind;
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        if let Some(item) = self.state.item_mut(item_id) {
            item.label = trimmed.to_string();
        }
        self.run_effect(RuntimeEffect::RenameItem {
            item_id: item_id.clone(),
            kind,
            new_name: trimmed.to_string(),
        })
        .await;
        Ok(())
    }

    /// Creates a folder in the currently open view.
    pub async fn create_folder(
        &mut self,
        name: impl Into<String>,
        position: Point,
    ) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::CreateFolder {
            name: name.into(),
            position,
        })
        .await
    }

    async fn run_effect(&mut self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistPosition {
                item_id,
                kind,
                position,
            } => {
                if let Err(error) = self
                    .backend
                    .persist_position(item_id.as_str(), kind, Position::from(position))
                    .await
                {
                    tracing::warn!("position write for {item_id} failed: {error}");
                }
            }
            RuntimeEffect::PersistParent {
                item_id,
                kind,
                parent_folder_id,
            } => {
                if let Err(error) = self
                    .backend
                    .persist_parent(
                        item_id.as_str(),
                        kind,
                        parent_folder_id.as_ref().map(ItemId::as_str),
                    )
                    .await
                {
                    tracing::warn!("parent write for {item_id} failed: {error}");
                }
            }
            RuntimeEffect::DeleteItem { item_id, kind } => {
                if let Err(error) = self.backend.delete_item(item_id.as_str(), kind).await {
                    tracing::warn!("delete of {item_id} failed: {error}");
                }
            }
            RuntimeEffect::RenameItem {
                item_id,
                kind,
                new_name,
            } => {
                if let Err(error) = self
                    .backend
                    .rename_item(item_id.as_str(), kind, &new_name)
                    .await
                {
                    tracing::warn!("rename of {item_id} failed: {error}");
                }
            }
            RuntimeEffect::CreateFolder {
                name,
                parent_folder_id,
                position,
            } => {
                let request = NewFolder {
                    user_id: self.user_id.clone(),
                    name,
                    parent_folder_id: parent_folder_id.map(|id| id.0),
                    position: Position::from(position),
                };
                match self.backend.create_folder(request).await {
                    Ok(record) => {
                        let index = self.state.items.len();
                        self.state
                            .items
                            .push(DesktopItem::from_folder_record(record, index));
                    }
                    Err(error) => tracing::warn!("folder create failed: {error}"),
                }
            }
            RuntimeEffect::ShowMoveNotice { message } => {
                self.last_notice = Some(message);
            }
        }
    }
}
