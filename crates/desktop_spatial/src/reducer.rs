//! Reducer actions, side-effect intents, and transition logic for the
//! desktop spatial engine.
//!
//! The reducer is the authoritative state transition engine: drag
//! gestures, navigation, and confirmation popups all flow through
//! [`reduce_desktop`], which mutates [`DesktopState`] and emits intents
//! for the item store to execute against the backend.

use thiserror::Error;

use platform_backend::{FileRecord, FolderRecord, ItemKind};

use crate::clamp::{clamp_point, forbidden_zones, resolve_position};
use crate::geometry::{Point, Rect};
use crate::model::{
    DesktopBounds, DesktopItem, DesktopState, DragSession, InteractionState, ItemId,
    PendingConfirmation,
};
use crate::resolver::{resolve_drop, DropContext, DropOutcome, FolderTarget};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Replace all items with freshly fetched rows (focus reload).
    HydrateItems {
        /// Fetched post rows.
        files: Vec<FileRecord>,
        /// Fetched folder rows.
        folders: Vec<FolderRecord>,
    },
    /// Re-clamp every item after the container was measured or resized.
    ContainerResized {
        /// New container bounds.
        bounds: DesktopBounds,
        /// Trash icon bounds in the new layout.
        trash: Option<Rect>,
        /// Rename-portal icon bounds in the new layout.
        portal: Option<Rect>,
    },
    /// Begin dragging an item.
    BeginDrag {
        /// Item being dragged.
        item_id: ItemId,
        /// Pointer position at drag start, in screen coordinates.
        pointer: Point,
    },
    /// Update an in-progress drag; position changes stay local.
    UpdateDrag {
        /// Current pointer position, in screen coordinates.
        pointer: Point,
    },
    /// End the active drag and resolve its outcome.
    EndDrag {
        /// Final icon top-left, in screen coordinates.
        pointer: Point,
        /// Zone rectangles measured by the UI.
        context: DropContext,
    },
    /// Descend into a folder.
    OpenFolder {
        /// Folder to open.
        folder_id: ItemId,
    },
    /// Ascend one level toward the desktop root.
    NavigateUp,
    /// Request creation of a new folder in the current view.
    CreateFolder {
        /// Display name.
        name: String,
        /// Requested icon position.
        position: Point,
    },
    /// Confirm the pending delete request.
    ConfirmDelete,
    /// Cancel the pending delete request.
    CancelDelete,
    /// Submit a new name for the pending rename request.
    SubmitRename {
        /// Replacement caption/name.
        new_name: String,
    },
    /// Dismiss the pending rename request.
    CancelRename,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the item store
/// to execute. Local state already reflects the change when an intent is
/// emitted; a failed execution is logged, never rolled back.
pub enum RuntimeEffect {
    /// Persist an item's new position.
    PersistPosition {
        /// Item to update.
        item_id: ItemId,
        /// Backing table.
        kind: ItemKind,
        /// New authoritative position.
        position: Point,
    },
    /// Persist an item's new containing folder.
    PersistParent {
        /// Item to update.
        item_id: ItemId,
        /// Backing table.
        kind: ItemKind,
        /// New parent; `None` = desktop root.
        parent_folder_id: Option<ItemId>,
    },
    /// Delete an item row.
    DeleteItem {
        /// Item to delete.
        item_id: ItemId,
        /// Backing table.
        kind: ItemKind,
    },
    /// Persist an item's new caption/name.
    RenameItem {
        /// Item to rename.
        item_id: ItemId,
        /// Backing table.
        kind: ItemKind,
        /// Replacement label.
        new_name: String,
    },
    /// Create a folder row in the current view.
    CreateFolder {
        /// Display name.
        name: String,
        /// Containing folder; `None` = desktop root.
        parent_folder_id: Option<ItemId>,
        /// Initial position.
        position: Point,
    },
    /// Surface a transient "moved into" notice to the user.
    ShowMoveNotice {
        /// Human-readable notice text.
        message: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The target item id was not found in the current state.
    #[error("item not found")]
    ItemNotFound,
    /// A confirmation popup is already open; the new request was rejected.
    #[error("a confirmation is already pending")]
    ConfirmationPending,
    /// The action expected a confirmation popup that is not open.
    #[error("no matching confirmation is pending")]
    NoPendingConfirmation,
    /// Reparenting the folder would make it its own ancestor.
    #[error("move would make the folder its own ancestor")]
    CycleRejected,
}

/// Applies a [`DesktopAction`] to the desktop state and collects the
/// resulting side-effect intents.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a missing item,
/// raises a second confirmation while one is open, or resolves a
/// confirmation that is not pending.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::HydrateItems { files, folders } => {
            let bounds = state.bounds;
            let mut items: Vec<DesktopItem> = files
                .into_iter()
                .enumerate()
                .map(|(index, record)| DesktopItem::from_file_record(record, index))
                .collect();
            items.extend(
                folders
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| DesktopItem::from_folder_record(record, index)),
            );
            for item in &mut items {
                item.position = clamp_point(item.position, &bounds);
            }
            state.items = items;
            // A reload may have removed the folder we were standing in.
            if let Some(current) = state.folder_stack.current().cloned() {
                if state.item(&current).is_none() {
                    state.folder_stack.reset();
                }
            }
            state.pending = None;
            interaction.dragging = None;
        }
        DesktopAction::ContainerResized {
            bounds,
            trash,
            portal,
        } => {
            state.bounds = bounds;
            let zones = forbidden_zones(trash, portal);
            for item in &mut state.items {
                item.position = resolve_position(item.position, &bounds, &zones);
            }
        }
        DesktopAction::BeginDrag { item_id, pointer } => {
            let position_start = state
                .item(&item_id)
                .ok_or(ReducerError::ItemNotFound)?
                .position;
            interaction.dragging = Some(DragSession {
                item_id,
                pointer_start: pointer,
                position_start,
            });
        }
        DesktopAction::UpdateDrag { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                if let Some(item) = state.item_mut(&session.item_id) {
                    item.position = session.position_start.offset(dx, dy);
                }
            }
        }
        DesktopAction::EndDrag { pointer, context } => {
            let Some(session) = interaction.dragging.take() else {
                return Ok(effects);
            };
            let (kind, label) = {
                let item = state
                    .item(&session.item_id)
                    .ok_or(ReducerError::ItemNotFound)?;
                (item.kind, item.label.clone())
            };
            let drop_position = context.offset.to_container(pointer);
            let folder_targets: Vec<FolderTarget> = state
                .visible_items()
                .filter(|item| item.is_folder() && item.id != session.item_id)
                .map(|item| FolderTarget {
                    id: item.id.clone(),
                    rect: item.icon_rect(),
                })
                .collect();
            let outcome = resolve_drop(
                &session.item_id,
                kind,
                drop_position,
                &folder_targets,
                &context,
                &state.bounds,
            );
            match outcome {
                DropOutcome::RequestDelete { snap_position } => {
                    if state.pending.is_some() {
                        restore_position(state, &session);
                        return Err(ReducerError::ConfirmationPending);
                    }
                    state.pending = Some(PendingConfirmation::Delete {
                        item_id: session.item_id,
                        snap_position,
                    });
                }
                DropOutcome::RequestRename { snap_position } => {
                    if state.pending.is_some() {
                        restore_position(state, &session);
                        return Err(ReducerError::ConfirmationPending);
                    }
                    if let Some(item) = state.item_mut(&session.item_id) {
                        item.position = snap_position;
                    }
                    effects.push(RuntimeEffect::PersistPosition {
                        item_id: session.item_id.clone(),
                        kind,
                        position: snap_position,
                    });
                    state.pending = Some(PendingConfirmation::Rename {
                        item_id: session.item_id,
                    });
                }
                DropOutcome::ReparentUp => {
                    let new_parent = state.folder_stack.parent_of_current();
                    if let Some(item) = state.item_mut(&session.item_id) {
                        item.parent_folder_id = new_parent.clone();
                        item.position = session.position_start;
                    }
                    effects.push(RuntimeEffect::PersistParent {
                        item_id: session.item_id,
                        kind,
                        parent_folder_id: new_parent,
                    });
                }
                DropOutcome::MoveIntoFolder { folder_id } => {
                    let folder_label = state
                        .item(&folder_id)
                        .map(|folder| folder.label.clone())
                        .unwrap_or_else(|| "Folder".to_string());
                    if let Some(item) = state.item_mut(&session.item_id) {
                        item.parent_folder_id = Some(folder_id.clone());
                        item.position = session.position_start;
                    }
                    effects.push(RuntimeEffect::PersistParent {
                        item_id: session.item_id,
                        kind,
                        parent_folder_id: Some(folder_id),
                    });
                    effects.push(RuntimeEffect::ShowMoveNotice {
                        message: format!("{label} moved into {folder_label}"),
                    });
                }
                DropOutcome::Reposition { position } => {
                    if let Some(item) = state.item_mut(&session.item_id) {
                        item.position = position;
                    }
                    effects.push(RuntimeEffect::PersistPosition {
                        item_id: session.item_id,
                        kind,
                        position,
                    });
                }
            }
        }
        DesktopAction::OpenFolder { folder_id } => {
            let is_folder = state
                .item(&folder_id)
                .map(DesktopItem::is_folder)
                .unwrap_or(false);
            if !is_folder {
                return Err(ReducerError::ItemNotFound);
            }
            state.folder_stack.enter(folder_id);
        }
        DesktopAction::NavigateUp => {
            state.folder_stack.leave();
        }
        DesktopAction::CreateFolder { name, position } => {
            effects.push(RuntimeEffect::CreateFolder {
                name,
                parent_folder_id: state.folder_stack.current().cloned(),
                position: clamp_point(position, &state.bounds),
            });
        }
        DesktopAction::ConfirmDelete => match state.pending.take() {
            Some(PendingConfirmation::Delete { item_id, .. }) => {
                // The item can vanish while the popup is open (programmatic
                // remove, reload); a stale confirmation just closes.
                if let Some(kind) = state.item(&item_id).map(|item| item.kind) {
                    state.items.retain(|item| item.id != item_id);
                    effects.push(RuntimeEffect::DeleteItem { item_id, kind });
                }
            }
            other => {
                state.pending = other;
                return Err(ReducerError::NoPendingConfirmation);
            }
        },
        DesktopAction::CancelDelete => match state.pending.take() {
            Some(PendingConfirmation::Delete {
                item_id,
                snap_position,
            }) => {
                if let Some(kind) = state.item(&item_id).map(|item| item.kind) {
                    if let Some(item) = state.item_mut(&item_id) {
                        item.position = snap_position;
                    }
                    effects.push(RuntimeEffect::PersistPosition {
                        item_id,
                        kind,
                        position: snap_position,
                    });
                }
            }
            other => {
                state.pending = other;
                return Err(ReducerError::NoPendingConfirmation);
            }
        },
        DesktopAction::SubmitRename { new_name } => match state.pending.take() {
            Some(PendingConfirmation::Rename { item_id }) => {
                let trimmed = new_name.trim();
                if trimmed.is_empty() {
                    // An empty submission is treated as a dismissal.
                    return Ok(effects);
                }
                if let Some(kind) = state.item(&item_id).map(|item| item.kind) {
                    if let Some(item) = state.item_mut(&item_id) {
                        item.label = trimmed.to_string();
                    }
                    effects.push(RuntimeEffect::RenameItem {
                        item_id,
                        kind,
                        new_name: trimmed.to_string(),
                    });
                }
            }
            other => {
                state.pending = other;
                return Err(ReducerError::NoPendingConfirmation);
            }
        },
        DesktopAction::CancelRename => match state.pending.take() {
            Some(PendingConfirmation::Rename { .. }) => {
                // The item already sits at its portal-adjacent snap.
            }
            other => {
                state.pending = other;
                return Err(ReducerError::NoPendingConfirmation);
            }
        },
    }

    Ok(effects)
}

fn restore_position(state: &mut DesktopState, session: &DragSession) {
    if let Some(item) = state.item_mut(&session.item_id) {
        item.position = session.position_start;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DROP_PADDING, ICON_SIZE};

    fn bounds() -> DesktopBounds {
        DesktopBounds::new(400.0, 800.0, 60.0)
    }

    fn file_record(id: &str, x: f64, y: f64) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            caption: Some(id.to_string()),
            audio_url: None,
            folder_id: None,
            position: Some(platform_backend::Position { x, y }),
        }
    }

    fn folder_record(id: &str, name: &str, x: f64, y: f64) -> FolderRecord {
        FolderRecord {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            name: name.to_string(),
            parent_folder_id: None,
            position: Some(platform_backend::Position { x, y }),
        }
    }

    fn hydrated() -> (DesktopState, InteractionState) {
        let mut state = DesktopState::new(bounds());
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateItems {
                files: vec![file_record("clip1", 200.0, 200.0)],
                folders: vec![folder_record("music", "Music", 20.0, 20.0)],
            },
        )
        .expect("hydrate");
        (state, interaction)
    }

    fn drag(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        id: &str,
        to: Point,
        context: DropContext,
    ) -> Result<Vec<RuntimeEffect>, ReducerError> {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::BeginDrag {
                item_id: ItemId::new(id),
                pointer: Point::new(0.0, 0.0),
            },
        )?;
        reduce_desktop(
            state,
            interaction,
            DesktopAction::EndDrag {
                pointer: to,
                context,
            },
        )
    }

    #[test]
    fn hydrate_assigns_grid_slots_and_clamps_into_bounds() {
        let mut state = DesktopState::new(bounds());
        let mut interaction = InteractionState::default();
        let mut unplaced = file_record("clip1", 0.0, 0.0);
        unplaced.position = None;
        let mut offscreen = file_record("clip2", 5000.0, 5000.0);
        offscreen.caption = None;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateItems {
                files: vec![unplaced, offscreen],
                folders: vec![],
            },
        )
        .expect("hydrate");

        let clip1 = state.item(&ItemId::new("clip1")).expect("clip1");
        assert_eq!(clip1.position, Point::new(20.0, 20.0));
        let clip2 = state.item(&ItemId::new("clip2")).expect("clip2");
        assert_eq!(clip2.position, Point::new(320.0, 660.0));
    }

    #[test]
    fn hydrate_resets_a_stale_folder_stack() {
        let (mut state, mut interaction) = hydrated();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenFolder {
                folder_id: ItemId::new("music"),
            },
        )
        .expect("open folder");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateItems {
                files: vec![],
                folders: vec![],
            },
        )
        .expect("reload");
        assert!(state.folder_stack.at_root());
    }

    #[test]
    fn drag_updates_are_local_and_release_persists_once() {
        let (mut state, mut interaction) = hydrated();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginDrag {
                item_id: ItemId::new("clip1"),
                pointer: Point::new(10.0, 10.0),
            },
        )
        .expect("begin");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateDrag {
                pointer: Point::new(40.0, 60.0),
            },
        )
        .expect("update");
        assert!(effects.is_empty());
        assert_eq!(
            state.item(&ItemId::new("clip1")).expect("item").position,
            Point::new(230.0, 250.0)
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::EndDrag {
                pointer: Point::new(230.0, 250.0),
                context: DropContext::default(),
            },
        )
        .expect("end");
        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistPosition {
                item_id: ItemId::new("clip1"),
                kind: ItemKind::File,
                position: Point::new(230.0, 250.0),
            }]
        );
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn end_drag_without_session_is_a_quiet_noop() {
        let (mut state, mut interaction) = hydrated();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::EndDrag {
                pointer: Point::new(50.0, 50.0),
                context: DropContext::default(),
            },
        )
        .expect("end without begin");
        assert!(effects.is_empty());
    }

    #[test]
    fn trash_drop_raises_pending_delete_and_confirm_removes() {
        let (mut state, mut interaction) = hydrated();
        let context = DropContext {
            trash: Some(Rect::new(300.0, 600.0, 80.0, 80.0)),
            ..DropContext::default()
        };
        let effects = drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(310.0, 610.0),
            context,
        )
        .expect("drag to trash");
        assert!(effects.is_empty(), "delete must wait for confirmation");
        assert!(matches!(
            state.pending,
            Some(PendingConfirmation::Delete { .. })
        ));

        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::ConfirmDelete)
            .expect("confirm");
        assert_eq!(
            effects,
            vec![RuntimeEffect::DeleteItem {
                item_id: ItemId::new("clip1"),
                kind: ItemKind::File,
            }]
        );
        assert_eq!(state.item(&ItemId::new("clip1")), None);
        assert_eq!(state.pending, None);
    }

    #[test]
    fn cancel_delete_snaps_outside_the_trash_zone() {
        let (mut state, mut interaction) = hydrated();
        let trash = Rect::new(300.0, 600.0, 80.0, 80.0);
        let context = DropContext {
            trash: Some(trash),
            ..DropContext::default()
        };
        drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(310.0, 610.0),
            context,
        )
        .expect("drag to trash");

        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::CancelDelete)
            .expect("cancel");
        let item = state.item(&ItemId::new("clip1")).expect("item survives");
        assert!(!item.icon_rect().intersects(&trash.expanded(DROP_PADDING)));
        assert_ne!(item.position, Point::new(310.0, 610.0));
        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistPosition {
                item_id: ItemId::new("clip1"),
                kind: ItemKind::File,
                position: item.position,
            }]
        );
    }

    #[test]
    fn second_request_while_confirmation_open_is_rejected() {
        let mut state = DesktopState::new(bounds());
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateItems {
                files: vec![
                    file_record("clip1", 200.0, 200.0),
                    file_record("clip2", 100.0, 100.0),
                ],
                folders: vec![],
            },
        )
        .expect("hydrate");
        let context = DropContext {
            trash: Some(Rect::new(300.0, 600.0, 80.0, 80.0)),
            ..DropContext::default()
        };

        drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(310.0, 610.0),
            context,
        )
        .expect("first request");

        let err = drag(
            &mut state,
            &mut interaction,
            "clip2",
            Point::new(310.0, 610.0),
            context,
        )
        .expect_err("second request");
        assert_eq!(err, ReducerError::ConfirmationPending);
        // The rejected item returns to where its drag started.
        assert_eq!(
            state.item(&ItemId::new("clip2")).expect("item").position,
            Point::new(100.0, 100.0)
        );
        // Plain repositions still apply while the popup is open.
        let effects = drag(
            &mut state,
            &mut interaction,
            "clip2",
            Point::new(120.0, 140.0),
            DropContext::default(),
        )
        .expect("reposition while pending");
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn portal_drop_snaps_submits_and_renames() {
        let (mut state, mut interaction) = hydrated();
        let portal = Rect::new(300.0, 100.0, 80.0, 80.0);
        let context = DropContext {
            portal: Some(portal),
            ..DropContext::default()
        };

        let effects = drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(310.0, 110.0),
            context,
        )
        .expect("drag to portal");
        let snapped = state.item(&ItemId::new("clip1")).expect("item").position;
        assert!(!Rect::square(snapped, ICON_SIZE).intersects(&portal.expanded(DROP_PADDING)));
        assert!(matches!(
            effects.as_slice(),
            [RuntimeEffect::PersistPosition { .. }]
        ));

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SubmitRename {
                new_name: "  first take  ".to_string(),
            },
        )
        .expect("submit");
        assert_eq!(
            state.item(&ItemId::new("clip1")).expect("item").label,
            "first take"
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::RenameItem {
                item_id: ItemId::new("clip1"),
                kind: ItemKind::File,
                new_name: "first take".to_string(),
            }]
        );
        assert_eq!(state.pending, None);
    }

    #[test]
    fn empty_rename_submission_dismisses_without_effects() {
        let (mut state, mut interaction) = hydrated();
        let context = DropContext {
            portal: Some(Rect::new(300.0, 100.0, 80.0, 80.0)),
            ..DropContext::default()
        };
        drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(310.0, 110.0),
            context,
        )
        .expect("drag to portal");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SubmitRename {
                new_name: "   ".to_string(),
            },
        )
        .expect("empty submit");
        assert!(effects.is_empty());
        assert_eq!(state.pending, None);
        assert_eq!(
            state.item(&ItemId::new("clip1")).expect("item").label,
            "clip1"
        );
    }

    #[test]
    fn stale_confirmations_close_without_effects() {
        let (mut state, mut interaction) = hydrated();

        state.pending = Some(PendingConfirmation::Delete {
            item_id: ItemId::new("gone"),
            snap_position: Point::new(10.0, 10.0),
        });
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::ConfirmDelete)
            .expect("confirm stale");
        assert!(effects.is_empty());
        assert_eq!(state.pending, None);

        state.pending = Some(PendingConfirmation::Delete {
            item_id: ItemId::new("gone"),
            snap_position: Point::new(10.0, 10.0),
        });
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::CancelDelete)
            .expect("cancel stale");
        assert!(effects.is_empty());
        assert_eq!(state.pending, None);

        state.pending = Some(PendingConfirmation::Rename {
            item_id: ItemId::new("gone"),
        });
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SubmitRename {
                new_name: "anything".to_string(),
            },
        )
        .expect("submit stale");
        assert!(effects.is_empty());
        assert_eq!(state.pending, None);
    }

    #[test]
    fn confirmation_actions_require_a_matching_popup() {
        let (mut state, mut interaction) = hydrated();
        for action in [
            DesktopAction::ConfirmDelete,
            DesktopAction::CancelDelete,
            DesktopAction::SubmitRename {
                new_name: "x".to_string(),
            },
            DesktopAction::CancelRename,
        ] {
            let err = reduce_desktop(&mut state, &mut interaction, action)
                .expect_err("no popup is open");
            assert_eq!(err, ReducerError::NoPendingConfirmation);
        }
    }

    #[test]
    fn moving_a_file_onto_a_folder_reparents_and_notifies() {
        let (mut state, mut interaction) = hydrated();
        let effects = drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(40.0, 40.0),
            DropContext::default(),
        )
        .expect("drag onto folder");

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistParent {
                    item_id: ItemId::new("clip1"),
                    kind: ItemKind::File,
                    parent_folder_id: Some(ItemId::new("music")),
                },
                RuntimeEffect::ShowMoveNotice {
                    message: "clip1 moved into Music".to_string(),
                },
            ]
        );
        let item = state.item(&ItemId::new("clip1")).expect("item");
        assert_eq!(item.parent_folder_id, Some(ItemId::new("music")));
        // The icon keeps its pre-drag spot rather than the drop point.
        assert_eq!(item.position, Point::new(200.0, 200.0));
    }

    #[test]
    fn back_zone_drop_reparents_one_level_up() {
        let mut state = DesktopState::new(bounds());
        let mut interaction = InteractionState::default();
        let mut clip = file_record("clip1", 200.0, 200.0);
        clip.folder_id = Some("live".to_string());
        let mut live = folder_record("live", "Live", 120.0, 20.0);
        live.parent_folder_id = Some("music".to_string());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateItems {
                files: vec![clip],
                folders: vec![folder_record("music", "Music", 20.0, 20.0), live],
            },
        )
        .expect("hydrate");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenFolder {
                folder_id: ItemId::new("music"),
            },
        )
        .expect("open music");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenFolder {
                folder_id: ItemId::new("live"),
            },
        )
        .expect("open live");

        let context = DropContext {
            back: Some(Rect::new(0.0, 0.0, 80.0, 80.0)),
            ..DropContext::default()
        };
        let effects = drag(
            &mut state,
            &mut interaction,
            "clip1",
            Point::new(10.0, 10.0),
            context,
        )
        .expect("drag to back arrow");

        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistParent {
                item_id: ItemId::new("clip1"),
                kind: ItemKind::File,
                parent_folder_id: Some(ItemId::new("music")),
            }]
        );
        assert_eq!(
            state
                .item(&ItemId::new("clip1"))
                .expect("item")
                .parent_folder_id,
            Some(ItemId::new("music"))
        );
    }

    #[test]
    fn container_resize_reclamps_every_item() {
        let (mut state, mut interaction) = hydrated();
        let small = DesktopBounds::new(240.0, 400.0, 40.0);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ContainerResized {
                bounds: small,
                trash: None,
                portal: None,
            },
        )
        .expect("resize");

        for item in &state.items {
            assert!(item.position.x <= small.width - ICON_SIZE);
            assert!(item.position.y <= small.usable_height() - ICON_SIZE);
        }
    }

    #[test]
    fn create_folder_targets_the_current_view() {
        let (mut state, mut interaction) = hydrated();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenFolder {
                folder_id: ItemId::new("music"),
            },
        )
        .expect("open folder");

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CreateFolder {
                name: "Drafts".to_string(),
                position: Point::new(-30.0, 9999.0),
            },
        )
        .expect("create");
        assert_eq!(
            effects,
            vec![RuntimeEffect::CreateFolder {
                name: "Drafts".to_string(),
                parent_folder_id: Some(ItemId::new("music")),
                position: Point::new(0.0, 660.0),
            }]
        );
    }

    #[test]
    fn open_folder_rejects_files_and_unknown_ids() {
        let (mut state, mut interaction) = hydrated();
        for id in ["clip1", "nope"] {
            let err = reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::OpenFolder {
                    folder_id: ItemId::new(id),
                },
            )
            .expect_err("not an openable folder");
            assert_eq!(err, ReducerError::ItemNotFound);
        }
    }
}
