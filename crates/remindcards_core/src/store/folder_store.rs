//! Folder store: cached folder list, active-folder state, and the
//! folder-membership edit workflow.
//!
//! # Responsibility
//! - Provide the caller-facing folder API (CRUD, active switch, membership
//!   management, join queries).
//! - Maintain the in-memory folder list and active-folder projection.
//!
//! # Invariants
//! - At most one folder is active after any sequence of
//!   [`FolderStore::set_active_folder`] calls.
//! - Membership reconciliation never removes the Default folder's
//!   association, even when the desired set omits it.
//! - Repository failures never escape: they are logged and converted to
//!   empty lists, `None`, or `false`.

use crate::model::{Card, CardId, Folder, FolderId};
use crate::repo::{FolderRepository, RepoError};
use log::{error, warn};
use std::collections::HashSet;

/// Caller-facing store over the folder repository.
///
/// The cached folder list and active-folder projection refresh on
/// construction, after every mutation through this store, and on explicit
/// [`FolderStore::reload`].
pub struct FolderStore<R: FolderRepository> {
    repo: R,
    folders: Vec<Folder>,
    active_folder: Option<Folder>,
}

impl<R: FolderRepository> FolderStore<R> {
    /// Creates a store and loads the initial folder list.
    pub fn new(repo: R) -> Self {
        let mut store = Self {
            repo,
            folders: Vec::new(),
            active_folder: None,
        };
        store.reload();
        store
    }

    /// Refreshes the cached folder list and active-folder projection.
    pub fn reload(&mut self) {
        self.folders = self.list_folders();
        self.active_folder = self.get_active_folder();
    }

    /// Snapshot accessor over the cached folder list, oldest first.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Cached active folder from the last reload.
    pub fn active_folder(&self) -> Option<&Folder> {
        self.active_folder.as_ref()
    }

    /// Lists all folders ordered by creation time ascending. Soft-fails to
    /// an empty list when the store is unreachable.
    pub fn list_folders(&self) -> Vec<Folder> {
        match self.repo.list_folders() {
            Ok(folders) => folders,
            Err(err) => {
                error!("event=folder_list module=folder_store status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Loads the folder currently marked active, if any.
    pub fn get_active_folder(&self) -> Option<Folder> {
        match self.repo.get_active_folder() {
            Ok(folder) => folder,
            Err(err) => {
                error!(
                    "event=folder_lookup module=folder_store status=error flag=active error={err}"
                );
                None
            }
        }
    }

    /// Loads the seeded Favorites folder; `None` only when the store is
    /// unreachable or unseeded.
    pub fn get_favorites_folder(&self) -> Option<Folder> {
        match self.repo.get_favorites_folder() {
            Ok(folder) => folder,
            Err(err) => {
                error!(
                    "event=folder_lookup module=folder_store status=error flag=favorites error={err}"
                );
                None
            }
        }
    }

    /// Looks up the Default folder id.
    pub fn default_folder_id(&self) -> Option<FolderId> {
        match self.repo.get_default_folder() {
            Ok(folder) => folder.map(|folder| folder.folder_id),
            Err(err) => {
                error!(
                    "event=folder_lookup module=folder_store status=error flag=default error={err}"
                );
                None
            }
        }
    }

    /// Creates a folder and reloads the cache. Returns `None` when the
    /// title is blank after trimming or the write fails.
    pub fn create_folder(&mut self, title: &str) -> Option<Folder> {
        match self.repo.create_folder(title) {
            Ok(folder) => {
                self.reload();
                Some(folder)
            }
            Err(RepoError::FolderValidation(err)) => {
                warn!("event=folder_create module=folder_store status=rejected error={err}");
                None
            }
            Err(err) => {
                error!("event=folder_create module=folder_store status=error error={err}");
                None
            }
        }
    }

    /// Deletes a folder and reloads the cache; association rows cascade.
    ///
    /// Returns `false` for the Default and Favorites system folders and for
    /// ids that do not exist.
    pub fn delete_folder(&mut self, folder_id: FolderId) -> bool {
        match self.repo.delete_folder(folder_id) {
            Ok(true) => {
                self.reload();
                true
            }
            Ok(false) => false,
            Err(RepoError::ProtectedFolder(id)) => {
                warn!(
                    "event=folder_delete module=folder_store status=rejected folder_id={id} reason=system_folder"
                );
                false
            }
            Err(err) => {
                error!(
                    "event=folder_delete module=folder_store status=error folder_id={folder_id} error={err}"
                );
                false
            }
        }
    }

    /// Atomically clears the active flag everywhere and sets it on
    /// `folder_id`, then reloads the cache.
    ///
    /// A nonexistent id still commits the clear step, leaving no folder
    /// active; readers of the active-folder view fall back to Default.
    pub fn set_active_folder(&mut self, folder_id: FolderId) -> bool {
        match self.repo.set_active_folder(folder_id) {
            Ok(()) => {
                self.reload();
                true
            }
            Err(err) => {
                error!(
                    "event=folder_activate module=folder_store status=error folder_id={folder_id} error={err}"
                );
                false
            }
        }
    }

    /// Links a card to a folder. Success when the pair already exists.
    pub fn add_card_to_folder(&self, card_id: CardId, folder_id: FolderId) -> bool {
        match self.repo.add_card_to_folder(card_id, folder_id) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=membership_add module=folder_store status=error card_id={card_id} folder_id={folder_id} error={err}"
                );
                false
            }
        }
    }

    /// Unlinks a card from a folder. Success when nothing matched.
    pub fn remove_card_from_folder(&self, card_id: CardId, folder_id: FolderId) -> bool {
        match self.repo.remove_card_from_folder(card_id, folder_id) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=membership_remove module=folder_store status=error card_id={card_id} folder_id={folder_id} error={err}"
                );
                false
            }
        }
    }

    /// Lists cards linked to one folder, newest first.
    pub fn get_cards_in_folder(&self, folder_id: FolderId) -> Vec<Card> {
        match self.repo.cards_in_folder(folder_id) {
            Ok(cards) => cards,
            Err(err) => {
                error!(
                    "event=membership_list module=folder_store status=error folder_id={folder_id} error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Counts memberships of one folder. Soft-fails to zero.
    pub fn get_card_count(&self, folder_id: FolderId) -> u32 {
        match self.repo.card_count(folder_id) {
            Ok(count) => count,
            Err(err) => {
                error!(
                    "event=membership_count module=folder_store status=error folder_id={folder_id} error={err}"
                );
                0
            }
        }
    }

    /// Lists ids of folders containing one card.
    pub fn get_folders_for_card(&self, card_id: CardId) -> Vec<FolderId> {
        match self.repo.folders_for_card(card_id) {
            Ok(ids) => ids,
            Err(err) => {
                error!(
                    "event=membership_list module=folder_store status=error card_id={card_id} error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Reconciles a card's folder memberships against a desired set.
    ///
    /// Computes the additions and removals as set differences against the
    /// card's current associations and applies them one at a time; each
    /// add/remove is individually atomic, the reconciliation as a whole is
    /// not. The Default folder's membership is implicit and never removed,
    /// even when absent from `desired`.
    ///
    /// Returns `false` when the current memberships cannot be read or any
    /// individual step fails.
    pub fn update_card_memberships(&self, card_id: CardId, desired: &[FolderId]) -> bool {
        let current: HashSet<FolderId> = match self.repo.folders_for_card(card_id) {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                error!(
                    "event=membership_reconcile module=folder_store status=error card_id={card_id} error={err}"
                );
                return false;
            }
        };
        let desired: HashSet<FolderId> = desired.iter().copied().collect();
        let default_id = self.default_folder_id();

        let mut ok = true;
        for folder_id in desired.difference(&current) {
            ok &= self.add_card_to_folder(card_id, *folder_id);
        }
        for folder_id in current.difference(&desired) {
            if Some(*folder_id) == default_id {
                continue;
            }
            ok &= self.remove_card_from_folder(card_id, *folder_id);
        }
        ok
    }
}
