//! Card store: cached active-folder card list plus navigation cursor.
//!
//! # Responsibility
//! - Provide the caller-facing card API (CRUD, favorite toggle, browsing).
//! - Maintain the in-memory card list for the active folder and the cursor
//!   into it.
//!
//! # Invariants
//! - The cursor always satisfies `index < len` while the list is non-empty,
//!   and is re-clamped whenever the backing list shrinks.
//! - Mutations reload the cache before returning; between the underlying
//!   commit and that reload other readers may see stale data.
//! - Repository failures never escape: they are logged and converted to
//!   empty lists, `None`, or `false`.

use crate::model::{Card, CardId, FolderId};
use crate::repo::{CardRepository, RepoError};
use log::{error, warn};

/// Caller-facing store over the card repository.
///
/// The cached list is a read-through projection of the active folder's
/// cards, newest first; it refreshes on construction, after every mutation
/// through this store, and on explicit [`CardStore::reload`].
pub struct CardStore<R: CardRepository> {
    repo: R,
    cards: Vec<Card>,
    current_index: usize,
}

impl<R: CardRepository> CardStore<R> {
    /// Creates a store and loads the initial active-folder card list.
    pub fn new(repo: R) -> Self {
        let mut store = Self {
            repo,
            cards: Vec::new(),
            current_index: 0,
        };
        store.reload();
        store
    }

    /// Refreshes the cached card list from the active folder and re-clamps
    /// the cursor to the new list length.
    pub fn reload(&mut self) {
        self.cards = self.list_active_folder_cards();
        self.clamp_cursor();
    }

    /// Snapshot accessor over the cached card list.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current cursor position into the cached list.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Card under the cursor; `None` when the cached list is empty.
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index)
    }

    /// Moves the cursor forward, wrapping to the first card past the end.
    /// No-op on an empty list.
    pub fn advance(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.cards.len();
    }

    /// Moves the cursor backward, wrapping to the last card before index 0.
    /// No-op on an empty list.
    pub fn retreat(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        if self.current_index == 0 {
            self.current_index = self.cards.len() - 1;
        } else {
            self.current_index -= 1;
        }
    }

    /// Lists cards in the active folder (Default fallback), newest first.
    /// Soft-fails to an empty list when the store is unreachable.
    pub fn list_active_folder_cards(&self) -> Vec<Card> {
        match self.repo.list_active_folder_cards() {
            Ok(cards) => cards,
            Err(err) => {
                error!("event=card_list module=card_store status=error scope=active_folder error={err}");
                Vec::new()
            }
        }
    }

    /// Lists cards linked to one folder, newest first.
    pub fn list_cards(&self, folder_id: FolderId) -> Vec<Card> {
        match self.repo.list_cards_in_folder(folder_id) {
            Ok(cards) => cards,
            Err(err) => {
                error!(
                    "event=card_list module=card_store status=error folder_id={folder_id} error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Creates a card in `folder_id` and reloads the cache.
    ///
    /// Returns `None` when the text is blank after trimming or the write
    /// fails; the card row and its folder association commit together.
    pub fn create_card(&mut self, text: &str, folder_id: FolderId) -> Option<Card> {
        match self.repo.create_card(text, folder_id) {
            Ok(card) => {
                self.reload();
                Some(card)
            }
            Err(RepoError::CardValidation(err)) => {
                warn!("event=card_create module=card_store status=rejected error={err}");
                None
            }
            Err(err) => {
                error!(
                    "event=card_create module=card_store status=error folder_id={folder_id} error={err}"
                );
                None
            }
        }
    }

    /// Replaces a card's text and reloads the cache.
    ///
    /// Blank text is rejected with `false`; a missing id is a benign no-op
    /// reported as success.
    pub fn update_card(&mut self, card_id: CardId, text: &str) -> bool {
        match self.repo.update_card_text(card_id, text) {
            Ok(_changed) => {
                self.reload();
                true
            }
            Err(RepoError::CardValidation(err)) => {
                warn!(
                    "event=card_update module=card_store status=rejected card_id={card_id} error={err}"
                );
                false
            }
            Err(err) => {
                error!(
                    "event=card_update module=card_store status=error card_id={card_id} error={err}"
                );
                false
            }
        }
    }

    /// Deletes a card (associations cascade) and reloads the cache, which
    /// re-clamps the cursor to the shrunk list. A missing id is not an
    /// error.
    pub fn delete_card(&mut self, card_id: CardId) -> bool {
        match self.repo.delete_card(card_id) {
            Ok(_changed) => {
                self.reload();
                true
            }
            Err(err) => {
                error!(
                    "event=card_delete module=card_store status=error card_id={card_id} error={err}"
                );
                false
            }
        }
    }

    /// Flips a card's favorite flag and reloads the cache.
    ///
    /// Returns the new state; `false` when the card does not exist or the
    /// write fails.
    pub fn toggle_favorite(&mut self, card_id: CardId) -> bool {
        match self.repo.toggle_favorite(card_id) {
            Ok(new_state) => {
                self.reload();
                new_state
            }
            Err(err) => {
                error!(
                    "event=card_favorite module=card_store status=error card_id={card_id} error={err}"
                );
                false
            }
        }
    }

    /// Looks up the Default folder id; `None` only when the store is
    /// unreachable or unseeded.
    pub fn default_folder_id(&self) -> Option<FolderId> {
        match self.repo.default_folder_id() {
            Ok(id) => id,
            Err(err) => {
                error!("event=folder_lookup module=card_store status=error flag=default error={err}");
                None
            }
        }
    }

    fn clamp_cursor(&mut self) {
        if self.current_index >= self.cards.len() {
            self.current_index = self.cards.len().saturating_sub(1);
        }
    }
}
