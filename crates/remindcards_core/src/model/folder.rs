//! Folder domain model and the card/folder association record.
//!
//! # Responsibility
//! - Define the folder record, its flags, and its input validation.
//! - Define the `FolderCard` association (many-to-many join row).
//!
//! # Invariants
//! - Exactly one folder carries `is_default` and exactly one carries
//!   `is_favorites` after initialization; at most one carries
//!   `is_active_folder` at any time.
//! - The Default and Favorites folders are system folders and are never
//!   deletable.
//! - `(card_id, folder_id)` is unique across association rows.

use crate::model::card::CardId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for a folder.
pub type FolderId = i64;

/// Stable store-assigned identifier for an association row.
pub type FolderCardId = i64;

/// A user-defined grouping of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Store-assigned row id.
    pub folder_id: FolderId,
    /// Folder title, trimmed, never blank.
    pub title: String,
    /// Marks the seeded Default system folder.
    pub is_default: bool,
    /// Marks the seeded Favorites system folder.
    pub is_favorites: bool,
    /// Marks the folder currently driving the default browsing view.
    pub is_active_folder: bool,
    /// Optional reference to a stored notification record.
    pub notification_id: Option<i64>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Folder {
    /// Returns whether this folder is protected from deletion.
    pub fn is_system(&self) -> bool {
        self.is_default || self.is_favorites
    }

    /// Trims caller input and rejects blank titles.
    pub fn validated_title(input: &str) -> Result<String, FolderValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FolderValidationError::EmptyTitle);
        }
        Ok(trimmed.to_string())
    }
}

/// One card-in-folder membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCard {
    /// Store-assigned row id.
    pub folder_card_id: FolderCardId,
    /// Member card.
    pub card_id: CardId,
    /// Containing folder.
    pub folder_id: FolderId,
    /// Unix epoch milliseconds at which the card was added to the folder.
    pub added_at: i64,
}

/// Validation failures for folder input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderValidationError {
    /// Title was empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for FolderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "folder title cannot be empty"),
        }
    }
}

impl Error for FolderValidationError {}
