//! Card domain model.
//!
//! # Responsibility
//! - Define the reminder card record and its input validation.
//!
//! # Invariants
//! - `card_id` is assigned by the store and never reused.
//! - `text` is non-empty after trimming; stored text is always trimmed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for a card.
pub type CardId = i64;

/// A short text reminder.
///
/// A card exists independently of any folder; membership is modeled by
/// association rows, so one card can appear in zero or many folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Store-assigned row id.
    pub card_id: CardId,
    /// Reminder text, trimmed, never blank.
    pub text: String,
    /// Favorite marker toggled by the caller.
    pub is_favorite: bool,
    /// Optional reference to a stored notification record.
    pub notification_id: Option<i64>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Validation failures for card input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardValidationError {
    /// Text was empty or whitespace-only after trimming.
    EmptyText,
}

impl Display for CardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "card text cannot be empty"),
        }
    }
}

impl Error for CardValidationError {}

impl Card {
    /// Trims caller input and rejects blank text.
    pub fn validated_text(input: &str) -> Result<String, CardValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CardValidationError::EmptyText);
        }
        Ok(trimmed.to_string())
    }
}
