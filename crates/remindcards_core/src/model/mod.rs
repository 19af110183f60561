//! Domain model for cards, folders, and notification records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Validate user-facing text input before it reaches persistence.
//!
//! # Invariants
//! - Every persisted entity is identified by a store-assigned integer id.
//! - Boolean flags are native `bool` in the model; the 0/1 encoding is a
//!   storage-boundary concern only.

pub mod card;
pub mod folder;
pub mod notification;

pub use card::{Card, CardId, CardValidationError};
pub use folder::{Folder, FolderCard, FolderCardId, FolderId, FolderValidationError};
pub use notification::{NotificationId, NotificationValidationError, ReminderNotification};
