//! Storage core for the ReminderCards personal data manager.
//! This crate is the single source of truth for schema, referential
//! integrity, and the transactional card/folder operations; presentation
//! layers consume it in-process.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Card, CardId, CardValidationError, Folder, FolderCard, FolderId, FolderValidationError,
    NotificationId, NotificationValidationError, ReminderNotification,
};
pub use repo::{
    CardRepository, FolderRepository, NotificationRepository, RepoError, RepoResult,
    SqliteCardRepository, SqliteFolderRepository, SqliteNotificationRepository,
};
pub use store::card_store::CardStore;
pub use store::folder_store::FolderStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
