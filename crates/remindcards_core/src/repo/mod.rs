//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from store/orchestration code.
//!
//! # Invariants
//! - Repository writes validate model input before any SQL mutation.
//! - Multi-statement writes run inside one immediate transaction.
//! - Repository APIs return semantic errors (protected folder, stale
//!   connection) in addition to DB transport errors.

use crate::db::DbError;
use crate::model::{
    CardValidationError, FolderId, FolderValidationError, NotificationValidationError,
};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod card_repo;
pub mod folder_repo;
pub mod notification_repo;

pub use card_repo::{CardRepository, SqliteCardRepository};
pub use folder_repo::{FolderRepository, SqliteFolderRepository};
pub use notification_repo::{NotificationRepository, SqliteNotificationRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from repository operations across all entities.
#[derive(Debug)]
pub enum RepoError {
    /// Card input rejected before persistence.
    CardValidation(CardValidationError),
    /// Folder input rejected before persistence.
    FolderValidation(FolderValidationError),
    /// Notification input rejected before persistence.
    NotificationValidation(NotificationValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Attempt to delete the Default or Favorites system folder.
    ProtectedFolder(FolderId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardValidation(err) => write!(f, "{err}"),
            Self::FolderValidation(err) => write!(f, "{err}"),
            Self::NotificationValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ProtectedFolder(id) => {
                write!(f, "folder {id} is a system folder and cannot be deleted")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CardValidation(err) => Some(err),
            Self::FolderValidation(err) => Some(err),
            Self::NotificationValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::ProtectedFolder(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<CardValidationError> for RepoError {
    fn from(value: CardValidationError) -> Self {
        Self::CardValidation(value)
    }
}

impl From<FolderValidationError> for RepoError {
    fn from(value: FolderValidationError) -> Self {
        Self::FolderValidation(value)
    }
}

impl From<NotificationValidationError> for RepoError {
    fn from(value: NotificationValidationError) -> Self {
        Self::NotificationValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections whose schema is not at the latest migrated version.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn flag_from_int(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}
