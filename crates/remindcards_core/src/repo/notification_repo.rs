//! Notification record repository.
//!
//! # Responsibility
//! - Store and retrieve notification schedule records.
//! - Attach or detach records from their owning card or folder.
//!
//! # Invariants
//! - Records are validated (message, time of day, recurrence rule) before
//!   any SQL mutation.
//! - Deleting a card or folder never deletes its notification record; the
//!   record is orphan-allowed and can be removed explicitly.

use crate::model::{CardId, FolderId, NotificationId, ReminderNotification};
use crate::repo::{bool_to_int, ensure_connection_ready, flag_from_int, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTIFICATION_SELECT_SQL: &str = "SELECT
    notification_id,
    message,
    recurrence_rule,
    time_of_day,
    is_enabled,
    created_at
FROM Notification";

/// Repository interface for notification record storage.
pub trait NotificationRepository {
    /// Inserts one validated notification record.
    fn create_notification(
        &self,
        message: &str,
        recurrence_rule: Option<&str>,
        time_of_day: &str,
    ) -> RepoResult<ReminderNotification>;
    /// Loads one record by id.
    fn get_notification(&self, id: NotificationId) -> RepoResult<Option<ReminderNotification>>;
    /// Sets the enabled flag. Returns `false` when no row matched.
    fn set_enabled(&self, id: NotificationId, enabled: bool) -> RepoResult<bool>;
    /// Deletes one record. Owning references clear to NULL. Returns `false`
    /// when no row matched.
    fn delete_notification(&self, id: NotificationId) -> RepoResult<bool>;
    /// Sets or clears a card's notification reference. Returns `false` when
    /// the card does not exist.
    fn attach_card_notification(
        &self,
        card_id: CardId,
        notification_id: Option<NotificationId>,
    ) -> RepoResult<bool>;
    /// Sets or clears a folder's notification reference. Returns `false`
    /// when the folder does not exist.
    fn attach_folder_notification(
        &self,
        folder_id: FolderId,
        notification_id: Option<NotificationId>,
    ) -> RepoResult<bool>;
}

/// SQLite-backed notification repository.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn create_notification(
        &self,
        message: &str,
        recurrence_rule: Option<&str>,
        time_of_day: &str,
    ) -> RepoResult<ReminderNotification> {
        let message = ReminderNotification::validated_message(message)?;
        let recurrence_rule = ReminderNotification::validated_recurrence_rule(recurrence_rule)?;
        let time_of_day = ReminderNotification::validated_time_of_day(time_of_day)?;

        self.conn.execute(
            "INSERT INTO Notification (message, recurrence_rule, time_of_day, is_enabled)
             VALUES (?1, ?2, ?3, 1);",
            params![
                message.as_str(),
                recurrence_rule.as_deref(),
                time_of_day.as_str()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        match self.get_notification(id)? {
            Some(notification) => Ok(notification),
            None => Err(RepoError::InvalidData(format!(
                "notification {id} missing immediately after insert"
            ))),
        }
    }

    fn get_notification(&self, id: NotificationId) -> RepoResult<Option<ReminderNotification>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTIFICATION_SELECT_SQL} WHERE notification_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_notification_row(row)?));
        }
        Ok(None)
    }

    fn set_enabled(&self, id: NotificationId, enabled: bool) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE Notification SET is_enabled = ?2 WHERE notification_id = ?1;",
            params![id, bool_to_int(enabled)],
        )?;
        Ok(changed > 0)
    }

    fn delete_notification(&self, id: NotificationId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM Notification WHERE notification_id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn attach_card_notification(
        &self,
        card_id: CardId,
        notification_id: Option<NotificationId>,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE Card SET notification_id = ?2 WHERE card_id = ?1;",
            params![card_id, notification_id],
        )?;
        Ok(changed > 0)
    }

    fn attach_folder_notification(
        &self,
        folder_id: FolderId,
        notification_id: Option<NotificationId>,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE Folder SET notification_id = ?2 WHERE folder_id = ?1;",
            params![folder_id, notification_id],
        )?;
        Ok(changed > 0)
    }
}

fn parse_notification_row(row: &Row<'_>) -> RepoResult<ReminderNotification> {
    Ok(ReminderNotification {
        notification_id: row.get("notification_id")?,
        message: row.get("message")?,
        recurrence_rule: row.get("recurrence_rule")?,
        time_of_day: row.get("time_of_day")?,
        is_enabled: flag_from_int(row.get("is_enabled")?, "Notification.is_enabled")?,
        created_at: row.get("created_at")?,
    })
}
