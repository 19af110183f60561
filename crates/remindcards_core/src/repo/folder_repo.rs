//! Folder repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for folders and card/folder memberships.
//! - Enforce system-folder protection and active-folder exclusivity.
//! - Keep SQL details and ordering behavior inside the repository boundary.
//!
//! # Invariants
//! - At most one folder has `is_active_folder = 1`; the switch clears and
//!   sets inside one immediate transaction, so readers observe either the
//!   previous or the final state, never an intermediate one.
//! - The Default and Favorites folders are never deleted.
//! - Membership insertion is idempotent on `(card_id, folder_id)`.
//! - Folder listing is deterministic: `created_at ASC, folder_id ASC`.

use crate::model::{Card, CardId, Folder, FolderCard, FolderId};
use crate::repo::card_repo::parse_card_row;
use crate::repo::{ensure_connection_ready, flag_from_int, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const FOLDER_SELECT_SQL: &str = "SELECT
    folder_id,
    title,
    is_default,
    is_favorites,
    is_active_folder,
    notification_id,
    created_at
FROM Folder";

const CARDS_IN_FOLDER_SQL: &str = "SELECT
    c.card_id AS card_id,
    c.text AS text,
    c.is_favorite AS is_favorite,
    c.notification_id AS notification_id,
    c.created_at AS created_at
FROM Card c
INNER JOIN FolderCard fc ON fc.card_id = c.card_id
WHERE fc.folder_id = ?1
ORDER BY c.created_at DESC, c.card_id DESC;";

/// Repository interface for folder and membership operations.
pub trait FolderRepository {
    /// Lists all folders, oldest first.
    fn list_folders(&self) -> RepoResult<Vec<Folder>>;
    /// Loads one folder by id.
    fn get_folder(&self, id: FolderId) -> RepoResult<Option<Folder>>;
    /// Loads the folder currently marked active, if any.
    fn get_active_folder(&self) -> RepoResult<Option<Folder>>;
    /// Loads the seeded Default folder.
    fn get_default_folder(&self) -> RepoResult<Option<Folder>>;
    /// Loads the seeded Favorites folder.
    fn get_favorites_folder(&self) -> RepoResult<Option<Folder>>;
    /// Inserts one folder with a validated title.
    fn create_folder(&self, title: &str) -> RepoResult<Folder>;
    /// Deletes one folder; memberships cascade. System folders are rejected
    /// with [`RepoError::ProtectedFolder`]; a missing id returns `false`.
    fn delete_folder(&self, id: FolderId) -> RepoResult<bool>;
    /// Clears the active flag everywhere, then sets it on `id`, atomically.
    ///
    /// A nonexistent `id` still commits the clear step, leaving no folder
    /// active; the active-folder read path falls back to Default.
    fn set_active_folder(&self, id: FolderId) -> RepoResult<()>;
    /// Links a card to a folder. Idempotent on an existing pair.
    fn add_card_to_folder(&self, card_id: CardId, folder_id: FolderId) -> RepoResult<()>;
    /// Unlinks a card from a folder. No-op when no row matches.
    fn remove_card_from_folder(&self, card_id: CardId, folder_id: FolderId) -> RepoResult<()>;
    /// Loads one membership row, if present.
    fn get_association(
        &self,
        card_id: CardId,
        folder_id: FolderId,
    ) -> RepoResult<Option<FolderCard>>;
    /// Lists cards linked to one folder, newest first.
    fn cards_in_folder(&self, folder_id: FolderId) -> RepoResult<Vec<Card>>;
    /// Counts memberships of one folder.
    fn card_count(&self, folder_id: FolderId) -> RepoResult<u32>;
    /// Lists ids of folders containing one card.
    fn folders_for_card(&self, card_id: CardId) -> RepoResult<Vec<FolderId>>;
}

/// SQLite-backed folder repository.
pub struct SqliteFolderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFolderRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn find_by_flag(&self, flag_column: &str) -> RepoResult<Option<Folder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FOLDER_SELECT_SQL} WHERE {flag_column} = 1 LIMIT 1;"))?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_folder_row(row)?));
        }
        Ok(None)
    }
}

impl FolderRepository for SqliteFolderRepository<'_> {
    fn list_folders(&self) -> RepoResult<Vec<Folder>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FOLDER_SELECT_SQL} ORDER BY created_at ASC, folder_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut folders = Vec::new();
        while let Some(row) = rows.next()? {
            folders.push(parse_folder_row(row)?);
        }
        Ok(folders)
    }

    fn get_folder(&self, id: FolderId) -> RepoResult<Option<Folder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FOLDER_SELECT_SQL} WHERE folder_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_folder_row(row)?));
        }
        Ok(None)
    }

    fn get_active_folder(&self) -> RepoResult<Option<Folder>> {
        self.find_by_flag("is_active_folder")
    }

    fn get_default_folder(&self) -> RepoResult<Option<Folder>> {
        self.find_by_flag("is_default")
    }

    fn get_favorites_folder(&self) -> RepoResult<Option<Folder>> {
        self.find_by_flag("is_favorites")
    }

    fn create_folder(&self, title: &str) -> RepoResult<Folder> {
        let title = Folder::validated_title(title)?;
        self.conn.execute(
            "INSERT INTO Folder (title, is_default, is_favorites, is_active_folder)
             VALUES (?1, 0, 0, 0);",
            [title.as_str()],
        )?;
        let folder_id = self.conn.last_insert_rowid();
        match self.get_folder(folder_id)? {
            Some(folder) => Ok(folder),
            None => Err(RepoError::InvalidData(format!(
                "folder {folder_id} missing immediately after insert"
            ))),
        }
    }

    fn delete_folder(&self, id: FolderId) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let folder = {
            let mut stmt = tx.prepare(&format!("{FOLDER_SELECT_SQL} WHERE folder_id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => parse_folder_row(row)?,
                None => return Ok(false),
            }
        };
        if folder.is_system() {
            return Err(RepoError::ProtectedFolder(id));
        }
        tx.execute("DELETE FROM Folder WHERE folder_id = ?1;", [id])?;
        tx.commit()?;
        Ok(true)
    }

    fn set_active_folder(&self, id: FolderId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "UPDATE Folder SET is_active_folder = 0 WHERE is_active_folder = 1;",
            [],
        )?;
        tx.execute(
            "UPDATE Folder SET is_active_folder = 1 WHERE folder_id = ?1;",
            [id],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn add_card_to_folder(&self, card_id: CardId, folder_id: FolderId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT folder_card_id FROM FolderCard WHERE card_id = ?1 AND folder_id = ?2;",
                params![card_id, folder_id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_none() {
            tx.execute(
                "INSERT INTO FolderCard (card_id, folder_id) VALUES (?1, ?2);",
                params![card_id, folder_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_card_from_folder(&self, card_id: CardId, folder_id: FolderId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM FolderCard WHERE card_id = ?1 AND folder_id = ?2;",
            params![card_id, folder_id],
        )?;
        Ok(())
    }

    fn get_association(
        &self,
        card_id: CardId,
        folder_id: FolderId,
    ) -> RepoResult<Option<FolderCard>> {
        let mut stmt = self.conn.prepare(
            "SELECT folder_card_id, card_id, folder_id, added_at
             FROM FolderCard
             WHERE card_id = ?1 AND folder_id = ?2;",
        )?;
        let mut rows = stmt.query(params![card_id, folder_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(FolderCard {
                folder_card_id: row.get("folder_card_id")?,
                card_id: row.get("card_id")?,
                folder_id: row.get("folder_id")?,
                added_at: row.get("added_at")?,
            }));
        }
        Ok(None)
    }

    fn cards_in_folder(&self, folder_id: FolderId) -> RepoResult<Vec<Card>> {
        let mut stmt = self.conn.prepare(CARDS_IN_FOLDER_SQL)?;
        let mut rows = stmt.query([folder_id])?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(parse_card_row(row)?);
        }
        Ok(cards)
    }

    fn card_count(&self, folder_id: FolderId) -> RepoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM FolderCard WHERE folder_id = ?1;",
            [folder_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn folders_for_card(&self, card_id: CardId) -> RepoResult<Vec<FolderId>> {
        let mut stmt = self.conn.prepare(
            "SELECT folder_id FROM FolderCard WHERE card_id = ?1 ORDER BY folder_id ASC;",
        )?;
        let mut rows = stmt.query([card_id])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }
}

fn parse_folder_row(row: &Row<'_>) -> RepoResult<Folder> {
    Ok(Folder {
        folder_id: row.get("folder_id")?,
        title: row.get("title")?,
        is_default: flag_from_int(row.get("is_default")?, "Folder.is_default")?,
        is_favorites: flag_from_int(row.get("is_favorites")?, "Folder.is_favorites")?,
        is_active_folder: flag_from_int(row.get("is_active_folder")?, "Folder.is_active_folder")?,
        notification_id: row.get("notification_id")?,
        created_at: row.get("created_at")?,
    })
}
