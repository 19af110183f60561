//! Card repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `Card` storage.
//! - Resolve the active-folder view (with Default fallback) for listings.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate input before SQL mutations.
//! - Card creation and its initial folder association commit in one
//!   transaction.
//! - Listings are ordered by creation time descending, newest first, with
//!   row id as a deterministic tiebreaker.

use crate::model::{Card, CardId, FolderId};
use crate::repo::{ensure_connection_ready, flag_from_int, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CARD_SELECT_SQL: &str = "SELECT
    card_id,
    text,
    is_favorite,
    notification_id,
    created_at
FROM Card";

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

/// Repository interface for card CRUD operations.
pub trait CardRepository {
    /// Inserts a card and links it to `folder_id` in one transaction.
    fn create_card(&self, text: &str, folder_id: FolderId) -> RepoResult<Card>;
    /// Loads one card by id.
    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>>;
    /// Lists cards linked to one folder, newest first.
    fn list_cards_in_folder(&self, folder_id: FolderId) -> RepoResult<Vec<Card>>;
    /// Lists cards in the active folder, falling back to the Default folder
    /// when no folder is marked active. Empty when neither exists.
    fn list_active_folder_cards(&self) -> RepoResult<Vec<Card>>;
    /// Replaces a card's text. Returns `false` when no row matched.
    fn update_card_text(&self, id: CardId, text: &str) -> RepoResult<bool>;
    /// Deletes a card; association rows cascade. Returns `false` when no row
    /// matched.
    fn delete_card(&self, id: CardId) -> RepoResult<bool>;
    /// Flips the favorite flag and returns the new state; `false` when the
    /// card does not exist.
    fn toggle_favorite(&self, id: CardId) -> RepoResult<bool>;
    /// Looks up the Default folder id.
    fn default_folder_id(&self) -> RepoResult<Option<FolderId>>;
}

/// SQLite-backed card repository.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn create_card(&self, text: &str, folder_id: FolderId) -> RepoResult<Card> {
        let text = Card::validated_text(text)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO Card (text, is_favorite) VALUES (?1, 0);",
            [text.as_str()],
        )?;
        let card_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO FolderCard (card_id, folder_id) VALUES (?1, ?2);",
            params![card_id, folder_id],
        )?;
        let card = load_required_card(&tx, card_id)?;
        tx.commit()?;
        Ok(card)
    }

    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CARD_SELECT_SQL} WHERE card_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(row)?));
        }
        Ok(None)
    }

    fn list_cards_in_folder(&self, folder_id: FolderId) -> RepoResult<Vec<Card>> {
        list_cards_in_folder(self.conn, folder_id)
    }

    fn list_active_folder_cards(&self) -> RepoResult<Vec<Card>> {
        let active: Option<FolderId> = self
            .conn
            .query_row(
                "SELECT folder_id FROM Folder WHERE is_active_folder = 1 LIMIT 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let folder_id = match active {
            Some(folder_id) => folder_id,
            None => match self.default_folder_id()? {
                Some(folder_id) => folder_id,
                None => return Ok(Vec::new()),
            },
        };

        list_cards_in_folder(self.conn, folder_id)
    }

    fn update_card_text(&self, id: CardId, text: &str) -> RepoResult<bool> {
        let text = Card::validated_text(text)?;
        let changed = self.conn.execute(
            "UPDATE Card SET text = ?2 WHERE card_id = ?1;",
            params![id, text.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn delete_card(&self, id: CardId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM Card WHERE card_id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn toggle_favorite(&self, id: CardId) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE Card SET is_favorite = 1 - is_favorite WHERE card_id = ?1;",
            [id],
        )?;
        if changed == 0 {
            return Ok(false);
        }
        let new_state: i64 = tx.query_row(
            "SELECT is_favorite FROM Card WHERE card_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        tx.commit()?;
        flag_from_int(new_state, "Card.is_favorite")
    }

    fn default_folder_id(&self) -> RepoResult<Option<FolderId>> {
        let id = self
            .conn
            .query_row(
                "SELECT folder_id FROM Folder WHERE is_default = 1 LIMIT 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}

fn list_cards_in_folder(conn: &Connection, folder_id: FolderId) -> RepoResult<Vec<Card>> {
    let mut stmt = conn.prepare(CARDS_IN_FOLDER_SQL)?;
    let mut rows = stmt.query([folder_id])?;
    let mut cards = Vec::new();
    while let Some(row) = rows.next()? {
        cards.push(parse_card_row(row)?);
    }
    Ok(cards)
}

fn load_required_card(conn: &Connection, id: CardId) -> RepoResult<Card> {
    let mut stmt = conn.prepare(&format!("{CARD_SELECT_SQL} WHERE card_id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => parse_card_row(row),
        None => Err(RepoError::InvalidData(format!(
            "card {id} missing immediately after insert"
        ))),
    }
}

pub(crate) fn parse_card_row(row: &Row<'_>) -> RepoResult<Card> {
    Ok(Card {
        card_id: row.get("card_id")?,
        text: row.get("text")?,
        is_favorite: flag_from_int(row.get("is_favorite")?, "Card.is_favorite")?,
        notification_id: row.get("notification_id")?,
        created_at: row.get("created_at")?,
    })
}
