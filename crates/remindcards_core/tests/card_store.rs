use remindcards_core::db::open_db_in_memory;
use remindcards_core::{CardStore, FolderId, SqliteCardRepository};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn default_folder_id(conn: &Connection) -> FolderId {
    conn.query_row(
        "SELECT folder_id FROM Folder WHERE is_default = 1;",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_card_trims_text_and_links_to_folder() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    let card = store.create_card("  hi  ", folder_id).unwrap();
    assert_eq!(card.text, "hi");
    assert!(!card.is_favorite);

    let linked: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM FolderCard WHERE card_id = ?1 AND folder_id = ?2;",
            [card.card_id, folder_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(linked, 1);
}

#[test]
fn create_card_rejects_blank_text() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    assert!(store.create_card("", folder_id).is_none());
    assert!(store.create_card("   ", folder_id).is_none());
    assert!(store.list_active_folder_cards().is_empty());
}

#[test]
fn create_card_fails_when_folder_does_not_exist() {
    let conn = setup();
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    assert!(store.create_card("orphan", 9999).is_none());
    // The card insert must have rolled back with the failed association.
    let cards: i64 = conn
        .query_row("SELECT COUNT(*) FROM Card;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(cards, 0);
}

#[test]
fn cards_list_newest_first() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    store.create_card("first", folder_id).unwrap();
    store.create_card("second", folder_id).unwrap();
    store.create_card("third", folder_id).unwrap();

    let texts: Vec<&str> = store.cards().iter().map(|card| card.text.as_str()).collect();
    assert_eq!(texts, ["third", "second", "first"]);
}

#[test]
fn update_card_replaces_text_and_tolerates_missing_ids() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    let card = store.create_card("draft", folder_id).unwrap();
    assert!(store.update_card(card.card_id, "  final  "));
    assert_eq!(store.cards()[0].text, "final");

    // Missing id is a benign no-op, blank text is a rejection.
    assert!(store.update_card(9999, "whatever"));
    assert!(!store.update_card(card.card_id, "   "));
    assert_eq!(store.cards()[0].text, "final");
}

#[test]
fn toggle_favorite_flips_state_and_reports_missing_cards_as_false() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    let card = store.create_card("note", folder_id).unwrap();
    assert!(store.toggle_favorite(card.card_id));
    assert!(store.cards()[0].is_favorite);
    assert!(!store.toggle_favorite(card.card_id));
    assert!(!store.cards()[0].is_favorite);

    assert!(!store.toggle_favorite(9999));
}

#[test]
fn delete_card_is_not_an_error_for_missing_ids() {
    let conn = setup();
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    assert!(store.delete_card(12345));
}

#[test]
fn advance_wraps_forward_and_retreat_wraps_backward() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    for index in 0..4 {
        store.create_card(format!("card {index}").as_str(), folder_id);
    }
    assert_eq!(store.current_index(), 0);

    for _ in 0..4 {
        store.advance();
    }
    assert_eq!(store.current_index(), 0);

    store.retreat();
    assert_eq!(store.current_index(), 3);
}

#[test]
fn cursor_is_a_no_op_on_an_empty_list() {
    let conn = setup();
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    assert!(store.current_card().is_none());
    store.advance();
    store.retreat();
    assert_eq!(store.current_index(), 0);
    assert!(store.current_card().is_none());
}

#[test]
fn deleting_the_last_viewed_card_clamps_the_cursor() {
    let conn = setup();
    let folder_id = default_folder_id(&conn);
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    store.create_card("a", folder_id).unwrap();
    store.create_card("b", folder_id).unwrap();
    store.create_card("c", folder_id).unwrap();

    store.advance();
    store.advance();
    assert_eq!(store.current_index(), 2);

    let last_id = store.current_card().unwrap().card_id;
    assert!(store.delete_card(last_id));
    assert_eq!(store.cards().len(), 2);
    assert_eq!(store.current_index(), 1);

    // Draining the list floors the cursor at zero.
    let ids: Vec<i64> = store.cards().iter().map(|card| card.card_id).collect();
    for id in ids {
        assert!(store.delete_card(id));
    }
    assert_eq!(store.current_index(), 0);
    assert!(store.current_card().is_none());
}

#[test]
fn fresh_store_scenario_create_favorite_delete() {
    let conn = setup();
    let mut store = CardStore::new(SqliteCardRepository::try_new(&conn).unwrap());

    let folder_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM Folder;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(folder_count, 2);

    let default_id = store.default_folder_id().unwrap();
    let card = store.create_card("Buy milk", default_id).unwrap();

    let active = store.list_active_folder_cards();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].text, "Buy milk");

    assert!(store.toggle_favorite(card.card_id));
    let in_default = store.list_cards(default_id);
    assert_eq!(in_default.len(), 1);
    assert_eq!(in_default[0].card_id, card.card_id);

    assert!(store.delete_card(card.card_id));
    assert!(store.list_active_folder_cards().is_empty());
}
