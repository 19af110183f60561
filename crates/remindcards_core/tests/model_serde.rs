use remindcards_core::{Card, Folder};
use serde_json::json;

#[test]
fn card_flags_serialize_as_native_booleans() {
    let card = Card {
        card_id: 7,
        text: "Buy milk".to_string(),
        is_favorite: true,
        notification_id: None,
        created_at: 1_700_000_000_000,
    };

    let value = serde_json::to_value(&card).unwrap();
    assert_eq!(
        value,
        json!({
            "card_id": 7,
            "text": "Buy milk",
            "is_favorite": true,
            "notification_id": null,
            "created_at": 1_700_000_000_000_i64,
        })
    );
}

#[test]
fn folder_roundtrips_through_json() {
    let folder = Folder {
        folder_id: 1,
        title: "Default".to_string(),
        is_default: true,
        is_favorites: false,
        is_active_folder: true,
        notification_id: None,
        created_at: 1_700_000_000_000,
    };

    let encoded = serde_json::to_string(&folder).unwrap();
    let decoded: Folder = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, folder);
}
