use chrono::{TimeZone, Utc};
use todoshare_core::repo::keys::{ALL_KEYS, SETTINGS_KEY, SHARED_LISTS_KEY, SHARES_KEY, TODOS_KEY};
use todoshare_core::repo::local_storage::{
    clear_all_data, is_storage_available, load_settings, load_shared_lists, save_settings,
    save_shared_lists,
};
use todoshare_core::{
    KeyValueStore, MemoryKeyValueStore, Priority, Settings, SharedList, SortBy, Todo,
};

fn shared_list(share_id: &str, title: &str) -> SharedList {
    let shared_at = Utc.with_ymd_and_hms(2024, 4, 2, 12, 0, 0).unwrap();
    SharedList {
        share_id: share_id.to_string(),
        title: title.to_string(),
        shared_by: "sam".to_string(),
        shared_at,
        todos: vec![Todo::new(1, "buy milk", Priority::Low, None, shared_at)],
    }
}

#[test]
fn settings_default_when_missing_and_round_trip() {
    let kv = MemoryKeyValueStore::new();
    assert_eq!(load_settings(&kv), Settings::default());

    let settings = Settings {
        theme: "dark".to_string(),
        sort_by: SortBy::Priority,
        show_completed: false,
        default_priority: Priority::High,
        notifications: false,
    };
    assert!(save_settings(&kv, &settings));
    assert_eq!(load_settings(&kv), settings);

    let raw = kv.get_item(SETTINGS_KEY).unwrap().unwrap();
    assert!(raw.contains(r#""sortBy":"priority""#));
    assert!(raw.contains(r#""showCompleted":false"#));
}

#[test]
fn corrupt_payloads_fall_back_to_defaults() {
    let kv = MemoryKeyValueStore::new();
    kv.set_item(SETTINGS_KEY, "{not json").unwrap();
    kv.set_item(SHARED_LISTS_KEY, r#"{"oops":true}"#).unwrap();

    assert_eq!(load_settings(&kv), Settings::default());
    assert!(load_shared_lists(&kv).is_empty());
}

#[test]
fn shared_lists_round_trip_under_their_own_key() {
    let kv = MemoryKeyValueStore::new();
    let lists = vec![shared_list("abc-123456", "Groceries"), shared_list("def-654321", "Chores")];

    assert!(save_shared_lists(&kv, &lists));
    assert_eq!(load_shared_lists(&kv), lists);
    assert!(!kv.contains_key(TODOS_KEY));
}

#[test]
fn saves_report_failure_instead_of_erroring() {
    let kv = MemoryKeyValueStore::with_quota(8);
    assert!(!save_settings(&kv, &Settings::default()));
    assert!(!save_shared_lists(&kv, &[shared_list("abc-123456", "Groceries")]));
    assert!(kv.is_empty());
}

#[test]
fn clear_all_data_removes_every_application_key() {
    let kv = MemoryKeyValueStore::new();
    for key in ALL_KEYS {
        kv.set_item(key, "[]").unwrap();
    }
    kv.set_item("unrelated", "keep").unwrap();

    assert!(clear_all_data(&kv));
    for key in [TODOS_KEY, SHARED_LISTS_KEY, SETTINGS_KEY, SHARES_KEY] {
        assert!(!kv.contains_key(key), "{key} should be removed");
    }
    assert!(kv.contains_key("unrelated"));
}

#[test]
fn clear_all_data_reports_failure_when_writes_are_disabled() {
    let kv = MemoryKeyValueStore::new();
    kv.set_item(TODOS_KEY, "{}").unwrap();
    kv.set_writes_disabled(true);

    assert!(!clear_all_data(&kv));
    assert!(kv.contains_key(TODOS_KEY));
}

#[test]
fn storage_probe_leaves_no_trace() {
    let kv = MemoryKeyValueStore::new();
    assert!(is_storage_available(&kv));
    assert!(kv.is_empty());

    kv.set_writes_disabled(true);
    assert!(!is_storage_available(&kv));
}
