use tasklist_core::{
    MemorySlotStore, NoticeKind, SlotStore, SqliteSlotStore, Task, TaskId, TaskPersistence,
    STORAGE_KEY,
};

fn sample_tasks() -> Vec<Task> {
    let mut done = Task::new(TaskId(1_760_862_600_000), "Buy milk", "2025-10-19T08:30:00.000Z")
        .unwrap();
    done.completed = true;
    let open = Task::new(
        TaskId(1_760_862_600_001),
        "Clean <kitchen> & \"hall\"",
        "2025-10-19T08:30:00.001Z",
    )
    .unwrap();
    vec![done, open]
}

#[test]
fn save_then_load_returns_same_collection() {
    let mut persistence = TaskPersistence::new(MemorySlotStore::new());
    let tasks = sample_tasks();

    persistence.save(&tasks).unwrap();
    let loaded = persistence.load();

    assert_eq!(loaded.tasks, tasks);
    assert_eq!(loaded.notice, None);
}

#[test]
fn empty_collection_roundtrips() {
    let mut persistence = TaskPersistence::new(MemorySlotStore::new());
    persistence.save(&[]).unwrap();

    assert_eq!(
        persistence.slots().read_slot(STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
    assert!(persistence.load().tasks.is_empty());
}

#[test]
fn absent_key_loads_empty_without_notice() {
    let persistence = TaskPersistence::new(MemorySlotStore::new());
    let loaded = persistence.load();

    assert!(loaded.tasks.is_empty());
    assert_eq!(loaded.notice, None);
}

#[test]
fn corrupt_values_load_empty_with_error_notice() {
    let corrupt = [
        "{not json",
        "null",
        r#"{"id":1}"#,
        r#"[{"id":1,"text":"x","completed":"yes","createdAt":"t"}]"#,
        r#"[{"id":1,"text":"   ","completed":false,"createdAt":"t"}]"#,
        r#"[{"id":1,"text":"a","completed":false,"createdAt":"t"},{"id":1,"text":"b","completed":false,"createdAt":"t"}]"#,
    ];

    for raw in corrupt {
        let persistence = TaskPersistence::new(MemorySlotStore::new().with_raw(STORAGE_KEY, raw));
        let loaded = persistence.load();

        assert!(loaded.tasks.is_empty(), "value {raw} should reset");
        let notice = loaded.notice.expect("corrupt value should raise a notice");
        assert_eq!(notice.kind, NoticeKind::Error);
    }
}

#[test]
fn stored_value_from_browser_shape_is_accepted() {
    let raw = r#"[{"id":1700000000000,"text":"Buy milk","completed":true,"createdAt":"2023-11-14T22:13:20.000Z"}]"#;
    let persistence = TaskPersistence::new(MemorySlotStore::new().with_raw(STORAGE_KEY, raw));

    let loaded = persistence.load();
    assert_eq!(loaded.tasks.len(), 1);
    assert_eq!(loaded.tasks[0].id, TaskId(1_700_000_000_000));
    assert!(loaded.tasks[0].completed);
    assert_eq!(loaded.tasks[0].created_at, "2023-11-14T22:13:20.000Z");
}

#[test]
fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");
    let tasks = sample_tasks();

    let mut persistence = TaskPersistence::new(SqliteSlotStore::open(&path).unwrap());
    persistence.save(&tasks).unwrap();
    drop(persistence);

    let reopened = TaskPersistence::new(SqliteSlotStore::open(&path).unwrap());
    assert_eq!(reopened.load().tasks, tasks);
}
