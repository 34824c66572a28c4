use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use tasklist_core::{
    filtered_view, AutoConfirm, Filter, FixedClock, MemorySlotStore, Task, TaskId,
    TaskPersistence, TaskStore,
};

fn store() -> TaskStore<MemorySlotStore> {
    TaskStore::open_with_clock(
        TaskPersistence::new(MemorySlotStore::new()),
        AutoConfirm(true),
        FixedClock(Utc.timestamp_millis_opt(1_000).unwrap()),
    )
}

fn tasks_from(flags: &[bool]) -> Vec<Task> {
    flags
        .iter()
        .enumerate()
        .map(|(index, completed)| Task {
            id: TaskId(index as i64 + 1),
            text: format!("task {index}"),
            completed: *completed,
            created_at: "2026-10-19T08:30:00.000Z".to_string(),
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_add_counts_and_ids(texts in prop::collection::vec("[a-z]{1,12}", 0..20)) {
        let mut store = store();
        for text in &texts {
            let _ = store.add(text);
        }

        prop_assert_eq!(store.counts().total, texts.len());
        let ids: Vec<TaskId> = store.tasks().iter().map(|task| task.id).collect();
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_blank_text_is_ignored(blank in "[ \t]{0,8}") {
        let mut store = store();
        let _ = store.add("keep");
        let _ = store.add(&blank);
        prop_assert_eq!(store.counts().total, 1);
    }

    #[test]
    fn prop_filters_partition_collection_in_order(flags in prop::collection::vec(any::<bool>(), 0..30)) {
        let tasks = tasks_from(&flags);

        let all: Vec<&Task> = filtered_view(&tasks, Filter::All);
        prop_assert_eq!(all, tasks.iter().collect::<Vec<_>>());

        let active = filtered_view(&tasks, Filter::Active);
        prop_assert!(active.iter().all(|task| !task.completed));
        prop_assert!(active.windows(2).all(|pair| pair[0].id < pair[1].id));

        let completed = filtered_view(&tasks, Filter::Completed);
        prop_assert!(completed.iter().all(|task| task.completed));
        prop_assert!(completed.windows(2).all(|pair| pair[0].id < pair[1].id));
        prop_assert_eq!(active.len() + completed.len(), tasks.len());
    }

    #[test]
    fn prop_save_load_roundtrip(flags in prop::collection::vec(any::<bool>(), 0..30)) {
        let tasks = tasks_from(&flags);
        let mut persistence = TaskPersistence::new(MemorySlotStore::new());
        persistence.save(&tasks).unwrap();
        prop_assert_eq!(persistence.load().tasks, tasks);
    }
}
