//! Store and codec behaviour across a save/load boundary.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use terminal_todo::io::codec;
use terminal_todo::model::TodoState;
use terminal_todo::ops::store::{ErrorKind, Store};

fn fresh_empty_store(path: &Path) -> Store {
    let mut store = Store::with_state(path, TodoState::empty());
    store.save().unwrap();
    store
}

#[test]
fn empty_start_to_completed_task_survives_reload() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");

    let mut store = fresh_empty_store(&path);
    let tab = store.add_tab("Work").unwrap();
    let task = store.add_task(&tab, "Write spec").unwrap();
    assert!(store.toggle_task(&tab, &task).unwrap());
    store.save().unwrap();

    let loaded = Store::open(&path).unwrap();
    let work = loaded.resolve_tab("Work").unwrap();
    assert_eq!(work.tasks.len(), 1);
    assert_eq!(work.tasks[0].title, "Write spec");
    assert!(work.tasks[0].done);
    assert_eq!(loaded.snapshot(), store.snapshot());
}

#[test]
fn removing_active_first_tab_focuses_second() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");

    let mut store = fresh_empty_store(&path);
    let a = store.add_tab("A").unwrap();
    let b = store.add_tab("B").unwrap();
    store.set_active_tab(&a).unwrap();

    store.remove_tab(&a).unwrap();
    assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(b.as_str()));

    let loaded = Store::open(&path).unwrap();
    assert_eq!(loaded.snapshot().active_tab_id.as_deref(), Some(b.as_str()));
}

#[test]
fn remove_task_from_wrong_tab_is_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");

    let mut store = fresh_empty_store(&path);
    let a = store.add_tab("A").unwrap();
    let b = store.add_tab("B").unwrap();
    let task = store.add_task(&a, "only in A").unwrap();
    let before = fs::read_to_string(&path).unwrap();

    // B has no tasks, so even a matching id is absent there
    let err = store.remove_task(&b, &task).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.snapshot().find_tab(&a).unwrap().tasks.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn every_mutation_is_on_disk_before_returning() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    let mut store = fresh_empty_store(&path);

    let on_disk = |path: &Path| codec::load(path).unwrap();

    let tab = store.add_tab("Home").unwrap();
    assert_eq!(&on_disk(&path), store.snapshot());
    let t1 = store.add_task(&tab, "Dishes").unwrap();
    assert_eq!(&on_disk(&path), store.snapshot());
    store.add_task(&tab, "Laundry").unwrap();
    assert_eq!(&on_disk(&path), store.snapshot());
    store.toggle_task(&tab, &t1).unwrap();
    assert_eq!(&on_disk(&path), store.snapshot());
    store.remove_task(&tab, &t1).unwrap();
    assert_eq!(&on_disk(&path), store.snapshot());
    store.remove_tab(&tab).unwrap();
    assert_eq!(&on_disk(&path), store.snapshot());
    assert!(store.snapshot().tabs.is_empty());
}

#[test]
fn task_order_is_insertion_order_on_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    let mut store = fresh_empty_store(&path);

    let tab = store.add_tab("Today").unwrap();
    for title in ["one", "two", "three"] {
        store.add_task(&tab, title).unwrap();
    }
    // Toggling moves a task between sections in the UI, not in the file
    store.toggle_task(&tab, "T-002").unwrap();

    let loaded = codec::load(&path).unwrap();
    let titles: Vec<&str> = loaded.tabs[0]
        .tasks
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}

#[test]
fn hand_written_file_with_dangling_active_tab_loads() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    fs::write(
        &path,
        r#"{
  "tabs": [
    {"id": "tab-7", "name": "Errands", "tasks": [
      {"id": "T-004", "title": "Post office", "done": false}
    ]}
  ],
  "active_tab_id": "tab-99"
}"#,
    )
    .unwrap();

    let mut store = Store::open(&path).unwrap();
    assert_eq!(store.snapshot().active_tab_id.as_deref(), Some("tab-7"));
    assert_eq!(store.add_task("tab-7", "Bank").unwrap(), "T-005");
    assert_eq!(store.add_tab("").unwrap(), "tab-8");
}

#[test]
fn invalid_records_are_rejected_at_load() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    let bad = [
        r#"{"tabs": "nope"}"#,
        r#"{"tabs": [{"id": "tab-1", "name": "A", "tasks": [{"id": "T-001", "title": "x"}]}]}"#,
        r#"{"tabs": [{"id": "tab-1", "name": "A", "tasks": []}, {"id": "tab-1", "name": "B", "tasks": []}]}"#,
    ];
    for text in bad {
        fs::write(&path, text).unwrap();
        let err = Store::open(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptData, "accepted {}", text);
    }
}

#[test]
fn older_layout_is_upgraded_on_first_change() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    fs::write(
        &path,
        r#"{"tabs":[{"name":"Today","tasks":{"not_completed":["Buy milk"],"completed":["Write spec"]}}]}"#,
    )
    .unwrap();

    let mut store = Store::open(&path).unwrap();
    let today = store.resolve_tab("Today").unwrap().id.clone();
    assert_eq!(store.add_task(&today, "Call mom").unwrap(), "T-003");

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["active_tab_id"], "tab-1");
    assert_eq!(on_disk["tabs"][0]["tasks"][1]["title"], "Write spec");
    assert_eq!(on_disk["tabs"][0]["tasks"][1]["done"], true);
    assert_eq!(on_disk["tabs"][0]["tasks"][2]["id"], "T-003");
}
