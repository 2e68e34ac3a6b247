//! Black-box flow through the public command API, against a real file.

use shelftrack_core::ItemPath;
use shelftrack_desktop::{commands, AppState};
use shelftrack_scan::{scan_queue, FnPrompt, ScanEvent, ScanWorker, SilentFeedback};
use std::sync::Arc;

fn no_prompt() -> FnPrompt<fn(&str) -> Option<String>> {
    FnPrompt(|_| panic!("prompt not expected"))
}

#[test]
fn full_session_from_empty_store_to_relocated_item() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let state = AppState::new(&path);

    commands::init_store(&state).unwrap();
    commands::add_location(&state, "Warehouse").unwrap();
    commands::add_shelf(&state, "Warehouse", "Rack1").unwrap();
    commands::add_nested_shelf(&state, "Warehouse", "Rack1", "BinA").unwrap();
    commands::add_nested_shelf(&state, "Warehouse", "Rack1", "BinB").unwrap();

    let bin_a = ItemPath::new("Warehouse", "Rack1", "BinA");
    let bin_b = ItemPath::new("Warehouse", "Rack1", "BinB");

    let status = commands::file_item(
        &state,
        "1234567890-1",
        &bin_a,
        &mut no_prompt(),
        &mut SilentFeedback,
    )
    .unwrap();
    assert!(status.contains("added to"));

    let status = commands::file_item(
        &state,
        "1234567890-1",
        &bin_b,
        &mut no_prompt(),
        &mut SilentFeedback,
    )
    .unwrap();
    assert!(status.contains("moved from"));

    assert_eq!(
        commands::list_items(&state, "Warehouse", "Rack1", "BinA").unwrap(),
        Vec::<String>::new()
    );
    assert_eq!(
        commands::list_items(&state, "Warehouse", "Rack1", "BinB").unwrap(),
        vec!["1234567890-1"]
    );

    // the file on disk holds exactly the same picture
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        json["locations"]["Warehouse"]["Rack1"]["BinB"],
        serde_json::json!(["1234567890-1"])
    );

    commands::backup_then_reset(&state).unwrap();
    assert_eq!(commands::list_locations(&state).unwrap(), Vec::<String>::new());
    assert!(path.with_file_name("inventory.json.bak").exists());
}

#[test]
fn scan_feed_from_another_thread_lands_in_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.path().join("inventory.json"));
    commands::add_location(&state, "Warehouse").unwrap();
    commands::add_shelf(&state, "Warehouse", "Rack1").unwrap();
    commands::add_nested_shelf(&state, "Warehouse", "Rack1", "BinA").unwrap();

    let (feed, queue) = scan_queue();
    let mut worker = ScanWorker::new(
        Arc::clone(&state.service),
        queue,
        no_prompt(),
        SilentFeedback,
    );

    let producer = std::thread::spawn(move || {
        for line in 1..=3 {
            let raw = format!("1234567890-{line}");
            feed.submit(ScanEvent::new(raw, ItemPath::new("Warehouse", "Rack1", "BinA")));
        }
        // dropping the feed lets the worker run to completion
    });
    producer.join().unwrap();
    worker.run();

    assert_eq!(
        commands::list_items(&state, "Warehouse", "Rack1", "BinA").unwrap(),
        vec!["1234567890-1", "1234567890-2", "1234567890-3"]
    );
}
