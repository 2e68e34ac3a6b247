//! Frontend-facing commands.
//!
//! Every command returns `Result<String, String>`: `Ok` carries status
//! text (including recoverable outcomes such as "already exists"), `Err`
//! carries a fatal condition — a malformed store file or a relocation
//! into a target that was never created. Only the latter should abort a
//! frontend flow.

use std::path::PathBuf;

use shelftrack_core::{normalize, DomainResult, InventoryDoc, ItemId, ItemPath, Normalized, Outcome};
use shelftrack_scan::{FeedbackSink, LinePrompt};
use shelftrack_shelving::{lock_service, OpError, OpResult, ShelfService, SharedService};
use shelftrack_store::JsonStore;

/// Application state shared across commands.
#[derive(Clone)]
pub struct AppState {
    pub service: SharedService,
}

impl AppState {
    /// State over the inventory file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            service: ShelfService::new(JsonStore::new(path)).into_shared(),
        }
    }
}

fn run(state: &AppState, op: impl FnOnce(&ShelfService) -> OpResult<Outcome>) -> Result<String, String> {
    let service = lock_service(&state.service);
    match op(&service) {
        Ok(outcome) => Ok(outcome.to_string()),
        Err(err) if err.is_user_recoverable() => Ok(err.to_string()),
        Err(err) => Err(err.to_string()),
    }
}

pub fn add_location(state: &AppState, name: &str) -> Result<String, String> {
    run(state, |s| s.add_location(name))
}

pub fn remove_location(state: &AppState, name: &str) -> Result<String, String> {
    run(state, |s| s.remove_location(name))
}

pub fn add_shelf(state: &AppState, location: &str, shelf: &str) -> Result<String, String> {
    run(state, |s| s.add_shelf(location, shelf))
}

pub fn remove_shelf(state: &AppState, location: &str, shelf: &str) -> Result<String, String> {
    run(state, |s| s.remove_shelf(location, shelf))
}

pub fn add_nested_shelf(
    state: &AppState,
    location: &str,
    shelf: &str,
    nested: &str,
) -> Result<String, String> {
    run(state, |s| s.add_nested_shelf(location, shelf, nested))
}

pub fn remove_nested_shelf(
    state: &AppState,
    location: &str,
    shelf: &str,
    nested: &str,
) -> Result<String, String> {
    run(state, |s| s.remove_nested_shelf(location, shelf, nested))
}

pub fn clear_nested_shelf(
    state: &AppState,
    location: &str,
    shelf: &str,
    nested: &str,
) -> Result<String, String> {
    run(state, |s| s.clear_nested_shelf(location, shelf, nested))
}

/// File a raw scanned/typed barcode into the target nested shelf,
/// prompting for the line number when the scan lacks the separator.
pub fn file_item(
    state: &AppState,
    raw: &str,
    target: &ItemPath,
    prompt: &mut dyn LinePrompt,
    feedback: &mut dyn FeedbackSink,
) -> Result<String, String> {
    let Some(item) = resolve(raw, prompt) else {
        return Ok("Scan abandoned.".to_string());
    };
    let service = lock_service(&state.service);
    match service.locate_and_move(item, target) {
        Ok(outcome) => {
            feedback.item_located(matches!(outcome, Outcome::Moved { .. }));
            Ok(outcome.to_string())
        }
        Err(err) if err.is_user_recoverable() => Ok(err.to_string()),
        Err(err) => Err(err.to_string()),
    }
}

/// Search the whole hierarchy for a raw barcode.
pub fn search_item(
    state: &AppState,
    raw: &str,
    prompt: &mut dyn LinePrompt,
    feedback: &mut dyn FeedbackSink,
) -> Result<String, String> {
    let Some(item) = resolve(raw, prompt) else {
        return Ok("Scan abandoned.".to_string());
    };
    let service = lock_service(&state.service);
    match service.find(&item) {
        Ok(Some(path)) => {
            feedback.item_located(true);
            Ok(format!(
                "Found in {} > {} > {}",
                path.location, path.shelf, path.nested_shelf
            ))
        }
        Ok(None) => {
            feedback.item_located(false);
            Ok("Item not found.".to_string())
        }
        Err(err) => Err(err.to_string()),
    }
}

pub fn list_locations(state: &AppState) -> Result<Vec<String>, String> {
    let service = lock_service(&state.service);
    let doc = service.snapshot().map_err(|e| e.to_string())?;
    Ok(doc.location_names().into_iter().map(str::to_string).collect())
}

pub fn list_shelves(state: &AppState, location: &str) -> Result<Vec<String>, String> {
    listing(state, |doc| {
        doc.shelf_names(location)
            .map(|names| names.into_iter().map(str::to_string).collect())
    })
}

pub fn list_nested_shelves(
    state: &AppState,
    location: &str,
    shelf: &str,
) -> Result<Vec<String>, String> {
    listing(state, |doc| {
        doc.nested_shelf_names(location, shelf)
            .map(|names| names.into_iter().map(str::to_string).collect())
    })
}

pub fn list_items(
    state: &AppState,
    location: &str,
    shelf: &str,
    nested: &str,
) -> Result<Vec<String>, String> {
    listing(state, |doc| {
        doc.items(location, shelf, nested)
            .map(|items| items.iter().map(ToString::to_string).collect())
    })
}

/// Create the inventory file when it does not exist yet.
pub fn init_store(state: &AppState) -> Result<String, String> {
    let service = lock_service(&state.service);
    match service.init_store() {
        Ok(true) => Ok("Inventory file created.".to_string()),
        Ok(false) => Ok("Inventory file already exists.".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

/// Back up the current inventory file and reset it to the empty schema.
pub fn backup_then_reset(state: &AppState) -> Result<String, String> {
    let service = lock_service(&state.service);
    service
        .backup_then_reset()
        .map(|_| "Inventory backed up and reset.".to_string())
        .map_err(|err| err.to_string())
}

fn listing(
    state: &AppState,
    read: impl FnOnce(&InventoryDoc) -> DomainResult<Vec<String>>,
) -> Result<Vec<String>, String> {
    let service = lock_service(&state.service);
    let doc = service.snapshot().map_err(|e| e.to_string())?;
    read(&doc).map_err(|e| OpError::from(e).to_string())
}

fn resolve(raw: &str, prompt: &mut dyn LinePrompt) -> Option<ItemId> {
    match normalize(raw) {
        Normalized::Complete(item) => Some(item),
        Normalized::NeedsLineNumber(pending) => {
            let line = prompt.request_line_number(pending.order_number())?;
            Some(pending.complete(&line))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelftrack_scan::{FnPrompt, SilentFeedback};

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        AppState::new(dir.path().join("inventory.json"))
    }

    fn no_prompt() -> FnPrompt<fn(&str) -> Option<String>> {
        FnPrompt(|_| panic!("prompt not expected"))
    }

    #[test]
    fn commands_report_status_text_for_recoverable_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        assert_eq!(
            add_location(&state, "Warehouse").unwrap(),
            "Location 'Warehouse' added."
        );
        assert_eq!(
            add_location(&state, "Warehouse").unwrap(),
            "location 'Warehouse' already exists"
        );
        assert_eq!(
            remove_location(&state, "Depot").unwrap(),
            "location 'Depot' does not exist"
        );
    }

    #[test]
    fn file_and_search_flow() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        add_location(&state, "Warehouse").unwrap();
        add_shelf(&state, "Warehouse", "Rack1").unwrap();
        add_nested_shelf(&state, "Warehouse", "Rack1", "BinA").unwrap();

        let target = ItemPath::new("Warehouse", "Rack1", "BinA");
        let status = file_item(
            &state,
            "1234567890-1",
            &target,
            &mut no_prompt(),
            &mut SilentFeedback,
        )
        .unwrap();
        assert!(status.contains("added to"));

        assert_eq!(
            search_item(&state, "1234567890-1", &mut no_prompt(), &mut SilentFeedback).unwrap(),
            "Found in Warehouse > Rack1 > BinA"
        );
        assert_eq!(
            search_item(&state, "0000000000-0", &mut no_prompt(), &mut SilentFeedback).unwrap(),
            "Item not found."
        );
    }

    #[test]
    fn search_prompts_for_missing_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        add_location(&state, "Warehouse").unwrap();
        add_shelf(&state, "Warehouse", "Rack1").unwrap();
        add_nested_shelf(&state, "Warehouse", "Rack1", "BinA").unwrap();
        let target = ItemPath::new("Warehouse", "Rack1", "BinA");
        file_item(&state, "1234567890-7", &target, &mut no_prompt(), &mut SilentFeedback).unwrap();

        let mut prompt = FnPrompt(|order: &str| {
            assert_eq!(order, "1234567890");
            Some("7".to_string())
        });
        assert_eq!(
            search_item(&state, "12345678909999", &mut prompt, &mut SilentFeedback).unwrap(),
            "Found in Warehouse > Rack1 > BinA"
        );
    }

    #[test]
    fn abandoned_prompt_files_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        add_location(&state, "Warehouse").unwrap();
        add_shelf(&state, "Warehouse", "Rack1").unwrap();
        add_nested_shelf(&state, "Warehouse", "Rack1", "BinA").unwrap();

        let mut abandon = FnPrompt(|_: &str| -> Option<String> { None });
        let target = ItemPath::new("Warehouse", "Rack1", "BinA");
        assert_eq!(
            file_item(&state, "9999999999", &target, &mut abandon, &mut SilentFeedback).unwrap(),
            "Scan abandoned."
        );
        assert_eq!(
            list_items(&state, "Warehouse", "Rack1", "BinA").unwrap(),
            Vec::<String>::new()
        );
    }

    #[test]
    fn missing_target_is_fatal_for_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let target = ItemPath::new("Warehouse", "Rack1", "BinZ");
        let err = file_item(
            &state,
            "1234567890-1",
            &target,
            &mut no_prompt(),
            &mut SilentFeedback,
        )
        .unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn listings_mirror_the_persisted_hierarchy() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        add_location(&state, "Warehouse").unwrap();
        add_location(&state, "Annex").unwrap();
        add_shelf(&state, "Warehouse", "Rack1").unwrap();
        add_nested_shelf(&state, "Warehouse", "Rack1", "BinA").unwrap();

        assert_eq!(list_locations(&state).unwrap(), vec!["Annex", "Warehouse"]);
        assert_eq!(list_shelves(&state, "Warehouse").unwrap(), vec!["Rack1"]);
        assert_eq!(
            list_nested_shelves(&state, "Warehouse", "Rack1").unwrap(),
            vec!["BinA"]
        );
        assert!(list_shelves(&state, "Depot").is_err());
    }

    #[test]
    fn init_and_reset_commands_manage_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        assert_eq!(init_store(&state).unwrap(), "Inventory file created.");
        assert_eq!(init_store(&state).unwrap(), "Inventory file already exists.");

        add_location(&state, "Warehouse").unwrap();
        assert_eq!(
            backup_then_reset(&state).unwrap(),
            "Inventory backed up and reset."
        );
        assert_eq!(list_locations(&state).unwrap(), Vec::<String>::new());
    }
}
