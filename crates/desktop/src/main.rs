//! Minimal console frontend.
//!
//! Stdin doubles as the manual acquisition source and the line-number
//! prompt; the found/not-found feedback signal is echoed as text. A
//! touchscreen frontend would call the same [`shelftrack_desktop::commands`]
//! functions.

use std::io::{self, Write};

use anyhow::Context;
use shelftrack_core::ItemPath;
use shelftrack_desktop::{commands, AppState};
use shelftrack_scan::{FeedbackSink, LinePrompt};

const DEFAULT_STORE: &str = "inventory.json";

fn main() -> anyhow::Result<()> {
    shelftrack_observability::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_STORE.to_string());
    tracing::info!(path, "starting shelftrack console");
    let state = AppState::new(&path);
    println!("shelftrack — inventory file: {path}");
    println!("Type 'help' for commands.");

    loop {
        let Some(line) = read_line("> ").context("failed reading stdin")? else {
            break;
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if matches!(tokens[0], "quit" | "exit") {
            break;
        }
        match dispatch(&state, &tokens) {
            Ok(status) => println!("{status}"),
            Err(err) => eprintln!("error: {err}"),
        }
    }
    Ok(())
}

fn dispatch(state: &AppState, tokens: &[&str]) -> Result<String, String> {
    let mut prompt = StdinPrompt;
    let mut feedback = ConsoleFeedback;
    match tokens {
        ["help"] => Ok(HELP.to_string()),
        ["locations"] => commands::list_locations(state).map(render_names),
        ["shelves", location] => commands::list_shelves(state, location).map(render_names),
        ["bins", location, shelf] => {
            commands::list_nested_shelves(state, location, shelf).map(render_names)
        }
        ["items", location, shelf, bin] => {
            commands::list_items(state, location, shelf, bin).map(render_names)
        }
        ["add-location", name] => commands::add_location(state, name),
        ["remove-location", name] => commands::remove_location(state, name),
        ["add-shelf", location, shelf] => commands::add_shelf(state, location, shelf),
        ["remove-shelf", location, shelf] => commands::remove_shelf(state, location, shelf),
        ["add-bin", location, shelf, bin] => {
            commands::add_nested_shelf(state, location, shelf, bin)
        }
        ["remove-bin", location, shelf, bin] => {
            commands::remove_nested_shelf(state, location, shelf, bin)
        }
        ["clear-bin", location, shelf, bin] => {
            commands::clear_nested_shelf(state, location, shelf, bin)
        }
        ["file", location, shelf, bin, barcode] => {
            let target = ItemPath::new(*location, *shelf, *bin);
            commands::file_item(state, barcode, &target, &mut prompt, &mut feedback)
        }
        ["find", barcode] => commands::search_item(state, barcode, &mut prompt, &mut feedback),
        ["init"] => commands::init_store(state),
        ["reset"] => commands::backup_then_reset(state),
        _ => Err(format!("unknown command: {}", tokens.join(" "))),
    }
}

fn render_names(names: Vec<String>) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join("\n")
    }
}

/// Reads the line number from stdin. EOF abandons the scan; an empty
/// entry is accepted as-is.
struct StdinPrompt;

impl LinePrompt for StdinPrompt {
    fn request_line_number(&mut self, order_number: &str) -> Option<String> {
        read_line(&format!("Line number for order '{order_number}': "))
            .ok()
            .flatten()
    }
}

/// Text stand-in for the audio feedback of the touchscreen app.
struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn item_located(&mut self, found: bool) {
        if found {
            println!("[beep: found]");
        } else {
            println!("[beep: not found]");
        }
    }
}

fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let read = io::stdin().read_line(&mut buf)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}

const HELP: &str = "\
Commands:
  locations                              list locations
  shelves <location>                     list shelves
  bins <location> <shelf>                list nested shelves
  items <location> <shelf> <bin>         list items on a nested shelf
  add-location <name>
  remove-location <name>
  add-shelf <location> <shelf>
  remove-shelf <location> <shelf>
  add-bin <location> <shelf> <bin>
  remove-bin <location> <shelf> <bin>
  clear-bin <location> <shelf> <bin>
  file <location> <shelf> <bin> <barcode>   file/move an item
  find <barcode>                            locate an item
  init                                      create the inventory file
  reset                                     back up, then reset to empty
  quit";
