//! The persisted inventory document and its mutations.
//!
//! Three-level hierarchy: location → shelf → nested shelf → items.
//! All mutations are pure in-memory edits; persistence is the store
//! layer's concern. Failed mutations leave the document untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::item::{ItemId, ItemPath};

/// Root persisted entity. The `locations` key is always serialized, even
/// when empty, so the on-disk schema is `{"locations": {}}` at minimum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDoc {
    pub locations: BTreeMap<String, LocationNode>,
}

/// Shelves within one location, keyed by shelf name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationNode {
    pub shelves: BTreeMap<String, ShelfNode>,
}

/// Nested shelves within one shelf, keyed by nested-shelf name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelfNode {
    pub nested: BTreeMap<String, NestedShelfNode>,
}

/// Item identifiers on one nested shelf, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedShelfNode {
    pub items: Vec<ItemId>,
}

/// Successful mutation outcome, rendered as user-facing status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    LocationAdded { location: String },
    LocationRemoved { location: String },
    ShelfAdded { location: String, shelf: String },
    ShelfRemoved { location: String, shelf: String },
    NestedShelfAdded { location: String, shelf: String, nested: String },
    NestedShelfRemoved { location: String, shelf: String, nested: String },
    Cleared { location: String, shelf: String, nested: String },
    /// Informational: the nested shelf was already empty.
    NoItemsToClear { location: String, shelf: String, nested: String },
    /// The item existed elsewhere and was relocated.
    Moved { item: ItemId, from: ItemPath, to: ItemPath },
    /// The item was not on record anywhere; filed fresh at the target.
    Filed { item: ItemId, to: ItemPath },
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LocationAdded { location } => {
                write!(f, "Location '{location}' added.")
            }
            Self::LocationRemoved { location } => {
                write!(f, "Location '{location}' removed.")
            }
            Self::ShelfAdded { location, shelf } => {
                write!(f, "Shelf '{shelf}' added to '{location}'.")
            }
            Self::ShelfRemoved { location, shelf } => {
                write!(f, "Shelf '{shelf}' removed from '{location}'.")
            }
            Self::NestedShelfAdded { shelf, nested, .. } => {
                write!(f, "Nested shelf '{nested}' added to '{shelf}'.")
            }
            Self::NestedShelfRemoved { shelf, nested, .. } => {
                write!(f, "Nested shelf '{nested}' removed from '{shelf}'.")
            }
            Self::Cleared { shelf, nested, .. } => {
                write!(f, "Cleared all items from '{nested}' in '{shelf}'.")
            }
            Self::NoItemsToClear { shelf, nested, .. } => {
                write!(f, "No items to clear in '{nested}' in '{shelf}'.")
            }
            Self::Moved { item, from, to } => {
                write!(f, "Item '{item}' moved from {from} to {to}.")
            }
            Self::Filed { item, to } => {
                write!(f, "Item '{item}' added to {to}.")
            }
        }
    }
}

impl InventoryDoc {
    // ----- hierarchy editor -----

    pub fn add_location(&mut self, name: &str) -> DomainResult<Outcome> {
        if self.locations.contains_key(name) {
            return Err(DomainError::already_exists(format!("location '{name}'")));
        }
        self.locations.insert(name.to_string(), LocationNode::default());
        Ok(Outcome::LocationAdded { location: name.to_string() })
    }

    /// Remove a location and everything underneath it.
    pub fn remove_location(&mut self, name: &str) -> DomainResult<Outcome> {
        if self.locations.remove(name).is_none() {
            return Err(DomainError::not_found(format!("location '{name}'")));
        }
        Ok(Outcome::LocationRemoved { location: name.to_string() })
    }

    pub fn add_shelf(&mut self, location: &str, shelf: &str) -> DomainResult<Outcome> {
        let node = self.location_mut(location)?;
        if node.shelves.contains_key(shelf) {
            return Err(DomainError::already_exists(format!(
                "shelf '{shelf}' in '{location}'"
            )));
        }
        node.shelves.insert(shelf.to_string(), ShelfNode::default());
        Ok(Outcome::ShelfAdded {
            location: location.to_string(),
            shelf: shelf.to_string(),
        })
    }

    /// Remove a shelf and its nested shelves/items.
    pub fn remove_shelf(&mut self, location: &str, shelf: &str) -> DomainResult<Outcome> {
        let node = self.location_mut(location)?;
        if node.shelves.remove(shelf).is_none() {
            return Err(DomainError::not_found(format!(
                "shelf '{shelf}' in '{location}'"
            )));
        }
        Ok(Outcome::ShelfRemoved {
            location: location.to_string(),
            shelf: shelf.to_string(),
        })
    }

    pub fn add_nested_shelf(
        &mut self,
        location: &str,
        shelf: &str,
        nested: &str,
    ) -> DomainResult<Outcome> {
        let node = self.shelf_mut(location, shelf)?;
        if node.nested.contains_key(nested) {
            return Err(DomainError::already_exists(format!(
                "nested shelf '{nested}' in '{shelf}'"
            )));
        }
        node.nested.insert(nested.to_string(), NestedShelfNode::default());
        Ok(Outcome::NestedShelfAdded {
            location: location.to_string(),
            shelf: shelf.to_string(),
            nested: nested.to_string(),
        })
    }

    /// Remove a nested shelf and its items.
    pub fn remove_nested_shelf(
        &mut self,
        location: &str,
        shelf: &str,
        nested: &str,
    ) -> DomainResult<Outcome> {
        let node = self.shelf_mut(location, shelf)?;
        if node.nested.remove(nested).is_none() {
            return Err(DomainError::not_found(format!(
                "nested shelf '{nested}' in '{shelf}'"
            )));
        }
        Ok(Outcome::NestedShelfRemoved {
            location: location.to_string(),
            shelf: shelf.to_string(),
            nested: nested.to_string(),
        })
    }

    /// Empty a nested shelf in place, keeping the shelf itself.
    pub fn clear_nested_shelf(
        &mut self,
        location: &str,
        shelf: &str,
        nested: &str,
    ) -> DomainResult<Outcome> {
        let node = self.nested_mut(location, shelf, nested)?;
        if node.items.is_empty() {
            return Ok(Outcome::NoItemsToClear {
                location: location.to_string(),
                shelf: shelf.to_string(),
                nested: nested.to_string(),
            });
        }
        node.items.clear();
        Ok(Outcome::Cleared {
            location: location.to_string(),
            shelf: shelf.to_string(),
            nested: nested.to_string(),
        })
    }

    // ----- locator / relocator -----

    /// Linear scan for an item; first match wins. At most one occurrence
    /// is expected, since [`Self::file_item`] removes prior occurrences.
    pub fn find(&self, item: &ItemId) -> Option<ItemPath> {
        for (location, shelves) in &self.locations {
            for (shelf, nested_shelves) in &shelves.shelves {
                for (nested, node) in &nested_shelves.nested {
                    if node.items.contains(item) {
                        return Some(ItemPath::new(location, shelf, nested));
                    }
                }
            }
        }
        None
    }

    /// Remove the first occurrence of an item, returning where it was.
    pub fn remove_item(&mut self, item: &ItemId) -> Option<ItemPath> {
        for (location, shelves) in &mut self.locations {
            for (shelf, nested_shelves) in &mut shelves.shelves {
                for (nested, node) in &mut nested_shelves.nested {
                    if let Some(pos) = node.items.iter().position(|i| i == item) {
                        node.items.remove(pos);
                        return Some(ItemPath::new(location, shelf, nested));
                    }
                }
            }
        }
        None
    }

    /// File an item at the target nested shelf, removing any prior
    /// occurrence anywhere in the hierarchy first.
    ///
    /// The target must already exist (created through the editor); a
    /// missing target fails before any mutation. The removal scan covers
    /// the target itself, so re-filing an item into its current shelf
    /// keeps a single copy.
    pub fn file_item(&mut self, item: ItemId, target: &ItemPath) -> DomainResult<Outcome> {
        if !self.has_nested_shelf(target) {
            return Err(DomainError::missing_target(target.to_string()));
        }
        let prior = self.remove_item(&item);
        // has_nested_shelf above makes this lookup infallible
        let node = self.nested_mut(&target.location, &target.shelf, &target.nested_shelf)?;
        node.items.push(item.clone());
        Ok(match prior {
            Some(from) => Outcome::Moved { item, from, to: target.clone() },
            None => Outcome::Filed { item, to: target.clone() },
        })
    }

    // ----- read-only accessors for display surfaces -----

    pub fn location_names(&self) -> Vec<&str> {
        self.locations.keys().map(String::as_str).collect()
    }

    pub fn shelf_names(&self, location: &str) -> DomainResult<Vec<&str>> {
        let node = self.location_ref(location)?;
        Ok(node.shelves.keys().map(String::as_str).collect())
    }

    pub fn nested_shelf_names(&self, location: &str, shelf: &str) -> DomainResult<Vec<&str>> {
        let node = self.shelf_ref(location, shelf)?;
        Ok(node.nested.keys().map(String::as_str).collect())
    }

    pub fn items(&self, location: &str, shelf: &str, nested: &str) -> DomainResult<&[ItemId]> {
        let location_node = self.location_ref(location)?;
        let shelf_node = location_node.shelves.get(shelf).ok_or_else(|| {
            DomainError::not_found(format!("shelf '{shelf}' in '{location}'"))
        })?;
        let node = shelf_node.nested.get(nested).ok_or_else(|| {
            DomainError::not_found(format!("nested shelf '{nested}' in '{shelf}'"))
        })?;
        Ok(&node.items)
    }

    pub fn has_nested_shelf(&self, path: &ItemPath) -> bool {
        self.locations
            .get(&path.location)
            .and_then(|l| l.shelves.get(&path.shelf))
            .is_some_and(|s| s.nested.contains_key(&path.nested_shelf))
    }

    // ----- lookup helpers -----

    fn location_ref(&self, location: &str) -> DomainResult<&LocationNode> {
        self.locations
            .get(location)
            .ok_or_else(|| DomainError::not_found(format!("location '{location}'")))
    }

    fn location_mut(&mut self, location: &str) -> DomainResult<&mut LocationNode> {
        self.locations
            .get_mut(location)
            .ok_or_else(|| DomainError::not_found(format!("location '{location}'")))
    }

    fn shelf_ref(&self, location: &str, shelf: &str) -> DomainResult<&ShelfNode> {
        self.location_ref(location)?
            .shelves
            .get(shelf)
            .ok_or_else(|| DomainError::not_found(format!("shelf '{shelf}' in '{location}'")))
    }

    fn shelf_mut(&mut self, location: &str, shelf: &str) -> DomainResult<&mut ShelfNode> {
        self.location_mut(location)?
            .shelves
            .get_mut(shelf)
            .ok_or_else(|| DomainError::not_found(format!("shelf '{shelf}' in '{location}'")))
    }

    fn nested_mut(
        &mut self,
        location: &str,
        shelf: &str,
        nested: &str,
    ) -> DomainResult<&mut NestedShelfNode> {
        self.shelf_mut(location, shelf)?
            .nested
            .get_mut(nested)
            .ok_or_else(|| DomainError::not_found(format!("nested shelf '{nested}' in '{shelf}'")))
    }
}
