//! Item identity types.

use serde::{Deserialize, Serialize};

/// Compound item identifier: `<order number>-<line number>`.
///
/// Every identifier that reaches the store is in this form; raw scans are
/// turned into it by [`crate::barcode::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap text already in compound form.
    ///
    /// The parts are deliberately not validated: the separator rule in
    /// [`crate::barcode`] is the only shape check the system performs.
    pub fn from_compound(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Full path of a nested shelf within the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPath {
    pub location: String,
    pub shelf: String,
    pub nested_shelf: String,
}

impl ItemPath {
    pub fn new(
        location: impl Into<String>,
        shelf: impl Into<String>,
        nested_shelf: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            shelf: shelf.into(),
            nested_shelf: nested_shelf.into(),
        }
    }
}

impl core::fmt::Display for ItemPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "'{}' in '{}' at '{}'",
            self.nested_shelf, self.shelf, self.location
        )
    }
}
