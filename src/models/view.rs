// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Display structures derived from a type list. Never persisted.

use serde::Serialize;

/// One human-readable row of a type list description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DescriptionEntry {
    pub description: String,
    /// Space-separated, sorted extensions covered by this row.
    pub extensions: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Descriptions {
    pub hasdescriptions: bool,
    pub descriptions: Vec<DescriptionEntry>,
}

/// A selectable extension inside a browser group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrowserTypeNode {
    pub key: String,
    pub name: String,
    pub selected: bool,
    pub ext: String,
}

/// A group of extensions as shown by a type picker.
///
/// The pseudo groups use reserved keys: `*` for "All file types" and the
/// empty string for "Other files".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrowserGroupNode {
    pub key: String,
    pub name: String,
    pub selectable: bool,
    pub selected: bool,
    /// Space-separated member extensions.
    pub ext: String,
    pub expanded: bool,
    pub types: Vec<BrowserTypeNode>,
}

impl BrowserGroupNode {
    pub const ANY_KEY: &'static str = "*";
    pub const OTHERS_KEY: &'static str = "";

    pub fn is_others(&self) -> bool {
        self.key == Self::OTHERS_KEY
    }
}
