// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! File type registry: known extensions, their MIME types and the named
//! groups they belong to.
//!
//! A registry is an immutable value. It is built once from a
//! [`RegistryDefinition`] (usually the embedded JSON table) and then shared by
//! reference, so every classifier sees the same data without any global cache.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::FiletypesError;
use crate::models::token::is_separator;
use crate::utils::file_icons::UNKNOWN_ICON;
use crate::utils::mimetype::looks_like_mimetype;

/// Embedded default table.
const BUILTIN_REGISTRY: &str = include_str!("../../data/filetypes.json");

/// Localized labels for the pseudo entries the classifier produces.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Labels {
    /// Description of the `*` wildcard ("All file types").
    pub any: String,
    /// Name of the browser node holding ungrouped extensions.
    pub others: String,
    /// Description of an extension nobody registered.
    pub unknown: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            any: "All file types".to_string(),
            others: "Other files".to_string(),
            unknown: "File".to_string(),
        }
    }
}

/// Serialized form of a registry.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RegistryDefinition {
    #[serde(default)]
    pub labels: Labels,
    /// Extension reserved for "unknown" files; never offered in the browser.
    #[serde(default)]
    pub reserved: Option<String>,
    /// Groups in display order.
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeDefinition {
    pub extension: String,
    pub mimetype: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single registered extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileTypeEntry {
    /// Canonical dotted, lowercase form (`.tar.gz`).
    pub extension: String,
    pub mimetype: String,
    pub icon: String,
    /// Names of every group this extension belongs to.
    pub groups: Vec<String>,
    pub description: String,
}

/// A named set of extensions and MIME types.
///
/// Groups overlap freely: `.gif` is a member of `image`, `web_image` and
/// `optimised_image` at the same time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiletypeGroup {
    pub name: String,
    pub description: String,
    /// Member extensions in registry order.
    pub extensions: Vec<String>,
    /// MIME types of the member extensions, first-seen order.
    pub mimetypes: Vec<String>,
}

impl FiletypeGroup {
    pub fn contains_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }
}

/// Immutable lookup tables built from a [`RegistryDefinition`].
#[derive(Clone, Debug)]
pub struct Registry {
    labels: Labels,
    reserved: Option<String>,
    entries: Vec<FileTypeEntry>,
    by_extension: HashMap<String, usize>,
    groups: Vec<FiletypeGroup>,
    group_index: HashMap<String, usize>,
}

impl Registry {
    /// Build the registry shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded table itself is broken.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_REGISTRY).context("Built-in file type registry is invalid")
    }

    /// Parse and validate a registry from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON does not match [`RegistryDefinition`] or
    /// the definition fails validation (see [`Registry::from_definition`]).
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: RegistryDefinition =
            serde_json::from_str(json).context("Failed to parse file type registry JSON")?;
        Ok(Self::from_definition(definition)?)
    }

    /// Load a registry JSON file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid registry.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file type registry {:?}", path))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to load file type registry {:?}", path))
    }

    /// Validate a definition and derive the lookup tables.
    ///
    /// Extensions are canonicalized to a lowercase dotted form and group
    /// names to lowercase. Group membership is derived from each type's
    /// `groups` list.
    ///
    /// # Errors
    ///
    /// - a group is declared twice or has an empty name;
    /// - a group name is shaped like a MIME type or contains list separators
    ///   or wildcards, so no type list could refer to it;
    /// - an extension is empty or registered twice;
    /// - a type has an empty MIME type;
    /// - a type references a group that was never declared.
    pub fn from_definition(
        definition: RegistryDefinition,
    ) -> std::result::Result<Self, FiletypesError> {
        let RegistryDefinition {
            labels,
            reserved,
            groups: group_defs,
            types,
        } = definition;

        let reserved = match reserved {
            Some(raw) => Some(canonical_extension(&raw).ok_or_else(|| {
                FiletypesError::Registry(format!("Reserved extension {raw:?} is empty"))
            })?),
            None => None,
        };

        let mut groups = Vec::with_capacity(group_defs.len());
        let mut group_index = HashMap::new();
        for def in group_defs {
            let name = def.name.trim().to_lowercase();
            if name.is_empty() {
                return Err(FiletypesError::Registry(
                    "Group with an empty name".to_string(),
                ));
            }
            if looks_like_mimetype(&name)
                || name.contains(|c: char| is_separator(c) || c == '*' || c == '?')
            {
                return Err(FiletypesError::Registry(format!(
                    "Group name {name:?} cannot appear in a type list"
                )));
            }
            if group_index.insert(name.clone(), groups.len()).is_some() {
                return Err(FiletypesError::Registry(format!(
                    "Group {name:?} is declared more than once"
                )));
            }
            groups.push(FiletypeGroup {
                name,
                description: def.description,
                extensions: Vec::new(),
                mimetypes: Vec::new(),
            });
        }

        let mut entries: Vec<FileTypeEntry> = Vec::with_capacity(types.len());
        let mut by_extension = HashMap::with_capacity(types.len());
        for def in types {
            let extension = canonical_extension(&def.extension).ok_or_else(|| {
                FiletypesError::Registry(format!("Extension {:?} is empty", def.extension))
            })?;
            if by_extension.contains_key(&extension) {
                return Err(FiletypesError::Registry(format!(
                    "Extension {extension} is registered more than once"
                )));
            }

            let mimetype = def.mimetype.trim().to_ascii_lowercase();
            if mimetype.is_empty() {
                return Err(FiletypesError::Registry(format!(
                    "Extension {extension} has no MIME type"
                )));
            }

            let member_of: Vec<String> = def
                .groups
                .iter()
                .map(|g| g.trim().to_lowercase())
                .collect();
            for group_name in &member_of {
                let idx = *group_index.get(group_name).ok_or_else(|| {
                    FiletypesError::Registry(format!(
                        "Extension {extension} references undeclared group {group_name:?}"
                    ))
                })?;
                let group = &mut groups[idx];
                if !group.contains_extension(&extension) {
                    group.extensions.push(extension.clone());
                }
                if !group.mimetypes.contains(&mimetype) {
                    group.mimetypes.push(mimetype.clone());
                }
            }

            by_extension.insert(extension.clone(), entries.len());
            entries.push(FileTypeEntry {
                extension,
                mimetype,
                icon: def
                    .icon
                    .filter(|i| !i.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ICON.to_string()),
                groups: member_of,
                description: def
                    .description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| labels.unknown.clone()),
            });
        }

        debug!(
            entries = entries.len(),
            groups = groups.len(),
            "Built file type registry"
        );

        Ok(Self {
            labels,
            reserved,
            entries,
            by_extension,
            groups,
            group_index,
        })
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Exact, case-sensitive group lookup.
    pub fn group(&self, name: &str) -> Option<&FiletypeGroup> {
        self.group_index.get(name).map(|&idx| &self.groups[idx])
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> &[FiletypeGroup] {
        &self.groups
    }

    /// Look up an extension, with or without its leading dot.
    pub fn entry(&self, extension: &str) -> Option<&FileTypeEntry> {
        let key = canonical_extension(extension)?;
        self.by_extension.get(&key).map(|&idx| &self.entries[idx])
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[FileTypeEntry] {
        &self.entries
    }

    /// Find the entry for a file name, preferring the longest registered
    /// suffix (`backup.tar.gz` resolves to `.tar.gz`, not `.gz`).
    pub fn entry_for_filename(&self, filename: &str) -> Option<&FileTypeEntry> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename)
            .to_lowercase();

        name.char_indices()
            .filter(|&(idx, c)| c == '.' && idx > 0)
            .find_map(|(idx, _)| self.by_extension.get(&name[idx..]))
            .map(|&idx| &self.entries[idx])
    }

    /// Every extension whose registered MIME type equals `mimetype`.
    pub fn extensions_for_mimetype(&self, mimetype: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.mimetype.eq_ignore_ascii_case(mimetype))
            .map(|e| e.extension.as_str())
            .collect()
    }

    /// Description of the first entry registered under `mimetype`.
    pub fn mimetype_description(&self, mimetype: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.mimetype.eq_ignore_ascii_case(mimetype))
            .map(|e| e.description.as_str())
    }

    /// The reserved "unknown" extension, dotted.
    pub fn reserved_extension(&self) -> Option<&str> {
        self.reserved.as_deref()
    }

    pub fn is_reserved(&self, extension: &str) -> bool {
        self.reserved.as_deref() == Some(extension)
    }
}

/// Lowercase, single leading dot; `None` when nothing is left.
fn canonical_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.').to_lowercase();
    if trimmed.is_empty() {
        None
    } else {
        Some(format!(".{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{GroupDefinition, Registry, RegistryDefinition, TypeDefinition};
    use crate::error::FiletypesError;

    fn type_def(extension: &str, mimetype: &str, groups: &[&str]) -> TypeDefinition {
        TypeDefinition {
            extension: extension.to_string(),
            mimetype: mimetype.to_string(),
            icon: None,
            groups: groups.iter().map(|g| g.to_string()).collect(),
            description: None,
        }
    }

    fn group_def(name: &str) -> GroupDefinition {
        GroupDefinition {
            name: name.to_string(),
            description: name.to_string(),
        }
    }

    #[test]
    fn builtin_registry_loads_groups_with_members() {
        let registry = Registry::builtin().unwrap();
        let audio = registry.group("audio").expect("audio group");
        assert!(audio.contains_extension(".mp3"));
        assert!(audio.mimetypes.iter().any(|m| m == "audio/mp3"));
        assert_eq!(registry.reserved_extension(), Some(".xxx"));
    }

    // Group lookup is exact and a miss is a plain `None`.
    #[test]
    fn group_lookup_misses_are_not_errors() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.group(".gif").is_none());
        assert!(registry.group("somethingveryunlikelytoeverexist").is_none());
        assert!(registry.group("AUDIO").is_none());
    }

    // An extension may belong to several overlapping groups.
    #[test]
    fn builtin_registry_models_multi_membership() {
        let registry = Registry::builtin().unwrap();
        let gif = registry.entry("gif").unwrap();
        for group in ["image", "web_image", "optimised_image"] {
            assert!(gif.groups.iter().any(|g| g == group));
            assert!(registry.group(group).unwrap().contains_extension(".gif"));
        }
    }

    #[test]
    fn extensions_for_mimetype_collects_every_match() {
        let registry = Registry::builtin().unwrap();
        let exts = registry.extensions_for_mimetype("image/jpeg");
        assert_eq!(exts, vec![".jpe", ".jpeg", ".jpg"]);
        assert!(registry.extensions_for_mimetype("foo/bar").is_empty());
        assert_eq!(registry.mimetype_description("text/plain"), Some("Text file"));
    }

    // The longest registered suffix wins for compound extensions.
    #[test]
    fn entry_for_filename_prefers_compound_extensions() {
        let registry = Registry::builtin().unwrap();
        let entry = registry.entry_for_filename("dir/Backup.TAR.GZ").unwrap();
        assert_eq!(entry.extension, ".tar.gz");
        assert_eq!(
            registry.entry_for_filename("my.notes.txt").unwrap().extension,
            ".txt"
        );
        assert!(registry.entry_for_filename(".bashrc").is_none());
        assert!(registry.entry_for_filename("README").is_none());
    }

    #[test]
    fn from_definition_rejects_duplicate_extensions() {
        let definition = RegistryDefinition {
            types: vec![
                type_def("odt", "application/x-a", &[]),
                type_def(".ODT", "application/x-b", &[]),
            ],
            ..Default::default()
        };
        let err = Registry::from_definition(definition).unwrap_err();
        assert!(matches!(err, FiletypesError::Registry(msg) if msg.contains(".odt")));
    }

    #[test]
    fn from_definition_rejects_undeclared_groups() {
        let definition = RegistryDefinition {
            types: vec![type_def("odt", "application/x-a", &["document"])],
            ..Default::default()
        };
        assert!(Registry::from_definition(definition).is_err());
    }

    // Group names are folded to lowercase so type lists can refer to them.
    #[test]
    fn from_definition_lowercases_group_names() {
        let definition = RegistryDefinition {
            groups: vec![group_def("WebPics")],
            types: vec![type_def("png", "image/png", &["WEBPICS"])],
            ..Default::default()
        };
        let registry = Registry::from_definition(definition).unwrap();
        assert!(registry.group("webpics").unwrap().contains_extension(".png"));
        assert_eq!(registry.entry("png").unwrap().groups, vec!["webpics"]);
    }

    #[test]
    fn from_definition_rejects_unreachable_group_names() {
        for name in ["image/web", "web pics", "docs,text", "pic*"] {
            let definition = RegistryDefinition {
                groups: vec![group_def(name)],
                ..Default::default()
            };
            let err = Registry::from_definition(definition).unwrap_err();
            assert!(matches!(err, FiletypesError::Registry(_)), "accepted {name:?}");
        }
    }

    #[test]
    fn from_definition_rejects_empty_group_names() {
        let definition = RegistryDefinition {
            groups: vec![group_def("  ")],
            ..Default::default()
        };
        let err = Registry::from_definition(definition).unwrap_err();
        assert!(matches!(err, FiletypesError::Registry(msg) if msg.contains("empty name")));
    }

    #[test]
    fn from_definition_rejects_empty_mimetypes() {
        let definition = RegistryDefinition {
            types: vec![type_def("odt", " ", &[])],
            ..Default::default()
        };
        let err = Registry::from_definition(definition).unwrap_err();
        assert!(matches!(err, FiletypesError::Registry(msg) if msg.contains("no MIME type")));
    }

    // Missing descriptions and icons fall back to the generic labels.
    #[test]
    fn from_json_fills_defaults() {
        let json = r#"{
            "groups": [{"name": "docs", "description": "Docs"}],
            "types": [{"extension": "ABC", "mimetype": "Text/X-Abc", "groups": ["docs"]}]
        }"#;
        let registry = Registry::from_json(json).unwrap();
        let entry = registry.entry(".abc").unwrap();
        assert_eq!(entry.mimetype, "text/x-abc");
        assert_eq!(entry.description, "File");
        assert_eq!(entry.icon, "unknown");
        assert_eq!(registry.group("docs").unwrap().extensions, vec![".abc"]);
        assert_eq!(registry.reserved_extension(), None);
    }

    #[test]
    fn from_path_reads_registry_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"groups": [], "types": [{{"extension": "zz", "mimetype": "x/zz"}}]}}"#
        )
        .unwrap();

        let registry = Registry::from_path(file.path()).unwrap();
        assert!(registry.entry("zz").is_some());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read file type registry"));
    }
}
