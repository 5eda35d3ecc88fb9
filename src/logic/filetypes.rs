// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Normalization, expansion and membership checks for file type lists.
//!
//! A type list is whatever an administrator typed into an "accepted file
//! types" setting: bare or dotted extensions, `*.ext` globs, MIME types, group
//! names, or `*` for anything. Every operation first runs the input through
//! the tokenizer and then dispatches on [`TypeToken`].

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::models::registry::{FiletypeGroup, Registry};
use crate::models::token::{TypeInput, TypeToken};
use crate::utils::{fallback_icon, looks_like_mimetype};

/// MIME type reported for files nobody can identify.
pub const UNKNOWN_MIMETYPE: &str = "document/unknown";

/// Classifier over a shared, immutable [`Registry`].
///
/// Instances are cheap to clone and independent of each other; the only
/// shared state is the read-only registry.
#[derive(Clone, Debug)]
pub struct FiletypesUtil {
    pub(crate) registry: Arc<Registry>,
}

impl FiletypesUtil {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Classifier backed by the embedded registry.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded table is broken.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Arc::new(Registry::builtin()?)))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Classify one raw token.
    ///
    /// `*.` fragments collapse to `.`, the token is lowercased and stripped
    /// of surrounding whitespace and quotes. MIME shape is checked before
    /// group names; anything else is treated as an extension and gets exactly
    /// one leading dot. Slashes never survive into an extension.
    pub fn classify(&self, raw: &str) -> TypeToken {
        let lowered = raw.replace("*.", ".").to_lowercase();
        let cleaned = lowered.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'');

        if cleaned == "*" {
            return TypeToken::Wildcard;
        }
        if looks_like_mimetype(cleaned) {
            return TypeToken::MimeType(cleaned.to_string());
        }
        if self.registry.group(cleaned).is_some() {
            return TypeToken::Group(cleaned.to_string());
        }

        let stem = cleaned.trim_start_matches('.');
        if stem.is_empty()
            || stem.contains(['*', '?', '/'])
            || !stem.chars().any(char::is_alphanumeric)
        {
            return TypeToken::Unrecognized(raw.to_string());
        }
        TypeToken::Extension(format!(".{stem}"))
    }

    /// Split and classify a type list.
    ///
    /// Unusable fragments are dropped, duplicates are removed keeping the
    /// first occurrence, and a `*` anywhere reduces the whole list to
    /// `[Wildcard]`.
    pub fn tokenize(&self, types: impl Into<TypeInput>) -> Vec<TypeToken> {
        let mut tokens: Vec<TypeToken> = Vec::new();
        for raw in types.into().raw_tokens() {
            match self.classify(&raw) {
                TypeToken::Wildcard => return vec![TypeToken::Wildcard],
                TypeToken::Unrecognized(fragment) => {
                    debug!(fragment = %fragment, "Dropping unusable file type token");
                }
                token => {
                    if !tokens.contains(&token) {
                        tokens.push(token);
                    }
                }
            }
        }
        tokens
    }

    /// Canonical string form of a type list.
    ///
    /// # Examples
    ///
    /// ```
    /// let util = filetypes::FiletypesUtil::builtin().unwrap();
    /// assert_eq!(util.normalize("doc, *.jpg, mp3"), vec![".doc", ".jpg", ".mp3"]);
    /// assert_eq!(util.normalize("pdf *.ps foo* * *bar"), vec!["*"]);
    /// ```
    pub fn normalize(&self, types: impl Into<TypeInput>) -> Vec<String> {
        self.tokenize(types)
            .iter()
            .filter_map(TypeToken::as_str)
            .map(str::to_string)
            .collect()
    }

    /// Formal `type/subtype` check, independent of the registry.
    pub fn looks_like_mimetype(&self, value: &str) -> bool {
        looks_like_mimetype(value)
    }

    /// Exact, case-sensitive group lookup. A miss is `None`, not an error.
    pub fn lookup_group(&self, name: &str) -> Option<&FiletypeGroup> {
        self.registry.group(name)
    }

    /// Display name of a group.
    pub fn group_description(&self, name: &str) -> Option<&str> {
        self.registry.group(name).map(|g| g.description.as_str())
    }

    /// Replace groups and MIME types with the extensions they stand for.
    ///
    /// A group contributes its member extensions, plus its own name when
    /// `keep_groups` is set. A MIME type contributes every extension
    /// registered under it, plus itself when `keep_mimetypes` is set; an
    /// unknown MIME type therefore disappears unless kept. Extensions and the
    /// wildcard pass through. Order is first-seen, without duplicates.
    pub fn expand(
        &self,
        types: impl Into<TypeInput>,
        keep_groups: bool,
        keep_mimetypes: bool,
    ) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::new();
        for token in self.tokenize(types) {
            match token {
                TypeToken::Group(name) => {
                    if let Some(group) = self.registry.group(&name) {
                        for ext in &group.extensions {
                            push_unique(&mut expanded, ext);
                        }
                    }
                    if keep_groups {
                        push_unique(&mut expanded, &name);
                    }
                }
                TypeToken::MimeType(mime) => {
                    for ext in self.registry.extensions_for_mimetype(&mime) {
                        push_unique(&mut expanded, ext);
                    }
                    if keep_mimetypes {
                        push_unique(&mut expanded, &mime);
                    }
                }
                TypeToken::Extension(ext) => push_unique(&mut expanded, &ext),
                TypeToken::Wildcard => push_unique(&mut expanded, "*"),
                TypeToken::Unrecognized(_) => {}
            }
        }
        expanded
    }

    /// True when every type in `types` is covered by `list`.
    ///
    /// An empty list or `*` covers everything, and an empty `types` is
    /// covered by any list. Coverage is literal membership in the list's full
    /// expansion, so it is deliberately one-way: `.jpg .jpe .jpeg` are listed
    /// in `image/jpeg`, but `image/jpeg` is not listed in `.jpg`.
    pub fn is_listed(&self, types: impl Into<TypeInput>, list: impl Into<TypeInput>) -> bool {
        self.get_not_listed(types, list).is_empty()
    }

    /// Normalized members of `types` that `list` does not cover.
    pub fn get_not_listed(
        &self,
        types: impl Into<TypeInput>,
        list: impl Into<TypeInput>,
    ) -> Vec<String> {
        let listed = self.normalize(list);
        if allows_everything(&listed) {
            return Vec::new();
        }

        let candidates = self.normalize(types);
        if candidates.is_empty() {
            return Vec::new();
        }

        let expanded = self.expand(listed, true, true);
        candidates
            .into_iter()
            .filter(|candidate| !expanded.contains(candidate))
            .collect()
    }

    /// Check an uploaded file name against an accepted-types list.
    ///
    /// The comparison is a case-insensitive suffix match against the list's
    /// expanded extensions, so compound extensions such as `.tar.gz` work.
    pub fn is_allowed_file_type(&self, filename: &str, list: impl Into<TypeInput>) -> bool {
        let allowed = self.normalize(list);
        if allows_everything(&allowed) {
            return true;
        }

        let name = filename.to_lowercase();
        self.expand(allowed, false, false)
            .iter()
            .any(|ext| ext.starts_with('.') && name.ends_with(ext.as_str()))
    }

    /// Types in the list that the registry cannot account for.
    ///
    /// `*` and existing groups are always known. A MIME type is known when
    /// some extension is registered under it, an extension when it has a
    /// registry entry. The reserved "unknown" extension is always reported.
    pub fn get_unknown_file_types(&self, types: impl Into<TypeInput>) -> Vec<String> {
        self.tokenize(types)
            .into_iter()
            .filter_map(|token| match token {
                TypeToken::Wildcard | TypeToken::Group(_) | TypeToken::Unrecognized(_) => None,
                TypeToken::Extension(ext) if self.registry.is_reserved(&ext) => Some(ext),
                TypeToken::Extension(ext) => self.registry.entry(&ext).is_none().then_some(ext),
                TypeToken::MimeType(mime) => self
                    .registry
                    .extensions_for_mimetype(&mime)
                    .is_empty()
                    .then_some(mime),
            })
            .collect()
    }

    /// MIME type for a file name.
    ///
    /// The registry wins; otherwise `mime_guess` is consulted, and files
    /// neither knows are `document/unknown`.
    pub fn mimetype_for(&self, filename: &str) -> String {
        if let Some(entry) = self.registry.entry_for_filename(filename) {
            return entry.mimetype.clone();
        }
        mime_guess::from_path(filename)
            .first_raw()
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_MIMETYPE.to_string())
    }

    /// Icon name for a file name.
    pub fn icon_for(&self, filename: &str) -> String {
        match self.registry.entry_for_filename(filename) {
            Some(entry) => entry.icon.clone(),
            None => fallback_icon(&self.mimetype_for(filename), Path::new(filename)).to_string(),
        }
    }

    /// Description of a dotted extension, or the generic "File" label.
    pub fn extension_description(&self, extension: &str) -> &str {
        self.registry
            .entry(extension)
            .map(|e| e.description.as_str())
            .unwrap_or(self.registry.labels().unknown.as_str())
    }
}

/// An empty list and `*` both mean "no restriction".
pub(crate) fn allows_everything(normalized: &[String]) -> bool {
    normalized.is_empty() || normalized.iter().any(|t| t == "*")
}

fn push_unique(items: &mut Vec<String>, value: &str) {
    if !items.iter().any(|item| item == value) {
        items.push(value.to_string());
    }
}
