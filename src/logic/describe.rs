// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Human-readable descriptions of a type list.

use super::filetypes::FiletypesUtil;
use crate::models::token::{TypeInput, TypeToken};
use crate::models::view::{DescriptionEntry, Descriptions};
use crate::utils::natural_cmp;

impl FiletypesUtil {
    /// Describe every type in the list, one row per distinct description.
    ///
    /// - `*` becomes the "All file types" label with no extensions.
    /// - A group becomes its display name with its member extensions.
    /// - A MIME type becomes the description of its first registered
    ///   extension (or the raw MIME type when nothing is registered) with the
    ///   extensions registered under it.
    /// - An extension becomes its registry description, or the generic
    ///   "File" label when unknown.
    ///
    /// Rows sharing a description are merged. Extensions inside a row are
    /// sorted and space-joined; rows are sorted naturally by description.
    pub fn describe(&self, types: impl Into<TypeInput>) -> Descriptions {
        let registry = self.registry();
        let mut rows: Vec<(String, Vec<String>)> = Vec::new();

        for token in self.tokenize(types) {
            let (description, extensions) = match &token {
                TypeToken::Wildcard => (registry.labels().any.clone(), Vec::new()),
                TypeToken::Group(name) => {
                    let Some(group) = registry.group(name) else {
                        continue;
                    };
                    (group.description.clone(), group.extensions.clone())
                }
                TypeToken::MimeType(mime) => (
                    registry
                        .mimetype_description(mime)
                        .unwrap_or(mime)
                        .to_string(),
                    registry
                        .extensions_for_mimetype(mime)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                ),
                TypeToken::Extension(ext) => {
                    (self.extension_description(ext).to_string(), vec![ext.clone()])
                }
                TypeToken::Unrecognized(_) => continue,
            };

            match rows.iter_mut().find(|(existing, _)| *existing == description) {
                Some((_, merged)) => {
                    for ext in extensions {
                        if !merged.contains(&ext) {
                            merged.push(ext);
                        }
                    }
                }
                None => rows.push((description, extensions)),
            }
        }

        let mut descriptions: Vec<DescriptionEntry> = rows
            .into_iter()
            .map(|(description, mut extensions)| {
                extensions.sort();
                DescriptionEntry {
                    description,
                    extensions: extensions.join(" "),
                }
            })
            .collect();
        descriptions.sort_by(|a, b| natural_cmp(&a.description, &b.description));

        Descriptions {
            hasdescriptions: !descriptions.is_empty(),
            descriptions,
        }
    }
}
