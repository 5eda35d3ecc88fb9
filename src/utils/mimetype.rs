// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Syntactic MIME type recognition.

use std::sync::LazyLock;

use regex::Regex;

static MIMETYPE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.+\-]+/[A-Za-z0-9.+\-]+$").expect("MIME type pattern is valid")
});

/// Return true when `value` has the `type/subtype` shape.
///
/// Both halves must be non-empty runs of letters, digits, `.`, `+` or `-`
/// joined by exactly one `/`. The check is purely formal: `foo/bar` passes
/// even though no registry knows it.
pub fn looks_like_mimetype(value: &str) -> bool {
    MIMETYPE_SHAPE.is_match(value)
}

/// Top-level type of a MIME string (`image` for `image/png`), lowercased.
pub fn top_level_type(mime: &str) -> String {
    mime.split('/')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
