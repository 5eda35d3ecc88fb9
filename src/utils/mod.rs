// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by the registry and the classifier.

pub mod file_icons;
pub mod mimetype;
pub mod natural_order;

/// Pick an icon name for a file the registry does not know.
pub use file_icons::fallback_icon;
/// Check whether a string has the formal `type/subtype` shape.
pub use mimetype::looks_like_mimetype;
/// Case-insensitive natural ordering for display labels.
pub use natural_order::natural_cmp;
