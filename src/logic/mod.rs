// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Classifier operations over a [`crate::models::Registry`].
//!
//! Responsibilities:
//! - Tokenize and normalize free-form type lists.
//! - Expand groups and MIME types, check membership and unknown types.
//! - Produce description rows and the picker tree for UI code.

mod browser;
mod describe;
pub mod filetypes;

pub use filetypes::{FiletypesUtil, UNKNOWN_MIMETYPE};
