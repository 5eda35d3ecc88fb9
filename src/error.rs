// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error types surfaced by the library.

use thiserror::Error;

/// Faults raised at the library boundary.
///
/// Lookups that find nothing are not errors; they return `None` or `false`.
#[derive(Debug, Error)]
pub enum FiletypesError {
    /// The caller handed over something that cannot be read as a list of types.
    #[error("Malformed file type input: {0}")]
    MalformedInput(String),

    /// A registry definition is internally inconsistent.
    #[error("Invalid file type registry: {0}")]
    Registry(String),
}

pub type Result<T> = std::result::Result<T, FiletypesError>;
