// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! File type lists for upload settings: normalize what administrators type,
//! decide which files a list accepts, and describe lists for display.
//!
//! ```
//! use filetypes::FiletypesUtil;
//!
//! let util = FiletypesUtil::builtin().unwrap();
//! assert_eq!(util.normalize("tgz,TAR.GZ tar.gz .tar.gz"), vec![".tgz", ".tar.gz"]);
//! assert!(util.is_allowed_file_type("test.html", "video,web_file"));
//! assert!(!util.is_listed("image/jpeg", ".jpg"));
//! ```

pub mod error;
pub mod logic;
pub mod models;
pub mod utils;

pub use error::FiletypesError;
pub use logic::{FiletypesUtil, UNKNOWN_MIMETYPE};
pub use models::{
    BrowserGroupNode, BrowserTypeNode, DescriptionEntry, Descriptions, FileTypeEntry,
    FiletypeGroup, Labels, Registry, RegistryDefinition, TypeInput, TypeToken,
};
