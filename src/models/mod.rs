// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: the registry, raw input and tokens, and the display shapes
//! handed to UI code.

pub mod registry;
pub mod token;
pub mod view;

pub use registry::{FileTypeEntry, FiletypeGroup, Labels, Registry, RegistryDefinition};
pub use token::{TypeInput, TypeToken};
pub use view::{BrowserGroupNode, BrowserTypeNode, DescriptionEntry, Descriptions};
