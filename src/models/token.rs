// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Raw file type input and the classified tokens produced from it.

use serde_json::Value;

use crate::error::FiletypesError;

/// Separators accepted between types in a free-form list.
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | ':' | '"' | '\'')
}

/// File types as a caller hands them over: one free-form string, as typed
/// into a settings field, or a list that is already split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeInput {
    Text(String),
    List(Vec<String>),
}

impl Default for TypeInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl TypeInput {
    /// Split the input into non-empty pieces. List items are split on the
    /// same separators as text.
    pub fn raw_tokens(&self) -> Vec<String> {
        let pieces = |text: &str| -> Vec<String> {
            text.split(is_separator)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect()
        };
        match self {
            Self::Text(text) => pieces(text),
            Self::List(items) => items.iter().flat_map(|item| pieces(item)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for TypeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TypeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for TypeInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Vec<String>> for TypeInput {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[String]> for TypeInput {
    fn from(value: &[String]) -> Self {
        Self::List(value.to_vec())
    }
}

impl From<Vec<&str>> for TypeInput {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for TypeInput {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TypeInput {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<TypeInput>> From<Option<T>> for TypeInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

macro_rules! numeric_type_input {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TypeInput {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

numeric_type_input!(i32, i64, u32, u64, usize);

impl TryFrom<&Value> for TypeInput {
    type Error = FiletypesError;

    /// Read a type list out of a JSON form value.
    ///
    /// `null` is an empty list, strings and numbers are free-form text, and
    /// arrays may mix strings and numbers. Objects, booleans and nested
    /// arrays are rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => Ok(Self::Text(n.to_string())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(FiletypesError::MalformedInput(format!(
                        "list items must be strings, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(FiletypesError::MalformedInput(format!(
                "expected a string or a list of strings, got {other}"
            ))),
        }
    }
}

/// What a single normalized token refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeToken {
    /// `*`, any file type.
    Wildcard,
    /// Something shaped like `type/subtype`.
    MimeType(String),
    /// The name of a registry group.
    Group(String),
    /// Dotted, lowercase extension such as `.tar.gz`.
    Extension(String),
    /// A fragment that cannot name a file type (`.`, `foo*`, `.r??`).
    Unrecognized(String),
}

impl TypeToken {
    /// Canonical string form; `None` for unrecognized fragments.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Wildcard => Some("*"),
            Self::MimeType(s) | Self::Group(s) | Self::Extension(s) => Some(s),
            Self::Unrecognized(_) => None,
        }
    }
}
