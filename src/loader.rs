//! Loader
//!
//! Reads cart items and campaigns from JSON documents, or YAML when the file
//! extension says so. Every record is checked for its required keys before it
//! is decoded, so an absent key is reported by name.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use serde::de::{DeserializeOwned, IgnoredAny};
use thiserror::Error;

use crate::{campaigns::Campaign, cart::Cart, items::CartItem};

/// Document Loading Errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("Failed to read '{file}': {source}", file = .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// JSON parsing error
    #[error("Failed to decode JSON from '{file}': {source}", file = .path.display())]
    Json {
        /// File that was parsed
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// YAML parsing error
    #[error("Failed to decode YAML from '{file}': {source}", file = .path.display())]
    Yaml {
        /// File that was parsed
        path: PathBuf,
        /// Underlying YAML error
        source: serde_norway::Error,
    },

    /// A record lacks a key every record of its kind must carry
    #[error("Record {index} in '{file}' is missing field `{field}`", file = .path.display())]
    MissingField {
        /// File that was parsed
        path: PathBuf,
        /// Position of the record in the document
        index: usize,
        /// Key of the absent field
        field: &'static str,
    },
}

impl LoadError {
    /// The document the error relates to.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::Yaml { path, .. }
            | LoadError::MissingField { path, .. } => path,
        }
    }

    /// The absent key, when a record failed the required-key check.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            LoadError::MissingField { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether the document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Document formats the loader understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON
    Json,

    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// A kind of record held in a document, with the keys it cannot do without.
trait Record: DeserializeOwned {
    const REQUIRED: &'static [&'static str];
}

impl Record for CartItem {
    const REQUIRED: &'static [&'static str] = &["price", "category"];
}

impl Record for Campaign {
    const REQUIRED: &'static [&'static str] = &["category", "type"];
}

/// Load the cart items document.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or parsed, or
/// [`LoadError::MissingField`] if an item lacks `price` or `category`.
pub fn load_cart_items(path: impl AsRef<Path>) -> Result<Vec<CartItem>, LoadError> {
    load_records(path.as_ref())
}

/// Load the cart items document as a [`Cart`].
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or parsed.
pub fn load_cart(path: impl AsRef<Path>) -> Result<Cart, LoadError> {
    load_cart_items(path).map(Cart::from)
}

/// Load the discount campaigns document.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or parsed, or
/// [`LoadError::MissingField`] if a campaign lacks `category` or `type`.
pub fn load_campaigns(path: impl AsRef<Path>) -> Result<Vec<Campaign>, LoadError> {
    load_records(path.as_ref())
}

fn load_records<T: Record>(path: &Path) -> Result<Vec<T>, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DocumentFormat::from_path(path);

    let shapes: Vec<FxHashMap<String, IgnoredAny>> = parse_document(&contents, format, path)?;

    for (index, record) in shapes.iter().enumerate() {
        if let Some(field) = T::REQUIRED.iter().copied().find(|key| !record.contains_key(*key)) {
            return Err(LoadError::MissingField {
                path: path.to_path_buf(),
                index,
                field,
            });
        }
    }

    parse_document(&contents, format, path)
}

fn parse_document<T: DeserializeOwned>(
    contents: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<T, LoadError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        DocumentFormat::Yaml => {
            serde_norway::from_str(contents).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
