//! Bank document loading and saving.
//!
//! Banks arrive in two top-level shapes: a bare JSON array of entries, or an
//! object carrying the array under an `entries` key. The shape is resolved
//! once at load time and carried through to save, so a document always goes
//! back to disk in the shape it came in, with any other top-level keys of a
//! wrapped document untouched and in place.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENTRIES_KEY: &str = "entries";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{}: expected a JSON array or an object with an `entries` array", path.display())]
    Malformed { path: PathBuf },
}

/// A question-bank document with its top-level shape made explicit.
#[derive(Debug, Clone)]
pub enum BankDocument {
    /// The file's top level is the entry array itself.
    Unwrapped(Vec<Value>),
    /// The file's top level is an object; `root` keeps every other key (and
    /// the position of the `entries` key) so saves round-trip the object.
    Wrapped {
        root: Map<String, Value>,
        entries: Vec<Value>,
    },
}

impl BankDocument {
    /// A fresh `{"entries": [...]}` document, the shape combination
    /// workflows write.
    pub fn wrapped(entries: Vec<Value>) -> Self {
        let mut root = Map::new();
        root.insert(ENTRIES_KEY.to_string(), Value::Null);
        Self::Wrapped { root, entries }
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Array(entries) => Ok(Self::Unwrapped(entries)),
            Value::Object(mut root) => {
                // Swap a placeholder in so the key keeps its position.
                match root.insert(ENTRIES_KEY.to_string(), Value::Null) {
                    Some(Value::Array(entries)) => Ok(Self::Wrapped { root, entries }),
                    _ => Err(DocumentError::Malformed {
                        path: path.to_path_buf(),
                    }),
                }
            }
            _ => Err(DocumentError::Malformed {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json =
            serde_json::to_string_pretty(&self.to_value()).map_err(|source| DocumentError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, json).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn entries_mut(&mut self) -> &mut Vec<Value> {
        match self {
            Self::Unwrapped(entries) | Self::Wrapped { entries, .. } => entries,
        }
    }

    pub fn into_entries(self) -> Vec<Value> {
        match self {
            Self::Unwrapped(entries) | Self::Wrapped { entries, .. } => entries,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Unwrapped(entries) => Value::Array(entries.clone()),
            Self::Wrapped { root, entries } => {
                let mut root = root.clone();
                root.insert(ENTRIES_KEY.to_string(), Value::Array(entries.clone()));
                Value::Object(root)
            }
        }
    }
}

/// The join key every patch pass uses; entries without one are passed over.
pub fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}
