//! Ordered, JSON-valued key-value store for Trellis applications.
//!
//! Records are kept in a [`BTreeMap`] so every iteration is ordered by key.
//! Each mutation is written through to disk: the whole map is serialized to
//! a sibling temporary file which then replaces the store file.
//!
//! # Example
//!
//! ```ignore
//! let mut store = Store::open("todo.json")?;
//! store.set("counter", &1)?;
//! let next: u64 = store.get_or("counter", 0)? + 1;
//! store.close()?;
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    /// A value could not be converted to or from JSON.
    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The store was used after [`Store::close`].
    #[error("store is closed")]
    Closed,
}

/// A persistent, ordered map from string keys to JSON values.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    records: BTreeMap<String, Value>,
    open: bool,
}

impl Store {
    /// Open the store at `path`, creating an empty one if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read or created and
    /// [`StoreError::Json`] if it does not hold a JSON object.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        let store = Self {
            path,
            records,
            open: true,
        };
        store.flush()?;
        debug!(path = %store.path.display(), records = store.records.len(), "store opened");
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`Store::close`] has not been called yet.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.open {
            Ok(())
        } else {
            Err(StoreError::Closed)
        }
    }

    /// Fetch and decode the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the stored value does not decode as
    /// `T`, or [`StoreError::Closed`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.ensure_open()?;
        self.records
            .get(key)
            .map(|value| serde_json::from_value(value.clone()).map_err(StoreError::from))
            .transpose()
    }

    /// Fetch the value under `key`, or `default` when it is missing.
    ///
    /// # Errors
    ///
    /// Same as [`Store::get`].
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StoreError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Store `value` under `key` and write the store to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if `value` cannot be serialized,
    /// [`StoreError::Io`] if the write fails, or [`StoreError::Closed`].
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        self.ensure_open()?;
        let value = serde_json::to_value(value)?;
        let _ = self.records.insert(key.to_string(), value);
        trace!(key, "record set");
        self.flush()
    }

    /// Remove `key`, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the write fails, or [`StoreError::Closed`].
    pub fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        self.ensure_open()?;
        if self.records.remove(key).is_none() {
            return Ok(false);
        }
        trace!(key, "record deleted");
        self.flush()?;
        Ok(true)
    }

    /// Whether `key` is present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        self.ensure_open()?;
        Ok(self.records.contains_key(key))
    }

    /// Number of records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn len(&self) -> Result<usize, StoreError> {
        self.ensure_open()?;
        Ok(self.records.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.ensure_open()?;
        Ok(self.records.is_empty())
    }

    /// All keys in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn keys(&self) -> Result<impl Iterator<Item = &str>, StoreError> {
        self.ensure_open()?;
        Ok(self.records.keys().map(String::as_str))
    }

    /// All values, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn values(&self) -> Result<impl Iterator<Item = &Value>, StoreError> {
        self.ensure_open()?;
        Ok(self.records.values())
    }

    /// All records in ascending key order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn iter(&self) -> Result<impl Iterator<Item = (&str, &Value)>, StoreError> {
        self.ensure_open()?;
        Ok(self.records.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Records with keys from `start` (inclusive) up to `end`.
    ///
    /// `None` leaves that side unbounded. `inclusive` decides whether a
    /// record whose key equals `end` is part of the range. An inverted range
    /// yields nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`].
    pub fn range<'a>(
        &'a self,
        start: Option<&'a str>,
        end: Option<&'a str>,
        inclusive: bool,
    ) -> Result<impl Iterator<Item = (&'a str, &'a Value)>, StoreError> {
        self.ensure_open()?;
        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = match end {
            None => Bound::Unbounded,
            Some(end) if inclusive => Bound::Included(end),
            Some(end) => Bound::Excluded(end),
        };
        // An inverted range would panic inside BTreeMap::range.
        let inverted = matches!((start, end), (Some(s), Some(e)) if s > e);
        let range = if inverted {
            None
        } else {
            Some(self.records.range::<str, _>((lower, upper)))
        };
        Ok(range
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v)))
    }

    /// Write the store to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] if the write fails,
    /// or [`StoreError::Closed`].
    pub fn flush(&self) -> Result<(), StoreError> {
        self.ensure_open()?;
        let text = serde_json::to_string(&self.records)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        trace!(path = %self.path.display(), "store flushed");
        Ok(())
    }

    /// Flush and close the store. Every later read, query or write fails
    /// with [`StoreError::Closed`].
    ///
    /// # Errors
    ///
    /// Same as [`Store::flush`].
    pub fn close(&mut self) -> Result<(), StoreError> {
        self.flush()?;
        self.open = false;
        debug!(path = %self.path.display(), "store closed");
        Ok(())
    }
}
