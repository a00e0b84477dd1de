//! Persisted zones document: JSON codec and file I/O.
//!
//! The document is a JSON array of records in store order. Every record
//! carries a `"kind"` discriminator so zone records stay distinguishable if
//! other record types ever share the document:
//!
//! ```json
//! [
//!   { "kind": "zone", "topleft": [1250, 1667], "size": [2500, 1667], "score": 1 }
//! ]
//! ```
//!
//! Decoding is per record. A record with a missing field, wrong shape, unknown
//! kind, negative size, or a score of `i32::MIN` is skipped and reported in
//! [`Decoded::skipped`]; the rest of the document still loads. Only a document that is not JSON, or
//! not an array, fails as a whole.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::doc::{Zone, ZoneStore};
use crate::normalize::NormalizedRect;

/// Error returned by [`decode`], [`load`], and [`save`].
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The zones file could not be read or written.
    #[error("zones file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The document is not valid JSON, or a record could not be encoded.
    #[error("invalid zones document: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed but its top level is not an array.
    #[error("zones document must be a JSON array of records")]
    NotASequence,
}

impl PersistError {
    /// Whether this is a read of a file that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Wire shape of one record, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record {
    Zone(ZoneRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ZoneRecord {
    /// Normalized `[left, top]`.
    topleft: [i32; 2],
    /// Normalized `[width, height]`.
    size: [i32; 2],
    score: i32,
}

impl From<&Zone> for Record {
    fn from(zone: &Zone) -> Self {
        Self::Zone(ZoneRecord {
            topleft: [zone.rect.left, zone.rect.top],
            size: [zone.rect.width, zone.rect.height],
            score: zone.score,
        })
    }
}

impl TryFrom<Record> for Zone {
    type Error = String;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record::Zone(r) = record;
        let [width, height] = r.size;
        if width < 0 || height < 0 {
            return Err(format!("negative size [{width}, {height}]"));
        }
        if r.score == i32::MIN {
            return Err(format!("score {} cannot be negated", r.score));
        }
        let [left, top] = r.topleft;
        Ok(Zone::with_score(NormalizedRect::new(left, top, width, height), r.score))
    }
}

/// A record that was dropped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Zero-based position of the record in the document array.
    pub position: usize,
    /// Why the record was rejected.
    pub reason: String,
}

/// Result of decoding a document.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// Zones that decoded cleanly, in document order.
    pub store: ZoneStore,
    /// Records that were skipped.
    pub skipped: Vec<SkippedRecord>,
}

/// Encode the whole store as a pretty-printed document.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if serialization fails.
pub fn encode(store: &ZoneStore) -> Result<String, PersistError> {
    let records: Vec<Record> = store.iter().map(Record::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Decode a document, skipping malformed records.
///
/// # Errors
///
/// Returns [`PersistError::Json`] for text that is not JSON and
/// [`PersistError::NotASequence`] when the top level is not an array.
pub fn decode(text: &str) -> Result<Decoded, PersistError> {
    let Value::Array(items) = serde_json::from_str::<Value>(text)? else {
        return Err(PersistError::NotASequence);
    };

    let mut zones = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (position, item) in items.into_iter().enumerate() {
        let decoded = serde_json::from_value::<Record>(item)
            .map_err(|e| e.to_string())
            .and_then(Zone::try_from);
        match decoded {
            Ok(zone) => zones.push(zone),
            Err(reason) => {
                warn!(position, %reason, "skipping malformed zone record");
                skipped.push(SkippedRecord { position, reason });
            }
        }
    }

    Ok(Decoded { store: zones.into_iter().collect(), skipped })
}

/// Write the store to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`PersistError::Io`] if the file cannot be written.
pub fn save(store: &ZoneStore, path: &Path) -> Result<(), PersistError> {
    let text = encode(store)?;
    std::fs::write(path, text).map_err(|source| PersistError::Io { path: path.to_path_buf(), source })
}

/// Read and decode the document at `path`.
///
/// # Errors
///
/// Returns [`PersistError::Io`] if the file cannot be read (check
/// [`PersistError::is_not_found`] for a missing file), otherwise as [`decode`].
pub fn load(path: &Path) -> Result<Decoded, PersistError> {
    let text =
        std::fs::read_to_string(path).map_err(|source| PersistError::Io { path: path.to_path_buf(), source })?;
    decode(&text)
}
