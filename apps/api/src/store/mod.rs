//! Durable storage for saved syllabus analyses.
//!
//! The whole collection lives in one JSON document, read in full and
//! rewritten in full on every mutation (not an incremental log). Records
//! are identified by position; there is no durable ID field. A missing or
//! corrupt document loads as an empty collection, never as a fatal error.

pub mod handlers;

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::syllabus::SyllabusAnalysis;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index {index} is out of range for {len} saved syllabi")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a rejection record cannot be saved")]
    RejectionRecord,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk shape. The version tag exists so a future schema change can
/// migrate instead of discarding the user's saved data.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    syllabi: Vec<SyllabusAnalysis>,
}

/// Handle to the saved-syllabi collection.
///
/// Mutations take the write lock, re-read the document, apply the change in
/// memory, and write the full document back in a single call. Concurrent
/// processes mutating the same file are an accepted race (single-writer
/// deployment model); in-process handlers are serialized by the mutex.
#[derive(Clone)]
pub struct SyllabusStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SyllabusStore {
    /// Opens (or creates the parent directory for) the store document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            inner: Arc::new(StoreInner {
                path,
                write_lock: Mutex::new(()),
            }),
        })
    }

    /// Reads the full collection. Missing or unreadable data is an empty
    /// collection, never a fatal error.
    pub fn load(&self) -> Vec<SyllabusAnalysis> {
        let raw = match fs::read_to_string(&self.inner.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("failed to read syllabus store: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<StoreDocument>(&raw) {
            Ok(doc) => doc.syllabi,
            // Pre-envelope data was a bare array; read it so an upgrade
            // does not drop the collection.
            Err(_) => match serde_json::from_str::<Vec<SyllabusAnalysis>>(&raw) {
                Ok(syllabi) => syllabi,
                Err(e) => {
                    warn!("syllabus store is corrupt, treating as empty: {e}");
                    Vec::new()
                }
            },
        }
    }

    /// Appends one analysis and returns its index. Rejection records carry
    /// no course data and are refused.
    pub fn append(&self, analysis: SyllabusAnalysis) -> Result<usize, StoreError> {
        if analysis.error {
            return Err(StoreError::RejectionRecord);
        }

        let _guard = self.inner.write_lock.lock().expect("store lock poisoned");
        let mut syllabi = self.load();
        syllabi.push(analysis);
        let index = syllabi.len() - 1;
        self.write(syllabi)?;
        Ok(index)
    }

    /// Removes the record at `index`, preserving the relative order of the
    /// rest.
    pub fn remove_at(&self, index: usize) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock().expect("store lock poisoned");
        let mut syllabi = self.load();
        if index >= syllabi.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: syllabi.len(),
            });
        }
        syllabi.remove(index);
        self.write(syllabi)
    }

    fn write(&self, syllabi: Vec<SyllabusAnalysis>) -> Result<(), StoreError> {
        let doc = StoreDocument {
            version: STORE_VERSION,
            syllabi,
        };
        fs::write(&self.inner.path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}
