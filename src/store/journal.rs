//! Append-only mutation journal
//!
//! One framed record per acknowledged mutation:
//!
//! ```text
//! +------------------+
//! | Payload Length   | (u32 LE)
//! +------------------+
//! | Payload          | (JSON-encoded record)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 of payload)
//! +------------------+
//! ```
//!
//! On open the journal is replayed front to back; the latest record per bag
//! wins and tombstones delete. A torn or corrupt tail ends replay and the
//! file is truncated to the last intact record before appends resume.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Bag;

use super::errors::{StoreError, StoreResult};

/// A single journaled mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum JournalRecord {
    /// Full record after a create or update
    Put(Bag),
    /// Tombstone for a deleted bag
    Delete(Uuid),
}

/// Append handle for the journal file at `<data_dir>/data/bags.log`.
pub(crate) struct Journal {
    path: PathBuf,
    file: File,
}

impl Journal {
    /// Opens (creating if needed) the journal and replays existing records.
    pub fn open(data_dir: &Path) -> StoreResult<(Self, Vec<JournalRecord>)> {
        let dir = data_dir.join("data");
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::Storage(format!("cannot create data directory {}: {}", dir.display(), e))
        })?;
        let path = dir.join("bags.log");

        let (records, valid_len, file_len) = Self::replay(&path)?;
        if valid_len < file_len {
            let file = OpenOptions::new().write(true).open(&path).map_err(|e| {
                StoreError::Storage(format!("cannot reopen journal for truncation: {}", e))
            })?;
            file.set_len(valid_len).map_err(|e| {
                StoreError::Storage(format!("cannot truncate torn journal tail: {}", e))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::Storage(format!("cannot open journal {}: {}", path.display(), e))
            })?;

        Ok((Self { path, file }, records))
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record and syncs before returning.
    pub fn append(&mut self, record: &JournalRecord) -> StoreResult<()> {
        let payload = serde_json::to_vec(record)
            .map_err(|e| StoreError::Storage(format!("cannot encode journal record: {}", e)))?;

        let mut frame = Vec::with_capacity(payload.len() + 8);
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&payload);
        frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());

        self.file
            .write_all(&frame)
            .and_then(|_| self.file.sync_data())
            .map_err(|e| StoreError::Storage(format!("journal append failed: {}", e)))
    }

    /// Scans the file, returning the intact records, the byte length of the
    /// intact prefix, and the total file length.
    fn replay(path: &Path) -> StoreResult<(Vec<JournalRecord>, u64, u64)> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok((Vec::new(), 0, 0)),
            Err(e) => {
                return Err(StoreError::Storage(format!(
                    "cannot open journal {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let file_len = file
            .metadata()
            .map_err(|e| StoreError::Storage(format!("cannot stat journal: {}", e)))?
            .len();

        let mut reader = BufReader::new(file);
        let mut records = Vec::new();
        let mut offset = 0u64;

        while let Some((record, frame_len)) = read_frame(&mut reader, file_len - offset) {
            records.push(record);
            offset += frame_len;
        }

        Ok((records, offset, file_len))
    }
}

/// Reads one frame. Returns None at clean end-of-file and on any torn or
/// corrupt frame; the caller truncates past the intact prefix either way.
fn read_frame<R: Read>(reader: &mut R, remaining: u64) -> Option<(JournalRecord, u64)> {
    if remaining < 8 {
        return None;
    }

    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).ok()?;
    let len = u64::from(u32::from_le_bytes(len_buf));
    if len + 8 > remaining {
        return None;
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).ok()?;

    let mut crc_buf = [0u8; 4];
    reader.read_exact(&mut crc_buf).ok()?;
    if crc32fast::hash(&payload) != u32::from_le_bytes(crc_buf) {
        return None;
    }

    let record = serde_json::from_slice(&payload).ok()?;
    Some((record, len + 8))
}
