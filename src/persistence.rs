// File: src/persistence.rs
use crate::core::types::{NewRecord, TranslationRecord};
use crate::error::StoreError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;

const ID_LEN: usize = 26;

/// Saved translations, newest first, bounded in size.
pub trait RecordStore {
    /// Assigns an id and timestamp, stores the record at the front and evicts
    /// the oldest entries past capacity.
    fn save(&mut self, record: NewRecord) -> Result<TranslationRecord, StoreError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<TranslationRecord>, StoreError>;
    /// Unknown ids are ignored.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
    fn clear_all(&mut self) -> Result<(), StoreError>;
}

/// Store kept in memory only; handy for tests and one-shot sessions.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Vec<TranslationRecord>,
    capacity: usize,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }
}

impl RecordStore for MemoryStore {
    fn save(&mut self, record: NewRecord) -> Result<TranslationRecord, StoreError> {
        let record = stamp(record)?;
        push_front_capped(&mut self.records, record.clone(), self.capacity);
        Ok(record)
    }

    fn list(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.records.retain(|r| r.id != id);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        Ok(())
    }
}

/// Store backed by a JSON array on disk. Every write replaces the file
/// atomically, so a failed save leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    capacity: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[TranslationRecord]) -> Result<(), StoreError> {
        let parent_dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
        drop(writer);

        temp_file.persist(&self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn save(&mut self, record: NewRecord) -> Result<TranslationRecord, StoreError> {
        let record = stamp(record)?;
        let mut records = self.list()?;
        push_front_capped(&mut records, record.clone(), self.capacity);
        self.write(&records)?;
        tracing::info!(id = %record.id, "translation saved");
        Ok(record)
    }

    /// A missing file is an empty history. So is an unreadable one: the
    /// problem is logged and the next save starts over.
    fn list(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "saved translations unreadable");
                Ok(Vec::new())
            }
        }
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() != before {
            self.write(&records)?;
            tracing::info!(%id, "translation deleted");
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("all translations cleared");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn stamp(record: NewRecord) -> Result<TranslationRecord, StoreError> {
    if record.original_text.trim().is_empty() || record.emoji_text.trim().is_empty() {
        return Err(StoreError::NothingToSave);
    }
    Ok(TranslationRecord {
        id: generate_id(),
        original_text: record.original_text,
        emoji_text: record.emoji_text,
        created_at: now_millis(),
        style: record.style,
        mode: record.mode,
    })
}

fn push_front_capped(records: &mut Vec<TranslationRecord>, record: TranslationRecord, capacity: usize) {
    records.insert(0, record);
    records.truncate(capacity);
}

fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
