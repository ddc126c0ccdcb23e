//! JSON file backed submission store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{IntakeError, Result};
use crate::submission::{Submission, SubmissionForm, SubmissionSink};

/// Appends submissions to a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored submissions. A missing file holds none.
    pub fn load(&self) -> Result<Vec<Submission>> {
        match self.read()? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(Vec::new()),
        }
    }

    /// Store a submission made at `now`.
    ///
    /// The id is `now` in Unix milliseconds, raised above the largest stored
    /// id when needed. Stored entries are kept as they are, whatever keys they
    /// hold. Only a file that is not a JSON array is replaced by a new one.
    pub fn submit_at(&mut self, form: SubmissionForm, now: DateTime<Utc>) -> Result<Submission> {
        form.validate()?;

        let mut entries = self.load_entries()?;
        let stamp = now.timestamp_millis().max(0) as u64;
        let id = match entries.iter().filter_map(|e| e.get("id")?.as_u64()).max() {
            Some(last) if last >= stamp => last + 1,
            _ => stamp,
        };
        let record = form.into_submission(id, now)?;
        entries.push(serde_json::to_value(&record)?);
        self.write(&entries)?;

        log::info!("new client saved: {} (id {})", record.username, record.id);
        Ok(record)
    }

    /// Raw stored entries, or an empty list when the file is missing or is
    /// not a JSON array.
    fn load_entries(&self) -> Result<Vec<Value>> {
        let Some(content) = self.read()? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                log::warn!(
                    "{} is not a JSON array ({err}), starting a new one",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(IntakeError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, entries: &[Value]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| IntakeError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|source| IntakeError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl SubmissionSink for JsonFileStore {
    fn submit(&mut self, form: SubmissionForm) -> Result<Submission> {
        self.submit_at(form, Utc::now())
    }
}
