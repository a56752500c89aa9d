use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use crate::models::LeadRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write lead row: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush lead row: {0}")]
    Flush(#[from] std::io::Error),

    #[error("record log task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// Append-only CSV of accepted leads, reopened on every append
pub struct CsvLeadLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvLeadLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &LeadRecord) -> Result<(), StoreError> {
        // a poisoned lock only means another append panicked, the file is still usable
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // header goes in only when the file is new (or was left empty)
        let is_new = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, message: &str) -> LeadRecord {
        LeadRecord {
            full_name: name.into(),
            phone_digits: "0501234567".into(),
            phone_raw: "050-123-4567".into(),
            email: String::new(),
            message: message.into(),
            client_id: "198.51.100.4".into(),
        }
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempdir().unwrap();
        let log = CsvLeadLog::new(dir.path().join("leads.csv"));

        log.append(&record("Dana Levi", "")).unwrap();
        log.append(&record("Avi Cohen", "")).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "full_name,phone_digits,phone_raw,email,message,ip",
                "Dana Levi,0501234567,050-123-4567,,,198.51.100.4",
                "Avi Cohen,0501234567,050-123-4567,,,198.51.100.4",
            ]
        );
    }

    #[test]
    fn fields_with_commas_and_newlines_are_quoted() {
        let dir = tempdir().unwrap();
        let log = CsvLeadLog::new(dir.path().join("leads.csv"));

        log.append(&record("Levi, Dana", "first\nsecond")).unwrap();

        let mut reader = csv::Reader::from_path(log.path()).unwrap();
        let rows: Vec<LeadRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, [record("Levi, Dana", "first\nsecond")]);
    }

    #[test]
    fn missing_directory_is_an_open_error() {
        let dir = tempdir().unwrap();
        let log = CsvLeadLog::new(dir.path().join("nope").join("leads.csv"));

        let err = log.append(&record("Dana", "")).unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }
}
