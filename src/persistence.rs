use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::GuestbookError;

/// Key format for stored records: local time with microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub username: String,
    pub message: String,
}

/// The full on-disk document. A BTreeMap keeps keys sorted, which for
/// timestamp keys is chronological order.
pub type Document = BTreeMap<String, Record>;

/// Create the data file's parent directory and an empty `{}` document if
/// missing. Existing contents are left untouched, so calling this twice
/// is harmless.
pub fn ensure_store(path: &Path) -> Result<(), GuestbookError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::debug!("Creating storage directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    if !path.exists() {
        tracing::debug!("Creating empty data file {}", path.display());
        write_document(path, &Document::new())?;
    }

    Ok(())
}

/// Read the document from disk. A missing file is an empty document;
/// anything else unreadable or unparseable is an error.
pub fn load_document(path: &Path) -> Result<Document, GuestbookError> {
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&data)?)
}

/// Rewrite the whole document, pretty-printed. serde_json leaves non-ASCII
/// characters unescaped, so the file stays readable for any language.
pub fn write_document(path: &Path, doc: &Document) -> Result<(), GuestbookError> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    Ok(())
}

/// Merge one record into the document under a freshly generated timestamp
/// key and rewrite the file. Returns the key. Two appends within the same
/// microsecond would overwrite each other (last write wins); callers are
/// expected to serialize appends through a single task.
pub fn append_record(path: &Path, record: Record) -> Result<String, GuestbookError> {
    let mut doc = load_document(path)?;

    let key = Local::now().format(TIMESTAMP_FORMAT).to_string();
    doc.insert(key.clone(), record);

    write_document(path, &doc)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn record(username: &str, message: &str) -> Record {
        Record {
            username: username.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn ensure_store_creates_directory_and_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage").join("data.json");

        ensure_store(&path).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(load_document(&path).unwrap().is_empty());
    }

    #[test]
    fn ensure_store_leaves_existing_data_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        append_record(&path, record("Ann", "Hi")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        ensure_store(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn missing_file_loads_as_empty_document() {
        let dir = TempDir::new().unwrap();
        let doc = load_document(&dir.path().join("nope.json")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn append_keeps_earlier_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let first = append_record(&path, record("Ann", "Hi")).unwrap();
        let second = append_record(&path, record("Bob", "Hello")).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[&first], record("Ann", "Hi"));
        assert_eq!(doc[&second], record("Bob", "Hello"));
    }

    #[test]
    fn append_returns_microsecond_timestamp_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let key = append_record(&path, record("", "")).unwrap();

        NaiveDateTime::parse_from_str(&key, TIMESTAMP_FORMAT).unwrap();
        // Microseconds are always spelled out in full.
        assert_eq!(key.split('.').nth(1).map(str::len), Some(6));
    }

    #[test]
    fn sequential_appends_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let mut keys = Vec::new();
        for i in 0..10 {
            let key = append_record(&path, record(&format!("user{i}"), &format!("msg{i}"))).unwrap();
            keys.push(key);
        }

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.len(), 10);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(doc[key], record(&format!("user{i}"), &format!("msg{i}")));
        }
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "not json at all").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, GuestbookError::StoreCorrupt(_)));

        let err = append_record(&path, record("Ann", "Hi")).unwrap_err();
        assert!(matches!(err, GuestbookError::StoreCorrupt(_)));
    }

    #[test]
    fn non_ascii_text_is_written_unescaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        append_record(&path, record("Анна", "Привіт")).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Анна"));
        assert!(raw.contains("Привіт"));
        assert!(!raw.contains("\\u"));
    }
}
