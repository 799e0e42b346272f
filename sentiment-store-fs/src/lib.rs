#![deny(missing_docs)]
//! Filesystem-backed implementation of the [`RecordStore`] trait.
//!
//! Each table maps to a subdirectory under the root. Record ids are
//! percent-encoded and stored as `.json` files within the table directory.
//! Provides true persistence across process restarts.

use async_trait::async_trait;
use sentiment_types::error::StoreError;
use sentiment_types::store::{Filter, Record, RecordKey, RecordStore};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

// Distinguishes temp files of concurrent writers to the same record.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Filesystem-backed record store.
///
/// Directory layout:
/// ```text
/// root/
///   <encoded-table>/
///     <encoded-id>.json
/// ```
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never sees a half-written record.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn table_dir(&self, table: &str) -> PathBuf {
        self.root.join(encode(table))
    }

    fn record_path(&self, key: &RecordKey) -> PathBuf {
        self.table_dir(&key.table).join(id_to_filename(&key.id))
    }
}

/// Percent-encode everything outside a conservative filename alphabet.
fn encode(raw: &str) -> String {
    let mut encoded = String::new();
    for ch in raw.chars() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => encoded.push(ch),
            _ => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).as_bytes() {
                    encoded.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    encoded
}

fn decode(encoded: &str) -> Option<String> {
    let mut result = Vec::new();
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(bytes.get(i + 1..i + 3)?).ok()?;
            result.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            result.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(result).ok()
}

fn id_to_filename(id: &str) -> String {
    format!("{}.json", encode(id))
}

fn filename_to_id(filename: &str) -> Option<String> {
    decode(filename.strip_suffix(".json")?)
}

async fn read_value(path: &Path) -> Result<Option<serde_json::Value>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let value = serde_json::from_str(&contents)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::ReadFailed(e.to_string())),
    }
}

#[async_trait]
impl RecordStore for FsStore {
    async fn select(&self, key: &RecordKey) -> Result<Option<Record>, StoreError> {
        let value = read_value(&self.record_path(key)).await?;
        Ok(value.map(|value| Record {
            key: key.clone(),
            value,
        }))
    }

    async fn upsert(
        &self,
        key: &RecordKey,
        value: serde_json::Value,
    ) -> Result<Record, StoreError> {
        let dir = self.table_dir(&key.table);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let path = self.record_path(key);
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("json.{}.{seq}.tmp", std::process::id()));
        let contents = serde_json::to_string_pretty(&value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(Record {
            key: key.clone(),
            value,
        })
    }

    async fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.record_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed(e.to_string())),
        }
    }

    async fn query(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let dir = self.table_dir(table);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
        {
            let Some(id) = entry.file_name().to_str().and_then(filename_to_id) else {
                continue;
            };
            // Deleted between read_dir and read: skip it.
            let Some(value) = read_value(&entry.path()).await? else {
                continue;
            };
            if filter.matches(&value) {
                records.push(Record {
                    key: RecordKey::new(table, id),
                    value,
                });
            }
        }
        records.sort_by(|a, b| a.key.id.cmp(&b.key.id));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_encoding_roundtrip() {
        let ids = [
            "simple",
            "b1:priority:s1",
            "path/to/key",
            "has spaces",
            "emoji🎉",
            "dots.in.id",
        ];
        for id in &ids {
            let filename = id_to_filename(id);
            let decoded = filename_to_id(&filename).unwrap();
            assert_eq!(*id, decoded, "roundtrip failed for {id}");
        }
    }

    #[test]
    fn encoded_ids_are_filesystem_safe() {
        let filename = id_to_filename("b1:priority:../s1");
        assert!(!filename.contains('/'));
        assert!(!filename.contains(':'));
        assert!(filename.ends_with(".json"));
    }

    #[test]
    fn temp_files_are_not_records() {
        assert_eq!(filename_to_id("abc.json.4242.7.tmp"), None);
        assert_eq!(filename_to_id("abc.txt"), None);
    }

    #[test]
    fn truncated_escape_is_rejected() {
        assert_eq!(decode("abc%4"), None);
    }

    #[test]
    fn fs_store_implements_record_store() {
        fn _assert_record_store<T: RecordStore>() {}
        _assert_record_store::<FsStore>();
    }
}
