//! Append-only newline-delimited JSON log of accepted reservations.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::models::ReservationRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reservation log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("reservation record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("reservation log writer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct ReservationLog {
    path: PathBuf,
}

impl ReservationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the log's parent directory if it is missing.
    pub async fn prepare(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Writes the record as one complete line with a single append-mode
    /// `write`, so concurrent submissions never interleave within a line.
    /// tokio's `File` chunks large writes, hence the blocking handle.
    pub async fn append(&self, record: &ReservationRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
            file.write_all(&line)?;
            Ok(())
        })
        .await?
    }

    /// Parses every line back. A missing log reads as empty.
    #[cfg(test)]
    pub async fn read_all(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::models::ReservationRequest;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_record(name: &str) -> ReservationRecord {
        let fields = json!({
            "owner-name": name,
            "email": "owner@example.com",
            "hamster-name": "Fluffy",
            "check-in": "2026-10-21",
            "check-out": "2026-10-23",
            "notes": "likes sunflower seeds"
        });
        let fields = match fields {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        ReservationRecord::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
            ReservationRequest::from_fields(fields),
        )
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReservationLog::new(dir.path().join("nested/reservations.ndjson"));
        log.prepare().await.unwrap();

        log.append(&sample_record("Ada")).await.unwrap();
        log.append(&sample_record("Grace")).await.unwrap();

        let raw = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.ends_with('\n'));

        let first: serde_json::Value = serde_json::from_str(raw.lines().next().unwrap()).unwrap();
        assert_eq!(first["createdAt"], "2026-10-18T09:30:00.000Z");
        assert_eq!(first["reservation"]["notes"], "likes sunflower seeds");
    }

    #[tokio::test]
    async fn test_read_all_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReservationLog::new(dir.path().join("reservations.ndjson"));
        let record = sample_record("Ada");
        log.append(&record).await.unwrap();

        let records = log.read_all().await.unwrap();
        assert_eq!(records, vec![record]);
    }

    #[tokio::test]
    async fn test_missing_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReservationLog::new(dir.path().join("absent.ndjson"));
        assert!(log.read_all().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_large_appends_keep_lines_whole() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReservationLog::new(dir.path().join("reservations.ndjson"));

        // Control characters escape to `\u0001`, so each line is several MiB.
        let mut tasks = Vec::new();
        for i in 0..4 {
            let log = log.clone();
            let mut record = sample_record(&format!("Owner {i}"));
            let mut fields = record.reservation.fields().clone();
            fields.insert("notes".to_string(), json!("\u{1}".repeat(500_000)));
            record.reservation = ReservationRequest::from_fields(fields);
            tasks.push(tokio::spawn(async move { log.append(&record).await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let records = log.read_all().await.unwrap();
        assert_eq!(records.len(), 4);
        for record in records {
            assert_eq!(
                record.reservation.field("notes").map(|n| n.len()),
                Some(500_000)
            );
        }
    }

    #[tokio::test]
    async fn test_append_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReservationLog::new(dir.path());
        let err = log.append(&sample_record("Ada")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
