use async_trait::async_trait;
use burrow_core::gateway::{RecordGateway, Result};
use burrow_core::{Record, StorageError};
use csv::{ReaderBuilder, WriterBuilder};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Column names, in durable column order.
const HEADER: [&str; 3] = ["target", "code", "expiry"];

/// A gateway that stores the record set as one CSV file.
///
/// ## File Format
///
/// ```text
/// target,code,expiry
/// https://example.com/a,aB3x9,2999-01-01
/// "https://example.com/?q=a,b",custom,2030-06-01
/// ```
///
/// Fields are quoted only when they contain a delimiter, a quote or a line
/// break, and are never trimmed, so every `target` round-trips byte for byte.
///
/// ## Missing File
///
/// A missing file loads as an empty record set. The file is created by the
/// first write-back.
///
/// ## Crash Safety
///
/// Write-back goes to a sibling `.tmp` file which is flushed, fsynced and
/// renamed over the data file. A failed write leaves the previous file
/// intact.
#[derive(Debug, Clone)]
pub struct CsvFileGateway {
    path: PathBuf,
}

impl CsvFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordGateway for CsvFileGateway {
    async fn load(&self) -> Result<Vec<Record>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_records(&path))
            .await
            .map_err(|e| StorageError::Load(format!("load task failed: {e}")))?
    }

    async fn write_all(&self, records: &[Record]) -> Result<()> {
        let path = self.path.clone();
        let records = records.to_vec();
        tokio::task::spawn_blocking(move || write_records(&path, &records))
            .await
            .map_err(|e| StorageError::Write(format!("write task failed: {e}")))?
    }
}

fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "data file does not exist, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StorageError::Load(format!(
                "failed to open {}: {e}",
                path.display()
            )))
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| StorageError::Load(format!("failed to read header: {e}")))?
        .clone();
    if headers.is_empty() {
        debug!(path = %path.display(), "data file is empty");
        return Ok(Vec::new());
    }
    if !headers.iter().eq(HEADER) {
        return Err(StorageError::InvalidData(format!(
            "unexpected header {:?}, expected {:?}",
            headers.iter().collect::<Vec<_>>(),
            HEADER
        )));
    }

    let mut records = Vec::new();
    for (row_idx, row) in reader.deserialize::<Record>().enumerate() {
        // 1-based, after the header line
        let row_num = row_idx + 2;
        let record =
            row.map_err(|e| StorageError::InvalidData(format!("row {row_num}: {e}")))?;
        records.push(record);
    }

    debug!(path = %path.display(), count = records.len(), "read data file");
    Ok(records)
}

fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let tmp_path = tmp_path_for(path);

    if let Err(e) = write_tmp(&tmp_path, records) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            if cleanup.kind() != ErrorKind::NotFound {
                warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove tmp file");
            }
        }
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StorageError::Write(format!("failed to replace {}: {e}", path.display()))
    })?;

    sync_parent_dir(path);
    debug!(path = %path.display(), count = records.len(), "wrote data file");
    Ok(())
}

fn write_tmp(tmp_path: &Path, records: &[Record]) -> Result<()> {
    let write_err = |e: &dyn std::fmt::Display| {
        StorageError::Write(format!("failed to write {}: {e}", tmp_path.display()))
    };

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp_path)
        .map_err(|e| write_err(&e))?;

    // The header is written by hand so an empty record set still has one.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    writer.write_record(HEADER).map_err(|e| write_err(&e))?;
    for record in records {
        writer.serialize(record).map_err(|e| write_err(&e))?;
    }

    let buffered = writer.into_inner().map_err(|e| write_err(&e))?;
    let file = buffered.into_inner().map_err(|e| write_err(&e))?;
    file.sync_all().map_err(|e| write_err(&e))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("records"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Makes the rename itself durable. Best effort: the data is already in place.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
        warn!(dir = %parent.display(), error = %e, "failed to fsync data directory");
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}
