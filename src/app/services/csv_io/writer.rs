//! CSV and text output with atomic file replacement
//!
//! Output is encoded in memory first and then written to a temporary file in
//! the destination directory. The temporary file is renamed over the
//! destination only after every byte has been written and synced, so a failed
//! or interrupted run leaves either the previous file or nothing at the
//! destination path, never a truncated one.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{Error, Result};

/// Encode a header row followed by serde-serializable records
///
/// The header is written explicitly so an empty record set still produces a
/// valid file with a header row. Each record must serialize to exactly as
/// many fields as there are headers.
pub fn encode_table<H, T>(headers: &[H], records: &[T]) -> Result<Vec<u8>>
where
    H: AsRef<str>,
    T: Serialize,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(headers.iter().map(|h| h.as_ref()))?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::io("Failed to finish CSV encoding", e.into_error()))
}

/// Write `bytes` to `path`, replacing any existing file atomically
///
/// Returns the number of bytes written.
pub fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<u64> {
    let display = path.display().to_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|e| {
        Error::output_write(
            &display,
            format!("Failed to create directory {}", directory.display()),
            Some(e),
        )
    })?;

    let mut temp_file = NamedTempFile::new_in(&directory).map_err(|e| {
        Error::output_write(&display, "Failed to create temporary file", Some(e))
    })?;

    temp_file
        .write_all(bytes)
        .and_then(|_| temp_file.flush())
        .and_then(|_| temp_file.as_file().sync_all())
        .map_err(|e| Error::output_write(&display, "Failed to write temporary file", Some(e)))?;

    debug!(
        "Wrote {} bytes to {}, moving into place",
        bytes.len(),
        temp_file.path().display()
    );

    temp_file
        .persist(path)
        .map_err(|e| Error::output_write(&display, "Failed to replace file", Some(e.error)))?;

    Ok(bytes.len() as u64)
}

/// Encode and atomically write a CSV table
///
/// Returns the size of the written file in bytes.
pub async fn write_table<H, T>(path: &Path, headers: &[H], records: &[T]) -> Result<u64>
where
    H: AsRef<str>,
    T: Serialize,
{
    let bytes = encode_table(headers, records)?;
    let size = write_bytes(path, bytes).await?;
    info!(
        "Wrote {} rows to {} ({} bytes)",
        records.len(),
        path.display(),
        size
    );
    Ok(size)
}

/// Atomically write newline-separated text lines
///
/// Returns the size of the written file in bytes.
pub async fn write_lines(path: &Path, lines: &[String]) -> Result<u64> {
    let size = write_bytes(path, lines.join("\n").into_bytes()).await?;
    info!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(size)
}

async fn write_bytes(path: &Path, bytes: Vec<u8>) -> Result<u64> {
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || persist_atomically(&target, &bytes))
        .await
        .map_err(|e| {
            Error::output_write(
                path.display().to_string(),
                format!("Write task failed: {}", e),
                None,
            )
        })?
}
