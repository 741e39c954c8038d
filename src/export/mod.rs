//! Csv export of the usage log. Rendering is kept separate from writing so the document is fully
//! built in memory before the target file is touched.

use std::path::Path;

use chrono::{Local, TimeZone};
use fs4::tokio::AsyncFileExt;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, error, info};

use crate::{
    tracker::{
        error::{LogAction, TrackerError},
        log::UsageLog,
    },
    utils::time::{format_duration, format_timestamp},
};

pub const DEFAULT_EXPORT_FILE: &str = "usage_log.csv";
pub const CSV_HEADER: &str = "Start Time, End Time, Duration";

/// Renders the log using local time for the start and end columns.
pub fn to_csv(log: &UsageLog) -> Result<String, TrackerError> {
    to_csv_in(log, &Local)
}

pub fn to_csv_in<Tz: TimeZone>(log: &UsageLog, timezone: &Tz) -> Result<String, TrackerError>
where
    Tz::Offset: std::fmt::Display,
{
    if log.is_empty() {
        return Err(TrackerError::EmptyLog {
            action: LogAction::Export,
        });
    }

    let mut document = String::from(CSV_HEADER);
    document.push('\n');
    for entry in log.entries() {
        document.push_str(&format!(
            "{}, {}, {}\n",
            format_timestamp(entry.start(), timezone),
            format_timestamp(entry.end(), timezone),
            format_duration(entry.duration())
        ));
    }
    Ok(document)
}

/// Replaces `path` with `contents` in a single write. Truncation and the write both happen under
/// an exclusive lock.
pub async fn write_export(path: &Path, contents: &str) -> Result<(), TrackerError> {
    let to_error = |source: std::io::Error| {
        error!("Failed to export usage log into {path:?}: {source}");
        TrackerError::ExportIo {
            path: path.to_path_buf(),
            source,
        }
    };

    debug!("Writing {} bytes into {path:?}", contents.len());
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await
        .map_err(to_error)?;

    file.lock_exclusive().map_err(to_error)?;
    let result = write_all(&mut file, contents).await;
    file.unlock_async().await.map_err(to_error)?;
    result.map_err(to_error)?;

    info!("Usage log exported to {path:?}");
    Ok(())
}

async fn write_all(file: &mut File, contents: &str) -> std::io::Result<()> {
    file.set_len(0).await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await
}
