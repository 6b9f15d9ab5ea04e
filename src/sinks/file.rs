//! File sink with size-based rotation
//!
//! Lines are appended to the configured file. Before each write the file
//! size is compared against the rotation threshold (`MAX_LOG_FILE_SIZE`,
//! 5 MiB by default); a full file is renamed to `<file>.01`, older backups
//! shift up by one and `<file>.09` is discarded.

use super::text::Decorations;
use crate::core::{config, Event, LoggerError, Result, Sink, SinkKind, TimestampFormat};
use parking_lot::Mutex;
use std::any::Any;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Number of rotated backups kept next to the live file
pub const MAX_BACKUP_FILES: usize = 9;

pub struct FileSink {
    path: PathBuf,
    max_file_size: Option<u64>,
    timestamp_format: TimestampFormat,
    decorations: Decorations,
    /// Opened on first write
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileSink {
    /// A sink appending to `path`
    ///
    /// An empty path gives a disabled sink that accepts and discards every
    /// call. The file is opened lazily, so a bad path surfaces as a write
    /// error on the first emission.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: None,
            timestamp_format: TimestampFormat::default(),
            decorations: Decorations::default(),
            writer: Mutex::new(None),
        }
    }

    /// Fixed rotation threshold in bytes instead of `MAX_LOG_FILE_SIZE`
    ///
    /// A threshold of 0 disables rotation.
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    /// Flush and release the file handle; the next write reopens it
    pub fn close(&self) -> Result<()> {
        if let Some(mut writer) = self.writer.lock().take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Path of the `index`-th backup, e.g. `app.log.03`
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log")
            .to_string();
        path.set_file_name(format!("{}.{:02}", filename, index));
        path
    }

    fn format_line(&self, event: &Event<'_>) -> String {
        let mut line = String::new();

        if self.decorations.timestamp() {
            line.push_str(&self.timestamp_format.now());
            line.push(' ');
        }

        if self.decorations.correlation_id() {
            if let Some(id) = config::correlation_id() {
                line.push_str(&format!(
                    "[{}] [{}] ",
                    id,
                    event.kind.as_str().to_uppercase()
                ));
            }
        }

        line.push_str(&event.message());
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    fn open(&self) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to open log file: {}", e),
                )
            })?;
        Ok(BufWriter::new(file))
    }

    fn rotate_if_needed(&self, writer: &mut Option<BufWriter<File>>) -> Result<()> {
        let limit = self.max_file_size.unwrap_or_else(config::max_log_file_size);
        if limit == 0 {
            return Ok(());
        }

        let size = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len(),
            Err(_) => return Ok(()),
        };
        if size < limit {
            return Ok(());
        }

        // release the handle before renaming the file underneath it
        if let Some(mut current) = writer.take() {
            current.flush()?;
        }

        let oldest = self.backup_path(MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest).map_err(|e| self.rotation_error("remove", &oldest, e))?;
        }

        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                let to = self.backup_path(index + 1);
                fs::rename(&from, &to).map_err(|e| self.rotation_error("rename", &from, e))?;
            }
        }

        let first = self.backup_path(1);
        fs::rename(&self.path, &first).map_err(|e| self.rotation_error("rename", &self.path, e))
    }

    fn rotation_error(&self, action: &str, target: &Path, e: std::io::Error) -> LoggerError {
        LoggerError::file_rotation(
            self.path.display().to_string(),
            format!("Failed to {} '{}': {}", action, target.display(), e),
        )
    }
}

impl Sink for FileSink {
    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn init(&self) -> Box<dyn Sink> {
        Box::new(Self {
            path: self.path.clone(),
            max_file_size: self.max_file_size,
            timestamp_format: self.timestamp_format.clone(),
            decorations: Decorations::default(),
            writer: Mutex::new(None),
        })
    }

    fn use_timestamp(&self, value: bool) {
        self.decorations.set_timestamp(value);
    }

    fn use_correlation_id(&self, value: bool) {
        self.decorations.set_correlation_id(value);
    }

    /// Stored for symmetry; file lines never carry icons
    fn use_icons(&self, value: bool) {
        self.decorations.set_icons(value);
    }

    fn is_timestamp_enabled(&self) -> bool {
        self.decorations.timestamp()
    }

    fn write(&self, event: &Event<'_>) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let line = self.format_line(event);
        let mut guard = self.writer.lock();
        self.rotate_if_needed(&mut guard)?;

        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        if let Some(writer) = guard.as_mut() {
            writer.write_all(line.as_bytes())?;
            // size checks read the file length
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
