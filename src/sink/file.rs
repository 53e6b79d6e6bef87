use super::{Sink, render_line};
use crate::domain::LogEvent;
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Appends formatted lines to a file, rotating it when it exceeds
/// `max_file_size`.
///
/// Rotation keeps three numbered backups: the oldest (`.3`) is deleted,
/// `.2` becomes `.3`, `.1` becomes `.2`, and the live file becomes `.1`.
/// All I/O failures are absorbed and reported through `tracing`; nothing
/// propagates to the dispatcher.
pub struct FileSink {
    path: PathBuf,
    max_file_size: u64,
    io_guard: Mutex<()>,
}

impl FileSink {
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

    pub fn new(path: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            path: path.into(),
            max_file_size,
            io_guard: Mutex::new(()),
        }
    }

    pub fn with_default_limit(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Self::DEFAULT_MAX_FILE_SIZE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate_if_needed(&self) -> io::Result<()> {
        let size = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len(),
            // Nothing to rotate yet
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(error),
        };
        if size <= self.max_file_size {
            return Ok(());
        }

        let _ = fs::remove_file(self.backup_path(3));
        for index in (1..=2).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")
    }
}

impl Sink for FileSink {
    fn write(&self, event: &LogEvent) {
        let line = render_line(event);
        let _guard = self.io_guard.lock();
        if let Err(error) = self.rotate_if_needed().and_then(|()| self.append(&line)) {
            warn!(path = %self.path.display(), %error, "file sink write failed");
        }
    }
}
