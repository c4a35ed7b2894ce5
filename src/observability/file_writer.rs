//! Append-only trace file with size-based rotation.
//!
//! Both plugin threads export into the same file, so every write goes
//! through a mutex-guarded handle. Once the file passes the size limit it is
//! shifted into numbered backups (`modpanel-otlp.json.1` is the newest) and
//! a fresh file is started.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the live file grows past 10 MiB.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept besides the live file.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating line writer.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    backups: usize,
    /// Opened lazily on the first write and dropped on rotation.
    handle: Mutex<Option<File>>,
}

impl FileWriter {
    /// Writer with the default limits: 10 MiB per file, 3 backups.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            backups,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or the file cannot be rotated, opened
    /// or written.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        let file = match handle.as_mut() {
            Some(file) => file,
            None => handle.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            ),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    /// Shifts `file.N` to `file.N+1`, dropping the oldest, then moves the
    /// live file to `file.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = backup_path(&self.file_path, self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..self.backups).rev() {
            let from = backup_path(&self.file_path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.file_path, index + 1))?;
            }
        }

        fs::rename(&self.file_path, backup_path(&self.file_path, 1))
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotation_keeps_newest_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for line in ["first", "second", "third", "fourth"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "third\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 2)).unwrap(), "second\n");
        assert!(!backup_path(&path, 3).exists());
    }
}
