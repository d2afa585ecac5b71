//! Append-only log file writer.
//!
//! Each `write` is flushed immediately so that concurrent processes appending
//! to the same file interleave whole lines.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Shared handle to an append-mode log file.
#[derive(Clone)]
pub struct AppendLogWriter {
    inner: Arc<Mutex<BufWriter<File>>>,
}

impl AppendLogWriter {
    /// Open (or create) `path` in append mode, creating parent directories.
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(BufWriter::with_capacity(8192, file))),
        })
    }
}

impl Write for AppendLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.inner.lock();
        guard.write_all(buf)?;
        guard.flush()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

/// `MakeWriter` handing out clones of one [`AppendLogWriter`].
#[derive(Clone)]
pub struct AppendWriterFactory {
    writer: AppendLogWriter,
}

impl AppendWriterFactory {
    pub fn new(writer: AppendLogWriter) -> Self {
        Self { writer }
    }
}

impl<'a> MakeWriter<'a> for AppendWriterFactory {
    type Writer = AppendLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writer_creates_file_and_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deeply").join("nested").join("relay.jsonl");

        let mut writer = AppendLogWriter::new(&path).unwrap();
        writer.write_all(b"first line\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first line\n");
    }

    #[test]
    fn test_writer_appends_across_handles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.jsonl");

        AppendLogWriter::new(&path)
            .unwrap()
            .write_all(b"one\n")
            .unwrap();
        AppendLogWriter::new(&path)
            .unwrap()
            .write_all(b"two\n")
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_factory_shares_one_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.jsonl");
        let factory = AppendWriterFactory::new(AppendLogWriter::new(&path).unwrap());

        factory.make_writer().write_all(b"a\n").unwrap();
        factory.make_writer().write_all(b"b\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
