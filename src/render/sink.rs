//! Buffered file output with flush-on-completion.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A buffered writer scoped to one output file.
///
/// Content is not guaranteed on disk until [`finish`](Self::finish)
/// returns; dropping the sink without finishing may lose buffered bytes.
pub struct RenderSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RenderSink {
    /// Create (or truncate) the output file, creating parent directories
    /// as needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(&path)?);
        Ok(Self { writer, path })
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append text to the buffer.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Flush everything to disk and return the output path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
