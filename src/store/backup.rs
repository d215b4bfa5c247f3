//! Backup sinks
//!
//! A sink receives the snapshot metadata first, then the snapshot bytes.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const BACKUP_CONTENT_TYPE: &str = "application/octet-stream";

/// 备份元数据（下载协议所需）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupMeta {
    /// Suggested file name for the snapshot.
    pub filename: String,
    /// Exact number of snapshot bytes that follow.
    pub content_length: u64,
}

impl BackupMeta {
    pub fn content_type(&self) -> &'static str {
        BACKUP_CONTENT_TYPE
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub trait BackupSink: Write {
    /// Called exactly once, before any snapshot byte is written.
    fn begin(&mut self, meta: &BackupMeta) -> io::Result<()>;
}

/// 内存缓冲 sink，HTTP 下载使用
#[derive(Debug, Default)]
pub struct BufferSink {
    meta: Option<BackupMeta>,
    buf: Vec<u8>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meta(&self) -> Option<&BackupMeta> {
        self.meta.as_ref()
    }

    pub fn into_parts(self) -> (Option<BackupMeta>, Vec<u8>) {
        (self.meta, self.buf)
    }
}

impl Write for BufferSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl BackupSink for BufferSink {
    fn begin(&mut self, meta: &BackupMeta) -> io::Result<()> {
        self.buf.reserve(meta.content_length as usize);
        self.meta = Some(meta.clone());
        Ok(())
    }
}

/// 文件 sink，写入指定路径（忽略建议文件名）
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
    expected: u64,
    written: u64,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            expected: 0,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sync the file to disk and check that the announced length was written.
    pub fn finish(mut self) -> io::Result<u64> {
        let file = self
            .file
            .take()
            .ok_or_else(|| io::Error::other("backup sink was never started"))?;
        file.sync_all()?;
        if self.written != self.expected {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "backup truncated: wrote {} of {} bytes",
                    self.written, self.expected
                ),
            ));
        }
        Ok(self.written)
    }
}

impl Write for FileSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("backup sink was never started"))?;
        let n = file.write(data)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl BackupSink for FileSink {
    fn begin(&mut self, meta: &BackupMeta) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        self.file = Some(File::create(&self.path)?);
        self.expected = meta.content_length;
        self.written = 0;
        Ok(())
    }
}
