//! redb 存储后端
//!
//! One file, one table. redb serializes write transactions and gives every
//! read transaction a consistent snapshot, which is exactly the isolation the
//! store promises to its callers.

use std::fs::File;
use std::path::{Path, PathBuf};

use redb::backends::InMemoryBackend;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition, TableError};
use tracing::{debug, info, warn};

use super::{BackupMeta, BackupSink, KeyValueStore};
use crate::errors::{Result, ShortkeyError};

/// The single bucket holding every short key → long URL entry.
pub const URLS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("urls");

pub struct UrlStore {
    db: Database,
    path: Option<PathBuf>,
}

impl UrlStore {
    /// 打开或创建数据库文件，并确保 `urls` 表存在
    ///
    /// 失败属于启动错误：调用方不应在没有可用存储的情况下继续提供服务。
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShortkeyError::store_open(format!(
                    "cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let db = Database::create(path).map_err(|e| {
            ShortkeyError::store_open(format!("cannot open {}: {}", path.display(), e))
        })?;

        let store = Self {
            db,
            path: Some(path.to_path_buf()),
        };
        store
            .ensure_bucket()
            .map_err(|e| ShortkeyError::store_open(e.message().to_string()))?;

        info!("Opened store at {}", path.display());
        Ok(store)
    }

    /// 基于内存后端的存储，语义与文件存储一致，进程退出即丢失
    pub fn in_memory() -> Result<Self> {
        let db = Database::builder()
            .create_with_backend(InMemoryBackend::new())
            .map_err(|e| ShortkeyError::store_open(format!("cannot create in-memory store: {}", e)))?;

        let store = Self { db, path: None };
        store
            .ensure_bucket()
            .map_err(|e| ShortkeyError::store_open(e.message().to_string()))?;

        debug!("Opened in-memory store");
        Ok(store)
    }

    /// File backing this store, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Release the file handle. Consumes the store so it cannot be used afterwards.
    pub fn close(self) {
        match &self.path {
            Some(path) => info!("Closing store at {}", path.display()),
            None => debug!("Closing in-memory store"),
        }
        drop(self.db);
    }

    fn ensure_bucket(&self) -> Result<()> {
        let txn = self.db.begin_write()?;
        txn.open_table(URLS_TABLE)?;
        txn.commit()?;
        Ok(())
    }

    /// Copy the bucket as seen by one read transaction into a fresh database file.
    fn write_snapshot(&self, target: File) -> Result<()> {
        let read = self.db.begin_read()?;
        let snapshot = Database::builder().create_file(target)?;

        let write = snapshot.begin_write()?;
        {
            let mut out = write.open_table(URLS_TABLE)?;
            match read.open_table(URLS_TABLE) {
                Ok(table) => {
                    for item in table.iter()? {
                        let (key, value) = item?;
                        out.insert(key.value(), value.value())?;
                    }
                }
                // 表已被 clear 删除：快照是一个空库
                Err(TableError::TableDoesNotExist(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        write.commit()?;
        Ok(())
    }
}

impl KeyValueStore for UrlStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(URLS_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(URLS_TABLE)?;
            put_unique(&mut table, key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let txn = self.db.begin_write()?;
        let inserted = {
            let mut table = txn.open_table(URLS_TABLE)?;
            let exists = table.get(key)?.is_some();
            if !exists {
                put_unique(&mut table, key, value)?;
            }
            !exists
        };

        if inserted {
            txn.commit()?;
        } else {
            txn.abort()?;
        }
        Ok(inserted)
    }

    fn size(&self) -> Result<u64> {
        let txn = self.db.begin_read()?;
        match txn.open_table(URLS_TABLE) {
            Ok(table) => Ok(table.len()?),
            Err(TableError::TableDoesNotExist(_)) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(URLS_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            entries.push((key.value().to_string(), value.value().to_string()));
        }
        Ok(entries)
    }

    fn clear(&self) -> Result<()> {
        let txn = self.db.begin_write()?;
        let existed = txn.delete_table(URLS_TABLE)?;
        txn.commit()?;
        warn!("Store cleared (bucket existed: {})", existed);
        Ok(())
    }

    fn backup(&self, filename: &str, sink: &mut dyn BackupSink) -> Result<u64> {
        let scratch = tempfile::NamedTempFile::new()?;
        self.write_snapshot(scratch.reopen()?)?;

        let mut snapshot = scratch.reopen()?;
        let meta = BackupMeta {
            filename: filename.to_string(),
            content_length: snapshot.metadata()?.len(),
        };

        sink.begin(&meta)?;
        let written = std::io::copy(&mut snapshot, &mut *sink)?;
        sink.flush()?;

        info!("Backup '{}' written: {} bytes", meta.filename, written);
        Ok(written)
    }
}

/// 写入前删除值相同的旧条目，保证一个 URL 只对应一个短码
fn put_unique(table: &mut redb::Table<'_, &str, &str>, key: &str, value: &str) -> Result<()> {
    let mut duplicate = None;
    for item in table.iter()? {
        let (existing_key, existing_value) = item?;
        if existing_value.value() == value {
            duplicate = Some(existing_key.value().to_string());
            break;
        }
    }

    if let Some(old_key) = duplicate {
        debug!("Dropping duplicate entry '{}' for {}", old_key, value);
        table.remove(old_key.as_str())?;
    }

    table.insert(key, value)?;
    Ok(())
}
