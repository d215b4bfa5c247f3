//! Persistent key-value storage for short key → long URL entries.
//!
//! All entries live in one named table (bucket) of a single redb file.
//! Writes run in serializable write transactions; reads and backups run
//! against MVCC read snapshots and never observe a partially applied write.

mod backup;
mod url_store;

pub use backup::{BackupMeta, BackupSink, BufferSink, FileSink, BACKUP_CONTENT_TYPE};
pub use url_store::{URLS_TABLE, UrlStore};

use crate::errors::Result;

/// 短链接存储接口
///
/// `get` 的未命中是正常结果（`Ok(None)`），不是错误。
pub trait KeyValueStore: Send + Sync {
    /// Point lookup of the long URL stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite `key`, first deleting any other entry whose value equals `value`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Like [`set`](Self::set), but only when `key` is not present yet.
    ///
    /// Returns `false` and writes nothing when the key already exists.
    fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool>;

    /// Number of live entries.
    fn size(&self) -> Result<u64>;

    /// All live entries ordered by key, taken from one read snapshot.
    fn entries(&self) -> Result<Vec<(String, String)>>;

    /// Drop the bucket and every entry in it.
    fn clear(&self) -> Result<()>;

    /// Stream a point-in-time snapshot of the whole store into `sink`.
    ///
    /// Returns the number of bytes written.
    fn backup(&self, filename: &str, sink: &mut dyn BackupSink) -> Result<u64>;
}
