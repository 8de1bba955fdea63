use async_trait::async_trait;
use carioca_core::{HandKey, PlayRecord, PlayStore, StoreError};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Append-only store writing `<root>/<collection>.jsonl`, one record per line.
/// Key lookups scan the whole file.
#[derive(Debug)]
pub struct JsonlStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.jsonl"))
    }

    /// Every record in `collection`, oldest first. A missing file is an empty collection.
    pub async fn load(&self, collection: &str) -> Result<Vec<PlayRecord>, StoreError> {
        let mut records = Vec::new();
        self.scan(collection, |record| {
            records.push(record);
            false
        })
        .await?;
        Ok(records)
    }

    /// Feeds records to `visit` until it returns `true`; reports whether it did.
    async fn scan<F>(&self, collection: &str, mut visit: F) -> Result<bool, StoreError>
    where
        F: FnMut(PlayRecord) -> bool + Send,
    {
        let path = self.collection_path(collection);
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(StoreError::Io {
                    context: format!("opening {}", path.display()),
                    source,
                });
            }
        };

        let mut lines = BufReader::new(file).lines();
        let mut scanned = 0usize;
        while let Some(line) = lines.next_line().await.map_err(|source| StoreError::Io {
            context: format!("reading {}", path.display()),
            source,
        })? {
            if line.trim().is_empty() {
                continue;
            }
            scanned += 1;
            let record = PlayRecord::from_json(&line)?;
            if visit(record) {
                trace!(collection, scanned, "scan stopped early");
                return Ok(true);
            }
        }
        trace!(collection, scanned, "scan finished");
        Ok(false)
    }
}

#[async_trait]
impl PlayStore for JsonlStore {
    async fn append(&self, collection: &str, record: PlayRecord) -> Result<(), StoreError> {
        let mut line = record.to_json()?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::Io {
                context: format!("creating store directory {}", self.root.display()),
                source,
            })?;
        let path = self.collection_path(collection);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| StoreError::Io {
                context: format!("opening {} for append", path.display()),
                source,
            })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| StoreError::Io {
                context: format!("appending to {}", path.display()),
                source,
            })?;
        file.flush().await.map_err(|source| StoreError::Io {
            context: format!("flushing {}", path.display()),
            source,
        })?;
        debug!(collection, path = %path.display(), "appended record");
        Ok(())
    }

    async fn exists_by_key(&self, collection: &str, key: &HandKey) -> Result<bool, StoreError> {
        self.scan(collection, |record| &record.key == key).await
    }
}
