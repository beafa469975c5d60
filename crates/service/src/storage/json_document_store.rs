use std::{path::{Path, PathBuf}, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// A record addressable by a string id.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn id(&self) -> &str;
}

/// JSON file-backed document collection.
///
/// Keeps documents in insertion order. Every mutation is applied to a copy of the
/// collection, written to a sibling temp file and renamed over the target while
/// the write lock is held; the in-memory copy is replaced only once that succeeds.
pub struct JsonDocumentStore<D> {
    inner: Arc<RwLock<Vec<D>>>,
    file_path: PathBuf,
}

impl<D: Document> JsonDocumentStore<D> {
    /// Open the collection at `path`. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let docs: Vec<D> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("{} is not a document array: {e}", file_path.display()))
            })?,
            Err(_) => {
                let empty: Vec<D> = Vec::new();
                write_docs(&file_path, &empty).await?;
                empty
            }
        };
        debug!(path = %file_path.display(), count = docs.len(), "document store opened");

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(docs)), file_path }))
    }

    /// All documents, oldest first.
    pub async fn all(&self) -> Vec<D> {
        self.inner.read().await.clone()
    }

    pub async fn find(&self, id: &str) -> Option<D> {
        let docs = self.inner.read().await;
        docs.iter().find(|d| d.id() == id).cloned()
    }

    /// Append a document and persist.
    pub async fn push(&self, doc: D) -> Result<(), ServiceError> {
        let mut docs = self.inner.write().await;
        let mut next = docs.clone();
        next.push(doc);
        write_docs(&self.file_path, &next).await?;
        *docs = next;
        Ok(())
    }

    /// Mutate the document with `id` and persist; returns its new state.
    pub async fn modify<F>(&self, id: &str, f: F) -> Result<Option<D>, ServiceError>
    where
        F: FnOnce(&mut D),
    {
        let mut docs = self.inner.write().await;
        let Some(pos) = docs.iter().position(|d| d.id() == id) else { return Ok(None); };
        let mut next = docs.clone();
        f(&mut next[pos]);
        let updated = next[pos].clone();
        write_docs(&self.file_path, &next).await?;
        *docs = next;
        Ok(Some(updated))
    }

    /// Remove the document with `id` and persist; returns what was removed.
    pub async fn remove(&self, id: &str) -> Result<Option<D>, ServiceError> {
        let mut docs = self.inner.write().await;
        let Some(pos) = docs.iter().position(|d| d.id() == id) else { return Ok(None); };
        let mut next = docs.clone();
        let removed = next.remove(pos);
        write_docs(&self.file_path, &next).await?;
        *docs = next;
        Ok(Some(removed))
    }
}

// 先写临时文件再 rename，避免半截文件
async fn write_docs<D: Serialize>(path: &Path, docs: &[D]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(docs).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::Storage(format!("{}: {e}", path.display())));
    }
    Ok(())
}
