use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::legacy::{self, Shape};
use crate::songbook::{Record, Songbook};

/// File-backed song list.
///
/// Each operation reads the whole file, applies its change and writes the
/// whole file back. The internal lock turns that cycle into one critical
/// section, so writers sharing a `SongStore` never drop each other's
/// changes. Other processes writing the same file are not coordinated.
#[derive(Debug)]
pub struct SongStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SongStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents of the file. A missing file is created empty; an
    /// unreadable or malformed one is treated as empty.
    pub async fn load(&self) -> Songbook {
        let _guard = self.lock.lock().await;
        self.read_book().await.0
    }

    /// Overwrite the file with `book`.
    pub async fn save(&self, book: &Songbook) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write_book(book).await
    }

    /// Prepend a record and persist it.
    pub async fn insert(&self, name: &str, command: &str) -> Result<Record, StoreError> {
        let _guard = self.lock.lock().await;
        let (mut book, _) = self.read_book().await;
        let record = book.insert(name, command)?.clone();
        self.write_book(&book).await?;
        info!("Saved song {:?} ({} total)", record.name, book.len());
        Ok(record)
    }

    /// Remove every record named `name` (ignoring case). The file is only
    /// rewritten when something was removed.
    pub async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let (mut book, _) = self.read_book().await;
        if !book.remove(name) {
            return Ok(false);
        }
        self.write_book(&book).await?;
        info!("Removed song {:?} ({} left)", name.trim(), book.len());
        Ok(true)
    }

    pub async fn find(&self, query: &str) -> Vec<Record> {
        self.load().await.find(query).into_iter().cloned().collect()
    }

    /// Record with the given [`Record::fingerprint`], if still present.
    pub async fn by_fingerprint(&self, fingerprint: &str) -> Option<Record> {
        self.load().await.by_fingerprint(fingerprint).cloned()
    }

    pub async fn list_all(&self) -> Vec<Record> {
        self.load().await.into_records()
    }

    /// Rewrite a map-shaped file as a record list. Returns whether a
    /// conversion happened.
    pub async fn migrate_legacy(&self) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let (book, shape) = self.read_book().await;
        if shape != Some(Shape::Legacy) {
            return Ok(false);
        }
        self.write_book(&book).await?;
        info!(
            "Converted {} legacy entries in {}",
            book.len(),
            self.path.display()
        );
        Ok(true)
    }

    /// Must be called with the lock held. `None` shape means the file was
    /// missing or unusable.
    async fn read_book(&self) -> (Songbook, Option<Shape>) {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Creating empty song list at {}", self.path.display());
                if let Err(e) = self.write_book(&Songbook::new()).await {
                    warn!("{}", e);
                }
                return (Songbook::new(), None);
            }
            Err(e) => {
                warn!("Cannot read {}: {}, treating as empty", self.path.display(), e);
                return (Songbook::new(), None);
            }
        };

        match legacy::decode(&data) {
            Ok((book, shape)) => {
                if shape == Shape::Legacy {
                    info!(
                        "Importing legacy song map from {} ({} entries)",
                        self.path.display(),
                        book.len()
                    );
                }
                (book, Some(shape))
            }
            Err(e) => {
                warn!("Malformed {}: {}, treating as empty", self.path.display(), e);
                (Songbook::new(), None)
            }
        }
    }

    /// Must be called with the lock held. Writes a sibling temp file and
    /// renames it into place.
    async fn write_book(&self, book: &Songbook) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(book)?;
        let tmp = self.tmp_path();

        let persist = |source: std::io::Error| StoreError::Persist {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(persist)?;
        }
        fs::write(&tmp, data).await.map_err(persist)?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(persist(e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
