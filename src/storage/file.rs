//! One JSON file per pool.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{PoolRecord, PoolStore};
use crate::domain::Address;
use crate::error::ExchangeError;
use crate::pools::ExchangePool;

const RECORD_EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = ".tmp";

/// Writes `bytes` to `path` so that readers see either the old file or the
/// new one, never a torn write.
///
/// Each write gets its own temp file, so concurrent saves of one pool only
/// race on the final rename.
fn atomic_write_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::other("record path has no parent directory"))?;
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    // directory entry for the rename
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

/// Pool records under a directory, named `<hex pool address>.json`.
///
/// # Examples
///
/// ```rust
/// use exchange_amm::config::ExchangeConfig;
/// use exchange_amm::domain::{Address, FeeTier};
/// use exchange_amm::pools::ExchangePool;
/// use exchange_amm::storage::{FileStore, PoolStore};
/// use exchange_amm::traits::FromConfig;
///
/// let dir = std::env::temp_dir().join("exchange-amm-doc-store");
/// let store = FileStore::open(&dir).expect("directory");
/// let cfg = ExchangeConfig::new(Address::from_bytes([7u8; 32]), FeeTier::default()).expect("valid");
/// let pool = ExchangePool::from_config(&cfg).expect("pool");
///
/// store.save(&pool).expect("saved");
/// assert_eq!(store.load(&pool.address()).expect("read"), Some(pool.clone()));
/// store.remove(&pool.address()).expect("removed");
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// Temp files left by an interrupted write are deleted.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Storage`] if the directory cannot be created or
    /// listed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ExchangeError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        for entry in fs::read_dir(&root)? {
            let path = entry?.path();
            if path.to_str().is_some_and(|p| p.ends_with(TEMP_SUFFIX)) {
                warn!(path = %path.display(), "removing interrupted pool record write");
                fs::remove_file(&path)?;
            }
        }
        info!(root = %root.display(), "opened pool store");
        Ok(Self { root })
    }

    /// The store's directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, pool_address: &Address) -> PathBuf {
        self.root
            .join(pool_address.to_hex())
            .with_extension(RECORD_EXTENSION)
    }

    fn decode(
        path: &Path,
        bytes: &[u8],
        expected: &Address,
    ) -> Result<ExchangePool, ExchangeError> {
        let record = PoolRecord::from_json(bytes)?;
        if record.pool_address() != *expected {
            return Err(ExchangeError::Storage(format!(
                "{} holds the record of pool {}",
                path.display(),
                record.pool_address()
            )));
        }
        record.into_pool()
    }
}

impl PoolStore for FileStore {
    #[instrument(skip_all, fields(pool = %pool.address()))]
    fn save(&self, pool: &ExchangePool) -> Result<(), ExchangeError> {
        let record = PoolRecord::from_pool(pool);
        let path = self.path_for(&record.pool_address());
        atomic_write_sync(&path, &record.to_json()?)?;
        debug!(path = %path.display(), "pool record written");
        Ok(())
    }

    fn load(&self, pool_address: &Address) -> Result<Option<ExchangePool>, ExchangeError> {
        let path = self.path_for(pool_address);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::decode(&path, &bytes, pool_address).map(Some)
    }

    fn load_all(&self) -> Result<Vec<ExchangePool>, ExchangeError> {
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(address) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<Address>().ok())
            else {
                warn!(path = %path.display(), "skipping file with a non-address name");
                continue;
            };
            found.push((address, path));
        }
        found.sort();
        found
            .into_iter()
            .map(|(address, path)| Self::decode(&path, &fs::read(&path)?, &address))
            .collect()
    }

    #[instrument(skip_all, fields(pool = %pool_address))]
    fn remove(&self, pool_address: &Address) -> Result<bool, ExchangeError> {
        match fs::remove_file(self.path_for(pool_address)) {
            Ok(()) => {
                info!("pool record removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
