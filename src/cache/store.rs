use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::foundation::error::{ThemeFrameError, ThemeFrameResult};
use crate::render::pixmap::Pixmap;

/// Key-value store for composited frames that outlives a single facade.
///
/// Implementations may be shared between facades and threads. Both operations are fallible so
/// a broken store degrades to in-memory compositing instead of failing a paint.
pub trait FrameCache: Send + Sync {
    /// Look up a previously stored buffer.
    fn get(&self, key: &str) -> ThemeFrameResult<Option<Pixmap>>;

    /// Store `pixmap` under `key`, replacing any previous entry.
    fn put(&self, key: &str, pixmap: &Pixmap) -> ThemeFrameResult<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, Pixmap>,
    puts: HashMap<String, usize>,
    gets: usize,
}

/// Process-local [`FrameCache`] backed by a map.
///
/// Counts lookups and per-key stores, which makes write coalescing observable.
#[derive(Debug, Default)]
pub struct MemoryFrameCache {
    state: Mutex<MemoryState>,
}

impl MemoryFrameCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ThemeFrameResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| ThemeFrameError::cache("memory cache lock poisoned"))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    /// Return `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .lock()
            .map(|s| s.entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Number of `put` calls for `key`.
    pub fn put_count(&self, key: &str) -> usize {
        self.lock()
            .map(|s| s.puts.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total number of `put` calls.
    pub fn total_puts(&self) -> usize {
        self.lock().map(|s| s.puts.values().sum()).unwrap_or(0)
    }

    /// Total number of `get` calls.
    pub fn get_count(&self) -> usize {
        self.lock().map(|s| s.gets).unwrap_or(0)
    }
}

impl FrameCache for MemoryFrameCache {
    fn get(&self, key: &str) -> ThemeFrameResult<Option<Pixmap>> {
        let mut state = self.lock()?;
        state.gets += 1;
        Ok(state.entries.get(key).cloned())
    }

    fn put(&self, key: &str, pixmap: &Pixmap) -> ThemeFrameResult<()> {
        let mut state = self.lock()?;
        *state.puts.entry(key.to_string()).or_insert(0) += 1;
        state.entries.insert(key.to_string(), pixmap.clone());
        Ok(())
    }
}

const DISK_MAGIC: &[u8; 4] = b"TFPX";
const HEADER_LEN: usize = 16;

/// [`FrameCache`] storing one file per key under a directory.
///
/// File names are the xxh3 hash of the key. Entries hold the full key, so a hash collision
/// reads as a miss. Pixels are kept premultiplied to avoid a lossy round trip. Writes go to a
/// temporary file that is then renamed over the entry.
#[derive(Clone, Debug)]
pub struct DiskFrameCache {
    dir: PathBuf,
}

impl DiskFrameCache {
    /// Open (and create if needed) a cache directory.
    pub fn new(dir: impl Into<PathBuf>) -> ThemeFrameResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            ThemeFrameError::cache(format!(
                "failed to create cache directory '{}': {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let hash = xxhash_rust::xxh3::xxh3_64(key.as_bytes());
        self.dir.join(format!("{hash:016x}.frame"))
    }
}

impl FrameCache for DiskFrameCache {
    fn get(&self, key: &str) -> ThemeFrameResult<Option<Pixmap>> {
        let path = self.entry_path(key);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ThemeFrameError::cache(format!(
                    "failed to read cache entry '{}': {e}",
                    path.display()
                )));
            }
        };
        decode_entry(key, &bytes)
    }

    fn put(&self, key: &str, pixmap: &Pixmap) -> ThemeFrameResult<()> {
        let path = self.entry_path(key);
        let tmp = path.with_extension(format!("tmp{}", std::process::id()));
        std::fs::write(&tmp, encode_entry(key, pixmap)).map_err(|e| {
            ThemeFrameError::cache(format!(
                "failed to write cache entry '{}': {e}",
                tmp.display()
            ))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            std::fs::remove_file(&tmp).ok();
            ThemeFrameError::cache(format!(
                "failed to commit cache entry '{}': {e}",
                path.display()
            ))
        })
    }
}

fn encode_entry(key: &str, pixmap: &Pixmap) -> Vec<u8> {
    let key = key.as_bytes();
    let mut out = Vec::with_capacity(HEADER_LEN + key.len() + pixmap.data().len());
    out.extend_from_slice(DISK_MAGIC);
    out.extend_from_slice(&pixmap.width().to_le_bytes());
    out.extend_from_slice(&pixmap.height().to_le_bytes());
    out.extend_from_slice(&(key.len() as u32).to_le_bytes());
    out.extend_from_slice(key);
    out.extend_from_slice(pixmap.data());
    out
}

fn decode_entry(key: &str, bytes: &[u8]) -> ThemeFrameResult<Option<Pixmap>> {
    if bytes.len() < HEADER_LEN || &bytes[..4] != DISK_MAGIC {
        return Err(ThemeFrameError::cache("cache entry has an invalid header"));
    }
    let word = |at: usize| {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };
    let width = word(4);
    let height = word(8);
    let key_len = word(12) as usize;

    let key_end = HEADER_LEN
        .checked_add(key_len)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| ThemeFrameError::cache("cache entry is truncated"))?;
    if &bytes[HEADER_LEN..key_end] != key.as_bytes() {
        return Ok(None);
    }
    Pixmap::from_premul_rgba8(width, height, bytes[key_end..].to_vec())
        .map(Some)
        .map_err(|e| ThemeFrameError::cache(format!("cache entry is corrupt: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/cache/store.rs"]
mod tests;
