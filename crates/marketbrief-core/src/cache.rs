//! File-backed read-through cache keyed by source and hour bucket.
//!
//! Each entry lives at `<dir>/<key>-<bucket>.json`, where `bucket` is the
//! entry's unix-millisecond timestamp truncated to the hour. A lookup only
//! sees entries from the current bucket, which gives a one-hour TTL without
//! any expiry bookkeeping. Unreadable or corrupted files are misses.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::UtcDateTime;

const BUCKET_MS: i128 = 3_600_000;

/// How a run interacts with the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read a current-hour entry if present; write fresh data back. (Default)
    #[default]
    Use,
    /// Skip reads but write fresh data back.
    Refresh,
    /// Neither read nor write.
    Bypass,
}

impl CacheMode {
    pub const fn reads(self) -> bool {
        matches!(self, Self::Use)
    }

    pub const fn writes(self) -> bool {
        !matches!(self, Self::Bypass)
    }
}

#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    mode: CacheMode,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>, mode: CacheMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub const fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Hour bucket containing `at`, in unix milliseconds.
    pub fn bucket(at: UtcDateTime) -> i128 {
        let millis = at.unix_millis();
        millis - millis.rem_euclid(BUCKET_MS)
    }

    pub fn entry_path(&self, key: &str, at: UtcDateTime) -> PathBuf {
        self.dir
            .join(format!("{}-{}.json", sanitize_key(key), Self::bucket(at)))
    }

    pub async fn get<T>(&self, key: &str, at: UtcDateTime) -> Option<T>
    where
        T: DeserializeOwned,
    {
        if !self.mode.reads() {
            return None;
        }

        let path = self.entry_path(key, at);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(error) => {
                debug!(key, path = %path.display(), %error, "cache miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, path = %path.display(), "cache hit");
                Some(value)
            }
            Err(error) => {
                debug!(key, path = %path.display(), %error, "corrupted cache entry treated as miss");
                None
            }
        }
    }

    /// Writes `value` for the bucket containing `at`. Failures are logged, never returned.
    pub async fn put<T>(&self, key: &str, at: UtcDateTime, value: &T)
    where
        T: Serialize + ?Sized,
    {
        if !self.mode.writes() {
            return;
        }

        let path = self.entry_path(key, at);
        let payload = match serde_json::to_string_pretty(value) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(key, %error, "failed to serialize cache entry");
                return;
            }
        };

        if let Err(error) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), %error, "failed to create cache directory");
            return;
        }
        if let Err(error) = tokio::fs::write(&path, payload).await {
            warn!(path = %path.display(), %error, "failed to write cache entry");
        }
    }
}

/// Keeps keys to one path segment.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
