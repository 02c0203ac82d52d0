use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use crate::models::Pool;

/// Flat-file snapshot of the significant-pool list. Every save overwrites
/// the whole file; there is no merging with prior contents.
pub struct PoolCache {
    path: PathBuf,
}

impl PoolCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write errors are logged and swallowed; a failed save leaves the
    /// previous file untouched at worst.
    pub fn save(&self, pools: &[Pool]) {
        match File::create(&self.path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                match serde_json::to_writer_pretty(writer, pools) {
                    Ok(()) => {
                        tracing::debug!("💾 Saved {} pools -> {}", pools.len(), self.path.display());
                    }
                    Err(e) => {
                        tracing::warn!("Cache write failed for {}: {}", self.path.display(), e);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Cannot create cache file {}: {}", self.path.display(), e);
            }
        }
    }

    /// `None` means no usable cache (absent, unreadable or corrupt), which
    /// is distinct from `Some(vec![])`, an existing but empty snapshot.
    /// Files written by older versions may contain null entries; those are
    /// dropped here.
    pub fn load(&self) -> Option<Vec<Pool>> {
        if !self.path.exists() {
            return None;
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Cannot open cache file {}: {}", self.path.display(), e);
                return None;
            }
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, Vec<Option<Pool>>>(reader) {
            Ok(entries) => Some(entries.into_iter().flatten().collect()),
            Err(e) => {
                tracing::warn!("Cache file {} is corrupt: {}", self.path.display(), e);
                None
            }
        }
    }
}
