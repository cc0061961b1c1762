/// Persistence backends for the seen-token map
///
/// The store hands the complete map to `save` on every new entry; backends
/// never see partial updates.
use crate::errors::BoostBotError;
use crate::logger::{self, LogTag};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Composite key → first-seen timestamp
pub type SeenTokenMap = BTreeMap<String, String>;

pub trait SeenTokenBackend: Send + Sync {
    /// Read persisted state. Missing or unreadable state is an empty map.
    fn load(&self) -> SeenTokenMap;

    /// Replace persisted state with `entries`
    fn save(&self, entries: &SeenTokenMap) -> Result<(), BoostBotError>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

// ============================================================================
// JSON FILE BACKEND
// ============================================================================

/// Single JSON object on disk, rewritten in full on every save
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "seen_tokens.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SeenTokenBackend for JsonFileBackend {
    fn load(&self) -> SeenTokenMap {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                logger::info(
                    LogTag::Storage,
                    &format!("No seen-token file at {}, starting empty", self.path.display()),
                );
                return SeenTokenMap::new();
            }
            Err(e) => {
                logger::warning(
                    LogTag::Storage,
                    &format!(
                        "Failed to read seen-token file {}: {} - starting empty",
                        self.path.display(),
                        e
                    ),
                );
                return SeenTokenMap::new();
            }
        };

        match serde_json::from_str::<SeenTokenMap>(&contents) {
            Ok(entries) => {
                logger::debug(
                    LogTag::Storage,
                    &format!(
                        "Loaded {} seen tokens from {}",
                        entries.len(),
                        self.path.display()
                    ),
                );
                entries
            }
            Err(e) => {
                logger::warning(
                    LogTag::Storage,
                    &format!(
                        "Seen-token file {} is not a JSON object of strings: {} - starting empty",
                        self.path.display(),
                        e
                    ),
                );
                SeenTokenMap::new()
            }
        }
    }

    fn save(&self, entries: &SeenTokenMap) -> Result<(), BoostBotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BoostBotError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string(entries)?;

        // Write to temporary file first, then rename over the real file
        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| {
            BoostBotError::Storage(format!("Failed to write {}: {}", temp.display(), e))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            BoostBotError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        logger::debug(
            LogTag::Storage,
            &format!("Saved {} seen tokens to {}", entries.len(), self.path.display()),
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

/// Keeps the last saved map in memory. Clones share the same map, so a test
/// can hold one clone and inspect what the store persisted.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<SeenTokenMap>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing entries
    pub fn with_entries(entries: SeenTokenMap) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
            fail_saves: Arc::new(Mutex::new(false)),
        }
    }

    /// Snapshot of what has been persisted
    pub fn snapshot(&self) -> SeenTokenMap {
        self.entries.lock().clone()
    }

    /// Make subsequent saves fail (simulates a full disk)
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }
}

impl SeenTokenBackend for MemoryBackend {
    fn load(&self) -> SeenTokenMap {
        self.snapshot()
    }

    fn save(&self, entries: &SeenTokenMap) -> Result<(), BoostBotError> {
        if *self.fail_saves.lock() {
            return Err(BoostBotError::Storage("in-memory backend refused save".to_string()));
        }
        *self.entries.lock() = entries.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_roundtrip_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested").join("seen.json"));

        let mut entries = SeenTokenMap::new();
        entries.insert("solana_abc".to_string(), "2024-01-01 00:00:00 UTC".to_string());
        backend.save(&entries).unwrap();

        assert_eq!(backend.load(), entries);
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("absent.json"));
        assert!(backend.load().is_empty());
    }

    #[test]
    fn test_corrupted_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileBackend::new(&path).load().is_empty());

        std::fs::write(&path, "[\"an\", \"array\"]").unwrap();
        assert!(JsonFileBackend::new(&path).load().is_empty());
    }

    #[test]
    fn test_reads_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen_tokens.json");
        std::fs::write(
            &path,
            r#"{"solana_7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr": "2024-12-01 10:00:00 UTC"}"#,
        )
        .unwrap();

        let entries = JsonFileBackend::new(&path).load();
        assert_eq!(
            entries.get("solana_7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr"),
            Some(&"2024-12-01 10:00:00 UTC".to_string())
        );
    }

    #[test]
    fn test_memory_backend_shares_state() {
        let backend = MemoryBackend::new();
        let observer = backend.clone();

        let mut entries = SeenTokenMap::new();
        entries.insert("k".to_string(), "v".to_string());
        backend.save(&entries).unwrap();
        assert_eq!(observer.snapshot(), entries);

        observer.set_fail_saves(true);
        assert!(backend.save(&entries).is_err());
    }
}
