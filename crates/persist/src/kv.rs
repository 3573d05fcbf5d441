//! Key-value store trait and implementations.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

/// Synchronous string key-value surface.
///
/// Last-write-wins per key; no transactional guarantees are offered or
/// assumed. `get` swallows storage errors (a missing or unreadable value is
/// simply absent); writes surface them so callers can decide to log or fail.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// In-memory store for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        values.remove(key);
        Ok(())
    }
}

/// JSON-file-backed store.
///
/// The whole map is read and rewritten on every mutation; at nine small keys
/// that is the honest trade for crash-safe simplicity. A process-local mutex
/// serializes the read-modify-write cycle.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Store under the platform's application data directory.
    pub fn in_app_data() -> anyhow::Result<Self> {
        let base = dirs::data_dir().context("no application data directory available")?;
        Ok(Self::new(base.join("sitedesk").join("client_store.json")))
    }

    fn load(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "store file unreadable; starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn save(&self, values: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory {:?}", parent))?;
        }
        let raw = serde_json::to_string(values).context("failed to serialize store")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write store file {:?}", self.path))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().ok()?;
        self.load().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("file store lock poisoned"))?;
        let mut values = self.load();
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("file store lock poisoned"))?;
        let mut values = self.load();
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.set("access_token", "first").unwrap();
        store.set("access_token", "second").unwrap();
        assert_eq!(store.get("access_token").as_deref(), Some("second"));

        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token"), None);
    }

    #[test]
    fn file_store_roundtrips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_store.json");

        let store = FileStore::new(path.clone());
        store.set("tenant_slug", "acme-build").unwrap();
        drop(store);

        let reopened = FileStore::new(path);
        assert_eq!(reopened.get("tenant_slug").as_deref(), Some("acme-build"));
    }

    #[test]
    fn file_store_survives_corrupt_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_store.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.get("user"), None);
        store.set("user", "{}").unwrap();
        assert_eq!(store.get("user").as_deref(), Some("{}"));
    }

    #[test]
    fn removing_a_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("client_store.json"));
        store.remove("refresh_token").unwrap();
    }
}
