//! Style application sink.
//!
//! The sink is the boundary to the host's presentation layer: a named
//! variable registry (CSS custom properties in a browser host, a styles map
//! in a native shell). This core only writes and removes variables; rendering
//! them is the host's concern.

use std::collections::HashMap;
use std::sync::Mutex;

/// Variable names written whenever a theme is applied.
pub mod vars {
    pub const PRIMARY: &str = "color-primary";
    pub const PRIMARY_HOVER: &str = "color-primary-hover";
    pub const PRIMARY_ACTIVE: &str = "color-primary-active";
    pub const PRIMARY_LIGHT: &str = "color-primary-light";
    pub const SECONDARY: &str = "color-secondary";
    pub const SECONDARY_HOVER: &str = "color-secondary-hover";

    /// Every variable this core owns, removed as a set when branding is
    /// reverted.
    pub const ALL: [&str; 6] = [
        PRIMARY,
        PRIMARY_HOVER,
        PRIMARY_ACTIVE,
        PRIMARY_LIGHT,
        SECONDARY,
        SECONDARY_HOVER,
    ];
}

/// Named-variable registry the resolver writes into.
///
/// Removal reverts a variable to the host's system default; it is never set
/// to an empty value.
pub trait StyleSink: Send + Sync {
    fn set_var(&self, name: &str, value: &str);

    fn remove_var(&self, name: &str);
}

/// In-memory sink for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemorySink {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.values.lock().ok()?.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().map(|v| v.is_empty()).unwrap_or(true)
    }
}

impl StyleSink for MemorySink {
    fn set_var(&self, name: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_var(&self, name: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(name);
        }
    }
}
