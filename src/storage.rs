use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde_json::Value;

pub const DARK_MODE_FLAG: &str = "paws-dark";

/// Boolean preferences keyed by name.
pub trait FlagStore {
    fn get_flag(&self, name: &str) -> Option<bool>;
    fn set_flag(&mut self, name: &str, value: bool);
}

/// Flags kept in the browser's localStorage as JSON booleans. Values written
/// as bare `1` / `0` by older pages still read back.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageFlags;

impl FlagStore for LocalStorageFlags {
    fn get_flag(&self, name: &str) -> Option<bool> {
        match LocalStorage::get::<Value>(name) {
            Ok(value) => parse_flag(&value),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                warn!("Ignoring stored flag {}: {}", name, err);
                None
            }
        }
    }

    fn set_flag(&mut self, name: &str, value: bool) {
        if let Err(err) = LocalStorage::set(name, value) {
            warn!("Failed to persist flag {}: {}", name, err);
        }
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) if number.as_u64() == Some(1) => Some(true),
        Value::Number(number) if number.as_u64() == Some(0) => Some(false),
        Value::String(text) if text == "1" => Some(true),
        Value::String(text) if text == "0" => Some(false),
        other => {
            warn!("Unrecognised flag value {}", other);
            None
        }
    }
}

/// Dark-mode switch. Read once when created, written on every toggle.
#[derive(Debug, Clone)]
pub struct ThemePreference<F> {
    store: F,
    dark: bool,
}

impl<F: FlagStore> ThemePreference<F> {
    pub fn load(store: F) -> Self {
        let dark = store.get_flag(DARK_MODE_FLAG).unwrap_or(false);
        Self { store, dark }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn toggle(&mut self) -> bool {
        self.dark = !self.dark;
        self.store.set_flag(DARK_MODE_FLAG, self.dark);
        self.dark
    }
}
