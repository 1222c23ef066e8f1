//! Durable key-value settings: the API credential and the
//! enabled/disabled flag.
pub mod db;
pub mod memory;
pub use db::SqliteSettingsStore;
pub use memory::MemorySettingsStore;

use anyhow::{Error, Result};

pub const CREDENTIAL_KEY: &str = "credential";
pub const ENABLED_KEY: &str = "enabled";

/// Raw string storage. The typed accessors on `SettingsStore` are
/// built on top of these so every backend encodes values the same way.
pub trait KeyValue: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&self, key: &str) -> Result<(), Error>;
}

pub trait SettingsStore: Send + Sync {
    fn credential(&self) -> Result<Option<String>, Error>;
    fn set_credential(&self, credential: &str) -> Result<(), Error>;
    fn clear_credential(&self) -> Result<(), Error>;
    fn is_enabled(&self) -> Result<bool, Error>;
    fn set_enabled(&self, enabled: bool) -> Result<(), Error>;
}

impl<T: KeyValue> SettingsStore for T {
    fn credential(&self) -> Result<Option<String>, Error> {
        self.get(CREDENTIAL_KEY)
    }

    fn set_credential(&self, credential: &str) -> Result<(), Error> {
        // Stored as entered, the endpoint is the only judge of a key
        self.set(CREDENTIAL_KEY, credential)
    }

    fn clear_credential(&self) -> Result<(), Error> {
        self.remove(CREDENTIAL_KEY)
    }

    fn is_enabled(&self) -> Result<bool, Error> {
        Ok(self.get(ENABLED_KEY)?.as_deref() == Some("true"))
    }

    fn set_enabled(&self, enabled: bool) -> Result<(), Error> {
        self.set(ENABLED_KEY, if enabled { "true" } else { "false" })
    }
}

/// A credential that is present and not blank.
pub fn usable_credential(store: &dyn SettingsStore) -> Result<Option<String>, Error> {
    Ok(store.credential()?.filter(|c| !c.trim().is_empty()))
}
