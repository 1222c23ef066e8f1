use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{Error, Result, anyhow};

use super::KeyValue;

/// Settings that live as long as the process. Useful when the host has
/// no durable storage to offer.
#[derive(Default)]
pub struct MemorySettingsStore(RwLock<HashMap<String, String>>);

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let map = self.0.read().map_err(|_| anyhow!("Settings lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut map = self.0.write().map_err(|_| anyhow!("Settings lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut map = self.0.write().map_err(|_| anyhow!("Settings lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}
