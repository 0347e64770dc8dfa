use bytes::Bytes;
use log::trace;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, RwLock};

use crate::key_manager::KeyManager;
use crate::key_template::{KeyData, KeyTemplate};
use crate::utilities::error::*;

/// Registry maps type URLs to key managers.
///
/// It is populated once at startup and then shared by reference; lookups only take the read
/// lock. `M` narrows the capability a registry hands out, e.g. `Registry<dyn AeadKeyManager>`
/// for DEM resolution.
pub struct Registry<M: ?Sized + KeyManager = dyn KeyManager> {
    pub(super) key_managers: RwLock<HashMap<String, Arc<M>>>,
}

impl<M: ?Sized + KeyManager> Default for Registry<M> {
    fn default() -> Self {
        Self {
            key_managers: RwLock::new(HashMap::new()),
        }
    }
}

impl<M: ?Sized + KeyManager> Debug for Registry<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Registry");
        match self.type_urls() {
            Ok(type_urls) => debug.field("type_urls", &type_urls),
            Err(_) => debug.field("type_urls", &"<poisoned>"),
        };
        debug.finish()
    }
}

impl<M: ?Sized + KeyManager> Registry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key manager under its own type URL.
    ///
    /// A type URL can only be registered once.
    pub fn register_key_manager(&self, key_manager: Arc<M>) -> Result<()> {
        let type_url = key_manager.key_type().to_string();
        let mut key_managers = self
            .key_managers
            .write()
            .map_err(|err| Error::Other(err.to_string()))?;
        if key_managers.contains_key(&type_url) {
            return Err(Error::KeyManagerAlreadyRegistered(type_url));
        }
        trace!("registering key manager for {type_url}");
        key_managers.insert(type_url, key_manager);
        Ok(())
    }

    /// Resolve the key manager registered for `type_url`
    pub fn key_manager(&self, type_url: &str) -> Result<Arc<M>> {
        let key_managers = self
            .key_managers
            .read()
            .map_err(|err| Error::Other(err.to_string()))?;
        key_managers
            .get(type_url)
            .cloned()
            .ok_or_else(|| Error::UnknownKeyType(type_url.to_string()))
    }

    pub fn contains(&self, type_url: &str) -> Result<bool> {
        let key_managers = self
            .key_managers
            .read()
            .map_err(|err| Error::Other(err.to_string()))?;
        Ok(key_managers.contains_key(type_url))
    }

    /// Registered type URLs in sorted order
    pub fn type_urls(&self) -> Result<Vec<String>> {
        let key_managers = self
            .key_managers
            .read()
            .map_err(|err| Error::Other(err.to_string()))?;
        let mut type_urls: Vec<String> = key_managers.keys().cloned().collect();
        type_urls.sort();
        Ok(type_urls)
    }

    /// Generate a fresh serialized key for the template through the manager of its type URL
    pub fn new_key(&self, key_template: &KeyTemplate) -> Result<Bytes> {
        let key_manager = self.key_manager(&key_template.type_url)?;
        trace!("new key for {}", key_template.type_url);
        key_manager.key_factory().new_key(&key_template.value)
    }

    /// Generate fresh key data for the template through the manager of its type URL
    pub fn new_key_data(&self, key_template: &KeyTemplate) -> Result<KeyData> {
        let key_manager = self.key_manager(&key_template.type_url)?;
        trace!("new key data for {}", key_template.type_url);
        key_manager.key_factory().new_key_data(&key_template.value)
    }
}
