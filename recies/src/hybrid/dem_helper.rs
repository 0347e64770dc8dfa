use super::*;

/// EciesAeadHkdfDemHelper binds a DEM template to the AEAD key manager that understands it
#[derive(Debug, Clone)]
pub struct EciesAeadHkdfDemHelper {
    dem_template: KeyTemplate,
    symmetric_key_size: usize,
}

impl EciesAeadHkdfDemHelper {
    /// Resolve and validate `dem_template` against the registered AEAD key managers
    pub fn new(
        dem_template: &KeyTemplate,
        dem_registry: &Registry<dyn AeadKeyManager>,
    ) -> Result<Self> {
        let key_manager = match dem_registry.key_manager(&dem_template.type_url) {
            Ok(key_manager) => key_manager,
            Err(Error::UnknownKeyType(type_url)) => {
                return Err(Error::UnregisteredDemKeyType(type_url))
            }
            Err(err) => return Err(err),
        };
        let symmetric_key_size = key_manager.symmetric_key_size(&dem_template.value)?;

        Ok(Self {
            dem_template: dem_template.clone(),
            symmetric_key_size,
        })
    }

    /// Length in bytes of the key material the KEM must derive for the DEM
    pub fn symmetric_key_size(&self) -> usize {
        self.symmetric_key_size
    }

    pub fn dem_template(&self) -> &KeyTemplate {
        &self.dem_template
    }
}
