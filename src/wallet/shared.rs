use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::{registry::CredentialRegistry, snapshot::RegistrySnapshot, RegistryError};

/// Long-lived handle to the current [CredentialRegistry].
///
/// The registry itself is never mutated. [SharedRegistry::replace] builds a
/// new one from a fresh snapshot and swaps it in; readers that already loaded
/// the previous registry keep querying it unchanged.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    current: RwLock<Arc<CredentialRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: CredentialRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Returns the current registry.
    pub fn load(&self) -> Arc<CredentialRegistry> {
        // the guarded value is a plain pointer, a poisoned lock still holds a valid one
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Builds a registry from `snapshot` and makes it current, returning the
    /// one it replaced.
    ///
    /// # Errors
    /// Returns the construction error and keeps the current registry if the
    /// snapshot is invalid.
    pub fn replace(
        &self,
        snapshot: RegistrySnapshot,
    ) -> Result<Arc<CredentialRegistry>, RegistryError> {
        let next = Arc::new(CredentialRegistry::new(snapshot)?);
        let credentials = next.len();

        let previous = std::mem::replace(
            &mut *self
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner),
            next,
        );

        debug!(credentials, "replaced credential registry");
        Ok(previous)
    }
}

impl From<CredentialRegistry> for SharedRegistry {
    fn from(registry: CredentialRegistry) -> Self {
        Self::new(registry)
    }
}
