//! Connector Registry
//!
//! Connector implementations register a named factory at start-up. Session
//! bootstrap lists the names, lets the user pick one and builds a fresh
//! instance from its factory.

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::connector::Connector;

/// Builds a connector instance. Errors carry a human-readable reason.
pub type ConnectorFactory = Box<dyn Fn() -> Result<Box<dyn Connector>, String> + Send + Sync>;

/// Registry for connector factories.
pub struct ConnectorRegistry {
    /// Factories by connector name, in registration order.
    factories: RwLock<IndexMap<String, ConnectorFactory>>,
}

impl ConnectorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(IndexMap::new()),
        }
    }

    /// Register a connector factory.
    ///
    /// Returns an error if a connector with the same name already exists.
    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Result<Box<dyn Connector>, String> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut factories = self.factories.write();
        if factories.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        factories.insert(name.clone(), Box::new(factory));
        tracing::info!("Registered connector: {}", name);
        Ok(())
    }

    /// Build a new instance of the named connector.
    pub fn create(&self, name: &str) -> Result<Box<dyn Connector>, RegistryError> {
        let factories = self.factories.read();
        let factory = factories
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        factory().map_err(|message| RegistryError::Invalid {
            name: name.to_string(),
            message,
        })
    }

    /// Registered connector names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.factories.read().keys().cloned().collect()
    }

    /// Check if a connector with the given name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Get the count of registered connectors.
    pub fn count(&self) -> usize {
        self.factories.read().len()
    }
}

impl Default for ConnectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Connector '{0}' already exists")]
    AlreadyRegistered(String),

    #[error("Connector '{0}' not found")]
    NotFound(String),

    #[error("Connector '{name}' could not be created: {message}")]
    Invalid { name: String, message: String },
}
