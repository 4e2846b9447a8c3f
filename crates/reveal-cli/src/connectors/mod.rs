//! Bundled connectors.

pub mod catalog;

use reveal_core::AppConfig;
use reveal_engine::{Connector, ConnectorRegistry, RegistryError};

use crate::editor::ExternalEditor;
use catalog::{CatalogConnector, CONNECTOR_NAME};

/// Register every bundled connector.
pub fn register_builtin(
    registry: &ConnectorRegistry,
    config: &AppConfig,
) -> Result<(), RegistryError> {
    let display = config.display.clone();
    let editor = config.editor.clone();
    registry.register(CONNECTOR_NAME, move || {
        let editor = ExternalEditor::from_config(&editor);
        let connector = CatalogConnector::new(Box::new(editor), &display);
        Ok(Box::new(connector) as Box<dyn Connector>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin() {
        let registry = ConnectorRegistry::new();
        register_builtin(&registry, &AppConfig::default()).unwrap();

        assert_eq!(registry.names(), vec!["catalog"]);
        let connector = registry.create("catalog").unwrap();
        assert_eq!(connector.name(), "Catalog (NOT CONNECTED)");

        assert!(matches!(
            register_builtin(&registry, &AppConfig::default()),
            Err(RegistryError::AlreadyRegistered(_))
        ));
    }
}
