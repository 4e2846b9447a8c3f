//! Session bootstrap.
//!
//! Picks a connector from the registry, picks stored or new credentials and
//! connects. The whole selection repeats until a connector reports success,
//! so the main loop never starts disconnected.

use crate::connector::Connector;
use crate::credentials::{strip_site, CredentialStore};
use crate::error::{EngineError, EngineResult};
use crate::registry::ConnectorRegistry;
use crate::render::numbered;
use crate::terminal::Terminal;

const NEW_CONNECTION: &str = "New connection";

/// Run connector and credential selection until a connection succeeds.
pub fn establish(
    io: &mut dyn Terminal,
    registry: &ConnectorRegistry,
    credentials: &mut dyn CredentialStore,
    max_width: usize,
) -> EngineResult<Box<dyn Connector>> {
    let names = registry.names();
    if names.is_empty() {
        return Err(EngineError::NoConnectors);
    }

    loop {
        io.print("To which service would you like to connect?");
        io.print(&numbered(&names, max_width).join("\n"));
        let choice = select_option(io, names.len())?;
        let name = &names[choice - 1];

        let mut connector = match registry.create(name) {
            Ok(connector) => connector,
            Err(e) => {
                tracing::warn!("Connector {} could not be created: {}", name, e);
                io.print_error(&format!("ERROR: Connector \"{}\" is not valid!", name));
                io.print_error(&format!("Error details: {}", e));
                continue;
            }
        };
        io.print(&connector.name());
        io.clear();

        let stored = stored_connections(io, credentials);
        let mut entries = vec![NEW_CONNECTION.to_string()];
        entries.extend(
            stored
                .iter()
                .map(|(site, username)| format!("{} as {}", site, username)),
        );
        io.print("Which connection would you like to use?");
        io.print(&numbered(&entries, max_width).join("\n"));
        let choice = select_option(io, entries.len())?;
        io.clear();

        let (site, username, secret) = if choice == 1 {
            new_connection(io, credentials)?
        } else {
            let (site, username) = stored[choice - 2].clone();
            let secret = credentials.secret(&site, &username).unwrap_or_else(|e| {
                tracing::warn!("Could not read secret for {}: {}", site, e);
                None
            });
            (site, username, secret)
        };

        let connected = match secret {
            Some(secret) => connector.connect(&endpoint_for(&site), &username, &secret),
            None => false,
        };

        if connected {
            tracing::info!("Connected to {} as {}", site, username);
            io.print(&format!("Connected to {}", connector.name()));
            return Ok(connector);
        }

        tracing::warn!("Connection to {} as {} failed", site, username);
        io.print_error(&format!("Could not connect to {}", connector.name()));
    }
}

/// Read until the user picks a number in `1..=count`.
fn select_option(io: &mut dyn Terminal, count: usize) -> EngineResult<usize> {
    loop {
        let line = io.read_line("> ")?.ok_or(EngineError::InputClosed)?;
        let line = line.trim();
        match line.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(n),
            _ if line.is_empty() => {}
            _ => io.print_error("ERROR! Please select one of the available options"),
        }
    }
}

/// Stored sites that still have a username on record.
fn stored_connections(
    io: &mut dyn Terminal,
    credentials: &dyn CredentialStore,
) -> Vec<(String, String)> {
    let sites = match credentials.list_sites() {
        Ok(sites) => sites,
        Err(e) => {
            tracing::warn!("Could not list stored connections: {}", e);
            io.print_error(&format!("ERROR! {}", e));
            return Vec::new();
        }
    };

    sites
        .into_iter()
        .filter_map(|site| match credentials.username(&site) {
            Ok(Some(username)) => Some((site, username)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Could not read username for {}: {}", site, e);
                None
            }
        })
        .collect()
}

/// Prompt for a new site, username and secret, and remember them.
fn new_connection(
    io: &mut dyn Terminal,
    credentials: &mut dyn CredentialStore,
) -> EngineResult<(String, String, Option<String>)> {
    io.print("URL:");
    let url = io.read_line("")?.ok_or(EngineError::InputClosed)?;
    io.print("Username:");
    let username = io.read_line("")?.ok_or(EngineError::InputClosed)?;
    io.print("Password/token:");
    let secret = io.read_secret("")?.ok_or(EngineError::InputClosed)?;
    io.clear();

    let site = strip_site(&url);
    let username = username.trim().to_string();
    match credentials.save_credentials(&site, &username, &secret) {
        Ok(Some(_)) => tracing::debug!("Saved credentials for {}", site),
        Ok(None) => tracing::warn!("Credentials for {} did not persist", site),
        Err(e) => {
            tracing::warn!("Could not save credentials for {}: {}", site, e);
            io.print_error(&format!("ERROR! {}", e));
        }
    }

    Ok((site, username, Some(secret)))
}

/// Endpoint handed to `Connector::connect` for a stored site.
pub fn endpoint_for(site: &str) -> String {
    if site.contains("://") {
        site.to_string()
    } else {
        format!("https://{}", site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialError, MockCredentialStore};
    use crate::terminal::BufferedTerminal;
    use crate::testing::{ScriptedConnector, SECRET};

    fn registry() -> ConnectorRegistry {
        let registry = ConnectorRegistry::new();
        registry
            .register("broken", || Err("missing module".to_string()))
            .unwrap();
        registry
            .register("scripted", || {
                Ok(Box::new(ScriptedConnector::new()) as Box<dyn Connector>)
            })
            .unwrap();
        registry
    }

    fn store_with(site: &'static str, secret: &'static str) -> MockCredentialStore {
        let mut store = MockCredentialStore::new();
        store
            .expect_list_sites()
            .returning(move || Ok(vec![site.to_string()]));
        store
            .expect_username()
            .returning(|_| Ok(Some("ana".to_string())));
        store
            .expect_secret()
            .withf(move |s, user| s == site && user == "ana")
            .returning(move |_, _| Ok(Some(secret.to_string())));
        store
    }

    #[test]
    fn test_stored_connection() {
        let mut io = BufferedTerminal::new(["2", "2"]);
        let mut store = store_with("wiki.example.com", SECRET);

        let connector = establish(&mut io, &registry(), &mut store, 80).unwrap();

        assert_eq!(connector.name(), "Scripted");
        assert!(io.printed("1. broken"));
        assert!(io.printed("2. wiki.example.com as ana"));
        assert!(io.printed("Connected to Scripted"));
    }

    #[test]
    fn test_invalid_selection_is_reprompted() {
        let mut io = BufferedTerminal::new(["9", "x", "", "2", "2"]);
        let mut store = store_with("wiki.example.com", SECRET);

        establish(&mut io, &registry(), &mut store, 80).unwrap();

        let errors = io
            .output()
            .iter()
            .filter(|l| *l == "ERROR! Please select one of the available options")
            .count();
        assert_eq!(errors, 2);
    }

    #[test]
    fn test_invalid_connector_restarts_selection() {
        let mut io = BufferedTerminal::new(["1", "2", "2"]);
        let mut store = store_with("wiki.example.com", SECRET);

        establish(&mut io, &registry(), &mut store, 80).unwrap();

        assert!(io.printed("ERROR: Connector \"broken\" is not valid!"));
        assert!(io.printed("Error details: Connector 'broken' could not be created: missing module"));
    }

    #[test]
    fn test_failed_connect_retries_until_success() {
        let mut store = MockCredentialStore::new();
        store
            .expect_list_sites()
            .returning(|| Ok(vec!["wiki.example.com".to_string()]));
        store
            .expect_username()
            .returning(|_| Ok(Some("ana".to_string())));
        store
            .expect_secret()
            .times(1)
            .returning(|_, _| Ok(Some("wrong".to_string())));
        store
            .expect_save_credentials()
            .withf(|site, user, secret| site == "wiki.example.com" && user == "ana" && secret == SECRET)
            .times(1)
            .returning(|_, user, _| Ok(Some(user.to_string())));

        let mut io = BufferedTerminal::new([
            "2",
            "2",
            "2",
            "1",
            "https://wiki.example.com/",
            "ana",
            SECRET,
        ]);

        let connector = establish(&mut io, &registry(), &mut store, 80).unwrap();

        assert_eq!(connector.name(), "Scripted");
        assert!(io.printed("Could not connect to Scripted"));
        assert!(io.printed("Password/token:"));
        assert_eq!(io.pending_input(), 0);
    }

    #[test]
    fn test_store_errors_fall_back_to_new_connection() {
        let mut store = MockCredentialStore::new();
        store
            .expect_list_sites()
            .returning(|| Err(CredentialError::Parse("bad toml".to_string())));
        store
            .expect_save_credentials()
            .returning(|_, _, _| Err(CredentialError::Io("read-only".to_string())));

        let mut io = BufferedTerminal::new(["2", "1", "wiki.example.com", "ana", SECRET]);

        let connector = establish(&mut io, &registry(), &mut store, 80).unwrap();

        assert_eq!(connector.name(), "Scripted");
        assert!(io.printed("ERROR! Credential store is malformed: bad toml"));
        assert!(io.printed("ERROR! Credential store I/O failed: read-only"));
    }

    #[test]
    fn test_input_closed_during_selection() {
        let mut io = BufferedTerminal::new(["2"]);
        let mut store = store_with("wiki.example.com", SECRET);

        let result = establish(&mut io, &registry(), &mut store, 80);
        assert!(matches!(result, Err(EngineError::InputClosed)));
    }

    #[test]
    fn test_empty_registry() {
        let mut io = BufferedTerminal::default();
        let mut store = MockCredentialStore::new();

        let result = establish(&mut io, &ConnectorRegistry::new(), &mut store, 80);
        assert!(matches!(result, Err(EngineError::NoConnectors)));
    }

    #[test]
    fn test_endpoint_for() {
        assert_eq!(endpoint_for("wiki.example.com"), "https://wiki.example.com");
        assert_eq!(endpoint_for("file:///srv/catalog.json"), "file:///srv/catalog.json");
    }
}
