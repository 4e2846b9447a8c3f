//! File-backed credential store.
//!
//! `connections.toml` maps each site to its username. Secrets live apart in
//! `secrets.toml`, readable by the owner only.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use reveal_engine::{strip_site, CredentialError, CredentialStore};

const CONNECTIONS_FILE: &str = "connections.toml";
const SECRETS_FILE: &str = "secrets.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Connections {
    #[serde(default)]
    sites: BTreeMap<String, SiteEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SiteEntry {
    username: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Secrets {
    /// site -> username -> secret
    #[serde(default)]
    secrets: BTreeMap<String, BTreeMap<String, String>>,
}

/// Credential store over two TOML files in one directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    directory: PathBuf,
}

impl FileCredentialStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn connections(&self) -> Result<Connections, CredentialError> {
        read_toml(&self.directory.join(CONNECTIONS_FILE))
    }

    fn secrets(&self) -> Result<Secrets, CredentialError> {
        read_toml(&self.directory.join(SECRETS_FILE))
    }
}

impl CredentialStore for FileCredentialStore {
    fn list_sites(&self) -> Result<Vec<String>, CredentialError> {
        Ok(self.connections()?.sites.into_keys().collect())
    }

    fn username(&self, site: &str) -> Result<Option<String>, CredentialError> {
        let site = strip_site(site);
        Ok(self
            .connections()?
            .sites
            .remove(&site)
            .map(|entry| entry.username))
    }

    fn secret(&self, site: &str, username: &str) -> Result<Option<String>, CredentialError> {
        let site = strip_site(site);
        Ok(self
            .secrets()?
            .secrets
            .remove(&site)
            .and_then(|mut users| users.remove(username)))
    }

    fn save_credentials(
        &mut self,
        site: &str,
        username: &str,
        secret: &str,
    ) -> Result<Option<String>, CredentialError> {
        let site = strip_site(site);
        fs::create_dir_all(&self.directory).map_err(|e| CredentialError::Io(e.to_string()))?;

        let mut connections = self.connections()?;
        connections.sites.insert(
            site.clone(),
            SiteEntry {
                username: username.to_string(),
            },
        );
        write_toml(&self.directory.join(CONNECTIONS_FILE), &connections, false)?;

        let mut secrets = self.secrets()?;
        secrets
            .secrets
            .entry(site.clone())
            .or_default()
            .insert(username.to_string(), secret.to_string());
        write_toml(&self.directory.join(SECRETS_FILE), &secrets, true)?;

        tracing::debug!("Saved credentials for {} as {}", site, username);

        let stored = self.secret(&site, username)?;
        Ok((stored.as_deref() == Some(secret)).then(|| username.to_string()))
    }
}

fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, CredentialError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|e| CredentialError::Io(e.to_string()))?;
    toml::from_str(&content).map_err(|e| CredentialError::Parse(format!("{}: {}", path.display(), e)))
}

fn write_toml<T: Serialize>(path: &Path, value: &T, private: bool) -> Result<(), CredentialError> {
    let content = toml::to_string(value).map_err(|e| CredentialError::Serialize(e.to_string()))?;
    let mut file = if private {
        open_private(path)
    } else {
        File::create(path)
    }
    .map_err(|e| CredentialError::Io(e.to_string()))?;
    file.write_all(content.as_bytes())
        .map_err(|e| CredentialError::Io(e.to_string()))
}

/// Open for writing, readable by the owner only before anything is written.
/// A file left with looser permissions is tightened first.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    File::create(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());

        assert!(store.list_sites().unwrap().is_empty());
        assert!(store.username("wiki.example.com").unwrap().is_none());
        assert!(store.secret("wiki.example.com", "ana").unwrap().is_none());
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileCredentialStore::new(dir.path().join("nested"));

        let saved = store
            .save_credentials("https://wiki.example.com/", "ana", "t0ken")
            .unwrap();

        assert_eq!(saved.as_deref(), Some("ana"));
        assert_eq!(store.list_sites().unwrap(), vec!["wiki.example.com"]);
        assert_eq!(
            store.username("wiki.example.com").unwrap().as_deref(),
            Some("ana")
        );
        assert_eq!(
            store.secret("http://wiki.example.com", "ana").unwrap().as_deref(),
            Some("t0ken")
        );
    }

    #[test]
    fn test_secrets_are_kept_apart() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileCredentialStore::new(dir.path());
        store.save_credentials("wiki.example.com", "ana", "t0ken").unwrap();

        let connections = fs::read_to_string(dir.path().join(CONNECTIONS_FILE)).unwrap();
        assert!(connections.contains("ana"));
        assert!(!connections.contains("t0ken"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(dir.path().join(SECRETS_FILE))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_secrets_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        fn mode(path: &Path) -> u32 {
            fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        let fresh = tempfile::tempdir().unwrap();
        let mut store = FileCredentialStore::new(fresh.path().join("new"));
        store.save_credentials("wiki.example.com", "ana", "t0ken").unwrap();
        assert_eq!(mode(&fresh.path().join("new").join(SECRETS_FILE)), 0o600);

        let loose = tempfile::tempdir().unwrap();
        let secrets = loose.path().join(SECRETS_FILE);
        fs::write(&secrets, "").unwrap();
        fs::set_permissions(&secrets, fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = FileCredentialStore::new(loose.path());
        store.save_credentials("wiki.example.com", "ana", "t0ken").unwrap();
        assert_eq!(mode(&secrets), 0o600);
        assert_eq!(
            store.secret("wiki.example.com", "ana").unwrap().as_deref(),
            Some("t0ken")
        );
    }

    #[test]
    fn test_saving_again_replaces_username() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileCredentialStore::new(dir.path());
        store.save_credentials("wiki.example.com", "ana", "one").unwrap();
        store.save_credentials("docs.example.com", "bo", "two").unwrap();
        store.save_credentials("wiki.example.com", "cy", "three").unwrap();

        assert_eq!(
            store.list_sites().unwrap(),
            vec!["docs.example.com", "wiki.example.com"]
        );
        assert_eq!(
            store.username("wiki.example.com").unwrap().as_deref(),
            Some("cy")
        );
        assert_eq!(
            store.secret("wiki.example.com", "ana").unwrap().as_deref(),
            Some("one")
        );
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONNECTIONS_FILE), "sites = [").unwrap();
        let store = FileCredentialStore::new(dir.path());

        assert!(matches!(store.list_sites(), Err(CredentialError::Parse(_))));
    }
}
