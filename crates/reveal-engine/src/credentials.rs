//! Stored connection credentials.

use thiserror::Error;

/// Errors raised by a credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential store I/O failed: {0}")]
    Io(String),

    #[error("Credential store is malformed: {0}")]
    Parse(String),

    #[error("Could not write credentials: {0}")]
    Serialize(String),
}

/// Sites, usernames and secrets remembered between sessions.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore {
    /// Sites with a stored connection, in a stable order.
    fn list_sites(&self) -> Result<Vec<String>, CredentialError>;

    /// Username stored for a site.
    fn username(&self, site: &str) -> Result<Option<String>, CredentialError>;

    /// Secret stored for a site and username.
    fn secret(&self, site: &str, username: &str) -> Result<Option<String>, CredentialError>;

    /// Remember a connection.
    ///
    /// Returns the stored username once the secret reads back, `None` if it
    /// did not persist.
    fn save_credentials(
        &mut self,
        site: &str,
        username: &str,
        secret: &str,
    ) -> Result<Option<String>, CredentialError>;
}

/// Normalise a site as typed by the user: surrounding whitespace, the
/// `http://`/`https://` scheme and one trailing `/` are removed.
pub fn strip_site(site: &str) -> String {
    let site = site.trim();
    let site = site
        .strip_prefix("https://")
        .or_else(|| site.strip_prefix("http://"))
        .unwrap_or(site);
    site.strip_suffix('/').unwrap_or(site).to_string()
}
