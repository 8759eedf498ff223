//! Credentials of the server to talk to.
//!
//! Read from a TOML file (`~/.jac-credentials.toml` unless told otherwise),
//! then overridden field by field by command line flags. The file is never
//! written by this tool.

use crate::jac_error::{CredentialField, JacError};
use crate::constant::log::ERR_CREDENTIALS_INVALID_BASE64;
use base64::Engine;
use dirs::home_dir;
use formatx::formatx;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CREDENTIALS_FILE_NAME: &str = ".jac-credentials.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CredentialsFile {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// password stored base64 encoded
    pub password_base64: Option<String>,
    pub api_token: Option<String>,
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Default, Clone)]
pub struct CredentialOverrides {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub server_url: String,
    pub username: String,
    /// api token when one is known, password otherwise
    pub secret: String,
}

pub fn get_default_credentials_path() -> PathBuf {
    home_dir().unwrap_or_default().join(CREDENTIALS_FILE_NAME)
}

impl CredentialsFile {
    /// A missing file reads as empty; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, JacError> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let unreadable = |reason: String| JacError::CredentialsUnreadable {
            source_path: path.to_path_buf(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        toml::from_str(&content).map_err(|e| unreadable(e.to_string()))
    }

    fn decoded_password(&self, path: &Path) -> Result<Option<String>, JacError> {
        if let Some(pwd) = self.password.as_ref().filter(|p| !p.is_empty()) {
            return Ok(Some(pwd.clone()));
        }

        match self.password_base64.as_ref().filter(|p| !p.is_empty()) {
            Some(encoded) => base64::prelude::BASE64_STANDARD
                .decode(encoded.trim())
                .ok()
                .and_then(|v| String::from_utf8(v).ok())
                .map(Some)
                .ok_or_else(|| JacError::CredentialsUnreadable {
                    source_path: path.to_path_buf(),
                    reason: formatx!(ERR_CREDENTIALS_INVALID_BASE64, path.display())
                        .unwrap_or_default(),
                }),
            None => Ok(None),
        }
    }
}

/// # resolve credentials
///
/// Merges the file at `path` with `overrides`. An api token is preferred
/// over a password when both are known.
pub fn resolve_credentials(
    path: &Path,
    overrides: CredentialOverrides,
) -> Result<Credentials, JacError> {
    let file = CredentialsFile::load(path)?;
    let missing = |field: CredentialField| JacError::MissingCredentials {
        field,
        source_path: path.to_path_buf(),
    };
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let server_url = non_empty(overrides.server_url.or(file.server_url.clone()))
        .ok_or_else(|| missing(CredentialField::ServerUrl))?;
    let username = non_empty(overrides.username.or(file.username.clone()))
        .ok_or_else(|| missing(CredentialField::Username))?;

    let secret = match non_empty(overrides.api_token).or(non_empty(overrides.password)) {
        Some(secret) => secret,
        None => match non_empty(file.api_token.clone()) {
            Some(token) => token,
            None => non_empty(file.decoded_password(path)?)
                .ok_or_else(|| missing(CredentialField::Secret))?,
        },
    };

    Ok(Credentials {
        server_url,
        username,
        secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_values() {
        let file = write_file(
            r#"server_url = "https://ci.example.com"
username = "alice"
password_base64 = "czNjcmV0"
"#,
        );

        let credentials = resolve_credentials(file.path(), CredentialOverrides::default()).unwrap();

        assert_eq!(
            credentials,
            Credentials {
                server_url: "https://ci.example.com".to_string(),
                username: "alice".to_string(),
                secret: "s3cret".to_string(),
            }
        );
    }

    #[test]
    fn test_flags_override_file() {
        let file = write_file(
            r#"server_url = "https://ci.example.com"
username = "alice"
password = "from-file"
"#,
        );
        let overrides = CredentialOverrides {
            username: Some("bob".to_string()),
            api_token: Some("token".to_string()),
            ..Default::default()
        };

        let credentials = resolve_credentials(file.path(), overrides).unwrap();

        assert_eq!(credentials.server_url, "https://ci.example.com");
        assert_eq!(credentials.username, "bob");
        assert_eq!(credentials.secret, "token");
    }

    #[test]
    fn test_missing_values() {
        let path = PathBuf::from("non_existent_credentials.toml");

        let err = resolve_credentials(&path, CredentialOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            JacError::MissingCredentials {
                field: CredentialField::ServerUrl,
                ..
            }
        ));

        let overrides = CredentialOverrides {
            server_url: Some("https://ci".to_string()),
            username: Some("alice".to_string()),
            ..Default::default()
        };
        let err = resolve_credentials(&path, overrides).unwrap_err();
        assert!(matches!(
            err,
            JacError::MissingCredentials {
                field: CredentialField::Secret,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_file("server_url = [");

        assert!(matches!(
            CredentialsFile::load(file.path()),
            Err(JacError::CredentialsUnreadable { .. })
        ));

        let bad_base64 = write_file("password_base64 = \"%%%\"\n");
        let loaded = CredentialsFile::load(bad_base64.path()).unwrap();
        assert!(loaded.decoded_password(bad_base64.path()).is_err());
    }
}
