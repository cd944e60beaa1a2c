use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::env_vars::expand_path_vars;
use crate::constants::{
    CONFIG_PATH_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_CONNECTION_TIMEOUT_SECS,
    DEFAULT_NAME_FORMAT, SFTP_DEFAULT_PORT,
};

/// Credential used to authenticate the SSH session.
///
/// Only the selected variant's secret is ever sent to the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AuthMethod {
    Password {
        password: String,
    },
    PublicKey {
        keyfile: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        passphrase: Option<String>,
    },
}

impl AuthMethod {
    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            AuthMethod::Password { .. } => "password",
            AuthMethod::PublicKey { .. } => "public key",
        }
    }

    /// The key passphrase, with an empty string treated as no passphrase
    pub fn passphrase(&self) -> Option<&str> {
        match self {
            AuthMethod::PublicKey { passphrase, .. } => {
                passphrase.as_deref().filter(|p| !p.is_empty())
            }
            AuthMethod::Password { .. } => None,
        }
    }

    fn has_credential(&self) -> bool {
        match self {
            AuthMethod::Password { password } => !password.is_empty(),
            AuthMethod::PublicKey { keyfile, .. } => !keyfile.as_os_str().is_empty(),
        }
    }
}

impl Default for AuthMethod {
    fn default() -> Self {
        AuthMethod::Password {
            password: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub auth: AuthMethod,
    /// POSIX directory on the server that receives uploads
    pub remote_folder: String,
    /// Base URL the remote folder is served from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url_base: Option<String>,
    #[serde(default = "default_name_format")]
    pub name_format: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_port() -> u16 {
    SFTP_DEFAULT_PORT
}

fn default_name_format() -> String {
    DEFAULT_NAME_FORMAT.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECTION_TIMEOUT_SECS
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: SFTP_DEFAULT_PORT,
            username: String::new(),
            auth: AuthMethod::default(),
            remote_folder: String::new(),
            public_url_base: None,
            name_format: default_name_format(),
            connect_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS,
        }
    }
}

impl UploaderConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: UploaderConfig = serde_yaml::from_str(&content)
            .context(format!("Failed to parse YAML config: {}", path.display()))?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml).context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// A template with placeholder values, written by `init-config`
    pub fn template() -> Self {
        Self {
            host: "sftp.example.com".to_string(),
            username: "uploader".to_string(),
            auth: AuthMethod::PublicKey {
                keyfile: PathBuf::from("~/.ssh/id_ed25519"),
                passphrase: None,
            },
            remote_folder: "/var/www/screenshots".to_string(),
            public_url_base: Some("https://example.com/screenshots/".to_string()),
            ..Self::default()
        }
    }

    /// Expand environment variables and `~` in the key file path
    pub fn process_environment_variables(&mut self) -> Result<()> {
        if let AuthMethod::PublicKey { keyfile, .. } = &mut self.auth {
            let raw = keyfile
                .to_str()
                .context(format!("Key file path is not valid UTF-8: {}", keyfile.display()))?;
            let expanded = expand_path_vars(raw);
            if expanded != raw {
                debug!("Expanded key file path {} to {}", raw, expanded);
                *keyfile = PathBuf::from(expanded);
            }
        }
        Ok(())
    }

    /// Whether every setting an upload needs is present
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Like [`is_configured`](Self::is_configured), but names what is missing
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            bail!("Configuration is incomplete, missing: {}", missing.join(", "));
        }
        Ok(())
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.host.is_empty() {
            missing.push("host");
        }
        if self.username.is_empty() {
            missing.push("username");
        }
        if !self.auth.has_credential() {
            missing.push(match self.auth {
                AuthMethod::Password { .. } => "auth.password",
                AuthMethod::PublicKey { .. } => "auth.keyfile",
            });
        }
        if self.remote_folder.is_empty() {
            missing.push("remote_folder");
        }
        missing
    }

    /// The public base URL, if one is configured and non-empty
    pub fn url_base(&self) -> Option<&str> {
        self.public_url_base.as_deref().filter(|base| !base.is_empty())
    }

    /// Timeout for blocking network calls; `None` waits forever
    pub fn connect_timeout(&self) -> Option<Duration> {
        match self.connect_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Resolve the configuration path from the flag, then the environment
pub fn resolve_config_path(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match std::env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Load the configuration at `path`, writing a template there if it is absent
pub fn load_or_create_config(path: &Path) -> Result<UploaderConfig> {
    if path.exists() {
        return UploaderConfig::from_yaml_file(path);
    }

    info!("No configuration at {}, creating a template", path.display());
    let config = UploaderConfig::template();
    config.save_to_yaml_file(path)?;
    Ok(config)
}
