use std::ops::{Deref, DerefMut};

use log::{debug, info, warn};

use crate::config::UploaderConfig;
use crate::constants::{REMOTE_DIR_MODE, REMOTE_FILE_MODE};
use crate::upload::dirs::ensure_dir;
use crate::upload::error::UploadError;
use crate::upload::paths::{destination, dirname, public_url};
use crate::upload::remote::{Connector, RemoteFs, SshSession};
use crate::upload::ssh::Ssh2Connector;
use crate::upload::writer::write_payload;

/// Receives the result of an upload.
///
/// On success with a public URL configured `set_url` is called; on failure
/// `set_error` is. Never both for the same upload.
pub trait UploadReporter {
    fn set_url(&mut self, url: &str);
    fn set_error(&mut self, message: &str);
}

/// Result of one upload as seen by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { url: Option<String> },
    Failed { message: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }

    /// Hand the outcome to `reporter` and return whether the upload succeeded
    pub fn report(&self, reporter: &mut dyn UploadReporter) -> bool {
        match self {
            UploadOutcome::Uploaded { url: Some(url) } => reporter.set_url(url),
            UploadOutcome::Uploaded { url: None } => {}
            UploadOutcome::Failed { message } => reporter.set_error(message),
        }
        self.is_success()
    }
}

/// Disconnects the session when dropped
struct SessionGuard<S: SshSession>(S);

impl<S: SshSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.0.disconnect();
    }
}

impl<S: SshSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S: SshSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.0
    }
}

/// Closes the SFTP subsystem when dropped
struct SftpGuard<F: RemoteFs>(F);

impl<F: RemoteFs> Drop for SftpGuard<F> {
    fn drop(&mut self) {
        self.0.close();
    }
}

impl<F: RemoteFs> Deref for SftpGuard<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.0
    }
}

impl<F: RemoteFs> DerefMut for SftpGuard<F> {
    fn deref_mut(&mut self) -> &mut F {
        &mut self.0
    }
}

/// Uploads payloads to the configured server, one connection per upload.
///
/// The engine keeps no state between uploads besides its configuration, so
/// concurrent callers should each own an engine.
pub struct UploadEngine<C: Connector = Ssh2Connector> {
    config: UploaderConfig,
    connector: C,
}

impl UploadEngine<Ssh2Connector> {
    /// Create an engine that talks to the server through libssh2
    pub fn new(config: UploaderConfig) -> Self {
        let connector = Ssh2Connector::new(config.connect_timeout());
        Self::with_connector(config, connector)
    }
}

impl<C: Connector> UploadEngine<C> {
    pub fn with_connector(config: UploaderConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Upload `payload` as `remote_name` below the remote folder.
    ///
    /// Never fails: errors become [`UploadOutcome::Failed`] with a single
    /// readable message.
    pub fn upload(&self, payload: &[u8], remote_name: &str) -> UploadOutcome {
        match self.try_upload(payload, remote_name) {
            Ok(url) => UploadOutcome::Uploaded { url },
            Err(err) => {
                warn!("Upload of {} failed ({}): {}", remote_name, err.kind(), err);
                UploadOutcome::Failed {
                    message: err.user_message(),
                }
            }
        }
    }

    /// Upload and deliver the outcome to `reporter`; returns success
    pub fn upload_and_report(
        &self,
        payload: &[u8],
        remote_name: &str,
        reporter: &mut dyn UploadReporter,
    ) -> bool {
        self.upload(payload, remote_name).report(reporter)
    }

    /// Upload and return the published URL, if a URL base is configured
    pub fn try_upload(&self, payload: &[u8], remote_name: &str) -> Result<Option<String>, UploadError> {
        let config = &self.config;
        let destination = destination(&config.remote_folder, remote_name);

        info!(
            "Uploading {} bytes to sftp://{}@{}:{}{}",
            payload.len(),
            config.username,
            config.host,
            config.port,
            destination
        );

        self.transfer(&destination, payload)?;

        let url = config.url_base().map(|base| public_url(base, remote_name));
        match &url {
            Some(url) => info!("Upload complete: {}", url),
            None => info!("Upload complete: {}", destination),
        }
        Ok(url)
    }

    fn transfer(&self, destination: &str, payload: &[u8]) -> Result<(), UploadError> {
        let config = &self.config;

        // Guards drop in reverse order: subsystem, then session and transport
        let mut session = SessionGuard(self.connector.connect(&config.host, config.port)?);
        session.authenticate(&config.username, &config.auth)?;

        let mut sftp = SftpGuard(session.open_sftp()?);
        debug!("SFTP subsystem open on {}", config.host);

        ensure_dir(&mut *sftp, dirname(destination), REMOTE_DIR_MODE)?;
        write_payload(&mut *sftp, destination, REMOTE_FILE_MODE, payload)
    }
}
