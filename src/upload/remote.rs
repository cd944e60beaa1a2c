use std::io;

#[cfg(test)]
use mockall::automock;

use crate::config::AuthMethod;
use crate::upload::error::UploadError;

/// Opens the transport and performs the SSH handshake.
///
/// Each call yields a fresh, unauthenticated session; nothing is pooled.
pub trait Connector {
    type Session: SshSession;

    fn connect(&self, host: &str, port: u16) -> Result<Self::Session, UploadError>;
}

/// A handshaken SSH session that owns its transport.
pub trait SshSession {
    type Sftp: RemoteFs;

    /// Authenticate with exactly the credential `auth` selects
    fn authenticate(&mut self, username: &str, auth: &AuthMethod) -> Result<(), UploadError>;

    fn open_sftp(&mut self) -> Result<Self::Sftp, UploadError>;

    /// Tear down the session and close the transport. Must not fail.
    fn disconnect(&mut self);
}

/// The SFTP operations an upload needs.
#[cfg_attr(test, automock)]
pub trait RemoteFs {
    fn stat(&mut self, path: &str) -> io::Result<()>;

    fn mkdir(&mut self, path: &str, mode: i32) -> io::Result<()>;

    /// Create or truncate `path` with `mode`, write all of `payload` and
    /// close the remote handle, including when the write fails
    fn write_file(&mut self, path: &str, mode: i32, payload: &[u8]) -> io::Result<()>;

    /// Shut the subsystem channel down. Must not fail.
    fn close(&mut self);
}
