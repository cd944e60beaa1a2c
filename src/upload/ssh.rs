use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use log::debug;
use ssh2::{OpenFlags, OpenType, Session, Sftp};

use crate::config::AuthMethod;
use crate::constants::{
    ERROR_AUTHENTICATION_FAILED, ERROR_FAILED_TO_CREATE_SFTP, ERROR_FAILED_TO_HANDSHAKE,
};
use crate::upload::error::UploadError;
use crate::upload::remote::{Connector, RemoteFs, SshSession};

/// [`Connector`] backed by libssh2 over a blocking TCP stream
#[derive(Debug, Clone, Default)]
pub struct Ssh2Connector {
    timeout: Option<Duration>,
}

impl Ssh2Connector {
    /// `timeout` bounds every blocking call; `None` waits forever
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Connector for Ssh2Connector {
    type Session = Ssh2Session;

    fn connect(&self, host: &str, port: u16) -> Result<Ssh2Session, UploadError> {
        let tcp = open_transport(host, port, self.timeout)?;
        handshake(tcp, self.timeout)
    }
}

/// Open the TCP connection to `host:port`, with no retry
pub fn open_transport(
    host: &str,
    port: u16,
    timeout: Option<Duration>,
) -> Result<TcpStream, UploadError> {
    let connection_error = |source: io::Error| UploadError::Connection {
        host: host.to_string(),
        port,
        source,
    };

    let tcp = match timeout {
        Some(timeout) => connect_with_timeout(host, port, timeout).map_err(connection_error)?,
        None => TcpStream::connect((host, port)).map_err(connection_error)?,
    };

    if timeout.is_some() {
        tcp.set_read_timeout(timeout).map_err(connection_error)?;
        tcp.set_write_timeout(timeout).map_err(connection_error)?;
    }

    debug!("Connected to {}:{}", host, port);
    Ok(tcp)
}

fn connect_with_timeout(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(tcp) => return Ok(tcp),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
    }))
}

/// Run the SSH handshake over an open stream.
///
/// The session takes ownership of the stream, so dropping the session closes
/// the connection.
pub fn handshake(tcp: TcpStream, timeout: Option<Duration>) -> Result<Ssh2Session, UploadError> {
    let mut session = Session::new().map_err(|e| UploadError::Protocol {
        stage: ERROR_FAILED_TO_HANDSHAKE,
        message: e.to_string(),
    })?;

    if let Some(timeout) = timeout {
        session.set_timeout(u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX));
    }
    session.set_tcp_stream(tcp);

    if let Err(err) = session.handshake() {
        return Err(UploadError::Protocol {
            stage: ERROR_FAILED_TO_HANDSHAKE,
            message: session_error_message(&session, &err),
        });
    }

    Ok(Ssh2Session { session })
}

/// libssh2 sometimes raises an error without a message and keeps the
/// diagnostic on the session instead; fetch it from there.
fn session_error_message(session: &Session, err: &ssh2::Error) -> String {
    let last = ssh2::Error::last_session_error(session);
    pick_message(err.message(), last.as_ref().map(ssh2::Error::message), err.to_string())
}

/// First non-blank of `primary` and `last`, else `fallback`
fn pick_message(primary: &str, last: Option<&str>, fallback: String) -> String {
    [Some(primary), last]
        .into_iter()
        .flatten()
        .find(|message| !message.trim().is_empty())
        .map_or(fallback, str::to_string)
}

pub struct Ssh2Session {
    session: Session,
}

impl SshSession for Ssh2Session {
    type Sftp = Ssh2Sftp;

    fn authenticate(&mut self, username: &str, auth: &AuthMethod) -> Result<(), UploadError> {
        let failed = |message: String| UploadError::Authentication {
            username: username.to_string(),
            method: auth.name(),
            message,
        };

        let result = match auth {
            AuthMethod::Password { password } => self.session.userauth_password(username, password),
            AuthMethod::PublicKey { keyfile, .. } => {
                self.session
                    .userauth_pubkey_file(username, None, keyfile, auth.passphrase())
            }
        };

        if let Err(err) = result {
            return Err(failed(session_error_message(&self.session, &err)));
        }
        if !self.session.authenticated() {
            return Err(failed(ERROR_AUTHENTICATION_FAILED.to_string()));
        }

        debug!("Authenticated as {} using {}", username, auth.name());
        Ok(())
    }

    fn open_sftp(&mut self) -> Result<Ssh2Sftp, UploadError> {
        let sftp = self.session.sftp().map_err(|err| UploadError::Protocol {
            stage: ERROR_FAILED_TO_CREATE_SFTP,
            message: session_error_message(&self.session, &err),
        })?;

        Ok(Ssh2Sftp { sftp: Some(sftp) })
    }

    fn disconnect(&mut self) {
        if let Err(err) = self.session.disconnect(None, "upload finished", None) {
            debug!("SSH disconnect reported an error: {}", err);
        }
    }
}

pub struct Ssh2Sftp {
    sftp: Option<Sftp>,
}

impl Ssh2Sftp {
    fn sftp(&self) -> io::Result<&Sftp> {
        self.sftp
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "SFTP subsystem is closed"))
    }
}

impl RemoteFs for Ssh2Sftp {
    fn stat(&mut self, path: &str) -> io::Result<()> {
        self.sftp()?.stat(Path::new(path))?;
        Ok(())
    }

    fn mkdir(&mut self, path: &str, mode: i32) -> io::Result<()> {
        self.sftp()?.mkdir(Path::new(path), mode)?;
        Ok(())
    }

    fn write_file(&mut self, path: &str, mode: i32, payload: &[u8]) -> io::Result<()> {
        let flags = OpenFlags::CREATE | OpenFlags::WRITE | OpenFlags::TRUNCATE;
        // On an early error the handle is released when `file` drops
        let mut file = self
            .sftp()?
            .open_mode(Path::new(path), flags, mode, OpenType::File)?;
        file.write_all(payload)?;
        // Servers may reject the data only when the handle is closed
        file.close()?;
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the Sftp handle shuts the subsystem channel down
        if self.sftp.take().is_some() {
            debug!("Closed SFTP subsystem");
        }
    }
}
