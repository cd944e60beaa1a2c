//! Test utilities for sftp-uploader
//!
//! In-memory stand-ins for the SSH connector, session and SFTP channel that
//! record every call into a shared log, so tests can assert on call order
//! and on which credentials were sent.

#![cfg(test)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::AuthMethod;
use crate::upload::{Connector, RemoteFs, SshSession, UploadError, UploadReporter};

/// One recorded call against a fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect { host: String, port: u16 },
    AuthPassword { username: String, password: String },
    AuthPublicKey {
        username: String,
        keyfile: PathBuf,
        passphrase: Option<String>,
    },
    OpenSftp,
    Stat(String),
    Mkdir(String, i32),
    Write { path: String, mode: i32, payload: Vec<u8> },
    CloseFile(String),
    CloseSftp,
    Disconnect,
}

/// Shared, ordered call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Paths passed to `mkdir`, in call order
    pub fn mkdirs(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Mkdir(path, _) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

/// In-memory SFTP channel holding a set of existing directories
#[derive(Debug, Clone, Default)]
pub struct FakeRemote {
    pub log: CallLog,
    pub dirs: HashSet<String>,
    pub fail_mkdir: Option<io::ErrorKind>,
    pub fail_write: Option<io::ErrorKind>,
    /// Error returned when the written file handle is closed
    pub fail_close: Option<io::ErrorKind>,
}

impl FakeRemote {
    pub fn with_dirs(dirs: &[&str]) -> Self {
        Self {
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn mkdirs(&self) -> Vec<String> {
        self.log.mkdirs()
    }
}

impl RemoteFs for FakeRemote {
    fn stat(&mut self, path: &str) -> io::Result<()> {
        self.log.push(Call::Stat(path.to_string()));
        if self.dirs.contains(path) {
            Ok(())
        } else {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn mkdir(&mut self, path: &str, mode: i32) -> io::Result<()> {
        self.log.push(Call::Mkdir(path.to_string(), mode));
        if let Some(kind) = self.fail_mkdir {
            return Err(io::Error::from(kind));
        }
        self.dirs.insert(path.to_string());
        Ok(())
    }

    fn write_file(&mut self, path: &str, mode: i32, payload: &[u8]) -> io::Result<()> {
        self.log.push(Call::Write {
            path: path.to_string(),
            mode,
            payload: payload.to_vec(),
        });
        if let Some(kind) = self.fail_write {
            return Err(io::Error::from(kind));
        }

        self.log.push(Call::CloseFile(path.to_string()));
        match self.fail_close {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }

    fn close(&mut self) {
        self.log.push(Call::CloseSftp);
    }
}

/// Connector handing out fake sessions that share one call log
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pub log: CallLog,
    /// Template for the SFTP channel each session opens
    pub remote: FakeRemote,
    pub fail_connect: bool,
    pub reject_auth: bool,
    pub fail_sftp: bool,
}

impl FakeConnector {
    pub fn with_dirs(dirs: &[&str]) -> Self {
        let log = CallLog::default();
        let remote = FakeRemote {
            log: log.clone(),
            ..FakeRemote::with_dirs(dirs)
        };
        Self {
            log,
            remote,
            ..Self::default()
        }
    }
}

impl Connector for FakeConnector {
    type Session = FakeSession;

    fn connect(&self, host: &str, port: u16) -> Result<FakeSession, UploadError> {
        self.log.push(Call::Connect {
            host: host.to_string(),
            port,
        });
        if self.fail_connect {
            return Err(UploadError::Connection {
                host: host.to_string(),
                port,
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            });
        }
        Ok(FakeSession {
            connector: self.clone(),
        })
    }
}

pub struct FakeSession {
    connector: FakeConnector,
}

impl SshSession for FakeSession {
    type Sftp = FakeRemote;

    fn authenticate(&mut self, username: &str, auth: &AuthMethod) -> Result<(), UploadError> {
        let call = match auth {
            AuthMethod::Password { password } => Call::AuthPassword {
                username: username.to_string(),
                password: password.clone(),
            },
            AuthMethod::PublicKey { keyfile, .. } => Call::AuthPublicKey {
                username: username.to_string(),
                keyfile: keyfile.clone(),
                passphrase: auth.passphrase().map(str::to_string),
            },
        };
        self.connector.log.push(call);

        if self.connector.reject_auth {
            return Err(UploadError::Authentication {
                username: username.to_string(),
                method: auth.name(),
                message: "Authentication failed (username/password)".to_string(),
            });
        }
        Ok(())
    }

    fn open_sftp(&mut self) -> Result<FakeRemote, UploadError> {
        self.connector.log.push(Call::OpenSftp);
        if self.connector.fail_sftp {
            return Err(UploadError::Protocol {
                stage: "Failed to create SFTP subsystem",
                message: "Unable to startup channel".to_string(),
            });
        }
        Ok(self.connector.remote.clone())
    }

    fn disconnect(&mut self) {
        self.connector.log.push(Call::Disconnect);
    }
}

/// Reporter that remembers every call it receives
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub urls: Vec<String>,
    pub errors: Vec<String>,
}

impl UploadReporter for RecordingReporter {
    fn set_url(&mut self, url: &str) {
        self.urls.push(url.to_string());
    }

    fn set_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
