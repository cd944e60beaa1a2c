use std::fmt;
use std::io;

use thiserror::Error;

/// Remote filesystem operation that failed on the SFTP channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    Stat,
    CreateDir,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteOp::Stat => write!(f, "stat"),
            RemoteOp::CreateDir => write!(f, "create directory"),
        }
    }
}

/// Everything that can go wrong during one upload.
///
/// Variants follow the stages of the upload: the TCP connection, the SSH
/// protocol (handshake and subsystem), authentication and the SFTP
/// operations themselves.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to connect to {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{stage}: {message}")]
    Protocol {
        stage: &'static str,
        message: String,
    },

    #[error("Authentication failed for {username} using {method}: {message}")]
    Authentication {
        username: String,
        method: &'static str,
        message: String,
    },

    #[error("Failed to {op} {path}: {source}")]
    RemoteIo {
        op: RemoteOp,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}. Check permissions.")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl UploadError {
    pub(crate) fn remote_io(op: RemoteOp, path: &str, source: io::Error) -> Self {
        UploadError::RemoteIo {
            op,
            path: path.to_string(),
            source,
        }
    }

    /// Error category, used when the message itself is empty
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Connection { .. } => "connection error",
            UploadError::Protocol { .. } => "protocol error",
            UploadError::Authentication { .. } => "authentication error",
            UploadError::RemoteIo { .. } | UploadError::Write { .. } => "remote I/O error",
        }
    }

    /// The single line shown to the user
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            self.kind().to_string()
        } else {
            message
        }
    }
}
