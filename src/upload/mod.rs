//! Remote upload engine.
//!
//! Uploads one already-encoded image per call over SSH/SFTP and works out the
//! public URL it will be served from.
//!
//! ## Flow
//!
//! ```text
//! connect ──▶ handshake ──▶ authenticate ──▶ open SFTP
//!                                                │
//!                         ensure parent dirs ◀───┘
//!                                │
//!                          write payload ──▶ close SFTP ──▶ disconnect
//!                                                              │
//!                                              build URL ◀─────┘ (success only)
//! ```
//!
//! Every upload opens its own connection and tears it down before returning,
//! whatever happened. Teardown runs from `Drop` guards, so early returns with
//! `?` clean up the same way a successful upload does.
//!
//! ## Usage Example
//!
//! ```no_run
//! use sftp_uploader::config::{AuthMethod, UploaderConfig};
//! use sftp_uploader::upload::{UploadEngine, UploadOutcome};
//!
//! let config = UploaderConfig {
//!     host: "sftp.example.com".to_string(),
//!     username: "uploader".to_string(),
//!     auth: AuthMethod::Password { password: "secret".to_string() },
//!     remote_folder: "/var/www/shots".to_string(),
//!     public_url_base: Some("https://example.com/shots/".to_string()),
//!     ..UploaderConfig::default()
//! };
//!
//! let engine = UploadEngine::new(config);
//! match engine.upload(b"...png bytes...", "2024/screenshot.png") {
//!     UploadOutcome::Uploaded { url } => println!("{:?}", url),
//!     UploadOutcome::Failed { message } => eprintln!("{}", message),
//! }
//! ```

/// Upload error taxonomy
pub mod error;

/// POSIX path and URL joining
pub mod paths;

/// Traits for the connector, session and SFTP channel
pub mod remote;

/// libssh2-backed implementation of the remote traits
pub mod ssh;

/// Recursive remote directory creation
pub mod dirs;

/// Remote file writing
pub mod writer;

/// Upload orchestration and outcome reporting
pub mod engine;

pub use dirs::ensure_dir;
pub use engine::{UploadEngine, UploadOutcome, UploadReporter};
pub use error::{RemoteOp, UploadError};
pub use remote::{Connector, RemoteFs, SshSession};
pub use ssh::Ssh2Connector;
pub use writer::write_payload;
