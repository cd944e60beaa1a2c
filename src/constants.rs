//! Global constants for the sftp-uploader application.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Connection constants
/// Default SFTP port
pub const SFTP_DEFAULT_PORT: u16 = 22;

/// Default connection timeout in seconds (0 disables the timeout)
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

// Remote permission bits
/// Uploaded files: owner read/write, group and other read
pub const REMOTE_FILE_MODE: i32 = 0o644;

/// Created directories: file mode plus execute for owner, group and other
pub const REMOTE_DIR_MODE: i32 = REMOTE_FILE_MODE | 0o111;

// Naming
/// Default name template, expanded with strftime patterns
pub const DEFAULT_NAME_FORMAT: &str = "Screenshot at %H-%M-%S";

// Configuration lookup
/// Configuration file used when neither the flag nor the env var is set
pub const DEFAULT_CONFIG_FILE: &str = "sftp-uploader.yaml";

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV_VAR: &str = "SFTP_UPLOADER_CONFIG";

// Error messages
pub const ERROR_FAILED_TO_HANDSHAKE: &str = "Failed to perform SSH handshake";
pub const ERROR_FAILED_TO_CREATE_SFTP: &str = "Failed to create SFTP subsystem";
pub const ERROR_AUTHENTICATION_FAILED: &str = "Authentication failed";
