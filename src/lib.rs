//! # sftp-uploader
//!
//! Uploads captured screenshots to a server over SSH/SFTP and reports the
//! public URL they are served from.
//!
//! ## Overview
//!
//! The heart of the crate is the [`upload`] engine: it opens one SSH
//! connection per upload, authenticates with a password or a private key,
//! creates any missing remote directories, writes the image with the right
//! permissions and tears everything down again before it returns. The rest
//! of the crate is the host around it: YAML configuration, filename
//! templating and a small command-line front end.
//!
//! ## Usage
//!
//! ```no_run
//! use sftp_uploader::config::UploaderConfig;
//! use sftp_uploader::upload::UploadEngine;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = UploaderConfig::from_yaml_file(Path::new("sftp-uploader.yaml"))?;
//! config.process_environment_variables()?;
//! config.validate()?;
//!
//! let engine = UploadEngine::new(config);
//! let url = engine.try_upload(&std::fs::read("shot.png")?, "shots/shot.png")?;
//! println!("{:?}", url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`config`]: Uploader configuration, YAML persistence and path expansion
//! - [`upload`]: SSH/SFTP upload engine
//! - [`naming`]: Remote name templating
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Uploader configuration and YAML persistence
pub mod config;

/// SSH/SFTP upload engine
pub mod upload;

/// Remote name templating
pub mod naming;

/// Application constants and configuration values
pub mod constants;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;
