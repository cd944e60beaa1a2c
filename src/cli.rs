use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the sftp-uploader tool.
///
/// Global options select the configuration file and log verbosity; the
/// subcommand picks the action.
#[derive(Parser, Debug)]
#[clap(name = "sftp-uploader", about = "Upload screenshots over SFTP and print their URL")]
pub struct Args {
    /// Path to configuration YAML file (default: $SFTP_UPLOADER_CONFIG or ./sftp-uploader.yaml)
    #[clap(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the uploader.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an already-encoded image and print its public URL
    Upload(UploadOpts),

    /// Create a configuration file with placeholder values
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "sftp-uploader.yaml")]
        path: PathBuf,
    },

    /// Report whether the configuration has everything an upload needs
    Check,

    /// Print the remote name the configured template expands to right now
    Filename,
}

/// Options for the upload subcommand.
#[derive(ClapArgs, Debug)]
pub struct UploadOpts {
    /// Image file to upload
    pub file: PathBuf,

    /// Remote name relative to the remote folder (default: expanded name_format)
    #[clap(short, long)]
    pub name: Option<String>,
}
