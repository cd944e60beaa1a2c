use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use sftp_uploader::cli::{Args, Commands, UploadOpts};
use sftp_uploader::config::{load_or_create_config, resolve_config_path, UploaderConfig};
use sftp_uploader::naming::{ensure_extension, format_filename};
use sftp_uploader::upload::{UploadEngine, UploadReporter};

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    initialize_logging(args.verbose)?;

    match &args.command {
        Commands::InitConfig { path } => handle_init_config(path),
        Commands::Check => handle_check(&args),
        Commands::Filename => handle_filename(&args),
        Commands::Upload(opts) => handle_upload(&args, opts),
    }
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

/// Load configuration and process environment variables
fn load_config(args: &Args) -> Result<UploaderConfig> {
    let path = resolve_config_path(args.config.as_deref());
    let existed = path.exists();
    let mut config = load_or_create_config(&path)?;
    if !existed {
        bail!("Created a configuration template at {}, edit it and run again", path.display());
    }
    config.process_environment_variables()?;
    Ok(config)
}

fn handle_init_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Configuration file already exists: {}", path.display());
    }
    info!("Creating configuration file at {}", path.display());
    UploaderConfig::template().save_to_yaml_file(path)?;
    info!("Configuration created successfully, edit it before uploading");
    Ok(())
}

fn handle_check(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    config.validate()?;
    info!(
        "Configuration complete: {}@{}:{} -> {}",
        config.username, config.host, config.port, config.remote_folder
    );
    Ok(())
}

fn handle_filename(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    println!("{}", format_filename(&config.name_format, &Local::now())?);
    Ok(())
}

/// Prints the URL on stdout and errors through the logger
struct ConsoleReporter;

impl UploadReporter for ConsoleReporter {
    fn set_url(&mut self, url: &str) {
        println!("{}", url);
    }

    fn set_error(&mut self, message: &str) {
        error!("{}", message);
    }
}

fn handle_upload(args: &Args, opts: &UploadOpts) -> Result<()> {
    let config = load_config(args)?;
    config.validate()?;

    let payload = fs::read(&opts.file)
        .context(format!("Failed to read image file: {}", opts.file.display()))?;

    let name = match &opts.name {
        Some(name) => name.clone(),
        None => format_filename(&config.name_format, &Local::now())?,
    };
    let extension = opts.file.extension().and_then(|e| e.to_str());
    let remote_name = ensure_extension(&name, extension);

    let engine = UploadEngine::new(config);
    if !engine.upload_and_report(&payload, &remote_name, &mut ConsoleReporter) {
        bail!("Upload of {} failed", remote_name);
    }
    Ok(())
}
