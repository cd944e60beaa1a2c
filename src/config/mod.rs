// Re-export all items from the submodules
mod env_vars;
mod uploader_config;

// Re-export uploader config
pub use uploader_config::{
    AuthMethod,
    UploaderConfig,
    load_or_create_config,
    resolve_config_path,
};

// Re-export path expansion helpers
pub use env_vars::{
    expand_home,
    expand_path_vars,
    parse_unix_env_vars,
};
