use std::env;

/// Expand `~`, `$VAR` and `${VAR}` in a local path.
///
/// Unknown variables expand to nothing for the braced form and are left
/// untouched for the bare form, so a literal `$` in a file name survives.
pub fn expand_path_vars(path: &str) -> String {
    parse_unix_env_vars(&expand_home(path))
}

/// Replace a leading `~` or `~/` with the user's home directory
pub fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };

    match env::var("HOME") {
        Ok(home) => format!("{}{}", home.trim_end_matches('/'), rest),
        Err(_) => path.to_string(),
    }
}

/// Parse Unix-style environment variables ($VAR and ${VAR})
pub fn parse_unix_env_vars(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    let var_name = &braced[..end];
                    if let Ok(value) = env::var(var_name) {
                        result.push_str(&value);
                    }
                    rest = &braced[end + 1..];
                }
                None => {
                    // No closing brace, keep the remainder verbatim
                    result.push_str(&rest[pos..]);
                    rest = "";
                }
            }
            continue;
        }

        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());

        if name_len == 0 {
            result.push('$');
        } else {
            let var_name = &after[..name_len];
            match env::var(var_name) {
                Ok(value) => result.push_str(&value),
                Err(_) => {
                    result.push('$');
                    result.push_str(var_name);
                }
            }
        }
        rest = &after[name_len..];
    }

    result.push_str(rest);
    result
}
