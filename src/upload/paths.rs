//! POSIX path helpers shared by the destination path and the published URL.
//!
//! Remote paths are always `/`-separated, whatever the local OS is, so
//! nothing here goes through `std::path`.

/// Like `dirname(1)`, but on POSIX paths regardless of the host OS.
///
/// No `/` yields `""`, a single leading `/` yields `"/"`.
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        None => "",
        Some(0) => "/",
        Some(idx) => &path[..idx],
    }
}

/// Join `name` under `base`, treating `base` as a directory.
///
/// A separator is always placed between the two and repeated separators at
/// the seam collapse to one, so `"/test"` and `"/test/"` behave the same and
/// `name` may itself contain subdirectories.
pub fn join_under(base: &str, name: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}

/// Remote file path for `remote_name` inside `remote_folder`
pub fn destination(remote_folder: &str, remote_name: &str) -> String {
    join_under(remote_folder, remote_name)
}

/// URL under which `remote_name` is published below `base`
pub fn public_url(base: &str, remote_name: &str) -> String {
    join_under(base, remote_name)
}
