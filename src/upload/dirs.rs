use std::io;

use log::debug;

use crate::upload::error::{RemoteOp, UploadError};
use crate::upload::paths::dirname;
use crate::upload::remote::RemoteFs;

/// Make sure `path` and all of its ancestors exist, creating the missing
/// ones with `mode`.
///
/// Walks up from `path` until `stat` finds an existing ancestor, then creates
/// the missing directories root-to-leaf, each exactly once. An existing
/// `path` costs a single `stat` and no mutation. Only "not found" counts as
/// missing: any other `stat` failure is returned as-is. The walk stops below
/// the root, and a failing `stat` on `/` (or `""`) itself is an error.
pub fn ensure_dir<F: RemoteFs + ?Sized>(sftp: &mut F, path: &str, mode: i32) -> Result<(), UploadError> {
    let mut pending = Vec::new();
    let mut current = path;

    loop {
        match sftp.stat(current) {
            Ok(()) => break,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !is_root(current) => {
                pending.push(current);
                let parent = dirname(current);
                if is_root(parent) {
                    break;
                }
                current = parent;
            }
            Err(err) => return Err(UploadError::remote_io(RemoteOp::Stat, current, err)),
        }
    }

    for dir in pending.into_iter().rev() {
        sftp.mkdir(dir, mode)
            .map_err(|err| UploadError::remote_io(RemoteOp::CreateDir, dir, err))?;
        debug!("Created remote directory {}", dir);
    }

    Ok(())
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}
