use log::debug;

use crate::upload::error::UploadError;
use crate::upload::remote::RemoteFs;

/// Write `payload` to `destination`, replacing any existing file.
///
/// Failures are reported against the destination path with a hint to check
/// permissions; the underlying error stays available as the source.
pub fn write_payload<F: RemoteFs + ?Sized>(
    sftp: &mut F,
    destination: &str,
    mode: i32,
    payload: &[u8],
) -> Result<(), UploadError> {
    sftp.write_file(destination, mode, payload)
        .map_err(|source| UploadError::Write {
            path: destination.to_string(),
            source,
        })?;

    debug!("Wrote {} bytes to {}", payload.len(), destination);
    Ok(())
}
