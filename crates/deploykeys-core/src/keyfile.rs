//! Filesystem writes for keys and generated SSH files

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::ProvisionError;

/// Owner read-only; OpenSSH refuses keys readable by group or others
pub const PRIVATE_KEY_MODE: u32 = 0o400;

/// Write a private key readable only by its owner
///
/// An existing file is removed first: a previous run leaves it `0400`,
/// which the owner cannot reopen for writing.
///
/// # Errors
/// Returns `Io` naming `path` on any filesystem failure
pub fn write_private_key(path: &Path, contents: &str) -> Result<(), ProvisionError> {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "replacing existing key file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ProvisionError::io(path, e)),
    }

    create_owner_only(path, contents.as_bytes()).map_err(|e| ProvisionError::io(path, e))
}

#[cfg(unix)]
fn create_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(PRIVATE_KEY_MODE)
        .open(path)?;
    file.write_all(contents)?;
    file.set_permissions(fs::Permissions::from_mode(PRIVATE_KEY_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn create_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents)?;
    let mut permissions = file.metadata()?.permissions();
    permissions.set_readonly(true);
    file.set_permissions(permissions)?;
    Ok(())
}

/// Create or truncate `path` with `contents`
///
/// # Errors
/// Returns `Io` naming `path`
pub fn write_file(path: &Path, contents: &str) -> Result<(), ProvisionError> {
    fs::write(path, contents).map_err(|e| ProvisionError::io(path, e))
}

/// # Errors
/// Returns `Io` naming `path`
pub fn read_file(path: &Path) -> Result<String, ProvisionError> {
    fs::read_to_string(path).map_err(|e| ProvisionError::io(path, e))
}

/// Create `dir` and any missing parents
///
/// # Errors
/// Returns `Io` naming `dir`
pub fn ensure_dir(dir: &Path) -> Result<(), ProvisionError> {
    fs::create_dir_all(dir).map_err(|e| ProvisionError::io(dir, e))
}
