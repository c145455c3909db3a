// The active-version pointer
//
// A single link at a fixed path identifies the active version; the user
// puts its parent directory on PATH. On POSIX this is a symlink to the
// executable. On Windows, symlink creation needs elevation, so a small
// `.cmd` wrapper invoking the executable is written instead; both live
// behind the same interface.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GdError, Result};
use crate::store::{InstalledVersion, VersionStore};

/// Point the pointer at the given version's executable, replacing any
/// existing pointer. Failure here is fatal to the operation; there is no
/// retry.
pub fn set_active(link: &Path, entry: &InstalledVersion) -> Result<()> {
    let executable = entry.executable_path()?;

    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }

    // symlink_metadata also sees dangling links, which plain exists() misses
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link)?;
    }

    create_pointer(link, &executable)
        .map_err(|e| GdError::Activation(format!("{}: {e}", link.display())))?;

    log::debug!("{} -> {}", link.display(), executable.display());
    Ok(())
}

/// The version the pointer currently targets, or None when no pointer
/// exists or the target has since been deleted. A pointer whose target
/// does not parse as a version directory is an error; callers treat that
/// as "no active version".
pub fn current_version(link: &Path, store: &VersionStore) -> Result<Option<InstalledVersion>> {
    let target = match read_pointer(link)? {
        Some(target) => target,
        None => return Ok(None),
    };

    // The pointer may outlive its target, e.g. after the version was
    // uninstalled by hand. Dangling counts as no active version.
    if !target.exists() {
        log::debug!(
            "active pointer targets {} which no longer exists",
            target.display()
        );
        return Ok(None);
    }

    let dir = target.parent().ok_or_else(|| {
        GdError::Activation(format!(
            "pointer target {} has no containing directory",
            target.display()
        ))
    })?;

    // Resolve through the store so the entry reflects the versions root.
    let entry = InstalledVersion::from_path(dir)?;
    if entry.path.parent() != Some(store.root()) {
        log::warn!(
            "active pointer targets {} outside the versions directory",
            dir.display()
        );
    }
    Ok(Some(entry))
}

#[cfg(unix)]
fn create_pointer(link: &Path, executable: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(executable, link)
}

#[cfg(windows)]
fn create_pointer(link: &Path, executable: &Path) -> std::io::Result<()> {
    fs::write(link, format!("@echo off\r\n\"{}\" %*\r\n", executable.display()))
}

#[cfg(unix)]
fn read_pointer(link: &Path) -> Result<Option<PathBuf>> {
    if fs::symlink_metadata(link).is_err() {
        return Ok(None);
    }
    Ok(Some(fs::read_link(link)?))
}

#[cfg(windows)]
fn read_pointer(link: &Path) -> Result<Option<PathBuf>> {
    if !link.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(link)?;
    let target = contents
        .lines()
        .find_map(|line| {
            let line = line.trim();
            line.strip_prefix('"')
                .and_then(|rest| rest.split('"').next())
        })
        .ok_or_else(|| {
            GdError::Activation(format!("unrecognized pointer file {}", link.display()))
        })?;
    Ok(Some(PathBuf::from(target)))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DIR_NAME: &str = "Godot_v4.2.1-stable_linux.x86_64";

    fn installed(root: &Path, name: &str) -> InstalledVersion {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("godot.bin"), b"binary").unwrap();
        InstalledVersion::from_path(&dir).unwrap()
    }

    #[test]
    fn test_set_active_and_current_round_trip() {
        let tmp = TempDir::new().unwrap();
        let versions = tmp.path().join("versions");
        let link = tmp.path().join("godot");
        let store = VersionStore::new(&versions);
        let entry = installed(&versions, DIR_NAME);

        set_active(&link, &entry).unwrap();
        let current = current_version(&link, &store).unwrap().unwrap();
        assert_eq!(current.name, DIR_NAME);
        assert_eq!(fs::read_link(&link).unwrap(), entry.executable_path().unwrap());
    }

    #[test]
    fn test_set_active_replaces_existing_pointer() {
        let tmp = TempDir::new().unwrap();
        let versions = tmp.path().join("versions");
        let link = tmp.path().join("godot");
        let store = VersionStore::new(&versions);

        let first = installed(&versions, DIR_NAME);
        let second = installed(&versions, "Godot_v4.3.0-stable_linux.x86_64");

        set_active(&link, &first).unwrap();
        set_active(&link, &second).unwrap();

        let current = current_version(&link, &store).unwrap().unwrap();
        assert_eq!(current.name, "Godot_v4.3.0-stable_linux.x86_64");
    }

    #[test]
    fn test_current_version_absent_pointer() {
        let tmp = TempDir::new().unwrap();
        let store = VersionStore::new(tmp.path());
        let link = tmp.path().join("godot");
        assert!(current_version(&link, &store).unwrap().is_none());
    }

    #[test]
    fn test_current_version_none_after_target_deleted() {
        let tmp = TempDir::new().unwrap();
        let versions = tmp.path().join("versions");
        let link = tmp.path().join("godot");
        let store = VersionStore::new(&versions);
        let entry = installed(&versions, DIR_NAME);

        set_active(&link, &entry).unwrap();
        fs::remove_dir_all(&entry.path).unwrap();

        assert!(current_version(&link, &store).unwrap().is_none());
    }

    #[test]
    fn test_set_active_over_dangling_pointer() {
        let tmp = TempDir::new().unwrap();
        let versions = tmp.path().join("versions");
        let link = tmp.path().join("godot");

        std::os::unix::fs::symlink(tmp.path().join("gone"), &link).unwrap();

        let entry = installed(&versions, DIR_NAME);
        set_active(&link, &entry).unwrap();
        assert_eq!(fs::read_link(&link).unwrap(), entry.executable_path().unwrap());
    }
}
