// The on-disk store of installed versions
//
// Owns the versions directory exclusively. Each installed version is one
// subdirectory named by the naming codec, containing the extracted files
// of a release archive. No metadata is written anywhere: everything is
// derived from directory names and contents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use futures::StreamExt;

use crate::error::{GdError, Result};
use crate::github;
use crate::naming::{self, ParsedName};
use crate::platform::{Architecture, Flavour, Platform};
use crate::ui;
use crate::version::without_stable_suffix;

/// One directory under the versions root. All attributes are derived from
/// the directory name.
#[derive(Debug, Clone)]
pub struct InstalledVersion {
    pub path: PathBuf,
    pub name: String,
    /// Version as it appears in the name, e.g. `4.2.2-stable`.
    pub version: String,
    pub platform: Platform,
    pub architecture: Architecture,
    pub flavour: Flavour,
}

impl InstalledVersion {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| GdError::DirectoryName {
                name: path.display().to_string(),
                reason: "not a valid directory name".to_string(),
            })?
            .to_string();

        let ParsedName {
            version,
            platform,
            architecture,
            flavour,
        } = naming::parse_directory_name(&name)?;

        Ok(InstalledVersion {
            path: path.to_path_buf(),
            name,
            version,
            platform,
            architecture,
            flavour,
        })
    }

    /// Version with the `-stable` marker removed, for constraint matching.
    pub fn comparable_version(&self) -> &str {
        without_stable_suffix(&self.version)
    }

    /// Path to the executable inside this directory. See
    /// [`executable_path_in`] for the discovery rule.
    pub fn executable_path(&self) -> Result<PathBuf> {
        executable_path_in(&self.path)
    }

    pub fn has_executable(&self) -> bool {
        executable_path_in(&self.path).is_ok()
    }
}

impl PartialEq for InstalledVersion {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Find the executable in a version directory.
///
/// If the directory contains exactly one file, that is the executable.
/// Otherwise it is the file whose name, with or without extension, equals
/// the directory's own name. This rule is shared by install validation
/// and activation; changing it breaks both.
pub fn executable_path_in(dir: &Path) -> Result<PathBuf> {
    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    if files.len() == 1 {
        return Ok(files.remove(0));
    }

    for file in &files {
        let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let stem = file.file_stem().and_then(|n| n.to_str()).unwrap_or_default();
        if file_name == dir_name || stem == dir_name {
            return Ok(file.clone());
        }
    }

    Err(GdError::ExecutableNotFound(dir.display().to_string()))
}

/// The directory tree of installed versions.
#[derive(Debug, Clone)]
pub struct VersionStore {
    root: PathBuf,
}

impl VersionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        VersionStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up an installed version by directory name. A directory that
    /// exists but has no resolvable executable counts as not installed,
    /// so a partial install is retried rather than activated.
    pub fn already_installed(&self, name: &str) -> Option<InstalledVersion> {
        let path = self.root.join(name);
        if !path.is_dir() {
            return None;
        }
        match InstalledVersion::from_path(&path) {
            Ok(entry) if entry.has_executable() => Some(entry),
            Ok(_) => {
                log::warn!("{name} exists but has no executable; treating as not installed");
                None
            }
            Err(e) => {
                log::warn!("ignoring unrecognized version directory {name}: {e}");
                None
            }
        }
    }

    /// Download and extract a release archive into a fresh version
    /// directory.
    pub async fn install(&self, url: &str, name: &str) -> Result<InstalledVersion> {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir)?;

        let archive = dir.join(format!("{name}.zip"));
        download(url, &archive).await?;

        extract_zip(&archive, &dir)?;
        fs::remove_file(&archive)?;

        clean_structure(&dir)?;

        let entry = InstalledVersion::from_path(&dir)?;
        ensure_executable(&entry.executable_path()?)?;

        Ok(entry)
    }

    /// Enumerate installed versions, sorted by name. Directories that do
    /// not parse are warned about and skipped. An absent root yields an
    /// empty list.
    pub fn list(&self) -> Result<Vec<InstalledVersion>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match InstalledVersion::from_path(&entry.path()) {
                Ok(version) => entries.push(version),
                Err(e) => log::warn!("skipping {}: {e}", entry.path().display()),
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Remove an installed version. Irreversible.
    pub fn delete(&self, entry: &InstalledVersion) -> Result<()> {
        fs::remove_dir_all(&entry.path)?;
        Ok(())
    }
}

/// Stream an archive download to disk. Non-200 responses are a
/// DownloadError; there is no retry and no resume.
async fn download(url: &str, dest: &Path) -> Result<()> {
    log::debug!("downloading {url} to {}", dest.display());

    let response = github::client().get(url).send().await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(GdError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bar = match response.content_length() {
        Some(total) => ui::download_bar(total),
        None => ui::download_bar_indeterminate(),
    };
    bar.set_message("Downloading");

    let mut file = fs::File::create(dest)?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        io::Write::write_all(&mut file, &chunk)?;
        bar.inc(chunk.len() as u64);
    }
    ui::clear_bar(&bar);

    Ok(())
}

/// Extract all non-directory entries of a zip archive, preserving relative
/// paths and overwriting existing files.
fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| GdError::UnsafeArchivePath(entry.name().to_string()))?;
        let target = dest.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}

/// Hoist the contents of a nested directory that duplicates its parent's
/// name. Some upstream archives extract as `X/X/...`; the inner `X` is
/// flattened away so the files sit at the top of the version directory.
pub fn clean_structure(dir: &Path) -> Result<()> {
    let name = match dir.file_name() {
        Some(name) => name,
        None => return Ok(()),
    };

    let nested = dir.join(name);
    if !nested.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(&nested)? {
        let entry = entry?;
        fs::rename(entry.path(), dir.join(entry.file_name()))?;
    }
    fs::remove_dir(&nested)?;

    Ok(())
}

/// Archives do not reliably preserve the executable flag, so it is set
/// explicitly after extraction on POSIX platforms.
#[cfg(unix)]
fn ensure_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o100);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) -> Result<()> {
    Ok(())
}
