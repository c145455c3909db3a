// Process-wide path and target configuration, resolved once at startup

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

use crate::platform::{Architecture, Flavour, Platform};

pub const ENV_ROOT_DIR: &str = "GDMAN_DIR";
pub const ENV_VERSIONS_DIR: &str = "GDMAN_VERSIONS_DIR";
pub const ENV_TARGET_PLATFORM: &str = "GDMAN_TARGET_PLATFORM";
pub const ENV_TARGET_ARCHITECTURE: &str = "GDMAN_TARGET_ARCHITECTURE";
pub const ENV_TARGET_FLAVOUR: &str = "GDMAN_TARGET_FLAVOUR";

/// Filesystem locations owned by gdman. Built once in main and passed by
/// reference into every component that touches disk.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root of the managed tree, e.g. `~/.gdman`.
    pub root: PathBuf,
    /// Directory containing one subdirectory per installed version.
    pub versions: PathBuf,
    /// The active-version pointer: a symlink on POSIX, a `.cmd` wrapper
    /// on Windows.
    pub link: PathBuf,
}

impl Paths {
    pub fn resolve() -> Result<Self> {
        let root = match env::var_os(ENV_ROOT_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .context("unable to determine the home directory")?
                .join(".gdman"),
        };

        let versions = match env::var_os(ENV_VERSIONS_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => root.join("versions"),
        };

        let link_name = if cfg!(windows) { "godot.cmd" } else { "godot" };
        let link = root.join(link_name);

        Ok(Paths {
            root,
            versions,
            link,
        })
    }
}

/// The platform/architecture/flavour an operation targets. Precedence per
/// field: CLI flag, then environment override, then host detection.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub platform: Platform,
    pub architecture: Architecture,
    pub flavour: Flavour,
}

impl Target {
    pub fn resolve(
        platform: Option<Platform>,
        architecture: Option<Architecture>,
        flavour: Option<Flavour>,
    ) -> Result<Self> {
        let platform = match platform.or(env_override(ENV_TARGET_PLATFORM)?) {
            Some(platform) => platform,
            None => Platform::host().ok_or_else(|| anyhow!("unsupported host platform"))?,
        };
        let architecture = match architecture.or(env_override(ENV_TARGET_ARCHITECTURE)?) {
            Some(architecture) => architecture,
            None => Architecture::host().ok_or_else(|| anyhow!("unsupported host architecture"))?,
        };
        let flavour = flavour
            .or(env_override(ENV_TARGET_FLAVOUR)?)
            .unwrap_or_default();

        Ok(Target {
            platform,
            architecture,
            flavour,
        })
    }
}

fn env_override<T: FromStr<Err = String>>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("invalid value for {name}: {e}")),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_explicit_values_win() {
        let target = Target::resolve(
            Some(Platform::Linux),
            Some(Architecture::Arm64),
            Some(Flavour::Mono),
        )
        .unwrap();
        assert_eq!(target.platform, Platform::Linux);
        assert_eq!(target.architecture, Architecture::Arm64);
        assert_eq!(target.flavour, Flavour::Mono);
    }

    #[test]
    fn test_target_defaults_flavour_to_standard() {
        if Platform::host().is_none() || Architecture::host().is_none() {
            return;
        }
        let target = Target::resolve(None, None, None).unwrap();
        assert_eq!(target.flavour, Flavour::Standard);
    }
}
