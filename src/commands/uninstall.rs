// Uninstall command: remove installed versions
//
// The full removal set is computed and validated before anything is
// deleted, so a refused plan leaves the store untouched. The active
// version is never removed; with --unused it is silently kept, otherwise
// matching it fails the whole plan.

use anyhow::Result;

use crate::active;
use crate::config::Paths;
use crate::error::GdError;
use crate::platform::{Architecture, Flavour, Platform};
use crate::store::{InstalledVersion, VersionStore};
use crate::ui;
use crate::version::{VersionSpec, without_stable_suffix};

pub fn run(
    paths: &Paths,
    version: Option<String>,
    platform: Option<Platform>,
    architecture: Option<Architecture>,
    flavour: Option<Flavour>,
    force: bool,
    unused: bool,
) -> Result<()> {
    let spec = version.as_deref().map(VersionSpec::parse).transpose()?;
    let store = VersionStore::new(&paths.versions);

    let entries = store.list()?;
    let current = match active::current_version(&paths.link, &store) {
        Ok(current) => current,
        Err(e) => {
            log::warn!("active pointer is unusable: {e}");
            None
        }
    };

    let plan = plan_removal(
        &entries,
        current.as_ref(),
        spec.as_ref(),
        platform,
        architecture,
        flavour,
        force,
        unused,
    )?;

    if plan.is_empty() {
        ui::dim("No matching versions to uninstall");
        return Ok(());
    }

    for entry in plan {
        store.delete(entry)?;
        ui::success(&format!("Uninstalled {}", entry.name));
    }
    Ok(())
}

/// Decide which versions to remove. Pure over the supplied entries, so
/// refusal never leaves a half-removed store.
#[allow(clippy::too_many_arguments)]
fn plan_removal<'a>(
    entries: &'a [InstalledVersion],
    current: Option<&InstalledVersion>,
    spec: Option<&VersionSpec>,
    platform: Option<Platform>,
    architecture: Option<Architecture>,
    flavour: Option<Flavour>,
    force: bool,
    unused: bool,
) -> Result<Vec<&'a InstalledVersion>, GdError> {
    let matches: Vec<&InstalledVersion> = entries
        .iter()
        .filter(|entry| spec.is_none_or(|spec| version_matches(&entry.version, spec)))
        .filter(|entry| platform.is_none_or(|p| entry.platform == p))
        .filter(|entry| architecture.is_none_or(|a| entry.architecture == a))
        .filter(|entry| flavour.is_none_or(|f| entry.flavour == f))
        .collect();

    if unused {
        return Ok(matches
            .into_iter()
            .filter(|entry| current != Some(*entry))
            .collect());
    }

    if matches.len() > 1 && !force {
        let names = matches.iter().map(|e| e.name.clone()).collect();
        return Err(GdError::UninstallAmbiguous(names));
    }

    if let Some(active) = matches.iter().find(|entry| current == Some(*entry)) {
        return Err(GdError::UninstallActive(active.name.clone()));
    }

    Ok(matches)
}

/// Installed versions record their tag verbatim, `-stable` marker
/// included, so the constraint is tried against both forms.
fn version_matches(version: &str, spec: &VersionSpec) -> bool {
    let as_is = VersionSpec::parse(version).is_ok_and(|v| v.is_match(spec));
    let stripped =
        VersionSpec::parse(without_stable_suffix(version)).is_ok_and(|v| v.is_match(spec));
    as_is || stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entry(name: &str) -> InstalledVersion {
        let path = Path::new("/versions").join(name);
        InstalledVersion::from_path(&path).unwrap()
    }

    fn spec(input: &str) -> VersionSpec {
        VersionSpec::parse(input).unwrap()
    }

    #[test]
    fn test_single_match_is_removed() {
        let entries = vec![
            entry("Godot_v4.2.1-stable_linux.x86_64"),
            entry("Godot_v4.3.0-stable_linux.x86_64"),
        ];
        let plan = plan_removal(
            &entries,
            None,
            Some(&spec("4.2.1")),
            None,
            None,
            None,
            false,
            false,
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name, "Godot_v4.2.1-stable_linux.x86_64");
    }

    #[test]
    fn test_multiple_matches_require_force() {
        let entries = vec![
            entry("Godot_v4.2.1-stable_linux.x86_64"),
            entry("Godot_v4.2.2-stable_linux.x86_64"),
        ];
        let err = plan_removal(
            &entries,
            None,
            Some(&spec("4.2")),
            None,
            None,
            None,
            false,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, GdError::UninstallAmbiguous(_)));

        let plan = plan_removal(
            &entries,
            None,
            Some(&spec("4.2")),
            None,
            None,
            None,
            true,
            false,
        )
        .unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_active_version_fails_the_whole_plan() {
        let entries = vec![
            entry("Godot_v4.2.1-stable_linux.x86_64"),
            entry("Godot_v4.2.2-stable_linux.x86_64"),
        ];
        let current = entries[1].clone();
        let err = plan_removal(
            &entries,
            Some(&current),
            Some(&spec("4.2")),
            None,
            None,
            None,
            true,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, GdError::UninstallActive(_)));
    }

    #[test]
    fn test_unused_keeps_only_the_active_version() {
        let entries = vec![
            entry("Godot_v4.2.1-stable_linux.x86_64"),
            entry("Godot_v4.2.2-stable_linux.x86_64"),
            entry("Godot_v4.3.0-stable_linux.x86_64"),
        ];
        let current = entries[2].clone();
        let plan =
            plan_removal(&entries, Some(&current), None, None, None, None, false, true).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|e| e.name != current.name));
    }

    #[test]
    fn test_platform_filter_narrows_matches() {
        let entries = vec![
            entry("Godot_v4.2.1-stable_linux.x86_64"),
            entry("Godot_v4.2.1-stable_win64.exe"),
        ];
        let plan = plan_removal(
            &entries,
            None,
            Some(&spec("4.2.1")),
            Some(Platform::Windows),
            None,
            None,
            false,
            false,
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].platform, Platform::Windows);
    }

    #[test]
    fn test_no_matches_is_an_empty_plan() {
        let entries = vec![entry("Godot_v4.2.1-stable_linux.x86_64")];
        let plan = plan_removal(
            &entries,
            None,
            Some(&spec("3")),
            None,
            None,
            None,
            false,
            false,
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_constraint_matches_with_and_without_stable_marker() {
        assert!(version_matches("4.2.1-stable", &spec("4.2.1")));
        assert!(version_matches("4.2.1-stable", &spec("4.2.1-stable")));
        assert!(version_matches("4.2.1", &spec("4.2.1")));
        assert!(!version_matches("4.2.1-stable", &spec("4.2.2")));
    }
}
