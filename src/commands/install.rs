// Install command: resolve, download, extract, activate
//
// Re-installation is idempotent. An exact version constraint is checked
// against the store before touching the network; after remote resolution
// the store is checked again under the resolved tag. Every path through
// here ends in exactly one set_active call.

use anyhow::{Context, Result};

use crate::active;
use crate::config::{Paths, Target};
use crate::naming;
use crate::platform::{Architecture, Flavour, Platform};
use crate::resolver::{self, AssetCheck};
use crate::store::{InstalledVersion, VersionStore};
use crate::ui;
use crate::version::VersionSpec;

const GODOT_OWNER: &str = "godotengine";
const GODOT_REPO: &str = "godot";

pub async fn run(
    paths: &Paths,
    version: Option<String>,
    latest: bool,
    platform: Option<Platform>,
    architecture: Option<Architecture>,
    flavour: Option<Flavour>,
) -> Result<()> {
    let target = Target::resolve(platform, architecture, flavour)?;
    let spec = version.as_deref().map(VersionSpec::parse).transpose()?;
    let store = VersionStore::new(&paths.versions);

    // An exact constraint maps straight to a directory name; if that
    // version is installed there is nothing to resolve or download.
    if let Some(exact) = spec.as_ref().and_then(VersionSpec::as_exact) {
        let name = naming::directory_name(
            &exact,
            target.platform,
            target.architecture,
            target.flavour,
        )?;
        if let Some(entry) = store.already_installed(&name) {
            return activate_existing(paths, &entry);
        }
    }

    let fragment =
        naming::asset_name_fragment(target.platform, target.architecture, target.flavour)?;
    let mut checks = vec![AssetCheck::contains(&fragment)];
    if target.flavour != Flavour::Mono {
        // The standard fragment is a substring of the mono asset name.
        checks.push(AssetCheck::excludes("mono"));
    }

    let sp = ui::spinner("Resolving Godot release...");
    let release = match resolver::find_release_with_asset(
        GODOT_OWNER,
        GODOT_REPO,
        spec.as_ref(),
        &checks,
        latest,
    )
    .await
    {
        Ok(release) => release,
        Err(e) => {
            ui::finish_spinner_error(&sp, "Unable to resolve a Godot release");
            return Err(e.into());
        }
    };
    let asset = release
        .assets
        .first()
        .context("resolved release carries no asset")?;
    ui::finish_spinner_resolved(&sp, &asset.name, &release.tag_name);

    // The directory is named after the tag as published, -stable included.
    let name = naming::directory_name(
        &release.tag_name,
        target.platform,
        target.architecture,
        target.flavour,
    )?;
    if let Some(entry) = store.already_installed(&name) {
        return activate_existing(paths, &entry);
    }

    ui::action(&format!("Installing {name}"));
    let entry = store.install(&asset.browser_download_url, &name).await?;
    active::set_active(&paths.link, &entry)?;
    ui::success(&format!("Installed {name} and set it active"));

    Ok(())
}

fn activate_existing(paths: &Paths, entry: &InstalledVersion) -> Result<()> {
    log::info!("version {} already installed, setting active", entry.name);
    active::set_active(&paths.link, entry)?;
    ui::success(&format!("{} already installed, set it active", entry.name));
    Ok(())
}
