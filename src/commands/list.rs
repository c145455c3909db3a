// List command: print installed versions

use anyhow::Result;

use crate::config::Paths;
use crate::store::VersionStore;
use crate::ui;

pub fn run(paths: &Paths) -> Result<()> {
    let store = VersionStore::new(&paths.versions);
    let entries = store.list()?;

    if entries.is_empty() {
        ui::dim("No versions installed");
        return Ok(());
    }

    for entry in entries {
        ui::line(&entry.name);
    }
    Ok(())
}
