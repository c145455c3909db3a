// Current command: report the active version

use anyhow::Result;

use crate::active;
use crate::config::Paths;
use crate::store::VersionStore;
use crate::ui;

pub fn run(paths: &Paths) -> Result<()> {
    let store = VersionStore::new(&paths.versions);

    // A pointer targeting something unrecognizable is reported, not fatal.
    let current = match active::current_version(&paths.link, &store) {
        Ok(current) => current,
        Err(e) => {
            ui::warning(&format!("active pointer is unusable: {e}"));
            None
        }
    };

    match current {
        Some(entry) => ui::line(&entry.name),
        None => ui::dim("No active version"),
    }
    Ok(())
}
