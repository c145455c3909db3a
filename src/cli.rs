// CLI module for handling command-line interface

use clap::{Parser, Subcommand};

use crate::platform::{Architecture, Flavour, Platform};

#[derive(Parser)]
#[command(name = "gdman")]
#[command(version)]
#[command(about = "Version manager for Godot engine binaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a version of Godot and set it as the active version
    Install {
        /// Version constraint, e.g. "4", "4.2.1", "4.2.*" or "4.2.1-stable"
        #[arg(required_unless_present = "latest")]
        version: Option<String>,

        /// When several versions match, install the most recently published
        #[arg(short, long)]
        latest: bool,

        /// Target platform (windows, linux, macos); defaults to the host
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Target architecture (arm32, arm64, x86_32, x86_64); defaults to the host
        #[arg(short, long)]
        architecture: Option<Architecture>,

        /// Build flavour (standard, mono)
        #[arg(short, long)]
        flavour: Option<Flavour>,
    },

    /// List installed versions
    List,

    /// Show the currently active version
    Current,

    /// Uninstall installed versions
    Uninstall {
        /// Version constraint selecting the versions to remove
        #[arg(required_unless_present = "unused")]
        version: Option<String>,

        /// Only remove versions for this platform
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Only remove versions for this architecture
        #[arg(short, long)]
        architecture: Option<Architecture>,

        /// Only remove versions of this flavour
        #[arg(short, long)]
        flavour: Option<Flavour>,

        /// Allow removing several versions in one go
        #[arg(long)]
        force: bool,

        /// Remove every version except the active one
        #[arg(short, long)]
        unused: bool,
    },
}
