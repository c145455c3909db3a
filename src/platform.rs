// Target platform, architecture and flavour model
//
// These mirror how Godot labels its release assets, not how Rust labels
// compilation targets. Parsing accepts the short aliases users type on the
// command line; host detection supplies defaults when no flag or
// environment override is given.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOS,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOS => "macos",
        }
    }

    pub fn host() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Platform::MacOS)
        } else {
            None
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" | "w" => Ok(Platform::Windows),
            "linux" | "lin" | "l" => Ok(Platform::Linux),
            "macos" | "mac" | "osx" | "m" => Ok(Platform::MacOS),
            _ => Err(format!("unknown platform '{s}'")),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Arm32,
    Arm64,
    X86,
    X64,
    /// macOS universal binary. Never requested directly from the CLI;
    /// produced when decoding macOS directory names.
    Universal,
}

impl Architecture {
    pub fn name(self) -> &'static str {
        match self {
            Architecture::Arm32 => "arm32",
            Architecture::Arm64 => "arm64",
            Architecture::X86 => "x86_32",
            Architecture::X64 => "x86_64",
            Architecture::Universal => "universal",
        }
    }

    pub fn host() -> Option<Self> {
        if cfg!(target_arch = "x86_64") {
            Some(Architecture::X64)
        } else if cfg!(target_arch = "x86") {
            Some(Architecture::X86)
        } else if cfg!(target_arch = "aarch64") {
            Some(Architecture::Arm64)
        } else if cfg!(target_arch = "arm") {
            Some(Architecture::Arm32)
        } else {
            None
        }
    }
}

impl FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arm32" => Ok(Architecture::Arm32),
            "arm64" => Ok(Architecture::Arm64),
            "x86" | "x86_32" | "x86-32" => Ok(Architecture::X86),
            "x64" | "x86_64" | "x86-64" => Ok(Architecture::X64),
            "universal" => Ok(Architecture::Universal),
            _ => Err(format!("unknown architecture '{s}'")),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavour {
    /// The standard build using GDScript.
    #[default]
    Standard,
    /// The build bundling the .NET runtime.
    Mono,
}

impl Flavour {
    pub fn name(self) -> &'static str {
        match self {
            Flavour::Standard => "standard",
            Flavour::Mono => "mono",
        }
    }
}

impl FromStr for Flavour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "std" | "s" => Ok(Flavour::Standard),
            "mono" | "m" => Ok(Flavour::Mono),
            _ => Err(format!("unknown flavour '{s}'")),
        }
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_aliases() {
        assert_eq!("win".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("W".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("lin".parse::<Platform>().unwrap(), Platform::Linux);
        assert_eq!("osx".parse::<Platform>().unwrap(), Platform::MacOS);
        assert!("freebsd".parse::<Platform>().is_err());
    }

    #[test]
    fn test_architecture_aliases() {
        assert_eq!("x86_64".parse::<Architecture>().unwrap(), Architecture::X64);
        assert_eq!("x64".parse::<Architecture>().unwrap(), Architecture::X64);
        assert_eq!("x86".parse::<Architecture>().unwrap(), Architecture::X86);
        assert_eq!("ARM64".parse::<Architecture>().unwrap(), Architecture::Arm64);
        assert!("sparc".parse::<Architecture>().is_err());
    }

    #[test]
    fn test_flavour_aliases() {
        assert_eq!("mono".parse::<Flavour>().unwrap(), Flavour::Mono);
        assert_eq!("std".parse::<Flavour>().unwrap(), Flavour::Standard);
        assert!("dotnet".parse::<Flavour>().is_err());
    }

    #[test]
    fn test_host_detection_known() {
        // The build targets one of the supported platforms in CI.
        if cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows")) {
            assert!(Platform::host().is_some());
        }
    }
}
