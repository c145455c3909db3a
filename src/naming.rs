// Encoding and decoding of Godot release asset and directory names
//
// Godot's binary naming convention is undocumented and differs per
// platform, so every rule lives in this one module. The decode direction
// is a reverse-engineered heuristic over substring containment; it fails
// with a typed error rather than guessing when a token is missing.
// Round-tripping encode -> decode is the primary correctness check.
//
// Known shapes (version 4.x):
//   Godot_v4.2.1-stable_win64.exe
//   Godot_v4.2.1-stable_mono_win64
//   Godot_v4.2.1-stable_linux.x86_64
//   Godot_v4.2.1-stable_mono_linux_arm64
//   Godot_v4.2.1-stable_macos.universal

use crate::error::{GdError, Result};
use crate::platform::{Architecture, Flavour, Platform};
use crate::version::VersionSpec;

/// The platform/architecture/flavour portion of an asset or directory
/// name, excluding the leading `Godot_v{version}_`.
pub fn asset_name_fragment(
    platform: Platform,
    architecture: Architecture,
    flavour: Flavour,
) -> Result<String> {
    let mut fragment = String::new();
    if flavour == Flavour::Mono {
        fragment.push_str("mono_");
    }

    match platform {
        Platform::Windows => {
            fragment.push_str("win");
            match architecture {
                Architecture::X64 => fragment.push_str("64"),
                Architecture::X86 => fragment.push_str("32"),
                other => {
                    return Err(GdError::UnsupportedArchitecture {
                        platform: platform.name(),
                        architecture: other.name(),
                    });
                }
            }
            if flavour != Flavour::Mono {
                fragment.push_str(".exe");
            }
        }
        Platform::Linux => {
            fragment.push_str("linux");
            fragment.push(if flavour == Flavour::Mono { '_' } else { '.' });
            match architecture {
                Architecture::Arm32 => fragment.push_str("arm32"),
                Architecture::Arm64 => fragment.push_str("arm64"),
                Architecture::X64 => fragment.push_str("x86_64"),
                Architecture::X86 => fragment.push_str("x86_32"),
                Architecture::Universal => {
                    return Err(GdError::UnsupportedArchitecture {
                        platform: platform.name(),
                        architecture: architecture.name(),
                    });
                }
            }
        }
        // Universal binary regardless of the requested architecture.
        Platform::MacOS => fragment.push_str("macos.universal"),
    }

    Ok(fragment)
}

/// The directory name a version is installed under, which also matches the
/// upstream asset name for that build.
pub fn directory_name(
    version: &str,
    platform: Platform,
    architecture: Architecture,
    flavour: Flavour,
) -> Result<String> {
    let fragment = asset_name_fragment(platform, architecture, flavour)?;
    Ok(format!("Godot_v{version}_{fragment}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Version exactly as it appears in the name, e.g. `4.2.1-stable`.
    pub version: String,
    pub platform: Platform,
    pub architecture: Architecture,
    pub flavour: Flavour,
}

/// Inverse of [`directory_name`].
pub fn parse_directory_name(name: &str) -> Result<ParsedName> {
    let fail = |reason: &str| GdError::DirectoryName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    // The version token sits between the first and second underscore,
    // prefixed with 'v'.
    let start = name.find('_').ok_or_else(|| fail("missing version token"))?;
    let end = name[start + 1..]
        .find('_')
        .map(|i| start + 1 + i)
        .ok_or_else(|| fail("missing version token"))?;
    let token = &name[start + 1..end];
    let version = token
        .strip_prefix('v')
        .ok_or_else(|| fail("version token does not start with 'v'"))?;
    if version.is_empty() || VersionSpec::parse(version).is_err() {
        return Err(fail(&format!("invalid version token '{token}'")));
    }

    let lower = name.to_ascii_lowercase();
    let contains = |needle: &str| lower.contains(needle);

    let flavour = if contains("mono") {
        Flavour::Mono
    } else {
        Flavour::Standard
    };

    let platform = if contains("win32") || contains("win64") {
        Platform::Windows
    } else if contains("macos") {
        Platform::MacOS
    } else if contains("linux") {
        Platform::Linux
    } else {
        return Err(fail("unable to determine the platform"));
    };

    let architecture = match platform {
        Platform::MacOS => Architecture::Universal,
        Platform::Windows if contains("win32") => Architecture::X86,
        Platform::Windows => Architecture::X64,
        Platform::Linux => {
            if contains("arm32") {
                Architecture::Arm32
            } else if contains("arm64") {
                Architecture::Arm64
            } else if contains("x86_64") {
                Architecture::X64
            } else if contains("x86_32") {
                Architecture::X86
            } else {
                return Err(fail("unable to determine the architecture"));
            }
        }
    };

    Ok(ParsedName {
        version: version.to_string(),
        platform,
        architecture,
        flavour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_golden_outputs() {
        let cases = [
            (Platform::Windows, Architecture::X64, Flavour::Standard, "win64.exe"),
            (Platform::Windows, Architecture::X86, Flavour::Standard, "win32.exe"),
            (Platform::Windows, Architecture::X64, Flavour::Mono, "mono_win64"),
            (Platform::Linux, Architecture::X64, Flavour::Standard, "linux.x86_64"),
            (Platform::Linux, Architecture::X86, Flavour::Standard, "linux.x86_32"),
            (Platform::Linux, Architecture::Arm32, Flavour::Standard, "linux.arm32"),
            (Platform::Linux, Architecture::Arm64, Flavour::Mono, "mono_linux_arm64"),
            (Platform::MacOS, Architecture::Universal, Flavour::Standard, "macos.universal"),
            (Platform::MacOS, Architecture::Universal, Flavour::Mono, "mono_macos.universal"),
        ];
        for (platform, architecture, flavour, expected) in cases {
            assert_eq!(
                asset_name_fragment(platform, architecture, flavour).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_directory_name_golden_output() {
        assert_eq!(
            directory_name("4.2.1-stable", Platform::Linux, Architecture::Arm32, Flavour::Standard)
                .unwrap(),
            "Godot_v4.2.1-stable_linux.arm32"
        );
    }

    #[test]
    fn test_arm_rejected_on_windows() {
        for architecture in [Architecture::Arm32, Architecture::Arm64] {
            let err = directory_name("1.2.3", Platform::Windows, architecture, Flavour::Standard)
                .unwrap_err();
            assert!(matches!(err, GdError::UnsupportedArchitecture { .. }));
        }
    }

    #[test]
    fn test_round_trip_all_supported_combinations() {
        let combos = [
            (Platform::Windows, Architecture::X64),
            (Platform::Windows, Architecture::X86),
            (Platform::Linux, Architecture::X64),
            (Platform::Linux, Architecture::X86),
            (Platform::Linux, Architecture::Arm32),
            (Platform::Linux, Architecture::Arm64),
            (Platform::MacOS, Architecture::Universal),
        ];
        for (platform, architecture) in combos {
            for flavour in [Flavour::Standard, Flavour::Mono] {
                let name =
                    directory_name("4.2.1-stable", platform, architecture, flavour).unwrap();
                let parsed = parse_directory_name(&name).unwrap();
                assert_eq!(parsed.version, "4.2.1-stable", "{name}");
                assert_eq!(parsed.platform, platform, "{name}");
                assert_eq!(parsed.architecture, architecture, "{name}");
                assert_eq!(parsed.flavour, flavour, "{name}");
            }
        }
    }

    #[test]
    fn test_parse_fails_loudly_on_unrecognized_names() {
        assert!(parse_directory_name("Godot").is_err());
        assert!(parse_directory_name("Godot_v4.2.1_freebsd.x86_64").is_err());
        assert!(parse_directory_name("Godot_4.2.1_linux.x86_64").is_err());
        assert!(parse_directory_name("Godot_v4.2.1_linux.mips").is_err());
        assert!(parse_directory_name("Godot_vnotaversion_linux.x86_64").is_err());
    }
}
