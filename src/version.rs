// Version constraint model with per-segment wildcard matching
//
// Godot does not follow strict semantic versioning: release tags carry a
// trailing "-stable" marker that is not a real pre-release indicator, and
// users commonly give partial versions like "4" or "4.2". A VersionSpec is
// four segments (major, minor, patch, suffix) where each segment is either
// an absolute value or a wildcard. Unspecified minor/patch/suffix segments
// default to wildcard.

use std::fmt;

use crate::error::{GdError, Result};

/// The trailing marker Godot puts on regular release tags. Not a semantic
/// pre-release, so matching is done both with and without it.
pub const STABLE_SUFFIX: &str = "-stable";

/// Strip a trailing `-stable` from a version string, if present.
pub fn without_stable_suffix(version: &str) -> &str {
    version.strip_suffix(STABLE_SUFFIX).unwrap_or(version)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Wildcard,
    /// Numeric major/minor/patch value. The raw string is kept for
    /// comparison so "04" and "4" stay distinct.
    Number { raw: String, value: u32 },
    /// Suffix text such as "stable" or "alpha1".
    Text(String),
}

impl Segment {
    fn numeric(part: &str, input: &str, name: &str) -> Result<Self> {
        if part == "*" {
            return Ok(Segment::Wildcard);
        }
        let value = part.parse::<u32>().map_err(|_| GdError::Format {
            input: input.to_string(),
            reason: format!("invalid {name} segment '{part}'"),
        })?;
        Ok(Segment::Number {
            raw: part.to_string(),
            value,
        })
    }

    fn suffix(part: &str, input: &str) -> Result<Self> {
        if part == "*" {
            return Ok(Segment::Wildcard);
        }
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(GdError::Format {
                input: input.to_string(),
                reason: format!("invalid suffix segment '{part}'"),
            });
        }
        Ok(Segment::Text(part.to_string()))
    }

    /// Two segments match if either is a wildcard or their raw strings are
    /// equal. Symmetric by construction.
    pub fn is_match(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Wildcard, _) | (_, Segment::Wildcard) => true,
            (Segment::Number { raw: a, .. }, Segment::Number { raw: b, .. }) => a == b,
            (Segment::Text(a), Segment::Text(b)) => a == b,
            _ => false,
        }
    }

    fn raw(&self) -> &str {
        match self {
            Segment::Wildcard => "*",
            Segment::Number { raw, .. } => raw,
            Segment::Text(text) => text,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    pub major: Segment,
    pub minor: Segment,
    pub patch: Segment,
    pub suffix: Segment,
}

impl VersionSpec {
    /// Parse a constraint string.
    ///
    /// Valid examples: `1`, `1.2`, `1.2.3`, `1.2.3-alpha`, `1.*`,
    /// `1.2.*-stable`. Missing minor/patch/suffix default to wildcard.
    /// Major must be present and may never be a wildcard.
    pub fn parse(input: &str) -> Result<Self> {
        let fail = |reason: &str| GdError::Format {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(fail("empty version"));
        }

        let hyphen_parts: Vec<&str> = input.split('-').collect();
        if hyphen_parts.len() > 2 {
            return Err(fail("at most one suffix group is allowed"));
        }

        let dot_parts: Vec<&str> = hyphen_parts[0].split('.').collect();
        if dot_parts.len() > 3 {
            return Err(fail("at most three numeric segments are allowed"));
        }

        let major = Segment::numeric(dot_parts[0], input, "major")?;
        if major.is_wildcard() {
            return Err(fail("major segment may not be a wildcard"));
        }
        let minor = match dot_parts.get(1) {
            Some(part) => Segment::numeric(part, input, "minor")?,
            None => Segment::Wildcard,
        };
        let patch = match dot_parts.get(2) {
            Some(part) => Segment::numeric(part, input, "patch")?,
            None => Segment::Wildcard,
        };
        let suffix = match hyphen_parts.get(1) {
            Some(part) => Segment::suffix(part, input)?,
            None => Segment::Wildcard,
        };

        Ok(VersionSpec {
            major,
            minor,
            patch,
            suffix,
        })
    }

    /// Segment-wise match. Symmetric: `a.is_match(&b) == b.is_match(&a)`.
    pub fn is_match(&self, other: &VersionSpec) -> bool {
        self.major.is_match(&other.major)
            && self.minor.is_match(&other.minor)
            && self.patch.is_match(&other.patch)
            && self.suffix.is_match(&other.suffix)
    }

    /// The concrete version string this spec denotes, if it denotes exactly
    /// one. Requires absolute major, minor and patch; an absolute suffix is
    /// included, a wildcard suffix is omitted.
    pub fn as_exact(&self) -> Option<String> {
        if self.major.is_wildcard() || self.minor.is_wildcard() || self.patch.is_wildcard() {
            return None;
        }
        let mut version = format!(
            "{}.{}.{}",
            self.major.raw(),
            self.minor.raw(),
            self.patch.raw()
        );
        if let Segment::Text(suffix) = &self.suffix {
            version.push('-');
            version.push_str(suffix);
        }
        Some(version)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}",
            self.major.raw(),
            self.minor.raw(),
            self.patch.raw(),
            self.suffix.raw()
        )
    }
}
