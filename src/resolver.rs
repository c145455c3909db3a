// Release resolution against the GitHub catalog
//
// Narrows the release list down to exactly one release with exactly one
// matching asset, or reports a typed error telling the user how to
// disambiguate. Selection is pure and separated from fetching so it can
// be tested against constructed release lists.

use regex::Regex;

use crate::error::{GdError, Result};
use crate::github::{self, Release};
use crate::version::{VersionSpec, without_stable_suffix};

/// A predicate over asset names. All supplied checks must pass for an
/// asset to be selected.
#[derive(Debug, Clone)]
pub struct AssetCheck {
    pattern: Regex,
    negate: bool,
}

impl AssetCheck {
    /// Asset name must contain the given literal fragment.
    pub fn contains(fragment: &str) -> Self {
        let pattern = Regex::new(&regex::escape(fragment)).expect("escaped literal is a valid regex");
        AssetCheck {
            pattern,
            negate: false,
        }
    }

    /// Asset name must not contain the given literal token. Used to keep
    /// mono builds out of standard-flavour requests, since the standard
    /// fragment is a substring of the mono one.
    pub fn excludes(token: &str) -> Self {
        let pattern = Regex::new(&regex::escape(token)).expect("escaped literal is a valid regex");
        AssetCheck {
            pattern,
            negate: true,
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.pattern.is_match(name) != self.negate
    }
}

/// Whether a release tag satisfies the spec.
///
/// Upstream tags inconsistently carry a trailing `-stable` marker that is
/// not a semantic pre-release, so the tag is interpreted both with and
/// without it; either interpretation satisfying the spec counts as a
/// match. Tags that parse as neither are skipped.
fn tag_matches(tag: &str, spec: &VersionSpec) -> bool {
    let as_is = VersionSpec::parse(tag).is_ok_and(|v| v.is_match(spec));
    let stripped =
        VersionSpec::parse(without_stable_suffix(tag)).is_ok_and(|v| v.is_match(spec));
    as_is || stripped
}

/// Pick the single acceptable release from the catalog.
pub fn select_release(
    releases: Vec<Release>,
    spec: Option<&VersionSpec>,
    latest: bool,
) -> Result<Release> {
    let mut candidates: Vec<Release> = match spec {
        Some(spec) => releases
            .into_iter()
            .filter(|r| tag_matches(&r.tag_name, spec))
            .collect(),
        None => releases,
    };

    if candidates.is_empty() {
        let wanted = spec.map(|s| s.to_string()).unwrap_or_else(|| "*".into());
        return Err(GdError::NoMatchingVersion(wanted));
    }

    if candidates.len() > 1 && !latest {
        let tags = candidates.iter().map(|r| r.tag_name.clone()).collect();
        return Err(GdError::AmbiguousVersion(tags));
    }

    // Most recently published wins when --latest allows multiple.
    let best = candidates
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.published_at.cmp(&b.published_at))
        .map(|(i, _)| i)
        .expect("candidates is non-empty");
    Ok(candidates.swap_remove(best))
}

/// Narrow a release's asset list to the single asset satisfying every
/// check.
pub fn select_asset(mut release: Release, checks: &[AssetCheck]) -> Result<Release> {
    let matching: Vec<_> = release
        .assets
        .drain(..)
        .filter(|asset| checks.iter().all(|check| check.is_match(&asset.name)))
        .collect();

    match matching.len() {
        0 => Err(GdError::NoMatchingAsset {
            tag: release.tag_name,
        }),
        1 => {
            release.assets = matching;
            Ok(release)
        }
        _ => Err(GdError::AmbiguousAsset {
            tag: release.tag_name,
            names: matching.into_iter().map(|a| a.name).collect(),
        }),
    }
}

/// Fetch the release catalog and resolve it to one release carrying one
/// asset.
pub async fn find_release_with_asset(
    owner: &str,
    repo: &str,
    spec: Option<&VersionSpec>,
    checks: &[AssetCheck],
    latest: bool,
) -> Result<Release> {
    let releases = github::fetch_releases(owner, repo).await?;
    log::debug!("fetched {} releases from {owner}/{repo}", releases.len());

    let release = select_release(releases, spec, latest)?;
    select_asset(release, checks)
}
