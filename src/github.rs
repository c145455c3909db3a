// GitHub Releases API client
//
// Only the release-list endpoint is used. Responses are fetched fresh on
// every invocation; nothing is cached.

use lazy_static::lazy_static;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{GdError, Result};

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("gdman/", env!("CARGO_PKG_VERSION"));

const API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

lazy_static! {
    /// Shared HTTP client with proper User-Agent
    static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");
}

/// Get a reference to the shared HTTP client
pub fn client() -> &'static Client {
    &CLIENT
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    /// RFC 3339 timestamp as returned by the API. GitHub always reports
    /// UTC, so lexicographic order is chronological order.
    pub published_at: String,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// Error body GitHub returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[allow(dead_code)]
    documentation_url: Option<String>,
}

/// Fetch the full release list for a repository.
pub async fn fetch_releases(owner: &str, repo: &str) -> Result<Vec<Release>> {
    let url = format!("{API_BASE}/repos/{owner}/{repo}/releases");
    log::debug!("GET {url}");

    let response = CLIENT
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", API_VERSION)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ApiError>().await {
            Ok(body) => body.message,
            Err(_) => format!("request to {url} failed"),
        };
        return Err(GdError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_deserialization() {
        let json = r#"[{
            "tag_name": "4.2.2-stable",
            "published_at": "2024-04-17T14:00:00Z",
            "assets": [{
                "name": "Godot_v4.2.2-stable_linux.x86_64.zip",
                "browser_download_url": "https://example.com/godot.zip"
            }]
        }]"#;
        let releases: Vec<Release> = serde_json::from_str(json).unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].tag_name, "4.2.2-stable");
        assert_eq!(releases[0].assets[0].name, "Godot_v4.2.2-stable_linux.x86_64.zip");
    }

    #[test]
    fn test_published_at_lexicographic_order() {
        assert!("2024-04-17T14:00:00Z" < "2024-05-01T09:30:00Z");
    }
}
