//! GitHub license lookup
//!
//! Fetches the raw license of a repository through
//! `GET https://api.github.com/repos/{owner}/{repo}/license`.
//! See <https://docs.github.com/en/rest/licenses/licenses#get-the-license-for-a-repository>.

use thiserror::Error;
use ureq::http::Uri;

pub const GITHUB_PREFIX: &str = "https://github.com/";
const API_REPOS: &str = "https://api.github.com/repos";

pub const ACCEPT_HEADER: (&str, &str) = ("Accept", "application/vnd.github.raw");
pub const API_VERSION_HEADER: (&str, &str) = ("X-GitHub-Api-Version", "2022-11-28");

#[derive(Error, Debug)]
pub enum BackfillError {
    #[error("Not a GitHub repository: {0}")]
    UnsupportedRepository(String),

    #[error("GitHub API returned status {0}")]
    Status(u16),

    #[error("Failed to fetch license: {0}")]
    Transport(#[from] ureq::Error),

    #[error("License body is not valid UTF-8: {0}")]
    InvalidBody(String),

    #[error("Unknown error while fetching license")]
    Unknown,
}

/// Anything that can turn a repository URL into license text.
pub trait LicenseSource: Send + Sync + 'static {
    fn fetch_license(&self, repository: &str) -> Result<String, BackfillError>;
}

/// A fully described license request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
}

/// Whether `repository` points at github.com.
pub fn is_github_repository(repository: &str) -> bool {
    repository.starts_with(GITHUB_PREFIX)
}

/// Build the license request for a GitHub repository URL.
///
/// Returns `None` for other hosts and for URLs without an owner/repo path.
pub fn license_request(repository: &str) -> Option<LicenseRequest> {
    license_request_at(API_REPOS, repository)
}

fn license_request_at(api_base: &str, repository: &str) -> Option<LicenseRequest> {
    if !is_github_repository(repository) {
        return None;
    }

    let uri: Uri = repository.parse().ok()?;
    let path = uri.path().trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if path.is_empty() {
        return None;
    }

    Some(LicenseRequest {
        method: "GET",
        url: format!("{api_base}{path}/license"),
        headers: vec![ACCEPT_HEADER, API_VERSION_HEADER],
    })
}

/// Blocking GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    agent: ureq::Agent,
    api_base: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    pub fn new() -> Self {
        Self::with_api_base(API_REPOS)
    }

    /// Client for a GitHub-compatible API rooted at `api_base`, the URL that
    /// `/{owner}/{repo}/license` is appended to.
    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

impl LicenseSource for GitHubClient {
    /// Anything but a 200 with a UTF-8 body is a failure. No retries.
    fn fetch_license(&self, repository: &str) -> Result<String, BackfillError> {
        let request = license_request_at(&self.api_base, repository)
            .ok_or_else(|| BackfillError::UnsupportedRepository(repository.to_string()))?;

        let mut call = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            call = call.header(*name, *value);
        }

        let response = match call.call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(code)) => return Err(BackfillError::Status(code)),
            Err(err) => return Err(err.into()),
        };

        let status = response.status().as_u16();
        if status != 200 {
            return Err(BackfillError::Status(status));
        }

        let body = response.into_body().read_to_vec()?;
        String::from_utf8(body).map_err(|e| BackfillError::InvalidBody(e.to_string()))
    }
}
