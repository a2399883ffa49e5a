use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

const NPM_HOSTS: &[&str] = &["www.npmjs.com", "npmjs.com"];

/// Hosts whose owner and repository names are case-insensitive.
const CASE_INSENSITIVE_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// A hosted git repository, reduced to `scheme://host/owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    url: Arc<Url>,
    host: Arc<str>,
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Parse a repository URL.
    ///
    /// Owner and repository names are lowercased on hosts that ignore their case.
    pub fn parse(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 {
            bail!("invalid repository URL format: {url}");
        }

        if path_segments[0].is_empty() || path_segments[1].is_empty() {
            bail!("invalid repository URL: empty owner or repo name: {url}");
        }

        let host = url.host_str().unwrap_or_default();
        let mut owner = path_segments[0].to_string();
        let mut repo = path_segments[1].trim_end_matches(".git").to_string();
        if CASE_INSENSITIVE_HOSTS.contains(&host) {
            owner.make_ascii_lowercase();
            repo.make_ascii_lowercase();
        }
        let scheme = url.scheme();

        let clean_url = Url::parse(&format!("{scheme}://{host}/{owner}/{repo}")).into_app_err("reconstructing repository URL")?;

        Ok(Self {
            host: Arc::from(host),
            owner: Arc::from(owner),
            repo: Arc::from(repo),
            url: Arc::new(clean_url),
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// A URL naming a package to evaluate.
///
/// Packages are named either by their source repository or by their npm registry page.
/// Two URLs naming the same package compare equal, regardless of trailing paths or a
/// `.git` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepoUrl {
    Hosted(RepoSpec),
    Npm(Arc<str>),
}

impl RepoUrl {
    pub fn parse(text: &str) -> Result<Self> {
        let url = Url::parse(text.trim()).into_app_err_with(|| format!("invalid URL '{text}'"))?;

        if url.host_str().is_some_and(|host| NPM_HOSTS.contains(&host)) {
            return Self::parse_npm(&url);
        }

        Ok(Self::Hosted(RepoSpec::parse(&url)?))
    }

    fn parse_npm(url: &Url) -> Result<Self> {
        let segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        let name = match segments.as_slice() {
            ["package", scope, name, ..] if scope.starts_with('@') && !name.is_empty() => format!("{scope}/{name}"),
            ["package", name, ..] if !name.is_empty() && !name.starts_with('@') => (*name).to_string(),
            _ => bail!("invalid npm package URL: {url}"),
        };

        Ok(Self::Npm(Arc::from(name)))
    }
}

impl Display for RepoUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Hosted(spec) => write!(f, "{spec}"),
            Self::Npm(name) => write!(f, "https://www.npmjs.com/package/{name}"),
        }
    }
}
