use super::package_manifest::count_declared_dependencies;
use super::{Commit, Issue, RepoUrl, RepositoryFacts};
use crate::Result;
use camino::Utf8Path;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

const LOG_TARGET: &str = "     facts";

/// One line of a facts snapshot file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FactsRecord {
    url: String,
    name: String,
    #[serde(default)]
    readme_text: String,
    #[serde(default)]
    commits: Vec<Commit>,
    #[serde(default)]
    open_issues: Vec<Issue>,
    #[serde(default)]
    num_pull_requests: u64,
    #[serde(default)]
    num_stars: u64,
    #[serde(default)]
    num_forks: u64,
    #[serde(default)]
    num_dependencies: Option<u64>,
    #[serde(default)]
    license_name: Option<String>,

    /// Other URLs the acquisition layer resolved to this repository (e.g. an npm page).
    #[serde(default)]
    source_urls: Vec<String>,

    /// Raw `package.json` text, used when `num_dependencies` is absent.
    #[serde(default)]
    package_manifest: Option<String>,
}

impl FactsRecord {
    fn into_facts(self) -> Result<RepositoryFacts> {
        let num_dependencies = match (self.num_dependencies, &self.package_manifest) {
            (Some(count), _) => count,
            (None, Some(manifest)) => count_declared_dependencies(manifest)
                .map_err(|e| e.enrich_with(|| format!("counting dependencies of '{}'", self.name)))?
                .unwrap_or_else(|| {
                    log::warn!(target: LOG_TARGET, "No dependencies found for repository '{}'", self.name);
                    0
                }),
            (None, None) => {
                log::warn!(target: LOG_TARGET, "No dependencies found for repository '{}'", self.name);
                0
            }
        };

        if self.license_name.is_none() {
            log::warn!(target: LOG_TARGET, "No license found for repository '{}'", self.name);
        }

        Ok(RepositoryFacts {
            url: self.url,
            name: self.name,
            readme_text: self.readme_text,
            commits: self.commits,
            open_issues: self.open_issues,
            num_pull_requests: self.num_pull_requests,
            num_stars: self.num_stars,
            num_forks: self.num_forks,
            num_dependencies,
            license_name: self.license_name,
        })
    }
}

/// Repository facts produced by the acquisition layer, indexed by every URL that names them.
#[derive(Debug, Default)]
pub struct FactsSnapshot {
    facts: Vec<RepositoryFacts>,
    index: HashMap<RepoUrl, usize>,
}

impl FactsSnapshot {
    /// Load a snapshot from a JSON-lines file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading facts snapshot '{path}'"))?;
        Self::parse(&text).map_err(|e| e.enrich_with(|| format!("parsing facts snapshot '{path}'")))
    }

    /// Parse a snapshot, one JSON object per non-blank line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut snapshot = Self::default();

        for (line_number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let record: FactsRecord =
                serde_json::from_str(line).into_app_err_with(|| format!("malformed facts record on line {}", line_number + 1))?;

            let keys = core::iter::once(&record.url)
                .chain(&record.source_urls)
                .map(|url| RepoUrl::parse(url))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| e.enrich_with(|| format!("invalid repository URL in facts record on line {}", line_number + 1)))?;

            let slot = snapshot.facts.len();
            snapshot.facts.push(record.into_facts()?);

            for key in keys {
                if let Some(previous) = snapshot.index.insert(key.clone(), slot) {
                    log::warn!(
                        target: LOG_TARGET,
                        "'{key}' is described by both '{}' and '{}', using the latter",
                        snapshot.facts[previous].name,
                        snapshot.facts[slot].name
                    );
                }
            }

            log::trace!(target: LOG_TARGET, "'{}' repository is loaded", snapshot.facts[slot].name);
        }

        Ok(snapshot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Look up the facts for each URL, preserving the order of `urls`.
    ///
    /// A URL without facts fails the whole resolution; the error names every such URL.
    pub fn resolve<S: AsRef<str>>(&self, urls: &[S]) -> Result<Vec<RepositoryFacts>> {
        let mut resolved = Vec::with_capacity(urls.len());
        let mut unresolved = Vec::new();

        for url in urls {
            let url = url.as_ref();
            match self.index.get(&RepoUrl::parse(url)?).copied() {
                Some(slot) => {
                    log::debug!(target: LOG_TARGET, "Resolved '{url}' to repository '{}'", self.facts[slot].name);
                    resolved.push(self.facts[slot].clone());
                }
                None => unresolved.push(url.to_string()),
            }
        }

        if !unresolved.is_empty() {
            return Err(app_err!("no repository facts available for: {}", unresolved.join(", ")));
        }

        log::trace!(
            target: LOG_TARGET,
            "Repository list is created, contains repositories: [{}]",
            resolved.iter().map(|facts| format!("'{}'", facts.name)).collect::<Vec<_>>().join(", ")
        );

        Ok(resolved)
    }
}

/// Parse a newline-delimited list of package URLs.
///
/// Surrounding whitespace is trimmed and blank lines are ignored.
#[must_use]
pub fn read_url_list(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).map(ToString::to_string).collect()
}
