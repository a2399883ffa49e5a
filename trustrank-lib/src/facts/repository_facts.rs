use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit from the trailing 365-day window, reduced to its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub author_id: String,
}

/// A currently unresolved issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Everything known about one repository, as supplied by the acquisition layer.
///
/// Facts are built once per run and only ever handed out by shared reference, so
/// metrics can read but never alter them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFacts {
    pub url: String,
    pub name: String,

    #[serde(default)]
    pub readme_text: String,

    #[serde(default)]
    pub commits: Vec<Commit>,

    #[serde(default)]
    pub open_issues: Vec<Issue>,

    #[serde(default)]
    pub num_pull_requests: u64,

    #[serde(default)]
    pub num_stars: u64,

    #[serde(default)]
    pub num_forks: u64,

    #[serde(default)]
    pub num_dependencies: u64,

    #[serde(default)]
    pub license_name: Option<String>,
}

impl RepositoryFacts {
    /// Create facts for a repository with nothing known beyond its identity.
    #[must_use]
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            readme_text: String::new(),
            commits: Vec::new(),
            open_issues: Vec::new(),
            num_pull_requests: 0,
            num_stars: 0,
            num_forks: 0,
            num_dependencies: 0,
            license_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_has_empty_facts() {
        let facts = RepositoryFacts::new("https://github.com/expressjs/express", "express");
        assert_eq!(facts.name, "express");
        assert!(facts.commits.is_empty());
        assert!(facts.open_issues.is_empty());
        assert_eq!(facts.num_dependencies, 0);
        assert!(facts.license_name.is_none());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{"url":"https://github.com/a/b","name":"b","license_name":"MIT"}"#;
        let facts: RepositoryFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts.url, "https://github.com/a/b");
        assert_eq!(facts.license_name.as_deref(), Some("MIT"));
        assert_eq!(facts.readme_text, "");
        assert_eq!(facts.num_stars, 0);
    }

    #[test]
    fn test_deserialize_issues_and_commits() {
        let json = r#"{
            "url": "https://github.com/a/b",
            "name": "b",
            "commits": [{"author_id": "u1"}, {"author_id": "u2"}],
            "open_issues": [{"title": "crash", "created_at": "2024-01-01T00:00:00Z"}]
        }"#;
        let facts: RepositoryFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts.commits.len(), 2);
        assert_eq!(facts.commits[1].author_id, "u2");
        assert_eq!(facts.open_issues[0].created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
