use super::path_utils::checkout_path;
use super::{AnalysisEngine, LOG_TARGET, git};
use crate::Result;
use crate::facts::{RepoSpec, RepositoryFacts};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::process::Command;
use tokio::sync::Mutex as AsyncMutex;
use url::Url;

const SEMGREP_PROGRAM: &str = "semgrep";

#[derive(Deserialize)]
struct SemgrepOutput {
    results: Vec<serde_json::Value>,
}

/// Analysis engine backed by `git` checkouts and the `semgrep` command-line tool.
///
/// Checkouts into the same directory are serialized, so a repository named twice in
/// one cohort is cloned once and then reused. Clones share these locks.
#[derive(Debug, Clone)]
pub struct SemgrepEngine {
    checkout_dir: Utf8PathBuf,
    checkout_timeout: Duration,
    program: String,
    checkout_locks: Arc<Mutex<HashMap<Utf8PathBuf, Arc<AsyncMutex<()>>>>>,
}

impl SemgrepEngine {
    #[must_use]
    pub fn new(checkout_dir: impl Into<Utf8PathBuf>, checkout_timeout: Duration) -> Self {
        Self {
            checkout_dir: checkout_dir.into(),
            checkout_timeout,
            program: SEMGREP_PROGRAM.to_string(),
            checkout_locks: Arc::default(),
        }
    }

    /// Use a different executable in place of `semgrep`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn checkout_lock(&self, path: &Utf8Path) -> Arc<AsyncMutex<()>> {
        let mut locks = self.checkout_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }
}

impl AnalysisEngine for SemgrepEngine {
    async fn checkout(&self, facts: &RepositoryFacts) -> Result<Utf8PathBuf> {
        let url = Url::parse(&facts.url).into_app_err_with(|| format!("invalid repository URL '{}'", facts.url))?;
        let spec = RepoSpec::parse(&url)?;
        let path = checkout_path(&self.checkout_dir, &spec);

        let lock = self.checkout_lock(&path);
        let _guard = lock.lock().await;
        git::ensure_checkout(&path, spec.url(), self.checkout_timeout).await?;
        Ok(path)
    }

    async fn run_rule(&self, rule_id: &str, repo_path: &Utf8Path) -> Result<u64> {
        let output = Command::new(&self.program)
            .args(["--config", rule_id, "--json", "-q", repo_path.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .into_app_err_with(|| format!("could not spawn '{}'", self.program))?
            .wait_with_output()
            .await
            .into_app_err_with(|| format!("'{}' failed to run", self.program))?;

        // Exit status 1 only signals that findings exist.
        if !matches!(output.status.code(), Some(0 | 1)) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.program, output.status, stderr.trim());
        }

        let issues = count_findings(&output.stdout)?;
        log::debug!(target: LOG_TARGET, "{} rule {rule_id} found {issues} issues in '{repo_path}'", self.program);
        Ok(issues)
    }
}

/// Count the findings in semgrep's `--json` output.
fn count_findings(stdout: &[u8]) -> Result<u64> {
    let output: SemgrepOutput = serde_json::from_slice(stdout).into_app_err("malformed semgrep output")?;
    Ok(output.results.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_findings() {
        let stdout = br#"{"results": [{"check_id": "a"}, {"check_id": "b"}], "errors": []}"#;
        assert_eq!(count_findings(stdout).unwrap(), 2);
    }

    #[test]
    fn test_count_findings_none() {
        assert_eq!(count_findings(br#"{"results": [], "errors": []}"#).unwrap(), 0);
    }

    #[test]
    fn test_count_findings_malformed() {
        let _ = count_findings(b"Traceback (most recent call last):").unwrap_err();
        let _ = count_findings(br#"{"errors": []}"#).unwrap_err();
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let engine = SemgrepEngine::new("/tmp", Duration::from_secs(1)).with_program("trustrank-no-such-program");
        let _ = engine.run_rule("p/javascript", Utf8Path::new("/tmp")).await.unwrap_err();
    }

    #[test]
    fn test_checkout_lock_per_path() {
        let engine = SemgrepEngine::new("/cache", Duration::from_secs(1));
        let shared = engine.clone();

        let a = engine.checkout_lock(Utf8Path::new("/cache/github.com/o/a"));
        assert!(Arc::ptr_eq(&a, &shared.checkout_lock(Utf8Path::new("/cache/github.com/o/a"))));
        assert!(!Arc::ptr_eq(&a, &engine.checkout_lock(Utf8Path::new("/cache/github.com/o/b"))));
    }

    #[tokio::test]
    async fn test_same_repository_checkouts_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let path = root.join("github.com").join("expressjs").join("express");
        std::fs::create_dir_all(path.join(".git")).unwrap();

        let engine = SemgrepEngine::new(root, Duration::from_secs(5));
        let shared = engine.clone();
        let facts = RepositoryFacts::new("https://github.com/expressjs/express", "express");

        let lock = engine.checkout_lock(&path);
        let guard = lock.lock().await;
        let waiting = tokio::time::timeout(Duration::from_millis(100), engine.checkout(&facts)).await;
        assert!(waiting.is_err(), "checkout ran while the directory was locked");
        drop(guard);

        // both names of one repository resolve to the same reused checkout
        let (first, second) = futures::join!(engine.checkout(&facts), shared.checkout(&facts));
        assert_eq!(first.unwrap(), path);
        assert_eq!(second.unwrap(), path);
    }

    #[tokio::test]
    async fn test_checkout_rejects_non_repository_url() {
        let engine = SemgrepEngine::new("/tmp", Duration::from_secs(1));
        let facts = RepositoryFacts::new("https://github.com/only-owner", "only-owner");
        let _ = engine.checkout(&facts).await.unwrap_err();
    }
}
