use super::LOG_TARGET;
use crate::Result;
use camino::Utf8Path;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::fs;
use std::process::{Output, Stdio};
use tokio::process::Command;
use url::Url;

/// Make sure a shallow checkout of `repo_url` exists at `repo_path`.
///
/// An existing checkout is reused as-is. A directory left behind without a `.git`
/// directory is removed and cloned again.
pub async fn ensure_checkout(repo_path: &Utf8Path, repo_url: &Url, timeout: Duration) -> Result<()> {
    let start_time = std::time::Instant::now();

    if repo_path.join(".git").exists() {
        log::debug!(target: LOG_TARGET, "Reusing checkout of '{repo_url}' at '{repo_path}'");
        return Ok(());
    }

    if repo_path.exists() {
        log::warn!(target: LOG_TARGET, "Checkout path '{repo_path}' exists but .git directory missing, re-cloning");
        fs::remove_dir_all(repo_path).into_app_err_with(|| format!("could not remove incomplete checkout '{repo_path}'"))?;
    }

    if let Some(parent) = repo_path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("could not create directory '{parent}'"))?;
    }

    log::info!(target: LOG_TARGET, "Cloning repository '{repo_url}'");
    let output = run_git_with_timeout(
        &["clone", "--depth", "1", "--single-branch", "--no-tags", repo_url.as_str(), repo_path.as_str()],
        timeout,
    )
    .await?;
    check_git_output(&output, "git clone")?;

    log::debug!(target: LOG_TARGET, "Cloned '{repo_url}' in {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn check_git_output(output: &Output, operation: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{operation} failed: {}", stderr.trim());
    }
    Ok(())
}

async fn run_git_with_timeout(args: &[&str], timeout: Duration) -> Result<Output> {
    let child = Command::new("git")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err("could not spawn git command")?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(e).into_app_err_with(|| format!("'git {}' failed to run", args.join(" "))),
        Err(_) => {
            bail!("'git {}' timed out after {} seconds", args.join(" "), timeout.as_secs());
        }
    }
}
