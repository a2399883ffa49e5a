//! Repository facts supplied to the scoring engine
//!
//! This module defines the data the engine scores and the hand-off through which the
//! repository-data acquisition layer supplies it. Fetching facts from GitHub, npm, or
//! anywhere else is not done here; the engine consumes an already-resolved list.
//!
//! # Implementation Model
//!
//! The core type is [`RepositoryFacts`], an immutable snapshot of one repository: its
//! identity, README text, the authors of its commits over the last year, its open
//! issues, and a handful of counts.
//!
//! Facts arrive as a [`FactsSnapshot`], a JSON-lines document written by the acquisition
//! layer. Each record is indexed under every URL that names it, normalized through
//! [`RepoUrl`] so that `https://github.com/o/r.git` and `https://github.com/o/r/tree/main`
//! find the same repository, and npm package pages resolve to their source repository.
//! Resolution is all-or-nothing: a URL without facts fails the run, since every later
//! stage indexes repositories positionally.

mod package_manifest;
mod repo_spec;
mod repository_facts;
mod snapshot;

pub use package_manifest::count_declared_dependencies;
pub use repo_spec::{RepoSpec, RepoUrl};
pub use repository_facts::{Commit, Issue, RepositoryFacts};
pub use snapshot::{FactsSnapshot, read_url_list};
