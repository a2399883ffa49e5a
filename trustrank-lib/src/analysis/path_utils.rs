//! Layout of local repository checkouts.

use crate::facts::RepoSpec;
use camino::{Utf8Path, Utf8PathBuf};

/// Sanitize a string for use as a single path component.
///
/// Traversal sequences and characters that are unsafe in file names are replaced with `_`.
#[must_use]
pub fn sanitize_path_component(s: &str) -> String {
    let s = s.replace("..", "__");
    s.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

/// Directory under `root` where the checkout of `spec` lives: `<root>/<host>/<owner>/<repo>`.
#[must_use]
pub fn checkout_path(root: &Utf8Path, spec: &RepoSpec) -> Utf8PathBuf {
    root.join(sanitize_path_component(spec.host()))
        .join(sanitize_path_component(spec.owner()))
        .join(sanitize_path_component(spec.repo()))
}
