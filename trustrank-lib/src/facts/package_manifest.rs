use crate::Result;
use ohno::IntoAppError;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: Option<Map<String, Value>>,
}

/// Count the runtime dependencies declared in an npm `package.json` document.
///
/// Returns `None` when the manifest has no `dependencies` section, which callers
/// treat as zero dependencies.
pub fn count_declared_dependencies(package_json: &str) -> Result<Option<u64>> {
    let manifest: PackageManifest = serde_json::from_str(package_json).into_app_err("parsing package.json")?;
    Ok(manifest.dependencies.map(|deps| deps.len() as u64))
}
