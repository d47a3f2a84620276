//! Asset manifest resolution

use crate::domain::{BuildMode, Manifest};
use crate::error::{BlogError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub struct ManifestResolver;

impl ManifestResolver {
    /// Resolve the manifest for `mode`.
    ///
    /// Development mode never touches the filesystem. In production the file
    /// at `path` must exist and hold a flat JSON object of strings; anything
    /// else is a [`BlogError::ConfigLoad`].
    pub fn resolve(mode: BuildMode, path: &Path) -> Result<Manifest> {
        if mode.is_development() {
            debug!("using development asset manifest");
            return Ok(Manifest::development());
        }

        let contents = fs::read_to_string(path).map_err(|e| BlogError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let manifest = Manifest::from_json_str(&contents).map_err(|e| BlogError::ConfigLoad {
            path: path.to_path_buf(),
            reason: format!("invalid manifest JSON: {}", e),
        })?;

        info!(path = %path.display(), entries = manifest.len(), "loaded asset manifest");
        Ok(manifest)
    }
}
