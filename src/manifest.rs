//! Manifest writer trait and default file implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::pod::Pod;

// ============================================================================
// ManifestWriter trait
// ============================================================================

/// Persists a static pod where the node supervisor picks it up.
///
/// etcdpod only produces the [`Pod`]; implementations decide the encoding
/// and storage. Writing the same pod twice must leave the same result.
pub trait ManifestWriter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write `pod` as the manifest for `component` under `manifest_dir`.
    fn write_static_pod(
        &self,
        component: &str,
        manifest_dir: &Path,
        pod: &Pod,
    ) -> Result<PathBuf, Self::Error>;
}

// ============================================================================
// FileManifestWriter
// ============================================================================

/// Writes `<manifest_dir>/<component>.yaml`, creating the directory if needed.
///
/// The body is pretty-printed JSON, which any YAML reader accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileManifestWriter;

/// Errors from the file manifest writer.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Path of the manifest file for `component`.
pub fn manifest_path(component: &str, manifest_dir: &Path) -> PathBuf {
    manifest_dir.join(format!("{component}.yaml"))
}

impl ManifestWriter for FileManifestWriter {
    type Error = ManifestError;

    fn write_static_pod(
        &self,
        component: &str,
        manifest_dir: &Path,
        pod: &Pod,
    ) -> Result<PathBuf, Self::Error> {
        fs::create_dir_all(manifest_dir).map_err(|source| ManifestError::Io {
            path: manifest_dir.to_path_buf(),
            source,
        })?;

        let mut body = serde_json::to_vec_pretty(pod)?;
        body.push(b'\n');

        let path = manifest_path(component, manifest_dir);
        fs::write(&path, body).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), component, "Wrote static pod manifest");
        Ok(path)
    }
}
