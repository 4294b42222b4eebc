//! etcdpod: static pod generation for node-local etcd members.
//!
//! Turns a [`ClusterConfig`] and the list of already-known etcd members into
//! the etcd command line and a static [`Pod`] a node supervisor can start
//! without a scheduler.
//!
//! # Quick start
//!
//! 1. Build or deserialize a [`ClusterConfig`] with `etcd.local` set.
//! 2. Call [`get_etcd_pod_spec`] with the known members (empty to bootstrap).
//! 3. Or call [`create_local_etcd_static_pod_manifest_file`] to hand the pod
//!    to a [`ManifestWriter`] ([`FileManifestWriter`] included).
//!
//! Generation is pure: identical inputs always give identical output.

pub mod config;
pub mod constants;
pub mod manifest;

mod args;
mod endpoint;
mod pod;
mod state;

pub use args::ArgumentSet;
pub use config::{ClusterConfig, Etcd, ExternalEtcd, LocalEtcd};
pub use manifest::{FileManifestWriter, ManifestError, ManifestWriter};
pub use pod::{
    Container, ExecAction, HostPath, ObjectMeta, Pod, PodSpec, Probe, RestartPolicy, Volume,
    VolumeMount,
};
pub use state::{ClusterState, Member};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{ETCD, KUBERNETES_DIR, MANIFESTS_SUB_DIR_NAME};

// ============================================================================
// EtcdError
// ============================================================================

/// Errors returned by etcdpod operations.
#[derive(Debug, Error)]
pub enum EtcdError {
    /// The etcd section sets neither or both of local and external.
    #[error("invalid etcd configuration: {0}")]
    ConfigConflict(String),
    #[error("etcd static pod manifest cannot be generated for cluster using external etcd")]
    ExternalEtcd,
    #[error("Manifest error: {0}")]
    Manifest(String),
}

// ============================================================================
// Generation
// ============================================================================

/// Build the etcd command for this node.
///
/// The first token is `etcd`; the rest are `--flag=value`. With an empty
/// `initial_cluster` the member bootstraps a new cluster on its own; otherwise
/// it joins the listed members, which must include this node.
pub fn get_etcd_command(
    cfg: &ClusterConfig,
    initial_cluster: &[Member],
) -> Result<Vec<String>, EtcdError> {
    let local = cfg.local_etcd()?;
    Ok(args::build_command(cfg, local, initial_cluster))
}

/// Build the etcd static pod for this node.
pub fn get_etcd_pod_spec(cfg: &ClusterConfig, initial_cluster: &[Member]) -> Result<Pod, EtcdError> {
    let local = cfg.local_etcd()?;
    let command = args::build_command(cfg, local, initial_cluster);
    Ok(pod::build_pod(command, cfg.etcd_image(local), &local.data_dir))
}

/// Generate the etcd static pod and write it under `manifest_dir`.
///
/// Nothing is written when the configuration is rejected. Returns the path
/// of the written manifest.
pub fn create_local_etcd_static_pod_manifest_file<W: ManifestWriter>(
    manifest_dir: &Path,
    cfg: &ClusterConfig,
    initial_cluster: &[Member],
    writer: &W,
) -> Result<PathBuf, EtcdError> {
    let spec = get_etcd_pod_spec(cfg, initial_cluster)?;

    let path = writer
        .write_static_pod(ETCD, manifest_dir, &spec)
        .map_err(|e| EtcdError::Manifest(e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        node = %cfg.node_name,
        members = initial_cluster.len(),
        "Wrote static pod manifest for local etcd"
    );
    Ok(path)
}

/// Directory static pod manifests are written to on a node.
pub fn default_manifest_dir() -> PathBuf {
    Path::new(KUBERNETES_DIR).join(MANIFESTS_SUB_DIR_NAME)
}
