//! Cluster configuration consumed by the generator.
//!
//! The consumer builds this struct however they want (a parsed document, CLI
//! flags, tests). etcdpod does no file or env reading of its own; the serde
//! derives exist so a loader can deserialize it directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ETCD_DATA_DIR, DEFAULT_ETCD_VERSION, DEFAULT_IMAGE_REPOSITORY, ETCD};
use crate::EtcdError;

/// Cluster configuration for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Name this node registers under; also the etcd member name.
    pub node_name: String,
    /// Address other members and clients reach this node on.
    pub advertise_address: String,
    /// Registry prefix used to derive the etcd image when none is pinned.
    #[serde(default = "default_image_repository")]
    pub image_repository: String,
    /// Where the etcd cluster lives.
    pub etcd: Etcd,
}

/// Etcd topology: either run a member on this node, or point at an external cluster.
///
/// Deserialization goes through the two-optional-fields document shape and
/// rejects documents with neither or both set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EtcdDocument", into = "EtcdDocument")]
pub enum Etcd {
    Local(LocalEtcd),
    External(ExternalEtcd),
}

/// Settings for an etcd member managed on this node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalEtcd {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Explicit image reference. Empty means derive from the image repository.
    #[serde(default)]
    pub image: String,
    /// Raw flag name (no leading dashes) to value, applied over the generated flags.
    #[serde(default)]
    pub extra_args: BTreeMap<String, String>,
}

/// Connection details for an etcd cluster managed outside this node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEtcd {
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub ca_file: String,
    #[serde(default)]
    pub cert_file: String,
    #[serde(default)]
    pub key_file: String,
}

/// The on-the-wire form of [`Etcd`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EtcdDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local: Option<LocalEtcd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external: Option<ExternalEtcd>,
}

impl TryFrom<EtcdDocument> for Etcd {
    type Error = EtcdError;

    fn try_from(doc: EtcdDocument) -> Result<Self, Self::Error> {
        match (doc.local, doc.external) {
            (Some(local), None) => Ok(Etcd::Local(local)),
            (None, Some(external)) => Ok(Etcd::External(external)),
            (Some(_), Some(_)) => Err(EtcdError::ConfigConflict(
                "etcd.local and etcd.external are mutually exclusive".to_string(),
            )),
            (None, None) => Err(EtcdError::ConfigConflict(
                "one of etcd.local or etcd.external must be set".to_string(),
            )),
        }
    }
}

impl From<Etcd> for EtcdDocument {
    fn from(etcd: Etcd) -> Self {
        match etcd {
            Etcd::Local(local) => EtcdDocument {
                local: Some(local),
                external: None,
            },
            Etcd::External(external) => EtcdDocument {
                local: None,
                external: Some(external),
            },
        }
    }
}

fn default_image_repository() -> String {
    DEFAULT_IMAGE_REPOSITORY.to_string()
}

fn default_data_dir() -> String {
    DEFAULT_ETCD_DATA_DIR.to_string()
}

impl Default for LocalEtcd {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            image: String::new(),
            extra_args: BTreeMap::new(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            node_name: String::new(),
            advertise_address: String::new(),
            image_repository: default_image_repository(),
            etcd: Etcd::Local(LocalEtcd::default()),
        }
    }
}

impl ClusterConfig {
    /// Returns the local etcd settings, refusing configurations that use external etcd.
    ///
    /// Must pass before any command or pod generation runs.
    pub fn local_etcd(&self) -> Result<&LocalEtcd, EtcdError> {
        match &self.etcd {
            Etcd::Local(local) => Ok(local),
            Etcd::External(_) => Err(EtcdError::ExternalEtcd),
        }
    }

    /// Image the etcd container runs.
    ///
    /// A pinned `local.image` wins; otherwise `<repository>/etcd-<arch>:<version>`.
    pub fn etcd_image(&self, local: &LocalEtcd) -> String {
        if !local.image.is_empty() {
            return local.image.clone();
        }
        format!(
            "{}/{}-{}:{}",
            self.image_repository,
            ETCD,
            image_arch(),
            DEFAULT_ETCD_VERSION
        )
    }
}

/// Architecture suffix used by the upstream image naming scheme.
fn image_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "arm" => "arm",
        "powerpc64" => "ppc64le",
        "s390x" => "s390x",
        other => other,
    }
}
