//! Static pod descriptor for the etcd member.
//!
//! Only the subset of the pod schema the node supervisor needs is modelled.
//! Field names serialize to the upstream camelCase keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ETCD, ETCD_CA_CERT_NAME, ETCD_CERTS_VOLUME_NAME, ETCD_CERT_DIR, ETCD_DATA_VOLUME_NAME,
    ETCD_HEALTHCHECK_CLIENT_CERT_NAME, ETCD_HEALTHCHECK_CLIENT_KEY_NAME, KUBE_SYSTEM_NAMESPACE,
    LIVENESS_FAILURE_THRESHOLD, LIVENESS_INITIAL_DELAY_SECONDS, LIVENESS_TIMEOUT_SECONDS,
    LOOPBACK_ADDRESS, SYSTEM_CLUSTER_CRITICAL,
};
use crate::endpoint::client_url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    pub containers: Vec<Container>,
    pub host_network: bool,
    pub priority_class_name: String,
    pub restart_policy: RestartPolicy,
    pub volumes: Vec<Volume>,
}

/// Static pods are always restarted by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    pub image: String,
    pub image_pull_policy: String,
    pub command: Vec<String>,
    pub volume_mounts: Vec<VolumeMount>,
    pub liveness_probe: Probe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    pub host_path: HostPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPath {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    pub exec: ExecAction,
    pub initial_delay_seconds: u32,
    pub timeout_seconds: u32,
    pub failure_threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecAction {
    pub command: Vec<String>,
}

impl Pod {
    /// The single etcd container.
    pub fn container(&self) -> &Container {
        &self.spec.containers[0]
    }
}

/// Wrap a resolved etcd command into a static pod.
///
/// The data directory is mounted read-write, the certificate directory read-only.
pub(crate) fn build_pod(command: Vec<String>, image: String, data_dir: &str) -> Pod {
    let volumes = vec![
        host_path_volume(ETCD_DATA_VOLUME_NAME, data_dir),
        host_path_volume(ETCD_CERTS_VOLUME_NAME, ETCD_CERT_DIR),
    ];
    let volume_mounts = vec![
        VolumeMount {
            name: ETCD_DATA_VOLUME_NAME.to_string(),
            mount_path: data_dir.to_string(),
            read_only: false,
        },
        VolumeMount {
            name: ETCD_CERTS_VOLUME_NAME.to_string(),
            mount_path: ETCD_CERT_DIR.to_string(),
            read_only: true,
        },
    ];

    let labels = BTreeMap::from([
        ("component".to_string(), ETCD.to_string()),
        ("tier".to_string(), "control-plane".to_string()),
    ]);

    Pod {
        api_version: "v1".to_string(),
        kind: "Pod".to_string(),
        metadata: ObjectMeta {
            name: ETCD.to_string(),
            namespace: KUBE_SYSTEM_NAMESPACE.to_string(),
            labels,
        },
        spec: PodSpec {
            containers: vec![Container {
                name: ETCD.to_string(),
                image,
                image_pull_policy: "IfNotPresent".to_string(),
                command,
                volume_mounts,
                liveness_probe: liveness_probe(),
            }],
            host_network: true,
            priority_class_name: SYSTEM_CLUSTER_CRITICAL.to_string(),
            restart_policy: RestartPolicy::Always,
            volumes,
        },
    }
}

fn host_path_volume(name: &str, path: &str) -> Volume {
    Volume {
        name: name.to_string(),
        host_path: HostPath {
            path: path.to_string(),
            kind: "DirectoryOrCreate".to_string(),
        },
    }
}

/// `etcdctl get` against the loopback client URL using the health-check client cert.
fn liveness_probe() -> Probe {
    let etcdctl = format!(
        "ETCDCTL_API=3 etcdctl --endpoints={} --cacert={} --cert={} --key={} get foo",
        client_url(LOOPBACK_ADDRESS),
        ETCD_CA_CERT_NAME,
        ETCD_HEALTHCHECK_CLIENT_CERT_NAME,
        ETCD_HEALTHCHECK_CLIENT_KEY_NAME,
    );
    Probe {
        exec: ExecAction {
            command: vec!["/bin/sh".to_string(), "-ec".to_string(), etcdctl],
        },
        initial_delay_seconds: LIVENESS_INITIAL_DELAY_SECONDS,
        timeout_seconds: LIVENESS_TIMEOUT_SECONDS,
        failure_threshold: LIVENESS_FAILURE_THRESHOLD,
    }
}
