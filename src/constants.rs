//! Fixed conventions shared by every generated etcd member.

/// Name of the store; used as process name, container name and manifest file stem.
pub const ETCD: &str = "etcd";

/// Port etcd serves clients on.
pub const ETCD_LISTEN_CLIENT_PORT: u16 = 2379;

/// Port etcd members talk to each other on.
pub const ETCD_LISTEN_PEER_PORT: u16 = 2380;

/// Scheme used for every client and peer URL.
pub const ETCD_URL_SCHEME: &str = "https";

/// Loopback address always included in the client listen URLs.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// Value passed to `--snapshot-count`.
pub const ETCD_SNAPSHOT_COUNT: u32 = 10000;

/// Version tag used when no explicit etcd image is configured.
pub const DEFAULT_ETCD_VERSION: &str = "3.2.18";

pub const DEFAULT_IMAGE_REPOSITORY: &str = "k8s.gcr.io";

pub const DEFAULT_ETCD_DATA_DIR: &str = "/var/lib/etcd";

pub const KUBERNETES_DIR: &str = "/etc/kubernetes";

/// Subdirectory of [`KUBERNETES_DIR`] holding static pod manifests.
pub const MANIFESTS_SUB_DIR_NAME: &str = "manifests";

/// Directory the etcd certificates live in, mounted read-only into the pod.
pub const ETCD_CERT_DIR: &str = "/etc/kubernetes/pki/etcd";

pub const ETCD_CA_CERT_NAME: &str = "/etc/kubernetes/pki/etcd/ca.crt";
pub const ETCD_SERVER_CERT_NAME: &str = "/etc/kubernetes/pki/etcd/server.crt";
pub const ETCD_SERVER_KEY_NAME: &str = "/etc/kubernetes/pki/etcd/server.key";
pub const ETCD_PEER_CERT_NAME: &str = "/etc/kubernetes/pki/etcd/peer.crt";
pub const ETCD_PEER_KEY_NAME: &str = "/etc/kubernetes/pki/etcd/peer.key";
pub const ETCD_HEALTHCHECK_CLIENT_CERT_NAME: &str =
    "/etc/kubernetes/pki/etcd/healthcheck-client.crt";
pub const ETCD_HEALTHCHECK_CLIENT_KEY_NAME: &str =
    "/etc/kubernetes/pki/etcd/healthcheck-client.key";

/// Volume names inside the generated pod.
pub const ETCD_DATA_VOLUME_NAME: &str = "etcd-data";
pub const ETCD_CERTS_VOLUME_NAME: &str = "etcd-certs";

/// Namespace static control-plane pods are mirrored into.
pub const KUBE_SYSTEM_NAMESPACE: &str = "kube-system";

pub const SYSTEM_CLUSTER_CRITICAL: &str = "system-cluster-critical";

/// Liveness probe tuning for the etcd container.
pub const LIVENESS_INITIAL_DELAY_SECONDS: u32 = 15;
pub const LIVENESS_TIMEOUT_SECONDS: u32 = 15;
pub const LIVENESS_FAILURE_THRESHOLD: u32 = 8;
