//! Shared test helpers for etcdpod integration tests.
//!
//! Provides config builders and flag-list helpers.

// Each test binary compiles this module independently and only uses a subset
// of exports, so unused items are expected.
#![allow(dead_code)]

use std::collections::BTreeMap;

use etcdpod::{ClusterConfig, Etcd, ExternalEtcd, LocalEtcd, Member};

/// A local-etcd config for node `name` advertising on `address`.
pub fn local_config(name: &str, address: &str) -> ClusterConfig {
    local_config_with_args(name, address, BTreeMap::new())
}

/// Like [`local_config`] with extra etcd arguments.
pub fn local_config_with_args(
    name: &str,
    address: &str,
    extra_args: BTreeMap<String, String>,
) -> ClusterConfig {
    ClusterConfig {
        node_name: name.to_string(),
        advertise_address: address.to_string(),
        etcd: Etcd::Local(LocalEtcd {
            data_dir: "/var/lib/etcd".to_string(),
            image: String::new(),
            extra_args,
        }),
        ..ClusterConfig::default()
    }
}

/// A config pointing at an external etcd cluster.
pub fn external_config() -> ClusterConfig {
    ClusterConfig {
        node_name: "foo".to_string(),
        advertise_address: "1.2.3.4".to_string(),
        etcd: Etcd::External(ExternalEtcd {
            endpoints: vec!["https://etcd-instance:2379".to_string()],
            ca_file: "/etc/kubernetes/pki/etcd/ca.crt".to_string(),
            cert_file: "/etc/kubernetes/pki/etcd/apiserver-etcd-client.crt".to_string(),
            key_file: "/etc/kubernetes/pki/etcd/apiserver-etcd-client.key".to_string(),
        }),
        ..ClusterConfig::default()
    }
}

pub fn member(name: &str, address: &str) -> Member {
    Member::new(name, format!("https://{address}:2380"))
}

/// Flags every generated command carries regardless of node or membership.
pub fn tls_and_tuning_flags() -> Vec<String> {
    [
        "--data-dir=/var/lib/etcd",
        "--cert-file=/etc/kubernetes/pki/etcd/server.crt",
        "--key-file=/etc/kubernetes/pki/etcd/server.key",
        "--trusted-ca-file=/etc/kubernetes/pki/etcd/ca.crt",
        "--client-cert-auth=true",
        "--peer-cert-file=/etc/kubernetes/pki/etcd/peer.crt",
        "--peer-key-file=/etc/kubernetes/pki/etcd/peer.key",
        "--peer-trusted-ca-file=/etc/kubernetes/pki/etcd/ca.crt",
        "--snapshot-count=10000",
        "--peer-client-cert-auth=true",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Sort a flag list; flag order is not part of the command contract.
pub fn sorted(mut flags: Vec<String>) -> Vec<String> {
    flags.sort();
    flags
}

/// Count tokens that set `flag` (given without dashes).
pub fn count_flag(command: &[String], flag: &str) -> usize {
    let prefix = format!("--{flag}=");
    command.iter().filter(|t| t.starts_with(&prefix)).count()
}
