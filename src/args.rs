//! Etcd command-line assembly.
//!
//! Generated defaults go into an [`ArgumentSet`] first; user overrides are
//! then applied by flag name, so a flag can never appear twice.

use std::collections::BTreeMap;

use crate::config::{ClusterConfig, LocalEtcd};
use crate::constants::{
    ETCD, ETCD_CA_CERT_NAME, ETCD_PEER_CERT_NAME, ETCD_PEER_KEY_NAME, ETCD_SERVER_CERT_NAME,
    ETCD_SERVER_KEY_NAME, ETCD_SNAPSHOT_COUNT,
};
use crate::endpoint::{peer_url, EtcdEndpoints};
use crate::state::{resolve_initial_cluster, Member};

/// Flags keyed by name (no leading dashes), kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    entries: Vec<(String, String)>,
}

impl ArgumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    ///
    /// An existing flag keeps its position and takes the new value; a new flag
    /// is appended. Returns the replaced value, if any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply user overrides on top of the current flags.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (name, value) in overrides {
            match self.set(name.as_str(), value.as_str()) {
                Some(previous) => {
                    tracing::debug!(flag = %name, %previous, %value, "Overriding generated etcd flag");
                }
                None => {
                    tracing::debug!(flag = %name, %value, "Adding extra etcd flag");
                }
            }
        }
    }

    /// Render as `--name=value` tokens, in order.
    pub fn to_flags(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, value)| format!("--{name}={value}"))
            .collect()
    }
}

/// Generated etcd flags for `cfg`, before user overrides.
pub(crate) fn default_arguments(
    cfg: &ClusterConfig,
    local: &LocalEtcd,
    initial_cluster: &[Member],
) -> ArgumentSet {
    let endpoints = EtcdEndpoints::resolve(&cfg.advertise_address);
    let me = Member::new(cfg.node_name.as_str(), peer_url(&cfg.advertise_address));
    let cluster = resolve_initial_cluster(&me, initial_cluster);

    let mut args = ArgumentSet::new();
    args.set("name", cfg.node_name.as_str());
    args.set("listen-client-urls", endpoints.listen_client_urls);
    args.set("advertise-client-urls", endpoints.advertise_client_urls);
    args.set("listen-peer-urls", endpoints.listen_peer_urls);
    args.set(
        "initial-advertise-peer-urls",
        endpoints.initial_advertise_peer_urls,
    );
    args.set("data-dir", local.data_dir.as_str());
    args.set("cert-file", ETCD_SERVER_CERT_NAME);
    args.set("key-file", ETCD_SERVER_KEY_NAME);
    args.set("trusted-ca-file", ETCD_CA_CERT_NAME);
    args.set("client-cert-auth", "true");
    args.set("peer-cert-file", ETCD_PEER_CERT_NAME);
    args.set("peer-key-file", ETCD_PEER_KEY_NAME);
    args.set("peer-trusted-ca-file", ETCD_CA_CERT_NAME);
    args.set("snapshot-count", ETCD_SNAPSHOT_COUNT.to_string());
    args.set("peer-client-cert-auth", "true");
    if let Some(state) = cluster.state.flag_value() {
        args.set("initial-cluster-state", state);
    }
    args.set("initial-cluster", cluster.peers);
    args
}

/// Full etcd command: process name followed by the merged flags.
pub(crate) fn build_command(
    cfg: &ClusterConfig,
    local: &LocalEtcd,
    initial_cluster: &[Member],
) -> Vec<String> {
    let mut args = default_arguments(cfg, local, initial_cluster);
    args.apply_overrides(&local.extra_args);

    let mut command = Vec::with_capacity(args.len() + 1);
    command.push(ETCD.to_string());
    command.extend(args.to_flags());
    command
}
