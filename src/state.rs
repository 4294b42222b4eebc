//! Initial cluster resolution: new bootstrap vs. joining an existing cluster.

use serde::{Deserialize, Serialize};

/// A known etcd member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub peer_url: String,
}

impl Member {
    pub fn new(name: impl Into<String>, peer_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            peer_url: peer_url.into(),
        }
    }

    /// `name=peerURL`, the form etcd expects inside `--initial-cluster`.
    fn render(&self) -> String {
        format!("{}={}", self.name, self.peer_url)
    }
}

/// Whether the local member bootstraps a fresh cluster or joins one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterState {
    New,
    Existing,
}

impl ClusterState {
    /// Value for `--initial-cluster-state`, or `None` when the flag is omitted.
    pub(crate) fn flag_value(self) -> Option<&'static str> {
        match self {
            ClusterState::New => None,
            ClusterState::Existing => Some("existing"),
        }
    }
}

/// Resolved `--initial-cluster` inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InitialCluster {
    pub state: ClusterState,
    pub peers: String,
}

/// Decide the cluster state and render the peer list.
///
/// With no known members the local member bootstraps alone. Otherwise the
/// known members are rendered in the order given; callers joining a cluster
/// must include the local member in `known`. Entries are not de-duplicated.
pub(crate) fn resolve_initial_cluster(local: &Member, known: &[Member]) -> InitialCluster {
    if known.is_empty() {
        tracing::debug!(member = %local.name, "Bootstrapping new etcd cluster");
        return InitialCluster {
            state: ClusterState::New,
            peers: local.render(),
        };
    }

    tracing::debug!(
        member = %local.name,
        known = known.len(),
        "Joining existing etcd cluster"
    );
    InitialCluster {
        state: ClusterState::Existing,
        peers: known.iter().map(Member::render).collect::<Vec<_>>().join(","),
    }
}
