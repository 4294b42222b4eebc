//! Integration tests for static pod generation.

mod common;

use common::{external_config, local_config, member};
use etcdpod::{get_etcd_pod_spec, ClusterConfig, Etcd, EtcdError, LocalEtcd, RestartPolicy};

/// The pod runs a single container named after the store.
#[test]
fn pod_spec_refers_to_etcd() {
    let cfg = ClusterConfig {
        etcd: Etcd::Local(LocalEtcd {
            data_dir: "/var/lib/etcd".to_string(),
            image: String::new(),
            ..LocalEtcd::default()
        }),
        ..local_config("foo", "1.2.3.4")
    };

    let spec = get_etcd_pod_spec(&cfg, &[]).unwrap();
    assert_eq!(spec.spec.containers.len(), 1);
    assert_eq!(spec.container().name, "etcd");
    assert_eq!(spec.metadata.name, "etcd");
    assert_eq!(spec.metadata.namespace, "kube-system");
    assert_eq!(spec.spec.restart_policy, RestartPolicy::Always);
}

/// The container command is the generated etcd command.
#[test]
fn pod_spec_carries_command() {
    let cfg = local_config("foo", "1.2.3.4");
    let known = vec![member("foo", "1.2.3.4"), member("bar", "5.6.7.8")];

    let spec = get_etcd_pod_spec(&cfg, &known).unwrap();
    let command = etcdpod::get_etcd_command(&cfg, &known).unwrap();
    assert_eq!(spec.container().command, command);
}

/// A custom data dir is both the `--data-dir` value and the writable mount.
#[test]
fn pod_spec_mounts_custom_data_dir() {
    let cfg = ClusterConfig {
        etcd: Etcd::Local(LocalEtcd {
            data_dir: "/mnt/etcd".to_string(),
            ..LocalEtcd::default()
        }),
        ..local_config("foo", "1.2.3.4")
    };

    let spec = get_etcd_pod_spec(&cfg, &[]).unwrap();
    let container = spec.container();
    assert!(container.command.contains(&"--data-dir=/mnt/etcd".to_string()));

    let data = container
        .volume_mounts
        .iter()
        .find(|m| m.mount_path == "/mnt/etcd")
        .expect("data dir should be mounted");
    assert!(!data.read_only);

    let volume = spec
        .spec
        .volumes
        .iter()
        .find(|v| v.name == data.name)
        .expect("mount should have a volume");
    assert_eq!(volume.host_path.path, "/mnt/etcd");
}

/// A pinned image is used verbatim.
#[test]
fn pod_spec_uses_pinned_image() {
    let cfg = ClusterConfig {
        etcd: Etcd::Local(LocalEtcd {
            image: "k8s.gcr.io/etcd".to_string(),
            ..LocalEtcd::default()
        }),
        ..local_config("foo", "1.2.3.4")
    };

    let spec = get_etcd_pod_spec(&cfg, &[]).unwrap();
    assert_eq!(spec.container().image, "k8s.gcr.io/etcd");
}

#[test]
fn pod_spec_refused_for_external_etcd() {
    let err = get_etcd_pod_spec(&external_config(), &[]).unwrap_err();
    assert!(matches!(err, EtcdError::ExternalEtcd));
}
