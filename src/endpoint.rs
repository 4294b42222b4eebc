//! Client and peer URLs for the local etcd member.

use crate::constants::{
    ETCD_LISTEN_CLIENT_PORT, ETCD_LISTEN_PEER_PORT, ETCD_URL_SCHEME, LOOPBACK_ADDRESS,
};

/// URLs the local member listens on and advertises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EtcdEndpoints {
    /// Loopback client URL followed by the advertised client URL.
    pub listen_client_urls: String,
    pub advertise_client_urls: String,
    pub listen_peer_urls: String,
    pub initial_advertise_peer_urls: String,
}

impl EtcdEndpoints {
    /// Resolve every URL for a node advertising on `advertise_address`.
    pub(crate) fn resolve(advertise_address: &str) -> Self {
        let client = client_url(advertise_address);
        let peer = peer_url(advertise_address);

        Self {
            listen_client_urls: format!("{},{}", client_url(LOOPBACK_ADDRESS), client),
            advertise_client_urls: client,
            listen_peer_urls: peer.clone(),
            initial_advertise_peer_urls: peer,
        }
    }
}

/// Client URL served on `host`.
pub(crate) fn client_url(host: &str) -> String {
    url(host, ETCD_LISTEN_CLIENT_PORT)
}

/// Peer URL served on `host`.
pub(crate) fn peer_url(host: &str) -> String {
    url(host, ETCD_LISTEN_PEER_PORT)
}

fn url(host: &str, port: u16) -> String {
    // Bare IPv6 literals need brackets before the port.
    if host.contains(':') && !host.starts_with('[') {
        format!("{ETCD_URL_SCHEME}://[{host}]:{port}")
    } else {
        format!("{ETCD_URL_SCHEME}://{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ipv4() {
        let endpoints = EtcdEndpoints::resolve("1.2.3.4");
        assert_eq!(
            endpoints.listen_client_urls,
            "https://127.0.0.1:2379,https://1.2.3.4:2379"
        );
        assert_eq!(endpoints.advertise_client_urls, "https://1.2.3.4:2379");
        assert_eq!(endpoints.listen_peer_urls, "https://1.2.3.4:2380");
        assert_eq!(endpoints.initial_advertise_peer_urls, "https://1.2.3.4:2380");
    }

    #[test]
    fn test_resolve_hostname() {
        let endpoints = EtcdEndpoints::resolve("master-0.example.com");
        assert_eq!(
            endpoints.advertise_client_urls,
            "https://master-0.example.com:2379"
        );
    }

    #[test]
    fn test_ipv6_is_bracketed() {
        assert_eq!(peer_url("fd00::10"), "https://[fd00::10]:2380");
        assert_eq!(client_url("[fd00::10]"), "https://[fd00::10]:2379");
    }
}
