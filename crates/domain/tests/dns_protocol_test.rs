use meshdns_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;

fn resolved(s: &str) -> SocketAddr {
    match s.parse::<UpstreamAddr>().unwrap() {
        UpstreamAddr::Resolved(addr) => addr,
        other => panic!("Expected resolved address, got {:?}", other),
    }
}

#[test]
fn test_parse_ipv4_with_port() {
    assert_eq!(resolved("8.8.8.8:5353"), "8.8.8.8:5353".parse().unwrap());
}

#[test]
fn test_parse_ipv4_defaults_to_port_53() {
    assert_eq!(resolved("1.1.1.1"), "1.1.1.1:53".parse().unwrap());
}

#[test]
fn test_parse_bracketed_ipv6_with_port() {
    assert_eq!(
        resolved("[2606:4700::1111]:853"),
        "[2606:4700::1111]:853".parse().unwrap()
    );
}

#[test]
fn test_parse_bare_ipv6_defaults_to_port_53() {
    assert_eq!(
        resolved("2001:4860:4860::8888"),
        "[2001:4860:4860::8888]:53".parse().unwrap()
    );
    assert_eq!(resolved("[::1]"), "[::1]:53".parse().unwrap());
}

#[test]
fn test_parse_udp_scheme_is_accepted() {
    assert_eq!(resolved("udp://9.9.9.9:53"), "9.9.9.9:53".parse().unwrap());
}

#[test]
fn test_parse_hostname_with_port() {
    let addr: UpstreamAddr = "dns.google:53".parse().unwrap();
    assert_eq!(
        addr,
        UpstreamAddr::Unresolved {
            hostname: "dns.google".into(),
            port: 53
        }
    );
    assert_eq!(addr.to_string(), "dns.google:53");
}

#[test]
fn test_parse_rejects_garbage() {
    for input in ["", "not an address", "dns.google", "1.1.1.1:99999", "host:port"] {
        let err = input.parse::<UpstreamAddr>().unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidUpstream(_)),
            "{} should be rejected",
            input
        );
    }
}

#[test]
fn test_display_resolved() {
    let addr: UpstreamAddr = "[::1]:5300".parse().unwrap();
    assert_eq!(addr.to_string(), "[::1]:5300");
}
