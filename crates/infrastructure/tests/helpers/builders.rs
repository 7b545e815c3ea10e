#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use meshdns_domain::config::{NetworkConfig, PeerConfig};
use meshdns_domain::{Nat64Prefix, UpstreamAddr, DEFAULT_NAT64_PREFIX};
use meshdns_infrastructure::dns::{ResolverSettings, ServerState};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::sync::watch;

pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

pub fn settings() -> ResolverSettings {
    ResolverSettings {
        enable_nat64: false,
        nat64_prefix: DEFAULT_NAT64_PREFIX.parse::<Nat64Prefix>().unwrap(),
        public_upstreams: vec![],
        query_timeout: TEST_TIMEOUT,
    }
}

pub fn settings_with_upstreams(upstreams: &[SocketAddr]) -> ResolverSettings {
    ResolverSettings {
        public_upstreams: upstreams.iter().copied().map(UpstreamAddr::Resolved).collect(),
        ..settings()
    }
}

/// `corp.internal` with this node as `gateway` and one peer, `host1`.
pub fn corp_network() -> NetworkConfig {
    NetworkConfig {
        domain: "corp.internal".to_string(),
        hostname: "gateway".to_string(),
        addresses: vec!["10.0.0.1".to_string()],
        peers: vec![PeerConfig {
            name: "host1".to_string(),
            addresses: vec!["10.0.0.5".to_string(), "fd00::5".to_string()],
        }],
    }
}

pub fn build_query(name: &str, record_type: RecordType, recursion_desired: bool) -> Message {
    let mut message = Message::new();
    message
        .set_id(fastrand::u16(..))
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(recursion_desired);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

pub async fn udp_query(
    server: SocketAddr,
    name: &str,
    record_type: RecordType,
    recursion_desired: bool,
) -> Message {
    let query = build_query(name, record_type, recursion_desired);
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket
        .send_to(&query.to_vec().unwrap(), server)
        .await
        .unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("no UDP response")
        .unwrap();

    let response = Message::from_vec(&buf[..len]).unwrap();
    assert_eq!(response.id(), query.id());
    response
}

/// Encodes an A question for `name` by hand so label case reaches the
/// wire exactly as written.
pub fn raw_a_query(id: u16, name: &str) -> Vec<u8> {
    let mut wire = Vec::with_capacity(32 + name.len());
    wire.extend_from_slice(&id.to_be_bytes());
    wire.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in name.trim_end_matches('.').split('.') {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.push(0);
    wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    wire
}

/// Sends pre-encoded bytes over UDP and returns the raw reply.
pub async fn udp_exchange(server: SocketAddr, wire: &[u8]) -> Vec<u8> {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(wire, server).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("no UDP response")
        .unwrap();
    buf.truncate(len);
    buf
}

pub async fn tcp_query(server: SocketAddr, name: &str, record_type: RecordType) -> Message {
    let query = build_query(name, record_type, true).to_vec().unwrap();
    let mut stream = TcpStream::connect(server).await.unwrap();

    stream
        .write_all(&(query.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(&query).await.unwrap();

    let mut len_buf = [0u8; 2];
    tokio::time::timeout(Duration::from_secs(5), stream.read_exact(&mut len_buf))
        .await
        .expect("no TCP response")
        .unwrap();
    let mut buf = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut buf).await.unwrap();

    Message::from_vec(&buf).unwrap()
}

/// Waits for the server to publish its bound (udp, tcp) addresses.
pub async fn wait_until_serving(
    state: &mut watch::Receiver<ServerState>,
) -> (SocketAddr, SocketAddr) {
    let serving = tokio::time::timeout(
        Duration::from_secs(5),
        state.wait_for(|s| matches!(s, ServerState::Serving { .. } | ServerState::Stopped)),
    )
    .await
    .expect("server never started")
    .unwrap()
    .clone();

    match serving {
        ServerState::Serving { udp, tcp } => (udp, tcp),
        other => panic!("server stopped before serving: {:?}", other),
    }
}
