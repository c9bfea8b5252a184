use crate::error::{ExchangeError, Stage};
use bytes::BytesMut;
use dns::{Message, NameQuery};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_RESPONSE_SIZE: usize = 512;

/// Sends one query datagram to a fixed server and reads one datagram back.
/// There are no retries and no TCP fallback for truncated answers.
#[derive(Debug, Clone)]
pub struct Client {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl Client {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub async fn resolve(&self, id: u16, name_query: &NameQuery) -> Result<Message, ExchangeError> {
        tracing::debug!("resolving domain: {}, type: {}", name_query.name, name_query.q_type);

        let query = Message::query(id, name_query)?;
        self.exchange(&query).await
    }

    /// The socket lives for this call only and is dropped on every return.
    pub async fn exchange(&self, query: &Message) -> Result<Message, ExchangeError> {
        let request_bytes = query.to_bytes()?;

        let local_addr: SocketAddr = match self.server_addr {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let sock = UdpSocket::bind(local_addr)
            .await
            .map_err(ExchangeError::transport(Stage::Bind))?;
        sock.connect(self.server_addr)
            .await
            .map_err(ExchangeError::transport(Stage::Connect))?;

        let send_size = sock
            .send(&request_bytes)
            .await
            .map_err(ExchangeError::transport(Stage::Send))?;
        tracing::debug!("sent udp query to {}, length: {}", self.server_addr, send_size);

        let mut resp_buf = BytesMut::with_capacity(MAX_RESPONSE_SIZE);
        let response_size = match tokio::time::timeout(self.timeout, sock.recv_buf(&mut resp_buf)).await {
            Ok(received) => received.map_err(ExchangeError::transport(Stage::Receive))?,
            Err(_) => {
                return Err(ExchangeError::Timeout {
                    after: self.timeout,
                })
            }
        };
        let response_bytes = resp_buf.freeze();
        tracing::debug!("received udp response, length: {}, {:?}", response_size, response_bytes);

        let resp = dns::decode_response(response_bytes)?;
        if resp.header().tc {
            tracing::warn!("response from {} is truncated", self.server_addr);
        }
        tracing::debug!("received udp response has {} answers", resp.answers().len());

        Ok(resp)
    }
}
