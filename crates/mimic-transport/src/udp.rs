//! Persistent UDP sender
//!
//! The socket is bound lazily to an ephemeral local port and reused for
//! every send; a change of target port drops the old socket and binds a
//! fresh one. Targets are always loopback: the consumer runs on the same
//! machine.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use mimic_core::{ChannelUpdate, MimicError, MimicResult};

use crate::{encode_channel, BlendshapeSink};

/// Sends channel updates as OSC datagrams to a loopback port
pub struct OscUdpSender {
    socket: Option<Arc<UdpSocket>>,
    port: Option<u16>,
}

impl OscUdpSender {
    pub fn new() -> Self {
        OscUdpSender {
            socket: None,
            port: None,
        }
    }

    /// Reuse the bound socket, rebinding only when the target port moved
    async fn socket_for(&mut self, port: u16) -> MimicResult<Arc<UdpSocket>> {
        if let (Some(socket), Some(current)) = (&self.socket, self.port) {
            if current == port {
                return Ok(Arc::clone(socket));
            }
            tracing::debug!(old_port = current, new_port = port, "target port changed");
        }

        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| MimicError::Transport(format!("bind failed: {e}")))?;

        let socket = Arc::new(socket);
        self.socket = Some(Arc::clone(&socket));
        self.port = Some(port);
        Ok(socket)
    }

    /// Send every channel of an update, one datagram per channel
    pub async fn send_update(&mut self, update: &ChannelUpdate, port: u16) -> MimicResult<()> {
        let socket = self.socket_for(port).await?;
        let target = SocketAddr::from(([127, 0, 0, 1], port));

        for (name, value) in update.iter_named() {
            let buf = encode_channel(name, value)?;
            socket
                .send_to(&buf, target)
                .await
                .map_err(|e| MimicError::Transport(format!("send {name}: {e}")))?;
        }

        Ok(())
    }
}

impl Default for OscUdpSender {
    fn default() -> Self {
        Self::new()
    }
}

impl BlendshapeSink for OscUdpSender {
    async fn send(&mut self, update: &ChannelUpdate, port: u16) -> MimicResult<()> {
        self.send_update(update, port).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::{channel_index, CHANNEL_COUNT};
    use rosc::{decoder, OscPacket, OscType};

    #[tokio::test]
    async fn test_update_arrives_as_osc_messages() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut values = vec![0.0f32; CHANNEL_COUNT];
        values[channel_index("jawOpen").unwrap()] = 0.9;
        let update = ChannelUpdate::new(values);

        let mut sender = OscUdpSender::new();
        sender.send_update(&update, port).await.unwrap();

        let mut buf = [0u8; 1024];
        let mut seen_jaw_open = None;
        for _ in 0..CHANNEL_COUNT {
            let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
            let (_, packet) = decoder::decode_udp(&buf[..len]).unwrap();
            let OscPacket::Message(msg) = packet else {
                panic!("expected a message packet");
            };
            if msg.addr == "/jawOpen" {
                seen_jaw_open = Some(msg.args.clone());
            }
        }

        assert_eq!(seen_jaw_open, Some(vec![OscType::Float(0.9)]));
    }

    #[tokio::test]
    async fn test_socket_survives_repeated_sends() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let update = ChannelUpdate::new(vec![0.1; CHANNEL_COUNT]);
        let mut sender = OscUdpSender::new();

        sender.send_update(&update, port).await.unwrap();
        sender.send_update(&update, port).await.unwrap();

        // Both batches arrive from the same bound source
        let mut buf = [0u8; 1024];
        let (_, first_src) = receiver.recv_from(&mut buf).await.unwrap();
        let mut last_src = first_src;
        for _ in 1..(CHANNEL_COUNT * 2) {
            let (_, src) = receiver.recv_from(&mut buf).await.unwrap();
            last_src = src;
        }
        assert_eq!(first_src, last_src);
    }
}
