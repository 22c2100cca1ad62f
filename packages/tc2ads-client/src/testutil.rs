//! An in-process PLC stand-in for transport tests: accepts one connection
//! and answers each request through a scripted handler.

use crate::connection::AdsConnection;
use std::net::{SocketAddr, TcpListener};
use std::thread;
use tc2ads_core::ams::AmsPacket;
use tc2ads_core::io::AmsStream;

pub struct FakePlc {
    addr: SocketAddr,
}

impl FakePlc {
    /// Starts a listener on an ephemeral port. For every request packet the
    /// handler returns the packets to send back - none to provoke a
    /// timeout, several to exercise stray-frame handling.
    pub fn start<F>(mut handler: F) -> Self
    where
        F: FnMut(AmsPacket) -> Vec<AmsPacket> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");

        thread::spawn(move || {
            let Ok((socket, _)) = listener.accept() else {
                return;
            };
            let mut stream = AmsStream::new(socket);
            while let Ok(request) = stream.read_packet() {
                for reply in handler(request) {
                    if stream.write_packet(&reply).is_err() {
                        return;
                    }
                }
            }
        });

        Self { addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// A connection config pointed at a [`FakePlc`].
pub fn test_connection(plc: &FakePlc) -> AdsConnection {
    AdsConnection::parse(
        &plc.addr().ip().to_string(),
        "5.0.0.0.1.1:851",
        "10.33.0.1.1.1:32733",
    )
    .expect("test connection")
    .with_tcp_port(plc.addr().port())
}
