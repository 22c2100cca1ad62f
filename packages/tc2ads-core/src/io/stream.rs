use crate::ams::{AMS_PACKET_MAX_LEN, AmsPacket, AmsTcpHeader, FrameError};
use crate::error::CoreError;
use std::io::{self, IoSlice, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// A blocking stream of AMS packets over a byte stream (typically TCP).
///
/// Reading is strictly framed: exactly 6 prefix bytes, then exactly the
/// declared number of packet bytes. `read_exact` takes care of accumulating
/// short reads, so a live frame is never dropped halfway.
pub struct AmsStream<S: Read + Write = TcpStream> {
    stream: S,
}

impl<S: Read + Write> AmsStream<S> {
    /// Wraps an existing stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Reads one framed AMS packet.
    ///
    /// Fails on a non-zero reserved word, an oversized declared length, a
    /// length/payload mismatch, or any transport error.
    pub fn read_packet(&mut self) -> Result<AmsPacket, CoreError> {
        let mut prefix = [0u8; AmsTcpHeader::LENGTH];
        self.stream.read_exact(&mut prefix)?;
        let header = AmsTcpHeader::from_bytes(prefix)?;

        let length = header.length() as usize;
        if length > AMS_PACKET_MAX_LEN {
            return Err(FrameError::Oversized {
                got: length,
                max: AMS_PACKET_MAX_LEN,
            }
            .into());
        }

        let mut body = vec![0u8; length];
        self.stream.read_exact(&mut body)?;

        Ok(AmsPacket::decode(&body)?)
    }

    /// Writes one framed AMS packet, prefix and body in a single vectored
    /// write where the OS supports it.
    pub fn write_packet(&mut self, packet: &AmsPacket) -> io::Result<()> {
        let body = packet.encode();
        let prefix = AmsTcpHeader::new(body.len() as u32).to_bytes();

        let mut bufs = [IoSlice::new(&prefix), IoSlice::new(&body)];
        write_all_vectored(&mut self.stream, &mut bufs)?;
        self.stream.flush()
    }

    /// Consumes the stream wrapper, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl AmsStream<TcpStream> {
    /// Connects to an ADS device with a connect timeout.
    ///
    /// Nagle's algorithm is disabled; ADS exchanges are small and strictly
    /// request/response, so delayed segments only add latency.
    pub fn connect<A: ToSocketAddrs>(addr: A, timeout: Duration) -> io::Result<Self> {
        let mut last_err = None;
        for addr in addr.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    stream.set_nodelay(true)?;
                    return Ok(Self::new(stream));
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no socket addresses resolved")
        }))
    }

    /// Clones the stream handle so reading and writing can happen on
    /// separate threads.
    pub fn try_clone(&self) -> io::Result<Self> {
        Ok(Self::new(self.stream.try_clone()?))
    }

    /// Sets the read timeout of the underlying socket.
    pub fn set_read_timeout(&self, dur: Option<Duration>) -> io::Result<()> {
        self.stream.set_read_timeout(dur)
    }

    /// Shuts down the connection, waking any thread blocked in a read.
    pub fn shutdown(&self, how: Shutdown) -> io::Result<()> {
        self.stream.shutdown(how)
    }

    /// Returns the address of the remote peer.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.stream.peer_addr()
    }
}

/// Emulates the unstable `Write::write_all_vectored`: loops until every byte
/// of every slice is written or an error occurs.
fn write_all_vectored<W: Write>(writer: &mut W, mut bufs: &mut [IoSlice]) -> io::Result<()> {
    IoSlice::advance_slices(&mut bufs, 0);
    while !bufs.is_empty() {
        match writer.write_vectored(bufs) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole frame",
                ));
            }
            Ok(n) => IoSlice::advance_slices(&mut bufs, n),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
