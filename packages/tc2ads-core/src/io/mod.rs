//! Frame I/O - the blocking [`AmsStream`] that reads and writes framed
//! [`AmsPacket`](crate::ams::AmsPacket)s over TCP.

pub mod stream;

pub use stream::AmsStream;
