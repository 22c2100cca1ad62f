use crate::ams::FrameError;
use crate::codec::CodecError;
use crate::protocol::ProtocolError;

/// Umbrella error for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// I/O error on the underlying stream
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream violated the AMS/TCP framing rules
    #[error("framing error: {0}")]
    Frame(#[from] FrameError),

    /// A command payload violated its layout
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A value could not be converted to or from its wire form
    #[error("type conversion error: {0}")]
    Codec(#[from] CodecError),
}
