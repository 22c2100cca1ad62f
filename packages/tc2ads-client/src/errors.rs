use crate::symbol::SymbolError;
use tc2ads_core::CoreError;
use tc2ads_core::ads::ReturnCode;
use tc2ads_core::ams::FrameError;
use tc2ads_core::codec::CodecError;
use tc2ads_core::protocol::ProtocolError;
use thiserror::Error;

/// Everything a client operation can fail with.
///
/// Only [`Io`](ClientError::Io) and [`Frame`](ClientError::Frame) tear the
/// connection down; a [`Timeout`], an [`Ads`](ClientError::Ads) rejection or
/// a conversion failure leaves it open for the next request. Nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("framing error: {0}")]
    Frame(#[from] FrameError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The device answered with a non-zero ADS return code.
    #[error("device returned: {0}")]
    Ads(ReturnCode),

    #[error("no response within the request timeout")]
    Timeout,

    #[error("connection closed while waiting for a response")]
    ConnectionClosed,

    #[error("type conversion error: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error("the read group is empty")]
    EmptyGroup,

    #[error("the read group spans index groups {first:#x} and {other:#x}")]
    MixedIndexGroup { first: u32, other: u32 },

    #[error("block reads need the group ordered by ascending offset")]
    UnorderedGroup,

    #[error("{what}: expected {expected} bytes, device sent {got}")]
    ShortResponse {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => Self::Io(e),
            CoreError::Frame(e) => Self::Frame(e),
            CoreError::Protocol(e) => Self::Protocol(e),
            CoreError::Codec(e) => Self::Codec(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
