use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetIdError {
    #[error("expected {expected} dot-separated octets, found {found}")]
    WrongOctetCount { expected: usize, found: usize },

    #[error("octet {position} is not a number in 0..=255: {value:?}")]
    InvalidOctet { position: usize, value: String },

    #[error("buffer too small for AmsNetId: expected {expected} bytes, found {found}")]
    BufferTooSmall { expected: usize, found: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddrError {
    #[error("missing ':' between net id and port")]
    MissingSeparator,

    #[error("invalid AMS port: {0:?}")]
    InvalidPort(String),

    #[error(transparent)]
    NetId(#[from] NetIdError),

    #[error("buffer too small for AmsAddr: expected {expected} bytes, found {found}")]
    BufferTooSmall { expected: usize, found: usize },
}

/// Violations of the AMS/TCP frame layout.
///
/// Any of these on a live connection means the byte stream can no longer be
/// trusted; the transport tears the connection down.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("reserved word in TCP prefix is {0:#06x}, must be zero")]
    BadReserved(u16),

    #[error("declared frame length {got} exceeds the {max} byte limit")]
    Oversized { got: usize, max: usize },

    #[error("AMS packet truncated: header declares {declared} payload bytes, {got} delivered")]
    LengthMismatch { declared: usize, got: usize },

    #[error("buffer too small for an AMS packet: expected at least {expected} bytes, found {found}")]
    TooShort { expected: usize, found: usize },
}
