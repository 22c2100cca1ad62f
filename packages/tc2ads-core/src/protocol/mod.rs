//! Typed request and response payloads for the ADS command set.
//!
//! Each request knows its [`CommandId`] and serializes its payload; each
//! response parses the payload of the matching reply packet. Every response
//! begins with a 4-byte result code - a non-zero code fails the parse with
//! the mapped [`ReturnCode`], so callers never see half-valid data.

pub mod device_info;
pub mod read;
pub mod read_write;
pub mod state;
pub mod write;

pub use device_info::{DeviceInfo, ReadDeviceInfo};
pub use read::{ReadRequest, ReadResponse};
pub use read_write::{ReadWriteRequest, ReadWriteResponse};
pub use state::{DeviceState, ReadState, WriteControl, WriteControlResponse};
pub use write::{WriteRequest, WriteResponse};

use crate::ads::{CommandId, ReturnCode};
use thiserror::Error;

/// A violation of a command's payload layout.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("response payload too short: expected at least {expected} bytes, got {got}")]
    TooShort { expected: usize, got: usize },

    #[error("response declares {declared} data bytes, {got} delivered")]
    DataLengthMismatch { declared: usize, got: usize },

    #[error("device rejected the request: {0}")]
    Rejected(ReturnCode),

    #[error("device reported ADS state {0}, which is not a known state")]
    UnknownState(u16),
}

/// A serializable ADS request.
pub trait Request {
    /// The command id carried in the AMS header for this request.
    const COMMAND: CommandId;

    /// The response this request is answered with.
    type Response: Response;

    /// Appends the request payload to `buf`.
    fn write_payload(&self, buf: &mut Vec<u8>);

    /// The request payload as a fresh buffer.
    fn payload(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_payload(&mut buf);
        buf
    }
}

/// A parseable ADS response payload.
pub trait Response: Sized {
    /// Parses the payload of a response packet.
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError>;
}

/// Splits the leading result code off a response payload, failing on a
/// non-zero code.
pub(crate) fn split_result(payload: &[u8]) -> Result<&[u8], ProtocolError> {
    if payload.len() < ReturnCode::LENGTH {
        return Err(ProtocolError::TooShort {
            expected: ReturnCode::LENGTH,
            got: payload.len(),
        });
    }

    let code = ReturnCode::from_u32(u32::from_le_bytes(payload[..4].try_into().unwrap()));
    if !code.is_ok() {
        return Err(ProtocolError::Rejected(code));
    }

    Ok(&payload[4..])
}

/// Reads a length-prefixed data block (`u32` length + bytes), the common
/// tail of Read and ReadWrite responses.
pub(crate) fn split_counted_data(rest: &[u8]) -> Result<&[u8], ProtocolError> {
    if rest.len() < 4 {
        return Err(ProtocolError::TooShort {
            expected: 4,
            got: rest.len(),
        });
    }

    let declared = u32::from_le_bytes(rest[..4].try_into().unwrap()) as usize;
    let data = &rest[4..];
    if data.len() < declared {
        return Err(ProtocolError::DataLengthMismatch {
            declared,
            got: data.len(),
        });
    }

    Ok(&data[..declared])
}
