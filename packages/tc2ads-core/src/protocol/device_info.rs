use super::{ProtocolError, Request, Response, split_result};
use crate::ads::CommandId;
use crate::codec::decode_string;

/// Reads the name and version of the ADS device (command `0x0001`).
///
/// The request carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadDeviceInfo;

impl Request for ReadDeviceInfo {
    const COMMAND: CommandId = CommandId::ReadDeviceInfo;
    type Response = DeviceInfo;

    fn write_payload(&self, _buf: &mut Vec<u8>) {}
}

/// Name and version of an ADS device.
///
/// Response payload after the result code: major (u8), minor (u8), build
/// (u16), then a 16-byte NUL-terminated Windows-1252 device name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub major: u8,
    pub minor: u8,
    pub build: u16,
    pub name: String,
}

impl DeviceInfo {
    const NAME_LEN: usize = 16;

    /// The device version as a `major.minor.build` string.
    pub fn version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.build)
    }
}

impl Response for DeviceInfo {
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        let rest = split_result(payload)?;

        if rest.len() < 4 + Self::NAME_LEN {
            return Err(ProtocolError::TooShort {
                expected: 4 + Self::NAME_LEN,
                got: rest.len(),
            });
        }

        Ok(Self {
            major: rest[0],
            minor: rest[1],
            build: u16::from_le_bytes([rest[2], rest[3]]),
            name: decode_string(&rest[4..4 + Self::NAME_LEN]),
        })
    }
}
