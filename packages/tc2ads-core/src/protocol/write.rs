use super::{ProtocolError, Request, Response, split_result};
use crate::ads::{CommandId, IndexGroup, IndexOffset};

/// Writes data to an index group / index offset (command `0x0003`).
///
/// Payload layout: index group (u32), index offset (u32), length (u32),
/// then the data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub index_group: IndexGroup,
    pub index_offset: IndexOffset,
    pub data: Vec<u8>,
}

impl WriteRequest {
    pub fn new(
        index_group: IndexGroup,
        index_offset: IndexOffset,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            index_group,
            index_offset,
            data: data.into(),
        }
    }
}

impl Request for WriteRequest {
    const COMMAND: CommandId = CommandId::Write;
    type Response = WriteResponse;

    fn write_payload(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.index_group.to_le_bytes());
        buf.extend_from_slice(&self.index_offset.to_le_bytes());
        buf.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.data);
    }
}

/// A Write response carries only the result code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResponse;

impl Response for WriteResponse {
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        split_result(payload)?;
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::ReturnCode;

    #[test]
    fn request_payload_layout() {
        let payload = WriteRequest::new(0xF005, 0x0042, vec![0xAA, 0xBB]).payload();
        assert_eq!(
            payload,
            [
                0x05, 0xF0, 0x00, 0x00, // index group
                0x42, 0x00, 0x00, 0x00, // index offset
                0x02, 0x00, 0x00, 0x00, // length
                0xAA, 0xBB, // data
            ]
        );
    }

    #[test]
    fn parse_ok() {
        assert_eq!(WriteResponse::parse(&[0, 0, 0, 0]), Ok(WriteResponse));
    }

    #[test]
    fn parse_surfaces_access_denied() {
        let err = WriteResponse::parse(&0x723u32.to_le_bytes()).unwrap_err();
        assert_eq!(err, ProtocolError::Rejected(ReturnCode::DeviceAccessDenied));
    }
}
