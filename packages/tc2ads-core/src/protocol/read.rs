use super::{ProtocolError, Request, Response, split_counted_data, split_result};
use crate::ads::{CommandId, IndexGroup, IndexOffset};

/// Reads `length` bytes from an index group / index offset (command `0x0002`).
///
/// Payload layout: index group (u32), index offset (u32), length (u32).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    pub index_group: IndexGroup,
    pub index_offset: IndexOffset,
    pub length: u32,
}

impl ReadRequest {
    pub fn new(index_group: IndexGroup, index_offset: IndexOffset, length: u32) -> Self {
        Self {
            index_group,
            index_offset,
            length,
        }
    }
}

impl Request for ReadRequest {
    const COMMAND: CommandId = CommandId::Read;
    type Response = ReadResponse;

    fn write_payload(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.index_group.to_le_bytes());
        buf.extend_from_slice(&self.index_offset.to_le_bytes());
        buf.extend_from_slice(&self.length.to_le_bytes());
    }
}

/// The data returned by a Read.
///
/// Response payload after the result code: length (u32), then that many
/// data bytes. The device may return less than requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResponse {
    pub data: Vec<u8>,
}

impl Response for ReadResponse {
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        let rest = split_result(payload)?;
        let data = split_counted_data(rest)?;
        Ok(Self {
            data: data.to_vec(),
        })
    }
}
