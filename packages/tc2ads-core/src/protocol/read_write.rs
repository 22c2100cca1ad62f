use super::{ProtocolError, Request, Response, split_counted_data, split_result};
use crate::ads::{CommandId, IndexGroup, IndexOffset};

/// Writes data and reads a reply back in one exchange (command `0x0009`).
///
/// This is the RPC workhorse of the protocol: handle lookup, symbol info,
/// and the sum commands are all ReadWrite exchanges against well-known
/// index groups.
///
/// Payload layout: index group (u32), index offset (u32), read length
/// (u32), write length (u32), then the data bytes to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWriteRequest {
    pub index_group: IndexGroup,
    pub index_offset: IndexOffset,
    pub read_length: u32,
    pub data: Vec<u8>,
}

impl ReadWriteRequest {
    pub fn new(
        index_group: IndexGroup,
        index_offset: IndexOffset,
        read_length: u32,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            index_group,
            index_offset,
            read_length,
            data: data.into(),
        }
    }
}

impl Request for ReadWriteRequest {
    const COMMAND: CommandId = CommandId::ReadWrite;
    type Response = ReadWriteResponse;

    fn write_payload(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.index_group.to_le_bytes());
        buf.extend_from_slice(&self.index_offset.to_le_bytes());
        buf.extend_from_slice(&self.read_length.to_le_bytes());
        buf.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.data);
    }
}

/// The data returned by a ReadWrite.
///
/// Response payload after the result code: length (u32), then that many
/// data bytes. Servers truncate to what the addressed service actually
/// produced, which may be far less than the requested read length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWriteResponse {
    pub data: Vec<u8>,
}

impl Response for ReadWriteResponse {
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        let rest = split_result(payload)?;
        let data = split_counted_data(rest)?;
        Ok(Self {
            data: data.to_vec(),
        })
    }
}
