use super::addr::AmsAddr;
use super::error::FrameError;
use super::tcp_header::AmsTcpHeader;
use crate::ads::{CommandId, ReturnCode, StateFlags};

/// Maximum accepted AMS packet size. Frames declaring more than this are
/// treated as stream corruption rather than honoured with an allocation.
pub const AMS_PACKET_MAX_LEN: usize = 65535 - AmsTcpHeader::LENGTH;

/// A complete AMS packet: the 32-byte routing header plus the command payload.
///
/// Wire layout of the header (all integers little-endian):
///
/// ```text
/// 0..6    target AMS Net ID
/// 6..8    target AMS port
/// 8..14   source AMS Net ID
/// 14..16  source AMS port
/// 16..18  command id
/// 18..20  state flags
/// 20..24  payload length
/// 24..28  error code
/// 28..32  invoke id
/// 32..    payload
/// ```
///
/// On TCP the packet is preceded by an [`AmsTcpHeader`]; [`AmsPacket::to_frame`]
/// produces the fully framed byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmsPacket {
    target: AmsAddr,
    source: AmsAddr,
    command_id: CommandId,
    state_flags: StateFlags,
    error_code: ReturnCode,
    invoke_id: u32,
    payload: Vec<u8>,
}

impl AmsPacket {
    /// Length of the AMS header in bytes.
    pub const HEADER_LEN: usize = 32;

    /// Creates a packet from all header fields and a payload.
    pub fn new(
        target: AmsAddr,
        source: AmsAddr,
        command_id: CommandId,
        state_flags: StateFlags,
        error_code: ReturnCode,
        invoke_id: u32,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            target,
            source,
            command_id,
            state_flags,
            error_code,
            invoke_id,
            payload: payload.into(),
        }
    }

    /// Creates a client request packet (state flags `0x0004`, no error code).
    pub fn request(
        target: AmsAddr,
        source: AmsAddr,
        command_id: CommandId,
        invoke_id: u32,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(
            target,
            source,
            command_id,
            StateFlags::request(),
            ReturnCode::Ok,
            invoke_id,
            payload,
        )
    }

    /// Creates a device response packet (state flags `0x0005`).
    pub fn response(
        target: AmsAddr,
        source: AmsAddr,
        command_id: CommandId,
        error_code: ReturnCode,
        invoke_id: u32,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(
            target,
            source,
            command_id,
            StateFlags::response(),
            error_code,
            invoke_id,
            payload,
        )
    }

    /// The AMS address of the station the packet is intended for.
    pub fn target(&self) -> &AmsAddr {
        &self.target
    }

    /// The AMS address of the station the packet was sent from.
    pub fn source(&self) -> &AmsAddr {
        &self.source
    }

    /// The command this packet carries a request or response for.
    pub fn command_id(&self) -> CommandId {
        self.command_id
    }

    /// State flags (request/response, transport).
    pub fn state_flags(&self) -> StateFlags {
        self.state_flags
    }

    /// The AMS-level error code.
    pub fn error_code(&self) -> ReturnCode {
        self.error_code
    }

    /// The invoke id that pairs this packet with its request.
    pub fn invoke_id(&self) -> u32 {
        self.invoke_id
    }

    /// The command payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Length of the payload in bytes.
    pub fn data_length(&self) -> u32 {
        self.payload.len() as u32
    }

    /// Consumes the packet, returning its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Serializes the packet (header + payload, without the TCP prefix).
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::HEADER_LEN + self.payload.len());

        buf.extend_from_slice(&self.target.to_bytes());
        buf.extend_from_slice(&self.source.to_bytes());
        buf.extend_from_slice(&u16::from(self.command_id).to_le_bytes());
        buf.extend_from_slice(&u16::from(self.state_flags).to_le_bytes());
        buf.extend_from_slice(&self.data_length().to_le_bytes());
        buf.extend_from_slice(&self.error_code.to_u32().to_le_bytes());
        buf.extend_from_slice(&self.invoke_id.to_le_bytes());
        buf.extend_from_slice(&self.payload);

        buf
    }

    /// Serializes the packet with its 6-byte TCP prefix prepended.
    pub fn to_frame(&self) -> Vec<u8> {
        let body = self.encode();
        let mut frame = Vec::with_capacity(AmsTcpHeader::LENGTH + body.len());
        frame.extend_from_slice(&AmsTcpHeader::new(body.len() as u32).to_bytes());
        frame.extend_from_slice(&body);
        frame
    }

    /// Parses a packet from the bytes following the TCP prefix.
    ///
    /// The declared payload length must match the bytes delivered exactly;
    /// both truncated and over-long buffers are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < Self::HEADER_LEN {
            return Err(FrameError::TooShort {
                expected: Self::HEADER_LEN,
                found: bytes.len(),
            });
        }

        let declared = u32::from_le_bytes(bytes[20..24].try_into().unwrap()) as usize;
        let delivered = bytes.len() - Self::HEADER_LEN;
        if declared != delivered {
            return Err(FrameError::LengthMismatch {
                declared,
                got: delivered,
            });
        }

        Ok(Self {
            target: AmsAddr::from_bytes(bytes[0..8].try_into().unwrap()),
            source: AmsAddr::from_bytes(bytes[8..16].try_into().unwrap()),
            command_id: CommandId::from(u16::from_le_bytes([bytes[16], bytes[17]])),
            state_flags: StateFlags::from(u16::from_le_bytes([bytes[18], bytes[19]])),
            error_code: ReturnCode::from_u32(u32::from_le_bytes(bytes[24..28].try_into().unwrap())),
            invoke_id: u32::from_le_bytes(bytes[28..32].try_into().unwrap()),
            payload: bytes[Self::HEADER_LEN..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ams::AmsNetId;

    fn make_addrs() -> (AmsAddr, AmsAddr) {
        let target = AmsAddr::new(AmsNetId::new(5, 0, 0, 0, 1, 1), 851);
        let source = AmsAddr::new(AmsNetId::new(10, 33, 0, 1, 1, 1), 32733);
        (target, source)
    }

    #[test]
    fn encode_decode_roundtrip() {
        let (target, source) = make_addrs();
        let packet = AmsPacket::request(target, source, CommandId::Read, 0x8001, vec![1, 2, 3]);

        let bytes = packet.encode();
        assert_eq!(bytes.len(), AmsPacket::HEADER_LEN + 3);

        let decoded = AmsPacket::decode(&bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn read_request_byte_layout() {
        // A Read of 4 bytes from index group 0x4020, offset 0, invoke id 0x8001.
        let (target, source) = make_addrs();
        let mut payload = Vec::new();
        payload.extend_from_slice(&0x4020u32.to_le_bytes());
        payload.extend_from_slice(&0u32.to_le_bytes());
        payload.extend_from_slice(&4u32.to_le_bytes());

        let packet = AmsPacket::request(target, source, CommandId::Read, 0x8001, payload);
        let bytes = packet.encode();

        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[16..18], &[0x02, 0x00]); // command id 2
        assert_eq!(&bytes[18..20], &[0x04, 0x00]); // state flags 4
        assert_eq!(&bytes[20..24], &[0x0C, 0x00, 0x00, 0x00]); // payload length 12
        assert_eq!(&bytes[28..32], &[0x01, 0x80, 0x00, 0x00]); // invoke id 0x8001
    }

    #[test]
    fn frame_prefix_carries_packet_length() {
        let (target, source) = make_addrs();
        let packet = AmsPacket::request(target, source, CommandId::ReadState, 0x8002, vec![]);

        let frame = packet.to_frame();
        assert_eq!(&frame[0..2], &[0x00, 0x00]);
        assert_eq!(&frame[2..6], &32u32.to_le_bytes());
        assert_eq!(frame.len(), 6 + 32);
    }

    #[test]
    fn decode_rejects_length_mismatch() {
        let (target, source) = make_addrs();
        let mut bytes = AmsPacket::request(target, source, CommandId::Read, 1, vec![1, 2]).encode();
        bytes.pop();

        let err = AmsPacket::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                declared: 2,
                got: 1
            }
        );
    }

    #[test]
    fn decode_rejects_short_header() {
        let err = AmsPacket::decode(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, FrameError::TooShort { .. }));
    }

    #[test]
    fn decode_preserves_unknown_error_codes() {
        let (target, source) = make_addrs();
        let packet = AmsPacket::response(
            target,
            source,
            CommandId::Write,
            ReturnCode::from_u32(0xDEAD),
            7,
            vec![],
        );

        let decoded = AmsPacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded.error_code().to_u32(), 0xDEAD);
    }
}
