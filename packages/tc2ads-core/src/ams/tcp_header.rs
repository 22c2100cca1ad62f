use super::error::FrameError;

/// The 6-byte prefix carried before every AMS packet on a TCP stream.
///
/// Layout: a reserved word that is always zero, followed by the length of the
/// AMS packet (header + payload) as a little-endian `u32`. When talking
/// directly to a PLC runtime the reserved word never carries anything else;
/// a non-zero value means the stream has lost frame synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AmsTcpHeader {
    length: u32,
}

impl AmsTcpHeader {
    /// Length of the AMS/TCP prefix in bytes.
    pub const LENGTH: usize = 6;

    /// Constructs a new prefix for a packet of `length` bytes.
    pub const fn new(length: u32) -> Self {
        Self { length }
    }

    /// Returns the length of the AMS packet that follows (excluding the prefix).
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Converts the current instance into a byte array.
    pub fn to_bytes(&self) -> [u8; AmsTcpHeader::LENGTH] {
        let mut buf = [0u8; AmsTcpHeader::LENGTH];
        buf[2..].copy_from_slice(&self.length.to_le_bytes());
        buf
    }

    /// Parses a prefix from a byte array, rejecting a non-zero reserved word.
    pub fn from_bytes(bytes: [u8; AmsTcpHeader::LENGTH]) -> Result<Self, FrameError> {
        let reserved = u16::from_le_bytes([bytes[0], bytes[1]]);
        if reserved != 0 {
            return Err(FrameError::BadReserved(reserved));
        }

        Ok(Self {
            length: u32::from_le_bytes(bytes[2..].try_into().unwrap()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bytes_is_little_endian_with_zero_reserved() {
        let header = AmsTcpHeader::new(0xA1B2_C3D4);
        assert_eq!(header.to_bytes(), [0x00, 0x00, 0xD4, 0xC3, 0xB2, 0xA1]);
    }

    #[test]
    fn from_bytes_roundtrip() {
        let header = AmsTcpHeader::new(44);
        let parsed = AmsTcpHeader::from_bytes(header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn nonzero_reserved_is_rejected() {
        let err = AmsTcpHeader::from_bytes([0x01, 0x00, 0x2C, 0x00, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, FrameError::BadReserved(0x0001));
    }
}
