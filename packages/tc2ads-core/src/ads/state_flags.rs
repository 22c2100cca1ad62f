//! AMS State Flags

use std::fmt;

/// A type-safe wrapper for the 16-bit AMS State Flags.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StateFlags(u16);

impl StateFlags {
    /// Bit 0: Response (0 = Request, 1 = Response)
    pub const MASK_RESPONSE: u16 = 0x0001;
    /// Bit 2: ADS Command (always set for ADS traffic)
    pub const MASK_COMMAND: u16 = 0x0004;
    /// Bit 6: UDP (0 = TCP, 1 = UDP)
    pub const MASK_UDP: u16 = 0x0040;

    /// Creates a new generic set of flags from a raw u16.
    pub const fn new(val: u16) -> Self {
        Self(val)
    }

    /// The standard flags for a client request over TCP
    /// (ADS Command = 1, Response = 0).
    pub const fn request() -> Self {
        Self(Self::MASK_COMMAND)
    }

    /// The standard flags for a device response over TCP
    /// (ADS Command = 1, Response = 1).
    pub const fn response() -> Self {
        Self(Self::MASK_COMMAND | Self::MASK_RESPONSE)
    }

    /// Returns true if this is a response packet (device -> client).
    pub fn is_response(&self) -> bool {
        (self.0 & Self::MASK_RESPONSE) != 0
    }

    /// Returns true if this is a request packet (client -> device).
    pub fn is_request(&self) -> bool {
        !self.is_response()
    }

    /// Returns true if the UDP flag is set.
    pub fn is_udp(&self) -> bool {
        (self.0 & Self::MASK_UDP) != 0
    }

    /// Returns true if the packet travels over TCP.
    pub fn is_tcp(&self) -> bool {
        !self.is_udp()
    }
}

impl From<StateFlags> for u16 {
    fn from(flags: StateFlags) -> Self {
        flags.0
    }
}

impl From<u16> for StateFlags {
    fn from(val: u16) -> Self {
        Self(val)
    }
}

impl fmt::Debug for StateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateFlags({:#06x}: {}, {})",
            self.0,
            if self.is_response() {
                "response"
            } else {
                "request"
            },
            if self.is_udp() { "udp" } else { "tcp" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_constructors() {
        let req = StateFlags::request();
        assert_eq!(u16::from(req), 0x0004);
        assert!(req.is_request());
        assert!(req.is_tcp());

        let res = StateFlags::response();
        assert_eq!(u16::from(res), 0x0005);
        assert!(res.is_response());
        assert!(!res.is_request());
    }

    #[test]
    fn test_conversions() {
        let flags: StateFlags = 0x0005.into();
        assert!(flags.is_response());
        assert_eq!(u16::from(flags), 0x0005);
    }
}
