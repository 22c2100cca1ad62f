use super::{ProtocolError, Request, Response, split_result};
use crate::ads::{AdsState, CommandId};

/// Reads the ADS and device status (command `0x0004`).
///
/// The request carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadState;

impl Request for ReadState {
    const COMMAND: CommandId = CommandId::ReadState;
    type Response = DeviceState;

    fn write_payload(&self, _buf: &mut Vec<u8>) {}
}

/// The status pair a device reports: its ADS state plus a device-specific
/// state word.
///
/// Response payload after the result code: ADS state (u16), device state (u16).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    pub ads_state: AdsState,
    pub device_state: u16,
}

impl Response for DeviceState {
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        let rest = split_result(payload)?;

        if rest.len() < 4 {
            return Err(ProtocolError::TooShort {
                expected: 4,
                got: rest.len(),
            });
        }

        let raw_state = u16::from_le_bytes([rest[0], rest[1]]);
        Ok(Self {
            ads_state: AdsState::try_from(raw_state)
                .map_err(ProtocolError::UnknownState)?,
            device_state: u16::from_le_bytes([rest[2], rest[3]]),
        })
    }
}

/// Changes the ADS and device status (command `0x0005`).
///
/// Payload layout: ADS state (u16), device state (u16), length (u32), then
/// optional data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteControl {
    pub ads_state: AdsState,
    pub device_state: u16,
    pub data: Vec<u8>,
}

impl WriteControl {
    pub fn new(ads_state: AdsState, device_state: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            ads_state,
            device_state,
            data: data.into(),
        }
    }
}

impl Request for WriteControl {
    const COMMAND: CommandId = CommandId::WriteControl;
    type Response = WriteControlResponse;

    fn write_payload(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&(self.ads_state as u16).to_le_bytes());
        buf.extend_from_slice(&self.device_state.to_le_bytes());
        buf.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.data);
    }
}

/// A WriteControl response carries only the result code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteControlResponse;

impl Response for WriteControlResponse {
    fn parse(payload: &[u8]) -> Result<Self, ProtocolError> {
        split_result(payload)?;
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_running_device() {
        let mut payload = vec![0, 0, 0, 0];
        payload.extend_from_slice(&5u16.to_le_bytes()); // Run
        payload.extend_from_slice(&0u16.to_le_bytes());

        let state = DeviceState::parse(&payload).unwrap();
        assert_eq!(state.ads_state, AdsState::Run);
        assert_eq!(state.device_state, 0);
    }

    #[test]
    fn parse_unknown_state_fails() {
        let mut payload = vec![0, 0, 0, 0];
        payload.extend_from_slice(&99u16.to_le_bytes());
        payload.extend_from_slice(&0u16.to_le_bytes());

        assert_eq!(
            DeviceState::parse(&payload).unwrap_err(),
            ProtocolError::UnknownState(99)
        );
    }

    #[test]
    fn write_control_payload_layout() {
        let payload = WriteControl::new(AdsState::Stop, 0, vec![]).payload();
        assert_eq!(payload, [0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn write_control_payload_with_data() {
        let payload = WriteControl::new(AdsState::Run, 1, vec![0x10]).payload();
        assert_eq!(
            payload,
            [0x05, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x10]
        );
    }
}
