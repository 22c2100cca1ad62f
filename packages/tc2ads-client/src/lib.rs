//! Blocking ADS client for TwinCAT 2 PLCs.
//!
//! [`AdsClient`] owns the TCP connection and a background reader, matching
//! responses to requests by invoke id. On top of the raw command set it
//! offers by-name/by-handle variable access, enumeration of the device's
//! type and symbol tables, expansion of composites into primitive leaves
//! ([`SymbolList`]), and batched sum/block reads over filtered symbol
//! groups.

mod batch;
pub mod client;
pub mod connection;
pub mod errors;
pub mod symbol;
#[cfg(test)]
mod testutil;

pub use client::AdsClient;
pub use connection::{ADS_TCP_PORT, AdsConnection, Timeouts};
pub use errors::{ClientError, Result};
pub use symbol::{
    GroupSymbolList, Symbol, SymbolError, SymbolInfo, SymbolInfoList, SymbolList, TypeInfo,
    TypeInfoList,
};

pub use tc2ads_core::{
    ads::{AdsState, ReturnCode},
    ams::{AmsAddr, AmsNetId},
    codec::{AdsDataType, Codec, PlcValue},
    protocol::{DeviceInfo, DeviceState},
};
