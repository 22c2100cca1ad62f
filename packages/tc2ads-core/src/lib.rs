#![doc = include_str!("../README.md")]

/// ADS protocol primitives - command ids, state flags, device states,
/// return codes and well-known index groups.
pub mod ads;

/// AMS layer - network addressing ([`AmsNetId`], [`AmsAddr`]) and the framed
/// packet codec ([`AmsPacket`]).
pub mod ams;

/// Conversion between PLC wire bytes and host values.
pub mod codec;

mod error;

/// Frame I/O - blocking packet streams over TCP.
pub mod io;

/// Typed request and response payloads for every ADS command. Start here if
/// you are building on the raw command set.
pub mod protocol;

pub use ads::{AdsState, CommandId, IndexGroup, IndexOffset, ReturnCode, StateFlags};
pub use ams::{AmsAddr, AmsNetId, AmsPacket, AmsPort, AmsTcpHeader};
pub use codec::{AdsDataType, Codec, CodecError, PlcValue};
pub use error::CoreError;
pub use io::AmsStream;
