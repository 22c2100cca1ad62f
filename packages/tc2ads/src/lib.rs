//! # TwinCAT 2 ADS for Rust
//!
//! A Rust-native client for the Beckhoff ADS protocol over TCP, aimed at
//! TwinCAT 2 PLC runtimes. It talks to the device directly - no
//! `TcAdsDll.dll`, no local TwinCAT installation - and covers device
//! commands, by-name/by-handle variable access, symbol and type table
//! enumeration with full composite expansion, and batched sum/block reads.
//!
//! This crate is composed of the following sub-crates:
//!
//! - [`core`] - wire types, framing and the value codecs
//! - [`client`] - the blocking connection, request multiplexing and the
//!   symbol engine

pub use tc2ads_client as client;
pub use tc2ads_core as core;

pub use tc2ads_client::{
    AdsClient, AdsConnection, GroupSymbolList, SymbolList, Timeouts,
};
pub use tc2ads_core::codec::{Codec, PlcValue};
