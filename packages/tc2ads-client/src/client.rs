//! The blocking ADS client: connection lifecycle, the single-flight request
//! path, and the by-name/by-handle variable operations.

use crate::connection::{AdsConnection, Timeouts};
use crate::errors::{ClientError, Result};
use crate::symbol::{SymbolError, SymbolInfo, SymbolInfoList, TypeInfo, TypeInfoList};
use std::net::Shutdown;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tc2ads_core::ads::{AdsState, index_group};
use tc2ads_core::ams::AmsPacket;
use tc2ads_core::codec::{Codec, PlcValue, encode_string};
use tc2ads_core::io::AmsStream;
use tc2ads_core::protocol::{
    DeviceInfo, DeviceState, ProtocolError, ReadDeviceInfo, ReadRequest, ReadState,
    ReadWriteRequest, Request, Response, WriteControl, WriteRequest,
};
use tracing::{debug, trace, warn};

/// A blocking client for one ADS device.
///
/// The client owns the TCP connection and a background reader thread. All
/// methods take `&self`; requests are serialized internally so at most one
/// exchange is in flight at a time, which is what makes the invoke-id
/// response matching safe. Requests issued while disconnected connect
/// transparently first.
pub struct AdsClient {
    conn: AdsConnection,
    timeouts: Timeouts,
    inner: Mutex<Inner>,
    shared: Arc<Shared>,
}

/// Mutable connection state, guarded by the client-wide lock. The lock is
/// held across send and response wait, serializing whole exchanges.
struct Inner {
    stream: Option<AmsStream>,
    reader: Option<JoinHandle<()>>,
    invoke_id: u16,
}

/// State shared with the reader thread.
struct Shared {
    slot: Mutex<ReplySlot>,
    available: Condvar,
    stop: AtomicBool,
    connected: AtomicBool,
}

/// The reader delivers the response for the outstanding invoke id here;
/// anything else it sees is a stray from a past request and is dropped.
#[derive(Default)]
struct ReplySlot {
    expected_id: u32,
    packet: Option<AmsPacket>,
}

/// First invoke id of the cycle; the counter wraps back here after 0xFFFF,
/// so an id is never zero.
const INVOKE_ID_BASE: u16 = 0x8000;

fn advance_invoke_id(current: u16) -> u16 {
    if current < 0xFFFF {
        current + 1
    } else {
        INVOKE_ID_BASE
    }
}

impl AdsClient {
    /// Creates a client. No connection is made until the first request or
    /// an explicit [`connect`](AdsClient::connect).
    pub fn new(conn: AdsConnection, timeouts: Timeouts) -> Self {
        Self {
            conn,
            timeouts,
            inner: Mutex::new(Inner {
                stream: None,
                reader: None,
                invoke_id: INVOKE_ID_BASE,
            }),
            shared: Arc::new(Shared {
                slot: Mutex::new(ReplySlot::default()),
                available: Condvar::new(),
                stop: AtomicBool::new(false),
                connected: AtomicBool::new(false),
            }),
        }
    }

    /// Whether the transport currently holds a live connection.
    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    /// Opens the TCP connection and starts the reader thread. Idempotent:
    /// an existing connection is closed and reopened.
    pub fn connect(&self) -> Result<()> {
        let mut inner = self.lock_inner();
        self.connect_locked(&mut inner)
    }

    /// Stops the reader thread and closes the socket.
    pub fn close(&self) {
        let mut inner = self.lock_inner();
        self.close_locked(&mut inner);
    }

    /// Sends one request and waits for its response - the single entry
    /// point every operation funnels through.
    ///
    /// Socket failures close the connection; a timeout leaves it open.
    pub fn execute<R: Request>(&self, request: &R) -> Result<R::Response> {
        let mut inner = self.lock_inner();

        if !self.is_connected() || inner.stream.is_none() {
            self.connect_locked(&mut inner)?;
        }

        inner.invoke_id = advance_invoke_id(inner.invoke_id);
        let invoke_id = u32::from(inner.invoke_id);
        {
            let mut slot = self.lock_slot();
            slot.expected_id = invoke_id;
            slot.packet = None;
        }

        let packet = AmsPacket::request(
            self.conn.target(),
            self.conn.source(),
            R::COMMAND,
            invoke_id,
            request.payload(),
        );
        trace!(command = ?R::COMMAND, invoke_id, "sending request");

        let Some(stream) = inner.stream.as_mut() else {
            return Err(ClientError::ConnectionClosed);
        };
        if let Err(err) = stream.write_packet(&packet) {
            warn!(error = %err, "send failed, closing connection");
            self.close_locked(&mut inner);
            return Err(ClientError::Io(err));
        }

        let reply = self.await_reply(&mut inner, invoke_id)?;

        let code = reply.error_code();
        if !code.is_ok() {
            return Err(ClientError::Ads(code));
        }
        R::Response::parse(reply.payload()).map_err(|err| match err {
            ProtocolError::Rejected(code) => ClientError::Ads(code),
            other => ClientError::Protocol(other),
        })
    }

    /// Blocks until the reader delivers the response for `invoke_id`, the
    /// response timeout elapses, or the connection dies under us.
    fn await_reply(&self, inner: &mut Inner, invoke_id: u32) -> Result<AmsPacket> {
        let deadline = Instant::now() + self.timeouts.response;
        let mut slot = self.lock_slot();

        loop {
            if let Some(reply) = slot.packet.take() {
                trace!(invoke_id, "response matched");
                return Ok(reply);
            }
            if !self.is_connected() {
                drop(slot);
                self.close_locked(inner);
                return Err(ClientError::ConnectionClosed);
            }

            let now = Instant::now();
            if now >= deadline {
                debug!(invoke_id, "request timed out");
                return Err(ClientError::Timeout);
            }
            slot = self
                .shared
                .available
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    fn connect_locked(&self, inner: &mut Inner) -> Result<()> {
        self.close_locked(inner);

        let ip = self.conn.target_ip();
        let port = self.conn.tcp_port();
        debug!(ip, port, "connecting");
        let stream = AmsStream::connect((ip, port), self.timeouts.connect)?;
        let reader_stream = stream.try_clone()?;

        self.shared.stop.store(false, Ordering::SeqCst);
        self.shared.connected.store(true, Ordering::SeqCst);
        {
            let mut slot = self.lock_slot();
            slot.expected_id = 0;
            slot.packet = None;
        }

        let shared = Arc::clone(&self.shared);
        let reader = thread::Builder::new()
            .name("tc2ads-reader".into())
            .spawn(move || reader_loop(reader_stream, shared))?;

        inner.reader = Some(reader);
        inner.stream = Some(stream);
        debug!(ip, "connected");
        Ok(())
    }

    fn close_locked(&self, inner: &mut Inner) {
        self.shared.stop.store(true, Ordering::SeqCst);
        if let Some(stream) = inner.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        if let Some(reader) = inner.reader.take() {
            let _ = reader.join();
            debug!("reader stopped");
        }
        self.shared.connected.store(false, Ordering::SeqCst);
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, ReplySlot> {
        self.shared
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // --- device-level operations ---

    /// Reads the device's name and version.
    pub fn read_device_info(&self) -> Result<DeviceInfo> {
        self.execute(&ReadDeviceInfo)
    }

    /// Reads the device's ADS and device state.
    pub fn read_state(&self) -> Result<DeviceState> {
        self.execute(&ReadState)
    }

    /// Requests a state change on the device.
    pub fn write_control(
        &self,
        ads_state: AdsState,
        device_state: u16,
        data: impl Into<Vec<u8>>,
    ) -> Result<()> {
        self.execute(&WriteControl::new(ads_state, device_state, data))?;
        Ok(())
    }

    /// Reads `length` raw bytes from an index group / offset.
    pub fn read(&self, index_group: u32, index_offset: u32, length: u32) -> Result<Vec<u8>> {
        Ok(self
            .execute(&ReadRequest::new(index_group, index_offset, length))?
            .data)
    }

    /// Writes raw bytes to an index group / offset.
    pub fn write(&self, index_group: u32, index_offset: u32, data: impl Into<Vec<u8>>) -> Result<()> {
        self.execute(&WriteRequest::new(index_group, index_offset, data))?;
        Ok(())
    }

    /// Writes `data` and reads up to `read_length` bytes back in one
    /// exchange.
    pub fn read_write(
        &self,
        index_group: u32,
        index_offset: u32,
        read_length: u32,
        data: impl Into<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        Ok(self
            .execute(&ReadWriteRequest::new(
                index_group,
                index_offset,
                read_length,
                data,
            ))?
            .data)
    }

    // --- variable access by name and handle ---

    /// Fetches the device-internal handle of a variable.
    ///
    /// Names are matched case-insensitively by the PLC, which uppercases
    /// all symbols internally.
    pub fn get_handle_by_name(&self, name: &str) -> Result<u32> {
        let data = self.read_write(
            index_group::SYM_HNDBYNAME,
            0,
            4,
            encoded_name(name)?,
        )?;
        let bytes: [u8; 4] =
            data.as_slice()
                .try_into()
                .map_err(|_| ClientError::ShortResponse {
                    what: "symbol handle",
                    expected: 4,
                    got: data.len(),
                })?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Releases a handle obtained via [`get_handle_by_name`](AdsClient::get_handle_by_name).
    pub fn release_handle(&self, handle: u32) -> Result<()> {
        self.write(index_group::SYM_RELEASEHND, 0, handle.to_le_bytes().to_vec())
    }

    /// Fetches the extended symbol record (address, type name, comment) of
    /// a variable.
    ///
    /// The read length is `0xFFFF` on purpose: the record length varies
    /// with the type text and comment, and the device truncates the reply
    /// to the actual record.
    pub fn get_info_by_name(&self, name: &str) -> Result<SymbolInfo> {
        let data = self.read_write(
            index_group::SYM_INFOBYNAMEEX,
            0,
            0xFFFF,
            encoded_name(name)?,
        )?;
        Ok(SymbolInfo::parse(&data)?)
    }

    /// Reads a variable by handle and decodes it with `codec`.
    pub fn read_by_handle(&self, handle: u32, codec: &Codec) -> Result<PlcValue> {
        let data = self.read(
            index_group::SYM_VALBYHND,
            handle,
            codec.byte_count() as u32,
        )?;
        Ok(codec.unpack(&data)?)
    }

    /// Reads a variable by name and decodes it with `codec`.
    pub fn read_by_name(&self, name: &str, codec: &Codec) -> Result<PlcValue> {
        let data = self.read_write(
            index_group::SYM_VALBYNAME,
            0,
            codec.byte_count() as u32,
            encoded_name(name)?,
        )?;
        Ok(codec.unpack(&data)?)
    }

    /// Encodes `value` with `codec` and writes it to a variable by handle.
    pub fn write_by_handle(&self, handle: u32, codec: &Codec, value: &PlcValue) -> Result<()> {
        let data = codec.pack(value)?;
        self.write(index_group::SYM_VALBYHND, handle, data)
    }

    /// Encodes `value` with `codec` and writes it to a variable by name,
    /// resolving the handle first.
    pub fn write_by_name(&self, name: &str, codec: &Codec, value: &PlcValue) -> Result<()> {
        let handle = self.get_handle_by_name(name)?;
        self.write_by_handle(handle, codec, value)
    }

    // --- catalog enumeration ---

    /// Uploads and parses the device's data-type table.
    ///
    /// Structures and arrays are not resolved here; [`SymbolList::build`]
    /// (crate::symbol::SymbolList::build) substitutes them later.
    pub fn get_types(&self) -> Result<TypeInfoList> {
        let (_, _, type_count, type_len) = self.read_upload_info()?;
        let data = self.read(index_group::SYM_DT_UPLOAD, 0, type_len)?;

        let mut list = TypeInfoList::new();
        let mut cursor = 0usize;
        for _ in 0..type_count {
            let record = record_at(&data, cursor, "type table")?;
            list.insert(TypeInfo::parse(record)?);
            cursor += record.len();
        }
        list.sort();
        Ok(list)
    }

    /// Uploads and parses the device's symbol table.
    pub fn get_symbols(&self) -> Result<SymbolInfoList> {
        let (sym_count, sym_len, _, _) = self.read_upload_info()?;
        let data = self.read(index_group::SYM_UPLOAD, 0, sym_len)?;

        let mut list = SymbolInfoList::new();
        let mut cursor = 0usize;
        for _ in 0..sym_count {
            let record = record_at(&data, cursor, "symbol table")?;
            list.insert(SymbolInfo::parse(record)?);
            cursor += record.len();
        }
        Ok(list)
    }

    /// Reads the table-of-tables record: symbol count and table length,
    /// type count and table length.
    fn read_upload_info(&self) -> Result<(u32, u32, u32, u32)> {
        let data = self.read(index_group::SYM_UPLOAD_INFO, 0, 24)?;
        if data.len() < 16 {
            return Err(ClientError::ShortResponse {
                what: "upload info",
                expected: 16,
                got: data.len(),
            });
        }
        Ok((
            u32::from_le_bytes(data[0..4].try_into().unwrap()),
            u32::from_le_bytes(data[4..8].try_into().unwrap()),
            u32::from_le_bytes(data[8..12].try_into().unwrap()),
            u32::from_le_bytes(data[12..16].try_into().unwrap()),
        ))
    }
}

impl Drop for AdsClient {
    fn drop(&mut self) {
        self.close();
    }
}

/// NUL-terminated Windows-1252 form of a symbol name, as every by-name
/// service expects it.
fn encoded_name(name: &str) -> Result<Vec<u8>> {
    let mut data = encode_string(name)?;
    data.push(0);
    Ok(data)
}

/// Slices the size-prefixed record starting at `cursor` out of a table
/// upload.
fn record_at<'a>(data: &'a [u8], cursor: usize, what: &'static str) -> Result<&'a [u8]> {
    let header = data
        .get(cursor..cursor + 4)
        .ok_or(SymbolError::Truncated {
            what,
            expected: cursor + 4,
            got: data.len(),
        })?;
    let size = u32::from_le_bytes(header.try_into().unwrap()) as usize;
    if size < 4 {
        return Err(SymbolError::BadRecordSize(size).into());
    }
    data.get(cursor..cursor + size)
        .ok_or(SymbolError::Truncated {
            what,
            expected: cursor + size,
            got: data.len(),
        })
        .map_err(ClientError::from)
}

/// Receive loop of the reader thread.
///
/// Exits on the stop flag (observed after the socket is shut down, which
/// wakes the blocking read) or on any receive error; either way the
/// connection is marked dead and a waiting caller is woken.
fn reader_loop(mut stream: AmsStream, shared: Arc<Shared>) {
    loop {
        match stream.read_packet() {
            Ok(packet) => {
                let mut slot = shared.slot.lock().unwrap_or_else(PoisonError::into_inner);
                if packet.invoke_id() == slot.expected_id {
                    slot.packet = Some(packet);
                    shared.available.notify_one();
                } else {
                    debug!(
                        invoke_id = packet.invoke_id(),
                        expected = slot.expected_id,
                        "dropping frame with stale invoke id"
                    );
                }
            }
            Err(err) => {
                if !shared.stop.load(Ordering::SeqCst) {
                    debug!(error = %err, "reader stopping");
                }
                shared.connected.store(false, Ordering::SeqCst);
                shared.available.notify_all();
                return;
            }
        }
        if shared.stop.load(Ordering::SeqCst) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakePlc, test_connection};
    use std::time::Duration;
    use tc2ads_core::ads::{CommandId, ReturnCode};

    #[test]
    fn invoke_ids_cycle_without_ever_being_zero() {
        let mut id = INVOKE_ID_BASE;
        id = advance_invoke_id(id);
        assert_eq!(id, 0x8001);
        id = advance_invoke_id(id);
        assert_eq!(id, 0x8002);

        id = advance_invoke_id(0xFFFE);
        assert_eq!(id, 0xFFFF);
        id = advance_invoke_id(id);
        assert_eq!(id, INVOKE_ID_BASE);
        id = advance_invoke_id(id);
        assert_eq!(id, 0x8001);
    }

    #[test]
    fn execute_roundtrip() {
        let plc = FakePlc::start(|request| {
            assert_eq!(request.command_id(), CommandId::ReadState);
            assert!(request.state_flags().is_request());

            let mut payload = vec![0, 0, 0, 0];
            payload.extend_from_slice(&5u16.to_le_bytes()); // Run
            payload.extend_from_slice(&7u16.to_le_bytes());
            vec![reply_to(&request, ReturnCode::Ok, payload)]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        let state = client.read_state().unwrap();
        assert_eq!(state.ads_state, AdsState::Run);
        assert_eq!(state.device_state, 7);
        assert!(client.is_connected());
    }

    #[test]
    fn first_request_uses_invoke_id_0x8001_and_connects_on_demand() {
        let plc = FakePlc::start(|request| {
            assert_eq!(request.invoke_id(), 0x8001);
            vec![reply_to(&request, ReturnCode::Ok, vec![0, 0, 0, 0])]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        assert!(!client.is_connected());
        client.write(0x4020, 0, vec![1]).unwrap();
        assert!(client.is_connected());
    }

    #[test]
    fn stale_invoke_id_is_dropped_and_real_reply_matched() {
        let plc = FakePlc::start(|request| {
            let stray = AmsPacket::response(
                *request.source(),
                *request.target(),
                request.command_id(),
                ReturnCode::Ok,
                request.invoke_id().wrapping_sub(1),
                vec![1, 0, 0, 0],
            );
            let good = reply_to(&request, ReturnCode::Ok, vec![0, 0, 0, 0]);
            vec![stray, good]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        client.write(0x4020, 0, vec![1]).unwrap();
    }

    #[test]
    fn ams_error_code_is_surfaced() {
        let plc = FakePlc::start(|request| {
            vec![reply_to(&request, ReturnCode::DeviceSymbolNotFound, vec![])]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        let err = client.read(0x4020, 0, 4).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Ads(ReturnCode::DeviceSymbolNotFound)
        ));
    }

    #[test]
    fn command_result_code_is_surfaced_as_ads_error() {
        let plc = FakePlc::start(|request| {
            vec![reply_to(
                &request,
                ReturnCode::Ok,
                0x710u32.to_le_bytes().to_vec(),
            )]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        let err = client.read(0x4020, 0, 4).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Ads(ReturnCode::DeviceSymbolNotFound)
        ));
    }

    #[test]
    fn timeout_leaves_the_connection_open() {
        let plc = FakePlc::start(|_| vec![]);

        let timeouts = Timeouts {
            response: Duration::from_millis(100),
            ..Timeouts::default()
        };
        let client = AdsClient::new(test_connection(&plc), timeouts);
        let err = client.read(0x4020, 0, 4).unwrap_err();
        assert!(matches!(err, ClientError::Timeout));
        assert!(client.is_connected());
    }

    #[test]
    fn get_handle_by_name_encodes_and_decodes() {
        let plc = FakePlc::start(|request| {
            assert_eq!(request.command_id(), CommandId::ReadWrite);
            let payload = request.payload();
            assert_eq!(&payload[0..4], &index_group::SYM_HNDBYNAME.to_le_bytes());
            assert_eq!(&payload[16..], b"MAIN.counter\0");

            let mut reply = vec![0, 0, 0, 0];
            reply.extend_from_slice(&4u32.to_le_bytes());
            reply.extend_from_slice(&0xDEAD_0001u32.to_le_bytes());
            vec![reply_to(&request, ReturnCode::Ok, reply)]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        assert_eq!(client.get_handle_by_name("MAIN.counter").unwrap(), 0xDEAD_0001);
    }

    #[test]
    fn get_info_by_name_parses_the_symbol_record() {
        use crate::symbol::symbol_info::make_symbol_record;

        let plc = FakePlc::start(|request| {
            let payload = request.payload();
            assert_eq!(&payload[0..4], &index_group::SYM_INFOBYNAMEEX.to_le_bytes());
            assert_eq!(&payload[8..12], &0xFFFFu32.to_le_bytes());

            let record = make_symbol_record(0x4020, 64, 4, 0x13, ".COUNTER", "UDINT", "");
            let mut reply = vec![0, 0, 0, 0];
            reply.extend_from_slice(&(record.len() as u32).to_le_bytes());
            reply.extend_from_slice(&record);
            vec![reply_to(&request, ReturnCode::Ok, reply)]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        let info = client.get_info_by_name(".counter").unwrap();
        assert_eq!(info.index_group, 0x4020);
        assert_eq!(info.index_offset, 64);
        assert_eq!(info.type_symbol, "UDINT");
    }

    #[test]
    fn read_by_name_decodes_with_the_given_codec() {
        let plc = FakePlc::start(|request| {
            let payload = request.payload();
            assert_eq!(&payload[0..4], &index_group::SYM_VALBYNAME.to_le_bytes());
            assert_eq!(&payload[8..12], &4u32.to_le_bytes()); // codec byte count

            let mut reply = vec![0, 0, 0, 0];
            reply.extend_from_slice(&4u32.to_le_bytes());
            reply.extend_from_slice(&1234u32.to_le_bytes());
            vec![reply_to(&request, ReturnCode::Ok, reply)]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        let value = client.read_by_name(".counter", &Codec::Udint).unwrap();
        assert_eq!(value, PlcValue::Udint(1234));
    }

    #[test]
    fn write_by_handle_packs_the_value() {
        let plc = FakePlc::start(|request| {
            assert_eq!(request.command_id(), CommandId::Write);
            let payload = request.payload();
            assert_eq!(&payload[0..4], &index_group::SYM_VALBYHND.to_le_bytes());
            assert_eq!(&payload[4..8], &0x77u32.to_le_bytes()); // handle as offset
            assert_eq!(&payload[12..], &[0xFE, 0xFF]); // INT -2
            vec![reply_to(&request, ReturnCode::Ok, vec![0, 0, 0, 0])]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        client
            .write_by_handle(0x77, &Codec::Int, &PlcValue::Int(-2))
            .unwrap();
    }

    #[test]
    fn get_types_walks_the_table_records() {
        use crate::symbol::type_info::make_type_record;

        let int_rec = make_type_record(0x02, 2, "INT", "INT", "", &[]);
        let bool_rec = make_type_record(0x21, 1, "BOOL", "BOOL", "", &[]);
        let mut table = int_rec.clone();
        table.extend_from_slice(&bool_rec);
        let table_len = table.len() as u32;

        let plc = FakePlc::start(move |request| {
            let payload = request.payload();
            let group = u32::from_le_bytes(payload[0..4].try_into().unwrap());
            let reply_data = match group {
                index_group::SYM_UPLOAD_INFO => {
                    let mut info = vec![0u8; 24];
                    info[8..12].copy_from_slice(&2u32.to_le_bytes()); // type count
                    info[12..16].copy_from_slice(&table_len.to_le_bytes());
                    info
                }
                index_group::SYM_DT_UPLOAD => table.clone(),
                other => panic!("unexpected index group {other:#x}"),
            };
            let mut reply = vec![0, 0, 0, 0];
            reply.extend_from_slice(&(reply_data.len() as u32).to_le_bytes());
            reply.extend_from_slice(&reply_data);
            vec![reply_to(&request, ReturnCode::Ok, reply)]
        });

        let client = AdsClient::new(test_connection(&plc), Timeouts::default());
        let types = client.get_types().unwrap();
        assert_eq!(types.len(), 2);
        assert!(types.contains("INT"));
        assert!(types.contains("BOOL"));
    }

    /// Builds the well-formed response to `request` with addresses swapped.
    fn reply_to(request: &AmsPacket, code: ReturnCode, payload: Vec<u8>) -> AmsPacket {
        AmsPacket::response(
            *request.source(),
            *request.target(),
            request.command_id(),
            code,
            request.invoke_id(),
            payload,
        )
    }
}
