//! Well-known index groups of the TwinCAT system services.
//!
//! An index group / index offset pair names a variable or memory region on
//! the device. The groups below cover the symbol services this library uses;
//! anything else is application-defined.

/// Get a symbol handle by name. Write: name, read: handle.
pub const SYM_HNDBYNAME: u32 = 0xF003;

/// Read/write a symbol value addressed by name (offset 0).
pub const SYM_VALBYNAME: u32 = 0xF004;

/// Read/write a symbol value addressed by handle (offset = handle).
pub const SYM_VALBYHND: u32 = 0xF005;

/// Release a symbol handle. Write: handle.
pub const SYM_RELEASEHND: u32 = 0xF006;

/// Extended symbol information by name. Write: name, read: symbol record.
pub const SYM_INFOBYNAMEEX: u32 = 0xF009;

/// Upload of the full symbol table.
pub const SYM_UPLOAD: u32 = 0xF00B;

/// Upload of the full data-type table. Not documented by Beckhoff, but
/// served by TwinCAT 2 runtimes alongside the symbol upload.
pub const SYM_DT_UPLOAD: u32 = 0xF00E;

/// Sizes of the symbol and type tables (24-byte record, see the client's
/// enumeration sequence). Not documented by Beckhoff.
pub const SYM_UPLOAD_INFO: u32 = 0xF00F;

/// Process image of the physical inputs (%I), byte offsets.
pub const IOIMAGE_RWIB: u32 = 0xF020;

/// Process image of the physical outputs (%Q), byte offsets.
pub const IOIMAGE_RWOB: u32 = 0xF030;

/// Sum command: many reads in one request.
pub const SYM_SUMREAD: u32 = 0xF080;

/// Sum command: many writes in one request.
pub const SYM_SUMWRITE: u32 = 0xF081;

/// Sum command: many read/writes in one request.
pub const SYM_SUMREADWRITE: u32 = 0xF082;
