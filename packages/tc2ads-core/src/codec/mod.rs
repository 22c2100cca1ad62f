//! Conversion between PLC wire bytes and host values.
//!
//! [`AdsDataType`] is the closed registry of wire type tags a TwinCAT 2
//! runtime uses in its symbol and type tables. [`Codec`] performs the actual
//! pack/unpack per type, including fixed-capacity strings, TIME/DATE carriers
//! and arbitrarily-indexed arrays. [`PlcValue`] is the host-side
//! representation.

pub mod convert;
pub mod error;
pub mod value;

pub use convert::Codec;
pub use error::CodecError;
pub use value::PlcValue;

use encoding_rs::WINDOWS_1252;

/// The data types a TwinCAT 2 runtime tags symbols with.
///
/// `size()` is the wire width of one element; STRING and STRUCT report zero
/// because their size comes from the declaration (string capacity, type
/// record) rather than the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdsDataType {
    /// 16-bit signed integer (0x02)
    Int,
    /// 32-bit signed integer (0x03)
    Dint,
    /// 32-bit IEEE float (0x04)
    Real,
    /// 64-bit IEEE float (0x05)
    Lreal,
    /// 8-bit signed integer (0x10)
    Sint,
    /// 8-bit unsigned integer (0x11)
    Usint,
    /// 16-bit unsigned integer (0x12)
    Uint,
    /// 32-bit unsigned integer (0x13); also carries TIME and DATE
    Udint,
    /// Fixed-capacity Windows-1252 string (0x1E)
    String,
    /// Single byte, zero is false (0x21)
    Bool,
    /// Composite type; size comes from its type record (0x41)
    Struct,
}

impl AdsDataType {
    /// Resolves a wire type tag. Unknown tags return `None`.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0x02 => Self::Int,
            0x03 => Self::Dint,
            0x04 => Self::Real,
            0x05 => Self::Lreal,
            0x10 => Self::Sint,
            0x11 => Self::Usint,
            0x12 => Self::Uint,
            0x13 => Self::Udint,
            0x1E => Self::String,
            0x21 => Self::Bool,
            0x41 => Self::Struct,
            _ => return None,
        })
    }

    /// The wire type tag.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Int => 0x02,
            Self::Dint => 0x03,
            Self::Real => 0x04,
            Self::Lreal => 0x05,
            Self::Sint => 0x10,
            Self::Usint => 0x11,
            Self::Uint => 0x12,
            Self::Udint => 0x13,
            Self::String => 0x1E,
            Self::Bool => 0x21,
            Self::Struct => 0x41,
        }
    }

    /// The IEC name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Dint => "DINT",
            Self::Real => "REAL",
            Self::Lreal => "LREAL",
            Self::Sint => "SINT",
            Self::Usint => "USINT",
            Self::Uint => "UINT",
            Self::Udint => "UDINT",
            Self::String => "STRING",
            Self::Bool => "BOOL",
            Self::Struct => "STRUCT",
        }
    }

    /// Resolves an IEC type name, including the common aliases.
    ///
    /// TIME, TOD, DATE and DT are carried as 32-bit unsigned words on the
    /// wire and resolve to [`AdsDataType::Udint`]; use [`Codec::Time`] /
    /// [`Codec::Date`] to decode them into calendar values.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "BOOL" => Self::Bool,
            "SINT" => Self::Sint,
            "USINT" | "BYTE" => Self::Usint,
            "INT" => Self::Int,
            "UINT" | "WORD" => Self::Uint,
            "DINT" => Self::Dint,
            "UDINT" | "DWORD" | "TIME" | "TOD" | "TIME_OF_DAY" | "DATE" | "DT"
            | "DATE_AND_TIME" => Self::Udint,
            "REAL" => Self::Real,
            "LREAL" => Self::Lreal,
            "STRING" => Self::String,
            _ => return None,
        })
    }

    /// Wire width of one element in bytes; zero for STRING and STRUCT.
    pub fn size(&self) -> usize {
        match self {
            Self::Bool | Self::Sint | Self::Usint => 1,
            Self::Int | Self::Uint => 2,
            Self::Dint | Self::Udint | Self::Real => 4,
            Self::Lreal => 8,
            Self::String | Self::Struct => 0,
        }
    }

    /// Whether the type is signed.
    pub fn signed(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Dint | Self::Real | Self::Lreal | Self::Sint
        )
    }

    /// Whether the type is a composite.
    pub fn is_struct(&self) -> bool {
        *self == Self::Struct
    }

    /// The default codec for this type, if it has a fixed wire form.
    ///
    /// STRING has no registry width and STRUCT is decomposed by the symbol
    /// engine before any value is read; both return `None`.
    pub fn codec(&self) -> Option<Codec> {
        Some(match self {
            Self::Bool => Codec::Bool,
            Self::Sint => Codec::Sint,
            Self::Usint => Codec::Usint,
            Self::Int => Codec::Int,
            Self::Uint => Codec::Uint,
            Self::Dint => Codec::Dint,
            Self::Udint => Codec::Udint,
            Self::Real => Codec::Real,
            Self::Lreal => Codec::Lreal,
            Self::String | Self::Struct => return None,
        })
    }
}

/// Decodes a Windows-1252 byte buffer, stopping at the first NUL.
///
/// This is the STRING semantic: the PLC pads the declared capacity with
/// NULs, and everything from the first NUL on is garbage.
pub fn decode_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let (text, _, _) = WINDOWS_1252.decode(&bytes[..end]);
    text.into_owned()
}

/// Decodes a Windows-1252 byte buffer and trims surrounding whitespace and
/// NULs, the way names and comments in the catalog tables are stored.
pub fn decode_trimmed(bytes: &[u8]) -> String {
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.trim_matches([' ', '\t', '\n', '\r', '\0']).to_string()
}

/// Encodes a host string as Windows-1252.
///
/// Fails when the string contains characters the code page cannot express;
/// the PLC has no way to store them.
pub fn encode_string(text: &str) -> Result<Vec<u8>, CodecError> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        return Err(CodecError::Encoding);
    }
    Ok(bytes.into_owned())
}
