use super::error::CodecError;
use super::value::PlcValue;
use super::{decode_string, encode_string};
use chrono::{Days, NaiveDate, NaiveTime, Timelike};
use std::collections::BTreeMap;

/// Capacity of a plain `STRING` declaration without an explicit length.
pub const DEFAULT_STRING_CAPACITY: usize = 80;

const MS_PER_DAY: u32 = 86_400_000;

fn unix_epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// A reversible conversion between one PLC wire representation and a
/// [`PlcValue`].
///
/// Every codec has a fixed [`byte_count`](Codec::byte_count); [`pack`](Codec::pack)
/// produces exactly that many bytes and [`unpack`](Codec::unpack) demands
/// exactly that many. All integers and floats are little-endian.
///
/// * `String` is a fixed-capacity Windows-1252 buffer. Packing truncates to
///   the capacity and NUL-pads; unpacking stops at the first NUL.
/// * `Time` is an unsigned 32-bit count of milliseconds since midnight.
/// * `Date` is an unsigned 32-bit count of days since 1970-01-01.
/// * `Array` lays its elements out end-to-end in row-major order with the
///   last dimension varying fastest, and converts to/from nested index-keyed
///   maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    Bool,
    Sint,
    Usint,
    Int,
    Uint,
    Dint,
    Udint,
    Real,
    Lreal,
    String { capacity: usize },
    Time,
    Date,
    Array { element: Box<Codec>, dims: Vec<(i64, i64)> },
}

impl Codec {
    /// A `STRING` codec with the default capacity of 80 bytes.
    pub fn string() -> Self {
        Self::String {
            capacity: DEFAULT_STRING_CAPACITY,
        }
    }

    /// A `STRING(n)` codec for a declared capacity of `n` bytes.
    pub fn string_with_capacity(capacity: usize) -> Self {
        Self::String { capacity }
    }

    /// An array codec over a scalar element with inclusive index bounds per
    /// dimension, as declared (`ARRAY [3..7] OF INT` is `[(3, 7)]`).
    pub fn array(element: Codec, dims: Vec<(i64, i64)>) -> Result<Self, CodecError> {
        if matches!(element, Codec::Array { .. }) {
            return Err(CodecError::UnsupportedElement("ARRAY"));
        }
        if dims.is_empty() {
            return Err(CodecError::NoDimensions);
        }
        for &(lo, hi) in &dims {
            if lo > hi {
                return Err(CodecError::EmptyDimension { lo, hi });
            }
        }
        Ok(Self::Array {
            element: Box::new(element),
            dims,
        })
    }

    /// A short name for the codec's wire type, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Sint => "SINT",
            Self::Usint => "USINT",
            Self::Int => "INT",
            Self::Uint => "UINT",
            Self::Dint => "DINT",
            Self::Udint => "UDINT",
            Self::Real => "REAL",
            Self::Lreal => "LREAL",
            Self::String { .. } => "STRING",
            Self::Time => "TIME",
            Self::Date => "DATE",
            Self::Array { .. } => "ARRAY",
        }
    }

    /// The exact number of wire bytes this codec reads and writes.
    pub fn byte_count(&self) -> usize {
        match self {
            Self::Bool | Self::Sint | Self::Usint => 1,
            Self::Int | Self::Uint => 2,
            Self::Dint | Self::Udint | Self::Real | Self::Time | Self::Date => 4,
            Self::Lreal => 8,
            Self::String { capacity } => *capacity,
            Self::Array { element, dims } => {
                element.byte_count()
                    * dims
                        .iter()
                        .map(|&(lo, hi)| (hi - lo + 1) as usize)
                        .product::<usize>()
            }
        }
    }

    /// Serializes a host value into its wire form.
    pub fn pack(&self, value: &PlcValue) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.byte_count());
        self.pack_into(value, &mut out)?;
        Ok(out)
    }

    fn pack_into(&self, value: &PlcValue, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match (self, value) {
            (Self::Bool, PlcValue::Bool(v)) => out.push(u8::from(*v)),
            (Self::Sint, PlcValue::Sint(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Usint, PlcValue::Usint(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Int, PlcValue::Int(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Uint, PlcValue::Uint(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Dint, PlcValue::Dint(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Udint, PlcValue::Udint(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Real, PlcValue::Real(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::Lreal, PlcValue::Lreal(v)) => out.extend_from_slice(&v.to_le_bytes()),
            (Self::String { capacity }, PlcValue::String(v)) => {
                let mut bytes = encode_string(v)?;
                bytes.truncate(*capacity);
                bytes.resize(*capacity, 0);
                out.extend_from_slice(&bytes);
            }
            (Self::Time, PlcValue::Time(v)) => {
                let millis = v.num_seconds_from_midnight() * 1000 + v.nanosecond() / 1_000_000;
                out.extend_from_slice(&millis.to_le_bytes());
            }
            (Self::Date, PlcValue::Date(v)) => {
                let days = v.signed_duration_since(unix_epoch_date()).num_days();
                let days = u32::try_from(days).map_err(|_| CodecError::DateRange)?;
                out.extend_from_slice(&days.to_le_bytes());
            }
            (Self::Array { element, dims }, PlcValue::Array(items)) => {
                pack_dimension(element, dims, 0, items, out)?;
            }
            (codec, value) => {
                return Err(CodecError::WrongValue {
                    expected: codec.type_name(),
                    got: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Deserializes a wire buffer into a host value.
    ///
    /// The buffer must be exactly [`byte_count`](Codec::byte_count) bytes.
    pub fn unpack(&self, bytes: &[u8]) -> Result<PlcValue, CodecError> {
        let expected = self.byte_count();
        if bytes.len() != expected {
            return Err(CodecError::WrongSize {
                ty: self.type_name(),
                expected,
                got: bytes.len(),
            });
        }

        Ok(match self {
            Self::Bool => PlcValue::Bool(bytes[0] != 0),
            Self::Sint => PlcValue::Sint(i8::from_le_bytes([bytes[0]])),
            Self::Usint => PlcValue::Usint(bytes[0]),
            Self::Int => PlcValue::Int(i16::from_le_bytes(bytes.try_into().unwrap())),
            Self::Uint => PlcValue::Uint(u16::from_le_bytes(bytes.try_into().unwrap())),
            Self::Dint => PlcValue::Dint(i32::from_le_bytes(bytes.try_into().unwrap())),
            Self::Udint => PlcValue::Udint(u32::from_le_bytes(bytes.try_into().unwrap())),
            Self::Real => PlcValue::Real(f32::from_le_bytes(bytes.try_into().unwrap())),
            Self::Lreal => PlcValue::Lreal(f64::from_le_bytes(bytes.try_into().unwrap())),
            Self::String { .. } => PlcValue::String(decode_string(bytes)),
            Self::Time => {
                let millis = u32::from_le_bytes(bytes.try_into().unwrap()) % MS_PER_DAY;
                let time = NaiveTime::from_num_seconds_from_midnight_opt(
                    millis / 1000,
                    (millis % 1000) * 1_000_000,
                )
                .ok_or(CodecError::TimeRange)?;
                PlcValue::Time(time)
            }
            Self::Date => {
                let days = u32::from_le_bytes(bytes.try_into().unwrap());
                let date = unix_epoch_date()
                    .checked_add_days(Days::new(u64::from(days)))
                    .ok_or(CodecError::DayCount(days))?;
                PlcValue::Date(date)
            }
            Self::Array { element, dims } => {
                PlcValue::Array(unpack_dimension(element, dims, 0, bytes)?)
            }
        })
    }
}

fn pack_dimension(
    element: &Codec,
    dims: &[(i64, i64)],
    dim: usize,
    items: &BTreeMap<i64, PlcValue>,
    out: &mut Vec<u8>,
) -> Result<(), CodecError> {
    let (lo, hi) = dims[dim];
    let expected = (hi - lo + 1) as usize;

    for &found in items.keys() {
        if found < lo || found > hi {
            return Err(CodecError::IndexOutOfBounds { dim, lo, hi, found });
        }
    }
    if items.len() != expected {
        return Err(CodecError::WrongElementCount {
            dim,
            lo,
            hi,
            expected,
            found: items.len(),
        });
    }

    for idx in lo..=hi {
        let Some(item) = items.get(&idx) else {
            return Err(CodecError::WrongElementCount {
                dim,
                lo,
                hi,
                expected,
                found: items.len(),
            });
        };
        if dim + 1 < dims.len() {
            match item {
                PlcValue::Array(inner) => pack_dimension(element, dims, dim + 1, inner, out)?,
                other => {
                    return Err(CodecError::WrongValue {
                        expected: "ARRAY",
                        got: other.kind(),
                    });
                }
            }
        } else {
            element.pack_into(item, out)?;
        }
    }

    Ok(())
}

fn unpack_dimension(
    element: &Codec,
    dims: &[(i64, i64)],
    dim: usize,
    bytes: &[u8],
) -> Result<BTreeMap<i64, PlcValue>, CodecError> {
    let (lo, hi) = dims[dim];
    let count = (hi - lo + 1) as usize;
    let chunk = bytes.len() / count;

    let mut items = BTreeMap::new();
    for (i, idx) in (lo..=hi).enumerate() {
        let slice = &bytes[i * chunk..(i + 1) * chunk];
        let value = if dim + 1 < dims.len() {
            PlcValue::Array(unpack_dimension(element, dims, dim + 1, slice)?)
        } else {
            element.unpack(slice)?
        };
        items.insert(idx, value);
    }

    Ok(items)
}
