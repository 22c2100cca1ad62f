use thiserror::Error;

/// A value could not be converted to or from its PLC wire form.
///
/// These errors are local to the offending conversion; the connection that
/// produced the bytes is unaffected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    #[error("expected a {expected} value, got {got}")]
    WrongValue {
        expected: &'static str,
        got: &'static str,
    },

    #[error("{ty} needs {expected} bytes, got {got}")]
    WrongSize {
        ty: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("string of {got} bytes does not fit into STRING({capacity}) with its terminator")]
    StringTooLong { capacity: usize, got: usize },

    #[error("string is not representable in Windows-1252")]
    Encoding,

    #[error("TIME value cannot be represented as milliseconds in a u32")]
    TimeRange,

    #[error("DATE value must be a day on or after 1970-01-01")]
    DateRange,

    #[error("day count {0} is out of range for DATE")]
    DayCount(u32),

    #[error("array dimension {dim} expects every index in {lo}..={hi}, found index {found}")]
    IndexOutOfBounds {
        dim: usize,
        lo: i64,
        hi: i64,
        found: i64,
    },

    #[error("array dimension {dim} expects {expected} elements ({lo}..={hi}), found {found}")]
    WrongElementCount {
        dim: usize,
        lo: i64,
        hi: i64,
        expected: usize,
        found: usize,
    },

    #[error("array dimension bounds {lo}..={hi} are empty")]
    EmptyDimension { lo: i64, hi: i64 },

    #[error("array has no dimensions")]
    NoDimensions,

    #[error("arrays of {0} elements are not supported")]
    UnsupportedElement(&'static str),
}
