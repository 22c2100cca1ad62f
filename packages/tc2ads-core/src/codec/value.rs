use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::fmt;

/// A PLC value in host representation.
///
/// Arrays are index-keyed maps because IEC arrays are arbitrarily indexed
/// (`ARRAY [3..7] OF INT` keeps its declared indices); multi-dimensional
/// arrays nest maps per dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlcValue {
    Bool(bool),
    Sint(i8),
    Usint(u8),
    Int(i16),
    Uint(u16),
    Dint(i32),
    Udint(u32),
    Real(f32),
    Lreal(f64),
    String(String),
    Time(NaiveTime),
    Date(NaiveDate),
    Array(BTreeMap<i64, PlcValue>),
}

impl PlcValue {
    /// A short name for the value's kind, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "BOOL",
            Self::Sint(_) => "SINT",
            Self::Usint(_) => "USINT",
            Self::Int(_) => "INT",
            Self::Uint(_) => "UINT",
            Self::Dint(_) => "DINT",
            Self::Udint(_) => "UDINT",
            Self::Real(_) => "REAL",
            Self::Lreal(_) => "LREAL",
            Self::String(_) => "STRING",
            Self::Time(_) => "TIME",
            Self::Date(_) => "DATE",
            Self::Array(_) => "ARRAY",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens any integer variant to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Sint(v) => Some(i64::from(*v)),
            Self::Usint(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Uint(v) => Some(i64::from(*v)),
            Self::Dint(v) => Some(i64::from(*v)),
            Self::Udint(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Widens either float variant to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(f64::from(*v)),
            Self::Lreal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&BTreeMap<i64, PlcValue>> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PlcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Sint(v) => write!(f, "{}", v),
            Self::Usint(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Uint(v) => write!(f, "{}", v),
            Self::Dint(v) => write!(f, "{}", v),
            Self::Udint(v) => write!(f, "{}", v),
            Self::Real(v) => write!(f, "{}", v),
            Self::Lreal(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{:?}", v),
            Self::Time(v) => write!(f, "{}", v),
            Self::Date(v) => write!(f, "{}", v),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, (idx, value)) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", idx, value)?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(impl From<$ty> for PlcValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        })*
    };
}

impl_from! {
    Bool(bool),
    Sint(i8),
    Usint(u8),
    Int(i16),
    Uint(u16),
    Dint(i32),
    Udint(u32),
    Real(f32),
    Lreal(f64),
    String(String),
    Time(NaiveTime),
    Date(NaiveDate),
}

impl From<&str> for PlcValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert_eq!(PlcValue::Bool(true).as_bool(), Some(true));
        assert_eq!(PlcValue::Int(-2).as_i64(), Some(-2));
        assert_eq!(PlcValue::Udint(305_419_896).as_i64(), Some(305_419_896));
        assert_eq!(PlcValue::Real(1.0).as_f64(), Some(1.0));
        assert_eq!(PlcValue::from("pump").as_str(), Some("pump"));
        assert_eq!(PlcValue::Bool(true).as_i64(), None);
    }

    #[test]
    fn array_display_keeps_declared_indices() {
        let mut items = BTreeMap::new();
        items.insert(3, PlcValue::Int(7));
        items.insert(4, PlcValue::Int(9));
        assert_eq!(PlcValue::Array(items).to_string(), "[3: 7, 4: 9]");
    }
}
