use super::SymbolError;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tc2ads_core::codec::{AdsDataType, decode_trimmed};

/// IEC array declarations as the PLC serves them in type records, e.g.
/// `ARRAY [0..9] OF INT`. One dimension, as TwinCAT 2 emits them.
static ARRAY_DESCRIPTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ARRAY\s+\[(\d+)\.\.(\d+)\].+OF\s+(\w+)").unwrap());

/// A record from the PLC's data-type table.
///
/// For arrays, `strtype` holds the element type name and `num_elements` the
/// unrolled count. For structures, `members` holds the child records in
/// declaration order; `struct_is_child` marks member records whose type was
/// expanded in place by the TwinCAT 2 compiler and must not be re-expanded
/// as an independent type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    pub data_type: AdsDataType,
    /// Total byte size of one instance of this type.
    pub datasize: u32,
    /// The canonical name (or full declaration text for arrays).
    pub path: String,
    /// The base type text: element type for arrays, referenced type name
    /// for structure members.
    pub strtype: String,
    pub comment: String,
    pub is_array: bool,
    pub struct_is_child: bool,
    pub num_elements: u32,
    pub members: TypeInfoList,
}

impl TypeInfo {
    /// Fixed part of a type record, before the string section.
    const HEADER_LEN: usize = 0x2A;

    /// A synthetic record for a built-in primitive, used to seed the type
    /// table before expansion.
    pub fn primitive(data_type: AdsDataType, name: &str) -> Self {
        Self {
            data_type,
            datasize: data_type.size() as u32,
            path: name.to_string(),
            strtype: name.to_string(),
            comment: String::new(),
            is_array: false,
            struct_is_child: false,
            num_elements: 1,
            members: TypeInfoList::new(),
        }
    }

    /// Wire width of one element of this type.
    pub fn element_size(&self) -> usize {
        self.data_type.size()
    }

    /// Whether this record describes a structure.
    pub fn is_struct(&self) -> bool {
        self.data_type.is_struct()
    }

    /// Whether the element type is signed.
    pub fn signed(&self) -> bool {
        self.data_type.signed()
    }

    /// Parses one size-prefixed type record, including nested member
    /// records for structures.
    ///
    /// Record layout (within the record, offsets in bytes):
    ///
    /// ```text
    /// 0x00  record size (u32)
    /// 0x10  instance size (u32)
    /// 0x18  type tag (u8)
    /// 0x20  name length (u16)
    /// 0x22  base type length (u16)
    /// 0x24  comment length (u16)
    /// 0x28  member count (u16, structures only)
    /// 0x2A  name NUL base-type NUL comment NUL [member records...]
    /// ```
    pub fn parse(data: &[u8]) -> Result<Self, SymbolError> {
        if data.len() < Self::HEADER_LEN {
            return Err(SymbolError::Truncated {
                what: "type record",
                expected: Self::HEADER_LEN,
                got: data.len(),
            });
        }

        let datasize = u32::from_le_bytes(data[0x10..0x14].try_into().unwrap());
        let tag = data[0x18];
        let data_type = AdsDataType::from_tag(tag).ok_or(SymbolError::UnknownTag { tag })?;

        let path_len = u16::from_le_bytes([data[0x20], data[0x21]]) as usize;
        let strtype_len = u16::from_le_bytes([data[0x22], data[0x23]]) as usize;
        let comment_len = u16::from_le_bytes([data[0x24], data[0x25]]) as usize;
        let member_count = u16::from_le_bytes([data[0x28], data[0x29]]);

        let mut cursor = Self::HEADER_LEN;
        let path = decode_trimmed(take(data, cursor, path_len, "type name")?);
        cursor += path_len + 1;
        let mut strtype = decode_trimmed(take(data, cursor, strtype_len, "base type name")?);
        cursor += strtype_len + 1;
        let comment = decode_trimmed(take(data, cursor, comment_len, "type comment")?);
        cursor += comment_len + 1;

        // The array shape travels as declaration text. In the name for
        // standalone array types; in the base type for members whose type
        // the TC2 compiler expanded in place.
        let mut is_array = false;
        let mut struct_is_child = false;
        let mut num_elements = 1u32;
        if let Some((lo, hi, element)) = parse_array_descriptor(&path)? {
            is_array = true;
            num_elements = element_count(lo, hi);
            strtype = element;
        } else if let Some((lo, hi, element)) = parse_array_descriptor(&strtype)? {
            is_array = true;
            struct_is_child = true;
            num_elements = element_count(lo, hi);
            strtype = element;
        }

        let mut members = TypeInfoList::new();
        if data_type.is_struct() && !struct_is_child {
            for _ in 0..member_count {
                let header = take(data, cursor, 4, "member record size")?;
                let size = u32::from_le_bytes(header.try_into().unwrap()) as usize;
                if size < 4 {
                    return Err(SymbolError::BadRecordSize(size));
                }
                members.insert(TypeInfo::parse(take(data, cursor, size, "member record")?)?);
                cursor += size;
            }
        }

        Ok(Self {
            data_type,
            datasize,
            path,
            strtype,
            comment,
            is_array,
            struct_is_child,
            num_elements,
            members,
        })
    }
}

fn take<'a>(
    data: &'a [u8],
    start: usize,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], SymbolError> {
    data.get(start..start + len).ok_or(SymbolError::Truncated {
        what,
        expected: start + len,
        got: data.len(),
    })
}

fn parse_array_descriptor(text: &str) -> Result<Option<(u32, u32, String)>, SymbolError> {
    let Some(caps) = ARRAY_DESCRIPTOR.captures(text) else {
        return Ok(None);
    };

    let bounds = |i: usize| {
        caps[i]
            .parse::<u32>()
            .map_err(|_| SymbolError::BadArrayBounds {
                text: text.to_string(),
            })
    };

    Ok(Some((bounds(1)?, bounds(2)?, caps[3].to_string())))
}

fn element_count(lo: u32, hi: u32) -> u32 {
    if hi >= lo { hi - lo + 1 } else { 0 }
}

/// The data-type table: an insertion-ordered map from type name to record.
///
/// Types reference each other by name (`strtype`), so the table stays a flat
/// immutable catalog after enumeration and resolution is a name lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeInfoList {
    entries: IndexMap<String, TypeInfo>,
}

impl TypeInfoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, keyed (and replacing) by its name.
    pub fn insert(&mut self, info: TypeInfo) {
        self.entries.insert(info.path.clone(), info);
    }

    /// Looks a type up by name.
    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the records in table order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.entries.values()
    }

    /// Re-orders the table by type name.
    pub fn sort(&mut self) {
        self.entries.sort_keys();
    }
}

#[cfg(test)]
pub(crate) fn make_type_record(
    tag: u8,
    datasize: u32,
    path: &str,
    strtype: &str,
    comment: &str,
    members: &[Vec<u8>],
) -> Vec<u8> {
    let mut rec = vec![0u8; 0x2A];
    rec[0x10..0x14].copy_from_slice(&datasize.to_le_bytes());
    rec[0x18] = tag;
    rec[0x20..0x22].copy_from_slice(&(path.len() as u16).to_le_bytes());
    rec[0x22..0x24].copy_from_slice(&(strtype.len() as u16).to_le_bytes());
    rec[0x24..0x26].copy_from_slice(&(comment.len() as u16).to_le_bytes());
    rec[0x28..0x2A].copy_from_slice(&(members.len() as u16).to_le_bytes());

    rec.extend_from_slice(path.as_bytes());
    rec.push(0);
    rec.extend_from_slice(strtype.as_bytes());
    rec.push(0);
    rec.extend_from_slice(comment.as_bytes());
    rec.push(0);
    for member in members {
        rec.extend_from_slice(member);
    }

    let total = rec.len() as u32;
    rec[0..4].copy_from_slice(&total.to_le_bytes());
    rec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_primitive_record() {
        let rec = make_type_record(0x02, 2, "INT", "INT", "", &[]);
        let info = TypeInfo::parse(&rec).unwrap();

        assert_eq!(info.data_type, AdsDataType::Int);
        assert_eq!(info.datasize, 2);
        assert_eq!(info.path, "INT");
        assert!(!info.is_array);
        assert!(!info.is_struct());
        assert!(info.signed());
        assert_eq!(info.num_elements, 1);
    }

    #[test]
    fn parse_struct_with_two_int_members() {
        let members = vec![
            make_type_record(0x02, 2, "left", "INT", "", &[]),
            make_type_record(0x02, 2, "right", "INT", "", &[]),
        ];
        let rec = make_type_record(0x41, 4, "ST_PAIR", "ST_PAIR", "a pair", &members);

        let info = TypeInfo::parse(&rec).unwrap();
        assert!(info.is_struct());
        assert_eq!(info.comment, "a pair");
        assert_eq!(info.members.len(), 2);
        for member in info.members.iter() {
            assert_eq!(member.data_type, AdsDataType::Int);
            assert_eq!(member.element_size(), 2);
            assert!(member.signed());
        }
    }

    #[test]
    fn parse_array_declaration_in_the_name() {
        let rec = make_type_record(0x02, 20, "ARRAY [0..9] OF INT", "INT", "", &[]);
        let info = TypeInfo::parse(&rec).unwrap();

        assert!(info.is_array);
        assert!(!info.struct_is_child);
        assert_eq!(info.num_elements, 10);
        assert_eq!(info.strtype, "INT");
    }

    #[test]
    fn parse_array_declaration_is_case_insensitive() {
        let rec = make_type_record(0x13, 12, "array [1..3] of UDINT", "UDINT", "", &[]);
        let info = TypeInfo::parse(&rec).unwrap();

        assert!(info.is_array);
        assert_eq!(info.num_elements, 3);
        assert_eq!(info.strtype, "UDINT");
    }

    #[test]
    fn array_in_the_base_type_marks_an_expanded_member() {
        let rec = make_type_record(0x21, 4, "flags", "ARRAY [0..3] OF BOOL", "", &[]);
        let info = TypeInfo::parse(&rec).unwrap();

        assert!(info.is_array);
        assert!(info.struct_is_child);
        assert_eq!(info.num_elements, 4);
        assert_eq!(info.strtype, "BOOL");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let rec = make_type_record(0x77, 4, "MYSTERY", "MYSTERY", "", &[]);
        assert_eq!(
            TypeInfo::parse(&rec).unwrap_err(),
            SymbolError::UnknownTag { tag: 0x77 }
        );
    }

    #[test]
    fn truncated_record_is_rejected() {
        let rec = make_type_record(0x02, 2, "INT", "INT", "", &[]);
        let err = TypeInfo::parse(&rec[..0x20]).unwrap_err();
        assert!(matches!(err, SymbolError::Truncated { .. }));
    }

    #[test]
    fn list_preserves_insertion_order_until_sorted() {
        let mut list = TypeInfoList::new();
        list.insert(TypeInfo::primitive(AdsDataType::Int, "ZULU"));
        list.insert(TypeInfo::primitive(AdsDataType::Bool, "ALPHA"));

        let names: Vec<&str> = list.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(names, ["ZULU", "ALPHA"]);

        let mut sorted = list.clone();
        sorted.sort();
        let names: Vec<&str> = sorted.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(names, ["ALPHA", "ZULU"]);
    }
}
