use super::SymbolError;
use indexmap::IndexMap;
use tc2ads_core::codec::decode_trimmed;

/// A record from the PLC's symbol table.
///
/// `(index_group, index_offset)` is the variable's wire address;
/// `type_symbol` names its entry in the data-type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub index_group: u32,
    pub index_offset: u32,
    /// Total byte size of the variable.
    pub datasize: u32,
    /// Raw wire type tag. Only authoritative for primitives; composites are
    /// resolved through `type_symbol`.
    pub type_tag: u16,
    pub path: String,
    pub type_symbol: String,
    pub comment: String,
}

impl SymbolInfo {
    /// Fixed part of a symbol record, before the string section.
    const HEADER_LEN: usize = 0x1E;

    /// Parses one size-prefixed symbol record.
    ///
    /// Record layout (within the record, offsets in bytes):
    ///
    /// ```text
    /// 0x00  record size (u32)
    /// 0x04  index group (u32)
    /// 0x08  index offset (u32)
    /// 0x0C  variable size (u32)
    /// 0x10  type tag (u16)
    /// 0x18  name length (u16)
    /// 0x1A  type name length (u16)
    /// 0x1C  comment length (u16)
    /// 0x1E  name NUL type-name NUL comment
    /// ```
    ///
    /// The same layout is served by the info-by-name service, so this parser
    /// covers both the bulk upload and single-symbol lookups.
    pub fn parse(data: &[u8]) -> Result<Self, SymbolError> {
        if data.len() < Self::HEADER_LEN {
            return Err(SymbolError::Truncated {
                what: "symbol record",
                expected: Self::HEADER_LEN,
                got: data.len(),
            });
        }

        let index_group = u32::from_le_bytes(data[0x04..0x08].try_into().unwrap());
        let index_offset = u32::from_le_bytes(data[0x08..0x0C].try_into().unwrap());
        let datasize = u32::from_le_bytes(data[0x0C..0x10].try_into().unwrap());
        let type_tag = u16::from_le_bytes([data[0x10], data[0x11]]);

        let path_len = u16::from_le_bytes([data[0x18], data[0x19]]) as usize;
        let type_len = u16::from_le_bytes([data[0x1A], data[0x1B]]) as usize;
        let comment_len = u16::from_le_bytes([data[0x1C], data[0x1D]]) as usize;

        let mut cursor = Self::HEADER_LEN;
        let path = decode_trimmed(take(data, cursor, path_len, "symbol name")?);
        cursor += path_len + 1;
        let type_symbol = decode_trimmed(take(data, cursor, type_len, "symbol type name")?);
        cursor += type_len + 1;
        let comment = decode_trimmed(take(data, cursor, comment_len, "symbol comment")?);

        Ok(Self {
            index_group,
            index_offset,
            datasize,
            type_tag,
            path,
            type_symbol,
            comment,
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

/// The symbol table: an insertion-ordered map from variable name to record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolInfoList {
    entries: IndexMap<String, SymbolInfo>,
}

impl SymbolInfoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, keyed (and replacing) by its name.
    pub fn insert(&mut self, info: SymbolInfo) {
        self.entries.insert(info.path.clone(), info);
    }

    /// Looks a symbol up by name.
    pub fn get(&self, path: &str) -> Option<&SymbolInfo> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the records in table order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolInfo> {
        self.entries.values()
    }
}

#[cfg(test)]
pub(crate) fn make_symbol_record(
    index_group: u32,
    index_offset: u32,
    datasize: u32,
    type_tag: u16,
    path: &str,
    type_symbol: &str,
    comment: &str,
) -> Vec<u8> {
    let mut rec = vec![0u8; 0x1E];
    rec[0x04..0x08].copy_from_slice(&index_group.to_le_bytes());
    rec[0x08..0x0C].copy_from_slice(&index_offset.to_le_bytes());
    rec[0x0C..0x10].copy_from_slice(&datasize.to_le_bytes());
    rec[0x10..0x12].copy_from_slice(&type_tag.to_le_bytes());
    rec[0x18..0x1A].copy_from_slice(&(path.len() as u16).to_le_bytes());
    rec[0x1A..0x1C].copy_from_slice(&(type_symbol.len() as u16).to_le_bytes());
    rec[0x1C..0x1E].copy_from_slice(&(comment.len() as u16).to_le_bytes());

    rec.extend_from_slice(path.as_bytes());
    rec.push(0);
    rec.extend_from_slice(type_symbol.as_bytes());
    rec.push(0);
    rec.extend_from_slice(comment.as_bytes());
    rec.push(0);

    let total = rec.len() as u32;
    rec[0..4].copy_from_slice(&total.to_le_bytes());
    rec
}
