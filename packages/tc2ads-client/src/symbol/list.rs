use super::group::{GroupSymbolList, Symbol};
use super::symbol_info::{SymbolInfo, SymbolInfoList};
use super::type_info::{TypeInfo, TypeInfoList};
use super::{SymbolError, align_up};
use indexmap::IndexMap;
use regex::RegexBuilder;
use std::fmt;
use tc2ads_core::codec::AdsDataType;
use tracing::warn;

/// Type names every runtime understands without a table entry. TIME, TOD
/// and DATE travel as 32-bit words.
const BUILTIN_TYPES: &[(&str, AdsDataType)] = &[
    ("BOOL", AdsDataType::Bool),
    ("SINT", AdsDataType::Sint),
    ("USINT", AdsDataType::Usint),
    ("INT", AdsDataType::Int),
    ("UINT", AdsDataType::Uint),
    ("DINT", AdsDataType::Dint),
    ("UDINT", AdsDataType::Udint),
    ("REAL", AdsDataType::Real),
    ("LREAL", AdsDataType::Lreal),
    ("TIME", AdsDataType::Udint),
    ("TOD", AdsDataType::Udint),
    ("DATE", AdsDataType::Udint),
];

/// The fully expanded symbol map: every addressable primitive leaf of every
/// variable, keyed by its dotted path.
///
/// Built once from the enumerated type and symbol tables; arrays are
/// unrolled element by element and structures decomposed member by member.
/// With `alignment` enabled (the TwinCAT 2 ARM rule, the default for those
/// targets) offsets are padded so every leaf sits on its natural boundary;
/// disabled, leaves are laid out consecutively.
pub struct SymbolList {
    entries: IndexMap<String, Symbol>,
    alignment: bool,
}

impl SymbolList {
    /// Expands `symbols` against `types` into a flat leaf map.
    pub fn build(types: &TypeInfoList, symbols: &SymbolInfoList, alignment: bool) -> Self {
        let mut table = types.clone();
        for &(name, data_type) in BUILTIN_TYPES {
            table.insert(TypeInfo::primitive(data_type, name));
        }

        let mut list = Self {
            entries: IndexMap::new(),
            alignment,
        };
        for sinfo in symbols.iter() {
            list.expand_symbol(&table, sinfo);
        }
        list
    }

    /// Looks a leaf up by its full path.
    pub fn get(&self, path: &str) -> Option<&Symbol> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the leaves in expansion order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    /// Selects leaves by hierarchy levels.
    ///
    /// Each part is a regular expression for one level of the path; the
    /// parts are joined with `.` and matched case-insensitively against the
    /// start of every leaf path. `filter(&["config", r"machine\[0\]"])`
    /// selects everything under `.CONFIG.MACHINE[0]`.
    pub fn filter(&self, parts: &[&str]) -> Result<GroupSymbolList, SymbolError> {
        let mut pattern = String::new();
        for part in parts {
            pattern.push('.');
            pattern.push_str(part);
        }

        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        let mut result = GroupSymbolList::new();
        for symbol in self.iter() {
            if regex.find(&symbol.path).is_some_and(|m| m.start() == 0) {
                result.insert(symbol.clone());
            }
        }
        Ok(result)
    }

    fn align(&self, offset: u32, size: usize) -> u32 {
        if self.alignment {
            align_up(offset, size)
        } else {
            offset
        }
    }

    fn insert(&mut self, symbol: Symbol) {
        self.entries.insert(symbol.path.clone(), symbol);
    }

    fn expand_symbol(&mut self, table: &TypeInfoList, sinfo: &SymbolInfo) {
        match table.get(&sinfo.type_symbol) {
            Some(tinfo) if tinfo.is_array => {
                self.expand_array(
                    table,
                    tinfo,
                    &sinfo.path,
                    sinfo.index_group,
                    sinfo.index_offset,
                );
            }
            Some(tinfo) if tinfo.is_struct() => {
                self.expand_struct(
                    table,
                    tinfo,
                    &sinfo.path,
                    sinfo.index_group,
                    sinfo.index_offset,
                );
            }
            _ => self.insert_plain(sinfo),
        }
    }

    /// A symbol whose type needs no expansion: inserted at its table
    /// address as-is.
    fn insert_plain(&mut self, sinfo: &SymbolInfo) {
        let data_type = u8::try_from(sinfo.type_tag)
            .ok()
            .and_then(AdsDataType::from_tag);
        match data_type {
            Some(data_type) => self.insert(Symbol::new(
                sinfo.path.clone(),
                sinfo.index_group,
                sinfo.index_offset,
                data_type,
            )),
            None => warn!(
                path = %sinfo.path,
                tag = sinfo.type_tag,
                "skipping symbol with unimplemented type tag"
            ),
        }
    }

    /// Expands each member of a structure at `base`, returning the offset
    /// following the structure. The structure itself is never inserted;
    /// its alignment falls out of aligning the first primitive member.
    fn expand_struct(
        &mut self,
        table: &TypeInfoList,
        tinfo: &TypeInfo,
        base: &str,
        index_group: u32,
        mut offset: u32,
    ) -> u32 {
        for member in tinfo.members.iter() {
            let path = format!("{base}.{}", member.path);
            if member.is_array {
                offset = self.align(offset, member.element_size());
                self.expand_array(table, member, &path, index_group, offset);
                offset += member.datasize;
            } else if member.is_struct() {
                match table.get(&member.strtype) {
                    Some(sub) => {
                        offset = self.expand_struct(table, sub, &path, index_group, offset);
                    }
                    None => {
                        // Unknown member type: skip its bytes so the
                        // following members stay addressable.
                        offset = self.align(offset, member.element_size());
                        offset += member.datasize;
                    }
                }
            } else {
                offset = self.align(offset, member.element_size());
                self.insert(Symbol::new(path, index_group, offset, member.data_type));
                offset += member.element_size() as u32;
            }
        }
        offset
    }

    /// Expands every element of an array at `base` with `[i]` suffixes,
    /// zero-based regardless of the declared lower bound.
    fn expand_array(
        &mut self,
        table: &TypeInfoList,
        tinfo: &TypeInfo,
        base: &str,
        index_group: u32,
        mut offset: u32,
    ) {
        for i in 0..tinfo.num_elements {
            let path = format!("{base}[{i}]");
            if tinfo.is_struct() {
                match table.get(&tinfo.strtype) {
                    Some(sub) => {
                        offset = self.expand_struct(table, sub, &path, index_group, offset);
                    }
                    None => {
                        warn!(
                            path = %path,
                            element_type = %tinfo.strtype,
                            "array element type is not in the type table, \
                             dropping the remaining elements"
                        );
                        return;
                    }
                }
            } else {
                offset = self.align(offset, tinfo.element_size());
                self.insert(Symbol::new(path, index_group, offset, tinfo.data_type));
                offset += tinfo.element_size() as u32;
            }
        }
    }
}

impl fmt::Display for SymbolList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            writeln!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::symbol_info::make_symbol_record;
    use crate::symbol::type_info::make_type_record;

    fn symbol(path: &str, type_symbol: &str, offset: u32, datasize: u32) -> SymbolInfo {
        SymbolInfo::parse(&make_symbol_record(
            0x4020,
            offset,
            datasize,
            0x41,
            path,
            type_symbol,
            "",
        ))
        .unwrap()
    }

    fn primitive_symbol(path: &str, type_symbol: &str, tag: u16, offset: u32) -> SymbolInfo {
        SymbolInfo::parse(&make_symbol_record(
            0x4020,
            offset,
            4,
            tag,
            path,
            type_symbol,
            "",
        ))
        .unwrap()
    }

    fn tables_with_struct() -> (TypeInfoList, SymbolInfoList) {
        // struct ST_IO { USINT a; UINT b; }
        let members = vec![
            make_type_record(0x11, 1, "a", "USINT", "", &[]),
            make_type_record(0x12, 2, "b", "UINT", "", &[]),
        ];
        let st_io = make_type_record(0x41, 4, "ST_IO", "ST_IO", "", &members);

        let mut types = TypeInfoList::new();
        types.insert(TypeInfo::parse(&st_io).unwrap());

        let mut symbols = SymbolInfoList::new();
        symbols.insert(symbol(".X", "ST_IO", 0, 4));
        (types, symbols)
    }

    #[test]
    fn struct_members_get_aligned_offsets() {
        let (types, symbols) = tables_with_struct();
        let list = SymbolList::build(&types, &symbols, true);

        // USINT at 0, UINT aligned up from 1 to 2
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(".X.a").unwrap().index_offset, 0);
        assert_eq!(list.get(".X.b").unwrap().index_offset, 2);
    }

    #[test]
    fn alignment_can_be_disabled() {
        let (types, symbols) = tables_with_struct();
        let list = SymbolList::build(&types, &symbols, false);

        assert_eq!(list.get(".X.a").unwrap().index_offset, 0);
        assert_eq!(list.get(".X.b").unwrap().index_offset, 1);
    }

    #[test]
    fn every_leaf_is_primitive_and_unique() {
        let (types, symbols) = tables_with_struct();
        let list = SymbolList::build(&types, &symbols, true);

        for leaf in list.iter() {
            assert!(!leaf.data_type.is_struct(), "{} is not a leaf", leaf.path);
        }
        // aligned leaf sizes add up to the declared struct size
        let end = list.iter().map(|s| s.index_offset + s.size() as u32).max();
        assert_eq!(end, Some(4));
    }

    #[test]
    fn arrays_unroll_zero_based() {
        let arr = make_type_record(0x03, 12, "ARRAY [4..6] OF DINT", "DINT", "", &[]);
        let mut types = TypeInfoList::new();
        types.insert(TypeInfo::parse(&arr).unwrap());

        let mut symbols = SymbolInfoList::new();
        symbols.insert(symbol(".SPEEDS", "ARRAY [4..6] OF DINT", 100, 12));

        let list = SymbolList::build(&types, &symbols, true);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(".SPEEDS[0]").unwrap().index_offset, 100);
        assert_eq!(list.get(".SPEEDS[1]").unwrap().index_offset, 104);
        assert_eq!(list.get(".SPEEDS[2]").unwrap().index_offset, 108);
        assert_eq!(
            list.get(".SPEEDS[0]").unwrap().data_type,
            AdsDataType::Dint
        );
    }

    #[test]
    fn array_of_structs_expands_each_element() {
        // struct ST_PUMP { UINT speed; BOOL on; } -> 2 elements
        let members = vec![
            make_type_record(0x12, 2, "speed", "UINT", "", &[]),
            make_type_record(0x21, 1, "on", "BOOL", "", &[]),
        ];
        let st_pump = make_type_record(0x41, 4, "ST_PUMP", "ST_PUMP", "", &members);
        let arr = make_type_record(0x41, 8, "ARRAY [0..1] OF ST_PUMP", "ST_PUMP", "", &[]);

        let mut types = TypeInfoList::new();
        types.insert(TypeInfo::parse(&st_pump).unwrap());
        types.insert(TypeInfo::parse(&arr).unwrap());

        let mut symbols = SymbolInfoList::new();
        symbols.insert(symbol(".PUMPS", "ARRAY [0..1] OF ST_PUMP", 0, 8));

        let list = SymbolList::build(&types, &symbols, true);
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(".PUMPS[0].speed").unwrap().index_offset, 0);
        assert_eq!(list.get(".PUMPS[0].on").unwrap().index_offset, 2);
        // next element starts at the aligned offset after `on`
        assert_eq!(list.get(".PUMPS[1].speed").unwrap().index_offset, 4);
        assert_eq!(list.get(".PUMPS[1].on").unwrap().index_offset, 6);
    }

    #[test]
    fn plain_symbols_keep_their_table_address() {
        let types = TypeInfoList::new();
        let mut symbols = SymbolInfoList::new();
        symbols.insert(primitive_symbol(".COUNTER", "UDINT", 0x13, 1234));

        let list = SymbolList::build(&types, &symbols, true);
        let leaf = list.get(".COUNTER").unwrap();
        assert_eq!(leaf.index_offset, 1234);
        assert_eq!(leaf.data_type, AdsDataType::Udint);
    }

    #[test]
    fn filter_is_case_insensitive_and_anchored() {
        let (types, mut symbols) = tables_with_struct();
        symbols.insert(primitive_symbol(".CONFIG.MACHINE[0].SPEED", "UDINT", 0x13, 40));
        symbols.insert(primitive_symbol(".CONFIG.MACHINE[1].SPEED", "UDINT", 0x13, 44));

        let list = SymbolList::build(&types, &symbols, true);

        let group = list.filter(&["config", r"machine\[0\]"]).unwrap();
        assert_eq!(group.len(), 1);
        assert!(group.contains(".CONFIG.MACHINE[0].SPEED"));

        // not anchored at the start -> no match
        let group = list.filter(&[r"machine\[0\]"]).unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn filter_rejects_broken_patterns() {
        let (types, symbols) = tables_with_struct();
        let list = SymbolList::build(&types, &symbols, true);
        assert!(matches!(
            list.filter(&["["]),
            Err(SymbolError::Pattern(_))
        ));
    }
}
