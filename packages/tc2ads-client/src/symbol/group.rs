use indexmap::IndexMap;
use std::fmt;
use tc2ads_core::codec::{AdsDataType, Codec, PlcValue};

/// A resolved primitive leaf: a fully expanded path (e.g.
/// `MAIN.pumps[2].speed`) with its wire address and element type.
///
/// Composites never appear here - the symbol engine dissolves arrays and
/// structures before leaves are built. `value` is filled in by the batch
/// read operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub path: String,
    pub index_group: u32,
    pub index_offset: u32,
    pub data_type: AdsDataType,
    pub value: Option<PlcValue>,
}

impl Symbol {
    pub fn new(
        path: impl Into<String>,
        index_group: u32,
        index_offset: u32,
        data_type: AdsDataType,
    ) -> Self {
        Self {
            path: path.into(),
            index_group,
            index_offset,
            data_type,
            value: None,
        }
    }

    /// Wire width of the leaf in bytes; zero for STRING and STRUCT tags,
    /// which the batch reads skip.
    pub fn size(&self) -> usize {
        self.data_type.size()
    }

    /// The default codec for this leaf, if its type has a fixed wire form.
    pub fn codec(&self) -> Option<Codec> {
        self.data_type.codec()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:04x}:{:04x}] {} = ",
            self.index_group, self.index_offset, self.path
        )?;
        match &self.value {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "<no value>"),
        }
    }
}

/// An ordered selection of [`Symbol`]s, usually produced by
/// [`SymbolList::filter`](super::SymbolList::filter) and handed to the batch
/// read operations. Insertion order is preserved; it is the order values
/// are requested and decoded in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSymbolList {
    entries: IndexMap<String, Symbol>,
}

impl GroupSymbolList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a symbol, keyed (and replacing) by its path.
    pub fn insert(&mut self, symbol: Symbol) {
        self.entries.insert(symbol.path.clone(), symbol);
    }

    /// Appends every symbol of `other`, preserving order. Lets several
    /// filter results be read in one batch.
    pub fn extend(&mut self, other: GroupSymbolList) {
        for (path, symbol) in other.entries {
            self.entries.insert(path, symbol);
        }
    }

    pub fn get(&self, path: &str) -> Option<&Symbol> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn first(&self) -> Option<&Symbol> {
        self.entries.values().next()
    }

    pub fn last(&self) -> Option<&Symbol> {
        self.entries.values().last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Symbol> {
        self.entries.values_mut()
    }
}

impl std::ops::Index<&str> for GroupSymbolList {
    type Output = Symbol;

    fn index(&self, path: &str) -> &Symbol {
        self.entries
            .get(path)
            .unwrap_or_else(|| panic!("no symbol {path:?} in group"))
    }
}

impl<'a> IntoIterator for &'a GroupSymbolList {
    type Item = &'a Symbol;
    type IntoIter = indexmap::map::Values<'a, String, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl fmt::Display for GroupSymbolList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            writeln!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
