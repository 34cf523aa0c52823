//! Symbol tables of the TABLES section

use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Handle};
use indexmap::IndexMap;

pub mod layer;
pub mod linetype;
pub mod textstyle;
pub mod block_record;
pub mod dimstyle;
pub mod appid;
pub mod view;
pub mod vport;
pub mod ucs;

pub use layer::Layer;
pub use linetype::LineType;
pub use textstyle::TextStyle;
pub use block_record::BlockRecord;
pub use dimstyle::DimStyle;
pub use appid::AppId;
pub use view::View;
pub use vport::VPort;
pub use ucs::Ucs;

/// Data every table entry carries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableEntryCommon {
    pub handle: Handle,
    /// Handle of the owning table
    pub owner: Handle,
    pub name: String,
    /// Standard flags (code 70)
    pub flags: i16,
}

impl TableEntryCommon {
    pub fn named(name: impl Into<String>) -> Self {
        TableEntryCommon {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Base trait for all table entries
pub trait TableEntry: Clone + Default {
    /// Table name, which is also the `0/<type>` string of each entry
    const TABLE_NAME: &'static str;

    /// Entry-specific subclass marker written from R13 on
    const SUBCLASS_MARKER: &'static str;

    /// Code carrying the entry handle
    const HANDLE_CODE: i32 = 5;

    /// Oldest version the table is written to
    const MIN_VERSION: DxfVersion = DxfVersion::Version1_0;

    /// Whether entries sharing a name are all kept, as the tiled viewports
    /// of a multi-viewport `*ACTIVE` configuration are
    const DUPLICATE_NAMES: bool = false;

    fn common(&self) -> &TableEntryCommon;

    fn common_mut(&mut self) -> &mut TableEntryCommon;

    /// Apply one entry-specific pair; unknown codes are ignored
    fn apply_specific_pair(&mut self, pair: &CodePair);

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>);

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common_mut().handle = handle;
    }

    fn name(&self) -> &str {
        &self.common().name
    }

    fn set_name(&mut self, name: String) {
        self.common_mut().name = name;
    }

    fn try_apply_code_pair(&mut self, pair: &CodePair) {
        let common = self.common_mut();
        match pair.code {
            2 => common.name = pair.as_str().unwrap_or_default().to_string(),
            70 => common.flags = pair.as_i16().unwrap_or(0),
            330 => common.owner = pair.as_handle().unwrap_or(Handle::NULL),
            100 => {}
            code if code == Self::HANDLE_CODE => common.handle = pair.as_handle().unwrap_or(Handle::NULL),
            _ => self.apply_specific_pair(pair),
        }
    }

    /// All pairs of the entry, starting with `0/<type>`
    fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        let common = self.common();
        let mut pairs = vec![CodePair::string(0, Self::TABLE_NAME)];
        if !common.handle.is_null() {
            pairs.push(CodePair::handle(Self::HANDLE_CODE, common.handle));
        }
        if version >= DxfVersion::R13 {
            if !common.owner.is_null() {
                pairs.push(CodePair::handle(330, common.owner));
            }
            pairs.push(CodePair::string(100, "AcDbSymbolTableRecord"));
            pairs.push(CodePair::string(100, Self::SUBCLASS_MARKER));
        }
        pairs.push(CodePair::string(2, common.name.as_str()));
        pairs.push(CodePair::short(70, common.flags));
        self.write_specific_pairs(version, &mut pairs);
        pairs
    }
}

/// Generic table for storing named entries
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T: TableEntry> {
    /// Entries stored by name (case-insensitive)
    entries: IndexMap<String, T>,
    handle: Handle,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
            handle: Handle::NULL,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    /// Add an entry; returns `false` and keeps the existing one if the
    /// name is taken, unless the table allows duplicate names.
    ///
    /// Name lookups on a table with duplicates find the first entry added.
    pub fn add(&mut self, entry: T) -> bool {
        let mut key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            if !T::DUPLICATE_NAMES {
                return false;
            }
            // NUL cannot occur in a DXF name, so these keys never shadow a lookup
            let mut n = 1;
            while self.entries.contains_key(&format!("{key}\0{n}")) {
                n += 1;
            }
            key = format!("{key}\0{n}");
        }
        self.entries.insert(key, entry);
        true
    }

    /// Add an entry, replacing any entry with the same name in place
    pub fn insert(&mut self, entry: T) -> Option<T> {
        self.entries.insert(entry.name().to_uppercase(), entry)
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }

    /// Add a default entry named `name` unless one exists
    pub fn ensure(&mut self, name: &str) {
        if !self.contains(name) {
            let mut entry = T::default();
            entry.set_name(name.to_string());
            self.add(entry);
        }
    }

    /// The whole table, `0/TABLE` through `0/ENDTAB`.
    ///
    /// Empty when the table does not exist at `version`.
    pub fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        if version < T::MIN_VERSION {
            return Vec::new();
        }
        let mut pairs = vec![CodePair::string(0, "TABLE"), CodePair::string(2, T::TABLE_NAME)];
        if !self.handle.is_null() {
            pairs.push(CodePair::handle(5, self.handle));
        }
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbSymbolTable"));
        }
        // the count is advisory; readers walk to ENDTAB
        pairs.push(CodePair::short(70, i16::try_from(self.entries.len()).unwrap_or(i16::MAX)));
        for entry in self.entries.values() {
            pairs.extend(entry.code_pairs(version));
        }
        pairs.push(CodePair::string(0, "ENDTAB"));
        pairs
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_add_and_get() {
        let mut table = Table::new();
        assert!(table.add(Layer::new("Walls")));
        assert!(table.contains("Walls"));
        assert!(table.contains("WALLS"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_duplicate_entry() {
        let mut table = Table::new();
        assert!(table.add(Layer::new("Walls")));
        assert!(!table.add(Layer::new("walls")));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("WALLS").map(|l| l.name()), Some("Walls"));
    }

    #[test]
    fn test_vport_duplicates_are_kept() {
        let mut table = Table::new();
        let mut right = VPort::active();
        right.lower_left = (0.5, 0.0);
        assert!(table.add(VPort::active()));
        assert!(table.add(right));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("*active").map(|v| v.lower_left), Some((0.0, 0.0)));

        let pairs = table.code_pairs(DxfVersion::R12);
        assert_eq!(pairs[2], CodePair::short(70, 2));
        let records = pairs.iter().filter(|p| p.is_marker("VPORT")).count();
        assert_eq!(records, 2);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let mut table: Table<AppId> = Table::new();
        table.ensure("ACAD");
        table.ensure("acad");
        assert_eq!(table.names().collect::<Vec<_>>(), ["ACAD"]);
    }

    #[test]
    fn test_table_framing() {
        let mut table = Table::new();
        table.set_handle(Handle::new(2));
        table.add(Layer::new("0"));
        let pairs = table.code_pairs(DxfVersion::R12);
        assert_eq!(pairs[0], CodePair::string(0, "TABLE"));
        assert_eq!(pairs[1], CodePair::string(2, "LAYER"));
        assert_eq!(pairs[2], CodePair::string(5, "2"));
        assert_eq!(pairs[3], CodePair::short(70, 1));
        assert_eq!(pairs[4], CodePair::string(0, "LAYER"));
        assert_eq!(pairs.last(), Some(&CodePair::string(0, "ENDTAB")));
    }

    #[test]
    fn test_entry_apply_common_pairs() {
        let mut layer = Layer::default();
        layer.try_apply_code_pair(&CodePair::string(5, "1A"));
        layer.try_apply_code_pair(&CodePair::string(330, "2"));
        layer.try_apply_code_pair(&CodePair::string(2, "DOORS"));
        layer.try_apply_code_pair(&CodePair::short(70, 4));
        assert_eq!(layer.handle(), Handle::new(0x1A));
        assert_eq!(layer.common.owner, Handle::new(2));
        assert_eq!(layer.name(), "DOORS");
        assert_eq!(layer.common.flags, 4);
    }

    #[test]
    fn test_block_records_absent_before_r13() {
        let mut table = Table::new();
        table.add(BlockRecord::new("*Model_Space"));
        assert!(table.code_pairs(DxfVersion::R12).is_empty());
        assert!(!table.code_pairs(DxfVersion::R13).is_empty());
    }
}
