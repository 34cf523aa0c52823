//! Block record table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// A BLOCK_RECORD entry; one exists per block definition from R13 on
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    pub common: TableEntryCommon,
    /// Insertion units (code 70 of the record body); R2000+
    pub insertion_units: i16,
}

impl BlockRecord {
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            common: TableEntryCommon::named(name),
            insertion_units: 0,
        }
    }
}

impl Default for BlockRecord {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for BlockRecord {
    const TABLE_NAME: &'static str = "BLOCK_RECORD";
    const SUBCLASS_MARKER: &'static str = "AcDbBlockTableRecord";
    const MIN_VERSION: DxfVersion = DxfVersion::R13;

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, _pair: &CodePair) {}

    fn write_specific_pairs(&self, _version: DxfVersion, _pairs: &mut Vec<CodePair>) {}

    // Block records carry no standard flags; code 70 holds the insertion units.
    fn try_apply_code_pair(&mut self, pair: &CodePair) {
        match pair.code {
            2 => self.common.name = pair.as_str().unwrap_or_default().to_string(),
            5 => self.common.handle = pair.as_handle().unwrap_or_default(),
            330 => self.common.owner = pair.as_handle().unwrap_or_default(),
            70 => self.insertion_units = pair.as_i16().unwrap_or(0),
            _ => {}
        }
    }

    fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        let mut pairs = vec![CodePair::string(0, Self::TABLE_NAME)];
        if !self.common.handle.is_null() {
            pairs.push(CodePair::handle(5, self.common.handle));
        }
        if !self.common.owner.is_null() {
            pairs.push(CodePair::handle(330, self.common.owner));
        }
        pairs.push(CodePair::string(100, "AcDbSymbolTableRecord"));
        pairs.push(CodePair::string(100, Self::SUBCLASS_MARKER));
        pairs.push(CodePair::string(2, self.common.name.as_str()));
        if version >= DxfVersion::R2000 {
            pairs.push(CodePair::short(70, self.insertion_units));
        }
        pairs
    }
}
