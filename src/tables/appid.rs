//! Application ID table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// Registered application name, referenced by extended data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppId {
    pub common: TableEntryCommon,
}

impl AppId {
    pub fn new(name: impl Into<String>) -> Self {
        AppId {
            common: TableEntryCommon::named(name),
        }
    }

    /// The "ACAD" application ID every drawing registers
    pub fn acad() -> Self {
        Self::new("ACAD")
    }
}

impl TableEntry for AppId {
    const TABLE_NAME: &'static str = "APPID";
    const SUBCLASS_MARKER: &'static str = "AcDbRegAppTableRecord";

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, _pair: &CodePair) {}

    fn write_specific_pairs(&self, _version: DxfVersion, _pairs: &mut Vec<CodePair>) {}
}
