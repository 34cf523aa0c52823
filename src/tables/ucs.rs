//! User coordinate system table entry

use super::{TableEntry, TableEntryCommon};
use crate::entities::{push_point, set_point_axis};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Ucs {
    pub common: TableEntryCommon,
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
}

impl Ucs {
    pub fn new(name: impl Into<String>) -> Self {
        Ucs {
            common: TableEntryCommon::named(name),
            origin: Vector3::ZERO,
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

impl Default for Ucs {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for Ucs {
    const TABLE_NAME: &'static str = "UCS";
    const SUBCLASS_MARKER: &'static str = "AcDbUCSTableRecord";

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        match pair.code {
            10 | 20 | 30 => set_point_axis(&mut self.origin, 10, pair),
            11 | 21 | 31 => set_point_axis(&mut self.x_axis, 11, pair),
            12 | 22 | 32 => set_point_axis(&mut self.y_axis, 12, pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, _version: DxfVersion, pairs: &mut Vec<CodePair>) {
        push_point(pairs, 10, self.origin);
        push_point(pairs, 11, self.x_axis);
        push_point(pairs, 12, self.y_axis);
    }
}
