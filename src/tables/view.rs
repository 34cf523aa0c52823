//! Named view table entry

use super::{TableEntry, TableEntryCommon};
use crate::entities::{apply_point, push_point};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub common: TableEntryCommon,
    pub height: f64,
    pub width: f64,
    /// Only x and y are written
    pub center: Vector3,
    pub direction: Vector3,
    pub target: Vector3,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        View {
            common: TableEntryCommon::named(name),
            height: 1.0,
            width: 1.0,
            center: Vector3::ZERO,
            direction: Vector3::UNIT_Z,
            target: Vector3::ZERO,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for View {
    const TABLE_NAME: &'static str = "VIEW";
    const SUBCLASS_MARKER: &'static str = "AcDbViewTableRecord";

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.direction, 11, pair) || apply_point(&mut self.target, 12, pair) {
            return;
        }
        let double = pair.as_double().unwrap_or(0.0);
        match pair.code {
            10 => self.center.x = double,
            20 => self.center.y = double,
            40 => self.height = double,
            41 => self.width = double,
            _ => {}
        }
    }

    fn write_specific_pairs(&self, _version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::double(40, self.height));
        pairs.push(CodePair::double(10, self.center.x));
        pairs.push(CodePair::double(20, self.center.y));
        pairs.push(CodePair::double(41, self.width));
        push_point(pairs, 11, self.direction);
        push_point(pairs, 12, self.target);
    }
}
