//! Viewport configuration table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// A VPORT entry; the active configuration is named `*ACTIVE`
#[derive(Debug, Clone, PartialEq)]
pub struct VPort {
    pub common: TableEntryCommon,
    pub lower_left: (f64, f64),
    pub upper_right: (f64, f64),
    pub view_center: (f64, f64),
    pub view_height: f64,
    pub aspect_ratio: f64,
}

impl VPort {
    pub fn new(name: impl Into<String>) -> Self {
        VPort {
            common: TableEntryCommon::named(name),
            lower_left: (0.0, 0.0),
            upper_right: (1.0, 1.0),
            view_center: (0.0, 0.0),
            view_height: 1.0,
            aspect_ratio: 1.0,
        }
    }

    pub fn active() -> Self {
        Self::new("*ACTIVE")
    }
}

impl Default for VPort {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for VPort {
    const TABLE_NAME: &'static str = "VPORT";
    const SUBCLASS_MARKER: &'static str = "AcDbViewportTableRecord";
    const DUPLICATE_NAMES: bool = true;

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        let value = pair.as_double().unwrap_or(0.0);
        match pair.code {
            10 => self.lower_left.0 = value,
            20 => self.lower_left.1 = value,
            11 => self.upper_right.0 = value,
            21 => self.upper_right.1 = value,
            12 => self.view_center.0 = value,
            22 => self.view_center.1 = value,
            40 => self.view_height = value,
            41 => self.aspect_ratio = value,
            _ => {}
        }
    }

    fn write_specific_pairs(&self, _version: DxfVersion, pairs: &mut Vec<CodePair>) {
        for (code, (x, y)) in [(10, self.lower_left), (11, self.upper_right), (12, self.view_center)] {
            pairs.push(CodePair::double(code, x));
            pairs.push(CodePair::double(code + 10, y));
        }
        pairs.push(CodePair::double(40, self.view_height));
        pairs.push(CodePair::double(41, self.aspect_ratio));
    }
}
