//! Layer table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// Layer flag bits (code 70)
pub mod layer_flags {
    pub const FROZEN: i16 = 1;
    pub const FROZEN_IN_NEW_VIEWPORTS: i16 = 2;
    pub const LOCKED: i16 = 4;
}

/// Line weight meaning "use the default"
pub const LINE_WEIGHT_DEFAULT: i16 = -3;

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub common: TableEntryCommon,
    /// ACI color; a negative value means the layer is off
    pub color: i16,
    pub line_type: String,
    pub is_plottable: bool,
    /// Hundredths of a millimetre, or one of the negative sentinels
    pub line_weight: i16,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            common: TableEntryCommon::named(name),
            color: 7,
            line_type: "CONTINUOUS".to_string(),
            is_plottable: true,
            line_weight: LINE_WEIGHT_DEFAULT,
        }
    }

    pub fn is_off(&self) -> bool {
        self.color < 0
    }

    pub fn is_frozen(&self) -> bool {
        self.common.flags & layer_flags::FROZEN != 0
    }

    pub fn is_locked(&self) -> bool {
        self.common.flags & layer_flags::LOCKED != 0
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for Layer {
    const TABLE_NAME: &'static str = "LAYER";
    const SUBCLASS_MARKER: &'static str = "AcDbLayerTableRecord";

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        match pair.code {
            6 => self.line_type = pair.as_str().unwrap_or_default().to_string(),
            62 => self.color = pair.as_i16().unwrap_or(7),
            290 => self.is_plottable = pair.as_bool().unwrap_or(true),
            370 => self.line_weight = pair.as_i16().unwrap_or(LINE_WEIGHT_DEFAULT),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::short(62, self.color));
        pairs.push(CodePair::string(6, self.line_type.as_str()));
        if version >= DxfVersion::R2000 {
            pairs.push(CodePair::bool(290, self.is_plottable));
            pairs.push(CodePair::short(370, self.line_weight));
        }
    }
}
