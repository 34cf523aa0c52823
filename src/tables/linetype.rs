//! Line type table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// A line type table entry
///
/// The pattern is a list of dash lengths: positive is a dash, negative a
/// gap, zero a dot.
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    pub common: TableEntryCommon,
    pub description: String,
    pub dash_lengths: Vec<f64>,
}

impl LineType {
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            common: TableEntryCommon::named(name),
            description: String::new(),
            dash_lengths: Vec::new(),
        }
    }

    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..Self::new("CONTINUOUS")
        }
    }

    pub fn pattern_length(&self) -> f64 {
        self.dash_lengths.iter().map(|d| d.abs()).sum()
    }

    pub fn is_continuous(&self) -> bool {
        self.dash_lengths.is_empty()
    }
}

impl Default for LineType {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for LineType {
    const TABLE_NAME: &'static str = "LTYPE";
    const SUBCLASS_MARKER: &'static str = "AcDbLinetypeTableRecord";

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        match pair.code {
            3 => self.description = pair.as_str().unwrap_or_default().to_string(),
            49 => self.dash_lengths.push(pair.as_double().unwrap_or(0.0)),
            // alignment, element count and total length are derived
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::string(3, self.description.as_str()));
        pairs.push(CodePair::short(72, i16::from(b'A')));
        pairs.push(CodePair::short(73, i16::try_from(self.dash_lengths.len()).unwrap_or(i16::MAX)));
        pairs.push(CodePair::double(40, self.pattern_length()));
        for &length in &self.dash_lengths {
            pairs.push(CodePair::double(49, length));
            if version >= DxfVersion::R13 {
                pairs.push(CodePair::short(74, 0));
            }
        }
    }
}
