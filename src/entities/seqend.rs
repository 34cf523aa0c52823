//! Sequence end marker

use super::{Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// Closes the vertex list of a polyline or the attribute list of an insert
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Seqend {
    pub common: EntityCommon,
}

impl Seqend {
    pub fn new() -> Self {
        Seqend {
            common: EntityCommon::new(),
        }
    }
}

impl Entity for Seqend {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "SEQEND"
    }

    fn apply_specific_pair(&mut self, _pair: &CodePair) {}

    fn write_specific_pairs(&self, _version: DxfVersion, _pairs: &mut Vec<CodePair>) {}
}
