//! Attribute instance attached to a block insert

use super::{short_value, string_value, Entity, EntityCommon, MText, TextData};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// Attribute flag bits (code 70)
pub mod attribute_flags {
    pub const INVISIBLE: i16 = 1;
    pub const CONSTANT: i16 = 2;
    pub const VERIFICATION_REQUIRED: i16 = 4;
    pub const PRESET: i16 = 8;
}

/// An `ATTRIB` record
///
/// A directly following `MTEXT` record is absorbed into `m_text` when the
/// entity list is grouped.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub common: EntityCommon,
    pub text: TextData,
    pub tag: String,
    pub flags: i16,
    pub field_length: i16,
    pub vertical_justification: i16,
    pub m_text: Option<Box<MText>>,
}

impl Attribute {
    pub fn new() -> Self {
        Attribute {
            common: EntityCommon::new(),
            text: TextData::new(),
            tag: String::new(),
            flags: 0,
            field_length: 0,
            vertical_justification: 0,
            m_text: None,
        }
    }

    pub fn with_tag(tag: impl Into<String>, value: impl Into<String>) -> Self {
        let mut attribute = Self::new();
        attribute.tag = tag.into();
        attribute.text.value = value.into();
        attribute
    }

    pub fn is_invisible(&self) -> bool {
        self.flags & attribute_flags::INVISIBLE != 0
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Attribute {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "ATTRIB"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if self.text.apply_pair(pair) {
            return;
        }
        match pair.code {
            2 => self.tag = string_value(pair),
            70 => self.flags = short_value(pair),
            73 => self.field_length = short_value(pair),
            74 => self.vertical_justification = short_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        self.text.write_pairs(version, pairs);
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbAttribute"));
        }
        pairs.push(CodePair::string(2, self.tag.as_str()));
        pairs.push(CodePair::short(70, self.flags));
        if self.field_length != 0 {
            pairs.push(CodePair::short(73, self.field_length));
        }
        if self.vertical_justification != 0 {
            pairs.push(CodePair::short(74, self.vertical_justification));
        }
    }
}
