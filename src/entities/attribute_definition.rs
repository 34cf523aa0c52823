//! Attribute definition inside a block

use super::{short_value, string_value, Entity, EntityCommon, MText, TextData};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// An `ATTDEF` record: the template an [`super::Attribute`] is filled from
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    pub common: EntityCommon,
    pub text: TextData,
    pub prompt: String,
    pub tag: String,
    pub flags: i16,
    pub field_length: i16,
    pub vertical_justification: i16,
    pub m_text: Option<Box<MText>>,
}

impl AttributeDefinition {
    pub fn new() -> Self {
        AttributeDefinition {
            common: EntityCommon::new(),
            text: TextData::new(),
            prompt: String::new(),
            tag: String::new(),
            flags: 0,
            field_length: 0,
            vertical_justification: 0,
            m_text: None,
        }
    }

    pub fn with_tag(tag: impl Into<String>, prompt: impl Into<String>) -> Self {
        let mut definition = Self::new();
        definition.tag = tag.into();
        definition.prompt = prompt.into();
        definition
    }
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for AttributeDefinition {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "ATTDEF"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if self.text.apply_pair(pair) {
            return;
        }
        match pair.code {
            2 => self.tag = string_value(pair),
            3 => self.prompt = string_value(pair),
            70 => self.flags = short_value(pair),
            73 => self.field_length = short_value(pair),
            74 => self.vertical_justification = short_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        self.text.write_pairs(version, pairs);
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbAttributeDefinition"));
        }
        pairs.push(CodePair::string(3, self.prompt.as_str()));
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
