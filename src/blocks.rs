//! Block definitions from the BLOCKS section

use crate::entities::{apply_point, push_point, string_value, EntityType};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Handle, Vector3};

/// A named block: the `BLOCK` record, its entities and the closing `ENDBLK`
///
/// The `BLOCK` and `ENDBLK` records each carry their own handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub handle: Handle,
    pub end_handle: Handle,
    pub layer: String,
    /// Block name (should match the BlockRecord name)
    pub name: String,
    pub base_point: Vector3,
    /// 1 = anonymous, 2 = has attributes, 4 = xref
    pub flags: i16,
    pub xref_path_name: String,
    pub description: String,
    pub is_in_paper_space: bool,
    pub entities: Vec<EntityType>,
}

impl Block {
    pub fn new(name: impl Into<String>, base_point: Vector3) -> Self {
        Block {
            handle: Handle::NULL,
            end_handle: Handle::NULL,
            layer: "0".to_string(),
            name: name.into(),
            base_point,
            flags: 0,
            xref_path_name: String::new(),
            description: String::new(),
            is_in_paper_space: false,
            entities: Vec::new(),
        }
    }

    /// Builder: Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Apply one pair of the `BLOCK` record
    pub fn apply_code_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.base_point, 10, pair) {
            return;
        }
        match pair.code {
            1 => self.xref_path_name = string_value(pair),
            2 => self.name = string_value(pair),
            4 => self.description = string_value(pair),
            5 => self.handle = pair.as_handle().unwrap_or(Handle::NULL),
            8 => self.layer = string_value(pair),
            67 => self.is_in_paper_space = pair.as_bool().unwrap_or(false),
            70 => self.flags = pair.as_i16().unwrap_or(0),
            _ => {}
        }
    }

    /// Apply one pair of the `ENDBLK` record
    pub fn apply_end_code_pair(&mut self, pair: &CodePair) {
        if pair.code == 5 {
            self.end_handle = pair.as_handle().unwrap_or(Handle::NULL);
        }
    }

    /// `BLOCK`, the contained entities that fit `version`, then `ENDBLK`
    pub fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        let post_r13 = version >= DxfVersion::R13;
        let mut pairs = vec![CodePair::string(0, "BLOCK")];
        if !self.handle.is_null() {
            pairs.push(CodePair::handle(5, self.handle));
        }
        if post_r13 {
            pairs.push(CodePair::string(100, "AcDbEntity"));
        }
        if self.is_in_paper_space {
            pairs.push(CodePair::short(67, 1));
        }
        pairs.push(CodePair::string(8, self.layer.as_str()));
        if post_r13 {
            pairs.push(CodePair::string(100, "AcDbBlockBegin"));
        }
        pairs.push(CodePair::string(2, self.name.as_str()));
        pairs.push(CodePair::short(70, self.flags));
        push_point(&mut pairs, 10, self.base_point);
        if version >= DxfVersion::R12 {
            pairs.push(CodePair::string(3, self.name.as_str()));
        }
        pairs.push(CodePair::string(1, self.xref_path_name.as_str()));
        if !self.description.is_empty() {
            pairs.push(CodePair::string(4, self.description.as_str()));
        }

        for entity in &self.entities {
            pairs.extend(entity.code_pairs(version));
        }

        pairs.push(CodePair::string(0, "ENDBLK"));
        if !self.end_handle.is_null() {
            pairs.push(CodePair::handle(5, self.end_handle));
        }
        if post_r13 {
            pairs.push(CodePair::string(100, "AcDbEntity"));
        }
        if self.is_in_paper_space {
            pairs.push(CodePair::short(67, 1));
        }
        pairs.push(CodePair::string(8, self.layer.as_str()));
        if post_r13 {
            pairs.push(CodePair::string(100, "AcDbBlockEnd"));
        }
        pairs
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new("", Vector3::ZERO)
    }
}
