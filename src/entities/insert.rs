//! Block reference entity

use super::{apply_point, double_value, push_normal, push_point, short_value, string_value, Attribute, Entity, EntityCommon, Seqend};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// An `INSERT` record together with the attributes that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub common: EntityCommon,
    /// Code 66; set when `ATTRIB` records follow in the file
    pub has_attributes: bool,
    pub block_name: String,
    pub location: Vector3,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
    /// Degrees
    pub rotation: f64,
    pub column_count: i16,
    pub row_count: i16,
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub normal: Vector3,
    pub attributes: Vec<Attribute>,
    pub seqend: Option<Seqend>,
}

impl Insert {
    pub fn new() -> Self {
        Insert {
            common: EntityCommon::new(),
            has_attributes: false,
            block_name: String::new(),
            location: Vector3::ZERO,
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            rotation: 0.0,
            column_count: 1,
            row_count: 1,
            column_spacing: 0.0,
            row_spacing: 0.0,
            normal: Vector3::UNIT_Z,
            attributes: Vec::new(),
            seqend: None,
        }
    }

    pub fn with_block(block_name: impl Into<String>, location: Vector3) -> Self {
        Insert {
            block_name: block_name.into(),
            location,
            ..Self::new()
        }
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.has_attributes = true;
        self.attributes.push(attribute);
    }

    pub fn attribute(&self, tag: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.tag.eq_ignore_ascii_case(tag))
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "INSERT"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.location, 10, pair) || apply_point(&mut self.normal, 210, pair) {
            return;
        }
        match pair.code {
            2 => self.block_name = string_value(pair),
            41 => self.x_scale = double_value(pair),
            42 => self.y_scale = double_value(pair),
            43 => self.z_scale = double_value(pair),
            44 => self.column_spacing = double_value(pair),
            45 => self.row_spacing = double_value(pair),
            50 => self.rotation = double_value(pair),
            66 => self.has_attributes = pair.as_bool().unwrap_or(false),
            70 => self.column_count = short_value(pair),
            71 => self.row_count = short_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbBlockReference"));
        }
        if self.has_attributes || !self.attributes.is_empty() {
            pairs.push(CodePair::short(66, 1));
        }
        pairs.push(CodePair::string(2, self.block_name.as_str()));
        push_point(pairs, 10, self.location);
        for (code, scale) in [(41, self.x_scale), (42, self.y_scale), (43, self.z_scale)] {
            if scale != 1.0 {
                pairs.push(CodePair::double(code, scale));
            }
        }
        if self.rotation != 0.0 {
            pairs.push(CodePair::double(50, self.rotation));
        }
        if self.column_count != 1 {
            pairs.push(CodePair::short(70, self.column_count));
        }
        if self.row_count != 1 {
            pairs.push(CodePair::short(71, self.row_count));
        }
        if self.column_spacing != 0.0 {
            pairs.push(CodePair::double(44, self.column_spacing));
        }
        if self.row_spacing != 0.0 {
            pairs.push(CodePair::double(45, self.row_spacing));
        }
        push_normal(pairs, version, self.normal);
    }
}
