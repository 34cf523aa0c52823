//! Single-line text entity and the text properties shared with attributes

use super::{
    apply_point, double_value, push_normal, push_point, push_thickness, short_value, string_value, Entity,
    EntityCommon,
};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// Text properties common to `TEXT`, `ATTRIB` and `ATTDEF`
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    pub location: Vector3,
    pub height: f64,
    pub value: String,
    /// Degrees
    pub rotation: f64,
    pub relative_x_scale: f64,
    /// Degrees
    pub oblique_angle: f64,
    pub style: String,
    /// 2 = backward, 4 = upside down
    pub generation_flags: i16,
    pub horizontal_justification: i16,
    pub second_alignment_point: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl TextData {
    pub fn new() -> Self {
        TextData {
            location: Vector3::ZERO,
            height: 1.0,
            value: String::new(),
            rotation: 0.0,
            relative_x_scale: 1.0,
            oblique_angle: 0.0,
            style: "STANDARD".to_string(),
            generation_flags: 0,
            horizontal_justification: 0,
            second_alignment_point: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    pub(crate) fn apply_pair(&mut self, pair: &CodePair) -> bool {
        if apply_point(&mut self.location, 10, pair)
            || apply_point(&mut self.second_alignment_point, 11, pair)
            || apply_point(&mut self.normal, 210, pair)
        {
            return true;
        }
        match pair.code {
            1 => self.value = string_value(pair),
            7 => self.style = string_value(pair),
            39 => self.thickness = double_value(pair),
            40 => self.height = double_value(pair),
            41 => self.relative_x_scale = double_value(pair),
            50 => self.rotation = double_value(pair),
            51 => self.oblique_angle = double_value(pair),
            71 => self.generation_flags = short_value(pair),
            72 => self.horizontal_justification = short_value(pair),
            _ => return false,
        }
        true
    }

    /// Writes the `AcDbText` subclass block
    pub(crate) fn write_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbText"));
        }
        push_thickness(pairs, self.thickness);
        push_point(pairs, 10, self.location);
        pairs.push(CodePair::double(40, self.height));
        pairs.push(CodePair::string(1, self.value.as_str()));
        if self.rotation != 0.0 {
            pairs.push(CodePair::double(50, self.rotation));
        }
        if self.relative_x_scale != 1.0 {
            pairs.push(CodePair::double(41, self.relative_x_scale));
        }
        if self.oblique_angle != 0.0 {
            pairs.push(CodePair::double(51, self.oblique_angle));
        }
        if !self.style.eq_ignore_ascii_case("STANDARD") {
            pairs.push(CodePair::string(7, self.style.as_str()));
        }
        if self.generation_flags != 0 {
            pairs.push(CodePair::short(71, self.generation_flags));
        }
        if self.horizontal_justification != 0 {
            pairs.push(CodePair::short(72, self.horizontal_justification));
        }
        if self.second_alignment_point != Vector3::ZERO {
            push_point(pairs, 11, self.second_alignment_point);
        }
        push_normal(pairs, version, self.normal);
    }
}

impl Default for TextData {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    pub text: TextData,
    pub vertical_justification: i16,
}

impl Text {
    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            text: TextData::new(),
            vertical_justification: 0,
        }
    }

    pub fn with_value(value: impl Into<String>, location: Vector3, height: f64) -> Self {
        let mut text = Self::new();
        text.text.value = value.into();
        text.text.location = location;
        text.text.height = height;
        text
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Text {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "TEXT"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if !self.text.apply_pair(pair) && pair.code == 73 {
            self.vertical_justification = short_value(pair);
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        self.text.write_pairs(version, pairs);
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbText"));
        }
        if self.vertical_justification != 0 {
            pairs.push(CodePair::short(73, self.vertical_justification));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_omitted() {
        let text = Text::with_value("Hi", Vector3::ZERO, 2.5);
        let codes: Vec<i32> = text.code_pairs(DxfVersion::R12).iter().map(|p| p.code).collect();
        assert_eq!(codes, [0, 8, 10, 20, 30, 40, 1]);
    }

    #[test]
    fn test_justification_round_trip_fields() {
        let mut text = Text::new();
        for pair in [
            CodePair::short(72, 1),
            CodePair::short(73, 2),
            CodePair::double(11, 4.0),
            CodePair::string(7, "ROMANS"),
        ] {
            text.try_apply_code_pair(&pair);
        }
        assert_eq!(text.text.horizontal_justification, 1);
        assert_eq!(text.vertical_justification, 2);
        assert_eq!(text.text.second_alignment_point.x, 4.0);
        assert_eq!(text.text.style, "ROMANS");
    }
}
