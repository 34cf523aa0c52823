//! Multi-line text entity

use super::{apply_point, double_value, push_normal, push_point, short_value, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// Longest run written in a single `3` or `1` pair
const TEXT_CHUNK_LEN: usize = 250;

#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pub common: EntityCommon,
    pub insertion_point: Vector3,
    pub initial_text_height: f64,
    pub reference_rectangle_width: f64,
    /// 1 = top left ... 9 = bottom right
    pub attachment_point: i16,
    /// 1 = left to right, 3 = top to bottom, 5 = by style
    pub drawing_direction: i16,
    /// Full text; split into `3` chunks and a final `1` on write
    pub text: String,
    pub style: String,
    pub normal: Vector3,
    /// Degrees
    pub rotation: f64,
}

impl MText {
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            insertion_point: Vector3::ZERO,
            initial_text_height: 1.0,
            reference_rectangle_width: 0.0,
            attachment_point: 1,
            drawing_direction: 1,
            text: String::new(),
            style: "STANDARD".to_string(),
            normal: Vector3::UNIT_Z,
            rotation: 0.0,
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        MText {
            text: text.into(),
            ..Self::new()
        }
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "MTEXT"
    }

    fn min_version(&self) -> DxfVersion {
        DxfVersion::R13
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.insertion_point, 10, pair) || apply_point(&mut self.normal, 210, pair) {
            return;
        }
        match pair.code {
            1 | 3 => self.text.push_str(pair.as_str().unwrap_or_default()),
            7 => self.style = pair.as_str().unwrap_or_default().to_string(),
            40 => self.initial_text_height = double_value(pair),
            41 => self.reference_rectangle_width = double_value(pair),
            50 => self.rotation = double_value(pair),
            71 => self.attachment_point = short_value(pair),
            72 => self.drawing_direction = short_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::string(100, "AcDbMText"));
        push_point(pairs, 10, self.insertion_point);
        pairs.push(CodePair::double(40, self.initial_text_height));
        pairs.push(CodePair::double(41, self.reference_rectangle_width));
        pairs.push(CodePair::short(71, self.attachment_point));
        pairs.push(CodePair::short(72, self.drawing_direction));

        let chars: Vec<char> = self.text.chars().collect();
        let mut chunks: Vec<String> = chars.chunks(TEXT_CHUNK_LEN).map(|c| c.iter().collect()).collect();
        let last = chunks.pop().unwrap_or_default();
        for chunk in chunks {
            pairs.push(CodePair::string(3, chunk));
        }
        pairs.push(CodePair::string(1, last));

        if !self.style.eq_ignore_ascii_case("STANDARD") {
            pairs.push(CodePair::string(7, self.style.as_str()));
        }
        push_normal(pairs, version, self.normal);
        if self.rotation != 0.0 {
            pairs.push(CodePair::double(50, self.rotation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_text_is_chunked() {
        let text = "x".repeat(600);
        let m_text = MText::with_text(text.clone());
        let pairs = m_text.code_pairs(DxfVersion::R2000);
        let chunks: Vec<&CodePair> = pairs.iter().filter(|p| p.code == 3 || p.code == 1).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].code, 3);
        assert_eq!(chunks[2].code, 1);
        assert_eq!(chunks[2].as_str().map(str::len), Some(100));

        let mut back = MText::new();
        for pair in &pairs {
            back.try_apply_code_pair(pair);
        }
        assert_eq!(back.text, text);
    }

    #[test]
    fn test_not_written_before_r13() {
        assert!(!MText::new().is_supported_on(DxfVersion::R12));
    }
}
