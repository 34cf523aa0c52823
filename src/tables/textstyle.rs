//! Text style table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub common: TableEntryCommon,
    /// Fixed height; 0 means variable
    pub height: f64,
    pub width_factor: f64,
    pub oblique_angle: f64,
    /// 2 = backward, 4 = upside down
    pub generation_flags: i16,
    pub last_height: f64,
    pub font_file: String,
    pub big_font_file: String,
}

impl TextStyle {
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            common: TableEntryCommon::named(name),
            height: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            generation_flags: 0,
            last_height: 0.2,
            font_file: "txt".to_string(),
            big_font_file: String::new(),
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for TextStyle {
    const TABLE_NAME: &'static str = "STYLE";
    const SUBCLASS_MARKER: &'static str = "AcDbTextStyleTableRecord";

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        let double = || pair.as_double().unwrap_or(0.0);
        match pair.code {
            3 => self.font_file = pair.as_str().unwrap_or_default().to_string(),
            4 => self.big_font_file = pair.as_str().unwrap_or_default().to_string(),
            40 => self.height = double(),
            41 => self.width_factor = double(),
            42 => self.last_height = double(),
            50 => self.oblique_angle = double(),
            71 => self.generation_flags = pair.as_i16().unwrap_or(0),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, _version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::double(40, self.height));
        pairs.push(CodePair::double(41, self.width_factor));
        pairs.push(CodePair::double(50, self.oblique_angle));
        pairs.push(CodePair::short(71, self.generation_flags));
        pairs.push(CodePair::double(42, self.last_height));
        pairs.push(CodePair::string(3, self.font_file.as_str()));
        pairs.push(CodePair::string(4, self.big_font_file.as_str()));
    }
}
