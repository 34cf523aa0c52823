//! Dimension style table entry

use super::{TableEntry, TableEntryCommon};
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// A DIMSTYLE entry with the most commonly used variables
#[derive(Debug, Clone, PartialEq)]
pub struct DimStyle {
    pub common: TableEntryCommon,
    /// DIMPOST: prefix/suffix for the measurement
    pub dimension_post: String,
    /// DIMSCALE
    pub scale_factor: f64,
    /// DIMASZ
    pub arrow_size: f64,
    /// DIMEXO
    pub extension_line_offset: f64,
    /// DIMEXE
    pub extension_line_extension: f64,
    /// DIMTXT
    pub text_height: f64,
    /// DIMGAP
    pub text_gap: f64,
}

impl DimStyle {
    pub fn new(name: impl Into<String>) -> Self {
        DimStyle {
            common: TableEntryCommon::named(name),
            dimension_post: String::new(),
            scale_factor: 1.0,
            arrow_size: 0.18,
            extension_line_offset: 0.0625,
            extension_line_extension: 0.18,
            text_height: 0.18,
            text_gap: 0.09,
        }
    }
}

impl Default for DimStyle {
    fn default() -> Self {
        Self::new("")
    }
}

impl TableEntry for DimStyle {
    const TABLE_NAME: &'static str = "DIMSTYLE";
    const SUBCLASS_MARKER: &'static str = "AcDbDimStyleTableRecord";
    const HANDLE_CODE: i32 = 105;

    fn common(&self) -> &TableEntryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut TableEntryCommon {
        &mut self.common
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        let double = || pair.as_double().unwrap_or(0.0);
        match pair.code {
            3 => self.dimension_post = pair.as_str().unwrap_or_default().to_string(),
            40 => self.scale_factor = double(),
            41 => self.arrow_size = double(),
            42 => self.extension_line_offset = double(),
            44 => self.extension_line_extension = double(),
            140 => self.text_height = double(),
            147 => self.text_gap = double(),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, _version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::string(3, self.dimension_post.as_str()));
        pairs.push(CodePair::double(40, self.scale_factor));
        pairs.push(CodePair::double(41, self.arrow_size));
        pairs.push(CodePair::double(42, self.extension_line_offset));
        pairs.push(CodePair::double(44, self.extension_line_extension));
        pairs.push(CodePair::double(140, self.text_height));
        pairs.push(CodePair::double(147, self.text_gap));
    }
}
