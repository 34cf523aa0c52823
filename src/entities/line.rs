//! Line entity

use super::{apply_point, double_value, push_normal, push_point, push_thickness, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// A line segment between two points
///
/// Legacy `3DLINE` records are read into this type as well.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub common: EntityCommon,
    pub start: Vector3,
    pub end: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Line {
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Create a new line from two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "LINE"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.start, 10, pair)
            || apply_point(&mut self.end, 11, pair)
            || apply_point(&mut self.normal, 210, pair)
        {
            return;
        }
        if pair.code == 39 {
            self.thickness = double_value(pair);
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbLine"));
        }
        push_thickness(pairs, self.thickness);
        push_point(pairs, 10, self.start);
        push_point(pairs, 11, self.end);
        push_normal(pairs, version, self.normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_pairs_r12() {
        let line = Line::from_points(Vector3::ZERO, Vector3::new(1.0, 1.0, 0.0));
        let pairs = line.code_pairs(DxfVersion::R12);
        assert_eq!(pairs[0], CodePair::string(0, "LINE"));
        assert_eq!(pairs[1], CodePair::string(8, "0"));
        assert_eq!(pairs[2], CodePair::double(10, 0.0));
        assert_eq!(pairs[5], CodePair::double(11, 1.0));
        assert_eq!(pairs.len(), 8);
    }

    #[test]
    fn test_apply_pairs() {
        let mut line = Line::new();
        for pair in [
            CodePair::double(10, 1.0),
            CodePair::double(21, 2.0),
            CodePair::double(39, 0.5),
            CodePair::string(999, "ignored"),
        ] {
            line.try_apply_code_pair(&pair);
        }
        assert_eq!(line.start, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(line.end, Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(line.thickness, 0.5);
    }
}
