//! Filled triangle or quadrilateral

use super::{apply_point, double_value, push_normal, push_point, push_thickness, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// A `SOLID` record; a triangle repeats its third corner as the fourth
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub common: EntityCommon,
    pub first_corner: Vector3,
    pub second_corner: Vector3,
    pub third_corner: Vector3,
    pub fourth_corner: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Solid {
    pub fn new() -> Self {
        Solid {
            common: EntityCommon::new(),
            first_corner: Vector3::ZERO,
            second_corner: Vector3::ZERO,
            third_corner: Vector3::ZERO,
            fourth_corner: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn triangle(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Solid {
            first_corner: a,
            second_corner: b,
            third_corner: c,
            fourth_corner: c,
            ..Self::new()
        }
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Solid {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "SOLID"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        let applied = apply_point(&mut self.first_corner, 10, pair)
            || apply_point(&mut self.second_corner, 11, pair)
            || apply_point(&mut self.third_corner, 12, pair)
            || apply_point(&mut self.fourth_corner, 13, pair)
            || apply_point(&mut self.normal, 210, pair);
        if !applied && pair.code == 39 {
            self.thickness = double_value(pair);
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbTrace"));
        }
        push_point(pairs, 10, self.first_corner);
        push_point(pairs, 11, self.second_corner);
        push_point(pairs, 12, self.third_corner);
        push_point(pairs, 13, self.fourth_corner);
        push_thickness(pairs, self.thickness);
        push_normal(pairs, version, self.normal);
    }
}
