//! Point entity

use super::{apply_point, double_value, push_normal, push_point, push_thickness, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// A point entity in 3D space
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub common: EntityCommon,
    pub location: Vector3,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    pub normal: Vector3,
}

impl Point {
    /// Create a new point at the origin
    pub fn new() -> Self {
        Point {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Create a new point at a specific location
    pub fn at(location: Vector3) -> Self {
        Point {
            location,
            ..Self::new()
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Point {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "POINT"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.location, 10, pair) || apply_point(&mut self.normal, 210, pair) {
            return;
        }
        if pair.code == 39 {
            self.thickness = double_value(pair);
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbPoint"));
        }
        push_point(pairs, 10, self.location);
        push_thickness(pairs, self.thickness);
        push_normal(pairs, version, self.normal);
    }
}
