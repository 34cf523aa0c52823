//! Circle entity

use super::{apply_point, double_value, push_normal, push_point, push_thickness, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub normal: Vector3,
}

impl Circle {
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Self::new()
        }
    }

    /// Apply the pairs shared with [`super::Arc`]
    pub(crate) fn apply_circle_pair(&mut self, pair: &CodePair) -> bool {
        if apply_point(&mut self.center, 10, pair) || apply_point(&mut self.normal, 210, pair) {
            return true;
        }
        match pair.code {
            39 => self.thickness = double_value(pair),
            40 => self.radius = double_value(pair),
            _ => return false,
        }
        true
    }

    pub(crate) fn write_circle_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbCircle"));
        }
        push_thickness(pairs, self.thickness);
        push_point(pairs, 10, self.center);
        pairs.push(CodePair::double(40, self.radius));
        push_normal(pairs, version, self.normal);
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Circle {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "CIRCLE"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        self.apply_circle_pair(pair);
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        self.write_circle_pairs(version, pairs);
    }
}
