//! Arc entity

use super::{double_value, Circle, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// A circular arc; angles are in degrees, counter-clockwise
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub circle: Circle,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new() -> Self {
        Arc {
            circle: Circle::new(),
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    pub fn from_center_radius_angles(center: Vector3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            circle: Circle::from_center_radius(center, radius),
            start_angle,
            end_angle,
        }
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Arc {
    fn common(&self) -> &EntityCommon {
        &self.circle.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.circle.common
    }

    fn entity_type(&self) -> &'static str {
        "ARC"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if self.circle.apply_circle_pair(pair) {
            return;
        }
        match pair.code {
            50 => self.start_angle = double_value(pair),
            51 => self.end_angle = double_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        self.circle.write_circle_pairs(version, pairs);
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbArc"));
        }
        pairs.push(CodePair::double(50, self.start_angle));
        pairs.push(CodePair::double(51, self.end_angle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_subclasses_r2000() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 2.0, 0.0, 90.0);
        let pairs = arc.code_pairs(DxfVersion::R2000);
        let markers: Vec<_> = pairs
            .iter()
            .filter(|p| p.code == 100)
            .filter_map(|p| p.as_str())
            .collect();
        assert_eq!(markers, ["AcDbEntity", "AcDbCircle", "AcDbArc"]);
        assert_eq!(pairs.last(), Some(&CodePair::double(51, 90.0)));
    }
}
