//! Heavy polyline and its vertices

use super::{
    apply_point, double_value, push_normal, push_point, push_thickness, short_value, Entity, EntityCommon, Seqend,
};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// Polyline flag bits (code 70)
pub mod polyline_flags {
    pub const CLOSED: i16 = 1;
    pub const CURVE_FIT: i16 = 2;
    pub const SPLINE_FIT: i16 = 4;
    pub const POLYLINE_3D: i16 = 8;
    pub const POLYGON_MESH: i16 = 16;
    pub const POLYFACE_MESH: i16 = 64;
}

/// A `POLYLINE` record with the `VERTEX` records that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub common: EntityCommon,
    /// Only z is meaningful: the elevation
    pub location: Vector3,
    pub flags: i16,
    pub default_start_width: f64,
    pub default_end_width: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<Vertex>,
    pub seqend: Option<Seqend>,
}

impl Polyline {
    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            flags: 0,
            default_start_width: 0.0,
            default_end_width: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
            seqend: None,
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vector3>) -> Self {
        let mut polyline = Self::new();
        polyline.vertices = points.into_iter().map(Vertex::at).collect();
        polyline
    }

    pub fn is_closed(&self) -> bool {
        self.flags & polyline_flags::CLOSED != 0
    }

    pub fn is_3d(&self) -> bool {
        self.flags & polyline_flags::POLYLINE_3D != 0
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Polyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "POLYLINE"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.location, 10, pair) || apply_point(&mut self.normal, 210, pair) {
            return;
        }
        match pair.code {
            39 => self.thickness = double_value(pair),
            40 => self.default_start_width = double_value(pair),
            41 => self.default_end_width = double_value(pair),
            70 => self.flags = short_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            let subclass = if self.is_3d() { "AcDb3dPolyline" } else { "AcDb2dPolyline" };
            pairs.push(CodePair::string(100, subclass));
        }
        pairs.push(CodePair::short(66, 1));
        push_point(pairs, 10, self.location);
        push_thickness(pairs, self.thickness);
        pairs.push(CodePair::short(70, self.flags));
        if self.default_start_width != 0.0 {
            pairs.push(CodePair::double(40, self.default_start_width));
        }
        if self.default_end_width != 0.0 {
            pairs.push(CodePair::double(41, self.default_end_width));
        }
        push_normal(pairs, version, self.normal);
    }
}

/// A `VERTEX` record
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub common: EntityCommon,
    pub location: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
    /// 32 marks a 3D polyline vertex
    pub flags: i16,
}

impl Vertex {
    pub fn new() -> Self {
        Vertex {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            start_width: 0.0,
            end_width: 0.0,
            bulge: 0.0,
            flags: 0,
        }
    }

    pub fn at(location: Vector3) -> Self {
        Vertex {
            location,
            ..Self::new()
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Vertex {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "VERTEX"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.location, 10, pair) {
            return;
        }
        match pair.code {
            40 => self.start_width = double_value(pair),
            41 => self.end_width = double_value(pair),
            42 => self.bulge = double_value(pair),
            70 => self.flags = short_value(pair),
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbVertex"));
            let subclass = if self.flags & 32 != 0 { "AcDb3dPolylineVertex" } else { "AcDb2dVertex" };
            pairs.push(CodePair::string(100, subclass));
        }
        push_point(pairs, 10, self.location);
        if self.start_width != 0.0 {
            pairs.push(CodePair::double(40, self.start_width));
        }
        if self.end_width != 0.0 {
            pairs.push(CodePair::double(41, self.end_width));
        }
        if self.bulge != 0.0 {
            pairs.push(CodePair::double(42, self.bulge));
        }
        pairs.push(CodePair::short(70, self.flags));
    }
}
