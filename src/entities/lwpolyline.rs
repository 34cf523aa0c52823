//! Lightweight polyline entity

use super::{apply_point, double_value, push_normal, push_thickness, short_value, Entity, EntityCommon};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// One vertex of a [`LwPolyline`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LwVertex {
    pub x: f64,
    pub y: f64,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
}

impl LwVertex {
    pub fn new(x: f64, y: f64) -> Self {
        LwVertex {
            x,
            y,
            ..Default::default()
        }
    }
}

/// An `LWPOLYLINE` record; vertices are stored inline, one `10` pair each
#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    /// 1 = closed, 128 = plinegen
    pub flags: i16,
    pub constant_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<LwVertex>,
}

impl LwPolyline {
    pub fn new() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            flags: 0,
            constant_width: 0.0,
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut polyline = Self::new();
        polyline.vertices = points.into_iter().map(|(x, y)| LwVertex::new(x, y)).collect();
        polyline
    }

    pub fn is_closed(&self) -> bool {
        self.flags & 1 != 0
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for LwPolyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "LWPOLYLINE"
    }

    fn min_version(&self) -> DxfVersion {
        DxfVersion::R14
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if apply_point(&mut self.normal, 210, pair) {
            return;
        }
        match pair.code {
            // a new vertex starts at every x coordinate
            10 => self.vertices.push(LwVertex::new(double_value(pair), 0.0)),
            20 => {
                if let Some(v) = self.vertices.last_mut() {
                    v.y = double_value(pair);
                }
            }
            40 | 41 | 42 => {
                if let Some(v) = self.vertices.last_mut() {
                    let value = double_value(pair);
                    match pair.code {
                        40 => v.start_width = value,
                        41 => v.end_width = value,
                        _ => v.bulge = value,
                    }
                }
            }
            38 => self.elevation = double_value(pair),
            39 => self.thickness = double_value(pair),
            43 => self.constant_width = double_value(pair),
            70 => self.flags = short_value(pair),
            // vertex count; the list itself is authoritative
            90 => {}
            _ => {}
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        pairs.push(CodePair::string(100, "AcDbPolyline"));
        pairs.push(CodePair::int(90, i32::try_from(self.vertices.len()).unwrap_or(i32::MAX)));
        pairs.push(CodePair::short(70, self.flags));
        if self.constant_width != 0.0 {
            pairs.push(CodePair::double(43, self.constant_width));
        }
        if self.elevation != 0.0 {
            pairs.push(CodePair::double(38, self.elevation));
        }
        push_thickness(pairs, self.thickness);
        for vertex in &self.vertices {
            pairs.push(CodePair::double(10, vertex.x));
            pairs.push(CodePair::double(20, vertex.y));
            if vertex.start_width != 0.0 {
                pairs.push(CodePair::double(40, vertex.start_width));
            }
            if vertex.end_width != 0.0 {
                pairs.push(CodePair::double(41, vertex.end_width));
            }
            if vertex.bulge != 0.0 {
                pairs.push(CodePair::double(42, vertex.bulge));
            }
        }
        push_normal(pairs, version, self.normal);
    }
}
