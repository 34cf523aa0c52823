//! Dimension entity types
//!
//! Every dimension is written as `0/DIMENSION`. The concrete kind is
//! chosen on read from the subclass markers of the record, or from the low
//! bits of code 70 when the record has none (R12 and older).

use super::{apply_point, double_value, push_normal, push_point, set_point_axis, short_value, string_value, Entity, EntityCommon};
use crate::error::{DxfError, Result};
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Vector3};

/// Dimension kind, stored in the low bits of code 70
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionType {
    /// Rotated, horizontal, or vertical linear dimension
    Rotated = 0,
    Aligned = 1,
    /// Angle between two lines
    Angular2Line = 2,
    Diameter = 3,
    Radius = 4,
    /// Angle defined by a vertex and two points
    Angular3Point = 5,
    Ordinate = 6,
}

impl DimensionType {
    /// Mask selecting the kind from a code 70 value
    pub const TYPE_MASK: i16 = 0x0F;

    pub fn from_code(value: i16) -> Option<DimensionType> {
        Some(match value & Self::TYPE_MASK {
            0 => DimensionType::Rotated,
            1 => DimensionType::Aligned,
            2 => DimensionType::Angular2Line,
            3 => DimensionType::Diameter,
            4 => DimensionType::Radius,
            5 => DimensionType::Angular3Point,
            6 => DimensionType::Ordinate,
            _ => return None,
        })
    }

    /// Map a kind-specific subclass marker to its kind
    pub fn from_subclass_marker(marker: &str) -> Option<DimensionType> {
        Some(match marker {
            "AcDbRotatedDimension" => DimensionType::Rotated,
            "AcDbAlignedDimension" => DimensionType::Aligned,
            "AcDb2LineAngularDimension" => DimensionType::Angular2Line,
            "AcDbDiametricDimension" => DimensionType::Diameter,
            "AcDbRadialDimension" => DimensionType::Radius,
            "AcDb3PointAngularDimension" => DimensionType::Angular3Point,
            "AcDbOrdinateDimension" => DimensionType::Ordinate,
            _ => return None,
        })
    }
}

/// Flag bits stored above the kind in code 70
pub mod dimension_flags {
    pub const BLOCK_REFERENCED: i16 = 32;
    pub const ORDINATE_X_TYPE: i16 = 64;
    pub const USER_TEXT_POSITION: i16 = 128;
}

/// Data shared by every dimension kind
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionBase {
    pub common: EntityCommon,
    /// Anonymous block holding the rendered geometry
    pub block_name: String,
    /// Definition point for the dimension line (WCS)
    pub definition_point: Vector3,
    /// Middle point of dimension text (OCS)
    pub text_middle_point: Vector3,
    /// Insertion point for clones of a dimension
    pub insertion_point: Vector3,
    /// Code 70 bits above [`DimensionType::TYPE_MASK`]
    pub flags: i16,
    pub attachment_point: i16,
    /// Explicit text; empty means the measurement, `<>` embeds it
    pub text: String,
    pub text_rotation: f64,
    pub style_name: String,
    pub actual_measurement: f64,
    pub normal: Vector3,
}

impl DimensionBase {
    pub fn new() -> Self {
        DimensionBase {
            common: EntityCommon::new(),
            block_name: String::new(),
            definition_point: Vector3::ZERO,
            text_middle_point: Vector3::ZERO,
            insertion_point: Vector3::ZERO,
            flags: 0,
            attachment_point: 5,
            text: String::new(),
            text_rotation: 0.0,
            style_name: "STANDARD".to_string(),
            actual_measurement: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    fn apply_pair(&mut self, pair: &CodePair) -> bool {
        if apply_point(&mut self.definition_point, 10, pair)
            || apply_point(&mut self.text_middle_point, 11, pair)
            || apply_point(&mut self.insertion_point, 12, pair)
            || apply_point(&mut self.normal, 210, pair)
        {
            return true;
        }
        match pair.code {
            1 => self.text = string_value(pair),
            2 => self.block_name = string_value(pair),
            3 => self.style_name = string_value(pair),
            42 => self.actual_measurement = double_value(pair),
            53 => self.text_rotation = double_value(pair),
            70 => self.flags = short_value(pair) & !DimensionType::TYPE_MASK,
            71 => self.attachment_point = short_value(pair),
            _ => return false,
        }
        true
    }

    fn write_pairs(&self, dimension_type: DimensionType, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(100, "AcDbDimension"));
        }
        pairs.push(CodePair::string(2, self.block_name.as_str()));
        push_point(pairs, 10, self.definition_point);
        push_point(pairs, 11, self.text_middle_point);
        if self.insertion_point != Vector3::ZERO {
            push_point(pairs, 12, self.insertion_point);
        }
        pairs.push(CodePair::short(70, dimension_type as i16 | self.flags));
        if version >= DxfVersion::R2000 {
            pairs.push(CodePair::short(71, self.attachment_point));
        }
        if !self.text.is_empty() {
            pairs.push(CodePair::string(1, self.text.as_str()));
        }
        if self.text_rotation != 0.0 {
            pairs.push(CodePair::double(53, self.text_rotation));
        }
        pairs.push(CodePair::string(3, self.style_name.as_str()));
        if version >= DxfVersion::R2000 {
            pairs.push(CodePair::double(42, self.actual_measurement));
        }
        push_normal(pairs, version, self.normal);
    }
}

impl Default for DimensionBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance between two points, measured parallel to them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionAligned {
    pub base: DimensionBase,
    pub first_point: Vector3,
    pub second_point: Vector3,
}

impl DimensionAligned {
    pub fn new(first_point: Vector3, second_point: Vector3) -> Self {
        DimensionAligned {
            base: DimensionBase::new(),
            first_point,
            second_point,
        }
    }
}

/// Distance between two points, projected onto a rotated axis
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionRotated {
    pub base: DimensionBase,
    pub first_point: Vector3,
    pub second_point: Vector3,
    /// Degrees; 0 is horizontal, 90 vertical
    pub rotation: f64,
    pub extension_line_rotation: f64,
}

impl DimensionRotated {
    pub fn new(first_point: Vector3, second_point: Vector3, rotation: f64) -> Self {
        DimensionRotated {
            base: DimensionBase::new(),
            first_point,
            second_point,
            rotation,
            extension_line_rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionRadius {
    pub base: DimensionBase,
    /// Point on the arc; the center is the definition point
    pub definition_point_2: Vector3,
    pub leader_length: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionDiameter {
    pub base: DimensionBase,
    /// Point on the arc opposite the definition point
    pub definition_point_2: Vector3,
    pub leader_length: f64,
}

/// Angle between two lines (13-14 and 10-15)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionAngular2Line {
    pub base: DimensionBase,
    pub first_point: Vector3,
    pub second_point: Vector3,
    pub third_point: Vector3,
    /// Location of the dimension arc
    pub arc_point: Vector3,
}

/// Angle at `vertex` between `first_point` and `second_point`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionAngular3Point {
    pub base: DimensionBase,
    pub first_point: Vector3,
    pub second_point: Vector3,
    pub vertex: Vector3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionOrdinate {
    pub base: DimensionBase,
    pub feature_location: Vector3,
    pub leader_endpoint: Vector3,
}

impl DimensionOrdinate {
    pub fn is_x_type(&self) -> bool {
        self.base.flags & dimension_flags::ORDINATE_X_TYPE != 0
    }
}

/// Unified dimension enum for all dimension types
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Aligned(DimensionAligned),
    Rotated(DimensionRotated),
    Radius(DimensionRadius),
    Diameter(DimensionDiameter),
    Angular2Line(DimensionAngular2Line),
    Angular3Point(DimensionAngular3Point),
    Ordinate(DimensionOrdinate),
}

impl Dimension {
    /// Create an empty dimension of the given kind
    pub fn new(dimension_type: DimensionType) -> Self {
        match dimension_type {
            DimensionType::Rotated => Dimension::Rotated(DimensionRotated::default()),
            DimensionType::Aligned => Dimension::Aligned(DimensionAligned::default()),
            DimensionType::Angular2Line => Dimension::Angular2Line(DimensionAngular2Line::default()),
            DimensionType::Diameter => Dimension::Diameter(DimensionDiameter::default()),
            DimensionType::Radius => Dimension::Radius(DimensionRadius::default()),
            DimensionType::Angular3Point => Dimension::Angular3Point(DimensionAngular3Point::default()),
            DimensionType::Ordinate => Dimension::Ordinate(DimensionOrdinate::default()),
        }
    }

    /// Build a dimension from the pairs of one `DIMENSION` record.
    ///
    /// `pairs` may start with the `0/DIMENSION` pair. A kind-specific
    /// subclass marker wins over code 70; without either the record is a
    /// rotated dimension. `offset` is the stream position of the record and
    /// is reported if its kind cannot be determined.
    pub fn from_code_pairs(pairs: &[CodePair], offset: u64) -> Result<Dimension> {
        let dimension_type = match Self::type_from_markers(pairs) {
            Some(t) => t,
            None => Self::type_from_flags(pairs, offset)?,
        };
        let mut dimension = Dimension::new(dimension_type);
        for pair in pairs.iter().filter(|p| p.code != 0) {
            dimension.try_apply_code_pair(pair);
        }
        Ok(dimension)
    }

    fn type_from_markers(pairs: &[CodePair]) -> Option<DimensionType> {
        let markers: Vec<DimensionType> = pairs
            .iter()
            .filter(|p| p.code == 100)
            .filter_map(|p| p.as_str())
            .filter_map(DimensionType::from_subclass_marker)
            .collect();
        // rotated dimensions carry AcDbAlignedDimension before their own marker
        if markers.contains(&DimensionType::Rotated) {
            return Some(DimensionType::Rotated);
        }
        markers.first().copied()
    }

    fn type_from_flags(pairs: &[CodePair], offset: u64) -> Result<DimensionType> {
        let Some(pair) = pairs.iter().find(|p| p.code == 70) else {
            return Ok(DimensionType::Rotated);
        };
        let value = short_value(pair);
        DimensionType::from_code(value).ok_or_else(|| DxfError::UnsupportedDiscriminant {
            kind: "DIMENSION",
            value: value.to_string(),
            offset,
        })
    }

    pub fn dimension_type(&self) -> DimensionType {
        match self {
            Dimension::Aligned(_) => DimensionType::Aligned,
            Dimension::Rotated(_) => DimensionType::Rotated,
            Dimension::Radius(_) => DimensionType::Radius,
            Dimension::Diameter(_) => DimensionType::Diameter,
            Dimension::Angular2Line(_) => DimensionType::Angular2Line,
            Dimension::Angular3Point(_) => DimensionType::Angular3Point,
            Dimension::Ordinate(_) => DimensionType::Ordinate,
        }
    }

    pub fn base(&self) -> &DimensionBase {
        match self {
            Dimension::Aligned(d) => &d.base,
            Dimension::Rotated(d) => &d.base,
            Dimension::Radius(d) => &d.base,
            Dimension::Diameter(d) => &d.base,
            Dimension::Angular2Line(d) => &d.base,
            Dimension::Angular3Point(d) => &d.base,
            Dimension::Ordinate(d) => &d.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut DimensionBase {
        match self {
            Dimension::Aligned(d) => &mut d.base,
            Dimension::Rotated(d) => &mut d.base,
            Dimension::Radius(d) => &mut d.base,
            Dimension::Diameter(d) => &mut d.base,
            Dimension::Angular2Line(d) => &mut d.base,
            Dimension::Angular3Point(d) => &mut d.base,
            Dimension::Ordinate(d) => &mut d.base,
        }
    }

    fn apply_kind_pair(&mut self, pair: &CodePair) {
        match self {
            Dimension::Aligned(d) => match pair.code {
                13 | 23 | 33 => set_point_axis(&mut d.first_point, 13, pair),
                14 | 24 | 34 => set_point_axis(&mut d.second_point, 14, pair),
                _ => {}
            },
            Dimension::Rotated(d) => match pair.code {
                13 | 23 | 33 => set_point_axis(&mut d.first_point, 13, pair),
                14 | 24 | 34 => set_point_axis(&mut d.second_point, 14, pair),
                50 => d.rotation = double_value(pair),
                52 => d.extension_line_rotation = double_value(pair),
                _ => {}
            },
            Dimension::Radius(DimensionRadius {
                definition_point_2,
                leader_length,
                ..
            })
            | Dimension::Diameter(DimensionDiameter {
                definition_point_2,
                leader_length,
                ..
            }) => match pair.code {
                15 | 25 | 35 => set_point_axis(definition_point_2, 15, pair),
                40 => *leader_length = double_value(pair),
                _ => {}
            },
            Dimension::Angular2Line(d) => match pair.code {
                13 | 23 | 33 => set_point_axis(&mut d.first_point, 13, pair),
                14 | 24 | 34 => set_point_axis(&mut d.second_point, 14, pair),
                15 | 25 | 35 => set_point_axis(&mut d.third_point, 15, pair),
                16 | 26 | 36 => set_point_axis(&mut d.arc_point, 16, pair),
                _ => {}
            },
            Dimension::Angular3Point(d) => match pair.code {
                13 | 23 | 33 => set_point_axis(&mut d.first_point, 13, pair),
                14 | 24 | 34 => set_point_axis(&mut d.second_point, 14, pair),
                15 | 25 | 35 => set_point_axis(&mut d.vertex, 15, pair),
                _ => {}
            },
            Dimension::Ordinate(d) => match pair.code {
                13 | 23 | 33 => set_point_axis(&mut d.feature_location, 13, pair),
                14 | 24 | 34 => set_point_axis(&mut d.leader_endpoint, 14, pair),
                _ => {}
            },
        }
    }

    fn write_kind_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        let post_r13 = version >= DxfVersion::R13;
        let marker = |pairs: &mut Vec<CodePair>, name: &str| {
            if post_r13 {
                pairs.push(CodePair::string(100, name));
            }
        };
        match self {
            Dimension::Aligned(d) => {
                marker(pairs, "AcDbAlignedDimension");
                push_point(pairs, 13, d.first_point);
                push_point(pairs, 14, d.second_point);
            }
            Dimension::Rotated(d) => {
                marker(pairs, "AcDbAlignedDimension");
                push_point(pairs, 13, d.first_point);
                push_point(pairs, 14, d.second_point);
                pairs.push(CodePair::double(50, d.rotation));
                if d.extension_line_rotation != 0.0 {
                    pairs.push(CodePair::double(52, d.extension_line_rotation));
                }
                marker(pairs, "AcDbRotatedDimension");
            }
            Dimension::Radius(d) => {
                marker(pairs, "AcDbRadialDimension");
                push_point(pairs, 15, d.definition_point_2);
                pairs.push(CodePair::double(40, d.leader_length));
            }
            Dimension::Diameter(d) => {
                marker(pairs, "AcDbDiametricDimension");
                push_point(pairs, 15, d.definition_point_2);
                pairs.push(CodePair::double(40, d.leader_length));
            }
            Dimension::Angular2Line(d) => {
                marker(pairs, "AcDb2LineAngularDimension");
                push_point(pairs, 13, d.first_point);
                push_point(pairs, 14, d.second_point);
                push_point(pairs, 15, d.third_point);
                push_point(pairs, 16, d.arc_point);
            }
            Dimension::Angular3Point(d) => {
                marker(pairs, "AcDb3PointAngularDimension");
                push_point(pairs, 13, d.first_point);
                push_point(pairs, 14, d.second_point);
                push_point(pairs, 15, d.vertex);
            }
            Dimension::Ordinate(d) => {
                marker(pairs, "AcDbOrdinateDimension");
                push_point(pairs, 13, d.feature_location);
                push_point(pairs, 14, d.leader_endpoint);
            }
        }
    }
}

impl Entity for Dimension {
    fn common(&self) -> &EntityCommon {
        &self.base().common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.base_mut().common
    }

    fn entity_type(&self) -> &'static str {
        "DIMENSION"
    }

    fn apply_specific_pair(&mut self, pair: &CodePair) {
        if !self.base_mut().apply_pair(pair) {
            self.apply_kind_pair(pair);
        }
    }

    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        self.base().write_pairs(self.dimension_type(), version, pairs);
        self.write_kind_pairs(version, pairs);
    }
}
