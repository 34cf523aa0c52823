//! Drawing entity kinds and the shared entity trait

use crate::handles::Pointer;
use crate::io::dxf::CodePair;
use crate::types::{DxfVersion, Handle, Vector3};

pub mod point;
pub mod line;
pub mod circle;
pub mod arc;
pub mod text;
pub mod mtext;
pub mod insert;
pub mod attribute_entity;
pub mod attribute_definition;
pub mod polyline;
pub mod seqend;
pub mod lwpolyline;
pub mod solid;
pub mod dimension;

pub use point::Point;
pub use line::Line;
pub use circle::Circle;
pub use arc::Arc;
pub use text::{Text, TextData};
pub use mtext::MText;
pub use insert::Insert;
pub use attribute_entity::Attribute;
pub use attribute_definition::AttributeDefinition;
pub use polyline::{Polyline, Vertex};
pub use seqend::Seqend;
pub use lwpolyline::{LwPolyline, LwVertex};
pub use solid::Solid;
pub use dimension::*;

/// Shared behaviour of every entity kind
///
/// `apply_specific_pair` and `write_specific_pairs` cover only the fields a
/// kind adds on top of [`EntityCommon`]; `try_apply_code_pair` and
/// `code_pairs` combine both.
pub trait Entity {
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// The `0/<type>` string written for this kind
    fn entity_type(&self) -> &'static str;

    /// Oldest version this kind can be written to
    fn min_version(&self) -> DxfVersion {
        DxfVersion::Version1_0
    }

    /// Newest version this kind can be written to
    fn max_version(&self) -> DxfVersion {
        DxfVersion::R2018
    }

    /// Apply one kind-specific pair; unknown codes are ignored
    fn apply_specific_pair(&mut self, pair: &CodePair);

    /// Kind-specific pairs, in write order, starting with the subclass marker
    fn write_specific_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>);

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common_mut().handle = handle;
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }

    fn is_supported_on(&self, version: DxfVersion) -> bool {
        self.min_version() <= version && version <= self.max_version()
    }

    fn try_apply_code_pair(&mut self, pair: &CodePair) {
        if !self.common_mut().apply_code_pair(pair) {
            self.apply_specific_pair(pair);
        }
    }

    /// All pairs of this record, starting with `0/<type>`
    fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        let mut pairs = vec![CodePair::string(0, self.entity_type())];
        self.common().write_code_pairs(version, &mut pairs);
        self.write_specific_pairs(version, &mut pairs);
        pairs
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    pub handle: Handle,
    /// Owning object, by handle
    pub owner: Pointer,
    pub layer: String,
    pub line_type: String,
    /// ACI color; 256 is BYLAYER, 0 is BYBLOCK
    pub color: i16,
    pub line_type_scale: f64,
    pub is_in_paper_space: bool,
    pub is_invisible: bool,
}

pub const COLOR_BY_LAYER: i16 = 256;
const LINE_TYPE_BY_LAYER: &str = "BYLAYER";

impl EntityCommon {
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Pointer::default(),
            layer: "0".to_string(),
            line_type: LINE_TYPE_BY_LAYER.to_string(),
            color: COLOR_BY_LAYER,
            line_type_scale: 1.0,
            is_in_paper_space: false,
            is_invisible: false,
        }
    }

    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    /// Apply a common pair; returns `false` if the code is not a common one
    pub fn apply_code_pair(&mut self, pair: &CodePair) -> bool {
        match pair.code {
            5 => {
                if let Some(h) = pair.as_handle() {
                    self.handle = h;
                }
            }
            330 => {
                if let Some(h) = pair.as_handle() {
                    self.owner = Pointer::from_handle(h);
                }
            }
            // subclass markers carry no data for these kinds
            100 => {}
            67 => self.is_in_paper_space = pair.as_bool().unwrap_or(false),
            8 => self.layer = string_value(pair),
            6 => self.line_type = string_value(pair),
            62 => self.color = pair.as_i16().unwrap_or(COLOR_BY_LAYER),
            48 => self.line_type_scale = pair.as_double().unwrap_or(1.0),
            60 => self.is_invisible = pair.as_i16().unwrap_or(0) != 0,
            _ => return false,
        }
        true
    }

    pub fn write_code_pairs(&self, version: DxfVersion, pairs: &mut Vec<CodePair>) {
        if !self.handle.is_null() {
            pairs.push(CodePair::handle(5, self.handle));
        }
        if version >= DxfVersion::R13 {
            if !self.owner.handle.is_null() {
                pairs.push(CodePair::handle(330, self.owner.handle));
            }
            pairs.push(CodePair::string(100, "AcDbEntity"));
        }
        if self.is_in_paper_space {
            pairs.push(CodePair::short(67, 1));
        }
        pairs.push(CodePair::string(8, self.layer.as_str()));
        if !self.line_type.eq_ignore_ascii_case(LINE_TYPE_BY_LAYER) {
            pairs.push(CodePair::string(6, self.line_type.as_str()));
        }
        if self.color != COLOR_BY_LAYER {
            pairs.push(CodePair::short(62, self.color));
        }
        if version >= DxfVersion::R13 {
            if self.line_type_scale != 1.0 {
                pairs.push(CodePair::double(48, self.line_type_scale));
            }
            if self.is_invisible {
                pairs.push(CodePair::short(60, 1));
            }
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn string_value(pair: &CodePair) -> String {
    pair.as_str().unwrap_or_default().to_string()
}

pub(crate) fn double_value(pair: &CodePair) -> f64 {
    pair.as_double().unwrap_or(0.0)
}

pub(crate) fn short_value(pair: &CodePair) -> i16 {
    pair.as_i16().unwrap_or(0)
}

/// Set the coordinate of `point` addressed by `pair` if its code is
/// `x_code`, `x_code + 10` or `x_code + 20`.
pub(crate) fn apply_point(point: &mut Vector3, x_code: i32, pair: &CodePair) -> bool {
    if !matches!(pair.code - x_code, 0 | 10 | 20) {
        return false;
    }
    set_point_axis(point, x_code, pair);
    true
}

/// Set the coordinate of `point` addressed by `pair`, whose code the caller
/// has already matched against the `x_code` family.
pub(crate) fn set_point_axis(point: &mut Vector3, x_code: i32, pair: &CodePair) {
    if let Some(v) = pair.as_double() {
        point.set_axis(((pair.code - x_code) / 10) as usize, v);
    }
}

pub(crate) fn push_point(pairs: &mut Vec<CodePair>, x_code: i32, point: Vector3) {
    pairs.push(CodePair::double(x_code, point.x));
    pairs.push(CodePair::double(x_code + 10, point.y));
    pairs.push(CodePair::double(x_code + 20, point.z));
}

/// Thickness (39) is omitted at its default
pub(crate) fn push_thickness(pairs: &mut Vec<CodePair>, thickness: f64) {
    if thickness != 0.0 {
        pairs.push(CodePair::double(39, thickness));
    }
}

/// Extrusion (210/220/230) is omitted at its default and before R12
pub(crate) fn push_normal(pairs: &mut Vec<CodePair>, version: DxfVersion, normal: Vector3) {
    if version >= DxfVersion::R12 && normal != Vector3::UNIT_Z {
        push_point(pairs, 210, normal);
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Text(Text),
    MText(MText),
    Insert(Insert),
    Attribute(Attribute),
    AttributeDefinition(AttributeDefinition),
    Polyline(Polyline),
    Vertex(Vertex),
    Seqend(Seqend),
    LwPolyline(LwPolyline),
    Solid(Solid),
    Dimension(Dimension),
}

impl EntityType {
    /// Create an empty entity for a `0/<type>` string.
    ///
    /// `DIMENSION` is not created here: its concrete kind is only known
    /// once the whole record has been read (see [`Dimension::from_code_pairs`]).
    pub fn from_type_string(type_string: &str) -> Option<EntityType> {
        let entity = match type_string {
            "POINT" => EntityType::Point(Point::new()),
            "LINE" | "3DLINE" => EntityType::Line(Line::new()),
            "CIRCLE" => EntityType::Circle(Circle::new()),
            "ARC" => EntityType::Arc(Arc::new()),
            "TEXT" => EntityType::Text(Text::new()),
            "MTEXT" => EntityType::MText(MText::new()),
            "INSERT" => EntityType::Insert(Insert::new()),
            "ATTRIB" => EntityType::Attribute(Attribute::new()),
            "ATTDEF" => EntityType::AttributeDefinition(AttributeDefinition::new()),
            "POLYLINE" => EntityType::Polyline(Polyline::new()),
            "VERTEX" => EntityType::Vertex(Vertex::new()),
            "SEQEND" => EntityType::Seqend(Seqend::new()),
            "LWPOLYLINE" => EntityType::LwPolyline(LwPolyline::new()),
            "SOLID" => EntityType::Solid(Solid::new()),
            _ => return None,
        };
        Some(entity)
    }

    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Attribute(e) => e,
            EntityType::AttributeDefinition(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Vertex(e) => e,
            EntityType::Seqend(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Dimension(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Attribute(e) => e,
            EntityType::AttributeDefinition(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Vertex(e) => e,
            EntityType::Seqend(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Dimension(e) => e,
        }
    }

    pub fn handle(&self) -> Handle {
        self.as_entity().handle()
    }

    /// Visit this entity and then every record it absorbed, in file order
    pub fn for_each_record(&self, f: &mut dyn FnMut(&dyn Entity)) {
        f(self.as_entity());
        match self {
            EntityType::Insert(insert) => {
                for attribute in &insert.attributes {
                    f(attribute);
                    if let Some(m_text) = &attribute.m_text {
                        f(&**m_text);
                    }
                }
                if let Some(seqend) = &insert.seqend {
                    f(seqend);
                }
            }
            EntityType::Attribute(attribute) => {
                if let Some(m_text) = &attribute.m_text {
                    f(&**m_text);
                }
            }
            EntityType::AttributeDefinition(definition) => {
                if let Some(m_text) = &definition.m_text {
                    f(&**m_text);
                }
            }
            EntityType::Polyline(polyline) => {
                for vertex in &polyline.vertices {
                    f(vertex);
                }
                if let Some(seqend) = &polyline.seqend {
                    f(seqend);
                }
            }
            _ => {}
        }
    }

    /// Mutable counterpart of [`EntityType::for_each_record`]
    pub fn for_each_record_mut(&mut self, f: &mut dyn FnMut(&mut dyn Entity)) {
        f(self.as_entity_mut());
        match self {
            EntityType::Insert(insert) => {
                for attribute in &mut insert.attributes {
                    f(attribute);
                    if let Some(m_text) = &mut attribute.m_text {
                        f(&mut **m_text);
                    }
                }
                if let Some(seqend) = &mut insert.seqend {
                    f(seqend);
                }
            }
            EntityType::Attribute(attribute) => {
                if let Some(m_text) = &mut attribute.m_text {
                    f(&mut **m_text);
                }
            }
            EntityType::AttributeDefinition(definition) => {
                if let Some(m_text) = &mut definition.m_text {
                    f(&mut **m_text);
                }
            }
            EntityType::Polyline(polyline) => {
                for vertex in &mut polyline.vertices {
                    f(vertex);
                }
                if let Some(seqend) = &mut polyline.seqend {
                    f(seqend);
                }
            }
            _ => {}
        }
    }

    /// The pairs of this entity and of every record it absorbed.
    ///
    /// Returns nothing when the entity cannot be represented at `version`.
    /// Absorbed records outside their own version window are dropped
    /// individually.
    pub fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        let mut pairs = Vec::new();
        if !self.as_entity().is_supported_on(version) {
            return pairs;
        }
        self.for_each_record(&mut |record| {
            if record.is_supported_on(version) {
                pairs.extend(record.code_pairs(version));
            }
        });
        pairs
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EntityType {
                fn from(entity: $variant) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity!(
    Point,
    Line,
    Circle,
    Arc,
    Text,
    MText,
    Insert,
    Attribute,
    AttributeDefinition,
    Polyline,
    Vertex,
    Seqend,
    LwPolyline,
    Solid,
    Dimension,
);
