//! Test drawing builders.
//!
//! `create_sample_drawing()` produces a drawing containing one instance of
//! every entity kind the library models, laid out on a grid. Coordinates are
//! exact binary fractions so text output reads back bit-for-bit.

#![allow(dead_code)]

use acad_dxf::blocks::Block;
use acad_dxf::entities::*;
use acad_dxf::header::Header;
use acad_dxf::io::dxf::CodePair;
use acad_dxf::tables::{Layer, LineType};
use acad_dxf::{Drawing, DxfVersion, Vector3};

/// Header with a few typed fields and bag variables set.
pub fn sample_header() -> Header {
    let mut header = Header::new();
    header.insertion_base = Vector3::new(1.5, -2.0, 0.25);
    header.maintenance_version = 6;
    header
        .variables
        .insert("$LTSCALE".into(), vec![CodePair::double(40, 2.5)]);
    header
        .variables
        .insert("$CLAYER".into(), vec![CodePair::string(8, "WALLS")]);
    header
}

/// A drawing with every entity kind, a user layer and linetype, and one
/// user block.
pub fn create_sample_drawing() -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header = sample_header();

    let mut walls = Layer::new("WALLS");
    walls.color = 3;
    drawing.layers.add(walls);
    let mut dashed = LineType::new("DASHED");
    dashed.description = "__ __ __".into();
    dashed.dash_lengths = vec![0.5, -0.25];
    drawing.line_types.add(dashed);

    let sp = 25.0;
    let mut x = 0.0;

    // Row 1: basic geometry
    let mut point = Point::at(Vector3::new(x, 0.0, 0.0));
    point.common.color = 1;
    drawing.add_entity(point);
    x += sp;

    let mut line = Line::from_points(Vector3::new(x, 0.0, 0.0), Vector3::new(x + 10.0, 10.0, 0.0));
    line.common.layer = "WALLS".into();
    line.thickness = 0.5;
    drawing.add_entity(line);
    x += sp;

    drawing.add_entity(Circle::from_center_radius(Vector3::new(x, 0.0, 0.0), 5.0));
    x += sp;

    drawing.add_entity(Arc::from_center_radius_angles(Vector3::new(x, 0.0, 0.0), 5.0, 0.0, 180.0));
    x += sp;

    drawing.add_entity(Solid::triangle(
        Vector3::new(x, 0.0, 0.0),
        Vector3::new(x + 5.0, 0.0, 0.0),
        Vector3::new(x, 5.0, 0.0),
    ));

    // Row 2: text, with characters that need escaping before R2007
    x = 0.0;
    let y = sp;
    drawing.add_entity(Text::with_value("Türen ø 10", Vector3::new(x, y, 0.0), 2.5));
    x += sp;

    let mut m_text = MText::with_text("first line\\Psecond line");
    m_text.insertion_point = Vector3::new(x, y, 0.0);
    m_text.initial_text_height = 2.0;
    drawing.add_entity(m_text);
    x += sp;

    let mut definition = AttributeDefinition::with_tag("NUMBER", "Door number?");
    definition.text.location = Vector3::new(x, y, 0.0);
    drawing.add_entity(definition);

    // Row 3: composites
    x = 0.0;
    let y = 2.0 * sp;
    let mut insert = Insert::with_block("DOOR", Vector3::new(x, y, 0.0));
    insert.x_scale = 2.0;
    insert.rotation = 90.0;
    let mut attribute = Attribute::with_tag("NUMBER", "D-101");
    attribute.text.location = Vector3::new(x, y + 1.0, 0.0);
    insert.add_attribute(attribute);
    insert.add_attribute(Attribute::with_tag("WIDTH", "900"));
    insert.seqend = Some(Seqend::new());
    drawing.add_entity(insert);
    x += sp;

    let mut polyline = Polyline::from_points([
        Vector3::new(x, y, 0.0),
        Vector3::new(x + 5.0, y, 0.0),
        Vector3::new(x + 5.0, y + 5.0, 0.0),
    ]);
    polyline.vertices[1].bulge = 0.5;
    polyline.seqend = Some(Seqend::new());
    drawing.add_entity(polyline);
    x += sp;

    drawing.add_entity(LwPolyline::from_points([(x, y), (x + 5.0, y), (x + 5.0, y + 5.0)]));
    x += sp;

    let mut dimension = Dimension::Aligned(DimensionAligned::new(
        Vector3::new(x, y, 0.0),
        Vector3::new(x + 10.0, y, 0.0),
    ));
    dimension.base_mut().block_name = "*D1".into();
    dimension.base_mut().definition_point = Vector3::new(x + 10.0, y + 2.0, 0.0);
    drawing.add_entity(dimension);

    let mut door = Block::new("DOOR", Vector3::ZERO).with_description("Single door");
    door.entities.push(Line::from_points(Vector3::ZERO, Vector3::new(0.0, 9.0, 0.0)).into());
    door.entities
        .push(Arc::from_center_radius_angles(Vector3::ZERO, 9.0, 0.0, 90.0).into());
    drawing.blocks.push(door);

    drawing
}

/// `count` lines along the x axis, for benchmarks and handle tests.
pub fn create_line_drawing(count: usize, version: DxfVersion) -> Drawing {
    let mut drawing = Drawing::with_version(version);
    for i in 0..count {
        let x = i as f64;
        drawing.add_entity(Line::from_points(Vector3::new(x, 0.0, 0.0), Vector3::new(x, 1.0, 0.0)));
    }
    drawing
}
