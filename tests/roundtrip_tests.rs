//! Write-then-read tests across versions and both encodings

mod common;

use acad_dxf::entities::{Entity, EntityType, Line};
use acad_dxf::notification::NotificationType;
use acad_dxf::{Drawing, DxfVersion, DxfWriter, Handle, Pointer, Vector3};
use ahash::AHashSet;
use common::builders::{create_line_drawing, create_sample_drawing};
use common::comparison::{assert_same_entities, assert_vec3_eq};
use common::round_trip;

fn check_round_trip(version: DxfVersion, binary: bool) -> anyhow::Result<()> {
    let original = create_sample_drawing();
    let read = round_trip(&original, version, binary)?;

    assert_eq!(read.header.version, version);
    assert_vec3_eq(&read.header.insertion_base, &original.header.insertion_base);
    if version >= DxfVersion::R14 {
        assert_eq!(read.header.maintenance_version, original.header.maintenance_version);
    }
    assert_eq!(read.header.variables, original.header.variables);

    assert_same_entities(&original.entities, &read.entities, version);

    let door = read.block("DOOR").expect("user block");
    assert_eq!(door.description, "Single door");
    assert_same_entities(&original.blocks[0].entities, &door.entities, version);

    assert_eq!(read.layers.get("WALLS").map(|l| l.color), Some(3));
    assert_eq!(
        read.line_types.get("DASHED").map(|l| l.dash_lengths.clone()),
        Some(vec![0.5, -0.25])
    );
    assert!(read.notifications.is_empty(), "{:?}", read.notifications);
    Ok(())
}

#[test]
fn test_text_round_trip_all_versions() -> anyhow::Result<()> {
    for version in common::round_trip_versions() {
        check_round_trip(version, false)?;
    }
    Ok(())
}

#[test]
fn test_binary_round_trip_all_versions() -> anyhow::Result<()> {
    for version in common::round_trip_versions() {
        check_round_trip(version, true)?;
    }
    Ok(())
}

#[test]
fn test_non_ascii_text_encoding() -> anyhow::Result<()> {
    let drawing = create_sample_drawing();

    let r2004 = DxfWriter::new(&drawing).with_version(DxfVersion::R2004).write_to_vec()?;
    assert!(r2004.is_ascii());
    let text = String::from_utf8(r2004)?;
    assert!(text.contains("T\\U+00FCren \\U+00F8 10"));

    let r2007 = String::from_utf8(
        DxfWriter::new(&drawing).with_version(DxfVersion::R2007).write_to_vec()?,
    )?;
    assert!(r2007.contains("Türen ø 10"));
    Ok(())
}

#[test]
fn test_write_read_write_is_stable() -> anyhow::Result<()> {
    for binary in [false, true] {
        let first = DxfWriter::new(&create_sample_drawing())
            .with_version(DxfVersion::R2010)
            .binary(binary)
            .write_to_vec()?;
        let read = Drawing::read(first.as_slice())?;
        let second = DxfWriter::new(&read).binary(binary).write_to_vec()?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[test]
fn test_handles_unique_and_increasing() -> anyhow::Result<()> {
    let mut drawing = create_sample_drawing();
    drawing.entities.extend(create_line_drawing(50, DxfVersion::R2000).entities);
    let read = round_trip(&drawing, DxfVersion::R2000, false)?;

    let mut seen = AHashSet::new();
    read.for_each_record(&mut |record: &dyn Entity| {
        assert!(!record.handle().is_null());
        assert!(seen.insert(record.handle()), "duplicate handle {}", record.handle());
    });
    for table_handle in [read.layers.handle(), read.vports.handle(), read.app_ids.handle()] {
        assert!(seen.insert(table_handle), "table handle {} reused", table_handle);
    }
    for block in &read.blocks {
        assert!(seen.insert(block.handle));
        assert!(seen.insert(block.end_handle));
    }

    let top_level: Vec<Handle> = read.entities.iter().map(|e| e.handle()).collect();
    assert!(top_level.windows(2).all(|w| w[0] < w[1]));

    let max = seen.iter().copied().max().unwrap_or_default();
    assert!(read.header.next_available_handle > max);
    Ok(())
}

#[test]
fn test_existing_handles_are_kept() -> anyhow::Result<()> {
    let mut drawing = Drawing::with_version(DxfVersion::R2000);
    let mut line = Line::new();
    line.common.handle = Handle::new(0x500);
    drawing.add_entity(line);
    drawing.add_entity(Line::new());

    let read = round_trip(&drawing, DxfVersion::R2000, false)?;
    assert_eq!(read.entities[0].handle(), Handle::new(0x500));
    assert!(read.header.next_available_handle > Handle::new(0x500));
    Ok(())
}

#[test]
fn test_bound_owner_is_written_and_rebound() -> anyhow::Result<()> {
    let mut drawing = Drawing::with_version(DxfVersion::R2000);
    let mut child = Line::new();
    // owner appears later in the file than the referrer
    child.common.owner = Pointer::to(acad_dxf::EntityLocation::Entities(1));
    drawing.add_entity(child);
    drawing.add_entity(Line::from_points(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0)));

    let read = round_trip(&drawing, DxfVersion::R2000, true)?;
    let owner = read.owner_of(&read.entities[0]).expect("owner bound");
    let EntityType::Line(line) = owner else { panic!() };
    assert_eq!(line.end.x, 2.0);
    assert!(!read.notifications.has_type(NotificationType::Warning));
    Ok(())
}

#[test]
fn test_code_pairs_escape_hatch() -> anyhow::Result<()> {
    let drawing = create_sample_drawing();
    let pairs = drawing.code_pairs()?;
    assert!(pairs.first().is_some_and(|p| p.is_start_section()));
    assert!(pairs.last().is_some_and(|p| p.is_eof()));

    let rebuilt = Drawing::from_code_pairs(pairs)?;
    assert_same_entities(&drawing.entities, &rebuilt.entities, drawing.header.version);
    Ok(())
}

#[test]
fn test_write_file_and_read_file() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("acad_dxf_roundtrip_{}.dxf", std::process::id()));
    let drawing = create_sample_drawing();
    drawing.write_file(&path)?;
    let read = Drawing::read_file(&path)?;
    std::fs::remove_file(&path)?;
    assert_same_entities(&drawing.entities, &read.entities, drawing.header.version);
    Ok(())
}

mod properties {
    use super::*;
    use acad_dxf::entities::Text;
    use proptest::prelude::*;

    fn quarter() -> impl Strategy<Value = f64> {
        (-4000i32..4000).prop_map(|v| v as f64 * 0.25)
    }

    fn version() -> impl Strategy<Value = DxfVersion> {
        prop::sample::select(common::round_trip_versions())
    }

    proptest! {
        #[test]
        fn lines_survive_any_encoding(
            coords in prop::collection::vec((quarter(), quarter(), quarter(), quarter()), 1..20),
            version in version(),
            binary in any::<bool>(),
        ) {
            let mut drawing = Drawing::with_version(version);
            for &(x1, y1, x2, y2) in &coords {
                drawing.add_entity(Line::from_points(Vector3::new(x1, y1, 0.0), Vector3::new(x2, y2, 0.0)));
            }
            let read = round_trip(&drawing, version, binary).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(read.entities.len(), coords.len());
            for (entity, &(x1, y1, x2, y2)) in read.entities.iter().zip(&coords) {
                let EntityType::Line(line) = entity else { return Err(TestCaseError::fail("not a line")) };
                prop_assert_eq!((line.start.x, line.start.y, line.end.x, line.end.y), (x1, y1, x2, y2));
            }
        }

        #[test]
        fn text_values_survive_any_encoding(
            value in "[A-Za-z0-9äöüøßé€]{1,24}",
            version in version(),
            binary in any::<bool>(),
        ) {
            let mut drawing = Drawing::with_version(version);
            drawing.add_entity(Text::with_value(value.clone(), Vector3::ZERO, 1.0));
            let read = round_trip(&drawing, version, binary).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let Some(EntityType::Text(text)) = read.entities.first() else {
                return Err(TestCaseError::fail("text lost"));
            };
            prop_assert_eq!(&text.text.value, &value);
        }
    }
}
