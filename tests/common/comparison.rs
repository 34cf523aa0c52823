//! Entity comparison utilities for tests.
//!
//! Handles are renumbered on every write, so drawings are compared by the
//! pairs their entities emit once handles and owners are cleared.

#![allow(dead_code)]

use acad_dxf::entities::{Entity, EntityType};
use acad_dxf::io::dxf::CodePair;
use acad_dxf::types::Vector3;
use acad_dxf::{DxfVersion, Handle, Pointer};

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-9;

/// Assert two Vector3 values are approximately equal component-wise.
pub fn assert_vec3_eq(a: &Vector3, b: &Vector3) {
    assert!(
        (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL && (a.z - b.z).abs() < TOL,
        "Vector3 mismatch: ({},{},{}) vs ({},{},{})",
        a.x, a.y, a.z, b.x, b.y, b.z
    );
}

/// Pairs of `entity` at `version` with every handle and owner cleared.
pub fn content_pairs(entity: &EntityType, version: DxfVersion) -> Vec<CodePair> {
    let mut entity = entity.clone();
    entity.for_each_record_mut(&mut |record: &mut dyn Entity| {
        record.set_handle(Handle::NULL);
        record.common_mut().owner = Pointer::default();
    });
    entity.code_pairs(version)
}

/// Assert `actual` holds the entities of `expected` that exist at `version`,
/// in order and with the same content.
pub fn assert_same_entities(expected: &[EntityType], actual: &[EntityType], version: DxfVersion) {
    let expected: Vec<&EntityType> = expected
        .iter()
        .filter(|e| e.as_entity().is_supported_on(version))
        .collect();
    assert_eq!(
        expected.len(),
        actual.len(),
        "entity count differs at {version}: {:?} vs {:?}",
        expected.iter().map(|e| e.as_entity().entity_type()).collect::<Vec<_>>(),
        actual.iter().map(|e| e.as_entity().entity_type()).collect::<Vec<_>>()
    );
    for (e, a) in expected.iter().zip(actual) {
        assert_eq!(
            content_pairs(e, version),
            content_pairs(a, version),
            "{} differs at {version}",
            e.as_entity().entity_type()
        );
    }
}
