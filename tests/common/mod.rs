//! Shared test utilities for acad-dxf integration tests.
//!
//! Consolidates text assembly, read/write helpers and version lists so that
//! every test crate can import them via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use acad_dxf::io::dxf::CodePair;
use acad_dxf::{Drawing, DxfVersion, DxfWriter, Result};

// ===========================================================================
// Text DXF assembly
// ===========================================================================

/// Join `(code, value)` lines into CRLF-terminated DXF text.
///
/// ```ignore
/// let text = dxf_text(&[(0, "SECTION"), (2, "ENTITIES"), (0, "ENDSEC"), (0, "EOF")]);
/// ```
pub fn dxf_text(pairs: &[(i32, &str)]) -> String {
    let mut text = String::new();
    for (code, value) in pairs {
        text.push_str(&format!("{:>3}\r\n{}\r\n", code, value));
    }
    text
}

/// Wrap `body` in `0/SECTION 2/<name> ... 0/ENDSEC`.
pub fn section<'a>(name: &'a str, body: &[(i32, &'a str)]) -> Vec<(i32, &'a str)> {
    let mut pairs = vec![(0, "SECTION"), (2, name)];
    pairs.extend_from_slice(body);
    pairs.push((0, "ENDSEC"));
    pairs
}

/// A complete text file holding only an ENTITIES section.
pub fn entities_file(body: &[(i32, &str)]) -> String {
    let mut pairs = section("ENTITIES", body);
    pairs.push((0, "EOF"));
    dxf_text(&pairs)
}

/// Parse text DXF, panicking with the error on failure.
pub fn parse(text: &str) -> Drawing {
    Drawing::parse(text).unwrap_or_else(|e| panic!("parse failed: {e}"))
}

// ===========================================================================
// Versions
// ===========================================================================

/// Versions whose `$ACADVER` token reads back as the same version.
pub fn round_trip_versions() -> Vec<DxfVersion> {
    DxfVersion::ALL
        .into_iter()
        .filter(|v| DxfVersion::from_version_string(v.to_dxf_string()) == Some(*v))
        .collect()
}

// ===========================================================================
// Round trips
// ===========================================================================

/// Write `drawing` at `version` and read it back.
pub fn round_trip(drawing: &Drawing, version: DxfVersion, binary: bool) -> Result<Drawing> {
    let bytes = DxfWriter::new(drawing)
        .with_version(version)
        .binary(binary)
        .write_to_vec()?;
    Drawing::read(bytes.as_slice())
}

/// Values of all pairs with `code` in `pairs`.
pub fn values_of(pairs: &[CodePair], code: i32) -> Vec<String> {
    pairs
        .iter()
        .filter(|p| p.code == code)
        .map(|p| p.value.to_string())
        .collect()
}
