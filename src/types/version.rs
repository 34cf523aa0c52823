//! DXF format revisions

use std::fmt;

/// DXF file revision, ordered from oldest to newest
///
/// The variant names follow the AutoCAD release; the doc comment of each
/// variant gives the `$ACADVER` token written to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DxfVersion {
    /// `MC0.0`
    Version1_0,
    /// `AC1.2`
    Version1_2,
    /// `AC1.40`
    Version1_40,
    /// `AC1.50`
    Version2_05,
    /// `AC2.10`
    Version2_10,
    /// `AC2.21`
    Version2_21,
    /// `AC2.22`
    Version2_22,
    /// `AC1002`
    Version2_5,
    /// `AC1003`
    Version2_6,
    /// `AC1004`
    R9,
    /// `AC1006`
    R10,
    /// `AC1009`, shared with R12. Reads back as R12.
    R11,
    /// `AC1009`
    R12,
    /// `AC1012`
    R13,
    /// `AC1014`
    R14,
    /// `AC1015`
    R2000,
    /// `AC1018`
    R2004,
    /// `AC1021`
    R2007,
    /// `AC1024`
    R2010,
    /// `AC1027`
    R2013,
    /// `AC1032`
    R2018,
}

impl DxfVersion {
    /// Every revision, oldest first
    pub const ALL: [DxfVersion; 21] = [
        DxfVersion::Version1_0,
        DxfVersion::Version1_2,
        DxfVersion::Version1_40,
        DxfVersion::Version2_05,
        DxfVersion::Version2_10,
        DxfVersion::Version2_21,
        DxfVersion::Version2_22,
        DxfVersion::Version2_5,
        DxfVersion::Version2_6,
        DxfVersion::R9,
        DxfVersion::R10,
        DxfVersion::R11,
        DxfVersion::R12,
        DxfVersion::R13,
        DxfVersion::R14,
        DxfVersion::R2000,
        DxfVersion::R2004,
        DxfVersion::R2007,
        DxfVersion::R2010,
        DxfVersion::R2013,
        DxfVersion::R2018,
    ];

    /// Parse a `$ACADVER` token. `AC1009` maps to [`DxfVersion::R12`].
    pub fn from_version_string(token: &str) -> Option<DxfVersion> {
        let version = match token.trim() {
            "MC0.0" => DxfVersion::Version1_0,
            "AC1.2" => DxfVersion::Version1_2,
            "AC1.40" => DxfVersion::Version1_40,
            "AC1.50" => DxfVersion::Version2_05,
            "AC2.10" => DxfVersion::Version2_10,
            "AC2.21" => DxfVersion::Version2_21,
            "AC2.22" => DxfVersion::Version2_22,
            "AC1002" => DxfVersion::Version2_5,
            "AC1003" => DxfVersion::Version2_6,
            "AC1004" => DxfVersion::R9,
            "AC1006" => DxfVersion::R10,
            "AC1009" => DxfVersion::R12,
            "AC1012" => DxfVersion::R13,
            "AC1014" => DxfVersion::R14,
            "AC1015" => DxfVersion::R2000,
            "AC1018" => DxfVersion::R2004,
            "AC1021" => DxfVersion::R2007,
            "AC1024" => DxfVersion::R2010,
            "AC1027" => DxfVersion::R2013,
            "AC1032" => DxfVersion::R2018,
            _ => return None,
        };
        Some(version)
    }

    /// The `$ACADVER` token for this revision
    pub fn to_dxf_string(self) -> &'static str {
        match self {
            DxfVersion::Version1_0 => "MC0.0",
            DxfVersion::Version1_2 => "AC1.2",
            DxfVersion::Version1_40 => "AC1.40",
            DxfVersion::Version2_05 => "AC1.50",
            DxfVersion::Version2_10 => "AC2.10",
            DxfVersion::Version2_21 => "AC2.21",
            DxfVersion::Version2_22 => "AC2.22",
            DxfVersion::Version2_5 => "AC1002",
            DxfVersion::Version2_6 => "AC1003",
            DxfVersion::R9 => "AC1004",
            DxfVersion::R10 => "AC1006",
            DxfVersion::R11 | DxfVersion::R12 => "AC1009",
            DxfVersion::R13 => "AC1012",
            DxfVersion::R14 => "AC1014",
            DxfVersion::R2000 => "AC1015",
            DxfVersion::R2004 => "AC1018",
            DxfVersion::R2007 => "AC1021",
            DxfVersion::R2010 => "AC1024",
            DxfVersion::R2013 => "AC1027",
            DxfVersion::R2018 => "AC1032",
        }
    }

    /// Text strings are raw UTF-8 from R2007 on; older revisions use `\U+XXXX` escapes.
    pub fn is_utf8(self) -> bool {
        self >= DxfVersion::R2007
    }

    /// Binary files use 2-byte codes and 1-byte booleans from R13 on.
    pub fn is_post_r13(self) -> bool {
        self >= DxfVersion::R13
    }
}

impl Default for DxfVersion {
    fn default() -> Self {
        DxfVersion::R12
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_dxf_string())
    }
}
