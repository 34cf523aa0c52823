//! The code pair: the universal token of both wire formats

use std::fmt;

use super::GroupCodeValueType;
use crate::types::Handle;

/// A typed group code value
#[derive(Debug, Clone, PartialEq)]
pub enum CodePairValue {
    Boolean(bool),
    Short(i16),
    Integer(i32),
    Long(i64),
    Double(f64),
    Str(String),
}

impl fmt::Display for CodePairValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodePairValue::Boolean(v) => write!(f, "{}", if *v { 1 } else { 0 }),
            CodePairValue::Short(v) => write!(f, "{v}"),
            CodePairValue::Integer(v) => write!(f, "{v}"),
            CodePairValue::Long(v) => write!(f, "{v}"),
            CodePairValue::Double(v) => write!(f, "{v}"),
            CodePairValue::Str(v) => f.write_str(v),
        }
    }
}

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct CodePair {
    pub code: i32,
    pub value: CodePairValue,
}

impl CodePair {
    pub fn new(code: i32, value: CodePairValue) -> Self {
        Self { code, value }
    }

    pub fn string(code: i32, value: impl Into<String>) -> Self {
        Self::new(code, CodePairValue::Str(value.into()))
    }

    pub fn short(code: i32, value: i16) -> Self {
        Self::new(code, CodePairValue::Short(value))
    }

    pub fn int(code: i32, value: i32) -> Self {
        Self::new(code, CodePairValue::Integer(value))
    }

    pub fn long(code: i32, value: i64) -> Self {
        Self::new(code, CodePairValue::Long(value))
    }

    pub fn double(code: i32, value: f64) -> Self {
        Self::new(code, CodePairValue::Double(value))
    }

    pub fn bool(code: i32, value: bool) -> Self {
        Self::new(code, CodePairValue::Boolean(value))
    }

    /// A handle pair, written as uppercase hex text
    pub fn handle(code: i32, handle: Handle) -> Self {
        Self::string(code, handle.to_hex())
    }

    /// The value kind this pair's code mandates
    pub fn value_type(&self) -> GroupCodeValueType {
        GroupCodeValueType::from_code(self.code)
    }

    /// Get value as string
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            CodePairValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get value as i16, widening from booleans
    pub fn as_i16(&self) -> Option<i16> {
        match self.value {
            CodePairValue::Short(v) => Some(v),
            CodePairValue::Boolean(v) => Some(v as i16),
            CodePairValue::Integer(v) => i16::try_from(v).ok(),
            _ => None,
        }
    }

    /// Get value as i32
    pub fn as_i32(&self) -> Option<i32> {
        match self.value {
            CodePairValue::Short(v) => Some(v as i32),
            CodePairValue::Integer(v) => Some(v),
            CodePairValue::Long(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            CodePairValue::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Get value as boolean; shorts are nonzero-is-true
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            CodePairValue::Boolean(v) => Some(v),
            CodePairValue::Short(v) => Some(v != 0),
            _ => None,
        }
    }

    /// Get value as handle (hex string to u64)
    pub fn as_handle(&self) -> Option<Handle> {
        self.as_str().and_then(Handle::parse_hex)
    }

    /// True for a `0/<name>` pair
    pub fn is_marker(&self, name: &str) -> bool {
        self.code == 0 && self.as_str() == Some(name)
    }

    pub fn is_start_section(&self) -> bool {
        self.is_marker("SECTION")
    }

    pub fn is_end_section(&self) -> bool {
        self.is_marker("ENDSEC")
    }

    pub fn is_start_table(&self) -> bool {
        self.is_marker("TABLE")
    }

    pub fn is_end_table(&self) -> bool {
        self.is_marker("ENDTAB")
    }

    pub fn is_eof(&self) -> bool {
        self.is_marker("EOF")
    }
}

impl fmt::Display for CodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.code, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert!(CodePair::string(0, "SECTION").is_start_section());
        assert!(CodePair::string(0, "ENDSEC").is_end_section());
        assert!(!CodePair::string(2, "ENDSEC").is_end_section());
        assert!(CodePair::string(0, "EOF").is_eof());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CodePair::short(70, 3).as_i16(), Some(3));
        assert_eq!(CodePair::bool(290, true).as_i16(), Some(1));
        assert_eq!(CodePair::short(66, 1).as_bool(), Some(true));
        assert_eq!(CodePair::double(10, 1.5).as_double(), Some(1.5));
        assert_eq!(CodePair::double(10, 1.5).as_str(), None);
        assert_eq!(CodePair::string(5, "1F").as_handle(), Some(Handle::new(0x1F)));
    }

    #[test]
    fn test_handle_pair() {
        let pair = CodePair::handle(330, Handle::new(0xAB));
        assert_eq!(pair, CodePair::string(330, "AB"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CodePair::string(0, "LINE").to_string(), "0/LINE");
        assert_eq!(CodePair::bool(290, false).to_string(), "290/0");
    }
}
