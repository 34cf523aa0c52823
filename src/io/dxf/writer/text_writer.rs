//! ASCII DXF writer

use std::io::Write;

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::io::dxf::escape::escape_unicode;
use crate::io::dxf::{CodePair, CodePairValue};
use crate::types::DxfVersion;

/// ASCII DXF stream writer
///
/// Every line ends in `\r\n`. Strings are `\U+XXXX`-escaped up to R2004 and
/// written as raw UTF-8 from R2007 on.
pub struct DxfTextWriter<W: Write> {
    writer: W,
    version: DxfVersion,
}

impl<W: Write> DxfTextWriter<W> {
    pub fn new(writer: W, version: DxfVersion) -> Self {
        Self { writer, version }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        Ok(())
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Fixed-point with twelve fractional digits, trailing zeros dropped but
/// one digit kept after the point.
pub fn format_double(value: f64) -> String {
    let mut text = format!("{:.12}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
        if text.ends_with('.') {
            text.push('0');
        }
    }
    text
}

/// Format a value line for `version`
pub fn format_value(value: &CodePairValue, version: DxfVersion) -> String {
    match value {
        CodePairValue::Boolean(v) => format!("{:>6}", if *v { 1 } else { 0 }),
        CodePairValue::Short(v) => format!("{:>6}", v),
        CodePairValue::Integer(v) => format!("{:>9}", v),
        CodePairValue::Long(v) => v.to_string(),
        CodePairValue::Double(v) => format_double(*v),
        CodePairValue::Str(s) if version.is_utf8() => s.clone(),
        CodePairValue::Str(s) => escape_unicode(s),
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_pair(&mut self, pair: &CodePair) -> Result<()> {
        self.write_line(&format!("{:>3}", pair.code))?;
        let value = format_value(&pair.value, self.version);
        self.write_line(&value)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn written(pair: CodePair, version: DxfVersion) -> String {
        let mut buf = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buf, version);
            writer.write_pair(&pair).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_short_layout() {
        assert_eq!(written(CodePair::short(70, 1), DxfVersion::R12), " 70\r\n     1\r\n");
    }

    #[test]
    fn test_code_alignment() {
        assert_eq!(written(CodePair::string(0, "LINE"), DxfVersion::R12), "  0\r\nLINE\r\n");
        assert_eq!(written(CodePair::string(100, "AcDbLine"), DxfVersion::R2000), "100\r\nAcDbLine\r\n");
        assert_eq!(written(CodePair::double(1010, 1.0), DxfVersion::R2000), "1010\r\n1.0\r\n");
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(written(CodePair::int(90, 42), DxfVersion::R2000), " 90\r\n       42\r\n");
        assert_eq!(written(CodePair::long(160, 42), DxfVersion::R2000), "160\r\n42\r\n");
        assert_eq!(written(CodePair::bool(290, true), DxfVersion::R2000), "290\r\n     1\r\n");
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(1.0), "1.0");
        assert_eq!(format_double(0.0), "0.0");
        assert_eq!(format_double(1.5), "1.5");
        assert_eq!(format_double(-2.25), "-2.25");
        assert_eq!(format_double(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_double(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_string_escaping_by_version() {
        assert_eq!(
            written(CodePair::string(1, "Repère"), DxfVersion::R2004),
            "  1\r\nRep\\U+00E8re\r\n"
        );
        assert_eq!(
            written(CodePair::string(1, "Repère"), DxfVersion::R2007),
            "  1\r\nRepère\r\n"
        );
    }

    proptest! {
        #[test]
        fn formatted_double_parses_back_close(v in -1.0e9f64..1.0e9) {
            let text = format_double(v);
            prop_assert!(text.contains('.'));
            prop_assert!(!text.ends_with('.'));
            let back: f64 = text.parse().unwrap();
            prop_assert!((back - v).abs() <= 1e-11 * v.abs().max(1.0));
        }
    }
}
