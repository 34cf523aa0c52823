//! DXF ASCII text reader

use std::io::BufRead;

use encoding_rs::Encoding;

use super::stream_reader::{decode_legacy, parse_value, DxfStreamReader};
use crate::error::{DxfError, Result};
use crate::io::dxf::escape::unescape_unicode;
use crate::io::dxf::{CodePair, CodePairValue};

/// DXF ASCII text file reader
///
/// Each pair spans two lines: the code, then the value. Lines end in
/// `\r\n` or a bare `\n`.
pub struct DxfTextReader<R: BufRead> {
    reader: R,
    /// A line the format detector already consumed
    first_line: Option<String>,
    line_number: u64,
    peeked_pair: Option<CodePair>,
    /// Legacy code page for non-UTF-8 bytes. `None` means UTF-8 with a Latin-1 fallback.
    encoding: Option<&'static Encoding>,
    read_as_utf8: bool,
}

impl<R: BufRead> DxfTextReader<R> {
    /// Create a new DXF text reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            first_line: None,
            line_number: 0,
            peeked_pair: None,
            encoding: None,
            read_as_utf8: false,
        }
    }

    /// Create a reader whose first code line was already consumed from `reader`
    pub fn with_first_line(reader: R, first_line: String) -> Self {
        Self {
            first_line: Some(first_line),
            ..Self::new(reader)
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.first_line.take() {
            self.line_number += 1;
            return Ok(Some(line));
        }

        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        if self.read_as_utf8 {
            return String::from_utf8(bytes).map(Some).map_err(|_| {
                DxfError::Encoding(format!("invalid UTF-8 at line {}", self.line_number))
            });
        }
        decode_legacy(&bytes, self.encoding).map(Some)
    }

    fn read_pair_internal(&mut self) -> Result<Option<CodePair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let code_line_number = self.line_number;

        let code = code_line
            .trim()
            .parse::<i32>()
            .map_err(|_| DxfError::MalformedCode {
                value: code_line.clone(),
                offset: code_line_number,
            })?;

        let value_line = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(DxfError::UnexpectedEndOfInput {
                    offset: code_line_number,
                })
            }
        };

        let value = match parse_value(code, &value_line, self.line_number)? {
            CodePairValue::Str(s) if !self.read_as_utf8 => CodePairValue::Str(unescape_unicode(&s)),
            other => other,
        };
        Ok(Some(CodePair::new(code, value)))
    }
}

impl<R: BufRead> DxfStreamReader for DxfTextReader<R> {
    fn read_pair(&mut self) -> Result<Option<CodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }
        self.read_pair_internal()
    }

    fn push_back(&mut self, pair: CodePair) {
        self.peeked_pair = Some(pair);
    }

    fn position(&self) -> u64 {
        self.line_number
    }

    fn set_utf8(&mut self) {
        self.read_as_utf8 = true;
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &str) -> DxfTextReader<Cursor<Vec<u8>>> {
        DxfTextReader::new(Cursor::new(data.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_simple_pair() {
        let mut reader = reader("  0\r\nSECTION\r\n");
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair, CodePair::string(0, "SECTION"));
        assert_eq!(reader.read_pair().unwrap(), None);
    }

    #[test]
    fn test_bare_newlines() {
        let mut reader = reader("70\n     1\n10\n123.456\n");
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::short(70, 1));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::double(10, 123.456));
    }

    #[test]
    fn test_first_line_already_consumed() {
        let rest = Cursor::new(b"SECTION\r\n".to_vec());
        let mut reader = DxfTextReader::with_first_line(rest, "0".to_string());
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(0, "SECTION"));
    }

    #[test]
    fn test_escaped_string() {
        let mut reader = reader("  1\r\nRep\\U+00E8re\r\n  1\r\n\\U+00E8\r\n");
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(1, "Repère"));
        reader.set_utf8();
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(1, "\\U+00E8"));
    }

    #[test]
    fn test_legacy_encoding() {
        let mut bytes = b"  1\r\n".to_vec();
        bytes.push(0xC0);
        bytes.extend_from_slice(b"\r\n");
        let mut reader = DxfTextReader::new(Cursor::new(bytes));
        reader.set_encoding(encoding_rs::WINDOWS_1251);
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(1, "А"));
    }

    #[test]
    fn test_malformed_code() {
        let mut reader = reader("abc\r\nLINE\r\n");
        assert!(matches!(
            reader.read_pair(),
            Err(DxfError::MalformedCode { offset: 1, .. })
        ));
    }

    #[test]
    fn test_missing_value_line() {
        let mut reader = reader("  0\r\n");
        assert!(matches!(
            reader.read_pair(),
            Err(DxfError::UnexpectedEndOfInput { offset: 1 })
        ));
    }

    #[test]
    fn test_invalid_utf8_after_promotion() {
        let mut reader = DxfTextReader::new(Cursor::new(b"  1\r\n\xFF\r\n".to_vec()));
        reader.set_utf8();
        assert!(matches!(reader.read_pair(), Err(DxfError::Encoding(_))));
    }

    #[test]
    fn test_push_back() {
        let mut reader = reader("  0\r\nSECTION\r\n  2\r\nHEADER\r\n");
        let first = reader.read_pair().unwrap().unwrap();
        reader.push_back(first.clone());
        assert_eq!(reader.read_pair().unwrap().unwrap(), first);
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(2, "HEADER"));
    }
}
