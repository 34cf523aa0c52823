//! Binary DXF reader
//!
//! Two record layouts exist. From R13 on, every code is a 2-byte
//! little-endian integer and booleans take one byte. Before R13 codes are a
//! single byte, with 255 escaping to a following 16-bit code, and booleans
//! take two bytes. The layout is detected from the first code of the file,
//! which must be `0/SECTION`: a zero byte followed by another zero byte can
//! only be the high half of a 2-byte code.

use std::io::{self, BufRead, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::Encoding;
use tracing::debug;

use super::stream_reader::{decode_legacy, DxfStreamReader};
use crate::error::{DxfError, Result};
use crate::io::dxf::escape::unescape_unicode;
use crate::io::dxf::{CodePair, CodePairValue, GroupCodeValueType, BINARY_SENTINEL};

/// Binary DXF reader
pub struct DxfBinaryReader<R: BufRead> {
    reader: R,
    offset: u64,
    /// `None` until the first code has been read
    post_r13: Option<bool>,
    peeked_pair: Option<CodePair>,
    encoding: Option<&'static Encoding>,
    read_as_utf8: bool,
}

impl<R: BufRead> DxfBinaryReader<R> {
    /// Create a reader positioned at the very start of a binary DXF stream
    pub fn new(mut reader: R) -> Result<Self> {
        let mut sentinel = [0u8; 22];
        read_exact_or(&mut reader, &mut sentinel, 0)?;
        if sentinel[..] != BINARY_SENTINEL[..] {
            return Err(DxfError::BadSentinel(format!("{:?}", String::from_utf8_lossy(&sentinel))));
        }
        Ok(Self::from_parts(reader, sentinel.len() as u64))
    }

    /// Create a reader after `AutoCAD Binary DXF\r\n` was consumed by format detection.
    ///
    /// Only the trailing `0x1A 0x00` is checked.
    pub fn after_sentinel_line(mut reader: R) -> Result<Self> {
        let mut tail = [0u8; 2];
        let offset = (BINARY_SENTINEL.len() - 2) as u64;
        read_exact_or(&mut reader, &mut tail, offset)?;
        if tail != [0x1A, 0x00] {
            return Err(DxfError::BadSentinel(format!(
                "expected 0x1A 0x00, found {:#04X} {:#04X}",
                tail[0], tail[1]
            )));
        }
        Ok(Self::from_parts(reader, BINARY_SENTINEL.len() as u64))
    }

    fn from_parts(reader: R, offset: u64) -> Self {
        Self {
            reader,
            offset,
            post_r13: None,
            peeked_pair: None,
            encoding: None,
            read_as_utf8: false,
        }
    }

    /// Whether the stream uses the R13+ layout, once known
    pub fn is_post_r13(&self) -> Option<bool> {
        self.post_r13
    }

    fn eof(&self) -> DxfError {
        DxfError::UnexpectedEndOfInput { offset: self.offset }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let value = self.reader.read_u8().map_err(|e| self.map_io(e))?;
        self.offset += 1;
        Ok(value)
    }

    fn read_i16(&mut self) -> Result<i16> {
        let value = self.reader.read_i16::<LittleEndian>().map_err(|e| self.map_io(e))?;
        self.offset += 2;
        Ok(value)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let value = self.reader.read_i32::<LittleEndian>().map_err(|e| self.map_io(e))?;
        self.offset += 4;
        Ok(value)
    }

    fn read_i64(&mut self) -> Result<i64> {
        let value = self.reader.read_i64::<LittleEndian>().map_err(|e| self.map_io(e))?;
        self.offset += 8;
        Ok(value)
    }

    fn read_f64(&mut self) -> Result<f64> {
        let value = self.reader.read_f64::<LittleEndian>().map_err(|e| self.map_io(e))?;
        self.offset += 8;
        Ok(value)
    }

    fn map_io(&self, err: io::Error) -> DxfError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            self.eof()
        } else {
            DxfError::Io(err)
        }
    }

    /// Read the next code; `None` at a clean end of input
    fn read_code(&mut self) -> Result<Option<i32>> {
        if self.reader.fill_buf()?.is_empty() {
            return Ok(None);
        }
        let first = self.read_u8()?;

        let post_r13 = match self.post_r13 {
            Some(layout) => layout,
            None => {
                let next = self.reader.fill_buf()?.first().copied();
                let layout = first == 0 && next == Some(0);
                debug!(post_r13 = layout, "detected binary DXF code width");
                self.post_r13 = Some(layout);
                layout
            }
        };

        let code = if post_r13 {
            let high = self.read_u8()?;
            i16::from_le_bytes([first, high]) as i32
        } else if first == 255 {
            self.read_i16()? as i32
        } else {
            first as i32
        };
        Ok(Some(code))
    }

    fn read_string(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        let read = self.reader.read_until(0, &mut bytes)?;
        self.offset += read as u64;
        if bytes.pop() != Some(0) {
            return Err(self.eof());
        }
        if self.read_as_utf8 {
            return String::from_utf8(bytes)
                .map_err(|_| DxfError::Encoding(format!("invalid UTF-8 before byte {}", self.offset)));
        }
        decode_legacy(&bytes, self.encoding).map(|s| unescape_unicode(&s))
    }

    fn read_pair_internal(&mut self) -> Result<Option<CodePair>> {
        let code = match self.read_code()? {
            Some(code) => code,
            None => return Ok(None),
        };

        let value = match GroupCodeValueType::from_code(code) {
            GroupCodeValueType::Bool => {
                if self.post_r13 == Some(true) {
                    CodePairValue::Boolean(self.read_u8()? != 0)
                } else {
                    CodePairValue::Boolean(self.read_i16()? != 0)
                }
            }
            GroupCodeValueType::Int16 => CodePairValue::Short(self.read_i16()?),
            GroupCodeValueType::Int32 => CodePairValue::Integer(self.read_i32()?),
            GroupCodeValueType::Int64 => CodePairValue::Long(self.read_i64()?),
            GroupCodeValueType::Double => CodePairValue::Double(self.read_f64()?),
            GroupCodeValueType::String => CodePairValue::Str(self.read_string()?),
            GroupCodeValueType::Unknown => {
                return Err(DxfError::UnknownCode {
                    code,
                    offset: self.offset,
                })
            }
        };
        Ok(Some(CodePair::new(code, value)))
    }
}

fn read_exact_or<R: Read>(reader: &mut R, buf: &mut [u8], offset: u64) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DxfError::BadSentinel(format!(
            "stream ended inside the {}-byte sentinel at {}",
            BINARY_SENTINEL.len(),
            offset
        )),
        _ => DxfError::Io(e),
    })
}

impl<R: BufRead> DxfStreamReader for DxfBinaryReader<R> {
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
        self.offset
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

    fn stream(body: &[u8]) -> Cursor<Vec<u8>> {
        let mut bytes = BINARY_SENTINEL.to_vec();
        bytes.extend_from_slice(body);
        Cursor::new(bytes)
    }

    #[test]
    fn test_bad_sentinel() {
        let result = DxfBinaryReader::new(Cursor::new(b"AutoCAD Binary DXF\r\n\x1A\x01".to_vec()));
        assert!(matches!(result, Err(DxfError::BadSentinel(_))));

        let short = DxfBinaryReader::new(Cursor::new(b"AutoCAD".to_vec()));
        assert!(matches!(short, Err(DxfError::BadSentinel(_))));
    }

    #[test]
    fn test_post_r13_codes() {
        let mut body = vec![0x00, 0x00];
        body.extend_from_slice(b"SECTION\0");
        body.extend_from_slice(&[0x22, 0x01, 0x01]); // 290, bool as one byte
        let mut reader = DxfBinaryReader::new(stream(&body)).unwrap();

        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(0, "SECTION"));
        assert_eq!(reader.is_post_r13(), Some(true));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::bool(290, true));
        assert_eq!(reader.read_pair().unwrap(), None);
    }

    #[test]
    fn test_pre_r13_codes_with_escape() {
        let mut body = vec![0x00];
        body.extend_from_slice(b"SECTION\0");
        body.extend_from_slice(&[0xFF, 0x22, 0x01, 0x01, 0x00]); // 290, bool as two bytes
        body.extend_from_slice(&[0x46, 0x07, 0x00]); // 70 = 7
        let mut reader = DxfBinaryReader::new(stream(&body)).unwrap();

        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(0, "SECTION"));
        assert_eq!(reader.is_post_r13(), Some(false));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::bool(290, true));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::short(70, 7));
    }

    #[test]
    fn test_numeric_values() {
        let mut body = vec![0x00, 0x00];
        body.extend_from_slice(b"SECTION\0");
        body.extend_from_slice(&[0x0A, 0x00]);
        body.extend_from_slice(&1.5f64.to_le_bytes());
        body.extend_from_slice(&[0x5A, 0x00]);
        body.extend_from_slice(&(-3i32).to_le_bytes());
        body.extend_from_slice(&[0xA0, 0x00]);
        body.extend_from_slice(&42i64.to_le_bytes());
        let mut reader = DxfBinaryReader::new(stream(&body)).unwrap();

        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(0, "SECTION"));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::double(10, 1.5));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::int(90, -3));
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::long(160, 42));
    }

    #[test]
    fn test_truncated_value() {
        let body = [0x0A, 0x00, 0x00, 0x00, 0xF8];
        let mut reader = DxfBinaryReader::new(stream(&body)).unwrap();
        assert!(matches!(
            reader.read_pair(),
            Err(DxfError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_unterminated_string() {
        let mut body = vec![0x00, 0x00];
        body.extend_from_slice(b"SECT");
        let mut reader = DxfBinaryReader::new(stream(&body)).unwrap();
        assert!(matches!(
            reader.read_pair(),
            Err(DxfError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_after_sentinel_line() {
        let mut bytes = vec![0x1A, 0x00, 0x00];
        bytes.extend_from_slice(b"EOF\0");
        let mut reader = DxfBinaryReader::after_sentinel_line(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.read_pair().unwrap().unwrap(), CodePair::string(0, "EOF"));
    }
}
