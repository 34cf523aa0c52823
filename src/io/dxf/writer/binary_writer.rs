//! Binary DXF writer

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::stream_writer::DxfStreamWriter;
use crate::error::Result;
use crate::io::dxf::escape::escape_unicode;
use crate::io::dxf::{CodePair, CodePairValue, BINARY_SENTINEL};
use crate::types::DxfVersion;

/// Binary DXF stream writer
///
/// The record layout follows the target version: 2-byte codes and 1-byte
/// booleans from R13 on, otherwise 1-byte codes (255 escapes to a 16-bit
/// code) and 2-byte booleans. Before R2007 strings are `\U+XXXX`-escaped
/// as in text files.
pub struct DxfBinaryWriter<W: Write> {
    writer: W,
    post_r13: bool,
    utf8: bool,
}

impl<W: Write> DxfBinaryWriter<W> {
    /// Create a new binary DXF writer; the sentinel is written immediately
    pub fn new(mut writer: W, version: DxfVersion) -> Result<Self> {
        writer.write_all(BINARY_SENTINEL)?;
        Ok(Self {
            writer,
            post_r13: version.is_post_r13(),
            utf8: version.is_utf8(),
        })
    }

    fn write_code(&mut self, code: i32) -> Result<()> {
        if self.post_r13 {
            self.writer.write_i16::<LittleEndian>(code as i16)?;
        } else if code >= 255 {
            self.writer.write_u8(255)?;
            self.writer.write_i16::<LittleEndian>(code as i16)?;
        } else {
            self.writer.write_u8(code as u8)?;
        }
        Ok(())
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DxfStreamWriter for DxfBinaryWriter<W> {
    fn write_pair(&mut self, pair: &CodePair) -> Result<()> {
        self.write_code(pair.code)?;
        match &pair.value {
            CodePairValue::Boolean(v) => {
                if self.post_r13 {
                    self.writer.write_u8(*v as u8)?;
                } else {
                    self.writer.write_i16::<LittleEndian>(*v as i16)?;
                }
            }
            CodePairValue::Short(v) => self.writer.write_i16::<LittleEndian>(*v)?,
            CodePairValue::Integer(v) => self.writer.write_i32::<LittleEndian>(*v)?,
            CodePairValue::Long(v) => self.writer.write_i64::<LittleEndian>(*v)?,
            CodePairValue::Double(v) => self.writer.write_f64::<LittleEndian>(*v)?,
            CodePairValue::Str(s) if self.utf8 => {
                self.writer.write_all(s.as_bytes())?;
                self.writer.write_u8(0)?;
            }
            CodePairValue::Str(s) => {
                self.writer.write_all(escape_unicode(s).as_bytes())?;
                self.writer.write_u8(0)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
