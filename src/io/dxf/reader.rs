//! DXF file reader

mod binary_reader;
mod entity_buffer;
mod section_reader;
mod stream_reader;
mod text_reader;

pub use binary_reader::DxfBinaryReader;
pub use stream_reader::{DxfPairReader, DxfStreamReader};
pub use text_reader::DxfTextReader;

use section_reader::SectionReader;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use encoding_rs::Encoding;
use tracing::debug;

use crate::document::Drawing;
use crate::error::Result;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const BINARY_SENTINEL_LINE: &[u8] = b"AutoCAD Binary DXF";

/// Configuration for the DXF reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfReaderConfiguration {
    /// Encoding of string values in files older than R2007.
    ///
    /// When `None`, the encoding named by `$DWGCODEPAGE` is used if it is
    /// known, and undecodable bytes otherwise fall back to Latin-1.
    pub encoding: Option<&'static Encoding>,
}

enum Source<'a> {
    /// Raw bytes whose format is detected on read
    Bytes(Box<dyn BufRead + 'a>),
    /// An already decoded pair stream
    Pairs(Box<dyn DxfStreamReader + 'a>),
}

/// DXF file reader
///
/// Accepts text and binary DXF from any [`Read`]; the format is detected
/// from the first line, so the source does not need to be seekable.
pub struct DxfReader<'a> {
    source: Source<'a>,
    config: DxfReaderConfiguration,
}

impl<'a> DxfReader<'a> {
    /// Create a new DXF reader from any reader
    pub fn from_reader<R: Read + 'a>(reader: R) -> Self {
        Self {
            source: Source::Bytes(Box::new(BufReader::new(reader))),
            config: DxfReaderConfiguration::default(),
        }
    }

    /// Create a reader over code pairs produced by any stream reader
    pub fn from_stream(stream: impl DxfStreamReader + 'a) -> Self {
        Self {
            source: Source::Pairs(Box::new(stream)),
            config: DxfReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the whole stream into a [`Drawing`]
    pub fn read(self) -> Result<Drawing> {
        let config = self.config;
        let mut stream = match self.source {
            Source::Bytes(bytes) => detect_format(bytes)?,
            Source::Pairs(pairs) => pairs,
        };
        if let Some(encoding) = config.encoding {
            stream.set_encoding(encoding);
        }

        let mut drawing = Drawing::new();
        let mut sections = SectionReader::new(stream.as_mut(), config);

        while let Some(pair) = sections.reader().read_pair()? {
            if pair.is_eof() {
                break;
            }
            if !pair.is_start_section() {
                return Err(sections.mismatch("0/SECTION", pair));
            }

            let name_pair = sections.reader().expect_pair()?;
            let name = match (name_pair.code, name_pair.as_str()) {
                (2, Some(name)) => name.to_string(),
                _ => return Err(sections.mismatch("2/<section name>", name_pair)),
            };
            debug!(section = %name, "reading section");

            match name.as_str() {
                "HEADER" => sections.read_header(&mut drawing)?,
                "TABLES" => sections.read_tables(&mut drawing)?,
                "BLOCKS" => sections.read_blocks(&mut drawing)?,
                "ENTITIES" => sections.read_entities(&mut drawing)?,
                _ => sections.skip_section(&name)?,
            }
        }

        drawing.notifications = sections.into_notifications();
        drawing.bind_pointers();
        Ok(drawing)
    }
}

impl DxfReader<'static> {
    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

/// Pick the text or binary decoder from the first line of `input`.
///
/// The line is consumed either way: the binary reader only checks the rest
/// of the sentinel, and the text reader receives the line as its first code
/// line.
fn detect_format<'a>(mut input: Box<dyn BufRead + 'a>) -> Result<Box<dyn DxfStreamReader + 'a>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        debug!("empty input");
        return Ok(Box::new(DxfTextReader::new(input)));
    }

    let mut content = line.as_slice();
    while let Some((&(b'\n' | b'\r'), rest)) = content.split_last() {
        content = rest;
    }
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    if content == BINARY_SENTINEL_LINE {
        debug!("detected binary DXF");
        return Ok(Box::new(DxfBinaryReader::after_sentinel_line(input)?));
    }

    debug!("detected text DXF");
    let first_line = String::from_utf8_lossy(content).into_owned();
    Ok(Box::new(DxfTextReader::with_first_line(input, first_line)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DxfError;
    use crate::entities::EntityType;
    use crate::io::dxf::{CodePair, BINARY_SENTINEL};

    #[test]
    fn test_empty_input_is_empty_drawing() {
        let drawing = DxfReader::from_reader(&b""[..]).read().unwrap();
        assert!(drawing.entities.is_empty());
        assert!(drawing.notifications.is_empty());
    }

    #[test]
    fn test_bom_is_skipped() {
        let text = "\u{feff}  0\r\nSECTION\r\n  2\r\nENTITIES\r\n  0\r\nPOINT\r\n  0\r\nENDSEC\r\n  0\r\nEOF\r\n";
        let drawing = DxfReader::from_reader(text.as_bytes()).read().unwrap();
        assert_eq!(drawing.entities.len(), 1);
    }

    #[test]
    fn test_missing_eof_is_tolerated() {
        let text = "0\nSECTION\n2\nENTITIES\n0\nPOINT\n0\nENDSEC\n";
        let drawing = DxfReader::from_reader(text.as_bytes()).read().unwrap();
        assert!(matches!(drawing.entities[0], EntityType::Point(_)));
    }

    #[test]
    fn test_pairs_outside_sections_fail() {
        let text = "0\nLINE\n0\nEOF\n";
        let err = DxfReader::from_reader(text.as_bytes()).read().unwrap_err();
        assert!(matches!(err, DxfError::StructuralMismatch { offset: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_section_without_name_fails() {
        let pairs = vec![CodePair::string(0, "SECTION"), CodePair::string(0, "ENDSEC")];
        let err = DxfReader::from_stream(DxfPairReader::new(pairs)).read().unwrap_err();
        assert!(matches!(err, DxfError::StructuralMismatch { offset: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_bad_binary_tail_fails() {
        let mut bytes = BINARY_SENTINEL.to_vec();
        bytes[21] = 0x01;
        let err = DxfReader::from_reader(bytes.as_slice()).read().unwrap_err();
        assert!(matches!(err, DxfError::BadSentinel(_)));
    }

    #[test]
    fn test_binary_with_only_sentinel() {
        let drawing = DxfReader::from_reader(BINARY_SENTINEL).read().unwrap();
        assert!(drawing.entities.is_empty());
    }
}
