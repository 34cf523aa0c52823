//! DXF writer module

mod binary_writer;
mod section_writer;
mod stream_writer;
mod text_writer;

pub use binary_writer::DxfBinaryWriter;
pub use stream_writer::{DxfPairCollector, DxfStreamWriter, DxfStreamWriterExt};
pub use text_writer::DxfTextWriter;

use section_writer::SectionWriter;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::document::Drawing;
use crate::error::Result;
use crate::io::dxf::CodePair;
use crate::types::DxfVersion;

/// DXF file writer
///
/// Writing never changes the borrowed drawing: it works on a copy that is
/// normalized, given handles and stamped with the target version.
pub struct DxfWriter<'a> {
    drawing: &'a Drawing,
    version: DxfVersion,
    binary: bool,
}

impl<'a> DxfWriter<'a> {
    /// Create a writer for ASCII output at the drawing's header version
    pub fn new(drawing: &'a Drawing) -> Self {
        Self {
            drawing,
            version: drawing.header.version,
            binary: false,
        }
    }

    /// Write as `version` instead of the header version
    pub fn with_version(mut self, version: DxfVersion) -> Self {
        self.version = version;
        self
    }

    /// Choose binary (`true`) or ASCII (`false`) output
    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// The drawing exactly as it will be written
    fn prepare(&self) -> Drawing {
        let mut drawing = self.drawing.clone();
        drawing.header.version = self.version;
        drawing.normalize();
        drawing.assign_handles();
        drawing.assign_pointers();
        drawing
    }

    fn write_dxf<W: DxfStreamWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let drawing = self.prepare();
        debug!(version = %self.version, binary = self.binary, "writing DXF");
        SectionWriter::new(writer, self.version).write_drawing(&drawing)?;
        writer.flush()
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        if self.binary {
            let mut stream_writer = DxfBinaryWriter::new(writer, self.version)?;
            self.write_dxf(&mut stream_writer)
        } else {
            let mut stream_writer = DxfTextWriter::new(writer, self.version);
            self.write_dxf(&mut stream_writer)
        }
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// The pairs a write would encode, without encoding them
    pub fn write_to_pairs(&self) -> Result<Vec<CodePair>> {
        let mut collector = DxfPairCollector::new();
        self.write_dxf(&mut collector)?;
        Ok(collector.into_pairs())
    }
}
