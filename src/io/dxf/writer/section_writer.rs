//! DXF section writers
//!
//! Write the HEADER, TABLES, BLOCKS and ENTITIES sections of a drawing that
//! has already been normalized and given handles.

use tracing::trace;

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::document::Drawing;
use crate::error::Result;
use crate::tables::{Table, TableEntry};
use crate::types::DxfVersion;

/// Writes all DXF sections
pub struct SectionWriter<'a, W: DxfStreamWriter + ?Sized> {
    writer: &'a mut W,
    version: DxfVersion,
}

impl<'a, W: DxfStreamWriter + ?Sized> SectionWriter<'a, W> {
    /// Create a new section writer
    pub fn new(writer: &'a mut W, version: DxfVersion) -> Self {
        Self { writer, version }
    }

    /// Write every section followed by `0/EOF`
    pub fn write_drawing(&mut self, drawing: &Drawing) -> Result<()> {
        self.write_header(drawing)?;
        self.write_tables(drawing)?;
        self.write_blocks(drawing)?;
        self.write_entities(drawing)?;
        self.writer.write_eof()
    }

    /// Write the HEADER section
    pub fn write_header(&mut self, drawing: &Drawing) -> Result<()> {
        self.writer.write_section_start("HEADER")?;
        self.writer.write_pairs(&drawing.header.code_pairs(self.version))?;
        self.writer.write_section_end()
    }

    /// Write the TABLES section
    ///
    /// BLOCK_RECORD is left out before R13.
    pub fn write_tables(&mut self, drawing: &Drawing) -> Result<()> {
        self.writer.write_section_start("TABLES")?;
        self.write_table(&drawing.vports)?;
        self.write_table(&drawing.line_types)?;
        self.write_table(&drawing.layers)?;
        self.write_table(&drawing.text_styles)?;
        self.write_table(&drawing.views)?;
        self.write_table(&drawing.ucss)?;
        self.write_table(&drawing.app_ids)?;
        self.write_table(&drawing.dim_styles)?;
        self.write_table(&drawing.block_records)?;
        self.writer.write_section_end()
    }

    fn write_table<T: TableEntry>(&mut self, table: &Table<T>) -> Result<()> {
        trace!(table = T::TABLE_NAME, entries = table.len(), "writing table");
        self.writer.write_pairs(&table.code_pairs(self.version))
    }

    /// Write the BLOCKS section
    pub fn write_blocks(&mut self, drawing: &Drawing) -> Result<()> {
        self.writer.write_section_start("BLOCKS")?;
        for block in &drawing.blocks {
            self.writer.write_pairs(&block.code_pairs(self.version))?;
        }
        self.writer.write_section_end()
    }

    /// Write the ENTITIES section
    ///
    /// Entities outside their version window produce no pairs.
    pub fn write_entities(&mut self, drawing: &Drawing) -> Result<()> {
        self.writer.write_section_start("ENTITIES")?;
        for entity in &drawing.entities {
            self.writer.write_pairs(&entity.code_pairs(self.version))?;
        }
        self.writer.write_section_end()
    }
}
