//! Drawing document structure

use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;

use crate::blocks::Block;
use crate::entities::EntityType;
use crate::error::Result;
use crate::handles::EntityLocation;
use crate::header::Header;
use crate::io::dxf::{CodePair, DxfPairReader, DxfReader, DxfReaderConfiguration, DxfWriter};
use crate::notification::NotificationCollection;
use crate::tables::*;
use crate::types::{DxfVersion, Handle, Vector3};

pub const MODEL_SPACE: &str = "*MODEL_SPACE";
pub const PAPER_SPACE: &str = "*PAPER_SPACE";

/// An in-memory DXF drawing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub header: Header,

    pub app_ids: Table<AppId>,
    pub block_records: Table<BlockRecord>,
    pub dim_styles: Table<DimStyle>,
    pub layers: Table<Layer>,
    pub line_types: Table<LineType>,
    pub text_styles: Table<TextStyle>,
    pub ucss: Table<Ucs>,
    pub views: Table<View>,
    pub vports: Table<VPort>,

    pub blocks: Vec<Block>,
    /// Model and paper space entities of the ENTITIES section
    pub entities: Vec<EntityType>,

    /// Recoverable conditions met while reading
    pub notifications: NotificationCollection,
}

impl Drawing {
    /// Create an empty drawing; standard table entries are added on write
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(version: DxfVersion) -> Self {
        let mut drawing = Self::new();
        drawing.header.version = version;
        drawing
    }

    /// Read a text or binary DXF stream
    pub fn read<R: Read>(reader: R) -> Result<Drawing> {
        DxfReader::from_reader(reader).read()
    }

    /// Read a stream whose pre-R2007 strings use `encoding`
    pub fn read_with_encoding<R: Read>(reader: R, encoding: &'static Encoding) -> Result<Drawing> {
        DxfReader::from_reader(reader)
            .with_configuration(DxfReaderConfiguration {
                encoding: Some(encoding),
            })
            .read()
    }

    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Drawing> {
        DxfReader::from_file(path)?.read()
    }

    /// Parse DXF text held in memory
    pub fn parse(text: &str) -> Result<Drawing> {
        Self::read(text.as_bytes())
    }

    /// Assemble a drawing from already decoded pairs
    pub fn from_code_pairs(pairs: Vec<CodePair>) -> Result<Drawing> {
        DxfReader::from_stream(DxfPairReader::new(pairs)).read()
    }

    /// Every pair a write at the header version would produce
    pub fn code_pairs(&self) -> Result<Vec<CodePair>> {
        DxfWriter::new(self).write_to_pairs()
    }

    /// The drawing as ASCII DXF text at the header version
    pub fn write_text_string(&self) -> Result<String> {
        let bytes = DxfWriter::new(self).write_to_vec()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        DxfWriter::new(self).write_to_file(path)
    }

    /// Append a model space entity and return where it lives
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> EntityLocation {
        self.entities.push(entity.into());
        EntityLocation::Entities(self.entities.len() - 1)
    }

    pub fn entity_at(&self, location: EntityLocation) -> Option<&EntityType> {
        match location {
            EntityLocation::Entities(i) => self.entities.get(i),
            EntityLocation::Block { block, index } => self.blocks.get(block)?.entities.get(index),
        }
    }

    pub fn entity_at_mut(&mut self, location: EntityLocation) -> Option<&mut EntityType> {
        match location {
            EntityLocation::Entities(i) => self.entities.get_mut(i),
            EntityLocation::Block { block, index } => self.blocks.get_mut(block)?.entities.get_mut(index),
        }
    }

    /// Find a model space or block entity by handle
    pub fn get_item_by_handle(&self, handle: Handle) -> Option<&EntityType> {
        if handle.is_null() {
            return None;
        }
        self.located_entities()
            .find(|(_, e)| e.handle() == handle)
            .map(|(_, e)| e)
    }

    /// The entity owning `entity`, by bound target or else by handle
    pub fn owner_of(&self, entity: &EntityType) -> Option<&EntityType> {
        let owner = entity.as_entity().common().owner;
        match owner.target {
            Some(location) => self.entity_at(location),
            None => self.get_item_by_handle(owner.handle),
        }
    }

    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Add the table entries and blocks every drawing must contain, and the
    /// sequence ends composite entities are written with
    pub fn normalize(&mut self) {
        self.vports.ensure("*ACTIVE");
        self.dim_styles.ensure("STANDARD");
        self.layers.ensure("0");
        for name in ["BYLAYER", "BYBLOCK"] {
            self.line_types.ensure(name);
        }
        if !self.line_types.contains("CONTINUOUS") {
            self.line_types.add(LineType::continuous());
        }
        self.text_styles.ensure("STANDARD");
        self.app_ids.ensure("ACAD");

        for name in [MODEL_SPACE, PAPER_SPACE] {
            if self.block(name).is_none() {
                self.blocks.push(Block::new(name, Vector3::ZERO));
            }
        }
        let names: Vec<String> = self.blocks.iter().map(|b| b.name.clone()).collect();
        for name in &names {
            self.block_records.ensure(name);
        }

        self.for_each_entity_mut(|entity| match entity {
            EntityType::Insert(insert) if !insert.attributes.is_empty() => {
                insert.seqend.get_or_insert_with(Default::default);
            }
            EntityType::Polyline(polyline) => {
                polyline.seqend.get_or_insert_with(Default::default);
            }
            _ => {}
        });
    }

    fn for_each_entity_mut(&mut self, mut f: impl FnMut(&mut EntityType)) {
        for block in &mut self.blocks {
            block.entities.iter_mut().for_each(&mut f);
        }
        self.entities.iter_mut().for_each(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Attribute, Insert, Line, Polyline};
    use crate::handles::Pointer;

    #[test]
    fn test_normalize_adds_standard_items() {
        let mut drawing = Drawing::new();
        drawing.normalize();
        assert!(drawing.vports.contains("*ACTIVE"));
        assert!(drawing.layers.contains("0"));
        assert!(drawing.line_types.contains("CONTINUOUS"));
        assert!(drawing.line_types.contains("BYBLOCK"));
        assert!(drawing.app_ids.contains("ACAD"));
        assert!(drawing.block(MODEL_SPACE).is_some());
        assert!(drawing.block_records.contains(PAPER_SPACE));

        let before = drawing.clone();
        drawing.normalize();
        assert_eq!(drawing, before);
    }

    #[test]
    fn test_normalize_closes_sequences() {
        let mut drawing = Drawing::new();
        let mut insert = Insert::with_block("B", Vector3::ZERO);
        insert.add_attribute(Attribute::with_tag("T", "v"));
        drawing.add_entity(insert);
        drawing.add_entity(Insert::with_block("C", Vector3::ZERO));
        drawing.add_entity(Polyline::new());
        drawing.normalize();

        let EntityType::Insert(with_attributes) = &drawing.entities[0] else { panic!() };
        let EntityType::Insert(without) = &drawing.entities[1] else { panic!() };
        let EntityType::Polyline(polyline) = &drawing.entities[2] else { panic!() };
        assert!(with_attributes.seqend.is_some());
        assert!(without.seqend.is_none());
        assert!(polyline.seqend.is_some());
    }

    #[test]
    fn test_lookup_and_owner() {
        let mut drawing = Drawing::new();
        let mut parent = Line::new();
        parent.common.handle = Handle::new(0x30);
        let parent_at = drawing.add_entity(parent);
        let mut child = Line::new();
        child.common.owner = Pointer::to(parent_at);
        drawing.add_entity(child);

        assert!(drawing.get_item_by_handle(Handle::new(0x30)).is_some());
        assert!(drawing.get_item_by_handle(Handle::NULL).is_none());
        let owner = drawing.owner_of(&drawing.entities[1]).unwrap();
        assert_eq!(owner.handle(), Handle::new(0x30));
    }
}
