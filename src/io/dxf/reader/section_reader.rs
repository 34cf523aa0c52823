//! Section readers: map the pair stream of each section onto a [`Drawing`]

use ahash::AHashSet;
use tracing::{debug, trace, warn};

use super::entity_buffer::group_entities;
use super::stream_reader::DxfStreamReader;
use super::DxfReaderConfiguration;
use crate::blocks::Block;
use crate::document::Drawing;
use crate::entities::{Dimension, EntityType};
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::encoding_from_code_page;
use crate::io::dxf::CodePair;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tables::{Table, TableEntry};
use crate::types::DxfVersion;

/// Reads the sections of one stream
pub struct SectionReader<'r> {
    reader: &'r mut dyn DxfStreamReader,
    config: DxfReaderConfiguration,
    notifications: NotificationCollection,
    /// Entity types already reported as skipped
    skipped_entities: AHashSet<String>,
}

impl<'r> SectionReader<'r> {
    pub fn new(reader: &'r mut dyn DxfStreamReader, config: DxfReaderConfiguration) -> Self {
        Self {
            reader,
            config,
            notifications: NotificationCollection::new(),
            skipped_entities: AHashSet::new(),
        }
    }

    pub fn reader(&mut self) -> &mut dyn DxfStreamReader {
        &mut *self.reader
    }

    pub fn into_notifications(self) -> NotificationCollection {
        self.notifications
    }

    /// A framing error for `found`, positioned at the current stream offset
    pub fn mismatch(&self, expected: impl Into<String>, found: CodePair) -> DxfError {
        DxfError::expected(expected, found, self.reader.position())
    }

    /// Read pairs up to the next `0` pair, which is pushed back
    fn read_record_body(&mut self) -> Result<Vec<CodePair>> {
        let mut pairs = Vec::new();
        loop {
            let pair = self.reader.expect_pair()?;
            if pair.code == 0 {
                self.reader.push_back(pair);
                return Ok(pairs);
            }
            pairs.push(pair);
        }
    }

    /// Discard pairs up to and including `0/<marker>`
    fn skip_to_marker(&mut self, marker: &str) -> Result<()> {
        loop {
            if self.reader.expect_pair()?.is_marker(marker) {
                return Ok(());
            }
        }
    }

    /// Discard an unrecognized section
    pub fn skip_section(&mut self, name: &str) -> Result<()> {
        debug!(section = name, "skipping unsupported section");
        self.notifications
            .notify(NotificationType::NotSupported, format!("section {} skipped", name));
        self.skip_to_marker("ENDSEC")
    }

    // ===== HEADER =====

    /// Read the HEADER section
    ///
    /// Switches the stream to UTF-8 once `$ACADVER` names R2007 or later,
    /// and to the `$DWGCODEPAGE` encoding for older files when the caller
    /// did not configure one.
    pub fn read_header(&mut self, drawing: &mut Drawing) -> Result<()> {
        loop {
            let pair = self.reader.expect_pair()?;
            if pair.is_end_section() {
                return Ok(());
            }
            if pair.code != 9 {
                trace!(%pair, "ignoring pair outside a header variable");
                continue;
            }

            let name = pair.as_str().unwrap_or_default().to_string();
            let mut values = Vec::new();
            loop {
                let value = self.reader.expect_pair()?;
                if value.code == 0 || value.code == 9 {
                    self.reader.push_back(value);
                    break;
                }
                values.push(value);
            }

            if let Some(notification) = drawing.header.apply_variable(&name, values) {
                warn!("{}", notification.message);
                self.notifications.push(notification);
            }

            match name.as_str() {
                "$ACADVER" if drawing.header.version.is_utf8() => {
                    debug!(version = %drawing.header.version, "switching to UTF-8 strings");
                    self.reader.set_utf8();
                }
                "$DWGCODEPAGE" => self.apply_code_page(drawing.header.version, &drawing.header.code_page),
                _ => {}
            }
        }
    }

    fn apply_code_page(&mut self, version: DxfVersion, code_page: &str) {
        if self.config.encoding.is_some() || version.is_utf8() {
            return;
        }
        match encoding_from_code_page(code_page) {
            Ok(Some(encoding)) => {
                debug!(code_page, encoding = encoding.name(), "using drawing code page");
                self.reader.set_encoding(encoding);
            }
            Ok(None) => {}
            Err(name) => {
                warn!(code_page = %name, "unknown code page");
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("unknown code page {}, strings read as UTF-8 or Latin-1", name),
                );
            }
        }
    }

    // ===== TABLES =====

    /// Read the TABLES section
    pub fn read_tables(&mut self, drawing: &mut Drawing) -> Result<()> {
        loop {
            let pair = self.reader.expect_pair()?;
            if pair.is_end_section() {
                return Ok(());
            }
            if pair.is_start_table() {
                self.read_table(drawing)?;
            } else if pair.code == 0 {
                return Err(self.mismatch("0/TABLE", pair));
            }
        }
    }

    fn read_table(&mut self, drawing: &mut Drawing) -> Result<()> {
        let name = loop {
            let pair = self.reader.expect_pair()?;
            match (pair.code, pair.as_str()) {
                (2, Some(name)) => break name.to_string(),
                (0, _) => return Err(self.mismatch("2/<table name>", pair)),
                _ => {}
            }
        };
        trace!(table = %name, "reading table");

        match name.as_str() {
            "APPID" => self.read_table_entries(&mut drawing.app_ids),
            "BLOCK_RECORD" => self.read_table_entries(&mut drawing.block_records),
            "DIMSTYLE" => self.read_table_entries(&mut drawing.dim_styles),
            "LAYER" => self.read_table_entries(&mut drawing.layers),
            "LTYPE" => self.read_table_entries(&mut drawing.line_types),
            "STYLE" => self.read_table_entries(&mut drawing.text_styles),
            "UCS" => self.read_table_entries(&mut drawing.ucss),
            "VIEW" => self.read_table_entries(&mut drawing.views),
            "VPORT" => self.read_table_entries(&mut drawing.vports),
            _ => {
                debug!(table = %name, "skipping unsupported table");
                self.notifications
                    .notify(NotificationType::NotSupported, format!("table {} skipped", name));
                self.skip_to_marker("ENDTAB")
            }
        }
    }

    fn read_table_entries<T: TableEntry>(&mut self, table: &mut Table<T>) -> Result<()> {
        for pair in self.read_record_body()? {
            if pair.code == 5 {
                if let Some(handle) = pair.as_handle() {
                    table.set_handle(handle);
                }
            }
        }

        loop {
            let pair = self.reader.expect_pair()?;
            if pair.is_end_table() {
                return Ok(());
            }
            if !pair.is_marker(T::TABLE_NAME) {
                return Err(self.mismatch(format!("0/{}", T::TABLE_NAME), pair));
            }

            let mut entry = T::default();
            for pair in self.read_record_body()? {
                entry.try_apply_code_pair(&pair);
            }
            let name = entry.name().to_string();
            if !table.add(entry) {
                warn!(table = T::TABLE_NAME, %name, "duplicate table entry");
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("duplicate {} entry {} ignored", T::TABLE_NAME, name),
                );
            }
        }
    }

    // ===== BLOCKS =====

    /// Read the BLOCKS section
    pub fn read_blocks(&mut self, drawing: &mut Drawing) -> Result<()> {
        loop {
            let pair = self.reader.expect_pair()?;
            if pair.is_end_section() {
                return Ok(());
            }
            if pair.is_marker("BLOCK") {
                let block = self.read_block()?;
                drawing.blocks.push(block);
            } else if pair.code == 0 {
                return Err(self.mismatch("0/BLOCK", pair));
            }
        }
    }

    /// Read a single BLOCK...ENDBLK definition
    fn read_block(&mut self) -> Result<Block> {
        let mut block = Block::default();
        for pair in self.read_record_body()? {
            block.apply_code_pair(&pair);
        }
        trace!(block = %block.name, "reading block");

        block.entities = self.read_entity_list("ENDBLK")?;

        for pair in self.read_record_body()? {
            block.apply_end_code_pair(&pair);
        }
        Ok(block)
    }

    // ===== ENTITIES =====

    /// Read the ENTITIES section
    pub fn read_entities(&mut self, drawing: &mut Drawing) -> Result<()> {
        let entities = self.read_entity_list("ENDSEC")?;
        debug!(count = entities.len(), "read entities");
        drawing.entities.extend(entities);
        Ok(())
    }

    /// Read flat entity records up to and including `0/<terminator>`, then
    /// group composite entities
    fn read_entity_list(&mut self, terminator: &str) -> Result<Vec<EntityType>> {
        let mut flat = Vec::new();
        loop {
            let pair = self.reader.expect_pair()?;
            let type_name = match (pair.code, pair.as_str()) {
                (0, Some(name)) => name.to_string(),
                _ => return Err(self.mismatch("0/<entity type>", pair)),
            };

            if type_name == terminator {
                break;
            }
            if matches!(type_name.as_str(), "SECTION" | "ENDSEC" | "EOF" | "BLOCK" | "ENDBLK") {
                return Err(self.mismatch(format!("0/{}", terminator), pair));
            }

            if type_name == "DIMENSION" {
                let offset = self.reader.position();
                let mut pairs = vec![pair];
                pairs.extend(self.read_record_body()?);
                flat.push(EntityType::Dimension(Dimension::from_code_pairs(&pairs, offset)?));
                continue;
            }

            match EntityType::from_type_string(&type_name) {
                Some(mut entity) => {
                    let target = entity.as_entity_mut();
                    for pair in self.read_record_body()? {
                        target.try_apply_code_pair(&pair);
                    }
                    flat.push(entity);
                }
                None => {
                    self.read_record_body()?;
                    if self.skipped_entities.insert(type_name.clone()) {
                        debug!(entity = %type_name, "skipping unsupported entity");
                        self.notifications.notify(
                            NotificationType::NotSupported,
                            format!("entity {} skipped", type_name),
                        );
                    }
                }
            }
        }
        Ok(group_entities(flat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::DxfPairReader;
    use crate::types::{Handle, Vector3};

    fn read_with(pairs: Vec<CodePair>, f: impl FnOnce(&mut SectionReader, &mut Drawing) -> Result<()>) -> Result<(Drawing, NotificationCollection)> {
        let mut stream = DxfPairReader::new(pairs);
        let mut sections = SectionReader::new(&mut stream, DxfReaderConfiguration::default());
        let mut drawing = Drawing::new();
        f(&mut sections, &mut drawing)?;
        Ok((drawing, sections.into_notifications()))
    }

    fn s(code: i32, value: &str) -> CodePair {
        CodePair::string(code, value)
    }

    #[test]
    fn test_header_variables() {
        let pairs = vec![
            s(9, "$ACADVER"),
            s(1, "AC1015"),
            s(9, "$LTSCALE"),
            CodePair::double(40, 2.5),
            s(9, "$INSBASE"),
            CodePair::double(10, 1.0),
            CodePair::double(20, 2.0),
            CodePair::double(30, 0.0),
            s(0, "ENDSEC"),
        ];
        let (drawing, notifications) = read_with(pairs, |r, d| r.read_header(d)).unwrap();
        assert_eq!(drawing.header.version, DxfVersion::R2000);
        assert_eq!(drawing.header.insertion_base, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(drawing.header.variables["$LTSCALE"], vec![CodePair::double(40, 2.5)]);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_unknown_code_page_is_reported() {
        let pairs = vec![s(9, "$DWGCODEPAGE"), s(3, "EBCDIC"), s(0, "ENDSEC")];
        let (_, notifications) = read_with(pairs, |r, d| r.read_header(d)).unwrap();
        assert!(notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_table_with_duplicate_entry() {
        let pairs = vec![
            s(2, "LAYER"),
            s(5, "2"),
            CodePair::short(70, 2),
            s(0, "LAYER"),
            s(2, "WALLS"),
            CodePair::short(62, 1),
            s(0, "LAYER"),
            s(2, "walls"),
            s(0, "ENDTAB"),
            s(0, "ENDSEC"),
        ];
        let (drawing, notifications) = read_with(pairs, |r, d| r.read_table(d)).unwrap();
        assert_eq!(drawing.layers.handle(), Handle::new(2));
        assert_eq!(drawing.layers.len(), 1);
        assert_eq!(drawing.layers.get("WALLS").map(|l| l.color), Some(1));
        assert_eq!(notifications.of_type(NotificationType::Warning).len(), 1);
    }

    #[test]
    fn test_unknown_table_is_skipped() {
        let pairs = vec![
            s(0, "TABLE"),
            s(2, "FOO"),
            s(0, "FOO"),
            s(2, "x"),
            s(0, "ENDTAB"),
            s(0, "TABLE"),
            s(2, "APPID"),
            s(0, "APPID"),
            s(2, "ACAD"),
            s(0, "ENDTAB"),
            s(0, "ENDSEC"),
        ];
        let (drawing, notifications) = read_with(pairs, |r, d| r.read_tables(d)).unwrap();
        assert!(drawing.app_ids.contains("ACAD"));
        assert!(notifications.has_type(NotificationType::NotSupported));
    }

    #[test]
    fn test_wrong_table_item_type_fails() {
        let pairs = vec![s(0, "TABLE"), s(2, "LAYER"), s(0, "LTYPE"), s(0, "ENDTAB")];
        let err = read_with(pairs, |r, d| r.read_tables(d)).unwrap_err();
        assert!(matches!(err, DxfError::StructuralMismatch { .. }));
    }

    #[test]
    fn test_block_with_entities() {
        let pairs = vec![
            s(0, "BLOCK"),
            s(5, "20"),
            s(8, "0"),
            s(2, "DOOR"),
            CodePair::double(10, 1.0),
            s(0, "LINE"),
            CodePair::double(11, 5.0),
            s(0, "ENDBLK"),
            s(5, "21"),
            s(0, "ENDSEC"),
        ];
        let (drawing, _) = read_with(pairs, |r, d| r.read_blocks(d)).unwrap();
        let block = &drawing.blocks[0];
        assert_eq!(block.name, "DOOR");
        assert_eq!(block.base_point.x, 1.0);
        assert_eq!(block.end_handle, Handle::new(0x21));
        assert_eq!(block.entities.len(), 1);
    }

    #[test]
    fn test_unknown_entities_reported_once() {
        let pairs = vec![
            s(0, "HATCH"),
            s(8, "0"),
            s(0, "POINT"),
            s(0, "HATCH"),
            s(0, "ENDSEC"),
        ];
        let (drawing, notifications) = read_with(pairs, |r, d| r.read_entities(d)).unwrap();
        assert_eq!(drawing.entities.len(), 1);
        assert_eq!(notifications.of_type(NotificationType::NotSupported).len(), 1);
    }

    #[test]
    fn test_missing_endsec_fails() {
        let pairs = vec![s(0, "POINT"), s(0, "EOF")];
        let err = read_with(pairs, |r, d| r.read_entities(d)).unwrap_err();
        assert!(matches!(err, DxfError::StructuralMismatch { .. }));
    }

    #[test]
    fn test_truncated_entities_fail() {
        let pairs = vec![s(0, "POINT"), s(8, "0")];
        let err = read_with(pairs, |r, d| r.read_entities(d)).unwrap_err();
        assert!(matches!(err, DxfError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_dimension_is_dispatched() {
        let pairs = vec![
            s(0, "DIMENSION"),
            s(2, "*D1"),
            CodePair::short(70, 4),
            s(0, "ENDSEC"),
        ];
        let (drawing, _) = read_with(pairs, |r, d| r.read_entities(d)).unwrap();
        let EntityType::Dimension(dimension) = &drawing.entities[0] else { panic!() };
        assert_eq!(dimension.dimension_type(), crate::entities::DimensionType::Radius);
        assert_eq!(dimension.base().block_name, "*D1");
    }
}
