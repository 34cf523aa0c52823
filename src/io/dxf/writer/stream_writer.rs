//! DXF stream writer trait and the in-memory pair collector

use crate::error::Result;
use crate::io::dxf::CodePair;
use crate::types::{Handle, Vector3};

/// Trait for writing DXF code/value pairs
pub trait DxfStreamWriter {
    /// Write one code/value pair
    fn write_pair(&mut self, pair: &CodePair) -> Result<()>;

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;
}

/// Extension trait for convenient writing operations
pub trait DxfStreamWriterExt: DxfStreamWriter {
    fn write_pairs(&mut self, pairs: &[CodePair]) -> Result<()> {
        pairs.iter().try_for_each(|pair| self.write_pair(pair))
    }

    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_pair(&CodePair::string(code, value))
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_pair(&CodePair::short(code, value))
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_pair(&CodePair::double(code, value))
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_pair(&CodePair::handle(code, handle))
    }

    /// Write a 3D point (codes 10/20/30 or similar)
    fn write_point3d(&mut self, x_code: i32, point: Vector3) -> Result<()> {
        self.write_double(x_code, point.x)?;
        self.write_double(x_code + 10, point.y)?;
        self.write_double(x_code + 20, point.z)
    }

    /// Write section start
    fn write_section_start(&mut self, section_name: &str) -> Result<()> {
        self.write_string(0, "SECTION")?;
        self.write_string(2, section_name)
    }

    /// Write section end
    fn write_section_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDSEC")
    }

    /// Write end of file
    fn write_eof(&mut self) -> Result<()> {
        self.write_string(0, "EOF")
    }
}

// Auto-implement the extension trait for all stream writers
impl<T: DxfStreamWriter + ?Sized> DxfStreamWriterExt for T {}

/// Collects pairs in memory instead of encoding them
#[derive(Debug, Default)]
pub struct DxfPairCollector {
    pairs: Vec<CodePair>,
}

impl DxfPairCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_pairs(self) -> Vec<CodePair> {
        self.pairs
    }
}

impl DxfStreamWriter for DxfPairCollector {
    fn write_pair(&mut self, pair: &CodePair) -> Result<()> {
        self.pairs.push(pair.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_framing() {
        let mut writer = DxfPairCollector::new();
        writer.write_section_start("ENTITIES").unwrap();
        writer.write_point3d(10, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        writer.write_section_end().unwrap();
        writer.write_eof().unwrap();

        assert_eq!(
            writer.into_pairs(),
            vec![
                CodePair::string(0, "SECTION"),
                CodePair::string(2, "ENTITIES"),
                CodePair::double(10, 1.0),
                CodePair::double(20, 2.0),
                CodePair::double(30, 3.0),
                CodePair::string(0, "ENDSEC"),
                CodePair::string(0, "EOF"),
            ]
        );
    }
}
