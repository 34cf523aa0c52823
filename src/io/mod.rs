//! I/O for DXF drawings

pub mod dxf;

pub use dxf::{DxfReader, DxfReaderConfiguration, DxfWriter};
