//! DXF (Drawing Exchange Format) reading and writing
//!
//! Both wire formats are reduced to a stream of [`CodePair`]s. The readers
//! and writers in this module only translate between bytes and pairs; the
//! section readers and writers map pairs onto a [`Drawing`](crate::Drawing).

pub mod code_page;
mod code_pair;
pub(crate) mod escape;
mod group_code_value;
mod reader;
mod writer;

pub use code_pair::{CodePair, CodePairValue};
pub use group_code_value::GroupCodeValueType;
pub use reader::{
    DxfBinaryReader, DxfPairReader, DxfReader, DxfReaderConfiguration, DxfStreamReader,
    DxfTextReader,
};
pub use writer::{
    DxfBinaryWriter, DxfPairCollector, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter,
    DxfWriter,
};

/// Magic bytes opening every binary DXF file
pub const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF\r\n\x1a\x00";
