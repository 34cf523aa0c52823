//! # acad-dxf
//!
//! A pure Rust library for reading and writing DXF drawings in both the
//! ASCII and the binary encoding, from MC0.0 through AC1032 (R2018).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use acad_dxf::{Drawing, DxfVersion, DxfWriter};
//!
//! // Read a text or binary DXF file
//! let drawing = Drawing::read_file("sample.dxf")?;
//!
//! for entity in &drawing.entities {
//!     println!("{} {}", entity.as_entity().entity_type(), entity.handle());
//! }
//!
//! // Write it back as binary R2000
//! DxfWriter::new(&drawing)
//!     .with_version(DxfVersion::R2000)
//!     .binary(true)
//!     .write_to_file("output.dxf")?;
//! # Ok::<(), acad_dxf::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf`] turns bytes into [`CodePair`]s and back. Text and binary
//!   streams share the [`DxfStreamReader`](io::dxf::DxfStreamReader) and
//!   [`DxfStreamWriter`](io::dxf::DxfStreamWriter) traits.
//! - The section readers assemble pairs into a [`Drawing`]: the header,
//!   nine symbol tables, block definitions and the entity list.
//! - Entities are a closed set ([`EntityType`]); each kind applies and
//!   emits its own pairs through the [`Entity`](entities::Entity) trait.
//! - Owner references are [`Pointer`]s: a handle from the file, bound to
//!   an [`EntityLocation`] after the whole drawing is read.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blocks;
pub mod document;
pub mod entities;
pub mod error;
pub mod handles;
pub mod header;
pub mod io;
pub mod notification;
pub mod tables;
pub mod types;

pub use blocks::Block;
pub use document::Drawing;
pub use entities::{Entity, EntityType};
pub use error::{DxfError, Result};
pub use handles::{EntityLocation, Pointer};
pub use header::Header;
pub use io::dxf::{CodePair, CodePairValue, DxfReader, DxfReaderConfiguration, DxfWriter};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{DxfVersion, Handle, Vector3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
