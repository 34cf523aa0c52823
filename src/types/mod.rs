//! Core value types shared across the crate

pub mod handle;
pub mod vector;
pub mod version;

pub use handle::Handle;
pub use vector::Vector3;
pub use version::DxfVersion;
