//! Handle type for drawing items
//!
//! Handles are document-unique 64-bit identifiers. Records refer to each
//! other by handle instead of by structural containment.

use std::fmt;

/// A document-unique identifier
///
/// Serialized as uppercase hexadecimal without leading zeros. Handle 0 means
/// "unassigned" or "no reference".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The unassigned handle (0)
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Parse the hexadecimal text form used on the wire.
    ///
    /// Surrounding whitespace is ignored; anything else that is not hex
    /// yields `None`.
    pub fn parse_hex(text: &str) -> Option<Handle> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        u64::from_str_radix(text, 16).ok().map(Handle)
    }

    /// The wire form: uppercase hex, no leading zeros
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.0)
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
