//! DXF stream reader trait and the in-memory pair source

use std::collections::VecDeque;

use encoding_rs::Encoding;

use crate::error::{DxfError, Result};
use crate::io::dxf::{CodePair, CodePairValue, GroupCodeValueType};

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair. `None` marks a clean end of input.
    fn read_pair(&mut self) -> Result<Option<CodePair>>;

    /// Push a pair back to be read again on the next `read_pair` call
    fn push_back(&mut self, pair: CodePair);

    /// Current position for diagnostics (line for text, byte for binary)
    fn position(&self) -> u64;

    /// Switch string decoding to raw UTF-8 (R2007 and later)
    fn set_utf8(&mut self) {}

    /// Set the legacy code page used for non-UTF-8 bytes
    fn set_encoding(&mut self, _encoding: &'static Encoding) {}

    /// Read a pair that must exist; end of input here is an error
    fn expect_pair(&mut self) -> Result<CodePair> {
        match self.read_pair()? {
            Some(pair) => Ok(pair),
            None => Err(DxfError::UnexpectedEndOfInput {
                offset: self.position(),
            }),
        }
    }
}

/// Parse a text value into the kind its code mandates
pub(crate) fn parse_value(code: i32, text: &str, offset: u64) -> Result<CodePairValue> {
    let malformed = || DxfError::MalformedValue {
        code,
        value: text.to_string(),
        offset,
    };
    let trimmed = text.trim();
    let value = match GroupCodeValueType::from_code(code) {
        GroupCodeValueType::Bool => {
            CodePairValue::Boolean(trimmed.parse::<i16>().map_err(|_| malformed())? != 0)
        }
        GroupCodeValueType::Int16 => CodePairValue::Short(trimmed.parse().map_err(|_| malformed())?),
        GroupCodeValueType::Int32 => CodePairValue::Integer(trimmed.parse().map_err(|_| malformed())?),
        GroupCodeValueType::Int64 => CodePairValue::Long(trimmed.parse().map_err(|_| malformed())?),
        GroupCodeValueType::Double => CodePairValue::Double(trimmed.parse().map_err(|_| malformed())?),
        GroupCodeValueType::String => CodePairValue::Str(text.to_string()),
        GroupCodeValueType::Unknown => return Err(DxfError::UnknownCode { code, offset }),
    };
    Ok(value)
}

/// Decode bytes with the legacy encoding if one is set, else UTF-8 falling back to Latin-1
pub(crate) fn decode_legacy(bytes: &[u8], encoding: Option<&'static Encoding>) -> Result<String> {
    match encoding {
        Some(enc) => {
            let (decoded, had_errors) = enc.decode_without_bom_handling(bytes);
            if had_errors {
                return Err(DxfError::Encoding(format!(
                    "invalid {} byte sequence",
                    enc.name()
                )));
            }
            Ok(decoded.into_owned())
        }
        None => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            // Latin-1 maps bytes 0-255 straight onto code points
            Err(_) => Ok(bytes.iter().map(|&b| b as char).collect()),
        },
    }
}

/// Reads from an already materialized pair sequence
pub struct DxfPairReader {
    pairs: VecDeque<CodePair>,
    index: u64,
}

impl DxfPairReader {
    pub fn new(pairs: impl IntoIterator<Item = CodePair>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
            index: 0,
        }
    }
}

impl DxfStreamReader for DxfPairReader {
    fn read_pair(&mut self) -> Result<Option<CodePair>> {
        let pair = self.pairs.pop_front();
        if pair.is_some() {
            self.index += 1;
        }
        Ok(pair)
    }

    fn push_back(&mut self, pair: CodePair) {
        self.index = self.index.saturating_sub(1);
        self.pairs.push_front(pair);
    }

    fn position(&self) -> u64 {
        self.index
    }
}
