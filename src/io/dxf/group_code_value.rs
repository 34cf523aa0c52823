//! Group code to value type classification

/// The value kind carried by a group code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Boolean flag (290-299)
    Bool,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer (160-169)
    Int64,
    /// Double-precision float
    Double,
    /// Text, including hex handles
    String,
    /// Outside every documented range
    Unknown,
}

impl GroupCodeValueType {
    /// Classify a group code.
    ///
    /// Code 250 is not in the published reference but appears in files
    /// written by some vendors; it carries a 16-bit integer.
    pub fn from_code(code: i32) -> GroupCodeValueType {
        use GroupCodeValueType::*;
        match code {
            0..=9 => String,
            10..=59 => Double,
            60..=79 => Int16,
            90..=99 => Int32,
            100..=102 | 105 => String,
            110..=149 => Double,
            160..=169 => Int64,
            170..=179 => Int16,
            210..=239 => Double,
            250 => Int16,
            270..=289 => Int16,
            290..=299 => Bool,
            300..=369 => String,
            370..=389 => Int16,
            390..=399 => String,
            400..=409 => Int16,
            410..=419 => String,
            420..=429 => Int32,
            430..=439 => String,
            440..=459 => Int32,
            460..=469 => Double,
            470..=481 => String,
            999 => String,
            1000..=1009 => String,
            1010..=1059 => Double,
            1060..=1070 => Int16,
            1071 => Int32,
            _ => Unknown,
        }
    }
}
