//! `$DWGCODEPAGE` names and the legacy encodings they select.
//!
//! Only meaningful before R2007; later files are always UTF-8.

use encoding_rs::Encoding;

/// Code page written when the drawing does not name one
pub const DEFAULT_CODE_PAGE: &str = "ANSI_1252";

/// Look up the encoding for a `$DWGCODEPAGE` value (case-insensitive).
///
/// `Ok(None)` means the code page is plain ASCII or UTF-8 and needs no
/// transcoding. Unrecognized names are returned as the error so the caller
/// can report them.
pub fn encoding_from_code_page(code_page: &str) -> Result<Option<&'static Encoding>, String> {
    let name = code_page.trim().to_ascii_lowercase();
    let encoding = match name.as_str() {
        "ascii" | "utf-8" | "utf8" | "unicode" => return Ok(None),

        "ansi_874" => encoding_rs::WINDOWS_874,
        "ansi_932" => encoding_rs::SHIFT_JIS,
        "gb2312" | "ansi_936" => encoding_rs::GBK,
        "korean" | "johab" | "ansi_949" => encoding_rs::EUC_KR,
        "big5" | "ansi_950" => encoding_rs::BIG5,
        "ansi_1250" | "dos852" => encoding_rs::WINDOWS_1250,
        "ansi_1251" => encoding_rs::WINDOWS_1251,
        "ansi_1252" | "dos850" | "dos860" | "dos861" | "dos863" | "dos865" => encoding_rs::WINDOWS_1252,
        "ansi_1253" | "dos869" => encoding_rs::WINDOWS_1253,
        "ansi_1254" | "dos857" => encoding_rs::WINDOWS_1254,
        "ansi_1255" => encoding_rs::WINDOWS_1255,
        "ansi_1256" => encoding_rs::WINDOWS_1256,
        "ansi_1257" => encoding_rs::WINDOWS_1257,
        "ansi_1258" => encoding_rs::WINDOWS_1258,
        "dos437" | "dos855" | "dos866" => encoding_rs::IBM866,
        "koi8-r" => encoding_rs::KOI8_R,
        "koi8-u" => encoding_rs::KOI8_U,

        iso => match iso.replace('_', "").as_str() {
            "iso8859-1" => encoding_rs::WINDOWS_1252,
            "iso8859-2" => encoding_rs::ISO_8859_2,
            "iso8859-3" => encoding_rs::ISO_8859_3,
            "iso8859-4" => encoding_rs::ISO_8859_4,
            "iso8859-5" => encoding_rs::ISO_8859_5,
            "iso8859-6" => encoding_rs::ISO_8859_6,
            "iso8859-7" => encoding_rs::ISO_8859_7,
            "iso8859-8" => encoding_rs::ISO_8859_8,
            "iso8859-9" => encoding_rs::WINDOWS_1254,
            "iso8859-10" => encoding_rs::ISO_8859_10,
            "iso8859-13" => encoding_rs::ISO_8859_13,
            "iso8859-14" => encoding_rs::ISO_8859_14,
            "iso8859-15" => encoding_rs::ISO_8859_15,
            _ => return Err(code_page.to_string()),
        },
    };
    Ok(Some(encoding))
}
