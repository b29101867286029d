//! The string measure and its canonical encodings.

use crate::error::ShapeError;


/// Canonical string encodings.
///
/// Constructors accept a fixed alias set (`"utf-8"`, `"utf_8"`, `"utf8"`,
/// ...) but only the canonical form is ever stored or rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// 7-bit ASCII, canonical spelling `A`.
    Ascii,
    /// 8-bit unicode, canonical spelling `U8`. The default.
    #[default]
    Utf8,
    /// 16-bit unicode, canonical spelling `U16`.
    Utf16,
    /// 32-bit unicode, canonical spelling `U32`.
    Utf32,
}

impl Encoding {
    /// Resolve a spelling to its canonical encoding.
    pub fn parse(spelling: &str) -> Result<Self, ShapeError> {
        match spelling {
            "A" | "ascii" => Ok(Encoding::Ascii),
            "U8" | "utf-8" | "utf_8" | "utf8" => Ok(Encoding::Utf8),
            "U16" | "utf-16" | "utf_16" | "utf16" => Ok(Encoding::Utf16),
            "U32" | "utf-32" | "utf_32" | "utf32" => Ok(Encoding::Utf32),
            other => Err(ShapeError::UnsupportedEncoding(other.to_owned())),
        }
    }

    /// The canonical spelling.
    pub fn canonical(self) -> &'static str {
        match self {
            Encoding::Ascii => "A",
            Encoding::Utf8 => "U8",
            Encoding::Utf16 => "U16",
            Encoding::Utf32 => "U32",
        }
    }
}

/// String measure: optionally fixed length, canonical encoding.
///
/// The four constructors correspond to the four argument forms the type
/// expression grammar allows: `string`, `string(N)`, `string('enc')`,
/// `string(N, 'enc')`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringType {
    fixlen: Option<usize>,
    encoding: Encoding,
}

impl StringType {
    /// `string`: unbounded length, 8-bit unicode.
    pub fn new() -> Self {
        StringType::default()
    }

    /// `string(N)`: fixed length, 8-bit unicode.
    pub fn with_len(fixlen: usize) -> Self {
        StringType {
            fixlen: Some(fixlen),
            encoding: Encoding::Utf8,
        }
    }

    /// `string('enc')`: unbounded length, explicit encoding.
    pub fn with_encoding(encoding: Encoding) -> Self {
        StringType {
            fixlen: None,
            encoding,
        }
    }

    /// `string(N, 'enc')`: fixed length and explicit encoding.
    pub fn with_len_and_encoding(fixlen: usize, encoding: Encoding) -> Self {
        StringType {
            fixlen: Some(fixlen),
            encoding,
        }
    }

    /// The fixed length, when bounded.
    pub fn fixlen(&self) -> Option<usize> {
        self.fixlen
    }

    /// The canonical encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}
