use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Character encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1, common in exports from Brazilian public data portals.
    Latin1,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "Latin-1",
        }
    }

    /// Decode one field. Returns `None` for invalid UTF-8.
    pub(crate) fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Self::Latin1 => {
                if bytes.is_ascii() {
                    // ASCII is valid UTF-8.
                    std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
                } else {
                    Some(Cow::Owned(bytes.iter().copied().map(char::from).collect()))
                }
            }
        }
    }
}

/// Options for reading a CSV file into a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Field delimiter. Defaults to `,`.
    pub delimiter: u8,
    /// Input encoding. Defaults to UTF-8.
    pub encoding: TextEncoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: TextEncoding::Utf8,
        }
    }
}

impl ReadOptions {
    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the input encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Options for writing a table as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Field delimiter. Defaults to `,`.
    pub delimiter: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl WriteOptions {
    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_decodes_every_byte() {
        let decoded = TextEncoding::Latin1.decode(b"Munic\xedpio").expect("decode");
        assert_eq!(decoded, "Município");
    }

    #[test]
    fn utf8_rejects_latin1_bytes() {
        assert!(TextEncoding::Utf8.decode(b"Munic\xedpio").is_none());
        assert_eq!(
            TextEncoding::Utf8.decode("Município".as_bytes()).as_deref(),
            Some("Município")
        );
    }
}
