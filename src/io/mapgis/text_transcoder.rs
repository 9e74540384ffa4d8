//! Legacy text decoding.

use encoding_rs::{Encoding, GB18030};

/// Turns legacy-encoded, NUL-padded bytes into a `String`.
///
/// Implementations never fail; undecodable input degrades to a lossy copy.
pub trait TextTranscoder: Send + Sync {
    fn transcode(&self, bytes: &[u8]) -> String;
}

/// [`TextTranscoder`] backed by an `encoding_rs` encoding.
#[derive(Debug, Clone, Copy)]
pub struct EncodingTranscoder {
    encoding: &'static Encoding,
}

impl EncodingTranscoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Default for EncodingTranscoder {
    fn default() -> Self {
        Self::new(GB18030)
    }
}

impl TextTranscoder for EncodingTranscoder {
    fn transcode(&self, bytes: &[u8]) -> String {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let bytes = &bytes[..end];
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            return String::from_utf8_lossy(bytes).into_owned();
        }
        text.into_owned()
    }
}
