//! Text encoding for legacy consumers.
use std::{borrow::Cow, fmt};

use encoding_rs::{Encoding, EncoderResult, SHIFT_JIS};

/// Encodes text into a configured byte encoding.
///
/// Defaults to Shift_JIS, the encoding the downstream CSV consumers expect.
/// Encoding is strict: a character outside the target repertoire is an
/// [`EncodeError`], never a substitution.
#[derive(Clone, Copy, Debug)]
pub struct TextEncoder {
    encoding: &'static Encoding,
}

impl TextEncoder {
    /// Encoder targeting `encoding`.
    pub fn new(encoding: &'static Encoding) -> TextEncoder {
        TextEncoder { encoding }
    }

    /// Target encoding.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Encodes `text`, borrowing when the bytes pass through unchanged.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        if self.encoding == encoding_rs::UTF_8
            || (self.encoding.is_ascii_compatible() && text.is_ascii())
        {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }

        let mut encoder = self.encoding.new_encoder();
        let mut out = Vec::with_capacity(
            encoder
                .max_buffer_length_from_utf8_without_replacement(text.len())
                .unwrap_or(text.len() * 4),
        );
        let mut src = text;
        loop {
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
            src = &src[read..];
            match result {
                EncoderResult::InputEmpty => break Ok(Cow::Owned(out)),
                EncoderResult::Unmappable(ch) => {
                    break Err(EncodeError { ch, encoding: self.encoding.name() });
                }
                EncoderResult::OutputFull => out.reserve(src.len().max(16) * 2),
            }
        }
    }
}

impl Default for TextEncoder {
    fn default() -> TextEncoder {
        TextEncoder { encoding: SHIFT_JIS }
    }
}

/// A character outside the target encoding's repertoire.
#[derive(Debug)]
pub struct EncodeError {
    ch: char,
    encoding: &'static str,
}

impl EncodeError {
    /// The character that could not be represented.
    pub fn character(&self) -> char {
        self.ch
    }

    /// Name of the target encoding.
    pub fn encoding(&self) -> &'static str {
        self.encoding
    }
}

impl std::error::Error for EncodeError { }

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "character {:?} is not representable in {}", self.ch, self.encoding)
    }
}
