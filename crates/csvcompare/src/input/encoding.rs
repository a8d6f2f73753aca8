//! Text encoding detection, strict decoding, and re-encoding for write-back.

use chardetng::EncodingDetector;
use encoding_rs::{DecoderResult, Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::{CompareError, Result};

/// The encoding a dataset was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceEncoding {
    /// Character encoding of the bytes.
    pub encoding: &'static Encoding,
    /// Whether the bytes started with a byte-order mark.
    pub bom: bool,
}

impl SourceEncoding {
    /// Encoding without a byte-order mark.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            bom: false,
        }
    }

    /// Canonical name of the encoding (e.g. `UTF-8`, `UTF-16LE`).
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    fn is_utf16(&self) -> bool {
        self.encoding == UTF_16LE || self.encoding == UTF_16BE
    }
}

impl Default for SourceEncoding {
    fn default() -> Self {
        Self::new(UTF_8)
    }
}

/// Where and why strict decoding stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodeFailure {
    /// Byte offset of the malformed sequence in the original input.
    pub offset: usize,
    pub reason: String,
}

/// Guess the encoding of raw file bytes.
///
/// A byte-order mark wins, then valid UTF-8. Anything else goes to a
/// statistical detector for legacy encodings (windows-1252, Shift_JIS, ...).
/// Returns `None` when the guess cannot decode the bytes either.
pub fn detect(bytes: &[u8]) -> Option<SourceEncoding> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Some(SourceEncoding {
            encoding,
            bom: true,
        });
    }

    if std::str::from_utf8(bytes).is_ok() {
        return Some(SourceEncoding::new(UTF_8));
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);
    tracing::debug!(encoding = guess.name(), "Guessed legacy encoding");

    guess
        .decode_without_bom_handling_and_without_replacement(bytes)
        .is_some()
        .then(|| SourceEncoding::new(guess))
}

/// Look up an encoding by its WHATWG label (`utf-8`, `latin1`, `utf-16le`, ...).
pub fn for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CompareError::UnknownEncoding(label.to_string()))
}

/// Pair a caller-forced encoding with the BOM state of the bytes.
pub(crate) fn forced(bytes: &[u8], encoding: &'static Encoding) -> SourceEncoding {
    let bom = matches!(Encoding::for_bom(bytes), Some((found, _)) if found == encoding);
    SourceEncoding { encoding, bom }
}

/// Decode bytes without replacement characters.
///
/// A leading BOM is skipped when `source.bom` is set. Offsets in failures
/// are relative to the start of `bytes`, BOM included.
pub(crate) fn decode(
    bytes: &[u8],
    source: SourceEncoding,
) -> std::result::Result<String, DecodeFailure> {
    let skip = match Encoding::for_bom(bytes) {
        Some((found, len)) if source.bom && found == source.encoding => len,
        _ => 0,
    };
    let body = &bytes[skip..];

    let mut decoder = source.encoding.new_decoder_without_bom_handling();
    let mut text = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(body.len())
            .unwrap_or(body.len()),
    );

    let mut consumed = 0;
    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&body[consumed..], &mut text, true);
        consumed += read;

        match result {
            DecoderResult::InputEmpty => return Ok(text),
            DecoderResult::OutputFull => {
                let remaining = body.len() - consumed;
                text.reserve(
                    decoder
                        .max_utf8_buffer_length_without_replacement(remaining)
                        .unwrap_or(remaining)
                        .max(4),
                );
            }
            DecoderResult::Malformed(bad, after) => {
                let offset = skip + consumed - bad as usize - after as usize;
                return Err(DecodeFailure {
                    offset,
                    reason: format!("invalid byte sequence of length {bad}"),
                });
            }
        }
    }
}

/// Encode text for writing back in the source encoding.
pub(crate) fn encode(text: &str, target: SourceEncoding) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 3);

    if target.is_utf16() {
        let little_endian = target.encoding == UTF_16LE;
        if target.bom {
            out.extend_from_slice(if little_endian { &[0xFF, 0xFE] } else { &[0xFE, 0xFF] });
        }
        for unit in text.encode_utf16() {
            let bytes = if little_endian {
                unit.to_le_bytes()
            } else {
                unit.to_be_bytes()
            };
            out.extend_from_slice(&bytes);
        }
        return out;
    }

    if target.bom && target.encoding == UTF_8 {
        out.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    }
    let (bytes, _, had_errors) = target.encoding.encode(text);
    if had_errors {
        tracing::warn!(
            encoding = target.name(),
            "Some characters are not representable and were written as numeric references"
        );
    }
    out.extend_from_slice(&bytes);
    out
}
