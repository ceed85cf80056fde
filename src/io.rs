//! Provides the `read_operand` function, which returns the text of a file
//! named on the command line (or of standard input, for `-`).
//!
//! Operands may be UTF-8, with or without a Byte Order Mark, or UTF-16 with a
//! Byte Order Mark. Either way the result is UTF-8 without a BOM. Malformed
//! sequences become the Unicode REPLACEMENT CHARACTER rather than errors.
use anyhow::{Context, Result};
use bstr::ByteSlice;
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

/// The operand name that means "read standard input"
pub const STDIN: &str = "-";

/// Reads the operand `path` and returns its text.
pub fn read_operand(path: &Path) -> Result<String> {
    let bytes = if path.as_os_str() == STDIN {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf).context("Can't read standard input")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("Can't read file: {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read operand");
    Ok(text_of(bytes))
}

/// Converts raw operand bytes to text: UTF-16 is translated, a leading UTF-8
/// BOM is dropped, and invalid UTF-8 is replaced.
#[must_use]
pub fn text_of(bytes: Vec<u8>) -> String {
    let bytes = decode_if_utf16(bytes);
    let without_bom = bytes.strip_prefix(BOM_BYTES).unwrap_or(&bytes);
    without_bom.to_str_lossy().into_owned()
}

/// Decode UTF-16 to UTF-8 if we see a UTF-16 Byte Order Mark at the beginning of `candidate`.
/// Otherwise return `candidate` unchanged
fn decode_if_utf16(candidate: Vec<u8>) -> Vec<u8> {
    // Note: `decode_without_bom_handling` will change malformed sequences to the
    // Unicode REPLACEMENT CHARACTER.
    //
    // "without BOM handling" means that the UTF-16 BOM is translated to a UTF-8 BOM,
    // which `text_of` then drops
    //
    if let Some((enc, _)) = encoding_rs::Encoding::for_bom(&candidate) {
        if [encoding_rs::UTF_16LE, encoding_rs::UTF_16BE].contains(&enc) {
            let (translated, _had_malformed_sequences) =
                enc.decode_without_bom_handling(&candidate);
            return translated.into_owned().into_bytes();
        }
    }
    candidate
}

const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";
