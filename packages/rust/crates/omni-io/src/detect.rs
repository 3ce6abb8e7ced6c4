//! Binary detection and decoding utilities.
//!
//! Quick binary detection using NULL byte scanning.

use memchr::memchr;

use crate::error::IoError;

/// Quick binary detection - checks first 8KB for NULL bytes.
///
/// Files containing NULL bytes in the first 8KB are considered binary.
/// This is a fast heuristic that works well for most text files.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), 8192);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to String, rejecting invalid UTF-8.
///
/// Lossy decoding is not an option here: callers write the text back, and a
/// U+FFFD substitution would silently corrupt the file.
///
/// # Errors
/// Returns `IoError::BinaryFile` when binary content is detected and
/// `IoError::Encoding` with the offset of the first invalid byte otherwise.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|e| IoError::Encoding(e.utf8_error().valid_up_to()))
}
