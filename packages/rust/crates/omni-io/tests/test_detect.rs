//! Tests for detect module - binary detection and text decoding.

use omni_io::{IoError, decode_buffer, is_binary};

#[test]
fn test_binary_detection() {
    assert!(is_binary(b"\x00\x01\x02\x03"));
    assert!(!is_binary(b"Hello, world!"));
    assert!(!is_binary(b""));
}

#[test]
fn test_decode_text() -> Result<(), Box<dyn std::error::Error>> {
    let result = decode_buffer(b"Hello, world!".to_vec())?;
    assert_eq!(result, "Hello, world!");
    Ok(())
}

#[test]
fn test_decode_binary() {
    let result = decode_buffer(b"\x00\x01\x02".to_vec());
    assert!(matches!(result, Err(IoError::BinaryFile)));
}

#[test]
fn test_decode_invalid_utf8_rejected() {
    // Invalid UTF-8 sequence must not be replaced lossily
    let result = decode_buffer(vec![0x48, 0x65, 0x6c, 0xff, 0x6f]);
    assert!(matches!(result, Err(IoError::Encoding(3))));
}

#[test]
fn test_decode_multibyte_text() -> Result<(), Box<dyn std::error::Error>> {
    let result = decode_buffer("// 注释 ===\n".as_bytes().to_vec())?;
    assert_eq!(result, "// 注释 ===\n");
    Ok(())
}
