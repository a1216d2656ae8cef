mod common;

use common::{HEADER_SIZE, SIGNATURE, header_bytes};
use furparse::fur::{FUR_HEADER_SIZE, FurHeader, FurHeaderField, decode_header, decode_song};
use furparse::{FormatError, FurModule};

#[test]
fn test_decode_valid_header() {
    let bytes = header_bytes(100, 0x20);
    let header = decode_header(&bytes).expect("valid header");
    assert_eq!(&header.signature, SIGNATURE);
    assert_eq!(header.signature_str(), "-Furnace module-");
    assert_eq!(header.version, 100);
    assert_eq!(header.song_info_offset, 0x20);
}

#[test]
fn test_header_try_from() {
    let bytes = header_bytes(42, 0x1234_5678);
    let header: FurHeader = bytes.as_slice().try_into().expect("valid header");
    assert_eq!(header.version, 42);
    assert_eq!(header.song_info_offset, 0x1234_5678);
}

#[test]
fn test_header_ignores_trailing_bytes() {
    let mut bytes = header_bytes(103, 0x40);
    bytes.extend_from_slice(&[0xAA; 100]);
    assert_eq!(decode_header(&bytes).unwrap().song_info_offset, 0x40);
}

#[test]
fn test_too_short() {
    let bytes = header_bytes(100, 0x20);
    match decode_header(&bytes[..HEADER_SIZE - 1]) {
        Err(FormatError::TooShort { needed, available }) => {
            assert_eq!(needed, 32);
            assert_eq!(available, 31);
        }
        other => panic!("expected TooShort, got {:?}", other),
    }
    assert!(matches!(
        decode_header(&[]),
        Err(FormatError::TooShort { available: 0, .. })
    ));
}

#[test]
fn test_signature_mismatch() {
    let mut bytes = header_bytes(100, 0x20);
    bytes[15] = b'!';
    match decode_header(&bytes) {
        Err(FormatError::SignatureMismatch(found)) => {
            assert_eq!(&found, b"-Furnace module!");
        }
        other => panic!("expected SignatureMismatch, got {:?}", other),
    }
}

#[test]
fn test_signature_is_case_sensitive() {
    let mut bytes = header_bytes(100, 0x20);
    bytes[1] = b'f';
    assert!(matches!(
        decode_header(&bytes),
        Err(FormatError::SignatureMismatch(_))
    ));
}

#[test]
fn test_signature_checked_before_version() {
    let mut bytes = header_bytes(500, 0x20);
    bytes[0] = 0;
    assert!(matches!(
        decode_header(&bytes),
        Err(FormatError::SignatureMismatch(_))
    ));
}

#[test]
fn test_version_gate() {
    assert_eq!(decode_header(&header_bytes(103, 0x20)).unwrap().version, 103);
    assert!(matches!(
        decode_header(&header_bytes(104, 0x20)),
        Err(FormatError::UnsupportedVersion(104))
    ));
    assert!(matches!(
        decode_header(&header_bytes(u16::MAX, 0x20)),
        Err(FormatError::UnsupportedVersion(u16::MAX))
    ));
}

#[test]
fn test_header_fields_tile_the_header() {
    let mut expected = 0;
    for field in FurHeaderField::ALL {
        assert_eq!(field.offset(), expected, "{:?}", field);
        assert!(!field.is_empty());
        expected += field.len();
    }
    assert_eq!(expected, FUR_HEADER_SIZE);
}

#[test]
fn test_offset_past_end_of_minimal_buffer() {
    let bytes = header_bytes(100, 0x40);
    assert_eq!(bytes.len(), 32);
    let header = decode_header(&bytes).expect("header itself is valid");
    match decode_song(&bytes, header.song_info_offset) {
        Err(FormatError::OffsetOutOfRange {
            offset, available, ..
        }) => {
            assert_eq!(offset, 0x40);
            assert_eq!(available, 0);
        }
        other => panic!("expected OffsetOutOfRange, got {:?}", other),
    }
    assert!(matches!(
        FurModule::from_bytes(&bytes),
        Err(FormatError::OffsetOutOfRange { .. })
    ));
}

#[test]
fn test_error_messages() {
    let err = decode_header(&header_bytes(104, 0x20)).unwrap_err();
    assert_eq!(err.to_string(), "unsupported version: 104");
    let err = decode_header(&[0u8; 4]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "buffer too short for module header: 4 bytes (needed 32)"
    );
}
