//! Test suite for the MSB-first BitReader edge cases.
use super::*;
use proptest::prelude::*;

#[test]
/// Sequential reads without offset across primitive types.
fn test_read_aligned_bytes() {
    let data = [0x12, 0x34, 0x56, 0x78];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u8(8).unwrap(), 0x12);
    assert_eq!(reader.read_u16(16).unwrap(), 0x3456);
    assert_eq!(reader.read_u8(8).unwrap(), 0x78);
}

#[test]
/// Read fields spanning two bytes (non-aligned).
fn test_read_non_aligned_bytes() {
    // data: 101 0110000 110101
    let data = [0b1010_1100, 0b0011_0101];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u8(3).unwrap(), 0b101);
    assert_eq!(reader.read_u8(7).unwrap(), 0b0110000);
    assert_eq!(reader.read_u8(6).unwrap(), 0b110101);
}

#[test]
/// Two consecutive 12-bit fields, the typical message-number shape.
fn test_read_message_number_pair() {
    let data = [0x3E, 0xD7, 0x30];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u16(12).unwrap(), 1005);
    assert_eq!(reader.read_u16(12).unwrap(), 0x730);
}

#[test]
/// Detects out-of-bounds reads.
fn test_read_out_of_bounds() {
    let data = [0xFF];
    let mut reader = BitReader::new(&data);
    assert!(reader.read_u8(8).is_ok());
    assert!(matches!(
        reader.read_u8(1),
        Err(BitReaderError::OutOfBounds {
            asked: 1,
            available: 0
        })
    ));
}

#[test]
/// Validates guard rails for maximum bit lengths per type.
fn test_read_num_bit_too_high() {
    let data = [0xFF];
    let mut reader = BitReader::new(&data);
    assert!(matches!(
        reader.read_u8(9),
        Err(BitReaderError::TooLongForType { max: 8, asked: 9 })
    ));
    assert!(matches!(
        reader.read_u16(17),
        Err(BitReaderError::TooLongForType { max: 16, asked: 17 })
    ));
    assert!(matches!(
        reader.read_u32(33),
        Err(BitReaderError::TooLongForType { max: 32, asked: 33 })
    ));
    assert!(matches!(
        reader.read_u64(65),
        Err(BitReaderError::TooLongForType { max: 64, asked: 65 })
    ));
    assert!(matches!(
        reader.read_i8(9),
        Err(BitReaderError::TooLongForType { max: 8, asked: 9 })
    ));
    assert!(matches!(
        reader.read_i16(17),
        Err(BitReaderError::TooLongForType { max: 16, asked: 17 })
    ));
    assert!(matches!(
        reader.read_i32(33),
        Err(BitReaderError::TooLongForType { max: 32, asked: 33 })
    ));
}

#[test]
/// Read a full 64-bit block, most significant byte first.
fn test_read_max() {
    let data = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u64(64).unwrap(), 0x1122334455667788);
}

#[test]
/// Read a 64-bit sequence after consuming leading bits.
fn test_read_max_stressed() {
    let data = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_u8(8).unwrap(), 0x11);
    assert_eq!(reader.read_u64(64).unwrap(), 0x2233445566778899);
}

#[test]
/// Sign extension at narrow widths.
fn test_read_signed_negative() {
    let data = [0xFF];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_i8(4).unwrap(), -1);

    // A 20-bit field holding its most negative value.
    let data = [0x80, 0x00, 0x00];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_i32(20).unwrap(), -524_288);

    // A 14-bit field holding its most negative value.
    let data = [0x80, 0x00];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_i16(14).unwrap(), -8_192);
}

#[test]
/// Positive values pass through the signed readers untouched.
fn test_read_signed_positive() {
    let data = [0x12, 0x34];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_i16(12).unwrap(), 0x123);

    let data = [0x20, 0x00];
    let mut reader = BitReader::new(&data);
    assert_eq!(reader.read_i16(14).unwrap(), 2_048);
}

#[test]
/// Single-bit flags.
fn test_read_bool() {
    let data = [0b1010_0000];
    let mut reader = BitReader::new(&data);
    assert!(reader.read_bool().unwrap());
    assert!(!reader.read_bool().unwrap());
    assert!(reader.read_bool().unwrap());
    assert!(!reader.read_bool().unwrap());
}

#[test]
/// Reading from an empty buffer must fail immediately.
fn test_read_empty_buffer() {
    let data: [u8; 0] = [];
    let mut reader = BitReader::new(&data);
    assert!(matches!(
        reader.read_u8(1),
        Err(BitReaderError::OutOfBounds {
            asked: 1,
            available: 0
        })
    ))
}

#[test]
/// Advance the cursor then perform a nominal read.
fn test_read_advance_cursor() {
    let data: [u8; 2] = [0xFF, 0xAF];
    let mut reader = BitReader::new(&data);
    assert!(reader.advance(12).is_ok());
    assert_eq!(reader.read_u16(4).unwrap(), 0xF);
}

#[test]
/// Validate overflow detection after a valid advance.
fn test_read_out_of_bounds_advance_cursor() {
    let data: [u8; 2] = [0xFF, 0xFF];
    let mut reader = BitReader::new(&data);
    assert!(reader.advance(13).is_ok());
    assert!(matches!(
        reader.read_u16(4),
        Err(BitReaderError::OutOfBounds {
            asked: 4,
            available: 3
        })
    ));
}

#[test]
/// Refuses to advance beyond the available buffer.
fn test_read_advance_bigger_than_buffer() {
    let data: [u8; 2] = [0xFF, 0xFF];
    let mut reader = BitReader::new(&data);
    assert!(matches!(
        reader.advance(17),
        Err(BitReaderError::OutOfBounds {
            asked: 17,
            available: 16
        })
    ));
}

#[test]
/// Copy aligned bytes through the cursor.
fn test_read_bytes_aligned() {
    let data = [0xAB, 0xCD, 0xEF];
    let mut reader = BitReader::new(&data);
    let mut out = [0u8; 2];
    reader.read_bytes(&mut out).unwrap();
    assert_eq!(out, [0xAB, 0xCD]);
    assert_eq!(reader.bit_cursor(), 16);
}

#[test]
/// Byte copies work from a misaligned cursor as well.
fn test_read_bytes_non_aligned() {
    let data = [0xAB, 0xCD, 0xEF];
    let mut reader = BitReader::new(&data);
    reader.advance(4).unwrap();
    let mut out = [0u8; 2];
    reader.read_bytes(&mut out).unwrap();
    assert_eq!(out, [0xBC, 0xDE]);
}

#[test]
/// Copying more bytes than remain triggers `OutOfBounds`.
fn test_read_bytes_out_of_bounds() {
    let data = [0xAB, 0xCD, 0xEF];
    let mut reader = BitReader::new(&data);
    let mut out = [0u8; 4];
    assert!(matches!(
        reader.read_bytes(&mut out),
        Err(BitReaderError::OutOfBounds {
            asked: 4,
            available: 3
        })
    ));
}

proptest! {
    /// Signed extraction equals the unsigned value minus 2^w when the
    /// sign bit is set.
    #[test]
    fn prop_signed_matches_twos_complement(
        bytes in proptest::collection::vec(any::<u8>(), 9),
        offset in 0u8..8,
        width in 1u8..=64,
    ) {
        let mut unsigned = BitReader::new(&bytes);
        let mut signed = BitReader::new(&bytes);
        if offset > 0 {
            unsigned.advance(offset).unwrap();
            signed.advance(offset).unwrap();
        }
        let raw = unsigned.read_u64(width).unwrap();
        let val = signed.read_i64(width).unwrap();
        let expected = if width < 64 && raw >= 1u64 << (width - 1) {
            i128::from(raw) - (1i128 << width)
        } else {
            i128::from(raw as i64)
        };
        prop_assert_eq!(i128::from(val), expected);
    }
}
