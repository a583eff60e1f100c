use crate::bit_buffer::BitBuffer;
use crate::block_coder;
use crate::error::QrError;
use crate::error_level::ErrorLevel;
use crate::mode::Mode;
use crate::version::Version;
use crate::ALPHANUMERIC_CHARSET;

/// Appends `text`'s mode indicator, character count indicator, and encoded
/// character data to `buf`, for an already-classified/validated `mode`.
///
/// Caller is responsible for having checked `mode` is wide enough for
/// `text` (see `Mode::classify`/`Mode::validate_override`).
pub fn encode_segment(buf: &mut BitBuffer, text: &str, mode: Mode, ver: Version) {
    buf.append(mode.mode_bits(), 4);
    let char_count = match mode {
        Mode::Byte => text.len(),
        _ => text.chars().count(),
    };
    buf.append(char_count as u32, mode.num_char_count_bits(ver));

    match mode {
        Mode::Numeric => encode_numeric(buf, text),
        Mode::AlphaNum => encode_alphanumeric(buf, text),
        Mode::Byte => encode_byte(buf, text),
    }
}

/// Packs decimal digits three at a time into 10/7/4-bit groups.
fn encode_numeric(buf: &mut BitBuffer, text: &str) {
    let digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
    for chunk in digits.chunks(3) {
        let value = chunk.iter().fold(0u32, |acc, &d| acc * 10 + u32::from(d));
        let width = match chunk.len() {
            3 => 10,
            2 => 7,
            1 => 4,
            _ => unreachable!(),
        };
        buf.append(value, width);
    }
}

/// Packs alphanumeric characters two at a time into 11-bit groups (45*a+b),
/// a trailing odd character alone into 6 bits.
fn encode_alphanumeric(buf: &mut BitBuffer, text: &str) {
    let values: Vec<u32> = text
        .chars()
        .map(|c| ALPHANUMERIC_CHARSET.find(c).expect("text already validated as AlphaNum") as u32)
        .collect();
    for chunk in values.chunks(2) {
        match chunk {
            [a, b] => buf.append(a * 45 + b, 11),
            [a] => buf.append(*a, 6),
            _ => unreachable!(),
        }
    }
}

/// Emits `text`'s UTF-8 bytes one octet at a time.
fn encode_byte(buf: &mut BitBuffer, text: &str) {
    for &b in text.as_bytes() {
        buf.append(u32::from(b), 8);
    }
}

/// Appends the terminator (up to 4 zero bits, clamped to remaining
/// capacity), pads to a byte boundary with zero bits, then alternates the
/// standard `0xEC`/`0x11` pad codewords until `buf` reaches exactly
/// `capacity_bits`.
pub fn pad_to_capacity(buf: &mut BitBuffer, capacity_bits: usize) {
    let terminator_len = 4.min(capacity_bits.saturating_sub(buf.size()));
    buf.append(0, terminator_len as u8);

    while buf.size() % 8 != 0 {
        buf.append(0, 1);
    }

    let mut pad_alternator = [0xECu8, 0x11u8].iter().copied().cycle();
    while buf.size() < capacity_bits {
        buf.append(u32::from(pad_alternator.next().unwrap()), 8);
    }
}

/// Builds the full interleaved codeword stream for `text` encoded under a
/// single segment at (`ver`, `ecl`), ready for placement.
///
/// Returns `QrError::PayloadTooLarge` if the encoded segment (plus
/// terminator) would not fit within the version/level's data capacity.
pub fn build_codewords(text: &str, mode: Mode, ver: Version, ecl: ErrorLevel) -> Result<Vec<u8>, QrError> {
    let capacity_bits = block_coder::data_codeword_capacity(ver, ecl) * 8;

    let mut buf = BitBuffer::new();
    encode_segment(&mut buf, text, mode, ver);

    if buf.size() > capacity_bits {
        return Err(QrError::PayloadTooLarge { needed: buf.size(), available: capacity_bits });
    }
    pad_to_capacity(&mut buf, capacity_bits);

    let data = buf.bytes();
    let blocks = block_coder::split_into_blocks(ver, ecl, &data);
    Ok(block_coder::interleave(&blocks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_packs_groups_of_three_digits() {
        let mut buf = BitBuffer::new();
        encode_numeric(&mut buf, "01234567");
        // "012" -> 10 bits, "345" -> 10 bits, "67" -> 7 bits = 27 bits.
        assert_eq!(buf.size(), 27);
    }

    #[test]
    fn alphanumeric_packs_pairs_into_eleven_bits() {
        let mut buf = BitBuffer::new();
        encode_alphanumeric(&mut buf, "AC-42");
        // 2 pairs (22 bits) + 1 leftover char (6 bits) = 28 bits.
        assert_eq!(buf.size(), 28);
    }

    #[test]
    fn byte_mode_emits_one_octet_per_byte() {
        let mut buf = BitBuffer::new();
        encode_byte(&mut buf, "hi");
        assert_eq!(buf.size(), 16);
    }

    #[test]
    fn padding_alternates_ec_and_eleven_bytes() {
        let mut buf = BitBuffer::new();
        buf.append(0b1010, 4);
        pad_to_capacity(&mut buf, 8 * 5);
        let bytes = buf.bytes();
        assert_eq!(bytes.len(), 5);
        assert_eq!(&bytes[1..], &[0xEC, 0x11, 0xEC, 0x11]);
    }

    #[test]
    fn terminator_is_clamped_when_capacity_is_nearly_exhausted() {
        let mut buf = BitBuffer::new();
        buf.append(0, 14);
        // Only 2 bits of headroom in a 2-byte (16-bit) capacity: terminator
        // must shrink from 4 bits to 2, not overflow capacity.
        pad_to_capacity(&mut buf, 16);
        assert_eq!(buf.size(), 16);
    }

    #[test]
    fn build_codewords_rejects_oversized_payload() {
        let huge = "X".repeat(10_000);
        let err = build_codewords(&huge, Mode::Byte, Version::new(1), ErrorLevel::L).unwrap_err();
        assert!(matches!(err, QrError::PayloadTooLarge { .. }));
    }

    #[test]
    fn build_codewords_produces_full_capacity_length() {
        let codewords = build_codewords("01234", Mode::Numeric, Version::new(1), ErrorLevel::L).unwrap();
        assert_eq!(codewords.len(), block_coder::data_codeword_capacity(Version::new(1), ErrorLevel::L) + {
            let v = Version::new(1);
            let ecl = ErrorLevel::L;
            block_coder::ECC_CODEWORDS_PER_BLOCK[ecl.ordinal()][usize::from(v.value())] as usize
        });
    }
}
