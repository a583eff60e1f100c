use crate::error_level::ErrorLevel;
use crate::gf256;
use crate::version::Version;

/// EC codewords per block, indexed `[error_level.ordinal()][version]`
/// (version is 1-based; index 0 is an unused padding slot).
///
/// This table plus `NUM_ERROR_CORRECTION_BLOCKS` below is the standard's
/// compact encoding of both the `capacity[160]` and `blocks[160]` tables
/// described in the interface spec: capacity and block layout are both
/// pure functions of these two tables together with `raw_data_modules()`.
#[rustfmt::skip]
pub static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Low
    [-1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
     30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    // Medium
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
     28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28],
    // Quartile
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
     30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    // High
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
     30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
];

/// Number of error-correction blocks, indexed `[error_level.ordinal()][version]`.
#[rustfmt::skip]
pub static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // Low
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
     13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25],
    // Medium
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
     23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49],
    // Quartile
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
     29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68],
    // High
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
     35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81],
];

fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: ErrorLevel) -> usize {
    table[ecl.ordinal()][usize::from(ver.value())] as usize
}

/// Total bits available for function-module-excluded data+EC codewords at
/// the given version, including any unused remainder bits. Always a
/// multiple of 8 except for the handful of versions with leftover bits
/// (those remainder bits are simply never assigned during placement).
pub fn raw_data_modules(ver: Version) -> usize {
    let v = usize::from(ver.value());
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    debug_assert!((208..=29648).contains(&result));
    result
}

/// Number of 8-bit *data* codewords (i.e. excluding EC codewords) a symbol
/// of the given version and error level can hold.
pub fn data_codeword_capacity(ver: Version, ecl: ErrorLevel) -> usize {
    raw_data_modules(ver) / 8
        - table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl) * table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
}

/// Computes the `e`-byte Reed-Solomon remainder (parity) for `data` using
/// the generator polynomial of the given degree.
///
/// This is long division of `data(x) * x^degree` by `generator(x)` over
/// GF(256), carried out with the shift-register algorithm described in the
/// spec: at each step the leading coefficient `c` of the running remainder
/// determines how much of the generator (scaled by `alpha^log(c)`) to XOR
/// back in. A leading coefficient of zero means "subtract nothing" and the
/// register just shifts.
fn reed_solomon_remainder(data: &[u8], generator: &[u8]) -> Vec<u8> {
    let degree = generator.len();
    let mut register = vec![0u8; degree];
    for &b in data {
        let c = register.remove(0);
        register.push(0);
        let factor = b ^ c;
        if factor == 0 {
            continue;
        }
        for (r, &g) in register.iter_mut().zip(generator.iter()) {
            *r ^= gf256::multiply(g, factor);
        }
    }
    register
}

/// One block of codewords: the data portion (padding already applied by
/// `data_encoder`) followed by its Reed-Solomon parity.
pub struct Block {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Splits `data` (already padded to exactly the version/level's data
/// codeword capacity) into its Reed-Solomon blocks and computes each
/// block's parity.
///
/// Blocks come in at most two size groups: a short group and a long group
/// (long = short + 1 data codeword), short group first, as laid out by
/// `NUM_ERROR_CORRECTION_BLOCKS`/`ECC_CODEWORDS_PER_BLOCK`.
pub fn split_into_blocks(ver: Version, ecl: ErrorLevel, data: &[u8]) -> Vec<Block> {
    assert_eq!(data.len(), data_codeword_capacity(ver, ecl), "data length mismatch");

    let num_blocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl);
    let block_ecc_len = table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl);
    let raw_codewords = raw_data_modules(ver) / 8;
    let num_short_blocks = num_blocks - raw_codewords % num_blocks;
    let short_block_len = raw_codewords / num_blocks;

    let generator = gf256::generator_polynomial(block_ecc_len);
    let mut blocks = Vec::with_capacity(num_blocks);
    let mut cursor = 0usize;
    for i in 0..num_blocks {
        let data_len = short_block_len - block_ecc_len + usize::from(i >= num_short_blocks);
        let block_data = data[cursor..cursor + data_len].to_vec();
        cursor += data_len;
        let ecc = reed_solomon_remainder(&block_data, &generator);
        blocks.push(Block { data: block_data, ecc });
    }
    blocks
}

/// Interleaves a symbol's blocks column-major: all blocks' data codewords
/// first (shorter blocks simply contribute nothing once exhausted), then
/// all blocks' EC codewords.
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let max_data_len = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let ecc_len = blocks.first().map(|b| b.ecc.len()).unwrap_or(0);
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..max_data_len {
        for block in blocks {
            if i < block.data.len() {
                out.push(block.data[i]);
            }
        }
    }
    for i in 0..ecc_len {
        for block in blocks {
            out.push(block.ecc[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version1_level_l_capacity_matches_known_value() {
        // Version 1-L: 19 data codewords (152 bits), well-known reference value.
        assert_eq!(data_codeword_capacity(Version::new(1), ErrorLevel::L), 19);
    }

    #[test]
    fn version1_level_h_capacity_matches_known_value() {
        assert_eq!(data_codeword_capacity(Version::new(1), ErrorLevel::H), 9);
    }

    #[test]
    fn rs_remainder_is_divisible_by_generator() {
        // D || E must be divisible by the generator polynomial: dividing it
        // again should yield an all-zero remainder.
        let data = [32u8, 65, 205, 69, 41, 220, 46, 128, 236];
        let generator = gf256::generator_polynomial(17);
        let ecc = reed_solomon_remainder(&data, &generator);
        let mut combined = data.to_vec();
        combined.extend_from_slice(&ecc);
        let check = reed_solomon_remainder(&combined, &generator);
        assert!(check.iter().all(|&b| b == 0));
    }

    #[test]
    fn split_then_interleave_preserves_all_bytes_grouped_by_position() {
        let ver = Version::new(5);
        let ecl = ErrorLevel::Q;
        let capacity = data_codeword_capacity(ver, ecl);
        let data: Vec<u8> = (0..capacity).map(|i| (i % 256) as u8).collect();
        let blocks = split_into_blocks(ver, ecl, &data);
        let interleaved = interleave(&blocks);
        let total_ecc: usize = blocks.iter().map(|b| b.ecc.len()).sum();
        let total_data: usize = blocks.iter().map(|b| b.data.len()).sum();
        assert_eq!(interleaved.len(), total_data + total_ecc);
        assert_eq!(total_data, capacity);
    }
}
