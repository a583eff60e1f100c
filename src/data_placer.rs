use crate::mask::Mask;
use crate::matrix::Matrix;

/// Walks the symbol's free modules in the standard up/down zig-zag
/// (two columns at a time, skipping the vertical timing column),
/// writing `codewords`' bits MSB-first. Leftover modules past the end of
/// `codewords` (the "remainder bits" some versions have) are left light.
pub fn place_codewords(grid: &mut Matrix, reserved: &Matrix, codewords: &[u8]) {
    let side = grid.side();
    let mut bit_index = 0usize;
    let total_bits = codewords.len() * 8;

    let mut x = side - 1;
    let mut upward = true;
    while x > 0 {
        if x == 6 {
            x -= 1; // vertical timing column has no data modules
        }
        for i in 0..side {
            let y = if upward { side - 1 - i } else { i };
            for &col in &[x, x - 1] {
                if reserved.get(col, y) {
                    continue;
                }
                if bit_index < total_bits {
                    let byte = codewords[bit_index / 8];
                    let bit = (byte >> (7 - (bit_index % 8))) & 1 != 0;
                    grid.set(col, y, bit);
                    bit_index += 1;
                }
            }
        }
        upward = !upward;
        x -= 2;
    }
}

/// The eight standard mask predicates (ISO/IEC 18004 Table 10), keyed by
/// pattern id `0..=7`. Each is a pure function of module coordinates so
/// applying a mask never depends on shared state beyond `(x, y)`.
pub fn mask_predicate(mask_id: u8, x: i32, y: i32) -> bool {
    match mask_id {
        0 => (x + y) % 2 == 0,
        1 => y % 2 == 0,
        2 => x % 3 == 0,
        3 => (x + y) % 3 == 0,
        4 => (x / 3 + y / 2) % 2 == 0,
        5 => (x * y) % 2 + (x * y) % 3 == 0,
        6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
        7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        _ => unreachable!("mask id out of range"),
    }
}

/// XORs `mask`'s predicate into every non-reserved module of `grid`.
/// Applying the same mask twice is its own inverse, which is how
/// `mask_evaluator` can cheaply try all eight without re-placing data.
pub fn apply_mask(grid: &mut Matrix, reserved: &Matrix, mask: Mask) {
    let side = grid.side();
    for y in 0..side {
        for x in 0..side {
            if !reserved.get(x, y) && mask_predicate(mask.value(), x, y) {
                grid.xor(x, y, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn placement_skips_reserved_modules() {
        let (mut grid, reserved) = crate::functional_placer::place_function_patterns(Version::new(1));
        let reserved_matrix = reserved.finish();
        let before: Vec<bool> = (0..grid.side())
            .flat_map(|y| (0..grid.side()).map(move |x| (x, y)))
            .filter(|&(x, y)| reserved_matrix.get(x, y))
            .map(|(x, y)| grid.get(x, y))
            .collect();
        let codewords = vec![0xFFu8; 64];
        place_codewords(&mut grid, &reserved_matrix, &codewords);
        let after: Vec<bool> = (0..grid.side())
            .flat_map(|y| (0..grid.side()).map(move |x| (x, y)))
            .filter(|&(x, y)| reserved_matrix.get(x, y))
            .map(|(x, y)| grid.get(x, y))
            .collect();
        assert_eq!(before, after, "reserved modules must be untouched by data placement");
    }

    #[test]
    fn mask_predicates_partition_evenly_over_a_small_grid() {
        for id in 0..8u8 {
            let mut dark = 0;
            for y in 0..6 {
                for x in 0..6 {
                    if mask_predicate(id, x, y) {
                        dark += 1;
                    }
                }
            }
            assert!(dark > 0 && dark < 36, "mask {id} degenerate");
        }
    }

    #[test]
    #[should_panic]
    fn mask_predicate_rejects_out_of_range_id() {
        mask_predicate(8, 0, 0);
    }
}
