use crate::error_level::ErrorLevel;
use crate::matrix::{Matrix, ReservationMask};
use crate::version::Version;

/// Side length in modules of a symbol at the given version (21 + 4*(v-1)).
pub fn side_for_version(ver: Version) -> i32 {
    4 * i32::from(ver.value()) + 17
}

/// Lays down every function pattern (finders, separators, timing strips,
/// alignment patterns, the permanent dark module, and reserved space for
/// format/version info) onto a fresh matrix, and produces the matching
/// reservation mask that `data_placer` uses to skip those modules.
///
/// Format and version info bits themselves are not written here: their
/// final value depends on the chosen mask pattern, so they're filled in by
/// `write_format_info`/`write_version_info` once a mask has been selected.
pub fn place_function_patterns(ver: Version) -> (Matrix, ReservationMask) {
    let side = side_for_version(ver);
    let mut grid = Matrix::new(side);
    let mut mask = ReservationMask::new(side);

    draw_finder_pattern(&mut grid, &mut mask, 3, 3);
    draw_finder_pattern(&mut grid, &mut mask, side - 4, 3);
    draw_finder_pattern(&mut grid, &mut mask, 3, side - 4);

    draw_timing_patterns(&mut grid, &mut mask, side);
    draw_alignment_patterns(&mut grid, &mut mask, ver, side);

    // The dark module, always at (4*version + 9, 8).
    grid.set(8, side - 8, true);
    mask.reserve(8, side - 8);

    reserve_format_info_areas(&mut mask, side);
    if ver.value() >= 7 {
        reserve_version_info_areas(&mut mask, side);
    }

    (grid, mask)
}

fn draw_finder_pattern(grid: &mut Matrix, mask: &mut ReservationMask, center_x: i32, center_y: i32) {
    let side = grid.side();
    for dy in -4..=4i32 {
        for dx in -4..=4i32 {
            let x = center_x + dx;
            let y = center_y + dy;
            if x < 0 || x >= side || y < 0 || y >= side {
                continue;
            }
            let chebyshev = dx.abs().max(dy.abs());
            let dark = chebyshev != 2 && chebyshev != 4;
            grid.set(x, y, dark);
            mask.reserve(x, y);
        }
    }
}

/// Timing strips run the full side; the finder/separator blocks at both
/// ends already own those modules, so re-reserving them here is harmless
/// (the mask is idempotent).
fn draw_timing_patterns(grid: &mut Matrix, mask: &mut ReservationMask, side: i32) {
    for i in 0..side {
        let dark = i % 2 == 0;
        grid.set(6, i, dark);
        mask.reserve(6, i);
        grid.set(i, 6, dark);
        mask.reserve(i, 6);
    }
}

fn draw_alignment_patterns(grid: &mut Matrix, mask: &mut ReservationMask, ver: Version, side: i32) {
    let positions = alignment_pattern_positions(ver);
    let num = positions.len();
    for (i, &cy) in positions.iter().enumerate() {
        for (j, &cx) in positions.iter().enumerate() {
            // Skip the three positions that coincide with a finder pattern:
            // both ends of each axis paired with the opposite end.
            let skip = (i == 0 && j == 0) || (i == 0 && j == num - 1) || (i == num - 1 && j == 0);
            if skip {
                continue;
            }
            draw_alignment_square(grid, mask, cx, cy, side);
        }
    }
}

fn draw_alignment_square(grid: &mut Matrix, mask: &mut ReservationMask, center_x: i32, center_y: i32, side: i32) {
    for dy in -2..=2i32 {
        for dx in -2..=2i32 {
            let x = center_x + dx;
            let y = center_y + dy;
            if x < 0 || x >= side || y < 0 || y >= side {
                continue;
            }
            let chebyshev = dx.abs().max(dy.abs());
            grid.set(x, y, chebyshev != 1);
            mask.reserve(x, y);
        }
    }
}

/// Row/column coordinates (both axes share the same set) at which
/// alignment pattern centers sit for the given version; empty for
/// version 1, which has none.
///
/// Computed from the standard's step/offset rule rather than looked up
/// from the full 40-row literal table: the spacing is as even as possible
/// given the number of patterns, anchored at module 6 on the low end and
/// `side - 7` on the high end.
pub fn alignment_pattern_positions(ver: Version) -> Vec<i32> {
    let v = i32::from(ver.value());
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let side = side_for_version(ver);
    let step = if v == 32 {
        26
    } else {
        (v * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };
    let mut positions = vec![6];
    let mut pos = side - 7;
    let mut rest = Vec::new();
    while rest.len() + 1 < num_align as usize {
        rest.push(pos);
        pos -= step;
    }
    rest.reverse();
    positions.extend(rest);
    positions
}

fn reserve_format_info_areas(mask: &mut ReservationMask, side: i32) {
    for i in 0..=8 {
        if i != 6 {
            mask.reserve(i, 8);
            mask.reserve(8, i);
        }
    }
    for i in 0..8 {
        mask.reserve(side - 1 - i, 8);
        mask.reserve(8, side - 1 - i);
    }
}

fn reserve_version_info_areas(mask: &mut ReservationMask, side: i32) {
    for y in 0..6 {
        for x in 0..3 {
            mask.reserve(side - 11 + x, y);
            mask.reserve(y, side - 11 + x);
        }
    }
}

/// Computes the 15-bit format info word (5 data bits + 10 BCH check bits,
/// XORed with the fixed mask `0x5412`) for an (error level, mask pattern)
/// pair and writes it into both copies in `grid`.
pub fn write_format_info(grid: &mut Matrix, ecl: ErrorLevel, mask_id: u8) {
    let side = grid.side();
    let data = (u32::from(ecl.format_bits()) << 3) | u32::from(mask_id);
    let bits = data << 10 | bch_remainder(data, 0x537, 10);
    let bits = bits ^ 0x5412;

    for i in 0..=5 {
        grid.set(8, i, get_bit(bits, i));
    }
    grid.set(8, 7, get_bit(bits, 6));
    grid.set(8, 8, get_bit(bits, 7));
    grid.set(7, 8, get_bit(bits, 8));
    for i in 9..15 {
        grid.set(14 - i, 8, get_bit(bits, i));
    }

    for i in 0..8 {
        grid.set(side - 1 - i, 8, get_bit(bits, i));
    }
    for i in 8..15 {
        grid.set(8, side - 15 + i, get_bit(bits, i));
    }
}

/// Computes the 18-bit version info word (6 data bits + 12 BCH check bits)
/// for versions 7-40 and writes both copies into `grid`. A no-op below
/// version 7, where no version info area exists.
pub fn write_version_info(grid: &mut Matrix, ver: Version) {
    if ver.value() < 7 {
        return;
    }
    let side = grid.side();
    let data = u32::from(ver.value());
    let bits = data << 12 | bch_remainder(data, 0x1F25, 12);

    for i in 0..18 {
        let bit = get_bit(bits, i);
        let a = i / 3;
        let b = i % 3;
        grid.set(side - 11 + b, a, bit);
        grid.set(a, side - 11 + b, bit);
    }
}

fn get_bit(x: u32, i: i32) -> bool {
    (x >> i) & 1 != 0
}

/// BCH (polynomial division) remainder of `data` shifted left by
/// `check_bits` against `generator`, used for both format and version
/// info words. Plain long division by XOR over GF(2).
fn bch_remainder(data: u32, generator: u32, check_bits: u32) -> u32 {
    let mut value = data << check_bits;
    let generator_degree = 31 - generator.leading_zeros() as i32;
    let mut msb = 31 - value.leading_zeros() as i32;
    while value != 0 && msb >= generator_degree {
        value ^= generator << (msb - generator_degree);
        msb = 31 - value.leading_zeros() as i32;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_for_version_matches_known_values() {
        assert_eq!(side_for_version(Version::new(1)), 21);
        assert_eq!(side_for_version(Version::new(40)), 177);
    }

    #[test]
    fn version1_has_no_alignment_patterns() {
        assert!(alignment_pattern_positions(Version::new(1)).is_empty());
    }

    #[test]
    fn version2_has_a_single_alignment_pattern_at_18() {
        assert_eq!(alignment_pattern_positions(Version::new(2)), vec![6, 18]);
    }

    #[test]
    fn version7_alignment_positions_use_floor_division() {
        // Regression: a float `ceil`-based step computation overshoots here
        // (producing [6, 20, 38]) because 34/12 isn't exact. The standard's
        // integer/floor division gives the correct [6, 22, 38].
        assert_eq!(alignment_pattern_positions(Version::new(7)), vec![6, 22, 38]);
    }

    #[test]
    fn finder_patterns_and_dark_module_are_reserved() {
        let (grid, mask) = place_function_patterns(Version::new(1));
        let reserved = mask.finish();
        assert!(reserved.get(3, 3));
        assert!(grid.get(8, side_for_version(Version::new(1)) - 8));
    }

    #[test]
    fn format_info_round_trips_through_bch() {
        let mut grid = Matrix::new(side_for_version(Version::new(1)));
        write_format_info(&mut grid, ErrorLevel::M, 0);
        // Sanity: at least one of the format bits ends up dark (the
        // 0x5412 mask guarantees the all-zero payload isn't all-light).
        assert!(grid.get(8, 0) || grid.get(8, 1) || grid.get(8, 2));
    }

    #[test]
    fn version_info_is_a_noop_below_version_7() {
        let mut grid = Matrix::new(side_for_version(Version::new(6)));
        let before: Vec<bool> = (0..grid.side()).map(|x| grid.get(x, 0)).collect();
        write_version_info(&mut grid, Version::new(6));
        let after: Vec<bool> = (0..grid.side()).map(|x| grid.get(x, 0)).collect();
        assert_eq!(before, after);
    }
}
