use crate::data_placer::{apply_mask, mask_predicate};
use crate::finder_penalty::FinderPenalty;
use crate::mask::Mask;
use crate::matrix::Matrix;

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// Tries every mask pattern `0..=7` against `unmasked`, scores each with
/// `penalty_score`, and returns the lowest-penalty masked grid together
/// with the pattern id that produced it (ties keep the lowest id, since
/// masks are tried in ascending order and only a strictly lower score
/// replaces the current best).
pub fn choose_best_mask(unmasked: &Matrix, reserved: &Matrix) -> (Matrix, u8) {
    let mut best: Option<(Matrix, u8, i32)> = None;
    for id in 0..8u8 {
        let mut candidate = unmasked.clone();
        apply_mask(&mut candidate, reserved, Mask::new(id));
        let score = penalty_score(&candidate);
        if best.as_ref().map_or(true, |(_, _, best_score)| score < *best_score) {
            best = Some((candidate, id, score));
        }
    }
    let (grid, id, _) = best.expect("mask ids 0..=7 is non-empty");
    (grid, id)
}

/// Total penalty score (P1 + P2 + P3 + P4) for a fully placed and masked
/// grid, per the standard's four-rule evaluation.
pub fn penalty_score(grid: &Matrix) -> i32 {
    adjacent_run_penalty(grid) + block_penalty(grid) + finder_like_penalty(grid) + dark_ratio_penalty(grid)
}

/// Rule 1: five or more same-colored modules in a row/column. Penalty is
/// `N1 + (run_length - 5)` per qualifying run, applied to both rows and
/// columns independently.
fn adjacent_run_penalty(grid: &Matrix) -> i32 {
    let side = grid.side();
    let mut penalty = 0;
    for y in 0..side {
        penalty += line_run_penalty(side, |x| grid.get(x, y));
    }
    for x in 0..side {
        penalty += line_run_penalty(side, |y| grid.get(x, y));
    }
    penalty
}

fn line_run_penalty(side: i32, at: impl Fn(i32) -> bool) -> i32 {
    let mut penalty = 0;
    let mut run_len = 1;
    let mut prev = at(0);
    for i in 1..side {
        let cur = at(i);
        if cur == prev {
            run_len += 1;
        } else {
            if run_len >= 5 {
                penalty += PENALTY_N1 + (run_len - 5);
            }
            run_len = 1;
            prev = cur;
        }
    }
    if run_len >= 5 {
        penalty += PENALTY_N1 + (run_len - 5);
    }
    penalty
}

/// Rule 2: each 2x2 block of same-colored modules scores `N2`, including
/// overlapping blocks.
fn block_penalty(grid: &Matrix) -> i32 {
    let side = grid.side();
    let mut penalty = 0;
    for y in 0..side - 1 {
        for x in 0..side - 1 {
            let c = grid.get(x, y);
            if grid.get(x + 1, y) == c && grid.get(x, y + 1) == c && grid.get(x + 1, y + 1) == c {
                penalty += PENALTY_N2;
            }
        }
    }
    penalty
}

/// Rule 3: the finder-like 1:1:3:1:1 ratio pattern (with the requisite
/// four-module light run on at least one side), scored `N3` per match,
/// scanned on both rows and columns via the run-history machinery shared
/// with the standard's reference penalty algorithm.
fn finder_like_penalty(grid: &Matrix) -> i32 {
    let side = grid.side();
    let mut penalty = 0;
    for y in 0..side {
        penalty += finder_like_penalty_line(side, |x| grid.get(x, y));
    }
    for x in 0..side {
        penalty += finder_like_penalty_line(side, |y| grid.get(x, y));
    }
    penalty
}

fn finder_like_penalty_line(side: i32, at: impl Fn(i32) -> bool) -> i32 {
    let mut finder = FinderPenalty::new(side);
    let mut run_color = false;
    let mut run_len = 0;
    let mut penalty = 0;
    for i in 0..side {
        let cur = at(i);
        if cur == run_color {
            run_len += 1;
        } else {
            finder.add_history(run_len);
            if !run_color {
                penalty += finder.count_patterns() * PENALTY_N3;
            }
            run_color = cur;
            run_len = 1;
        }
    }
    penalty + finder.terminate_and_count(run_color, run_len) * PENALTY_N3
}

/// Rule 4: `N4` times the smallest integer `k >= 0` such that the dark
/// proportion falls within `(45 - 5k)% ..= (55 + 5k)%`.
///
/// Computed without floating point, following the standard's own integer
/// formulation: `k = (|dark*20 - total*10| + total - 1) / total - 1`. This
/// is the exact-rational-ratio variant (it reasons about `dark/total`
/// directly rather than first flooring `dark*100/total` to the nearest
/// percent), which is the authoritative behavior per DESIGN.md.
fn dark_ratio_penalty(grid: &Matrix) -> i32 {
    let total = grid.total_modules() as i32;
    let dark = grid.count_dark() as i32;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    debug_assert!((0..=9).contains(&k));
    k * PENALTY_N4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn all_light_grid_has_maximal_dark_ratio_penalty() {
        let grid = Matrix::new(21);
        assert!(dark_ratio_penalty(&grid) > 0);
    }

    #[test]
    fn dark_ratio_penalty_uses_exact_ratio_not_floored_percent() {
        // 10/25 dark is exactly 40%. The spec's literal wording first floors
        // the percentage, then takes the nearer of the two surrounding
        // multiples of 5, which would score this 20. The standard's own
        // (and this crate's) exact-ratio formula scores it 10: a regression
        // anchor for the resolution recorded in DESIGN.md.
        let mut grid = Matrix::new(5);
        for i in 0..10 {
            grid.set(i % 5, i / 5, true);
        }
        assert_eq!(dark_ratio_penalty(&grid), 10);
    }

    #[test]
    fn checkerboard_grid_has_no_run_or_block_penalty() {
        let mut grid = Matrix::new(21);
        for y in 0..21 {
            for x in 0..21 {
                grid.set(x, y, mask_predicate(0, x, y));
            }
        }
        assert_eq!(adjacent_run_penalty(&grid), 0);
        assert_eq!(block_penalty(&grid), 0);
    }

    #[test]
    fn solid_grid_has_heavy_run_and_block_penalty() {
        let mut grid = Matrix::new(21);
        grid.fill(true);
        assert!(adjacent_run_penalty(&grid) > 0);
        assert!(block_penalty(&grid) > 0);
    }

    #[test]
    fn choose_best_mask_picks_a_valid_id() {
        let (_grid, reserved) = crate::functional_placer::place_function_patterns(Version::new(1));
        let unmasked = Matrix::new(21);
        let reserved_matrix = reserved.finish();
        let (_chosen, id) = choose_best_mask(&unmasked, &reserved_matrix);
        assert!(id <= 7);
    }
}
