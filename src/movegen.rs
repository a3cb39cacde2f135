//! Bit-parallel move generation and flip resolution.
//!
//! Both functions walk the eight ray directions as four shift distances,
//! each taken once toward higher bit indices and once toward lower ones.
//! Opponent discs are masked per distance so that a run can never wrap
//! from one edge of the board onto the opposite edge.

use crate::bitboard::{Bitboard, HORIZONTAL_MASK, VERTICAL_MASK};

/// Shift distances: horizontal, anti-diagonal, vertical, diagonal.
const DISTANCES: [i32; 4] = [1, 7, 8, 9];

/// Extra fill steps after the seed. An 8-wide board holds at most six
/// opponent discs between two bounding squares.
const FILL_STEPS: usize = 5;

/// Opponent discs that may sit inside a run for each entry of `DISTANCES`.
#[inline]
fn direction_masks(theirs: Bitboard) -> [Bitboard; 4] {
    [
        theirs & HORIZONTAL_MASK,
        theirs & HORIZONTAL_MASK & VERTICAL_MASK,
        theirs & VERTICAL_MASK,
        theirs & HORIZONTAL_MASK & VERTICAL_MASK,
    ]
}

/// Grow `seed` through `mask` one step at a time in direction `d`.
#[inline]
fn fill(seed: Bitboard, mask: Bitboard, d: i32) -> Bitboard {
    let mut pattern = mask & seed.shift(d);
    for _ in 0..FILL_STEPS {
        pattern |= mask & pattern.shift(d);
    }
    pattern
}

/// Squares where the side owning `mine` may legally place a disc.
///
/// Returns an empty board when the side has to pass.
#[inline]
pub fn candidates(mine: Bitboard, theirs: Bitboard) -> Bitboard {
    let masks = direction_masks(theirs);
    let mut result = Bitboard::empty();
    for (&d, &mask) in DISTANCES.iter().zip(masks.iter()) {
        result |= fill(mine, mask, d).shift(d);
        result |= fill(mine, mask, -d).shift(-d);
    }
    result & !(mine | theirs)
}

/// Opponent discs captured when the side owning `mine` places on `mv`.
///
/// `mv` must be a single square taken from [`candidates`]; the result is
/// meaningless otherwise. For every direction, the run reachable from the
/// mover's discs is intersected with the run reachable from `mv` heading
/// back the other way, which leaves exactly the bracketed segment.
#[inline]
pub fn flips(mine: Bitboard, theirs: Bitboard, mv: Bitboard) -> Bitboard {
    debug_assert!(mv.is_single());
    debug_assert!((mv & (mine | theirs)).is_empty());

    let masks = direction_masks(theirs);
    let mut result = Bitboard::empty();
    for (&d, &mask) in DISTANCES.iter().zip(masks.iter()) {
        result |= fill(mine, mask, d) & fill(mv, mask, -d);
        result |= fill(mine, mask, -d) & fill(mv, mask, d);
    }
    result
}
