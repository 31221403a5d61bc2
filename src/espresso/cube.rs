//! Positional-cube algebra
//!
//! A cube is a bit-vector of `ctx.size()` positions packed into [`Word`]s.
//! A 1 at position `j` of variable `v` means part `j` is present; a variable
//! with all of its parts present places no constraint, a variable with none
//! of its parts present makes the cube empty. The routines here are the
//! word-wise set primitives everything else is built from.
//!
//! Distance is counted per variable: `cdist(a, b)` is the number of
//! variables in which `a` and `b` have no common part. The binary block is
//! handled word-parallel (all binary variables in a word at once); the
//! multiple-valued tail falls back to a per-variable mask walk.

use super::context::{CubeContext, Word};

/// Even bit positions of a word; each binary variable's first part lands on
/// one of these because the binary block starts at bit 0.
const EVENS: Word = 0x5555_5555;

pub fn set_clear(r: &mut [Word]) {
    r.fill(0);
}

pub fn set_copy(r: &mut [Word], a: &[Word]) {
    r.copy_from_slice(a);
}

pub fn set_insert(r: &mut [Word], bit: usize) {
    r[bit / 32] |= 1 << (bit % 32);
}

pub fn set_remove(r: &mut [Word], bit: usize) {
    r[bit / 32] &= !(1 << (bit % 32));
}

pub fn set_test(a: &[Word], bit: usize) -> bool {
    a[bit / 32] & (1 << (bit % 32)) != 0
}

/// `r |= a`
pub fn or_in(r: &mut [Word], a: &[Word]) {
    for (x, &y) in r.iter_mut().zip(a) {
        *x |= y;
    }
}

/// `r &= a`
pub fn and_in(r: &mut [Word], a: &[Word]) {
    for (x, &y) in r.iter_mut().zip(a) {
        *x &= y;
    }
}

/// `r -= a` (set difference)
pub fn diff_in(r: &mut [Word], a: &[Word]) {
    for (x, &y) in r.iter_mut().zip(a) {
        *x &= !y;
    }
}

pub fn cube_or(a: &[Word], b: &[Word]) -> Vec<Word> {
    a.iter().zip(b).map(|(&x, &y)| x | y).collect()
}

pub fn cube_and(a: &[Word], b: &[Word]) -> Vec<Word> {
    a.iter().zip(b).map(|(&x, &y)| x & y).collect()
}

pub fn cube_diff(a: &[Word], b: &[Word]) -> Vec<Word> {
    a.iter().zip(b).map(|(&x, &y)| x & !y).collect()
}

pub fn cube_xor(a: &[Word], b: &[Word]) -> Vec<Word> {
    a.iter().zip(b).map(|(&x, &y)| x ^ y).collect()
}

pub fn setp_empty(a: &[Word]) -> bool {
    a.iter().all(|&x| x == 0)
}

pub fn setp_equal(a: &[Word], b: &[Word]) -> bool {
    a == b
}

/// `a ⊆ b`
pub fn setp_implies(a: &[Word], b: &[Word]) -> bool {
    a.iter().zip(b).all(|(&x, &y)| x & !y == 0)
}

pub fn setp_disjoint(a: &[Word], b: &[Word]) -> bool {
    a.iter().zip(b).all(|(&x, &y)| x & y == 0)
}

/// Number of parts present (population count).
pub fn set_ord(a: &[Word]) -> usize {
    a.iter().map(|x| x.count_ones() as usize).sum()
}

/// True when `p | cof` is the universe.
pub fn full_row(ctx: &CubeContext, p: &[Word], cof: &[Word]) -> bool {
    p.iter()
        .zip(cof)
        .zip(ctx.fullset())
        .all(|((&x, &y), &f)| x | y == f)
}

/// True when `a` and `b` intersect inside variable `var`.
pub fn var_intersects(ctx: &CubeContext, a: &[Word], b: &[Word], var: usize) -> bool {
    let mask = ctx.var_mask(var);
    (ctx.first_word(var)..=ctx.last_word(var)).any(|w| a[w] & b[w] & mask[w] != 0)
}

/// True when `a` restricted to `var` holds every part of the variable.
pub fn var_is_full(ctx: &CubeContext, a: &[Word], var: usize) -> bool {
    let mask = ctx.var_mask(var);
    (ctx.first_word(var)..=ctx.last_word(var)).all(|w| a[w] & mask[w] == mask[w])
}

/// `cdist(a, b) == 0`: the cubes intersect in every variable.
pub fn cdist0(ctx: &CubeContext, a: &[Word], b: &[Word]) -> bool {
    for w in 0..ctx.n_words() {
        let bm = ctx.binary_mask(w);
        if bm != 0 {
            let t = a[w] & b[w];
            let evens = EVENS & bm;
            if (t | (t >> 1)) & evens != evens {
                return false;
            }
        }
    }
    for var in ctx.num_binary_vars()..ctx.num_vars() {
        if !var_intersects(ctx, a, b, var) {
            return false;
        }
    }
    true
}

/// Number of variables in which `a` and `b` have empty intersection.
pub fn cdist(ctx: &CubeContext, a: &[Word], b: &[Word]) -> usize {
    let mut dist = 0;
    for w in 0..ctx.n_words() {
        let bm = ctx.binary_mask(w);
        if bm != 0 {
            let t = a[w] & b[w];
            let evens = EVENS & bm;
            dist += (evens & !(t | (t >> 1))).count_ones() as usize;
        }
    }
    for var in ctx.num_binary_vars()..ctx.num_vars() {
        if !var_intersects(ctx, a, b, var) {
            dist += 1;
        }
    }
    dist
}

/// `min(cdist(a, b), 2)`, with early exit once two conflicts are seen.
pub fn cdist01(ctx: &CubeContext, a: &[Word], b: &[Word]) -> usize {
    let mut dist = 0;
    for w in 0..ctx.n_words() {
        let bm = ctx.binary_mask(w);
        if bm != 0 {
            let t = a[w] & b[w];
            let evens = EVENS & bm;
            dist += (evens & !(t | (t >> 1))).count_ones() as usize;
            if dist >= 2 {
                return 2;
            }
        }
    }
    for var in ctx.num_binary_vars()..ctx.num_vars() {
        if !var_intersects(ctx, a, b, var) {
            dist += 1;
            if dist >= 2 {
                return 2;
            }
        }
    }
    dist
}

/// Consensus of two cubes.
///
/// Defined when the distance is at most 1: at distance 0 it is the
/// intersection, at distance 1 the intersection everywhere except the single
/// conflicting variable, which takes the union of both cubes' parts.
/// Returns `None` at distance 2 or more.
pub fn consensus(ctx: &CubeContext, a: &[Word], b: &[Word]) -> Option<Vec<Word>> {
    let mut conflict = None;
    for var in 0..ctx.num_vars() {
        if !var_intersects(ctx, a, b, var) {
            if conflict.is_some() {
                return None;
            }
            conflict = Some(var);
        }
    }
    let mut r = cube_and(a, b);
    if let Some(var) = conflict {
        let mask = ctx.var_mask(var);
        for w in ctx.first_word(var)..=ctx.last_word(var) {
            r[w] |= (a[w] | b[w]) & mask[w];
        }
    }
    Some(r)
}

/// Smallest cube containing the complement of `a`.
///
/// A cube deficient in no variable has an empty complement; deficient in
/// exactly one variable `v`, the complement is the cube full everywhere with
/// `v` restricted to the missing parts; deficient in two or more variables,
/// every part of every variable appears in some complement minterm.
pub fn compl_cube(ctx: &CubeContext, a: &[Word]) -> Vec<Word> {
    let mut deficient = None;
    let mut many = false;
    for var in 0..ctx.num_vars() {
        if !var_is_full(ctx, a, var) {
            if deficient.is_some() {
                many = true;
                break;
            }
            deficient = Some(var);
        }
    }
    match (deficient, many) {
        (None, _) => ctx.new_cube(),
        (Some(_), true) => ctx.full_cube(),
        (Some(var), false) => {
            let mut r = ctx.full_cube();
            let mask = ctx.var_mask(var);
            for w in ctx.first_word(var)..=ctx.last_word(var) {
                r[w] &= !(mask[w] & a[w]) | !mask[w];
            }
            r
        }
    }
}
