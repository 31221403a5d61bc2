//! EXPAND: grow each cube into a prime implicant against the OFF-set
//!
//! Each cube keeps three part sets while it grows: RAISE (committed), the
//! free set (undecided) and, implicitly, the lowered parts (forbidden).
//! OFF-cubes at distance one force their conflicting parts low and drop
//! out; parts no active OFF-cube mentions raise for free. In between, the
//! cube prefers raisings that swallow whole ON-cubes, and when none is
//! feasible it raises one safe part at a time. A part is only ever
//! lowered when raising it would intersect an OFF-cube outright, which is
//! what makes the final cube prime.

use tracing::trace;

use super::context::{CubeContext, Word};
use super::cube::{
    cdist0, cdist01, cube_diff, cube_or, or_in, set_ord, set_remove, set_test, setp_empty,
    setp_implies,
};
use super::family::{Attr, Family};

/// Expand every non-prime cube of `f` against the OFF-set `r`.
///
/// Cubes are processed largest first; any cube swallowed by a fresh prime
/// is marked COVERED and dropped from the result. With `nonsparse` set
/// (the MAKE_SPARSE caller), parts of sparse variables stay out of the
/// free set so the expansion only shortens literals.
pub fn expand(ctx: &CubeContext, mut f: Family, r: &Family, nonsparse: bool) -> Family {
    f.set_all(Attr::ACTIVE);
    f.reset_all(Attr::COVERED);

    let r_ones = r.column_ones(ctx);

    let mut order: Vec<usize> = (0..f.count()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(set_ord(f.cube(i))));

    let mut r_active = vec![true; r.count()];
    for &i in &order {
        if !f.attr(i).test(Attr::ACTIVE) || f.attr(i).test(Attr::PRIME) {
            continue;
        }
        let raise = expand1(ctx, &f, r, &mut r_active, i, nonsparse, &r_ones);
        trace!(cube = i, ord = set_ord(&raise), "expanded to prime");
        f.cube_mut(i).copy_from_slice(&raise);
        f.attr_mut(i).set(Attr::PRIME);

        for j in 0..f.count() {
            if j != i
                && f.attr(j).test(Attr::ACTIVE)
                && setp_implies(f.cube(j), &raise)
            {
                f.attr_mut(j).reset(Attr::ACTIVE);
                f.attr_mut(j).set(Attr::COVERED);
            }
        }
    }

    f.keep(Attr::ACTIVE)
}

/// Expand the single cube `f[i]`; returns the prime it grows into.
pub(crate) fn expand1(
    ctx: &CubeContext,
    f: &Family,
    r: &Family,
    r_active: &mut [bool],
    i: usize,
    nonsparse: bool,
    r_ones: &[usize],
) -> Vec<Word> {
    let mut raise = f.cube(i).to_vec();
    let mut freeset = cube_diff(ctx.fullset(), &raise);
    if nonsparse {
        for var in 0..ctx.num_vars() {
            if ctx.is_sparse(var) {
                let mask = ctx.var_mask(var);
                for w in ctx.first_word(var)..=ctx.last_word(var) {
                    freeset[w] &= !mask[w];
                }
            }
        }
    }
    r_active.fill(true);

    loop {
        essen_parts(ctx, r, r_active, &raise, &mut freeset);
        essen_raising(ctx, r, r_active, &mut raise, &mut freeset);
        if setp_empty(&freeset) {
            break;
        }

        // feasibly covered ON-cubes: prefer the raising that swallows the
        // cube whose super-cube swallows the most others
        let mut best: Option<(usize, usize, usize, Vec<Word>)> = None;
        for j in 0..f.count() {
            if j == i || !f.attr(j).test(Attr::ACTIVE) || f.attr(j).test(Attr::PRIME) {
                continue;
            }
            let need = cube_diff(f.cube(j), &raise);
            if setp_empty(&need) || !setp_implies(&need, &freeset) {
                continue;
            }
            let super_cube = cube_or(&raise, f.cube(j));
            let feasible = r
                .iter()
                .zip(r_active.iter())
                .all(|(rr, &act)| !act || !cdist0(ctx, &super_cube, rr));
            if !feasible {
                continue;
            }
            let score = (0..f.count())
                .filter(|&k| {
                    k != i
                        && f.attr(k).test(Attr::ACTIVE)
                        && setp_implies(f.cube(k), &super_cube)
                })
                .count();
            let key = (score, usize::MAX - set_ord(&need), usize::MAX - j);
            if best
                .as_ref()
                .is_none_or(|(s, o, jj, _)| (*s, *o, *jj) < key)
            {
                best = Some((key.0, key.1, key.2, need));
            }
        }
        if let Some((_, _, _, need)) = best {
            or_in(&mut raise, &need);
            for (x, &n) in freeset.iter_mut().zip(&need) {
                *x &= !n;
            }
            continue;
        }

        // endgame: raise one part at a time; every active OFF-cube sits at
        // distance two or more, so any single part is safe
        let mut best_part: Option<(usize, usize, usize, usize)> = None;
        for part in bits_of(&freeset) {
            let on_score = (0..f.count())
                .filter(|&k| {
                    k != i && f.attr(k).test(Attr::ACTIVE) && set_test(f.cube(k), part)
                })
                .count();
            let off_score = r
                .iter()
                .zip(r_active.iter())
                .filter(|(rr, &act)| act && set_test(rr, part))
                .count();
            let key = (
                on_score,
                usize::MAX - off_score,
                usize::MAX - r_ones[part],
                usize::MAX - part,
            );
            if best_part
                .as_ref()
                .is_none_or(|&(a, b, c, d)| (a, b, c, d) < key)
            {
                best_part = Some(key);
            }
        }
        let part = usize::MAX - best_part.expect("free set is not empty").3;
        super::cube::set_insert(&mut raise, part);
        set_remove(&mut freeset, part);
    }

    raise
}

/// Parts that must stay low: an OFF-cube at distance one from RAISE keeps
/// its conflicting parts out of the free set and leaves the blocking
/// matrix for good.
fn essen_parts(
    ctx: &CubeContext,
    r: &Family,
    r_active: &mut [bool],
    raise: &[Word],
    freeset: &mut [Word],
) {
    for (k, rr) in r.iter().enumerate() {
        if !r_active[k] {
            continue;
        }
        match cdist01(ctx, raise, rr) {
            0 => panic!("ON-set and OFF-set are not orthogonal"),
            1 => {
                let var = (0..ctx.num_vars())
                    .find(|&v| !super::cube::var_intersects(ctx, raise, rr, v))
                    .expect("distance-one pair has a conflict variable");
                let mask = ctx.var_mask(var);
                for w in ctx.first_word(var)..=ctx.last_word(var) {
                    freeset[w] &= !(rr[w] & mask[w]);
                }
                r_active[k] = false;
            }
            _ => {}
        }
    }
    // cubes the expansion can no longer reach stop constraining it
    let reach = cube_or(raise, freeset);
    for (k, rr) in r.iter().enumerate() {
        if r_active[k] && !cdist0(ctx, &reach, rr) {
            r_active[k] = false;
        }
    }
}

/// Parts no active OFF-cube mentions can always be raised.
fn essen_raising(
    ctx: &CubeContext,
    r: &Family,
    r_active: &[bool],
    raise: &mut [Word],
    freeset: &mut [Word],
) {
    let mut blocked = ctx.new_cube();
    for (k, rr) in r.iter().enumerate() {
        if r_active[k] {
            or_in(&mut blocked, rr);
        }
    }
    for w in 0..freeset.len() {
        let open = freeset[w] & !blocked[w];
        raise[w] |= open;
        freeset[w] &= !open;
    }
}

fn bits_of(cube: &[Word]) -> impl Iterator<Item = usize> + '_ {
    cube.iter().enumerate().flat_map(|(w, &word)| {
        let mut v = word;
        std::iter::from_fn(move || {
            if v == 0 {
                None
            } else {
                let b = v.trailing_zeros() as usize;
                v &= v - 1;
                Some(w * 32 + b)
            }
        })
    })
}
