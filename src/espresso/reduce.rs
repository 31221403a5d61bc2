//! REDUCE: shrink each cube to its smallest adequate replacement
//!
//! Each cube is replaced by its intersection with the smallest cube
//! containing the complement of everything else (SCCC of the cofactored
//! rest of the cover plus the don't-care set). Replacements happen in
//! sequence, so later cubes are reduced against earlier reductions; two
//! processing orders alternate between calls to keep the loop from
//! settling into one groove.

use super::context::CubeContext;
use super::cube::{cdist, cube_and, set_ord, setp_equal};
use super::cubelist::CubeList;
use super::family::{Attr, Family};
use super::unate::{cube_is_void, sccc};

/// Reduce every cube of `f` against `f ∪ d`.
///
/// `toggle` selects the processing order: distance from the largest cube
/// (ties broken largest first), or descending inner product with the
/// column counts.
pub fn reduce(ctx: &CubeContext, f: Family, d: &Family, toggle: bool) -> Family {
    let mut order: Vec<usize> = (0..f.count()).collect();
    if f.count() > 1 {
        if !toggle {
            let largest = (0..f.count())
                .max_by_key(|&i| (set_ord(f.cube(i)), std::cmp::Reverse(i)))
                .unwrap();
            let key: Vec<(usize, usize, usize)> = (0..f.count())
                .map(|i| {
                    (
                        cdist(ctx, f.cube(largest), f.cube(i)),
                        usize::MAX - set_ord(f.cube(i)),
                        i,
                    )
                })
                .collect();
            order.sort_by_key(|&i| key[i]);
        } else {
            let ones = f.column_ones(ctx);
            let key = f.cube_weights(&ones);
            order.sort_by_key(|&i| (std::cmp::Reverse(key[i]), i));
        }
    }

    let mut cur = Family::with_capacity(ctx, f.count());
    for &i in &order {
        cur.push_with(f.cube(i), f.attr(i));
    }
    cur.set_all(Attr::ACTIVE);

    for i in 0..cur.count() {
        if !cur.attr(i).test(Attr::ACTIVE) {
            continue;
        }
        let replacement = {
            let list = CubeList::from_families(ctx, &cur, d);
            let c = cur.cube(i);
            let small = sccc(ctx, list.cofactor(ctx, c));
            cube_and(c, &small)
        };
        if cube_is_void(ctx, &replacement) {
            // an empty product covers nothing; zero it so later cofactors
            // drop it outright
            super::cube::set_clear(cur.cube_mut(i));
            cur.attr_mut(i).reset(Attr::ACTIVE);
            continue;
        }
        if !setp_equal(&replacement, cur.cube(i)) {
            cur.attr_mut(i).reset(Attr::PRIME);
            cur.cube_mut(i).copy_from_slice(&replacement);
        }
    }

    cur.keep(Attr::ACTIVE)
}

/// Reduce every cube against the *original* cover, with no replacement.
///
/// The shrunken cubes overlap freely; the gasps use them as probes for
/// expansions the main loop cannot reach. Cubes that reduce to nothing are
/// simply dropped.
pub fn reduce_without_replacement(ctx: &CubeContext, f: &Family, d: &Family) -> Family {
    let mut out = Family::new(ctx);
    for i in 0..f.count() {
        let replacement = {
            let list = CubeList::from_families(ctx, f, d);
            let c = f.cube(i);
            let small = sccc(ctx, list.cofactor(ctx, c));
            cube_and(c, &small)
        };
        if !cube_is_void(ctx, &replacement) {
            out.push(&replacement);
        }
    }
    out
}
