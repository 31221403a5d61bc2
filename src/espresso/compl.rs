//! Complementation
//!
//! Produces a cover of the OFF-set of a cube list by the same recursion as
//! tautology, with cube-producing base cases: a single cube complements by
//! De Morgan within each deficient variable, columns of zeros emit their
//! slab directly, and the two branch results come back under their half
//! cubes with a cross-branch lift to keep the result from fragmenting.

use super::context::{CubeContext, Word};
use super::count::{binate_split_select, massive_count};
use super::cube::{cube_and, cube_or, full_row, or_in, set_insert};
use super::cubelist::CubeList;
use super::family::{contain, Family};
use super::unate::{contain_cubes, cube_is_void};

/// Cover of the complement of `t` (with its cofactor folded in).
pub fn complement(ctx: &CubeContext, t: CubeList<'_>) -> Family {
    let cubes = compl_recur(ctx, t);
    let mut out = Family::with_capacity(ctx, cubes.len());
    for c in contain_cubes(ctx, cubes) {
        out.push(&c);
    }
    out
}

/// Convenience wrapper: complement of `F` or of `F ∪ D`.
pub fn complement_cover(ctx: &CubeContext, f: &Family, d: Option<&Family>) -> Family {
    let list = match d {
        Some(d) => CubeList::from_families(ctx, f, d),
        None => CubeList::from_family(ctx, f),
    };
    complement(ctx, list)
}

fn compl_recur(ctx: &CubeContext, t: CubeList<'_>) -> Vec<Vec<Word>> {
    if t.cubes.iter().any(|p| full_row(ctx, p, &t.cof)) {
        return Vec::new();
    }
    if t.count() == 0 {
        return vec![ctx.full_cube()];
    }
    if t.count() == 1 {
        let mut c = t.cubes[0].to_vec();
        or_in(&mut c, &t.cof);
        return compl_single_cube(ctx, &c);
    }

    let data = massive_count(ctx, &t);

    // columns of zeros: nothing covers those slabs, so they go straight
    // into the result and the recursion continues without them
    if data.zero_column(t.count()).is_some() {
        let mut z = ctx.new_cube();
        for (part, &n) in data.part_zeros.iter().enumerate() {
            if n == t.count() {
                set_insert(&mut z, part);
            }
        }
        let mut out = Vec::new();
        for var in 0..ctx.num_vars() {
            let mask = ctx.var_mask(var);
            let restricted: Vec<Word> = z
                .iter()
                .zip(mask)
                .map(|(&zb, &m)| zb & m)
                .collect();
            if restricted.iter().any(|&w| w != 0) {
                let mut slab = ctx.full_cube();
                for w in ctx.first_word(var)..=ctx.last_word(var) {
                    slab[w] &= !mask[w] | restricted[w];
                }
                out.push(slab);
            }
        }
        let mut t2 = t;
        or_in(&mut t2.cof, &z);
        out.extend(compl_recur(ctx, t2));
        return out;
    }

    let (var, cl, cr) = binate_split_select(ctx, &data).expect("active variable exists");
    let left = compl_recur(ctx, t.scofactor(ctx, &cl, var));
    let right = compl_recur(ctx, t.scofactor(ctx, &cr, var));
    compl_merge(ctx, left, right, &cl, &cr, var)
}

/// De Morgan complement of one cube: one result cube per deficient
/// variable, full everywhere except that variable restricted to the
/// missing parts.
fn compl_single_cube(ctx: &CubeContext, c: &[Word]) -> Vec<Vec<Word>> {
    let mut out = Vec::new();
    for var in 0..ctx.num_vars() {
        let mask = ctx.var_mask(var);
        let deficient = (ctx.first_word(var)..=ctx.last_word(var))
            .any(|w| c[w] & mask[w] != mask[w]);
        if deficient {
            let mut r = ctx.full_cube();
            for w in ctx.first_word(var)..=ctx.last_word(var) {
                r[w] &= !mask[w] | (mask[w] & !c[w]);
            }
            out.push(r);
        }
    }
    out
}

/// Bring branch results under their half cubes and lift pairs that agree
/// outside the split variable back into one cube.
fn compl_merge(
    ctx: &CubeContext,
    left: Vec<Vec<Word>>,
    right: Vec<Vec<Word>>,
    cl: &[Word],
    cr: &[Word],
    var: usize,
) -> Vec<Vec<Word>> {
    let mask = ctx.var_mask(var);
    let eq_outside = |a: &[Word], b: &[Word]| {
        a.iter()
            .zip(b)
            .zip(mask)
            .all(|((&x, &y), &m)| x & !m == y & !m)
    };

    let lc: Vec<Vec<Word>> = left
        .iter()
        .map(|p| cube_and(p, cl))
        .filter(|c| !cube_is_void(ctx, c))
        .collect();
    let rc: Vec<Vec<Word>> = right
        .iter()
        .map(|p| cube_and(p, cr))
        .filter(|c| !cube_is_void(ctx, c))
        .collect();

    let mut used_r = vec![false; rc.len()];
    let mut out = Vec::new();
    for l in &lc {
        let mut merged = false;
        for (j, r) in rc.iter().enumerate() {
            if !used_r[j] && eq_outside(l, r) {
                out.push(cube_or(l, r));
                used_r[j] = true;
                merged = true;
                break;
            }
        }
        if !merged {
            out.push(l.clone());
        }
    }
    for (j, r) in rc.iter().enumerate() {
        if !used_r[j] {
            out.push(r.clone());
        }
    }
    out
}

/// Split every cube of `f` into one cube per part of `var`.
///
/// Used by the driver to unwrap multi-output cubes before the first
/// expansion.
pub fn unravel(ctx: &CubeContext, f: &Family, var: usize) -> Family {
    let mask = ctx.var_mask(var);
    let mut out = Family::new(ctx);
    for p in f.iter() {
        let parts: Vec<usize> = (ctx.first_part(var)..=ctx.last_part(var))
            .filter(|&b| super::cube::set_test(p, b))
            .collect();
        if parts.len() <= 1 {
            out.push(p);
            continue;
        }
        for b in parts {
            let mut c = p.to_vec();
            for w in ctx.first_word(var)..=ctx.last_word(var) {
                c[w] &= !mask[w];
            }
            set_insert(&mut c, b);
            out.push(&c);
        }
    }
    out
}

/// Containment-reduced union of two covers.
pub fn cover_union(ctx: &CubeContext, a: &Family, b: &Family) -> Family {
    let mut u = Family::with_capacity(ctx, a.count() + b.count());
    u.append(a);
    u.append(b);
    contain(&u)
}
