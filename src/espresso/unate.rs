//! Unate-recursive engine: tautology, SCCC, simplify
//!
//! All three share the same skeleton: dispose of the special cases, pick the
//! best binate variable, Shannon-expand into two cofactors, merge. The
//! special cases carry the weight; full rows, zero columns, unate
//! reductions and component partitions dispose of most recursions before a
//! split is ever made.

use tracing::trace;

use super::context::{CubeContext, Word};
use super::count::{binate_split_select, massive_count};
use super::cube::{
    and_in, compl_cube, cube_diff, full_row, or_in, set_ord, setp_implies,
};
use super::cubelist::CubeList;
use super::family::Family;

/// Does the list (with its cofactor) cover the whole space?
pub fn tautology(ctx: &CubeContext, t: CubeList<'_>) -> bool {
    let mut t = t;
    let data = loop {
        if t.cubes.iter().any(|p| full_row(ctx, p, &t.cof)) {
            return true;
        }
        if t.count() == 0 {
            return false;
        }
        let data = massive_count(ctx, &t);
        if data.zero_column(t.count()).is_some() {
            return false;
        }
        if data.vars_active == 1 {
            // one active variable and no zero column: every part of it is
            // covered by some cube that is full everywhere else
            return true;
        }
        if data.all_unate() {
            // a unate cover with several active variables needed a full row
            return false;
        }
        if data.vars_unate > 0 {
            // unate reduction: only cubes full in every unate variable can
            // take part in a tautology
            let cof = t.cof.clone();
            t.cubes.retain(|p| {
                (0..ctx.num_vars()).all(|v| {
                    !data.is_unate[v] || {
                        let mask = ctx.var_mask(v);
                        (ctx.first_word(v)..=ctx.last_word(v))
                            .all(|w| (p[w] | cof[w]) & mask[w] == mask[w])
                    }
                })
            });
            continue;
        }
        break data;
    };

    let (var, cl, cr) = binate_split_select(ctx, &data).expect("active variable exists");
    trace!(var, cubes = t.count(), "tautology split");

    // component reduction: disjoint-support blocks cover the space
    // independently, so one of them has to be a tautology by itself
    if data.var_zeros[var] < t.count() / 2 {
        if let Some((a, b)) = t.partition(ctx) {
            return tautology(ctx, a) || tautology(ctx, b);
        }
    }

    let left = t.scofactor(ctx, &cl, var);
    let right = t.scofactor(ctx, &cr, var);
    tautology(ctx, left) && tautology(ctx, right)
}

/// Smallest cube containing the complement of the list.
pub fn sccc(ctx: &CubeContext, t: CubeList<'_>) -> Vec<Word> {
    if t.count() == 0 {
        return ctx.full_cube();
    }
    if t.cubes.iter().any(|p| full_row(ctx, p, &t.cof)) {
        return ctx.new_cube();
    }
    if t.count() == 1 {
        let mut c = t.cubes[0].to_vec();
        or_in(&mut c, &t.cof);
        return compl_cube(ctx, &c);
    }

    let data = massive_count(ctx, &t);

    // zero columns factor out: the slabs they witness contribute their
    // projection, the rest recurses with the cofactor augmented
    if data.zero_column(t.count()).is_some() {
        let mut z = ctx.new_cube();
        for (part, &n) in data.part_zeros.iter().enumerate() {
            if n == t.count() {
                super::cube::set_insert(&mut z, part);
            }
        }
        let factor = compl_cube(ctx, &cube_diff(ctx.fullset(), &z));
        let mut t2 = t;
        or_in(&mut t2.cof, &z);
        let mut r = sccc(ctx, t2);
        or_in(&mut r, &factor);
        return r;
    }

    if data.all_unate() {
        // for a unate cover the intersection of the single-cube answers is
        // exact
        let mut r = ctx.full_cube();
        let mut tmp = ctx.new_cube();
        for p in &t.cubes {
            tmp.copy_from_slice(p);
            or_in(&mut tmp, &t.cof);
            and_in(&mut r, &compl_cube(ctx, &tmp));
        }
        return r;
    }

    let (var, cl, cr) = binate_split_select(ctx, &data).expect("active variable exists");
    let mut left = sccc(ctx, t.scofactor(ctx, &cl, var));
    and_in(&mut left, &cl);
    let mut right = sccc(ctx, t.scofactor(ctx, &cr, var));
    and_in(&mut right, &cr);
    or_in(&mut left, &right);
    left
}

/// Is the cube `c` covered by the list?
pub fn cube_is_covered(ctx: &CubeContext, t: &CubeList<'_>, c: &[Word]) -> bool {
    tautology(ctx, t.cofactor(ctx, c))
}

/// True when some variable of the cube has no part at all.
pub fn cube_is_void(ctx: &CubeContext, c: &[Word]) -> bool {
    (0..ctx.num_vars()).any(|v| {
        let mask = ctx.var_mask(v);
        (ctx.first_word(v)..=ctx.last_word(v)).all(|w| c[w] & mask[w] == 0)
    })
}

/// Equivalent cover with containment and cross-branch merging applied.
///
/// Used by the driver to rebuild a noisy ON-set before the first expansion;
/// the result covers exactly the same minterms with no cube contained in
/// another.
pub fn simplify(ctx: &CubeContext, f: &Family) -> Family {
    if f.count() <= 1 {
        return f.clone();
    }
    let list = CubeList::from_family(ctx, f);
    let data = massive_count(ctx, &list);
    if data.vars_active == 0 || data.all_unate() {
        return super::family::contain(f);
    }
    let (var, cl, cr) = binate_split_select(ctx, &data).expect("binate variable exists");

    let left = simplify(ctx, &cofactor_family(ctx, f, &cl));
    let right = simplify(ctx, &cofactor_family(ctx, f, &cr));

    let lc: Vec<Vec<Word>> = left
        .iter()
        .map(|p| super::cube::cube_and(p, &cl))
        .filter(|c| !cube_is_void(ctx, c))
        .collect();
    let rc: Vec<Vec<Word>> = right
        .iter()
        .map(|p| super::cube::cube_and(p, &cr))
        .filter(|c| !cube_is_void(ctx, c))
        .collect();

    // merge pairs that agree outside the split variable back into one cube
    let mut used_r = vec![false; rc.len()];
    let mut out = Family::new(ctx);
    for l in &lc {
        let mut merged = false;
        for (j, r) in rc.iter().enumerate() {
            if !used_r[j] && eq_outside_var(ctx, l, r, var) {
                out.push(&super::cube::cube_or(l, r));
                used_r[j] = true;
                merged = true;
                break;
            }
        }
        if !merged {
            out.push(l);
        }
    }
    for (j, r) in rc.iter().enumerate() {
        if !used_r[j] {
            out.push(r);
        }
    }
    super::family::contain(&out)
}

/// Shannon cofactor of a whole family by the cube `c`, materialized.
pub fn cofactor_family(ctx: &CubeContext, f: &Family, c: &[Word]) -> Family {
    let raise = cube_diff(ctx.fullset(), c);
    let mut out = Family::with_capacity(ctx, f.count());
    let mut tmp = ctx.new_cube();
    for p in f.iter() {
        if super::cube::cdist0(ctx, p, c) {
            tmp.copy_from_slice(p);
            or_in(&mut tmp, &raise);
            out.push(&tmp);
        }
    }
    out
}

fn eq_outside_var(ctx: &CubeContext, a: &[Word], b: &[Word], var: usize) -> bool {
    let mask = ctx.var_mask(var);
    a.iter()
        .zip(b)
        .zip(mask)
        .all(|((&x, &y), &m)| x & !m == y & !m)
}

/// Largest-first single-cube containment over a scratch cube collection.
pub fn contain_cubes(ctx: &CubeContext, cubes: Vec<Vec<Word>>) -> Vec<Vec<Word>> {
    let mut order: Vec<usize> = (0..cubes.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(set_ord(&cubes[i])));
    let mut kept: Vec<Vec<Word>> = Vec::new();
    for &i in &order {
        if cube_is_void(ctx, &cubes[i]) {
            continue;
        }
        if !kept.iter().any(|k| setp_implies(&cubes[i], k)) {
            kept.push(cubes[i].clone());
        }
    }
    kept
}
