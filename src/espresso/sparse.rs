//! MAKE_SPARSE post-pass
//!
//! Output-like variables want as few parts as possible: every part a cube
//! carries is a transistor in the OR-plane. For each sparse variable,
//! `mv_reduce` treats each part as its own single-output cover and runs the
//! irredundant split on it; cubes whose slice comes back inactive lose the
//! part. A literal-biased expansion then re-primes the cover, and the pair
//! repeats while the total literal count keeps dropping.

use tracing::debug;

use super::context::{CubeContext, Word};
use super::cost::cover_cost;
use super::cube::{set_insert, set_test, var_is_full};
use super::expand::expand;
use super::family::{Attr, Family};
use super::irredundant::irred_split;
use super::unate::cube_is_void;
use super::EspressoConfig;

/// The MAKE_SPARSE loop: `mv_reduce` then a nonsparse `expand`, repeated
/// while the literal count improves (`force_irredundant` keeps it going
/// past the first round).
pub fn make_sparse(
    ctx: &CubeContext,
    mut f: Family,
    d: &Family,
    r: &Family,
    config: &EspressoConfig,
) -> Family {
    let mut best = cover_cost(ctx, &f);
    loop {
        f = mv_reduce(ctx, f, d);
        f = expand(ctx, f, r, true);
        let cost = cover_cost(ctx, &f);
        debug!(%cost, "make_sparse pass");
        if cost.total >= best.total {
            break;
        }
        best = cost;
        if !config.force_irredundant {
            break;
        }
    }
    f
}

/// Strip redundant parts of sparse variables.
///
/// For each part of each sparse variable, the cubes carrying that part are
/// sliced down to it and tested as a cover of their own; slices the
/// covering can do without surrender the part. A cube that is full in the
/// variable is never reduced, but its slice still counts as coverage. A
/// cube left with no part of the variable disappears.
pub fn mv_reduce(ctx: &CubeContext, mut f: Family, d: &Family) -> Family {
    for var in 0..ctx.num_vars() {
        // only multiple-valued variables take part; a binary variable has
        // nothing to thin out
        if ctx.is_binary(var) || !ctx.is_sparse(var) {
            continue;
        }
        for part in ctx.first_part(var)..=ctx.last_part(var) {
            let mut slices = Family::new(ctx);
            let mut slice_owner: Vec<usize> = Vec::new();
            let mut protected = Family::new(ctx);
            for i in 0..f.count() {
                if !set_test(f.cube(i), part) {
                    continue;
                }
                let s = restrict_to_part(ctx, f.cube(i), var, part);
                if var_is_full(ctx, f.cube(i), var) {
                    protected.push(&s);
                } else {
                    slices.push(&s);
                    slice_owner.push(i);
                }
            }
            for p in d.iter() {
                if set_test(p, part) {
                    protected.push(&restrict_to_part(ctx, p, var, part));
                }
            }
            if slices.count() == 0 {
                continue;
            }
            irred_split(ctx, &mut slices, &protected);
            for (k, &i) in slice_owner.iter().enumerate() {
                if !slices.attr(k).test(Attr::ACTIVE) {
                    super::cube::set_remove(f.cube_mut(i), part);
                }
            }
        }
    }

    // cubes that lost a whole variable cover nothing any more
    let mut i = 0;
    while i < f.count() {
        if cube_is_void(ctx, f.cube(i)) {
            f.swap_remove(i);
        } else {
            i += 1;
        }
    }
    f
}

fn restrict_to_part(ctx: &CubeContext, cube: &[Word], var: usize, part: usize) -> Vec<Word> {
    let mut c = cube.to_vec();
    let mask = ctx.var_mask(var);
    for w in ctx.first_word(var)..=ctx.last_word(var) {
        c[w] &= !mask[w];
    }
    set_insert(&mut c, part);
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espresso::compl::complement_cover;

    fn two_output_ctx() -> CubeContext {
        CubeContext::new_binary(2, 2).unwrap()
    }

    /// inputs as a PLA string, outputs as a bit per output
    fn cube(ctx: &CubeContext, s: &str, outs: &[bool]) -> Vec<Word> {
        let mut c = ctx.new_cube();
        for (v, ch) in s.chars().enumerate() {
            match ch {
                '0' => set_insert(&mut c, ctx.first_part(v)),
                '1' => set_insert(&mut c, ctx.first_part(v) + 1),
                '-' => {
                    set_insert(&mut c, ctx.first_part(v));
                    set_insert(&mut c, ctx.first_part(v) + 1);
                }
                _ => unreachable!(),
            }
        }
        let out = ctx.output_var();
        for (k, &on) in outs.iter().enumerate() {
            if on {
                set_insert(&mut c, ctx.first_part(out) + k);
            }
        }
        c
    }

    #[test]
    fn drops_redundant_output_part() {
        let ctx = two_output_ctx();
        let mut f = Family::new(&ctx);
        // output 0 on exactly "01"; a second cube claims output 0 there
        // too and output 1 besides
        f.push(&cube(&ctx, "01", &[true, false]));
        f.push(&cube(&ctx, "01", &[true, true]));
        let d = Family::new(&ctx);
        let out = mv_reduce(&ctx, f, &d);
        // one of the two output-0 claims is redundant; the cube that also
        // drives output 1 must survive
        let total_out_parts: usize = (0..out.count())
            .map(|i| {
                (ctx.first_part(2)..=ctx.last_part(2))
                    .filter(|&b| set_test(out.cube(i), b))
                    .count()
            })
            .sum();
        assert_eq!(total_out_parts, 2);
    }

    #[test]
    fn keeps_needed_parts() {
        let ctx = two_output_ctx();
        let mut f = Family::new(&ctx);
        f.push(&cube(&ctx, "01", &[true, false]));
        f.push(&cube(&ctx, "10", &[false, true]));
        let d = Family::new(&ctx);
        let out = mv_reduce(&ctx, f.clone(), &d);
        assert_eq!(out, f);
    }

    #[test]
    fn make_sparse_does_not_grow_literals() {
        let ctx = two_output_ctx();
        let mut f = Family::new(&ctx);
        f.push(&cube(&ctx, "01", &[true, true]));
        f.push(&cube(&ctx, "11", &[true, false]));
        f.push(&cube(&ctx, "-1", &[true, false]));
        let d = Family::new(&ctx);
        let r = complement_cover(&ctx, &f, None);
        let before = cover_cost(&ctx, &f).total;
        let out = make_sparse(&ctx, f, &d, &r, &EspressoConfig::default());
        assert!(cover_cost(&ctx, &out).total <= before);
    }
}
