//! LAST_GASP and SUPER_GASP perturbations
//!
//! When the reduce/expand/irredundant loop settles, the gasps shake the
//! cover out of its local minimum. Both start by reducing every cube
//! *without replacement*: each reduction is computed against the original
//! cover, so the shrunken cubes overlap freely. LAST_GASP re-expands the
//! shrunken cubes and keeps only expansions that swallow some other
//! shrunken cube; SUPER_GASP instead enumerates all primes of the combined
//! cover by recursive consensus and lets IRREDUNDANT choose among them.

use tracing::debug;

use super::compl::cover_union;
use super::context::{CubeContext, Word};
use super::count::{binate_split_select, massive_count};
use super::cube::{cdist01, cube_and};
use super::cubelist::CubeList;
use super::family::{Attr, Family};
use super::irredundant::irredundant;
use super::reduce::reduce_without_replacement;
use super::unate::{cofactor_family, contain_cubes, cube_is_void};

/// One LAST_GASP round: returns the irredundant cover of `f` plus any
/// useful re-expansions of the no-replacement reductions.
pub fn last_gasp(ctx: &CubeContext, f: &Family, d: &Family, r: &Family) -> Family {
    let g = reduce_without_replacement(ctx, f, d);
    let g1 = expand_gasp(ctx, &g, r);
    debug!(reduced = g.count(), useful = g1.count(), "last gasp");
    let union = cover_union(ctx, f, &g1);
    irredundant(ctx, union, d)
}

/// One SUPER_GASP round: all primes of the combined cover, then an
/// irredundant subset. More thorough and more expensive than LAST_GASP.
pub fn super_gasp(ctx: &CubeContext, f: &Family, d: &Family) -> Family {
    let g = reduce_without_replacement(ctx, f, d);
    let union = cover_union(ctx, f, &g);
    let primes = primes_consensus(ctx, &union);
    debug!(candidates = union.count(), primes = primes.count(), "super gasp");
    irredundant(ctx, primes, d)
}

/// Expand each cube of `g` against the OFF-set, keeping only expansions
/// that end up covering some *other* cube of `g`.
fn expand_gasp(ctx: &CubeContext, g: &Family, r: &Family) -> Family {
    let mut out = Family::new(ctx);
    let r_ones = r.column_ones(ctx);
    let mut r_active = vec![true; r.count()];
    let mut g = g.clone();
    g.set_all(Attr::ACTIVE);
    for i in 0..g.count() {
        let raise = super::expand::expand1(ctx, &g, r, &mut r_active, i, false, &r_ones);
        let covers_other = (0..g.count())
            .any(|j| j != i && super::cube::setp_implies(g.cube(j), &raise));
        if covers_other {
            out.push(&raise);
        }
    }
    out
}

/// All prime implicants of the cover, by recursive consensus.
///
/// Unate covers are their own primes after containment; otherwise the
/// primes of the two Shannon cofactors come back under their half cubes
/// and every distance-one pair contributes its consensus before a final
/// containment pass.
pub fn primes_consensus(ctx: &CubeContext, f: &Family) -> Family {
    if f.count() <= 1 {
        return f.clone();
    }
    let list = CubeList::from_family(ctx, f);
    let data = massive_count(ctx, &list);
    if data.vars_active == 0 || data.all_unate() {
        return super::family::contain(f);
    }
    let (var, cl, cr) = binate_split_select(ctx, &data).expect("binate variable exists");

    let pl = primes_consensus(ctx, &cofactor_family(ctx, f, &cl));
    let pr = primes_consensus(ctx, &cofactor_family(ctx, f, &cr));

    let lc: Vec<Vec<Word>> = pl
        .iter()
        .map(|p| cube_and(p, &cl))
        .filter(|c| !cube_is_void(ctx, c))
        .collect();
    let rc: Vec<Vec<Word>> = pr
        .iter()
        .map(|p| cube_and(p, &cr))
        .filter(|c| !cube_is_void(ctx, c))
        .collect();

    let mut candidates: Vec<Vec<Word>> = Vec::with_capacity(lc.len() + rc.len());
    for l in &lc {
        for rr in &rc {
            if cdist01(ctx, l, rr) == 1 {
                if let Some(c) = super::cube::consensus(ctx, l, rr) {
                    if !cube_is_void(ctx, &c) {
                        candidates.push(c);
                    }
                }
            }
        }
    }
    candidates.extend(lc);
    candidates.extend(rc);

    let mut out = Family::new(ctx);
    for c in contain_cubes(ctx, candidates) {
        out.push(&c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espresso::compl::complement_cover;
    use crate::espresso::cube::{set_insert, set_test, setp_implies};

    fn ctx(n: usize) -> CubeContext {
        CubeContext::new_binary(n, 1).unwrap()
    }

    fn cube(ctx: &CubeContext, s: &str) -> Vec<Word> {
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
        set_insert(&mut c, ctx.first_part(ctx.output_var()));
        c
    }

    fn family(ctx: &CubeContext, cubes: &[&str]) -> Family {
        let mut f = Family::new(ctx);
        for s in cubes {
            f.push(&cube(ctx, s));
        }
        f
    }

    fn covers_minterm(ctx: &CubeContext, f: &Family, m: u32, n: usize) -> bool {
        (0..f.count()).any(|i| {
            let c = f.cube(i);
            (0..n).all(|v| {
                let part = if m & (1 << v) != 0 {
                    ctx.first_part(v) + 1
                } else {
                    ctx.first_part(v)
                };
                set_test(c, part)
            })
        })
    }

    #[test]
    fn primes_of_xor_are_the_minterms() {
        let ctx = ctx(2);
        let f = family(&ctx, &["01", "10"]);
        let p = primes_consensus(&ctx, &f);
        assert_eq!(p.count(), 2);
    }

    #[test]
    fn primes_include_consensus_cube() {
        let ctx = ctx(2);
        // ab' + a'b'... use f = 0- + 1- consensus gives the universe? use
        // the classic: a'b + ab = b
        let f = family(&ctx, &["01", "11"]);
        let p = primes_consensus(&ctx, &f);
        assert_eq!(p.count(), 1);
        assert_eq!(p.cube(0), &cube(&ctx, "-1")[..]);
    }

    #[test]
    fn primes_of_majority() {
        let ctx = ctx(3);
        let f = family(&ctx, &["011", "101", "110", "111"]);
        let p = primes_consensus(&ctx, &f);
        assert_eq!(p.count(), 3);
        for want in ["-11", "1-1", "11-"] {
            assert!(
                p.iter().any(|c| c == &cube(&ctx, want)[..]),
                "missing prime {want}"
            );
        }
    }

    #[test]
    fn last_gasp_preserves_function() {
        let ctx = ctx(3);
        let f = family(&ctx, &["011", "110", "0-0"]);
        let d = Family::new(&ctx);
        let r = complement_cover(&ctx, &f, None);
        let out = last_gasp(&ctx, &f, &d, &r);
        for m in 0..8 {
            assert_eq!(
                covers_minterm(&ctx, &f, m, 3),
                covers_minterm(&ctx, &out, m, 3),
                "minterm {m}"
            );
        }
    }

    #[test]
    fn super_gasp_preserves_function() {
        let ctx = ctx(3);
        let f = family(&ctx, &["00-", "0-1", "-11", "11-"]);
        let d = Family::new(&ctx);
        let out = super_gasp(&ctx, &f, &d);
        for m in 0..8 {
            assert_eq!(
                covers_minterm(&ctx, &f, m, 3),
                covers_minterm(&ctx, &out, m, 3),
                "minterm {m}"
            );
        }
        // nothing in the result is contained in another cube
        for i in 0..out.count() {
            for j in 0..out.count() {
                if i != j {
                    assert!(!setp_implies(out.cube(i), out.cube(j)));
                }
            }
        }
    }
}
