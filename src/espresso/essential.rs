//! Essential prime extraction
//!
//! A cube is essential when removing it uncovers some minterm that the
//! don't-care set does not excuse. The driver pulls essentials out of the
//! cover before the iteration loop (they can never be improved away),
//! parks them in the don't-care set so the loop still knows their minterms
//! are spoken for, and appends them back at the end.

use tracing::debug;

use super::context::CubeContext;
use super::cubelist::CubeList;
use super::family::{Attr, Family};
use super::unate::cube_is_covered;

/// Remove the essential cubes from `f`, add them to `d`, and return them.
pub fn essential(ctx: &CubeContext, f: &mut Family, d: &mut Family) -> Family {
    let verdicts: Vec<bool> = {
        let fd = CubeList::from_families(ctx, f, d);
        (0..f.count())
            .map(|i| !cube_is_covered(ctx, &fd, f.cube(i)))
            .collect()
    };
    let mut e = Family::new(ctx);
    let mut rest = Family::new(ctx);
    for (i, &ess) in verdicts.iter().enumerate() {
        if ess {
            let mut attr = f.attr(i);
            attr.set(Attr::RELESSEN);
            e.push_with(f.cube(i), attr);
        } else {
            let mut attr = f.attr(i);
            attr.set(Attr::NONESSEN);
            rest.push_with(f.cube(i), attr);
        }
    }
    debug!(essential = e.count(), rest = rest.count(), "essential split");
    *f = rest;
    d.append(&e);
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espresso::cube::set_insert;

    fn ctx(n: usize) -> CubeContext {
        CubeContext::new_binary(n, 1).unwrap()
    }

    fn cube(ctx: &CubeContext, s: &str) -> Vec<super::super::context::Word> {
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

    #[test]
    fn extracts_unreplaceable_cubes() {
        let ctx = ctx(2);
        let mut f = family(&ctx, &["0-", "-1"]);
        let mut d = Family::new(&ctx);
        let e = essential(&ctx, &mut f, &mut d);
        // both cubes own a private minterm
        assert_eq!(e.count(), 2);
        assert_eq!(f.count(), 0);
        assert_eq!(d.count(), 2);
        assert!(e.attr(0).test(Attr::RELESSEN));
    }

    #[test]
    fn replaceable_cube_stays_in_cover() {
        let ctx = ctx(2);
        // the middle of a chain is not essential
        let mut f = family(&ctx, &["0-", "-1", "1-"]);
        let mut d = Family::new(&ctx);
        let e = essential(&ctx, &mut f, &mut d);
        assert_eq!(e.count(), 2);
        assert_eq!(f.count(), 1);
        assert_eq!(f.cube(0), &cube(&ctx, "-1")[..]);
    }

    #[test]
    fn dont_cares_reduce_essentiality() {
        let ctx = ctx(2);
        let mut f = family(&ctx, &["01", "1-"]);
        let mut d = family(&ctx, &["00"]);
        let e = essential(&ctx, &mut f, &mut d);
        // "01" has minterm 01 uncovered by 1- and the DC 00: essential;
        // with inputs 10,11 owned only by "1-", it is essential too
        assert_eq!(e.count(), 2);
    }

    #[test]
    fn cube_covered_by_dont_care_is_not_essential() {
        let ctx = ctx(2);
        let mut f = family(&ctx, &["01"]);
        let mut d = family(&ctx, &["01", "00"]);
        let e = essential(&ctx, &mut f, &mut d);
        assert_eq!(e.count(), 0);
        assert_eq!(f.count(), 1);
    }
}
