//! Cube lists and cofactoring
//!
//! A [`CubeList`] is the working representation inside the unate-recursive
//! engine: a synthetic *cofactor* cube recording which parts have been
//! cofactored away on the recursion path, plus borrowed references to cubes
//! that live in their owning families. No cube data is copied when a list
//! is built or cofactored; only the cofactor cube is owned by the list.
//!
//! The invariant carried by every list: a member cube `p` stands for the
//! product `p ∪ cof`, so a row is "full" when `p | cof` is the universe.

use super::context::{CubeContext, Word};
use super::cube::{cdist0, or_in, var_intersects};
use super::family::Family;

/// A cofactor cube plus borrowed member cubes.
#[derive(Debug, Clone)]
pub struct CubeList<'a> {
    pub cof: Vec<Word>,
    pub cubes: Vec<&'a [Word]>,
}

impl<'a> CubeList<'a> {
    /// Wrap one family without copying.
    pub fn from_family(ctx: &CubeContext, f: &'a Family) -> Self {
        CubeList {
            cof: ctx.new_cube(),
            cubes: f.iter().collect(),
        }
    }

    /// Wrap two families without copying.
    pub fn from_families(ctx: &CubeContext, a: &'a Family, b: &'a Family) -> Self {
        CubeList {
            cof: ctx.new_cube(),
            cubes: a.iter().chain(b.iter()).collect(),
        }
    }

    /// Wrap three families without copying.
    pub fn from_families3(ctx: &CubeContext, a: &'a Family, b: &'a Family, c: &'a Family) -> Self {
        CubeList {
            cof: ctx.new_cube(),
            cubes: a.iter().chain(b.iter()).chain(c.iter()).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.cubes.len()
    }

    /// Cofactor against an arbitrary cube `c`.
    ///
    /// Keeps every member intersecting `c` in all variables, except `c`
    /// itself when it is a member of the list; the parts `c` excludes are
    /// added to the cofactor cube.
    pub fn cofactor(&self, ctx: &CubeContext, c: &[Word]) -> CubeList<'a> {
        let mut cof = self.cof.clone();
        for (w, x) in cof.iter_mut().enumerate() {
            *x |= ctx.fullset()[w] & !c[w];
        }
        let cubes = self
            .cubes
            .iter()
            .filter(|p| !std::ptr::eq(p.as_ptr(), c.as_ptr()) && cdist0(ctx, p, c))
            .copied()
            .collect();
        CubeList { cof, cubes }
    }

    /// Cofactor against a cube that restricts only `var`.
    ///
    /// Specialization of [`CubeList::cofactor`] that tests only the words
    /// the variable occupies.
    pub fn scofactor(&self, ctx: &CubeContext, c: &[Word], var: usize) -> CubeList<'a> {
        let mut cof = self.cof.clone();
        let mask = ctx.var_mask(var);
        for w in ctx.first_word(var)..=ctx.last_word(var) {
            cof[w] |= mask[w] & !c[w];
        }
        let cubes = self
            .cubes
            .iter()
            .filter(|p| var_intersects(ctx, p, c, var))
            .copied()
            .collect();
        CubeList { cof, cubes }
    }

    /// Materialize the list back into a family, OR-ing the accumulated
    /// cofactor into every cube.
    pub fn unlist(&self, ctx: &CubeContext) -> Family {
        let mut f = Family::with_capacity(ctx, self.cubes.len());
        let mut tmp = ctx.new_cube();
        for p in &self.cubes {
            tmp.copy_from_slice(p);
            or_in(&mut tmp, &self.cof);
            f.push(&tmp);
        }
        f
    }

    /// Split the list into two component lists whose members share no
    /// deficient variable, if such a split exists.
    ///
    /// Starting from the first member, cubes are pulled into the seed block
    /// whenever they are deficient (given the cofactor) in a variable where
    /// some block member is also deficient, until a fixed point. `None`
    /// when every cube lands in one block.
    pub fn partition(&self, ctx: &CubeContext) -> Option<(CubeList<'a>, CubeList<'a>)> {
        let n = self.cubes.len();
        if n < 2 {
            return None;
        }

        // deficient-variable support of each cube, cofactor folded in
        let support: Vec<Vec<bool>> = self
            .cubes
            .iter()
            .map(|p| {
                (0..ctx.num_vars())
                    .map(|v| {
                        let mask = ctx.var_mask(v);
                        (ctx.first_word(v)..=ctx.last_word(v))
                            .any(|w| (p[w] | self.cof[w]) & mask[w] != mask[w])
                    })
                    .collect()
            })
            .collect();

        let mut in_block = vec![false; n];
        let mut block_vars = support[0].clone();
        in_block[0] = true;
        let mut changed = true;
        while changed {
            changed = false;
            for i in 1..n {
                if in_block[i]
                    || !support[i].iter().zip(&block_vars).any(|(&a, &b)| a && b)
                {
                    continue;
                }
                for (bv, &sv) in block_vars.iter_mut().zip(&support[i]) {
                    *bv |= sv;
                }
                in_block[i] = true;
                changed = true;
            }
        }

        if in_block.iter().all(|&b| b) {
            return None;
        }

        let mut a = CubeList {
            cof: self.cof.clone(),
            cubes: Vec::new(),
        };
        let mut b = CubeList {
            cof: self.cof.clone(),
            cubes: Vec::new(),
        };
        for (i, p) in self.cubes.iter().enumerate() {
            if in_block[i] {
                a.cubes.push(p);
            } else {
                b.cubes.push(p);
            }
        }
        Some((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espresso::cube::{set_insert, setp_implies};

    fn ctx() -> CubeContext {
        CubeContext::new_binary(3, 1).unwrap()
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

    #[test]
    fn cofactor_filters_and_accumulates() {
        let ctx = ctx();
        let mut f = Family::new(&ctx);
        f.push(&cube(&ctx, "0--"));
        f.push(&cube(&ctx, "1-1"));
        f.push(&cube(&ctx, "-1-"));
        let list = CubeList::from_family(&ctx, &f);

        // cofactor against the first member cube: it is excluded by
        // identity, "1-1" does not intersect it
        let c = f.cube(0);
        let cof = list.cofactor(&ctx, c);
        assert_eq!(cof.count(), 1);
        assert!(setp_implies(&cube_diff_full(&ctx, c), &cof.cof));
    }

    fn cube_diff_full(ctx: &CubeContext, c: &[Word]) -> Vec<Word> {
        crate::espresso::cube::cube_diff(ctx.fullset(), c)
    }

    #[test]
    fn scofactor_matches_cofactor_for_single_variable() {
        let ctx = ctx();
        let mut f = Family::new(&ctx);
        f.push(&cube(&ctx, "01-"));
        f.push(&cube(&ctx, "10-"));
        f.push(&cube(&ctx, "-11"));
        let list = CubeList::from_family(&ctx, &f);

        // restrict variable 0 to its "1" part
        let mut c = ctx.full_cube();
        crate::espresso::cube::set_remove(&mut c, ctx.first_part(0));
        let a = list.cofactor(&ctx, &c);
        let b = list.scofactor(&ctx, &c, 0);
        assert_eq!(a.count(), b.count());
        assert_eq!(a.cof, b.cof);
    }

    #[test]
    fn unlist_ors_cofactor_back() {
        let ctx = ctx();
        let mut f = Family::new(&ctx);
        f.push(&cube(&ctx, "011"));
        let list = CubeList::from_family(&ctx, &f);
        let mut c = ctx.full_cube();
        crate::espresso::cube::set_remove(&mut c, ctx.first_part(1));
        let cof = list.scofactor(&ctx, &c, 1);
        let back = cof.unlist(&ctx);
        assert_eq!(back.count(), 1);
        // variable 1's "0" part came back through the cofactor
        assert!(setp_implies(&cube(&ctx, "011"), back.cube(0)));
    }

    #[test]
    fn wrapping_families_copies_nothing() {
        let ctx = ctx();
        let mut f = Family::new(&ctx);
        f.push(&cube(&ctx, "01-"));
        let mut d = Family::new(&ctx);
        d.push(&cube(&ctx, "-1-"));
        let mut r = Family::new(&ctx);
        r.push(&cube(&ctx, "10-"));
        r.push(&cube(&ctx, "--0"));

        assert_eq!(CubeList::from_family(&ctx, &f).count(), 1);
        assert_eq!(CubeList::from_families(&ctx, &f, &d).count(), 2);
        let three = CubeList::from_families3(&ctx, &f, &d, &r);
        assert_eq!(three.count(), 4);
        // members are the family rows themselves
        assert!(std::ptr::eq(three.cubes[0].as_ptr(), f.cube(0).as_ptr()));
    }

    #[test]
    fn partition_finds_disjoint_components() {
        let ctx = ctx();
        let mut f = Family::new(&ctx);
        // component on variable 0 and component on variable 2
        f.push(&cube(&ctx, "0--"));
        f.push(&cube(&ctx, "1--"));
        f.push(&cube(&ctx, "--0"));
        f.push(&cube(&ctx, "--1"));
        let list = CubeList::from_family(&ctx, &f);
        let (a, b) = list.partition(&ctx).expect("components exist");
        assert_eq!(a.count(), 2);
        assert_eq!(b.count(), 2);

        // entangled cover has no partition
        let mut g = Family::new(&ctx);
        g.push(&cube(&ctx, "00-"));
        g.push(&cube(&ctx, "-01"));
        let list = CubeList::from_family(&ctx, &g);
        assert!(list.partition(&ctx).is_none());
    }
}
