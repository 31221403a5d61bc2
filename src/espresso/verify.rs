//! Result verification
//!
//! After MAKE_SPARSE the driver proves that the minimized cover still
//! computes the same function: `F' ∪ D` must cover every cube of the
//! original `F`, every cube of `F'` must sit inside `F ∪ D`, and `F'` must
//! not touch the OFF-set. Any discrepancy means the minimizer violated an
//! invariant, which the library surfaces instead of returning a wrong
//! cover.

use crate::error::VerifyError;

use super::context::CubeContext;
use super::cube::cdist0;
use super::cubelist::CubeList;
use super::family::Family;
use super::unate::cube_is_covered;

/// Check `F' ∪ D ≡ F ∪ D` and `F' ∩ R = ∅`.
pub fn verify(
    ctx: &CubeContext,
    f_new: &Family,
    f_old: &Family,
    d: &Family,
    r: Option<&Family>,
) -> Result<(), VerifyError> {
    {
        let new_d = CubeList::from_families(ctx, f_new, d);
        for (i, p) in f_old.iter().enumerate() {
            if !cube_is_covered(ctx, &new_d, p) {
                return Err(VerifyError::CoverageLost { cube: i });
            }
        }
    }
    {
        let old_d = CubeList::from_families(ctx, f_old, d);
        for (i, p) in f_new.iter().enumerate() {
            if !cube_is_covered(ctx, &old_d, p) {
                return Err(VerifyError::CoverageGained { cube: i });
            }
        }
    }
    if let Some(r) = r {
        for (i, p) in f_new.iter().enumerate() {
            for (j, rr) in r.iter().enumerate() {
                if cdist0(ctx, p, rr) {
                    return Err(VerifyError::OffSetHit { cube: i, off_cube: j });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espresso::cube::set_insert;

    fn ctx() -> CubeContext {
        CubeContext::new_binary(2, 1).unwrap()
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
    fn accepts_equivalent_covers() {
        let ctx = ctx();
        let a = family(&ctx, &["00", "01"]);
        let b = family(&ctx, &["0-"]);
        let d = Family::new(&ctx);
        assert!(verify(&ctx, &b, &a, &d, None).is_ok());
    }

    #[test]
    fn rejects_lost_coverage() {
        let ctx = ctx();
        let a = family(&ctx, &["0-"]);
        let b = family(&ctx, &["00"]);
        let d = Family::new(&ctx);
        assert!(matches!(
            verify(&ctx, &b, &a, &d, None),
            Err(VerifyError::CoverageLost { .. })
        ));
    }

    #[test]
    fn rejects_gained_coverage() {
        let ctx = ctx();
        let a = family(&ctx, &["00"]);
        let b = family(&ctx, &["0-"]);
        let d = Family::new(&ctx);
        assert!(matches!(
            verify(&ctx, &b, &a, &d, None),
            Err(VerifyError::CoverageGained { .. })
        ));
    }

    #[test]
    fn dont_cares_excuse_differences() {
        let ctx = ctx();
        let a = family(&ctx, &["00"]);
        let b = family(&ctx, &["0-"]);
        let d = family(&ctx, &["01"]);
        assert!(verify(&ctx, &b, &a, &d, None).is_ok());
    }

    #[test]
    fn rejects_off_set_contact() {
        let ctx = ctx();
        let a = family(&ctx, &["0-"]);
        let r = family(&ctx, &["0-"]);
        let d = Family::new(&ctx);
        assert!(matches!(
            verify(&ctx, &a, &a, &d, Some(&r)),
            Err(VerifyError::OffSetHit { .. })
        ));
    }
}
