//! The Espresso fixed-point loop
//!
//! EXPAND makes cubes prime, IRREDUNDANT throws away what the rest can
//! cover, REDUCE shrinks what is left so the next EXPAND can leave in a
//! different direction. The loop runs until the cost stops falling, a gasp
//! perturbs the result, and MAKE_SPARSE trims the output plane. If the
//! final cover somehow ends up larger than the input, the input wins and
//! the loop restarts once with multi-output unwrapping disabled.

use tracing::debug;

use super::compl::unravel;
use super::context::CubeContext;
use super::cost::{cover_cost, Cost};
use super::essential::essential;
use super::expand::expand;
use super::family::{contain, Attr, Family};
use super::gasp::{last_gasp, super_gasp};
use super::irredundant::irredundant;
use super::reduce::reduce;
use super::sparse::make_sparse;
use super::unate::simplify;
use super::verify::verify;
use super::EspressoConfig;
use crate::error::VerifyError;

/// Minimize the ON-set cover `f` against the don't-care set `d` and the
/// OFF-set `r`.
///
/// The three covers must be mutually consistent: disjoint, with their
/// union the universe. The result covers the same function (modulo `d`),
/// touches no minterm of `r`, and is verified before it is returned.
pub fn espresso(
    ctx: &CubeContext,
    f: Family,
    d: &Family,
    r: &Family,
    config: &EspressoConfig,
) -> Result<Family, VerifyError> {
    let fsave = f.clone();
    let mut f = f;
    let mut unwrap_allowed = config.unwrap_onset;
    let mut restarted = false;

    loop {
        f = espresso_loop(ctx, f, d, r, config, unwrap_allowed);

        // a larger cover than the input is a step backwards; retry once
        // from the original with unwrapping off
        if fsave.count() < f.count() && !restarted {
            debug!(
                input = fsave.count(),
                output = f.count(),
                "result grew, restarting"
            );
            f = fsave.clone();
            unwrap_allowed = false;
            restarted = true;
            continue;
        }
        break;
    }

    verify(ctx, &f, &fsave, d, Some(r))?;
    Ok(f)
}

fn espresso_loop(
    ctx: &CubeContext,
    mut f: Family,
    d: &Family,
    r: &Family,
    config: &EspressoConfig,
    unwrap_allowed: bool,
) -> Family {
    let mut d1 = d.clone();

    if config.recompute_onset {
        f = simplify(ctx, &f);
        debug!(cost = %cover_cost(ctx, &f), "simplify");
    }

    let out_parts = ctx.part_size(ctx.output_var());
    if unwrap_allowed && out_parts > 1 && f.count() * out_parts <= f.count() + 1000 {
        f = contain(&unravel(ctx, &f, ctx.output_var()));
        debug!(cost = %cover_cost(ctx, &f), "unravel");
    }

    f.reset_all(Attr::PRIME);
    f = expand(ctx, f, r, false);
    debug!(cost = %cover_cost(ctx, &f), "expand");
    f = irredundant(ctx, f, &d1);
    debug!(cost = %cover_cost(ctx, &f), "irredundant");

    if !config.single_expand {
        let e = if config.remove_essential {
            essential(ctx, &mut f, &mut d1)
        } else {
            Family::new(ctx)
        };

        let mut reduce_toggle = false;
        loop {
            // iterate reduce/expand/irredundant until the cube count is
            // stable
            loop {
                let best: Cost = cover_cost(ctx, &f);
                f = reduce(ctx, f, &d1, reduce_toggle);
                reduce_toggle = !reduce_toggle;
                debug!(cost = %cover_cost(ctx, &f), "reduce");
                f = expand(ctx, f, r, false);
                debug!(cost = %cover_cost(ctx, &f), "expand");
                f = irredundant(ctx, f, &d1);
                debug!(cost = %cover_cost(ctx, &f), "irredundant");
                if cover_cost(ctx, &f).cubes >= best.cubes {
                    break;
                }
            }

            let best = cover_cost(ctx, &f);
            f = if config.use_super_gasp {
                super_gasp(ctx, &f, &d1)
            } else {
                last_gasp(ctx, &f, &d1, r)
            };
            let cost = cover_cost(ctx, &f);
            debug!(%cost, "gasp");
            if config.use_super_gasp && cost.cubes >= best.cubes {
                break;
            }
            if !cost.improves(&best) {
                break;
            }
        }

        f.append(&e);
        debug!(cost = %cover_cost(ctx, &f), "adjust");
    }

    if !config.skip_make_sparse {
        f = make_sparse(ctx, f, d, r, config);
        debug!(cost = %cover_cost(ctx, &f), "make_sparse");
    }
    f
}
