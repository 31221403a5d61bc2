//! Cube-list statistics and the binate split selector
//!
//! [`massive_count`] makes one pass over a cube list (cofactor folded in)
//! and produces the per-column zero counts, per-variable zero counts,
//! active-part counts and unate flags that drive every reduction in the
//! unate-recursive engine, along with the best variable to split on.
//!
//! A part is *active* when at least one cube has a 0 there; a variable is
//! *active* when it has an active part and *unate* when exactly one of its
//! parts is active.

use super::context::CubeContext;
use super::cubelist::CubeList;

/// Statistics of one cube list.
#[derive(Debug, Clone)]
pub struct CountData {
    /// Per-column count of cubes with a 0 at that position.
    pub part_zeros: Vec<usize>,
    /// Per-variable sum of `part_zeros`.
    pub var_zeros: Vec<usize>,
    /// Per-variable number of active parts.
    pub parts_active: Vec<usize>,
    /// Per-variable unate flag (exactly one active part).
    pub is_unate: Vec<bool>,
    /// Number of active variables.
    pub vars_active: usize,
    /// Number of active variables that are unate.
    pub vars_unate: usize,
    /// Best variable to split on, if any variable is active.
    pub best: Option<usize>,
}

impl CountData {
    /// True when every active variable is unate.
    pub fn all_unate(&self) -> bool {
        self.vars_active == self.vars_unate
    }

    /// A column whose zero count equals the cube count is covered by no
    /// cube; any such column witnesses an uncovered slab.
    pub fn zero_column(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        self.part_zeros.iter().position(|&z| z == count)
    }
}

/// Scan `list` and fill the statistics block.
///
/// The best-variable policy, in priority order with ties broken in
/// sequence: maximize active parts, maximize total zeros in the variable,
/// minimize the largest per-part zero count (balance).
pub fn massive_count(ctx: &CubeContext, list: &CubeList<'_>) -> CountData {
    let mut part_zeros = vec![0usize; ctx.size()];
    for p in &list.cubes {
        for (w, (&pw, &cw)) in p.iter().zip(&list.cof).enumerate() {
            // zeros of (p | cof), restricted to real columns
            let mut v = !(pw | cw) & ctx.fullset()[w];
            while v != 0 {
                let b = v.trailing_zeros() as usize;
                part_zeros[w * 32 + b] += 1;
                v &= v - 1;
            }
        }
    }

    let nv = ctx.num_vars();
    let mut var_zeros = vec![0usize; nv];
    let mut parts_active = vec![0usize; nv];
    let mut is_unate = vec![false; nv];
    let mut vars_active = 0;
    let mut vars_unate = 0;
    for var in 0..nv {
        for part in ctx.first_part(var)..=ctx.last_part(var) {
            var_zeros[var] += part_zeros[part];
            if part_zeros[part] > 0 {
                parts_active[var] += 1;
            }
        }
        if parts_active[var] > 0 {
            vars_active += 1;
            if parts_active[var] == 1 {
                is_unate[var] = true;
                vars_unate += 1;
            }
        }
    }

    let mut best: Option<usize> = None;
    for var in 0..nv {
        if parts_active[var] == 0 {
            continue;
        }
        best = match best {
            None => Some(var),
            Some(b) => {
                let max_zero = |v: usize| {
                    (ctx.first_part(v)..=ctx.last_part(v))
                        .map(|p| part_zeros[p])
                        .max()
                        .unwrap_or(0)
                };
                let key = |v: usize| (parts_active[v], var_zeros[v]);
                if key(var) > key(b)
                    || (key(var) == key(b) && max_zero(var) < max_zero(b))
                {
                    Some(var)
                } else {
                    Some(b)
                }
            }
        };
    }

    CountData {
        part_zeros,
        var_zeros,
        parts_active,
        is_unate,
        vars_active,
        vars_unate,
        best,
    }
}

/// Produce the two cofactoring cubes for the best split variable.
///
/// Each returned cube is the universe with the split variable restricted to
/// one half of its parts. Active parts are dealt out alternately so both
/// halves make progress; a unate variable sends its single active part one
/// way and everything else the other way.
pub fn binate_split_select(
    ctx: &CubeContext,
    data: &CountData,
) -> Option<(usize, Vec<super::context::Word>, Vec<super::context::Word>)> {
    let var = data.best?;
    let mut cl = ctx.full_cube();
    let mut cr = ctx.full_cube();
    for w in ctx.first_word(var)..=ctx.last_word(var) {
        cl[w] &= !ctx.var_mask(var)[w];
        cr[w] &= !ctx.var_mask(var)[w];
    }

    let parts: Vec<usize> = (ctx.first_part(var)..=ctx.last_part(var)).collect();
    if data.parts_active[var] <= 1 {
        // isolate the active part; both branches silence the variable
        let active = parts
            .iter()
            .copied()
            .find(|&p| data.part_zeros[p] > 0)
            .unwrap_or(parts[0]);
        for p in parts {
            if p == active {
                super::cube::set_insert(&mut cl, p);
            } else {
                super::cube::set_insert(&mut cr, p);
            }
        }
    } else {
        let mut active_seen = 0usize;
        let mut inactive_seen = 0usize;
        let n_active = data.parts_active[var];
        let n_inactive = parts.len() - n_active;
        for p in parts {
            let left = if data.part_zeros[p] > 0 {
                active_seen += 1;
                active_seen * 2 <= n_active + 1
            } else {
                inactive_seen += 1;
                inactive_seen * 2 <= n_inactive + 1
            };
            if left {
                super::cube::set_insert(&mut cl, p);
            } else {
                super::cube::set_insert(&mut cr, p);
            }
        }
    }
    Some((var, cl, cr))
}
