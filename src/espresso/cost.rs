//! Cover cost
//!
//! The cost tuple drives every acceptance decision in the minimization
//! loop: fewer cubes wins, then fewer total literals. The remaining fields
//! are reported for diagnostics only.

use std::fmt;

use super::context::CubeContext;
use super::cube::set_test;
use super::family::Family;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Number of cubes in the cover.
    pub cubes: usize,
    /// Binary input literals (a binary variable with exactly one part).
    pub input_literals: usize,
    /// Parts present in the output variable.
    pub output_literals: usize,
    /// Parts present in non-full multiple-valued variables other than the
    /// output.
    pub mv_literals: usize,
    /// Sum of the three literal counts.
    pub total: usize,
}

impl Cost {
    /// Strictly better under the loop's acceptance order.
    pub fn improves(&self, other: &Cost) -> bool {
        self.cubes < other.cubes || (self.cubes == other.cubes && self.total < other.total)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cubes, {} in, {} out, {} mv, {} total",
            self.cubes, self.input_literals, self.output_literals, self.mv_literals, self.total
        )
    }
}

pub fn cover_cost(ctx: &CubeContext, f: &Family) -> Cost {
    let mut input_literals = 0;
    let mut output_literals = 0;
    let mut mv_literals = 0;
    let out_var = ctx.output_var();
    for cube in f.iter() {
        for var in 0..ctx.num_vars() {
            let parts = (ctx.first_part(var)..=ctx.last_part(var))
                .filter(|&b| set_test(cube, b))
                .count();
            if var == out_var {
                output_literals += parts;
            } else if ctx.is_binary(var) {
                if parts == 1 {
                    input_literals += 1;
                }
            } else if parts < ctx.part_size(var) {
                mv_literals += parts;
            }
        }
    }
    Cost {
        cubes: f.count(),
        input_literals,
        output_literals,
        mv_literals,
        total: input_literals + output_literals + mv_literals,
    }
}
