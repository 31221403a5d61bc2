//! Native implementation of the Espresso-II heuristic logic minimizer
//!
//! This module is the core engine: a positional-cube algebra over
//! bit-packed covers, the unate-recursive primitives (tautology,
//! complement, SCCC, prime generation), the EXPAND / IRREDUNDANT / REDUCE
//! loop with its gasp perturbations and MAKE_SPARSE post-pass, and the
//! sparse-matrix unate covering solver they lean on.
//!
//! Most callers want the high-level [`Cover`](crate::Cover) API instead.
//! This module is for direct control: build a [`CubeContext`] describing
//! the problem geometry, fill [`Family`] covers with packed cubes, and call
//! [`espresso`]. Everything takes the context by reference; there is no
//! process-wide state, so independent problems can run concurrently on
//! different threads.
//!
//! ```
//! use espresso_min::espresso::{
//!     complement_cover, espresso, CubeContext, EspressoConfig, Family,
//! };
//! use espresso_min::espresso::cube::{set_insert, set_remove};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // f = a'b + ab over two inputs, one output
//! let ctx = CubeContext::new_binary(2, 1)?;
//! let mut f = Family::new(&ctx);
//! let mut cube = ctx.new_cube();
//! set_insert(&mut cube, 0); // a = 0
//! set_insert(&mut cube, 3); // b = 1
//! set_insert(&mut cube, 4); // output present
//! f.push(&cube);
//! let mut cube = ctx.full_cube();
//! set_remove(&mut cube, 0); // a = 1
//! set_remove(&mut cube, 2); // b = 1
//! f.push(&cube);
//!
//! let d = Family::new(&ctx);
//! let r = complement_cover(&ctx, &f, None);
//! let minimized = espresso(&ctx, f, &d, &r, &EspressoConfig::default())?;
//! assert_eq!(minimized.count(), 1); // both cubes collapse into b
//! # Ok(())
//! # }
//! ```

pub mod compl;
pub mod context;
pub mod cost;
pub mod count;
pub mod cube;
pub mod cubelist;
pub mod driver;
pub mod essential;
pub mod expand;
pub mod family;
pub mod gasp;
pub mod irredundant;
pub mod matrix;
pub mod mincov;
pub mod reduce;
pub mod sparse;
pub mod unate;
pub mod verify;

pub use compl::{complement, complement_cover, cover_union, unravel};
pub use context::{CubeContext, Word, BPI};
pub use cost::{cover_cost, Cost};
pub use cubelist::CubeList;
pub use driver::espresso;
pub use essential::essential;
pub use expand::expand;
pub use family::{contain, Attr, Family};
pub use gasp::{last_gasp, primes_consensus, super_gasp};
pub use irredundant::irredundant;
pub use matrix::SmMatrix;
pub use mincov::minimum_cover;
pub use reduce::reduce;
pub use sparse::make_sparse;
pub use unate::{cube_is_covered, sccc, simplify, tautology};
pub use verify::verify;

/// Option flags steering the minimization loop.
///
/// The defaults match the classic tool's: essentials are pulled out of the
/// loop, multi-output cubes are unwrapped before the first expansion, and
/// MAKE_SPARSE iterates until the literal count is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EspressoConfig {
    /// Extract essential cubes before the loop and re-append them after.
    pub remove_essential: bool,
    /// One EXPAND + IRREDUNDANT, then stop iterating.
    pub single_expand: bool,
    /// Rebuild the ON-set with `simplify` before minimizing.
    pub recompute_onset: bool,
    /// Split multi-output cubes before the first expansion.
    pub unwrap_onset: bool,
    /// Use SUPER_GASP instead of LAST_GASP.
    pub use_super_gasp: bool,
    /// Omit the MAKE_SPARSE post-pass.
    pub skip_make_sparse: bool,
    /// Keep iterating MAKE_SPARSE while the literal count drops.
    pub force_irredundant: bool,
}

impl Default for EspressoConfig {
    fn default() -> Self {
        EspressoConfig {
            remove_essential: true,
            single_expand: false,
            recompute_onset: false,
            unwrap_onset: true,
            use_super_gasp: false,
            skip_make_sparse: false,
            force_irredundant: true,
        }
    }
}
