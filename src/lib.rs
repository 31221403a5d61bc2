//! # Espresso Logic Minimizer
//!
//! A native Rust implementation of the Espresso-II heuristic two-level
//! logic minimizer (UC Berkeley). Given a multi-output, incompletely
//! specified Boolean function as a sum-of-products cover, it produces a
//! logically equivalent cover with a near-minimum number of product terms
//! and literals. Typical uses:
//!
//! - Digital logic synthesis
//! - PLA (Programmable Logic Array) minimization
//! - Boolean function simplification
//! - Logic optimization in CAD tools
//!
//! ## API Levels
//!
//! ### High-Level API (Recommended)
//!
//! - **[`Cover`]** - dynamic covers with automatic dimension management
//! - **[`Minimizable`]** - the `minimize()` / `minimize_with_config()`
//!   trait
//! - **[`PLAReader`]** and **[`PLAWriter`]** - file I/O for the PLA format
//!
//! ```
//! use espresso_min::{Cover, CoverType, Minimizable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build the ON-set of a redundant cover of "b"
//! let mut cover = Cover::new(CoverType::F);
//! cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);  // 01 -> 1
//! cover.add_cube(&[Some(true), Some(true)], &[Some(true)]);   // 11 -> 1
//!
//! // Minimize (returns a new instance)
//! let minimized = cover.minimize()?;
//! assert_eq!(minimized.num_cubes(), 1);
//!
//! for (inputs, outputs) in minimized.cubes_iter() {
//!     println!("Cube: {:?} -> {:?}", inputs, outputs);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Load and minimize PLA files:
//!
//! ```no_run
//! use espresso_min::{Cover, CoverType, Minimizable, PLAReader, PLAWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cover = Cover::from_pla_file("input.pla")?;
//! let minimized = cover.minimize()?;
//! minimized.to_pla_file("output.pla", CoverType::F)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Core API (Advanced)
//!
//! The [`espresso`] module exposes the engine directly: the
//! [`CubeContext`](espresso::CubeContext) problem geometry (including
//! multiple-valued variables), packed [`Family`](espresso::Family) covers,
//! and the individual passes (`expand`, `irredundant`, `reduce`,
//! `tautology`, `complement`, the covering solver). Use it when you need
//! custom don't-care and OFF-sets, multiple-valued variables, or the
//! intermediate covers.
//!
//! ## Cover Types
//!
//! - **F** - ON-set only
//! - **FD** - ON-set + don't-cares (the classic default)
//! - **FR** - ON-set + OFF-set
//! - **FDR** - all three sets
//!
//! Missing sets are synthesized by complementing the supplied ones.
//!
//! ## Thread Safety
//!
//! There is no global state: every entry point takes its context and
//! configuration by reference, so independent minimizations can run on
//! any number of threads at once.

pub mod cover;
pub mod error;
pub mod espresso;
pub mod pla;

pub use cover::{Cover, CoverType, Cube, CubeData, CubeType, Minimizable};
pub use error::{
    ConfigError, CubeError, MinimizationError, PLAError, PLAReadError, VerifyError,
};
pub use espresso::EspressoConfig;
pub use pla::{PLAReader, PLAWriter};
