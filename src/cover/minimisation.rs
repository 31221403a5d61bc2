//! The `Minimizable` trait and its implementation for `Cover`
//!
//! This is the bridge between the dynamic-dimension [`Cover`] API and the
//! packed-cube core: the cover's cubes are packed into F/D/R families,
//! whichever set the cover type leaves out is synthesized by
//! complementation, the driver runs, and the minimized family is unpacked
//! into a fresh cover with the same labels and type.

use super::cubes::CubeType;
use super::Cover;
use crate::error::MinimizationError;
use crate::espresso::{
    complement_cover, cube, espresso, CubeContext, EspressoConfig, Family, Word,
};

/// Types that can be minimized with the Espresso algorithm.
///
/// All methods take `&self` and return a new minimized instance; the
/// original is preserved.
///
/// ```
/// use espresso_min::{Cover, CoverType, Minimizable};
///
/// let mut cover = Cover::new(CoverType::F);
/// cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
/// cover.add_cube(&[Some(true), Some(true)], &[Some(true)]);
/// let minimised = cover.minimize().unwrap();
/// assert_eq!(minimised.num_cubes(), 1);
/// ```
pub trait Minimizable {
    /// Minimize with the default configuration.
    fn minimize(&self) -> Result<Self, MinimizationError>
    where
        Self: Sized,
    {
        self.minimize_with_config(&EspressoConfig::default())
    }

    /// Minimize with a custom configuration.
    ///
    /// This is the method implementations must provide.
    fn minimize_with_config(&self, config: &EspressoConfig) -> Result<Self, MinimizationError>
    where
        Self: Sized;
}

impl Minimizable for Cover {
    fn minimize_with_config(&self, config: &EspressoConfig) -> Result<Self, MinimizationError> {
        let (ctx, f, d, r) = pack_cover(self)?;
        let minimized = espresso(&ctx, f, &d, &r, config)?;

        let mut cubes = Vec::with_capacity(minimized.count());
        for packed in minimized.iter() {
            cubes.push(unpack_cube(&ctx, packed, CubeType::F, self.num_outputs()));
        }
        // the don't-care and OFF sets pass through unchanged
        for cube in self.raw_cubes() {
            if cube.cube_type() != CubeType::F {
                cubes.push(cube.clone());
            }
        }
        Ok(self.with_cubes(cubes))
    }
}

/// Pack a cover into the core representation, synthesizing whichever of
/// D and R the cover type does not carry.
pub(crate) fn pack_cover(
    cover: &Cover,
) -> Result<(CubeContext, Family, Family, Family), MinimizationError> {
    let ctx = CubeContext::new_binary(cover.num_inputs(), cover.num_outputs())?;
    let mut f = Family::new(&ctx);
    let mut d = Family::new(&ctx);
    let mut r = Family::new(&ctx);
    for c in cover.raw_cubes() {
        let packed = pack_cube(&ctx, c.inputs(), c.outputs());
        // a cube with no output bit covers nothing
        if c.outputs().iter().any(|&b| b) {
            match c.cube_type() {
                CubeType::F => f.push(&packed),
                CubeType::D => d.push(&packed),
                CubeType::R => r.push(&packed),
            }
        }
    }

    let cover_type = cover.cover_type();
    if !cover_type.has_r() {
        r = complement_cover(&ctx, &f, Some(&d));
    } else if !cover_type.has_d() {
        d = complement_cover(&ctx, &f, Some(&r));
    }
    Ok((ctx, f, d, r))
}

/// Pack one high-level cube into the positional encoding.
pub(crate) fn pack_cube(
    ctx: &CubeContext,
    inputs: &[Option<bool>],
    outputs: &[bool],
) -> Vec<Word> {
    let mut packed = ctx.new_cube();
    for (v, value) in inputs.iter().enumerate() {
        match value {
            Some(false) => cube::set_insert(&mut packed, ctx.first_part(v)),
            Some(true) => cube::set_insert(&mut packed, ctx.first_part(v) + 1),
            None => {
                cube::set_insert(&mut packed, ctx.first_part(v));
                cube::set_insert(&mut packed, ctx.first_part(v) + 1);
            }
        }
    }
    let out = ctx.output_var();
    for (k, &bit) in outputs.iter().enumerate() {
        if bit {
            cube::set_insert(&mut packed, ctx.first_part(out) + k);
        }
    }
    packed
}

/// Unpack a core cube back into the high-level shape.
pub(crate) fn unpack_cube(
    ctx: &CubeContext,
    packed: &[Word],
    cube_type: CubeType,
    num_outputs: usize,
) -> super::Cube {
    let mut inputs = Vec::with_capacity(ctx.num_binary_vars());
    for v in 0..ctx.num_binary_vars() {
        let p0 = cube::set_test(packed, ctx.first_part(v));
        let p1 = cube::set_test(packed, ctx.first_part(v) + 1);
        inputs.push(match (p0, p1) {
            (true, false) => Some(false),
            (false, true) => Some(true),
            _ => None,
        });
    }
    let out = ctx.output_var();
    let outputs: Vec<bool> = (0..num_outputs)
        .map(|k| cube::set_test(packed, ctx.first_part(out) + k))
        .collect();
    super::Cube::new(&inputs, &outputs, cube_type)
}
