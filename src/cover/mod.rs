//! Cover types and traits for Boolean function minimisation
//!
//! A **cover** represents a Boolean function as a set of **cubes** (product
//! terms). Each cube specifies input conditions and corresponding output
//! values. Covers are the representation the Espresso algorithm minimizes.
//!
//! # Cover Types
//!
//! - **F** (ON-set only) - specifies where outputs are 1
//! - **FD** (ON-set + don't-cares) - adds flexibility for optimisation
//! - **FR** (ON-set + OFF-set) - specifies both 1s and 0s explicitly
//! - **FDR** (complete) - ON-set + don't-cares + OFF-set
//!
//! Whatever the cover type leaves out is synthesized by complementing the
//! sets it supplies before minimization.
//!
//! # Dynamic Dimensions
//!
//! A [`Cover`] grows automatically as cubes are added: start empty, add
//! cubes of any size, and existing cubes are padded with don't-cares when
//! the dimensions expand. No manual dimension tracking is needed.
//!
//! # Examples
//!
//! ```
//! use espresso_min::{Cover, CoverType, Minimizable};
//!
//! // a redundant cover of "b"
//! let mut cover = Cover::new(CoverType::F);
//! cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);  // 01 -> 1
//! cover.add_cube(&[Some(true), Some(true)], &[Some(true)]);   // 11 -> 1
//!
//! let minimised = cover.minimize().unwrap();
//! assert_eq!(minimised.num_cubes(), 1);
//! ```

mod cubes;
mod iterators;
mod labels;
mod minimisation;
#[cfg(test)]
mod tests;

pub use cubes::{Cube, CubeData, CubeType};
pub use iterators::CubesIter;
pub use minimisation::Minimizable;

use crate::error::CubeError;
use labels::LabelManager;
use std::sync::Arc;

/// Which sets a cover carries (F, FD, FR, or FDR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverType {
    /// ON-set only (F)
    F = 1,
    /// ON-set and don't-care set (FD)
    FD = 3,
    /// ON-set and OFF-set (FR)
    FR = 5,
    /// ON-set, don't-care set, and OFF-set (FDR)
    FDR = 7,
}

impl CoverType {
    /// Does this type carry the ON-set?
    pub fn has_f(&self) -> bool {
        true
    }

    /// Does this type carry the don't-care set?
    pub fn has_d(&self) -> bool {
        matches!(self, CoverType::FD | CoverType::FDR)
    }

    /// Does this type carry the OFF-set?
    pub fn has_r(&self) -> bool {
        matches!(self, CoverType::FR | CoverType::FDR)
    }
}

/// A Boolean function as a sum of products, with dynamic dimensions.
///
/// `Cover` is the primary type for building truth tables and reading PLA
/// files. Cubes are added with [`Cover::add_cube`] using PLA conventions:
/// an output of `Some(true)` sets the bit in an F cube, `Some(false)` in an
/// R cube (when the cover type carries R), and `None` in a D cube (when the
/// type carries D).
///
/// Minimization goes through the [`Minimizable`] trait and returns a new
/// cover; the original stays untouched.
#[derive(Clone, Debug)]
pub struct Cover {
    /// Input variable count
    num_inputs: usize,
    /// Output variable count
    num_outputs: usize,
    /// Names for the inputs, generated as `x{n}` where missing
    input_labels: LabelManager<'x'>,
    /// Names for the outputs, generated as `y{n}` where missing
    output_labels: LabelManager<'y'>,
    /// The cubes, each tagged with the set it belongs to
    cubes: Vec<Cube>,
    /// Which sets this cover carries
    cover_type: CoverType,
}

impl Cover {
    /// Create a new empty cover with the specified type.
    ///
    /// ```
    /// use espresso_min::{Cover, CoverType};
    ///
    /// let cover = Cover::new(CoverType::F);
    /// assert_eq!(cover.num_inputs(), 0);
    /// assert_eq!(cover.num_outputs(), 0);
    /// ```
    pub fn new(cover_type: CoverType) -> Self {
        Cover::with_labels::<&str>(cover_type, &[], &[])
    }

    /// Create a cover with pre-defined labels; the dimensions follow the
    /// label counts.
    ///
    /// ```
    /// use espresso_min::{Cover, CoverType};
    ///
    /// let cover = Cover::with_labels(CoverType::F, &["a", "b", "c"], &["out"]);
    /// assert_eq!(cover.num_inputs(), 3);
    /// assert_eq!(cover.num_outputs(), 1);
    /// ```
    pub fn with_labels<S: AsRef<str>>(
        cover_type: CoverType,
        inputs: &[S],
        outputs: &[S],
    ) -> Self {
        let inputs: Vec<Arc<str>> = inputs.iter().map(|s| Arc::from(s.as_ref())).collect();
        let outputs: Vec<Arc<str>> = outputs.iter().map(|s| Arc::from(s.as_ref())).collect();
        Cover {
            num_inputs: inputs.len(),
            num_outputs: outputs.len(),
            input_labels: LabelManager::from_labels(inputs),
            output_labels: LabelManager::from_labels(outputs),
            cubes: Vec::new(),
            cover_type,
        }
    }

    /// Build a cover from the binding-layer carrier shape: each cube is a
    /// pair of part vectors, inputs drawn from {0, 1, 2 = don't care} and
    /// outputs from {0 = off, 1 = on, 2 = dc}.
    ///
    /// Dimensions are fixed up front; a tuple of the wrong length or an
    /// out-of-range part is a typed failure, not a panic.
    pub fn from_parts<I>(
        num_inputs: usize,
        num_outputs: usize,
        cover: I,
        cover_type: CoverType,
    ) -> Result<Self, CubeError>
    where
        I: IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
    {
        let mut out = Cover::new(cover_type);
        out.grow_to_fit(num_inputs, num_outputs);
        for (in_parts, out_parts) in cover {
            if in_parts.len() != num_inputs {
                return Err(CubeError::WrongLength {
                    kind: "input",
                    expected: num_inputs,
                    actual: in_parts.len(),
                });
            }
            if out_parts.len() != num_outputs {
                return Err(CubeError::WrongLength {
                    kind: "output",
                    expected: num_outputs,
                    actual: out_parts.len(),
                });
            }
            let mut inputs = Vec::with_capacity(num_inputs);
            for (position, &v) in in_parts.iter().enumerate() {
                inputs.push(match v {
                    0 => Some(false),
                    1 => Some(true),
                    2 => None,
                    value => return Err(CubeError::InvalidValue { value, position }),
                });
            }
            let mut outputs = Vec::with_capacity(num_outputs);
            for (position, &v) in out_parts.iter().enumerate() {
                outputs.push(match v {
                    0 => Some(false),
                    1 => Some(true),
                    2 => None,
                    value => return Err(CubeError::InvalidValue { value, position }),
                });
            }
            out.add_cube(&inputs, &outputs);
        }
        Ok(out)
    }

    /// The cubes in the binding-layer carrier shape (see
    /// [`Cover::from_parts`]).
    pub fn to_parts(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.cubes
            .iter()
            .map(|cube| {
                let inputs = cube
                    .inputs()
                    .iter()
                    .map(|v| match v {
                        Some(false) => 0,
                        Some(true) => 1,
                        None => 2,
                    })
                    .collect();
                let set_value = match cube.cube_type() {
                    CubeType::F => 1,
                    CubeType::D => 2,
                    CubeType::R => 0,
                };
                let outputs = cube
                    .outputs()
                    .iter()
                    .map(|&b| if b { set_value } else { 0 })
                    .collect();
                (inputs, outputs)
            })
            .collect()
    }

    /// Get the number of inputs.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Get the number of outputs.
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Number of cubes (for F/FD types only F cubes count; for FR/FDR,
    /// all).
    pub fn num_cubes(&self) -> usize {
        if self.cover_type.has_r() {
            return self.cubes.len();
        }
        self.cubes
            .iter()
            .filter(|c| c.cube_type() == CubeType::F)
            .count()
    }

    /// Get the cover type.
    pub fn cover_type(&self) -> CoverType {
        self.cover_type
    }

    /// Input variable labels, empty when none were supplied.
    pub fn input_labels(&self) -> &[Arc<str>] {
        self.input_labels.as_slice()
    }

    /// Output variable labels, empty when none were supplied.
    pub fn output_labels(&self) -> &[Arc<str>] {
        self.output_labels.as_slice()
    }

    /// Cubes the cover type makes visible: an F-type cover shows only its
    /// F cubes, the richer types show everything.
    fn visible_cubes(&self) -> impl Iterator<Item = &Cube> + '_ {
        let hide_non_f = self.cover_type == CoverType::F;
        self.cubes
            .iter()
            .filter(move |cube| !hide_non_f || cube.cube_type() == CubeType::F)
    }

    /// Iterate over cubes as [`Cube`] references.
    pub fn cubes(&self) -> CubesIter<'_, &Cube> {
        CubesIter {
            iter: Box::new(self.visible_cubes()),
        }
    }

    /// Iterate over cubes as owned `(inputs, outputs)` data, compatible
    /// with [`Cover::add_cube`].
    pub fn cubes_iter(&self) -> CubesIter<'_, CubeData> {
        CubesIter {
            iter: Box::new(self.visible_cubes().map(|cube| {
                let outputs: Vec<Option<bool>> =
                    cube.outputs().iter().map(|&b| Some(b)).collect();
                (cube.inputs().to_vec(), outputs)
            })),
        }
    }

    /// Add a cube; dimensions grow automatically.
    ///
    /// Outputs follow PLA conventions: `Some(true)` sets the bit in an F
    /// cube, `Some(false)` in an R cube (when the type carries R), `None`
    /// in a D cube (when the type carries D). One call can therefore add
    /// up to three internal cubes, one per set.
    ///
    /// ```
    /// use espresso_min::{Cover, CoverType};
    ///
    /// let mut cover = Cover::new(CoverType::F);
    /// cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    /// assert_eq!(cover.num_inputs(), 2);
    ///
    /// // a larger cube grows the cover
    /// cover.add_cube(&[Some(true), Some(false), Some(true)], &[Some(true)]);
    /// assert_eq!(cover.num_inputs(), 3);
    /// ```
    pub fn add_cube(&mut self, inputs: &[Option<bool>], outputs: &[Option<bool>]) {
        self.grow_to_fit(inputs.len(), outputs.len());

        let mut padded_inputs = inputs.to_vec();
        padded_inputs.resize(self.num_inputs, None);

        let mut padded_outputs = outputs.to_vec();
        padded_outputs.resize(self.num_outputs, None);

        let mut f_outputs = Vec::with_capacity(self.num_outputs);
        let mut d_outputs = Vec::with_capacity(self.num_outputs);
        let mut r_outputs = Vec::with_capacity(self.num_outputs);
        let mut has_f = false;
        let mut has_d = false;
        let mut has_r = false;

        for &out in padded_outputs.iter() {
            let (f, d, r) = match out {
                Some(true) if self.cover_type.has_f() => (true, false, false),
                Some(false) if self.cover_type.has_r() => (false, false, true),
                None if self.cover_type.has_d() => (false, true, false),
                _ => (false, false, false),
            };
            f_outputs.push(f);
            d_outputs.push(d);
            r_outputs.push(r);
            has_f |= f;
            has_d |= d;
            has_r |= r;
        }

        let sets = [
            (has_f, &f_outputs, CubeType::F),
            (has_d, &d_outputs, CubeType::D),
            (has_r, &r_outputs, CubeType::R),
        ];
        for (present, outputs, tag) in sets {
            if present {
                self.cubes.push(Cube::new(&padded_inputs, outputs, tag));
            }
        }
    }

    /// Grow the cover to fit at least the given dimensions, padding
    /// existing cubes and backfilling labels when the cover is labeled.
    fn grow_to_fit(&mut self, min_inputs: usize, min_outputs: usize) {
        if min_inputs > self.num_inputs {
            self.num_inputs = min_inputs;
            for cube in &mut self.cubes {
                let mut grown = cube.inputs.to_vec();
                grown.resize(min_inputs, None);
                cube.inputs = grown.into();
            }
            if !self.input_labels.is_empty() {
                self.input_labels.backfill_to(min_inputs);
            }
        }

        if min_outputs > self.num_outputs {
            self.num_outputs = min_outputs;
            for cube in &mut self.cubes {
                let mut grown = cube.outputs.to_vec();
                grown.resize(min_outputs, false);
                cube.outputs = grown.into();
            }
            if !self.output_labels.is_empty() {
                self.output_labels.backfill_to(min_outputs);
            }
        }
    }

    /// All cubes regardless of cover type, for the PLA writer.
    pub(crate) fn raw_cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Assemble a cover from parsed PLA parts.
    pub(crate) fn from_pla_parts(
        num_inputs: usize,
        num_outputs: usize,
        input_labels: Vec<Arc<str>>,
        output_labels: Vec<Arc<str>>,
        cubes: Vec<Cube>,
        cover_type: CoverType,
    ) -> Self {
        Cover {
            num_inputs,
            num_outputs,
            input_labels: LabelManager::from_labels(input_labels),
            output_labels: LabelManager::from_labels(output_labels),
            cubes,
            cover_type,
        }
    }

    /// Replace the cube list, keeping dimensions and labels.
    pub(crate) fn with_cubes(&self, cubes: Vec<Cube>) -> Self {
        Cover {
            num_inputs: self.num_inputs,
            num_outputs: self.num_outputs,
            input_labels: self.input_labels.clone(),
            output_labels: self.output_labels.clone(),
            cubes,
            cover_type: self.cover_type,
        }
    }
}

impl Default for Cover {
    fn default() -> Self {
        Self::new(CoverType::F)
    }
}
