//! Cube types for the high-level cover API
//!
//! A [`Cube`] is one product term of a [`Cover`](super::Cover): an input
//! pattern in three-valued logic plus a bit per output, tagged with the set
//! it belongs to (ON, don't-care or OFF).

use std::sync::Arc;

/// Type alias for cube data as owned vectors (inputs, outputs).
pub type CubeData = (Vec<Option<bool>>, Vec<Option<bool>>);

/// Which set a cube belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeType {
    /// ON-set cube (the function is 1)
    F,
    /// Don't-care cube (the function is unspecified)
    D,
    /// OFF-set cube (the function is 0)
    R,
}

/// A single product term.
///
/// Inputs use three-valued logic: `Some(false)` means the variable must be
/// 0, `Some(true)` means it must be 1, `None` means either. Outputs are a
/// plain bit per output column: `true` when the bit is set in this cube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cube {
    pub(crate) inputs: Arc<[Option<bool>]>,
    pub(crate) outputs: Arc<[bool]>,
    pub(crate) cube_type: CubeType,
}

impl Cube {
    pub(crate) fn new(inputs: &[Option<bool>], outputs: &[bool], cube_type: CubeType) -> Self {
        Cube {
            inputs: inputs.into(),
            outputs: outputs.into(),
            cube_type,
        }
    }

    /// The input pattern of this cube.
    pub fn inputs(&self) -> &[Option<bool>] {
        &self.inputs
    }

    /// The output bits of this cube.
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    /// The set this cube belongs to.
    pub fn cube_type(&self) -> CubeType {
        self.cube_type
    }
}
