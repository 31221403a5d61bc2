//! Tests for the cover module

use super::*;
use crate::pla::{PLAReader, PLAWriter};

#[test]
fn test_cover_creation() {
    let cover = Cover::new(CoverType::F);
    assert_eq!(cover.num_inputs(), 0);
    assert_eq!(cover.num_outputs(), 0);
    assert_eq!(cover.num_cubes(), 0);
}

#[test]
fn test_cover_with_labels() {
    let cover = Cover::with_labels(CoverType::F, &["a", "b", "c"], &["out"]);
    assert_eq!(cover.num_inputs(), 3);
    assert_eq!(cover.num_outputs(), 1);
    assert_eq!(cover.input_labels()[0].as_ref(), "a");
    assert_eq!(cover.input_labels()[1].as_ref(), "b");
    assert_eq!(cover.input_labels()[2].as_ref(), "c");
    assert_eq!(cover.output_labels()[0].as_ref(), "out");
}

#[test]
fn test_add_cube() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    assert_eq!(cover.num_inputs(), 2);
    assert_eq!(cover.num_outputs(), 1);
    assert_eq!(cover.num_cubes(), 1);
}

#[test]
fn test_dynamic_growth() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);
    assert_eq!(cover.num_inputs(), 2);
    assert_eq!(cover.num_outputs(), 1);

    // Add larger cube
    cover.add_cube(
        &[Some(true), Some(false), Some(true)],
        &[Some(true), Some(false)],
    );
    assert_eq!(cover.num_inputs(), 3);
    assert_eq!(cover.num_outputs(), 2);

    // Labels are not auto-generated on growth
    assert_eq!(cover.input_labels().len(), 0);
    assert_eq!(cover.output_labels().len(), 0);
}

#[test]
fn test_dynamic_growth_preserves_existing_cubes() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);

    let first_cube_inputs: Vec<_> = cover.cubes().next().unwrap().inputs().to_vec();
    assert_eq!(first_cube_inputs, vec![Some(true), Some(false)]);

    cover.add_cube(&[Some(true), Some(false), Some(true)], &[Some(true)]);

    // First cube is padded with don't-cares
    let first_cube_after: Vec<_> = cover.cubes().next().unwrap().inputs().to_vec();
    assert_eq!(first_cube_after, vec![Some(true), Some(false), None]);
}

#[test]
fn test_labeled_cover_backfills_on_growth() {
    let mut cover = Cover::with_labels(CoverType::F, &["a", "b"], &["out"]);
    cover.add_cube(&[Some(true), Some(false), None, Some(true)], &[Some(true)]);
    assert_eq!(cover.num_inputs(), 4);
    assert_eq!(cover.input_labels().len(), 4);
    assert_eq!(cover.input_labels()[0].as_ref(), "a");
    assert_eq!(cover.input_labels()[2].as_ref(), "x2");
}

#[test]
fn test_minimize_xor_stays() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);
    let cover = cover.minimize().unwrap();
    // XOR cannot be minimized
    assert_eq!(cover.num_cubes(), 2);
}

#[test]
fn test_minimize_collapses_redundancy() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(true), None], &[Some(true)]);
    let minimised = cover.minimize().unwrap();
    assert!(minimised.num_cubes() <= 2);
}

#[test]
fn test_minimize_with_dont_cares() {
    let mut cover = Cover::new(CoverType::FD);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(true)], &[None]); // DC
    let minimised = cover.minimize().unwrap();
    // with 11 free the cube grows to -1
    assert_eq!(minimised.num_cubes(), 1);
    let cube = minimised.cubes().next().unwrap();
    assert_eq!(cube.inputs(), &[None, Some(true)]);
}

#[test]
fn test_multi_output_minimization() {
    let mut cover = Cover::new(CoverType::F);
    // f1 = {01, 11}, f2 = {10, 11}
    cover.add_cube(&[Some(false), Some(true)], &[Some(true), Some(false)]);
    cover.add_cube(&[Some(true), Some(true)], &[Some(true), Some(true)]);
    cover.add_cube(&[Some(true), Some(false)], &[Some(false), Some(true)]);
    let minimised = cover.minimize().unwrap();
    assert!(minimised.num_cubes() <= 3);

    // per-output coverage survives
    let covers = |want_in: [Option<bool>; 2], out_idx: usize| {
        minimised.cubes().any(|c| {
            c.outputs()[out_idx]
                && c.inputs()
                    .iter()
                    .zip(&want_in)
                    .all(|(have, want)| match want {
                        Some(v) => *have == Some(*v) || have.is_none(),
                        None => true,
                    })
        })
    };
    assert!(covers([Some(false), Some(true)], 0));
    assert!(covers([Some(true), Some(true)], 0));
    assert!(covers([Some(true), Some(false)], 1));
    assert!(covers([Some(true), Some(true)], 1));
}

#[test]
fn test_from_parts_roundtrip() {
    let cover = Cover::from_parts(
        2,
        1,
        vec![(vec![0, 1], vec![1]), (vec![1, 2], vec![1])],
        CoverType::F,
    )
    .unwrap();
    assert_eq!(cover.num_cubes(), 2);
    let parts = cover.to_parts();
    assert_eq!(parts[0], (vec![0, 1], vec![1]));
    assert_eq!(parts[1], (vec![1, 2], vec![1]));
}

#[test]
fn test_from_parts_rejects_bad_values() {
    let err = Cover::from_parts(2, 1, vec![(vec![0, 7], vec![1])], CoverType::F);
    assert!(matches!(
        err,
        Err(crate::error::CubeError::InvalidValue { value: 7, position: 1 })
    ));

    let err = Cover::from_parts(2, 1, vec![(vec![0], vec![1])], CoverType::F);
    assert!(matches!(
        err,
        Err(crate::error::CubeError::WrongLength { .. })
    ));
}

#[test]
fn test_fr_cover_synthesizes_dont_cares() {
    // declare only where the function is 0 or 1; the rest is free
    let mut cover = Cover::new(CoverType::FR);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(false), Some(false)], &[Some(false)]);
    let minimised = cover.minimize().unwrap();
    // 10 and 11 are don't-cares, so a single cube -1 (or even broader)
    // covers the ON-set
    assert_eq!(
        minimised
            .cubes()
            .filter(|c| c.cube_type() == CubeType::F)
            .count(),
        1
    );
}

#[test]
fn test_pla_roundtrip_through_string() {
    let mut cover = Cover::with_labels(CoverType::F, &["a", "b"], &["f"]);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);

    let text = cover.to_pla_string(CoverType::F).unwrap();
    assert!(text.contains(".i 2"));
    assert!(text.contains(".o 1"));
    assert!(text.contains(".ilb a b"));

    let back = Cover::from_pla_string(&text).unwrap();
    assert_eq!(back.num_inputs(), 2);
    assert_eq!(back.num_outputs(), 1);
    assert_eq!(back.num_cubes(), 2);
}
