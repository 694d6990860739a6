#![allow(missing_docs)]
//! Host-level tests for the addressing and rotation transforms.

use std::collections::HashSet;

use matrix_envoy::{
    Error,
    color::{ColorWord, pack_rgb},
    matrix::{
        Renderer,
        layout::{Addressing, Grid},
        rotation::Rotation,
    },
};

const RED: ColorWord = pack_rgb(255, 0, 0);

#[test]
fn row_major_is_injective_over_its_extent() {
    for grid in [Grid::new(8, 16, 1), Grid::new(3, 2, 1), Grid::new(4, 3, 2)] {
        let bounds = Addressing::RowMajor.bounds(&grid);
        let mut seen = HashSet::new();
        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                let index = Addressing::RowMajor
                    .index(&grid, x, y)
                    .expect("in-bounds coordinate has an index");
                assert!(index < grid.len());
                assert!(seen.insert(index), "({x}, {y}) reuses index {index}");
            }
        }
        assert_eq!(seen.len(), grid.len());
    }
}

#[test]
fn row_major_rejects_row_wrap() {
    const GRID: Grid = Grid::new(8, 16, 1);
    // x = 8 would wrap onto the next row under a bare y * width + x.
    assert_eq!(Addressing::RowMajor.index(&GRID, 8, 0), None);
    assert_eq!(Addressing::RowMajor.index(&GRID, -1, 1), None);
    assert_eq!(Addressing::RowMajor.index(&GRID, 0, 16), None);
    assert_eq!(Addressing::RowMajor.index(&GRID, 7, 15), Some(127));
}

#[test]
fn column_major_flipped_covers_every_slot_once() {
    const GRID: Grid = Grid::new(16, 8, 1);
    let addressing = Addressing::ColumnMajorFlipped;
    let mut seen = HashSet::new();
    for x in 1..=16 {
        for y in 1..=8 {
            let index = addressing.index(&GRID, x, y).expect("in bounds");
            assert!(seen.insert(index));
        }
    }
    assert_eq!(seen.len(), 128);
    assert_eq!(seen.iter().max(), Some(&127));
}

#[test]
fn column_major_flipped_out_of_bounds_leaves_buffer_unchanged() {
    let mut renderer =
        Renderer::<128>::new(Grid::new(16, 8, 1), Addressing::ColumnMajorFlipped)
            .expect("grid matches buffer");
    assert!(renderer.set_pixel(3, 3, RED));
    let before = *renderer.frame();

    for (x, y) in [(0, 1), (1, 0), (17, 1), (1, 9), (-5, -5), (17, 9), (i32::MAX, 1)] {
        assert!(!renderer.set_pixel(x, y, RED), "({x}, {y}) should be dropped");
    }
    assert_eq!(*renderer.frame(), before);
}

#[test]
fn xy_inverts_index() {
    for addressing in [Addressing::RowMajor, Addressing::ColumnMajorFlipped] {
        for grid in [Grid::new(16, 8, 1), Grid::new(5, 3, 2)] {
            for index in 0..grid.len() {
                let (x, y) = addressing.xy(&grid, index).expect("index on the chain");
                assert_eq!(addressing.index(&grid, x, y), Some(index));
            }
            assert_eq!(addressing.xy(&grid, grid.len()), None);
        }
    }
}

#[test]
fn renderer_rejects_wrong_buffer_length() {
    let result = Renderer::<100>::new(Grid::new(16, 8, 1), Addressing::RowMajor);
    assert_eq!(
        result.err(),
        Some(Error::GridLengthMismatch {
            expected: 128,
            actual: 100
        })
    );
}

#[test]
#[should_panic(expected = "grid dimensions must be positive")]
fn grid_new_panics_on_zero_width() {
    let _ = Grid::new(0, 8, 1);
}

#[test]
fn every_rotation_is_a_bijection_on_the_glyph_box() {
    for (width, height) in [(4, 6), (5, 5), (3, 7), (7, 2), (1, 1)] {
        for rotation in Rotation::ALL {
            let mut seen = HashSet::new();
            for row in 0..height {
                for col in 0..width {
                    assert!(
                        seen.insert(rotation.apply(row, col, width, height)),
                        "{rotation:?} collides at ({row}, {col}) in {width}x{height}"
                    );
                }
            }
            assert_eq!(seen.len(), width * height);
        }
    }
}

#[test]
fn rotation_formulas() {
    // 4 wide, 6 tall: the digit box.
    assert_eq!(Rotation::None.apply(1, 3, 4, 6), (3, 1));
    assert_eq!(Rotation::Cw90.apply(1, 3, 4, 6), (4, 3));
    assert_eq!(Rotation::Cw180.apply(1, 3, 4, 6), (0, 4));
    assert_eq!(Rotation::Cw270.apply(1, 3, 4, 6), (1, 2));
}

#[test]
fn four_quarter_turns_return_to_start() {
    for rotation in Rotation::ALL {
        let turned = rotation.next_cw().next_cw().next_cw().next_cw();
        assert_eq!(turned, rotation);
        assert_ne!(rotation.next_cw(), rotation);
    }
}
