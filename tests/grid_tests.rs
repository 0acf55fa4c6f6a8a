//! Grid tests - storage, row removal and text rendering

use proptest::prelude::*;

use tetris_field::core::{Grid, PieceId, PieceRef};
use tetris_field::types::Color;

const BLOCK: PieceRef = PieceRef {
    id: PieceId(1),
    color: Color::Blue,
};

/// 5x7 field with a full row 3 and single cells at (2, 2) and (2, 4)
fn cross() -> Grid {
    let mut grid = Grid::new(5, 7);
    grid.put(2, 2, BLOCK);
    grid.put(2, 4, BLOCK);
    for x in 0..5 {
        grid.put(x, 3, BLOCK);
    }
    grid
}

#[test]
fn test_put_and_get() {
    let mut grid = cross();
    assert_eq!(grid.put(0, 0, BLOCK), Some(BLOCK));
    assert_eq!(grid.get(0, 0), Some(BLOCK));
}

#[test]
fn test_put_out_of_bounds() {
    let mut grid = cross();
    assert_eq!(grid.put(-1, 0, BLOCK), None);
    assert_eq!(grid.get(-1, 0), None);
}

#[test]
fn test_remove_returns_occupant() {
    let mut grid = cross();
    assert_eq!(grid.remove(2, 3), Some(BLOCK));
    assert_eq!(grid.get(2, 3), None);
    assert_eq!(grid.remove(-1, 3), None);
}

#[test]
fn test_remove_row_shifts_rows_above() {
    let mut grid = cross();
    assert!(grid.remove_row(3));

    // Old row 4 moved into row 3.
    for x in [0, 1, 3, 4] {
        assert_eq!(grid.get(x, 3), None);
    }
    assert_eq!(grid.get(2, 3), Some(BLOCK));

    // Rows below are untouched, the top is now empty.
    assert_eq!(grid.get(2, 2), Some(BLOCK));
    assert_eq!(grid.get(2, 4), None);
    assert_eq!(grid.to_string(), ".....\n.....\n.....\n..X..\n..X..\n.....\n.....\n");
}

#[test]
fn test_remove_invalid_row() {
    let mut grid = cross();
    assert!(!grid.remove_row(-1));
    assert!(!grid.remove_row(7));
    assert!(grid.is_row_full(3));
}

#[test]
fn test_clear_all() {
    let mut grid = cross();
    grid.clear_all();
    assert!(grid.cells().iter().all(|cell| cell.is_none()));
}

#[test]
fn test_clear_row_does_not_shift() {
    let mut grid = cross();
    grid.clear_row(3);
    for x in 0..5 {
        assert_eq!(grid.get(x, 3), None);
    }
    assert_eq!(grid.get(2, 2), Some(BLOCK));
    assert_eq!(grid.get(2, 4), Some(BLOCK));
}

#[test]
fn test_clear_invalid_row_is_noop() {
    let mut grid = cross();
    grid.clear_row(-1);
    assert!(grid.is_row_full(3));
    assert_eq!(grid.get(2, 2), Some(BLOCK));
    assert_eq!(grid.get(2, 4), Some(BLOCK));
}

#[test]
fn test_is_row_full() {
    let grid = cross();
    assert!(!grid.is_row_full(2));
    assert!(grid.is_row_full(3));
    assert!(!grid.is_row_full(4));
    assert!(!grid.is_row_full(-1));
}

#[test]
fn test_validity() {
    let grid = cross();
    assert!(grid.is_valid_row(2));
    assert!(!grid.is_valid_row(-1));
    assert!(!grid.is_valid_row(7));

    assert!(grid.is_valid_cell(2, 2));
    assert!(!grid.is_valid_cell(2, -1));
    assert!(!grid.is_valid_cell(2, 7));
    assert!(!grid.is_valid_cell(7, 2));
    assert!(!grid.is_valid_cell(-1, 2));
}

#[test]
fn test_display_top_row_first() {
    assert_eq!(
        cross().to_string(),
        ".....\n.....\n..X..\nXXXXX\n..X..\n.....\n.....\n"
    );
}

proptest! {
    #[test]
    fn put_then_get_in_bounds(x in 0i32..10, y in 0i32..20) {
        let mut grid = Grid::new(10, 20);
        prop_assert_eq!(grid.put(x, y, BLOCK), Some(BLOCK));
        prop_assert_eq!(grid.get(x, y), Some(BLOCK));
        prop_assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored(x in -50i32..50, y in -50i32..50) {
        prop_assume!(!(0..10).contains(&x) || !(0..20).contains(&y));
        let mut grid = Grid::new(10, 20);
        prop_assert_eq!(grid.put(x, y, BLOCK), None);
        prop_assert_eq!(grid.remove(x, y), None);
        prop_assert!(grid.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn remove_row_moves_each_cell_down(
        occupied in proptest::collection::vec((0i32..6, 0i32..8), 0..30),
        row in 0i32..8,
    ) {
        let mut grid = Grid::new(6, 8);
        for &(x, y) in &occupied {
            grid.put(x, y, BLOCK);
        }
        let before: Vec<_> = (0..8)
            .map(|y| (0..6).map(|x| grid.get(x, y).is_some()).collect::<Vec<_>>())
            .collect();

        prop_assert!(grid.remove_row(row));

        for y in 0..8 {
            for x in 0..6 {
                let expected = if y < row {
                    before[y as usize][x as usize]
                } else if y < 7 {
                    before[y as usize + 1][x as usize]
                } else {
                    false
                };
                prop_assert_eq!(grid.get(x, y).is_some(), expected);
            }
        }
    }
}
