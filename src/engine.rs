//! Grid Engine: the plus-shaped toggle rule and click-coalescing move counter.
//!
//! Both pieces are independent: the counter never looks at the grid and the
//! toggle never looks at the counter. A session drives them together, one
//! counter update followed by one `apply_click` per player click.

use crate::types::{CellPos, Grid};

/// Center plus the four orthogonal neighbors. No diagonals, no wraparound.
const PLUS_OFFSETS: [(isize, isize); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// Flip the cell at (row, col). Out-of-bounds coordinates are ignored.
#[inline(always)]
pub fn toggle(grid: &mut Grid, row: isize, col: isize) {
    if grid.in_bounds(row, col) {
        let (r, c) = (row as usize, col as usize);
        let on = grid.is_on(r, c);
        grid.set(r, c, !on);
    }
}

/// Toggle the plus-shaped neighborhood around (row, col).
///
/// Each flip is bounds-checked on its own, so edge and corner clicks touch
/// only the neighbors that exist. Applying the same click twice restores the grid.
pub fn apply_click(grid: &mut Grid, row: isize, col: isize) {
    for &(dr, dc) in &PLUS_OFFSETS {
        toggle(grid, row + dr, col + dc);
    }
}

/// The most recently clicked cell and how many times in a row it was clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastClick {
    pub pos: CellPos,
    pub repeat: u32,
}

/// Move counter with click coalescing.
///
/// Repeated clicks on one cell alternate between counting and un-counting:
/// the 1st, 3rd, 5th... add a move, the 2nd, 4th... take one back (never below
/// zero). Clicking a different cell always counts and restarts the tracking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveCounter {
    moves: u32,
    last_click: Option<LastClick>,
}

impl MoveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click and return the updated move count.
    pub fn record(&mut self, pos: CellPos) -> u32 {
        match self.last_click.as_mut() {
            Some(last) if last.pos == pos => {
                last.repeat += 1;
                if last.repeat % 2 == 0 {
                    self.moves = self.moves.saturating_sub(1);
                } else {
                    self.moves += 1;
                }
            }
            _ => {
                self.last_click = Some(LastClick { pos, repeat: 1 });
                self.moves += 1;
            }
        }
        self.moves
    }

    pub fn reset(&mut self) {
        self.moves = 0;
        self.last_click = None;
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn last_click(&self) -> Option<LastClick> {
        self.last_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut lit = Vec::new();
        for row in 0..grid.size {
            for col in 0..grid.size {
                if grid.is_on(row, col) {
                    lit.push((row, col));
                }
            }
        }
        lit
    }

    #[test]
    fn test_toggle_flips_both_ways() {
        let mut g = Grid::new(3);
        toggle(&mut g, 1, 1);
        assert!(g.is_on(1, 1));
        toggle(&mut g, 1, 1);
        assert!(!g.is_on(1, 1));
    }

    #[test]
    fn test_toggle_out_of_bounds_is_noop() {
        let mut g = Grid::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let before = g.clone();
        for &(r, c) in &[(-1, 0), (0, -1), (2, 0), (0, 2), (-5, 9), (isize::MIN, isize::MAX)] {
            toggle(&mut g, r, c);
        }
        assert_eq!(g, before);
    }

    #[test]
    fn test_apply_click_center() {
        let mut g = Grid::new(5);
        apply_click(&mut g, 2, 2);
        assert_eq!(lit_cells(&g), vec![(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_apply_click_corner_clips() {
        let mut g = Grid::new(5);
        apply_click(&mut g, 0, 0);
        assert_eq!(lit_cells(&g), vec![(0, 0), (0, 1), (1, 0)]);

        let mut g = Grid::new(5);
        apply_click(&mut g, 4, 4);
        assert_eq!(lit_cells(&g), vec![(3, 4), (4, 3), (4, 4)]);
    }

    #[test]
    fn test_apply_click_edge_no_wraparound() {
        let mut g = Grid::new(5);
        apply_click(&mut g, 2, 0);
        assert_eq!(lit_cells(&g), vec![(1, 0), (2, 0), (2, 1), (3, 0)]);
        assert!(!g.is_on(2, 4));
    }

    #[test]
    fn test_apply_click_twice_restores_every_cell() {
        let start = Grid::from_rows(vec![
            vec![1, 0, 1, 1],
            vec![0, 0, 1, 0],
            vec![1, 1, 0, 0],
            vec![0, 1, 0, 1],
        ])
        .unwrap();
        for row in 0..4 {
            for col in 0..4 {
                let mut g = start.clone();
                apply_click(&mut g, row, col);
                assert_ne!(g, start);
                apply_click(&mut g, row, col);
                assert_eq!(g, start, "click ({}, {}) is not self-inverse", row, col);
            }
        }
    }

    #[test]
    fn test_apply_click_on_one_by_one() {
        let mut g = Grid::new(1);
        apply_click(&mut g, 0, 0);
        assert_eq!(g.cells, vec![1]);
    }

    #[test]
    fn test_counter_same_cell_alternates() {
        let mut counter = MoveCounter::new();
        let center = CellPos::new(2, 2);
        let seq: Vec<u32> = (0..5).map(|_| counter.record(center)).collect();
        assert_eq!(seq, vec![1, 0, 1, 0, 1]);
        assert_eq!(counter.last_click().map(|l| l.repeat), Some(5));
    }

    #[test]
    fn test_counter_distinct_cells_always_count() {
        let mut counter = MoveCounter::new();
        let seq = vec![
            counter.record(CellPos::new(2, 2)),
            counter.record(CellPos::new(3, 3)),
            counter.record(CellPos::new(2, 2)),
        ];
        assert_eq!(seq, vec![1, 2, 3]);
        assert_eq!(
            counter.last_click(),
            Some(LastClick { pos: CellPos::new(2, 2), repeat: 1 })
        );
    }

    #[test]
    fn test_counter_uncount_after_other_cells() {
        let mut counter = MoveCounter::new();
        counter.record(CellPos::new(0, 0));
        counter.record(CellPos::new(1, 1));
        assert_eq!(counter.record(CellPos::new(1, 1)), 1);
        assert_eq!(counter.record(CellPos::new(1, 1)), 2);
    }

    #[test]
    fn test_counter_reset() {
        let mut counter = MoveCounter::new();
        counter.record(CellPos::new(0, 0));
        counter.record(CellPos::new(0, 1));
        counter.reset();
        assert_eq!(counter.moves(), 0);
        assert_eq!(counter.last_click(), None);
        assert_eq!(counter.record(CellPos::new(0, 1)), 1);
    }
}
