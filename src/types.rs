//! Core data types for the Lights Out engine.
//!
//! Grids use flat `Vec` storage with row-major layout:
//! `cells[row * size + col]` maps to the level file's `grid[row][col]`.

use serde::Deserialize;

use crate::error::LevelError;

/// Coordinates of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Square matrix of binary cell states: 0 = off, 1 = on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<u8>,
}

impl Grid {
    /// A `size`×`size` grid with every light off.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a grid from nested rows, checking it is square and binary.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, LevelError> {
        let size = rows.len();
        if size == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(LevelError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, value) in values.into_iter().enumerate() {
                if value > 1 {
                    return Err(LevelError::InvalidCell { row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Self { size, cells })
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        self.cells[row * self.size + col] = on as u8;
    }

    #[inline(always)]
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == 1
    }

    /// Signed so that neighbors of edge cells can be tested without underflow.
    #[inline(always)]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Nested rows, in the same shape as the level file.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.size.max(1)).map(<[u8]>::to_vec).collect()
    }

    /// Number of lit cells.
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// True once every light is off.
    pub fn is_dark(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }
}

/// Level file layout as it arrives over the wire.
#[derive(Deserialize)]
struct LevelFile {
    grid: Vec<Vec<u8>>,
    target: u32,
}

/// A puzzle: the starting grid plus the advertised minimum move count.
///
/// `target` is shown to the player only; it is never checked against moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub target: u32,
}

impl Level {
    /// Parse a level from its JSON form: `{ "grid": [[0, 1, ...], ...], "target": n }`.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(text)?;
        Ok(Self {
            grid: Grid::from_rows(file.grid)?,
            target: file.target,
        })
    }
}
