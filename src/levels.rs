//! Where levels come from.
//!
//! The browser build normally fetches level files from the page's origin and
//! hands the text to the session. The built-in catalog below carries the same
//! files so the game can also start without a network round-trip.

use std::collections::HashMap;

use crate::error::LevelError;
use crate::types::Level;

/// Anything that can produce a level by id without waiting.
pub trait LevelSource {
    fn fetch(&self, id: &str) -> Result<Level, LevelError>;
}

const BUILTIN: [(&str, &str); 3] = [
    ("levels/level1.json", include_str!("../levels/level1.json")),
    ("levels/level2.json", include_str!("../levels/level2.json")),
    ("levels/level3.json", include_str!("../levels/level3.json")),
];

/// The level files shipped with the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedLevels;

impl EmbeddedLevels {
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|&(id, _)| id)
    }
}

impl LevelSource for EmbeddedLevels {
    fn fetch(&self, id: &str) -> Result<Level, LevelError> {
        let (_, text) = BUILTIN
            .iter()
            .find(|&&(key, _)| key == id)
            .ok_or_else(|| LevelError::UnknownLevel(id.to_string()))?;
        Level::from_json(text)
    }
}

/// Level files held in memory, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct MemoryLevels {
    files: HashMap<String, String>,
}

impl MemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, json: impl Into<String>) -> &mut Self {
        self.files.insert(id.into(), json.into());
        self
    }
}

impl LevelSource for MemoryLevels {
    fn fetch(&self, id: &str) -> Result<Level, LevelError> {
        let text = self
            .files
            .get(id)
            .ok_or_else(|| LevelError::UnknownLevel(id.to_string()))?;
        Level::from_json(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apply_click;
    use crate::types::Grid;

    #[test]
    fn test_builtin_levels_parse() {
        let source = EmbeddedLevels;
        for id in source.ids() {
            let level = source.fetch(id).unwrap();
            assert_eq!(level.grid.size, 5, "{} is not 5x5", id);
            assert!(!level.grid.is_dark(), "{} starts solved", id);
        }
    }

    #[test]
    fn test_builtin_targets_are_achievable() {
        // Each shipped level was built by pressing these cells on a dark board.
        let presses: [&[(isize, isize)]; 3] = [
            &[(2, 2), (0, 0), (4, 4)],
            &[(1, 1), (1, 3), (3, 1), (3, 3)],
            &[(0, 2), (2, 0), (2, 4), (4, 2), (2, 2)],
        ];
        for (id, cells) in EmbeddedLevels.ids().zip(presses) {
            let mut level = EmbeddedLevels.fetch(id).unwrap();
            assert_eq!(level.target as usize, cells.len());
            for &(r, c) in cells {
                apply_click(&mut level.grid, r, c);
            }
            assert_eq!(level.grid, Grid::new(5), "{} not solved by its presses", id);
        }
    }

    #[test]
    fn test_unknown_ids() {
        assert!(matches!(
            EmbeddedLevels.fetch("levels/level9.json"),
            Err(LevelError::UnknownLevel(_))
        ));
        assert!(matches!(
            MemoryLevels::new().fetch("x"),
            Err(LevelError::UnknownLevel(_))
        ));
    }

    #[test]
    fn test_memory_levels() {
        let mut source = MemoryLevels::new();
        source
            .insert("tiny", r#"{"grid": [[1]], "target": 1}"#)
            .insert("broken", r#"{"grid": [[1, 0]], "target": 1}"#);
        assert_eq!(source.fetch("tiny").unwrap().target, 1);
        assert!(matches!(
            source.fetch("broken"),
            Err(LevelError::NotSquare { .. })
        ));
    }
}
