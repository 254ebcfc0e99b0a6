//! Errors raised while turning level data into a playable grid.
//!
//! Loading is the only fallible path in the crate. Clicks, toggles and
//! restarts are total over their inputs.

/// Why a level could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level grid has no rows")]
    EmptyGrid,

    #[error("level grid is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("invalid cell value {value} at ({row}, {col}); expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    /// The host could not retrieve the level (network error, HTTP status, ...).
    #[error("failed to fetch level: {0}")]
    Fetch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = LevelError::NotSquare { row: 2, len: 4, expected: 5 };
        assert_eq!(
            err.to_string(),
            "level grid is not square: row 2 has 4 cells, expected 5"
        );

        let err = LevelError::InvalidCell { row: 0, col: 3, value: 7 };
        assert!(err.to_string().contains("(0, 3)"));
    }

    #[test]
    fn test_parse_error_converts() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: LevelError = json_err.into();
        assert!(matches!(err, LevelError::Parse(_)));
    }
}
