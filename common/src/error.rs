use thiserror::Error;

/// Problems with the textual board handed to [`crate::Board::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A row whose width differs from the first row.
    #[error("inconsistent row width on line {line}: expected {expected}, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// A solve configuration the engine refuses to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_iterations must be positive")]
    ZeroIterations,
    #[error("score_memory_size must be positive")]
    ZeroMemory,
}
