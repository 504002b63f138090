//! # Error Types

/// Errors from tokencost operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenCostError {
    /// A merged symbol has no vocabulary id.
    ///
    /// Indicates a corrupt or incompatible vocabulary table;
    /// fatal to the single call that hit it.
    #[error("vocabulary mismatch: symbol {symbol:?} has no token id")]
    VocabularyMismatch {
        /// The symbol (in byte-symbol form) that failed lookup.
        symbol: String,
    },

    /// A token id outside the known vocabulary was passed to decode.
    #[error("unknown token id: {id}")]
    UnknownTokenId {
        /// The offending id.
        id: u64,
    },

    /// The engine pool could not construct a usable engine.
    #[error("engine init failed: {0}")]
    EngineInitFailed(String),

    /// A character with no entry in the byte/symbol table.
    #[error("unknown byte symbol: {0:?}")]
    UnknownSymbol(char),

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Malformed line in a merge-rules file.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,

        /// What went wrong.
        message: String,
    },

    /// Pattern compilation failure.
    #[error("regex error: {0}")]
    Regex(String),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for tokencost operations.
pub type TCResult<T> = core::result::Result<T, TokenCostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TokenCostError::UnknownTokenId { id: 70000 }.to_string(),
            "unknown token id: 70000"
        );
        assert_eq!(
            TokenCostError::VocabularyMismatch {
                symbol: "Ġfoo".to_string()
            }
            .to_string(),
            "vocabulary mismatch: symbol \"Ġfoo\" has no token id"
        );
        assert_eq!(
            TokenCostError::Parse {
                line: 3,
                message: "expected two symbols".to_string()
            }
            .to_string(),
            "parse error at line 3: expected two symbols"
        );
    }
}
