//! # Encode Results

use serde::{Deserialize, Serialize};

use crate::{
    errors::{TCResult, TokenCostError},
    types::TokenType,
    vocab::VocabularyTable,
};

/// Token ids parallel to their token texts.
///
/// Each token text is that token decoded on its own (``995`` is ``" world"``);
/// a token holding part of a multi-byte char decodes lossily, as ``U+FFFD``.
/// The vocabulary spelling (``"Ġworld"``) is available via [`Self::token_symbols`].
///
/// Serializes as ``{"bpe": [...], "text": [...]}``.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodeResult<T> {
    /// The token ids.
    #[serde(rename = "bpe")]
    pub ids: Vec<T>,

    /// The decoded text of each token.
    #[serde(rename = "text")]
    pub tokens: Vec<String>,
}

impl<T: Copy> EncodeResult<T> {
    /// Create an empty result with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Is this empty?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Append one token.
    pub fn push(
        &mut self,
        id: T,
        token: String,
    ) {
        self.ids.push(id);
        self.tokens.push(token);
    }

    /// Append all tokens of another result.
    pub fn extend_from(
        &mut self,
        other: &EncodeResult<T>,
    ) {
        self.ids.extend_from_slice(&other.ids);
        self.tokens.extend_from_slice(&other.tokens);
    }
}

impl<T: TokenType> EncodeResult<T> {
    /// Look up the vocabulary spelling of each token id.
    ///
    /// ## Returns
    /// `UnknownTokenId` for the first id not in `vocab`.
    pub fn token_symbols<'v>(
        &self,
        vocab: &'v VocabularyTable<T>,
    ) -> TCResult<Vec<&'v str>> {
        self.ids
            .iter()
            .map(|&id| {
                vocab.token_string(id).ok_or(TokenCostError::UnknownTokenId {
                    id: id.to_u64().unwrap_or(u64::MAX),
                })
            })
            .collect()
    }
}
