//! # Error Types

use crate::tokenizer::Level;

/// Errors from PPM model operations.
///
/// Invariant violations (`DegenerateVocabulary`, `SymbolOutOfRange`,
/// `MissingBackoff`) signal a programming error in the caller or a corrupted
/// trie. The remaining variants are user-facing lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum PpmError {
	/// A model needs at least one symbol besides the root.
	#[error("expecting at least two symbols in the vocabulary, got {size}")]
	DegenerateVocabulary {
		/// The vocabulary size, root included.
		size: usize,
	},

	/// Symbol id is not registered in the model vocabulary.
	#[error("invalid symbol: {symbol} (vocabulary size {size})")]
	SymbolOutOfRange {
		/// The rejected symbol id.
		symbol: usize,
		/// The vocabulary size at the time of the call.
		size: usize,
	},

	/// A non-root node has no backoff link.
	#[error("expected valid backoff node for node {node}")]
	MissingBackoff {
		/// Arena index of the broken node.
		node: usize,
	},

	/// Granularity name is not one of `letter`, `word`, `sentence`.
	#[error("invalid level specified: {0}")]
	InvalidLevel(String),

	/// No bundle is registered under this session id.
	#[error("unknown session: {0}")]
	UnknownSession(String),

	/// The bundle has no model for this level.
	#[error("model for level \"{0}\" is not trained yet")]
	LevelNotTrained(Level),
}

impl PpmError {
	/// Returns `true` for errors that indicate a broken caller or trie
	/// rather than bad user input.
	pub fn is_invariant_violation(&self) -> bool {
		matches!(
			self,
			PpmError::DegenerateVocabulary { .. }
				| PpmError::SymbolOutOfRange { .. }
				| PpmError::MissingBackoff { .. }
		)
	}
}

/// Result type for PPM operations.
pub type PpmResult<T> = Result<T, PpmError>;
