//! Top-level module for the PPM model.
//!
//! - Symbol ids (`Vocabulary`)
//! - The node arena (`Trie`, `Node`)
//! - The traversal cursor (`Context`)
//! - Training and inference (`PpmModel`)
//! - Per-level bundles, ranking and sampling on top of the model

/// Bidirectional symbol ↔ id mapping with an OOV fallback.
pub mod vocabulary;

/// Arena-backed context trie.
///
/// Children are owned by index; backoff links are plain indices into the
/// same arena.
pub mod node;

/// Mutable cursor over the trie.
pub mod context;

/// Incremental training, read-only advance and probability blending.
pub mod ppm_model;

/// One model per tokenization level, trained from the same text.
pub mod bundle;

/// Ranked, human-facing predictions.
pub mod prediction;

/// Weighted random sampling of continuations.
pub mod generator;
