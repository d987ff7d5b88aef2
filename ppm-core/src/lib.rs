//! Prediction-by-partial-matching language modelling library.
//!
//! This crate provides an incrementally trained PPM context model including:
//! - A symbol vocabulary with a lazily assigned out-of-vocabulary id
//! - A context trie stored in an arena, with backoff links between orders
//! - Training, cursor advance and probability blending over the trie
//! - Letter, word and sentence tokenization with one model per level
//! - A session registry, prediction ranking and sampling generation

/// Error type shared by every module.
pub mod error;

/// Core PPM model and everything built on top of it.
///
/// Vocabulary, trie, cursor and model form the algorithmic core; bundles,
/// ranking and generation are thin layers over the model.
pub mod model;

/// Session id → trained bundle map owned by the transport layer.
pub mod registry;

/// Text to symbol splitting policy.
pub mod tokenizer;

/// File helpers used to load training text.
pub mod io;
