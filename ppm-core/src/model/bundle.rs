use std::collections::BTreeMap;

use super::ppm_model::PpmModel;
use super::vocabulary::Vocabulary;
use crate::error::{PpmError, PpmResult};
use crate::tokenizer::{Level, tokenize};

/// One PPM model per granularity, trained from the same text.
///
/// # Invariants
/// - Every model shares the same `max_order`
/// - A bundle holds at least one trained level
#[derive(Clone, Debug)]
pub struct ModelBundle {
	models: BTreeMap<Level, PpmModel>,
	max_order: usize,
}

impl ModelBundle {
	/// Trains every level on `text`.
	///
	/// For each level the vocabulary is built from the tokens in order of
	/// first occurrence, then the whole token stream is fed through a
	/// single training cursor. Levels yielding no token are skipped.
	///
	/// # Errors
	/// Returns `DegenerateVocabulary` if no level yields any token.
	pub fn train(text: &str, max_order: usize) -> PpmResult<Self> {
		let mut models = BTreeMap::new();

		for level in Level::ALL {
			let tokens = tokenize(text, level);
			if tokens.is_empty() {
				log::warn!("No {level} tokens in training text, skipping level");
				continue;
			}
			let model = Self::train_level(&tokens, max_order)?;
			log::debug!(
				"Trained {level} model: {} symbols, {} nodes",
				model.vocabulary().size(),
				model.num_nodes()
			);
			models.insert(level, model);
		}

		if models.is_empty() {
			return Err(PpmError::DegenerateVocabulary { size: 1 });
		}

		log::info!("Training complete for {} levels (max order {max_order})", models.len());
		Ok(Self { models, max_order })
	}

	fn train_level(tokens: &[String], max_order: usize) -> PpmResult<PpmModel> {
		let mut vocabulary = Vocabulary::new();
		let ids: Vec<_> = tokens.iter().map(|token| vocabulary.add_symbol(token)).collect();

		let mut model = PpmModel::new(vocabulary, max_order)?;
		let mut context = model.create_context();
		for id in ids {
			model.train_insert(&mut context, id)?;
		}
		Ok(model)
	}

	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Levels with a trained model.
	pub fn levels(&self) -> impl Iterator<Item=Level> + '_ {
		self.models.keys().copied()
	}

	/// # Errors
	/// Returns `LevelNotTrained` if the level was skipped.
	pub fn model(&self, level: Level) -> PpmResult<&PpmModel> {
		self.models.get(&level).ok_or(PpmError::LevelNotTrained(level))
	}

	/// # Errors
	/// Returns `LevelNotTrained` if the level was skipped.
	pub fn model_mut(&mut self, level: Level) -> PpmResult<&mut PpmModel> {
		self.models.get_mut(&level).ok_or(PpmError::LevelNotTrained(level))
	}

	/// Node count per level, 0 for a skipped level.
	pub fn node_counts(&self) -> BTreeMap<Level, usize> {
		Level::ALL
			.into_iter()
			.map(|level| (level, self.models.get(&level).map_or(0, PpmModel::num_nodes)))
			.collect()
	}
}
