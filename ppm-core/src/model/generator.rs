use rand::Rng;

use super::context::Context;
use super::ppm_model::PpmModel;
use super::vocabulary::{ROOT_ID, SymbolId};
use crate::tokenizer::{Level, tokenize};

/// Draws the next symbol from the blended distribution of `context`.
///
/// The probability of selecting a symbol is proportional to its mass.
/// The root and OOV ids are never drawn.
///
/// Returns `None` if no symbol has a positive mass.
pub fn sample_next<R: Rng + ?Sized>(model: &PpmModel, context: &Context, rng: &mut R) -> Option<SymbolId> {
	let oov = model.vocabulary().oov_id();
	let candidates: Vec<(SymbolId, f64)> = model
		.probabilities(context)
		.into_iter()
		.enumerate()
		.filter(|&(id, p)| id != ROOT_ID && Some(id) != oov && p > 0.0)
		.collect();

	let total: f64 = candidates.iter().map(|(_, p)| p).sum();
	if candidates.is_empty() || total <= 0.0 {
		return None;
	}

	// Cumulative subtraction to select a bucket
	let mut r = rng.random_range(0.0..total);
	for &(id, p) in &candidates {
		if r < p {
			return Some(id);
		}
		r -= p;
	}

	// Rounding may leave `r` just past the last bucket.
	candidates.last().map(|&(id, _)| id)
}

/// Generates up to `length` symbols following `seed`.
///
/// The seed is consumed like a prediction query (unknown tokens fall back
/// through the backoff chain), then each drawn symbol advances the
/// cursor. Generation stops early when the distribution is empty.
pub fn generate<R: Rng + ?Sized>(
	model: &PpmModel,
	level: Level,
	seed: &str,
	length: usize,
	rng: &mut R,
) -> Vec<String> {
	let mut context = model.create_context();
	for token in tokenize(seed, level) {
		// An unknown token misses every node of the chain, which resets the cursor.
		match model.vocabulary().id_of(&token) {
			Some(id) => model.advance(&mut context, id),
			None => context = model.create_context(),
		}
	}

	let mut symbols = Vec::new();
	for _ in 0..length {
		let Some(id) = sample_next(model, &context, rng) else {
			break;
		};
		model.advance(&mut context, id);
		if let Some(symbol) = model.vocabulary().symbol(id) {
			symbols.push(symbol.to_owned());
		}
	}
	symbols
}

/// Joins generated symbols back into text for `level`.
pub fn join_symbols(level: Level, symbols: &[String]) -> String {
	match level {
		Level::Letter => symbols.concat(),
		Level::Word => symbols.join(" "),
		Level::Sentence => symbols.join(". "),
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::bundle::ModelBundle;
	use crate::model::vocabulary::Vocabulary;

	#[test]
	fn test_sample_deterministic_context() {
		let bundle = ModelBundle::train("ab", 2).unwrap();
		let model = bundle.model(Level::Letter).unwrap();
		let mut rng = StdRng::seed_from_u64(7);

		let mut context = model.create_context();
		model.advance(&mut context, 1);
		for _ in 0..20 {
			assert_eq!(sample_next(model, &context, &mut rng), Some(2));
		}
	}

	#[test]
	fn test_sample_untrained_model() {
		let mut vocab = Vocabulary::new();
		vocab.add_symbol("a");
		let model = PpmModel::new(vocab, 2).unwrap();
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(sample_next(&model, &model.create_context(), &mut rng), None);
		assert!(generate(&model, Level::Letter, "", 5, &mut rng).is_empty());
		// Stops as soon as the distribution runs dry, whatever the requested length.
		assert!(generate(&model, Level::Letter, "", usize::MAX, &mut rng).is_empty());
	}

	#[test]
	fn test_sample_follows_distribution() {
		let bundle = ModelBundle::train("aaab", 1).unwrap();
		let model = bundle.model(Level::Letter).unwrap();
		let mut rng = StdRng::seed_from_u64(42);

		let context = model.create_context();
		let draws = 4000;
		let a = (0..draws)
			.filter(|_| sample_next(model, &context, &mut rng) == Some(1))
			.count();
		let ratio = a as f64 / draws as f64;
		assert!((ratio - 2.0 / 3.0).abs() < 0.05, "ratio = {ratio}");
	}

	#[test]
	fn test_generate_follows_training_text() {
		let bundle = ModelBundle::train("the cat sat", 3).unwrap();
		let model = bundle.model(Level::Word).unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		let symbols = generate(model, Level::Word, "the", 1, &mut rng);
		assert_eq!(symbols, vec!["cat"]);
		assert_eq!(join_symbols(Level::Word, &["a".to_owned(), "b".to_owned()]), "a b");

		assert_eq!(join_symbols(Level::Letter, &["a".to_owned(), "b".to_owned()]), "ab");
		assert_eq!(join_symbols(Level::Sentence, &["A".to_owned(), "B".to_owned()]), "A. B");
	}
}
