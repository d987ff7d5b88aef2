use serde::{Deserialize, Serialize};

use super::ppm_model::PpmModel;
use super::vocabulary::{ROOT_ID, Vocabulary};
use crate::tokenizer::{Level, tokenize};

/// A candidate next symbol and its blended probability.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
	pub symbol: String,
	pub probability: f64,
}

/// Ranked predictions plus a perplexity-like summary of the distribution.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionReport {
	pub predictions: Vec<Prediction>,
	pub perplexity: f64,
}

/// Predicts the symbol following `input`.
///
/// The input is tokenized for `level`, unknown tokens are mapped to the
/// OOV id (registering it if needed), and a fresh context is advanced
/// through them before ranking the distribution.
pub fn predict_text(model: &mut PpmModel, level: Level, input: &str, limit: Option<usize>) -> PredictionReport {
	let ids: Vec<_> = tokenize(input, level)
		.iter()
		.map(|token| model.vocabulary_mut().get_symbol_or_oov(token))
		.collect();

	let mut context = model.create_context();
	for id in ids {
		model.advance(&mut context, id);
	}

	let probabilities = model.probabilities(&context);
	rank(model.vocabulary(), &probabilities, limit)
}

/// Turns a probability vector into a ranked, human-facing list.
///
/// - The root and OOV ids are left out
/// - Entries are sorted by descending probability, ties in id order
/// - `perplexity = exp(-Σ p·ln p)` over the kept entries with `p > 0`,
///   computed before truncation
/// - The list is truncated to `limit` when given
pub fn rank(vocabulary: &Vocabulary, probabilities: &[f64], limit: Option<usize>) -> PredictionReport {
	let oov = vocabulary.oov_id();
	let mut predictions: Vec<Prediction> = vocabulary
		.iter()
		.filter(|&(id, _)| id != ROOT_ID && Some(id) != oov)
		.map(|(id, symbol)| Prediction {
			symbol: symbol.to_owned(),
			probability: probabilities.get(id).copied().unwrap_or(0.0),
		})
		.collect();

	predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));

	let entropy: f64 = predictions
		.iter()
		.filter(|p| p.probability > 0.0)
		.map(|p| p.probability * p.probability.ln())
		.sum();
	let perplexity = (-entropy).exp();

	if let Some(limit) = limit {
		predictions.truncate(limit);
	}

	PredictionReport { predictions, perplexity }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::bundle::ModelBundle;

	const EPS: f64 = 1e-9;

	#[test]
	fn test_rank_filters_and_sorts() {
		let mut vocab = Vocabulary::new();
		vocab.add_symbol("a");
		vocab.add_symbol("b");
		vocab.add_symbol("c");
		let oov = vocab.get_symbol_or_oov("zzz");

		let mut probs = vec![0.0; vocab.size()];
		probs[1] = 0.25;
		probs[2] = 0.5;
		probs[3] = 0.25;
		probs[oov] = 0.9;

		let report = rank(&vocab, &probs, None);
		let symbols: Vec<_> = report.predictions.iter().map(|p| p.symbol.as_str()).collect();
		assert_eq!(symbols, vec!["b", "a", "c"]);

		// exp(-(0.5 ln 0.5 + 2 * 0.25 ln 0.25)) = 2^1.5
		assert!((report.perplexity - 2f64.powf(1.5)).abs() < EPS);

		let truncated = rank(&vocab, &probs, Some(1));
		assert_eq!(truncated.predictions.len(), 1);
		assert_eq!(truncated.predictions[0].symbol, "b");
		assert!((truncated.perplexity - report.perplexity).abs() < EPS);
	}

	#[test]
	fn test_rank_of_certain_prediction() {
		let mut vocab = Vocabulary::new();
		vocab.add_symbol("x");
		let report = rank(&vocab, &[0.0, 1.0], Some(10));
		assert_eq!(report.predictions, vec![Prediction { symbol: "x".to_owned(), probability: 1.0 }]);
		assert!((report.perplexity - 1.0).abs() < EPS);
	}

	#[test]
	fn test_predict_text_letters() {
		let mut bundle = ModelBundle::train("abab abab", 3).unwrap();
		let model = bundle.model_mut(Level::Letter).unwrap();

		let report = predict_text(model, Level::Letter, "ab", Some(3));
		assert_eq!(report.predictions[0].symbol, "a");
		assert!(report.predictions[0].probability > 0.5);
		assert!(report.predictions.len() <= 3);
	}

	#[test]
	fn test_predict_text_with_unknown_words() {
		let mut bundle = ModelBundle::train("the cat sat on the mat", 2).unwrap();
		let model = bundle.model_mut(Level::Word).unwrap();
		let size = model.vocabulary().size();

		let report = predict_text(model, Level::Word, "a dog", None);
		// The OOV slot was registered but is never reported.
		assert_eq!(model.vocabulary().size(), size + 1);
		assert_eq!(report.predictions.len(), size - 1);
		assert!(report.predictions.iter().all(|p| p.symbol != "<OOV>"));

		// Fell back to the root: "the" is the most frequent word.
		assert_eq!(report.predictions[0].symbol, "the");
		let total: f64 = report.predictions.iter().map(|p| p.probability).sum();
		assert!((total - 1.0).abs() < EPS);
	}
}
