use super::context::Context;
use super::node::{ExclusionMask, NodeId, Trie};
use super::vocabulary::{ROOT_ID, SymbolId, Vocabulary};
use crate::error::{PpmError, PpmResult};

/// Prediction-by-partial-matching language model over symbol ids.
///
/// The `PpmModel` owns a context trie whose nodes carry, besides their
/// children, a backoff link to the same symbol one order lower. Training
/// grows the trie incrementally; the model is never rebuilt.
///
/// # Responsibilities
/// - Grow the trie and its counts from a stream of symbols (`train_insert`)
/// - Move a cursor through the trie without mutating it (`advance`)
/// - Blend children counts along the backoff chain into a distribution
///
/// # Invariants
/// - The vocabulary holds at least one symbol besides the root
/// - Nodes and counts only ever grow
/// - Following backoff links from a node of order `k` reaches the root in `k` steps
#[derive(Clone, Debug)]
pub struct PpmModel {
	vocabulary: Vocabulary,
	trie: Trie,
	max_order: usize,
}

impl PpmModel {
	/// Creates an empty model bound to `vocabulary`.
	///
	/// # Errors
	/// Returns `DegenerateVocabulary` if the vocabulary only holds the root.
	pub fn new(vocabulary: Vocabulary, max_order: usize) -> PpmResult<Self> {
		if vocabulary.size() <= 1 {
			return Err(PpmError::DegenerateVocabulary { size: vocabulary.size() });
		}
		Ok(Self { vocabulary, trie: Trie::new(), max_order })
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Mutable access, needed to map unknown query symbols to the OOV id.
	pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
		&mut self.vocabulary
	}

	pub fn trie(&self) -> &Trie {
		&self.trie
	}

	/// Longest context kept by the training cursor.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Number of trie nodes, root included.
	pub fn num_nodes(&self) -> usize {
		self.trie.len()
	}

	/// Returns a fresh cursor on the root.
	pub fn create_context(&self) -> Context {
		Context::root()
	}

	/// Feeds one training symbol through `context`.
	///
	/// The child for `symbol` under the context head is incremented, or
	/// created along with the missing lower-order nodes of its backoff
	/// chain. The cursor then moves onto it and walks back down its backoff
	/// chain until its order fits `max_order`.
	///
	/// The root id is ignored.
	///
	/// # Errors
	/// - `SymbolOutOfRange` if `symbol` is not registered in the vocabulary
	/// - `MissingBackoff` if the trie is corrupted
	pub fn train_insert(&mut self, context: &mut Context, symbol: SymbolId) -> PpmResult<()> {
		if symbol == ROOT_ID {
			return Ok(());
		}
		if symbol >= self.vocabulary.size() {
			return Err(PpmError::SymbolOutOfRange { symbol, size: self.vocabulary.size() });
		}

		let node = self.add_symbol_to_node(context.head, symbol)?;
		debug_assert_eq!(self.trie.find_child(context.head, symbol), Some(node));
		context.head = node;
		context.order += 1;

		while context.order > self.max_order {
			context.head = self
				.trie
				.node(context.head)
				.backoff()
				.ok_or(PpmError::MissingBackoff { node: context.head })?;
			context.order -= 1;
		}
		Ok(())
	}

	/// Insert-or-increment of `symbol` under `node`.
	///
	/// Walks down the backoff chain until a node already has a child for
	/// `symbol` (or the root is reached), increments or creates that child,
	/// then creates the missing nodes on the way back up, each one backing
	/// off to the node created or found one order below it.
	fn add_symbol_to_node(&mut self, node: NodeId, symbol: SymbolId) -> PpmResult<NodeId> {
		// Nodes lacking a child for `symbol`, highest order first.
		let mut missing = Vec::new();
		let mut current = node;
		let mut lower = loop {
			if let Some(child) = self.trie.find_child(current, symbol) {
				self.trie.increment(child);
				break child;
			}
			if current == Trie::ROOT {
				break self.trie.push_child(Trie::ROOT, symbol, Trie::ROOT);
			}
			missing.push(current);
			current = self.trie.node(current).backoff().ok_or(PpmError::MissingBackoff { node: current })?;
		};

		for &parent in missing.iter().rev() {
			lower = self.trie.push_child(parent, symbol, lower);
		}
		Ok(lower)
	}

	/// Moves `context` onto `symbol` without touching the trie.
	///
	/// When the head has no child for `symbol`, the cursor backs off one
	/// order at a time and retries. If no node of the chain knows the
	/// symbol, the cursor is reset to the root. The root id is ignored.
	pub fn advance(&self, context: &mut Context, symbol: SymbolId) {
		if symbol == ROOT_ID {
			return;
		}

		let mut head = Some(context.head);
		while let Some(node) = head {
			if let Some(child) = self.trie.find_child(node, symbol) {
				context.head = child;
				context.order += 1;
				return;
			}
			head = self.trie.node(node).backoff();
			context.order = context.order.saturating_sub(1);
		}
		context.reset();
	}

	/// Probability of every symbol id following `context`.
	///
	/// The returned vector is indexed by symbol id and sized to the
	/// vocabulary. It may sum to less than 1.0 (see
	/// [`probabilities_with_exclusion`](Self::probabilities_with_exclusion)).
	pub fn probabilities(&self, context: &Context) -> Vec<f64> {
		self.probabilities_with_exclusion(context, None)
	}

	/// Blends children counts along the backoff chain of `context`.
	///
	/// Each node of the chain hands the mass it received to its children,
	/// proportionally to their counts. A node with children consumes all of
	/// it; a childless node passes it on unchanged. Mass left when the chain
	/// ends is dropped, so the result sums to less than 1.0 when no node of
	/// the chain has children.
	///
	/// Masked symbols are left out of both the totals and the distribution.
	pub fn probabilities_with_exclusion(&self, context: &Context, exclusion: Option<&ExclusionMask>) -> Vec<f64> {
		let mut probs = vec![0.0; self.vocabulary.size()];
		let mut remaining = 1.0_f64;

		let mut head = Some(context.head);
		while let Some(node) = head {
			let total = self.trie.total_child_count(node, exclusion);
			if total > 0 {
				let share = remaining;
				for &child in self.trie.node(node).children() {
					let child = self.trie.node(child);
					if exclusion.is_some_and(|mask| mask.contains(&child.symbol())) {
						continue;
					}
					let p = share * child.count() as f64 / total as f64;
					probs[child.symbol()] += p;
					remaining -= p;
				}
				// Rounding must not hand a negative share to lower orders.
				remaining = remaining.max(0.0);
			}
			head = self.trie.node(node).backoff();
		}

		probs
	}
}
