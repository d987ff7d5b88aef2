use std::collections::HashMap;

/// Dense integer identifier of a symbol.
pub type SymbolId = usize;

/// Identifier reserved for the implicit root symbol.
pub const ROOT_ID: SymbolId = 0;

/// Text of the implicit root symbol.
pub const ROOT_SYMBOL: &str = "<R>";

/// Text registered for the out-of-vocabulary fallback symbol.
pub const OOV_SYMBOL: &str = "<OOV>";

/// Bidirectional mapping between symbols and dense ids.
///
/// A symbol can be a letter, a word or a whole sentence: the vocabulary
/// only sees opaque strings.
///
/// # Invariants
/// - Id `0` is always the root symbol, so `size() >= 1`
/// - Every id in `[0, size)` maps to exactly one symbol
/// - Ids are never reused nor reassigned
#[derive(Clone, Debug)]
pub struct Vocabulary {
	/// Symbols indexed by their id.
	symbols: Vec<String>,
	/// Reverse lookup table.
	symbol_map: HashMap<String, SymbolId>,
	/// Lazily assigned on the first unknown lookup.
	oov_id: Option<SymbolId>,
}

impl Default for Vocabulary {
	fn default() -> Self {
		Self::new()
	}
}

impl Vocabulary {
	/// Creates a vocabulary holding only the root symbol.
	pub fn new() -> Self {
		let mut symbol_map = HashMap::new();
		symbol_map.insert(ROOT_SYMBOL.to_owned(), ROOT_ID);
		Self {
			symbols: vec![ROOT_SYMBOL.to_owned()],
			symbol_map,
			oov_id: None,
		}
	}

	/// Adds a symbol and returns its id.
	///
	/// Idempotent: a known symbol keeps its existing id.
	pub fn add_symbol(&mut self, symbol: &str) -> SymbolId {
		if let Some(&id) = self.symbol_map.get(symbol) {
			return id;
		}
		let id = self.symbols.len();
		self.symbol_map.insert(symbol.to_owned(), id);
		self.symbols.push(symbol.to_owned());
		id
	}

	/// Returns the id of a known symbol, or the OOV id.
	///
	/// The OOV id is registered the first time an unknown symbol is looked
	/// up and is shared by every unknown symbol afterwards.
	pub fn get_symbol_or_oov(&mut self, symbol: &str) -> SymbolId {
		if let Some(&id) = self.symbol_map.get(symbol) {
			return id;
		}
		match self.oov_id {
			Some(id) => id,
			None => {
				let id = self.add_symbol(OOV_SYMBOL);
				self.oov_id = Some(id);
				id
			}
		}
	}

	/// Non-mutating lookup.
	pub fn id_of(&self, symbol: &str) -> Option<SymbolId> {
		self.symbol_map.get(symbol).copied()
	}

	/// Returns the symbol registered under `id`.
	pub fn symbol(&self, id: SymbolId) -> Option<&str> {
		self.symbols.get(id).map(String::as_str)
	}

	/// Returns the OOV id if one was assigned already.
	pub fn oov_id(&self) -> Option<SymbolId> {
		self.oov_id
	}

	/// Number of registered symbols, root included.
	pub fn size(&self) -> usize {
		self.symbols.len()
	}

	/// Iterates over `(id, symbol)` pairs in id order.
	pub fn iter(&self) -> impl Iterator<Item=(SymbolId, &str)> {
		self.symbols.iter().enumerate().map(|(id, s)| (id, s.as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_root_is_preregistered() {
		let vocab = Vocabulary::new();
		assert_eq!(vocab.size(), 1);
		assert_eq!(vocab.symbol(ROOT_ID), Some(ROOT_SYMBOL));
		assert_eq!(vocab.id_of(ROOT_SYMBOL), Some(ROOT_ID));
		assert_eq!(vocab.oov_id(), None);
	}

	#[test]
	fn test_add_symbol_is_idempotent() {
		let mut vocab = Vocabulary::new();
		let a = vocab.add_symbol("a");
		let b = vocab.add_symbol("b");
		assert_eq!((a, b), (1, 2));
		assert_eq!(vocab.add_symbol("a"), a);
		assert_eq!(vocab.size(), 3);
		assert_eq!(vocab.symbol(b), Some("b"));
	}

	#[test]
	fn test_oov_is_assigned_once() {
		let mut vocab = Vocabulary::new();
		vocab.add_symbol("hello");

		assert_eq!(vocab.get_symbol_or_oov("hello"), 1);

		let oov = vocab.get_symbol_or_oov("unknown");
		assert_eq!(oov, 2);
		assert_eq!(vocab.oov_id(), Some(oov));
		assert_eq!(vocab.symbol(oov), Some(OOV_SYMBOL));

		assert_eq!(vocab.get_symbol_or_oov("other"), oov);
		assert_eq!(vocab.get_symbol_or_oov("unknown"), oov);
		assert_eq!(vocab.size(), 3);

		// Ids stay stable after the OOV slot.
		assert_eq!(vocab.add_symbol("world"), 3);
		assert_eq!(vocab.get_symbol_or_oov("yet another"), oov);
	}
}
