use super::node::{NodeId, Trie};

/// Cursor over a context trie.
///
/// Holds the node standing for the active context and its order, i.e. how
/// many preceding symbols are currently remembered. A `Context` does not
/// borrow the model: it only stores an arena index, so many cursors can
/// walk the same frozen model side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
	pub(crate) head: NodeId,
	pub(crate) order: usize,
}

impl Default for Context {
	fn default() -> Self {
		Self::root()
	}
}

impl Context {
	/// Cursor on the root, order 0.
	pub fn root() -> Self {
		Self { head: Trie::ROOT, order: 0 }
	}

	/// Node currently representing the context.
	pub fn head(&self) -> NodeId {
		self.head
	}

	/// Number of remembered symbols.
	pub fn order(&self) -> usize {
		self.order
	}

	pub(crate) fn reset(&mut self) {
		*self = Self::root();
	}
}
