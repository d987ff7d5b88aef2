use std::collections::HashSet;

use super::vocabulary::{ROOT_ID, SymbolId};

/// Index of a node inside a [`Trie`] arena.
pub type NodeId = usize;

/// Symbols skipped when tallying child counts.
pub type ExclusionMask = HashSet<SymbolId>;

/// One `(context, symbol)` pair of the context trie.
///
/// Children are owned by index through the arena. The backoff link is a
/// plain index to the node holding the same symbol one order lower; it is
/// `None` only for the root.
///
/// ## Invariants
/// - `count >= 1`
/// - At most one child per symbol
/// - `backoff` always points to a node that existed before this one
#[derive(Clone, Debug)]
pub struct Node {
	symbol: SymbolId,
	count: u64,
	children: Vec<NodeId>,
	backoff: Option<NodeId>,
}

impl Node {
	fn new(symbol: SymbolId, backoff: Option<NodeId>) -> Self {
		Self { symbol, count: 1, children: Vec::new(), backoff }
	}

	/// Symbol id represented by this node.
	pub fn symbol(&self) -> SymbolId {
		self.symbol
	}

	/// Number of times this node was reached while training.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Arena indices of the children, in creation order.
	pub fn children(&self) -> &[NodeId] {
		&self.children
	}

	/// Node for the same symbol one order lower, `None` for the root.
	pub fn backoff(&self) -> Option<NodeId> {
		self.backoff
	}
}

/// Arena holding every node of a context trie.
///
/// Nodes are only ever appended, so a `NodeId` stays valid for the
/// lifetime of the trie. Index `0` is the root.
#[derive(Clone, Debug)]
pub struct Trie {
	nodes: Vec<Node>,
}

impl Default for Trie {
	fn default() -> Self {
		Self::new()
	}
}

impl Trie {
	/// Arena index of the root node.
	pub const ROOT: NodeId = 0;

	/// Creates a trie holding only the root.
	pub fn new() -> Self {
		Self { nodes: vec![Node::new(ROOT_ID, None)] }
	}

	/// Borrows a node.
	///
	/// # Panics
	/// Panics if `id` was not produced by this trie.
	pub fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id]
	}

	/// Number of nodes, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// A trie always holds its root, so this is never `true`.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Linear scan of the children of `id` for `symbol`.
	pub fn find_child(&self, id: NodeId, symbol: SymbolId) -> Option<NodeId> {
		self.nodes[id]
			.children
			.iter()
			.copied()
			.find(|&child| self.nodes[child].symbol == symbol)
	}

	/// Sum of the children counts of `id`, skipping masked symbols.
	pub fn total_child_count(&self, id: NodeId, exclusion: Option<&ExclusionMask>) -> u64 {
		self.nodes[id]
			.children
			.iter()
			.map(|&child| &self.nodes[child])
			.filter(|child| exclusion.is_none_or(|mask| !mask.contains(&child.symbol)))
			.map(|child| child.count)
			.sum()
	}

	/// Appends a new child with a count of 1.
	pub(crate) fn push_child(&mut self, parent: NodeId, symbol: SymbolId, backoff: NodeId) -> NodeId {
		let id = self.nodes.len();
		self.nodes.push(Node::new(symbol, Some(backoff)));
		self.nodes[parent].children.push(id);
		id
	}

	pub(crate) fn increment(&mut self, id: NodeId) {
		self.nodes[id].count += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_trie_has_root_only() {
		let trie = Trie::new();
		assert_eq!(trie.len(), 1);
		let root = trie.node(Trie::ROOT);
		assert_eq!(root.symbol(), ROOT_ID);
		assert_eq!(root.backoff(), None);
		assert!(root.children().is_empty());
		assert_eq!(trie.total_child_count(Trie::ROOT, None), 0);
	}

	#[test]
	fn test_find_child_and_counts() {
		let mut trie = Trie::new();
		let a = trie.push_child(Trie::ROOT, 1, Trie::ROOT);
		let b = trie.push_child(Trie::ROOT, 2, Trie::ROOT);
		trie.increment(a);
		trie.increment(a);

		assert_eq!(trie.find_child(Trie::ROOT, 1), Some(a));
		assert_eq!(trie.find_child(Trie::ROOT, 2), Some(b));
		assert_eq!(trie.find_child(Trie::ROOT, 3), None);
		assert_eq!(trie.find_child(a, 1), None);

		assert_eq!(trie.node(a).count(), 3);
		assert_eq!(trie.node(b).count(), 1);
		assert_eq!(trie.node(b).backoff(), Some(Trie::ROOT));
		assert_eq!(trie.total_child_count(Trie::ROOT, None), 4);
	}

	#[test]
	fn test_exclusion_mask() {
		let mut trie = Trie::new();
		let a = trie.push_child(Trie::ROOT, 1, Trie::ROOT);
		trie.push_child(Trie::ROOT, 2, Trie::ROOT);
		trie.increment(a);

		let mask: ExclusionMask = [1].into_iter().collect();
		assert_eq!(trie.total_child_count(Trie::ROOT, Some(&mask)), 1);

		let empty = ExclusionMask::new();
		assert_eq!(trie.total_child_count(Trie::ROOT, Some(&empty)), 3);
	}
}
