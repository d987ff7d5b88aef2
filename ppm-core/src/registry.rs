use std::collections::HashMap;

use crate::error::{PpmError, PpmResult};
use crate::model::bundle::ModelBundle;

/// Session id used when a caller does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// Trained bundles keyed by an opaque session id.
///
/// The registry is a plain value: the transport layer owns it and hands
/// the right bundle to each request.
#[derive(Debug, Default)]
pub struct ModelRegistry {
	sessions: HashMap<String, ModelBundle>,
}

impl ModelRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `bundle` under `session`, returning the bundle it replaces.
	pub fn insert(&mut self, session: &str, bundle: ModelBundle) -> Option<ModelBundle> {
		self.sessions.insert(session.to_owned(), bundle)
	}

	/// # Errors
	/// Returns `UnknownSession` if nothing was trained under `session`.
	pub fn get(&self, session: &str) -> PpmResult<&ModelBundle> {
		self.sessions.get(session).ok_or_else(|| PpmError::UnknownSession(session.to_owned()))
	}

	/// # Errors
	/// Returns `UnknownSession` if nothing was trained under `session`.
	pub fn get_mut(&mut self, session: &str) -> PpmResult<&mut ModelBundle> {
		self.sessions.get_mut(session).ok_or_else(|| PpmError::UnknownSession(session.to_owned()))
	}

	pub fn remove(&mut self, session: &str) -> Option<ModelBundle> {
		self.sessions.remove(session)
	}

	/// Sorted session ids.
	pub fn session_ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.sessions.keys().cloned().collect();
		ids.sort();
		ids
	}

	pub fn len(&self) -> usize {
		self.sessions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sessions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tokenizer::Level;

	#[test]
	fn test_sessions_are_isolated() {
		let mut registry = ModelRegistry::new();
		assert!(registry.is_empty());

		registry.insert("b", ModelBundle::train("one two", 2).unwrap());
		registry.insert(DEFAULT_SESSION, ModelBundle::train("three four", 2).unwrap());
		assert_eq!(registry.session_ids(), vec!["b", "default"]);

		let words = registry.get("b").unwrap().model(Level::Word).unwrap();
		assert_eq!(words.vocabulary().id_of("one"), Some(1));
		assert_eq!(words.vocabulary().id_of("three"), None);

		assert!(matches!(registry.get("missing"), Err(PpmError::UnknownSession(_))));
	}

	#[test]
	fn test_insert_replaces_and_remove() {
		let mut registry = ModelRegistry::new();
		assert!(registry.insert("s", ModelBundle::train("a", 2).unwrap()).is_none());
		let old = registry.insert("s", ModelBundle::train("b c", 3).unwrap()).unwrap();
		assert_eq!(old.max_order(), 2);
		assert_eq!(registry.get_mut("s").unwrap().max_order(), 3);
		assert_eq!(registry.len(), 1);

		assert!(registry.remove("s").is_some());
		assert!(registry.remove("s").is_none());
		assert!(registry.is_empty());
	}
}
