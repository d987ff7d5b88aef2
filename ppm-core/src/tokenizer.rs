use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PpmError;

/// Granularity at which text is turned into symbols.
///
/// A trained model is only meaningful for the level it was trained at.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Letter,
	Word,
	Sentence,
}

impl Level {
	/// Every level, in training order.
	pub const ALL: [Level; 3] = [Level::Letter, Level::Word, Level::Sentence];

	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Letter => "letter",
			Level::Word => "word",
			Level::Sentence => "sentence",
		}
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Level {
	type Err = PpmError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"letter" => Ok(Level::Letter),
			"word" => Ok(Level::Word),
			"sentence" => Ok(Level::Sentence),
			_ => Err(PpmError::InvalidLevel(s.to_owned())),
		}
	}
}

/// Splits `text` into symbols for `level`.
///
/// - `Letter`: every character, whitespace included
/// - `Word`: runs of non-whitespace
/// - `Sentence`: pieces between runs of `.`, `!` or `?`, trimmed
///
/// Empty pieces are dropped.
pub fn tokenize(text: &str, level: Level) -> Vec<String> {
	match level {
		Level::Letter => text.chars().map(String::from).collect(),
		Level::Word => text.split_whitespace().map(str::to_owned).collect(),
		Level::Sentence => text
			.split(['.', '!', '?'])
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::to_owned)
			.collect(),
	}
}
