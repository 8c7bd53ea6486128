// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! Shared identifiers and error types used across every `blobidx-*` crate.

mod error;

pub use error::Error;

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Content reference for a blob: the string form of its content hash.
///
/// `BlobRef` is opaque to this crate — it is never parsed or hashed here,
/// only compared, ordered and used as a key fragment. Callers that need to
/// verify a ref against blob bytes go through the blob source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlobRef(String);

impl BlobRef {
	pub fn new(s: impl Into<String>) -> Self {
		Self(s.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for BlobRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for BlobRef {
	fn from(s: String) -> Self {
		Self(s)
	}
}

impl From<&str> for BlobRef {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

impl AsRef<str> for BlobRef {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Opaque token identifying a blob's physical position in the blob source,
/// suitable for resuming a stream. Tokens are ordered only in the sense
/// that the blob source promises forward progress; `blobidx` never compares
/// them for anything but equality and storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
	pub fn new(s: impl Into<String>) -> Self {
		Self(s.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for Token {
	fn from(s: String) -> Self {
		Self(s)
	}
}

/// The schema kind carried by a blob, or `Data` for opaque (unparseable)
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
	/// Opaque data; no schema could be sniffed.
	Data,
	File,
	Bytes,
	Directory,
	StaticSet,
	/// Any schema kind the sniffer reports that isn't one of the above.
	Other(String),
}

impl Kind {
	/// The string stored in the `type|<kind>|<ref>` index key. `Data`
	/// maps to the empty string, matching `Place`'s "only if kind != ''"
	/// contract.
	pub fn as_index_str(&self) -> &str {
		match self {
			Kind::Data => "",
			Kind::File => "file",
			Kind::Bytes => "bytes",
			Kind::Directory => "directory",
			Kind::StaticSet => "static-set",
			Kind::Other(s) => s.as_str(),
		}
	}

	pub fn from_index_str(s: &str) -> Self {
		match s {
			"" => Kind::Data,
			"file" => Kind::File,
			"bytes" => Kind::Bytes,
			"directory" => Kind::Directory,
			"static-set" => Kind::StaticSet,
			other => Kind::Other(other.to_string()),
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_index_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_round_trips_through_index_str() {
		for k in [Kind::Data, Kind::File, Kind::Bytes, Kind::Directory, Kind::StaticSet, Kind::Other("weird".into())] {
			let s = k.as_index_str().to_string();
			assert_eq!(Kind::from_index_str(&s), k);
		}
	}

	#[test]
	fn blob_ref_displays_as_string() {
		let r = BlobRef::from("sha1-deadbeef");
		assert_eq!(r.to_string(), "sha1-deadbeef");
		assert_eq!(r.as_str(), "sha1-deadbeef");
	}
}
