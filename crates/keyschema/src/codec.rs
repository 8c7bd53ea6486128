// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! Low-level composite-key encoding.
//!
//! Keys are `<tag>` followed by zero or more `<field>`s joined by [`SEP`], a
//! delimiter byte that sorts lower than any field byte and higher than the
//! empty string. [`MIN`]/[`MAX`] sentinels bracket the last field of a
//! prefix scan so that `[start, limit)` enumerates exactly the entries
//! under that prefix. This module does no I/O; it is pure byte-slinging.
//!
//! Field values must not contain [`SEP`]. Refs, tokens and schema kinds are
//! known to be delimiter-free, so this is never validated at encode time —
//! a robust reimplementation that accepts untrusted field values should add
//! that check.

/// Delimiter joining tag and fields. Strictly between [`MIN`] and any byte
/// a ref/kind/token can contain (they are ASCII digits, letters, `-`, `_`).
pub const SEP: u8 = 0x01;
/// Sentinel lower than [`SEP`]; opens a half-open range at a prefix.
pub const MIN: u8 = 0x00;
/// Sentinel higher than any field byte; closes a half-open range at a prefix.
pub const MAX: u8 = 0xff;

/// Encodes `tag` followed by `fields`, each preceded by [`SEP`].
pub fn encode(tag: &str, fields: &[&str]) -> Vec<u8> {
	let mut out = Vec::with_capacity(tag.len() + fields.iter().map(|f| f.len() + 1).sum::<usize>());
	out.extend_from_slice(tag.as_bytes());
	for f in fields {
		out.push(SEP);
		out.extend_from_slice(f.as_bytes());
	}
	out
}

/// Returns the half-open `[start, limit)` range that enumerates exactly the
/// keys whose fields begin with `tag` + `fields`.
pub fn prefix_range(tag: &str, fields: &[&str]) -> (Vec<u8>, Vec<u8>) {
	let mut start = encode(tag, fields);
	let mut limit = start.clone();
	start.push(SEP);
	start.push(MIN);
	limit.push(SEP);
	limit.push(MAX);
	(start, limit)
}

/// Splits the field portion of an encoded key (everything after `tag` +
/// [`SEP`]) on [`SEP`], returning each field as a `&str`.
///
/// Panics (in debug) if `key` isn't valid UTF-8 once split — refs and kinds
/// are always ASCII, so this indicates a corrupted or foreign key.
pub fn split_fields<'a>(key: &'a [u8], tag: &str) -> Vec<&'a str> {
	let rest = &key[tag.len()..];
	let rest = if rest.first() == Some(&SEP) { &rest[1..] } else { rest };
	if rest.is_empty() {
		return Vec::new();
	}
	rest.split(|&b| b == SEP).map(|f| std::str::from_utf8(f).expect("non-utf8 key field")).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn encode_joins_with_separator() {
		let k = encode("found", &["sha1-abc"]);
		assert_eq!(k, b"found\x01sha1-abc");
	}

	#[test]
	fn encode_with_no_fields_is_bare_tag() {
		assert_eq!(encode("last", &[]), b"last");
	}

	#[test]
	fn prefix_range_brackets_with_sentinels() {
		let (start, limit) = prefix_range("missing", &["sha1-child"]);
		assert_eq!(start, b"missing\x01sha1-child\x01\x00");
		assert_eq!(limit, b"missing\x01sha1-child\x01\xff");
		assert!(start < limit);
	}

	#[test]
	fn a_concrete_key_falls_inside_its_prefix_range() {
		let (start, limit) = prefix_range("parent", &["sha1-child"]);
		let key = encode("parent", &["sha1-child", "sha1-parent"]);
		assert!(key.as_slice() >= start.as_slice());
		assert!(key.as_slice() < limit.as_slice());
	}

	#[test]
	fn split_fields_recovers_trailing_fields() {
		let key = encode("parent", &["sha1-child", "sha1-parent"]);
		assert_eq!(split_fields(&key, "parent"), vec!["sha1-child", "sha1-parent"]);
	}
}
