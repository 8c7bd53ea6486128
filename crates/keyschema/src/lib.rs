// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! Encoding of the logical index relations as ordered composite keys. Pure,
//! no I/O — this crate only knows how to turn `blobidx-core` identifiers
//! into byte keys and scan ranges, and back.
//!
//! The tag families:
//!
//! - `found|<ref>` → `<location>`
//! - `last` → `<location>`
//! - `parent|<child>|<parent>` → ∅, keyed by the child so a range over
//!   `<child>` yields the blobs that reference it
//! - `missing|<unknown>|<needer>` → ∅
//! - `type|<kind>|<ref>` → ∅
//! - `mime|<mimetype>|<ref>` → ∅

pub mod codec;

use blobidx_core::BlobRef;

const TAG_FOUND: &str = "found";
const TAG_LAST: &str = "last";
const TAG_PARENT: &str = "parent";
const TAG_MISSING: &str = "missing";
const TAG_TYPE: &str = "type";
const TAG_MIME: &str = "mime";

pub type KeyRange = (Vec<u8>, Vec<u8>);

pub fn found_key(r: &BlobRef) -> Vec<u8> {
	codec::encode(TAG_FOUND, &[r.as_str()])
}

/// Range covering every `found|*` entry, for `Stats`' full-table scan.
pub fn found_all_range() -> KeyRange {
	codec::prefix_range(TAG_FOUND, &[])
}

pub fn decode_found_ref(key: &[u8]) -> BlobRef {
	BlobRef::from(codec::split_fields(key, TAG_FOUND)[0])
}

pub fn last_key() -> Vec<u8> {
	codec::encode(TAG_LAST, &[])
}

pub fn parent_key(child: &BlobRef, parent: &BlobRef) -> Vec<u8> {
	codec::encode(TAG_PARENT, &[child.as_str(), parent.as_str()])
}

/// `[start, limit)` over every `parent|<child>|*` entry: the blobs that
/// reference `child`.
pub fn parent_range(child: &BlobRef) -> KeyRange {
	codec::prefix_range(TAG_PARENT, &[child.as_str()])
}

pub fn parent_all_range() -> KeyRange {
	codec::prefix_range(TAG_PARENT, &[])
}

pub fn decode_parent_needer(key: &[u8]) -> BlobRef {
	let fields = codec::split_fields(key, TAG_PARENT);
	BlobRef::from(fields[1])
}

pub fn missing_key(unknown: &BlobRef, needer: &BlobRef) -> Vec<u8> {
	codec::encode(TAG_MISSING, &[unknown.as_str(), needer.as_str()])
}

/// `[start, limit)` over every `missing|<unknown>|*` entry: every needer
/// still waiting on `unknown`. Used by `Place` to clear pending entries.
pub fn missing_range(unknown: &BlobRef) -> KeyRange {
	codec::prefix_range(TAG_MISSING, &[unknown.as_str()])
}

/// `[start, limit)` over the entire `missing|*` relation, for `Missing()`.
pub fn missing_all_range() -> KeyRange {
	codec::prefix_range(TAG_MISSING, &[])
}

pub fn decode_missing_unknown(key: &[u8]) -> BlobRef {
	let fields = codec::split_fields(key, TAG_MISSING);
	BlobRef::from(fields[0])
}

pub fn decode_missing_needer(key: &[u8]) -> BlobRef {
	let fields = codec::split_fields(key, TAG_MISSING);
	BlobRef::from(fields[1])
}

pub fn type_key(kind: &str, r: &BlobRef) -> Vec<u8> {
	codec::encode(TAG_TYPE, &[kind, r.as_str()])
}

/// `[start, limit)` over `type|<kind>|*`, or over the whole `type|*`
/// relation when `kind` is empty (per `List("")`'s contract).
pub fn type_range(kind: &str) -> KeyRange {
	if kind.is_empty() {
		codec::prefix_range(TAG_TYPE, &[])
	} else {
		codec::prefix_range(TAG_TYPE, &[kind])
	}
}

pub fn decode_type_ref(key: &[u8]) -> BlobRef {
	let fields = codec::split_fields(key, TAG_TYPE);
	BlobRef::from(fields[fields.len() - 1])
}

pub fn decode_type_kind(key: &[u8]) -> String {
	let fields = codec::split_fields(key, TAG_TYPE);
	fields[0].to_string()
}

pub fn mime_key(mime: &str, r: &BlobRef) -> Vec<u8> {
	codec::encode(TAG_MIME, &[mime, r.as_str()])
}

pub fn mime_range(mime: &str) -> KeyRange {
	if mime.is_empty() {
		codec::prefix_range(TAG_MIME, &[])
	} else {
		codec::prefix_range(TAG_MIME, &[mime])
	}
}

pub fn decode_mime_kind(key: &[u8]) -> String {
	let fields = codec::split_fields(key, TAG_MIME);
	fields[0].to_string()
}
