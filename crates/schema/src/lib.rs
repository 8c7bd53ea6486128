// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! The schema sniffer adapter: given a ref and its raw body, either yields
//! a structured [`Schema`] descriptor (kind plus references to
//! dependencies) or reports the body as opaque data.
//!
//! The wire format of schema blobs is consumed through this adapter only;
//! nothing upstream needs to know it. [`JsonSchemaSniffer`] implements the
//! camlistore-style JSON encoding as a concrete default.

mod json;

pub use json::JsonSchemaSniffer;

use blobidx_core::BlobRef;

/// One element of a `file`/`bytes` schema's part list: a reference to a
/// data blob, a nested byte-container blob, or (rarely) neither.
#[derive(Debug, Clone, Default)]
pub struct Part {
	pub blob_ref: Option<BlobRef>,
	pub bytes_ref: Option<BlobRef>,
	pub size: u64,
}

impl Part {
	/// True if this part names at least one dependency.
	pub fn is_valid(&self) -> bool {
		self.blob_ref.is_some() || self.bytes_ref.is_some()
	}
}

/// File metadata carried by a `file` schema, exposed alongside its parts.
#[derive(Debug, Clone, Default)]
pub struct FileMeta {
	pub file_name: Option<String>,
	pub mode: Option<u32>,
	pub uid: Option<u32>,
	pub gid: Option<u32>,
	pub size: Option<u64>,
	pub mtime: Option<String>,
}

/// A sniffed schema blob's structured content.
#[derive(Debug, Clone)]
pub struct Schema {
	pub kind: String,
	pub parts: Vec<Part>,
	pub members: Vec<BlobRef>,
	pub entries: Option<BlobRef>,
	pub meta: FileMeta,
}

impl Schema {
	pub fn kind(&self) -> &str {
		&self.kind
	}

	pub fn static_set_members(&self) -> &[BlobRef] {
		&self.members
	}

	pub fn byte_parts(&self) -> &[Part] {
		&self.parts
	}

	pub fn directory_entries(&self) -> Option<&BlobRef> {
		self.entries.as_ref()
	}

	pub fn file_name(&self) -> Option<&str> {
		self.meta.file_name.as_deref()
	}
}

/// Sniffs a raw blob body into a [`Schema`], or reports it as opaque data.
pub trait SchemaSniffer: Send + Sync {
	fn sniff(&self, r: &BlobRef, body: &[u8]) -> Option<Schema>;
}
