// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! Given a stream of refs naming `file` schema blobs, produces a readable
//! byte stream for each by fetching and concatenating its parts through
//! the backing fetcher, recursively resolving nested `bytes` schemas.
//! Errors are classified per-ref onto `Missing`/`Invalid`/`Unreadable`
//! channels rather than aborting the whole walk.

use blobidx_blobsource::BlobSource;
use blobidx_core::BlobRef;
use blobidx_schema::{Part, SchemaSniffer};
use std::io::Cursor;
use std::sync::Arc;

/// A reassembled file, ready to read.
pub struct FileDescriptor {
	pub r: BlobRef,
	pub reader: Cursor<Vec<u8>>,
	pub file_name: Option<String>,
	pub mode: Option<u32>,
	pub uid: Option<u32>,
	pub gid: Option<u32>,
	pub size: u64,
	pub mtime: Option<String>,
}

enum Outcome {
	Missing,
	Invalid,
	Unreadable,
}

pub struct Reassembler<F> {
	fetcher: Arc<F>,
	sniffer: Arc<dyn SchemaSniffer>,
}

impl<F: BlobSource> Reassembler<F> {
	pub fn new(fetcher: Arc<F>, sniffer: Arc<dyn SchemaSniffer>) -> Self {
		Self { fetcher, sniffer }
	}

	/// Consumes `refs`, emitting a [`FileDescriptor`] per ref on
	/// `readers_tx`, or the ref itself on whichever error channel applies.
	/// Producer-only: closes nothing, stops when `refs` is drained.
	pub fn read_refs(
		&self,
		refs: impl IntoIterator<Item = BlobRef>,
		readers_tx: &crossbeam_channel::Sender<FileDescriptor>,
		missing_tx: &crossbeam_channel::Sender<BlobRef>,
		invalid_tx: &crossbeam_channel::Sender<BlobRef>,
		unreadable_tx: &crossbeam_channel::Sender<BlobRef>,
	) {
		for r in refs {
			match self.resolve(&r) {
				Ok(desc) => {
					let _ = readers_tx.send(desc);
				}
				Err(Outcome::Missing) => {
					tracing::warn!(r = %r, "previously indexed; now missing");
					let _ = missing_tx.send(r);
				}
				Err(Outcome::Invalid) => {
					tracing::warn!(r = %r, "previously schema blob; now unparseable");
					let _ = invalid_tx.send(r);
				}
				Err(Outcome::Unreadable) => {
					tracing::warn!(r = %r, "unreadable");
					let _ = unreadable_tx.send(r);
				}
			}
		}
	}

	fn resolve(&self, r: &BlobRef) -> Result<FileDescriptor, Outcome> {
		let blob = self.fetcher.fetch(r).map_err(|_| Outcome::Missing)?;
		let schema = self.sniffer.sniff(r, &blob.data).ok_or(Outcome::Invalid)?;
		if schema.kind() != "file" {
			return Err(Outcome::Unreadable);
		}
		let bytes = self.resolve_parts(schema.byte_parts()).map_err(|_| Outcome::Unreadable)?;
		Ok(FileDescriptor {
			r: r.clone(),
			size: schema.meta.size.unwrap_or(bytes.len() as u64),
			reader: Cursor::new(bytes),
			file_name: schema.meta.file_name.clone(),
			mode: schema.meta.mode,
			uid: schema.meta.uid,
			gid: schema.meta.gid,
			mtime: schema.meta.mtime.clone(),
		})
	}

	fn resolve_parts(&self, parts: &[Part]) -> Result<Vec<u8>, ()> {
		let mut out = Vec::new();
		for part in parts {
			if let Some(br) = &part.blob_ref {
				let blob = self.fetcher.fetch(br).map_err(|_| ())?;
				out.extend_from_slice(&blob.data);
			} else if let Some(br) = &part.bytes_ref {
				let blob = self.fetcher.fetch(br).map_err(|_| ())?;
				let nested = self.sniffer.sniff(br, &blob.data).ok_or(())?;
				out.extend(self.resolve_parts(nested.byte_parts())?);
			}
		}
		Ok(out)
	}
}
