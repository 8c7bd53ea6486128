// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! The blob source collaborator: `fetch(ref) -> bytes` and
//! `stream_blobs(resume) -> channel<(blob, token)>`.
//!
//! The real pack-file store this subsystem walks is out of scope here —
//! this crate only defines the [`BlobSource`] seam and ships
//! [`DirBlobSource`], a directory-of-files implementation good enough to
//! drive the scanner, reassembler and tests against.

mod dir;
mod error;

pub use dir::DirBlobSource;
pub use error::{Error, Result};

use blobidx_core::{BlobRef, Token};
use bytes::Bytes;

/// A blob's bytes as returned by [`BlobSource::fetch`].
#[derive(Debug, Clone)]
pub struct Blob {
	pub r: BlobRef,
	pub data: Bytes,
}

impl Blob {
	pub fn size(&self) -> u64 {
		self.data.len() as u64
	}
}

/// One entry delivered by [`BlobSource::stream_blobs`]: a blob paired with
/// the token identifying its physical position, for resuming later.
pub struct StreamedBlob {
	pub blob: Blob,
	pub token: Token,
}

/// Supplies blob bytes and a resumable enumeration of the whole store.
///
/// Implementations are expected to promise: given the last completed
/// token, streaming forward will not skip an unprocessed blob (it may
/// redeliver the blob at that token itself; `Catalog::place` is idempotent
/// so that's harmless).
pub trait BlobSource: Send + Sync {
	fn fetch(&self, r: &BlobRef) -> Result<Blob>;

	/// Streams every blob from `resume` (exclusive of blobs strictly
	/// before it) onto `tx`, in the source's native order. `resume` empty
	/// means "from the start". Returns once the whole store has been
	/// enumerated, or on a fatal source error.
	fn stream_blobs(&self, resume: Token, tx: crossbeam_channel::Sender<StreamedBlob>) -> Result<()>;
}
