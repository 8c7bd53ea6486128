// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::{Blob, BlobSource, Error, Result, StreamedBlob};
use blobidx_core::{BlobRef, Token};
use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};

/// The channel depth used by `stream_blobs`: a slow consumer throttles
/// enumeration naturally.
const STREAM_CHANNEL_DEPTH: usize = 10;

/// A one-file-per-blob directory, filenames equal to the blob's ref.
///
/// This is a demo/test stand-in for a real diskpacked pack-file store:
/// tokens here are just the ref string itself, since filename order is a
/// perfectly good, trivially resumable enumeration order for a flat
/// directory.
pub struct DirBlobSource {
	root: PathBuf,
}

impl DirBlobSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	fn path_for(&self, r: &BlobRef) -> PathBuf {
		self.root.join(r.as_str())
	}

	/// Writes `data` under `r`, for use by tests and by tools that seed a
	/// demo store. Not part of `BlobSource` — only the read path is.
	pub fn put(&self, r: &BlobRef, data: &[u8]) -> Result<()> {
		fs::create_dir_all(&self.root)?;
		fs::write(self.path_for(r), data)?;
		Ok(())
	}
}

impl BlobSource for DirBlobSource {
	fn fetch(&self, r: &BlobRef) -> Result<Blob> {
		let path = self.path_for(r);
		let data = fs::read(&path).map_err(|e| if e.kind() == std::io::ErrorKind::NotFound { Error::NotFound(r.clone()) } else { Error::Io(e) })?;
		Ok(Blob { r: r.clone(), data: Bytes::from(data) })
	}

	fn stream_blobs(&self, resume: Token, tx: crossbeam_channel::Sender<StreamedBlob>) -> Result<()> {
		let mut entries: Vec<String> = Vec::new();
		if self.root.is_dir() {
			for entry in fs::read_dir(&self.root)? {
				let entry = entry?;
				if entry.file_type()?.is_file() {
					if let Some(name) = entry.file_name().to_str() {
						entries.push(name.to_string());
					}
				}
			}
		}
		entries.sort();

		let start_at = if resume.is_empty() {
			0
		} else {
			// Redeliver the blob at `resume` itself; Place is
			// idempotent so this is harmless and keeps the
			// "don't skip an unprocessed blob" promise simple.
			entries.iter().position(|e| e.as_str() >= resume.as_str()).unwrap_or(entries.len())
		};

		let (bounded_tx, bounded_rx) = crossbeam_channel::bounded::<StreamedBlob>(STREAM_CHANNEL_DEPTH);
		let root = self.root.clone();
		let to_send = entries[start_at..].to_vec();

		std::thread::scope(|scope| -> Result<()> {
			let producer = scope.spawn(move || -> Result<()> {
				for name in to_send {
					let data = fs::read(root.join(&name))?;
					let item = StreamedBlob { blob: Blob { r: BlobRef::from(name.clone()), data: Bytes::from(data) }, token: Token::from(name) };
					if bounded_tx.send(item).is_err() {
						break;
					}
				}
				Ok(())
			});

			for item in bounded_rx {
				if tx.send(item).is_err() {
					break;
				}
			}
			producer.join().expect("blob source producer thread panicked")
		})
	}
}
