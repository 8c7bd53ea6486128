// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::Result;
use blobidx_blobsource::{BlobSource, DirBlobSource};
use blobidx_core::BlobRef;
use std::io::Write;
use std::path::Path;

pub fn run(blob_dir: &Path, refs: &[String]) -> Result<()> {
	let source = DirBlobSource::new(blob_dir);
	let stdout = std::io::stdout();
	let mut out = stdout.lock();

	for r in refs {
		let r = BlobRef::from(r.as_str());
		match source.fetch(&r) {
			Ok(blob) => out.write_all(&blob.data)?,
			Err(e) => tracing::warn!(r = %r, error = %e, "failed to fetch blob"),
		}
	}
	Ok(())
}
