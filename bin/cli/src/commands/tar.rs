// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::commands::DEFAULT_CACHE_BYTES;
use crate::Result;
use blobidx_blobsource::DirBlobSource;
use blobidx_cache::FetchCache;
use blobidx_core::BlobRef;
use blobidx_reassemble::Reassembler;
use blobidx_schema::JsonSchemaSniffer;
use std::io::{BufRead, Read};
use std::path::Path;
use std::sync::Arc;

pub fn run(blob_dir: &Path) -> Result<()> {
	let source = Arc::new(DirBlobSource::new(blob_dir));
	let cache = Arc::new(FetchCache::new(source, DEFAULT_CACHE_BYTES));
	let reassembler = Reassembler::new(Arc::clone(&cache), Arc::new(JsonSchemaSniffer::new()));

	let refs: Vec<BlobRef> = std::io::stdin().lock().lines().collect::<std::io::Result<Vec<_>>>()?.into_iter().filter(|l| !l.trim().is_empty()).map(|l| BlobRef::from(l.trim().to_string())).collect();

	let (readers_tx, readers_rx) = crossbeam_channel::unbounded();
	let (missing_tx, missing_rx) = crossbeam_channel::unbounded();
	let (invalid_tx, invalid_rx) = crossbeam_channel::unbounded();
	let (unreadable_tx, unreadable_rx) = crossbeam_channel::unbounded();

	reassembler.read_refs(refs, &readers_tx, &missing_tx, &invalid_tx, &unreadable_tx);
	drop((readers_tx, missing_tx, invalid_tx, unreadable_tx));

	for r in missing_rx.try_iter() {
		tracing::warn!(r = %r, "skipped: missing");
	}
	for r in invalid_rx.try_iter() {
		tracing::warn!(r = %r, "skipped: unparseable schema");
	}
	for r in unreadable_rx.try_iter() {
		tracing::warn!(r = %r, "skipped: not a readable file");
	}

	let stdout = std::io::stdout();
	let mut builder = tar::Builder::new(stdout.lock());

	for mut desc in readers_rx.try_iter() {
		let name = desc.file_name.clone().unwrap_or_else(|| desc.r.as_str().to_string());
		let mut header = tar::Header::new_gnu();
		header.set_size(desc.size);
		header.set_mode(desc.mode.unwrap_or(0o644));
		header.set_uid(desc.uid.unwrap_or(0) as u64);
		header.set_gid(desc.gid.unwrap_or(0) as u64);
		header.set_entry_type(tar::EntryType::Regular);
		header.set_cksum();

		let mut buf = Vec::new();
		desc.reader.read_to_end(&mut buf)?;
		builder.append_data(&mut header, &name, buf.as_slice())?;
	}

	builder.finish()?;
	tracing::info!(hit_rate = cache.hit_rate(), hits = cache.hits(), misses = cache.misses(), "tar stream complete");
	Ok(())
}
