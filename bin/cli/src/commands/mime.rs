// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::commands::DEFAULT_CACHE_BYTES;
use crate::Result;
use blobidx_blobsource::{BlobSource, DirBlobSource};
use blobidx_cache::FetchCache;
use blobidx_catalog::Catalog;
use blobidx_stats::Stats;
use blobidx_workers::WorkerPool;
use std::path::Path;
use std::sync::Arc;

pub fn run(db_dir: &Path, blob_dir: &Path, workers: usize) -> Result<()> {
	let catalog = Arc::new(Catalog::new(db_dir)?);
	let source = Arc::new(DirBlobSource::new(blob_dir));
	let cache = Arc::new(FetchCache::new(source, DEFAULT_CACHE_BYTES));

	let refs = catalog.list("file")?;
	let (tx, rx) = crossbeam_channel::unbounded();
	for r in refs {
		tx.send(r).expect("channel receiver outlives every sender");
	}
	drop(tx);

	let stats = Stats::new();
	let pool = WorkerPool::new(workers)?;

	pool.go({
		let catalog = Arc::clone(&catalog);
		let cache = Arc::clone(&cache);
		let stats = Arc::clone(&stats);
		let rx = rx.clone();
		move || {
			for r in rx.iter() {
				match cache.fetch(&r) {
					Ok(blob) => {
						let mime = blobidx_mime::sniff(&blob.data);
						let bare = blobidx_mime::strip_charset(&mime);
						if let Err(e) = catalog.place_mime(&r, bare) {
							tracing::warn!(r = %r, error = %e, "failed to record mime classification");
							stats.add("place_error");
							continue;
						}
						stats.add(bare.to_string());
					}
					Err(e) => {
						tracing::warn!(r = %r, error = %e, "failed to fetch blob for mime classification");
						stats.add("fetch_error");
					}
				}
			}
		}
	});

	pool.wait();

	tracing::info!(counts = %stats, hit_rate = cache.hit_rate(), hits = cache.hits(), misses = cache.misses(), "mime classification complete");

	match Arc::try_unwrap(catalog) {
		Ok(catalog) => catalog.close()?,
		Err(_) => tracing::warn!("catalog handle still shared at shutdown; skipping close"),
	}
	Ok(())
}
