// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::Result;
use blobidx_catalog::Catalog;
use std::path::Path;

pub fn run(db_dir: &Path) -> Result<()> {
	let catalog = Catalog::new_ro(db_dir)?;
	let stats = catalog.stats()?;

	println!("blobs:   {}", stats.blobs);
	println!("links:   {}", stats.links);
	println!("missing: {}", stats.missing);
	println!("unknown: {}", stats.unknown);

	println!("\nper kind:");
	let mut per_kind: Vec<_> = stats.per_kind.iter().collect();
	per_kind.sort_by_key(|(k, _)| k.clone());
	for (kind, count) in per_kind {
		println!("  {kind}: {count}");
	}

	println!("\nper mime:");
	let mut per_mime: Vec<_> = stats.per_mime.iter().collect();
	per_mime.sort_by_key(|(k, _)| k.clone());
	for (mime, count) in per_mime {
		println!("  {mime}: {count}");
	}

	Ok(())
}
