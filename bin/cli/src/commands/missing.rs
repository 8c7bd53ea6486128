// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::Result;
use blobidx_blobsource::{BlobSource, DirBlobSource};
use blobidx_catalog::Catalog;
use blobidx_core::BlobRef;
use blobidx_schema::{JsonSchemaSniffer, SchemaSniffer};
use std::collections::HashSet;
use std::path::Path;

pub fn run(db_dir: &Path, blob_dir: &Path) -> Result<()> {
	let catalog = Catalog::new_ro(db_dir)?;
	let source = DirBlobSource::new(blob_dir);
	let sniffer = JsonSchemaSniffer::new();

	let entries = catalog.missing()?;
	let total = entries.len();

	let mut printed: HashSet<BlobRef> = HashSet::new();
	for unknown in entries {
		if !printed.insert(unknown.clone()) {
			continue;
		}

		if source.fetch(&unknown).is_ok() {
			tracing::info!(r = %unknown, "blob is present in the source; index is stale");
			continue;
		}

		println!("{unknown}");
		let mut visited = HashSet::new();
		visited.insert(unknown.clone());
		walk_parents(&catalog, &source, &sniffer, &unknown, 1, &mut visited)?;
	}

	println!("{total} missing entries");
	Ok(())
}

fn walk_parents(
	catalog: &Catalog,
	source: &DirBlobSource,
	sniffer: &JsonSchemaSniffer,
	r: &BlobRef,
	depth: usize,
	visited: &mut HashSet<BlobRef>,
) -> Result<()> {
	for parent in catalog.parents(r)? {
		if !visited.insert(parent.clone()) {
			continue;
		}
		let indent = "  ".repeat(depth);
		match describe(source, sniffer, &parent) {
			Some(name) => println!("{indent}{parent} ({name})"),
			None => println!("{indent}{parent}"),
		}
		walk_parents(catalog, source, sniffer, &parent, depth + 1, visited)?;
	}
	Ok(())
}

/// Best-effort filename for an ancestor: re-fetches and re-sniffs it,
/// since the catalog itself only stores kind and link structure.
fn describe(source: &DirBlobSource, sniffer: &JsonSchemaSniffer, r: &BlobRef) -> Option<String> {
	let blob = source.fetch(r).ok()?;
	let schema = sniffer.sniff(r, &blob.data)?;
	schema.file_name().map(|s| s.to_string())
}
