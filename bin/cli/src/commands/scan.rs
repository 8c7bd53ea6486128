// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::Result;
use blobidx_blobsource::DirBlobSource;
use blobidx_catalog::Catalog;
use blobidx_schema::{JsonSchemaSniffer, SchemaSniffer};
use blobidx_scanner::{Blake3Verifier, ContentVerifier, Scanner};
use blobidx_stats::Stats;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub fn run(db_dir: &Path, blob_dir: &Path, restart: bool) -> Result<()> {
	let catalog = Catalog::new(db_dir)?;
	let source = Arc::new(DirBlobSource::new(blob_dir));
	let sniffer: Arc<dyn SchemaSniffer> = Arc::new(JsonSchemaSniffer::new());
	let verifier: Arc<dyn ContentVerifier> = Arc::new(Blake3Verifier);
	let scanner = Scanner::new(source, sniffer, verifier);

	let stats = Stats::new();
	let full_log = stats.log_every(Duration::from_secs(10));
	let top_log = stats.log_top_n_every(5, Duration::from_secs(10));

	let result = scanner.run(&catalog, restart, &stats);

	full_log.stop();
	top_log.stop();

	result?;
	tracing::info!(counts = %stats, "scan complete");
	catalog.close()?;
	Ok(())
}
