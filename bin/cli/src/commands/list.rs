// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::Result;
use blobidx_catalog::Catalog;
use std::path::Path;

pub fn run(db_dir: &Path, camli_type: &str) -> Result<()> {
	let catalog = Catalog::new_ro(db_dir)?;
	for r in catalog.list(camli_type)? {
		println!("{r}");
	}
	Ok(())
}
