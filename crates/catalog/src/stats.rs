// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use std::collections::HashMap;

/// Full-table-scan snapshot produced by [`crate::Catalog::stats`].
///
/// `missing` counts `missing|*` rows (one per distinct needer); `unknown`
/// counts the distinct refs that appear as the unknown side of at least one
/// of those rows — the same ref can be `missing` many times (fan-out) but
/// only contributes once to `unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
	pub blobs: usize,
	pub links: usize,
	pub missing: usize,
	pub unknown: usize,
	pub per_kind: HashMap<String, usize>,
	pub per_mime: HashMap<String, usize>,
}
