// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::BlobRef;

/// Errors shared across the scan/index subsystem.
///
/// Crate-specific errors (KV, cache, scanner, ...) wrap this via `#[from]`
/// where the failure genuinely originates here; most crates additionally
/// define their own narrower `Error` type for failures that only make sense
/// at that layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("blob {0} not found")]
	NotFound(BlobRef),

	#[error("storage engine failure: {0}")]
	Store(String),

	#[error("blob source failure: {0}")]
	BlobSource(String),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}
