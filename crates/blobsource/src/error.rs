// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use blobidx_core::BlobRef;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("blob {0} not found in source")]
	NotFound(BlobRef),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
