// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Catalog(#[from] blobidx_catalog::Error),

	#[error(transparent)]
	BlobSource(#[from] blobidx_blobsource::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
