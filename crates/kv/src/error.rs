// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("store engine error: {0}")]
	Engine(#[from] sled::Error),

	#[error("store is open read-only")]
	ReadOnly,
}

pub type Result<T> = std::result::Result<T, Error>;
