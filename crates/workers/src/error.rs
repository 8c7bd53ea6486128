// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("worker count must be >= 1, got {0}")]
	InvalidWorkerCount(usize),
}
