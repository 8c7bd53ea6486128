// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! A fixed-size worker pool: `go(f)` spawns `workers` concurrent
//! executions of `f` and returns immediately; `wait()` blocks until every
//! spawned execution (across every `go` call so far) has returned.

mod error;

pub use error::Error;

use std::sync::Mutex;
use std::thread::JoinHandle;

pub struct WorkerPool {
	workers: usize,
	handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
	/// Rejects `workers < 1`, matching the source pool's flag-binding
	/// validation.
	pub fn new(workers: usize) -> Result<Self, Error> {
		if workers < 1 {
			return Err(Error::InvalidWorkerCount(workers));
		}
		Ok(Self { workers, handles: Mutex::new(Vec::new()) })
	}

	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Spawns `workers` threads all calling `f`; returns without waiting.
	pub fn go<F>(&self, f: F)
	where
		F: Fn() + Send + Sync + 'static,
	{
		let f = std::sync::Arc::new(f);
		let mut handles = self.handles.lock().unwrap();
		for _ in 0..self.workers {
			let f = std::sync::Arc::clone(&f);
			handles.push(std::thread::spawn(move || f()));
		}
	}

	/// Blocks until every thread spawned by every prior `go` call returns.
	pub fn wait(&self) {
		let handles = std::mem::take(&mut *self.handles.lock().unwrap());
		for h in handles {
			let _ = h.join();
		}
	}
}

/// Parses a decimal worker count for flag binding; rejects `< 1`.
pub fn parse_worker_count(s: &str) -> Result<usize, String> {
	let n: usize = s.parse().map_err(|_| format!("'{s}' is not a valid worker count"))?;
	if n < 1 {
		return Err("value must be >= 1".to_string());
	}
	Ok(n)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	#[test]
	fn go_runs_f_once_per_worker_then_wait_blocks_until_done() {
		let pool = WorkerPool::new(4).unwrap();
		let count = Arc::new(AtomicUsize::new(0));
		let c = Arc::clone(&count);
		pool.go(move || {
			c.fetch_add(1, Ordering::SeqCst);
		});
		pool.wait();
		assert_eq!(count.load(Ordering::SeqCst), 4);
	}

	#[test]
	fn zero_workers_is_rejected() {
		assert!(matches!(WorkerPool::new(0), Err(Error::InvalidWorkerCount(0))));
	}

	#[test]
	fn parse_worker_count_rejects_less_than_one() {
		assert_eq!(parse_worker_count("4").unwrap(), 4);
		assert!(parse_worker_count("0").is_err());
		assert!(parse_worker_count("nope").is_err());
	}
}
