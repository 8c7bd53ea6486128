// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! A concurrent named-counter, for the scan and classification passes to
//! report what they're seeing without every caller hand-rolling a mutexed
//! map. Two periodic loggers ([`Stats::log_every`], [`Stats::log_top_n_every`])
//! dump it to `tracing` on a timer; both return a handle that stops the
//! ticker on drop or on an explicit `stop()`.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
pub struct Stats {
	counts: Mutex<HashMap<String, u64>>,
}

impl Stats {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn add(&self, key: impl Into<String>) {
		*self.counts.lock().entry(key.into()).or_insert(0) += 1;
	}

	pub fn snapshot(&self) -> HashMap<String, u64> {
		self.counts.lock().clone()
	}

	/// Logs the full counter dump every `interval`, until the returned
	/// handle is stopped or dropped.
	pub fn log_every(self: &Arc<Self>, interval: Duration) -> TickerHandle {
		let stats = Arc::clone(self);
		spawn_ticker(interval, move || tracing::info!("{}", stats));
	}

	/// Logs the `n` highest counters (descending, ties broken arbitrarily)
	/// every `interval`, until the returned handle is stopped or dropped.
	pub fn log_top_n_every(self: &Arc<Self>, n: usize, interval: Duration) -> TickerHandle {
		let stats = Arc::clone(self);
		spawn_ticker(interval, move || {
			let mut entries: Vec<_> = stats.snapshot().into_iter().collect();
			entries.sort_by(|a, b| b.1.cmp(&a.1));
			entries.truncate(n);
			let summary = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>().join(", ");
			tracing::info!("{}", summary);
		});
	}
}

impl fmt::Display for Stats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let counts = self.counts.lock();
		let mut parts: Vec<_> = counts.iter().map(|(k, v)| format!("{k}: {v}")).collect();
		parts.sort();
		write!(f, "{}", parts.join(", "))
	}
}

fn spawn_ticker(interval: Duration, mut tick: impl FnMut() + Send + 'static) -> TickerHandle {
	let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
	let ticker = crossbeam_channel::tick(interval);
	let join = std::thread::spawn(move || loop {
		crossbeam_channel::select! {
			recv(ticker) -> _ => tick(),
			recv(stop_rx) -> _ => return,
		}
	});
	TickerHandle { stop_tx, join: Some(join) }
}

/// Stops a periodic logger started by [`Stats::log_every`] or
/// [`Stats::log_top_n_every`]. Stopping is idempotent; dropping an
/// un-stopped handle stops the ticker too.
pub struct TickerHandle {
	stop_tx: crossbeam_channel::Sender<()>,
	join: Option<std::thread::JoinHandle<()>>,
}

impl TickerHandle {
	pub fn stop(mut self) {
		self.stop_inner();
	}

	fn stop_inner(&mut self) {
		let _ = self.stop_tx.send(());
		if let Some(j) = self.join.take() {
			let _ = j.join();
		}
	}
}

impl Drop for TickerHandle {
	fn drop(&mut self) {
		self.stop_inner();
	}
}
