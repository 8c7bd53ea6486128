// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! Thin wrapper over an embedded ordered key-value engine ([`sled`]).
//!
//! `KvEngine` exposes exactly the operations the catalog needs: point get,
//! point has, `[start, limit)` ranged iteration and atomic write batches.
//! No component outside this crate and `blobidx-catalog` is meant to hold
//! an engine handle directly.

mod error;

pub use error::{Error, Result};

use std::ops::Bound;
use std::path::Path;

/// One mutation queued for an atomic [`WriteBatch`].
enum Op {
	Put(Vec<u8>, Vec<u8>),
	Delete(Vec<u8>),
}

/// A set of puts/deletes applied atomically by [`KvEngine::write_batch`].
///
/// Readers either observe the whole batch or none of it — relied on by
/// `Catalog::place`'s multi-step contract.
#[derive(Default)]
pub struct WriteBatch {
	ops: Vec<Op>,
}

impl WriteBatch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> &mut Self {
		self.ops.push(Op::Put(key.into(), value.into()));
		self
	}

	pub fn delete(&mut self, key: impl Into<Vec<u8>>) -> &mut Self {
		self.ops.push(Op::Delete(key.into()));
		self
	}

	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}
}

/// An embedded ordered key-value store.
///
/// Backed by `sled`, chosen over a value-store-only engine because the key
/// schema depends on prefix range scans over a single flat keyspace.
pub struct KvEngine {
	db: sled::Db,
	read_only: bool,
}

impl KvEngine {
	/// Opens (creating if absent) the store at `path` for read-write use.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let db = sled::open(path)?;
		Ok(Self { db, read_only: false })
	}

	/// Opens the store for read-only use. Mutating calls return
	/// [`Error::ReadOnly`] rather than touching the engine.
	pub fn open_ro(path: impl AsRef<Path>) -> Result<Self> {
		let db = sled::Config::new().path(path).open()?;
		Ok(Self { db, read_only: true })
	}

	pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		Ok(self.db.get(key)?.map(|v| v.to_vec()))
	}

	pub fn has(&self, key: &[u8]) -> Result<bool> {
		Ok(self.db.contains_key(key)?)
	}

	/// Iterates `[start, limit)`, ascending, yielding owned key/value pairs.
	pub fn range(&self, start: &[u8], limit: &[u8]) -> impl Iterator<Item = Result<(Vec<u8>, Vec<u8>)>> {
		let range = (Bound::Included(start.to_vec()), Bound::Excluded(limit.to_vec()));
		self.db.range(range).map(|r| r.map(|(k, v)| (k.to_vec(), v.to_vec())).map_err(Error::from))
	}

	/// Applies `batch` atomically: readers see all of it or none of it.
	pub fn write_batch(&self, batch: WriteBatch) -> Result<()> {
		if self.read_only {
			return Err(Error::ReadOnly);
		}
		let mut sled_batch = sled::Batch::default();
		for op in batch.ops {
			match op {
				Op::Put(k, v) => sled_batch.insert(k, v),
				Op::Delete(k) => sled_batch.remove(k),
			}
		}
		self.db.apply_batch(sled_batch)?;
		Ok(())
	}

	/// Flushes pending writes and drops the handle.
	pub fn close(self) -> Result<()> {
		self.db.flush()?;
		Ok(())
	}

	pub fn is_read_only(&self) -> bool {
		self.read_only
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn open_temp() -> (tempfile::TempDir, KvEngine) {
		let dir = tempfile::tempdir().unwrap();
		let db = KvEngine::open(dir.path()).unwrap();
		(dir, db)
	}

	#[test]
	fn point_get_and_has() {
		let (_dir, db) = open_temp();
		assert!(!db.has(b"k").unwrap());
		let mut b = WriteBatch::new();
		b.put(b"k".to_vec(), b"v".to_vec());
		db.write_batch(b).unwrap();
		assert!(db.has(b"k").unwrap());
		assert_eq!(db.get(b"k").unwrap(), Some(b"v".to_vec()));
	}

	#[test]
	fn range_is_half_open_and_ascending() {
		let (_dir, db) = open_temp();
		let mut b = WriteBatch::new();
		for k in ["a", "b", "c", "d"] {
			b.put(k.as_bytes().to_vec(), k.as_bytes().to_vec());
		}
		db.write_batch(b).unwrap();
		let got: Vec<_> = db.range(b"b", b"d").map(|r| r.unwrap().0).collect();
		assert_eq!(got, vec![b"b".to_vec(), b"c".to_vec()]);
	}

	#[test]
	fn write_batch_is_atomic_across_put_and_delete() {
		let (_dir, db) = open_temp();
		let mut b1 = WriteBatch::new();
		b1.put(b"x".to_vec(), b"1".to_vec());
		db.write_batch(b1).unwrap();

		let mut b2 = WriteBatch::new();
		b2.put(b"y".to_vec(), b"1".to_vec());
		b2.delete(b"x".to_vec());
		db.write_batch(b2).unwrap();

		assert!(!db.has(b"x").unwrap());
		assert!(db.has(b"y").unwrap());
	}

	#[test]
	fn read_only_engine_rejects_writes() {
		let dir = tempfile::tempdir().unwrap();
		{
			KvEngine::open(dir.path()).unwrap();
		}
		let ro = KvEngine::open_ro(dir.path()).unwrap();
		let mut b = WriteBatch::new();
		b.put(b"k".to_vec(), b"v".to_vec());
		assert!(matches!(ro.write_batch(b), Err(Error::ReadOnly)));
	}
}
