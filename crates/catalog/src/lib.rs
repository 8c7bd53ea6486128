// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! The public facade over the blobidx index.
//!
//! `Catalog` is the only component allowed to hold a [`blobidx_kv::KvEngine`]
//! handle; every index mutation and query goes through it. It owns nothing
//! else — no blob bytes, no schema parsing — it only knows how to turn
//! `Place`/`Missing`/`List`/`Parents`/`Stats` calls into key-value
//! operations via `blobidx_keyschema`.

mod error;
mod stats;

pub use error::{Error, Result};
pub use stats::CatalogStats;

use blobidx_core::{BlobRef, Kind, Token};
use blobidx_kv::{KvEngine, WriteBatch};
use std::collections::HashSet;
use std::path::Path;

pub struct Catalog {
	kv: KvEngine,
}

impl Catalog {
	pub fn new(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self { kv: KvEngine::open(path)? })
	}

	/// Opens the catalog read-only; every mutating method then fails with
	/// [`blobidx_kv::Error::ReadOnly`].
	pub fn new_ro(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self { kv: KvEngine::open_ro(path)? })
	}

	/// Atomically records that `r` was found at `location`, optionally
	/// carrying `kind` and depending on `deps`: writes the found/last/type
	/// entries, records a parent link (and a pending missing entry) for
	/// each dependency not yet indexed, then clears any stale missing
	/// entries that named `r` as the unknown.
	pub fn place(&self, r: &BlobRef, location: &Token, kind: &Kind, deps: &[BlobRef]) -> Result<()> {
		let mut batch = WriteBatch::new();

		batch.put(blobidx_keyschema::found_key(r), location.as_str().as_bytes().to_vec());
		batch.put(blobidx_keyschema::last_key(), location.as_str().as_bytes().to_vec());

		if kind.as_index_str() != "" {
			batch.put(blobidx_keyschema::type_key(kind.as_index_str(), r), Vec::new());
		}

		for dep in deps {
			batch.put(blobidx_keyschema::parent_key(dep, r), Vec::new());
			if !self.kv.has(&blobidx_keyschema::found_key(dep))? {
				batch.put(blobidx_keyschema::missing_key(dep, r), Vec::new());
			}
		}

		let (start, limit) = blobidx_keyschema::missing_range(r);
		for entry in self.kv.range(&start, &limit) {
			let (key, _) = entry?;
			batch.delete(key);
		}

		self.kv.write_batch(batch)?;
		tracing::debug!(r = %r, token = %location, kind = %kind, deps = deps.len(), "placed");
		Ok(())
	}

	/// Records a MIME classification for an already-indexed ref.
	/// Idempotent: placing the same `(ref, mime)` pair twice is a no-op.
	pub fn place_mime(&self, r: &BlobRef, mime: &str) -> Result<()> {
		let mut batch = WriteBatch::new();
		batch.put(blobidx_keyschema::mime_key(mime, r), Vec::new());
		self.kv.write_batch(batch)?;
		Ok(())
	}

	/// Returns the location token of the most recently completed `place`
	/// call, or the empty token if none has ever run.
	pub fn last(&self) -> Result<Token> {
		Ok(self
			.kv
			.get(&blobidx_keyschema::last_key())?
			.map(|v| Token::from(String::from_utf8_lossy(&v).into_owned()))
			.unwrap_or_default())
	}

	/// Every unknown ref with a pending needer, one entry per distinct
	/// `(unknown, needer)` pair — the same unknown ref may repeat once per
	/// needer, surfacing fan-out rather than hiding it.
	pub fn missing(&self) -> Result<Vec<BlobRef>> {
		let (start, limit) = blobidx_keyschema::missing_all_range();
		self.kv.range(&start, &limit).map(|entry| entry.map(|(k, _)| blobidx_keyschema::decode_missing_unknown(&k)).map_err(Error::from)).collect()
	}

	/// Refs carrying `kind`, or every typed ref if `kind` is empty.
	pub fn list(&self, kind: &str) -> Result<Vec<BlobRef>> {
		let (start, limit) = blobidx_keyschema::type_range(kind);
		self.kv.range(&start, &limit).map(|entry| entry.map(|(k, _)| blobidx_keyschema::decode_type_ref(&k)).map_err(Error::from)).collect()
	}

	/// The blobs that named `r` as a dependency, eagerly materialized.
	pub fn parents(&self, r: &BlobRef) -> Result<Vec<BlobRef>> {
		let (start, limit) = blobidx_keyschema::parent_range(r);
		self.kv.range(&start, &limit).map(|entry| entry.map(|(k, _)| blobidx_keyschema::decode_parent_needer(&k)).map_err(Error::from)).collect()
	}

	/// A full-table scan bucketed by relation, kind and MIME type.
	pub fn stats(&self) -> Result<CatalogStats> {
		let mut out = CatalogStats::default();

		let (s, l) = blobidx_keyschema::found_all_range();
		for entry in self.kv.range(&s, &l) {
			entry?;
			out.blobs += 1;
		}

		let (s, l) = blobidx_keyschema::parent_all_range();
		for entry in self.kv.range(&s, &l) {
			entry?;
			out.links += 1;
		}

		let (s, l) = blobidx_keyschema::missing_all_range();
		let mut unknown_seen = HashSet::new();
		for entry in self.kv.range(&s, &l) {
			let (key, _) = entry?;
			out.missing += 1;
			unknown_seen.insert(blobidx_keyschema::decode_missing_unknown(&key));
		}
		out.unknown = unknown_seen.len();

		let (s, l) = blobidx_keyschema::type_range("");
		for entry in self.kv.range(&s, &l) {
			let (key, _) = entry?;
			*out.per_kind.entry(blobidx_keyschema::decode_type_kind(&key)).or_insert(0) += 1;
		}

		let (s, l) = blobidx_keyschema::mime_range("");
		for entry in self.kv.range(&s, &l) {
			let (key, _) = entry?;
			*out.per_mime.entry(blobidx_keyschema::decode_mime_kind(&key)).or_insert(0) += 1;
		}

		Ok(out)
	}

	/// Flushes and releases the underlying store handle.
	pub fn close(self) -> Result<()> {
		self.kv.close()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn open_temp() -> (tempfile::TempDir, Catalog) {
		let dir = tempfile::tempdir().unwrap();
		let cat = Catalog::new(dir.path()).unwrap();
		(dir, cat)
	}

	#[test]
	fn build_and_drain_missing() {
		let (_dir, cat) = open_temp();
		let a = BlobRef::from("A");
		let b = BlobRef::from("B");
		let c = BlobRef::from("C");

		cat.place(&a, &Token::from("loc1".to_string()), &Kind::File, &[b.clone(), c.clone()]).unwrap();
		let mut missing: Vec<_> = cat.missing().unwrap();
		missing.sort_by(|x, y| x.as_str().cmp(y.as_str()));
		assert_eq!(missing, vec![b.clone(), c.clone()]);

		cat.place(&b, &Token::from("loc2".to_string()), &Kind::Data, &[]).unwrap();
		assert_eq!(cat.missing().unwrap(), vec![c.clone()]);

		cat.place(&c, &Token::from("loc3".to_string()), &Kind::Data, &[]).unwrap();
		assert!(cat.missing().unwrap().is_empty());

		assert_eq!(cat.parents(&b).unwrap(), vec![a.clone()]);
		assert_eq!(cat.parents(&c).unwrap(), vec![a.clone()]);
		assert_eq!(cat.last().unwrap(), Token::from("loc3".to_string()));
	}

	#[test]
	fn duplicate_place_suppresses_duplicate_pending_entry() {
		let (_dir, cat) = open_temp();
		let a = BlobRef::from("A");
		let b = BlobRef::from("B");
		cat.place(&a, &Token::from("loc".to_string()), &Kind::File, &[b.clone()]).unwrap();
		cat.place(&a, &Token::from("loc".to_string()), &Kind::File, &[b.clone()]).unwrap();
		assert_eq!(cat.missing().unwrap(), vec![b]);
	}

	#[test]
	fn kind_listing() {
		let (_dir, cat) = open_temp();
		cat.place(&BlobRef::from("f1"), &Token::from("l1".to_string()), &Kind::File, &[]).unwrap();
		cat.place(&BlobRef::from("f2"), &Token::from("l2".to_string()), &Kind::File, &[]).unwrap();
		cat.place(&BlobRef::from("d1"), &Token::from("l3".to_string()), &Kind::Directory, &[]).unwrap();

		assert_eq!(cat.list("file").unwrap().len(), 2);
		assert_eq!(cat.list("directory").unwrap().len(), 1);
		assert_eq!(cat.list("").unwrap().len(), 3);
	}

	#[test]
	fn place_idempotence_keeps_index_contents_stable() {
		let (_dir, cat) = open_temp();
		let a = BlobRef::from("A");
		let deps = [BlobRef::from("B")];
		cat.place(&a, &Token::from("loc1".to_string()), &Kind::File, &deps).unwrap();
		let before = cat.stats().unwrap();
		cat.place(&a, &Token::from("loc1".to_string()), &Kind::File, &deps).unwrap();
		let after = cat.stats().unwrap();
		assert_eq!(before, after);
	}

	#[test]
	fn stats_conservation() {
		let (_dir, cat) = open_temp();
		cat.place(&BlobRef::from("A"), &Token::from("l".to_string()), &Kind::File, &[BlobRef::from("B"), BlobRef::from("C")]).unwrap();
		let stats = cat.stats().unwrap();
		assert_eq!(stats.blobs, 1);
		assert_eq!(stats.links, 2);
		assert_eq!(stats.missing, 2);
		assert_eq!(stats.unknown, 2);
		assert_eq!(stats.per_kind.get("file"), Some(&1));
	}

	#[test]
	fn place_mime_is_queryable_via_stats() {
		let (_dir, cat) = open_temp();
		let r = BlobRef::from("A");
		cat.place(&r, &Token::from("l".to_string()), &Kind::File, &[]).unwrap();
		cat.place_mime(&r, "image/jpeg").unwrap();
		cat.place_mime(&r, "image/jpeg").unwrap();
		let stats = cat.stats().unwrap();
		assert_eq!(stats.per_mime.get("image/jpeg"), Some(&1));
	}

	#[test]
	fn last_is_empty_before_any_place() {
		let (_dir, cat) = open_temp();
		assert_eq!(cat.last().unwrap(), Token::default());
	}
}
