// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use blobidx_core::BlobRef;

/// Confirms a blob's body actually hashes to its claimed `ref`. The hashing
/// scheme itself is out of this crate's hands — blobs arrive with refs
/// already computed — so this is a seam implementations plug their own
/// scheme into, the same way `BlobSource`'s real pack format is external.
pub trait ContentVerifier: Send + Sync {
	fn verify(&self, r: &BlobRef, body: &[u8]) -> bool;
}

/// Demo verifier: treats `r` as `<scheme>-<hexdigest>` and recomputes the
/// digest with BLAKE3, ignoring the scheme prefix. A ref with no `-` is
/// compared whole.
#[derive(Debug, Default)]
pub struct Blake3Verifier;

impl ContentVerifier for Blake3Verifier {
	fn verify(&self, r: &BlobRef, body: &[u8]) -> bool {
		let digest = blake3::hash(body).to_hex();
		match r.as_str().rsplit_once('-') {
			Some((_, want)) => want.eq_ignore_ascii_case(digest.as_str()),
			None => r.as_str().eq_ignore_ascii_case(digest.as_str()),
		}
	}
}
