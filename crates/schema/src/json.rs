// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use crate::{FileMeta, Part, Schema, SchemaSniffer};
use blobidx_core::BlobRef;
use serde::Deserialize;

/// The on-disk JSON encoding of a schema blob, camlistore-style: a
/// `camliType` discriminator plus the fields relevant to that type. Unknown
/// fields are ignored, missing ones default, so sniffing an unrelated JSON
/// document just falls through to "not a schema" rather than erroring.
#[derive(Debug, Deserialize)]
struct RawSchema {
	#[serde(rename = "camliType")]
	camli_type: String,
	#[serde(default)]
	parts: Vec<RawPart>,
	#[serde(default)]
	members: Vec<String>,
	#[serde(default)]
	entries: Option<String>,
	#[serde(rename = "fileName", default)]
	file_name: Option<String>,
	#[serde(rename = "unixPermission", default)]
	unix_permission: Option<String>,
	#[serde(rename = "unixOwnerId", default)]
	unix_owner_id: Option<u32>,
	#[serde(rename = "unixGroupId", default)]
	unix_group_id: Option<u32>,
	#[serde(rename = "unixMtime", default)]
	unix_mtime: Option<String>,
	#[serde(default)]
	size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawPart {
	#[serde(rename = "blobRef", default)]
	blob_ref: Option<String>,
	#[serde(rename = "bytesRef", default)]
	bytes_ref: Option<String>,
	#[serde(default)]
	size: u64,
}

/// Sniffs camlistore-style JSON schema blobs (`{"camliType": "file", ...}`).
/// Anything that doesn't parse as such JSON is treated as opaque data.
#[derive(Debug, Default)]
pub struct JsonSchemaSniffer;

impl JsonSchemaSniffer {
	pub fn new() -> Self {
		Self
	}
}

impl SchemaSniffer for JsonSchemaSniffer {
	fn sniff(&self, r: &BlobRef, body: &[u8]) -> Option<Schema> {
		let raw: RawSchema = match serde_json::from_slice(body) {
			Ok(raw) => raw,
			Err(_) => {
				tracing::trace!(r = %r, "not a schema blob, treating as opaque data");
				return None;
			}
		};

		let parts = raw
			.parts
			.into_iter()
			.map(|p| Part { blob_ref: p.blob_ref.map(BlobRef::from), bytes_ref: p.bytes_ref.map(BlobRef::from), size: p.size })
			.collect();

		let meta = FileMeta {
			file_name: raw.file_name,
			mode: raw.unix_permission.and_then(|s| u32::from_str_radix(s.trim_start_matches("0"), 8).ok()),
			uid: raw.unix_owner_id,
			gid: raw.unix_group_id,
			size: raw.size,
			mtime: raw.unix_mtime,
		};

		Some(Schema { kind: raw.camli_type, parts, members: raw.members.into_iter().map(BlobRef::from).collect(), entries: raw.entries.map(BlobRef::from), meta })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn non_json_body_is_opaque_data() {
		let sniffer = JsonSchemaSniffer::new();
		assert!(sniffer.sniff(&BlobRef::from("a"), b"just some bytes").is_none());
	}

	#[test]
	fn sniffs_file_schema_with_parts() {
		let sniffer = JsonSchemaSniffer::new();
		let body = br#"{"camliVersion":1,"camliType":"file","fileName":"a.txt","parts":[{"blobRef":"sha1-aaa","size":10},{"bytesRef":"sha1-bbb","size":20}]}"#;
		let schema = sniffer.sniff(&BlobRef::from("r"), body).unwrap();
		assert_eq!(schema.kind(), "file");
		assert_eq!(schema.file_name(), Some("a.txt"));
		assert_eq!(schema.byte_parts().len(), 2);
		assert!(schema.byte_parts()[0].is_valid());
		assert!(schema.byte_parts()[1].is_valid());
	}

	#[test]
	fn sniffs_static_set_members() {
		let sniffer = JsonSchemaSniffer::new();
		let body = br#"{"camliType":"static-set","members":["sha1-aaa","sha1-bbb"]}"#;
		let schema = sniffer.sniff(&BlobRef::from("r"), body).unwrap();
		assert_eq!(schema.kind(), "static-set");
		assert_eq!(schema.static_set_members().len(), 2);
	}

	#[test]
	fn sniffs_directory_entries() {
		let sniffer = JsonSchemaSniffer::new();
		let body = br#"{"camliType":"directory","entries":"sha1-ccc"}"#;
		let schema = sniffer.sniff(&BlobRef::from("r"), body).unwrap();
		assert_eq!(schema.kind(), "directory");
		assert_eq!(schema.directory_entries(), Some(&BlobRef::from("sha1-ccc")));
	}

	#[test]
	fn part_with_neither_ref_is_invalid() {
		let part = Part::default();
		assert!(!part.is_valid());
	}
}
