// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

//! Detects a MIME type from a blob's leading bytes, in the spirit of
//! `http.DetectContentType`: a short table of magic-byte signatures, with
//! a UTF-8 text vs. binary fallback. Text results carry a `charset`
//! parameter; [`strip_charset`] is the inverse for callers that want the
//! bare type.

const SIGNATURES: &[(&[u8], &str)] = &[
	(b"%PDF-", "application/pdf"),
	(b"\x89PNG\r\n\x1a\n", "image/png"),
	(b"\xff\xd8\xff", "image/jpeg"),
	(b"GIF87a", "image/gif"),
	(b"GIF89a", "image/gif"),
	(b"PK\x03\x04", "application/zip"),
	(b"\x1f\x8b", "application/gzip"),
	(b"%!PS-Adobe", "application/postscript"),
	(b"BM", "image/bmp"),
];

/// Sniffs `body`'s MIME type. Binary formats are matched by signature;
/// anything else that looks like valid UTF-8 is reported as
/// `text/plain; charset=utf-8`, otherwise `application/octet-stream`.
pub fn sniff(body: &[u8]) -> String {
	for (sig, mime) in SIGNATURES {
		if body.starts_with(sig) {
			return mime.to_string();
		}
	}
	if looks_like_utf8_text(body) {
		"text/plain; charset=utf-8".to_string()
	} else {
		"application/octet-stream".to_string()
	}
}

fn looks_like_utf8_text(body: &[u8]) -> bool {
	let sample = &body[..body.len().min(512)];
	!sample.contains(&0) && std::str::from_utf8(sample).is_ok()
}

/// Strips a trailing `; charset=...` (or any other parameter) from a MIME
/// string, leaving the bare type.
pub fn strip_charset(mime: &str) -> &str {
	mime.split(';').next().unwrap_or(mime).trim()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn detects_known_signatures() {
		assert_eq!(sniff(b"%PDF-1.4 ..."), "application/pdf");
		assert_eq!(sniff(b"\x89PNG\r\n\x1a\nrest"), "image/png");
		assert_eq!(sniff(b"\xff\xd8\xffrest"), "image/jpeg");
		assert_eq!(sniff(b"GIF89arest"), "image/gif");
		assert_eq!(sniff(b"PK\x03\x04rest"), "application/zip");
	}

	#[test]
	fn plain_text_gets_charset_and_binary_falls_back() {
		assert_eq!(sniff(b"hello, world"), "text/plain; charset=utf-8");
		assert_eq!(sniff(&[0u8, 1, 2, 3, 255]), "application/octet-stream");
	}

	#[test]
	fn strip_charset_keeps_bare_type() {
		assert_eq!(strip_charset("text/plain; charset=utf-8"), "text/plain");
		assert_eq!(strip_charset("image/png"), "image/png");
	}
}
