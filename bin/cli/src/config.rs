// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blobidx")]
#[command(about = "Offline scanner and index for a content-addressed blob store", long_about = None)]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Scan the blob store and (re)build the index, resuming from the last
	/// completed token unless `--restart` is given.
	Scan {
		/// Directory holding the index database
		#[arg(long, env = "BLOBIDX_DB_DIR")]
		db_dir: PathBuf,
		/// Directory holding the blob store
		#[arg(long, env = "BLOBIDX_BLOB_DIR")]
		blob_dir: PathBuf,
		/// Ignore the last resume token and scan from the start
		#[arg(long)]
		restart: bool,
	},

	/// Print every ref the index knows is missing, and for each
	/// unreachable one, the tree of blobs that transitively reference it.
	Missing {
		#[arg(long, env = "BLOBIDX_DB_DIR")]
		db_dir: PathBuf,
		#[arg(long, env = "BLOBIDX_BLOB_DIR")]
		blob_dir: PathBuf,
	},

	/// Print global counts and per-kind / per-MIME tables.
	Stats {
		#[arg(long, env = "BLOBIDX_DB_DIR")]
		db_dir: PathBuf,
	},

	/// Print refs carrying the given schema kind, or every typed ref if
	/// `--camli-type` is omitted.
	List {
		#[arg(long, env = "BLOBIDX_DB_DIR")]
		db_dir: PathBuf,
		/// Schema kind to filter by (e.g. "file", "directory"); empty lists
		/// every typed ref
		#[arg(long = "camliType", default_value = "")]
		camli_type: String,
	},

	/// Classify the MIME type of every `file` ref and record it in the
	/// index.
	Mime {
		#[arg(long, env = "BLOBIDX_DB_DIR")]
		db_dir: PathBuf,
		#[arg(long, env = "BLOBIDX_BLOB_DIR")]
		blob_dir: PathBuf,
		/// Number of concurrent classification workers
		#[arg(long, default_value = "1", value_parser = blobidx_workers::parse_worker_count)]
		workers: usize,
	},

	/// Concatenate the given blobs' raw bodies to stdout.
	Cat {
		#[arg(long, env = "BLOBIDX_BLOB_DIR")]
		blob_dir: PathBuf,
		/// Refs to fetch and print, in order
		refs: Vec<String>,
	},

	/// Emit a tar stream of the reassembled files named by refs on stdin.
	Tar {
		#[arg(long, env = "BLOBIDX_BLOB_DIR")]
		blob_dir: PathBuf,
	},
}
