// Copyright (c) 2026 blobidx contributors
// This file is licensed under the Apache-2.0, see LICENSE file

mod commands;
mod config;

use clap::Parser;
use config::{Cli, Command};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() {
	tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

	let cli = Cli::parse();
	if let Err(e) = run(cli) {
		tracing::error!(error = %e, "command failed");
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	match cli.command {
		Command::Scan { db_dir, blob_dir, restart } => commands::scan::run(&db_dir, &blob_dir, restart),
		Command::Missing { db_dir, blob_dir } => commands::missing::run(&db_dir, &blob_dir),
		Command::Stats { db_dir } => commands::stats::run(&db_dir),
		Command::List { db_dir, camli_type } => commands::list::run(&db_dir, &camli_type),
		Command::Mime { db_dir, blob_dir, workers } => commands::mime::run(&db_dir, &blob_dir, workers),
		Command::Cat { blob_dir, refs } => commands::cat::run(&blob_dir, &refs),
		Command::Tar { blob_dir } => commands::tar::run(&blob_dir),
	}
}
