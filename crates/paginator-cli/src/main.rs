//! Helios Paginator CLI
//!
//! Pages through a JSON array of records with opaque cursors.
//!
//! ```text
//! paginate --file books.json --field id --limit 3
//! paginate --file books.json --field id --limit 3 --cursor eyJEaXJlY3Rpb25OZXh0Ijp0cnVlLCJWYWx1ZSI6IjQifQ==
//! ```

mod source;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use helios_paginator::{Page, PageRequest, PaginationConfig, init_logging};
use tracing::info;

use crate::source::MemorySource;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "paginate")]
#[command(about = "Paginate a JSON array of records with opaque cursors")]
struct Cli {
    /// JSON file holding an array of records.
    #[arg(short, long)]
    file: PathBuf,

    /// Boundary field used for ordering and cursors.
    #[arg(long, env = "PAGINATOR_FIELD", default_value = "id")]
    field: String,

    /// Page size. Falls back to the configured default.
    #[arg(short, long)]
    limit: Option<usize>,

    /// Cursor token from a previous page.
    #[arg(short, long)]
    cursor: Option<String>,

    #[command(flatten)]
    config: PaginationConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.config.log_level);

    if let Err(errors) = cli.config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let request = PageRequest::from_config(&cli.config, cli.limit, cli.cursor.as_deref())
        .context("Invalid cursor")?;

    info!(
        file = %cli.file.display(),
        field = %cli.field,
        limit = request.limit(),
        direction = ?request.direction(),
        "Paginating"
    );

    let source = MemorySource::load(&cli.file, &cli.field)?;
    let fetched = source.fetch(&request);

    // Only report a previous page when one exists
    let incoming = if fetched.has_before {
        request.boundary_value()
    } else {
        ""
    };

    let page = Page::new(fetched.records, request.limit(), source.field(), incoming)?;
    info!(
        total = page.total(),
        has_prev = page.has_prev(),
        has_next = page.has_next(),
        "Page built"
    );

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
