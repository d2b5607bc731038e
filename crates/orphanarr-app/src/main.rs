#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that runs one orphan analysis pass and exits.

use orphanarr_app::{AppResult, run_app};

/// Runs the orphan finder once.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
