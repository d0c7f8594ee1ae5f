//! # corpus-dl
//!
//! Batch downloader for an author's plain-text works from a public library
//! REST API.
//!
//! Given an author identifier, corpus-dl enumerates that author's works,
//! filters out multi-part collections and works in other languages, downloads
//! the plain-text body of each remaining single work, and writes each to a
//! local file named after the final path segment of its source URL.
//!
//! ## Design Philosophy
//!
//! - **Bounded concurrency** - requests run in fixed-size sequential batches,
//!   never flooding the remote service
//! - **Trust nothing** - every consumed field of an API payload is shape
//!   validated before use
//! - **Fail loud** - any request or filesystem failure stops the run instead
//!   of silently producing an incomplete archive
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use corpus_dl::{Archiver, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         author: "adam-mickiewicz".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let summary = Archiver::new(config)?.run().await?;
//!     println!("{} texts written", summary.written);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Archiving run orchestration
pub mod archiver;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bounded-concurrency batched fetch-and-fold
pub mod fetch;
/// Progress reporting seam
pub mod progress;
/// Shape validation for untrusted API payloads
pub mod shape;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use archiver::{Archiver, RunSummary};
pub use config::Config;
pub use error::{Error, Result, ShapeMismatch};
pub use fetch::{Batch, BatchFetcher, FetchedResponse};
pub use progress::{LogProgress, NoOpProgress, Phase, ProgressSink};
pub use shape::{Contract, FieldRule, WorkDetail, WorkSummary};
