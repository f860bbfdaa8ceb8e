//! # shelfgen-core
//!
//! A library for generating large, internally consistent reading-library
//! backups and encoding them in protobuf wire format.
//!
//! This crate provides the core functionality for:
//! - Encoding scalars and fields in protobuf wire format
//! - Composing backup records into length-delimited, default-omitting messages
//! - Generating books, chapters, history and categories that agree with each other
//! - Writing the raw and gzip-compressed backup artifacts
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`wire`]: Varint, zigzag, fixed-width and length-delimited encoders
//! - [`message`]: Record composition on top of the wire encoders
//! - [`model`]: The backup records
//! - [`generator`]: Seeded synthetic library generation
//! - [`output`]: Generation, encoding, compression and artifact writing
//! - [`schema`]: `prost` mirror of the schema for reading artifacts back
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use shelfgen_core::{output, GeneratorConfig, LibraryGenerator, OutputConfig};
//!
//! let mut generator = LibraryGenerator::with_config(GeneratorConfig::new().seed(7));
//! let config = OutputConfig::new().output_dir("./out").book_count(1_000);
//!
//! let report = output::run(&mut generator, &config)?;
//! let summary = output::verify(&report.paths)?;
//! assert_eq!(summary.books, 1_000);
//! # Ok::<(), shelfgen_core::Error>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`Encode`]: Make any record encodable with the same omission rules
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod generator;
pub mod message;
pub mod model;
pub mod output;
pub mod schema;
pub mod wire;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, LibraryGenerator, LibraryStats, ReadingStatus};
pub use message::{Encode, MessageBuilder};
pub use model::{Backup, Book, Category, Chapter, History, PublicationStatus};
pub use output::{ArtifactPaths, OutputConfig, RunReport};
pub use schema::BackupSummary;

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
