//! Output pipeline: generate, encode, compress, write.
//!
//! A run produces two artifacts next to each other:
//!
//! - `{stem}_{count}.bin` holds the raw encoded backup.
//! - `{stem}_{count}.gz` holds the same bytes as a gzip stream.
//!
//! Consumers must gunzip the `.gz` artifact before decoding it and must read
//! the `.bin` artifact as-is. [`verify`] checks that both hold the same
//! backup.

use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::generator::{LibraryGenerator, LibraryStats};
use crate::message::Encode;
use crate::schema::BackupSummary;

/// Books generated when no usable count is given
pub const DEFAULT_BOOK_COUNT: usize = 10_500;

/// gzip level of the compressed artifact
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// File name prefix of both artifacts
pub const DEFAULT_FILE_STEM: &str = "test_backup";

/// Configuration for one run of the pipeline
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory both artifacts are written to
    pub output_dir: PathBuf,
    /// Number of books to generate
    pub book_count: usize,
    /// gzip level, 0-9
    pub compression_level: u32,
    /// File name prefix
    pub file_stem: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            book_count: DEFAULT_BOOK_COUNT,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

impl OutputConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the number of books
    pub fn book_count(mut self, count: usize) -> Self {
        self.book_count = count;
        self
    }

    /// Sets the gzip level, capped at 9
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    /// Sets the file name prefix
    pub fn file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Paths of the artifacts this config produces
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let base = format!("{}_{}", self.file_stem, self.book_count);
        ArtifactPaths {
            raw: self.output_dir.join(format!("{}.bin", base)),
            compressed: self.output_dir.join(format!("{}.gz", base)),
        }
    }
}

/// Locations of the two artifacts of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Raw encoded backup
    pub raw: PathBuf,
    /// gzip of the raw backup
    pub compressed: PathBuf,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the artifacts were written
    pub paths: ArtifactPaths,
    /// Totals over the generated library
    pub stats: LibraryStats,
    /// Names of the categories in the backup, in order
    pub categories: Vec<String>,
    /// Size of the raw artifact in bytes
    pub raw_size: usize,
    /// Size of the compressed artifact in bytes
    pub compressed_size: usize,
    /// blake3 of the raw artifact, hex encoded
    pub digest: String,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

fn megabytes(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Uncompressed file: {} ({:.2} MB, raw backup bytes)",
            self.paths.raw.display(),
            megabytes(self.raw_size)
        )?;
        writeln!(
            f,
            "Compressed file: {} ({:.2} MB, gzip, gunzip before decoding)",
            self.paths.compressed.display(),
            megabytes(self.compressed_size)
        )?;
        writeln!(f, "blake3: {}", self.digest)?;
        writeln!(f, "Time: {:.1} seconds", self.elapsed.as_secs_f64())?;
        writeln!(f)?;
        writeln!(f, "{}", self.stats)?;
        writeln!(f)?;
        write!(f, "--- Categories ---")?;
        for name in &self.categories {
            write!(f, "\n  {}", name)?;
        }
        Ok(())
    }
}

/// gzip `data` at `level`
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 4), Compression::new(level));
    encoder.write_all(data).map_err(Error::Compression)?;
    encoder.finish().map_err(Error::Compression)
}

/// Inflate a gzip stream
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() * 4);
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(Error::Compression)?;
    Ok(out)
}

/// Generate `config.book_count` books and write both artifacts.
///
/// A failure while writing leaves whatever was already on disk; the run
/// is not retried.
pub fn run(generator: &mut LibraryGenerator, config: &OutputConfig) -> Result<RunReport> {
    let started = Instant::now();
    let paths = config.artifact_paths();

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| Error::directory_create(&config.output_dir, e))?;

    info!("Generating test backup with {} books", config.book_count);
    let library = generator.generate(config.book_count);

    info!("Serializing {} chapters", library.stats.chapters_total);
    let data = library.backup.encode_to_vec()?;
    let stats = library.stats;
    let categories = library.backup.categories.into_iter().map(|c| c.name).collect();
    debug!("Encoded backup is {} bytes", data.len());

    info!("Writing uncompressed to: {}", paths.raw.display());
    write_artifact(&paths.raw, &data)?;

    info!("Compressing with gzip (level {})", config.compression_level);
    let compressed = compress(&data, config.compression_level)?;

    info!("Writing compressed to: {}", paths.compressed.display());
    write_artifact(&paths.compressed, &compressed)?;

    Ok(RunReport {
        digest: blake3::hash(&data).to_hex().to_string(),
        raw_size: data.len(),
        compressed_size: compressed.len(),
        paths,
        stats,
        categories,
        elapsed: started.elapsed(),
    })
}

/// Read both artifacts back, check that they agree and decode the backup
pub fn verify(paths: &ArtifactPaths) -> Result<BackupSummary> {
    let raw = fs::read(&paths.raw).map_err(|e| Error::file_read(&paths.raw, e))?;
    let compressed =
        fs::read(&paths.compressed).map_err(|e| Error::file_read(&paths.compressed, e))?;

    let inflated = decompress(&compressed)?;
    if inflated != raw {
        return Err(Error::artifact_mismatch(format!(
            "{} does not inflate to the contents of {}",
            paths.compressed.display(),
            paths.raw.display()
        )));
    }

    BackupSummary::from_bytes(&raw)
}

fn write_artifact(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| Error::file_write(path, e))?;
    file.write_all(data).map_err(|e| Error::file_write(path, e))?;
    file.flush().map_err(|e| Error::file_write(path, e))
}
