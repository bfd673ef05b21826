use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Row group size used for every Parquet table written by the pipeline
pub const PARQUET_ROW_GROUP_SIZE: usize = 250_000;

/// Paths of the four normalized tables produced by ingest
#[derive(Debug, Clone)]
pub struct TablePaths {
    pub papers: PathBuf,
    pub versions: PathBuf,
    pub categories: PathBuf,
    pub citations: PathBuf,
}

impl TablePaths {
    /// "tables/" -> "tables/papers.parquet", "tables/versions.parquet", ...
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            papers: dir.join("papers.parquet"),
            versions: dir.join("versions.parquet"),
            categories: dir.join("categories.parquet"),
            citations: dir.join("citations.parquet"),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [&self.papers, &self.versions, &self.categories, &self.citations]
    }

    /// Fail with the first missing table, if any
    pub fn ensure_exist(&self) -> Result<()> {
        for path in self.all() {
            if !path.exists() {
                anyhow::bail!("Missing input table: {}", path.display());
            }
        }
        Ok(())
    }
}

/// Paths of the dashboard-facing artifacts produced by build
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub category_sizes: PathBuf,
    pub influential: PathBuf,
    pub influential_csv: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            category_sizes: dir.join("category_sizes.parquet"),
            influential: dir.join("influential.parquet"),
            influential_csv: dir.join("influential.csv"),
        }
    }
}

/// Create a directory (and parents) if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// Write a DataFrame to a Zstd-compressed Parquet file, overwriting it
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .with_row_group_size(Some(PARQUET_ROW_GROUP_SIZE))
        .finish(df)
        .with_context(|| format!("Failed to write Parquet: {}", path.display()))?;

    Ok(())
}

/// Write a DataFrame to CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;

    Ok(())
}

/// Lazily scan a Parquet table
pub fn scan_parquet(path: &Path) -> Result<LazyFrame> {
    LazyFrame::scan_parquet(path, Default::default())
        .with_context(|| format!("Failed to scan Parquet file: {}", path.display()))
}

/// Eagerly read a Parquet table
pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    scan_parquet(path)?
        .collect()
        .with_context(|| format!("Failed to read Parquet file: {}", path.display()))
}
