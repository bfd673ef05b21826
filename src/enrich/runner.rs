use anyhow::{ensure, Result};
use futures::stream::{self, StreamExt};
use log::{debug, info};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

use crate::common::{create_lookup_progress_bar, format_elapsed, EnrichStats};

use super::IdTranslator;

/// Multiplier for buffer_unordered capacity relative to concurrency
const BUFFER_CAPACITY_MULTIPLIER: usize = 2;

/// Column holding the external cross-reference id
pub const EXTERNAL_ID_COLUMN: &str = "cp_id";

/// Default number of concurrent lookups; the service blocks aggressive clients
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub concurrency: usize,
    pub timeout: Duration,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Distinct ids in first-seen order
pub fn distinct_ids(ids: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    let mut distinct = Vec::new();
    for id in ids {
        if seen.insert(id.as_str()) {
            distinct.push(id.clone());
        }
    }
    distinct
}

/// Look up every id once. Failed or timed out lookups map to an empty string.
pub async fn resolve_ids<T: IdTranslator>(
    translator: &T,
    ids: Vec<String>,
    config: &EnrichConfig,
) -> HashMap<String, String> {
    let concurrency = config.concurrency.max(1);
    let timeout = config.timeout;
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let failed_count = Arc::new(AtomicUsize::new(0));
    let progress = create_lookup_progress_bar(ids.len() as u64);

    let results: Vec<(String, String)> = stream::iter(ids.into_iter())
        .map(|id| {
            let semaphore = semaphore.clone();
            let failed = failed_count.clone();
            let progress = progress.clone();

            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("semaphore should never be closed");

                let value = match tokio::time::timeout(timeout, translator.translate(&id)).await {
                    Ok(Ok(value)) => value,
                    Ok(Err(e)) => {
                        debug!("Lookup failed for {}: {:#}", id, e);
                        failed.fetch_add(1, Ordering::Relaxed);
                        String::new()
                    }
                    Err(_) => {
                        debug!("Lookup timed out for {}", id);
                        failed.fetch_add(1, Ordering::Relaxed);
                        String::new()
                    }
                };

                progress.inc(1);
                (id, value)
            }
        })
        .buffer_unordered(concurrency * BUFFER_CAPACITY_MULTIPLIER)
        .collect()
        .await;

    progress.finish_with_message(format!(
        "Lookups complete ({} failed)",
        failed_count.load(Ordering::Relaxed)
    ));

    results.into_iter().collect()
}

/// Append the external id column, aborting if it does not line up with the rows
pub fn attach_external_ids(mut df: DataFrame, values: Vec<String>) -> Result<DataFrame> {
    ensure!(
        values.len() == df.height(),
        "Unexpected mismatch between cross-reference ids ({}) and influential rows ({})",
        values.len(),
        df.height()
    );

    df.with_column(Column::new(EXTERNAL_ID_COLUMN.into(), values))?;
    Ok(df)
}

/// Fill the external id column with empty strings, without any lookup
pub fn blank_external_ids(df: DataFrame) -> Result<DataFrame> {
    let values = vec![String::new(); df.height()];
    attach_external_ids(df, values)
}

fn id_column(df: &DataFrame) -> Result<Vec<String>> {
    Ok(df
        .column("id")?
        .str()?
        .into_iter()
        .map(|id| id.unwrap_or("").to_string())
        .collect())
}

/// Add the `cp_id` column to the influential table.
///
/// Each distinct id is looked up once; repeated ids reuse that result. The
/// returned frame has exactly as many rows as the input.
pub async fn enrich_influential<T: IdTranslator>(
    df: DataFrame,
    translator: &T,
    config: &EnrichConfig,
) -> Result<(DataFrame, EnrichStats)> {
    let start = Instant::now();
    let ids = id_column(&df)?;
    let distinct = distinct_ids(&ids);

    info!(
        "Looking up {} distinct ids for {} rows (concurrency {}, timeout {:?})",
        distinct.len(),
        ids.len(),
        config.concurrency,
        config.timeout
    );

    let resolved = resolve_ids(translator, distinct.clone(), config).await;

    let values: Vec<String> = ids
        .iter()
        .map(|id| resolved.get(id).cloned().unwrap_or_default())
        .collect();

    let resolved_count = resolved.values().filter(|v| !v.is_empty()).count();
    let stats = EnrichStats {
        rows: ids.len(),
        distinct_ids: distinct.len(),
        resolved: resolved_count,
        failed: distinct.len() - resolved_count,
    };

    let df = attach_external_ids(df, values)?;

    info!(
        "Enrichment complete in {}: {} resolved, {} failed",
        format_elapsed(start.elapsed()),
        stats.resolved,
        stats.failed
    );

    Ok((df, stats))
}
