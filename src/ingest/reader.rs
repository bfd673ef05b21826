use anyhow::{anyhow, Context, Result};
use crossbeam_channel::bounded;
use flate2::read::GzDecoder;
use log::debug;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;

use crate::common::create_spinner;

use super::tables::{parse_line, ParsedRecord, TableBuilder};

/// Batches in flight between the reader thread and the parser
const CHANNEL_CAPACITY: usize = 4;

/// (1-based line number, line)
type LineBatch = Vec<(usize, String)>;

/// Open a possibly gzipped input file for buffered reading
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let is_gz = path.extension().map_or(false, |ext| ext == "gz");
    if is_gz {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read the metadata dump and accumulate the paper tables.
///
/// A reader thread cuts the input into line batches; each batch is parsed in
/// parallel on `pool` and pushed into the builder in file order, so "first
/// seen" means first in the file. The first malformed line aborts the read.
pub fn ingest_metadata<R>(reader: R, batch_size: usize, pool: &ThreadPool) -> Result<TableBuilder>
where
    R: BufRead + Send + 'static,
{
    let batch_size = batch_size.max(1);
    let (sender, receiver) = bounded::<Result<LineBatch>>(CHANNEL_CAPACITY);

    let reader_thread = thread::spawn(move || {
        let mut batch: LineBatch = Vec::with_capacity(batch_size);

        for (idx, line) in reader.lines().enumerate() {
            match line {
                Ok(line) => {
                    batch.push((idx + 1, line));
                    if batch.len() >= batch_size {
                        let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
                        if sender.send(Ok(full)).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    let err = anyhow::Error::from(e).context(format!("Failed to read line {}", idx + 1));
                    let _ = sender.send(Err(err));
                    return;
                }
            }
        }

        if !batch.is_empty() {
            let _ = sender.send(Ok(batch));
        }
    });

    let progress = create_spinner("Parsing metadata records...");
    let mut builder = TableBuilder::new();

    for batch in receiver {
        let batch = batch?;
        builder.lines_read += batch.len();

        let parsed: Vec<ParsedRecord> = pool.install(|| {
            batch
                .par_iter()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(line_no, line)| parse_line(line, *line_no))
                .collect::<Result<Vec<_>>>()
        })?;

        for record in parsed {
            builder.push(record);
        }

        debug!("Parsed batch ending at line {}", builder.lines_read);
        progress.set_message(format!(
            "{} lines | {} papers | {} duplicates",
            builder.lines_read,
            builder.paper_count(),
            builder.duplicate_records
        ));
    }

    progress.finish_with_message("Metadata parsing complete");

    reader_thread
        .join()
        .map_err(|_| anyhow!("Metadata reader thread panicked"))?;

    Ok(builder)
}

/// Build a rayon pool; `threads == 0` means one thread per CPU core
pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    let threads = if threads == 0 { num_cpus::get() } else { threads };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn dump(ids: &[&str]) -> String {
        ids.iter()
            .map(|id| {
                format!(
                    r#"{{"id": "{}", "title": "t", "abstract": "a", "authors": "x", "journal-ref": null, "categories": ["cs.AI"], "versions": ["v1"]}}"#,
                    id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_ingest_preserves_file_order_across_batches() {
        let pool = build_pool(2).unwrap();
        let input = dump(&["0704.0003", "0704.0001", "0704.0002", "0704.0001"]);
        let builder = ingest_metadata(Cursor::new(input), 1, &pool).unwrap();

        assert_eq!(builder.lines_read, 4);
        assert_eq!(builder.duplicate_records, 1);
        let tables = builder.finish().unwrap();
        let ids: Vec<_> = tables.papers.column("id").unwrap().str().unwrap().into_iter().flatten().collect();
        assert_eq!(ids, vec!["0704.0003", "0704.0001", "0704.0002"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let pool = build_pool(1).unwrap();
        let input = format!("{}\n\n   \n", dump(&["0704.0001"]));
        let builder = ingest_metadata(Cursor::new(input), 10, &pool).unwrap();
        assert_eq!(builder.records_parsed, 1);
    }

    #[test]
    fn test_malformed_line_aborts() {
        let pool = build_pool(1).unwrap();
        let input = format!("{}\n{{not json", dump(&["0704.0001"]));
        let err = ingest_metadata(Cursor::new(input), 10, &pool).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
