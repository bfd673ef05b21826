use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

// Import from the library
use arxiv_citation_explorer::ingest::{parse_line, parse_year_month};

fn bench_year_month_parsing(c: &mut Criterion) {
    let ids = vec![
        "0704.0001",
        "1801.00001",
        "2301.12345",
        "hep-th/9912001",
        "math.CO/0503123",
    ];

    let mut group = c.benchmark_group("year_month");
    group.throughput(Throughput::Elements(ids.len() as u64));

    group.bench_function("parse_year_month", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(parse_year_month(id).ok());
            }
        })
    });

    group.finish();
}

fn bench_record_parsing(c: &mut Criterion) {
    let lines: Vec<String> = (0..1_000)
        .map(|i| {
            format!(
                r#"{{"id": "2101.{:05}", "submitter": "A. Author", "authors": "A. Author, B. Author", "title": "A study of things {}", "comments": "10 pages", "journal-ref": null, "doi": null, "report-no": null, "categories": "cs.LG stat.ML", "license": null, "abstract": "We study things in considerable detail.", "versions": [{{"version": "v1", "created": "Mon, 4 Jan 2021 00:00:00 GMT"}}, {{"version": "v2", "created": "Tue, 5 Jan 2021 00:00:00 GMT"}}], "update_date": "2021-01-05", "authors_parsed": [["Author", "A.", ""]]}}"#,
                i, i
            )
        })
        .collect();

    let mut group = c.benchmark_group("record_parsing");
    group.throughput(Throughput::Elements(lines.len() as u64));

    group.bench_function("parse_line", |b| {
        b.iter(|| {
            for (idx, line) in lines.iter().enumerate() {
                black_box(parse_line(line, idx + 1).ok());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_year_month_parsing, bench_record_parsing);
criterion_main!(benches);
