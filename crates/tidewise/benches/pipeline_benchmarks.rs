//! Pipeline performance benchmarks.
//!
//! Measures ingestion across file sizes and both pipeline variants.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tidewise::dates::normalize_date;
use tidewise::input::{split_fields, DelimiterRule};
use tidewise::{CsvIngestionPipeline, PipelineConfig};

/// Generate a synthetic logger export with the given number of rows and series.
fn generate_csv_data(rows: usize, series: usize) -> String {
    let mut data = String::from("Date");
    for i in 0..series {
        data.push_str(&format!(",Sensor_{}", i + 1));
    }
    data.push_str(",Rec\n");

    for row in 0..rows {
        let day = (row % 28) + 1;
        let month = (row / 28 % 12) + 1;
        data.push_str(&format!("{:02}/{:02}/2023 {:02}:00", day, month, row % 24));
        for col in 0..series {
            // Sprinkle in missing and non-numeric cells
            match (row + col) % 50 {
                0 => data.push(','),
                1 => data.push_str(",err"),
                _ => data.push_str(&format!(",{:.2}", (row * (col + 1)) as f64 * 0.25)),
            }
        }
        data.push_str(&format!(",{}\n", row + 1));
    }

    data
}

/// Benchmark the plot-instance pipeline on files of various sizes.
fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    let pipeline = CsvIngestionPipeline::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 8);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| pipeline.ingest(black_box(data), "bench.csv"))
        });
    }

    group.finish();
}

/// Standalone variant skips date normalization.
fn bench_ingest_standalone(c: &mut Criterion) {
    let data = generate_csv_data(10_000, 8);
    let pipeline = CsvIngestionPipeline::with_config(PipelineConfig::standalone());

    c.bench_function("ingest_standalone_10k", |b| {
        b.iter(|| pipeline.ingest(black_box(&data), "bench.csv"))
    });
}

fn bench_tokenize(c: &mut Criterion) {
    let line = "2023-06-01 12:00,\"1,234.5\",2.5,,err,3.75,4,5,6,7";

    c.bench_function("split_fields", |b| {
        b.iter(|| split_fields(black_box(line), DelimiterRule::Punctuation))
    });
}

fn bench_dates(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_date");

    for token in ["2023-06-01T12:00:00Z", "01/06/2023 12:00", "06/13/2023", "not a date"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), &token, |b, token| {
            b.iter(|| normalize_date(black_box(token)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ingest,
    bench_ingest_standalone,
    bench_tokenize,
    bench_dates
);
criterion_main!(benches);
