//! End-to-end tests: CSV on disk through to the analysis report.

use std::fmt::Write as _;
use std::fs;
use std::sync::Arc;

use cache_timing_analysis::{
    analyze, analyze_concurrent, analyze_path, load_csv_path, AnalysisError, AnalysisSettings,
};

/// Number of probed addresses (64 KiB at 64-byte cache lines)
const ADDRESSES: u64 = 1024;
const TRIALS: usize = 50;
const LINE_SIZE: u64 = 64;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Synthetic probe output: every fourth trial of an address is a miss.
fn probe_csv() -> String {
    let mut out = String::from("Address");
    for t in 0..TRIALS {
        write!(out, ",Time_{t}").unwrap();
    }
    out.push('\n');
    for a in 0..ADDRESSES {
        write!(out, "{}", a * LINE_SIZE).unwrap();
        for t in 0..TRIALS {
            let cycles = if t % 4 == 0 {
                280 + (a + t as u64) % 20
            } else {
                38 + (a * 7 + t as u64) % 10
            };
            write!(out, ",{cycles}").unwrap();
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_loader_reproduces_rows() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache_timing_results.csv");
    fs::write(&path, probe_csv()).unwrap();

    let matrix = load_csv_path(&path).unwrap();
    assert_eq!(matrix.len(), ADDRESSES as usize);
    assert_eq!(matrix.trials(), TRIALS);
    assert!(matrix.rows().iter().all(|r| r.samples.len() == TRIALS));
    let expected: Vec<u64> = (0..ADDRESSES).map(|a| a * LINE_SIZE).collect();
    assert_eq!(matrix.addresses(), expected);
}

#[test]
fn test_report_from_file() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache_timing_results.csv");
    fs::write(&path, probe_csv()).unwrap();

    let report = analyze_path(&path, &AnalysisSettings::default()).unwrap();

    assert_eq!(report.addresses.len(), ADDRESSES as usize);
    assert_eq!(report.global.min, 38);
    assert_eq!(report.global.max, 299);
    for stats in &report.addresses {
        let s = &stats.summary;
        assert!(s.min as f64 <= s.median && s.median <= s.max as f64);
        assert!(s.min as f64 <= s.mean && s.mean <= s.max as f64);
    }

    // Hits occupy 38..=47, misses 280..=299.
    let threshold = report.threshold.as_ref().unwrap();
    assert_eq!((threshold.lower, threshold.upper), (47, 280));
    assert_eq!(threshold.value, 163.5);

    let misses: usize = report.classification.iter().map(|c| c.counts.misses).sum();
    let per_address_misses = (0..TRIALS).filter(|t| t % 4 == 0).count();
    assert_eq!(misses, per_address_misses * ADDRESSES as usize);

    assert_eq!(report.histogram.total(), ADDRESSES as usize * TRIALS);
    let bins = report.histogram.bins();
    assert_eq!(bins.first().unwrap().range_start, 38.0);
    assert_eq!(bins.last().unwrap().range_end, 299.0);
}

#[tokio::test]
async fn test_concurrent_report_matches_sequential() {
    init_tracing();
    let matrix = cache_timing_analysis::load_csv_reader(probe_csv().as_bytes()).unwrap();
    let settings = AnalysisSettings::from_json_str(r#"{ "Bins": 100, "OutlierPercentile": 99.0 }"#)
        .unwrap();

    let sequential = analyze(&matrix, &settings).unwrap();
    let concurrent = analyze_concurrent(Arc::new(matrix), settings).await.unwrap();
    assert_eq!(concurrent, sequential);
    assert_eq!(concurrent.histogram.bins().len(), 100);
}

#[test]
fn test_malformed_file_aborts_without_partial_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache_timing_results.csv");
    fs::write(&path, "Address,Time_0,Time_1\n0,40,41\n64,40,N/A\n").unwrap();

    let err = analyze_path(&path, &AnalysisSettings::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedInput { line: 3, .. }));
}

#[test]
fn test_header_only_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache_timing_results.csv");
    fs::write(&path, "Address,Time_0,Time_1\n").unwrap();

    let err = analyze_path(&path, &AnalysisSettings::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyInput));
}
