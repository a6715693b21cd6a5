use memtrace_analysis::aggregator::{
    aggregate_reads, format_frequency_table, merge_maps, AddressFrequencyMap, FrequencyReport,
};
use memtrace_analysis::output::{read_report, write_report, write_trace};
use memtrace_analysis::record::{encode_all, TraceRecord};
use memtrace_analysis::utils::config::AnalysisConfig;
use memtrace_analysis::utils::error::TraceError;
use pretty_assertions::assert_eq;

fn config(chunk_capacity: usize, workers: usize) -> AnalysisConfig {
    AnalysisConfig {
        chunk_capacity,
        workers: Some(workers),
    }
}

fn map(entries: &[(i64, u64)]) -> AddressFrequencyMap {
    entries.iter().copied().collect()
}

#[test]
fn test_merge_is_order_independent() {
    let x = 1;
    let y = 2;
    let z = 3;
    let a = map(&[(x, 2), (y, 0)]);
    let b = map(&[(x, 1), (z, 0)]);
    let expected = map(&[(x, 3), (y, 0), (z, 0)]);

    assert_eq!(merge_maps(vec![a.clone(), b.clone()]), expected);
    assert_eq!(merge_maps(vec![b, a]), expected);
}

#[test]
fn test_read_repeats_across_two_chunks_two_workers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    // Chunk 0: records 0..2, chunk 1: records 2..4
    write_trace(
        &path,
        &[
            TraceRecord::read(100, 4),
            TraceRecord::read(100, 4),
            TraceRecord::write(100, 4),
            TraceRecord::read(100, 4),
        ],
    )
    .unwrap();

    let result = aggregate_reads(&path, &config(2, 2)).unwrap();
    assert_eq!(result.chunks, 2);
    assert_eq!(result.workers, 2);
    assert_eq!(result.total_records, 4);
    assert_eq!(result.records_processed, 4);
    // Repeats count beyond the first sighting in each worker, then add on merge:
    // worker 0 sees 100 twice (1 repeat), worker 1 once (0 repeats)
    assert_eq!(result.frequencies.repeats(100), Some(1));
}

#[test]
fn test_three_reads_in_one_worker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    write_trace(
        &path,
        &[
            TraceRecord::read(100, 4),
            TraceRecord::call(7),
            TraceRecord::read(100, 4),
            TraceRecord::ret(8),
            TraceRecord::read(100, 4),
            TraceRecord::read(200, 8),
        ],
    )
    .unwrap();

    let result = aggregate_reads(&path, &config(2, 1)).unwrap();
    assert_eq!(result.frequencies.repeats(100), Some(2));
    assert_eq!(result.frequencies.repeats(200), Some(0));
    assert_eq!(result.frequencies.len(), 2);
}

#[test]
fn test_result_independent_of_schedule_for_fixed_workers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    let records: Vec<_> = (0..1000)
        .map(|i| TraceRecord::read((i * 7) % 13, 4))
        .collect();
    write_trace(&path, &records).unwrap();

    let first = aggregate_reads(&path, &config(16, 4)).unwrap();
    for _ in 0..5 {
        let again = aggregate_reads(&path, &config(16, 4)).unwrap();
        assert_eq!(again.frequencies, first.frequencies);
    }
    assert_eq!(first.records_processed, 1000);
}

#[test]
fn test_more_workers_than_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    write_trace(&path, &[TraceRecord::read(1, 1), TraceRecord::read(1, 1)]).unwrap();

    let result = aggregate_reads(&path, &config(1024, 8)).unwrap();
    assert_eq!(result.chunks, 1);
    assert_eq!(result.frequencies.repeats(1), Some(1));
}

#[test]
fn test_empty_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    write_trace(&path, &[]).unwrap();

    let result = aggregate_reads(&path, &config(4, 2)).unwrap();
    assert_eq!(result.chunks, 0);
    assert!(result.frequencies.is_empty());
}

#[test]
fn test_corrupt_length_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    let mut bytes = encode_all(&[TraceRecord::read(1, 1)]);
    bytes.extend_from_slice(&[0u8; 3]);
    std::fs::write(&path, bytes).unwrap();

    assert!(matches!(
        aggregate_reads(&path, &config(4, 2)),
        Err(TraceError::CorruptTraceLength { len: 19, record_size: 16 })
    ));
}

#[test]
fn test_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.bin");
    write_trace(&path, &[TraceRecord::read(0x40, 8), TraceRecord::read(0x40, 8)]).unwrap();

    let result = aggregate_reads(&path, &config(1, 2)).unwrap();
    assert_eq!(format_frequency_table(&result), "0x40 0\n");

    let report = FrequencyReport::from_result("trace.bin", &result);
    let json_path = dir.path().join("report.json");
    write_report(&report, &json_path).unwrap();
    assert_eq!(read_report(&json_path).unwrap(), report);
}
