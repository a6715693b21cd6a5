//! Parallel read-address aggregation over a finalized trace file.
//!
//! The file is cut into fixed-capacity chunks, the chunk indices are split
//! into contiguous, equally sized ranges (one per worker), and every worker
//! counts read addresses in its own map through its own file handle. Maps are
//! merged sequentially once all workers have joined, so the result depends
//! only on the partitioning, never on thread timing.

use super::frequency::{merge_maps, AddressFrequencyMap};
use crate::reader::{batch_buffer_len, chunk_count, record_count_for_len, ChunkReader};
use crate::record::{RecordKind, RECORD_SIZE};
use crate::utils::config::AnalysisConfig;
use crate::utils::error::TraceError;
use log::{debug, info};
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::thread;

/// Merged output of an aggregation run
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Read addresses and their repeat counts
    pub frequencies: AddressFrequencyMap,

    /// Records in the file
    pub total_records: u64,

    /// Records actually read by the workers
    pub records_processed: u64,

    pub chunks: usize,

    pub workers: usize,
}

/// What one worker hands to the merge
#[derive(Debug)]
struct WorkerOutput {
    reads: AddressFrequencyMap,
    records: u64,
}

/// Split `num_chunks` chunk indices into `workers` contiguous ranges
///
/// Static schedule: the first `num_chunks % workers` workers take one extra
/// chunk. Surplus workers get empty ranges. The split is a pure function of
/// its inputs.
pub fn partition_chunks(num_chunks: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = num_chunks / workers;
    let extra = num_chunks % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = base + usize::from(worker < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Count read addresses in a trace file using a worker pool
///
/// # Errors
/// * `TraceError::InvalidChunkCapacity` - chunk capacity too large
/// * `TraceError::CorruptTraceLength` - file size is not a whole number of records
/// * `TraceError::Io` - metadata, open or read failure in any worker
pub fn aggregate_reads(
    path: impl AsRef<Path>,
    config: &AnalysisConfig,
) -> Result<AggregationResult, TraceError> {
    let path = path.as_ref();
    let chunk_capacity = config.chunk_capacity.max(1);
    batch_buffer_len(chunk_capacity)?;

    debug!("Record size: {}", RECORD_SIZE);
    let len = fs::metadata(path)?.len();
    debug!("File size: {}", len);
    let total_records = record_count_for_len(len)?;
    debug!("Total number of records: {}", total_records);
    let chunks = chunk_count(total_records, chunk_capacity);
    debug!("Number of chunks: {}", chunks);
    let workers = config.resolved_workers();
    info!("Number of workers: {}", workers);

    let ranges = partition_chunks(chunks, workers);

    let outputs: Vec<Result<WorkerOutput, TraceError>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, range)| scope.spawn(move || run_worker(id, path, chunk_capacity, range)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut maps = Vec::with_capacity(outputs.len());
    let mut records_processed = 0;
    for output in outputs {
        let output = output?;
        records_processed += output.records;
        maps.push(output.reads);
    }

    let frequencies = merge_maps(maps);
    info!("Number of records processed: {}", records_processed);
    debug!("Distinct read addresses: {}", frequencies.len());

    Ok(AggregationResult {
        frequencies,
        total_records,
        records_processed,
        chunks,
        workers,
    })
}

fn run_worker(
    id: usize,
    path: &Path,
    chunk_capacity: usize,
    chunks: Range<usize>,
) -> Result<WorkerOutput, TraceError> {
    let mut output = WorkerOutput {
        reads: AddressFrequencyMap::new(),
        records: 0,
    };
    if chunks.is_empty() {
        debug!("Worker {}: no chunks assigned", id);
        return Ok(output);
    }

    let mut reader = ChunkReader::open(path, chunk_capacity)?;
    let mut batch = Vec::with_capacity(chunk_capacity);

    for index in chunks.clone() {
        output.records += reader.read_chunk(index, &mut batch)? as u64;
        for record in &batch {
            // Structure is not checked here; only reads are counted
            if record.kind == RecordKind::Read {
                output.reads.record(record.address);
            }
        }
    }

    debug!(
        "Worker {}: chunks {:?}, {} records, {} distinct reads",
        id,
        chunks,
        output.records,
        output.reads.len()
    );
    Ok(output)
}
