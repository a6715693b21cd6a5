//! Fixed-layout trace record and its binary encoding.
//!
//! Layout (16 bytes, little-endian, no padding):
//! ```text
//! offset 0  addr : i64   address accessed, or call/return target
//! offset 8  kind : u32   0=Read 1=Write 2=Call 3=Return
//! offset 12 size : u32   access width in bytes, 0 for Call/Return
//! ```
//! On x86-64 this matches the native in-memory layout written by the
//! instrumentation front end.

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = 16;

/// Kind of event a record describes
///
/// Codes outside the defined range are kept as `Unknown` so that decoding
/// stays total and re-encoding is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Read,
    Write,
    Call,
    Return,
    Unknown(u32),
}

impl RecordKind {
    /// Raw wire code for this kind
    pub fn code(self) -> u32 {
        match self {
            RecordKind::Read => 0,
            RecordKind::Write => 1,
            RecordKind::Call => 2,
            RecordKind::Return => 3,
            RecordKind::Unknown(raw) => raw,
        }
    }

    /// True for `Read` and `Write`
    pub fn is_memory_access(self) -> bool {
        matches!(self, RecordKind::Read | RecordKind::Write)
    }
}

impl From<u32> for RecordKind {
    fn from(code: u32) -> Self {
        match code {
            0 => RecordKind::Read,
            1 => RecordKind::Write,
            2 => RecordKind::Call,
            3 => RecordKind::Return,
            raw => RecordKind::Unknown(raw),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Unknown(raw) => write!(f, "Unknown({})", raw),
            other => write!(f, "{:?}", other),
        }
    }
}

/// One trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceRecord {
    /// Accessed address, or the call/return target
    pub address: i64,

    pub kind: RecordKind,

    /// Access width in bytes (0 for Call/Return)
    pub size: u32,
}

impl TraceRecord {
    pub fn new(address: i64, kind: RecordKind, size: u32) -> Self {
        Self {
            address,
            kind,
            size,
        }
    }

    pub fn read(address: i64, size: u32) -> Self {
        Self::new(address, RecordKind::Read, size)
    }

    pub fn write(address: i64, size: u32) -> Self {
        Self::new(address, RecordKind::Write, size)
    }

    pub fn call(address: i64) -> Self {
        Self::new(address, RecordKind::Call, 0)
    }

    pub fn ret(address: i64) -> Self {
        Self::new(address, RecordKind::Return, 0)
    }

    /// Encode into the fixed wire layout
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        LittleEndian::write_i64(&mut buf[0..8], self.address);
        LittleEndian::write_u32(&mut buf[8..12], self.kind.code());
        LittleEndian::write_u32(&mut buf[12..16], self.size);
        buf
    }

    /// Decode from the fixed wire layout
    ///
    /// Total: every byte pattern yields a record.
    pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Self {
        Self::decode_slice(bytes)
    }

    // `bytes` must hold at least RECORD_SIZE bytes
    fn decode_slice(bytes: &[u8]) -> Self {
        Self {
            address: LittleEndian::read_i64(&bytes[0..8]),
            kind: RecordKind::from(LittleEndian::read_u32(&bytes[8..12])),
            size: LittleEndian::read_u32(&bytes[12..16]),
        }
    }
}

/// Decode every whole record in `bytes`, appending to `out`
///
/// Returns the number of records decoded. Trailing bytes that do not form a
/// whole record are ignored; callers check lengths.
pub fn decode_into(bytes: &[u8], out: &mut Vec<TraceRecord>) -> usize {
    let before = out.len();
    out.extend(bytes.chunks_exact(RECORD_SIZE).map(TraceRecord::decode_slice));
    out.len() - before
}

/// Encode a slice of records into one contiguous buffer
pub fn encode_all(records: &[TraceRecord]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(records.len() * RECORD_SIZE);
    for record in records {
        buf.extend_from_slice(&record.encode());
    }
    buf
}
