//! Text rendering of trace records.
//!
//! One record per line: `<kind-code> <0xaddr> <size>`. This is the text form
//! the instrumentation front end emits in its text mode, so dumps of binary
//! traces can be compared against it directly.

use crate::record::TraceRecord;
use std::io::{self, Write};

/// Render one record as a dump line (without newline)
pub fn format_record(record: &TraceRecord) -> String {
    format!("{} {:#x} {}", record.kind.code(), record.address, record.size)
}

/// Write records as dump lines
///
/// Returns the number of lines written.
pub fn write_text_dump<'a, W, I>(out: &mut W, records: I) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = &'a TraceRecord>,
{
    let mut lines = 0;
    for record in records {
        writeln!(out, "{}", format_record(record))?;
        lines += 1;
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;

    #[test]
    fn test_format_record() {
        assert_eq!(format_record(&TraceRecord::read(0x7ffd1000, 8)), "0 0x7ffd1000 8");
        assert_eq!(format_record(&TraceRecord::call(0x401000)), "2 0x401000 0");
        assert_eq!(
            format_record(&TraceRecord::new(16, RecordKind::Unknown(9), 1)),
            "9 0x10 1"
        );
    }

    #[test]
    fn test_write_text_dump() {
        let records = [TraceRecord::call(1), TraceRecord::ret(1)];
        let mut out = Vec::new();
        assert_eq!(write_text_dump(&mut out, &records).unwrap(), 2);
        assert_eq!(String::from_utf8(out).unwrap(), "2 0x1 0\n3 0x1 0\n");
    }
}
