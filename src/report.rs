//! Plain-text result lines.
//!
//! Successful records go to the output stream, failed ones to the error
//! stream, one line each, in the order given.

use crate::measure::Record;
use std::io::{self, Write};

pub fn write_record<O, E>(record: &Record, out: &mut O, err: &mut E) -> io::Result<()>
where
    O: Write,
    E: Write,
{
    match &record.error {
        Some(error) => writeln!(err, "Error for {}: {}", record.url, error),
        None => writeln!(
            out,
            "{}: \u{394}T(request) = {:?}; \u{394}T(request+read body) = {:?}; HTTP Response code = {}",
            record.url, record.time_to_headers, record.time_to_full_read, record.status
        ),
    }
}

pub fn write_records<O, E>(records: &[Record], out: &mut O, err: &mut E) -> io::Result<()>
where
    O: Write,
    E: Write,
{
    for record in records {
        write_record(record, out, err)?;
    }
    out.flush()?;
    err.flush()
}
