use crate::models::Response;
use std::io::{self, Write};

/// Write a response as plain text lines.
///
/// One status line, then for each series its id followed by one
/// `year period value` line per observation, all in response order.
pub fn print_response<W: Write>(out: &mut W, resp: &Response) -> io::Result<()> {
    writeln!(out, "Request Status:  {}", resp.status)?;
    for series in &resp.results.series {
        writeln!(out, "Series ID {}", series.series_id)?;
        for point in &series.data {
            writeln!(out, "{} {} {}", point.year, point.period, point.value)?;
        }
    }
    Ok(())
}
