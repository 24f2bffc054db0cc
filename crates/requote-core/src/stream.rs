//! Streaming driver: one record in memory at a time
//!
//! Input files are full dataset dumps that can run to many gigabytes, so
//! the driver never holds more than the current line. Each record is
//! read, repaired, and written before the next is read, and its original
//! terminator (`\r\n`, `\n`, or nothing on a final unterminated line) is
//! written back untouched.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::record::repair_record;

/// Counters for one repair run
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct RepairSummary {
    /// Records read from the input
    pub lines: u64,
    /// Records whose reconstructed form differed from the original
    pub lines_changed: u64,
    /// Individual fields rewritten across all records
    pub fields_repaired: u64,
}

/// A record the repair changed, reported for auditing
#[derive(Debug)]
pub struct LineChange<'a> {
    /// 1-based line number in the input
    pub line_number: u64,
    /// The record as read, terminator stripped
    pub before: &'a str,
    /// The record as written, terminator stripped
    pub after: &'a str,
}

/// Split a raw line into its content and terminator.
fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}

/// Repair an entire delimited stream record by record.
///
/// `on_change` is invoked for every record the repair altered; it exists
/// for auditing and plays no part in the transformation itself.
pub fn repair_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    delimiter: char,
    mut on_change: impl FnMut(&LineChange<'_>),
) -> Result<RepairSummary> {
    let mut summary = RepairSummary::default();
    let mut raw = String::new();

    loop {
        raw.clear();
        if reader.read_line(&mut raw)? == 0 {
            break;
        }
        summary.lines += 1;

        let (content, terminator) = split_terminator(&raw);
        let repair = repair_record(content, delimiter);

        if repair.changed() {
            summary.lines_changed += 1;
            summary.fields_repaired += repair.fields_repaired as u64;
            on_change(&LineChange {
                line_number: summary.lines,
                before: content,
                after: &repair.line,
            });
        }

        writer.write_all(repair.line.as_bytes())?;
        writer.write_all(terminator.as_bytes())?;
    }

    writer.flush()?;
    debug!(
        lines = summary.lines,
        lines_changed = summary.lines_changed,
        fields_repaired = summary.fields_repaired,
        "repair_stream"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (String, RepairSummary, Vec<(u64, String, String)>) {
        let mut output = Vec::new();
        let mut changes = Vec::new();
        let summary = repair_stream(input.as_bytes(), &mut output, '\t', |change| {
            changes.push((
                change.line_number,
                change.before.to_string(),
                change.after.to_string(),
            ));
        })
        .unwrap();
        (String::from_utf8(output).unwrap(), summary, changes)
    }

    #[test]
    fn test_clean_stream_passes_through() {
        let input = "a\tb\tc\nplain\tline\n";
        let (output, summary, changes) = run(input);
        assert_eq!(output, input);
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.lines_changed, 0);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_offending_line_rewritten_in_place() {
        let input = "a\tb\nx\tHe said \"hi\"\tz\nend\t\"ok\"\n";
        let (output, summary, changes) = run(input);
        assert_eq!(output, "a\tb\nx\t\"He said \"\"hi\"\"\"\tz\nend\t\"ok\"\n");
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.lines_changed, 1);
        assert_eq!(summary.fields_repaired, 1);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, 2);
        assert_eq!(changes[0].1, "x\tHe said \"hi\"\tz");
        assert_eq!(changes[0].2, "x\t\"He said \"\"hi\"\"\"\tz");
    }

    #[test]
    fn test_crlf_terminators_preserved() {
        let input = "a\tsay \"hi\"\r\nb\tc\r\n";
        let (output, _, _) = run(input);
        assert_eq!(output, "a\t\"say \"\"hi\"\"\"\r\nb\tc\r\n");
    }

    #[test]
    fn test_missing_final_newline_preserved() {
        let input = "a\tb\nlast \"line\"";
        let (output, summary, _) = run(input);
        assert_eq!(output, "a\tb\n\"last \"\"line\"\"\"");
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn test_empty_input() {
        let (output, summary, changes) = run("");
        assert_eq!(output, "");
        assert_eq!(summary.lines, 0);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_blank_lines_preserved() {
        let input = "\n\na\t\"b\" c\n\n";
        let (output, summary, _) = run(input);
        assert_eq!(output, "\n\na\t\"\"\"b\"\" c\"\n\n");
        assert_eq!(summary.lines, 4);
        assert_eq!(summary.lines_changed, 1);
    }

    #[test]
    fn test_file_to_file_round_trip() {
        use std::fs::File;
        use std::io::BufReader;

        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.tsv");
        let dst = dir.path().join("out.tsv");
        std::fs::write(&src, "id\tname \"quoted\"\tyear\n").unwrap();

        let reader = BufReader::new(File::open(&src).unwrap());
        let writer = File::create(&dst).unwrap();
        let summary = repair_stream(reader, writer, '\t', |_| {}).unwrap();

        assert_eq!(summary.lines_changed, 1);
        let written = std::fs::read_to_string(&dst).unwrap();
        assert_eq!(written, "id\t\"name \"\"quoted\"\"\"\tyear\n");
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let input = "clean\nbad \"one\"\nclean\nbad \"two\"\n";
        let (_, _, changes) = run(input);
        let numbers: Vec<u64> = changes.iter().map(|c| c.0).collect();
        assert_eq!(numbers, vec![2, 4]);
    }
}
