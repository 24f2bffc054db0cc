//! Record-level repair: split, repair each field, rejoin
//!
//! A record is one line of the delimited file, without its terminator.
//! Repair never changes the field count, the delimiter, or the field
//! order; fields without quotes pass through byte-identical.

use std::borrow::Cow;

use crate::field::{repair_field, QUOTE};

/// Result of repairing one record
#[derive(Debug)]
pub struct RecordRepair<'a> {
    /// The repaired record, borrowed when nothing changed
    pub line: Cow<'a, str>,
    /// How many fields were rewritten
    pub fields_repaired: usize,
}

impl RecordRepair<'_> {
    /// Whether repair changed the record
    pub fn changed(&self) -> bool {
        self.fields_repaired > 0
    }
}

/// Repair every field of a record, preserving field order and count.
///
/// Lines with no quote character anywhere skip the split entirely.
pub fn repair_record<'a>(line: &'a str, delimiter: char) -> RecordRepair<'a> {
    if !line.contains(QUOTE) {
        return RecordRepair {
            line: Cow::Borrowed(line),
            fields_repaired: 0,
        };
    }

    let mut fields_repaired = 0;
    let fields: Vec<Cow<'_, str>> = line
        .split(delimiter)
        .map(|field| {
            let repaired = repair_field(field);
            if matches!(repaired, Cow::Owned(_)) {
                fields_repaired += 1;
            }
            repaired
        })
        .collect();

    if fields_repaired == 0 {
        return RecordRepair {
            line: Cow::Borrowed(line),
            fields_repaired: 0,
        };
    }

    let mut rebuilt = String::with_capacity(line.len() + fields_repaired * 4);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            rebuilt.push(delimiter);
        }
        rebuilt.push_str(field);
    }

    RecordRepair {
        line: Cow::Owned(rebuilt),
        fields_repaired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAB: char = '\t';

    #[test]
    fn test_record_without_quotes_is_borrowed() {
        let repair = repair_record("a\tb\tc", TAB);
        assert!(!repair.changed());
        assert!(matches!(repair.line, Cow::Borrowed(_)));
        assert_eq!(repair.line, "a\tb\tc");
    }

    #[test]
    fn test_record_with_only_acceptable_quotes_unchanged() {
        let line = "a\t\"quoted\"\t[\"x\",\"y\"]";
        let repair = repair_record(line, TAB);
        assert!(!repair.changed());
        assert_eq!(repair.line, line);
    }

    #[test]
    fn test_single_offending_field_rewritten() {
        let repair = repair_record("a\tHe said \"hi\"\tc", TAB);
        assert_eq!(repair.fields_repaired, 1);
        assert_eq!(repair.line, "a\t\"He said \"\"hi\"\"\"\tc");
    }

    #[test]
    fn test_multiple_offending_fields() {
        let repair = repair_record("\"a\" b\tok\tc\"", TAB);
        assert_eq!(repair.fields_repaired, 2);
        assert_eq!(repair.line, "\"\"\"a\"\" b\"\tok\t\"c\"\"\"");
    }

    #[test]
    fn test_field_count_and_order_preserved() {
        let line = "one\t\"two\" x\t\tfour \"4\"\t";
        let repair = repair_record(line, TAB);
        let before: Vec<&str> = line.split(TAB).collect();
        let after: Vec<&str> = repair.line.split(TAB).collect();
        assert_eq!(before.len(), after.len());
        // Untouched fields stay byte-identical in place
        assert_eq!(after[0], "one");
        assert_eq!(after[2], "");
        assert_eq!(after[4], "");
    }

    #[test]
    fn test_empty_fields_pass_through() {
        let repair = repair_record("\t\t", TAB);
        assert!(!repair.changed());
        assert_eq!(repair.line, "\t\t");
    }

    #[test]
    fn test_empty_line() {
        let repair = repair_record("", TAB);
        assert!(!repair.changed());
        assert_eq!(repair.line, "");
    }

    #[test]
    fn test_single_field_record() {
        let repair = repair_record("say \"what\"", TAB);
        assert_eq!(repair.line, "\"say \"\"what\"\"\"");
        assert_eq!(repair.fields_repaired, 1);
    }
}
