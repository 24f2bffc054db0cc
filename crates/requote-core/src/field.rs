//! Per-field quoting classification and repair
//!
//! Strict bulk loaders (Neo4j `LOAD CSV` among them) reject fields that
//! contain a quote character unless the whole field is wrapped in quotes
//! and every embedded quote is doubled. Classification decides which
//! fields need that rewrite and which are already acceptable.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// The quote character targeted by repair
pub const QUOTE: char = '"';

/// Whole field is exactly one quoted run: `"..."` with no quotes inside
static WELL_QUOTED: OnceLock<Regex> = OnceLock::new();

/// Bracketed list of quoted strings: starts with `["` and closes with `"]`
/// somewhere later. Deliberately not anchored at the end; the source data
/// this tool was built for carries malformed variants that a tighter
/// pattern would start rewriting.
static QUOTED_LIST: OnceLock<Regex> = OnceLock::new();

fn well_quoted() -> &'static Regex {
    WELL_QUOTED.get_or_init(|| Regex::new(r#"^"[^"]*"$"#).expect("valid regex"))
}

fn quoted_list() -> &'static Regex {
    QUOTED_LIST.get_or_init(|| Regex::new(r#"^\[".*"\]"#).expect("valid regex"))
}

/// Quoting state of a single field, derived on each inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// No quote character anywhere in the field
    Clean,
    /// One leading quote, one trailing quote, no quotes between them
    WellQuoted,
    /// Bracketed list-of-quoted-strings shape, exempt from repair
    QuotedList,
    /// Contains quotes in any other arrangement
    NeedsRepair,
}

/// Classify a field's quoting state
pub fn classify(field: &str) -> FieldClass {
    if !field.contains(QUOTE) {
        return FieldClass::Clean;
    }
    if well_quoted().is_match(field) {
        return FieldClass::WellQuoted;
    }
    if quoted_list().is_match(field) {
        return FieldClass::QuotedList;
    }
    FieldClass::NeedsRepair
}

/// Repair a single field so strict quoted-CSV consumers accept it.
///
/// Fields classified `Clean`, `WellQuoted`, or `QuotedList` are returned
/// borrowed and unchanged. A `NeedsRepair` field has every quote doubled
/// and the result wrapped in one outer pair of quotes.
pub fn repair_field(field: &str) -> Cow<'_, str> {
    match classify(field) {
        FieldClass::Clean | FieldClass::WellQuoted | FieldClass::QuotedList => {
            Cow::Borrowed(field)
        }
        FieldClass::NeedsRepair => {
            let mut repaired = String::with_capacity(field.len() + 4);
            repaired.push(QUOTE);
            for c in field.chars() {
                if c == QUOTE {
                    repaired.push(QUOTE);
                }
                repaired.push(c);
            }
            repaired.push(QUOTE);
            Cow::Owned(repaired)
        }
    }
}
