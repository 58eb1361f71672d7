//! Property-based tests for nestcsv.
//!
//! These tests use proptest to generate random inputs and verify that
//! tokenizing, coercion and conversion keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p nestcsv --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p nestcsv --test property_tests
//! ```

use proptest::prelude::*;

use nestcsv::{Converter, Tokenizer, TypedValue, coerce};

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate arbitrary field text, including quotes, delimiters and newlines.
fn field_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,\".\n]{0,20}"
}

/// Generate strings that look like numbers.
fn numeric_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[+-]?[0-9]{1,12}",
        "[+-]?[0-9]{1,8}\\.[0-9]{1,8}",
        "[0-9]{1,3}[eE][+-]?[0-9]{1,2}",
    ]
}

/// Generate a plain (unquoted) data cell.
fn plain_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8}",
        "[0-9]{1,6}",
        Just("true".to_string()),
    ]
}

// =============================================================================
// Coercion Properties
// =============================================================================

proptest! {
    /// Coercion is deterministic.
    #[test]
    fn coerce_is_idempotent(raw in ".{0,40}") {
        prop_assert_eq!(coerce(&raw), coerce(&raw));
    }

    /// Numeric strings re-serialize to the same numeric value.
    #[test]
    fn numeric_round_trip(raw in numeric_like()) {
        let value = coerce(&raw);
        prop_assert!(value.is_numeric(), "{:?} was not numeric", raw);

        let again = coerce(&value.to_string());
        prop_assert_eq!(again.as_f64(), value.as_f64());
    }

    /// Values that fit an i64 are integers.
    #[test]
    fn integers_stay_integers(n in any::<i64>()) {
        prop_assert_eq!(coerce(&n.to_string()), TypedValue::Integer(n));
    }

    /// A letter suffix always makes the value a string.
    #[test]
    fn partial_numbers_are_strings(n in 0u32..1_000_000, suffix in "[g-z]{1,4}") {
        let raw = format!("{}{}", n, suffix);
        prop_assert_eq!(coerce(&raw), TypedValue::String(raw.clone()));
    }
}

// =============================================================================
// Tokenizer Properties
// =============================================================================

proptest! {
    /// A row written by the csv crate tokenizes back to the same (trimmed) fields.
    #[test]
    fn tokenizer_reads_csv_writer_output(fields in prop::collection::vec(field_text(), 1..6)) {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&fields).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let tokenizer = Tokenizer::new();
        let lines: Vec<&str> = tokenizer.lines(&text).collect();
        prop_assert_eq!(lines.len(), 1);

        let parsed = tokenizer.row(lines[0]);
        let expected: Vec<String> = fields.iter().map(|f| f.trim().to_string()).collect();
        prop_assert_eq!(parsed, expected);
    }

    /// Line splitting never panics.
    #[test]
    fn lines_never_panic(text in ".{0,200}") {
        let _ = Tokenizer::new().lines(&text).count();
    }
}

// =============================================================================
// Conversion Properties
// =============================================================================

proptest! {
    /// Records = data rows - skipped rows, and every record has its age.
    #[test]
    fn record_count_matches_rows(
        rows in prop::collection::vec(
            (plain_cell(), plain_cell(), 0u32..120, prop::bool::ANY),
            1..40,
        )
    ) {
        let mut text = String::from("name.firstName,name.lastName,age,address.city\n");
        let mut expected_ages = Vec::new();
        for (first, last, age, malformed) in &rows {
            if *malformed {
                text.push_str(&format!("{},{}\n", first, last));
            } else {
                text.push_str(&format!("{},{},{},X\n", first, last, age));
                expected_ages.push(*age as i64);
            }
        }

        let conversion = Converter::new().convert(&text).unwrap();
        let summary = &conversion.summary;

        prop_assert_eq!(summary.rows_read, rows.len());
        prop_assert_eq!(conversion.records.len(), summary.rows_read - summary.rows_skipped);

        let ages: Vec<i64> = conversion
            .records
            .iter()
            .filter_map(|r| r.get_value("age").and_then(|v| v.as_i64()))
            .collect();
        prop_assert_eq!(ages, expected_ages);
    }

    /// Empty cells never show up in a record.
    #[test]
    fn empty_cells_never_written(first in plain_cell(), last in plain_cell()) {
        let text = format!("name.firstName,name.lastName,age\n{},{},1\n", first, last);
        let conversion = Converter::new().convert(&text).unwrap();
        let record = &conversion.records[0];

        prop_assert_eq!(record.get_path("name.firstName").is_some(), !first.is_empty());
        prop_assert_eq!(record.get_path("name.lastName").is_some(), !last.is_empty());
    }
}
