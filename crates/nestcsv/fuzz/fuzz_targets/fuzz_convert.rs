//! Fuzz target for the converter.
//!
//! Checks that conversion never panics on arbitrary text and that every
//! data row is either turned into a record or reported as skipped.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nestcsv::Converter;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(conversion) = Converter::new().convert(text) {
        let summary = &conversion.summary;
        assert_eq!(
            conversion.records.len() + summary.rows_skipped,
            summary.rows_read
        );
    }
});
