//! Fuzz target for value coercion.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nestcsv::coerce;

fuzz_target!(|data: &str| {
    let first = coerce(data);
    assert_eq!(first, coerce(data));

    if let Some(number) = first.as_f64() {
        assert!(number.is_finite());
    }
});
