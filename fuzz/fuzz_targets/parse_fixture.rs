#![no_main]

use libfuzzer_sys::fuzz_target;
use solfege::fixture;

// Parsers must reject malformed content with an error, never a panic.
fuzz_target!(|content: &str| {
    let _ = fixture::parse_value(content);
    let _ = fixture::parse_vector(content);
    let _ = fixture::parse_vector_two_columns(content);
    let _ = fixture::parse_complex_vector(content);
    let _ = fixture::parse_matrix(content);
});
