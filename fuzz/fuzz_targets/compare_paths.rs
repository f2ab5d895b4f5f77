#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use solfege::compare::{all_close, check_vectors_close};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    pairs: Vec<(f32, f32)>,
    precision: f64,
}

// The fast-path scan and the elementwise check must agree on every input,
// including NaN elements and degenerate precisions.
fuzz_target!(|input: FuzzInput| {
    let (found, expected): (Vec<f32>, Vec<f32>) = input.pairs.into_iter().unzip();
    let fast = all_close(&found, &expected, input.precision);
    let slow = check_vectors_close(&found, &expected, input.precision).is_ok();
    assert_eq!(fast, slow);
});
