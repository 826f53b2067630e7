//! Example: classic LCS recovered through the fuzzy engine.
//!
//! Run with:
//! `cargo run --example lcs`

use flcs::{matchers::ExactMatcher, FlcsEngine};

fn main() {
    let s: &[u8] = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let t: &[u8] = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";

    let matcher = ExactMatcher::new(s, t);
    let (width, height) = matcher.dims();

    // Binary match values plus threshold 1.0: plain longest common subsequence.
    let mut engine = FlcsEngine::with_branch_threshold(width, height, matcher, 1.0);
    let result = engine.run();

    let lcs: Vec<u8> = result.matches.iter().map(|m| s[m.i as usize]).collect();
    println!("LCS length: {}", result.total_match);
    println!("LCS: {}", String::from_utf8_lossy(&lcs));
    println!(
        "evaluated {} of {} cells in {} steps",
        engine.num_evals(),
        width * height,
        engine.num_steps()
    );
}
