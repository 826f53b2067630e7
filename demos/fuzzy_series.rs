//! Example: aligning two drifting measurement series.
//!
//! Binary equality would match almost nothing here; graded proximity
//! recovers the correspondence and reports how strong each pairing is.
//!
//! Run with:
//! `cargo run --example fuzzy_series`

use flcs::{matchers::ProximityMatcher, FlcsEngine};

fn main() {
    // One reading dropped, the rest drifted a little.
    let reference = [10.0f32, 10.5, 11.2, 12.0, 12.8, 13.5, 14.1, 15.0];
    let observed = [10.1f32, 10.4, 12.1, 12.75, 13.6, 14.0, 15.2];

    let matcher = ProximityMatcher::new(&reference, &observed, 0.5);
    let (width, height) = matcher.dims();

    let mut engine = FlcsEngine::new(width, height, matcher);
    let result = engine.run();

    println!("alignment weight: {:.3}", result.total_match);
    for m in &result.matches {
        println!(
            "  reference[{}] = {:>5} ~ observed[{}] = {:>5}  (grade {:.2})",
            m.i, reference[m.i as usize], m.j, observed[m.j as usize], m.value
        );
    }
}
