//! Property tests against full-table reference DPs.
//!
//! At branch threshold 1.0 the search is exact, so its total must equal
//! what a classic O(W·H) table fill produces, for binary and for graded
//! match values alike.

use flcs::{matchers::ExactMatcher, FlcsEngine, MatchResult};
use proptest::prelude::*;

/// Classic LCS length by full table fill.
fn full_lcs_len(s: &[u8], t: &[u8]) -> u32 {
    let n = s.len();
    let m = t.len();
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            let up = dp[i - 1][j];
            let left = dp[i][j - 1];
            let diag = dp[i - 1][j - 1] + if s[i - 1] == t[j - 1] { 1 } else { 0 };
            dp[i][j] = up.max(left).max(diag);
        }
    }
    dp[n][m]
}

/// Best graded-path total by full table fill over an explicit weight grid.
///
/// `grid[i * height + j]` is the match value of pair `(i, j)`.
fn full_fuzzy_total(width: usize, height: usize, grid: &[f32]) -> f32 {
    let mut dp = vec![vec![0f32; height + 1]; width + 1];
    for i in 1..=width {
        for j in 1..=height {
            let up = dp[i - 1][j];
            let left = dp[i][j - 1];
            let diag = dp[i - 1][j - 1] + grid[(i - 1) * height + (j - 1)];
            dp[i][j] = up.max(left).max(diag);
        }
    }
    dp[width][height]
}

fn assert_well_formed(result: &MatchResult) {
    let mut sum = 0.0f32;
    for w in result.matches.windows(2) {
        assert!(w[0].i < w[1].i, "i must be strictly increasing");
        assert!(w[0].j < w[1].j, "j must be strictly increasing");
    }
    for m in &result.matches {
        assert!(m.value > 0.0 && m.value <= 1.0, "match value {} out of (0, 1]", m.value);
        sum += m.value;
    }
    assert!(
        (sum - result.total_match).abs() <= 1e-3,
        "matches sum to {sum}, total is {}",
        result.total_match
    );
}

/// Weight grids with values quantised to sixteenths, so reference and
/// engine sums agree exactly regardless of summation order.
fn grid_strategy() -> impl Strategy<Value = (usize, usize, Vec<f32>)> {
    (1usize..=8, 1usize..=8).prop_flat_map(|(w, h)| {
        proptest::collection::vec((0u8..=16).prop_map(|q| q as f32 / 16.0), w * h)
            .prop_map(move |grid| (w, h, grid))
    })
}

proptest! {
    #[test]
    fn binary_matching_equals_classic_lcs(a in "[ACGT]{1,10}", b in "[ACGT]{1,10}") {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let matcher = ExactMatcher::new(s, t);
        let (w, h) = matcher.dims();
        let mut engine = FlcsEngine::with_branch_threshold(w, h, matcher, 1.0);
        let result = engine.run();
        prop_assert_eq!(result.total_match, full_lcs_len(s, t) as f32);
        assert_well_formed(&result);
        prop_assert!(engine.num_evals() <= w * h);
    }

    #[test]
    fn graded_matching_equals_full_table((w, h, grid) in grid_strategy()) {
        let height = h;
        let cells = grid.clone();
        let matcher = move |i: u32, j: u32| cells[i as usize * height + j as usize];
        let mut engine = FlcsEngine::with_branch_threshold(w as u32, h as u32, matcher, 1.0);
        let result = engine.run();
        let expected = full_fuzzy_total(w, h, &grid);
        prop_assert!(
            (result.total_match - expected).abs() <= 1e-3,
            "engine found {}, reference {}",
            result.total_match,
            expected
        );
        assert_well_formed(&result);
        prop_assert!(engine.num_evals() <= (w * h) as u32);
    }

    #[test]
    fn any_explicit_path_is_dominated(
        (w, h, grid) in grid_strategy(),
        steps in proptest::collection::vec(0u8..3, 0..16)
    ) {
        // Walk an arbitrary monotone path through the grid and sum the
        // weights of its diagonal steps; the engine's total must reach it.
        let height = h;
        let cells = grid.clone();
        let matcher = move |i: u32, j: u32| cells[i as usize * height + j as usize];
        let total = FlcsEngine::with_branch_threshold(w as u32, h as u32, matcher, 1.0)
            .run()
            .total_match;

        let (mut i, mut j) = (0usize, 0usize);
        let mut path_score = 0.0f32;
        for s in steps {
            if i >= w || j >= h {
                break;
            }
            match s {
                0 => {
                    path_score += grid[i * h + j];
                    i += 1;
                    j += 1;
                }
                1 => i += 1,
                _ => j += 1,
            }
        }
        prop_assert!(total >= path_score - 1e-3, "engine {total} < path {path_score}");
    }
}
