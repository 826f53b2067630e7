//! Best-path driver over the lazily evaluated match matrix.
//!
//! The engine explores the W×H grid best-first: it pops the most promising
//! candidate off the frontier, evaluates that cell's match value on first
//! visit, records the best cumulative score reaching the cell, and emits up
//! to three successors. A diagonal successor consumes the match; right and
//! down successors skip the row or column and carry the pre-eval score
//! unchanged. Every improvement raises the lower bound and prunes the
//! frontier tail against it. When the frontier drains, a back-walk over the
//! matrix recovers the best path.
//!
//! Worst case the search fills the matrix, O(W·H); on well-matched inputs
//! pruning keeps it near-linear in the sequence length.

use crate::frontier::CandidateQueue;
use crate::matrix::MatchMatrix;
use crate::traits::Matcher;
use crate::utils::{max_possible_score, scores_match, SCORE_TOLERANCE};

/// Branch threshold used by [`FlcsEngine::new`].
pub const DEFAULT_BRANCH_THRESHOLD: f32 = 0.95;

/// One match on the best path: the `i`th element of the first sequence
/// paired with the `j`th element of the second, at weight `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultMatch {
    pub i: u32,
    pub j: u32,
    /// Match value of this pair, in `(0, 1]`.
    pub value: f32,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Accumulated match value of the best path.
    pub total_match: f32,
    /// The matches on the best path, in forward order: `i` and `j` are
    /// strictly increasing and the values sum to `total_match` (within
    /// floating tolerance).
    pub matches: Vec<ResultMatch>,
}

/// Fuzzy-LCS search engine.
///
/// Typical usage:
/// ```
/// use flcs::{matchers::ExactMatcher, FlcsEngine};
///
/// let s: &[u8] = b"ACCGGTCGAG";
/// let t: &[u8] = b"GTCGTTCGGA";
/// let matcher = ExactMatcher::new(s, t);
/// let (width, height) = matcher.dims();
/// let mut engine = FlcsEngine::with_branch_threshold(width, height, matcher, 1.0);
/// let result = engine.run();
/// println!("common subsequence weight: {}", result.total_match);
/// println!("evaluated {} of {} cells", engine.num_evals(), width * height);
/// ```
///
/// An engine instance is single-threaded and holds no shared state;
/// distinct instances are independent.
pub struct FlcsEngine<M: Matcher> {
    matcher: M,
    matrix: MatchMatrix,
    frontier: CandidateQueue,
    branch_threshold: f32,
    /// Best complete-path score seen so far; negative until the first
    /// candidate runs off the matrix.
    best_match: f32,
    /// Cell whose expansion produced `best_match`: the last real matrix
    /// position on that path.
    best_res: (u32, u32),
    num_steps: u32,
    num_evals: u32,
}

impl<M: Matcher> FlcsEngine<M> {
    /// Create an engine with the default branch threshold.
    ///
    /// `width` and `height` are the lengths of the first and second
    /// sequence; the matcher grades pairs of their elements.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero.
    pub fn new(width: u32, height: u32, matcher: M) -> Self {
        Self::with_branch_threshold(width, height, matcher, DEFAULT_BRANCH_THRESHOLD)
    }

    /// Create an engine with an explicit branch threshold.
    ///
    /// A cell whose match value reaches the threshold is taken as good
    /// enough that skipping it cannot pay off, and its skip successors are
    /// suppressed. At `1.0` the search is exact; below, a speed/accuracy
    /// trade-off.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero, or if `branch_threshold`
    /// exceeds `1.0`.
    pub fn with_branch_threshold(
        width: u32,
        height: u32,
        matcher: M,
        branch_threshold: f32,
    ) -> Self {
        assert!(
            branch_threshold <= 1.0,
            "branch threshold must not exceed 1.0"
        );
        let mut engine = Self {
            matcher,
            matrix: MatchMatrix::new(width, height),
            frontier: CandidateQueue::new(width, height),
            branch_threshold,
            best_match: -1.0,
            best_res: (0, 0),
            num_steps: 0,
            num_evals: 0,
        };
        engine.frontier.insert(0, 0, 0.0);
        engine
    }

    /// Length of the first sequence.
    #[inline]
    pub fn width(&self) -> u32 {
        self.matrix.width()
    }

    /// Length of the second sequence.
    #[inline]
    pub fn height(&self) -> u32 {
        self.matrix.height()
    }

    /// Configured branch threshold.
    #[inline]
    pub fn branch_threshold(&self) -> f32 {
        self.branch_threshold
    }

    /// The match function driving this engine.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Number of frontier expansions performed so far.
    #[inline]
    pub fn num_steps(&self) -> u32 {
        self.num_steps
    }

    /// Number of matcher invocations so far. At most one per cell, so
    /// bounded by `width * height`; far below it on well-matched inputs.
    #[inline]
    pub fn num_evals(&self) -> u32 {
        self.num_evals
    }

    /// Perform one frontier expansion. Returns `false` iff the frontier is
    /// empty and the search is finished.
    pub fn step(&mut self) -> bool {
        let Some(cand) = self.frontier.pop() else {
            return false;
        };
        self.num_steps += 1;

        // Pruning keeps the frontier mostly above `best_match`, but not
        // strictly: a skip successor that runs off the matrix raises the
        // bound without a prune, so a stale candidate below it can still
        // surface here. It is wasted work, not an error; the dominance
        // check and the insert bound keep it from spreading.

        let cell = *self.matrix.get(cand.i, cand.j);
        if cell.best >= cand.score + 1.0 {
            // An earlier visit dominates any completion through this cell:
            // the eval still to be added is at most 1.
            return true;
        }

        let eval = if cell.is_evaluated() {
            cell.eval()
        } else {
            let eval = self.matcher.score(cand.i, cand.j);
            debug_assert!(
                (0.0..=1.0).contains(&eval),
                "matcher returned {eval} for ({}, {}), outside [0, 1]",
                cand.i,
                cand.j
            );
            self.matrix.get_mut(cand.i, cand.j).eval = eval;
            self.num_evals += 1;
            eval
        };

        let new_score = cand.score + eval;
        if new_score > cell.best {
            self.matrix.get_mut(cand.i, cand.j).best = new_score;

            if eval > 0.0 {
                self.add_candidate(new_score, cand.i, cand.j, 1, 1);
                // Throw out whatever can no longer reach the raised bound.
                self.frontier.prune(new_score);
            }

            if eval < self.branch_threshold {
                // Skip this row / this column. The move consumes no match,
                // so both successors carry the pre-eval score.
                self.add_candidate(cand.score, cand.i, cand.j, 1, 0);
                self.add_candidate(cand.score, cand.i, cand.j, 0, 1);
            }
        }

        true
    }

    /// Run the search to completion and return the best path.
    ///
    /// May be called after manual [`step`](Self::step)ping; it finishes the
    /// remaining work. Running again afterwards reproduces the same result.
    pub fn run(&mut self) -> MatchResult {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("flcs_run", width = self.width(), height = self.height());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        while self.step() {}

        #[cfg(feature = "tracing")]
        tracing::debug!(
            steps = self.num_steps,
            evals = self.num_evals,
            best = self.best_match,
            "frontier drained"
        );

        self.reconstruct()
    }

    /// Queue the successor of `(i, j)` displaced by `(add_i, add_j)`,
    /// reaching it with accumulated score `score`.
    fn add_candidate(&mut self, score: f32, i: u32, j: u32, add_i: u32, add_j: u32) {
        if i + add_i >= self.width() || j + add_j >= self.height() {
            // The path runs off the matrix: a complete run ending at (i, j).
            if score > self.best_match {
                self.best_match = score;
                self.best_res = (i, j);
            }
            return;
        }

        let max_possible =
            max_possible_score(score, self.width(), self.height(), i + add_i, j + add_j);
        if max_possible > self.best_match {
            self.frontier.insert(i + add_i, j + add_j, score);
        }
    }

    /// Walk the matrix back from the best terminal cell, collecting the
    /// matches of the best path.
    ///
    /// The walk keeps the portion of the best score not yet explained.
    /// Standing at a cell, it first tries to hand the remainder to a
    /// neighbour: up/left if a skip move out of that neighbour carried
    /// exactly the remainder (its best minus its own eval), diagonally if
    /// the neighbour's best is the remainder itself. When no neighbour
    /// accounts for it, the difference was earned at the current cell and
    /// its match is emitted. This subsumes the equal-best hop of the
    /// classical backtrack and also explains matches that the path entered
    /// through a skip move rather than diagonally.
    fn reconstruct(&self) -> MatchResult {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("reconstruct", best = self.best_match);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        debug_assert!(
            self.best_match >= 0.0,
            "a drained frontier implies at least one complete run"
        );
        let total_match = self.best_match.max(0.0);
        let mut matches = Vec::with_capacity(self.width().min(self.height()) as usize);

        let (mut i, mut j) = self.best_res;
        let mut remaining = total_match;
        // Exclusive coordinate bounds for the next emission; keeps the
        // collected matches strictly monotone even on heuristic runs whose
        // matrix under-explains the best score.
        let (mut bound_i, mut bound_j) = (u32::MAX, u32::MAX);

        while remaining > SCORE_TOLERANCE {
            if i > 0 && self.skip_explains(i - 1, j, remaining) {
                i -= 1;
                continue;
            }
            if j > 0 && self.skip_explains(i, j - 1, remaining) {
                j -= 1;
                continue;
            }
            if i > 0 && j > 0 && scores_match(self.matrix.get(i - 1, j - 1).best(), remaining) {
                i -= 1;
                j -= 1;
                continue;
            }

            let cell = self.matrix.get(i, j);
            if i >= bound_i || j >= bound_j || cell.eval() <= 0.0 {
                // Only reachable below an exact branch threshold, where the
                // search is declaredly heuristic: stop rather than emit an
                // inconsistent match.
                break;
            }
            matches.push(ResultMatch {
                i,
                j,
                value: cell.eval(),
            });
            remaining -= cell.eval();
            (bound_i, bound_j) = (i, j);
        }

        matches.reverse();
        MatchResult {
            total_match,
            matches,
        }
    }

    /// True when a skip move out of `(i, j)` carried exactly `remaining`:
    /// skip successors carry the pre-eval score, which is the cell's best
    /// minus its own eval.
    fn skip_explains(&self, i: u32, j: u32, remaining: f32) -> bool {
        let cell = self.matrix.get(i, j);
        cell.has_path() && scores_match(cell.best() - cell.eval().max(0.0), remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_reports_exhaustion() {
        let mut engine = FlcsEngine::with_branch_threshold(1, 1, |_: u32, _: u32| 1.0, 1.0);
        assert!(engine.step());
        // Seed expanded; its diagonal successor ran off the 1x1 matrix.
        assert!(!engine.step());
        assert!(!engine.step());
        assert_eq!(engine.num_steps(), 1);
        assert_eq!(engine.num_evals(), 1);
    }

    #[test]
    fn run_after_manual_steps_finishes_the_search() {
        let eq = |i: u32, j: u32| if i == j { 1.0 } else { 0.0 };
        let mut engine = FlcsEngine::with_branch_threshold(4, 4, eq, 1.0);
        assert!(engine.step());
        assert!(engine.step());
        let result = engine.run();
        assert_eq!(result.total_match, 4.0);
        assert_eq!(result.matches.len(), 4);
    }

    #[test]
    fn rerunning_a_finished_engine_reproduces_the_result() {
        let eq = |i: u32, j: u32| if i + 1 == j { 0.75 } else { 0.0 };
        let mut engine = FlcsEngine::with_branch_threshold(4, 5, eq, 1.0);
        let first = engine.run();
        let steps = engine.num_steps();
        let second = engine.run();
        assert_eq!(first, second);
        assert_eq!(engine.num_steps(), steps, "no further expansions");
    }

    #[test]
    fn well_matched_input_evaluates_only_the_diagonal() {
        let eq = |i: u32, j: u32| if i == j { 1.0 } else { 0.0 };
        let mut engine = FlcsEngine::with_branch_threshold(16, 16, eq, 1.0);
        let result = engine.run();
        assert_eq!(result.total_match, 16.0);
        assert_eq!(engine.num_evals(), 16);
    }

    #[test]
    fn dominated_revisit_is_discarded() {
        // (1,1) is reachable through skips along the top row and the left
        // column; once its match raised `best` to 1, the second skip visit
        // (score 0) is dominated and must expand nothing.
        let m = |i: u32, j: u32| if i == j && i > 0 { 1.0 } else { 0.0 };
        let mut engine = FlcsEngine::with_branch_threshold(3, 3, m, 1.0);
        let result = engine.run();
        assert_eq!(result.total_match, 2.0);
        assert_eq!(
            result.matches,
            vec![
                ResultMatch { i: 1, j: 1, value: 1.0 },
                ResultMatch { i: 2, j: 2, value: 1.0 },
            ]
        );
        assert_eq!(engine.num_evals(), 5);
        assert_eq!(engine.num_steps(), 6, "one expansion is a dominated discard");
    }

    #[test]
    fn counters_start_at_zero() {
        let engine = FlcsEngine::new(2, 2, |_: u32, _: u32| 0.0);
        assert_eq!(engine.num_steps(), 0);
        assert_eq!(engine.num_evals(), 0);
        assert_eq!(engine.branch_threshold(), DEFAULT_BRANCH_THRESHOLD);
    }

    #[test]
    #[should_panic]
    fn threshold_above_one_is_rejected() {
        let _ = FlcsEngine::with_branch_threshold(2, 2, |_: u32, _: u32| 0.0, 1.5);
    }

    #[test]
    #[should_panic]
    fn zero_height_is_rejected() {
        let _ = FlcsEngine::new(2, 0, |_: u32, _: u32| 0.0);
    }
}
