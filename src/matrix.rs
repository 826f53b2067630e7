//! Lazily evaluated match matrix.
//!
//! One [`EvalMatch`] per cell, allocated up front, filled on demand as the
//! driver visits cells. Both fields start at a negative sentinel: `eval`
//! until the matcher has been called for that cell, `best` until some path
//! has reached it.

/// Sentinel for "not yet", used by both fields of [`EvalMatch`].
/// Real evals lie in `[0, 1]` and real path scores are non-negative.
const UNSET: f32 = -1.0;

/// State of one matrix cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvalMatch {
    /// Result of the matcher at this position; the sentinel until
    /// evaluated. Once set, never changes.
    pub(crate) eval: f32,
    /// Highest cumulative score of any path found so far that ends at this
    /// cell; the sentinel until a path reaches it. Never decreases.
    pub(crate) best: f32,
}

impl EvalMatch {
    /// True once the matcher has been called for this cell.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.eval >= 0.0
    }

    /// True once some path has reached this cell.
    #[inline]
    pub fn has_path(&self) -> bool {
        self.best >= 0.0
    }

    /// Match value at this cell. Meaningful only after evaluation.
    #[inline]
    pub fn eval(&self) -> f32 {
        self.eval
    }

    /// Best cumulative score ending here. Meaningful only once a path exists.
    #[inline]
    pub fn best(&self) -> f32 {
        self.best
    }
}

/// Flat W×H grid of [`EvalMatch`] cells.
///
/// Cell `(i, j)` lives at index `i * height + j`: one row of `height`
/// consecutive cells per `i`. The stride must cover the full `j` range or
/// distinct cells would alias for non-square inputs; the same convention is
/// used by the driver and by path reconstruction.
pub struct MatchMatrix {
    width: u32,
    height: u32,
    cells: Vec<EvalMatch>,
}

impl MatchMatrix {
    /// Allocate all cells, each initialised to (unevaluated, no path yet).
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "width must be positive");
        assert!(height > 0, "height must be positive");
        let cells = vec![
            EvalMatch {
                eval: UNSET,
                best: UNSET,
            };
            width as usize * height as usize
        ];
        Self {
            width,
            height,
            cells,
        }
    }

    /// Length of the first sequence.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Length of the second sequence.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, i: u32, j: u32) -> usize {
        debug_assert!(i < self.width && j < self.height);
        i as usize * self.height as usize + j as usize
    }

    /// Cell `(i, j)`.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> &EvalMatch {
        &self.cells[self.index(i, j)]
    }

    /// Mutable cell `(i, j)`.
    #[inline]
    pub(crate) fn get_mut(&mut self, i: u32, j: u32) -> &mut EvalMatch {
        let idx = self.index(i, j);
        &mut self.cells[idx]
    }
}
