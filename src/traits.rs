//! Core trait definition for match functions.
//!
//! The engine never sees the two sequences themselves. Everything it knows
//! about them flows through a [`Matcher`]: a capability object that grades
//! the pairing of the `i`th element of the first sequence with the `j`th
//! element of the second. This keeps the search generic over element types,
//! comparison semantics, and whatever caller state the grading needs.
//!
//! Plain closures implement the trait via a blanket impl, so ad-hoc match
//! functions need no wrapper type:
//!
//! ```
//! use flcs::{FlcsEngine, Matcher};
//!
//! let diagonal = |i: u32, j: u32| if i == j { 1.0 } else { 0.0 };
//! assert_eq!(diagonal.score(2, 2), 1.0);
//!
//! let mut engine = FlcsEngine::with_branch_threshold(3, 3, diagonal, 1.0);
//! assert_eq!(engine.run().total_match, 3.0);
//! ```

/// Grades the match between the `i`th element of the first sequence and the
/// `j`th element of the second.
///
/// # Contract
/// Implementations must guarantee:
///
/// - The returned value lies in `[0, 1]`: 0 means no match, anything above
///   is a match weighted by quality. Values outside that range break the
///   bound arithmetic of the search and are rejected by debug assertions at
///   the evaluation site.
/// - Within one engine run the result is a pure function of `(i, j)`. The
///   engine calls [`score`](Self::score) at most once per distinct cell and
///   caches the result, so impure matchers produce unreproducible paths.
///
/// The engine invokes the matcher synchronously from its step loop; a slow
/// matcher directly slows the search.
pub trait Matcher {
    /// Match value for the pair `(i, j)`, in `[0, 1]`.
    fn score(&self, i: u32, j: u32) -> f32;
}

impl<F> Matcher for F
where
    F: Fn(u32, u32) -> f32,
{
    fn score(&self, i: u32, j: u32) -> f32 {
        self(i, j)
    }
}
