//! Fuzzy Longest Common Subsequence (FLCS)
//!
//! This crate solves the longest-common-subsequence problem generalised to
//! *match values*: instead of binary equality, every pair `(i, j)` of
//! elements carries a weight in `[0, 1]`, and the engine finds the strictly
//! monotone index-pair path maximising the summed weight. Most
//! faster-than-O(n²) LCS algorithms lean on binary equality (some on a
//! finite alphabet, too) and do not survive this generalisation.
//!
//! ## Core idea
//! 1. Treat the W×H grid of pair weights as a *lazily evaluated* match
//!    matrix: the caller-supplied [`Matcher`] is consulted at most once per
//!    cell, and only for cells the search actually visits.
//! 2. Explore best-first from a frontier of candidates ordered by an
//!    optimistic upper bound, so promising paths are completed early.
//! 3. Every completed path raises a lower bound that prunes the frontier;
//!    on well-matched inputs the search degenerates to near-linear work
//!    instead of the O(W·H) of a table-filling DP.
//!
//! Worst case remains O(W·H) in both time and memory.
//!
//! ## Quick start
//! ```
//! use flcs::{matchers::ExactMatcher, FlcsEngine};
//!
//! let s: &[u8] = b"ACCG";
//! let t: &[u8] = b"ACGC";
//! let matcher = ExactMatcher::new(s, t);
//! let (width, height) = matcher.dims();
//!
//! // Threshold 1.0 makes the search exact: classic LCS.
//! let mut engine = FlcsEngine::with_branch_threshold(width, height, matcher, 1.0);
//! let result = engine.run();
//! assert_eq!(result.total_match, 3.0);
//! assert_eq!(result.matches.len(), 3);
//! ```
//!
//! ## Built-in matchers
//! The `matchers` module contains reference implementations:
//! - binary equality over slices ([`matchers::ExactMatcher`])
//! - graded closeness of numeric series ([`matchers::ProximityMatcher`])
//!
//! Any `Fn(u32, u32) -> f32` closure works as a matcher too; see
//! [`Matcher`].
//!
//! ## Exactness
//! With the default branch threshold (0.95) the engine treats strong
//! matches as unconditionally worth taking and skips some branching; that
//! is a deliberate speed/accuracy trade-off. Set the threshold to `1.0`
//! for exact results.

pub mod builder;
pub mod engine;
pub mod frontier;
pub mod matchers;
pub mod matrix;
pub mod traits;
pub mod utils;

pub use crate::builder::FlcsEngineBuilder;
pub use crate::engine::{FlcsEngine, MatchResult, ResultMatch, DEFAULT_BRANCH_THRESHOLD};
pub use crate::traits::Matcher;
