use crate::engine::FlcsEngine;
use crate::traits::Matcher;

/// Builder for [`FlcsEngine`], for callers that configure the branch
/// threshold separately from construction.
pub struct FlcsEngineBuilder<M: Matcher> {
    width: u32,
    height: u32,
    matcher: M,
    branch_threshold: Option<f32>,
}

impl<M: Matcher> FlcsEngineBuilder<M> {
    pub fn new(width: u32, height: u32, matcher: M) -> Self {
        Self {
            width,
            height,
            matcher,
            branch_threshold: None,
        }
    }

    /// Use an explicit branch threshold instead of the default.
    pub fn with_branch_threshold(mut self, branch_threshold: f32) -> Self {
        self.branch_threshold = Some(branch_threshold);
        self
    }

    /// # Panics
    /// Panics if the dimensions are zero or the threshold exceeds `1.0`,
    /// as [`FlcsEngine::with_branch_threshold`] does.
    pub fn build(self) -> FlcsEngine<M> {
        match self.branch_threshold {
            Some(t) => FlcsEngine::with_branch_threshold(self.width, self.height, self.matcher, t),
            None => FlcsEngine::new(self.width, self.height, self.matcher),
        }
    }
}
