/// Default limit on form nesting while parsing.
pub const DEFAULT_MAX_DEPTH: usize = 1_000;

/// Default limit on nested `evaluate` frames. A recursive function uses a
/// few frames per call level, so this allows calls thousands deep.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 20_000;

/// Stack reserved for the thread a run executes on. Sized so both depth
/// limits are reached long before the stack is.
pub const DEFAULT_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Knobs shared by the parser and the evaluator for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deepest form nesting the parser accepts before failing with
    /// `ResourceExhausted`.
    pub max_depth: usize,
    /// Deepest evaluator recursion before failing with `ResourceExhausted`.
    pub max_eval_depth: usize,
    /// Stack size in bytes of the interpreter thread.
    pub stack_size: usize,
}

impl Config {
    /// Uses `max_depth` for both parsing and evaluation.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_eval_depth: max_depth,
            ..Self::default()
        }
    }

    pub fn max_eval_depth(mut self, max_eval_depth: usize) -> Self {
        self.max_eval_depth = max_eval_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}
