//! The pluggable per-aspect API matchers.
//!
//! An API matcher is a named capability over `(low-type matcher, query, api,
//! ctx)`. Matchers compose as an ordered sequence: the composite succeeds iff
//! every matcher succeeds, threading the context through each step. Each
//! matcher keys off the active query method and passes entries through
//! untouched when the method is not its concern.

use sigfind_model::{Api, Query};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult};

mod active_pattern;
mod constraint;
mod filter;
mod name;
mod signature;

pub use active_pattern::ActivePatternMatcher;
pub use constraint::ConstraintSolverMatcher;
pub use filter::CSharpKindFilter;
pub use name::NameMatcher;
pub use signature::{SignatureMatcher, signature_target};

pub trait ApiMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn test(
        &self,
        matcher: &LowTypeMatcher,
        query: &Query,
        api: &Api,
        ctx: Context,
    ) -> MatchingResult;
}

/// Run the whole pipeline over one entry.
pub fn run_pipeline(
    pipeline: &[Box<dyn ApiMatcher>],
    matcher: &LowTypeMatcher,
    query: &Query,
    api: &Api,
    ctx: Context,
) -> MatchingResult {
    let mut ctx = ctx;
    for stage in pipeline {
        match stage.test(matcher, query, api, ctx) {
            MatchingResult::Matched(next) => ctx = next,
            MatchingResult::Failure => {
                tracing::trace!(stage = stage.name(), "pipeline stage rejected entry");
                return MatchingResult::Failure;
            }
        }
    }
    MatchingResult::Matched(ctx)
}
