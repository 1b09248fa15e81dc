//! Final pipeline stage: resolve the deferred constraints of the matched
//! entry against the accumulated bindings.

use sigfind_model::{Api, Query};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult, solve_constraints};

use super::ApiMatcher;

pub struct ConstraintSolverMatcher;

impl ApiMatcher for ConstraintSolverMatcher {
    fn name(&self) -> &'static str {
        "constraint"
    }

    fn test(
        &self,
        matcher: &LowTypeMatcher,
        _query: &Query,
        api: &Api,
        ctx: Context,
    ) -> MatchingResult {
        if api.type_constraints.is_empty() {
            return MatchingResult::Matched(ctx);
        }
        solve_constraints(matcher, &api.type_constraints, ctx)
    }
}
