//! Kind filtering for the secondary dialect.
//!
//! C#-surface searches reject API shapes the dialect cannot express at all;
//! everything callable from C# still participates.

use sigfind_model::{Api, ApiSignature, Query};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult};

use super::ApiMatcher;

pub struct CSharpKindFilter;

impl ApiMatcher for CSharpKindFilter {
    fn name(&self) -> &'static str {
        "csharp-kind-filter"
    }

    fn test(
        &self,
        _matcher: &LowTypeMatcher,
        _query: &Query,
        api: &Api,
        ctx: Context,
    ) -> MatchingResult {
        match &api.signature {
            ApiSignature::ActivePattern { .. }
            | ApiSignature::ComputationExpressionBuilder(_) => MatchingResult::Failure,
            _ => MatchingResult::Matched(ctx),
        }
    }
}
