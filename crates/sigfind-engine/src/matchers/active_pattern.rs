//! Active-pattern matching.

use sigfind_model::{ActivePatternSignature, Api, ApiSignature, LowType, Query, QueryMethod};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult};

use super::ApiMatcher;

pub struct ActivePatternMatcher;

impl ApiMatcher for ActivePatternMatcher {
    fn name(&self) -> &'static str {
        "active-pattern"
    }

    fn test(
        &self,
        matcher: &LowTypeMatcher,
        query: &Query,
        api: &Api,
        ctx: Context,
    ) -> MatchingResult {
        let QueryMethod::ByActivePattern(pattern_query) = &query.method else {
            return MatchingResult::Matched(ctx);
        };
        let ApiSignature::ActivePattern { kind, function } = &api.signature else {
            return MatchingResult::Failure;
        };
        if *kind != pattern_query.kind {
            return MatchingResult::Failure;
        }
        let arrow = function.arrow_type();
        let LowType::Arrow(elements) = &arrow else {
            return MatchingResult::Failure;
        };
        match &pattern_query.signature {
            ActivePatternSignature::AnyParameter { input, result } => {
                // Any leading parameters; only the subject and the pattern
                // result are pinned.
                let n = elements.len();
                match matcher.test(input, &elements[n - 2], ctx) {
                    MatchingResult::Matched(c) => matcher.test(result, &elements[n - 1], c),
                    MatchingResult::Failure => MatchingResult::Failure,
                }
            }
            ActivePatternSignature::Specified(signature) => {
                matcher.test(signature, &arrow, ctx)
            }
        }
    }
}
