//! Name matching.

use sigfind_model::{Api, ByNameItem, NameMatchMethod, Query, QueryMethod};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult};

use super::ApiMatcher;

pub struct NameMatcher;

impl NameMatcher {
    fn item_matches(item: &ByNameItem, part_display: &str, generic_count: usize, ignore_case: bool) -> bool {
        let name_ok = match &item.method {
            NameMatchMethod::Any => true,
            NameMatchMethod::StringCompare => {
                if ignore_case {
                    part_display.eq_ignore_ascii_case(&item.expected)
                } else {
                    part_display == item.expected
                }
            }
            NameMatchMethod::Regex(pattern) => pattern.is_match(part_display),
        };
        if !name_ok {
            return false;
        }
        item.generic_parameters.is_empty() || item.generic_parameters.len() == generic_count
    }
}

impl ApiMatcher for NameMatcher {
    fn name(&self) -> &'static str {
        "name"
    }

    /// Zip the expected items against the innermost portion of the API's
    /// display name. The API name must be at least as long as the pattern.
    fn test(
        &self,
        _matcher: &LowTypeMatcher,
        query: &Query,
        api: &Api,
        ctx: Context,
    ) -> MatchingResult {
        let QueryMethod::ByName(items, _) = &query.method else {
            return MatchingResult::Matched(ctx);
        };
        let Some(display) = api.name.display_name() else {
            return MatchingResult::Failure;
        };
        if display.len() < items.len() {
            return MatchingResult::Failure;
        }
        let ignore_case = ctx.options.ignore_case.is_enabled();
        let all_match = items.iter().zip(display.iter()).all(|(item, segment)| {
            Self::item_matches(
                item,
                segment.part.display(),
                segment.generic_parameters.len(),
                ignore_case,
            )
        });
        if all_match {
            MatchingResult::Matched(ctx)
        } else {
            MatchingResult::Failure
        }
    }
}
