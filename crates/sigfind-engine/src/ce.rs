//! Computation-expression search.
//!
//! A builder query runs a two-phase scan instead of the standard pipeline.
//! Phase one discovers the builders whose computation types unify with the
//! query's type and whose syntax set covers the requested one. Phase two
//! forms a choice over the matched computation types and collects every API
//! whose extracted target unifies with it. Builders are emitted first, each
//! at distance zero, then the applicable APIs at their matched distance.

use sigfind_model::{
    Api, ApiDictionary, ApiSignature, ComputationExpressionQuery, LowType,
};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult};
use tracing::debug;

use crate::search::SearchResult;

/// The type an API exposes to a builder search, by signature variant. A
/// module value wrapping an abbreviated arrow exposes the arrow's result;
/// a module function exposes the type of its final segment's first
/// parameter. Everything else does not participate.
fn phase_two_target(api: &Api) -> Option<LowType> {
    match &api.signature {
        ApiSignature::ModuleValue(LowType::TypeAbbreviation { original, .. }) => {
            match original.as_ref() {
                LowType::Arrow(elements) => elements.last().cloned(),
                _ => Some((**original).clone()),
            }
        }
        ApiSignature::ModuleValue(t) => Some(t.clone()),
        ApiSignature::ModuleFunction(function) => function
            .parameters
            .last()
            .and_then(|group| group.first())
            .map(|parameter| parameter.type_.clone()),
        _ => None,
    }
}

fn syntax_covers(builder_syntaxes: &[String], requested: &[String]) -> bool {
    if requested.is_empty() {
        // An empty query syntax means "any non-empty builder".
        return !builder_syntaxes.is_empty();
    }
    requested
        .iter()
        .all(|wanted| builder_syntaxes.iter().any(|have| have == wanted))
}

pub fn search<'a>(
    dictionaries: &'a [ApiDictionary],
    matcher: &LowTypeMatcher,
    query: &ComputationExpressionQuery,
    seed: &Context,
) -> Vec<SearchResult<'a>> {
    let mut results: Vec<SearchResult<'a>> = Vec::new();
    let mut computation_types: Vec<LowType> = Vec::new();

    // Phase 1: discover builders.
    for dictionary in dictionaries {
        for api in &dictionary.apis {
            let ApiSignature::ComputationExpressionBuilder(builder) = &api.signature else {
                continue;
            };
            if !syntax_covers(&builder.syntaxes, &query.syntaxes) {
                continue;
            }
            let matched: Vec<&LowType> = builder
                .computation_expression_types
                .iter()
                .filter(|t| {
                    matcher.test(&query.type_, t, seed.clone()).is_matched()
                })
                .collect();
            if matched.is_empty() {
                continue;
            }
            for t in matched {
                if !computation_types.contains(t) {
                    computation_types.push(t.clone());
                }
            }
            results.push(SearchResult {
                distance: 0,
                api,
                assembly_name: &dictionary.assembly_name,
            });
        }
    }
    debug!(builders = results.len(), "builder discovery finished");
    if computation_types.is_empty() {
        return results;
    }

    // Phase 2: discover applicable APIs.
    let choice = if computation_types.len() == 1 {
        computation_types.pop().expect("nonempty")
    } else {
        LowType::Choice(computation_types)
    };
    for dictionary in dictionaries {
        for api in &dictionary.apis {
            let Some(target) = phase_two_target(api) else {
                continue;
            };
            if let MatchingResult::Matched(ctx) = matcher.test(&choice, &target, seed.clone()) {
                results.push(SearchResult {
                    distance: ctx.distance,
                    api,
                    assembly_name: &dictionary.assembly_name,
                });
            }
        }
    }
    results
}
