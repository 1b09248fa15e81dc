//! Signature matching: extract a low type from the API entry and hand the
//! pair to the unifier.

use sigfind_model::{Api, ApiSignature, LowType, MemberModifier, Query, QueryMethod, SignatureQuery};
use sigfind_solver::{Context, LowTypeMatcher, MatchingResult};

use super::ApiMatcher;

/// The low type a signature query tests an API against, plus how many of its
/// trailing arrow segments are droppable because every parameter in them is
/// optional. APIs with no matchable signature (modules, type definitions)
/// return `None` and fail signature queries.
pub fn signature_target(api: &Api) -> Option<(LowType, usize)> {
    match &api.signature {
        ApiSignature::ModuleValue(t) => Some((t.clone(), 0)),
        ApiSignature::ModuleFunction(function)
        | ApiSignature::ActivePattern { function, .. } => {
            Some((function.arrow_type(), function.optional_tail()))
        }
        ApiSignature::InstanceMember { declaring_type, member } => {
            let mut elements = vec![declaring_type.clone()];
            match member.arrow_type() {
                LowType::Arrow(rest) if !member.parameters.is_empty() => elements.extend(rest),
                single => elements.push(single),
            }
            Some((LowType::Arrow(elements), member.optional_tail()))
        }
        ApiSignature::StaticMember { member, .. }
        | ApiSignature::Constructor { member, .. }
        | ApiSignature::ExtensionMember(member) => {
            Some((member.arrow_type(), member.optional_tail()))
        }
        ApiSignature::TypeExtension(extension) => {
            let member = &extension.member;
            match extension.member_modifier {
                MemberModifier::Instance => {
                    let mut elements = vec![extension.existing_type.clone()];
                    match member.arrow_type() {
                        LowType::Arrow(rest) if !member.parameters.is_empty() => {
                            elements.extend(rest)
                        }
                        single => elements.push(single),
                    }
                    Some((LowType::Arrow(elements), member.optional_tail()))
                }
                MemberModifier::Static => Some((member.arrow_type(), member.optional_tail())),
            }
        }
        ApiSignature::UnionCase(case) => Some((case.arrow_type(), 0)),
        ApiSignature::ModuleDefinition(_)
        | ApiSignature::FullTypeDefinition(_)
        | ApiSignature::TypeAbbreviation(_)
        | ApiSignature::ComputationExpressionBuilder(_) => None,
    }
}

pub struct SignatureMatcher;

impl ApiMatcher for SignatureMatcher {
    fn name(&self) -> &'static str {
        "signature"
    }

    fn test(
        &self,
        matcher: &LowTypeMatcher,
        query: &Query,
        api: &Api,
        ctx: Context,
    ) -> MatchingResult {
        let signature_query = match &query.method {
            QueryMethod::ByName(_, signature) | QueryMethod::BySignature(signature) => signature,
            _ => return MatchingResult::Matched(ctx),
        };
        let query_type = match signature_query {
            SignatureQuery::Wildcard => return MatchingResult::Matched(ctx),
            SignatureQuery::Signature(t) => t,
        };
        let Some((target, optional_tail)) = signature_target(api) else {
            return MatchingResult::Failure;
        };
        let mut ctx = ctx;
        ctx.optional_tail = optional_tail;
        matcher.test(query_type, &target, ctx)
    }
}
