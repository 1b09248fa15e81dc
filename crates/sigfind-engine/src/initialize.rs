//! Query initialization.
//!
//! Between parsing and matching, a query is rewritten for the search at
//! hand: name regexes pick up the case policy, the secondary dialect's
//! builtin aliases and function constructors normalize to the canonical
//! forms, and the initial context is seeded with the inequalities that keep
//! distinct query variables and distinct wildcard tags from collapsing onto
//! one type.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use sigfind_model::{
    ActivePatternSignature, Identity, LowType, NameMatchMethod, Query, QueryMethod, SearchOptions,
    SignatureQuery,
};
use sigfind_solver::{Context, TypeIndex};

/// Builtin alias → canonical display name in the secondary dialect.
static CSHARP_ALIASES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    table.insert("bool", "Boolean");
    table.insert("byte", "Byte");
    table.insert("sbyte", "SByte");
    table.insert("char", "Char");
    table.insert("short", "Int16");
    table.insert("ushort", "UInt16");
    table.insert("int", "Int32");
    table.insert("uint", "UInt32");
    table.insert("long", "Int64");
    table.insert("ulong", "UInt64");
    table.insert("float", "Single");
    table.insert("double", "Double");
    table.insert("decimal", "Decimal");
    table.insert("string", "String");
    table.insert("object", "Object");
    // `void` returns align with the core library's unit.
    table.insert("void", "unit");
    table
});

/// Rewrite every low type a query carries.
fn map_query_types(mut query: Query, f: &impl Fn(LowType) -> LowType) -> Query {
    let rewrite = |t: &LowType| t.map(f);
    query.method = match query.method {
        QueryMethod::ByName(items, SignatureQuery::Signature(t)) => {
            QueryMethod::ByName(items, SignatureQuery::Signature(rewrite(&t)))
        }
        QueryMethod::BySignature(SignatureQuery::Signature(t)) => {
            QueryMethod::BySignature(SignatureQuery::Signature(rewrite(&t)))
        }
        QueryMethod::ByActivePattern(mut pattern) => {
            pattern.signature = match pattern.signature {
                ActivePatternSignature::AnyParameter { input, result } => {
                    ActivePatternSignature::AnyParameter {
                        input: rewrite(&input),
                        result: rewrite(&result),
                    }
                }
                ActivePatternSignature::Specified(t) => {
                    ActivePatternSignature::Specified(rewrite(&t))
                }
            };
            QueryMethod::ByActivePattern(pattern)
        }
        QueryMethod::ByComputationExpression(mut ce) => {
            ce.type_ = rewrite(&ce.type_);
            QueryMethod::ByComputationExpression(ce)
        }
        other => other,
    };
    query
}

/// Recompile glob-derived name regexes under the active case policy.
fn apply_case_policy(mut query: Query, options: &SearchOptions) -> Query {
    if !options.ignore_case.is_enabled() {
        return query;
    }
    if let QueryMethod::ByName(items, _) = &mut query.method {
        for item in items {
            if let NameMatchMethod::Regex(pattern) = &item.method {
                if let Ok(insensitive) = Regex::new(&format!("(?i){}", pattern.as_str())) {
                    item.method = NameMatchMethod::Regex(insensitive);
                }
            }
        }
    }
    query
}

/// Primary-dialect initialization: the parser already tags variables with
/// the query source and leaves identities partial, so only the case policy
/// needs applying.
pub fn initialize_fsharp(query: Query, _index: &TypeIndex, options: &SearchOptions) -> Query {
    apply_case_policy(query, options)
}

/// Secondary-dialect initialization: builtin aliases map to canonical
/// identities and the function constructors compress back to arrows.
pub fn initialize_csharp(query: Query, _index: &TypeIndex, options: &SearchOptions) -> Query {
    let query = map_query_types(query, &|t| expand_function_constructor(resolve_alias(t)));
    apply_case_policy(query, options)
}

fn resolve_alias(t: LowType) -> LowType {
    let LowType::Identity(Identity::Partial(partial)) = &t else {
        return t;
    };
    if partial.name.len() != 1 {
        return t;
    }
    match CSHARP_ALIASES.get(partial.name[0].part.display()) {
        Some(canonical) => LowType::Identity(Identity::partial(
            &[canonical],
            partial.generic_parameter_count,
        )),
        None => t,
    }
}

/// `Func<a, .., r>` and `Action<a, ..>` are spelled arrows.
fn expand_function_constructor(t: LowType) -> LowType {
    let LowType::Generic(constructor, arguments) = &t else {
        return t;
    };
    let LowType::Identity(identity) = constructor.as_ref() else {
        return t;
    };
    let Some(items) = identity.name_items() else {
        return t;
    };
    let Some(inner) = items.first() else {
        return t;
    };
    match inner.part.display() {
        "Func" if arguments.len() >= 2 => LowType::Arrow(arguments.clone()),
        "Action" => {
            let mut elements = arguments.clone();
            elements.push(LowType::identity(&["unit"]));
            LowType::Arrow(elements)
        }
        _ => t,
    }
}

/// Seed the context: distance starts at zero and distinct query variables
/// and distinct wildcard tags must never unify.
pub fn initial_context(query: &Query, index: Arc<TypeIndex>, options: &SearchOptions) -> Context {
    let mut ctx = Context::new(options.clone(), index);
    let mut variables: Vec<LowType> = Vec::new();
    let mut wildcards: Vec<LowType> = Vec::new();
    for t in query.low_types() {
        t.walk(&mut |node| {
            let bucket = match node {
                LowType::Variable(..) => &mut variables,
                LowType::Wildcard(Some(_)) => &mut wildcards,
                _ => return,
            };
            if !bucket.contains(node) {
                bucket.push(node.clone());
            }
        });
    }
    // A wildcard may still resolve to a variable's type, so the two groups
    // are kept apart only within themselves.
    for group in [&variables, &wildcards] {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                // Seeding never contradicts: the store holds no equalities yet.
                ctx.equations.try_add_inequality(a, b);
            }
        }
    }
    ctx
}
