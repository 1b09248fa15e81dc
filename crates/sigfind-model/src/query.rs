//! The abstract query surface the parsers produce.
//!
//! Queries are per-search values and are never serialized; name patterns with
//! globs carry their compiled regex so the matcher never re-compiles inside
//! the catalog loop.

use regex::Regex;

use crate::api::ActivePatternKind;
use crate::low_type::LowType;

/// How one name segment of a `ByName` query is compared.
#[derive(Clone, Debug)]
pub enum NameMatchMethod {
    StringCompare,
    /// Glob-derived pattern, compiled once at parse time.
    Regex(Regex),
    Any,
}

#[derive(Clone, Debug)]
pub struct ByNameItem {
    pub expected: String,
    /// When non-empty, the segment's generic-parameter count must agree.
    pub generic_parameters: Vec<String>,
    pub method: NameMatchMethod,
}

impl ByNameItem {
    pub fn exact(expected: impl Into<String>) -> Self {
        ByNameItem {
            expected: expected.into(),
            generic_parameters: Vec::new(),
            method: NameMatchMethod::StringCompare,
        }
    }

    pub fn any() -> Self {
        ByNameItem {
            expected: String::new(),
            generic_parameters: Vec::new(),
            method: NameMatchMethod::Any,
        }
    }
}

#[derive(Clone, Debug)]
pub enum SignatureQuery {
    Wildcard,
    Signature(LowType),
}

#[derive(Clone, Debug)]
pub enum ActivePatternSignature {
    /// `... -> input -> result`: any leading parameters.
    AnyParameter { input: LowType, result: LowType },
    /// A fully spelled arrow.
    Specified(LowType),
}

#[derive(Clone, Debug)]
pub struct ActivePatternQuery {
    pub kind: ActivePatternKind,
    pub signature: ActivePatternSignature,
}

#[derive(Clone, Debug)]
pub struct ComputationExpressionQuery {
    /// Empty means "any builder that implements something".
    pub syntaxes: Vec<String>,
    pub type_: LowType,
}

#[derive(Clone, Debug)]
pub enum QueryMethod {
    /// Innermost-first name items, optionally constrained by a signature.
    ByName(Vec<ByNameItem>, SignatureQuery),
    BySignature(SignatureQuery),
    ByActivePattern(ActivePatternQuery),
    ByComputationExpression(ComputationExpressionQuery),
}

#[derive(Clone, Debug)]
pub struct Query {
    pub original_string: String,
    pub method: QueryMethod,
}

impl Query {
    /// Every low type the query mentions, for initialization passes.
    pub fn low_types(&self) -> Vec<&LowType> {
        match &self.method {
            QueryMethod::ByName(_, SignatureQuery::Signature(t))
            | QueryMethod::BySignature(SignatureQuery::Signature(t)) => vec![t],
            QueryMethod::ByName(_, SignatureQuery::Wildcard)
            | QueryMethod::BySignature(SignatureQuery::Wildcard) => Vec::new(),
            QueryMethod::ByActivePattern(ap) => match &ap.signature {
                ActivePatternSignature::AnyParameter { input, result } => vec![input, result],
                ActivePatternSignature::Specified(t) => vec![t],
            },
            QueryMethod::ByComputationExpression(ce) => vec![&ce.type_],
        }
    }
}
