//! Per-mode assembly of the matching pipeline.
//!
//! A strategy bundles everything one dialect needs: how to parse query text,
//! how to initialize the parsed query and seed the context, and which
//! matchers run in which order. The trait keeps the search driver generic
//! over dialects without it knowing either one.

use std::sync::Arc;

use sigfind_model::{Mode, Query, SearchError, SearchOptions};
use sigfind_solver::{Context, LowTypeMatcher, TypeIndex};

use crate::initialize;
use crate::matchers::{
    ActivePatternMatcher, ApiMatcher, CSharpKindFilter, ConstraintSolverMatcher, NameMatcher,
    SignatureMatcher,
};
use crate::parser;

pub trait InitializationStrategy: Send + Sync {
    /// The low-type matcher and the ordered API matcher pipeline.
    fn matchers(&self, options: &SearchOptions) -> (LowTypeMatcher, Vec<Box<dyn ApiMatcher>>);

    fn parse_query(&self, text: &str) -> Result<Query, SearchError>;

    fn initialize_query(
        &self,
        query: Query,
        index: &TypeIndex,
        options: &SearchOptions,
    ) -> Query;

    fn initial_context(
        &self,
        query: &Query,
        index: Arc<TypeIndex>,
        options: &SearchOptions,
    ) -> Context {
        initialize::initial_context(query, index, options)
    }
}

/// Primary dialect: symbol/compiled name distinction, curried arrows,
/// operator and active-pattern semantics.
pub struct FSharpStrategy;

impl InitializationStrategy for FSharpStrategy {
    fn matchers(&self, options: &SearchOptions) -> (LowTypeMatcher, Vec<Box<dyn ApiMatcher>>) {
        let pipeline: Vec<Box<dyn ApiMatcher>> = vec![
            Box::new(NameMatcher),
            Box::new(SignatureMatcher),
            Box::new(ActivePatternMatcher),
            Box::new(ConstraintSolverMatcher),
        ];
        (LowTypeMatcher::new(options.clone()), pipeline)
    }

    fn parse_query(&self, text: &str) -> Result<Query, SearchError> {
        parser::fsharp::parse(text)
    }

    fn initialize_query(&self, query: Query, index: &TypeIndex, options: &SearchOptions) -> Query {
        initialize::initialize_fsharp(query, index, options)
    }
}

/// Secondary dialect: builtin aliases normalize to canonical identities,
/// function constructors compress to arrows, and API kinds the dialect
/// cannot express are filtered out before matching.
pub struct CSharpStrategy;

impl InitializationStrategy for CSharpStrategy {
    fn matchers(&self, options: &SearchOptions) -> (LowTypeMatcher, Vec<Box<dyn ApiMatcher>>) {
        let pipeline: Vec<Box<dyn ApiMatcher>> = vec![
            Box::new(CSharpKindFilter),
            Box::new(NameMatcher),
            Box::new(SignatureMatcher),
            Box::new(ConstraintSolverMatcher),
        ];
        (LowTypeMatcher::new(options.clone()), pipeline)
    }

    fn parse_query(&self, text: &str) -> Result<Query, SearchError> {
        parser::csharp::parse(text)
    }

    fn initialize_query(&self, query: Query, index: &TypeIndex, options: &SearchOptions) -> Query {
        initialize::initialize_csharp(query, index, options)
    }
}

pub fn strategy_for(mode: Mode) -> &'static dyn InitializationStrategy {
    match mode {
        Mode::FSharp => &FSharpStrategy,
        Mode::CSharp => &CSharpStrategy,
    }
}
