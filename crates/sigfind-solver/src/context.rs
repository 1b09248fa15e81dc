//! Per-match accumulator state.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sigfind_model::{LowType, SearchOptions, TypeVariable, VariableSource};

use crate::equations::Equations;
use crate::index::TypeIndex;

/// Everything one match attempt threads through the rules: the running
/// distance, the equation store, the substitutions recorded for naming, a
/// subtype residual cache, and the options in force. Contexts are per-item
/// and never shared; the definition index is shared by reference.
#[derive(Clone, Debug)]
pub struct Context {
    pub distance: u32,
    pub equations: Equations,
    pub substitutions: FxHashMap<(VariableSource, TypeVariable), LowType>,
    /// Resolved subtype-constraint questions, keyed by (type, parent).
    pub subtype_cache: FxHashMap<(LowType, LowType), bool>,
    /// Trailing arrow segments of the current target that are droppable
    /// because every parameter in them is optional. Set by the signature
    /// matcher before it hands the pair to the unifier.
    pub optional_tail: usize,
    pub options: SearchOptions,
    pub index: Arc<TypeIndex>,
}

impl Context {
    pub fn new(options: SearchOptions, index: Arc<TypeIndex>) -> Self {
        Context {
            distance: 0,
            equations: Equations::new(),
            substitutions: FxHashMap::default(),
            subtype_cache: FxHashMap::default(),
            optional_tail: 0,
            options,
            index,
        }
    }

    pub fn add_distance(mut self, amount: u32) -> Self {
        self.distance += amount;
        self
    }

    pub fn bind_substitution(&mut self, source: VariableSource, variable: TypeVariable, t: LowType) {
        self.substitutions.insert((source, variable), t);
    }
}

/// Outcome of a match test. There is no partial result: composition threads
/// the context through each step and short-circuits on the first failure.
#[derive(Clone, Debug)]
pub enum MatchingResult {
    Matched(Context),
    Failure,
}

impl MatchingResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchingResult::Matched(_))
    }

    pub fn into_context(self) -> Option<Context> {
        match self {
            MatchingResult::Matched(ctx) => Some(ctx),
            MatchingResult::Failure => None,
        }
    }

    /// Distance of the matched context, for ranking alternative branches.
    pub fn distance(&self) -> Option<u32> {
        match self {
            MatchingResult::Matched(ctx) => Some(ctx.distance),
            MatchingResult::Failure => None,
        }
    }
}
