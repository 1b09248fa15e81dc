//! The low-type unifier.
//!
//! `LowTypeMatcher::test` decides whether two low types match under the
//! options in force, threading a [`Context`] that accumulates equations and
//! distance. Dispatch is first-match-wins over the variant pair:
//!
//! 1. identity vs identity
//! 2. wildcards
//! 3. variables (related through the equation store, never by identity)
//! 4. abbreviation transparency
//! 5. choices and delegates (before arrows, so a delegate can unwrap)
//! 6. arrows, with reshaping, greedy-wildcard absorption, and
//!    trailing-optional complementation
//! 7. tuples with a budgeted adjacent-swap search
//! 8. applied generics, including partial identity references
//!
//! Everything else fails. Failures are ordinary values, never errors.

use rustc_hash::FxHashSet;
use sigfind_model::{Identity, LowType, NamePart, SearchOptions};
use tracing::trace;

use crate::context::{Context, MatchingResult};
use crate::equations::bound_types;

use MatchingResult::{Failure, Matched};

/// Compare one name segment under the configured case and compiled-name
/// policies. `Some(cost)` is the distance the comparison charges.
fn part_match(a: &NamePart, b: &NamePart, options: &SearchOptions) -> Option<u32> {
    let eq = |x: &str, y: &str| {
        if options.ignore_case.is_enabled() {
            x.eq_ignore_ascii_case(y)
        } else {
            x == y
        }
    };
    if eq(a.display(), b.display()) {
        return Some(0);
    }
    let via_compiled = matches!((a.compiled(), b.compiled()), (Some(ca), Some(cb)) if eq(ca, cb))
        || a.compiled().is_some_and(|ca| eq(ca, b.display()))
        || b.compiled().is_some_and(|cb| eq(cb, a.display()));
    if via_compiled {
        let cost = if options.respect_name_difference.is_enabled() { 1 } else { 0 };
        Some(cost)
    } else {
        None
    }
}

/// Test two identities under the configured name equality.
///
/// A partial identity is a tail wildcard over the scope it leaves out, so the
/// comparison zips the shorter item list against the innermost items of the
/// longer one. A zero-parameter segment does not pin the generic count at
/// that segment.
pub(crate) fn identities_match(a: &Identity, b: &Identity, options: &SearchOptions) -> Option<u32> {
    let a_items = a.name_items()?;
    let b_items = b.name_items()?;
    let both_full = matches!((a, b), (Identity::Full(_), Identity::Full(_)));
    if both_full && a_items.len() != b_items.len() {
        return None;
    }
    if a.generic_parameter_count() != b.generic_parameter_count() {
        return None;
    }
    let overlap = a_items.len().min(b_items.len());
    if overlap == 0 {
        return None;
    }
    let mut cost = 0;
    for (item_a, item_b) in a_items[..overlap].iter().zip(&b_items[..overlap]) {
        cost += part_match(&item_a.part, &item_b.part, options)?;
        let (ga, gb) = (item_a.generic_parameters.len(), item_b.generic_parameters.len());
        if ga != 0 && gb != 0 && ga != gb {
            return None;
        }
    }
    Some(cost.min(1))
}

/// If the arrow is a non-curried function over a single tuple, the curried
/// form obtained by splitting that tuple.
fn split_leading_tuple(elements: &[LowType]) -> Option<Vec<LowType>> {
    match elements {
        [LowType::Tuple { elements: tuple, .. }, result] => {
            let mut expanded = tuple.clone();
            expanded.push(result.clone());
            Some(expanded)
        }
        _ => None,
    }
}

pub struct LowTypeMatcher {
    options: SearchOptions,
}

impl LowTypeMatcher {
    pub fn new(options: SearchOptions) -> Self {
        LowTypeMatcher { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Test whether `query` matches `target` under the accumulated context.
    pub fn test(&self, query: &LowType, target: &LowType, ctx: Context) -> MatchingResult {
        trace!(query = %query, target = %target, "test");
        match (query, target) {
            (LowType::Identity(a), LowType::Identity(b)) => {
                match identities_match(a, b, &self.options) {
                    Some(cost) => Matched(ctx.add_distance(cost)),
                    None => Failure,
                }
            }
            _ if query.is_wildcard() || target.is_wildcard() => {
                let (wildcard, other) = if query.is_wildcard() {
                    (query, target)
                } else {
                    (target, query)
                };
                match wildcard {
                    LowType::Wildcard(Some(_)) => self.link(wildcard, other, ctx),
                    _ => Matched(ctx),
                }
            }
            _ if query.is_variable() || target.is_variable() => {
                let (variable, other) = if query.is_variable() {
                    (query, target)
                } else {
                    (target, query)
                };
                self.link(variable, other, ctx)
            }
            (LowType::TypeAbbreviation { .. }, _) | (_, LowType::TypeAbbreviation { .. }) => {
                self.abbreviation_test(query, target, ctx)
            }
            (LowType::Choice(_), _) | (_, LowType::Choice(_)) => {
                self.choice_test(query, target, ctx)
            }
            (LowType::Delegate(..), _) | (_, LowType::Delegate(..)) => {
                self.delegate_test(query, target, ctx)
            }
            (LowType::Arrow(qs), LowType::Arrow(ts)) => self.arrow_test(qs, ts, ctx),
            (
                LowType::Tuple { elements: qs, is_struct: q_struct },
                LowType::Tuple { elements: ts, is_struct: t_struct },
            ) => {
                if q_struct != t_struct || qs.len() != ts.len() {
                    Failure
                } else {
                    self.test_sequence(qs, ts, false, ctx)
                }
            }
            (LowType::Generic(qc, qargs), LowType::Generic(tc, targs)) => {
                if qargs.len() != targs.len() {
                    return Failure;
                }
                match self.test(qc, tc, ctx) {
                    Matched(c) => self.test_zip(qargs, targs, c),
                    Failure => Failure,
                }
            }
            (LowType::Generic(ctor, args), identity @ LowType::Identity(id))
            | (identity @ LowType::Identity(id), LowType::Generic(ctor, args)) => {
                self.partial_generic_test(ctor, args, id, identity, ctx)
            }
            _ => Failure,
        }
    }

    /// Relate a variable or tagged wildcard to another type through the
    /// equation store. Every concrete type already reachable from either
    /// side's equivalence class must stay pairwise consistent.
    fn link(&self, node: &LowType, other: &LowType, ctx: Context) -> MatchingResult {
        if node == other {
            // Self-equalities are dropped.
            return Matched(ctx);
        }
        let node_bound = bound_types(&ctx.equations, node);
        let other_bound = if other.is_variable() || other.is_wildcard() {
            bound_types(&ctx.equations, other)
        } else {
            vec![other.clone()]
        };
        let mut ctx = ctx;
        for existing in &node_bound {
            for incoming in &other_bound {
                match self.test(existing, incoming, ctx) {
                    Matched(c) => ctx = c,
                    Failure => return Failure,
                }
            }
        }
        if !ctx.equations.try_add_equality(node, other) {
            return Failure;
        }
        if let LowType::Variable(source, variable) = node {
            if !(other.is_variable() || other.is_wildcard()) {
                ctx.bind_substitution(*source, variable.clone(), other.clone());
            }
        }
        Matched(ctx)
    }

    fn abbreviation_test(&self, query: &LowType, target: &LowType, ctx: Context) -> MatchingResult {
        let unwrap_allowed = self.options.ignore_parameter_style.is_enabled();
        match (query, target) {
            (
                LowType::TypeAbbreviation { abbreviation: qa, original: qo },
                LowType::TypeAbbreviation { abbreviation: ta, original: to },
            ) => {
                // Symmetric faces cost nothing.
                if let Matched(c) = self.test(qo, to, ctx.clone()) {
                    return Matched(c);
                }
                if let Matched(c) = self.test(qa, ta, ctx.clone()) {
                    return Matched(c);
                }
                if unwrap_allowed {
                    if let Matched(c) = self.test(qa, to, ctx.clone()) {
                        return Matched(c.add_distance(1));
                    }
                    if let Matched(c) = self.test(qo, ta, ctx) {
                        return Matched(c.add_distance(1));
                    }
                }
                Failure
            }
            (LowType::TypeAbbreviation { abbreviation, original }, other) => {
                // The alias face is the declared surface, so it is free; only
                // looking through to the original is an unwrap.
                if let Matched(c) = self.test(abbreviation, other, ctx.clone()) {
                    return Matched(c);
                }
                if unwrap_allowed {
                    if let Matched(c) = self.test(original, other, ctx) {
                        return Matched(c.add_distance(1));
                    }
                }
                Failure
            }
            (other, LowType::TypeAbbreviation { abbreviation, original }) => {
                if let Matched(c) = self.test(other, abbreviation, ctx.clone()) {
                    return Matched(c);
                }
                if unwrap_allowed {
                    if let Matched(c) = self.test(other, original, ctx) {
                        return Matched(c.add_distance(1));
                    }
                }
                Failure
            }
            _ => Failure,
        }
    }

    /// A choice matches if any alternative matches; the successful branch
    /// with the lowest incremental distance wins, ties breaking toward the
    /// earliest alternative.
    fn choice_test(&self, query: &LowType, target: &LowType, ctx: Context) -> MatchingResult {
        let (alternatives, other, choice_is_query) = match (query, target) {
            (LowType::Choice(alternatives), other) => (alternatives, other, true),
            (other, LowType::Choice(alternatives)) => (alternatives, other, false),
            _ => return Failure,
        };
        let mut best: Option<Context> = None;
        for alternative in alternatives {
            let result = if choice_is_query {
                self.test(alternative, other, ctx.clone())
            } else {
                self.test(other, alternative, ctx.clone())
            };
            if let Matched(c) = result {
                if best.as_ref().is_none_or(|b| c.distance < b.distance) {
                    best = Some(c);
                }
            }
        }
        best.map_or(Failure, Matched)
    }

    /// A delegate unwraps to its signature for arrow matching; the nominal
    /// wrapper matches another delegate with an equal signature, and matches
    /// nominal references through its wrapper type.
    fn delegate_test(&self, query: &LowType, target: &LowType, ctx: Context) -> MatchingResult {
        match (query, target) {
            (LowType::Delegate(d1, s1), LowType::Delegate(d2, s2)) => {
                if s1.len() != s2.len() {
                    return Failure;
                }
                match self.test(d1, d2, ctx) {
                    Matched(c) => self.test_zip(s1, s2, c),
                    Failure => Failure,
                }
            }
            (LowType::Delegate(_, signature), LowType::Arrow(elements)) => {
                self.test_zip(signature, elements, ctx)
            }
            (LowType::Arrow(elements), LowType::Delegate(_, signature)) => {
                self.test_zip(elements, signature, ctx)
            }
            (LowType::Delegate(delegate_type, _), other) => self.test(delegate_type, other, ctx),
            (other, LowType::Delegate(delegate_type, _)) => self.test(other, delegate_type, ctx),
            _ => Failure,
        }
    }

    fn arrow_test(&self, qs: &[LowType], ts: &[LowType], ctx: Context) -> MatchingResult {
        if qs.len() == ts.len() {
            return self.test_sequence(qs, ts, true, ctx);
        }
        if self.options.ignore_parameter_style.is_enabled() {
            // A tupled function matches the curried form of its tuple.
            if let Some(expanded) = split_leading_tuple(qs) {
                if expanded.len() == ts.len() {
                    if let Matched(c) = self.test_sequence(&expanded, ts, true, ctx.clone()) {
                        return Matched(c.add_distance(1));
                    }
                }
            }
            if let Some(expanded) = split_leading_tuple(ts) {
                if expanded.len() == qs.len() {
                    if let Matched(c) = self.test_sequence(qs, &expanded, true, ctx.clone()) {
                        return Matched(c.add_distance(1));
                    }
                }
            }
        }
        if self.options.greedy_matching.is_enabled()
            && qs.len() < ts.len()
            && qs.last().is_some_and(LowType::is_wildcard)
        {
            // A trailing query wildcard absorbs the remaining target tail.
            let head = qs.len() - 1;
            if let Matched(c) = self.test_zip(&qs[..head], &ts[..head], ctx.clone()) {
                let rest = &ts[head..];
                let tail = if rest.len() == 1 {
                    rest[0].clone()
                } else {
                    LowType::Arrow(rest.to_vec())
                };
                if let Matched(c) = self.test(&qs[head], &tail, c) {
                    return Matched(c);
                }
            }
        }
        if ts.len() > qs.len() {
            // Complement trailing optional parameters of the target.
            let dropped = ts.len() - qs.len();
            if dropped as u32 <= self.options.complement_depth && dropped <= ctx.optional_tail {
                let mut kept: Vec<LowType> = ts[..ts.len() - 1 - dropped].to_vec();
                kept.push(ts[ts.len() - 1].clone());
                if let Matched(c) = self.test_sequence(qs, &kept, true, ctx) {
                    return Matched(c.add_distance(dropped as u32));
                }
            }
        }
        Failure
    }

    fn partial_generic_test(
        &self,
        constructor: &LowType,
        arguments: &[LowType],
        id: &Identity,
        identity_node: &LowType,
        ctx: Context,
    ) -> MatchingResult {
        if id.generic_parameter_count() != arguments.len() {
            return Failure;
        }
        if !arguments.iter().all(|a| a.is_variable() || a.is_wildcard()) {
            return Failure;
        }
        self.test(constructor, identity_node, ctx)
    }

    fn test_zip(&self, qs: &[LowType], ts: &[LowType], mut ctx: Context) -> MatchingResult {
        if qs.len() != ts.len() {
            return Failure;
        }
        for (q, t) in qs.iter().zip(ts) {
            match self.test(q, t, ctx) {
                Matched(c) => ctx = c,
                Failure => return Failure,
            }
        }
        Matched(ctx)
    }

    /// Zip-match two equal-length sequences, falling back to a breadth-first
    /// search over adjacent swaps of the query side, cheapest first. The
    /// search stops at the first permutation that unifies. With `fixed_tail`
    /// the last element (an arrow's result) never moves.
    fn test_sequence(
        &self,
        qs: &[LowType],
        ts: &[LowType],
        fixed_tail: bool,
        ctx: Context,
    ) -> MatchingResult {
        if let Matched(c) = self.test_zip(qs, ts, ctx.clone()) {
            return Matched(c);
        }
        let budget = self.options.swap_order_depth as usize;
        let swappable = if fixed_tail { qs.len().saturating_sub(1) } else { qs.len() };
        if budget == 0 || swappable < 2 {
            return Failure;
        }
        let identity_order: Vec<usize> = (0..qs.len()).collect();
        let mut seen: FxHashSet<Vec<usize>> = FxHashSet::default();
        seen.insert(identity_order.clone());
        let mut frontier = vec![identity_order];
        for swaps in 1..=budget {
            let mut next = Vec::new();
            for order in &frontier {
                for i in 0..swappable - 1 {
                    let mut candidate = order.clone();
                    candidate.swap(i, i + 1);
                    if seen.insert(candidate.clone()) {
                        next.push(candidate);
                    }
                }
            }
            for order in &next {
                let permuted: Vec<LowType> = order.iter().map(|&i| qs[i].clone()).collect();
                if let Matched(c) = self.test_zip(&permuted, ts, ctx.clone()) {
                    return Matched(c.add_distance(swaps as u32));
                }
            }
            frontier = next;
        }
        Failure
    }
}
