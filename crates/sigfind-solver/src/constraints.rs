//! Constraint resolution.
//!
//! Runs after every structural rule has succeeded: each constraint attached
//! to the target API must be satisfiable against the types the match bound
//! to its variables. Satisfaction questions that reduce to a definition's
//! precomputed status flags recurse through `Dependence` entries; the
//! variable population is finite, and a depth guard bounds pathological
//! definition chains. A type with no definition in any loaded dictionary
//! cannot be disproved and counts as satisfied.

use rustc_hash::FxHashMap;
use sigfind_model::{
    Constraint, ConstraintStatus, FullTypeDefinition, LowType, Member, MemberModifier,
    TypeConstraint, TypeVariable, VariableSource,
};
use tracing::trace;

use crate::context::{Context, MatchingResult};
use crate::equations::bound_types;
use crate::matcher::LowTypeMatcher;

use MatchingResult::{Failure, Matched};

const DEPENDENCE_DEPTH_LIMIT: usize = 8;

/// Which precomputed status flag a constraint reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusKind {
    SupportNull,
    ReferenceType,
    ValueType,
    DefaultConstructor,
    Equality,
    Comparison,
}

impl StatusKind {
    fn of<'a>(self, definition: &'a FullTypeDefinition) -> &'a ConstraintStatus {
        match self {
            StatusKind::SupportNull => &definition.support_null,
            StatusKind::ReferenceType => &definition.reference_type,
            StatusKind::ValueType => &definition.value_type,
            StatusKind::DefaultConstructor => &definition.default_constructor,
            StatusKind::Equality => &definition.equality,
            StatusKind::Comparison => &definition.comparison,
        }
    }
}

/// Three-valued satisfaction answer. `Unknown` means the catalog cannot
/// decide, which never fails a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Satisfaction {
    Yes,
    No,
    Unknown,
}

impl Satisfaction {
    fn and(self, other: Satisfaction) -> Satisfaction {
        match (self, other) {
            (Satisfaction::No, _) | (_, Satisfaction::No) => Satisfaction::No,
            (Satisfaction::Yes, Satisfaction::Yes) => Satisfaction::Yes,
            _ => Satisfaction::Unknown,
        }
    }
}

/// Resolve every constraint of the target signature against the bindings the
/// structural phase accumulated.
pub fn solve_constraints(
    matcher: &LowTypeMatcher,
    constraints: &[TypeConstraint],
    ctx: Context,
) -> MatchingResult {
    let mut ctx = ctx;
    for type_constraint in constraints {
        for variable in &type_constraint.variables {
            let node = LowType::Variable(VariableSource::Target, variable.clone());
            let bindings = bound_types(&ctx.equations, &node);
            if bindings.is_empty() {
                // The variable stayed free; nothing to disprove.
                continue;
            }
            for bound in &bindings {
                match check_constraint(matcher, &type_constraint.constraint, bound, ctx) {
                    Matched(c) => ctx = c,
                    Failure => {
                        trace!(variable = %variable.name, constraint = ?type_constraint.constraint, "constraint rejected");
                        return Failure;
                    }
                }
            }
        }
    }
    Matched(ctx)
}

fn check_constraint(
    matcher: &LowTypeMatcher,
    constraint: &Constraint,
    bound: &LowType,
    ctx: Context,
) -> MatchingResult {
    match constraint {
        Constraint::Subtype(parent) => subtype_test(matcher, bound, parent, ctx),
        Constraint::Nullness => status_result(StatusKind::SupportNull, bound, ctx),
        Constraint::ReferenceType => status_result(StatusKind::ReferenceType, bound, ctx),
        Constraint::ValueType => status_result(StatusKind::ValueType, bound, ctx),
        Constraint::DefaultConstructor => status_result(StatusKind::DefaultConstructor, bound, ctx),
        Constraint::Equality => status_result(StatusKind::Equality, bound, ctx),
        Constraint::Comparison => status_result(StatusKind::Comparison, bound, ctx),
        Constraint::Enumeration => {
            let ignore_case = ctx.options.ignore_case.is_enabled();
            match ctx.index.resolve_low_type(bound, ignore_case) {
                Some(definition)
                    if definition.kind != sigfind_model::TypeDefinitionKind::Enumeration =>
                {
                    Failure
                }
                _ => Matched(ctx),
            }
        }
        Constraint::Delegate => match bound {
            LowType::Delegate(..) | LowType::Variable(..) | LowType::Wildcard(_) => Matched(ctx),
            LowType::Arrow(_) | LowType::Tuple { .. } => Failure,
            _ => Matched(ctx),
        },
        Constraint::Unmanaged => {
            // Approximated by the value-type flag; an unmanaged type is
            // necessarily a value type and the loader has no finer signal.
            status_result(StatusKind::ValueType, bound, ctx)
        }
        Constraint::Member { modifier, member } => member_test(matcher, *modifier, member, bound, ctx),
    }
}

fn status_result(kind: StatusKind, bound: &LowType, ctx: Context) -> MatchingResult {
    match check_status(kind, bound, &ctx, 0) {
        Satisfaction::No => Failure,
        Satisfaction::Yes | Satisfaction::Unknown => Matched(ctx),
    }
}

fn check_status(kind: StatusKind, t: &LowType, ctx: &Context, depth: usize) -> Satisfaction {
    if depth > DEPENDENCE_DEPTH_LIMIT {
        return Satisfaction::Unknown;
    }
    let ignore_case = ctx.options.ignore_case.is_enabled();
    match t {
        LowType::Wildcard(_) => Satisfaction::Unknown,
        LowType::Variable(..) => {
            let bindings = bound_types(&ctx.equations, t);
            bindings
                .iter()
                .map(|b| check_status(kind, b, ctx, depth + 1))
                .fold(Satisfaction::Unknown, |acc, s| {
                    if acc == Satisfaction::Unknown { s } else { acc.and(s) }
                })
        }
        LowType::Identity(identity) => match ctx.index.resolve(identity, ignore_case) {
            Some(definition) => match kind.of(definition) {
                ConstraintStatus::Satisfy => Satisfaction::Yes,
                ConstraintStatus::NotSatisfy => Satisfaction::No,
                ConstraintStatus::Dependence(_) => Satisfaction::Unknown,
            },
            None => Satisfaction::Unknown,
        },
        LowType::Generic(_, arguments) => {
            let Some(definition) = ctx.index.resolve_low_type(t, ignore_case) else {
                return Satisfaction::Unknown;
            };
            match kind.of(definition) {
                ConstraintStatus::Satisfy => Satisfaction::Yes,
                ConstraintStatus::NotSatisfy => Satisfaction::No,
                ConstraintStatus::Dependence(variables) => {
                    variables
                        .iter()
                        .map(|v| {
                            match argument_for(definition, v, arguments) {
                                Some(argument) => check_status(kind, argument, ctx, depth + 1),
                                None => Satisfaction::Unknown,
                            }
                        })
                        .fold(Satisfaction::Yes, Satisfaction::and)
                }
            }
        }
        LowType::Tuple { elements, is_struct } => match kind {
            StatusKind::Equality | StatusKind::Comparison => elements
                .iter()
                .map(|e| check_status(kind, e, ctx, depth + 1))
                .fold(Satisfaction::Yes, Satisfaction::and),
            StatusKind::ValueType => {
                if *is_struct { Satisfaction::Yes } else { Satisfaction::No }
            }
            StatusKind::ReferenceType => {
                if *is_struct { Satisfaction::No } else { Satisfaction::Yes }
            }
            StatusKind::SupportNull | StatusKind::DefaultConstructor => Satisfaction::No,
        },
        LowType::Arrow(_) | LowType::Delegate(..) => match kind {
            StatusKind::ReferenceType => Satisfaction::Yes,
            StatusKind::SupportNull => match t {
                // Delegates are nullable CLR types; bare functions are not.
                LowType::Delegate(..) => Satisfaction::Yes,
                _ => Satisfaction::No,
            },
            _ => Satisfaction::No,
        },
        LowType::TypeAbbreviation { original, .. } => check_status(kind, original, ctx, depth + 1),
        LowType::Choice(alternatives) => alternatives
            .iter()
            .map(|a| check_status(kind, a, ctx, depth + 1))
            .fold(Satisfaction::Unknown, |acc, s| {
                if s == Satisfaction::Yes { Satisfaction::Yes } else { acc }
            }),
    }
}

/// The argument substituted for `variable` when the definition's generic
/// parameters are applied to `arguments`.
fn argument_for<'a>(
    definition: &FullTypeDefinition,
    variable: &TypeVariable,
    arguments: &'a [LowType],
) -> Option<&'a LowType> {
    definition
        .generic_parameters
        .iter()
        .position(|p| p.name == variable.name)
        .and_then(|i| arguments.get(i))
}

fn substitute(t: &LowType, map: &FxHashMap<String, LowType>) -> LowType {
    t.map(&|node| match node {
        LowType::Variable(_, ref v) if map.contains_key(&v.name) => map[&v.name].clone(),
        other => other,
    })
}

/// Does `t` sit under `parent` in the loaded hierarchy, or unify with it
/// outright? Residual answers are cached on the context.
fn subtype_test(
    matcher: &LowTypeMatcher,
    t: &LowType,
    parent: &LowType,
    ctx: Context,
) -> MatchingResult {
    let cache_key = (t.clone(), parent.clone());
    if let Some(&known) = ctx.subtype_cache.get(&cache_key) {
        return if known { Matched(ctx) } else { Failure };
    }

    if let LowType::Variable(..) | LowType::Wildcard(_) = t {
        let bindings = bound_types(&ctx.equations, t);
        if bindings.is_empty() {
            return Matched(ctx);
        }
        let mut ctx = ctx;
        for bound in &bindings {
            match subtype_test(matcher, bound, parent, ctx) {
                Matched(c) => ctx = c,
                Failure => return Failure,
            }
        }
        return Matched(ctx);
    }

    // The type may be the parent itself.
    if let Matched(mut c) = matcher.test(t, parent, ctx.clone()) {
        c.subtype_cache.insert(cache_key, true);
        return Matched(c);
    }

    let ignore_case = ctx.options.ignore_case.is_enabled();
    let mut current = t.clone();
    for _ in 0..DEPENDENCE_DEPTH_LIMIT {
        let Some(definition) = ctx.index.resolve_low_type(&current, ignore_case) else {
            // Nothing known about this type; the constraint cannot be
            // disproved.
            let mut ctx = ctx;
            ctx.subtype_cache.insert(cache_key, true);
            return Matched(ctx);
        };
        let substitution = instantiation_of(definition, &current);
        for interface in &definition.all_interfaces {
            let instantiated = substitute(interface, &substitution);
            if let Matched(mut c) = matcher.test(&instantiated, parent, ctx.clone()) {
                c.subtype_cache.insert(cache_key, true);
                return Matched(c);
            }
        }
        match &definition.base_type {
            Some(base) => {
                let instantiated = substitute(base, &substitution);
                if let Matched(mut c) = matcher.test(&instantiated, parent, ctx.clone()) {
                    c.subtype_cache.insert(cache_key, true);
                    return Matched(c);
                }
                current = instantiated;
            }
            None => break,
        }
    }
    let mut ctx = ctx;
    ctx.subtype_cache.insert(cache_key, false);
    Failure
}

fn instantiation_of(definition: &FullTypeDefinition, t: &LowType) -> FxHashMap<String, LowType> {
    let mut map = FxHashMap::default();
    if let LowType::Generic(_, arguments) = t {
        for (parameter, argument) in definition.generic_parameters.iter().zip(arguments) {
            map.insert(parameter.name.clone(), argument.clone());
        }
    }
    map
}

/// A member constraint holds when the bound type's definition exposes a
/// member of the required name and arity whose signature unifies with the
/// required one. Generic substitution into inherited member signatures is
/// not attempted; the loader flattens what matters into the member lists.
fn member_test(
    matcher: &LowTypeMatcher,
    modifier: MemberModifier,
    required: &Member,
    bound: &LowType,
    ctx: Context,
) -> MatchingResult {
    let ignore_case = ctx.options.ignore_case.is_enabled();
    let Some(definition) = ctx.index.resolve_low_type(bound, ignore_case) else {
        return Matched(ctx);
    };
    let name_matches = |name: &str| {
        if ignore_case {
            name.eq_ignore_ascii_case(&required.name)
        } else {
            name == required.name
        }
    };
    let required_arity: usize = required.parameters.iter().map(Vec::len).sum();
    let candidates: Vec<&Member> = match modifier {
        MemberModifier::Instance => definition.instance_members_all().collect(),
        MemberModifier::Static => definition.static_members_all().collect(),
    };
    let required_arrow = required.arrow_type();
    for member in candidates {
        if !name_matches(&member.name) {
            continue;
        }
        let arity: usize = member.parameters.iter().map(Vec::len).sum();
        if arity != required_arity {
            continue;
        }
        if let Matched(c) = matcher.test(&required_arrow, &member.arrow_type(), ctx.clone()) {
            return Matched(c);
        }
    }
    Failure
}
