//! Generic-parameter constraints.

use serde::{Deserialize, Serialize};

use crate::low_type::LowType;
use crate::member::{Member, MemberModifier};
use crate::name::TypeVariable;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Constraint {
    Subtype(LowType),
    Nullness,
    Member {
        modifier: MemberModifier,
        member: Member,
    },
    DefaultConstructor,
    ValueType,
    ReferenceType,
    Enumeration,
    Delegate,
    Unmanaged,
    Equality,
    Comparison,
}

/// A constraint jointly applied to a set of variables, e.g.
/// `when 'a : equality` or `when ('a or 'b) : (static member Parse : ...)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeConstraint {
    pub variables: Vec<TypeVariable>,
    pub constraint: Constraint,
}

/// Precomputed answer to "does this definition satisfy constraint X".
///
/// `Dependence` defers the answer to the listed generic parameters: the
/// definition satisfies the constraint exactly when the types substituted for
/// those parameters do.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConstraintStatus {
    Satisfy,
    NotSatisfy,
    Dependence(Vec<TypeVariable>),
}

impl Default for ConstraintStatus {
    fn default() -> Self {
        ConstraintStatus::NotSatisfy
    }
}
