//! Type and abbreviation definitions as a loader materializes them.

use serde::{Deserialize, Serialize};

use crate::constraint::{ConstraintStatus, TypeConstraint};
use crate::low_type::LowType;
use crate::member::Member;
use crate::name::{DisplayName, TypeVariable};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Accessibility {
    Public,
    Private,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeDefinitionKind {
    Class,
    Interface,
    Type,
    Union,
    Record,
    Enumeration,
}

/// A fully loaded type definition.
///
/// The six `ConstraintStatus` fields are precomputed by the loader so that
/// constraint resolution during a search is a lookup, not a re-derivation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTypeDefinition {
    pub name: DisplayName,
    pub assembly_name: String,
    pub accessibility: Accessibility,
    pub kind: TypeDefinitionKind,
    pub base_type: Option<LowType>,
    /// Transitive closure of implemented interfaces.
    pub all_interfaces: Vec<LowType>,
    pub generic_parameters: Vec<TypeVariable>,
    pub type_constraints: Vec<TypeConstraint>,
    pub instance_members: Vec<Member>,
    pub static_members: Vec<Member>,
    /// Members inherited from the base type.
    pub implicit_instance_members: Vec<Member>,
    pub implicit_static_members: Vec<Member>,
    pub support_null: ConstraintStatus,
    pub reference_type: ConstraintStatus,
    pub value_type: ConstraintStatus,
    pub default_constructor: ConstraintStatus,
    pub equality: ConstraintStatus,
    pub comparison: ConstraintStatus,
}

impl FullTypeDefinition {
    /// All instance members, declared and inherited.
    pub fn instance_members_all(&self) -> impl Iterator<Item = &Member> {
        self.instance_members.iter().chain(self.implicit_instance_members.iter())
    }

    /// All static members, declared and inherited.
    pub fn static_members_all(&self) -> impl Iterator<Item = &Member> {
        self.static_members.iter().chain(self.implicit_static_members.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAbbreviationDefinition {
    pub name: DisplayName,
    pub assembly_name: String,
    pub accessibility: Accessibility,
    pub generic_parameters: Vec<TypeVariable>,
    /// The alias face, e.g. `string`.
    pub abbreviated: LowType,
    /// What the alias ultimately stands for; never itself an abbreviation.
    pub original: LowType,
}
