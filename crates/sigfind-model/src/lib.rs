//! Data model for the sigfind search engine.
//!
//! This crate holds everything the matcher and the engine agree on:
//! - Names and type identities, stored innermost-first
//! - `LowType`, the type language the unifier runs over
//! - Members, constraints, and loaded type definitions
//! - API entries, catalogs, the query surface, and the option record
//!
//! Catalogs are built once by an external loader (the serde representation of
//! [`ApiDictionary`] is the wire format) and are read-only during a search.

pub mod api;
pub mod constraint;
pub mod definition;
pub mod error;
pub mod identity;
pub mod low_type;
pub mod member;
pub mod name;
pub mod options;
pub mod print;
pub mod query;

pub use api::{
    Api, ApiDictionary, ApiSignature, ActivePatternKind, ComputationExpressionBuilder, Function,
    ModuleDefinition, TypeExtension, UnionCase, UnionCaseField,
};
pub use constraint::{Constraint, ConstraintStatus, TypeConstraint};
pub use definition::{
    Accessibility, FullTypeDefinition, TypeAbbreviationDefinition, TypeDefinitionKind,
};
pub use error::SearchError;
pub use identity::{FullIdentity, Identity, PartialIdentity};
pub use low_type::{LowType, VariableSource};
pub use member::{
    Member, MemberKind, MemberModifier, Parameter, ParameterGroups, PropertyKind, group_type,
};
pub use name::{DisplayName, DisplayNameItem, Name, NamePart, TypeVariable, display_name_string};
pub use options::{Mode, OptionStatus, SearchOptions};
pub use query::{
    ActivePatternQuery, ActivePatternSignature, ByNameItem, ComputationExpressionQuery,
    NameMatchMethod, Query, QueryMethod, SignatureQuery,
};

#[cfg(test)]
mod tests;
