//! References to named types.
//!
//! A `FullIdentity` is assembly-qualified and carries the complete enclosing
//! scope; a `PartialIdentity` is the unqualified tail a query writes. The
//! matcher treats a partial identity as a tail wildcard over whatever scope
//! the query left out.

use serde::{Deserialize, Serialize};

use crate::name::{DisplayName, DisplayNameItem, Name};

/// An assembly-qualified type reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FullIdentity {
    pub assembly_name: String,
    pub name: Name,
    pub generic_parameter_count: usize,
}

/// An unqualified type reference, as written in a query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartialIdentity {
    pub name: DisplayName,
    pub generic_parameter_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identity {
    Full(FullIdentity),
    Partial(PartialIdentity),
}

impl Identity {
    /// The display-name segments of this reference, innermost-first.
    ///
    /// Returns `None` for a full identity whose loading placeholder was never
    /// resolved; callers validate that away before matching starts.
    pub fn name_items(&self) -> Option<&[DisplayNameItem]> {
        match self {
            Identity::Full(full) => full.name.display_name().map(|n| n.as_slice()),
            Identity::Partial(partial) => Some(&partial.name),
        }
    }

    pub fn generic_parameter_count(&self) -> usize {
        match self {
            Identity::Full(full) => full.generic_parameter_count,
            Identity::Partial(partial) => partial.generic_parameter_count,
        }
    }

    /// A partial identity from outermost-first plain segments.
    pub fn partial(path: &[&str], generic_parameter_count: usize) -> Identity {
        Identity::Partial(PartialIdentity {
            name: path.iter().rev().map(|s| DisplayNameItem::symbol(*s)).collect(),
            generic_parameter_count,
        })
    }
}
