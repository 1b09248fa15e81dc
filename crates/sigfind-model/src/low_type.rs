//! The type language the unifier runs over.
//!
//! `LowType` is a plain tagged tree: identities are referenced by value
//! (assembly + display name + arity) rather than by pointer, so the structure
//! is acyclic and the matcher dispatches on the tag with an exhaustive match.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::name::TypeVariable;

/// Which side of a match a variable came from.
///
/// Variables from different sides never alias by identity; they can only be
/// related through the equation store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableSource {
    Query,
    Target,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LowType {
    /// Matches anything. The optional tag correlates occurrences: two
    /// wildcards with the same tag must resolve to the same type.
    Wildcard(Option<String>),
    Variable(VariableSource, TypeVariable),
    Identity(Identity),
    /// Curried function type; always at least two elements, the last being
    /// the result.
    Arrow(Vec<LowType>),
    /// Ordered tuple of at least two elements.
    Tuple { elements: Vec<LowType>, is_struct: bool },
    /// Applied type constructor with at least one argument.
    Generic(Box<LowType>, Vec<LowType>),
    /// A type abbreviation keeps both faces so the matcher can look through
    /// either. `original` is never itself an abbreviation.
    TypeAbbreviation {
        abbreviation: Box<LowType>,
        original: Box<LowType>,
    },
    /// A callable with a nominal wrapper around its signature.
    Delegate(Box<LowType>, Vec<LowType>),
    /// Disjunction; matches if any alternative matches.
    Choice(Vec<LowType>),
}

impl LowType {
    /// An arrow from its elements. Panics on fewer than two elements, which
    /// is a data-contract violation no loader or parser may produce.
    pub fn arrow(elements: Vec<LowType>) -> LowType {
        assert!(
            elements.len() >= 2,
            "arrow must have at least two elements, got {}",
            elements.len()
        );
        LowType::Arrow(elements)
    }

    pub fn tuple(elements: Vec<LowType>) -> LowType {
        assert!(
            elements.len() >= 2,
            "tuple must have at least two elements, got {}",
            elements.len()
        );
        LowType::Tuple {
            elements,
            is_struct: false,
        }
    }

    pub fn struct_tuple(elements: Vec<LowType>) -> LowType {
        assert!(
            elements.len() >= 2,
            "tuple must have at least two elements, got {}",
            elements.len()
        );
        LowType::Tuple {
            elements,
            is_struct: true,
        }
    }

    pub fn generic(constructor: LowType, arguments: Vec<LowType>) -> LowType {
        assert!(!arguments.is_empty(), "generic must have at least one argument");
        LowType::Generic(Box::new(constructor), arguments)
    }

    pub fn query_variable(name: &str) -> LowType {
        LowType::Variable(VariableSource::Query, TypeVariable::new(name))
    }

    pub fn target_variable(name: &str) -> LowType {
        LowType::Variable(VariableSource::Target, TypeVariable::new(name))
    }

    /// An unqualified identity from outermost-first segments.
    pub fn identity(path: &[&str]) -> LowType {
        LowType::Identity(Identity::partial(path, 0))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, LowType::Wildcard(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, LowType::Variable(..))
    }

    /// Walk the tree, visiting every node.
    pub fn walk(&self, visit: &mut impl FnMut(&LowType)) {
        visit(self);
        match self {
            LowType::Wildcard(_) | LowType::Variable(..) | LowType::Identity(_) => {}
            LowType::Arrow(elements) | LowType::Choice(elements) => {
                for element in elements {
                    element.walk(visit);
                }
            }
            LowType::Tuple { elements, .. } => {
                for element in elements {
                    element.walk(visit);
                }
            }
            LowType::Generic(constructor, arguments) => {
                constructor.walk(visit);
                for argument in arguments {
                    argument.walk(visit);
                }
            }
            LowType::TypeAbbreviation { abbreviation, original } => {
                abbreviation.walk(visit);
                original.walk(visit);
            }
            LowType::Delegate(delegate_type, signature) => {
                delegate_type.walk(visit);
                for element in signature {
                    element.walk(visit);
                }
            }
        }
    }

    /// Rebuild the tree bottom-up through a mapping function.
    pub fn map(&self, f: &impl Fn(LowType) -> LowType) -> LowType {
        let rebuilt = match self {
            LowType::Wildcard(_) | LowType::Variable(..) | LowType::Identity(_) => self.clone(),
            LowType::Arrow(elements) => {
                LowType::Arrow(elements.iter().map(|e| e.map(f)).collect())
            }
            LowType::Choice(elements) => {
                LowType::Choice(elements.iter().map(|e| e.map(f)).collect())
            }
            LowType::Tuple { elements, is_struct } => LowType::Tuple {
                elements: elements.iter().map(|e| e.map(f)).collect(),
                is_struct: *is_struct,
            },
            LowType::Generic(constructor, arguments) => LowType::Generic(
                Box::new(constructor.map(f)),
                arguments.iter().map(|a| a.map(f)).collect(),
            ),
            LowType::TypeAbbreviation { abbreviation, original } => LowType::TypeAbbreviation {
                abbreviation: Box::new(abbreviation.map(f)),
                original: Box::new(original.map(f)),
            },
            LowType::Delegate(delegate_type, signature) => LowType::Delegate(
                Box::new(delegate_type.map(f)),
                signature.iter().map(|e| e.map(f)).collect(),
            ),
        };
        f(rebuilt)
    }
}
