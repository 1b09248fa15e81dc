//! Parameters and members.

use serde::{Deserialize, Serialize};

use crate::low_type::LowType;
use crate::name::TypeVariable;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Parameter {
    pub type_: LowType,
    pub name: Option<String>,
    pub is_optional: bool,
}

impl Parameter {
    pub fn of(type_: LowType) -> Self {
        Parameter {
            type_,
            name: None,
            is_optional: false,
        }
    }

    pub fn optional(type_: LowType) -> Self {
        Parameter {
            type_,
            name: None,
            is_optional: true,
        }
    }

    pub fn named(name: impl Into<String>, type_: LowType) -> Self {
        Parameter {
            type_,
            name: Some(name.into()),
            is_optional: false,
        }
    }
}

/// Curried-then-tupled parameter shape: the outer list is the arrow segments,
/// the inner list the tuple components of one segment. A singleton segment is
/// a plain, non-tupled argument.
pub type ParameterGroups = Vec<Vec<Parameter>>;

/// Collapse one parameter group to the `LowType` it occupies in an arrow.
pub fn group_type(group: &[Parameter]) -> LowType {
    match group {
        [single] => single.type_.clone(),
        many => LowType::Tuple {
            elements: many.iter().map(|p| p.type_.clone()).collect(),
            is_struct: false,
        },
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyKind {
    Get,
    Set,
    GetSet,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberKind {
    Method,
    Property(PropertyKind),
    Field,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberModifier {
    Instance,
    Static,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub generic_parameters: Vec<TypeVariable>,
    pub parameters: ParameterGroups,
    pub return_parameter: Parameter,
}

impl Member {
    pub fn method(name: impl Into<String>, parameters: ParameterGroups, return_type: LowType) -> Self {
        Member {
            name: name.into(),
            kind: MemberKind::Method,
            generic_parameters: Vec::new(),
            parameters,
            return_parameter: Parameter::of(return_type),
        }
    }

    pub fn property(name: impl Into<String>, kind: PropertyKind, return_type: LowType) -> Self {
        Member {
            name: name.into(),
            kind: MemberKind::Property(kind),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_parameter: Parameter::of(return_type),
        }
    }

    /// The arrow this member occupies in a signature match: collapsed
    /// parameter groups followed by the return type. A parameterless member
    /// is just its return type.
    pub fn arrow_type(&self) -> LowType {
        if self.parameters.is_empty() {
            return self.return_parameter.type_.clone();
        }
        let mut elements: Vec<LowType> = self.parameters.iter().map(|g| group_type(g)).collect();
        elements.push(self.return_parameter.type_.clone());
        LowType::Arrow(elements)
    }

    /// How many trailing arrow segments of this member are droppable because
    /// every parameter in them is optional.
    pub fn optional_tail(&self) -> usize {
        self.parameters
            .iter()
            .rev()
            .take_while(|group| !group.is_empty() && group.iter().all(|p| p.is_optional))
            .count()
    }
}
