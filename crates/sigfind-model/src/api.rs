//! API entries and the immutable catalogs that hold them.

use serde::{Deserialize, Serialize};

use crate::constraint::TypeConstraint;
use crate::definition::{Accessibility, FullTypeDefinition, TypeAbbreviationDefinition};
use crate::low_type::LowType;
use crate::member::{Member, MemberModifier, Parameter, ParameterGroups, group_type};
use crate::name::{DisplayName, Name};

/// A module-bound function: curried parameter groups plus a return parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub parameters: ParameterGroups,
    pub return_parameter: Parameter,
}

impl Function {
    pub fn new(parameters: ParameterGroups, return_type: LowType) -> Self {
        Function {
            parameters,
            return_parameter: Parameter::of(return_type),
        }
    }

    /// The arrow a signature match runs over.
    pub fn arrow_type(&self) -> LowType {
        if self.parameters.is_empty() {
            return self.return_parameter.type_.clone();
        }
        let mut elements: Vec<LowType> = self.parameters.iter().map(|g| group_type(g)).collect();
        elements.push(self.return_parameter.type_.clone());
        LowType::Arrow(elements)
    }

    /// Trailing arrow segments where every parameter is optional.
    pub fn optional_tail(&self) -> usize {
        self.parameters
            .iter()
            .rev()
            .take_while(|group| !group.is_empty() && group.iter().all(|p| p.is_optional))
            .count()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivePatternKind {
    ActivePattern,
    PartialActivePattern,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub name: DisplayName,
    pub accessibility: Accessibility,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeExtension {
    pub existing_type: LowType,
    pub declaration: DisplayName,
    pub member_modifier: MemberModifier,
    pub member: Member,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionCaseField {
    pub name: Option<String>,
    pub type_: LowType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionCase {
    pub declaring_type: LowType,
    pub name: String,
    pub fields: Vec<UnionCaseField>,
}

impl UnionCase {
    /// A union case matches as a constructor function from its fields to the
    /// declaring type; a fieldless case is just the declaring type.
    pub fn arrow_type(&self) -> LowType {
        if self.fields.is_empty() {
            return self.declaring_type.clone();
        }
        let mut elements: Vec<LowType> = self.fields.iter().map(|f| f.type_.clone()).collect();
        elements.push(self.declaring_type.clone());
        LowType::Arrow(elements)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationExpressionBuilder {
    pub builder_type: LowType,
    /// The computation types this builder produces, e.g. `Async<'T>`.
    pub computation_expression_types: Vec<LowType>,
    /// Syntactic forms the builder implements: `let!`, `return`, `for`, ...
    pub syntaxes: Vec<String>,
}

/// One variant per API shape a catalog can hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiSignature {
    ModuleValue(LowType),
    ModuleFunction(Function),
    ActivePattern {
        kind: ActivePatternKind,
        function: Function,
    },
    InstanceMember {
        declaring_type: LowType,
        member: Member,
    },
    StaticMember {
        declaring_type: LowType,
        member: Member,
    },
    Constructor {
        declaring_type: LowType,
        member: Member,
    },
    ModuleDefinition(ModuleDefinition),
    FullTypeDefinition(FullTypeDefinition),
    TypeAbbreviation(TypeAbbreviationDefinition),
    TypeExtension(TypeExtension),
    ExtensionMember(Member),
    UnionCase(UnionCase),
    ComputationExpressionBuilder(ComputationExpressionBuilder),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    pub name: Name,
    pub signature: ApiSignature,
    pub type_constraints: Vec<TypeConstraint>,
    pub document: Option<String>,
}

impl Api {
    pub fn new(name: Name, signature: ApiSignature) -> Self {
        Api {
            name,
            signature,
            type_constraints: Vec::new(),
            document: None,
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<TypeConstraint>) -> Self {
        self.type_constraints = constraints;
        self
    }
}

/// The immutable in-memory index of one assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDictionary {
    pub assembly_name: String,
    pub apis: Vec<Api>,
    pub type_definitions: Vec<FullTypeDefinition>,
    pub type_abbreviations: Vec<TypeAbbreviationDefinition>,
}

impl ApiDictionary {
    pub fn new(assembly_name: impl Into<String>) -> Self {
        ApiDictionary {
            assembly_name: assembly_name.into(),
            apis: Vec::new(),
            type_definitions: Vec::new(),
            type_abbreviations: Vec::new(),
        }
    }
}
