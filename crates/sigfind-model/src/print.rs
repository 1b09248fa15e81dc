//! Display printers for names, types, and API signatures.
//!
//! The surface syntax is the primary dialect's: `'a`, `a * b`, `a -> b`,
//! `Map<'k, 'v>`. Abbreviations print their alias face.

use std::fmt;

use crate::api::{Api, ApiSignature};
use crate::identity::Identity;
use crate::low_type::LowType;
use crate::name::{Name, display_name_string};

fn write_element(f: &mut fmt::Formatter<'_>, t: &LowType) -> fmt::Result {
    // Arrows nested in parameter or tuple position need parentheses.
    match t {
        LowType::Arrow(_) => write!(f, "({t})"),
        LowType::Tuple { .. } => write!(f, "({t})"),
        _ => write!(f, "{t}"),
    }
}

impl fmt::Display for LowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowType::Wildcard(None) => write!(f, "?"),
            LowType::Wildcard(Some(tag)) => write!(f, "?{tag}"),
            LowType::Variable(_, v) => {
                let sigil = if v.is_solve_at_compile_time { '^' } else { '\'' };
                write!(f, "{sigil}{}", v.name)
            }
            LowType::Identity(identity) => {
                let items = match identity {
                    Identity::Full(full) => full.name.display_name().map(|n| n.as_slice()),
                    Identity::Partial(partial) => Some(partial.name.as_slice()),
                };
                match items {
                    Some(items) => write!(f, "{}", display_name_string(items)),
                    None => write!(f, "<loading>"),
                }
            }
            LowType::Arrow(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    match element {
                        LowType::Arrow(_) => write!(f, "({element})")?,
                        _ => write!(f, "{element}")?,
                    }
                }
                Ok(())
            }
            LowType::Tuple { elements, is_struct } => {
                if *is_struct {
                    write!(f, "struct (")?;
                }
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " * ")?;
                    }
                    write_element(f, element)?;
                }
                if *is_struct {
                    write!(f, ")")?;
                }
                Ok(())
            }
            LowType::Generic(constructor, arguments) => {
                write!(f, "{constructor}<")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ">")
            }
            LowType::TypeAbbreviation { abbreviation, .. } => write!(f, "{abbreviation}"),
            LowType::Delegate(delegate_type, _) => write!(f, "{delegate_type}"),
            LowType::Choice(alternatives) => {
                write!(f, "(")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for ApiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiSignature::ModuleValue(t) => write!(f, "{t}"),
            ApiSignature::ModuleFunction(function) => write!(f, "{}", function.arrow_type()),
            ApiSignature::ActivePattern { function, .. } => write!(f, "{}", function.arrow_type()),
            ApiSignature::InstanceMember { declaring_type, member } => {
                write!(f, "{declaring_type} => {}", member.arrow_type())
            }
            ApiSignature::StaticMember { member, .. }
            | ApiSignature::Constructor { member, .. }
            | ApiSignature::ExtensionMember(member) => write!(f, "{}", member.arrow_type()),
            ApiSignature::ModuleDefinition(_) => write!(f, "module"),
            ApiSignature::FullTypeDefinition(definition) => {
                write!(f, "{:?}", definition.kind)
            }
            ApiSignature::TypeAbbreviation(abbreviation) => {
                write!(f, "{} = {}", abbreviation.abbreviated, abbreviation.original)
            }
            ApiSignature::TypeExtension(extension) => {
                write!(f, "extension of {}", extension.existing_type)
            }
            ApiSignature::UnionCase(case) => write!(f, "{}", case.arrow_type()),
            ApiSignature::ComputationExpressionBuilder(builder) => {
                write!(f, "builder of {}", builder.builder_type)
            }
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Name::DisplayName(name) => write!(f, "{}", display_name_string(name))?,
            Name::LoadingName { raw, .. } => write!(f, "{raw}")?,
        }
        write!(f, ": {}", self.signature)
    }
}
