//! Names as the matcher sees them.
//!
//! A display name is stored innermost-first: the item a query is most likely
//! to mention (the value or type itself) is the head, and enclosing modules
//! and namespaces follow. Every comparison and printer in the workspace
//! honors this orientation.

use serde::{Deserialize, Serialize};

/// A type variable as it appears in a signature: `'a`, or `^a` for the
/// statically-resolved family that must be solved at compile time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVariable {
    pub name: String,
    pub is_solve_at_compile_time: bool,
}

impl TypeVariable {
    pub fn new(name: impl Into<String>) -> Self {
        TypeVariable {
            name: name.into(),
            is_solve_at_compile_time: false,
        }
    }

    pub fn compile_time(name: impl Into<String>) -> Self {
        TypeVariable {
            name: name.into(),
            is_solve_at_compile_time: true,
        }
    }
}

/// One segment of a name.
///
/// Operators and members compiled under a different name carry their compiled
/// form alongside the displayed one; everything else is a plain symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NamePart {
    SymbolName(String),
    OperatorName { display: String, compiled: String },
    WithCompiledName { display: String, compiled: String },
}

impl NamePart {
    /// The form shown to users and compared by default.
    pub fn display(&self) -> &str {
        match self {
            NamePart::SymbolName(s) => s,
            NamePart::OperatorName { display, .. } => display,
            NamePart::WithCompiledName { display, .. } => display,
        }
    }

    /// The compiled form, when the segment has one distinct from the display.
    pub fn compiled(&self) -> Option<&str> {
        match self {
            NamePart::SymbolName(_) => None,
            NamePart::OperatorName { compiled, .. } => Some(compiled),
            NamePart::WithCompiledName { compiled, .. } => Some(compiled),
        }
    }
}

// Equality, ordering, and hashing are all by displayed form; the compiled
// form only participates when a matcher asks for it explicitly.
impl PartialEq for NamePart {
    fn eq(&self, other: &Self) -> bool {
        self.display() == other.display()
    }
}

impl Eq for NamePart {}

impl std::hash::Hash for NamePart {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.display().hash(state);
    }
}

impl PartialOrd for NamePart {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NamePart {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.display().cmp(other.display())
    }
}

/// A name segment together with the generic parameters declared at it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisplayNameItem {
    pub part: NamePart,
    pub generic_parameters: Vec<TypeVariable>,
}

impl DisplayNameItem {
    pub fn symbol(name: impl Into<String>) -> Self {
        DisplayNameItem {
            part: NamePart::SymbolName(name.into()),
            generic_parameters: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, parameters: Vec<TypeVariable>) -> Self {
        DisplayNameItem {
            part: NamePart::SymbolName(name.into()),
            generic_parameters: parameters,
        }
    }
}

/// An innermost-first sequence of name segments.
pub type DisplayName = Vec<DisplayNameItem>;

/// An API name as produced by a loader.
///
/// Loaders may emit `LoadingName` placeholders while an assembly is being
/// materialized, but they must resolve every one of them before handing the
/// catalog to the matcher; a `LoadingName` reaching a search is a contract
/// violation (see [`crate::SearchError::UnresolvedName`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Name {
    DisplayName(DisplayName),
    LoadingName {
        assembly: String,
        raw: String,
        appended: DisplayName,
    },
}

impl Name {
    /// The resolved display name, if loading placeholders have been resolved.
    pub fn display_name(&self) -> Option<&DisplayName> {
        match self {
            Name::DisplayName(name) => Some(name),
            Name::LoadingName { .. } => None,
        }
    }

    /// Build a display name from outermost-first plain segments, the order a
    /// human writes them in.
    pub fn from_path(path: &[&str]) -> Self {
        Name::DisplayName(path.iter().rev().map(|s| DisplayNameItem::symbol(*s)).collect())
    }
}

/// Render an innermost-first display name outermost-first, dot separated.
pub fn display_name_string(name: &[DisplayNameItem]) -> String {
    let mut parts: Vec<&str> = name.iter().map(|item| item.part.display()).collect();
    parts.reverse();
    parts.join(".")
}
