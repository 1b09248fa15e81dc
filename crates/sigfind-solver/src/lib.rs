//! Equation-based signature unifier for the sigfind search engine.
//!
//! This crate provides the matching core:
//! - `Equations` - the equality/inequality store
//! - `Context` - per-match accumulator of equations, distance, substitutions
//! - `LowTypeMatcher` - the unification rules over the type language
//! - Constraint resolution against loaded definitions
//! - `TypeIndex` - identity-to-definition lookup shared across a search

pub mod constraints;
pub mod context;
pub mod equations;
pub mod index;
pub mod matcher;

pub use constraints::solve_constraints;
pub use context::{Context, MatchingResult};
pub use equations::{Equations, bound_types};
pub use index::TypeIndex;
pub use matcher::LowTypeMatcher;

#[cfg(test)]
mod tests;
