//! Error taxonomy.
//!
//! Match failures are plain values and never reach this module; only query
//! syntax errors and catalog data-contract violations surface as errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("query syntax error at {position}: {message}")]
    QuerySyntax { position: usize, message: String },

    #[error("unresolved loading name in assembly `{assembly}`: `{raw}`")]
    UnresolvedName { assembly: String, raw: String },

    #[error("malformed signature in `{entity}`: {detail}")]
    MalformedSignature { entity: String, detail: String },
}

impl SearchError {
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        SearchError::QuerySyntax {
            position,
            message: message.into(),
        }
    }
}
