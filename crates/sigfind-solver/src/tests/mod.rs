mod equations_tests;

use std::sync::Arc;

use sigfind_model::SearchOptions;

use crate::context::Context;
use crate::index::TypeIndex;
use crate::matcher::LowTypeMatcher;

pub(crate) fn context() -> Context {
    context_with(SearchOptions::default())
}

pub(crate) fn context_with(options: SearchOptions) -> Context {
    Context::new(options, Arc::new(TypeIndex::default()))
}

pub(crate) fn matcher() -> LowTypeMatcher {
    LowTypeMatcher::new(SearchOptions::default())
}

pub(crate) fn matcher_with(options: SearchOptions) -> LowTypeMatcher {
    LowTypeMatcher::new(options)
}
