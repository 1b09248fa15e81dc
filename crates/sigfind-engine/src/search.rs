//! The search driver.
//!
//! A `SearchClient` owns the loaded dictionaries and the definition index
//! built over them. Each search parses and initializes the query through the
//! mode's strategy, then streams every (dictionary, api) pair through the
//! matcher pipeline. The serial scan is lazy: dropping the stream stops all
//! further matching work. Under the parallel option the catalog scan fans
//! out over rayon workers and the stream yields from a precomputed buffer;
//! output order is unspecified there, so callers wanting a stable order sort
//! by distance and catalog position.

use std::sync::Arc;

use rayon::prelude::*;
use sigfind_model::{
    Api, ApiDictionary, Identity, LowType, Name, Query, QueryMethod, SearchError, SearchOptions,
};
use sigfind_solver::{Context, LowTypeMatcher, TypeIndex};
use tracing::{debug, info_span};

use crate::ce;
use crate::matchers::{ApiMatcher, run_pipeline, signature_target};
use crate::strategy::{InitializationStrategy as _, strategy_for};

#[derive(Clone, Debug)]
pub struct SearchResult<'a> {
    pub distance: u32,
    pub api: &'a Api,
    pub assembly_name: &'a str,
}

#[derive(Debug)]
pub struct SearchClient {
    dictionaries: Vec<ApiDictionary>,
    index: Arc<TypeIndex>,
}

impl SearchClient {
    /// Build a client over loaded dictionaries.
    ///
    /// Every API name must have been resolved to a display name by the
    /// loader; a remaining loading placeholder is a data-contract violation
    /// and rejects the whole catalog.
    pub fn new(dictionaries: Vec<ApiDictionary>) -> Result<Self, SearchError> {
        for dictionary in &dictionaries {
            for api in &dictionary.apis {
                if let Name::LoadingName { assembly, raw, .. } = &api.name {
                    return Err(SearchError::UnresolvedName {
                        assembly: assembly.clone(),
                        raw: raw.clone(),
                    });
                }
                if let Some(unresolved) = unresolved_identity(api) {
                    return Err(unresolved);
                }
            }
        }
        let index = Arc::new(TypeIndex::build(&dictionaries));
        Ok(SearchClient { dictionaries, index })
    }

    pub fn dictionaries(&self) -> &[ApiDictionary] {
        &self.dictionaries
    }

    /// Run one search. The result stream borrows the client; results alias
    /// the owning dictionaries.
    pub fn search<'a>(
        &'a self,
        options: &SearchOptions,
        query_text: &str,
    ) -> Result<ResultStream<'a>, SearchError> {
        let _span = info_span!("search", query = query_text).entered();
        let strategy = strategy_for(options.mode);
        let query = strategy.parse_query(query_text)?;
        let query = strategy.initialize_query(query, &self.index, options);
        let seed = strategy.initial_context(&query, Arc::clone(&self.index), options);
        let (matcher, pipeline) = strategy.matchers(options);

        if let QueryMethod::ByComputationExpression(ce_query) = &query.method {
            let results = ce::search(&self.dictionaries, &matcher, ce_query, &seed);
            debug!(results = results.len(), "computation-expression search finished");
            return Ok(ResultStream::eager(results));
        }

        if options.parallel.is_enabled() {
            let results: Vec<SearchResult<'a>> = self
                .dictionaries
                .par_iter()
                .flat_map_iter(|dictionary| {
                    dictionary.apis.iter().map(move |api| (dictionary, api))
                })
                .filter_map(|(dictionary, api)| {
                    run_pipeline(&pipeline, &matcher, &query, api, seed.clone())
                        .into_context()
                        .map(|ctx| SearchResult {
                            distance: ctx.distance,
                            api,
                            assembly_name: &dictionary.assembly_name,
                        })
                })
                .collect();
            debug!(results = results.len(), "parallel scan finished");
            return Ok(ResultStream::eager(results));
        }

        Ok(ResultStream::lazy(
            &self.dictionaries,
            matcher,
            pipeline,
            query,
            seed,
        ))
    }
}

/// An identity inside the matchable signature whose loading placeholder was
/// never resolved, if any.
fn unresolved_identity(api: &Api) -> Option<SearchError> {
    let (target, _) = signature_target(api)?;
    let mut unresolved = None;
    target.walk(&mut |node| {
        if let LowType::Identity(Identity::Full(full)) = node {
            if let Name::LoadingName { assembly, raw, .. } = &full.name {
                unresolved = Some(SearchError::UnresolvedName {
                    assembly: assembly.clone(),
                    raw: raw.clone(),
                });
            }
        }
    });
    unresolved
}

enum StreamInner<'a> {
    Eager(std::vec::IntoIter<SearchResult<'a>>),
    Lazy {
        dictionaries: &'a [ApiDictionary],
        matcher: LowTypeMatcher,
        pipeline: Vec<Box<dyn ApiMatcher>>,
        query: Query,
        seed: Context,
        dictionary_index: usize,
        api_index: usize,
    },
}

/// Lazy sequence of search results in dictionary order, then catalog order.
pub struct ResultStream<'a> {
    inner: StreamInner<'a>,
}

impl<'a> ResultStream<'a> {
    fn eager(results: Vec<SearchResult<'a>>) -> Self {
        ResultStream {
            inner: StreamInner::Eager(results.into_iter()),
        }
    }

    fn lazy(
        dictionaries: &'a [ApiDictionary],
        matcher: LowTypeMatcher,
        pipeline: Vec<Box<dyn ApiMatcher>>,
        query: Query,
        seed: Context,
    ) -> Self {
        ResultStream {
            inner: StreamInner::Lazy {
                dictionaries,
                matcher,
                pipeline,
                query,
                seed,
                dictionary_index: 0,
                api_index: 0,
            },
        }
    }
}

impl<'a> Iterator for ResultStream<'a> {
    type Item = SearchResult<'a>;

    fn next(&mut self) -> Option<SearchResult<'a>> {
        match &mut self.inner {
            StreamInner::Eager(results) => results.next(),
            StreamInner::Lazy {
                dictionaries,
                matcher,
                pipeline,
                query,
                seed,
                dictionary_index,
                api_index,
            } => {
                while let Some(dictionary) = dictionaries.get(*dictionary_index) {
                    while let Some(api) = dictionary.apis.get(*api_index) {
                        *api_index += 1;
                        if let Some(ctx) =
                            run_pipeline(pipeline, matcher, query, api, seed.clone()).into_context()
                        {
                            return Some(SearchResult {
                                distance: ctx.distance,
                                api,
                                assembly_name: &dictionary.assembly_name,
                            });
                        }
                    }
                    *dictionary_index += 1;
                    *api_index = 0;
                }
                None
            }
        }
    }
}
