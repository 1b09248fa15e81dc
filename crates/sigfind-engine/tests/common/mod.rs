//! Shared catalog builders for the engine tests.
#![allow(dead_code)]

use sigfind_engine::SearchClient;
use sigfind_model::{
    Api, ApiDictionary, ApiSignature, ComputationExpressionBuilder, Function, Identity, LowType,
    Name, Parameter, SearchOptions,
};

pub fn int() -> LowType {
    LowType::identity(&["int"])
}

pub fn string_() -> LowType {
    LowType::identity(&["string"])
}

pub fn unit() -> LowType {
    LowType::identity(&["unit"])
}

pub fn tvar(name: &str) -> LowType {
    LowType::target_variable(name)
}

pub fn list_of(element: LowType) -> LowType {
    LowType::Generic(
        Box::new(LowType::Identity(Identity::partial(&["list"], 1))),
        vec![element],
    )
}

pub fn seq_of(element: LowType) -> LowType {
    LowType::Generic(
        Box::new(LowType::Identity(Identity::partial(&["seq"], 1))),
        vec![element],
    )
}

pub fn map_of(key: LowType, value: LowType) -> LowType {
    LowType::Generic(
        Box::new(LowType::Identity(Identity::partial(&["Map"], 2))),
        vec![key, value],
    )
}

pub fn async_of(element: LowType) -> LowType {
    LowType::Generic(
        Box::new(LowType::Identity(Identity::partial(&["async"], 1))),
        vec![element],
    )
}

pub fn module_value(path: &[&str], type_: LowType) -> Api {
    Api::new(Name::from_path(path), ApiSignature::ModuleValue(type_))
}

pub fn module_function(path: &[&str], parameters: Vec<Vec<Parameter>>, return_type: LowType) -> Api {
    Api::new(
        Name::from_path(path),
        ApiSignature::ModuleFunction(Function::new(parameters, return_type)),
    )
}

/// A curried function where every segment is a single plain parameter.
pub fn curried_function(path: &[&str], parameters: &[LowType], return_type: LowType) -> Api {
    module_function(
        path,
        parameters.iter().map(|t| vec![Parameter::of(t.clone())]).collect(),
        return_type,
    )
}

pub fn builder(path: &[&str], builder_name: &str, types: Vec<LowType>, syntaxes: &[&str]) -> Api {
    Api::new(
        Name::from_path(path),
        ApiSignature::ComputationExpressionBuilder(ComputationExpressionBuilder {
            builder_type: LowType::Identity(Identity::partial(&[builder_name], 0)),
            computation_expression_types: types,
            syntaxes: syntaxes.iter().map(|s| s.to_string()).collect(),
        }),
    )
}

pub fn dictionary(apis: Vec<Api>) -> ApiDictionary {
    let mut dictionary = ApiDictionary::new("TestAssembly");
    dictionary.apis = apis;
    dictionary
}

pub fn client(apis: Vec<Api>) -> SearchClient {
    SearchClient::new(vec![dictionary(apis)]).expect("valid catalog")
}

/// Run a search and return `(display name, distance)` pairs in stream order.
pub fn run(client: &SearchClient, options: &SearchOptions, query: &str) -> Vec<(String, u32)> {
    client
        .search(options, query)
        .expect("query parses")
        .map(|result| {
            let name = result
                .api
                .name
                .display_name()
                .map(|items| sigfind_model::display_name_string(items))
                .unwrap_or_default();
            (name, result.distance)
        })
        .collect()
}
