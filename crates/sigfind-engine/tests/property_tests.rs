//! The engine-wide invariants, checked over a fixed catalog.

mod common;

use common::*;
use sigfind_engine::{InitializationStrategy as _, signature_target};
use sigfind_model::{
    Constraint, ConstraintStatus, LowType, OptionStatus, Parameter, Query, QueryMethod,
    SearchOptions, SignatureQuery, TypeConstraint, TypeVariable,
};

fn fixture() -> sigfind_engine::SearchClient {
    client(vec![
        module_value(&["List", "length"], LowType::arrow(vec![list_of(tvar("a")), int()])),
        module_value(&["Operators", "id"], LowType::arrow(vec![tvar("a"), tvar("a")])),
        module_value(
            &["Map", "add"],
            LowType::arrow(vec![
                tvar("k"),
                tvar("v"),
                map_of(tvar("k"), tvar("v")),
                map_of(tvar("k"), tvar("v")),
            ]),
        ),
        module_function(
            &["Printf", "printfn"],
            vec![vec![Parameter::of(string_())], vec![Parameter::optional(tvar("a"))]],
            unit(),
        ),
        module_value(&["String", "Length"], LowType::arrow(vec![string_(), int()])),
        curried_function(&["Seq", "map"], &[LowType::arrow(vec![tvar("a"), tvar("b")]), seq_of(tvar("a"))], seq_of(tvar("b"))),
    ])
}

fn sorted(mut results: Vec<(String, u32)>) -> Vec<(String, u32)> {
    results.sort();
    results
}

#[test]
fn repeated_searches_are_deterministic() {
    let client = fixture();
    let options = SearchOptions::default();
    for query in ["'a list -> int", "int -> int", "? -> int", "List.*"] {
        let first = run(&client, &options, query);
        let second = run(&client, &options, query);
        assert_eq!(first, second, "query `{query}` was not deterministic");
    }
}

#[test]
fn every_api_matches_its_own_extracted_signature_exactly() {
    let client = fixture();
    let options = SearchOptions::default();
    let strategy = sigfind_engine::strategy_for(options.mode);
    let (matcher, pipeline) = strategy.matchers(&options);
    let index = std::sync::Arc::new(sigfind_solver::TypeIndex::build(client.dictionaries()));
    for dictionary in client.dictionaries() {
        for api in &dictionary.apis {
            let Some((target, _)) = signature_target(api) else {
                continue;
            };
            let query = Query {
                original_string: String::new(),
                method: QueryMethod::BySignature(SignatureQuery::Signature(target.clone())),
            };
            let seed = strategy.initial_context(&query, std::sync::Arc::clone(&index), &options);
            let result = sigfind_engine::run_pipeline(&pipeline, &matcher, &query, api, seed);
            let ctx = result.into_context().unwrap_or_else(|| panic!("api {api} must match itself"));
            assert_eq!(ctx.distance, 0, "api {api} must match itself at distance 0");
        }
    }
}

#[test]
fn wildcard_arrows_dominate_their_arity() {
    let client = fixture();
    let results = run(&client, &SearchOptions::default(), "? -> ?");
    let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
    // Every arity-2 arrow in the catalog, nothing else.
    assert!(names.contains(&"List.length"));
    assert!(names.contains(&"Operators.id"));
    assert!(names.contains(&"String.Length"));
    assert!(!names.contains(&"Map.add"));
}

#[test]
fn ignore_case_produces_a_superset() {
    let client = fixture();
    let sensitive = SearchOptions::default();
    let insensitive = SearchOptions {
        ignore_case: OptionStatus::Enabled,
        ..SearchOptions::default()
    };
    for query in ["string -> INT", "'a LIST -> int", "list.length"] {
        let strict = sorted(run(&client, &sensitive, query));
        let relaxed = sorted(run(&client, &insensitive, query));
        for entry in &strict {
            assert!(relaxed.contains(entry), "`{query}` lost {entry:?} under IgnoreCase");
        }
    }
    // And the relaxation genuinely adds results somewhere.
    assert!(run(&client, &sensitive, "'a LIST -> int").is_empty());
    assert!(!run(&client, &insensitive, "'a LIST -> int").is_empty());
}

#[test]
fn swap_budget_is_monotonic() {
    let client = fixture();
    let query = "'v -> 'k -> Map<'k, 'v> -> Map<'k, 'v>";
    let mut previous = 0;
    for depth in 0..4 {
        let options = SearchOptions::default().with_swap_order_depth(depth);
        let count = run(&client, &options, query).len();
        assert!(count >= previous, "raising SwapOrderDepth to {depth} removed results");
        previous = count;
    }
}

#[test]
fn complement_budget_is_monotonic() {
    let client = fixture();
    let query = "string -> unit";
    let mut previous = 0;
    for depth in 0..4 {
        let options = SearchOptions::default().with_complement_depth(depth);
        let count = run(&client, &options, query).len();
        assert!(count >= previous, "raising ComplementDepth to {depth} removed results");
        previous = count;
    }
}

#[test]
fn parallel_and_serial_scans_agree_as_multisets() {
    let client = fixture();
    let serial = SearchOptions::default();
    let parallel = SearchOptions {
        parallel: OptionStatus::Enabled,
        ..SearchOptions::default()
    };
    for query in ["'a list -> int", "? -> ?", "int -> int", "List.*"] {
        assert_eq!(
            sorted(run(&client, &serial, query)),
            sorted(run(&client, &parallel, query)),
            "parallel disagreed on `{query}`"
        );
    }
}

#[test]
fn catalog_abbreviations_admit_both_spellings() {
    // concat : string -> string -> string, where the catalog carries string
    // as an abbreviation of seq<char>.
    let string_abbreviation = || LowType::TypeAbbreviation {
        abbreviation: Box::new(string_()),
        original: Box::new(seq_of(LowType::identity(&["char"]))),
    };
    let client = client(vec![module_value(
        &["String", "concat"],
        LowType::arrow(vec![string_abbreviation(), string_abbreviation(), string_abbreviation()]),
    )]);
    let options = SearchOptions::default();

    let by_alias: Vec<_> = run(&client, &options, "string -> string -> string")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    let by_original: Vec<_> = run(&client, &options, "seq<char> -> seq<char> -> seq<char>")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(by_alias, by_original);
    assert_eq!(by_alias, vec!["String.concat".to_string()]);

    // With reshaping disabled only the declared alias face matches.
    let strict = SearchOptions {
        ignore_parameter_style: OptionStatus::Disabled,
        ..SearchOptions::default()
    };
    assert_eq!(run(&client, &strict, "string -> string -> string").len(), 1);
    assert!(run(&client, &strict, "seq<char> -> seq<char> -> seq<char>").is_empty());
}

#[test]
fn constrained_apis_never_match_against_violating_bindings() {
    let definition = sigfind_model::FullTypeDefinition {
        name: vec![sigfind_model::DisplayNameItem::symbol("Handle")],
        assembly_name: "TestAssembly".to_string(),
        accessibility: sigfind_model::Accessibility::Public,
        kind: sigfind_model::TypeDefinitionKind::Class,
        base_type: None,
        all_interfaces: Vec::new(),
        generic_parameters: Vec::new(),
        type_constraints: Vec::new(),
        instance_members: Vec::new(),
        static_members: Vec::new(),
        implicit_instance_members: Vec::new(),
        implicit_static_members: Vec::new(),
        support_null: ConstraintStatus::NotSatisfy,
        reference_type: ConstraintStatus::Satisfy,
        value_type: ConstraintStatus::NotSatisfy,
        default_constructor: ConstraintStatus::NotSatisfy,
        equality: ConstraintStatus::NotSatisfy,
        comparison: ConstraintStatus::NotSatisfy,
    };

    let sort_by = module_value(
        &["Seq", "distinct"],
        LowType::arrow(vec![seq_of(tvar("a")), seq_of(tvar("a"))]),
    )
    .with_constraints(vec![TypeConstraint {
        variables: vec![TypeVariable::new("a")],
        constraint: Constraint::Equality,
    }]);

    let mut dict = dictionary(vec![sort_by]);
    dict.type_definitions = vec![definition];
    let client = sigfind_engine::SearchClient::new(vec![dict]).expect("valid catalog");

    // Handle has no equality; the constrained API must not surface.
    assert!(run(&client, &SearchOptions::default(), "seq<Handle> -> seq<Handle>").is_empty());
    // An unconstrained binding still matches.
    assert_eq!(run(&client, &SearchOptions::default(), "seq<int> -> seq<int>").len(), 1);
}
