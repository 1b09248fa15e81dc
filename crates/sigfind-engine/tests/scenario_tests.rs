//! End-to-end scenarios over small hand-built catalogs.

mod common;

use common::*;
use sigfind_model::{ApiSignature, LowType, Name, Parameter, SearchOptions};

#[test]
fn identity_match_finds_the_exact_signature() {
    // List.length : 'a list -> int
    let client = client(vec![module_value(
        &["List", "length"],
        LowType::arrow(vec![list_of(tvar("a")), int()]),
    )]);
    let results = run(&client, &SearchOptions::default(), "'a list -> int");
    assert_eq!(results, vec![("List.length".to_string(), 0)]);
}

#[test]
fn variable_generalization_binds_the_target_variable() {
    // id : 'a -> 'a  queried as  int -> int
    let client = client(vec![module_value(
        &["Operators", "id"],
        LowType::arrow(vec![tvar("a"), tvar("a")]),
    )]);
    let results = run(&client, &SearchOptions::default(), "int -> int");
    assert_eq!(results, vec![("Operators.id".to_string(), 0)]);
}

#[test]
fn tuple_swap_is_budgeted_and_costed() {
    // Map.add : 'k -> 'v -> Map<'k,'v> -> Map<'k,'v>
    let map_add = module_value(
        &["Map", "add"],
        LowType::arrow(vec![
            tvar("k"),
            tvar("v"),
            map_of(tvar("k"), tvar("v")),
            map_of(tvar("k"), tvar("v")),
        ]),
    );
    let client = client(vec![map_add]);
    let query = "'v -> 'k -> Map<'k, 'v> -> Map<'k, 'v>";

    let results = run(&client, &SearchOptions::default(), query);
    assert_eq!(results, vec![("Map.add".to_string(), 1)]);

    let strict = SearchOptions::default().with_swap_order_depth(0);
    assert!(run(&client, &strict, query).is_empty());
}

#[test]
fn optional_complement_drops_trailing_optional_parameters() {
    // printfn : string -> 'a -> unit, last parameter optional
    let printfn = module_function(
        &["Printf", "printfn"],
        vec![
            vec![Parameter::of(string_())],
            vec![Parameter::optional(tvar("a"))],
        ],
        unit(),
    );
    let client = client(vec![printfn]);
    let query = "string -> unit";

    let results = run(&client, &SearchOptions::default(), query);
    assert_eq!(results, vec![("Printf.printfn".to_string(), 1)]);

    let strict = SearchOptions::default().with_complement_depth(0);
    assert!(run(&client, &strict, query).is_empty());
}

#[test]
fn abbreviations_are_transparent_only_where_the_catalog_carries_them() {
    // Seq.head : seq<'a> -> 'a, spelled with the plain identity.
    let client = client(vec![module_value(
        &["Seq", "head"],
        LowType::arrow(vec![seq_of(tvar("a")), tvar("a")]),
    )]);

    // The query's `list` is a distinct identity; nothing unwraps it.
    assert!(run(&client, &SearchOptions::default(), "list<'a> -> 'a").is_empty());

    let results = run(&client, &SearchOptions::default(), "seq<'a> -> 'a");
    assert_eq!(results, vec![("Seq.head".to_string(), 0)]);
}

#[test]
fn builder_search_returns_the_builder_then_applicable_apis() {
    let async_builder = builder(
        &["Core", "async"],
        "AsyncBuilder",
        vec![async_of(tvar("a"))],
        &["for", "let!", "return"],
    );
    let run_synchronously = module_function(
        &["Async", "RunSynchronously"],
        vec![vec![Parameter::of(async_of(tvar("T")))]],
        LowType::target_variable("T"),
    );
    let unrelated = module_value(&["List", "empty"], list_of(tvar("a")));
    let client = client(vec![async_builder, run_synchronously, unrelated]);

    let results = run(
        &client,
        &SearchOptions::default(),
        "{ let!; return } : async<'a>",
    );
    assert_eq!(
        results,
        vec![
            ("Core.async".to_string(), 0),
            ("Async.RunSynchronously".to_string(), 0),
        ]
    );
}

#[test]
fn builder_search_requires_the_requested_syntax() {
    let async_builder = builder(
        &["Core", "async"],
        "AsyncBuilder",
        vec![async_of(tvar("a"))],
        &["let!", "return"],
    );
    let client = client(vec![async_builder]);

    assert!(run(&client, &SearchOptions::default(), "{ yield } : async<'a>").is_empty());

    // An empty syntax set means any builder that implements something.
    let results = run(&client, &SearchOptions::default(), "{} : async<'a>");
    assert_eq!(results, vec![("Core.async".to_string(), 0)]);
}

#[test]
fn name_query_zips_the_innermost_segments() {
    let length = module_value(
        &["List", "length"],
        LowType::arrow(vec![list_of(tvar("a")), int()]),
    );
    let sum = module_value(
        &["List", "sum"],
        LowType::arrow(vec![list_of(int()), int()]),
    );
    let client = client(vec![length, sum]);

    let results = run(&client, &SearchOptions::default(), "List.length");
    assert_eq!(results, vec![("List.length".to_string(), 0)]);

    // A glob over the value name keeps the module pinned.
    let results = run(&client, &SearchOptions::default(), "List.*");
    assert_eq!(results.len(), 2);

    assert!(run(&client, &SearchOptions::default(), "Seq.length").is_empty());
}

#[test]
fn name_query_with_signature_restricts_both() {
    let length = module_value(
        &["List", "length"],
        LowType::arrow(vec![list_of(tvar("a")), int()]),
    );
    let rev = module_value(
        &["List", "rev"],
        LowType::arrow(vec![list_of(tvar("a")), list_of(tvar("a"))]),
    );
    let client = client(vec![length, rev]);

    let results = run(&client, &SearchOptions::default(), "length : 'a list -> int");
    assert_eq!(results, vec![("List.length".to_string(), 0)]);

    assert!(run(&client, &SearchOptions::default(), "rev : 'a list -> int").is_empty());
}

#[test]
fn active_pattern_query_matches_shape_and_kind() {
    let even_odd = sigfind_model::Api::new(
        Name::from_path(&["Patterns", "|Even|Odd|"]),
        ApiSignature::ActivePattern {
            kind: sigfind_model::ActivePatternKind::ActivePattern,
            function: sigfind_model::Function::new(
                vec![vec![Parameter::of(int())]],
                LowType::Identity(sigfind_model::Identity::partial(&["Choice"], 0)),
            ),
        },
    );
    let client = client(vec![even_odd]);

    let results = run(&client, &SearchOptions::default(), "(||) : ... -> int -> ?");
    assert_eq!(results.len(), 1);

    // The partial marker must not match a full active pattern.
    assert!(run(&client, &SearchOptions::default(), "(|_|) : ... -> int -> ?").is_empty());
}

#[test]
fn unresolved_loading_names_reject_the_catalog() {
    let unresolved = sigfind_model::Api::new(
        Name::LoadingName {
            assembly: "Broken.dll".to_string(),
            raw: "Broken.Module.value".to_string(),
            appended: Vec::new(),
        },
        ApiSignature::ModuleValue(int()),
    );
    let error = sigfind_engine::SearchClient::new(vec![dictionary(vec![unresolved])]).unwrap_err();
    assert!(matches!(error, sigfind_model::SearchError::UnresolvedName { assembly, .. } if assembly == "Broken.dll"));
}

#[test]
fn instance_member_signature_starts_with_the_declaring_type() {
    let dict_type = LowType::Identity(sigfind_model::Identity::partial(&["Dictionary"], 0));
    let contains_key = sigfind_model::Api::new(
        Name::from_path(&["Dictionary", "ContainsKey"]),
        ApiSignature::InstanceMember {
            declaring_type: dict_type,
            member: sigfind_model::Member::method(
                "ContainsKey",
                vec![vec![Parameter::of(string_())]],
                LowType::identity(&["bool"]),
            ),
        },
    );
    let client = client(vec![contains_key]);

    let results = run(
        &client,
        &SearchOptions::default(),
        "Dictionary -> string -> bool",
    );
    assert_eq!(results.len(), 1);
}
