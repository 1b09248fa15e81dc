//! Query parser tests for the primary dialect.

use sigfind_engine::{InitializationStrategy as _, strategy_for};
use sigfind_model::{
    ActivePatternSignature, Identity, LowType, Mode, NameMatchMethod, QueryMethod, SignatureQuery,
    VariableSource,
};

fn parse(text: &str) -> QueryMethod {
    strategy_for(Mode::FSharp)
        .parse_query(text)
        .expect("query parses")
        .method
}

fn signature_of(method: QueryMethod) -> LowType {
    match method {
        QueryMethod::BySignature(SignatureQuery::Signature(t)) => t,
        other => panic!("expected a signature query, got {other:?}"),
    }
}

#[test]
fn postfix_generic_application() {
    let t = signature_of(parse("'a list -> int"));
    let LowType::Arrow(elements) = t else { panic!("expected arrow") };
    match &elements[0] {
        LowType::Generic(constructor, arguments) => {
            let LowType::Identity(Identity::Partial(p)) = constructor.as_ref() else {
                panic!("expected partial identity constructor")
            };
            assert_eq!(p.name[0].part.display(), "list");
            assert_eq!(p.generic_parameter_count, 1);
            assert!(matches!(&arguments[0], LowType::Variable(VariableSource::Query, v) if v.name == "a"));
        }
        other => panic!("expected generic, got {other:?}"),
    }
}

#[test]
fn prefix_generic_arguments() {
    let t = signature_of(parse("Map<'k, 'v>"));
    let LowType::Generic(constructor, arguments) = t else { panic!("expected generic") };
    let LowType::Identity(Identity::Partial(p)) = *constructor else {
        panic!("expected partial identity constructor")
    };
    assert_eq!(p.generic_parameter_count, 2);
    assert_eq!(arguments.len(), 2);
}

#[test]
fn nested_postfix_applications_stack() {
    // 'a list option = option<list<'a>>
    let t = signature_of(parse("'a list option"));
    let LowType::Generic(outer, _) = &t else { panic!("expected generic") };
    let LowType::Identity(Identity::Partial(p)) = outer.as_ref() else {
        panic!("expected identity")
    };
    assert_eq!(p.name[0].part.display(), "option");
}

#[test]
fn tuples_bind_tighter_than_arrows() {
    let t = signature_of(parse("int * string -> unit"));
    let LowType::Arrow(elements) = t else { panic!("expected arrow") };
    assert_eq!(elements.len(), 2);
    assert!(matches!(&elements[0], LowType::Tuple { elements, is_struct: false } if elements.len() == 2));
}

#[test]
fn struct_tuples_carry_the_flag() {
    let t = signature_of(parse("struct (int * string)"));
    assert!(matches!(t, LowType::Tuple { is_struct: true, .. }));
}

#[test]
fn wildcards_and_tags() {
    let t = signature_of(parse("? -> ?x"));
    let LowType::Arrow(elements) = t else { panic!("expected arrow") };
    assert_eq!(elements[0], LowType::Wildcard(None));
    assert_eq!(elements[1], LowType::Wildcard(Some("x".to_string())));
}

#[test]
fn statically_resolved_variables_keep_the_flag() {
    let t = signature_of(parse("^a -> ^a"));
    let LowType::Arrow(elements) = t else { panic!("expected arrow") };
    assert!(matches!(&elements[0], LowType::Variable(_, v) if v.is_solve_at_compile_time));
}

#[test]
fn bare_names_become_name_queries() {
    let QueryMethod::ByName(items, SignatureQuery::Wildcard) = parse("List.map") else {
        panic!("expected a name query")
    };
    assert_eq!(items.len(), 2);
    // Innermost-first: the value name leads.
    assert_eq!(items[0].expected, "map");
    assert_eq!(items[1].expected, "List");
}

#[test]
fn glob_names_compile_to_regexes() {
    let QueryMethod::ByName(items, _) = parse("*map*") else {
        panic!("expected a name query")
    };
    let NameMatchMethod::Regex(pattern) = &items[0].method else {
        panic!("expected a compiled pattern")
    };
    assert!(pattern.is_match("mapFold"));
    assert!(pattern.is_match("trymap"));
    assert!(!pattern.is_match("fold"));
}

#[test]
fn name_with_signature_keeps_both_sides() {
    let QueryMethod::ByName(items, SignatureQuery::Signature(_)) = parse("map : ('a -> 'b) -> 'a list -> 'b list")
    else {
        panic!("expected name and signature")
    };
    assert_eq!(items[0].expected, "map");
}

#[test]
fn underscore_signature_is_a_wildcard() {
    assert!(matches!(
        parse("map : _"),
        QueryMethod::ByName(_, SignatureQuery::Wildcard)
    ));
}

#[test]
fn active_pattern_queries() {
    let QueryMethod::ByActivePattern(query) = parse("(||) : ... -> int -> ?") else {
        panic!("expected an active-pattern query")
    };
    assert_eq!(query.kind, sigfind_model::ActivePatternKind::ActivePattern);
    assert!(matches!(query.signature, ActivePatternSignature::AnyParameter { .. }));

    let QueryMethod::ByActivePattern(query) = parse("(|_|) : int -> ?") else {
        panic!("expected an active-pattern query")
    };
    assert_eq!(query.kind, sigfind_model::ActivePatternKind::PartialActivePattern);
    assert!(matches!(query.signature, ActivePatternSignature::Specified(_)));
}

#[test]
fn computation_expression_queries() {
    let QueryMethod::ByComputationExpression(query) = parse("{ let!; return } : async<'a>") else {
        panic!("expected a computation-expression query")
    };
    assert_eq!(query.syntaxes, vec!["let!".to_string(), "return".to_string()]);
    assert!(matches!(query.type_, LowType::Generic(..)));
}

#[test]
fn syntax_errors_are_reported_with_positions() {
    for bad in ["", "->", "'a ->", "Map<'k", "struct int"] {
        assert!(
            strategy_for(Mode::FSharp).parse_query(bad).is_err(),
            "`{bad}` should not parse"
        );
    }
}
