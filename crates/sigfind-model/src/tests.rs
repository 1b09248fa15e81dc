use super::*;

#[test]
fn name_part_equality_is_by_display_form() {
    let plain = NamePart::SymbolName("op_Addition".to_string());
    let operator = NamePart::OperatorName {
        display: "(+)".to_string(),
        compiled: "op_Addition".to_string(),
    };
    let compiled = NamePart::WithCompiledName {
        display: "(+)".to_string(),
        compiled: "op_Plus".to_string(),
    };

    assert_ne!(plain, operator);
    assert_eq!(operator, compiled);
}

#[test]
fn display_name_renders_outermost_first() {
    let name = Name::from_path(&["List", "map"]);
    let items = name.display_name().expect("display name");
    assert_eq!(items[0].part.display(), "map");
    assert_eq!(display_name_string(items), "List.map");
}

#[test]
fn arrow_constructor_rejects_arity_one() {
    let result = std::panic::catch_unwind(|| LowType::arrow(vec![LowType::identity(&["int"])]));
    assert!(result.is_err());
}

#[test]
fn member_arrow_type_collapses_parameter_groups() {
    let member = Member::method(
        "Add",
        vec![vec![
            Parameter::of(LowType::identity(&["int"])),
            Parameter::of(LowType::identity(&["string"])),
        ]],
        LowType::identity(&["unit"]),
    );

    match member.arrow_type() {
        LowType::Arrow(elements) => {
            assert_eq!(elements.len(), 2);
            assert!(matches!(&elements[0], LowType::Tuple { elements, .. } if elements.len() == 2));
        }
        other => panic!("expected arrow, got {other:?}"),
    }
}

#[test]
fn optional_tail_counts_only_trailing_optional_groups() {
    let function = Function::new(
        vec![
            vec![Parameter::of(LowType::identity(&["string"]))],
            vec![Parameter::optional(LowType::identity(&["int"]))],
            vec![Parameter::optional(LowType::identity(&["bool"]))],
        ],
        LowType::identity(&["unit"]),
    );
    assert_eq!(function.optional_tail(), 2);

    let none = Function::new(
        vec![
            vec![Parameter::optional(LowType::identity(&["int"]))],
            vec![Parameter::of(LowType::identity(&["string"]))],
        ],
        LowType::identity(&["unit"]),
    );
    assert_eq!(none.optional_tail(), 0);
}

#[test]
fn options_clamp_negative_depths() {
    let options = SearchOptions::default()
        .with_swap_order_depth(-3)
        .with_complement_depth(-1);
    assert_eq!(options.swap_order_depth, 0);
    assert_eq!(options.complement_depth, 0);
}

#[test]
fn low_type_display_is_primary_dialect_syntax() {
    let arrow = LowType::arrow(vec![
        LowType::tuple(vec![LowType::query_variable("a"), LowType::query_variable("b")]),
        LowType::generic(LowType::identity(&["Map"]), vec![
            LowType::query_variable("a"),
            LowType::query_variable("b"),
        ]),
    ]);
    assert_eq!(arrow.to_string(), "'a * 'b -> Map<'a, 'b>");
}

#[test]
fn dictionary_round_trips_through_json() {
    let mut dictionary = ApiDictionary::new("TestAssembly");
    dictionary.apis.push(Api::new(
        Name::from_path(&["List", "length"]),
        ApiSignature::ModuleValue(LowType::identity(&["int"])),
    ));

    let json = serde_json::to_string(&dictionary).expect("serialize");
    let back: ApiDictionary = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, dictionary);
}
