use crate::{
    error::ViolationKind,
    field::{
        BooleanField, Choice, ChoiceField, DecimalField, DecimalOutput, Field, FloatField,
        IntegerField, ListField, NullPolicy, StringField, TypeField, UrlField, UuidField,
    },
    types::{Decimal, Uuid},
    value::Value,
};

// ---- helpers -----------------------------------------------------------

fn txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn set<F: Field>(mut field: F, raw: impl Into<Value>) -> F {
    field.set_value(raw.into());
    field
}

fn domain_decimal(field: &DecimalField) -> Decimal {
    match field.to_domain() {
        Some(Value::Decimal(d)) => d,
        other => panic!("expected a decimal domain value, got {other:?}"),
    }
}

// ---- required / identity -----------------------------------------------

#[test]
fn required_empty_yields_single_required_violation() {
    for raw in [Value::Null, txt(""), Value::List(vec![])] {
        let field = set(StringField::new().name("title").max_length(0), raw);
        let err = field.validate().unwrap_err();

        assert_eq!(err.kinds(), vec![ViolationKind::Required]);
        assert_eq!(err.primary_name(), "title");
    }
}

#[test]
fn optional_empty_skips_validators() {
    let field = set(IntegerField::new().required(false).min_value(10), Value::Null);

    assert!(field.validate().is_ok());
    assert_eq!(field.to_native(), Some(Value::Null));
    assert_eq!(field.to_domain(), Some(Value::Null));
}

#[test]
fn identity_is_never_missing_and_hidden_when_empty() {
    let field = set(
        IntegerField::new()
            .required(true)
            .identity(true)
            .on_null(NullPolicy::Null),
        Value::Null,
    );

    assert!(field.validate().is_ok());
    assert_eq!(field.to_native(), None);
    assert_eq!(field.to_domain(), None);
}

#[test]
fn null_policy_default_renders_declared_default() {
    let field = set(
        StringField::new()
            .default_value("n/a")
            .on_null(NullPolicy::Default),
        txt(""),
    );

    assert!(field.validate().is_ok());
    assert_eq!(field.to_native(), Some(txt("n/a")));
}

// ---- numeric -----------------------------------------------------------

#[test]
fn integer_parses_and_reports_format() {
    let field = set(IntegerField::new(), txt("42"));
    assert!(field.validate().is_ok());
    assert_eq!(field.to_native(), Some(Value::Int(42)));

    let field = set(IntegerField::new(), 4.5);
    let err = field.validate().unwrap_err();
    assert_eq!(err.kinds(), vec![ViolationKind::Format]);
}

#[test]
fn integer_bounds_are_independent_validators() {
    let field = set(IntegerField::new().min_value(0).max_value(10), 11);
    let err = field.validate().unwrap_err();
    assert_eq!(err.kinds(), vec![ViolationKind::Range]);

    let field = set(IntegerField::positive(), -1);
    assert!(field.validate().unwrap_err().has_kind(ViolationKind::Range));

    let field = set(IntegerField::positive(), 0);
    assert!(field.validate().is_ok());
}

#[test]
fn float_coerces_numeric_text() {
    let field = set(FloatField::new(), txt("2.5"));

    assert!(field.validate().is_ok());
    assert_eq!(field.to_domain(), Some(Value::Float(2.5)));
}

// ---- decimal -----------------------------------------------------------

#[test]
fn decimal_quantizes_every_numeric_input() {
    let inputs = [
        Value::Int(5),
        Value::Float(1.5),
        Value::Decimal(Decimal::new(12_345, 4)),
        txt("3.14159"),
    ];

    for raw in inputs {
        let field = set(DecimalField::new(), raw.clone());

        assert!(field.validate().is_ok(), "{raw} should validate");
        assert_eq!(domain_decimal(&field).scale(), 3, "{raw} should carry 3 places");
    }
}

#[test]
fn decimal_float_input_rounds_from_its_exact_value() {
    // 2.675 is stored as 2.67499999999999982236431605997495353221893310546875
    let field = set(DecimalField::new().decimal_places(2), Value::Float(2.675));
    assert_eq!(domain_decimal(&field).to_string(), "2.67");

    let field = set(DecimalField::new().decimal_places(2), txt("2.675"));
    assert_eq!(domain_decimal(&field).to_string(), "2.68");

    let field = set(DecimalField::new().decimal_places(2), Value::Float(0.125));
    assert_eq!(domain_decimal(&field).to_string(), "0.12");
}

#[test]
fn decimal_keeps_unparseable_text_until_validate() {
    let field = set(DecimalField::new(), txt("abc"));

    assert_eq!(field.raw_value(), txt("abc"));
    let err = field.validate().unwrap_err();
    assert_eq!(err.kinds(), vec![ViolationKind::Format]);
}

#[test]
fn decimal_non_numeric_values_store_null() {
    let field = set(DecimalField::new().required(false), true);

    assert_eq!(field.raw_value(), Value::Null);
    assert!(field.validate().is_ok());
}

#[test]
fn decimal_output_modes() {
    let as_float = set(DecimalField::new(), txt("1.5"));
    assert_eq!(as_float.to_native(), Some(Value::Float(1.5)));

    let as_string = set(DecimalField::new().output(DecimalOutput::AsString), txt("1.5"));
    assert_eq!(as_string.to_native(), Some(txt("1.500")));
}

#[test]
fn decimal_precision_exceeded_is_a_range_violation() {
    let field = set(DecimalField::new().decimal_places(2).precision(4), txt("123.45"));

    let err = field.validate().unwrap_err();
    assert_eq!(err.kinds(), vec![ViolationKind::Range]);

    let field = set(DecimalField::new().decimal_places(2).precision(4), txt("12.3"));
    assert!(field.validate().is_ok());
}

#[test]
fn decimal_equality_coerces_comparand() {
    let field = set(DecimalField::new(), txt("1.5"));

    assert!(field == 1.5);
    assert!(field == "1.50");
    assert!(field == Decimal::new(15, 1));
    assert!(field != 2_i64);
    assert!(field != "not a number");
}

#[test]
fn decimal_scale_change_requantizes() {
    let field = set(DecimalField::new(), txt("2.71828")).decimal_places(1);

    assert_eq!(domain_decimal(&field).to_string(), "2.7");
}

// ---- boolean -----------------------------------------------------------

#[test]
fn boolean_text_coercion() {
    for (raw, expected) in [("False", false), ("0", false), ("yes", true), ("true", true)] {
        let field = set(BooleanField::new(), raw);
        assert_eq!(field.to_native(), Some(Value::Bool(expected)), "{raw}");
    }
}

#[test]
fn boolean_null_follows_policy_then_forces_bool() {
    let field = set(BooleanField::new().required(false), Value::Null);
    assert_eq!(field.to_native(), Some(Value::Bool(false)));
    assert_eq!(field.to_domain(), Some(Value::Null));

    let hidden = set(BooleanField::new().on_null(NullPolicy::Hide), Value::Null);
    assert_eq!(hidden.to_native(), None);
}

// ---- string-like -------------------------------------------------------

#[test]
fn string_length_bounds() {
    let field = set(StringField::new().max_length(3), "abcd");
    assert_eq!(field.validate().unwrap_err().kinds(), vec![ViolationKind::Range]);

    let field = set(StringField::new().min_length(2).max_length(3), "abc");
    assert!(field.validate().is_ok());
}

#[test]
fn email_checks_format() {
    let field = set(StringField::email(), "someone@example.com");
    assert!(field.validate().is_ok());

    let field = set(StringField::email(), "not-an-email");
    assert_eq!(field.validate().unwrap_err().kinds(), vec![ViolationKind::Format]);
}

#[test]
fn uuid_renders_hyphenated_text_and_typed_domain() {
    let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    let field = set(UuidField::new(), "67E55044-10B1-426F-9247-BB680E5FE0C8");

    assert!(field.validate().is_ok());
    assert_eq!(
        field.to_native(),
        Some(txt("67e55044-10b1-426f-9247-bb680e5fe0c8"))
    );
    assert_eq!(field.to_domain(), Some(Value::Uuid(id)));

    let bad = set(UuidField::new(), "nope");
    assert_eq!(bad.validate().unwrap_err().kinds(), vec![ViolationKind::Format]);
}

#[test]
fn url_base_is_prefixed() {
    let field = set(UrlField::new().base("https://cdn.example.com"), "img/a.png");

    assert!(field.validate().is_ok());
    assert_eq!(
        field.to_native(),
        Some(txt("https://cdn.example.com/img/a.png"))
    );

    let field = set(UrlField::new(), "mailto:x@example.com");
    assert!(field.validate().is_err());
}

#[test]
fn url_base_leaves_absolute_values_alone() {
    let decl = UrlField::new().base("https://cdn.example.com");
    let field = set(decl.clone(), "img/a.png");

    let again = set(decl.clone(), field.to_domain().unwrap());
    assert_eq!(again.to_domain(), Some(txt("https://cdn.example.com/img/a.png")));

    let elsewhere = set(decl, "https://other.example.org/b.png");
    assert_eq!(elsewhere.to_native(), Some(txt("https://other.example.org/b.png")));
}

// ---- choice ------------------------------------------------------------

fn yes_no() -> ChoiceField {
    ChoiceField::new([("Yes", 1), ("No", 0)])
}

#[test]
fn choice_matches_key_and_renders_label() {
    let field = set(yes_no(), 1);

    assert!(field.validate().is_ok());
    assert_eq!(field.to_native(), Some(Value::Int(1)));
    assert_eq!(field.to_domain(), Some(txt("Yes")));
}

#[test]
fn choice_unmatched_value_is_a_choice_violation() {
    let field = set(yes_no(), 2);
    let err = field.validate().unwrap_err();

    assert_eq!(err.kinds(), vec![ViolationKind::Choice]);
    assert_eq!(err.violations[0].to_string(), "Invalid choice value.");
    assert_eq!(field.to_domain(), Some(Value::Null));
}

#[test]
fn choice_numeric_keys_compare_by_value() {
    let field = set(yes_no(), 1.0);
    assert_eq!(field.to_domain(), Some(txt("Yes")));

    let field = set(yes_no(), "1");
    assert!(field.validate().is_err());
}

#[test]
fn choice_bare_values_and_first_match_wins() {
    let field = set(
        ChoiceField::new([Choice::bare("red"), Choice::pair("Crimson", "red")]),
        "red",
    );

    assert_eq!(field.to_domain(), Some(txt("red")));
}

#[test]
fn choice_empty_value_only_runs_required_check() {
    let field = set(yes_no().required(false), Value::Null);
    assert!(field.validate().is_ok());

    let field = set(yes_no(), Value::Null);
    assert_eq!(field.validate().unwrap_err().kinds(), vec![ViolationKind::Required]);
}

// ---- list --------------------------------------------------------------

fn int_list(raw: Value) -> ListField {
    set(ListField::of::<IntegerField>().name("tags"), raw)
}

#[test]
fn list_of_integers_renders_items() {
    let field = int_list(Value::from(vec![1, 2, 3]));

    assert!(field.validate().is_ok());
    assert_eq!(field.to_domain(), Some(Value::from(vec![1, 2, 3])));
    assert_eq!(field.len(), 3);
    assert!(field.contains(&Value::Int(2)));
}

#[test]
fn list_append_revalidates() {
    let mut field = int_list(Value::from(vec![1, 2, 3]));

    field.append(4).unwrap();
    assert_eq!(field.to_native(), Some(Value::from(vec![1, 2, 3, 4])));

    let err = field.append("x").unwrap_err();
    assert_eq!(err.violations[0].items()[0].index, 4);
}

#[test]
fn list_bad_item_yields_one_compound_violation() {
    let field = int_list(Value::List(vec![Value::Int(1), txt("x")]));
    let err = field.validate().unwrap_err();

    assert_eq!(err.kinds(), vec![ViolationKind::Compound]);
    let items = err.violations[0].items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].index, 1);
    assert_eq!(items[0].violations[0].kind(), ViolationKind::Format);

    assert!(err.issues().contains_key("tags[1]"));
}

#[test]
fn list_set_item_replaces_in_place() {
    let mut field = int_list(Value::from(vec![1, 2, 3]));

    field.set_item(1, 20).unwrap();
    assert_eq!(field.to_domain(), Some(Value::from(vec![1, 20, 3])));
    assert_eq!(field.get(1), Some(&Value::Int(20)));

    let err = field.set_item(7, 0).unwrap_err();
    assert_eq!(err.kinds(), vec![ViolationKind::Range]);
    assert_eq!(field.len(), 3);
}

#[test]
fn list_empty_required_and_scalar_input() {
    let field = int_list(Value::List(vec![]));
    assert_eq!(field.validate().unwrap_err().kinds(), vec![ViolationKind::Required]);

    let field = int_list(Value::Int(9));
    assert_eq!(field.to_domain(), Some(Value::from(vec![9])));
}

#[test]
fn list_iterates_domain_values() {
    let field = int_list(Value::List(vec![txt("1"), txt("2")]));
    let collected: Vec<&Value> = (&field).into_iter().collect();

    assert_eq!(collected, vec![&Value::Int(1), &Value::Int(2)]);
}

// ---- type tag ----------------------------------------------------------

#[test]
fn type_field_is_identity_and_never_fails() {
    let mut field = TypeField::new("order");
    assert!(field.meta().is_identity());
    assert!(field.validate().is_ok());

    field.set_value(txt("invoice"));
    assert_eq!(field.to_native(), Some(txt("invoice")));

    let mut fixed = TypeField::fixed("order");
    fixed.set_value(txt("invoice"));
    assert_eq!(fixed.to_domain(), Some(txt("order")));
}

// ---- spawn -------------------------------------------------------------

#[test]
fn spawn_shares_declaration_with_empty_value() {
    let decl = set(IntegerField::new().name("qty").max_value(5), 3);
    let mut instance = decl.spawn();

    assert_eq!(instance.raw_value(), Value::Null);
    assert_eq!(instance.names(), ["qty".to_string()]);

    instance.set_value(Value::Int(6));
    assert!(instance.validate().unwrap_err().has_kind(ViolationKind::Range));
}
