use assert_matches::assert_matches;

use super::*;
use crate::{
    Describe, Nullified, NullifyOptions,
    metadata::{Field, ScalarKind, Tags},
    testonly::{Person, TeamConfig},
};

fn decoded_person(json: &str) -> Nullified {
    let mut person = Nullified::of::<Person>(&NullifyOptions::default());
    person.decode_json(json).unwrap();
    person
}

fn error_summary(errors: &ValidationErrors) -> Vec<(&str, &str)> {
    errors.iter().map(|err| (err.path(), err.rule())).collect()
}

#[test]
fn missing_required_field() {
    let person = decoded_person("{}");
    let errors = person.validate().unwrap_err();
    assert_eq!(error_summary(&errors), [("name", "required")]);
    assert_eq!(
        errors.to_string(),
        "`name` failed on `required`: value is required"
    );
}

#[test]
fn present_zero_value_satisfies_required() {
    let person = decoded_person(r#"{ "name": "", "age": 0 }"#);
    person.validate().unwrap();
}

#[test]
fn original_type_treats_zero_values_as_missing() {
    let ty = Person::describe();
    let value = Value::zero(&ty);
    let errors = validate(&ty, &value).unwrap_err();
    assert_eq!(error_summary(&errors), [("name", "required")]);
}

#[test]
fn omitnil_skips_absent_values() {
    let person = decoded_person(r#"{ "name": "Alice", "email": null }"#);
    person.validate().unwrap();

    let person = decoded_person(r#"{ "name": "Alice", "email": "alice@example.com", "age": 150 }"#);
    person.validate().unwrap();
}

#[test]
fn invalid_values_are_reported() {
    let person = decoded_person(r#"{ "email": "alice@", "age": 200 }"#);
    let errors = person.validate().unwrap_err();
    assert_eq!(
        error_summary(&errors),
        [("name", "required"), ("age", "max=150"), ("email", "email")]
    );

    let messages: Vec<_> = errors.iter().map(ValidationError::message).collect();
    assert_eq!(messages[1], "value 200 must be at most 150");
    assert_eq!(messages[2], "\"alice@\" is not a valid email address");
}

#[test]
fn email_checks() {
    let ty = TypeDescriptor::Scalar(ScalarKind::String);
    for valid in ["test@example.com", "a.b+c@sub.example.org"] {
        let value = Value::String(valid.into());
        check_rule("email", &ty, &value).unwrap();
    }
    for invalid in ["", "test", "@example.com", "test@example", "a@b@c.com", "te st@example.com", "test@.com"] {
        let value = Value::String(invalid.into());
        check_rule("email", &ty, &value).unwrap_err();
    }
}

#[test]
fn uuid_checks() {
    let ty = TypeDescriptor::Scalar(ScalarKind::String);
    let value = Value::String("89ec270d-8256-4b0e-b25c-39564b10f29e".into());
    check_rule("uuid", &ty, &value).unwrap();

    for invalid in ["invalid", "89ec270d82564b0eb25c39564b10f29e", "89ec270d-8256-4b0e-b25c-39564b10f29"] {
        let value = Value::String(invalid.into());
        let err = check_rule("uuid", &ty, &value).unwrap_err();
        assert!(err.contains("is not a valid UUID"), "{err}");
    }

    let err = check_rule("uuid", &ty, &Value::UInt(1)).unwrap_err();
    assert!(err.contains("requires a string"), "{err}");
}

#[test]
fn bound_checks() {
    let ty = TypeDescriptor::Scalar(ScalarKind::String);
    let value = Value::String("тест".into());
    check_rule("len=4", &ty, &value).unwrap();
    check_rule("min=4", &ty, &value).unwrap();
    let err = check_rule("max=3", &ty, &value).unwrap_err();
    assert_eq!(err, "length 4 must be at most 3");

    let ty = TypeDescriptor::Scalar(ScalarKind::I32);
    check_rule("min=-5", &ty, &Value::Int(-5)).unwrap();
    let err = check_rule("min=-5", &ty, &Value::Int(-6)).unwrap_err();
    assert_eq!(err, "value -6 must be at least -5");

    let err = check_rule("min=x", &ty, &Value::Int(0)).unwrap_err();
    assert!(err.contains("invalid bound"), "{err}");
    let err = check_rule("min", &ty, &Value::Int(0)).unwrap_err();
    assert!(err.contains("invalid use"), "{err}");
}

#[test]
fn rules_fail_for_null_values() {
    let ty = TypeDescriptor::Scalar(ScalarKind::String).optional();
    for rule in ["email", "uuid", "min=1", "max=1", "len=3"] {
        let err = check_rule(rule, &ty, &Value::Null).unwrap_err();
        assert_eq!(err, "value is absent");
    }
    assert_matches!(
        check_rule("omitnil", &ty, &Value::Null),
        Ok(RuleOutcome::Skip)
    );
}

#[test]
fn email_without_omitnil_fails_on_absent_field() {
    let ty = TypeDescriptor::Struct(StructType::new(
        "Contact",
        vec![
            Field::new("email", TypeDescriptor::Scalar(ScalarKind::String).optional())
                .with_tags(Tags::new().with("json", "email").with("validate", "email")),
        ],
    ));
    let value = Value::Struct(vec![("email".into(), Value::Null)]);
    let errors = validate(&ty, &value).unwrap_err();
    assert_eq!(error_summary(&errors), [("email", "email")]);
    assert_eq!(errors.to_string(), "`email` failed on `email`: value is absent");

    let email = Value::String("bob@example.com".into());
    let value = Value::Struct(vec![("email".into(), email)]);
    validate(&ty, &value).unwrap();
}

#[test]
fn first_failed_rule_stops_field_validation() {
    let ty = TypeDescriptor::Struct(StructType::new(
        "Contact",
        vec![
            Field::new("id", TypeDescriptor::Scalar(ScalarKind::String).optional())
                .with_tags(Tags::new().with("validate", "required,uuid")),
        ],
    ));
    let value = Value::Struct(vec![("id".into(), Value::Null)]);
    let errors = validate(&ty, &value).unwrap_err();
    assert_eq!(error_summary(&errors), [("id", "required")]);
}

#[test]
fn unknown_rule_is_an_error() {
    let ty = TypeDescriptor::Struct(StructType::new(
        "Test",
        vec![
            Field::new("value", ScalarKind::U64.into())
                .with_tags(Tags::new().with("validate", "required, positive")),
        ],
    ));
    let value = Value::Struct(vec![("value".into(), Value::UInt(5))]);
    let errors = validate(&ty, &value).unwrap_err();
    assert_eq!(error_summary(&errors), [("value", "positive")]);
    assert_eq!(
        errors.iter().next().unwrap().message(),
        "unknown validation rule `positive`"
    );
}

#[test]
fn validating_nested_values() {
    let mut team = Nullified::of::<TeamConfig>(&NullifyOptions::default());
    team.decode_json(
        r#"{
            "members": [{ "name": "Alice" }, { "age": 30 }],
            "aliases": { "bob": { "age": 1 }, "carol": null }
        }"#,
    )
    .unwrap();

    let errors = team.validate().unwrap_err();
    assert_eq!(
        error_summary(&errors),
        [
            ("lead", "required"),
            ("members.1.name", "required"),
            ("aliases.bob.name", "required"),
        ]
    );

    team.decode_json(
        r#"{
            "lead": { "name": "Alice" },
            "members": [{ "name": "Bob" }, { "name": "Carol" }, { "name": "Dave" }, { "name": "Eve" }]
        }"#,
    )
    .unwrap();
    let errors = team.validate().unwrap_err();
    assert_eq!(error_summary(&errors), [("members", "max=3")]);
    assert_eq!(
        errors.to_string(),
        "`members` failed on `max=3`: length 4 must be at most 3"
    );
}

#[test]
fn collecting_errors() {
    let person = decoded_person(r#"{ "email": "?" }"#);
    let errors = person.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        "`name` failed on `required`: value is required; \
         `email` failed on `email`: \"?\" is not a valid email address"
    );
    let paths: Vec<_> = errors.into_iter().map(|err| err.path).collect();
    assert_eq!(paths, ["name", "email"]);
}
