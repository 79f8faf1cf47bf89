//! Integration tests for query parameter extraction and resolution

mod common;

use common::*;
use eqlkit::analysis::{KnownScalarType, ParamError, SchemaScalar};
use eqlkit::extract_query_parameters;

#[test]
fn resolve_fixture_parameters() {
    let source = load_fixture("params.edgeql");
    let scalars = load_schema("schema_scalars.json");
    let params = extract_query_parameters(&source, &scalars).expect("fixture parses");

    let names: Vec<_> = params.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["ids", "since", "score", "min_rating", "title"]);

    assert_eq!(params["ids"].scalar, Some(KnownScalarType::Uuid));
    assert!(params["ids"].array);
    assert!(!params["ids"].optional);

    assert_eq!(params["since"].scalar, Some(KnownScalarType::Datetime));
    assert!(params["since"].optional);

    assert_eq!(params["score"].scalar, Some(KnownScalarType::Float32));
    assert_eq!(params["min_rating"].scalar, Some(KnownScalarType::Float64));

    assert_eq!(params["title"].scalar, None);
    assert_eq!(params["title"].error, Some(ParamError::MissingCast));
}

#[test]
fn missing_cast() {
    let params = extract_query_parameters("select $x", &[]).unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(
        params["x"].error.map(|e| e.to_string()).as_deref(),
        Some("Missing a type cast before the parameter")
    );
}

#[test]
fn scalar_types_resolve() {
    let params = extract_query_parameters("select <int64>$x", &[]).unwrap();
    assert_eq!(params["x"].scalar, Some(KnownScalarType::Int64));
    assert_eq!(params["x"].error, None);

    let params = extract_query_parameters("select <array<int64>>$x", &[]).unwrap();
    assert!(params["x"].array);
    assert_eq!(params["x"].scalar, Some(KnownScalarType::Int64));
}

#[test]
fn conflicting_casts_keep_first_entry() {
    let params =
        extract_query_parameters("select (<int64>$x, <str>$x, <str>$x)", &[]).unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params["x"].scalar, Some(KnownScalarType::Int64));
    assert_eq!(params["x"].error, Some(ParamError::IncompatibleUsages));
}

#[test]
fn user_defined_scalar_resolves_to_base() {
    let scalars = [SchemaScalar::new("default::MyInt", &["std::int64"])];
    let params = extract_query_parameters("select <MyInt>$x", &scalars).unwrap();
    assert_eq!(params["x"].scalar, Some(KnownScalarType::Int64));

    let params = extract_query_parameters("select <MyInt>$x", &[]).unwrap();
    assert_eq!(params["x"].error, Some(ParamError::UnsupportedType));
}

#[test]
fn scalar_without_known_base_is_unsupported() {
    let scalars = load_schema("schema_scalars.json");
    let params = extract_query_parameters("select <Tag>$tag", &scalars).unwrap();
    assert_eq!(params["tag"].scalar, None);
    assert_eq!(params["tag"].error, Some(ParamError::UnsupportedType));
}

#[test]
fn unparseable_input_has_no_result() {
    let source = format!("select {}<str>$x", "{".repeat(1000));
    assert!(extract_query_parameters(&source, &[]).is_none());
}

#[test]
fn parameters_serialize_for_editors() {
    let params = extract_query_parameters("select <optional str>$name", &[]).unwrap();
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": {
                "name": "name",
                "type": "std::str",
                "array": false,
                "optional": true,
                "error": null
            }
        })
    );
}
