use ffdir_core::error::CoreError;
use ffdir_core::schema::SchemaRegistry;
use std::fs;

#[test]
fn loads_one_schema_per_json_file() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("0.4.0.json"), r#"{"type": "object"}"#).unwrap();
    fs::write(temp.path().join("0.5.2.json"), r#"{"required": ["name"]}"#).unwrap();
    fs::write(temp.path().join("README.md"), "not a schema").unwrap();

    let registry = SchemaRegistry::load(temp.path()).unwrap();
    assert_eq!(registry.versions(), vec!["0.4.0", "0.5.2"]);
    assert!(registry.contains("0.5.2"));
    assert!(!registry.contains("README"));
    assert_eq!(
        registry.get("0.5.2").unwrap()["required"][0],
        serde_json::json!("name")
    );
}

#[test]
fn empty_directory_is_an_empty_registry() {
    let temp = tempfile::tempdir().unwrap();
    let registry = SchemaRegistry::load(temp.path()).unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn malformed_json_names_the_file() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("0.4.0.json"), r#"{"type": "object"}"#).unwrap();
    fs::write(temp.path().join("0.4.1.json"), "{ broken").unwrap();

    let err = SchemaRegistry::load(temp.path()).unwrap_err();
    match &err {
        CoreError::SchemaLoad { path, .. } => {
            assert_eq!(path.file_name().unwrap(), "0.4.1.json");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("0.4.1.json"));
}

#[test]
fn invalid_schema_document_is_a_load_error() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("0.4.0.json"), r#"{"type": 12}"#).unwrap();
    assert!(matches!(
        SchemaRegistry::load(temp.path()),
        Err(CoreError::SchemaLoad { .. })
    ));
}

#[test]
fn missing_directory_is_an_io_error() {
    let temp = tempfile::tempdir().unwrap();
    assert!(matches!(
        SchemaRegistry::load(&temp.path().join("nope")),
        Err(CoreError::Io(_))
    ));
}
