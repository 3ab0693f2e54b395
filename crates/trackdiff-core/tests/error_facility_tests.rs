use trackdiff_core::errors::{CompareError, DocumentRole, ExError, ExErrorKind};
use trackdiff_core::Document;

#[test]
fn test_missing_document_verifiable_by_kind() {
    let err = CompareError::MissingDocument {
        role: DocumentRole::New,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingDocument);
    assert_eq!(ex_err.code(), "ERR_MISSING_DOCUMENT");
    assert_eq!(ex_err.role(), Some(DocumentRole::New));
}

#[test]
fn test_aborted_distinct_from_missing_document() {
    let ex_err: ExError = CompareError::Aborted.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Aborted);
    assert_eq!(ex_err.code(), "ERR_ABORTED");
    assert_ne!(ex_err.kind(), ExErrorKind::MissingDocument);
    assert_eq!(ex_err.role(), None);
}

#[test]
fn test_invalid_document_keeps_reason() {
    let err = CompareError::InvalidDocument {
        reason: "paragraph has 3 units but 2 change positions".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidDocument);
    assert!(ex_err.message().contains("3 units"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Test that each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::MissingDocument, "ERR_MISSING_DOCUMENT"),
        (ExErrorKind::InvalidDocument, "ERR_INVALID_DOCUMENT"),
        (ExErrorKind::Aborted, "ERR_ABORTED"),
        (ExErrorKind::WorkerSpawn, "ERR_WORKER_SPAWN"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Config, "ERR_CONFIG"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let err = Document::from_json("{ not json").unwrap_err();

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_inconsistent_change_map_is_invalid_document() {
    let json = r#"{
        "text": { "paragraphs": [ {
            "units": [ { "type": "char", "ch": "a" } ],
            "changes": [ { "start": 0, "end": 5, "change": { "kind": "unchanged" } } ]
        } ] }
    }"#;

    let err = Document::from_json(json).unwrap_err();
    assert!(matches!(err, CompareError::InvalidDocument { .. }));
}

#[test]
fn test_ex_error_builder_pattern() {
    let ex_err = ExError::new(ExErrorKind::Config)
        .with_op("load_options")
        .with_message("unknown key 'colour'");

    assert_eq!(ex_err.kind(), ExErrorKind::Config);
    assert_eq!(ex_err.op(), Some("load_options"));
    assert!(ex_err.message().contains("colour"));
    assert!(ex_err.source_error().is_none());
}

#[test]
fn test_ex_error_display_with_source() {
    let cause = ExError::new(ExErrorKind::Io).with_message("permission denied");
    let ex_err = ExError::new(ExErrorKind::Config)
        .with_op("load_options")
        .with_message("cannot read options file")
        .with_source(cause);

    let display = ex_err.to_string();
    assert!(display.contains("ERR_CONFIG"));
    assert!(display.contains("load_options"));
    assert!(display.contains("caused by [ERR_IO]"));
    assert!(std::error::Error::source(&ex_err).is_some());
}
