use kaiz_core::errors::{ExError, ExErrorKind, VisitError};

#[test]
fn test_missing_field_maps_to_validation_failed() {
    let err = VisitError::MissingRequiredField {
        field: "company_name".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::ValidationFailed);
    assert_eq!(ex_err.code(), "ERR_VALIDATION_FAILED");
    assert_eq!(ex_err.field(), Some("company_name"));
    assert!(ex_err.is_validation());
}

#[test]
fn test_invalid_enum_message_lists_allowed_values() {
    let err = VisitError::InvalidEnumValue {
        field: "tpe_or_non_tpe".to_string(),
        value: "MAYBE".to_string(),
        allowed: vec!["TPE".to_string(), "NON-TPE".to_string()],
    };

    let ex_err: ExError = err.into();

    assert!(ex_err.message().contains("MAYBE"));
    assert!(ex_err.message().contains("TPE, NON-TPE"));
    assert_eq!(ex_err.field(), Some("tpe_or_non_tpe"));
}

#[test]
fn test_every_validation_variant_is_caller_correctable() {
    let errors = vec![
        VisitError::MissingRequiredField {
            field: "visit_date".to_string(),
        },
        VisitError::EmptyRequiredField {
            field: "company_name".to_string(),
        },
        VisitError::InvalidFieldType {
            field: "customer_contact_no".to_string(),
            expected: "integer".to_string(),
            value: "call me".to_string(),
        },
        VisitError::NegativeCount {
            field: "tpe_machines_nos".to_string(),
            value: -1,
        },
        VisitError::InvalidDate {
            field: "visit_date".to_string(),
            value: "2024-02-30".to_string(),
        },
        VisitError::MonthOutOfRange { month: 0 },
    ];

    for err in errors {
        let ex_err: ExError = err.into();
        assert_eq!(ex_err.kind(), ExErrorKind::ValidationFailed);
    }
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::ValidationFailed, "ERR_VALIDATION_FAILED"),
        (ExErrorKind::StorageUnavailable, "ERR_STORAGE_UNAVAILABLE"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_builder_context_survives_clone() {
    let err = ExError::new(ExErrorKind::StorageUnavailable)
        .with_op("visit_update")
        .with_sr_no(12)
        .with_message("database is locked");

    let cloned = err.clone();

    assert_eq!(cloned.op(), Some("visit_update"));
    assert_eq!(cloned.sr_no(), Some(12));
    assert_eq!(cloned.message(), "database is locked");
    assert!(!cloned.is_validation());
}
