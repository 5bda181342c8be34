/// Error kinds, stable codes and document positions
use foxconf_core::{install, parse_document, ErrorKind, Position, SubsystemError};

const NS: &str = "urn:com.camunda.fox.fox-platform:1.1";

fn document(body: &str) -> String {
    format!("<subsystem xmlns=\"{NS}\">\n{body}\n</subsystem>")
}

#[test]
fn test_unknown_element_reports_position() {
    // GIVEN an engine containing an element outside the vocabulary
    let doc = document(
        "    <process-engines>\n        <process-engine name=\"e\">\n            <jndi-name>x</jndi-name>\n        </process-engine>\n    </process-engines>",
    );

    // WHEN parsing
    let err = parse_document(&doc).unwrap_err();

    // THEN it is an unknown token at the offending element
    assert_eq!(err.kind(), ErrorKind::UnknownToken);
    assert_eq!(err.code(), "ERR_UNKNOWN_TOKEN");
    assert!(matches!(err, SubsystemError::UnknownElement { ref name, .. } if name == "jndi-name"));
    assert_eq!(err.position(), Some(Position { line: 4, column: 13 }));
}

#[test]
fn test_unknown_attribute_is_unknown_token() {
    // GIVEN an acquisition with a misspelled attribute
    let doc = document(
        "<job-executor><thread-pool-name>tp</thread-pool-name>\
         <job-acquisition nam=\"a\"><acquisition-strategy>SEQUENTIAL</acquisition-strategy></job-acquisition>\
         </job-executor>",
    );

    // WHEN parsing
    let err = parse_document(&doc).unwrap_err();

    // THEN the attribute is reported as unknown
    assert!(matches!(
        err,
        SubsystemError::UnknownAttribute { ref name, ref element, .. }
            if name == "nam" && element == "job-acquisition"
    ));
}

#[test]
fn test_unknown_namespace_is_unknown_token() {
    // GIVEN a subsystem bound to another schema
    let doc = "<subsystem xmlns=\"urn:com.camunda.fox.fox-platform:9.9\"><process-engines/></subsystem>";

    // WHEN parsing
    let err = parse_document(doc).unwrap_err();

    // THEN the namespace is rejected
    assert_eq!(err.kind(), ErrorKind::UnknownToken);
    assert_eq!(err.position(), Some(Position { line: 1, column: 1 }));
}

#[test]
fn test_structural_errors_are_malformed() {
    // GIVEN documents that use known tokens in the wrong places
    let cases = [
        (
            document("<process-engines><job-acquisition name=\"a\"/></process-engines>"),
            "job-acquisition",
        ),
        (
            document("<job-executor><job-acquisition name=\"a\"><acquisition-strategy>SEQUENTIAL</acquisition-strategy></job-acquisition></job-executor>"),
            "thread-pool-name",
        ),
        (
            document("<job-executor><thread-pool-name>tp</thread-pool-name><job-acquisition name=\"a\"/></job-executor>"),
            "acquisition-strategy",
        ),
        (
            document("<job-executor name=\"x\"><thread-pool-name>tp</thread-pool-name></job-executor>"),
            "name",
        ),
    ];

    for (doc, token) in cases {
        // WHEN parsing
        let err = parse_document(&doc).unwrap_err();

        // THEN the error is structural and names the token
        assert_eq!(err.kind(), ErrorKind::MalformedStructure, "{err}");
        assert_eq!(err.code(), "ERR_MALFORMED_STRUCTURE");
        assert!(err.to_string().contains(token), "{err}");
        assert!(err.position().is_some());
    }
}

#[test]
fn test_markup_errors_are_malformed() {
    // GIVEN markup that is not well formed
    let doc = "<subsystem>\n    <process-engines>\n</subsystem>";

    // WHEN parsing
    let err = parse_document(doc).unwrap_err();

    // THEN it is a structural error with a position
    assert!(matches!(err, SubsystemError::Xml { .. }));
    assert_eq!(err.kind(), ErrorKind::MalformedStructure);
    assert!(err.to_string().contains("line"));
}

#[test]
fn test_apply_errors_carry_no_position() {
    // GIVEN a document whose engines share a name
    let doc = document(
        "<process-engines><process-engine name=\"a\"/><process-engine name=\"a\"/></process-engines>",
    );

    // WHEN installing
    let err = install(&doc).unwrap_err();

    // THEN the error is an apply error without a position
    assert_eq!(err.kind(), ErrorKind::DuplicateResource);
    assert_eq!(err.position(), None);
}

#[test]
fn test_every_kind_has_distinct_code() {
    let kinds = [
        ErrorKind::UnknownToken,
        ErrorKind::MalformedStructure,
        ErrorKind::InvalidEnumValue,
        ErrorKind::DuplicateResource,
        ErrorKind::InvalidOperation,
        ErrorKind::Io,
        ErrorKind::Serialization,
    ];
    let codes: std::collections::HashSet<_> = kinds.iter().map(ErrorKind::code).collect();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}
