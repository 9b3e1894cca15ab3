use reqwest::StatusCode;

use crate::papers::*;
use crate::subjects::Subject;

fn subjects() -> Vec<Subject> {
    vec![
        Subject { id: 1, name: "Mathematics".to_string(), description: None },
        Subject { id: 2, name: "Physics".to_string(), description: Some("mechanics".to_string()) },
    ]
}

// --- filename extraction ---

#[test]
fn quoted_filename_is_extracted() {
    let f = filename_from_disposition(Some(r#"attachment; filename="paper_42.pdf""#));
    assert_eq!(f, "paper_42.pdf");
}

#[test]
fn bare_filename_is_extracted() {
    let f = filename_from_disposition(Some("attachment; filename=paper_7.pdf"));
    assert_eq!(f, "paper_7.pdf");
}

#[test]
fn single_quoted_filename_is_extracted() {
    let f = filename_from_disposition(Some("attachment; filename='p.pdf'"));
    assert_eq!(f, "p.pdf");
}

#[test]
fn absent_header_falls_back() {
    assert_eq!(filename_from_disposition(None), FALLBACK_FILENAME);
}

#[test]
fn non_attachment_header_falls_back() {
    assert_eq!(filename_from_disposition(Some("inline")), FALLBACK_FILENAME);
}

#[test]
fn malformed_header_falls_back() {
    assert_eq!(filename_from_disposition(Some("attachment; nonsense")), FALLBACK_FILENAME);
    assert_eq!(filename_from_disposition(Some("attachment; filename=")), FALLBACK_FILENAME);
}

#[test]
fn path_components_in_filename_are_stripped() {
    let f = filename_from_disposition(Some(r#"attachment; filename="../../etc/passwd""#));
    assert_eq!(f, "passwd");
    let f = filename_from_disposition(Some(r#"attachment; filename="..""#));
    assert_eq!(f, FALLBACK_FILENAME);
}

// --- failure classification ---

#[test]
fn json_error_body_yields_its_message() {
    let msg = failure_message(
        StatusCode::NOT_FOUND,
        Some("application/json"),
        br#"{"message": "Subject not found"}"#,
    );
    assert!(msg.contains("Subject not found"), "got: {}", msg);
}

#[test]
fn binary_body_declared_json_is_read_as_text_and_parsed() {
    // The transport hands the error body over as opaque bytes; the declared
    // content type is what says it is JSON.
    let body: Vec<u8> = br#"{"message": "Invalid marks"}"#.to_vec();
    let msg = failure_message(StatusCode::BAD_REQUEST, Some("application/json;charset=UTF-8"), &body);
    assert!(msg.contains("Invalid marks"), "got: {}", msg);
}

#[test]
fn unparsable_json_body_falls_back_to_status_text() {
    let msg = failure_message(StatusCode::BAD_GATEWAY, Some("application/json"), b"<html>oops</html>");
    assert!(msg.contains("Bad Gateway"), "got: {}", msg);
}

#[test]
fn json_body_without_message_falls_back_to_status_text() {
    let msg = failure_message(StatusCode::FORBIDDEN, Some("application/json"), br#"{"error": 42}"#);
    assert!(msg.contains("Forbidden"), "got: {}", msg);
}

#[test]
fn empty_body_yields_status_text() {
    let msg = failure_message(StatusCode::INTERNAL_SERVER_ERROR, None, b"");
    assert!(msg.contains("Internal Server Error"), "got: {}", msg);
}

#[test]
fn typed_error_message_is_never_empty() {
    match ArtifactResponse::error("") {
        ArtifactResponse::TypedError { message } => assert!(!message.trim().is_empty()),
        other => panic!("unexpected outcome: {:?}", other),
    }
    match ArtifactResponse::error("   ") {
        ArtifactResponse::TypedError { message } => assert!(message.contains("Unknown error.")),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

// --- request validation ---

#[test]
fn request_for_known_subject_validates() {
    let subs = subjects();
    let req = GenerationRequest::for_subject(&subs, 2, 50);
    assert_eq!(req.subject_name, "Physics");
    assert!(req.validate(&subs).is_ok());
}

#[test]
fn zero_or_negative_subject_id_is_rejected() {
    let subs = subjects();
    let req = GenerationRequest { subject_id: 0, subject_name: "x".to_string(), total_marks: 50 };
    assert!(req.validate(&subs).is_err());
}

#[test]
fn subject_missing_from_loaded_list_is_rejected() {
    let subs = subjects();
    let req = GenerationRequest { subject_id: 99, subject_name: "Ghost".to_string(), total_marks: 50 };
    let err = req.validate(&subs).unwrap_err();
    assert!(err.message().contains("99"));
}

#[test]
fn empty_subject_name_is_rejected() {
    let subs = subjects();
    let req = GenerationRequest::for_subject(&subs, 1, 50);
    let req = GenerationRequest { subject_name: "  ".to_string(), ..req };
    assert!(req.validate(&subs).is_err());
}

#[test]
fn non_positive_marks_are_rejected() {
    let subs = subjects();
    let req = GenerationRequest::for_subject(&subs, 1, 0);
    let err = req.validate(&subs).unwrap_err();
    assert!(err.message().contains("Total marks"));
}
