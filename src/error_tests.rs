use crate::error::*;

#[test]
fn codes_and_messages_round_trip() {
    let e = AppError::validation("bad_marks", "Total marks must be greater than 0.");
    assert_eq!(e.code_str(), "bad_marks");
    assert_eq!(e.message(), "Total marks must be greater than 0.");

    let e = AppError::transport("net", "connection refused");
    assert_eq!(e.code_str(), "net");
}

#[test]
fn display_includes_code_and_message() {
    let e = AppError::auth("unauthorized", "Bad credentials");
    assert_eq!(format!("{}", e), "unauthorized: Bad credentials");
}

#[test]
fn corrupted_state_is_not_user_visible() {
    assert!(!AppError::corrupted("bad_session", "unparsable").user_visible());
    assert!(AppError::delivery("save_failed", "disk full").user_visible());
    assert!(AppError::ambiguous("server", "Subject not found").user_visible());
}
