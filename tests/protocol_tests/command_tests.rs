//! Command Tests
//!
//! Tests for command normalization and validation.

use projector_panel::error::PanelError;
use projector_panel::protocol::{Command, TERMINATOR};

// =============================================================================
// Terminator Normalization
// =============================================================================

#[test]
fn test_appends_missing_terminator() {
    let cmd = Command::new("*pow=on").unwrap();
    assert_eq!(cmd.as_str(), "*pow=on#");
}

#[test]
fn test_keeps_existing_terminator() {
    let cmd = Command::new("*pow=on#").unwrap();
    assert_eq!(cmd.as_str(), "*pow=on#");
    assert_eq!(cmd.as_str().matches(TERMINATOR).count(), 1);
}

#[test]
fn test_normalization_is_idempotent() {
    for input in ["*sour=hdmi", "*sour=hdmi#", "*up", "#", "x"] {
        let once = Command::new(input).unwrap();
        let twice = Command::new(once.as_str()).unwrap();
        assert_eq!(once, twice, "input {:?}", input);
        assert!(once.as_str().ends_with('#'));
    }
}

#[test]
fn test_only_one_terminator_added() {
    let cmd = Command::new("*menu=?").unwrap();
    assert_eq!(cmd.len(), "*menu=?".len() + 1);
}

#[test]
fn test_bare_terminator_is_a_command() {
    let cmd = Command::new("#").unwrap();
    assert_eq!(cmd.as_str(), "#");
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_empty_is_missing_command() {
    assert!(matches!(Command::new(""), Err(PanelError::MissingCommand)));
}

#[test]
fn test_whitespace_is_missing_command() {
    assert!(matches!(Command::new("  \t"), Err(PanelError::MissingCommand)));
}

#[test]
fn test_non_ascii_rejected() {
    let err = Command::new("*pow=ön#").unwrap_err();
    assert!(matches!(err, PanelError::InvalidCommand(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_parse_via_from_str() {
    let cmd: Command = "*enter".parse().unwrap();
    assert_eq!(cmd.to_string(), "*enter#");
}

// =============================================================================
// Raw User Input
// =============================================================================

#[test]
fn test_user_input_strips_cr_tokens() {
    let cmd = Command::from_user_input("<CR>*pow=?#<CR>").unwrap();
    assert_eq!(cmd.as_str(), "*pow=?#");
}

#[test]
fn test_user_input_strips_cr_tokens_then_terminates() {
    let cmd = Command::from_user_input("<CR>*pow=?").unwrap();
    assert_eq!(cmd.as_str(), "*pow=?#");
}

#[test]
fn test_user_input_only_cr_tokens_is_missing() {
    assert!(matches!(
        Command::from_user_input("<CR><CR>"),
        Err(PanelError::MissingCommand)
    ));
}

#[test]
fn test_user_input_without_tokens_unchanged() {
    let cmd = Command::from_user_input("*vol=+#").unwrap();
    assert_eq!(cmd.as_str(), "*vol=+#");
}
