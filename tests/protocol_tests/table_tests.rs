//! Command Table Tests

use projector_panel::error::PanelError;
use projector_panel::protocol::CommandTable;

#[test]
fn test_builtin_pow_on() {
    let table = CommandTable::builtin();
    assert_eq!(table.lookup("pow_on").unwrap().as_str(), "*pow=on#");
}

#[test]
fn test_builtin_entries() {
    let table = CommandTable::builtin();
    let expected = [
        ("pow_off", "*pow=off#"),
        ("pow_status", "*pow=?#"),
        ("sour_rgb", "*sour=RGB#"),
        ("sour_hdmi", "*sour=hdmi#"),
        ("sour_hdbaset", "*sour=hdbaset#"),
        ("menu_status", "*menu=?#"),
        ("enter", "*enter#"),
        ("right", "*right#"),
    ];
    for (key, cmd) in expected {
        assert_eq!(table.lookup(key).unwrap().as_str(), cmd, "key {}", key);
    }
    assert_eq!(table.len(), 17);
}

#[test]
fn test_every_builtin_command_is_terminated() {
    for (key, cmd) in CommandTable::builtin().entries() {
        assert!(cmd.as_str().ends_with('#'), "{} -> {}", key, cmd);
        assert!(cmd.as_str().is_ascii());
    }
}

#[test]
fn test_unknown_key() {
    let table = CommandTable::builtin();
    match table.lookup("self_destruct") {
        Err(PanelError::UnknownAction(key)) => assert_eq!(key, "self_destruct"),
        other => panic!("Expected UnknownAction, got {:?}", other),
    }
    assert!(!table.contains("self_destruct"));
}

#[test]
fn test_lookup_is_case_sensitive() {
    let table = CommandTable::builtin();
    assert!(table.lookup("POW_ON").is_err());
}

#[test]
fn test_entries_sorted_by_key() {
    let table = CommandTable::builtin();
    let keys: Vec<&str> = table.entries().into_iter().map(|(k, _)| k).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_custom_table_normalizes_commands() {
    let table = CommandTable::from_entries([("vol_up", "*vol=+"), ("blank", "*blank=on#")]).unwrap();
    assert_eq!(table.lookup("vol_up").unwrap().as_str(), "*vol=+#");
    assert_eq!(table.lookup("blank").unwrap().as_str(), "*blank=on#");
}

#[test]
fn test_custom_table_rejects_duplicates() {
    let err = CommandTable::from_entries([("a", "*a#"), ("a", "*b#")]).unwrap_err();
    assert!(matches!(err, PanelError::Config(_)));
}

#[test]
fn test_custom_table_rejects_empty_command() {
    let err = CommandTable::from_entries([("a", "")]).unwrap_err();
    assert!(matches!(err, PanelError::MissingCommand));
}
