use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::Action;

#[test]
fn test_parse_known_actions() {
    for action in Action::iter() {
        assert_eq!(action, Action::from_str(&action.to_string()).unwrap());
    }
    assert_eq!(Action::Restart, Action::from_str("restart").unwrap());
}

#[test]
fn test_parse_is_exact() {
    assert!(Action::from_str("bogus").is_err());
    assert!(Action::from_str("Start").is_err());
    assert!(Action::from_str(" start").is_err());
    assert!(Action::from_str("").is_err());
}

#[test]
fn test_changes_unit_files() {
    let unit_file_actions: Vec<_> = Action::iter().filter(Action::changes_unit_files).collect();
    assert_eq!(vec![Action::Enable, Action::Disable], unit_file_actions);
}
