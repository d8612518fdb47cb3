use crate::Settings;

#[test]
fn test_unknown_handler_type() {
    let mut settings = Settings::default();
    settings.client.handler_type = "upstart".to_owned();

    let err = settings.service().unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!("Invalid handler type upstart", err.description());
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_service() {
    let service = Settings::default().service().unwrap();
    assert_eq!("dbus", service.handler_type());
}

#[test]
fn test_logger_builder() {
    let settings = Settings::default();
    assert_eq!("unitctl", settings.logger_builder("unitctl").name());
}
