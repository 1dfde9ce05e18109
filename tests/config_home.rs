mod support;

use ratekiosk::{
    app_dirs::APP_DIR_NAME,
    config::{self, CONFIG_FILE_NAME, ConfigError, KioskConfig},
    transport::BodyEncoding,
};
use support::config_env::ConfigHomeGuard;

#[test]
fn first_launch_writes_default_template() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());

    let loaded = config::load_or_default().expect("load defaults");
    assert_eq!(loaded, KioskConfig::default());

    let path = temp.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
    assert_eq!(config::config_path().unwrap(), path);
    let text = std::fs::read_to_string(&path).expect("template written");
    assert!(text.contains("acknowledgment_seconds = 5"));
    assert!(text.contains("[transport]"));
}

#[test]
fn edited_file_is_used_on_next_launch() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());

    let path = config::config_path().unwrap();
    std::fs::write(
        &path,
        "endpoint = \"http://kiosk-server:5000/submit_feedback\"\n[transport]\nencoding = \"json\"\n",
    )
    .unwrap();

    let loaded = config::load_or_default().unwrap();
    assert_eq!(loaded.endpoint, "http://kiosk-server:5000/submit_feedback");
    assert_eq!(loaded.transport.encoding, BodyEncoding::Json);
}

#[test]
fn broken_file_is_reported_not_replaced() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());

    let path = config::config_path().unwrap();
    std::fs::write(&path, "acknowledgment_seconds = \"soon\"\n").unwrap();

    let err = config::load_or_default().unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }), "{err}");
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("soon"));
}
