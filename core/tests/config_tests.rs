use docdex_core::config::{load_config, processes_dir, save_config, Config};
use std::sync::Mutex;
use tempfile::tempdir;

// Serializes the tests in this file: env overrides are process-global.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn missing_config_creates_default_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempdir().unwrap();
    let cfg = load_config(dir.path()).unwrap();
    assert_eq!(cfg.app_name, "docdex");
    assert_eq!(cfg.version, "0.1.0");
    assert!(dir.path().join("config.json").exists());
    assert!(processes_dir(dir.path()).is_dir());
}

#[test]
fn existing_config_is_loaded() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempdir().unwrap();
    let cfg = Config {
        app_name: "customname".to_string(),
        version: "9.9.9".to_string(),
    };
    save_config(dir.path(), &cfg).unwrap();
    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.app_name, "customname");
    assert_eq!(loaded.version, "9.9.9");
}

#[test]
fn env_override_takes_precedence() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempdir().unwrap();
    std::env::set_var("DOCDEX_APP_NAME", "overridden");
    let cfg = load_config(dir.path());
    std::env::remove_var("DOCDEX_APP_NAME");
    assert_eq!(cfg.unwrap().app_name, "overridden");
}

#[test]
fn invalid_config_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"app_name": "", "version": "0.1.0"}"#,
    )
    .unwrap();
    assert!(load_config(dir.path()).is_err());
}
