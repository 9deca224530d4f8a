use std::time::Duration;

use fedclient_dashboard::DashboardConfig;
use fedclient_protocol::DEFAULT_BACKEND_URL;

#[test]
fn empty_file_yields_defaults() {
    let config = DashboardConfig::from_toml("").unwrap();
    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
    assert_eq!(config.tick_rate(), Duration::from_millis(100));
    assert_eq!(config.detail_options().limits.max_depth, 64);
    assert!(config.client.is_unregistered());
}

#[test]
fn sections_override_defaults() {
    let config = DashboardConfig::from_toml(
        r#"
        [backend]
        url = "http://fl.example:9000/api"
        read_timeout_secs = 5

        [ui]
        strict_table = true
        max_tree_depth = 8

        [client]
        client_id = "client-7"
        client_name = "North Clinic"
        "#,
    )
    .unwrap();

    let api = config.api_config();
    assert_eq!(api.base_url, "http://fl.example:9000/api");
    assert_eq!(api.read_timeout, Duration::from_secs(5));
    assert_eq!(api.connect_timeout, Duration::from_secs(10));

    let options = config.detail_options();
    assert!(options.strict_table);
    assert_eq!(options.limits.max_depth, 8);

    assert_eq!(config.client.client_name, "North Clinic");
    assert!(!config.client.is_unregistered());
}

#[test]
fn zero_tick_rate_is_rejected() {
    let err = DashboardConfig::from_toml("[ui]\ntick_rate_ms = 0\n").unwrap_err();
    assert!(err.to_string().contains("tick_rate_ms"));
}

#[test]
fn load_from_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[log]\nfilter = \"fedclient_api=debug\"\nfile = \"/tmp/fc.log\"\n").unwrap();

    let config = DashboardConfig::load(Some(&path)).unwrap();
    assert_eq!(config.log.filter, "fedclient_api=debug");
    assert_eq!(config.log_file(), Some(std::path::PathBuf::from("/tmp/fc.log")));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(DashboardConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[backend\nurl = 1").unwrap();
    let err = DashboardConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("bad.toml"));
}
