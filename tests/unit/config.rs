use trajan::config::Config;

#[test]
fn server_defaults_to_port_8000() {
    let config = Config::from_pairs(Vec::<(String, String)>::new()).unwrap();
    assert_eq!(config.server_port, 8000);
    assert_eq!(config.server().host, "127.0.0.1");
}

#[test]
fn invalid_origin_fails_validation() {
    assert!(Config::from_pairs(vec![("CORS_ORIGINS", "bad\norigin")]).is_err());
}

#[test]
fn server_settings_drive_bind_address_and_origins() {
    let config = Config::from_pairs(vec![
        ("SERVER_HOST", "0.0.0.0"),
        ("SERVER_PORT", "9100"),
        ("CORS_ORIGINS", "https://a.example,https://b.example"),
    ])
    .unwrap();
    let server = config.server();
    assert_eq!(server.address(), "0.0.0.0:9100");
    assert_eq!(server.cors_origins, vec!["https://a.example", "https://b.example"]);
    assert!(!server.allows_any_origin());
}
