use super::*;

#[test]
fn defaults_to_relative_api_and_no_google() {
    let config = ClientConfig::resolve(None, None);
    assert_eq!(config.api_base_url, "/api");
    assert_eq!(config.google_client_id, "");
    assert!(!config.google_enabled());
    assert_eq!(ClientConfig::default(), config);
}

#[test]
fn trims_trailing_slashes_from_api_base() {
    let config = ClientConfig::resolve(Some("https://shop.example.com/api//"), None);
    assert_eq!(config.api_base_url, "https://shop.example.com/api");
}

#[test]
fn blank_api_base_falls_back_to_default() {
    assert_eq!(ClientConfig::resolve(Some("  "), None).api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn google_client_id_enables_google() {
    let config = ClientConfig::resolve(None, Some(" 123.apps.googleusercontent.com "));
    assert_eq!(config.google_client_id, "123.apps.googleusercontent.com");
    assert!(config.google_enabled());
}
