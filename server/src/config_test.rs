use super::*;

// =============================================================================
// env_parse: uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_parse_missing_uses_default() {
    assert_eq!(env_parse::<u16>("__TEST_EP_MISSING__", 3000).unwrap(), 3000);
}

#[test]
fn env_parse_blank_uses_default() {
    let key = "__TEST_EP_BLANK__";
    unsafe { std::env::set_var(key, "  ") };
    assert_eq!(env_parse::<u64>(key, 30).unwrap(), 30);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_reads_trimmed_number() {
    let key = "__TEST_EP_NUMBER__";
    unsafe { std::env::set_var(key, " 8080 ") };
    assert_eq!(env_parse::<u16>(key, 3000).unwrap(), 8080);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_invalid_is_error() {
    let key = "__TEST_EP_INVALID__";
    unsafe { std::env::set_var(key, "eighty") };
    let err = env_parse::<u16>(key, 3000).unwrap_err();
    assert!(matches!(err, HostError::InvalidEnv { ref var, ref value } if var == key && value == "eighty"));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_out_of_range_port_is_error() {
    let key = "__TEST_EP_RANGE__";
    unsafe { std::env::set_var(key, "70000") };
    assert!(env_parse::<u16>(key, 3000).is_err());
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// backend_url
// =============================================================================

#[test]
fn backend_url_defaults_when_absent_or_blank() {
    assert_eq!(backend_url(None), DEFAULT_BACKEND_URL);
    assert_eq!(backend_url(Some("   ")), DEFAULT_BACKEND_URL);
}

#[test]
fn backend_url_trims_trailing_slashes() {
    assert_eq!(backend_url(Some("https://shop.example.com//")), "https://shop.example.com");
    assert_eq!(backend_url(Some(" http://api:8000 ")), "http://api:8000");
}
