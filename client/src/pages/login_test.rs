use super::*;

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  user@example.com  ", "pw"),
        Ok(("user@example.com".to_owned(), "pw".to_owned()))
    );
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    assert_eq!(
        validate_login_input("a@b.com", " secret "),
        Ok(("a@b.com".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter your email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter your email and password."));
}
