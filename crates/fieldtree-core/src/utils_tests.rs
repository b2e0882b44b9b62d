use crate::utils::{humanize, to_snake_case};

#[test]
fn humanize_snake_case() {
    assert_eq!(humanize("created_at"), "Created at");
    assert_eq!(humanize("a_b_c"), "A b c");
}

#[test]
fn humanize_camel_and_pascal_case() {
    assert_eq!(humanize("firstName"), "First name");
    assert_eq!(humanize("HomeAddress"), "Home address");
}

#[test]
fn humanize_skips_leading_and_repeated_separators() {
    assert_eq!(humanize("_private"), "Private");
    assert_eq!(humanize("foo__bar"), "Foo bar");
    assert_eq!(humanize(""), "");
}

#[test]
fn snake_case_keeps_acronyms_together() {
    assert_eq!(to_snake_case("userID"), "user_id");
    assert_eq!(to_snake_case("HTTPServer"), "httpserver");
    assert_eq!(to_snake_case("already_snake"), "already_snake");
}
